use tauri::{Manager, RunEvent, WindowEvent};

use crate::{
    append_desktop_log, append_startup_log, exit_events, logging, menu_handler, runtime_paths,
    shell_config::ShellConfig, splash_window, window_actions, ShellState, DESKTOP_LOG_FILE,
};

pub(crate) fn run() {
    let config = ShellConfig::from_env();
    if config.production {
        logging::install_panic_log_hook(append_desktop_log);
    }

    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        logging::resolve_desktop_log_path(runtime_paths::default_root_dir(), DESKTOP_LOG_FILE)
            .display()
    ));
    append_startup_log(&format!(
        "startup mode: production={} debug={} backend={}",
        config.production,
        config.debug,
        if config.backend_cmd.is_some() {
            "command"
        } else {
            "stub"
        }
    ));

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            append_desktop_log("second instance launched, reactivating");
            window_actions::reactivate(app, append_desktop_log);
        }))
        .plugin(tauri_plugin_dialog::init())
        .manage(ShellState::new(config))
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::get_server_port,
            crate::desktop_bridge_commands::show_item_in_folder,
            crate::desktop_bridge_commands::open_external,
            crate::desktop_bridge_commands::show_alert,
        ])
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                window_actions::handle_window_destroyed(
                    window.app_handle(),
                    window.label(),
                    append_desktop_log,
                );
            }
        })
        .on_menu_event(|app, event| menu_handler::handle_menu_event(app, event.id().as_ref()))
        .setup(|app| {
            splash_window::create_splash_window(app.handle())?;
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { code, api, .. } => {
                exit_events::handle_exit_requested(code, &api);
            }
            RunEvent::Exit => {
                exit_events::handle_exit_event(app_handle);
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => {
                window_actions::reactivate(app_handle, append_desktop_log);
            }
            _ => {}
        });
}
