use tauri::{
    webview::PageLoadEvent, AppHandle, Emitter, Manager, WebviewUrl, WebviewWindow,
    WebviewWindowBuilder,
};

use crate::{
    append_desktop_log, append_startup_log, asset_paths, splash_window, window_state::MainReady,
    ShellState, MAIN_WINDOW_ICON, MAIN_WINDOW_LABEL, MAIN_WINDOW_URL, SERVER_PORT,
    SET_SERVER_PORT_EVENT,
};

const MAIN_WIDTH: f64 = 1024.0;
const MAIN_HEIGHT: f64 = 728.0;

/// Creates the hidden main window. It becomes visible once its content has
/// loaded. An already registered main window is focused instead.
pub(crate) fn open_main_window(app_handle: &AppHandle) -> Result<(), String> {
    let state = app_handle.state::<ShellState>();
    if let Some(existing) = state.with_windows(|windows| windows.main().cloned()) {
        focus_window(&existing);
        return Ok(());
    }

    let mut builder = WebviewWindowBuilder::new(
        app_handle,
        MAIN_WINDOW_LABEL,
        WebviewUrl::App(MAIN_WINDOW_URL.into()),
    )
    .title(app_handle.package_info().name.clone())
    .inner_size(MAIN_WIDTH, MAIN_HEIGHT)
    .visible(false)
    .on_page_load(|window, payload| {
        if let PageLoadEvent::Finished = payload.event() {
            append_desktop_log(&format!("main window loaded: {}", payload.url()));
            push_server_port(window.app_handle());
            reveal_main_window(&window);
        }
    });
    if let Some(icon) =
        asset_paths::load_window_icon(app_handle, &[MAIN_WINDOW_ICON], append_startup_log)
    {
        builder = builder
            .icon(icon)
            .map_err(|error| format!("Failed to set main window icon: {error}"))?;
    }

    let window = builder
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;
    if state.config.debug {
        window.open_devtools();
    }
    state
        .with_windows(|windows| windows.attach_main(window))
        .map_err(|window| {
            let _ = window.destroy();
            "Main window already exists.".to_string()
        })?;
    append_startup_log("main window created");
    Ok(())
}

fn push_server_port(app_handle: &AppHandle) {
    if let Err(error) = app_handle.emit_to(MAIN_WINDOW_LABEL, SET_SERVER_PORT_EVENT, SERVER_PORT) {
        append_desktop_log(&format!("failed to push server port: {error}"));
    }
}

fn reveal_main_window(window: &WebviewWindow) {
    let state = window.app_handle().state::<ShellState>();
    match state.with_windows(|windows| windows.mark_main_ready()) {
        MainReady::Reveal { splash } => {
            if let Some(splash) = splash {
                splash_window::destroy_splash_window(&splash);
            }
            focus_window(window);
        }
        MainReady::AlreadyShown => {}
    }
}

pub(crate) fn focus_window(window: &WebviewWindow) {
    if let Ok(true) = window.is_minimized() {
        if let Err(error) = window.unminimize() {
            append_desktop_log(&format!("failed to unminimize {}: {error}", window.label()));
        }
    }
    if let Err(error) = window.show() {
        append_desktop_log(&format!("failed to show {}: {error}", window.label()));
    }
    if let Err(error) = window.set_focus() {
        append_desktop_log(&format!("failed to focus {}: {error}", window.label()));
    }
}
