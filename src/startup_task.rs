use std::thread;

use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::{
    append_backend_log, append_startup_log,
    backend_launch::{self, BackendOutcome},
    main_window, menu_setup,
    startup_flow::{self, ShellHost, StartupPath},
    AtomicFlagGuard, ShellState,
};

pub(crate) struct TauriShellHost {
    app_handle: AppHandle,
}

impl TauriShellHost {
    pub(crate) fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

impl ShellHost for TauriShellHost {
    fn main_window_present(&self) -> bool {
        self.app_handle.state::<ShellState>().has_main_window()
    }

    fn report_failure(&self, message: &str) {
        self.app_handle
            .dialog()
            .message(message)
            .title(self.app_handle.package_info().name.clone())
            .kind(MessageDialogKind::Error)
            .blocking_show();
    }

    fn quit(&self) {
        self.app_handle.exit(0);
    }

    fn open_main_window(&self) -> Result<(), String> {
        main_window::open_main_window(&self.app_handle)
    }

    fn install_app_menu(&self) -> Result<(), String> {
        menu_setup::install_app_menu(&self.app_handle)
    }

    fn log(&self, message: &str) {
        append_startup_log(message);
    }
}

/// Runs backend startup off the UI thread. Only one startup runs at a time.
pub(crate) fn spawn_startup_task(app_handle: AppHandle, path: StartupPath) {
    let spawn_result = thread::Builder::new()
        .name("ecux-startup".to_string())
        .spawn(move || run_startup_task(&app_handle, path));
    if let Err(error) = spawn_result {
        append_startup_log(&format!("failed to spawn startup task: {error}"));
    }
}

fn run_startup_task(app_handle: &AppHandle, path: StartupPath) {
    let state = app_handle.state::<ShellState>();
    let Some(_starting) = AtomicFlagGuard::try_set(&state.is_starting) else {
        append_startup_log("startup skipped: another startup is already in progress");
        return;
    };

    let host = TauriShellHost::new(app_handle.clone());
    let child_app = app_handle.clone();
    let launcher = match backend_launch::launcher_for_config(&state.config, move |child| {
        append_backend_log(&format!("backend process running with pid {}", child.id()));
        child_app.state::<ShellState>().store_backend_child(child);
    }) {
        Ok(launcher) => launcher,
        Err(error) => {
            startup_flow::finish_backend_startup(&host, path, BackendOutcome::failure(error));
            return;
        }
    };

    match path {
        StartupPath::Launch => {
            startup_flow::run_startup(&host, launcher.as_ref(), path);
        }
        StartupPath::Reactivation => {
            startup_flow::handle_reactivation(&host, launcher.as_ref());
        }
    }
}
