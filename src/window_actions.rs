use tauri::{AppHandle, Manager};

use crate::{main_window, startup_flow::StartupPath, startup_task, ShellState};

pub fn handle_window_destroyed<F>(app_handle: &AppHandle, label: &str, log: F)
where
    F: Fn(&str),
{
    let state = app_handle.state::<ShellState>();
    if state.with_windows(|windows| windows.forget_window(label)) {
        log("main window closed");
    }
}

/// Brings the main window forward, or restarts the window sequence when the
/// main window is gone.
pub fn reactivate<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let state = app_handle.state::<ShellState>();
    match state.with_windows(|windows| windows.main().cloned()) {
        Some(window) => main_window::focus_window(&window),
        None => {
            log("reactivated without main window, restarting backend");
            startup_task::spawn_startup_task(app_handle.clone(), StartupPath::Reactivation);
        }
    }
}
