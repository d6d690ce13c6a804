use tauri::{AppHandle, ExitRequestApi, Manager};

use crate::{append_shutdown_log, process_control, ShellState};

/// macOS keeps the process alive after the last window closes; an explicit
/// exit code always exits.
pub(crate) fn should_keep_running(exit_code: Option<i32>, is_macos: bool) -> bool {
    exit_code.is_none() && is_macos
}

pub(crate) fn handle_exit_requested(exit_code: Option<i32>, api: &ExitRequestApi) {
    if should_keep_running(exit_code, cfg!(target_os = "macos")) {
        append_shutdown_log("all windows closed, keeping process alive");
        api.prevent_exit();
        return;
    }

    append_shutdown_log(&format!("exit requested: code={exit_code:?}"));
}

pub(crate) fn handle_exit_event(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    if let Some(mut child) = state.take_backend_child() {
        append_shutdown_log(&format!("stopping backend process {}", child.id()));
        process_control::stop_child_process(&mut child);
    }
    append_shutdown_log("desktop process exiting");
}

#[cfg(test)]
mod tests {
    use super::should_keep_running;

    #[test]
    fn last_window_close_keeps_process_alive_only_on_macos() {
        assert!(should_keep_running(None, true));
        assert!(!should_keep_running(None, false));
    }

    #[test]
    fn explicit_exit_code_always_exits() {
        assert!(!should_keep_running(Some(0), true));
        assert!(!should_keep_running(Some(1), false));
    }
}
