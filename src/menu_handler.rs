use tauri::{AppHandle, Emitter, Manager};

use crate::{
    append_desktop_log, menu_actions, ShellState, MAIN_WINDOW_LABEL, OPEN_FILE_EVENT,
    OPEN_FILE_PAYLOAD,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MenuSignal {
    pub(crate) event: &'static str,
    pub(crate) payload: u8,
}

pub(crate) fn signal_for_action(action: menu_actions::MenuAction) -> MenuSignal {
    match action {
        menu_actions::MenuAction::OpenEcuExtract => MenuSignal {
            event: OPEN_FILE_EVENT,
            payload: OPEN_FILE_PAYLOAD,
        },
    }
}

pub fn handle_menu_event(app_handle: &AppHandle, menu_id: &str) {
    let Some(action) = menu_actions::action_from_menu_id(menu_id) else {
        return;
    };

    let state = app_handle.state::<ShellState>();
    if !state.has_main_window() {
        append_desktop_log(&format!(
            "menu action {action:?} skipped: main window not found"
        ));
        return;
    }

    let signal = signal_for_action(action);
    if let Err(error) = app_handle.emit_to(MAIN_WINDOW_LABEL, signal.event, signal.payload) {
        append_desktop_log(&format!("failed to emit {}: {error}", signal.event));
    }
}
