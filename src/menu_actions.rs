pub const MENU_OPEN_ECU_EXTRACT: &str = "menu_open_ecu_extract";
pub const MENU_FILE_LABEL: &str = "File";
pub const MENU_OPEN_ECU_EXTRACT_LABEL: &str = "Open EcuExtract File";
pub const MENU_OPEN_ECU_EXTRACT_ACCELERATOR: &str = "CmdOrCtrl+O";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    OpenEcuExtract,
}

pub fn action_from_menu_id(menu_id: &str) -> Option<MenuAction> {
    match menu_id {
        MENU_OPEN_ECU_EXTRACT => Some(MenuAction::OpenEcuExtract),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_from_menu_id_maps_open_ecu_extract() {
        assert_eq!(
            action_from_menu_id(MENU_OPEN_ECU_EXTRACT),
            Some(MenuAction::OpenEcuExtract)
        );
    }

    #[test]
    fn action_from_menu_id_returns_none_for_unknown_menu_id() {
        assert_eq!(action_from_menu_id("unknown-menu"), None);
    }
}
