use tauri::{
    menu::{Menu, MenuItem, Submenu},
    AppHandle,
};

use crate::menu_actions;

pub fn install_app_menu(app_handle: &AppHandle) -> Result<(), String> {
    let open_item = MenuItem::with_id(
        app_handle,
        menu_actions::MENU_OPEN_ECU_EXTRACT,
        menu_actions::MENU_OPEN_ECU_EXTRACT_LABEL,
        true,
        Some(menu_actions::MENU_OPEN_ECU_EXTRACT_ACCELERATOR),
    )
    .map_err(|error| format!("Failed to create open menu item: {error}"))?;
    let file_menu = Submenu::with_items(
        app_handle,
        menu_actions::MENU_FILE_LABEL,
        true,
        &[&open_item],
    )
    .map_err(|error| format!("Failed to create file submenu: {error}"))?;
    let menu = Menu::with_items(app_handle, &[&file_menu])
        .map_err(|error| format!("Failed to build application menu: {error}"))?;

    app_handle
        .set_menu(menu)
        .map_err(|error| format!("Failed to set application menu: {error}"))?;
    Ok(())
}
