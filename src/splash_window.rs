use std::sync::atomic::Ordering;

use tauri::{
    webview::PageLoadEvent, AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder,
};

use crate::{
    append_startup_log, asset_paths, startup_flow::StartupPath, startup_task, ShellState,
    SPLASH_WINDOW_ICON, SPLASH_WINDOW_LABEL, SPLASH_WINDOW_URL,
};

const SPLASH_WIDTH: f64 = 1024.0;
const SPLASH_HEIGHT: f64 = 300.0;

pub(crate) fn create_splash_window(app_handle: &AppHandle) -> Result<(), String> {
    let state = app_handle.state::<ShellState>();
    if state.with_windows(|windows| windows.has_splash()) {
        return Err("Splash window already exists.".to_string());
    }

    let mut builder = WebviewWindowBuilder::new(
        app_handle,
        SPLASH_WINDOW_LABEL,
        WebviewUrl::App(SPLASH_WINDOW_URL.into()),
    )
    .title(app_handle.package_info().name.clone())
    .inner_size(SPLASH_WIDTH, SPLASH_HEIGHT)
    .decorations(false)
    .transparent(true)
    .resizable(false)
    .skip_taskbar(true)
    .visible(false)
    .center()
    .on_page_load(|window, payload| {
        if let PageLoadEvent::Finished = payload.event() {
            reveal_splash_window(&window);
        }
    });
    if let Some(icon) =
        asset_paths::load_window_icon(app_handle, SPLASH_WINDOW_ICON, append_startup_log)
    {
        builder = builder
            .icon(icon)
            .map_err(|error| format!("Failed to set splash window icon: {error}"))?;
    }

    let window = builder
        .build()
        .map_err(|error| format!("Failed to create splash window: {error}"))?;
    state
        .with_windows(|windows| windows.attach_splash(window))
        .map_err(|window| {
            let _ = window.destroy();
            "Splash window already exists.".to_string()
        })?;
    append_startup_log("splash window created");
    Ok(())
}

/// Shows the splash once its content is ready and kicks off backend startup.
fn reveal_splash_window(window: &WebviewWindow) {
    let app_handle = window.app_handle();
    let state = app_handle.state::<ShellState>();
    if state.splash_revealed.swap(true, Ordering::AcqRel) {
        return;
    }

    if let Err(error) = window.center() {
        append_startup_log(&format!("failed to center splash window: {error}"));
    }
    if let Err(error) = window.show() {
        append_startup_log(&format!("failed to show splash window: {error}"));
    }
    startup_task::spawn_startup_task(app_handle.clone(), StartupPath::Launch);
}

pub(crate) fn destroy_splash_window(splash: &WebviewWindow) {
    match splash.destroy() {
        Ok(()) => append_startup_log("splash window closed"),
        Err(error) => append_startup_log(&format!("failed to destroy splash window: {error}")),
    }
}
