use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};
use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use url::Url;

use crate::{append_desktop_log, BridgeResult, SERVER_PORT};

fn parse_openable_url(raw_url: &str) -> Result<Url, String> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Err("Missing external URL.".to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|error| format!("Invalid URL: {error}"))?;
    match parsed.scheme() {
        "http" | "https" | "mailto" => Ok(parsed),
        scheme => Err(format!(
            "Unsupported URL scheme '{scheme}', only http/https/mailto are allowed."
        )),
    }
}

fn parse_revealable_path(raw_path: &str) -> Result<PathBuf, String> {
    let trimmed = raw_path.trim();
    if trimmed.is_empty() {
        return Err("Missing path.".to_string());
    }

    let path = PathBuf::from(trimmed);
    if !path.exists() {
        return Err(format!("Path does not exist: {}", path.display()));
    }
    Ok(path)
}

fn spawn_detached(command: &mut Command, program: &str) -> Result<(), String> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run '{program}': {error}"))
}

#[cfg(target_os = "macos")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    spawn_detached(Command::new("open").arg(url), "open")
}

#[cfg(target_os = "windows")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    spawn_detached(
        Command::new("rundll32").args(["url.dll,FileProtocolHandler", url]),
        "rundll32",
    )
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    spawn_detached(Command::new("xdg-open").arg(url), "xdg-open")
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
fn open_url_with_system_browser(_url: &str) -> Result<(), String> {
    Err("Opening external URLs is not supported on this platform.".to_string())
}

#[cfg(target_os = "macos")]
fn reveal_in_file_manager(path: &Path) -> Result<(), String> {
    spawn_detached(Command::new("open").arg("-R").arg(path), "open")
}

/// explorer expects `/select,"<path>"` verbatim; standard argument quoting
/// would wrap the whole string and break paths with spaces.
#[cfg(any(target_os = "windows", test))]
fn explorer_select_arg(path: &Path) -> String {
    format!("/select,\"{}\"", path.display())
}

#[cfg(target_os = "windows")]
fn reveal_in_file_manager(path: &Path) -> Result<(), String> {
    use std::os::windows::process::CommandExt;

    spawn_detached(
        Command::new("explorer").raw_arg(explorer_select_arg(path)),
        "explorer",
    )
}

#[cfg(all(unix, not(target_os = "macos")))]
fn reveal_in_file_manager(path: &Path) -> Result<(), String> {
    // xdg-open cannot select a file, so open the containing directory.
    let target = if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or(path)
    };
    spawn_detached(Command::new("xdg-open").arg(target), "xdg-open")
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
fn reveal_in_file_manager(_path: &Path) -> Result<(), String> {
    Err("Revealing files is not supported on this platform.".to_string())
}

#[tauri::command]
pub(crate) fn get_server_port() -> u16 {
    SERVER_PORT
}

#[tauri::command]
pub(crate) fn show_item_in_folder(path: String) -> BridgeResult {
    let result = parse_revealable_path(&path).and_then(|path| reveal_in_file_manager(&path));
    if let Err(error) = &result {
        append_desktop_log(&format!("show_item_in_folder failed: {error}"));
    }
    result.into()
}

#[tauri::command]
pub(crate) fn open_external(url: String) -> BridgeResult {
    let result =
        parse_openable_url(&url).and_then(|parsed| open_url_with_system_browser(parsed.as_ref()));
    if let Err(error) = &result {
        append_desktop_log(&format!("open_external failed: {error}"));
    }
    result.into()
}

#[tauri::command]
pub(crate) fn show_alert(app_handle: AppHandle, message: String) -> BridgeResult {
    app_handle
        .dialog()
        .message(message)
        .title(app_handle.package_info().name.clone())
        .kind(MessageDialogKind::Info)
        .show(|_| {});
    BridgeResult::ok()
}
