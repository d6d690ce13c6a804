use std::{
    sync::{Mutex, OnceLock},
    time::Duration,
};

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const SPLASH_WINDOW_LABEL: &str = "splash";
pub(crate) const MAIN_WINDOW_URL: &str = "index.html";
pub(crate) const SPLASH_WINDOW_URL: &str = "splash.html";
pub(crate) const MAIN_WINDOW_ICON: &str = "icon.png";
pub(crate) const SPLASH_WINDOW_ICON: &[&str] = &["images", "icon.ico"];

pub(crate) const SERVER_PORT: u16 = 1234;
pub(crate) const SET_SERVER_PORT_EVENT: &str = "set-server-port";
pub(crate) const OPEN_FILE_EVENT: &str = "open-file";
pub(crate) const OPEN_FILE_PAYLOAD: u8 = 1;

pub(crate) const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:1234/";
pub(crate) const DEFAULT_BACKEND_DELAY: Duration = Duration::from_millis(3_000);
pub(crate) const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 20_000;
pub(crate) const BACKEND_PING_TIMEOUT_MS: u64 = 800;
pub(crate) const BACKEND_POLL_INTERVAL: Duration = Duration::from_millis(600);

pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const BACKEND_LOG_FILE: &str = "backend.log";
pub(crate) const DESKTOP_LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub(crate) const LOG_BACKUP_COUNT: usize = 5;
pub(crate) static DESKTOP_LOG_WRITE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub(crate) const ROOT_DIR_ENV: &str = "ECUX_ROOT";
pub(crate) const DESKTOP_ENV_ENV: &str = "ECUX_DESKTOP_ENV";
pub(crate) const DEBUG_PROD_ENV: &str = "ECUX_DEBUG_PROD";
pub(crate) const BACKEND_CMD_ENV: &str = "ECUX_BACKEND_CMD";
pub(crate) const BACKEND_URL_ENV: &str = "ECUX_BACKEND_URL";
pub(crate) const BACKEND_TIMEOUT_ENV: &str = "ECUX_BACKEND_TIMEOUT_MS";
pub(crate) const BACKEND_DELAY_ENV: &str = "ECUX_BACKEND_DELAY_MS";
