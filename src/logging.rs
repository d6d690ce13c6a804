use std::{
    backtrace::Backtrace,
    env,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, OnceLock},
};

use chrono::{DateTime, Local};

use crate::runtime_paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopLogCategory {
    Startup,
    Runtime,
    Backend,
    Shutdown,
}

impl DesktopLogCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Runtime => "runtime",
            Self::Backend => "backend",
            Self::Shutdown => "shutdown",
        }
    }
}

pub fn resolve_desktop_log_path(root_dir: Option<PathBuf>, log_file_name: &str) -> PathBuf {
    match root_dir {
        Some(root) => runtime_paths::logs_dir(&root).join(log_file_name),
        None => env::temp_dir().join("ecuextract").join(log_file_name),
    }
}

fn format_log_line(category: DesktopLogCategory, message: &str, now: DateTime<Local>) -> String {
    format!(
        "[{}] [{}] {}\n",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        category.as_str(),
        message
    )
}

fn backup_log_path(path: &Path, index: usize) -> PathBuf {
    let mut file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    file_name.push(format!(".{index}"));
    path.with_file_name(file_name)
}

/// Shifts `desktop.log` to `desktop.log.1`, `.1` to `.2` and so on once the
/// live file reaches `max_bytes`. The oldest backup beyond `backup_count` is
/// dropped.
pub(crate) fn rotate_log_if_needed(
    path: &Path,
    max_bytes: u64,
    backup_count: usize,
) -> Result<(), String> {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(error) => {
            return Err(format!(
                "Failed to read log metadata {}: {}",
                path.display(),
                error
            ))
        }
    };
    if size < max_bytes {
        return Ok(());
    }

    if backup_count == 0 {
        return fs::remove_file(path)
            .map_err(|error| format!("Failed to truncate log {}: {}", path.display(), error));
    }

    let oldest = backup_log_path(path, backup_count);
    if oldest.exists() {
        fs::remove_file(&oldest).map_err(|error| {
            format!(
                "Failed to remove oldest log backup {}: {}",
                oldest.display(),
                error
            )
        })?;
    }
    for index in (1..backup_count).rev() {
        let source = backup_log_path(path, index);
        if source.exists() {
            let target = backup_log_path(path, index + 1);
            fs::rename(&source, &target).map_err(|error| {
                format!(
                    "Failed to rotate log backup {} -> {}: {}",
                    source.display(),
                    target.display(),
                    error
                )
            })?;
        }
    }
    let first_backup = backup_log_path(path, 1);
    fs::rename(path, &first_backup).map_err(|error| {
        format!(
            "Failed to rotate log {} -> {}: {}",
            path.display(),
            first_backup.display(),
            error
        )
    })
}

fn write_log_line(
    path: &Path,
    line: &str,
    max_bytes: u64,
    backup_count: usize,
) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            format!("Failed to create log directory {}: {}", parent.display(), error)
        })?;
    }
    rotate_log_if_needed(path, max_bytes, backup_count)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log {}: {}", path.display(), error))?;
    file.write_all(line.as_bytes())
        .map_err(|error| format!("Failed to write log {}: {}", path.display(), error))
}

pub fn append_desktop_log(
    category: DesktopLogCategory,
    message: &str,
    root_dir: Option<PathBuf>,
    log_file_name: &str,
    max_bytes: u64,
    backup_count: usize,
    write_lock: &OnceLock<Mutex<()>>,
) {
    let line = format_log_line(category, message, Local::now());
    if cfg!(debug_assertions) {
        eprint!("{line}");
    }

    let path = resolve_desktop_log_path(root_dir, log_file_name);
    let lock = write_lock.get_or_init(|| Mutex::new(()));
    let _guard = match lock.lock() {
        Ok(guard) => guard,
        Err(error) => error.into_inner(),
    };
    if let Err(error) = write_log_line(&path, &line, max_bytes, backup_count) {
        eprintln!("desktop log write failed: {error}");
    }
}

/// Records panics to the desktop log with a captured backtrace.
pub fn install_panic_log_hook<F>(log: F)
where
    F: Fn(&str) + Send + Sync + 'static,
{
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log(&format!(
            "panic: {info}\nbacktrace:\n{}",
            Backtrace::force_capture()
        ));
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn resolve_desktop_log_path_uses_logs_dir_under_root() {
        let path = resolve_desktop_log_path(Some(PathBuf::from("/data/ecux")), "desktop.log");
        assert_eq!(path, PathBuf::from("/data/ecux/logs/desktop.log"));
    }

    #[test]
    fn format_log_line_includes_timestamp_and_category() {
        let now = Local
            .with_ymd_and_hms(2024, 3, 9, 8, 7, 6)
            .single()
            .expect("valid local timestamp");
        let line = format_log_line(DesktopLogCategory::Backend, "backend ready", now);
        assert_eq!(line, "[2024-03-09 08:07:06.000] [backend] backend ready\n");
    }

    #[test]
    fn rotate_log_if_needed_shifts_backups() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log_path = dir.path().join("desktop.log");
        fs::write(&log_path, "0123456789").expect("write live log");
        fs::write(backup_log_path(&log_path, 1), "older").expect("write backup");

        rotate_log_if_needed(&log_path, 5, 3).expect("rotation succeeds");

        assert!(!log_path.exists());
        assert_eq!(
            fs::read_to_string(backup_log_path(&log_path, 1)).expect("read .1"),
            "0123456789"
        );
        assert_eq!(
            fs::read_to_string(backup_log_path(&log_path, 2)).expect("read .2"),
            "older"
        );
    }

    #[test]
    fn rotate_log_if_needed_keeps_small_logs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log_path = dir.path().join("desktop.log");
        fs::write(&log_path, "abc").expect("write live log");

        rotate_log_if_needed(&log_path, 1024, 3).expect("rotation succeeds");

        assert_eq!(fs::read_to_string(&log_path).expect("read log"), "abc");
    }

    #[test]
    fn append_desktop_log_creates_log_file_under_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let lock = OnceLock::new();

        append_desktop_log(
            DesktopLogCategory::Startup,
            "desktop process starting",
            Some(dir.path().to_path_buf()),
            "desktop.log",
            1024,
            2,
            &lock,
        );

        let written = fs::read_to_string(dir.path().join("logs").join("desktop.log"))
            .expect("log file written");
        assert!(written.contains("[startup] desktop process starting"));
    }
}
