use std::{
    path::PathBuf,
    process::Child,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};
use tauri::WebviewWindow;

use crate::{
    append_desktop_log, process_control, shell_config::ShellConfig, window_state::WindowRegistry,
};

#[derive(Debug)]
pub(crate) struct LaunchPlan {
    pub(crate) cmd: String,
    pub(crate) args: Vec<String>,
    pub(crate) log_path: Option<PathBuf>,
}

pub(crate) struct ShellState {
    pub(crate) config: ShellConfig,
    pub(crate) windows: Mutex<WindowRegistry<WebviewWindow>>,
    pub(crate) backend_child: Mutex<Option<Child>>,
    pub(crate) is_starting: AtomicBool,
    pub(crate) splash_revealed: AtomicBool,
}

impl ShellState {
    pub(crate) fn new(config: ShellConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(WindowRegistry::default()),
            backend_child: Mutex::new(None),
            is_starting: AtomicBool::new(false),
            splash_revealed: AtomicBool::new(false),
        }
    }

    pub(crate) fn with_windows<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut WindowRegistry<WebviewWindow>) -> R,
    {
        match self.windows.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(error) => {
                append_desktop_log(&format!("window registry lock poisoned: {error}"));
                f(&mut error.into_inner())
            }
        }
    }

    pub(crate) fn has_main_window(&self) -> bool {
        self.with_windows(|windows| windows.has_main())
    }

    /// Stores the running backend child. A previously stored child is
    /// stopped so it never outlives the shell.
    pub(crate) fn store_backend_child(&self, child: Child) {
        let previous = match self.backend_child.lock() {
            Ok(mut guard) => guard.replace(child),
            Err(error) => {
                append_desktop_log(&format!(
                    "backend child lock poisoned when storing child: {error}"
                ));
                error.into_inner().replace(child)
            }
        };
        if let Some(mut previous) = previous {
            append_desktop_log(&format!(
                "stopping previous backend process {}",
                previous.id()
            ));
            process_control::stop_child_process(&mut previous);
        }
    }

    pub(crate) fn take_backend_child(&self) -> Option<Child> {
        match self.backend_child.lock() {
            Ok(mut guard) => guard.take(),
            Err(error) => {
                append_desktop_log(&format!(
                    "backend child lock poisoned when taking child: {error}"
                ));
                error.into_inner().take()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub(crate) struct BridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl BridgeResult {
    pub(crate) fn ok() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

impl From<Result<(), String>> for BridgeResult {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(reason) => Self::failed(reason),
        }
    }
}

pub(crate) struct AtomicFlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> AtomicFlagGuard<'a> {
    pub(crate) fn try_set(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { flag })
    }
}

impl Drop for AtomicFlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::{AtomicFlagGuard, BridgeResult};
    #[cfg(unix)]
    use super::ShellState;
    #[cfg(unix)]
    use crate::shell_config::ShellConfig;

    #[test]
    fn atomic_flag_guard_try_set_rejects_double_set_until_drop() {
        let flag = AtomicBool::new(false);

        let guard = AtomicFlagGuard::try_set(&flag).expect("first set should succeed");
        assert!(flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_some());
    }

    #[test]
    fn bridge_result_from_error_carries_reason() {
        let result = BridgeResult::from(Err::<(), _>("Path does not exist.".to_string()));
        assert_eq!(result, BridgeResult::failed("Path does not exist."));
        assert_eq!(BridgeResult::from(Ok(())), BridgeResult::ok());
    }

    #[test]
    fn bridge_result_serializes_ok_and_reason() {
        let value = serde_json::to_value(BridgeResult::failed("nope")).expect("serialize");
        assert_eq!(value, serde_json::json!({ "ok": false, "reason": "nope" }));
    }

    #[cfg(unix)]
    #[test]
    fn store_backend_child_stops_previously_stored_child() {
        use std::process::{Command, Stdio};

        let state = ShellState::new(ShellConfig::from_lookup(false, |_| None));
        let spawn_sleep = || {
            Command::new("sleep")
                .arg("30")
                .stdout(Stdio::null())
                .spawn()
                .expect("spawn sleep")
        };
        let first = spawn_sleep();
        let first_pid = first.id();
        state.store_backend_child(first);
        state.store_backend_child(spawn_sleep());

        let mut second = state.take_backend_child().expect("second child stored");
        assert_ne!(second.id(), first_pid);
        assert!(second.try_wait().expect("poll second").is_none());
        crate::process_control::stop_child_process(&mut second);

        // The first child was reaped by store_backend_child, so its pid is gone.
        let status = Command::new("kill")
            .args(["-0", &first_pid.to_string()])
            .stderr(Stdio::null())
            .status()
            .expect("run kill -0");
        assert!(!status.success());
        assert!(state.take_backend_child().is_none());
    }
}
