use crate::backend_launch::{BackendLauncher, BackendOutcome};

/// Host operations the startup sequence drives. Implemented over the Tauri
/// app handle at runtime and by recording fakes in tests.
pub(crate) trait ShellHost {
    fn main_window_present(&self) -> bool;
    /// Shows a blocking message dialog.
    fn report_failure(&self, message: &str);
    fn quit(&self);
    fn open_main_window(&self) -> Result<(), String>;
    fn install_app_menu(&self) -> Result<(), String>;
    fn log(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StartupPath {
    Launch,
    Reactivation,
}

impl StartupPath {
    fn as_str(self) -> &'static str {
        match self {
            Self::Launch => "launch",
            Self::Reactivation => "reactivation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StartupDecision {
    ShowMainWindow { install_menu: bool },
    AbortWithMessage(String),
}

pub(crate) fn decide_after_backend(path: StartupPath, outcome: BackendOutcome) -> StartupDecision {
    let (started, message) = outcome.into_parts();
    if !started {
        return StartupDecision::AbortWithMessage(message);
    }

    StartupDecision::ShowMainWindow {
        install_menu: path == StartupPath::Launch,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReactivationDecision {
    IgnoreBecauseMainWindowPresent,
    StartBackend,
}

pub(crate) fn decide_reactivation(main_window_present: bool) -> ReactivationDecision {
    if main_window_present {
        ReactivationDecision::IgnoreBecauseMainWindowPresent
    } else {
        ReactivationDecision::StartBackend
    }
}

pub(crate) fn finish_backend_startup<H>(
    host: &H,
    path: StartupPath,
    outcome: BackendOutcome,
) -> StartupDecision
where
    H: ShellHost + ?Sized,
{
    let decision = decide_after_backend(path, outcome);
    match &decision {
        StartupDecision::AbortWithMessage(message) => {
            host.log(&format!(
                "backend failed to start during {}: {message}",
                path.as_str()
            ));
            host.report_failure(message);
            host.quit();
        }
        StartupDecision::ShowMainWindow { install_menu } => {
            host.log(&format!("backend ready during {}", path.as_str()));
            if let Err(error) = host.open_main_window() {
                host.log(&format!("failed to open main window: {error}"));
                host.report_failure(&error);
                host.quit();
                return StartupDecision::AbortWithMessage(error);
            }
            if *install_menu {
                if let Err(error) = host.install_app_menu() {
                    host.log(&format!("failed to install application menu: {error}"));
                }
            }
        }
    }
    decision
}

pub(crate) fn run_startup<H, L>(host: &H, launcher: &L, path: StartupPath) -> StartupDecision
where
    H: ShellHost + ?Sized,
    L: BackendLauncher + ?Sized,
{
    host.log(&format!("starting backend for {}", path.as_str()));
    let outcome = launcher.launch();
    finish_backend_startup(host, path, outcome)
}

pub(crate) fn handle_reactivation<H, L>(host: &H, launcher: &L) -> Option<StartupDecision>
where
    H: ShellHost + ?Sized,
    L: BackendLauncher + ?Sized,
{
    match decide_reactivation(host.main_window_present()) {
        ReactivationDecision::IgnoreBecauseMainWindowPresent => {
            host.log("reactivation ignored: main window already present");
            None
        }
        ReactivationDecision::StartBackend => {
            Some(run_startup(host, launcher, StartupPath::Reactivation))
        }
    }
}
