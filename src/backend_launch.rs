use std::{
    fs::{self, OpenOptions},
    net::{TcpStream, ToSocketAddrs},
    path::Path,
    process::{Child, Command, Stdio},
    thread,
    time::{Duration, Instant},
};

use url::Url;

use crate::{
    process_control, runtime_paths, shell_config::ShellConfig, LaunchPlan, BACKEND_LOG_FILE,
    BACKEND_PING_TIMEOUT_MS, BACKEND_POLL_INTERVAL,
};

/// Result of a backend startup attempt, `(true, "")` on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BackendOutcome {
    pub(crate) started: bool,
    pub(crate) message: String,
}

impl BackendOutcome {
    pub(crate) fn success() -> Self {
        Self {
            started: true,
            message: String::new(),
        }
    }

    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self {
            started: false,
            message: message.into(),
        }
    }

    pub(crate) fn into_parts(self) -> (bool, String) {
        (self.started, self.message)
    }
}

impl From<Result<(), String>> for BackendOutcome {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(message) => Self::failure(message),
        }
    }
}

pub(crate) trait BackendLauncher: Send + Sync {
    fn launch(&self) -> BackendOutcome;
}

/// Placeholder backend: waits, then reports success.
#[derive(Debug, Clone)]
pub(crate) struct StubBackend {
    delay: Duration,
}

impl StubBackend {
    pub(crate) fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl BackendLauncher for StubBackend {
    fn launch(&self) -> BackendOutcome {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        BackendOutcome::success()
    }
}

/// Spawns an external backend process and waits for its URL to accept
/// connections. The running child is handed to `on_spawned`.
pub(crate) struct CommandBackend<F> {
    plan: LaunchPlan,
    backend_url: String,
    timeout: Option<Duration>,
    on_spawned: F,
}

impl<F> CommandBackend<F>
where
    F: Fn(Child) + Send + Sync,
{
    pub(crate) fn new(
        plan: LaunchPlan,
        backend_url: String,
        timeout: Option<Duration>,
        on_spawned: F,
    ) -> Self {
        Self {
            plan,
            backend_url,
            timeout,
            on_spawned,
        }
    }

    fn spawn(&self) -> Result<Child, String> {
        let mut command = Command::new(&self.plan.cmd);
        command.args(&self.plan.args).stdin(Stdio::null());

        if let Some(log_path) = &self.plan.log_path {
            if let Some(log_parent) = log_path.parent() {
                fs::create_dir_all(log_parent).map_err(|error| {
                    format!(
                        "Failed to create backend log directory {}: {}",
                        log_parent.display(),
                        error
                    )
                })?;
            }
            let stdout_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
                .map_err(|error| {
                    format!("Failed to open backend log {}: {}", log_path.display(), error)
                })?;
            let stderr_file = stdout_file
                .try_clone()
                .map_err(|error| format!("Failed to clone backend log handle: {error}"))?;
            command.stdout(Stdio::from(stdout_file));
            command.stderr(Stdio::from(stderr_file));
        } else {
            command.stdout(Stdio::null());
            command.stderr(Stdio::null());
        }

        command.spawn().map_err(|error| {
            format!(
                "Failed to spawn backend process with command {:?}: {}",
                build_debug_command(&self.plan),
                error
            )
        })
    }

    fn wait_for_backend(&self, child: &mut Child) -> Result<(), String> {
        let start_time = Instant::now();

        loop {
            if ping_backend(&self.backend_url, BACKEND_PING_TIMEOUT_MS) {
                return Ok(());
            }

            match child.try_wait() {
                Ok(Some(status)) => {
                    return Err(format!(
                        "Backend process exited before becoming reachable: {status}"
                    ));
                }
                Ok(None) => {}
                Err(error) => {
                    return Err(format!("Failed to poll backend process status: {error}"));
                }
            }

            if let Some(limit) = self.timeout {
                if start_time.elapsed() >= limit {
                    return Err(format!(
                        "Timed out after {}ms waiting for backend startup.",
                        limit.as_millis()
                    ));
                }
            }

            thread::sleep(BACKEND_POLL_INTERVAL);
        }
    }

    fn start(&self) -> Result<(), String> {
        if ping_backend(&self.backend_url, BACKEND_PING_TIMEOUT_MS) {
            return Ok(());
        }

        let mut child = self.spawn()?;
        if let Err(error) = self.wait_for_backend(&mut child) {
            process_control::stop_child_process(&mut child);
            return Err(error);
        }
        (self.on_spawned)(child);
        Ok(())
    }
}

impl<F> BackendLauncher for CommandBackend<F>
where
    F: Fn(Child) + Send + Sync,
{
    fn launch(&self) -> BackendOutcome {
        self.start().into()
    }
}

pub(crate) fn resolve_launch_plan(
    custom_cmd: &str,
    root_dir: Option<&Path>,
) -> Result<LaunchPlan, String> {
    let mut pieces =
        shlex::split(custom_cmd).ok_or_else(|| format!("Invalid backend command: {custom_cmd}"))?;
    if pieces.is_empty() {
        return Err("Backend command is empty.".to_string());
    }

    let cmd = pieces.remove(0);
    Ok(LaunchPlan {
        cmd,
        args: pieces,
        log_path: root_dir.map(|root| runtime_paths::logs_dir(root).join(BACKEND_LOG_FILE)),
    })
}

/// Picks the process launcher when a backend command is configured and the
/// timed placeholder otherwise.
pub(crate) fn launcher_for_config<F>(
    config: &ShellConfig,
    on_spawned: F,
) -> Result<Box<dyn BackendLauncher>, String>
where
    F: Fn(Child) + Send + Sync + 'static,
{
    let Some(custom_cmd) = config.backend_cmd.as_deref() else {
        return Ok(Box::new(StubBackend::new(config.backend_delay)));
    };

    let plan = resolve_launch_plan(custom_cmd, config.root_dir.as_deref())?;
    Ok(Box::new(CommandBackend::new(
        plan,
        config.backend_url.clone(),
        config.backend_timeout,
        on_spawned,
    )))
}

pub(crate) fn build_debug_command(plan: &LaunchPlan) -> Vec<String> {
    let mut parts = vec![plan.cmd.clone()];
    parts.extend(plan.args.clone());
    parts
}

pub(crate) fn ping_backend(backend_url: &str, timeout_ms: u64) -> bool {
    let parsed = match Url::parse(backend_url) {
        Ok(url) => url,
        Err(_) => return false,
    };
    let host = match parsed.host_str() {
        Some(host) => host.to_string(),
        None => return false,
    };
    let port = parsed.port_or_known_default().unwrap_or(80);
    let timeout = Duration::from_millis(timeout_ms.max(50));

    let addrs = match (host.as_str(), port).to_socket_addrs() {
        Ok(addrs) => addrs.collect::<Vec<_>>(),
        Err(_) => return false,
    };
    addrs
        .iter()
        .any(|address| TcpStream::connect_timeout(address, timeout).is_ok())
}
