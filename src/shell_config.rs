use std::{env, path::PathBuf, time::Duration};

use url::Url;

use crate::{
    runtime_paths, BACKEND_CMD_ENV, BACKEND_DELAY_ENV, BACKEND_TIMEOUT_ENV, BACKEND_URL_ENV,
    DEBUG_PROD_ENV, DEFAULT_BACKEND_DELAY, DEFAULT_BACKEND_TIMEOUT_MS, DEFAULT_BACKEND_URL,
    DESKTOP_ENV_ENV, ROOT_DIR_ENV,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShellConfig {
    pub(crate) production: bool,
    pub(crate) debug: bool,
    pub(crate) root_dir: Option<PathBuf>,
    pub(crate) backend_cmd: Option<String>,
    pub(crate) backend_url: String,
    pub(crate) backend_timeout: Option<Duration>,
    pub(crate) backend_delay: Duration,
}

impl ShellConfig {
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(cfg!(debug_assertions), |key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(debug_build: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let desktop_env = lookup(DESKTOP_ENV_ENV)
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_default();
        let debug_prod = lookup(DEBUG_PROD_ENV)
            .map(|value| value.trim() == "true")
            .unwrap_or(false);

        Self {
            production: desktop_env == "production",
            debug: debug_build || desktop_env == "development" || debug_prod,
            root_dir: runtime_paths::root_dir_from(lookup(ROOT_DIR_ENV)),
            backend_cmd: lookup(BACKEND_CMD_ENV)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            backend_url: normalize_backend_url(
                &lookup(BACKEND_URL_ENV).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
                DEFAULT_BACKEND_URL,
            ),
            backend_timeout: resolve_backend_timeout(lookup(BACKEND_TIMEOUT_ENV).as_deref()),
            backend_delay: lookup(BACKEND_DELAY_ENV)
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_BACKEND_DELAY),
        }
    }
}

pub(crate) fn normalize_backend_url(raw: &str, default_url: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default_url.to_string();
    }

    match Url::parse(trimmed) {
        Ok(mut parsed) => {
            if parsed.path().is_empty() {
                parsed.set_path("/");
            }
            parsed.to_string()
        }
        Err(_) => default_url.to_string(),
    }
}

/// `0` waits forever; unset or unparsable values use the default.
fn resolve_backend_timeout(raw: Option<&str>) -> Option<Duration> {
    let timeout_ms = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_BACKEND_TIMEOUT_MS);
    if timeout_ms == 0 {
        return None;
    }
    Some(Duration::from_millis(timeout_ms))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_with(debug_build: bool, pairs: &[(&str, &str)]) -> ShellConfig {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ShellConfig::from_lookup(debug_build, |key| values.get(key).cloned())
    }

    #[test]
    fn defaults_use_stub_backend_settings() {
        let config = config_with(false, &[]);
        assert!(!config.production);
        assert!(!config.debug);
        assert_eq!(config.backend_cmd, None);
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.backend_delay, Duration::from_millis(3_000));
        assert_eq!(
            config.backend_timeout,
            Some(Duration::from_millis(DEFAULT_BACKEND_TIMEOUT_MS))
        );
    }

    #[test]
    fn debug_is_enabled_by_development_env_or_debug_prod() {
        assert!(config_with(false, &[(DESKTOP_ENV_ENV, "development")]).debug);
        assert!(config_with(false, &[(DEBUG_PROD_ENV, "true")]).debug);
        assert!(config_with(true, &[]).debug);
        assert!(!config_with(false, &[(DEBUG_PROD_ENV, "yes")]).debug);
    }

    #[test]
    fn production_flag_follows_desktop_env() {
        let config = config_with(false, &[(DESKTOP_ENV_ENV, " Production ")]);
        assert!(config.production);
        assert!(!config.debug);
    }

    #[test]
    fn blank_backend_cmd_is_ignored() {
        let config = config_with(false, &[(BACKEND_CMD_ENV, "   ")]);
        assert_eq!(config.backend_cmd, None);
    }

    #[test]
    fn zero_timeout_waits_forever() {
        let config = config_with(false, &[(BACKEND_TIMEOUT_ENV, "0")]);
        assert_eq!(config.backend_timeout, None);
    }

    #[test]
    fn backend_delay_override_is_parsed() {
        let config = config_with(false, &[(BACKEND_DELAY_ENV, "0")]);
        assert_eq!(config.backend_delay, Duration::ZERO);
    }

    #[test]
    fn normalize_backend_url_adds_root_path_and_falls_back() {
        assert_eq!(
            normalize_backend_url("http://localhost:9000", DEFAULT_BACKEND_URL),
            "http://localhost:9000/"
        );
        assert_eq!(
            normalize_backend_url("not a url", DEFAULT_BACKEND_URL),
            DEFAULT_BACKEND_URL
        );
        assert_eq!(normalize_backend_url("  ", DEFAULT_BACKEND_URL), DEFAULT_BACKEND_URL);
    }
}
