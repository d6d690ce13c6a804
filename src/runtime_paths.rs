use std::{env, path::PathBuf};

use crate::ROOT_DIR_ENV;

pub(crate) fn default_root_dir() -> Option<PathBuf> {
    root_dir_from(env::var(ROOT_DIR_ENV).ok())
}

pub(crate) fn root_dir_from(override_value: Option<String>) -> Option<PathBuf> {
    if let Some(value) = override_value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    home::home_dir().map(|home| home.join(".ecuextract"))
}

pub(crate) fn logs_dir(root_dir: &std::path::Path) -> PathBuf {
    root_dir.join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_dir_from_prefers_trimmed_override() {
        assert_eq!(
            root_dir_from(Some("  /tmp/ecux-root ".to_string())),
            Some(PathBuf::from("/tmp/ecux-root"))
        );
    }

    #[test]
    fn root_dir_from_ignores_blank_override() {
        let resolved = root_dir_from(Some("   ".to_string()));
        assert_eq!(resolved, home::home_dir().map(|home| home.join(".ecuextract")));
    }
}
