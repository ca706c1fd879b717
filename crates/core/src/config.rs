//! Configuration path utilities for microgen.
//!
//! This module provides functions for resolving the scripts root, the
//! settings file and the YAML state files, expanding `~` in user paths.

use std::path::{Path, PathBuf};

/// Directory under the system temp dir that scripts are staged into.
pub const SCRIPTS_DIR_NAME: &str = "microgen_scripts";
/// Settings file kept beside the staged scripts.
pub const SETTINGS_FILE_NAME: &str = "settings.properties";

/// Default path for the action overrides file
const DEFAULT_ACTIONS_PATH: &str = "~/.microgen/actions.yml";
/// Default path for storing the last run
const DEFAULT_LAST_RUN_PATH: &str = "~/.microgen/last_run.yml";

/// Expands `~` in a user supplied path.
#[must_use]
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Resolves the scripts root.
///
/// Uses the given path if any, otherwise `<temp dir>/microgen_scripts`.
///
/// # Examples
///
/// ```
/// use microgen_core::config::get_scripts_root;
///
/// let default_root = get_scripts_root(&None);
/// assert!(default_root.ends_with("microgen_scripts"));
/// ```
#[must_use]
pub fn get_scripts_root(scripts_root_arg: &Option<String>) -> PathBuf {
    match scripts_root_arg {
        Some(scripts_root) => expand_path(scripts_root),
        None => std::env::temp_dir().join(SCRIPTS_DIR_NAME),
    }
}

#[must_use]
pub fn get_settings_path(scripts_root: &Path) -> PathBuf {
    scripts_root.join(SETTINGS_FILE_NAME)
}

/// Resolves the action overrides file path, `~/.microgen/actions.yml` by default.
#[must_use]
pub fn get_actions_path(actions_path_arg: &Option<String>) -> String {
    let actions_path = match actions_path_arg {
        Some(actions_path) => actions_path,
        None => DEFAULT_ACTIONS_PATH,
    };

    shellexpand::tilde(actions_path).to_string()
}

/// Resolves the last run file path, `~/.microgen/last_run.yml` by default.
#[must_use]
pub fn get_last_run_path(last_run_path_arg: &Option<String>) -> String {
    let last_run_path = match last_run_path_arg {
        Some(last_run_path) => last_run_path,
        None => DEFAULT_LAST_RUN_PATH,
    };

    shellexpand::tilde(last_run_path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_scripts_root_default_is_in_temp_dir() {
        let result = get_scripts_root(&None);
        assert_eq!(result, std::env::temp_dir().join("microgen_scripts"));
    }

    #[test]
    fn test_get_scripts_root_with_custom_path() {
        let result = get_scripts_root(&Some("/opt/microgen/scripts".to_string()));
        assert_eq!(result, PathBuf::from("/opt/microgen/scripts"));
    }

    #[test]
    fn test_get_scripts_root_expands_tilde() {
        let result = get_scripts_root(&Some("~/scripts".to_string()));
        assert!(!result.starts_with("~"));
        assert!(result.ends_with("scripts"));
    }

    #[test]
    fn test_settings_path_is_beside_scripts() {
        let result = get_settings_path(Path::new("/tmp/microgen_scripts"));
        assert_eq!(result, PathBuf::from("/tmp/microgen_scripts/settings.properties"));
    }

    #[test]
    fn test_get_actions_path_with_none() {
        let result = get_actions_path(&None);
        assert!(result.ends_with("actions.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_actions_path_with_custom_path() {
        let result = get_actions_path(&Some("/custom/actions.yml".to_string()));
        assert_eq!(result, "/custom/actions.yml");
    }

    #[test]
    fn test_get_last_run_path_with_none() {
        let result = get_last_run_path(&None);
        assert!(result.contains("last_run.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        assert_eq!(expand_path("/absolute/path"), PathBuf::from("/absolute/path"));
    }
}
