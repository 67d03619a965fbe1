use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkelError};

/// User-level configuration loaded from `~/.config/skelgen/config.toml`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Directory holding `skeletons/` and `templates/`.
    pub resources: Option<PathBuf>,

    /// Where `*-error.log` files are written. Defaults to the working directory.
    pub log_dir: Option<PathBuf>,

    #[serde(default)]
    pub defaults: Defaults,
}

/// Flag defaults applied before command-line switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub git: bool,
    #[serde(default)]
    pub virtualenv: bool,
    #[serde(default = "default_debug")]
    pub debug: bool,
    #[serde(default)]
    pub bower: Vec<String>,
}

fn default_debug() -> bool {
    true
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            git: false,
            virtualenv: false,
            debug: default_debug(),
            bower: Vec::new(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("skelgen").join("config.toml"))
}

/// Load user configuration from the XDG config directory.
///
/// Returns `Ok(None)` if the config file does not exist.
/// Returns `Err` if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<Option<UserConfig>> {
    match config_path() {
        Some(path) => load_user_config_from(&path),
        None => Ok(None),
    }
}

pub fn load_user_config_from(path: &Path) -> Result<Option<UserConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| SkelError::Io {
        context: format!("reading user config {}", path.display()),
        source: e,
    })?;

    let config: UserConfig =
        toml::from_str(&content).map_err(|e| SkelError::ConfigParse { source: e })?;

    tracing::debug!(path = %path.display(), "loaded user config");
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_user_config() {
        let toml_str = r#"
resources = "/opt/skelgen"
log_dir = "/tmp/logs"

[defaults]
git = true
debug = false
bower = ["jquery", "bootstrap"]
"#;
        let config: UserConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.resources, Some(PathBuf::from("/opt/skelgen")));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert!(config.defaults.git);
        assert!(!config.defaults.virtualenv);
        assert!(!config.defaults.debug);
        assert_eq!(config.defaults.bower, vec!["jquery", "bootstrap"]);
    }

    #[test]
    fn parse_empty_config() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert!(config.resources.is_none());
        assert!(config.defaults.debug);
        assert!(config.defaults.bower.is_empty());
    }

    #[test]
    fn parse_malformed_config_errors() {
        let result: std::result::Result<UserConfig, _> = toml::from_str("not valid [[ toml");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_user_config_from(&dir.path().join("config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn malformed_file_is_config_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "defaults = [").unwrap();
        let err = load_user_config_from(&path).unwrap_err();
        assert!(matches!(err, SkelError::ConfigParse { .. }));
    }
}
