//! Fields file discovery.
//!
//! Candidates are tried in order and the first existing file wins:
//! CLI argument → `DATAMASK_FIELDS` → `DATAMASK_CONFIG_DIR/fields.json` →
//! `~/.config/datamask/fields.json` → `/etc/datamask/fields.json`.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding a direct path to the fields file.
pub const ENV_FIELDS_PATH: &str = "DATAMASK_FIELDS";

/// Environment variable holding a directory that contains `fields.json`.
pub const ENV_CONFIG_DIR: &str = "DATAMASK_CONFIG_DIR";

/// Standard fields file name.
pub const FIELDS_FILENAME: &str = "fields.json";

const APP_NAME: &str = "datamask";

/// Where the fields file came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    CliArgument,
    Environment,
    XdgConfig,
    SystemConfig,
    /// Nothing found; the registry keeps whatever it already holds.
    #[default]
    BuiltinDefault,
}

impl ConfigSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigSource::CliArgument => "CLI argument",
            ConfigSource::Environment => "environment variable",
            ConfigSource::XdgConfig => "XDG config",
            ConfigSource::SystemConfig => "system config",
            ConfigSource::BuiltinDefault => "builtin default",
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of fields file discovery.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to the fields file, `None` when no candidate exists.
    pub fields: Option<PathBuf>,

    pub fields_source: ConfigSource,
}

/// Find the fields file, taking the first candidate that exists.
pub fn resolve_config(cli_fields: Option<&Path>) -> ConfigPaths {
    let paths = candidates(cli_fields)
        .into_iter()
        .find(|(path, _)| path.exists())
        .map(|(path, source)| ConfigPaths {
            fields: Some(path),
            fields_source: source,
        })
        .unwrap_or_default();

    debug!(
        path = ?paths.fields,
        source = %paths.fields_source,
        "Resolved fields config"
    );
    paths
}

/// Every location that may hold the fields file, highest priority first.
fn candidates(cli_fields: Option<&Path>) -> Vec<(PathBuf, ConfigSource)> {
    let mut out = Vec::with_capacity(5);

    if let Some(path) = cli_fields {
        out.push((path.to_path_buf(), ConfigSource::CliArgument));
    }
    if let Some(path) = std::env::var_os(ENV_FIELDS_PATH) {
        out.push((PathBuf::from(path), ConfigSource::Environment));
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        out.push((
            PathBuf::from(dir).join(FIELDS_FILENAME),
            ConfigSource::Environment,
        ));
    }
    if let Some(dir) = xdg_config_dir() {
        out.push((dir.join(FIELDS_FILENAME), ConfigSource::XdgConfig));
    }
    out.push((
        system_config_dir().join(FIELDS_FILENAME),
        ConfigSource::SystemConfig,
    ));

    out
}

/// `$XDG_CONFIG_HOME/datamask` (or the platform equivalent).
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_source_labels() {
        assert_eq!(ConfigSource::CliArgument.to_string(), "CLI argument");
        assert_eq!(ConfigSource::Environment.as_str(), "environment variable");
        assert_eq!(ConfigSource::default(), ConfigSource::BuiltinDefault);
        assert_eq!(ConfigSource::BuiltinDefault.to_string(), "builtin default");
    }

    #[test]
    fn test_candidates_order() {
        let cli = Path::new("/nonexistent/datamask/cli.json");
        let list = candidates(Some(cli));

        assert_eq!(list[0], (cli.to_path_buf(), ConfigSource::CliArgument));
        assert_eq!(
            list.last(),
            Some(&(
                PathBuf::from("/etc/datamask/fields.json"),
                ConfigSource::SystemConfig
            ))
        );
        assert!(candidates(None)
            .iter()
            .all(|(_, source)| *source != ConfigSource::CliArgument));
    }

    #[test]
    fn test_xdg_config_dir() {
        if let Some(path) = xdg_config_dir() {
            assert!(path.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_system_config_dir() {
        assert_eq!(system_config_dir(), PathBuf::from("/etc/datamask"));
    }
}
