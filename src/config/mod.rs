//! Configuration management for LazyTable.
//!
//! Settings are read from a TOML file in the platform configuration
//! directory (or a path given on the command line). A missing file means
//! defaults; a malformed one is an error.

mod settings;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

pub use settings::Settings;

/// Name of the configuration file.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file: {0}")]
    ReadError(#[source] io::Error),

    /// The configuration file is not valid TOML for our settings.
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A setting has an invalid value.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Get the default configuration file path.
///
/// - Linux: `~/.config/lazytable/config.toml`
/// - macOS: `~/Library/Application Support/lazytable/config.toml`
/// - Windows: `C:\Users\<User>\AppData\Roaming\lazytable\config.toml`
pub fn config_path() -> Result<PathBuf> {
    let base_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base_dir.join("lazytable").join(CONFIG_FILE_NAME))
}

/// Load settings from the default location.
pub fn load() -> Result<Settings> {
    load_from(&config_path()?)
}

/// Load settings from a specific file.
///
/// Returns default settings if the file does not exist.
pub fn load_from(path: &Path) -> Result<Settings> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Settings::default());
        }
        Err(e) => return Err(ConfigError::ReadError(e)),
    };

    let settings = Settings::from_toml(&contents)?;
    info!(path = %path.display(), "Loaded configuration");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::IdStrategy;
    use tempfile::tempdir;

    #[test]
    fn test_config_path_structure() {
        let path = config_path().unwrap();
        assert!(path.ends_with("lazytable/config.toml"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.tick_rate_ms, Settings::default().tick_rate_ms);
        assert!(settings.auto_save);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "tick_rate_ms = 250\nauto_save = false\nid_strategy = \"clock\"\n",
        )
        .unwrap();

        let settings = load_from(&path).unwrap();
        assert_eq!(settings.tick_rate_ms, 250);
        assert!(!settings.auto_save);
        assert_eq!(settings.id_strategy, IdStrategy::Clock);
        // Unspecified keys keep their defaults.
        assert!(settings.load_fixtures);
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "tick_rate_ms = \"fast\"").unwrap();

        let result = load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_invalid_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "notification_limit = 0").unwrap();

        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("notification_limit"));
    }

    #[test]
    fn test_read_error_on_directory() {
        let dir = tempdir().unwrap();
        let result = load_from(dir.path());
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
