//! Application settings configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::table::IdStrategy;
use crate::ui::{SpinnerStyle, ViewMode};

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Initial state of the auto-save toggle.
    pub auto_save: bool,
    /// Initial row density.
    pub view: ViewMode,
    /// Drop a row from the selection when the row itself is deleted.
    pub prune_selection_on_delete: bool,
    /// How fresh row ids are generated.
    pub id_strategy: IdStrategy,
    /// Start with the demo rows.
    pub load_fixtures: bool,
    /// Maximum number of toasts shown at once.
    pub notification_limit: usize,
    /// Spinner used for loading enrichment badges.
    pub spinner: SpinnerStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            auto_save: true,
            view: ViewMode::default(),
            prune_selection_on_delete: true,
            id_strategy: IdStrategy::default(),
            load_fixtures: true,
            notification_limit: 3,
            spinner: SpinnerStyle::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }

        if self.notification_limit == 0 {
            return Err(ConfigError::ValidationError(
                "notification_limit must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
