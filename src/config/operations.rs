//! Config loading, validation, and derived values.

use super::model::Config;
use crate::error::{ChimeError, Result};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ChimeError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ChimeError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from `path`, or defaults when it is absent or invalid.
    ///
    /// Hooks must keep running with a broken config, so problems are only
    /// logged.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|e| {
            warn!("{}; using defaults", e);
            Self::default()
        })
    }

    /// Parse config from a YAML string. An empty document yields defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ChimeError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ChimeError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `lock_name` must be a non-empty single path component
    /// - `lock_timeout_secs`, `lock_stale_secs`, and `say_rate` must be positive
    /// - `say_volume` and `name_probability` must lie within 0.0..=1.0
    /// - blocked prompt patterns must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.lock_name.is_empty()
            || self.lock_name.contains(['/', '\\'])
            || self.lock_name == "."
            || self.lock_name == ".."
        {
            return Err(ChimeError::ConfigError(format!(
                "lock_name must be a plain file name (found '{}')",
                self.lock_name
            )));
        }

        for (field, value) in [
            ("lock_timeout_secs", self.lock_timeout_secs),
            ("lock_stale_secs", self.lock_stale_secs),
            ("say_rate", u64::from(self.say_rate)),
        ] {
            if value == 0 {
                return Err(ChimeError::ConfigError(format!(
                    "{} must be greater than 0",
                    field
                )));
            }
        }

        for (field, value) in [
            ("say_volume", self.say_volume),
            ("name_probability", self.name_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ChimeError::ConfigError(format!(
                    "{} must be between 0.0 and 1.0 (found {})",
                    field, value
                )));
            }
        }

        if self
            .blocked_prompt_patterns
            .iter()
            .any(|p| p.pattern.trim().is_empty())
        {
            return Err(ChimeError::ConfigError(
                "blocked_prompt_patterns entries must have a non-empty pattern".to_string(),
            ));
        }

        Ok(())
    }

    /// How long announcers wait for the lock.
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.lock_timeout_secs)
    }

    /// Age past which a dead owner's lock is reclaimed.
    pub fn lock_stale_after(&self) -> Duration {
        Duration::from_secs(self.lock_stale_secs)
    }

    /// Age past which an exported chat transcript is removed.
    pub fn chat_max_age(&self) -> Duration {
        Duration::from_secs(self.chat_max_age_hours.saturating_mul(3600))
    }
}
