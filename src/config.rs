// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Declarative humidifier configuration.
//!
//! Configurations are plain JSON documents:
//!
//! ```json
//! {
//!   "name": "Living Room Humidifier",
//!   "restore": "validated",
//!   "visual": { "min_humidity": 30, "max_humidity": 70, "target_humidity_step": 5 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::capabilities::VisualOverrides;
use crate::error::ConfigError;

/// How a humidifier replays its restore record during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestorePolicy {
    /// Ignore any saved record.
    Disabled,
    /// Replay the record as a control call, re-validated against the
    /// current traits.
    #[default]
    Validated,
    /// Copy the record into the device state without validation.
    Direct,
}

/// Optional display overrides, see [`VisualOverrides`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    /// Overrides the lowest selectable target humidity.
    pub min_humidity: Option<f32>,
    /// Overrides the highest selectable target humidity.
    pub max_humidity: Option<f32>,
    /// Overrides the target humidity step.
    pub target_humidity_step: Option<f32>,
    /// Overrides the current humidity display step.
    pub current_humidity_step: Option<f32>,
}

impl From<VisualConfig> for VisualOverrides {
    fn from(config: VisualConfig) -> Self {
        Self {
            min_humidity: config.min_humidity,
            max_humidity: config.max_humidity,
            target_humidity_step: config.target_humidity_step,
            current_humidity_step: config.current_humidity_step,
        }
    }
}

/// Configuration of a single humidifier.
///
/// # Examples
///
/// ```
/// use humidifier_lib::config::{HumidifierConfig, RestorePolicy};
///
/// let config = HumidifierConfig::from_json_str(r#"{ "name": "Bedroom" }"#).unwrap();
/// assert_eq!(config.name, "Bedroom");
/// assert_eq!(config.restore, RestorePolicy::Validated);
///
/// let config = HumidifierConfig::new("Office").with_restore(RestorePolicy::Disabled);
/// assert_eq!(config.restore, RestorePolicy::Disabled);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumidifierConfig {
    /// Display name; the persistence key is derived from it.
    pub name: String,
    /// Restore behaviour at setup.
    #[serde(default)]
    pub restore: RestorePolicy,
    /// Display overrides.
    #[serde(default)]
    pub visual: VisualConfig,
}

impl HumidifierConfig {
    /// Creates a configuration with defaults for everything but the name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            restore: RestorePolicy::default(),
            visual: VisualConfig::default(),
        }
    }

    /// Sets the restore policy.
    #[must_use]
    pub fn with_restore(mut self, restore: RestorePolicy) -> Self {
        self.restore = restore;
        self
    }

    /// Sets the display overrides.
    #[must_use]
    pub fn with_visual(mut self, visual: VisualConfig) -> Self {
        self.visual = visual;
        self
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input and
    /// [`ConfigError::Invalid`] for inconsistent values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`from_json_str`](Self::from_json_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), name = %config.name, "Loaded humidifier config");
        Ok(config)
    }

    /// Checks the configuration for inconsistent values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("name must not be empty".to_string()));
        }

        let visual = &self.visual;
        for (field, value) in [
            ("min_humidity", visual.min_humidity),
            ("max_humidity", visual.max_humidity),
        ] {
            if let Some(v) = value
                && !(0.0..=100.0).contains(&v)
            {
                return Err(ConfigError::Invalid(format!(
                    "{field} {v} is outside [0, 100]"
                )));
            }
        }
        if let Some(problem) = VisualOverrides::from(*visual).inconsistency() {
            return Err(ConfigError::Invalid(problem));
        }
        Ok(())
    }
}
