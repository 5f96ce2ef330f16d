// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observable state of a humidifier.

use serde::{Deserialize, Serialize};

use crate::types::{HumidifierAction, HumidifierMode};

/// Snapshot of everything a humidifier publishes.
///
/// Unknown humidities are NaN. They serialize as `null` and `null` reads
/// back as NaN.
///
/// # Examples
///
/// ```
/// use humidifier_lib::state::HumidifierState;
/// use humidifier_lib::types::HumidifierMode;
///
/// let state = HumidifierState::default();
/// assert_eq!(state.mode, HumidifierMode::Off);
/// assert!(state.current_humidity.is_nan());
/// assert!(!state.has_target_humidity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumidifierState {
    /// The active mode.
    pub mode: HumidifierMode,
    /// What the device is doing right now.
    pub action: HumidifierAction,
    /// Measured humidity in %RH, NaN until the first valid reading.
    #[serde(with = "nan_as_null")]
    pub current_humidity: f32,
    /// Requested humidity in %RH, NaN until set.
    #[serde(with = "nan_as_null")]
    pub target_humidity: f32,
}

impl Default for HumidifierState {
    fn default() -> Self {
        Self {
            mode: HumidifierMode::Off,
            action: HumidifierAction::Off,
            current_humidity: f32::NAN,
            target_humidity: f32::NAN,
        }
    }
}

impl HumidifierState {
    /// Returns `true` once a measured humidity is known.
    #[must_use]
    pub fn has_current_humidity(&self) -> bool {
        !self.current_humidity.is_nan()
    }

    /// Returns `true` once a target humidity is known.
    #[must_use]
    pub fn has_target_humidity(&self) -> bool {
        !self.target_humidity.is_nan()
    }
}

/// Maps NaN to `null` and back.
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_off_and_unknown() {
        let state = HumidifierState::default();
        assert_eq!(state.mode, HumidifierMode::Off);
        assert_eq!(state.action, HumidifierAction::Off);
        assert!(!state.has_current_humidity());
        assert!(!state.has_target_humidity());
    }

    #[test]
    fn known_humidities() {
        let state = HumidifierState {
            current_humidity: 41.5,
            target_humidity: 55.0,
            ..HumidifierState::default()
        };
        assert!(state.has_current_humidity());
        assert!(state.has_target_humidity());
    }

    #[test]
    fn state_serializes_unknown_as_null() {
        let json = serde_json::to_value(HumidifierState::default()).unwrap();
        assert_eq!(json["mode"], "OFF");
        assert_eq!(json["action"], "OFF");
        assert!(json["current_humidity"].is_null());
        assert!(json["target_humidity"].is_null());
    }

    #[test]
    fn unknown_humidities_read_back_as_nan() {
        let json = serde_json::to_string(&HumidifierState::default()).unwrap();
        let state: HumidifierState = serde_json::from_str(&json).unwrap();

        assert_eq!(state.mode, HumidifierMode::Off);
        assert_eq!(state.action, HumidifierAction::Off);
        assert!(state.current_humidity.is_nan());
        assert!(state.target_humidity.is_nan());
    }

    #[test]
    fn known_humidities_read_back_unchanged() {
        let state = HumidifierState {
            mode: HumidifierMode::Auto,
            action: HumidifierAction::Humidifying,
            current_humidity: 41.5,
            target_humidity: 55.0,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(serde_json::from_str::<HumidifierState>(&json).unwrap(), state);
    }
}
