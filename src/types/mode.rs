// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode of a humidifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// The user-requested operating mode of a humidifier.
///
/// Each device supports a subset of these, declared by its
/// [`HumidifierTraits`](crate::HumidifierTraits).
///
/// # Examples
///
/// ```
/// use humidifier_lib::types::HumidifierMode;
///
/// let mode: HumidifierMode = "auto".parse().unwrap();
/// assert_eq!(mode, HumidifierMode::Auto);
/// assert_eq!(mode.as_str(), "AUTO");
///
/// assert!("turbo".parse::<HumidifierMode>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HumidifierMode {
    /// The device is switched off.
    #[default]
    Off,
    /// The device runs without a humidity goal.
    On,
    /// The device regulates towards the target humidity on its own.
    Auto,
    /// The device only adds moisture.
    Humidify,
    /// The device only removes moisture.
    Dehumidify,
    /// Reduced output for lower power consumption.
    Eco,
    /// Maximum output.
    Boost,
    /// Quiet operation.
    Sleep,
}

impl HumidifierMode {
    /// All modes, in wire-code order.
    pub const ALL: [Self; 8] = [
        Self::Off,
        Self::On,
        Self::Auto,
        Self::Humidify,
        Self::Dehumidify,
        Self::Eco,
        Self::Boost,
        Self::Sleep,
    ];

    /// Returns the upper-case name of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
            Self::Auto => "AUTO",
            Self::Humidify => "HUMIDIFY",
            Self::Dehumidify => "DEHUMIDIFY",
            Self::Eco => "ECO",
            Self::Boost => "BOOST",
            Self::Sleep => "SLEEP",
        }
    }

    /// Returns the stable one-byte code stored in restore records.
    #[must_use]
    pub const fn as_byte(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
            Self::Auto => 2,
            Self::Humidify => 3,
            Self::Dehumidify => 4,
            Self::Eco => 5,
            Self::Boost => 6,
            Self::Sleep => 7,
        }
    }

    /// Maps a restore-record code back to a mode.
    #[must_use]
    pub const fn from_byte(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::On),
            2 => Some(Self::Auto),
            3 => Some(Self::Humidify),
            4 => Some(Self::Dehumidify),
            5 => Some(Self::Eco),
            6 => Some(Self::Boost),
            7 => Some(Self::Sleep),
            _ => None,
        }
    }
}

impl fmt::Display for HumidifierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HumidifierMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValueError::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_from_str_is_case_insensitive() {
        assert_eq!("OFF".parse::<HumidifierMode>().unwrap(), HumidifierMode::Off);
        assert_eq!("auto".parse::<HumidifierMode>().unwrap(), HumidifierMode::Auto);
        assert_eq!(
            "Dehumidify".parse::<HumidifierMode>().unwrap(),
            HumidifierMode::Dehumidify
        );
        assert_eq!(" eco ".parse::<HumidifierMode>().unwrap(), HumidifierMode::Eco);
    }

    #[test]
    fn mode_from_str_invalid() {
        let result = "turbo".parse::<HumidifierMode>();
        assert_eq!(result, Err(ValueError::UnknownMode("turbo".to_string())));
        assert!("".parse::<HumidifierMode>().is_err());
    }

    #[test]
    fn mode_codes_are_stable() {
        for (code, mode) in HumidifierMode::ALL.iter().enumerate() {
            let code = u8::try_from(code).unwrap();
            assert_eq!(mode.as_byte(), code);
            assert_eq!(HumidifierMode::from_byte(code), Some(*mode));
        }
        assert_eq!(HumidifierMode::from_byte(8), None);
        assert_eq!(HumidifierMode::from_byte(0xFF), None);
    }

    #[test]
    fn mode_display_matches_name() {
        assert_eq!(HumidifierMode::Boost.to_string(), "BOOST");
        assert_eq!(HumidifierMode::default(), HumidifierMode::Off);
    }

    #[test]
    fn mode_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&HumidifierMode::Humidify).unwrap();
        assert_eq!(json, "\"HUMIDIFY\"");
        let mode: HumidifierMode = serde_json::from_str("\"SLEEP\"").unwrap();
        assert_eq!(mode, HumidifierMode::Sleep);
    }
}
