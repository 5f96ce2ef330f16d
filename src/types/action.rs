// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Current actuation status of a humidifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the device is physically doing right now.
///
/// This is derived by the integration at runtime and is distinct from the
/// requested [`HumidifierMode`](super::HumidifierMode): a device in `AUTO`
/// mode may be humidifying, idle or off.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HumidifierAction {
    /// Not running.
    #[default]
    Off,
    /// Running but not currently actuating.
    Idle,
    /// Adding moisture.
    Humidifying,
    /// Removing moisture.
    Dehumidifying,
}

impl HumidifierAction {
    /// Returns the upper-case name of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Idle => "IDLE",
            Self::Humidifying => "HUMIDIFYING",
            Self::Dehumidifying => "DEHUMIDIFYING",
        }
    }

    /// Returns `true` while the device is changing the humidity.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Humidifying | Self::Dehumidifying)
    }
}

impl fmt::Display for HumidifierAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
