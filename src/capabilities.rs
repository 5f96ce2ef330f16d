// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Humidifier traits: the static capability declaration of a device.
//!
//! An integration declares its traits once; they must stay constant for the
//! lifetime of the process. The device may layer [`VisualOverrides`] on top
//! to change the presented humidity range and step sizes without changing
//! what the hardware is able to do.

use std::collections::BTreeSet;

use crate::types::HumidifierMode;

/// Capabilities and ranges of a humidifier.
///
/// # Examples
///
/// ```
/// use humidifier_lib::{HumidifierTraits, HumidifierTraitsBuilder};
/// use humidifier_lib::types::HumidifierMode;
///
/// // Default traits: only OFF, no humidity control
/// let basic = HumidifierTraits::default();
/// assert!(basic.supports_mode(HumidifierMode::Off));
/// assert!(!basic.supports_target_humidity);
///
/// let traits = HumidifierTraitsBuilder::new()
///     .with_modes([HumidifierMode::Off, HumidifierMode::Auto])
///     .with_target_humidity()
///     .humidity_range(30.0, 80.0)
///     .build();
/// assert!(traits.supports_mode(HumidifierMode::Auto));
/// assert!(traits.contains_target_humidity(55.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HumidifierTraits {
    /// Modes the device accepts.
    pub supported_modes: BTreeSet<HumidifierMode>,

    /// The device reports a measured humidity.
    pub supports_current_humidity: bool,

    /// The device accepts a target humidity.
    pub supports_target_humidity: bool,

    /// Lowest selectable target humidity, in %RH.
    pub visual_min_humidity: f32,

    /// Highest selectable target humidity, in %RH.
    pub visual_max_humidity: f32,

    /// Step for the target humidity control.
    pub visual_target_humidity_step: f32,

    /// Step for displaying the current humidity.
    pub visual_current_humidity_step: f32,
}

impl Default for HumidifierTraits {
    fn default() -> Self {
        Self {
            supported_modes: BTreeSet::from([HumidifierMode::Off]),
            supports_current_humidity: false,
            supports_target_humidity: false,
            visual_min_humidity: 0.0,
            visual_max_humidity: 100.0,
            visual_target_humidity_step: 1.0,
            visual_current_humidity_step: 1.0,
        }
    }
}

impl HumidifierTraits {
    /// Traits of a plain on/off humidifier.
    #[must_use]
    pub fn on_off() -> Self {
        Self {
            supported_modes: BTreeSet::from([HumidifierMode::Off, HumidifierMode::On]),
            ..Self::default()
        }
    }

    /// Traits of a regulating humidifier with a hygrometer.
    ///
    /// - OFF, ON and AUTO modes
    /// - Current and target humidity
    #[must_use]
    pub fn regulating() -> Self {
        Self {
            supported_modes: BTreeSet::from([
                HumidifierMode::Off,
                HumidifierMode::On,
                HumidifierMode::Auto,
            ]),
            supports_current_humidity: true,
            supports_target_humidity: true,
            ..Self::default()
        }
    }

    /// Returns whether the device accepts `mode`.
    #[must_use]
    pub fn supports_mode(&self, mode: HumidifierMode) -> bool {
        self.supported_modes.contains(&mode)
    }

    /// Returns whether `value` lies within the inclusive target range.
    ///
    /// NaN is never contained.
    #[must_use]
    pub fn contains_target_humidity(&self, value: f32) -> bool {
        (self.visual_min_humidity..=self.visual_max_humidity).contains(&value)
    }

    /// Emits the traits as `info` records.
    pub fn log_config(&self, name: &str) {
        let modes = self
            .supported_modes
            .iter()
            .map(HumidifierMode::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(humidifier = %name, modes = %modes, "Supported modes");
        tracing::info!(
            humidifier = %name,
            current = self.supports_current_humidity,
            target = self.supports_target_humidity,
            "Humidity support"
        );
        tracing::info!(
            humidifier = %name,
            min = self.visual_min_humidity,
            max = self.visual_max_humidity,
            target_step = self.visual_target_humidity_step,
            current_step = self.visual_current_humidity_step,
            "Visual humidity range"
        );
    }
}

/// Builder for creating custom traits.
#[derive(Debug, Default)]
pub struct HumidifierTraitsBuilder {
    inner: HumidifierTraits,
}

impl HumidifierTraitsBuilder {
    /// Creates a new builder with default traits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a supported mode.
    #[must_use]
    pub fn with_mode(mut self, mode: HumidifierMode) -> Self {
        self.inner.supported_modes.insert(mode);
        self
    }

    /// Adds several supported modes.
    #[must_use]
    pub fn with_modes(mut self, modes: impl IntoIterator<Item = HumidifierMode>) -> Self {
        self.inner.supported_modes.extend(modes);
        self
    }

    /// Enables current humidity reporting.
    #[must_use]
    pub fn with_current_humidity(mut self) -> Self {
        self.inner.supports_current_humidity = true;
        self
    }

    /// Enables target humidity control.
    #[must_use]
    pub fn with_target_humidity(mut self) -> Self {
        self.inner.supports_target_humidity = true;
        self
    }

    /// Sets the selectable target humidity range.
    #[must_use]
    pub fn humidity_range(mut self, min: f32, max: f32) -> Self {
        self.inner.visual_min_humidity = min;
        self.inner.visual_max_humidity = max;
        self
    }

    /// Sets the target humidity step.
    #[must_use]
    pub fn target_humidity_step(mut self, step: f32) -> Self {
        self.inner.visual_target_humidity_step = step;
        self
    }

    /// Sets the current humidity display step.
    #[must_use]
    pub fn current_humidity_step(mut self, step: f32) -> Self {
        self.inner.visual_current_humidity_step = step;
        self
    }

    /// Builds the traits.
    #[must_use]
    pub fn build(self) -> HumidifierTraits {
        self.inner
    }
}

/// Device-level overrides of the presented humidity range and steps.
///
/// Unset fields leave the integration's value in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisualOverrides {
    /// Replaces [`HumidifierTraits::visual_min_humidity`].
    pub min_humidity: Option<f32>,
    /// Replaces [`HumidifierTraits::visual_max_humidity`].
    pub max_humidity: Option<f32>,
    /// Replaces [`HumidifierTraits::visual_target_humidity_step`].
    pub target_humidity_step: Option<f32>,
    /// Replaces [`HumidifierTraits::visual_current_humidity_step`].
    pub current_humidity_step: Option<f32>,
}

impl VisualOverrides {
    /// Returns `traits` with every set override applied.
    ///
    /// Modes and capability flags pass through unchanged.
    #[must_use]
    pub fn apply(&self, mut traits: HumidifierTraits) -> HumidifierTraits {
        if let Some(min) = self.min_humidity {
            traits.visual_min_humidity = min;
        }
        if let Some(max) = self.max_humidity {
            traits.visual_max_humidity = max;
        }
        if let Some(step) = self.target_humidity_step {
            traits.visual_target_humidity_step = step;
        }
        if let Some(step) = self.current_humidity_step {
            traits.visual_current_humidity_step = step;
        }
        traits
    }

    /// Returns `true` if no override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_humidity.is_none()
            && self.max_humidity.is_none()
            && self.target_humidity_step.is_none()
            && self.current_humidity_step.is_none()
    }

    /// Describes the first inconsistent override, if any.
    ///
    /// A set bound must be a number, `min_humidity` must not exceed
    /// `max_humidity` and set steps must be positive.
    #[must_use]
    pub fn inconsistency(&self) -> Option<String> {
        for (field, value) in [
            ("min_humidity", self.min_humidity),
            ("max_humidity", self.max_humidity),
        ] {
            if value.is_some_and(f32::is_nan) {
                return Some(format!("{field} is not a number"));
            }
        }
        if let (Some(min), Some(max)) = (self.min_humidity, self.max_humidity)
            && min > max
        {
            return Some(format!(
                "min_humidity {min} is greater than max_humidity {max}"
            ));
        }
        for (field, value) in [
            ("target_humidity_step", self.target_humidity_step),
            ("current_humidity_step", self.current_humidity_step),
        ] {
            if value.is_some_and(|v| v.is_nan() || v <= 0.0) {
                return Some(format!("{field} must be positive"));
            }
        }
        None
    }
}
