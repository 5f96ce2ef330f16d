// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control calls.

use std::fmt;

use super::Humidifier;
use crate::error::{Result, ValueError};
use crate::types::HumidifierMode;

/// A requested mode, kept unparsed when the name was not recognised so the
/// error surfaces from `perform`.
#[derive(Debug, Clone, PartialEq)]
enum ModeRequest {
    Parsed(HumidifierMode),
    Unparsed(String),
}

/// A set of requested changes to a humidifier.
///
/// Obtain one from [`Humidifier::make_call`], set the fields you want to
/// change and finish with [`perform`](Self::perform). Fields that are not
/// set are left untouched by the integration. Dropping a call without
/// performing it does nothing.
///
/// Validation happens in `perform` and is all-or-nothing: if any field is
/// rejected, neither the control observers nor the integration run.
///
/// # Examples
///
/// ```
/// # use humidifier_lib::{Humidifier, HumidifierCall, HumidifierIntegration, HumidifierTraits};
/// # struct Driver;
/// # impl HumidifierIntegration for Driver {
/// #     fn traits(&self) -> HumidifierTraits { HumidifierTraits::regulating() }
/// #     fn control(&self, h: &Humidifier, call: &HumidifierCall<'_>) {
/// #         h.update_state(|s| {
/// #             if let Some(mode) = call.get_mode() { s.mode = mode; }
/// #             if let Some(target) = call.get_target_humidity() { s.target_humidity = target; }
/// #         });
/// #         h.publish_state();
/// #     }
/// # }
/// use humidifier_lib::types::HumidifierMode;
///
/// let humidifier = Humidifier::new("Bedroom", Driver);
///
/// humidifier
///     .make_call()
///     .set_mode(HumidifierMode::Auto)
///     .set_target_humidity(55.0)
///     .perform()
///     .unwrap();
/// assert_eq!(humidifier.mode(), HumidifierMode::Auto);
///
/// // Unknown names are rejected when the call is performed
/// assert!(humidifier.make_call().set_mode_str("turbo").perform().is_err());
/// ```
#[must_use = "a call does nothing until `perform` is called"]
pub struct HumidifierCall<'a> {
    parent: &'a Humidifier,
    mode: Option<ModeRequest>,
    target_humidity: Option<f32>,
}

impl<'a> HumidifierCall<'a> {
    pub(crate) fn new(parent: &'a Humidifier) -> Self {
        Self {
            parent,
            mode: None,
            target_humidity: None,
        }
    }

    /// Requests a mode.
    pub fn set_mode(mut self, mode: HumidifierMode) -> Self {
        self.mode = Some(ModeRequest::Parsed(mode));
        self
    }

    /// Requests a mode, or clears the request with `None`.
    pub fn set_optional_mode(mut self, mode: Option<HumidifierMode>) -> Self {
        self.mode = mode.map(ModeRequest::Parsed);
        self
    }

    /// Requests a mode by name, case-insensitively.
    ///
    /// An unknown name is remembered and rejected by
    /// [`perform`](Self::perform) with [`ValueError::UnknownMode`].
    pub fn set_mode_str(mut self, mode: &str) -> Self {
        self.mode = Some(match mode.parse() {
            Ok(parsed) => ModeRequest::Parsed(parsed),
            Err(_) => ModeRequest::Unparsed(mode.to_string()),
        });
        self
    }

    /// Requests a target humidity in %RH.
    ///
    /// The value is stored as given; range checks happen in `perform`.
    pub fn set_target_humidity(mut self, target_humidity: f32) -> Self {
        self.target_humidity = Some(target_humidity);
        self
    }

    /// Requests a target humidity, or clears the request with `None`.
    pub fn set_optional_target_humidity(mut self, target_humidity: Option<f32>) -> Self {
        self.target_humidity = target_humidity;
        self
    }

    /// Returns the requested mode, if one was set and recognised.
    #[must_use]
    pub fn get_mode(&self) -> Option<HumidifierMode> {
        match self.mode {
            Some(ModeRequest::Parsed(mode)) => Some(mode),
            _ => None,
        }
    }

    /// Returns the requested target humidity, if set.
    #[must_use]
    pub fn get_target_humidity(&self) -> Option<f32> {
        self.target_humidity
    }

    /// Returns the humidifier this call targets.
    #[must_use]
    pub fn humidifier(&self) -> &'a Humidifier {
        self.parent
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mode.is_none() && self.target_humidity.is_none()
    }

    /// Checks every set field against the humidifier's current traits.
    ///
    /// # Errors
    ///
    /// - [`ValueError::UnknownMode`] for an unrecognised mode name
    /// - [`ValueError::UnsupportedMode`] for a mode outside the traits
    /// - [`ValueError::TargetHumidityUnsupported`] for a target humidity on
    ///   a device without target control
    /// - [`ValueError::OutOfRange`] for a target humidity outside the
    ///   visual range (overrides included) or NaN
    pub fn validate(&self) -> std::result::Result<(), ValueError> {
        let traits = self.parent.get_traits();

        match &self.mode {
            Some(ModeRequest::Unparsed(name)) => {
                return Err(ValueError::UnknownMode(name.clone()));
            }
            Some(ModeRequest::Parsed(mode)) if !traits.supports_mode(*mode) => {
                return Err(ValueError::UnsupportedMode(*mode));
            }
            _ => {}
        }

        if let Some(target) = self.target_humidity {
            if !traits.supports_target_humidity {
                return Err(ValueError::TargetHumidityUnsupported);
            }
            if !traits.contains_target_humidity(target) {
                return Err(ValueError::OutOfRange {
                    min: traits.visual_min_humidity,
                    max: traits.visual_max_humidity,
                    actual: target,
                });
            }
        }

        Ok(())
    }

    /// Validates the call and hands it to the integration.
    ///
    /// Control observers run after validation and before the integration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Value`](crate::Error::Value) if validation fails.
    /// Nothing is applied in that case.
    pub fn perform(self) -> Result<()> {
        let name = self.parent.name();
        tracing::debug!(
            humidifier = %name,
            mode = ?self.mode,
            target_humidity = ?self.target_humidity,
            "Performing control call"
        );

        if let Err(e) = self.validate() {
            tracing::warn!(humidifier = %name, error = %e, "Rejected control call");
            return Err(e.into());
        }

        self.parent.callbacks().dispatch_control(&self);
        self.parent.integration().control(self.parent, &self);
        Ok(())
    }
}

impl fmt::Debug for HumidifierCall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HumidifierCall")
            .field("humidifier", &self.parent.name())
            .field("mode", &self.mode)
            .field("target_humidity", &self.target_humidity)
            .finish()
    }
}
