// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The contract a concrete humidifier driver implements.

use std::sync::Arc;

use super::{Humidifier, HumidifierCall};
use crate::capabilities::HumidifierTraits;

/// Driver behind a [`Humidifier`].
///
/// The humidifier owns the observable state and the observers; the
/// integration declares what the hardware can do and applies validated
/// control calls to it.
///
/// # Contract
///
/// - [`traits`](Self::traits) returns the same value on every call.
/// - [`control`](Self::control) only receives calls that passed
///   validation. It applies every field that is set, leaves unset fields
///   alone, writes the resulting state through
///   [`Humidifier::update_state`] and then calls
///   [`Humidifier::publish_state`].
/// - `control` must not perform another call on the same humidifier.
pub trait HumidifierIntegration: Send + Sync {
    /// Returns the capabilities of the device.
    fn traits(&self) -> HumidifierTraits;

    /// Applies a validated control call.
    fn control(&self, humidifier: &Humidifier, call: &HumidifierCall<'_>);
}

impl<T: HumidifierIntegration + ?Sized> HumidifierIntegration for Arc<T> {
    fn traits(&self) -> HumidifierTraits {
        (**self).traits()
    }

    fn control(&self, humidifier: &Humidifier, call: &HumidifierCall<'_>) {
        (**self).control(humidifier, call);
    }
}

impl<T: HumidifierIntegration + ?Sized> HumidifierIntegration for Box<T> {
    fn traits(&self) -> HumidifierTraits {
        (**self).traits()
    }

    fn control(&self, humidifier: &Humidifier, call: &HumidifierCall<'_>) {
        (**self).control(humidifier, call);
    }
}
