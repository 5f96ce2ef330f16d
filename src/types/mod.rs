// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for humidifier control.
//!
//! # Types
//!
//! - [`HumidifierMode`] - What the user asked the device to do
//! - [`HumidifierAction`] - What the device is doing right now

mod action;
mod mode;

pub use action::HumidifierAction;
pub use mode::HumidifierMode;
