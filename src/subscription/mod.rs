// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observer registration for humidifier devices.
//!
//! Two kinds of observers exist:
//!
//! - **State observers** run on every `publish_state`, after the restore
//!   record has been saved. They receive the device.
//! - **Control observers** run on every `perform` that passed validation,
//!   before the integration applies it. They receive the pending call.
//!
//! Dispatch is synchronous. Observers are expected to be quick and must not
//! publish state themselves.
//!
//! # Usage
//!
//! ```
//! use humidifier_lib::{Humidifier, HumidifierCall, HumidifierIntegration, HumidifierTraits};
//!
//! struct Plug;
//!
//! impl HumidifierIntegration for Plug {
//!     fn traits(&self) -> HumidifierTraits {
//!         HumidifierTraits::on_off()
//!     }
//!
//!     fn control(&self, humidifier: &Humidifier, call: &HumidifierCall<'_>) {
//!         if let Some(mode) = call.get_mode() {
//!             humidifier.update_state(|state| state.mode = mode);
//!         }
//!         humidifier.publish_state();
//!     }
//! }
//!
//! let humidifier = Humidifier::new("Bedroom", Plug);
//! humidifier.add_on_state_callback(|h| println!("mode is now {}", h.mode()));
//! humidifier.add_on_control_callback(|call| println!("requested {:?}", call.get_mode()));
//! ```

mod callback;

pub use callback::CallbackRegistry;
