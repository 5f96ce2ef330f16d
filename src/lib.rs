// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `humidifier_lib` - control and state publication for humidifiers.
//!
//! This library models a humidity-regulating device inside device
//! automation firmware. It does not talk to hardware itself: a driver
//! implements [`HumidifierIntegration`] and the library takes care of
//! validating control requests, tracking state, notifying observers and
//! restoring the last requested configuration after a power cycle.
//!
//! # Supported Features
//!
//! - **Control calls**: partial requests for mode and target humidity,
//!   validated against the device traits
//! - **Traits**: supported modes, humidity range and steps, with
//!   device-level display overrides
//! - **Observers**: state-changed and control-requested callbacks
//! - **Restore**: versioned restore records in a pluggable
//!   [`PreferenceStore`](preferences::PreferenceStore)
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use humidifier_lib::{
//!     Humidifier, HumidifierCall, HumidifierIntegration, HumidifierTraits, HumidifierTraitsBuilder,
//! };
//! use humidifier_lib::preferences::MemoryPreferences;
//! use humidifier_lib::types::{HumidifierAction, HumidifierMode};
//!
//! struct Mister;
//!
//! impl HumidifierIntegration for Mister {
//!     fn traits(&self) -> HumidifierTraits {
//!         HumidifierTraitsBuilder::new()
//!             .with_modes([HumidifierMode::On, HumidifierMode::Auto])
//!             .with_current_humidity()
//!             .with_target_humidity()
//!             .humidity_range(30.0, 80.0)
//!             .build()
//!     }
//!
//!     fn control(&self, humidifier: &Humidifier, call: &HumidifierCall<'_>) {
//!         humidifier.update_state(|state| {
//!             if let Some(mode) = call.get_mode() {
//!                 state.mode = mode;
//!                 state.action = if mode == HumidifierMode::Off {
//!                     HumidifierAction::Off
//!                 } else {
//!                     HumidifierAction::Idle
//!                 };
//!             }
//!             if let Some(target) = call.get_target_humidity() {
//!                 state.target_humidity = target;
//!             }
//!         });
//!         humidifier.publish_state();
//!     }
//! }
//!
//! # fn main() -> humidifier_lib::Result<()> {
//! let humidifier = Humidifier::new("Nursery", Mister)
//!     .with_preferences(Arc::new(MemoryPreferences::new()));
//!
//! humidifier.add_on_state_callback(|h| {
//!     println!("{} is {} targeting {}%", h.name(), h.mode(), h.target_humidity());
//! });
//! humidifier.setup();
//!
//! humidifier
//!     .make_call()
//!     .set_mode(HumidifierMode::Auto)
//!     .set_target_humidity(55.0)
//!     .perform()?;
//!
//! // Out-of-range targets are rejected and nothing changes
//! assert!(humidifier.make_call().set_target_humidity(95.0).perform().is_err());
//! assert_eq!(humidifier.target_humidity(), 55.0);
//! # Ok(())
//! # }
//! ```

mod capabilities;
pub mod config;
mod device;
pub mod error;
pub mod preferences;
pub mod state;
pub mod subscription;
pub mod types;

pub use capabilities::{HumidifierTraits, HumidifierTraitsBuilder, VisualOverrides};
pub use config::{HumidifierConfig, RestorePolicy};
pub use device::{Humidifier, HumidifierCall, HumidifierIntegration};
pub use error::{ConfigError, Error, ParseError, Result, StorageError, ValueError};
pub use state::{HumidifierState, RESTORE_STATE_VERSION, RestoreRecord};
pub use subscription::CallbackRegistry;
pub use types::{HumidifierAction, HumidifierMode};
