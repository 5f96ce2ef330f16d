// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Humidifier state types.
//!
//! [`HumidifierState`] is the snapshot a device publishes to its observers.
//! [`RestoreRecord`] is the subset of it that survives a power cycle.
//!
//! # Examples
//!
//! ```
//! use humidifier_lib::state::RestoreRecord;
//! use humidifier_lib::types::HumidifierMode;
//!
//! let record = RestoreRecord { mode: HumidifierMode::Auto, target_humidity: 55.0 };
//! let bytes = record.encode();
//! assert_eq!(RestoreRecord::decode(&bytes), Ok(record));
//! ```

mod humidifier_state;
mod restore;

pub use humidifier_state::HumidifierState;
pub use restore::{RESTORE_STATE_VERSION, RestoreRecord};
