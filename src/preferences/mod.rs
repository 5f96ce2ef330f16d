// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key-value storage for restore records.
//!
//! A [`PreferenceStore`] saves and loads opaque byte blobs under a string
//! key. Humidifiers key their restore record by their object id. The store
//! knows nothing about the record layout; version checking happens when
//! the record is decoded.
//!
//! Two backends ship with the crate:
//!
//! - [`MemoryPreferences`] keeps blobs in process memory
//! - [`FilePreferences`] keeps one file per key in a directory

mod file;
mod memory;

pub use file::FilePreferences;
pub use memory::MemoryPreferences;

use crate::error::StorageError;

/// Persistence contract used by humidifiers.
///
/// Implementations should be cheap to call: `save` runs on every state
/// publication. A failed save is logged by the caller and otherwise
/// ignored.
pub trait PreferenceStore: Send + Sync {
    /// Stores `data` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot store the blob.
    fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Loads the blob stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing was ever written.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
}
