// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory preference store.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::PreferenceStore;
use crate::error::StorageError;

/// Preference store backed by a map in process memory.
///
/// Useful for tests and for devices without non-volatile storage.
///
/// # Examples
///
/// ```
/// use humidifier_lib::preferences::{MemoryPreferences, PreferenceStore};
///
/// let store = MemoryPreferences::new();
/// store.save("living_room", &[1, 2, 3]).unwrap();
/// assert_eq!(store.load("living_room").unwrap(), Some(vec![1, 2, 3]));
/// assert_eq!(store.load("kitchen").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryPreferences {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }
}
