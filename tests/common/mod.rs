// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use humidifier_lib::preferences::PreferenceStore;
use humidifier_lib::types::{HumidifierAction, HumidifierMode};
use humidifier_lib::{Humidifier, HumidifierCall, HumidifierIntegration, HumidifierTraits};
use humidifier_lib::StorageError;
use parking_lot::Mutex;

/// Installs a test-friendly subscriber so `tracing` output shows up on failure.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Fields of a call as the driver received it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedCall {
    pub mode: Option<HumidifierMode>,
    pub target_humidity: Option<f32>,
}

/// Driver that applies every call to the device state and records it.
pub struct RecordingDriver {
    traits: HumidifierTraits,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingDriver {
    pub fn new(traits: HumidifierTraits) -> Self {
        Self {
            traits,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

impl HumidifierIntegration for RecordingDriver {
    fn traits(&self) -> HumidifierTraits {
        self.traits.clone()
    }

    fn control(&self, humidifier: &Humidifier, call: &HumidifierCall<'_>) {
        self.calls.lock().push(RecordedCall {
            mode: call.get_mode(),
            target_humidity: call.get_target_humidity(),
        });

        humidifier.update_state(|state| {
            if let Some(mode) = call.get_mode() {
                state.mode = mode;
                state.action = match mode {
                    HumidifierMode::Off => HumidifierAction::Off,
                    _ => HumidifierAction::Idle,
                };
            }
            if let Some(target) = call.get_target_humidity() {
                state.target_humidity = target;
            }
        });
        humidifier.publish_state();
    }
}

/// Store whose writes always fail and which never holds anything.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub attempts: Mutex<u32>,
}

impl PreferenceStore for FailingStore {
    fn save(&self, _key: &str, _data: &[u8]) -> Result<(), StorageError> {
        *self.attempts.lock() += 1;
        Err(StorageError::WriteRejected("flash is read-only".to_string()))
    }

    fn load(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Err(StorageError::Io(std::io::Error::other("flash unavailable")))
    }
}
