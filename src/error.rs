// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the humidifier library.
//!
//! Validation failures of a control call, restore-record decoding failures,
//! persistence failures and configuration loading failures each have their
//! own enum. They all convert into the top-level [`Error`].

use thiserror::Error;

use crate::types::HumidifierMode;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A control call failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A persisted restore record could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The preference store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A device configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while validating a control call against the device traits.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A mode name did not match any known mode.
    #[error("unknown humidifier mode: {0}")]
    UnknownMode(String),

    /// The mode is known but the device does not support it.
    #[error("mode {0} is not supported by this device")]
    UnsupportedMode(HumidifierMode),

    /// A target humidity was requested on a device without target control.
    #[error("device does not support target humidity")]
    TargetHumidityUnsupported,

    /// The target humidity lies outside the allowed range (or is NaN).
    #[error("target humidity {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
        /// The value that was requested.
        actual: f32,
    },
}

/// Errors raised while decoding a persisted restore record.
///
/// Any of these makes the record count as absent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The blob does not have the fixed record length.
    #[error("invalid record length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Expected number of bytes.
        expected: usize,
        /// Number of bytes found.
        actual: usize,
    },

    /// The stored version tag belongs to another record layout.
    #[error("record version mismatch: expected {expected:#010x}, got {actual:#010x}")]
    VersionMismatch {
        /// Version tag of the current layout.
        expected: u32,
        /// Version tag found in storage.
        actual: u32,
    },

    /// The stored mode code does not map to a mode.
    #[error("invalid mode code: {0}")]
    InvalidMode(u8),
}

/// Errors raised by a [`PreferenceStore`](crate::preferences::PreferenceStore).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this backend.
    #[error("invalid preference key: {0}")]
    InvalidKey(String),

    /// The backend refused the write.
    #[error("write rejected: {0}")]
    WriteRejected(String),
}

/// Errors raised while loading a [`HumidifierConfig`](crate::config::HumidifierConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for this schema.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration is well-formed but inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
