// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted snapshot of the last requested configuration.
//!
//! # Layout
//!
//! Records are stored as a fixed 9-byte little-endian blob:
//!
//! | Offset | Width | Field |
//! |--------|-------|-------|
//! | 0 | 4 | [`RESTORE_STATE_VERSION`] |
//! | 4 | 1 | mode code ([`HumidifierMode::as_byte`]) |
//! | 5 | 4 | target humidity (`f32`) |
//!
//! Bump [`RESTORE_STATE_VERSION`] whenever the field set changes.

use crate::device::{Humidifier, HumidifierCall};
use crate::error::ParseError;
use crate::types::HumidifierMode;

/// Version tag of the current record layout.
pub const RESTORE_STATE_VERSION: u32 = 0x4855_4D01;

/// Mode and target humidity as saved across power cycles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestoreRecord {
    /// The requested mode.
    pub mode: HumidifierMode,
    /// The requested target humidity, NaN if never set.
    pub target_humidity: f32,
}

impl RestoreRecord {
    /// Size of an encoded record in bytes.
    pub const ENCODED_LEN: usize = 9;

    /// Encodes the record together with its version tag.
    #[must_use]
    pub fn encode(&self) -> [u8; Self::ENCODED_LEN] {
        let mut buf = [0u8; Self::ENCODED_LEN];
        buf[0..4].copy_from_slice(&RESTORE_STATE_VERSION.to_le_bytes());
        buf[4] = self.mode.as_byte();
        buf[5..9].copy_from_slice(&self.target_humidity.to_le_bytes());
        buf
    }

    /// Decodes a stored record.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the length, the version tag or the mode
    /// code does not match the current layout. Nothing is decoded in that
    /// case.
    pub fn decode(bytes: &[u8]) -> Result<Self, ParseError> {
        let bytes: &[u8; Self::ENCODED_LEN] =
            bytes.try_into().map_err(|_| ParseError::InvalidLength {
                expected: Self::ENCODED_LEN,
                actual: bytes.len(),
            })?;

        let version = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if version != RESTORE_STATE_VERSION {
            return Err(ParseError::VersionMismatch {
                expected: RESTORE_STATE_VERSION,
                actual: version,
            });
        }

        let mode = HumidifierMode::from_byte(bytes[4]).ok_or(ParseError::InvalidMode(bytes[4]))?;
        let target_humidity = f32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);

        Ok(Self {
            mode,
            target_humidity,
        })
    }

    /// Converts the record into a control call on `humidifier`.
    ///
    /// The target humidity is only included when it was set and the device
    /// currently supports it, so a capability removed since the record was
    /// written does not reject the whole call.
    pub fn to_call<'a>(&self, humidifier: &'a Humidifier) -> HumidifierCall<'a> {
        let call = humidifier.make_call().set_mode(self.mode);
        if !self.target_humidity.is_nan() && humidifier.get_traits().supports_target_humidity {
            call.set_target_humidity(self.target_humidity)
        } else {
            call
        }
    }

    /// Writes the record straight into the device state and publishes it.
    ///
    /// No validation against the traits takes place.
    pub fn apply(&self, humidifier: &Humidifier) {
        humidifier.update_state(|state| {
            state.mode = self.mode;
            state.target_humidity = self.target_humidity;
        });
        humidifier.publish_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_layout() {
        let record = RestoreRecord {
            mode: HumidifierMode::Auto,
            target_humidity: 55.0,
        };
        let bytes = record.encode();

        assert_eq!(&bytes[0..4], &RESTORE_STATE_VERSION.to_le_bytes());
        assert_eq!(bytes[4], HumidifierMode::Auto.as_byte());
        assert_eq!(&bytes[5..9], &55.0f32.to_le_bytes());
    }

    #[test]
    fn decode_reads_encoded_record() {
        let record = RestoreRecord {
            mode: HumidifierMode::Dehumidify,
            target_humidity: 42.5,
        };
        assert_eq!(RestoreRecord::decode(&record.encode()), Ok(record));
    }

    #[test]
    fn decode_keeps_nan_target() {
        let record = RestoreRecord {
            mode: HumidifierMode::On,
            target_humidity: f32::NAN,
        };
        let decoded = RestoreRecord::decode(&record.encode()).unwrap();
        assert_eq!(decoded.mode, HumidifierMode::On);
        assert!(decoded.target_humidity.is_nan());
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let result = RestoreRecord::decode(&[0u8; 5]);
        assert_eq!(
            result,
            Err(ParseError::InvalidLength {
                expected: 9,
                actual: 5
            })
        );
        assert!(RestoreRecord::decode(&[]).is_err());
        assert!(RestoreRecord::decode(&[0u8; 10]).is_err());
    }

    #[test]
    fn decode_rejects_other_version() {
        let mut bytes = RestoreRecord {
            mode: HumidifierMode::Auto,
            target_humidity: 55.0,
        }
        .encode();
        bytes[0..4].copy_from_slice(&(RESTORE_STATE_VERSION + 1).to_le_bytes());

        assert_eq!(
            RestoreRecord::decode(&bytes),
            Err(ParseError::VersionMismatch {
                expected: RESTORE_STATE_VERSION,
                actual: RESTORE_STATE_VERSION + 1,
            })
        );
    }

    #[test]
    fn decode_rejects_unknown_mode_code() {
        let mut bytes = RestoreRecord {
            mode: HumidifierMode::Auto,
            target_humidity: 55.0,
        }
        .encode();
        bytes[4] = 0xEE;

        assert_eq!(
            RestoreRecord::decode(&bytes),
            Err(ParseError::InvalidMode(0xEE))
        );
    }
}
