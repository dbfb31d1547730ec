// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `ScenaR` library.
//!
//! This module provides the error hierarchy used across the engine:
//! command parsing, value validation, timer slot management, and
//! configuration loading.
//!
//! None of these errors is fatal to a running device. The dispatcher
//! logs parse errors and skips the offending line, timer-slot errors
//! fail the single operation without side effects, and a configuration
//! load failure leaves the previous in-memory configuration intact.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while parsing a command line or operand.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred in the timer engine.
    #[error("timer error: {0}")]
    Timer(#[from] TimerError),

    /// Error occurred in a key registry.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Error occurred while loading device configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to parsing command records and operands.
///
/// Every parse error is recoverable: the dispatcher logs it and skips
/// the offending record, so a single malformed scenario line never
/// aborts processing of the remaining script.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A command record is missing a required positional operand.
    #[error("command '{verb}' is missing operand at position {position}")]
    MissingOperand {
        /// The command verb being dispatched.
        verb: String,
        /// Zero-based operand position (verb itself is position 0).
        position: usize,
    },

    /// An operand could not be converted to the expected type.
    #[error("failed to parse {field}: {message}")]
    InvalidOperand {
        /// The operand that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },

    /// A duration string could not be parsed.
    #[error("invalid duration '{0}': expected N, Ns, Nm or Nh")]
    InvalidDuration(String),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A widget carries more name/value parameter pairs than supported.
    #[error("widget has {0} parameter pairs, at most 3 are supported")]
    TooManyWidgetParams(usize),
}

/// Errors related to timer slot management.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The requested slot number is outside the timer table.
    #[error("timer slot {slot} is out of range [0, {max})")]
    SlotOutOfRange {
        /// The requested slot.
        slot: u8,
        /// Number of slots in the table.
        max: u8,
    },

    /// No free slot remains in the timer table.
    #[error("timer table is full ({0} slots)")]
    TableFull(u8),
}

/// Errors related to key registries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Every numeric slot is occupied; no further key can be
    /// auto-assigned.
    #[error("key table is full (256 slots)")]
    TableFull,
}

/// Errors related to loading the device/widget configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON.
    #[error("configuration JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("configuration file error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingOperand {
            verb: "settimer".to_string(),
            position: 2,
        };
        assert_eq!(
            err.to_string(),
            "command 'settimer' is missing operand at position 2"
        );
    }

    #[test]
    fn error_from_parse_error() {
        let parse_err = ParseError::InvalidDuration("10q".to_string());
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Parse(ParseError::InvalidDuration(_))));
    }

    #[test]
    fn timer_error_display() {
        let err = TimerError::SlotOutOfRange { slot: 40, max: 16 };
        assert_eq!(err.to_string(), "timer slot 40 is out of range [0, 16)");
    }

    #[test]
    fn value_error_display() {
        let err = ValueError::TooManyWidgetParams(4);
        assert_eq!(
            err.to_string(),
            "widget has 4 parameter pairs, at most 3 are supported"
        );
    }

    #[test]
    fn registry_error_display() {
        assert_eq!(
            RegistryError::TableFull.to_string(),
            "key table is full (256 slots)"
        );
    }

    #[test]
    fn config_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
