// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Duration text parsing and uptime formatting.
//!
//! Scenario scripts give timer durations as short human-readable
//! strings: a bare number is seconds, and an `s`, `m`, or `h` suffix
//! selects the unit. The device's uptime is reported in the format
//! `"XdTHH:MM:SS"` (days, then hours, minutes, seconds).
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use scenar_lib::timer::{format_uptime, parse_duration};
//!
//! assert_eq!(parse_duration("10").unwrap(), Duration::from_secs(10));
//! assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
//! assert_eq!(format_uptime(Duration::from_secs(172_018)), "1T23:46:58");
//! ```

use std::time::Duration;

use crate::error::ParseError;

/// Parses a human-readable duration string.
///
/// # Format
///
/// - `"N"` - N seconds
/// - `"Ns"` - N seconds
/// - `"Nm"` - N minutes
/// - `"Nh"` - N hours
///
/// # Errors
///
/// Returns [`ParseError::InvalidDuration`] if the input is empty, the
/// number is not a valid integer, the suffix is unknown, or the value
/// overflows once scaled to seconds.
pub fn parse_duration(s: &str) -> Result<Duration, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::InvalidDuration(s.to_string()));
    }

    let (digits, multiplier) = match s.strip_suffix(['s', 'm', 'h']) {
        Some(stripped) => {
            let multiplier = match s.as_bytes()[s.len() - 1] {
                b's' => 1,
                b'm' => 60,
                b'h' => 3600,
                _ => unreachable!(),
            };
            (stripped, multiplier)
        }
        None => (s, 1),
    };

    let value: u64 = digits
        .parse()
        .map_err(|_| ParseError::InvalidDuration(s.to_string()))?;

    value
        .checked_mul(multiplier)
        .map(Duration::from_secs)
        .ok_or_else(|| ParseError::InvalidDuration(s.to_string()))
}

/// Formats a duration as an uptime string `"XdTHH:MM:SS"`.
///
/// The `X` before `T` is whole days; the time part is always zero
/// padded to two digits.
#[must_use]
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{days}T{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_number_is_seconds() {
        assert_eq!(parse_duration("10").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_duration("0").unwrap(), Duration::from_secs(0));
    }

    #[test]
    fn suffixes_select_units() {
        assert_eq!(parse_duration("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
    }

    #[test]
    fn input_is_trimmed() {
        assert_eq!(parse_duration(" 10s ").unwrap(), Duration::from_secs(10));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            parse_duration(""),
            Err(ParseError::InvalidDuration(_))
        ));
    }

    #[test]
    fn unknown_suffix_is_rejected() {
        assert!(parse_duration("10q").is_err());
    }

    #[test]
    fn missing_digits_are_rejected() {
        assert!(parse_duration("s").is_err());
        assert!(parse_duration("m").is_err());
    }

    #[test]
    fn negative_numbers_are_rejected() {
        assert!(parse_duration("-5").is_err());
    }

    #[test]
    fn overflowing_seconds_are_rejected_not_panicking() {
        // Parses as u64 but overflows once scaled to seconds.
        assert!(matches!(
            parse_duration("9999999999999999999h"),
            Err(ParseError::InvalidDuration(_))
        ));
        assert!(parse_duration("18446744073709551615m").is_err());

        // The largest representable value still parses.
        assert_eq!(
            parse_duration("18446744073709551615").unwrap(),
            Duration::from_secs(u64::MAX)
        );
    }

    #[test]
    fn format_uptime_zero() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0T00:00:00");
    }

    #[test]
    fn format_uptime_with_days() {
        // 1 day, 23 hours, 46 minutes, 58 seconds.
        assert_eq!(format_uptime(Duration::from_secs(172_018)), "1T23:46:58");
    }

    #[test]
    fn format_uptime_pads_fields() {
        assert_eq!(format_uptime(Duration::from_secs(5)), "0T00:00:05");
        assert_eq!(format_uptime(Duration::from_secs(3661)), "0T01:01:01");
    }
}
