// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full-state snapshots for the publish cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::ActuatorState;

/// One sensor slot in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorEntry {
    /// The sensor's numeric slot.
    pub slot: u8,
    /// Most recent raw reading.
    pub last: f64,
    /// Rolling average for the current window, if any reading arrived.
    pub average: Option<f64>,
    /// Number of readings folded into the current window.
    pub count: u32,
}

/// One occupied timer slot in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerEntry {
    /// The timer's numeric slot.
    pub slot: u8,
    /// Remaining seconds until expiry.
    pub remaining_secs: u64,
    /// Whether the timer is counting down.
    pub running: bool,
}

/// A full publishable snapshot of engine-owned state.
///
/// Produced once per publish cycle; the engine guarantees a value for
/// every key it owns (sensor readings, timer states, counters,
/// uptime), so the collaborator can always render a complete
/// `live.json`/`runtime.json` without tracking deltas itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// When the snapshot was generated.
    pub generated_at: DateTime<Utc>,
    /// Formatted device uptime, once the uptime timer has fired.
    pub uptime: Option<String>,
    /// All known actuator slot states.
    pub actuators: Vec<(u8, ActuatorState)>,
    /// All sensor accumulators.
    pub sensors: Vec<SensorEntry>,
    /// All occupied timer slots.
    pub timers: Vec<TimerEntry>,
    /// Keys selected for logging, in registration order.
    pub logging_keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_to_json() {
        let snapshot = StateSnapshot {
            generated_at: Utc::now(),
            uptime: Some("0T00:00:05".to_string()),
            actuators: vec![(3, ActuatorState::On)],
            sensors: vec![SensorEntry {
                slot: 1,
                last: 21.5,
                average: Some(21.0),
                count: 4,
            }],
            timers: vec![TimerEntry {
                slot: 3,
                remaining_secs: 7,
                running: true,
            }],
            logging_keys: vec!["temp".to_string()],
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["uptime"], "0T00:00:05");
        assert_eq!(json["timers"][0]["remaining_secs"], 7);
        assert_eq!(json["sensors"][0]["count"], 4);
    }
}
