// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::registry::SlotId;

use super::StateChange;

/// State of one actuator slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActuatorState {
    /// The actuator is off.
    Off,
    /// The actuator is on.
    On,
    /// The actuator is set to a numeric level (dimmer, valve position).
    Level(u8),
}

impl ActuatorState {
    /// Parses an actuator operand: `"on"`, `"off"`, or a numeric level.
    ///
    /// Returns `None` for anything else; the caller reports the parse
    /// failure with context.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "on" => Some(Self::On),
            "off" => Some(Self::Off),
            other => other.parse().ok().map(Self::Level),
        }
    }
}

impl std::fmt::Display for ActuatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::On => f.write_str("on"),
            Self::Level(level) => write!(f, "{level}"),
        }
    }
}

/// Rolling-average accumulator for one sensor slot.
///
/// Tracks the last raw reading plus a sum/count pair for the current
/// measurement window. The enter counter is the count itself: it is
/// monotonic within a window and reset at window boundaries, and its
/// absence (no readings yet) is represented by a zero count rather
/// than a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorAccumulator {
    /// Most recent raw reading.
    pub last: f64,
    /// Sum of readings in the current window.
    pub sum: f64,
    /// Number of readings folded into the current window.
    pub count: u32,
}

impl SensorAccumulator {
    /// Folds one reading into the accumulator.
    pub fn fold(&mut self, value: f64) {
        self.last = value;
        self.sum += value;
        self.count += 1;
    }

    /// Returns the rolling average for the current window, or `None`
    /// if no reading has been folded yet.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / f64::from(self.count))
        }
    }

    /// Resets the window, keeping the last reading.
    pub fn reset_window(&mut self) {
        self.sum = 0.0;
        self.count = 0;
    }
}

/// Tracked state of the device.
///
/// This is the single mutable surface the dispatcher executes against.
/// Everything here is derived from the scenario and from runtime
/// commands, so a scenario reload clears it wholesale before
/// rebuilding; no stale entry survives a configuration change.
///
/// # Examples
///
/// ```
/// use scenar_lib::registry::SlotId;
/// use scenar_lib::state::{ActuatorState, DeviceState, StateChange};
///
/// let mut state = DeviceState::new();
/// let change = StateChange::actuator(SlotId::new(3), ActuatorState::On);
/// assert!(state.apply(&change));
/// assert_eq!(state.actuator(SlotId::new(3)), Some(ActuatorState::On));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeviceState {
    actuators: HashMap<u8, ActuatorState>,
    sensors: HashMap<u8, SensorAccumulator>,
    logging_keys: Vec<String>,
    uptime: Option<String>,
}

impl DeviceState {
    /// Creates a new empty device state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the state of an actuator slot, if known.
    #[must_use]
    pub fn actuator(&self, slot: SlotId) -> Option<ActuatorState> {
        self.actuators.get(&slot.value()).copied()
    }

    /// Returns all known actuator states as `(slot, state)` pairs.
    #[must_use]
    pub fn all_actuators(&self) -> Vec<(u8, ActuatorState)> {
        let mut all: Vec<_> = self.actuators.iter().map(|(s, a)| (*s, *a)).collect();
        all.sort_by_key(|(s, _)| *s);
        all
    }

    /// Gets the sensor accumulator for a slot, if any reading arrived.
    #[must_use]
    pub fn sensor(&self, slot: SlotId) -> Option<&SensorAccumulator> {
        self.sensors.get(&slot.value())
    }

    /// Returns all sensor accumulators as `(slot, accumulator)` pairs.
    #[must_use]
    pub fn all_sensors(&self) -> Vec<(u8, SensorAccumulator)> {
        let mut all: Vec<_> = self.sensors.iter().map(|(s, a)| (*s, *a)).collect();
        all.sort_by_key(|(s, _)| *s);
        all
    }

    /// Adds a key to the logging list if not already present.
    pub fn add_logging_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        if !self.logging_keys.contains(&key) {
            self.logging_keys.push(key);
        }
    }

    /// Returns the logging key list in registration order.
    #[must_use]
    pub fn logging_keys(&self) -> &[String] {
        &self.logging_keys
    }

    /// Returns the persisted uptime string, if refreshed at least once.
    #[must_use]
    pub fn uptime(&self) -> Option<&str> {
        self.uptime.as_deref()
    }

    /// Applies a state change and returns whether state actually
    /// changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Actuator { slot, state } => {
                if self.actuators.get(slot) == Some(state) {
                    false
                } else {
                    self.actuators.insert(*slot, *state);
                    true
                }
            }
            StateChange::SensorReading { slot, value } => {
                self.sensors.entry(*slot).or_default().fold(*value);
                true
            }
            StateChange::Uptime { uptime } => {
                if self.uptime.as_deref() == Some(uptime) {
                    false
                } else {
                    self.uptime = Some(uptime.clone());
                    true
                }
            }
        }
    }

    /// Resets every sensor measurement window.
    ///
    /// Called at publish-cycle boundaries; last readings survive, the
    /// rolling sums and enter counters restart.
    pub fn reset_sensor_windows(&mut self) {
        for acc in self.sensors.values_mut() {
            acc.reset_window();
        }
    }

    /// Clears all derived state.
    ///
    /// The uptime string survives: it belongs to the device, not to
    /// the loaded scenario.
    pub fn clear(&mut self) {
        self.actuators.clear();
        self.sensors.clear();
        self.logging_keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = DeviceState::new();
        assert!(state.actuator(SlotId::new(0)).is_none());
        assert!(state.sensor(SlotId::new(0)).is_none());
        assert!(state.logging_keys().is_empty());
        assert!(state.uptime().is_none());
    }

    #[test]
    fn actuator_state_parse() {
        assert_eq!(ActuatorState::parse("on"), Some(ActuatorState::On));
        assert_eq!(ActuatorState::parse("off"), Some(ActuatorState::Off));
        assert_eq!(ActuatorState::parse("50"), Some(ActuatorState::Level(50)));
        assert_eq!(ActuatorState::parse("warm"), None);
        // Case-sensitive, like verbs.
        assert_eq!(ActuatorState::parse("ON"), None);
    }

    #[test]
    fn apply_actuator_change_detects_no_op() {
        let mut state = DeviceState::new();
        let change = StateChange::actuator(SlotId::new(3), ActuatorState::On);

        assert!(state.apply(&change));
        assert!(!state.apply(&change));

        let off = StateChange::actuator(SlotId::new(3), ActuatorState::Off);
        assert!(state.apply(&off));
    }

    #[test]
    fn sensor_readings_fold_into_average() {
        let mut state = DeviceState::new();
        state.apply(&StateChange::sensor_reading(SlotId::new(1), 20.0));
        state.apply(&StateChange::sensor_reading(SlotId::new(1), 22.0));

        let acc = state.sensor(SlotId::new(1)).unwrap();
        assert_eq!(acc.count, 2);
        assert!((acc.average().unwrap() - 21.0).abs() < f64::EPSILON);
        assert!((acc.last - 22.0).abs() < f64::EPSILON);
    }

    #[test]
    fn window_reset_clears_counters_keeps_last() {
        let mut state = DeviceState::new();
        state.apply(&StateChange::sensor_reading(SlotId::new(1), 20.0));
        state.reset_sensor_windows();

        let acc = state.sensor(SlotId::new(1)).unwrap();
        assert_eq!(acc.count, 0);
        assert_eq!(acc.average(), None);
        assert!((acc.last - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn logging_keys_deduplicate() {
        let mut state = DeviceState::new();
        state.add_logging_key("temp");
        state.add_logging_key("hum");
        state.add_logging_key("temp");
        assert_eq!(state.logging_keys(), ["temp", "hum"]);
    }

    #[test]
    fn uptime_refresh() {
        let mut state = DeviceState::new();
        assert!(state.apply(&StateChange::uptime("0T00:00:05")));
        assert!(!state.apply(&StateChange::uptime("0T00:00:05")));
        assert_eq!(state.uptime(), Some("0T00:00:05"));
    }

    #[test]
    fn clear_drops_derived_state_keeps_uptime() {
        let mut state = DeviceState::new();
        state.apply(&StateChange::actuator(SlotId::new(1), ActuatorState::On));
        state.apply(&StateChange::sensor_reading(SlotId::new(2), 1.0));
        state.add_logging_key("temp");
        state.apply(&StateChange::uptime("0T00:00:05"));

        state.clear();

        assert!(state.actuator(SlotId::new(1)).is_none());
        assert!(state.sensor(SlotId::new(2)).is_none());
        assert!(state.logging_keys().is_empty());
        assert_eq!(state.uptime(), Some("0T00:00:05"));
    }

    #[test]
    fn all_actuators_sorted_by_slot() {
        let mut state = DeviceState::new();
        state.apply(&StateChange::actuator(SlotId::new(5), ActuatorState::On));
        state.apply(&StateChange::actuator(SlotId::new(1), ActuatorState::Off));
        assert_eq!(
            state.all_actuators(),
            vec![(1, ActuatorState::Off), (5, ActuatorState::On)]
        );
    }
}
