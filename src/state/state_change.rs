// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change events emitted by the dispatcher.

use serde::{Deserialize, Serialize};

use crate::registry::SlotId;

use super::ActuatorState;

/// A single observable change to device state.
///
/// The dispatcher produces these when a command mutates state; the
/// controller applies them to [`DeviceState`](super::DeviceState) and
/// forwards applied changes to the publisher boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StateChange {
    /// An actuator slot changed state.
    Actuator {
        /// The actuator's numeric slot.
        slot: u8,
        /// The new state.
        state: ActuatorState,
    },
    /// A sensor reading was folded into its accumulator.
    SensorReading {
        /// The sensor's numeric slot.
        slot: u8,
        /// The raw reading value.
        value: f64,
    },
    /// The persisted uptime field was refreshed.
    Uptime {
        /// Formatted uptime, `"XdTHH:MM:SS"`.
        uptime: String,
    },
}

impl StateChange {
    /// Creates an actuator change for `slot`.
    #[must_use]
    pub fn actuator(slot: SlotId, state: ActuatorState) -> Self {
        Self::Actuator {
            slot: slot.value(),
            state,
        }
    }

    /// Creates a sensor reading change for `slot`.
    #[must_use]
    pub fn sensor_reading(slot: SlotId, value: f64) -> Self {
        Self::SensorReading {
            slot: slot.value(),
            value,
        }
    }

    /// Creates an uptime refresh change.
    #[must_use]
    pub fn uptime(uptime: impl Into<String>) -> Self {
        Self::Uptime {
            uptime: uptime.into(),
        }
    }
}
