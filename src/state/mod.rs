// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory device state and state change events.
//!
//! [`DeviceState`] is the single place the dispatcher mutates: actuator
//! slot states, sensor reading accumulators, logging keys, and the
//! persisted uptime string. Changes are expressed as [`StateChange`]
//! values so the controller can both apply them and forward them to
//! the publisher boundary.

mod device_state;
mod state_change;

pub use device_state::{ActuatorState, DeviceState, SensorAccumulator};
pub use state_change::StateChange;
