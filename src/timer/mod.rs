// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Countdown timers for scenario automation.
//!
//! The [`TimerEngine`] owns a fixed table of numbered timer slots plus
//! one built-in uptime timer. User scripts arm, pause, and delete slot
//! timers through command verbs; the engine is advanced by the
//! controller's cooperative `tick` and reports which timers fired so
//! their actions can be carried out (a command re-injected into the
//! loop buffer, or an uptime refresh).
//!
//! Timers never call back into the engine: expiry is returned as data,
//! keeping every operation synchronous and bounded.

mod duration;
mod engine;

pub use duration::{format_uptime, parse_duration};
pub use engine::{
    MAX_TIMERS, Timer, TimerAction, TimerEngine, TimerFired, TimerMode, UPTIME_REFRESH_INTERVAL,
};
