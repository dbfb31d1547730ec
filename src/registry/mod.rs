// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Symbolic key to numeric slot resolution.
//!
//! Scenario scripts name devices and timers by symbolic keys
//! (`"pump"`, `"temp"`); the engine addresses them by dense numeric
//! slots. This module provides the lookup tables that bridge the two:
//!
//! - [`SlotId`] - Numeric slot identifier
//! - [`KeyRegistry`] - One named table of key-to-slot mappings
//! - [`RegistryTables`] - The set of tables owned by a controller
//!
//! Registries are append-only during normal operation and rebuilt
//! wholesale (never patched in place) when the owning device
//! configuration is reloaded.

mod key_registry;
mod tables;

pub use key_registry::{KeyRegistry, SlotId};
pub use tables::{ACTUATOR_TABLE, LOGGING_TABLE, RegistryTables, SENSOR_TABLE};
