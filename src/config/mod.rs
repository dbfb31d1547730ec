// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device and widget configuration.
//!
//! The configuration is a JSON document consumed once per (re)load to
//! seed actuator/sensor keys and widget registrations, plus a
//! free-form parameter map that scenario scripts can reference through
//! `{param}` substitution. A malformed document aborts that single
//! load and the controller keeps operating on its last-known-good
//! configuration.

mod device_config;

pub use device_config::{DeviceConfig, FIRMWARE_VERSION, KeySeed};
