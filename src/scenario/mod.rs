// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scenario scripts and the pending-command queue.
//!
//! A [`Scenario`] is the persisted automation script: newline-separated
//! command lines, replayed wholesale through the dispatcher on every
//! (re)load. The [`LoopBuffer`] is the runtime side: a FIFO queue of
//! command strings produced by incoming network requests, timer
//! expirations, and scenario continuation, drained once per processing
//! pass.

mod loop_buffer;
mod script;

pub use loop_buffer::LoopBuffer;
pub use script::Scenario;
