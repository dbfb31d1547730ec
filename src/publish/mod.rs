// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The publisher boundary: widgets, events, and state snapshots.
//!
//! Everything externally observable leaves the engine through the
//! [`Publisher`] trait: widget and chart registrations, named events,
//! actuator state changes, and periodic full-state snapshots. The
//! transports behind it (MQTT topics, `live.json`/`runtime.json` HTTP
//! documents) are external collaborators; this crate only guarantees
//! that it supplies a value for every key it owns on every publish
//! cycle.
//!
//! Each `create_*` call is a pure registration: the engine does not
//! retain a reference to the created object and never mutates it
//! afterward. Further updates flow through the normal publish path.

mod bus;
mod event;
mod publisher;
mod snapshot;
mod widget;

pub use bus::{BusPublisher, PublishEvent};
pub use event::EventPayload;
pub use publisher::{NullPublisher, Publisher, RecordingPublisher};
pub use snapshot::{SensorEntry, StateSnapshot, TimerEntry};
pub use widget::{ChartDef, MAX_WIDGET_PARAMS, WidgetDef, WidgetParam};
