// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ScenaR` Lib - A Rust library for command and scenario automation on
//! IoT device controllers.
//!
//! This library implements the scripting core of a device controller:
//! a command language dispatched in strict FIFO order, a slot-based
//! timer engine, key registries mapping symbolic names to numeric
//! slots, and a publish boundary that carries every externally
//! observable effect (widget registrations, events, state changes).
//!
//! # Supported Features
//!
//! - **Command dispatch**: CSV, space and buffer tokenization, one
//!   ingestion point for HTTP, MQTT and timer-generated commands
//! - **Timers**: one-shot and repeating countdowns in a fixed slot
//!   table, per-slot and global pause/resume, built-in uptime ticker
//! - **Scenarios**: persisted command scripts loaded on demand, with
//!   atomic clear-then-rebuild reloads
//! - **State tracking**: actuator states, rolling sensor averages per
//!   measurement window, logging key lists
//! - **Publishing**: widgets, charts, named events and full snapshots
//!   over a pluggable [`Publisher`](publish::Publisher) boundary
//!
//! # Quick Start
//!
//! ```
//! use scenar_lib::DeviceController;
//! use scenar_lib::publish::RecordingPublisher;
//! use scenar_lib::scenario::Scenario;
//!
//! let recorder = RecordingPublisher::new();
//! let mut controller = DeviceController::new(Box::new(recorder.clone()));
//!
//! // A scenario binds symbolic keys and arms timers.
//! controller.set_scenario(Scenario::from_text(
//!     "addkey,pump,3\nsettimer,0,30m,repeat,event,heartbeat,1",
//! ));
//! controller.reload();
//!
//! // Runtime commands go through the same loop buffer.
//! controller.ingest("pump,on");
//! controller.process_pass();
//!
//! assert_eq!(recorder.changes().len(), 1);
//! ```
//!
//! # Driving the Engine
//!
//! The controller is single-threaded and cooperative: the host calls
//! [`DeviceController::tick`] with elapsed time and
//! [`DeviceController::process_pass`] to drain queued commands, or
//! hands the controller to the async [`DeviceController::run`] loop:
//!
//! ```no_run
//! use std::time::Duration;
//! use scenar_lib::DeviceController;
//! use scenar_lib::publish::BusPublisher;
//!
//! #[tokio::main]
//! async fn main() {
//!     let bus = BusPublisher::new();
//!     let mut rx = bus.subscribe();
//!     let mut controller = DeviceController::new(Box::new(bus));
//!
//!     tokio::spawn(async move {
//!         while let Ok(item) = rx.recv().await {
//!             println!("{item:?}");
//!         }
//!     });
//!
//!     controller.run(Duration::from_secs(1)).await;
//! }
//! ```

pub mod command;
pub mod config;
mod controller;
pub mod error;
pub mod publish;
pub mod registry;
pub mod scenario;
pub mod state;
pub mod timer;

pub use command::{CommandRecord, TokenizeMode, Verb, tokenize};
pub use config::{DeviceConfig, KeySeed};
pub use controller::DeviceController;
pub use error::{ConfigError, Error, ParseError, RegistryError, Result, TimerError, ValueError};
pub use publish::{BusPublisher, EventPayload, PublishEvent, Publisher, StateSnapshot};
pub use registry::{KeyRegistry, RegistryTables, SlotId};
pub use scenario::{LoopBuffer, Scenario};
pub use state::{ActuatorState, DeviceState, StateChange};
pub use timer::{TimerAction, TimerEngine, TimerMode};
