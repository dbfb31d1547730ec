// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The publisher trait and its built-in implementations.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::state::StateChange;

use super::{ChartDef, EventPayload, StateSnapshot, WidgetDef};

/// The boundary every externally observable effect passes through.
///
/// Implementations must not block: the engine runs single-threaded
/// cooperative, so a publisher that performs real I/O should hand the
/// value off (channel, queue) and return immediately. The
/// [`BusPublisher`](super::BusPublisher) does exactly that over a
/// tokio broadcast channel.
pub trait Publisher: Send + Sync {
    /// Registers a presentation widget against a data topic.
    fn create_widget(&self, widget: WidgetDef);

    /// Registers a chart against a data topic.
    fn create_chart(&self, chart: ChartDef);

    /// Routes a named event.
    fn publish_event(&self, event: EventPayload);

    /// Routes an applied state change.
    fn publish_change(&self, change: StateChange);

    /// Routes a full-state snapshot (one per publish cycle).
    fn publish_state(&self, snapshot: StateSnapshot);
}

/// A publisher that discards everything.
///
/// Useful for headless operation and tests that only exercise state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPublisher;

impl Publisher for NullPublisher {
    fn create_widget(&self, _widget: WidgetDef) {}
    fn create_chart(&self, _chart: ChartDef) {}
    fn publish_event(&self, _event: EventPayload) {}
    fn publish_change(&self, _change: StateChange) {}
    fn publish_state(&self, _snapshot: StateSnapshot) {}
}

#[derive(Debug, Default)]
struct Recorded {
    widgets: Vec<WidgetDef>,
    charts: Vec<ChartDef>,
    events: Vec<EventPayload>,
    changes: Vec<StateChange>,
    snapshots: Vec<StateSnapshot>,
}

/// A publisher that records every call, for tests.
///
/// Clones share the same recording, so a test can keep one handle
/// while handing another to the controller.
///
/// # Examples
///
/// ```
/// use scenar_lib::publish::{Publisher, RecordingPublisher, EventPayload};
///
/// let recorder = RecordingPublisher::new();
/// let handle = recorder.clone();
///
/// recorder.publish_event(EventPayload::numbered("door", 1));
/// assert_eq!(handle.events().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingPublisher {
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingPublisher {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded widget registrations.
    #[must_use]
    pub fn widgets(&self) -> Vec<WidgetDef> {
        self.recorded.lock().widgets.clone()
    }

    /// Returns all recorded chart registrations.
    #[must_use]
    pub fn charts(&self) -> Vec<ChartDef> {
        self.recorded.lock().charts.clone()
    }

    /// Returns all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<EventPayload> {
        self.recorded.lock().events.clone()
    }

    /// Returns all recorded state changes.
    #[must_use]
    pub fn changes(&self) -> Vec<StateChange> {
        self.recorded.lock().changes.clone()
    }

    /// Returns all recorded snapshots.
    #[must_use]
    pub fn snapshots(&self) -> Vec<StateSnapshot> {
        self.recorded.lock().snapshots.clone()
    }
}

impl Publisher for RecordingPublisher {
    fn create_widget(&self, widget: WidgetDef) {
        self.recorded.lock().widgets.push(widget);
    }

    fn create_chart(&self, chart: ChartDef) {
        self.recorded.lock().charts.push(chart);
    }

    fn publish_event(&self, event: EventPayload) {
        self.recorded.lock().events.push(event);
    }

    fn publish_change(&self, change: StateChange) {
        self.recorded.lock().changes.push(change);
    }

    fn publish_state(&self, snapshot: StateSnapshot) {
        self.recorded.lock().snapshots.push(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SlotId;
    use crate::state::ActuatorState;

    #[test]
    fn recording_publisher_shares_state_across_clones() {
        let recorder = RecordingPublisher::new();
        let handle = recorder.clone();

        recorder.publish_change(StateChange::actuator(SlotId::new(3), ActuatorState::On));
        recorder.create_widget(WidgetDef::new("W", "P", 1, "toggle", "t"));

        assert_eq!(handle.changes().len(), 1);
        assert_eq!(handle.widgets().len(), 1);
        assert!(handle.events().is_empty());
    }

    #[test]
    fn null_publisher_accepts_everything() {
        let publisher = NullPublisher;
        publisher.publish_event(EventPayload::numbered("x", 1));
        publisher.publish_change(StateChange::uptime("0T00:00:05"));
    }
}
