// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast-channel publisher for in-process subscribers.

use tokio::sync::broadcast;

use crate::state::StateChange;

use super::{ChartDef, EventPayload, Publisher, StateSnapshot, WidgetDef};

/// Default channel capacity for the publish bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Everything that can cross the publish boundary, as one stream.
///
/// Transport adapters (MQTT client, HTTP state endpoints, WebSocket
/// push) subscribe to this stream and fan the items out to their own
/// wire formats.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishEvent {
    /// A widget was registered.
    WidgetCreated(WidgetDef),
    /// A chart was registered.
    ChartCreated(ChartDef),
    /// A named event was emitted.
    Event(EventPayload),
    /// An applied state change.
    StateChanged(StateChange),
    /// A full publish-cycle snapshot.
    Snapshot(StateSnapshot),
}

/// A [`Publisher`] backed by a tokio broadcast channel.
///
/// Multiple subscribers each receive their own copy of every item. If
/// a slow subscriber falls behind the fixed capacity it loses the
/// oldest items (`RecvError::Lagged`); publishing itself never blocks,
/// which keeps the cooperative engine loop responsive.
///
/// # Examples
///
/// ```
/// use scenar_lib::publish::{BusPublisher, Publisher, EventPayload, PublishEvent};
///
/// let bus = BusPublisher::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish_event(EventPayload::numbered("door", 1));
/// let item = rx.try_recv().unwrap();
/// assert!(matches!(item, PublishEvent::Event(_)));
/// ```
#[derive(Debug)]
pub struct BusPublisher {
    sender: broadcast::Sender<PublishEvent>,
}

impl BusPublisher {
    /// Creates a bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a bus with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to the publish stream.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PublishEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    fn send(&self, event: PublishEvent) {
        // No subscribers is fine: the device can run headless.
        let _ = self.sender.send(event);
    }
}

impl Default for BusPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BusPublisher {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl Publisher for BusPublisher {
    fn create_widget(&self, widget: WidgetDef) {
        self.send(PublishEvent::WidgetCreated(widget));
    }

    fn create_chart(&self, chart: ChartDef) {
        self.send(PublishEvent::ChartCreated(chart));
    }

    fn publish_event(&self, event: EventPayload) {
        self.send(PublishEvent::Event(event));
    }

    fn publish_change(&self, change: StateChange) {
        self.send(PublishEvent::StateChanged(change));
    }

    fn publish_state(&self, snapshot: StateSnapshot) {
        self.send(PublishEvent::Snapshot(snapshot));
    }
}
