// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting panel events.

use tokio::sync::broadcast;

use super::PanelEvent;

/// Default channel capacity for the event bus.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Broadcasts panel events to any number of subscribers.
///
/// Built on tokio's broadcast channel. Publishing never blocks and does not
/// need a runtime; receivers can be polled with `recv().await` or drained
/// with `try_recv()`.
///
/// # Capacity
///
/// If a subscriber falls more than `capacity` events behind, it loses the
/// oldest ones and its next receive reports `Lagged`.
///
/// # Examples
///
/// ```
/// use lightpanel_lib::event::{EventBus, PanelEvent};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(PanelEvent::ScheduleDiscarded);
/// assert_eq!(rx.try_recv().unwrap(), PanelEvent::ScheduleDiscarded);
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PanelEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus buffering up to `capacity` events.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event and returns how many subscribers will see it.
    ///
    /// Without subscribers the event is dropped and 0 is returned.
    pub fn publish(&self, event: PanelEvent) -> usize {
        tracing::trace!(?event, "Publishing panel event");
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
