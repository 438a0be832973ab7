// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel event types.

use crate::navigation::View;
use crate::room::RoomId;

/// Events emitted by the control panel.
///
/// Events are published after the change they describe has been applied
/// (and persisted, for the events that involve the store).
///
/// # Examples
///
/// ```
/// use lightpanel_lib::event::PanelEvent;
/// use lightpanel_lib::room::RoomId;
///
/// let room_id = RoomId::new();
/// let added = PanelEvent::RoomAdded { room_id };
/// assert_eq!(added.room_id(), Some(room_id));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// The active view changed.
    ViewChanged {
        /// The view that was left.
        from: View,
        /// The view that is now active.
        to: View,
    },

    /// The draft schedule was committed and persisted.
    ScheduleCommitted {
        /// Number of slots in the committed schedule.
        slots: usize,
    },

    /// The draft schedule was thrown away.
    ScheduleDiscarded,

    /// A room was added.
    RoomAdded {
        /// The ID of the new room.
        room_id: RoomId,
    },

    /// A room was removed.
    RoomRemoved {
        /// The ID of the removed room.
        room_id: RoomId,
    },

    /// A room's name or settings changed.
    RoomUpdated {
        /// The ID of the room.
        room_id: RoomId,
        /// Whether the change was persisted.
        persisted: bool,
    },

    /// Eco mode was switched.
    EcoModeChanged {
        /// Whether eco mode is now on.
        enabled: bool,
        /// Number of rooms whose settings were capped.
        capped_rooms: usize,
    },
}

impl PanelEvent {
    /// Returns the room this event is about, if any.
    #[must_use]
    pub fn room_id(&self) -> Option<RoomId> {
        match self {
            Self::RoomAdded { room_id }
            | Self::RoomRemoved { room_id }
            | Self::RoomUpdated { room_id, .. } => Some(*room_id),
            Self::ViewChanged { .. }
            | Self::ScheduleCommitted { .. }
            | Self::ScheduleDiscarded
            | Self::EcoModeChanged { .. } => None,
        }
    }
}
