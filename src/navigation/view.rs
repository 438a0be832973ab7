// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel views.

use std::fmt;

/// A screen of the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    /// Dashboard with room cards and the eco mode toggle.
    #[default]
    Home,
    /// Searchable list of rooms.
    Rooms,
    /// Weekly savings and eco tips.
    Savings,
    /// Weekly schedule editor.
    Schedule,
    /// Controls for a single room.
    RoomControl,
}

impl View {
    /// Views reachable from the bottom navigation bar.
    pub const TOP_LEVEL: [Self; 4] = [Self::Home, Self::Rooms, Self::Savings, Self::Schedule];

    /// Returns the element id of the view.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home-view",
            Self::Rooms => "rooms-view",
            Self::Savings => "savings-view",
            Self::Schedule => "schedule-view",
            Self::RoomControl => "room-control-view",
        }
    }

    /// Returns `true` for views on the bottom navigation bar.
    ///
    /// Navigating to one of these starts a fresh back-navigation history.
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        !matches!(self, Self::RoomControl)
    }

    /// Returns the title and text of the view's help dialog.
    #[must_use]
    pub const fn help(&self) -> (&'static str, &'static str) {
        match self {
            Self::Home => (
                "Home Dashboard Help",
                "View and control rooms at a glance. Click Adjust to change settings for a specific room.",
            ),
            Self::Rooms => (
                "Rooms Overview Help",
                "See all rooms and search for specific ones. Click Adjust to change settings.",
            ),
            Self::Savings => (
                "Savings View Help",
                "Track your energy savings over time and get eco-friendly tips to reduce consumption.",
            ),
            Self::Schedule => (
                "Schedule Management Help",
                "Set up automated lighting schedules. Add time slots, toggle them on/off, and apply to multiple days.",
            ),
            Self::RoomControl => (
                "Room Control Help",
                "Adjust brightness, colour temperature, lighting mode, and occupancy detection for this room.",
            ),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
