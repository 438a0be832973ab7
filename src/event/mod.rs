// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel event notifications.
//!
//! The control panel publishes a [`PanelEvent`] on its [`EventBus`] after
//! every change that other parts of an application may want to follow:
//! view switches, schedule commits, room changes and eco mode.
//!
//! # Examples
//!
//! ```
//! use lightpanel_lib::event::{EventBus, PanelEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(PanelEvent::EcoModeChanged { enabled: true, capped_rooms: 1 });
//! assert!(matches!(rx.try_recv(), Ok(PanelEvent::EcoModeChanged { enabled: true, .. })));
//! ```

mod event_bus;
mod panel_event;

pub use event_bus::{DEFAULT_CHANNEL_CAPACITY, EventBus};
pub use panel_event::PanelEvent;
