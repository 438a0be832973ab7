// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `LightPanel` Lib - the state core of a smart-lighting control panel.
//!
//! This library holds everything a lighting control panel keeps track of,
//! without drawing anything: rooms and their lighting settings, a weekly
//! lighting schedule edited as a draft, eco mode and energy savings. All
//! state is persisted in a local key-value store.
//!
//! # Supported Features
//!
//! - **Schedule editing**: draft/committed schedule with dirty tracking,
//!   add rows, copy slots to weekdays, clear, commit, discard
//! - **Navigation guard**: leaving a view with unsaved edits asks the user
//!   to discard or stay
//! - **Rooms**: add, rename, remove, occupancy, per-room lighting settings
//! - **Eco mode**: caps brightness and colour temperature of every room
//! - **Savings**: weekly totals and chart data
//! - **Events**: broadcast notifications of every panel change
//!
//! # Quick Start
//!
//! ```
//! use lightpanel_lib::{Command, ControlPanel, Outcome, ScheduleCommand, View};
//! use lightpanel_lib::presentation::{PromptChoice, RecordingPresenter};
//! use lightpanel_lib::schedule::SlotCandidate;
//! use lightpanel_lib::store::MemoryStore;
//!
//! # fn main() -> lightpanel_lib::Result<()> {
//! let presenter = RecordingPresenter::new();
//! let mut panel = ControlPanel::new(MemoryStore::new(), presenter.clone());
//!
//! panel.dispatch(Command::Navigate(View::Schedule))?;
//! let row = SlotCandidate::from_form("Saturday", "09:00", "12:00", "Cool White", true)?;
//! panel.dispatch(Command::Schedule(ScheduleCommand::AddSlot(row)))?;
//! panel.dispatch(Command::Schedule(ScheduleCommand::Save))?;
//!
//! assert_eq!(
//!     presenter.last_notice().map(|(message, _)| message).as_deref(),
//!     Some("Schedule saved successfully!")
//! );
//! assert!(matches!(
//!     panel.dispatch(Command::Navigate(View::Savings))?,
//!     Outcome::Navigated { .. }
//! ));
//! # Ok(())
//! # }
//! ```
//!
//! ## Persisting to Disk
//!
//! ```no_run
//! use lightpanel_lib::ControlPanel;
//! use lightpanel_lib::config::{PanelConfig, StorageConfig};
//! use lightpanel_lib::presentation::TracingPresenter;
//!
//! # fn main() -> Result<(), lightpanel_lib::error::StoreError> {
//! let config = PanelConfig::new()
//!     .with_storage(StorageConfig::Directory("/var/lib/lightpanel".into()));
//! let panel = ControlPanel::open(config, TracingPresenter)?;
//! println!("{} rooms", panel.rooms().len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Following Panel Events
//!
//! ```
//! use lightpanel_lib::{Command, ControlPanel, RoomCommand};
//! use lightpanel_lib::event::PanelEvent;
//!
//! # fn main() -> lightpanel_lib::Result<()> {
//! let mut panel = ControlPanel::default();
//! let mut events = panel.subscribe();
//!
//! panel.dispatch(Command::Room(RoomCommand::Add("Kitchen".to_string())))?;
//! assert!(matches!(events.try_recv(), Ok(PanelEvent::RoomAdded { .. })));
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The library logs through [`tracing`] and never installs a subscriber.

pub mod config;
pub mod error;
pub mod event;
pub mod navigation;
pub mod panel;
pub mod presentation;
pub mod room;
pub mod savings;
pub mod schedule;
pub mod store;
pub mod types;

pub use config::PanelConfig;
pub use error::{Error, Result, RoomError, ScheduleError, StoreError, ValueError};
pub use navigation::View;
pub use panel::{Command, ControlPanel, Outcome, Rejection, RoomCommand, ScheduleCommand};
pub use types::{Brightness, ColorTemp, LightingMode, ScheduleDay, TimeOfDay};
