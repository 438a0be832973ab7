// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The control panel: one state container driven by user commands.
//!
//! A user interface turns every click into a [`Command`], hands it to
//! [`ControlPanel::dispatch`] and renders from the panel's accessors
//! afterwards. Prompts and notifications go out through the
//! [`Presenter`](crate::presentation::Presenter) the panel was built with.
//!
//! # Prompt flows
//!
//! | Action | Prompt | Confirm | Cancel / dismiss |
//! |--------|--------|---------|------------------|
//! | leave schedule with edits | Unsaved Schedule Changes | discard, navigate | stay |
//! | leave room control with edits | Unsaved Changes | discard, navigate | stay |
//! | save schedule with half-filled rows | Incomplete Entries | save, drop the rows | stay |
//! | clear schedule | Clear Schedule | empty the draft | nothing |
//! | remove room | Remove Room | remove and persist | nothing |

mod command;
mod control_panel;

pub use command::{Command, Outcome, Rejection, RoomCommand, ScheduleCommand};
pub use control_panel::ControlPanel;
