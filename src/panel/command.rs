// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User actions and their outcomes.

use crate::error::{Error, RoomError, ScheduleError, ValueError};
use crate::navigation::View;
use crate::presentation::{PromptChoice, PromptKind, Severity};
use crate::room::{RoomField, RoomId};
use crate::schedule::{PendingRow, SlotCandidate, SlotField};

/// A user action handled by [`ControlPanel::dispatch`](super::ControlPanel::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch to a view from the navigation bar.
    Navigate(View),
    /// Go back to the previous view.
    Back,
    /// Open the room-control view for a room.
    OpenRoom(RoomId),
    /// Show the help text of the active view.
    Help,
    /// Answer the prompt currently shown.
    Respond(PromptChoice),
    /// Edit the schedule.
    Schedule(ScheduleCommand),
    /// Manage rooms or edit the open room.
    Room(RoomCommand),
    /// Switch eco mode on or off.
    SetEcoMode(bool),
}

/// Schedule view actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleCommand {
    /// Change one field of a slot.
    SetField {
        /// Slot index in the draft.
        index: usize,
        /// New value.
        field: SlotField,
    },
    /// Replace a slot with an edited row.
    UpdateSlot {
        /// Slot index in the draft.
        index: usize,
        /// The edited row.
        candidate: SlotCandidate,
    },
    /// Append a filled-in row.
    AddSlot(SlotCandidate),
    /// Open an empty "add new slot" row.
    OpenRow,
    /// Change one field of an open row.
    EditRow {
        /// The row to change.
        row: PendingRow,
        /// New value.
        field: SlotField,
    },
    /// Copy slots to every other weekday.
    ApplyToWeekdays(Vec<usize>),
    /// Copy every enabled slot to every other weekday.
    ApplyEnabledToWeekdays,
    /// Remove every slot, after confirmation.
    ClearAll,
    /// Commit the draft, after confirmation if some new rows are incomplete.
    Save,
    /// Throw the draft away.
    Discard,
}

/// Room actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomCommand {
    /// Add a room with default settings.
    Add(String),
    /// Remove a room, after confirmation.
    Remove(RoomId),
    /// Rename a room.
    Rename {
        /// The room to rename.
        id: RoomId,
        /// The new name.
        name: String,
    },
    /// Flip a room's occupancy flag.
    ToggleOccupancy(RoomId),
    /// Change one setting of the open room.
    Set(RoomField),
    /// Apply the open room's settings without saving them.
    Apply,
    /// Apply and save the open room's settings.
    Save,
    /// Reset the open room's settings to the last applied ones.
    Discard,
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action was carried out.
    Done,
    /// The active view changed.
    Navigated {
        /// The view that was left.
        from: View,
        /// The view that is now active.
        to: View,
    },
    /// A prompt is shown; the action continues when the user responds.
    Prompted(PromptKind),
    /// The user cancelled; nothing changed.
    Stayed,
    /// There was nothing to do.
    Unchanged,
    /// The action was refused and the user was notified.
    Rejected(Rejection),
}

/// A recoverable error reported to the user instead of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A value failed validation.
    Value(ValueError),
    /// A schedule edit was refused.
    Schedule(ScheduleError),
    /// A room action was refused.
    Room(RoomError),
}

impl Rejection {
    /// Splits recoverable errors from those that must reach the caller.
    pub(crate) fn from_error(err: Error) -> Result<Self, Error> {
        match err {
            Error::Value(e) => Ok(Self::Value(e)),
            Error::Schedule(e) if e.is_recoverable() => Ok(Self::Schedule(e)),
            Error::Room(e) => Ok(Self::Room(e)),
            other => Err(other),
        }
    }

    /// Returns the notification shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Schedule(ScheduleError::NoSelection) => {
                "Please select at least one schedule slot to apply to weekdays".to_string()
            }
            Self::Room(RoomError::EmptyName) => "Please enter a room name".to_string(),
            Self::Room(RoomError::DuplicateName(_)) => {
                "A room with this name already exists".to_string()
            }
            Self::Value(e) => e.to_string(),
            Self::Schedule(e) => e.to_string(),
            Self::Room(e) => e.to_string(),
        }
    }

    /// Returns the notification style.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Schedule(_) => Severity::Warning,
            Self::Value(_) | Self::Room(_) => Severity::Error,
        }
    }
}
