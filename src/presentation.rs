// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Presentation contract between the panel and its user interface.
//!
//! The panel never draws anything. It asks a [`Presenter`] to show
//! confirmation prompts and short notifications, and receives the user's
//! answer to a prompt later as a [`PromptChoice`].
//!
//! - [`TracingPresenter`] - logs everything, useful for headless hosts
//! - [`RecordingPresenter`] - keeps everything in memory for inspection

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::navigation::View;
use crate::room::RoomId;

/// How a notification should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// An action completed.
    Success,
    /// Neutral information.
    Info,
    /// The action was not performed, nothing is wrong.
    Warning,
    /// The action was refused.
    Error,
}

impl Severity {
    /// Returns the lower-case name of the severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a prompt asks the user to confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Leaving the schedule view would lose edits.
    UnsavedSchedule,
    /// Leaving the room-control view would lose edits.
    UnsavedRoom,
    /// Saving would drop half-filled new schedule rows.
    IncompleteEntries,
    /// Every slot of the draft schedule is about to be removed.
    ClearSchedule,
    /// A room is about to be removed.
    RemoveRoom(RoomId),
    /// Help text for a view; there is nothing to confirm.
    Help(View),
}

/// A confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// What is being confirmed.
    pub kind: PromptKind,
    /// Dialog title.
    pub title: String,
    /// Dialog body.
    pub message: String,
    /// Label of the confirm button.
    pub confirm_label: &'static str,
    /// Label of the cancel button, if the dialog has one.
    pub cancel_label: Option<&'static str>,
}

impl Prompt {
    /// Asks whether to discard schedule edits before leaving the view.
    #[must_use]
    pub fn unsaved_schedule() -> Self {
        Self {
            kind: PromptKind::UnsavedSchedule,
            title: "Unsaved Schedule Changes".to_string(),
            message: "You have unsaved changes to your schedule. What would you like to do?"
                .to_string(),
            confirm_label: "Discard Changes",
            cancel_label: Some("Stay & Save"),
        }
    }

    /// Asks whether to discard room edits before leaving the view.
    #[must_use]
    pub fn unsaved_room() -> Self {
        Self {
            kind: PromptKind::UnsavedRoom,
            title: "Unsaved Changes".to_string(),
            message: "You have unsaved changes to your room settings. What would you like to do?"
                .to_string(),
            confirm_label: "Discard Changes",
            cancel_label: Some("Keep Editing"),
        }
    }

    /// Asks whether to save although some new rows are incomplete.
    #[must_use]
    pub fn incomplete_entries() -> Self {
        Self {
            kind: PromptKind::IncompleteEntries,
            title: "Incomplete Entries".to_string(),
            message: "Some new schedule entries are incomplete and will not be saved. \
                      Would you like to continue?"
                .to_string(),
            confirm_label: "Save Anyway",
            cancel_label: Some("Go Back & Fix"),
        }
    }

    /// Asks whether to clear every slot of the draft schedule.
    #[must_use]
    pub fn clear_schedule() -> Self {
        Self {
            kind: PromptKind::ClearSchedule,
            title: "Clear Schedule".to_string(),
            message: "Are you sure you want to clear all schedule slots? \
                      (Changes will not be saved until you click Save)"
                .to_string(),
            confirm_label: "Clear All",
            cancel_label: Some("Cancel"),
        }
    }

    /// Asks whether to remove a room.
    #[must_use]
    pub fn remove_room(id: RoomId, name: &str) -> Self {
        Self {
            kind: PromptKind::RemoveRoom(id),
            title: "Remove Room".to_string(),
            message: format!("Are you sure you want to remove {name}? This action cannot be undone."),
            confirm_label: "Remove",
            cancel_label: Some("Cancel"),
        }
    }

    /// Shows the help text of a view.
    #[must_use]
    pub fn help(view: View) -> Self {
        let (title, message) = view.help();
        Self {
            kind: PromptKind::Help(view),
            title: title.to_string(),
            message: message.to_string(),
            confirm_label: "Understood",
            cancel_label: None,
        }
    }
}

/// The user's answer to a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    /// The confirm button was pressed.
    Confirm,
    /// The cancel button was pressed.
    Cancel,
    /// The dialog was closed without pressing a button.
    Dismiss,
}

/// Displays prompts and notifications on behalf of the panel.
pub trait Presenter: Send {
    /// Shows a confirmation dialog. The answer arrives later as a
    /// [`PromptChoice`].
    fn present(&mut self, prompt: &Prompt);

    /// Shows a short notification.
    fn notify(&mut self, message: &str, severity: Severity);
}

/// Presenter that writes prompts and notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn present(&mut self, prompt: &Prompt) {
        tracing::info!(
            kind = ?prompt.kind,
            title = %prompt.title,
            confirm = prompt.confirm_label,
            "{}",
            prompt.message
        );
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Success | Severity::Info => tracing::info!(%severity, "{message}"),
            Severity::Warning => tracing::warn!(%severity, "{message}"),
            Severity::Error => tracing::error!(%severity, "{message}"),
        }
    }
}

/// Something shown by a [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    /// A confirmation dialog.
    Prompt(Prompt),
    /// A notification.
    Notice {
        /// Notification text.
        message: String,
        /// Notification style.
        severity: Severity,
    },
}

/// Presenter that records everything it is asked to show.
///
/// Clones share the same record, so a test can keep one handle and give
/// another to the panel.
///
/// # Examples
///
/// ```
/// use lightpanel_lib::presentation::{Presenter, RecordingPresenter, Severity};
///
/// let recorder = RecordingPresenter::new();
/// let mut handle = recorder.clone();
/// handle.notify("Eco Mode activated", Severity::Success);
///
/// assert_eq!(
///     recorder.last_notice(),
///     Some(("Eco Mode activated".to_string(), Severity::Success))
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    shown: Arc<Mutex<Vec<Shown>>>,
}

impl RecordingPresenter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything shown so far, oldest first.
    #[must_use]
    pub fn shown(&self) -> Vec<Shown> {
        self.shown.lock().clone()
    }

    /// Returns the prompts shown so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<Prompt> {
        self.shown
            .lock()
            .iter()
            .filter_map(|item| match item {
                Shown::Prompt(prompt) => Some(prompt.clone()),
                Shown::Notice { .. } => None,
            })
            .collect()
    }

    /// Returns the notifications shown so far.
    #[must_use]
    pub fn notices(&self) -> Vec<(String, Severity)> {
        self.shown
            .lock()
            .iter()
            .filter_map(|item| match item {
                Shown::Notice { message, severity } => Some((message.clone(), *severity)),
                Shown::Prompt(_) => None,
            })
            .collect()
    }

    /// Returns the most recent prompt.
    #[must_use]
    pub fn last_prompt(&self) -> Option<Prompt> {
        self.prompts().pop()
    }

    /// Returns the most recent notification.
    #[must_use]
    pub fn last_notice(&self) -> Option<(String, Severity)> {
        self.notices().pop()
    }

    /// Forgets everything recorded.
    pub fn clear(&self) {
        self.shown.lock().clear();
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, prompt: &Prompt) {
        self.shown.lock().push(Shown::Prompt(prompt.clone()));
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        self.shown.lock().push(Shown::Notice {
            message: message.to_string(),
            severity,
        });
    }
}
