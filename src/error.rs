// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `LightPanel` library.
//!
//! This module provides the error hierarchy used across the library: value
//! validation, schedule editing, room management and persistence.
//!
//! Schedule and room errors are mostly *recoverable*: the control panel
//! reports them to the presentation layer and keeps running. Store errors
//! and [`ScheduleError::OutOfRange`] indicate a broken host or a programming
//! error and are returned to the caller.

use thiserror::Error;

use crate::room::RoomId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while editing the schedule.
    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Error occurred while managing rooms.
    #[error("room error: {0}")]
    Room(#[from] RoomError),

    /// Error occurred while loading or saving a record.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl Error {
    /// Returns `true` if the error can be surfaced to the user and the panel
    /// can keep going without any state repair.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Value(_) | Self::Room(_) => true,
            Self::Schedule(err) => err.is_recoverable(),
            Self::Store(_) => false,
        }
    }
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types with
/// invalid values, typically from raw form input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A time of day is not in `HH:MM` form.
    #[error("invalid time of day: {0:?} (expected HH:MM)")]
    InvalidTime(String),

    /// A schedule day name is not recognised.
    #[error("invalid schedule day: {0:?}")]
    InvalidDay(String),

    /// A lighting mode name is not recognised.
    #[error("invalid lighting mode: {0:?}")]
    InvalidMode(String),
}

/// Errors raised by the draft schedule manager.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A slot index does not exist in the draft.
    ///
    /// The panel never produces this from user input; it indicates a
    /// programming error in the caller.
    #[error("slot index {index} is out of range (draft has {len} slots)")]
    OutOfRange {
        /// The index that was requested.
        index: usize,
        /// Number of slots in the draft.
        len: usize,
    },

    /// One or more new slot rows are missing a day, start or end time.
    #[error("{rows} schedule {}", entries_phrase(.rows))]
    IncompleteEntry {
        /// Number of incomplete rows.
        rows: usize,
    },

    /// Duplicate-to-weekdays was requested with no slot selected.
    #[error("no schedule slot selected")]
    NoSelection,

    /// A pending add row handle does not exist.
    #[error("pending row {0} does not exist")]
    UnknownRow(usize),
}

impl ScheduleError {
    /// Returns `true` for errors caused by user input rather than by a
    /// broken caller.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::IncompleteEntry { .. } | Self::NoSelection)
    }
}

/// Errors related to room management.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// Another room already uses this name (case-insensitively or by slug).
    #[error("a room named {0:?} already exists")]
    DuplicateName(String),

    /// The room name is empty after trimming.
    #[error("room name is empty")]
    EmptyName,

    /// No room with this identifier exists.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// A room-control operation was requested with no room open.
    #[error("no room is open for editing")]
    NoOpenRoom,
}

/// Errors related to the persistent store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("I/O error on record {key:?}: {source}")]
    Io {
        /// The record key being accessed.
        key: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A record could not be encoded or decoded.
    #[error("JSON error on record {key:?}: {source}")]
    Json {
        /// The record key being accessed.
        key: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

fn entries_phrase(rows: &usize) -> &'static str {
    if *rows == 1 {
        "entry is incomplete"
    } else {
        "entries are incomplete"
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
