// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room-control editing session.

use crate::error::{Error, RoomError};
use crate::navigation::UnsavedChanges;
use crate::savings::EcoLimits;
use crate::store::KeyValueStore;

use super::{Room, RoomField, RoomId, RoomRegistry};

#[derive(Debug, Clone)]
struct Session {
    saved: Room,
    edited: Room,
}

impl Session {
    fn reset_to(&mut self, room: Room) -> &Room {
        self.saved.clone_from(&room);
        self.edited = room;
        &self.edited
    }
}

/// Temporary copy of one room's settings while the room-control view is
/// open.
///
/// Edits only reach the [`RoomRegistry`] through [`apply`](Self::apply)
/// (memory only) or [`save`](Self::save) (memory and store).
///
/// # Examples
///
/// ```
/// use lightpanel_lib::room::{RoomControl, RoomField, RoomRegistry, default_rooms};
/// use lightpanel_lib::types::LightingMode;
///
/// let mut rooms = RoomRegistry::new(default_rooms());
/// let mut control = RoomControl::default();
///
/// control.open(&rooms.rooms()[1]);
/// control.set(RoomField::Mode(LightingMode::Productivity)).unwrap();
/// assert!(control.has_changes());
///
/// control.apply(&mut rooms).unwrap();
/// assert_eq!(rooms.rooms()[1].mode, LightingMode::Productivity);
/// assert!(!control.has_changes());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoomControl {
    session: Option<Session>,
}

impl RoomControl {
    /// Starts editing a copy of `room`, replacing any open session.
    pub fn open(&mut self, room: &Room) {
        tracing::debug!(id = %room.id, name = %room.name, "Opened room control");
        self.session = Some(Session {
            saved: room.clone(),
            edited: room.clone(),
        });
    }

    /// Ends the session, dropping any edits.
    pub fn close(&mut self) {
        self.session = None;
    }

    /// Returns the identifier of the open room.
    #[must_use]
    pub fn room_id(&self) -> Option<RoomId> {
        self.session.as_ref().map(|s| s.saved.id)
    }

    /// Returns the edited settings of the open room.
    #[must_use]
    pub fn current(&self) -> Option<&Room> {
        self.session.as_ref().map(|s| &s.edited)
    }

    /// Changes one setting of the open room.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::NoOpenRoom` if no room is open.
    pub fn set(&mut self, field: RoomField) -> Result<(), RoomError> {
        let session = self.session.as_mut().ok_or(RoomError::NoOpenRoom)?;
        session.edited.apply(field);
        Ok(())
    }

    /// Returns `true` if the edited settings differ from the last applied
    /// ones.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.saved != s.edited)
    }

    /// Writes the edited settings to `rooms` without persisting them.
    ///
    /// Only the settings are written; the room's stored name is kept.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::NoOpenRoom` if no room is open, or
    /// `RoomError::NotFound` if the room has been removed meanwhile.
    pub fn apply(&mut self, rooms: &mut RoomRegistry) -> Result<&Room, RoomError> {
        let session = self.session.as_mut().ok_or(RoomError::NoOpenRoom)?;
        let updated = rooms.update_settings(&session.edited)?.clone();
        tracing::debug!(id = %updated.id, "Applied room settings");
        Ok(session.reset_to(updated))
    }

    /// Writes the edited settings to `rooms` and persists all rooms.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`apply`](Self::apply), or the store's error if
    /// the rooms cannot be written. In the latter case the settings stay
    /// applied in memory.
    pub fn save<S: KeyValueStore + ?Sized>(
        &mut self,
        rooms: &mut RoomRegistry,
        store: &S,
    ) -> Result<&Room, Error> {
        let session = self.session.as_mut().ok_or(RoomError::NoOpenRoom)?;
        let updated = rooms.update_settings(&session.edited)?.clone();
        rooms.save(store)?;
        tracing::info!(id = %updated.id, name = %updated.name, "Saved room settings");
        Ok(session.reset_to(updated))
    }

    /// Takes in a change made to the open room outside the session.
    ///
    /// Settings the user has not touched follow `room`; edited settings are
    /// kept. Does nothing if `room` is not the open room.
    pub fn refresh(&mut self, room: &Room) {
        let Some(session) = self.session.as_mut().filter(|s| s.saved.id == room.id) else {
            return;
        };
        let mut edited = room.clone();
        if session.edited.mode != session.saved.mode {
            edited.mode = session.edited.mode;
        }
        if session.edited.brightness != session.saved.brightness {
            edited.brightness = session.edited.brightness;
        }
        if session.edited.temp != session.saved.temp {
            edited.temp = session.edited.temp;
        }
        if session.edited.occupancy != session.saved.occupancy {
            edited.occupancy = session.edited.occupancy;
        }
        session.saved = room.clone();
        session.edited = edited;
        tracing::debug!(id = %room.id, "Refreshed room control");
    }

    /// Caps the edited settings at the eco limits. Returns `true` if anything
    /// changed.
    pub fn cap_to(&mut self, limits: &EcoLimits) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| session.edited.cap_to(limits))
    }

    /// Resets the edited settings to the last applied ones.
    pub fn discard(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.edited.clone_from(&session.saved);
            tracing::debug!(id = %session.saved.id, "Discarded room edits");
        }
    }
}

impl UnsavedChanges for RoomControl {
    fn has_unsaved_changes(&self) -> bool {
        self.has_changes()
    }

    fn discard_changes(&mut self) {
        self.discard();
    }
}
