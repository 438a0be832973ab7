// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The list of rooms.

use crate::error::{RoomError, StoreError};
use crate::savings::EcoLimits;
use crate::store::{KeyValueStore, RecordKey, RecordStore};
use crate::types::{Brightness, ColorTemp, LightingMode};

use super::record::StoredRoom;
use super::{Room, RoomId, slugify};

/// Returns the rooms a panel starts with when nothing is stored.
#[must_use]
pub fn default_rooms() -> Vec<Room> {
    vec![
        Room {
            mode: LightingMode::DimmedWarm,
            brightness: Brightness::clamped(70),
            temp: ColorTemp::clamped(3000),
            ..Room::new("Living Room")
        },
        Room::new("Bedroom"),
    ]
}

/// Ordered collection of rooms with unique names.
///
/// All mutations happen in memory; call [`save`](Self::save) to persist.
///
/// # Examples
///
/// ```
/// use lightpanel_lib::room::RoomRegistry;
///
/// let mut rooms = RoomRegistry::default();
/// let id = rooms.add("  Kitchen ").unwrap().id;
///
/// assert_eq!(rooms.get(id).unwrap().name, "Kitchen");
/// assert!(rooms.add("KITCHEN").is_err());
/// assert_eq!(rooms.find_by_slug("kitchen").unwrap().id, id);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
}

impl RoomRegistry {
    /// Creates a registry holding `rooms`.
    #[must_use]
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// Loads the rooms persisted in `store`.
    ///
    /// When nothing is stored (or the record is unreadable), the registry
    /// starts with [`default_rooms`] if `seed_defaults` is set, or empty
    /// otherwise. Rooms stored without an identifier are given one, and the
    /// upgraded list is written back.
    #[must_use]
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, seed_defaults: bool) -> Self {
        let seed = || {
            if seed_defaults {
                default_rooms()
            } else {
                Vec::new()
            }
        };
        let stored: Option<Vec<StoredRoom>> =
            crate::store::load_or_else(store, RecordKey::Rooms, || None);
        let Some(stored) = stored else {
            return Self::new(seed());
        };

        let legacy = stored.iter().filter(|room| !room.has_id()).count();
        let registry = Self::new(stored.into_iter().map(StoredRoom::into_room).collect());
        if legacy > 0 {
            tracing::info!(rooms = legacy, "Assigned identifiers to legacy rooms");
            if let Err(e) = registry.save(store) {
                tracing::warn!(error = %e, "Failed to write upgraded rooms");
            }
        }
        registry
    }

    /// Persists all rooms under the `rooms` record.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the record cannot be written.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<(), StoreError> {
        store.save(RecordKey::Rooms, &self.rooms)
    }

    // ========== Queries ==========

    /// Returns all rooms in display order.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Returns the number of rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if there are no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Returns the room with the given identifier.
    #[must_use]
    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    /// Returns the room whose name maps to `slug`.
    #[must_use]
    pub fn find_by_slug(&self, slug: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.slug() == slug)
    }

    /// Returns the rooms whose name contains `term`, ignoring case.
    ///
    /// An empty term matches every room.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Room> {
        let term = term.to_lowercase();
        self.rooms
            .iter()
            .filter(|room| room.name.to_lowercase().contains(&term))
            .collect()
    }

    // ========== Mutations ==========

    /// Adds a room with default settings.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::EmptyName` if the trimmed name is empty, or
    /// `RoomError::DuplicateName` if it collides with an existing room.
    pub fn add(&mut self, name: &str) -> Result<&Room, RoomError> {
        let name = self.check_name(name, None)?;
        let room = Room::new(name);
        tracing::debug!(id = %room.id, name = %room.name, "Added room");
        self.rooms.push(room);
        Ok(&self.rooms[self.rooms.len() - 1])
    }

    /// Removes a room and returns it.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::NotFound` if no room has this identifier.
    pub fn remove(&mut self, id: RoomId) -> Result<Room, RoomError> {
        let index = self.position(id)?;
        let room = self.rooms.remove(index);
        tracing::debug!(id = %id, name = %room.name, "Removed room");
        Ok(room)
    }

    /// Renames a room.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::NotFound`, `RoomError::EmptyName` or
    /// `RoomError::DuplicateName`. The room is unchanged on error.
    pub fn rename(&mut self, id: RoomId, name: &str) -> Result<(), RoomError> {
        let index = self.position(id)?;
        let name = self.check_name(name, Some(id))?;
        let room = &mut self.rooms[index];
        tracing::debug!(id = %id, from = %room.name, to = %name, "Renamed room");
        room.name = name;
        Ok(())
    }

    /// Flips the occupancy flag of a room and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::NotFound` if no room has this identifier.
    pub fn toggle_occupancy(&mut self, id: RoomId) -> Result<bool, RoomError> {
        let index = self.position(id)?;
        let room = &mut self.rooms[index];
        room.occupancy = !room.occupancy;
        Ok(room.occupancy)
    }

    /// Writes the settings of `settings` onto the room with the same
    /// identifier and returns the updated room.
    ///
    /// Only mode, brightness, colour temperature and occupancy are copied;
    /// the stored name is kept.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::NotFound` if no room has the identifier.
    pub fn update_settings(&mut self, settings: &Room) -> Result<&Room, RoomError> {
        let index = self.position(settings.id)?;
        let room = &mut self.rooms[index];
        room.copy_settings_from(settings);
        tracing::debug!(id = %room.id, mode = %room.mode, "Updated room settings");
        Ok(room)
    }

    /// Caps every room at the eco limits and returns how many changed.
    pub fn apply_eco_limits(&mut self, limits: &EcoLimits) -> usize {
        let capped = self
            .rooms
            .iter_mut()
            .map(|room| room.cap_to(limits))
            .filter(|changed| *changed)
            .count();
        tracing::debug!(capped, "Applied eco limits to rooms");
        capped
    }

    fn position(&self, id: RoomId) -> Result<usize, RoomError> {
        self.rooms
            .iter()
            .position(|room| room.id == id)
            .ok_or(RoomError::NotFound(id))
    }

    /// Trims `name` and checks it against every room except `except`.
    fn check_name(&self, name: &str, except: Option<RoomId>) -> Result<String, RoomError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RoomError::EmptyName);
        }
        let collides = self
            .rooms
            .iter()
            .filter(|room| Some(room.id) != except)
            .any(|room| room.name_collides(name));
        if collides {
            tracing::debug!(name, slug = %slugify(name), "Rejected duplicate room name");
            return Err(RoomError::DuplicateName(name.to_string()));
        }
        Ok(name.to_string())
    }
}
