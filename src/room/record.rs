// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room records.

use serde::{Deserialize, Serialize};

use crate::savings::EcoLimits;
use crate::types::{Brightness, ColorTemp, LightingMode};

use super::RoomId;

/// Derives the lookup slug of a room name.
///
/// The slug is the lower-cased name with every whitespace run replaced by a
/// single `-`.
///
/// # Examples
///
/// ```
/// use lightpanel_lib::room::slugify;
///
/// assert_eq!(slugify("Living Room"), "living-room");
/// assert_eq!(slugify("Kids \t Room"), "kids-room");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// A room and its current lighting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Stable identifier.
    pub id: RoomId,
    /// Display name, unique case-insensitively.
    pub name: String,
    /// Active lighting preset.
    pub mode: LightingMode,
    /// Brightness level.
    pub brightness: Brightness,
    /// Colour temperature.
    pub temp: ColorTemp,
    /// Whether occupancy detection reports someone in the room.
    pub occupancy: bool,
}

impl Room {
    /// Creates a room with the settings of a freshly added room: lights off,
    /// brightness 0, warm white, unoccupied.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RoomId::new(),
            name: name.into(),
            mode: LightingMode::Off,
            brightness: Brightness::MIN,
            temp: ColorTemp::WARM,
            occupancy: false,
        }
    }

    /// Returns the lookup slug of the room name.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Returns `true` if `name` would collide with this room's name.
    ///
    /// Names collide when they are equal ignoring case, or when they map to
    /// the same slug.
    #[must_use]
    pub fn name_collides(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase() || self.slug() == slugify(name)
    }

    /// Changes one setting.
    pub fn apply(&mut self, field: RoomField) {
        match field {
            RoomField::Mode(mode) => self.mode = mode,
            RoomField::Brightness(level) => self.brightness = level,
            RoomField::Temp(temp) => self.temp = temp,
            RoomField::Occupancy(occupied) => self.occupancy = occupied,
        }
    }

    /// Copies the lighting settings and occupancy of `other`, keeping this
    /// room's identifier and name.
    pub fn copy_settings_from(&mut self, other: &Room) {
        self.mode = other.mode;
        self.brightness = other.brightness;
        self.temp = other.temp;
        self.occupancy = other.occupancy;
    }

    /// Lowers brightness and colour temperature to the eco limits.
    ///
    /// Returns `true` if anything changed.
    pub fn cap_to(&mut self, limits: &EcoLimits) -> bool {
        let brightness = self.brightness.capped_at(limits.brightness);
        let temp = self.temp.capped_at(limits.temp);
        let changed = brightness != self.brightness || temp != self.temp;
        self.brightness = brightness;
        self.temp = temp;
        changed
    }
}

/// A single editable room setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomField {
    /// Lighting preset.
    Mode(LightingMode),
    /// Brightness level.
    Brightness(Brightness),
    /// Colour temperature.
    Temp(ColorTemp),
    /// Occupancy flag.
    Occupancy(bool),
}

/// On-disk room record. Records written before rooms had identifiers lack
/// the `id` field.
#[derive(Debug, Deserialize)]
pub(super) struct StoredRoom {
    #[serde(default)]
    id: Option<RoomId>,
    name: String,
    mode: LightingMode,
    brightness: Brightness,
    temp: ColorTemp,
    occupancy: bool,
}

impl StoredRoom {
    pub(super) fn has_id(&self) -> bool {
        self.id.is_some()
    }

    pub(super) fn into_room(self) -> Room {
        Room {
            id: self.id.unwrap_or_default(),
            name: self.name,
            mode: self.mode,
            brightness: self.brightness,
            temp: self.temp,
            occupancy: self.occupancy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_room_defaults() {
        let room = Room::new("Kitchen");
        assert_eq!(room.mode, LightingMode::Off);
        assert_eq!(room.brightness.value(), 0);
        assert_eq!(room.temp.kelvin(), 2700);
        assert!(!room.occupancy);
        assert_eq!(room.slug(), "kitchen");
    }

    #[test]
    fn copy_settings_keeps_identity_and_name() {
        let mut room = Room::new("Kitchen");
        let mut other = Room::new("Den");
        other.apply(RoomField::Mode(LightingMode::CoolWhite));
        other.apply(RoomField::Occupancy(true));

        room.copy_settings_from(&other);

        assert_eq!(room.name, "Kitchen");
        assert_ne!(room.id, other.id);
        assert_eq!(room.mode, LightingMode::CoolWhite);
        assert!(room.occupancy);
    }

    #[test]
    fn slugify_collapses_whitespace() {
        assert_eq!(slugify("  Guest   Bed Room "), "guest-bed-room");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn name_collides_by_case_or_slug() {
        let room = Room::new("Living Room");
        assert!(room.name_collides("living room"));
        assert!(room.name_collides("LIVING   ROOM"));
        assert!(!room.name_collides("Living-Room2"));
    }

    #[test]
    fn cap_to_lowers_only_values_above_limits() {
        let limits = EcoLimits::default();
        let mut bright = Room::new("Office");
        bright.brightness = Brightness::new(90).unwrap();
        bright.temp = ColorTemp::COOL;
        assert!(bright.cap_to(&limits));
        assert_eq!(bright.brightness.value(), 70);
        assert_eq!(bright.temp.kelvin(), 3500);

        let mut dim = Room::new("Hall");
        dim.brightness = Brightness::new(40).unwrap();
        assert!(!dim.cap_to(&limits));
        assert_eq!(dim.brightness.value(), 40);
    }

    #[test]
    fn room_json_uses_stored_field_names() {
        let room = Room::new("Study");
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["name"], "Study");
        assert_eq!(json["mode"], "Off");
        assert_eq!(json["brightness"], 0);
        assert_eq!(json["temp"], 2700);
        assert_eq!(json["occupancy"], false);
        assert!(json["id"].is_string());
    }

    #[test]
    fn stored_room_without_id_gets_one() {
        let json = r#"{"name":"Bedroom","mode":"Off","brightness":0,"temp":2700,"occupancy":false}"#;
        let stored: StoredRoom = serde_json::from_str(json).unwrap();
        assert!(!stored.has_id());
        assert_eq!(stored.into_room().name, "Bedroom");
    }
}
