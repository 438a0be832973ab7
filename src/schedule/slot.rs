// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schedule slot records and form candidates.

use crate::error::ValueError;
use crate::types::{LightingMode, ScheduleDay, TimeOfDay};

/// One entry of the weekly schedule.
///
/// Slots have no identifier of their own: a slot is addressed by its index
/// in the schedule, and the display order is the storage order.
///
/// # Examples
///
/// ```
/// use lightpanel_lib::schedule::ScheduleSlot;
/// use lightpanel_lib::types::{LightingMode, ScheduleDay, TimeOfDay};
///
/// let slot = ScheduleSlot::new(
///     ScheduleDay::Monday,
///     TimeOfDay::new(7, 0).unwrap(),
///     TimeOfDay::new(8, 0).unwrap(),
///     LightingMode::DimmedWarm,
/// );
/// assert!(slot.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    /// Day the slot applies to.
    pub day: ScheduleDay,
    /// Time the slot starts.
    pub start_time: TimeOfDay,
    /// Time the slot ends.
    pub end_time: TimeOfDay,
    /// Lighting mode applied during the slot.
    pub mode: LightingMode,
    /// Whether the slot is active.
    pub enabled: bool,
}

impl ScheduleSlot {
    /// Creates an enabled slot.
    #[must_use]
    pub fn new(
        day: ScheduleDay,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        mode: LightingMode,
    ) -> Self {
        Self {
            day,
            start_time,
            end_time,
            mode,
            enabled: true,
        }
    }

    /// Returns a copy of this slot moved to another day.
    #[must_use]
    pub fn on_day(&self, day: ScheduleDay) -> Self {
        Self { day, ..self.clone() }
    }

    /// Returns `true` if the end time does not come after the start time.
    ///
    /// Such slots are accepted as-is; callers may use this to warn.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Applies a single field change to the slot.
    pub fn apply(&mut self, field: SlotField) {
        match field {
            SlotField::Day(day) => self.day = day,
            SlotField::StartTime(time) => self.start_time = time,
            SlotField::EndTime(time) => self.end_time = time,
            SlotField::Mode(mode) => self.mode = mode,
            SlotField::Enabled(enabled) => self.enabled = enabled,
        }
    }
}

/// A single editable field of a slot, carrying its new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotField {
    /// Change the day.
    Day(ScheduleDay),
    /// Change the start time.
    StartTime(TimeOfDay),
    /// Change the end time.
    EndTime(TimeOfDay),
    /// Change the lighting mode.
    Mode(LightingMode),
    /// Enable or disable the slot.
    Enabled(bool),
}

/// A possibly incomplete "add new slot" form row.
///
/// Day and times start out empty; the mode and enabled flag always carry a
/// value because their form controls have defaults.
///
/// # Examples
///
/// ```
/// use lightpanel_lib::schedule::SlotCandidate;
///
/// let row = SlotCandidate::from_form("Monday", "07:00", "", "Dimmed Warm", true).unwrap();
/// assert!(!row.is_complete());
/// assert!(row.is_started());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCandidate {
    /// Selected day, if any.
    pub day: Option<ScheduleDay>,
    /// Entered start time, if any.
    pub start_time: Option<TimeOfDay>,
    /// Entered end time, if any.
    pub end_time: Option<TimeOfDay>,
    /// Selected lighting mode.
    pub mode: LightingMode,
    /// Enabled checkbox.
    pub enabled: bool,
}

impl Default for SlotCandidate {
    fn default() -> Self {
        Self {
            day: None,
            start_time: None,
            end_time: None,
            mode: LightingMode::DimmedWarm,
            enabled: true,
        }
    }
}

impl SlotCandidate {
    /// Creates an empty candidate with form defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses raw form values. Empty strings become absent fields.
    ///
    /// # Errors
    ///
    /// Returns a `ValueError` if a non-empty value cannot be parsed.
    pub fn from_form(
        day: &str,
        start_time: &str,
        end_time: &str,
        mode: &str,
        enabled: bool,
    ) -> Result<Self, ValueError> {
        Ok(Self {
            day: parse_optional(day)?,
            start_time: parse_optional(start_time)?,
            end_time: parse_optional(end_time)?,
            mode: mode.parse()?,
            enabled,
        })
    }

    /// Returns `true` if day, start and end time are all present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.day.is_some() && self.start_time.is_some() && self.end_time.is_some()
    }

    /// Returns `true` if the user has entered a start or an end time.
    ///
    /// A row with no time at all counts as untouched: it is dropped on save
    /// without asking the user.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.start_time.is_some() || self.end_time.is_some()
    }

    /// Applies a single field change to the candidate.
    pub fn apply(&mut self, field: SlotField) {
        match field {
            SlotField::Day(day) => self.day = Some(day),
            SlotField::StartTime(time) => self.start_time = Some(time),
            SlotField::EndTime(time) => self.end_time = Some(time),
            SlotField::Mode(mode) => self.mode = mode,
            SlotField::Enabled(enabled) => self.enabled = enabled,
        }
    }

    /// Converts the candidate into a slot if it is complete.
    #[must_use]
    pub fn to_slot(&self) -> Option<ScheduleSlot> {
        Some(ScheduleSlot {
            day: self.day?,
            start_time: self.start_time?,
            end_time: self.end_time?,
            mode: self.mode,
            enabled: self.enabled,
        })
    }
}

impl From<ScheduleSlot> for SlotCandidate {
    fn from(slot: ScheduleSlot) -> Self {
        Self {
            day: Some(slot.day),
            start_time: Some(slot.start_time),
            end_time: Some(slot.end_time),
            mode: slot.mode,
            enabled: slot.enabled,
        }
    }
}

fn parse_optional<T>(raw: &str) -> Result<Option<T>, ValueError>
where
    T: std::str::FromStr<Err = ValueError>,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        trimmed.parse().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday_morning() -> ScheduleSlot {
        ScheduleSlot::new(
            ScheduleDay::Monday,
            TimeOfDay::new(8, 0).unwrap(),
            TimeOfDay::new(9, 0).unwrap(),
            LightingMode::CoolWhite,
        )
    }

    #[test]
    fn slot_json_uses_camel_case_fields() {
        let json = serde_json::to_value(monday_morning()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "day": "Monday",
                "startTime": "08:00",
                "endTime": "09:00",
                "mode": "Cool White",
                "enabled": true
            })
        );
    }

    #[test]
    fn slot_on_day_only_changes_day() {
        let slot = monday_morning();
        let copy = slot.on_day(ScheduleDay::Friday);
        assert_eq!(copy.day, ScheduleDay::Friday);
        assert_eq!(copy.start_time, slot.start_time);
        assert_eq!(copy.mode, slot.mode);
    }

    #[test]
    fn slot_inverted_range() {
        let mut slot = monday_morning();
        assert!(!slot.is_inverted());
        slot.apply(SlotField::EndTime(TimeOfDay::new(7, 0).unwrap()));
        assert!(slot.is_inverted());
    }

    #[test]
    fn candidate_from_form_treats_blank_as_missing() {
        let row = SlotCandidate::from_form("", "09:00", "17:00", "Off", true).unwrap();
        assert_eq!(row.day, None);
        assert!(!row.is_complete());
        assert!(row.to_slot().is_none());
    }

    #[test]
    fn candidate_from_form_rejects_malformed_values() {
        assert_eq!(
            SlotCandidate::from_form("Monday", "nine", "", "Off", true),
            Err(ValueError::InvalidTime("nine".to_string()))
        );
    }

    #[test]
    fn untouched_candidate_is_not_started() {
        let mut row = SlotCandidate::new();
        row.apply(SlotField::Day(ScheduleDay::Sunday));
        assert!(!row.is_started());
        row.apply(SlotField::EndTime(TimeOfDay::new(22, 0).unwrap()));
        assert!(row.is_started());
    }

    #[test]
    fn complete_candidate_becomes_slot() {
        let row = SlotCandidate::from(monday_morning());
        assert_eq!(row.to_slot(), Some(monday_morning()));
    }
}
