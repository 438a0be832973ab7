// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Day selector for schedule slots.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

use crate::error::ValueError;

/// The day a schedule slot applies to: a single day of the week or every day.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use lightpanel_lib::types::ScheduleDay;
///
/// let day: ScheduleDay = "Monday".parse().unwrap();
/// assert!(day.applies_to(Weekday::Mon));
/// assert!(!day.applies_to(Weekday::Tue));
/// assert!(ScheduleDay::Everyday.applies_to(Weekday::Sun));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ScheduleDay {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
    /// Every day of the week.
    Everyday,
}

impl ScheduleDay {
    /// Monday to Friday, the targets of duplicate-to-weekdays.
    pub const WEEKDAYS: [Self; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    /// Every selectable value, in the order the panel offers them.
    pub const ALL: [Self; 8] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
        Self::Everyday,
    ];

    /// Returns the display and storage label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
            Self::Everyday => "Everyday",
        }
    }

    /// Returns the chrono weekday, or `None` for [`ScheduleDay::Everyday`].
    #[must_use]
    pub const fn weekday(&self) -> Option<Weekday> {
        match self {
            Self::Monday => Some(Weekday::Mon),
            Self::Tuesday => Some(Weekday::Tue),
            Self::Wednesday => Some(Weekday::Wed),
            Self::Thursday => Some(Weekday::Thu),
            Self::Friday => Some(Weekday::Fri),
            Self::Saturday => Some(Weekday::Sat),
            Self::Sunday => Some(Weekday::Sun),
            Self::Everyday => None,
        }
    }

    /// Returns `true` if a slot on this day is relevant on `weekday`.
    #[must_use]
    pub fn applies_to(&self, weekday: Weekday) -> bool {
        self.weekday().is_none_or(|day| day == weekday)
    }
}

impl From<Weekday> for ScheduleDay {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for ScheduleDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleDay {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValueError::InvalidDay(s.to_string()))
    }
}
