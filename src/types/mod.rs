// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for lighting control.
//!
//! This module provides type-safe representations of the values a user can
//! set on a room or a schedule slot. Each type ensures values are within
//! their valid ranges at construction time, and serializes to the same
//! plain JSON values the panel has always stored.
//!
//! # Types
//!
//! - [`Brightness`] - Brightness level (0-100%)
//! - [`ColorTemp`] - Colour temperature in Kelvin (2000-6500)
//! - [`LightingMode`] - Named lighting preset (`Dimmed Warm`, `Cool White`, ...)
//! - [`ScheduleDay`] - Day of the week or `Everyday`
//! - [`TimeOfDay`] - `HH:MM` wall-clock time

mod brightness;
mod color_temp;
mod lighting_mode;
mod schedule_day;
mod time_of_day;

pub use brightness::Brightness;
pub use color_temp::ColorTemp;
pub use lighting_mode::LightingMode;
pub use schedule_day::ScheduleDay;
pub use time_of_day::TimeOfDay;
