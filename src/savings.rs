// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Energy savings record and eco mode.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::{KeyValueStore, RecordKey, RecordStore};
use crate::types::{Brightness, ColorTemp};

/// Short day labels of the savings chart, Monday first.
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Upper bounds applied to every room when eco mode is turned on.
///
/// # Examples
///
/// ```
/// use lightpanel_lib::savings::EcoLimits;
///
/// let limits = EcoLimits::default();
/// assert_eq!(limits.brightness.value(), 70);
/// assert_eq!(limits.temp.kelvin(), 3500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcoLimits {
    /// Highest brightness allowed in eco mode.
    pub brightness: Brightness,
    /// Highest colour temperature allowed in eco mode.
    pub temp: ColorTemp,
}

impl Default for EcoLimits {
    fn default() -> Self {
        Self {
            brightness: Brightness::clamped(70),
            temp: ColorTemp::clamped(3500),
        }
    }
}

/// One bar of the weekly savings chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBar {
    /// Day label (`Mon`..`Sun`).
    pub label: &'static str,
    /// Energy saved that day, in kWh.
    pub kwh: f64,
    /// Bar height as a fraction of the best day, in `0.0..=1.0`.
    pub fraction: f64,
}

/// The persisted `savings` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsData {
    /// Whether eco mode is on.
    pub eco_mode: bool,
    /// Energy saved per day over the last week, in kWh, Monday first.
    pub weekly_savings: [f64; 7],
    /// Tips shown on the savings view.
    pub eco_tips: Vec<String>,
}

impl Default for SavingsData {
    fn default() -> Self {
        Self {
            eco_mode: false,
            weekly_savings: [2.3, 1.8, 2.7, 2.0, 3.1, 2.5, 1.9],
            eco_tips: [
                "Turn off lights when leaving a room",
                "Lower brightness levels when possible",
                "Use warmer colour temperatures at night",
                "Schedule automatic dimming during peak hours",
                "Take advantage of natural light during daytime",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl SavingsData {
    /// Loads the record from `store`, or the defaults if it is missing or
    /// unreadable.
    #[must_use]
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        crate::store::load_or_else(store, RecordKey::Savings, Self::default)
    }

    /// Persists the record.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the record cannot be written.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<(), StoreError> {
        store.save(RecordKey::Savings, self)
    }

    /// Returns the energy saved over the week, in kWh.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weekly_savings.iter().sum()
    }

    /// Returns the weekly total formatted for display, e.g. `16.3 kWh`.
    #[must_use]
    pub fn total_label(&self) -> String {
        format!("{:.1} kWh", self.total())
    }

    /// Returns the chart bars, scaled so the best day fills the chart.
    ///
    /// When no day has positive savings every bar is empty.
    #[must_use]
    pub fn chart(&self) -> [ChartBar; 7] {
        let max = self.weekly_savings.iter().copied().fold(0.0_f64, f64::max);
        std::array::from_fn(|i| {
            let kwh = self.weekly_savings[i];
            let fraction = if max > 0.0 {
                (kwh / max).clamp(0.0, 1.0)
            } else {
                0.0
            };
            ChartBar {
                label: DAY_LABELS[i],
                kwh,
                fraction,
            }
        })
    }
}
