// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lighting mode presets.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A named lighting preset applied to a room or a schedule slot.
///
/// The string form is the label shown in the panel and stored in records.
///
/// # Examples
///
/// ```
/// use lightpanel_lib::types::LightingMode;
///
/// let mode: LightingMode = "Cool White".parse().unwrap();
/// assert_eq!(mode, LightingMode::CoolWhite);
/// assert_eq!(mode.as_str(), "Cool White");
/// assert!(mode.is_on());
/// assert!(!LightingMode::Off.is_on());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum LightingMode {
    /// Warm, low light.
    #[default]
    #[serde(rename = "Dimmed Warm")]
    DimmedWarm,
    /// Neutral everyday light.
    #[serde(rename = "Cool White")]
    CoolWhite,
    /// Bright, cool light.
    Productivity,
    /// Lights off.
    Off,
}

impl LightingMode {
    /// All modes in the order the panel offers them.
    pub const ALL: [Self; 4] = [
        Self::DimmedWarm,
        Self::CoolWhite,
        Self::Productivity,
        Self::Off,
    ];

    /// Returns the display and storage label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DimmedWarm => "Dimmed Warm",
            Self::CoolWhite => "Cool White",
            Self::Productivity => "Productivity",
            Self::Off => "Off",
        }
    }

    /// Returns a one-line description of the mode.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::DimmedWarm => "Warm, cosy lighting perfect for relaxation",
            Self::CoolWhite => "Bright, neutral lighting for everyday activities",
            Self::Productivity => "Bright, cool lighting to boost focus and alertness",
            Self::Off => "Lights turned off",
        }
    }

    /// Returns `true` for every mode except [`LightingMode::Off`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl fmt::Display for LightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LightingMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValueError::InvalidMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "dimmed warm".parse::<LightingMode>().unwrap(),
            LightingMode::DimmedWarm
        );
        assert_eq!(
            " PRODUCTIVITY ".parse::<LightingMode>().unwrap(),
            LightingMode::Productivity
        );
    }

    #[test]
    fn parse_rejects_unknown_mode() {
        assert_eq!(
            "Disco".parse::<LightingMode>(),
            Err(ValueError::InvalidMode("Disco".to_string()))
        );
    }

    #[test]
    fn serde_uses_display_labels() {
        assert_eq!(
            serde_json::to_string(&LightingMode::CoolWhite).unwrap(),
            "\"Cool White\""
        );
        let mode: LightingMode = serde_json::from_str("\"Dimmed Warm\"").unwrap();
        assert_eq!(mode, LightingMode::DimmedWarm);
    }

    #[test]
    fn every_mode_round_trips_through_its_label() {
        for mode in LightingMode::ALL {
            assert_eq!(mode.as_str().parse::<LightingMode>().unwrap(), mode);
            assert!(!mode.description().is_empty());
        }
    }
}
