// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Colour temperature type for white light.

use std::fmt;

use crate::error::ValueError;

/// Colour temperature in Kelvin (2000-6500).
///
/// Lower values are warmer (more orange), higher values are cooler (bluer).
///
/// - 2000K - Candlelight
/// - 2700K - Warm white
/// - 4000K - Neutral white
/// - 6500K - Cool daylight
///
/// # Examples
///
/// ```
/// use lightpanel_lib::types::ColorTemp;
///
/// let ct = ColorTemp::new(3000).unwrap();
/// assert_eq!(ct.kelvin(), 3000);
/// assert_eq!(ct.to_mireds(), 333);
///
/// assert!(ColorTemp::new(9000).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct ColorTemp(u16);

impl ColorTemp {
    /// Minimum colour temperature (warmest).
    pub const MIN: u16 = 2000;

    /// Maximum colour temperature (coolest).
    pub const MAX: u16 = 6500;

    /// Candlelight (2000K).
    pub const CANDLE: Self = Self(2000);

    /// Warm white (2700K), the default for new rooms.
    pub const WARM: Self = Self(2700);

    /// Neutral white (4000K).
    pub const NEUTRAL: Self = Self(4000);

    /// Cool daylight (6500K).
    pub const COOL: Self = Self(6500);

    /// Creates a new colour temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `kelvin` is outside [2000, 6500].
    pub fn new(kelvin: u16) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&kelvin) {
            return Err(ValueError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: kelvin,
            });
        }
        Ok(Self(kelvin))
    }

    /// Creates a colour temperature, clamping to the valid range.
    #[must_use]
    pub const fn clamped(kelvin: u16) -> Self {
        if kelvin < Self::MIN {
            Self(Self::MIN)
        } else if kelvin > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(kelvin)
        }
    }

    /// Returns the value in Kelvin.
    #[must_use]
    pub const fn kelvin(&self) -> u16 {
        self.0
    }

    /// Returns the approximate value in mireds.
    #[must_use]
    pub fn to_mireds(&self) -> u16 {
        #[allow(clippy::cast_possible_truncation)]
        let mireds = (1_000_000 / u32::from(self.0)) as u16;
        mireds
    }

    /// Returns the lower (warmer) of this value and `cap`.
    #[must_use]
    pub fn capped_at(self, cap: Self) -> Self {
        self.min(cap)
    }
}

impl Default for ColorTemp {
    fn default() -> Self {
        Self::WARM
    }
}

impl fmt::Display for ColorTemp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.0)
    }
}

impl TryFrom<u16> for ColorTemp {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColorTemp> for u16 {
    fn from(value: ColorTemp) -> Self {
        value.0
    }
}
