// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control panel configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::StoreError;
use crate::event::DEFAULT_CHANNEL_CAPACITY;
use crate::savings::EcoLimits;
use crate::store::{FileStore, KeyValueStore, MemoryStore};

/// Configuration for a [`ControlPanel`](crate::ControlPanel).
///
/// Every field has a default, so a configuration file only needs the
/// settings it changes.
///
/// # Examples
///
/// ```
/// use lightpanel_lib::config::{PanelConfig, StorageConfig};
/// use lightpanel_lib::types::Brightness;
///
/// let config = PanelConfig::new()
///     .with_eco_brightness(Brightness::new(60).unwrap())
///     .with_storage(StorageConfig::Directory("/tmp/lightpanel".into()))
///     .without_default_rooms();
/// assert!(!config.seed_default_rooms);
///
/// let config = PanelConfig::from_json(r#"{ "storage": "memory", "eventCapacity": 8 }"#).unwrap();
/// assert_eq!(config.event_capacity, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelConfig {
    /// Where records are kept.
    pub storage: StorageConfig,
    /// Caps applied to rooms when eco mode is turned on.
    pub eco_limits: EcoLimits,
    /// Whether to start with the default rooms when none are stored.
    pub seed_default_rooms: bool,
    /// Number of events buffered per subscriber.
    pub event_capacity: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            eco_limits: EcoLimits::default(),
            seed_default_rooms: true,
            event_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl PanelConfig {
    /// Creates the default configuration: in-memory storage, default eco
    /// limits, default rooms seeded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the storage backend.
    #[must_use]
    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }

    /// Sets both eco limits.
    #[must_use]
    pub fn with_eco_limits(mut self, limits: EcoLimits) -> Self {
        self.eco_limits = limits;
        self
    }

    /// Sets the eco mode brightness cap.
    #[must_use]
    pub fn with_eco_brightness(mut self, brightness: crate::types::Brightness) -> Self {
        self.eco_limits.brightness = brightness;
        self
    }

    /// Sets the eco mode colour temperature cap.
    #[must_use]
    pub fn with_eco_temp(mut self, temp: crate::types::ColorTemp) -> Self {
        self.eco_limits.temp = temp;
        self
    }

    /// Starts with no rooms when none are stored.
    #[must_use]
    pub fn without_default_rooms(mut self) -> Self {
        self.seed_default_rooms = false;
        self
    }

    /// Sets the event buffer size.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageConfig {
    /// Records live in memory and are lost when the panel is dropped.
    #[default]
    Memory,
    /// Records are JSON files in this directory.
    Directory(PathBuf),
}

impl StorageConfig {
    /// Opens the configured store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the storage directory cannot be created.
    pub fn open(&self) -> Result<Box<dyn KeyValueStore>, StoreError> {
        match self {
            Self::Memory => Ok(Box::new(MemoryStore::new())),
            Self::Directory(dir) => Ok(Box::new(FileStore::open(dir)?)),
        }
    }
}
