// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persistent key-value storage for panel records.
//!
//! The panel keeps three records: `rooms`, `schedule` and `savings`. Each is
//! stored as one JSON document and replaced as a whole on every save; there
//! are no partial updates, transactions or versions.
//!
//! Backends implement the raw [`KeyValueStore`] trait. The [`RecordStore`]
//! extension adds typed `load`/`save` on top of any backend.
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process map, cheap to clone and share
//! - [`FileStore`] - one `<key>.json` file per record in a directory
//!
//! # Examples
//!
//! ```
//! use lightpanel_lib::store::{MemoryStore, RecordKey, RecordStore};
//!
//! let store = MemoryStore::new();
//! store.save(RecordKey::Savings, &vec![1.5, 2.0]).unwrap();
//!
//! let loaded: Option<Vec<f64>> = store.load(RecordKey::Savings).unwrap();
//! assert_eq!(loaded, Some(vec![1.5, 2.0]));
//! ```

mod file;
mod memory;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Keys of the records persisted by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// The list of rooms.
    Rooms,
    /// The committed weekly schedule.
    Schedule,
    /// Eco mode flag, weekly savings and eco tips.
    Savings,
}

impl RecordKey {
    /// Returns the storage key string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rooms => "rooms",
            Self::Schedule => "schedule",
            Self::Savings => "savings",
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw string storage addressed by key.
///
/// Implementations store opaque strings; encoding is handled by
/// [`RecordStore`].
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the backend cannot be read.
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the backend cannot be written.
    fn save_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Typed record access for any [`KeyValueStore`].
pub trait RecordStore {
    /// Loads and decodes a record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Json` if the stored value cannot be decoded, or
    /// the backend's error if it cannot be read.
    fn load<T: DeserializeOwned>(&self, key: RecordKey) -> Result<Option<T>, StoreError>;

    /// Encodes and saves a record, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Json` if the value cannot be encoded, or the
    /// backend's error if it cannot be written.
    fn save<T: Serialize>(&self, key: RecordKey, record: &T) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> RecordStore for S {
    fn load<T: DeserializeOwned>(&self, key: RecordKey) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.load_raw(key.as_str())? else {
            tracing::trace!(key = %key, "No stored record");
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Json {
                key: key.as_str().to_string(),
                source,
            })
    }

    fn save<T: Serialize>(&self, key: RecordKey, record: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(record).map_err(|source| StoreError::Json {
            key: key.as_str().to_string(),
            source,
        })?;
        self.save_raw(key.as_str(), &raw)?;
        tracing::debug!(key = %key, bytes = raw.len(), "Saved record");
        Ok(())
    }
}

/// Loads a record, falling back to `default` when it is missing or unreadable.
///
/// Unreadable records are logged and replaced by the default in memory only;
/// the stored value is left untouched until the next save.
pub(crate) fn load_or_else<S, T, F>(store: &S, key: RecordKey, default: F) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.load(key) {
        Ok(Some(record)) => record,
        Ok(None) => {
            tracing::info!(key = %key, "No stored record, using defaults");
            default()
        }
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Failed to load record, using defaults");
            default()
        }
    }
}
