// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rooms and their lighting settings.
//!
//! - [`RoomRegistry`] - the persisted list of rooms
//! - [`RoomControl`] - editing session behind the room-control view
//!
//! Rooms are identified by a [`RoomId`] assigned at creation. The slug of a
//! room's name ([`slugify`]) is only used for lookups, and no two rooms may
//! share one.

mod control;
mod id;
mod record;
mod registry;

pub use control::RoomControl;
pub use id::RoomId;
pub use record::{Room, RoomField, slugify};
pub use registry::{RoomRegistry, default_rooms};
