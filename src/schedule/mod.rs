// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Weekly lighting schedule and its draft editor.
//!
//! A schedule is an ordered list of [`ScheduleSlot`]s. The
//! [`ScheduleEditor`] keeps two copies of it: the *committed* schedule that
//! the store holds, and a *draft* the user edits. Edits only become visible
//! to the rest of the panel when the draft is committed.
//!
//! # Lifecycle
//!
//! ```text
//! view activated ──▶ begin_editing()   draft := committed, clean
//!        edits   ──▶ set_slot_field / add_slot / remove_all / ...   dirty
//!         save   ──▶ commit(store)     committed := draft, persisted, clean
//!      discard   ──▶ discard()         draft := committed, clean
//! ```
//!
//! # Examples
//!
//! ```
//! use lightpanel_lib::schedule::{ScheduleEditor, ScheduleSlot, SlotField};
//! use lightpanel_lib::types::{LightingMode, ScheduleDay, TimeOfDay};
//!
//! let slot = ScheduleSlot::new(
//!     ScheduleDay::Monday,
//!     TimeOfDay::new(8, 0).unwrap(),
//!     TimeOfDay::new(9, 0).unwrap(),
//!     LightingMode::CoolWhite,
//! );
//! let mut editor = ScheduleEditor::new(vec![slot]);
//! editor.begin_editing();
//!
//! editor.duplicate_to_weekdays(&[0]).unwrap();
//! assert_eq!(editor.draft().len(), 5);
//! assert!(editor.is_dirty());
//!
//! editor.discard();
//! assert_eq!(editor.draft().len(), 1);
//! ```

mod editor;
mod slot;

pub use editor::{CommitReport, PendingRow, ScheduleEditor};
pub use slot::{ScheduleSlot, SlotCandidate, SlotField};

/// An ordered list of schedule slots. Display order is storage order.
pub type Schedule = Vec<ScheduleSlot>;
