// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! View switching with an unsaved-changes guard.
//!
//! The panel shows one [`View`] at a time. Every switch goes through the
//! [`NavigationGuard`], which asks the editor of the current view (anything
//! implementing [`UnsavedChanges`]) whether leaving would lose edits.

mod guard;
mod view;

pub use guard::{GuardChoice, GuardState, NavigationGuard, NoEditor, Transition, UnsavedChanges};
pub use view::View;
