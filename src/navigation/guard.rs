// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Navigation guard state machine.

use super::View;

/// An editor whose changes can be lost by leaving its view.
pub trait UnsavedChanges {
    /// Returns `true` if leaving now would lose edits.
    fn has_unsaved_changes(&self) -> bool;

    /// Drops the edits, restoring the last saved state.
    fn discard_changes(&mut self);
}

/// Editor with nothing to lose, used for views without an editor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEditor;

impl UnsavedChanges for NoEditor {
    fn has_unsaved_changes(&self) -> bool {
        false
    }

    fn discard_changes(&mut self) {}
}

/// State of the guard between navigation attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    /// No navigation is waiting for the user.
    #[default]
    Idle,
    /// A navigation was suspended until the user decides.
    PendingConfirmation {
        /// Where the user wanted to go.
        target: View,
        /// Whether the attempt was a back navigation.
        back: bool,
    },
}

/// The user's answer to an unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardChoice {
    /// Drop the edits and continue to the target view.
    Discard,
    /// Cancel the navigation and keep editing.
    Stay,
    /// The prompt was closed without an answer. Treated as [`GuardChoice::Stay`].
    Dismiss,
}

/// Result of a navigation attempt or of resolving a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The active view changed.
    Navigated {
        /// The view that was left.
        from: View,
        /// The view that is now active.
        to: View,
    },
    /// The navigation waits for the user to discard or stay.
    Suspended {
        /// Where the user wanted to go.
        target: View,
    },
    /// The user chose to stay; the active view did not change.
    Stayed,
    /// Nothing happened (already on the target view, or nothing pending).
    Unchanged,
}

/// Guards view transitions against losing unsaved edits.
///
/// Every navigation attempt asks the editor of the current view whether it
/// has unsaved changes. If it has none, the transition happens at once.
/// Otherwise the guard suspends the transition until
/// [`resolve`](Self::resolve) is called with the user's choice.
///
/// ```text
/// Idle ──(request, clean)──▶ Idle                    navigate
/// Idle ──(request, dirty)──▶ PendingConfirmation     suspend
/// PendingConfirmation ──(Discard)──▶ Idle            discard, navigate
/// PendingConfirmation ──(Stay | Dismiss)──▶ Idle     stay
/// ```
///
/// A request made while a confirmation is pending is evaluated afresh and
/// replaces the pending target.
///
/// The guard also keeps the back-navigation history: top-level views start a
/// new history, other views are pushed on top of it.
///
/// # Examples
///
/// ```
/// use lightpanel_lib::navigation::{GuardChoice, NavigationGuard, NoEditor, Transition, View};
/// use lightpanel_lib::schedule::ScheduleEditor;
///
/// let mut guard = NavigationGuard::new();
/// guard.request(View::Schedule, &NoEditor);
///
/// let mut editor = ScheduleEditor::default();
/// editor.begin_editing();
/// editor.remove_all();
///
/// assert_eq!(
///     guard.request(View::Home, &editor),
///     Transition::Suspended { target: View::Home }
/// );
/// assert_eq!(guard.resolve(GuardChoice::Stay, &mut editor), Transition::Stayed);
/// assert_eq!(guard.current(), View::Schedule);
/// ```
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    current: View,
    state: GuardState,
    history: Vec<View>,
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationGuard {
    /// Creates a guard starting on the home view.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(View::Home)
    }

    /// Creates a guard starting on `view`.
    #[must_use]
    pub fn starting_at(view: View) -> Self {
        Self {
            current: view,
            state: GuardState::Idle,
            history: vec![view],
        }
    }

    /// Returns the active view.
    #[must_use]
    pub fn current(&self) -> View {
        self.current
    }

    /// Returns the guard state.
    #[must_use]
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Returns `true` if a navigation waits for the user.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, GuardState::PendingConfirmation { .. })
    }

    /// Returns the back-navigation history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[View] {
        &self.history
    }

    /// Returns the view a back navigation would go to.
    #[must_use]
    pub fn back_target(&self) -> View {
        match self.history.len() {
            0 | 1 => View::Home,
            n => self.history[n - 2],
        }
    }

    /// Attempts to switch to `target`.
    ///
    /// `editor` is the editor of the current view.
    pub fn request(&mut self, target: View, editor: &dyn UnsavedChanges) -> Transition {
        self.attempt(target, false, editor)
    }

    /// Attempts to go back to the previous view, or home if there is none.
    pub fn back(&mut self, editor: &dyn UnsavedChanges) -> Transition {
        let target = self.back_target();
        self.attempt(target, true, editor)
    }

    /// Applies the user's answer to a suspended navigation.
    ///
    /// `editor` is the editor of the current view; it is only touched when
    /// the user chooses [`GuardChoice::Discard`].
    pub fn resolve(&mut self, choice: GuardChoice, editor: &mut dyn UnsavedChanges) -> Transition {
        let GuardState::PendingConfirmation { target, back } = std::mem::take(&mut self.state)
        else {
            tracing::debug!(?choice, "No pending navigation to resolve");
            return Transition::Unchanged;
        };

        match choice {
            GuardChoice::Discard => {
                editor.discard_changes();
                tracing::debug!(view = %self.current, target = %target, "Discarded edits before navigating");
                self.go(target, back)
            }
            GuardChoice::Stay | GuardChoice::Dismiss => {
                tracing::debug!(view = %self.current, ?choice, "Stayed on view");
                Transition::Stayed
            }
        }
    }

    fn attempt(&mut self, target: View, back: bool, editor: &dyn UnsavedChanges) -> Transition {
        if target == self.current {
            self.state = GuardState::Idle;
            return Transition::Unchanged;
        }
        if editor.has_unsaved_changes() {
            tracing::debug!(view = %self.current, target = %target, "Suspending navigation, unsaved changes");
            self.state = GuardState::PendingConfirmation { target, back };
            return Transition::Suspended { target };
        }
        self.state = GuardState::Idle;
        self.go(target, back)
    }

    fn go(&mut self, target: View, back: bool) -> Transition {
        let from = self.current;
        if back {
            self.history.pop();
            if self.history.last() != Some(&target) {
                self.history = vec![target];
            }
        } else if target.is_top_level() {
            self.history = vec![target];
        } else {
            self.history.push(target);
        }
        self.current = target;
        tracing::debug!(from = %from, to = %target, "Switched view");
        Transition::Navigated { from, to: target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeEditor {
        dirty: bool,
        discarded: usize,
    }

    impl UnsavedChanges for FakeEditor {
        fn has_unsaved_changes(&self) -> bool {
            self.dirty
        }

        fn discard_changes(&mut self) {
            self.dirty = false;
            self.discarded += 1;
        }
    }

    fn dirty() -> FakeEditor {
        FakeEditor {
            dirty: true,
            discarded: 0,
        }
    }

    #[test]
    fn clean_request_navigates_immediately() {
        let mut guard = NavigationGuard::new();
        assert_eq!(
            guard.request(View::Rooms, &FakeEditor::default()),
            Transition::Navigated {
                from: View::Home,
                to: View::Rooms
            }
        );
        assert_eq!(guard.current(), View::Rooms);
        assert_eq!(guard.state(), GuardState::Idle);
    }

    #[test]
    fn dirty_request_suspends() {
        let mut guard = NavigationGuard::starting_at(View::Schedule);
        assert_eq!(
            guard.request(View::Savings, &dirty()),
            Transition::Suspended {
                target: View::Savings
            }
        );
        assert!(guard.is_pending());
        assert_eq!(guard.current(), View::Schedule);
    }

    #[test]
    fn discard_resolves_and_navigates() {
        let mut guard = NavigationGuard::starting_at(View::Schedule);
        let mut editor = dirty();
        guard.request(View::Home, &editor);

        assert_eq!(
            guard.resolve(GuardChoice::Discard, &mut editor),
            Transition::Navigated {
                from: View::Schedule,
                to: View::Home
            }
        );
        assert_eq!(editor.discarded, 1);
        assert!(!guard.is_pending());
    }

    #[test]
    fn stay_and_dismiss_keep_view_and_edits() {
        for choice in [GuardChoice::Stay, GuardChoice::Dismiss] {
            let mut guard = NavigationGuard::starting_at(View::Schedule);
            let mut editor = dirty();
            guard.request(View::Home, &editor);

            assert_eq!(guard.resolve(choice, &mut editor), Transition::Stayed);
            assert_eq!(guard.current(), View::Schedule);
            assert!(editor.dirty);
            assert_eq!(editor.discarded, 0);
            assert_eq!(guard.state(), GuardState::Idle);
        }
    }

    #[test]
    fn every_attempt_is_guarded() {
        let mut guard = NavigationGuard::starting_at(View::Schedule);
        let mut editor = dirty();

        guard.request(View::Home, &editor);
        guard.resolve(GuardChoice::Stay, &mut editor);

        assert_eq!(
            guard.request(View::Rooms, &editor),
            Transition::Suspended {
                target: View::Rooms
            }
        );
    }

    #[test]
    fn request_while_pending_replaces_target() {
        let mut guard = NavigationGuard::starting_at(View::Schedule);
        let mut editor = dirty();

        guard.request(View::Home, &editor);
        guard.request(View::Savings, &editor);
        guard.resolve(GuardChoice::Discard, &mut editor);

        assert_eq!(guard.current(), View::Savings);
    }

    #[test]
    fn resolve_without_pending_is_unchanged() {
        let mut guard = NavigationGuard::new();
        let mut editor = dirty();
        assert_eq!(
            guard.resolve(GuardChoice::Discard, &mut editor),
            Transition::Unchanged
        );
        assert_eq!(editor.discarded, 0);
    }

    #[test]
    fn request_current_view_is_unchanged() {
        let mut guard = NavigationGuard::starting_at(View::Schedule);
        assert_eq!(
            guard.request(View::Schedule, &dirty()),
            Transition::Unchanged
        );
    }

    #[test]
    fn back_returns_to_previous_view() {
        let mut guard = NavigationGuard::new();
        guard.request(View::Rooms, &NoEditor);
        guard.request(View::RoomControl, &NoEditor);
        assert_eq!(guard.history(), &[View::Rooms, View::RoomControl]);

        assert_eq!(
            guard.back(&NoEditor),
            Transition::Navigated {
                from: View::RoomControl,
                to: View::Rooms
            }
        );
        assert_eq!(guard.history(), &[View::Rooms]);
    }

    #[test]
    fn back_without_history_goes_home() {
        let mut guard = NavigationGuard::starting_at(View::Savings);
        assert_eq!(guard.back_target(), View::Home);
        guard.back(&NoEditor);
        assert_eq!(guard.current(), View::Home);
        assert_eq!(guard.history(), &[View::Home]);
    }

    #[test]
    fn guarded_back_keeps_history_until_discard() {
        let mut guard = NavigationGuard::new();
        let mut editor = dirty();
        guard.request(View::RoomControl, &NoEditor);

        assert_eq!(
            guard.back(&editor),
            Transition::Suspended { target: View::Home }
        );
        assert_eq!(guard.history(), &[View::Home, View::RoomControl]);

        guard.resolve(GuardChoice::Discard, &mut editor);
        assert_eq!(guard.current(), View::Home);
        assert_eq!(guard.history(), &[View::Home]);
    }
}
