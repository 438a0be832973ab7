// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Draft schedule manager.

use std::collections::HashSet;

use crate::error::{ScheduleError, StoreError};
use crate::navigation::UnsavedChanges;
use crate::store::{KeyValueStore, RecordKey, RecordStore};
use crate::types::ScheduleDay;

use super::{Schedule, ScheduleSlot, SlotCandidate, SlotField};

/// Handle to an open "add new slot" row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingRow(usize);

impl PendingRow {
    /// Returns the position of the row among the open rows.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// What a successful [`ScheduleEditor::commit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommitReport {
    /// Number of slots in the committed schedule.
    pub slots: usize,
    /// Complete pending rows appended to the schedule.
    pub appended_rows: usize,
    /// Incomplete pending rows that were dropped.
    pub dropped_rows: usize,
}

/// Owns the committed schedule and the draft being edited.
///
/// The *committed* schedule is what the store holds. The *draft* is a deep
/// copy that the user mutates freely; it only replaces the committed
/// schedule on [`commit`](Self::commit). The dirty flag records whether the
/// draft may have diverged since the last reset point.
///
/// Open "add new slot" rows are tracked alongside the draft. Editing them
/// marks the draft dirty immediately, and [`commit`](Self::commit) appends
/// the complete ones and drops the rest.
///
/// # Examples
///
/// ```
/// use lightpanel_lib::schedule::{ScheduleEditor, SlotCandidate};
/// use lightpanel_lib::store::MemoryStore;
///
/// let store = MemoryStore::new();
/// let mut editor = ScheduleEditor::new(Vec::new());
///
/// editor.begin_editing();
/// let row = SlotCandidate::from_form("Monday", "07:00", "08:00", "Dimmed Warm", true).unwrap();
/// editor.add_slot(row).unwrap();
/// assert!(editor.is_dirty());
///
/// editor.commit(&store).unwrap();
/// assert_eq!(editor.committed().len(), 1);
/// assert!(!editor.is_dirty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleEditor {
    committed: Schedule,
    draft: Schedule,
    pending_rows: Vec<SlotCandidate>,
    dirty: bool,
}

impl ScheduleEditor {
    /// Creates an editor around an already committed schedule.
    #[must_use]
    pub fn new(committed: Schedule) -> Self {
        Self {
            draft: committed.clone(),
            committed,
            pending_rows: Vec::new(),
            dirty: false,
        }
    }

    /// Creates an editor from the schedule persisted in `store`.
    ///
    /// A missing or unreadable record yields an empty schedule.
    #[must_use]
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self::new(crate::store::load_or_else(
            store,
            RecordKey::Schedule,
            Vec::new,
        ))
    }

    // ========== Accessors ==========

    /// Returns the committed schedule.
    #[must_use]
    pub fn committed(&self) -> &[ScheduleSlot] {
        &self.committed
    }

    /// Returns the draft schedule.
    #[must_use]
    pub fn draft(&self) -> &[ScheduleSlot] {
        &self.draft
    }

    /// Returns the open "add new slot" rows.
    #[must_use]
    pub fn pending_rows(&self) -> &[SlotCandidate] {
        &self.pending_rows
    }

    /// Returns the handle of the open row at `index`, if there is one.
    #[must_use]
    pub fn pending_row(&self, index: usize) -> Option<PendingRow> {
        (index < self.pending_rows.len()).then_some(PendingRow(index))
    }

    /// Returns `true` if the draft may differ from the committed schedule.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the number of open rows that were started but are incomplete.
    ///
    /// These rows would be lost on commit, so the save action asks the user
    /// first. Rows without any time entered are dropped without asking.
    #[must_use]
    pub fn incomplete_rows(&self) -> usize {
        self.pending_rows
            .iter()
            .filter(|row| row.is_started() && !row.is_complete())
            .count()
    }

    /// Returns the indices of enabled draft slots.
    #[must_use]
    pub fn enabled_indices(&self) -> Vec<usize> {
        self.draft
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.enabled.then_some(i))
            .collect()
    }

    // ========== Session ==========

    /// Resets the draft to the committed schedule and clears the dirty flag.
    ///
    /// Called every time the schedule view becomes active. Uncommitted edits
    /// from an earlier session are dropped.
    pub fn begin_editing(&mut self) {
        if self.dirty {
            tracing::debug!("Dropping uncommitted schedule edits from previous session");
        }
        self.reset_draft();
        tracing::debug!(slots = self.draft.len(), "Began schedule editing");
    }

    /// Throws the draft away and restores the committed schedule.
    pub fn discard(&mut self) {
        self.reset_draft();
        tracing::debug!(slots = self.draft.len(), "Discarded schedule draft");
    }

    /// Promotes the draft to committed and persists it.
    ///
    /// Complete open rows are appended to the draft first; incomplete rows
    /// are dropped. On error nothing changes: the draft, the open rows and
    /// the dirty flag are kept so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the schedule cannot be saved.
    pub fn commit<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<CommitReport, StoreError> {
        let mut schedule = self.draft.clone();
        let before = schedule.len();
        schedule.extend(self.pending_rows.iter().filter_map(SlotCandidate::to_slot));
        let appended_rows = schedule.len() - before;
        let dropped_rows = self.pending_rows.len() - appended_rows;

        for (index, slot) in schedule.iter().enumerate() {
            if slot.is_inverted() {
                tracing::warn!(
                    index,
                    day = %slot.day,
                    start = %slot.start_time,
                    end = %slot.end_time,
                    "Schedule slot ends before it starts"
                );
            }
        }

        store.save(RecordKey::Schedule, &schedule)?;

        self.committed = schedule;
        self.reset_draft();

        let report = CommitReport {
            slots: self.committed.len(),
            appended_rows,
            dropped_rows,
        };
        tracing::info!(
            slots = report.slots,
            appended = report.appended_rows,
            dropped = report.dropped_rows,
            "Committed schedule"
        );
        Ok(report)
    }

    // ========== Draft edits ==========

    /// Changes one field of a draft slot.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::OutOfRange` if `index` is not a draft slot.
    pub fn set_slot_field(&mut self, index: usize, field: SlotField) -> Result<(), ScheduleError> {
        let len = self.draft.len();
        let slot = self
            .draft
            .get_mut(index)
            .ok_or(ScheduleError::OutOfRange { index, len })?;
        slot.apply(field);
        self.dirty = true;
        Ok(())
    }

    /// Replaces a draft slot with an edited row.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::OutOfRange` if `index` is not a draft slot, or
    /// `ScheduleError::IncompleteEntry` if the row is missing a day or time.
    /// The slot is left untouched in both cases.
    pub fn update_slot(
        &mut self,
        index: usize,
        candidate: &SlotCandidate,
    ) -> Result<(), ScheduleError> {
        let len = self.draft.len();
        let slot = self
            .draft
            .get_mut(index)
            .ok_or(ScheduleError::OutOfRange { index, len })?;
        *slot = candidate
            .to_slot()
            .ok_or(ScheduleError::IncompleteEntry { rows: 1 })?;
        self.dirty = true;
        Ok(())
    }

    /// Appends a slot to the draft.
    ///
    /// The draft is marked dirty even when the row is rejected, so an
    /// abandoned half-filled row still triggers the navigation guard.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::IncompleteEntry` if the row is missing a day,
    /// start time or end time. Nothing is appended in that case.
    pub fn add_slot(&mut self, candidate: SlotCandidate) -> Result<usize, ScheduleError> {
        self.dirty = true;
        let slot = candidate
            .to_slot()
            .ok_or(ScheduleError::IncompleteEntry { rows: 1 })?;
        self.draft.push(slot);
        Ok(self.draft.len() - 1)
    }

    /// Opens an empty "add new slot" row.
    ///
    /// Opening a row does not mark the draft dirty; editing it does.
    pub fn open_row(&mut self) -> PendingRow {
        self.pending_rows.push(SlotCandidate::new());
        PendingRow(self.pending_rows.len() - 1)
    }

    /// Changes one field of an open row and marks the draft dirty.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::UnknownRow` if the row is not open.
    pub fn edit_row(&mut self, row: PendingRow, field: SlotField) -> Result<(), ScheduleError> {
        let candidate = self
            .pending_rows
            .get_mut(row.0)
            .ok_or(ScheduleError::UnknownRow(row.0))?;
        candidate.apply(field);
        self.dirty = true;
        Ok(())
    }

    /// Empties the draft and closes all open rows.
    pub fn remove_all(&mut self) {
        let removed = self.draft.len();
        self.draft.clear();
        self.pending_rows.clear();
        self.dirty = true;
        tracing::debug!(removed, "Cleared schedule draft");
    }

    /// Copies the selected slots to every other weekday (Monday to Friday).
    ///
    /// For each selected slot, one copy is appended per weekday that differs
    /// from the slot's own day, so a Monday slot yields Tuesday to Friday and
    /// a weekend or `Everyday` slot yields all five. Copies are taken from the
    /// draft as it was before the call, in selection order. Repeated indices
    /// are only copied once.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::NoSelection` if `indices` is empty, or
    /// `ScheduleError::OutOfRange` if any index is invalid. The draft is not
    /// modified in either case.
    pub fn duplicate_to_weekdays(&mut self, indices: &[usize]) -> Result<usize, ScheduleError> {
        if indices.is_empty() {
            return Err(ScheduleError::NoSelection);
        }
        let len = self.draft.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(ScheduleError::OutOfRange { index, len });
        }

        let mut seen = HashSet::new();
        let copies: Vec<ScheduleSlot> = indices
            .iter()
            .filter(|&&i| seen.insert(i))
            .flat_map(|&i| {
                let source = &self.draft[i];
                ScheduleDay::WEEKDAYS
                    .into_iter()
                    .filter(move |day| *day != source.day)
                    .map(move |day| source.on_day(day))
            })
            .collect();

        let appended = copies.len();
        self.draft.extend(copies);
        self.dirty = true;
        tracing::debug!(sources = seen.len(), appended, "Duplicated slots to weekdays");
        Ok(appended)
    }

    fn reset_draft(&mut self) {
        self.draft.clone_from(&self.committed);
        self.pending_rows.clear();
        self.dirty = false;
    }
}

impl UnsavedChanges for ScheduleEditor {
    fn has_unsaved_changes(&self) -> bool {
        self.is_dirty()
    }

    fn discard_changes(&mut self) {
        self.discard();
    }
}
