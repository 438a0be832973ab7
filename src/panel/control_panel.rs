// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The control panel state container.

use tokio::sync::broadcast;

use crate::config::PanelConfig;
use crate::error::{Error, Result, RoomError, StoreError};
use crate::event::{EventBus, PanelEvent};
use crate::navigation::{GuardChoice, NavigationGuard, NoEditor, Transition, UnsavedChanges, View};
use crate::presentation::{Presenter, Prompt, PromptChoice, PromptKind, Severity};
use crate::room::{RoomControl, RoomField, RoomId, RoomRegistry};
use crate::savings::SavingsData;
use crate::schedule::ScheduleEditor;
use crate::store::{KeyValueStore, MemoryStore};

use super::{Command, Outcome, Rejection, RoomCommand, ScheduleCommand};

/// Brightness above which the panel suggests dimming.
const BRIGHTNESS_TIP_THRESHOLD: u8 = 80;

/// Owns every piece of panel state and maps user actions onto it.
///
/// All mutation goes through [`dispatch`](Self::dispatch). Actions that
/// need confirmation show a prompt through the [`Presenter`] and return
/// [`Outcome::Prompted`]; the action completes when the answer arrives as
/// [`Command::Respond`].
///
/// # Examples
///
/// ```
/// use lightpanel_lib::{Command, ControlPanel, Outcome, ScheduleCommand, View};
/// use lightpanel_lib::presentation::{PromptChoice, PromptKind, RecordingPresenter};
/// use lightpanel_lib::schedule::SlotCandidate;
/// use lightpanel_lib::store::MemoryStore;
///
/// # fn main() -> lightpanel_lib::Result<()> {
/// let mut panel = ControlPanel::new(MemoryStore::new(), RecordingPresenter::new());
///
/// panel.dispatch(Command::Navigate(View::Schedule))?;
/// let row = SlotCandidate::from_form("Monday", "07:00", "08:00", "Dimmed Warm", true)?;
/// panel.dispatch(Command::Schedule(ScheduleCommand::AddSlot(row)))?;
///
/// // Leaving with unsaved edits asks first.
/// let outcome = panel.dispatch(Command::Navigate(View::Home))?;
/// assert_eq!(outcome, Outcome::Prompted(PromptKind::UnsavedSchedule));
///
/// panel.dispatch(Command::Respond(PromptChoice::Cancel))?;
/// panel.dispatch(Command::Schedule(ScheduleCommand::Save))?;
/// assert_eq!(panel.schedule().committed().len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct ControlPanel {
    store: Box<dyn KeyValueStore>,
    presenter: Box<dyn Presenter>,
    config: PanelConfig,
    rooms: RoomRegistry,
    schedule: ScheduleEditor,
    room_control: RoomControl,
    savings: SavingsData,
    guard: NavigationGuard,
    prompt: Option<PromptKind>,
    room_to_open: Option<RoomId>,
    events: EventBus,
}

impl ControlPanel {
    /// Creates a panel with the default configuration over `store`.
    pub fn new(store: impl KeyValueStore + 'static, presenter: impl Presenter + 'static) -> Self {
        Self::with_store(PanelConfig::default(), Box::new(store), Box::new(presenter))
    }

    /// Creates a panel, opening the store named by `config`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the configured storage cannot be opened.
    pub fn open(
        config: PanelConfig,
        presenter: impl Presenter + 'static,
    ) -> std::result::Result<Self, StoreError> {
        let store = config.storage.open()?;
        Ok(Self::with_store(config, store, Box::new(presenter)))
    }

    /// Creates a panel over an already opened store.
    ///
    /// Records that are missing or unreadable start from their defaults.
    #[must_use]
    pub fn with_store(
        config: PanelConfig,
        store: Box<dyn KeyValueStore>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let rooms = RoomRegistry::load(store.as_ref(), config.seed_default_rooms);
        let schedule = ScheduleEditor::load(store.as_ref());
        let savings = SavingsData::load(store.as_ref());
        tracing::info!(
            rooms = rooms.len(),
            slots = schedule.committed().len(),
            eco_mode = savings.eco_mode,
            "Control panel started"
        );
        Self {
            events: EventBus::with_capacity(config.event_capacity),
            store,
            presenter,
            config,
            rooms,
            schedule,
            room_control: RoomControl::default(),
            savings,
            guard: NavigationGuard::new(),
            prompt: None,
            room_to_open: None,
        }
    }

    // ========== Accessors ==========

    /// Returns the active view.
    #[must_use]
    pub fn current_view(&self) -> View {
        self.guard.current()
    }

    /// Returns the rooms.
    #[must_use]
    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    /// Returns the schedule editor.
    #[must_use]
    pub fn schedule(&self) -> &ScheduleEditor {
        &self.schedule
    }

    /// Returns the room-control session.
    #[must_use]
    pub fn room_control(&self) -> &RoomControl {
        &self.room_control
    }

    /// Returns the savings record.
    #[must_use]
    pub fn savings(&self) -> &SavingsData {
        &self.savings
    }

    /// Returns the configuration the panel was created with.
    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Returns the prompt waiting for an answer.
    #[must_use]
    pub fn pending_prompt(&self) -> Option<PromptKind> {
        self.prompt
    }

    /// Returns the navigation guard.
    #[must_use]
    pub fn navigation(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Subscribes to panel events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.events.subscribe()
    }

    /// Returns a handle to the event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // ========== Dispatch ==========

    /// Carries out a user action.
    ///
    /// Recoverable errors (incomplete rows, empty selection, bad room names,
    /// unknown rooms) are shown to the user and returned as
    /// [`Outcome::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if a record cannot be written, and
    /// `Error::Schedule` for slot indices or row handles that do not exist.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        tracing::debug!(?command, view = %self.guard.current(), "Dispatching command");
        let result = match command {
            Command::Navigate(target) => self.navigate(target),
            Command::Back => self.back(),
            Command::OpenRoom(id) => self.open_room(id),
            Command::Help => Ok(self.show(Prompt::help(self.guard.current()))),
            Command::Respond(choice) => self.respond(choice),
            Command::Schedule(command) => self.schedule_command(command),
            Command::Room(command) => self.room_command(command),
            Command::SetEcoMode(on) => self.set_eco_mode(on),
        };
        result.or_else(|err| self.reject(err))
    }

    fn reject(&mut self, err: Error) -> Result<Outcome> {
        let rejection = Rejection::from_error(err)?;
        tracing::debug!(?rejection, "Rejected command");
        self.presenter
            .notify(&rejection.message(), rejection.severity());
        Ok(Outcome::Rejected(rejection))
    }

    fn show(&mut self, prompt: Prompt) -> Outcome {
        let guarding =
            |kind: PromptKind| matches!(kind, PromptKind::UnsavedSchedule | PromptKind::UnsavedRoom);
        if self.prompt.is_some_and(guarding) && !guarding(prompt.kind) {
            tracing::debug!(kind = ?prompt.kind, "Prompt replaces pending navigation");
            self.guard.resolve(GuardChoice::Dismiss, &mut NoEditor);
            self.room_to_open = None;
        }
        self.prompt = Some(prompt.kind);
        self.presenter.present(&prompt);
        Outcome::Prompted(prompt.kind)
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        self.presenter.notify(message, severity);
    }

    fn publish(&self, event: PanelEvent) {
        self.events.publish(event);
    }

    // ========== Navigation ==========

    fn navigate(&mut self, target: View) -> Result<Outcome> {
        if target == View::RoomControl && self.guard.current() != View::RoomControl {
            return Err(RoomError::NoOpenRoom.into());
        }
        let editor: &dyn UnsavedChanges = match self.guard.current() {
            View::Schedule => &self.schedule,
            View::RoomControl => &self.room_control,
            _ => &NoEditor,
        };
        let transition = self.guard.request(target, editor);
        Ok(self.after_transition(transition))
    }

    fn back(&mut self) -> Result<Outcome> {
        let editor: &dyn UnsavedChanges = match self.guard.current() {
            View::Schedule => &self.schedule,
            View::RoomControl => &self.room_control,
            _ => &NoEditor,
        };
        let transition = self.guard.back(editor);
        Ok(self.after_transition(transition))
    }

    fn open_room(&mut self, id: RoomId) -> Result<Outcome> {
        if self.rooms.get(id).is_none() {
            return Err(RoomError::NotFound(id).into());
        }
        if self.guard.current() == View::RoomControl {
            if self.room_control.has_changes() {
                tracing::debug!(id = %id, "Room control has unsaved edits, not switching room");
                return Ok(Outcome::Unchanged);
            }
            if let Some(room) = self.rooms.get(id) {
                self.room_control.open(room);
            }
            return Ok(Outcome::Done);
        }
        self.room_to_open = Some(id);
        let editor: &dyn UnsavedChanges = match self.guard.current() {
            View::Schedule => &self.schedule,
            _ => &NoEditor,
        };
        let transition = self.guard.request(View::RoomControl, editor);
        Ok(self.after_transition(transition))
    }

    fn after_transition(&mut self, transition: Transition) -> Outcome {
        match transition {
            Transition::Navigated { from, to } => {
                self.prompt = None;
                if from == View::RoomControl {
                    self.room_control.close();
                }
                if to == View::RoomControl {
                    let room = self.room_to_open.take().and_then(|id| self.rooms.get(id));
                    match room {
                        Some(room) => self.room_control.open(room),
                        None => tracing::warn!("Entered room control without a room"),
                    }
                } else {
                    self.room_to_open = None;
                }
                if to == View::Schedule {
                    self.schedule.begin_editing();
                }
                self.publish(PanelEvent::ViewChanged { from, to });
                Outcome::Navigated { from, to }
            }
            Transition::Suspended { .. } => {
                let prompt = if self.guard.current() == View::RoomControl {
                    Prompt::unsaved_room()
                } else {
                    Prompt::unsaved_schedule()
                };
                self.show(prompt)
            }
            Transition::Stayed => {
                self.room_to_open = None;
                Outcome::Stayed
            }
            Transition::Unchanged => Outcome::Unchanged,
        }
    }

    // ========== Prompts ==========

    fn respond(&mut self, choice: PromptChoice) -> Result<Outcome> {
        let Some(kind) = self.prompt.take() else {
            tracing::debug!(?choice, "No prompt to respond to");
            return Ok(Outcome::Unchanged);
        };
        tracing::debug!(?kind, ?choice, "Prompt answered");

        match kind {
            PromptKind::UnsavedSchedule | PromptKind::UnsavedRoom => {
                let choice = match choice {
                    PromptChoice::Confirm => GuardChoice::Discard,
                    PromptChoice::Cancel => GuardChoice::Stay,
                    PromptChoice::Dismiss => GuardChoice::Dismiss,
                };
                let transition = match self.guard.current() {
                    View::Schedule => self.guard.resolve(choice, &mut self.schedule),
                    View::RoomControl => self.guard.resolve(choice, &mut self.room_control),
                    _ => self.guard.resolve(choice, &mut NoEditor),
                };
                if kind == PromptKind::UnsavedSchedule
                    && matches!(transition, Transition::Navigated { .. })
                {
                    self.publish(PanelEvent::ScheduleDiscarded);
                }
                Ok(self.after_transition(transition))
            }
            PromptKind::IncompleteEntries => match choice {
                PromptChoice::Confirm => self.commit_schedule(),
                PromptChoice::Cancel | PromptChoice::Dismiss => Ok(Outcome::Stayed),
            },
            PromptKind::ClearSchedule => match choice {
                PromptChoice::Confirm => {
                    self.schedule.remove_all();
                    self.notify("All schedule slots have been cleared", Severity::Info);
                    Ok(Outcome::Done)
                }
                PromptChoice::Cancel | PromptChoice::Dismiss => Ok(Outcome::Stayed),
            },
            PromptKind::RemoveRoom(id) => match choice {
                PromptChoice::Confirm => self.remove_room(id),
                PromptChoice::Cancel | PromptChoice::Dismiss => Ok(Outcome::Stayed),
            },
            PromptKind::Help(_) => Ok(Outcome::Done),
        }
    }

    // ========== Schedule ==========

    fn schedule_command(&mut self, command: ScheduleCommand) -> Result<Outcome> {
        match command {
            ScheduleCommand::SetField { index, field } => {
                self.schedule.set_slot_field(index, field)?;
            }
            ScheduleCommand::UpdateSlot { index, candidate } => {
                self.schedule.update_slot(index, &candidate)?;
            }
            ScheduleCommand::AddSlot(candidate) => {
                self.schedule.add_slot(candidate)?;
            }
            ScheduleCommand::OpenRow => {
                self.schedule.open_row();
            }
            ScheduleCommand::EditRow { row, field } => {
                self.schedule.edit_row(row, field)?;
            }
            ScheduleCommand::ApplyToWeekdays(indices) => {
                self.apply_to_weekdays(&indices)?;
            }
            ScheduleCommand::ApplyEnabledToWeekdays => {
                let indices = self.schedule.enabled_indices();
                self.apply_to_weekdays(&indices)?;
            }
            ScheduleCommand::ClearAll => return Ok(self.show(Prompt::clear_schedule())),
            ScheduleCommand::Save => {
                if self.schedule.incomplete_rows() > 0 {
                    return Ok(self.show(Prompt::incomplete_entries()));
                }
                return self.commit_schedule();
            }
            ScheduleCommand::Discard => {
                self.schedule.discard();
                self.publish(PanelEvent::ScheduleDiscarded);
            }
        }
        Ok(Outcome::Done)
    }

    fn apply_to_weekdays(&mut self, indices: &[usize]) -> Result<()> {
        self.schedule.duplicate_to_weekdays(indices)?;
        self.notify("Applied selected schedules to all weekdays!", Severity::Success);
        Ok(())
    }

    fn commit_schedule(&mut self) -> Result<Outcome> {
        let report = self.schedule.commit(self.store.as_ref())?;
        self.notify("Schedule saved successfully!", Severity::Success);
        self.publish(PanelEvent::ScheduleCommitted {
            slots: report.slots,
        });
        Ok(Outcome::Done)
    }

    // ========== Rooms ==========

    fn room_command(&mut self, command: RoomCommand) -> Result<Outcome> {
        match command {
            RoomCommand::Add(name) => {
                let room = self.rooms.add(&name)?;
                let (room_id, message) = (room.id, format!("Room \"{}\" has been added", room.name));
                self.rooms.save(self.store.as_ref())?;
                self.notify(&message, Severity::Success);
                self.publish(PanelEvent::RoomAdded { room_id });
            }
            RoomCommand::Remove(id) => {
                let room = self
                    .rooms
                    .get(id)
                    .ok_or(RoomError::NotFound(id))?;
                let prompt = Prompt::remove_room(id, &room.name);
                return Ok(self.show(prompt));
            }
            RoomCommand::Rename { id, name } => {
                self.rooms.rename(id, &name)?;
                self.rooms.save(self.store.as_ref())?;
                self.refresh_open_room();
                self.publish(PanelEvent::RoomUpdated {
                    room_id: id,
                    persisted: true,
                });
            }
            RoomCommand::ToggleOccupancy(id) => {
                self.rooms.toggle_occupancy(id)?;
                self.rooms.save(self.store.as_ref())?;
                self.refresh_open_room();
                self.publish(PanelEvent::RoomUpdated {
                    room_id: id,
                    persisted: true,
                });
            }
            RoomCommand::Set(field) => {
                self.room_control.set(field)?;
                self.hint(field);
            }
            RoomCommand::Apply => {
                let room_id = self.room_control.apply(&mut self.rooms)?.id;
                self.publish(PanelEvent::RoomUpdated {
                    room_id,
                    persisted: false,
                });
                return self.navigate(View::Home);
            }
            RoomCommand::Save => {
                let room = self
                    .room_control
                    .save(&mut self.rooms, self.store.as_ref())?;
                let (room_id, message) =
                    (room.id, format!("Settings for {} saved successfully", room.name));
                self.notify(&message, Severity::Success);
                self.publish(PanelEvent::RoomUpdated {
                    room_id,
                    persisted: true,
                });
                return self.navigate(View::Home);
            }
            RoomCommand::Discard => self.room_control.discard(),
        }
        Ok(Outcome::Done)
    }

    /// Shows the informational toast that follows some room edits.
    fn hint(&mut self, field: RoomField) {
        match field {
            RoomField::Mode(mode) => {
                let message = format!("{mode}: {}", mode.description());
                self.notify(&message, Severity::Info);
            }
            RoomField::Brightness(level) if level.value() > BRIGHTNESS_TIP_THRESHOLD => {
                self.notify("Tip: Lowering brightness can save energy", Severity::Info);
            }
            _ => {}
        }
    }

    /// Brings the room-control session up to date with the registry.
    fn refresh_open_room(&mut self) {
        if let Some(room) = self.room_control.room_id().and_then(|id| self.rooms.get(id)) {
            self.room_control.refresh(room);
        }
    }

    fn remove_room(&mut self, id: RoomId) -> Result<Outcome> {
        let room = self.rooms.remove(id)?;
        self.rooms.save(self.store.as_ref())?;
        self.notify(&format!("{} was removed", room.name), Severity::Success);
        self.publish(PanelEvent::RoomRemoved { room_id: id });

        if self.room_control.room_id() == Some(id) {
            self.room_control.close();
            let transition = self.guard.request(View::Home, &NoEditor);
            return Ok(self.after_transition(transition));
        }
        Ok(Outcome::Done)
    }

    // ========== Eco mode ==========

    fn set_eco_mode(&mut self, on: bool) -> Result<Outcome> {
        self.savings.eco_mode = on;
        self.savings.save(self.store.as_ref())?;

        let mut capped_rooms = 0;
        if on {
            capped_rooms = self.rooms.apply_eco_limits(&self.config.eco_limits);
            self.rooms.save(self.store.as_ref())?;
            self.refresh_open_room();
            self.room_control.cap_to(&self.config.eco_limits);
            self.notify("Eco Mode activated", Severity::Success);
        } else {
            self.notify("Eco Mode deactivated", Severity::Info);
        }
        tracing::info!(enabled = on, capped_rooms, "Eco mode changed");
        self.publish(PanelEvent::EcoModeChanged {
            enabled: on,
            capped_rooms,
        });
        Ok(Outcome::Done)
    }
}

impl Default for ControlPanel {
    /// Creates a panel over an empty in-memory store that only logs what it
    /// would show.
    fn default() -> Self {
        Self::new(MemoryStore::new(), crate::presentation::TracingPresenter)
    }
}

impl std::fmt::Debug for ControlPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlPanel")
            .field("view", &self.guard.current())
            .field("rooms", &self.rooms.len())
            .field("slots", &self.schedule.committed().len())
            .field("dirty", &self.schedule.is_dirty())
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}
