// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the control panel's user flows.

use lightpanel_lib::config::{PanelConfig, StorageConfig};
use lightpanel_lib::event::PanelEvent;
use lightpanel_lib::presentation::{PromptChoice, PromptKind, RecordingPresenter, Severity};
use lightpanel_lib::room::{RoomField, RoomId};
use lightpanel_lib::schedule::{SlotCandidate, SlotField};
use lightpanel_lib::store::{KeyValueStore, MemoryStore};
use lightpanel_lib::types::{Brightness, ColorTemp, LightingMode, ScheduleDay, TimeOfDay};
use lightpanel_lib::{
    Command, ControlPanel, Outcome, Rejection, RoomCommand, RoomError, ScheduleCommand,
    ScheduleError, View,
};

fn panel_over(store: &MemoryStore) -> (ControlPanel, RecordingPresenter) {
    let recorder = RecordingPresenter::new();
    let panel = ControlPanel::new(store.clone(), recorder.clone());
    (panel, recorder)
}

fn panel() -> (ControlPanel, RecordingPresenter) {
    panel_over(&MemoryStore::new())
}

fn row(day: &str, start: &str, end: &str, mode: &str) -> SlotCandidate {
    SlotCandidate::from_form(day, start, end, mode, true).unwrap()
}

fn schedule(panel: &mut ControlPanel, command: ScheduleCommand) -> Outcome {
    panel.dispatch(Command::Schedule(command)).unwrap()
}

fn room(panel: &mut ControlPanel, command: RoomCommand) -> Outcome {
    panel.dispatch(Command::Room(command)).unwrap()
}

fn navigate(panel: &mut ControlPanel, view: View) -> Outcome {
    panel.dispatch(Command::Navigate(view)).unwrap()
}

fn respond(panel: &mut ControlPanel, choice: PromptChoice) -> Outcome {
    panel.dispatch(Command::Respond(choice)).unwrap()
}

fn room_id(panel: &ControlPanel, name: &str) -> RoomId {
    panel
        .rooms()
        .rooms()
        .iter()
        .find(|r| r.name == name)
        .map(|r| r.id)
        .unwrap()
}

// ============================================================================
// Schedule editing and the navigation guard
// ============================================================================

mod schedule_guard {
    use super::*;

    #[test]
    fn add_and_commit_from_empty_schedule() {
        let store = MemoryStore::new();
        let (mut panel, recorder) = panel_over(&store);
        navigate(&mut panel, View::Schedule);

        schedule(
            &mut panel,
            ScheduleCommand::AddSlot(row("Monday", "07:00", "08:00", "Dimmed Warm")),
        );
        assert_eq!(schedule(&mut panel, ScheduleCommand::Save), Outcome::Done);

        let committed = panel.schedule().committed();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].day, ScheduleDay::Monday);
        assert_eq!(committed[0].start_time, TimeOfDay::new(7, 0).unwrap());
        assert_eq!(committed[0].end_time, TimeOfDay::new(8, 0).unwrap());
        assert_eq!(committed[0].mode, LightingMode::DimmedWarm);
        assert!(committed[0].enabled);
        assert!(!panel.schedule().is_dirty());
        assert_eq!(
            recorder.last_notice(),
            Some(("Schedule saved successfully!".to_string(), Severity::Success))
        );

        let stored: serde_json::Value =
            serde_json::from_str(&store.load_raw("schedule").unwrap().unwrap()).unwrap();
        assert_eq!(
            stored,
            serde_json::json!([{
                "day": "Monday",
                "startTime": "07:00",
                "endTime": "08:00",
                "mode": "Dimmed Warm",
                "enabled": true
            }])
        );
    }

    #[test]
    fn clean_schedule_navigates_without_prompt() {
        let (mut panel, recorder) = panel();
        navigate(&mut panel, View::Schedule);

        assert_eq!(
            navigate(&mut panel, View::Rooms),
            Outcome::Navigated {
                from: View::Schedule,
                to: View::Rooms
            }
        );
        assert!(recorder.prompts().is_empty());
    }

    #[test]
    fn discard_changes_and_navigate() {
        let (mut panel, recorder) = panel();
        navigate(&mut panel, View::Schedule);
        schedule(
            &mut panel,
            ScheduleCommand::AddSlot(row("Friday", "18:00", "22:00", "Cool White")),
        );

        assert_eq!(
            navigate(&mut panel, View::Home),
            Outcome::Prompted(PromptKind::UnsavedSchedule)
        );
        let prompt = recorder.last_prompt().unwrap();
        assert_eq!(prompt.title, "Unsaved Schedule Changes");
        assert_eq!(prompt.confirm_label, "Discard Changes");
        assert_eq!(prompt.cancel_label, Some("Stay & Save"));
        assert_eq!(panel.current_view(), View::Schedule);

        assert_eq!(
            respond(&mut panel, PromptChoice::Confirm),
            Outcome::Navigated {
                from: View::Schedule,
                to: View::Home
            }
        );
        assert!(!panel.schedule().is_dirty());
        assert!(panel.schedule().draft().is_empty());
        assert!(panel.schedule().committed().is_empty());
    }

    #[test]
    fn stay_keeps_edits_and_view() {
        for choice in [PromptChoice::Cancel, PromptChoice::Dismiss] {
            let (mut panel, _) = panel();
            navigate(&mut panel, View::Schedule);
            schedule(
                &mut panel,
                ScheduleCommand::AddSlot(row("Friday", "18:00", "22:00", "Off")),
            );
            navigate(&mut panel, View::Savings);

            assert_eq!(respond(&mut panel, choice), Outcome::Stayed);
            assert_eq!(panel.current_view(), View::Schedule);
            assert!(panel.schedule().is_dirty());
            assert_eq!(panel.schedule().draft().len(), 1);
            assert_eq!(panel.pending_prompt(), None);
        }
    }

    #[test]
    fn every_navigation_attempt_is_guarded() {
        let (mut panel, recorder) = panel();
        navigate(&mut panel, View::Schedule);
        schedule(&mut panel, ScheduleCommand::OpenRow);
        let row = panel.schedule().pending_row(0).unwrap();
        schedule(
            &mut panel,
            ScheduleCommand::EditRow {
                row,
                field: SlotField::StartTime(TimeOfDay::new(6, 0).unwrap()),
            },
        );

        navigate(&mut panel, View::Home);
        respond(&mut panel, PromptChoice::Cancel);
        navigate(&mut panel, View::Rooms);
        respond(&mut panel, PromptChoice::Dismiss);
        panel.dispatch(Command::Back).unwrap();

        assert_eq!(recorder.prompts().len(), 3);
        assert_eq!(panel.current_view(), View::Schedule);
    }

    #[test]
    fn retargeting_while_prompt_is_pending() {
        let (mut panel, _) = panel();
        navigate(&mut panel, View::Schedule);
        schedule(&mut panel, ScheduleCommand::ClearAll);
        respond(&mut panel, PromptChoice::Confirm);

        navigate(&mut panel, View::Home);
        navigate(&mut panel, View::Savings);

        assert_eq!(
            respond(&mut panel, PromptChoice::Confirm),
            Outcome::Navigated {
                from: View::Schedule,
                to: View::Savings
            }
        );
    }

    #[test]
    fn help_replaces_pending_navigation() {
        let (mut panel, _) = panel();
        navigate(&mut panel, View::Schedule);
        schedule(&mut panel, ScheduleCommand::ClearAll);
        respond(&mut panel, PromptChoice::Confirm);
        navigate(&mut panel, View::Home);
        assert!(panel.navigation().is_pending());

        assert_eq!(
            panel.dispatch(Command::Help).unwrap(),
            Outcome::Prompted(PromptKind::Help(View::Schedule))
        );
        assert!(!panel.navigation().is_pending());

        assert_eq!(respond(&mut panel, PromptChoice::Confirm), Outcome::Done);
        assert_eq!(panel.current_view(), View::Schedule);
        assert!(panel.schedule().is_dirty());
        assert_eq!(
            navigate(&mut panel, View::Home),
            Outcome::Prompted(PromptKind::UnsavedSchedule)
        );
    }

    #[test]
    fn reentering_schedule_drops_abandoned_edits() {
        let (mut panel, _) = panel();
        navigate(&mut panel, View::Schedule);
        schedule(
            &mut panel,
            ScheduleCommand::AddSlot(row("Sunday", "10:00", "11:00", "Off")),
        );
        schedule(&mut panel, ScheduleCommand::Save);
        schedule(&mut panel, ScheduleCommand::SetField {
            index: 0,
            field: SlotField::Enabled(false),
        });
        navigate(&mut panel, View::Home);
        respond(&mut panel, PromptChoice::Confirm);

        navigate(&mut panel, View::Schedule);

        assert!(panel.schedule().draft()[0].enabled);
        assert!(!panel.schedule().is_dirty());
    }

    #[test]
    fn incomplete_add_is_rejected_but_marks_dirty() {
        let (mut panel, recorder) = panel();
        navigate(&mut panel, View::Schedule);

        let outcome = schedule(
            &mut panel,
            ScheduleCommand::AddSlot(row("", "09:00", "17:00", "Off")),
        );

        assert_eq!(
            outcome,
            Outcome::Rejected(Rejection::Schedule(ScheduleError::IncompleteEntry {
                rows: 1
            }))
        );
        assert!(panel.schedule().draft().is_empty());
        assert!(panel.schedule().is_dirty());
        assert_eq!(recorder.last_notice().unwrap().1, Severity::Warning);
    }

    #[test]
    fn save_with_incomplete_rows_asks_first() {
        let (mut panel, recorder) = panel();
        navigate(&mut panel, View::Schedule);
        schedule(&mut panel, ScheduleCommand::OpenRow);
        let half = panel.schedule().pending_row(0).unwrap();
        schedule(
            &mut panel,
            ScheduleCommand::EditRow {
                row: half,
                field: SlotField::EndTime(TimeOfDay::new(23, 0).unwrap()),
            },
        );

        assert_eq!(
            schedule(&mut panel, ScheduleCommand::Save),
            Outcome::Prompted(PromptKind::IncompleteEntries)
        );
        assert_eq!(recorder.last_prompt().unwrap().confirm_label, "Save Anyway");

        assert_eq!(respond(&mut panel, PromptChoice::Cancel), Outcome::Stayed);
        assert!(panel.schedule().is_dirty());
        assert_eq!(panel.schedule().pending_rows().len(), 1);

        schedule(&mut panel, ScheduleCommand::Save);
        assert_eq!(respond(&mut panel, PromptChoice::Confirm), Outcome::Done);
        assert!(panel.schedule().committed().is_empty());
        assert!(panel.schedule().pending_rows().is_empty());
        assert!(!panel.schedule().is_dirty());
    }

    #[test]
    fn clear_all_needs_confirmation() {
        let (mut panel, recorder) = panel();
        navigate(&mut panel, View::Schedule);
        schedule(
            &mut panel,
            ScheduleCommand::AddSlot(row("Monday", "07:00", "08:00", "Off")),
        );

        assert_eq!(
            schedule(&mut panel, ScheduleCommand::ClearAll),
            Outcome::Prompted(PromptKind::ClearSchedule)
        );
        respond(&mut panel, PromptChoice::Cancel);
        assert_eq!(panel.schedule().draft().len(), 1);

        schedule(&mut panel, ScheduleCommand::ClearAll);
        respond(&mut panel, PromptChoice::Confirm);
        assert!(panel.schedule().draft().is_empty());
        assert_eq!(
            recorder.last_notice(),
            Some((
                "All schedule slots have been cleared".to_string(),
                Severity::Info
            ))
        );
    }

    #[test]
    fn apply_to_weekdays() {
        let (mut panel, recorder) = panel();
        navigate(&mut panel, View::Schedule);
        schedule(
            &mut panel,
            ScheduleCommand::AddSlot(row("Monday", "08:00", "09:00", "Cool White")),
        );

        let outcome = schedule(&mut panel, ScheduleCommand::ApplyToWeekdays(vec![]));
        assert_eq!(
            outcome,
            Outcome::Rejected(Rejection::Schedule(ScheduleError::NoSelection))
        );
        assert_eq!(
            recorder.last_notice(),
            Some((
                "Please select at least one schedule slot to apply to weekdays".to_string(),
                Severity::Warning
            ))
        );
        assert_eq!(panel.schedule().draft().len(), 1);

        schedule(&mut panel, ScheduleCommand::ApplyEnabledToWeekdays);
        let days: Vec<ScheduleDay> = panel.schedule().draft().iter().map(|s| s.day).collect();
        assert_eq!(
            days,
            vec![
                ScheduleDay::Monday,
                ScheduleDay::Tuesday,
                ScheduleDay::Wednesday,
                ScheduleDay::Thursday,
                ScheduleDay::Friday
            ]
        );
        assert_eq!(
            recorder.last_notice().unwrap().0,
            "Applied selected schedules to all weekdays!"
        );
    }

    #[test]
    fn committed_schedule_survives_restart() {
        let store = MemoryStore::new();
        {
            let (mut panel, _) = panel_over(&store);
            navigate(&mut panel, View::Schedule);
            schedule(
                &mut panel,
                ScheduleCommand::AddSlot(row("Everyday", "22:00", "23:30", "Dimmed Warm")),
            );
            schedule(&mut panel, ScheduleCommand::Save);
        }

        let (panel, _) = panel_over(&store);
        assert_eq!(panel.schedule().committed().len(), 1);
        assert_eq!(panel.schedule().committed()[0].day, ScheduleDay::Everyday);
    }
}

// ============================================================================
// Rooms
// ============================================================================

mod rooms {
    use super::*;

    #[test]
    fn add_room_persists_and_notifies() {
        let store = MemoryStore::new();
        let (mut panel, recorder) = panel_over(&store);

        assert_eq!(
            room(&mut panel, RoomCommand::Add("  Kitchen ".to_string())),
            Outcome::Done
        );

        assert_eq!(panel.rooms().len(), 3);
        assert_eq!(
            recorder.last_notice(),
            Some((
                "Room \"Kitchen\" has been added".to_string(),
                Severity::Success
            ))
        );
        let (reloaded, _) = panel_over(&store);
        assert!(reloaded.rooms().find_by_slug("kitchen").is_some());
    }

    #[test]
    fn add_room_rejects_duplicates_and_blank_names() {
        let (mut panel, recorder) = panel();

        let outcome = room(&mut panel, RoomCommand::Add("BEDROOM".to_string()));
        assert_eq!(
            outcome,
            Outcome::Rejected(Rejection::Room(RoomError::DuplicateName(
                "BEDROOM".to_string()
            )))
        );
        assert_eq!(
            recorder.last_notice(),
            Some((
                "A room with this name already exists".to_string(),
                Severity::Error
            ))
        );

        room(&mut panel, RoomCommand::Add("living   room".to_string()));
        room(&mut panel, RoomCommand::Add("   ".to_string()));
        assert_eq!(
            recorder.last_notice().unwrap().0,
            "Please enter a room name"
        );
        assert_eq!(panel.rooms().len(), 2);
    }

    #[test]
    fn remove_room_after_confirmation() {
        let store = MemoryStore::new();
        let (mut panel, recorder) = panel_over(&store);
        let bedroom = room_id(&panel, "Bedroom");

        assert_eq!(
            room(&mut panel, RoomCommand::Remove(bedroom)),
            Outcome::Prompted(PromptKind::RemoveRoom(bedroom))
        );
        assert_eq!(
            recorder.last_prompt().unwrap().message,
            "Are you sure you want to remove Bedroom? This action cannot be undone."
        );
        respond(&mut panel, PromptChoice::Cancel);
        assert_eq!(panel.rooms().len(), 2);

        room(&mut panel, RoomCommand::Remove(bedroom));
        respond(&mut panel, PromptChoice::Confirm);

        assert!(panel.rooms().get(bedroom).is_none());
        assert_eq!(
            recorder.last_notice(),
            Some(("Bedroom was removed".to_string(), Severity::Success))
        );
        let (reloaded, _) = panel_over(&store);
        assert_eq!(reloaded.rooms().len(), 1);
    }

    #[test]
    fn removing_open_room_returns_home() {
        let (mut panel, _) = panel();
        let living = room_id(&panel, "Living Room");
        panel.dispatch(Command::OpenRoom(living)).unwrap();

        room(&mut panel, RoomCommand::Remove(living));
        let outcome = respond(&mut panel, PromptChoice::Confirm);

        assert_eq!(
            outcome,
            Outcome::Navigated {
                from: View::RoomControl,
                to: View::Home
            }
        );
        assert!(panel.room_control().room_id().is_none());
    }

    #[test]
    fn unknown_room_is_rejected() {
        let (mut panel, _) = panel();
        let ghost = RoomId::new();
        assert_eq!(
            room(&mut panel, RoomCommand::ToggleOccupancy(ghost)),
            Outcome::Rejected(Rejection::Room(RoomError::NotFound(ghost)))
        );
        assert_eq!(
            panel.dispatch(Command::OpenRoom(ghost)).unwrap(),
            Outcome::Rejected(Rejection::Room(RoomError::NotFound(ghost)))
        );
    }

    #[test]
    fn rename_and_toggle_occupancy_persist() {
        let store = MemoryStore::new();
        let (mut panel, _) = panel_over(&store);
        let bedroom = room_id(&panel, "Bedroom");

        room(&mut panel, RoomCommand::Rename {
            id: bedroom,
            name: "Guest Room".to_string(),
        });
        room(&mut panel, RoomCommand::ToggleOccupancy(bedroom));

        let (reloaded, _) = panel_over(&store);
        let stored = reloaded.rooms().get(bedroom).unwrap();
        assert_eq!(stored.name, "Guest Room");
        assert!(stored.occupancy);
    }

    #[test]
    fn search_rooms() {
        let (mut panel, _) = panel();
        room(&mut panel, RoomCommand::Add("Kids Room".to_string()));
        let names: Vec<&str> = panel
            .rooms()
            .search("room")
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Living Room", "Bedroom", "Kids Room"]);
    }

    #[test]
    fn legacy_rooms_gain_identifiers() {
        let store = MemoryStore::new();
        store
            .save_raw(
                "rooms",
                r#"[{"name":"Office","mode":"Productivity","brightness":100,"temp":5000,"occupancy":false}]"#,
            )
            .unwrap();

        let (panel, _) = panel_over(&store);
        let office = panel.rooms().find_by_slug("office").unwrap();
        assert_eq!(office.mode, LightingMode::Productivity);

        let stored: serde_json::Value =
            serde_json::from_str(&store.load_raw("rooms").unwrap().unwrap()).unwrap();
        assert_eq!(stored[0]["id"], office.id.to_string());
    }
}

// ============================================================================
// Room control
// ============================================================================

mod room_control {
    use super::*;

    #[test]
    fn back_with_unsaved_changes_asks_first() {
        let (mut panel, recorder) = panel();
        let living = room_id(&panel, "Living Room");
        navigate(&mut panel, View::Rooms);
        panel.dispatch(Command::OpenRoom(living)).unwrap();
        room(
            &mut panel,
            RoomCommand::Set(RoomField::Temp(ColorTemp::COOL)),
        );

        assert_eq!(
            panel.dispatch(Command::Back).unwrap(),
            Outcome::Prompted(PromptKind::UnsavedRoom)
        );
        let prompt = recorder.last_prompt().unwrap();
        assert_eq!(prompt.title, "Unsaved Changes");
        assert_eq!(prompt.cancel_label, Some("Keep Editing"));

        assert_eq!(respond(&mut panel, PromptChoice::Cancel), Outcome::Stayed);
        assert!(panel.room_control().has_changes());

        panel.dispatch(Command::Back).unwrap();
        assert_eq!(
            respond(&mut panel, PromptChoice::Confirm),
            Outcome::Navigated {
                from: View::RoomControl,
                to: View::Rooms
            }
        );
        assert_eq!(panel.rooms().get(living).unwrap().temp.kelvin(), 3000);
    }

    #[test]
    fn clean_back_returns_to_previous_view() {
        let (mut panel, recorder) = panel();
        let bedroom = room_id(&panel, "Bedroom");
        navigate(&mut panel, View::Rooms);
        panel.dispatch(Command::OpenRoom(bedroom)).unwrap();

        assert_eq!(
            panel.dispatch(Command::Back).unwrap(),
            Outcome::Navigated {
                from: View::RoomControl,
                to: View::Rooms
            }
        );
        assert!(recorder.prompts().is_empty());
    }

    #[test]
    fn apply_updates_memory_only() {
        let store = MemoryStore::new();
        let (mut panel, _) = panel_over(&store);
        let bedroom = room_id(&panel, "Bedroom");
        panel.dispatch(Command::OpenRoom(bedroom)).unwrap();
        room(
            &mut panel,
            RoomCommand::Set(RoomField::Mode(LightingMode::CoolWhite)),
        );

        assert_eq!(
            room(&mut panel, RoomCommand::Apply),
            Outcome::Navigated {
                from: View::RoomControl,
                to: View::Home
            }
        );

        assert_eq!(
            panel.rooms().get(bedroom).unwrap().mode,
            LightingMode::CoolWhite
        );
        assert!(store.load_raw("rooms").unwrap().is_none());
    }

    #[test]
    fn save_persists_and_notifies() {
        let store = MemoryStore::new();
        let (mut panel, recorder) = panel_over(&store);
        let bedroom = room_id(&panel, "Bedroom");
        panel.dispatch(Command::OpenRoom(bedroom)).unwrap();
        room(
            &mut panel,
            RoomCommand::Set(RoomField::Brightness(Brightness::new(40).unwrap())),
        );
        room(&mut panel, RoomCommand::Set(RoomField::Occupancy(true)));

        room(&mut panel, RoomCommand::Save);

        assert!(recorder.notices().contains(&(
            "Settings for Bedroom saved successfully".to_string(),
            Severity::Success
        )));
        assert_eq!(panel.current_view(), View::Home);
        let (reloaded, _) = panel_over(&store);
        let stored = reloaded.rooms().get(bedroom).unwrap();
        assert_eq!(stored.brightness.value(), 40);
        assert!(stored.occupancy);
    }

    #[test]
    fn edits_without_open_room_are_rejected() {
        let (mut panel, _) = panel();
        assert_eq!(
            room(&mut panel, RoomCommand::Set(RoomField::Occupancy(true))),
            Outcome::Rejected(Rejection::Room(RoomError::NoOpenRoom))
        );
    }

    #[test]
    fn opening_room_from_dirty_schedule_is_guarded() {
        let (mut panel, _) = panel();
        let living = room_id(&panel, "Living Room");
        navigate(&mut panel, View::Schedule);
        schedule(&mut panel, ScheduleCommand::ClearAll);
        respond(&mut panel, PromptChoice::Confirm);

        assert_eq!(
            panel.dispatch(Command::OpenRoom(living)).unwrap(),
            Outcome::Prompted(PromptKind::UnsavedSchedule)
        );
        respond(&mut panel, PromptChoice::Confirm);

        assert_eq!(panel.current_view(), View::RoomControl);
        assert_eq!(panel.room_control().room_id(), Some(living));
    }

    #[test]
    fn apply_keeps_rename_made_while_open() {
        let (mut panel, _) = panel();
        let bedroom = room_id(&panel, "Bedroom");
        panel.dispatch(Command::OpenRoom(bedroom)).unwrap();

        room(&mut panel, RoomCommand::Rename {
            id: bedroom,
            name: "Den".to_string(),
        });
        room(&mut panel, RoomCommand::Add("Bedroom".to_string()));
        room(&mut panel, RoomCommand::Set(RoomField::Occupancy(true)));
        room(&mut panel, RoomCommand::Apply);

        let mut slugs: Vec<String> = panel.rooms().rooms().iter().map(|r| r.slug()).collect();
        slugs.sort();
        assert_eq!(slugs, vec!["bedroom", "den", "living-room"]);
        let den = panel.rooms().get(bedroom).unwrap();
        assert_eq!(den.name, "Den");
        assert!(den.occupancy);
    }

    #[test]
    fn save_keeps_occupancy_toggled_while_open() {
        let store = MemoryStore::new();
        let (mut panel, _) = panel_over(&store);
        let living = room_id(&panel, "Living Room");
        panel.dispatch(Command::OpenRoom(living)).unwrap();
        room(
            &mut panel,
            RoomCommand::Set(RoomField::Mode(LightingMode::CoolWhite)),
        );

        room(&mut panel, RoomCommand::ToggleOccupancy(living));
        assert!(panel.room_control().current().unwrap().occupancy);
        room(&mut panel, RoomCommand::Save);

        let (reloaded, _) = panel_over(&store);
        let stored = reloaded.rooms().get(living).unwrap();
        assert!(stored.occupancy);
        assert_eq!(stored.mode, LightingMode::CoolWhite);
    }

    #[test]
    fn eco_mode_caps_open_room_edits() {
        let store = MemoryStore::new();
        let (mut panel, _) = panel_over(&store);
        let bedroom = room_id(&panel, "Bedroom");
        panel.dispatch(Command::OpenRoom(bedroom)).unwrap();
        room(
            &mut panel,
            RoomCommand::Set(RoomField::Brightness(Brightness::new(95).unwrap())),
        );

        panel.dispatch(Command::SetEcoMode(true)).unwrap();
        room(&mut panel, RoomCommand::Save);

        assert_eq!(panel.rooms().get(bedroom).unwrap().brightness.value(), 70);
        let (reloaded, _) = panel_over(&store);
        assert!(reloaded.savings().eco_mode);
        assert_eq!(reloaded.rooms().get(bedroom).unwrap().brightness.value(), 70);
    }
}

// ============================================================================
// Eco mode
// ============================================================================

mod eco_mode {
    use super::*;

    #[test]
    fn turning_on_caps_rooms_and_persists() {
        let store = MemoryStore::new();
        let (mut panel, recorder) = panel_over(&store);
        let bedroom = room_id(&panel, "Bedroom");
        panel.dispatch(Command::OpenRoom(bedroom)).unwrap();
        room(
            &mut panel,
            RoomCommand::Set(RoomField::Brightness(Brightness::new(95).unwrap())),
        );
        room(&mut panel, RoomCommand::Set(RoomField::Temp(ColorTemp::COOL)));
        room(&mut panel, RoomCommand::Save);

        panel.dispatch(Command::SetEcoMode(true)).unwrap();

        let stored = panel.rooms().get(bedroom).unwrap();
        assert_eq!(stored.brightness.value(), 70);
        assert_eq!(stored.temp.kelvin(), 3500);
        assert_eq!(
            recorder.last_notice(),
            Some(("Eco Mode activated".to_string(), Severity::Success))
        );

        let (reloaded, _) = panel_over(&store);
        assert!(reloaded.savings().eco_mode);
        assert_eq!(reloaded.rooms().get(bedroom).unwrap().brightness.value(), 70);
    }

    #[test]
    fn turning_off_leaves_rooms_alone() {
        let (mut panel, recorder) = panel();
        let before = panel.rooms().clone();

        panel.dispatch(Command::SetEcoMode(false)).unwrap();

        assert_eq!(panel.rooms(), &before);
        assert_eq!(
            recorder.last_notice(),
            Some(("Eco Mode deactivated".to_string(), Severity::Info))
        );
    }

    #[test]
    fn configured_caps_are_used() {
        let recorder = RecordingPresenter::new();
        let config = PanelConfig::new().with_eco_brightness(Brightness::new(50).unwrap());
        let mut panel = ControlPanel::open(config, recorder).unwrap();

        panel.dispatch(Command::SetEcoMode(true)).unwrap();

        let living = room_id(&panel, "Living Room");
        assert_eq!(panel.rooms().get(living).unwrap().brightness.value(), 50);
    }
}

// ============================================================================
// Storage and events
// ============================================================================

mod storage {
    use super::*;

    #[test]
    fn directory_storage_survives_restart() {
        let dir = std::env::temp_dir().join(format!("lightpanel-panel-{}", uuid::Uuid::new_v4()));
        let config = PanelConfig::new().with_storage(StorageConfig::Directory(dir.clone()));

        {
            let mut panel = ControlPanel::open(config.clone(), RecordingPresenter::new()).unwrap();
            room(&mut panel, RoomCommand::Add("Attic".to_string()));
            panel.dispatch(Command::SetEcoMode(true)).unwrap();
        }

        let panel = ControlPanel::open(config, RecordingPresenter::new()).unwrap();
        assert!(panel.rooms().find_by_slug("attic").is_some());
        assert!(panel.savings().eco_mode);
        assert!(dir.join("rooms.json").is_file());
        assert!(dir.join("savings.json").is_file());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn corrupt_records_fall_back_to_defaults() {
        let store = MemoryStore::new();
        store.save_raw("rooms", "not json").unwrap();
        store.save_raw("schedule", "{").unwrap();

        let (panel, _) = panel_over(&store);
        assert_eq!(panel.rooms().len(), 2);
        assert!(panel.schedule().committed().is_empty());
    }

    #[test]
    fn without_default_rooms() {
        let config = PanelConfig::new().without_default_rooms();
        let panel = ControlPanel::open(config, RecordingPresenter::new()).unwrap();
        assert!(panel.rooms().is_empty());
    }
}

mod events {
    use super::*;

    #[tokio::test]
    async fn panel_publishes_changes_in_order() {
        let (mut panel, _) = panel();
        let mut rx = panel.subscribe();

        navigate(&mut panel, View::Schedule);
        schedule(
            &mut panel,
            ScheduleCommand::AddSlot(row("Tuesday", "06:00", "07:00", "Productivity")),
        );
        schedule(&mut panel, ScheduleCommand::Save);
        panel.dispatch(Command::SetEcoMode(true)).unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            PanelEvent::ViewChanged {
                from: View::Home,
                to: View::Schedule
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            PanelEvent::ScheduleCommitted { slots: 1 }
        );
        assert!(matches!(
            rx.recv().await.unwrap(),
            PanelEvent::EcoModeChanged { enabled: true, .. }
        ));
    }

    #[tokio::test]
    async fn discard_on_navigation_is_published() {
        let (mut panel, _) = panel();
        navigate(&mut panel, View::Schedule);
        let mut rx = panel.subscribe();

        schedule(&mut panel, ScheduleCommand::ClearAll);
        respond(&mut panel, PromptChoice::Confirm);
        navigate(&mut panel, View::Home);
        respond(&mut panel, PromptChoice::Confirm);

        assert_eq!(rx.recv().await.unwrap(), PanelEvent::ScheduleDiscarded);
        assert_eq!(
            rx.recv().await.unwrap(),
            PanelEvent::ViewChanged {
                from: View::Schedule,
                to: View::Home
            }
        );
    }
}
