// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the drag action binding table.
//!
//! These exercise resolution, rebinding rules around locked actions, and the
//! export/import path used to persist user overrides.

use peruse_input::{
    ActionBindingTable, BindingError, BindingImportError, ChordParseError, ChordSet,
    DragActionId, ExportedBindings, InputChord, Modifiers, MouseButtons,
};

fn chord(s: &str) -> InputChord {
    s.parse().unwrap()
}

fn resolved(table: &ActionBindingTable, s: &str) -> Option<DragActionId> {
    table.resolve(chord(s)).map(|a| a.id())
}

#[test]
fn every_bound_chord_resolves_to_its_action() {
    let table = ActionBindingTable::new();
    for action in table.iter() {
        for c in action.chords().iter() {
            assert_eq!(table.resolve(c).map(|a| a.id()), Some(action.id()));
        }
    }
}

#[test]
fn unbound_chords_resolve_to_nothing() {
    let table = ActionBindingTable::new();
    assert_eq!(resolved(&table, "XButton1"), None);
    assert_eq!(resolved(&table, "Ctrl+Shift+LeftButton"), None);
    assert_eq!(resolved(&table, "LeftButton+RightButton"), None);
}

#[test]
fn rebinding_locked_gesture_chord_fails_and_keeps_binding() {
    let mut table = ActionBindingTable::new();

    let err = table
        .rebind(DragActionId::Gesture, chord("XButton1").into())
        .unwrap_err();
    assert_eq!(err, BindingError::Locked(DragActionId::Gesture));

    let err = table
        .rebind(DragActionId::Rotate, chord("RightButton").into())
        .unwrap_err();
    assert!(matches!(
        err,
        BindingError::ChordTaken {
            holder: DragActionId::Gesture,
            ..
        }
    ));

    assert_eq!(resolved(&table, "RightButton"), Some(DragActionId::Gesture));
    assert_eq!(resolved(&table, "XButton1"), None);
    assert_eq!(
        table.get(DragActionId::Rotate).chords(),
        &ChordSet::single(InputChord::new(MouseButtons::PRIMARY, Modifiers::SHIFT))
    );
}

#[test]
fn a_chord_is_bound_to_at_most_one_action() {
    let mut table = ActionBindingTable::new();
    table
        .rebind(
            DragActionId::FlipVertical,
            "Alt+LeftButton,Shift+LeftButton".parse().unwrap(),
        )
        .unwrap();

    assert!(table.get(DragActionId::FlipHorizontal).chords().is_empty());
    assert!(table.get(DragActionId::Rotate).chords().is_empty());
    for c in ["Alt+LeftButton", "Shift+LeftButton"] {
        let holders = table
            .iter()
            .filter(|a| a.chords().contains(chord(c)))
            .count();
        assert_eq!(holders, 1, "{c} must have exactly one holder");
    }
}

#[test]
fn unbind_clears_and_reset_restores() {
    let mut table = ActionBindingTable::new();
    table.unbind(DragActionId::WindowMove).unwrap();
    assert_eq!(resolved(&table, "MiddleButton"), None);
    assert_eq!(
        table.unbind(DragActionId::Gesture),
        Err(BindingError::Locked(DragActionId::Gesture))
    );

    table.reset();
    assert_eq!(table, ActionBindingTable::default());
}

#[test]
fn export_lists_only_overrides() {
    let mut table = ActionBindingTable::new();
    table
        .rebind(DragActionId::ScaleSlider, chord("Ctrl+Alt+LeftButton").into())
        .unwrap();
    table.unbind(DragActionId::WindowMove).unwrap();

    let exported = table.export_bindings();
    assert_eq!(exported.len(), 2);
    assert_eq!(
        exported.get(DragActionId::ScaleSlider),
        Some("Ctrl+Alt+LeftButton")
    );
    assert_eq!(exported.get(DragActionId::WindowMove), Some(""));
    assert_eq!(exported.get(DragActionId::Pan), None);
}

#[test]
fn import_restores_exported_state() {
    let mut table = ActionBindingTable::new();
    table
        .rebind(DragActionId::ScaledPan, "LeftButton,XButton2".parse().unwrap())
        .unwrap();
    table
        .rebind(DragActionId::RotateSlider, chord("Shift+LeftButton").into())
        .unwrap();
    let exported = table.export_bindings();

    let json = serde_json::to_string(&exported).unwrap();
    let restored: ExportedBindings = serde_json::from_str(&json).unwrap();

    let mut fresh = ActionBindingTable::new();
    let errors = fresh.import_bindings(&restored);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(fresh, table);
}

#[test]
fn import_reports_bad_entries_without_aborting() {
    let mut stored = ExportedBindings::new();
    stored.insert(DragActionId::Scale, "Ctrl+Hyper");
    stored.insert(DragActionId::Gesture, "MiddleButton");
    stored.insert(DragActionId::FlipVertical, "XButton1");

    let mut table = ActionBindingTable::new();
    let errors = table.import_bindings(&stored);

    assert_eq!(errors.len(), 2);
    assert!(errors.contains(&BindingImportError::Parse {
        id: DragActionId::Scale,
        source: ChordParseError::UnknownToken("Hyper".into()),
    }));
    assert!(errors.contains(&BindingImportError::Rejected {
        id: DragActionId::Gesture,
        source: BindingError::Locked(DragActionId::Gesture),
    }));

    // Malformed entry leaves the action unbound; good entries still apply.
    assert!(table.get(DragActionId::Scale).chords().is_empty());
    assert_eq!(resolved(&table, "RightButton"), Some(DragActionId::Gesture));
    assert_eq!(resolved(&table, "XButton1"), Some(DragActionId::FlipVertical));
}

#[test]
fn exported_bindings_serialize_as_a_name_map() {
    let mut stored = ExportedBindings::new();
    stored.insert(DragActionId::Rotate, "Shift+LeftButton,XButton1");
    let json = serde_json::to_value(&stored).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "Rotate": "Shift+LeftButton,XButton1" })
    );
}
