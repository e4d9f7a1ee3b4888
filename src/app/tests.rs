use super::*;
use crate::editor::{FieldDescriptor, FieldEditorStore, FieldType, OptionsTable};

fn state() -> AppState {
    let fields = vec![
        FieldDescriptor::new("nickname", "Nickname", "Jo"),
        FieldDescriptor::new("height", "Height", "5'10\""),
        FieldDescriptor::new("languages", "Languages", "English, Kurdish, Arabic")
            .with_type(FieldType::ListInput),
    ];
    AppState {
        title: "Profile".into(),
        store: FieldEditorStore::new(&fields, &OptionsTable::builtin()),
        ..Default::default()
    }
}

fn msg_field(f: &str) -> String {
    f.to_string()
}

#[test]
fn callbacks_drive_list_editor() {
    let mut st = state();
    let _ = update(
        &mut st,
        AppMsg::NewItemChange {
            field: msg_field("languages"),
            value: "  French  ".into(),
        },
    );
    let _ = update(
        &mut st,
        AppMsg::AddItem {
            field: msg_field("languages"),
        },
    );
    assert_eq!(
        st.store.draft("languages").map(|v| v.to_stored()).as_deref(),
        Some("English, Kurdish, Arabic, French")
    );
    assert_eq!(st.store.pending("languages"), Some(""));
    let _ = update(
        &mut st,
        AppMsg::RemoveItem {
            field: msg_field("languages"),
            index: 0,
        },
    );
    assert_eq!(
        st.store.draft("languages").map(|v| v.to_stored()).as_deref(),
        Some("Kurdish, Arabic, French")
    );
}

#[test]
fn save_field_without_autosave_only_toasts() {
    let mut st = state();
    let _ = update(
        &mut st,
        AppMsg::ToggleFieldEdit {
            field: msg_field("nickname"),
        },
    );
    let _ = update(
        &mut st,
        AppMsg::FieldChange {
            field: msg_field("nickname"),
            value: "Jay".into(),
        },
    );
    let effects = update(
        &mut st,
        AppMsg::SaveField {
            field: msg_field("nickname"),
        },
    );
    assert!(!st.store.is_field_editing("nickname"));
    assert!(matches!(
        effects.as_slice(),
        [Effect::ShowToast { text, level: ToastLevel::Info, .. }] if text == "Nickname updated"
    ));
    assert!(!st.saving);
}

#[test]
fn save_field_with_autosave_persists_committed_values() {
    let mut st = state();
    st.autosave = true;
    let _ = update(
        &mut st,
        AppMsg::ToggleFieldEdit {
            field: msg_field("height"),
        },
    );
    let _ = update(
        &mut st,
        AppMsg::FieldChange {
            field: msg_field("height"),
            value: "180".into(),
        },
    );
    let effects = update(
        &mut st,
        AppMsg::SaveField {
            field: msg_field("height"),
        },
    );
    match effects.as_slice() {
        [Effect::PersistProfile { snapshot }] => {
            assert_eq!(snapshot.get("height"), Some("180 cm"));
            assert_eq!(snapshot.get("nickname"), Some("Jo"));
        }
        other => panic!("expected PersistProfile, got {other:?}"),
    }
    assert!(st.saving);
    assert_eq!(st.status_text.as_deref(), Some("Saving Height..."));
}

#[test]
fn save_field_ignored_in_form_edit_mode() {
    let mut st = state();
    let _ = update(&mut st, AppMsg::ToggleEditMode);
    assert!(st.store.is_rendered_editing("nickname"));
    let effects = update(
        &mut st,
        AppMsg::SaveField {
            field: msg_field("nickname"),
        },
    );
    assert!(effects.is_empty());
    let _ = update(
        &mut st,
        AppMsg::ToggleFieldEdit {
            field: msg_field("nickname"),
        },
    );
    assert!(!st.store.is_field_editing("nickname"));
}

#[test]
fn save_profile_commits_all_and_leaves_edit_mode() {
    let mut st = state();
    let _ = update(&mut st, AppMsg::ToggleEditMode);
    let _ = update(
        &mut st,
        AppMsg::FieldChange {
            field: msg_field("nickname"),
            value: "Jo B".into(),
        },
    );
    let effects = update(&mut st, AppMsg::SaveProfile);
    assert!(!st.store.mode().edit_mode);
    assert!(!st.store.is_dirty());
    assert!(matches!(effects.as_slice(), [Effect::PersistProfile { .. }]));
    assert_eq!(st.status_text.as_deref(), Some("Saving..."));

    // A second save while the first is in flight waits for it
    let again = update(&mut st, AppMsg::SaveProfile);
    assert!(matches!(again.as_slice(), [Effect::ShowToast { .. }]));
    assert!(st.save_queued);
}

#[test]
fn autosave_during_inflight_save_persists_after_report() {
    let mut st = state();
    st.autosave = true;
    for value in ["First", "Second"] {
        let _ = update(
            &mut st,
            AppMsg::ToggleFieldEdit {
                field: msg_field("nickname"),
            },
        );
        let _ = update(
            &mut st,
            AppMsg::FieldChange {
                field: msg_field("nickname"),
                value: value.into(),
            },
        );
        let effects = update(
            &mut st,
            AppMsg::SaveField {
                field: msg_field("nickname"),
            },
        );
        if value == "First" {
            assert!(matches!(effects.as_slice(), [Effect::PersistProfile { .. }]));
        } else {
            assert!(matches!(effects.as_slice(), [Effect::ShowToast { .. }]));
        }
    }
    assert!(st.save_queued);

    let effects = update(
        &mut st,
        AppMsg::Saved {
            outcome: Ok("Saved to out.yaml".into()),
        },
    );
    let persisted: Vec<&ProfileSnapshot> = effects
        .iter()
        .filter_map(|e| match e {
            Effect::PersistProfile { snapshot } => Some(snapshot),
            _ => None,
        })
        .collect();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].get("nickname"), Some("Second"));
    assert!(st.saving);
    assert!(!st.save_queued);

    // The follow-up report finishes with nothing left to send
    let effects = update(
        &mut st,
        AppMsg::Saved {
            outcome: Ok("Saved to out.yaml".into()),
        },
    );
    assert!(!st.saving);
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::PersistProfile { .. })));
}

#[test]
fn saved_outcomes_become_toasts() {
    let mut st = state();
    st.saving = true;
    st.status_text = Some("Saving...".into());
    let ok = update(
        &mut st,
        AppMsg::Saved {
            outcome: Ok("Saved to out.yaml".into()),
        },
    );
    assert!(!st.saving);
    assert!(st.status_text.is_none());
    assert!(matches!(
        ok.as_slice(),
        [Effect::ShowToast { level: ToastLevel::Success, .. }]
    ));
    let err = update(
        &mut st,
        AppMsg::Saved {
            outcome: Err("disk full".into()),
        },
    );
    assert_eq!(st.last_error.as_deref(), Some("disk full"));
    assert!(matches!(
        err.as_slice(),
        [Effect::ShowToast { level: ToastLevel::Error, .. }]
    ));
}

#[test]
fn discard_restores_committed_draft() {
    let mut st = state();
    let _ = update(
        &mut st,
        AppMsg::ToggleFieldEdit {
            field: msg_field("nickname"),
        },
    );
    let _ = update(
        &mut st,
        AppMsg::FieldChange {
            field: msg_field("nickname"),
            value: "Zed".into(),
        },
    );
    let _ = update(
        &mut st,
        AppMsg::DiscardField {
            field: msg_field("nickname"),
        },
    );
    assert_eq!(
        st.store.draft("nickname").and_then(|v| v.as_scalar()),
        Some("Jo")
    );
    assert!(!st.store.is_field_editing("nickname"));
}

#[test]
fn selection_messages_toggle_marks() {
    let mut st = state();
    let _ = update(&mut st, AppMsg::ToggleSelectionMode);
    let _ = update(
        &mut st,
        AppMsg::ToggleSelected {
            field: msg_field("height"),
        },
    );
    assert_eq!(st.store.selected_fields(), vec!["height"]);
    let _ = update(&mut st, AppMsg::ToggleSelectionMode);
    assert!(st.store.selected_fields().is_empty());
}

#[test]
fn unknown_field_messages_are_ignored() {
    let mut st = state();
    for msg in [
        AppMsg::ToggleFieldEdit {
            field: msg_field("ghost"),
        },
        AppMsg::SaveField {
            field: msg_field("ghost"),
        },
        AppMsg::AddItem {
            field: msg_field("ghost"),
        },
        AppMsg::RemoveItem {
            field: msg_field("ghost"),
            index: 3,
        },
    ] {
        assert!(update(&mut st, msg).is_empty());
    }
    assert!(!st.store.is_dirty());
}
