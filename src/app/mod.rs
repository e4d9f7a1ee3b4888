use crate::editor::ProfileSnapshot;
use crate::ui::{AppState, ToastLevel};
use tracing::debug;

/// Requests raised by the renderers. The host applies them to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppMsg {
    FieldChange { field: String, value: String },
    AddItem { field: String },
    RemoveItem { field: String, index: usize },
    NewItemChange { field: String, value: String },
    SaveField { field: String },
    ToggleFieldEdit { field: String },
    DiscardField { field: String },
    ToggleEditMode,
    ToggleSelectionMode,
    ToggleSelected { field: String },
    SaveProfile,
    Saved { outcome: Result<String, String> },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    PersistProfile {
        snapshot: ProfileSnapshot,
    },
    ShowToast {
        text: String,
        level: ToastLevel,
        seconds: u64,
    },
}

fn toast(text: impl Into<String>, level: ToastLevel, seconds: u64) -> Effect {
    Effect::ShowToast {
        text: text.into(),
        level,
        seconds,
    }
}

pub fn update(state: &mut AppState, msg: AppMsg) -> Vec<Effect> {
    use AppMsg::*;
    let mut effects: Vec<Effect> = Vec::new();
    debug!(?msg, "update");
    match msg {
        FieldChange { field, value } => {
            state.store.change_field(&field, &value);
        }
        AddItem { field } => {
            state.store.add_item(&field);
        }
        RemoveItem { field, index } => {
            state.store.remove_item(&field, index);
        }
        NewItemChange { field, value } => {
            state.store.change_pending_input(&field, &value);
        }
        SaveField { field } => {
            if state.store.save_field(&field) {
                let label = state
                    .store
                    .field(&field)
                    .map(|s| s.label.clone())
                    .unwrap_or_else(|| field.clone());
                if state.autosave && state.saving {
                    state.save_queued = true;
                    effects.push(toast(
                        format!("{label} updated, save queued"),
                        ToastLevel::Info,
                        2,
                    ));
                } else if state.autosave {
                    state.saving = true;
                    state.status_text = Some(format!("Saving {label}..."));
                    effects.push(Effect::PersistProfile {
                        snapshot: state.store.snapshot(),
                    });
                } else {
                    effects.push(toast(format!("{label} updated"), ToastLevel::Info, 2));
                }
            }
        }
        ToggleFieldEdit { field } => {
            state.store.toggle_field_edit(&field);
        }
        DiscardField { field } => {
            state.store.discard_field(&field);
        }
        ToggleEditMode => {
            let on = state.store.toggle_edit_mode();
            let text = if on { "Edit mode on" } else { "Edit mode off" };
            effects.push(toast(text, ToastLevel::Info, 2));
        }
        ToggleSelectionMode => {
            let on = state.store.toggle_selection_mode();
            let text = if on {
                "Selection mode on"
            } else {
                "Selection mode off"
            };
            effects.push(toast(text, ToastLevel::Info, 2));
        }
        ToggleSelected { field } => {
            state.store.toggle_selected(&field);
        }
        SaveProfile => {
            state.store.commit_all();
            state.store.set_edit_mode(false);
            if state.saving {
                state.save_queued = true;
                effects.push(toast("Save queued", ToastLevel::Info, 2));
            } else {
                state.saving = true;
                state.status_text = Some("Saving...".into());
                effects.push(Effect::PersistProfile {
                    snapshot: state.store.snapshot(),
                });
            }
        }
        Saved { outcome } => {
            state.saving = false;
            state.status_text = None;
            match outcome {
                Ok(text) => {
                    state.last_error = None;
                    effects.push(toast(text, ToastLevel::Success, 3));
                }
                Err(err) => {
                    state.last_error = Some(err.clone());
                    effects.push(toast(err, ToastLevel::Error, 5));
                }
            }
            // Commits made during the finished save still need persisting
            if std::mem::take(&mut state.save_queued) {
                debug!("persisting queued save");
                state.saving = true;
                state.status_text = Some("Saving...".into());
                effects.push(Effect::PersistProfile {
                    snapshot: state.store.snapshot(),
                });
            }
        }
    }
    effects
}

#[cfg(test)]
mod tests;
