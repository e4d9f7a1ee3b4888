use crate::app::AppMsg;
use crate::editor::{FieldEditorStore, FieldSlot, FieldType, FieldValue};
use crate::widgets::form::{checkbox_checked, draw_form};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use tui_textarea::TextArea;

/// Focus and cursor state for the profile form. Reads the store, never
/// writes it: every change leaves as an [`AppMsg`].
pub struct FormWidget {
    pub selected: usize,
    pub item_cursor: usize,
    textarea: Option<(String, TextArea<'static>)>,
}

impl FormWidget {
    pub fn new() -> Self {
        Self {
            selected: 0,
            item_cursor: 0,
            textarea: None,
        }
    }

    pub fn focused<'a>(&self, store: &'a FieldEditorStore) -> Option<&'a FieldSlot> {
        store.fields().get(self.selected)
    }

    fn focused_editing<'a>(&self, store: &'a FieldEditorStore) -> Option<&'a FieldSlot> {
        self.focused(store)
            .filter(|slot| store.is_rendered_editing(&slot.name))
    }

    /// True when printable keys belong to the focused input rather than to
    /// global shortcuts.
    pub fn captures_input(&self, store: &FieldEditorStore) -> bool {
        matches!(
            self.focused_editing(store).map(|s| s.resolved.kind),
            Some(FieldType::Text | FieldType::Textarea | FieldType::ListInput)
        )
    }

    pub fn textarea_editing(&self, store: &FieldEditorStore) -> bool {
        matches!(
            self.focused_editing(store).map(|s| s.resolved.kind),
            Some(FieldType::Textarea)
        )
    }

    /// Loads the focused textarea draft into the editor buffer on entry and
    /// drops the buffer once the field stops editing.
    fn sync_textarea(&mut self, store: &FieldEditorStore) {
        let Some(slot) = self.focused_editing(store) else {
            self.textarea = None;
            return;
        };
        if slot.resolved.kind != FieldType::Textarea {
            self.textarea = None;
            return;
        }
        let fresh = self
            .textarea
            .as_ref()
            .map(|(name, _)| name != &slot.name)
            .unwrap_or(true);
        if fresh {
            let text = slot.draft.as_scalar().unwrap_or_default();
            let lines: Vec<String> = if text.is_empty() {
                vec![String::new()]
            } else {
                text.split('\n').map(|l| l.to_string()).collect()
            };
            let mut ta = TextArea::new(lines);
            ta.move_cursor(tui_textarea::CursorMove::Bottom);
            ta.move_cursor(tui_textarea::CursorMove::End);
            self.textarea = Some((slot.name.clone(), ta));
        }
    }

    fn clamp(&mut self, store: &FieldEditorStore) {
        self.selected = self.selected.min(store.len().saturating_sub(1));
        let items = self
            .focused(store)
            .and_then(|s| s.draft.as_list())
            .map(|l| l.len())
            .unwrap_or(0);
        self.item_cursor = self.item_cursor.min(items.saturating_sub(1));
    }

    fn move_focus(&mut self, store: &FieldEditorStore, down: bool) {
        if store.is_empty() {
            return;
        }
        if down {
            if self.selected + 1 < store.len() {
                self.selected += 1;
            }
        } else if self.selected > 0 {
            self.selected -= 1;
        }
        self.item_cursor = 0;
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, title: &str, store: &FieldEditorStore, tick: u64) {
        self.clamp(store);
        self.sync_textarea(store);
        let overlay = self.textarea.is_some();
        let cursor_on = tick % 2 == 0 && !overlay;
        draw_form(f, area, title, store, self.selected, self.item_cursor, cursor_on);
        if let (Some((_, ta)), Some(slot)) = (self.textarea.as_mut(), store.fields().get(self.selected)) {
            let hint = if store.mode().edit_mode {
                format!("Editing: {} — Esc Leave edit mode", slot.label)
            } else {
                format!("Editing: {} — Ctrl+S Save • Esc Cancel", slot.label)
            };
            ta.set_block(
                ratatui::widgets::Block::default()
                    .borders(ratatui::widgets::Borders::ALL)
                    .border_style(crate::theme::border_focused())
                    .title(hint),
            );
            let rect = centered_rect(80, 60, area);
            f.render_widget(ratatui::widgets::Clear, rect);
            f.render_widget(&*ta, rect);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, store: &FieldEditorStore) -> Vec<AppMsg> {
        self.clamp(store);
        self.sync_textarea(store);
        let Some(slot) = self.focused(store) else {
            return Vec::new();
        };
        let field = slot.name.clone();
        let mode = store.mode();
        if !store.is_rendered_editing(&field) {
            return self.on_key_viewing(key, store, &field);
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        // Esc leaves the field (or the form-level edit mode)
        if key.code == KeyCode::Esc {
            return if mode.edit_mode {
                vec![AppMsg::ToggleEditMode]
            } else {
                vec![AppMsg::DiscardField { field }]
            };
        }
        match (slot.resolved.kind, &slot.draft) {
            (FieldType::Textarea, _) => {
                if ctrl && key.code == KeyCode::Char('s') {
                    return if mode.edit_mode {
                        vec![AppMsg::SaveProfile]
                    } else {
                        vec![AppMsg::SaveField { field }]
                    };
                }
                let Some((_, ta)) = self.textarea.as_mut() else {
                    return Vec::new();
                };
                if ta.input(key) {
                    vec![AppMsg::FieldChange {
                        field,
                        value: ta.lines().join("\n"),
                    }]
                } else {
                    Vec::new()
                }
            }
            (_, FieldValue::List(items)) => {
                let pending = slot.pending.clone();
                match key.code {
                    KeyCode::Enter => {
                        if !pending.trim().is_empty() {
                            vec![AppMsg::AddItem { field }]
                        } else if !mode.edit_mode {
                            vec![AppMsg::SaveField { field }]
                        } else {
                            Vec::new()
                        }
                    }
                    KeyCode::Backspace => {
                        if pending.is_empty() {
                            return Vec::new();
                        }
                        let mut v = pending;
                        v.pop();
                        vec![AppMsg::NewItemChange { field, value: v }]
                    }
                    KeyCode::Delete => {
                        if items.is_empty() {
                            return Vec::new();
                        }
                        let index = self.item_cursor;
                        if self.item_cursor + 1 >= items.len() {
                            self.item_cursor = self.item_cursor.saturating_sub(1);
                        }
                        vec![AppMsg::RemoveItem { field, index }]
                    }
                    KeyCode::Left => {
                        self.item_cursor = self.item_cursor.saturating_sub(1);
                        Vec::new()
                    }
                    KeyCode::Right => {
                        if self.item_cursor + 1 < items.len() {
                            self.item_cursor += 1;
                        }
                        Vec::new()
                    }
                    KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab => {
                        self.navigate(key.code, store)
                    }
                    KeyCode::Char(c) if !ctrl => {
                        let mut v = pending;
                        v.push(c);
                        vec![AppMsg::NewItemChange { field, value: v }]
                    }
                    _ => Vec::new(),
                }
            }
            (FieldType::Select | FieldType::Radio, FieldValue::Scalar(cur)) => {
                let opts = &slot.resolved.options;
                match key.code {
                    KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                        if opts.is_empty() {
                            return Vec::new();
                        }
                        let forward = matches!(key.code, KeyCode::Right | KeyCode::Char('l'));
                        let next = match (slot.resolved.option_index(cur), forward) {
                            (Some(i), true) => (i + 1) % opts.len(),
                            (Some(0), false) => opts.len() - 1,
                            (Some(i), false) => i - 1,
                            (None, true) => 0,
                            (None, false) => opts.len() - 1,
                        };
                        vec![AppMsg::FieldChange {
                            field,
                            value: opts[next].clone(),
                        }]
                    }
                    KeyCode::Enter if !mode.edit_mode => vec![AppMsg::SaveField { field }],
                    _ => self.navigate(key.code, store),
                }
            }
            (FieldType::Checkbox, FieldValue::Scalar(cur)) => match key.code {
                KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                    let next = if checkbox_checked(cur) { "false" } else { "true" };
                    vec![AppMsg::FieldChange {
                        field,
                        value: next.to_string(),
                    }]
                }
                KeyCode::Enter if !mode.edit_mode => vec![AppMsg::SaveField { field }],
                _ => self.navigate(key.code, store),
            },
            (_, FieldValue::Scalar(cur)) => match key.code {
                KeyCode::Enter if !mode.edit_mode => vec![AppMsg::SaveField { field }],
                KeyCode::Backspace => {
                    let mut v = cur.clone();
                    if v.pop().is_none() {
                        return Vec::new();
                    }
                    vec![AppMsg::FieldChange { field, value: v }]
                }
                KeyCode::Char(c) if !ctrl => {
                    let mut v = cur.clone();
                    v.push(c);
                    vec![AppMsg::FieldChange { field, value: v }]
                }
                _ => self.navigate(key.code, store),
            },
        }
    }

    fn on_key_viewing(&mut self, key: KeyEvent, store: &FieldEditorStore, field: &str) -> Vec<AppMsg> {
        let mode = store.mode();
        match key.code {
            KeyCode::Char(' ') if mode.selection_mode => vec![AppMsg::ToggleSelected {
                field: field.to_string(),
            }],
            KeyCode::Enter | KeyCode::Char('e') if !mode.edit_mode && !mode.selection_mode => {
                vec![AppMsg::ToggleFieldEdit {
                    field: field.to_string(),
                }]
            }
            KeyCode::Char('j') => self.navigate(KeyCode::Down, store),
            KeyCode::Char('k') => self.navigate(KeyCode::Up, store),
            code => self.navigate(code, store),
        }
    }

    fn navigate(&mut self, code: KeyCode, store: &FieldEditorStore) -> Vec<AppMsg> {
        match code {
            KeyCode::Up | KeyCode::BackTab => self.move_focus(store, false),
            KeyCode::Down | KeyCode::Tab => self.move_focus(store, true),
            KeyCode::Home => {
                self.selected = 0;
                self.item_cursor = 0;
            }
            KeyCode::End => {
                self.selected = store.len().saturating_sub(1);
                self.item_cursor = 0;
            }
            _ => {}
        }
        Vec::new()
    }
}

impl Default for FormWidget {
    fn default() -> Self {
        Self::new()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
