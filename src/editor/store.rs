use super::descriptor::{join_tokens, split_tokens, FieldDescriptor, ValueKind};
use super::height::canonicalize_height;
use super::options::OptionsTable;
use super::resolve::{resolve, ResolvedField, HEIGHT_FIELD};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Stored string form; list tokens are joined with ", ".
    pub fn to_stored(&self) -> String {
        match self {
            FieldValue::Scalar(s) => s.clone(),
            FieldValue::List(items) => join_tokens(items),
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            FieldValue::Scalar(_) => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FieldSlot {
    pub name: String,
    pub label: String,
    pub resolved: ResolvedField,
    pub editing: bool,
    pub draft: FieldValue,
    pub committed: FieldValue,
    pub pending: String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormMode {
    pub edit_mode: bool,
    pub selection_mode: bool,
}

/// Committed profile values in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileSnapshot {
    pub entries: Vec<(String, String)>,
}

impl ProfileSnapshot {
    #[allow(dead_code)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Serialize for ProfileSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Owns every per-field flag, draft, committed value and pending list input
/// of one form instance.
#[derive(Clone, Debug, Default)]
pub struct FieldEditorStore {
    slots: Vec<FieldSlot>,
    index: HashMap<String, usize>,
    mode: FormMode,
    selected: BTreeSet<String>,
}

impl FieldEditorStore {
    pub fn new(fields: &[FieldDescriptor], table: &OptionsTable) -> Self {
        let mut slots: Vec<FieldSlot> = Vec::with_capacity(fields.len());
        let mut index: HashMap<String, usize> = HashMap::new();
        for desc in fields {
            if index.contains_key(&desc.name) {
                debug!(field = %desc.name, "duplicate field name ignored");
                continue;
            }
            let resolved = resolve(desc, table);
            let initial = match resolved.value_kind() {
                ValueKind::Scalar => {
                    let v = if desc.name == HEIGHT_FIELD {
                        canonicalize_height(&desc.value)
                    } else {
                        desc.value.clone()
                    };
                    FieldValue::Scalar(v)
                }
                ValueKind::List => FieldValue::List(split_tokens(&desc.value)),
            };
            index.insert(desc.name.clone(), slots.len());
            slots.push(FieldSlot {
                name: desc.name.clone(),
                label: desc.label.clone(),
                resolved,
                editing: false,
                draft: initial.clone(),
                committed: initial,
                pending: String::new(),
            });
        }
        Self {
            slots,
            index,
            mode: FormMode::default(),
            selected: BTreeSet::new(),
        }
    }

    pub fn fields(&self) -> &[FieldSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSlot> {
        self.index.get(name).and_then(|&i| self.slots.get(i))
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut FieldSlot> {
        match self.index.get(name) {
            Some(&i) => self.slots.get_mut(i),
            None => {
                debug!(field = name, "unknown field");
                None
            }
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Per-field flag only; unknown names are not editing.
    pub fn is_field_editing(&self, name: &str) -> bool {
        self.field(name).map(|s| s.editing).unwrap_or(false)
    }

    /// Whether the field renders as an editable control.
    pub fn is_rendered_editing(&self, name: &str) -> bool {
        self.mode.edit_mode || self.is_field_editing(name)
    }

    #[allow(dead_code)]
    pub fn draft(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).map(|s| &s.draft)
    }

    #[allow(dead_code)]
    pub fn committed(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).map(|s| &s.committed)
    }

    #[allow(dead_code)]
    pub fn pending(&self, name: &str) -> Option<&str> {
        self.field(name).map(|s| s.pending.as_str())
    }

    pub fn toggle_field_edit(&mut self, name: &str) -> bool {
        if self.mode.edit_mode {
            debug!(field = name, "per-field toggle ignored in form edit mode");
            return false;
        }
        match self.field_mut(name) {
            Some(slot) => {
                slot.editing = !slot.editing;
                true
            }
            None => false,
        }
    }

    /// Commits the draft and leaves edit mode for this field.
    pub fn save_field(&mut self, name: &str) -> bool {
        if self.mode.edit_mode {
            debug!(field = name, "per-field save ignored in form edit mode");
            return false;
        }
        match self.field_mut(name) {
            Some(slot) => {
                slot.committed = slot.draft.clone();
                slot.editing = false;
                true
            }
            None => false,
        }
    }

    /// Drops the draft in favour of the last committed value.
    pub fn discard_field(&mut self, name: &str) -> bool {
        if self.mode.edit_mode {
            debug!(field = name, "per-field discard ignored in form edit mode");
            return false;
        }
        match self.field_mut(name) {
            Some(slot) => {
                slot.draft = slot.committed.clone();
                slot.pending.clear();
                slot.editing = false;
                true
            }
            None => false,
        }
    }

    pub fn change_field(&mut self, name: &str, value: &str) -> bool {
        let Some(slot) = self.field_mut(name) else {
            return false;
        };
        match &mut slot.draft {
            FieldValue::Scalar(cur) => {
                *cur = if slot.name == HEIGHT_FIELD {
                    canonicalize_height(value)
                } else {
                    value.to_string()
                };
                true
            }
            FieldValue::List(_) => {
                debug!(field = name, "scalar change on list field ignored");
                false
            }
        }
    }

    pub fn change_pending_input(&mut self, name: &str, value: &str) -> bool {
        match self.field_mut(name) {
            Some(slot) => {
                slot.pending = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Appends the trimmed pending input. Whitespace-only input changes nothing.
    pub fn add_item(&mut self, name: &str) -> bool {
        let Some(slot) = self.field_mut(name) else {
            return false;
        };
        let item = slot.pending.trim().to_string();
        if item.is_empty() {
            return false;
        }
        match &mut slot.draft {
            FieldValue::List(items) => {
                items.push(item);
                slot.pending.clear();
                true
            }
            FieldValue::Scalar(_) => {
                debug!(field = name, "add_item on scalar field ignored");
                false
            }
        }
    }

    /// Removes the token at `index`; out-of-range indices change nothing.
    pub fn remove_item(&mut self, name: &str, index: usize) -> bool {
        let Some(slot) = self.field_mut(name) else {
            return false;
        };
        match &mut slot.draft {
            FieldValue::List(items) if index < items.len() => {
                items.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn set_edit_mode(&mut self, on: bool) {
        self.mode.edit_mode = on;
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.mode.edit_mode = !self.mode.edit_mode;
        self.mode.edit_mode
    }

    pub fn toggle_selection_mode(&mut self) -> bool {
        self.mode.selection_mode = !self.mode.selection_mode;
        if !self.mode.selection_mode {
            self.selected.clear();
        }
        self.mode.selection_mode
    }

    pub fn toggle_selected(&mut self, name: &str) -> bool {
        if !self.mode.selection_mode || !self.index.contains_key(name) {
            return false;
        }
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
        }
        true
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    pub fn selected_fields(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|s| self.selected.contains(&s.name))
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Form-level save: every draft becomes committed and every flag resets.
    pub fn commit_all(&mut self) {
        for slot in &mut self.slots {
            slot.committed = slot.draft.clone();
            slot.editing = false;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.slots.iter().any(|s| s.draft != s.committed)
    }

    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            entries: self
                .slots
                .iter()
                .map(|s| (s.name.clone(), s.committed.to_stored()))
                .collect(),
        }
    }
}
