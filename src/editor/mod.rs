//! Inline field editor: descriptor resolution, height canonicalization and
//! the per-field edit/value/list state owned by one form.

pub mod descriptor;
pub mod height;
pub mod options;
pub mod resolve;
pub mod store;

pub use descriptor::{FieldDescriptor, FieldType};
pub use options::OptionsTable;
pub use store::{FieldEditorStore, FieldSlot, FieldValue, FormMode, ProfileSnapshot};
