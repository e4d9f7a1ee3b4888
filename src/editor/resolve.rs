use super::descriptor::{FieldDescriptor, FieldType, ValueKind};
use super::height::{canonicalize_height, is_imperial};
use super::options::OptionsTable;

pub const HEIGHT_FIELD: &str = "height";

/// Effective control type and choices for a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedField {
    pub kind: FieldType,
    pub options: Vec<String>,
}

impl ResolvedField {
    pub fn value_kind(&self) -> ValueKind {
        self.kind.value_kind()
    }

    /// Position of `value` in the option list, if present.
    pub fn option_index(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o == value)
    }
}

pub fn resolve(desc: &FieldDescriptor, table: &OptionsTable) -> ResolvedField {
    let table_opts = table.get(&desc.name);
    let kind = match desc.field_type {
        Some(t) => t,
        None if !desc.options.is_empty() => FieldType::Select,
        None if table_opts.is_some() => FieldType::Select,
        None => FieldType::Text,
    };
    let mut options: Vec<String> = if !desc.options.is_empty() {
        desc.options.clone()
    } else {
        table_opts.map(|o| o.to_vec()).unwrap_or_default()
    };
    if desc.name == HEIGHT_FIELD {
        options = options
            .into_iter()
            .map(|o| {
                if is_imperial(&o) {
                    canonicalize_height(&o)
                } else {
                    o
                }
            })
            .collect();
    }
    ResolvedField { kind, options }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn empty_table() -> OptionsTable {
        OptionsTable::from_entries(HashMap::new())
    }

    #[test]
    fn explicit_type_wins() {
        let d = FieldDescriptor::new("smoking", "Smoking", "Never").with_type(FieldType::Radio);
        let r = resolve(&d, &OptionsTable::builtin());
        assert_eq!(r.kind, FieldType::Radio);
        assert_eq!(r.options[0], "Never");
    }

    #[test]
    fn table_lookup_makes_select() {
        let d = FieldDescriptor::new("drinking", "Drinking", "");
        let r = resolve(&d, &OptionsTable::builtin());
        assert_eq!(r.kind, FieldType::Select);
        assert_eq!(r.options, OptionsTable::builtin().get("drinking").unwrap());
    }

    #[test]
    fn falls_back_to_text() {
        let d = FieldDescriptor::new("nickname", "Nickname", "Jo");
        let r = resolve(&d, &empty_table());
        assert_eq!(r.kind, FieldType::Text);
        assert!(r.options.is_empty());
    }

    #[test]
    fn descriptor_options_take_precedence_over_table() {
        let d = FieldDescriptor::new("smoking", "Smoking", "").with_options(["No", "Yes"]);
        let r = resolve(&d, &OptionsTable::builtin());
        assert_eq!(r.kind, FieldType::Select);
        assert_eq!(r.options, vec!["No", "Yes"]);
    }

    #[test]
    fn height_with_table_resolves_to_cm_select_but_keeps_value() {
        let d = FieldDescriptor::new("height", "Height", "5'10\"");
        let r = resolve(&d, &OptionsTable::builtin());
        assert_eq!(r.kind, FieldType::Select);
        assert!(r.options.iter().all(|o| o.ends_with(" cm")));
        assert_eq!(d.value, "5'10\"");
    }

    #[test]
    fn height_options_run_through_canonicalization() {
        let d = FieldDescriptor::new("height", "Height", "")
            .with_options(["170 cm", "5'10\"", "tall"]);
        let r = resolve(&d, &empty_table());
        assert_eq!(r.options, vec!["170 cm", "5'10\"", "tall"]);
    }

    proptest! {
        #[test]
        fn non_empty_options_without_type_is_select(
            name in "[a-zA-Z]{1,12}",
            opts in proptest::collection::vec("[a-zA-Z ]{1,10}", 1..8),
        ) {
            let d = FieldDescriptor::new(name, "L", "").with_options(opts);
            prop_assert_eq!(resolve(&d, &OptionsTable::builtin()).kind, FieldType::Select);
        }
    }
}
