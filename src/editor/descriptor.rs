use serde::{Deserialize, Serialize};

pub const TOKEN_SEPARATOR: &str = ", ";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "radio")]
    Radio,
    #[serde(rename = "checkbox")]
    Checkbox,
    #[serde(rename = "textarea")]
    Textarea,
    #[serde(rename = "listInput", alias = "list_input", alias = "list")]
    ListInput,
}

impl FieldType {
    pub fn value_kind(self) -> ValueKind {
        match self {
            FieldType::ListInput => ValueKind::List,
            _ => ValueKind::Scalar,
        }
    }
}

/// Selects the value store and renderer used for a field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    List,
}

/// Schema for one editable profile attribute.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, rename = "type")]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub options: Vec<String>,
}

#[allow(dead_code)]
impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            value: value.into(),
            field_type: None,
            options: Vec::new(),
        }
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}

/// Splits a stored list value into tokens. An empty string has no tokens.
pub fn split_tokens(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(TOKEN_SEPARATOR).map(|s| s.to_string()).collect()
}

pub fn join_tokens(tokens: &[String]) -> String {
    tokens.join(TOKEN_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_order_and_count() {
        let toks = split_tokens("English, Kurdish, Arabic");
        assert_eq!(toks, vec!["English", "Kurdish", "Arabic"]);
        assert!(split_tokens("").is_empty());
        assert_eq!(join_tokens(&toks), "English, Kurdish, Arabic");
    }

    #[test]
    fn field_type_uses_camel_case_list_input() {
        let d: FieldDescriptor = serde_yaml::from_str(
            "name: languages\nlabel: Languages\nvalue: English\ntype: listInput\n",
        )
        .unwrap();
        assert_eq!(d.field_type, Some(FieldType::ListInput));
        assert_eq!(d.field_type.unwrap().value_kind(), ValueKind::List);
        assert!(d.options.is_empty());
    }

    #[test]
    fn missing_type_and_options_default() {
        let d: FieldDescriptor = serde_yaml::from_str("name: job\nlabel: Job\n").unwrap();
        assert_eq!(d.field_type, None);
        assert_eq!(d.value, "");
    }
}
