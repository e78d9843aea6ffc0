//! Form field declarations and value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The input kinds a form can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Select,
    TextArea,
    Checkbox,
}

impl FieldKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Select => "select",
            Self::TextArea => "textarea",
            Self::Checkbox => "checkbox",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::TextArea)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Choices(BTreeSet<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::Choices(values.into_iter().map(Into::into).collect())
    }

    /// Empty string (after trimming), unchecked flag or empty set
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(b) => !b,
            FieldValue::Choices(set) => set.is_empty(),
        }
    }

    /// Get the text value (returns empty string for non-text values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Flag(_) => "flag",
            FieldValue::Choices(_) => "choices",
        }
    }
}

/// Declaration of a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Options for `Select` fields and checkbox groups, in display order
    pub allowed_values: Vec<String>,
    pub placeholder: Option<String>,
}

impl FieldSpec {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            allowed_values: Vec::new(),
            placeholder: None,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn email(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn phone(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Phone)
    }

    pub fn textarea(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::TextArea)
    }

    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        let mut field = Self::new(name, label, FieldKind::Select);
        field.allowed_values = options.iter().map(|o| o.to_string()).collect();
        field
    }

    /// A single yes/no checkbox
    pub fn checkbox(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    /// A group of checkboxes whose value is the set of ticked options
    pub fn checkbox_group(name: &str, label: &str, options: &[&str]) -> Self {
        let mut field = Self::new(name, label, FieldKind::Checkbox);
        field.allowed_values = options.iter().map(|o| o.to_string()).collect();
        field
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn is_checkbox_group(&self) -> bool {
        self.kind == FieldKind::Checkbox && !self.allowed_values.is_empty()
    }

    /// The value a freshly mounted form holds for this field
    pub fn empty_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Checkbox if self.is_checkbox_group() => FieldValue::Choices(BTreeSet::new()),
            FieldKind::Checkbox => FieldValue::Flag(false),
            _ => FieldValue::Text(String::new()),
        }
    }

    /// Whether `value` has the variant this field stores
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self.kind, self.is_checkbox_group(), value),
            (FieldKind::Checkbox, true, FieldValue::Choices(_))
                | (FieldKind::Checkbox, false, FieldValue::Flag(_))
                | (
                    FieldKind::Text
                        | FieldKind::Email
                        | FieldKind::Phone
                        | FieldKind::Select
                        | FieldKind::TextArea,
                    _,
                    FieldValue::Text(_)
                )
        )
    }

    /// Get the display value for rendering
    pub fn display_value(&self, value: Option<&FieldValue>) -> String {
        match value {
            None => String::new(),
            Some(FieldValue::Text(s)) => s.clone(),
            Some(FieldValue::Flag(true)) => "Yes".to_string(),
            Some(FieldValue::Flag(false)) => "No".to_string(),
            Some(FieldValue::Choices(set)) => set.iter().cloned().collect::<Vec<_>>().join(", "),
        }
    }
}
