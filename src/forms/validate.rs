//! Field validation
//!
//! Pure checks of one value against one field declaration. The controller
//! only calls these when the user advances a step.

use super::error::ValidationError;
use super::field::{FieldKind, FieldSpec, FieldValue};
use regex::Regex;
use std::sync::LazyLock;

/// `local@domain.tld`, no whitespace, at least one dot after the `@`
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is valid")
});

/// Validate a value against its field declaration
///
/// A missing value is treated like the field's empty value. Optional fields
/// that are empty always pass.
pub fn validate(spec: &FieldSpec, value: Option<&FieldValue>) -> Result<(), ValidationError> {
    let empty = spec.empty_value();
    let value = value.unwrap_or(&empty);

    if value.is_empty() {
        return if spec.required {
            Err(ValidationError::MissingValue)
        } else {
            Ok(())
        };
    }

    match (spec.kind, value) {
        (FieldKind::Email, FieldValue::Text(s)) => {
            if EMAIL_SHAPE.is_match(s) {
                Ok(())
            } else {
                Err(ValidationError::InvalidFormat(
                    "enter an address like name@example.com".to_string(),
                ))
            }
        }
        (FieldKind::Select, FieldValue::Text(s)) => check_choice(spec, s),
        (FieldKind::Checkbox, FieldValue::Choices(set)) => {
            set.iter().try_for_each(|choice| check_choice(spec, choice))
        }
        _ => Ok(()),
    }
}

fn check_choice(spec: &FieldSpec, value: &str) -> Result<(), ValidationError> {
    if spec.allowed_values.iter().any(|v| v == value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidChoice {
            value: value.to_string(),
        })
    }
}
