//! Error taxonomy for the form engine

use super::form_state::FormStatus;
use thiserror::Error;

/// Field-level validation failures, surfaced next to the offending input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("this field is required")]
    MissingValue,
    #[error("{0}")]
    InvalidFormat(String),
    #[error("'{value}' is not one of the available options")]
    InvalidChoice { value: String },
}

/// Controller-level failures; none of them changes the session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form has no field named '{0}'")]
    UnknownField(String),
    #[error("step {index} is out of range (form has {count} steps)")]
    StepOutOfRange { index: usize, count: usize },
    #[error("already at the first step")]
    AtFirstStep,
    #[error("field '{field}' expects a {expected} value, got {got}")]
    WrongValueKind {
        field: String,
        expected: &'static str,
        got: &'static str,
    },
    #[error("cannot {operation} while the form is {status}")]
    InvalidState {
        operation: &'static str,
        status: FormStatus,
    },
}

/// Problems with a form declaration, caught when the schema is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("form declares no steps")]
    NoSteps,
    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),
    #[error("select field '{0}' has no options")]
    EmptyChoices(String),
    #[error("field '{0}' is not placed in any step")]
    UnassignedField(String),
    #[error("field '{0}' is placed in more than one step")]
    FieldInSeveralSteps(String),
    #[error("step {step} references undeclared field '{field}'")]
    UnknownStepField { step: usize, field: String },
    #[error("step {0} has no fields")]
    EmptyStep(usize),
}
