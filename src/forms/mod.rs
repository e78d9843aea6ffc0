//! Form domain layer
//!
//! Field declarations, validation, step layout and the session controller
//! shared by every intake form on the site.

mod error;
mod field;
mod form_state;
mod schema;
mod validate;

pub use error::{FormError, SchemaError, ValidationError};
pub use field::{FieldKind, FieldSpec, FieldValue};
pub use form_state::{
    Advance, FormController, FormStatus, Resolution, SubmissionTicket, NOT_PROVIDED,
};
pub use schema::{FormSchema, StepSpec};
pub use validate::validate;
