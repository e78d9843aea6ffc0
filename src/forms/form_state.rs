//! Form session state and the controller that drives it

use super::error::{FormError, ValidationError};
use super::field::{FieldKind, FieldSpec, FieldValue};
use super::schema::FormSchema;
use super::validate::validate;
use crate::gateway::{Receipt, Submission, SubmissionGateway, SubmitFailure};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Shown in summaries for optional fields left blank
pub const NOT_PROVIDED: &str = "Not provided";

/// Where a form session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Editing,
    Submitting,
    Submitted,
    Failed,
}

impl FormStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Editing => "editing",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Handle for one gateway attempt
///
/// The ticket remembers the session generation that issued it. Resetting the
/// session or starting another attempt makes older tickets stale.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    generation: u64,
    submission: Submission,
}

impl SubmissionTicket {
    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of `FormController::advance`
#[derive(Debug, Clone)]
pub enum Advance {
    /// Current step has invalid fields; nothing moved
    Invalid(BTreeMap<String, ValidationError>),
    /// Moved to the given step
    Step(usize),
    /// Entered `Submitting`; deliver the ticket's submission to a gateway
    Submit(SubmissionTicket),
}

/// Result of applying a gateway outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied(FormStatus),
    /// The ticket no longer matches the session; nothing changed
    Discarded,
}

/// Owns the values, step and status of one form interaction
#[derive(Debug, Clone)]
pub struct FormController {
    schema: Arc<FormSchema>,
    values: BTreeMap<String, FieldValue>,
    current_step: usize,
    status: FormStatus,
    errors: BTreeMap<String, ValidationError>,
    generation: u64,
    /// Submission in flight, or the failed one kept for retry
    pending: Option<Submission>,
    receipt: Option<Receipt>,
    failure: Option<SubmitFailure>,
}

impl FormController {
    pub fn new(schema: impl Into<Arc<FormSchema>>) -> Self {
        Self {
            schema: schema.into(),
            values: BTreeMap::new(),
            current_step: 0,
            status: FormStatus::Editing,
            errors: BTreeMap::new(),
            generation: 0,
            pending: None,
            receipt: None,
            failure: None,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        self.schema.step_count()
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 == self.schema.step_count()
    }

    /// True while a gateway call is outstanding
    pub fn is_busy(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Field errors found by the last `advance`
    pub fn errors(&self) -> &BTreeMap<String, ValidationError> {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&ValidationError> {
        self.errors.get(name)
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    pub fn failure(&self) -> Option<&SubmitFailure> {
        self.failure.as_ref()
    }

    /// Fields of the step currently shown
    pub fn current_fields(&self) -> Vec<&FieldSpec> {
        self.schema
            .fields_for_step(self.current_step)
            .unwrap_or_default()
    }

    /// Store a value without validating it
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        let spec = self
            .schema
            .field(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        self.require_editing("edit")?;

        if !spec.accepts(&value) {
            return Err(FormError::WrongValueKind {
                field: name.to_string(),
                expected: spec.empty_value().variant_name(),
                got: value.variant_name(),
            });
        }

        // Addresses are stored the way they will be sent
        let value = match (spec.kind, value) {
            (FieldKind::Email, FieldValue::Text(s)) => FieldValue::Text(s.trim().to_string()),
            (_, value) => value,
        };
        self.values.insert(name.to_string(), value);
        self.errors.remove(name);
        Ok(())
    }

    /// Validate the current step and move forward
    ///
    /// From `Failed` this re-attempts delivery of the retained submission.
    pub fn advance(&mut self) -> Result<Advance, FormError> {
        match self.status {
            FormStatus::Editing => {}
            FormStatus::Failed => return Ok(Advance::Submit(self.retry())),
            status => {
                return Err(FormError::InvalidState {
                    operation: "advance",
                    status,
                })
            }
        }

        let errors: BTreeMap<String, ValidationError> = self
            .schema
            .fields_for_step(self.current_step)?
            .into_iter()
            .filter_map(|spec| {
                validate(spec, self.values.get(&spec.name))
                    .err()
                    .map(|e| (spec.name.clone(), e))
            })
            .collect();

        if !errors.is_empty() {
            tracing::debug!(
                "{} step {} has {} invalid field(s)",
                self.schema.id(),
                self.current_step,
                errors.len()
            );
            self.errors = errors.clone();
            return Ok(Advance::Invalid(errors));
        }

        self.errors.clear();
        if !self.is_last_step() {
            self.current_step += 1;
            tracing::debug!("{} moved to step {}", self.schema.id(), self.current_step);
            return Ok(Advance::Step(self.current_step));
        }

        let submission = Submission::new(self.schema.id(), self.values.clone());
        tracing::info!("Submitting {} ({})", self.schema.id(), submission.id);
        self.pending = Some(submission);
        Ok(Advance::Submit(self.start_attempt()))
    }

    /// Go back one step, keeping every value
    pub fn retreat(&mut self) -> Result<usize, FormError> {
        self.require_editing("go back")?;
        if self.current_step == 0 {
            return Err(FormError::AtFirstStep);
        }
        self.current_step -= 1;
        self.errors.clear();
        Ok(self.current_step)
    }

    /// Clear everything and return to the first step
    ///
    /// Valid in any state. Outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.current_step = 0;
        self.status = FormStatus::Editing;
        self.pending = None;
        self.receipt = None;
        self.failure = None;
        self.generation += 1;
    }

    /// Apply the outcome of a gateway call
    pub fn resolve(
        &mut self,
        ticket: &SubmissionTicket,
        outcome: Result<Receipt, SubmitFailure>,
    ) -> Resolution {
        if ticket.generation != self.generation || self.status != FormStatus::Submitting {
            tracing::warn!(
                "Discarding outcome for {} submission {}: session moved on",
                self.schema.id(),
                ticket.submission.id
            );
            return Resolution::Discarded;
        }

        match outcome {
            Ok(receipt) => {
                tracing::info!(
                    "{} submitted, reference {}",
                    self.schema.id(),
                    receipt.reference
                );
                self.values.clear();
                self.pending = None;
                self.failure = None;
                self.receipt = Some(receipt);
                self.status = FormStatus::Submitted;
            }
            Err(failure) => {
                tracing::warn!("{} submission failed: {failure}", self.schema.id());
                self.failure = Some(failure);
                self.status = FormStatus::Failed;
            }
        }
        Resolution::Applied(self.status)
    }

    /// Advance and, when that starts a submission, deliver it through `gateway`
    pub async fn advance_and_submit(
        &mut self,
        gateway: &dyn SubmissionGateway,
    ) -> Result<FormStatus, FormError> {
        if let Advance::Submit(ticket) = self.advance()? {
            let outcome = gateway.submit(ticket.submission()).await;
            self.resolve(&ticket, outcome);
        }
        Ok(self.status)
    }

    /// Label and display value of every field, for the review panel
    pub fn summary(&self) -> Vec<(String, String)> {
        self.schema
            .fields()
            .iter()
            .map(|spec| {
                let value = self.values.get(&spec.name);
                let display = match value {
                    Some(v) if !v.is_empty() => spec.display_value(Some(v)),
                    _ => NOT_PROVIDED.to_string(),
                };
                (spec.label.clone(), display)
            })
            .collect()
    }

    fn retry(&mut self) -> SubmissionTicket {
        // Values cannot change while failed, so the retained submission is current
        let submission = self
            .pending
            .get_or_insert_with(|| Submission::new(self.schema.id(), self.values.clone()));
        tracing::info!("Retrying {} ({})", submission.form, submission.id);
        self.failure = None;
        self.start_attempt()
    }

    fn start_attempt(&mut self) -> SubmissionTicket {
        self.generation += 1;
        self.status = FormStatus::Submitting;
        SubmissionTicket {
            generation: self.generation,
            submission: self
                .pending
                .clone()
                .unwrap_or_else(|| Submission::new(self.schema.id(), self.values.clone())),
        }
    }

    fn require_editing(&self, operation: &'static str) -> Result<(), FormError> {
        if self.status == FormStatus::Editing {
            Ok(())
        } else {
            Err(FormError::InvalidState {
                operation,
                status: self.status,
            })
        }
    }
}
