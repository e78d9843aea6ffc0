//! Payloads exchanged with a submission gateway

use crate::forms::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// One completed form, as handed to the gateway
///
/// A retry after a failed attempt reuses the same `id`, so a remote endpoint
/// can recognise duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    /// Form identifier, e.g. `event-registration`
    pub form: String,
    pub submitted_at: DateTime<Utc>,
    pub values: BTreeMap<String, FieldValue>,
}

impl Submission {
    pub fn new(form: &str, values: BTreeMap<String, FieldValue>) -> Self {
        Self {
            id: Uuid::new_v4(),
            form: form.to_string(),
            submitted_at: Utc::now(),
            values,
        }
    }

    /// Short human-friendly reference derived from the id
    pub fn short_reference(&self) -> String {
        let simple = self.id.simple().to_string();
        simple[..8].to_uppercase()
    }
}

/// Acknowledgement of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub reference: String,
    pub received_at: DateTime<Utc>,
}

/// Why a gateway could not deliver a submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitFailure {
    #[error("could not reach the server: {0}")]
    NetworkError(String),
    #[error("the server rejected the submission: {0}")]
    RejectedByServer(String),
}
