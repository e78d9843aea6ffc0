//! Trait abstraction for submission gateways to enable mocking in tests

use super::submission::{Receipt, Submission, SubmitFailure};
use async_trait::async_trait;

/// Performs the actual delivery of a completed form
///
/// One call is one attempt; implementations never retry on their own and are
/// responsible for bounding their own latency.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Deliver a submission
    async fn submit(&self, submission: &Submission) -> Result<Receipt, SubmitFailure>;
}
