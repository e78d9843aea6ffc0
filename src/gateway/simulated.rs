//! Timer-backed gateway standing in for a real endpoint

use super::submission::{Receipt, Submission, SubmitFailure};
use super::traits::SubmissionGateway;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

/// Resolves every submission after a fixed delay
pub struct SimulatedGateway {
    delay: Duration,
    failure: Option<SubmitFailure>,
}

impl SimulatedGateway {
    /// Delay the community site uses before showing its confirmation
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure: None,
        }
    }

    /// Make every call fail with `failure` after the delay
    pub fn failing(delay: Duration, failure: SubmitFailure) -> Self {
        Self {
            delay,
            failure: Some(failure),
        }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl SubmissionGateway for SimulatedGateway {
    async fn submit(&self, submission: &Submission) -> Result<Receipt, SubmitFailure> {
        tracing::debug!(
            "Simulating delivery of {} submission {} ({:?})",
            submission.form,
            submission.id,
            self.delay
        );
        tokio::time::sleep(self.delay).await;

        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(Receipt {
                reference: submission.short_reference(),
                received_at: Utc::now(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::time::Instant;

    #[tokio::test]
    async fn test_resolves_success_after_delay() {
        let gateway = SimulatedGateway::new(Duration::from_millis(20));
        let submission = Submission::new("contact", BTreeMap::new());

        let started = Instant::now();
        let receipt = gateway.submit(&submission).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(receipt.reference, submission.short_reference());
    }

    #[tokio::test]
    async fn test_failing_gateway_reports_failure() {
        let gateway = SimulatedGateway::failing(
            Duration::ZERO,
            SubmitFailure::NetworkError("offline".to_string()),
        );
        let submission = Submission::new("contact", BTreeMap::new());
        assert_eq!(
            gateway.submit(&submission).await,
            Err(SubmitFailure::NetworkError("offline".to_string()))
        );
    }

    #[test]
    fn test_default_delay_matches_site() {
        let submission = Submission::new("contact", BTreeMap::new());
        let gateway = SimulatedGateway::new(Duration::ZERO);
        tokio_test::assert_ok!(tokio_test::block_on(gateway.submit(&submission)));
        assert_eq!(SimulatedGateway::DEFAULT_DELAY, Duration::from_millis(1500));
    }
}
