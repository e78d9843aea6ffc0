//! Submission gateways
//!
//! The form controller never performs I/O itself; it hands a `Submission` to
//! whichever gateway the configuration selects.

mod http;
mod simulated;
mod submission;
mod traits;

pub use http::{HttpGateway, DEFAULT_TIMEOUT};
pub use simulated::SimulatedGateway;
pub use submission::{Receipt, Submission, SubmitFailure};
pub use traits::SubmissionGateway;

#[cfg(test)]
pub use traits::MockSubmissionGateway;

use crate::config::{GatewayKind, IntakeConfig};
use anyhow::{anyhow, Result};
use std::sync::Arc;
use std::time::Duration;

/// Build the gateway selected by the configuration
pub fn from_config(config: &IntakeConfig) -> Result<Arc<dyn SubmissionGateway>> {
    match config.gateway_kind() {
        GatewayKind::Simulated => {
            let delay = config.simulated_delay();
            let gateway = if config.simulate_failure.unwrap_or(false) {
                SimulatedGateway::failing(
                    delay,
                    SubmitFailure::NetworkError("simulated outage".to_string()),
                )
            } else {
                SimulatedGateway::new(delay)
            };
            tracing::info!("Using simulated gateway ({delay:?} delay)");
            Ok(Arc::new(gateway))
        }
        GatewayKind::Http => http_gateway(config.endpoint(), config.request_timeout()),
    }
}

fn http_gateway(
    endpoint: Option<String>,
    timeout: Duration,
) -> Result<Arc<dyn SubmissionGateway>> {
    let endpoint =
        endpoint.ok_or_else(|| anyhow!("HTTP gateway selected but no endpoint is configured"))?;
    tracing::info!("Using HTTP gateway at {endpoint}");
    Ok(Arc::new(HttpGateway::new(&endpoint, timeout)?))
}
