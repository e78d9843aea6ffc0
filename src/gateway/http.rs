//! HTTP gateway posting submissions as JSON
//!
//! Each form is delivered to `{endpoint}/{form}`. A 2xx response is an
//! acceptance; its JSON body may carry a `reference`, otherwise the
//! submission's short reference is used. Any other status is a rejection.

use super::submission::{Receipt, Submission, SubmitFailure};
use super::traits::SubmissionGateway;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct AcceptedBody {
    reference: Option<String>,
}

/// Gateway backed by an HTTP endpoint
pub struct HttpGateway {
    client: Client,
    endpoint: String,
}

impl HttpGateway {
    pub fn new(endpoint: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// URL a given form is posted to
    pub fn url_for(&self, form: &str) -> String {
        format!("{}/{}", self.endpoint, form)
    }
}

/// Map a non-success status and its body to a rejection
fn rejection(status: StatusCode, body: &str) -> SubmitFailure {
    let body = body.trim();
    if body.is_empty() {
        SubmitFailure::RejectedByServer(status.to_string())
    } else {
        SubmitFailure::RejectedByServer(format!("{status}: {body}"))
    }
}

#[async_trait]
impl SubmissionGateway for HttpGateway {
    async fn submit(&self, submission: &Submission) -> Result<Receipt, SubmitFailure> {
        let url = self.url_for(&submission.form);
        tracing::info!("Posting {} submission {} to {url}", submission.form, submission.id);

        let response = self
            .client
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|e| SubmitFailure::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitFailure::NetworkError(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!("Submission {} rejected with {status}", submission.id);
            return Err(rejection(status, &body));
        }

        let reference = serde_json::from_str::<AcceptedBody>(&body)
            .ok()
            .and_then(|b| b.reference)
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| submission.short_reference());

        Ok(Receipt {
            reference,
            received_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldValue;
    use std::collections::BTreeMap;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one request with a canned response, returning the raw request
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{addr}/forms"), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn submission() -> Submission {
        let mut values = BTreeMap::new();
        values.insert("email".to_string(), FieldValue::text("ada@example.com"));
        Submission::new("contact", values)
    }

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let gateway = HttpGateway::new("https://meetup.example/api/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            gateway.url_for("sponsorship-inquiry"),
            "https://meetup.example/api/sponsorship-inquiry"
        );
    }

    #[test]
    fn test_rejection_includes_body() {
        assert_eq!(
            rejection(StatusCode::UNPROCESSABLE_ENTITY, " bad email "),
            SubmitFailure::RejectedByServer("422 Unprocessable Entity: bad email".to_string())
        );
        assert_eq!(
            rejection(StatusCode::INTERNAL_SERVER_ERROR, ""),
            SubmitFailure::RejectedByServer("500 Internal Server Error".to_string())
        );
    }

    #[tokio::test]
    async fn test_accepted_with_reference() {
        let (endpoint, server) = serve_once("201 Created", r#"{"reference":"REG-42"}"#).await;
        let gateway = HttpGateway::new(&endpoint, DEFAULT_TIMEOUT).unwrap();

        let receipt = gateway.submit(&submission()).await.unwrap();
        assert_eq!(receipt.reference, "REG-42");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /forms/contact "));
        assert!(request.contains("ada@example.com"));
    }

    #[tokio::test]
    async fn test_accepted_without_body_uses_short_reference() {
        let (endpoint, server) = serve_once("200 OK", "").await;
        let gateway = HttpGateway::new(&endpoint, DEFAULT_TIMEOUT).unwrap();
        let submission = submission();

        let receipt = gateway.submit(&submission).await.unwrap();
        assert_eq!(receipt.reference, submission.short_reference());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status_is_rejection() {
        let (endpoint, server) = serve_once("400 Bad Request", "missing field").await;
        let gateway = HttpGateway::new(&endpoint, DEFAULT_TIMEOUT).unwrap();

        let err = gateway.submit(&submission()).await.unwrap_err();
        assert_eq!(
            err,
            SubmitFailure::RejectedByServer("400 Bad Request: missing field".to_string())
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = HttpGateway::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        let err = gateway.submit(&submission()).await.unwrap_err();
        assert!(matches!(err, SubmitFailure::NetworkError(_)));
    }
}
