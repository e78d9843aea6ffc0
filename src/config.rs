//! Configuration handling for the intake app

use crate::gateway::DEFAULT_TIMEOUT;
use anyhow::Result;
use chrono::{DateTime, FixedOffset, TimeZone};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the configured endpoint
pub const ENDPOINT_ENV: &str = "MEETUP_INTAKE_ENDPOINT";

/// Which gateway delivers submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    #[default]
    Simulated,
    Http,
}

/// The workshop the event registration form signs people up for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    pub title: String,
    pub starts_at: DateTime<FixedOffset>,
    pub ends_at: DateTime<FixedOffset>,
    pub location: String,
    pub description: String,
    pub capacity: u32,
    pub registered: u32,
}

impl EventDetails {
    pub fn spots_left(&self) -> u32 {
        self.capacity.saturating_sub(self.registered)
    }
}

fn ist(year: i32, month: u32, day: u32, hour: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(5 * 3600 + 30 * 60)
        .and_then(|tz| tz.with_ymd_and_hms(year, month, day, hour, 0, 0).single())
        .unwrap_or_default()
}

impl Default for EventDetails {
    fn default() -> Self {
        Self {
            title: "Deep Dive: Node.js Streams Workshop".to_string(),
            starts_at: ist(2025, 7, 15, 18),
            ends_at: ist(2025, 7, 15, 21),
            location: "TechHub Coworking, Ahmedabad".to_string(),
            description: "Join us for an in-depth workshop on Node.js streams. Learn how to \
                effectively use streams to handle large datasets, improve performance, and \
                build scalable applications."
                .to_string(),
            capacity: 50,
            registered: 42,
        }
    }
}

/// User configuration for the intake app
///
/// Every field is optional; accessors fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntakeConfig {
    /// Gateway used to deliver submissions
    pub gateway: Option<GatewayKind>,
    /// Base URL of the HTTP gateway
    pub endpoint: Option<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Delay of the simulated gateway in milliseconds
    pub simulated_delay_ms: Option<u64>,
    /// Make the simulated gateway fail every submission
    pub simulate_failure: Option<bool>,
    /// Event offered by the registration form
    pub event: Option<EventDetails>,
}

impl IntakeConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("community", "meetup", "meetup-intake")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: IntakeConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded configuration from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    pub fn gateway_kind(&self) -> GatewayKind {
        self.gateway.unwrap_or_default()
    }

    /// Endpoint from the environment, then from the file
    pub fn endpoint(&self) -> Option<String> {
        std::env::var(ENDPOINT_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.endpoint.clone())
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn simulated_delay(&self) -> Duration {
        self.simulated_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(crate::gateway::SimulatedGateway::DEFAULT_DELAY)
    }

    pub fn event(&self) -> EventDetails {
        self.event.clone().unwrap_or_default()
    }
}
