//! Heartbeat configuration.

use crate::error::HeartbeatError;
use reqwest::Url;
use rootcause::Report;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Heartbeat endpoint of the deployed backend.
pub const DEFAULT_ENDPOINT: &str = "https://shreyj1729--bioconceptvec-heartbeat.modal.run";

/// Period between pings, in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 5_000;

/// Liveness prober settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatConfig {
    /// URL that receives a GET on every tick.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Period between pings, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Whether the prober runs at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

fn default_enabled() -> bool {
    true
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            interval_ms: default_interval_ms(),
            enabled: default_enabled(),
        }
    }
}

impl HeartbeatConfig {
    /// Creates a config for the given endpoint and period.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, interval: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            enabled: true,
        }
    }

    /// Returns the ping period.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Checks that the period is non-zero and the endpoint is an absolute
    /// http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns `HeartbeatError::InvalidConfig` describing the first problem found.
    pub fn validate(&self) -> Result<(), Report<HeartbeatError>> {
        if self.interval_ms == 0 {
            return Err(HeartbeatError::InvalidConfig {
                reason: "interval must be greater than zero".to_string(),
            }
            .into());
        }

        let url = Url::parse(&self.endpoint).map_err(|e| HeartbeatError::InvalidConfig {
            reason: format!("endpoint '{}' is not a valid URL: {e}", self.endpoint),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(HeartbeatError::InvalidConfig {
                reason: format!("endpoint scheme '{}' is not http(s)", url.scheme()),
            }
            .into());
        }

        Ok(())
    }
}
