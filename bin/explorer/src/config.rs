//! Centralized configuration.
//!
//! [`ClientConfig`] is the part the browser needs. The server hands it out
//! through a server function. [`ServerConfig`] wraps it together with the
//! backend endpoints and is loaded via the `config` crate from environment
//! variables, e.g. `CLIENT__HEARTBEAT__INTERVAL_MS=10000` or
//! `BACKEND__BERT_QUERY=https://...`.

use bioconceptvec_heartbeat::HeartbeatConfig;
use serde::{Deserialize, Serialize};

/// Settings shipped to the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend liveness prober settings.
    #[serde(default)]
    pub heartbeat: HeartbeatConfig,
}

/// Server configuration composed from library configs.
#[cfg(feature = "ssr")]
#[derive(Debug, Default, Deserialize)]
pub struct ServerConfig {
    /// Settings forwarded to the browser.
    #[serde(default)]
    pub client: ClientConfig,

    /// Explorer backend endpoints used by server functions.
    #[serde(default)]
    pub backend: bioconceptvec_api::BackendEndpoints,
}

#[cfg(feature = "ssr")]
impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a provided value cannot be parsed.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(
            config::Environment::default()
                .separator("__")
                .try_parsing(true),
        )
    }

    fn from_source(
        source: impl config::Source + Send + Sync + 'static,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}
