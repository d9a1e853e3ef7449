//! The outbound liveness request.

use crate::error::ProbeError;
use async_trait::async_trait;

/// Result of a ping that reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// HTTP status code of the response.
    pub status: u16,
}

impl ProbeOutcome {
    /// Returns whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a single liveness ping.
///
/// Futures are not required to be `Send` so that browser fetch-backed
/// clients can implement this trait.
#[async_trait(?Send)]
pub trait Probe {
    /// Pings `endpoint` once.
    ///
    /// Any HTTP response, whatever its status, is an outcome. Only transport
    /// failures are errors.
    async fn ping(&self, endpoint: &str) -> Result<ProbeOutcome, ProbeError>;
}

#[async_trait(?Send)]
impl Probe for reqwest::Client {
    async fn ping(&self, endpoint: &str) -> Result<ProbeOutcome, ProbeError> {
        let response = self
            .get(endpoint)
            .send()
            .await
            .map_err(|e| ProbeError::RequestFailed {
                endpoint: endpoint.to_string(),
                details: e.to_string(),
            })?;

        Ok(ProbeOutcome {
            status: response.status().as_u16(),
        })
    }
}

#[async_trait(?Send)]
impl<P: Probe + ?Sized> Probe for std::rc::Rc<P> {
    async fn ping(&self, endpoint: &str) -> Result<ProbeOutcome, ProbeError> {
        (**self).ping(endpoint).await
    }
}

#[async_trait(?Send)]
impl<P: Probe + ?Sized> Probe for std::sync::Arc<P> {
    async fn ping(&self, endpoint: &str) -> Result<ProbeOutcome, ProbeError> {
        (**self).ping(endpoint).await
    }
}
