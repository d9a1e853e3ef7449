//! Domain error types for server functions.
//!
//! Detailed causes are logged on the server. The browser only ever sees the
//! user-safe message from `into_server_error`.

use bioconceptvec_api::ApiError;
use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Errors from the explore page's server functions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExploreError {
    /// No concept was entered.
    EmptyQuery,
    /// The similarity threshold is outside `[0, 1]`.
    InvalidThreshold { threshold: f64 },
    /// The backend could not be reached or answered unexpectedly.
    BackendUnavailable { details: String },
}

impl fmt::Display for ExploreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuery => write!(f, "empty concept query"),
            Self::InvalidThreshold { threshold } => {
                write!(f, "invalid similarity threshold {}", threshold)
            }
            Self::BackendUnavailable { details } => {
                write!(f, "explorer backend unavailable: {}", details)
            }
        }
    }
}

impl From<ApiError> for ExploreError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::EmptyQuery => Self::EmptyQuery,
            ApiError::InvalidThreshold { threshold } => Self::InvalidThreshold { threshold },
            other => Self::BackendUnavailable {
                details: other.to_string(),
            },
        }
    }
}

impl ExploreError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            ExploreError::EmptyQuery => ServerFnError::new("Please enter a concept."),
            ExploreError::InvalidThreshold { .. } => {
                ServerFnError::new("Threshold must be between 0 and 1.")
            }
            ExploreError::BackendUnavailable { .. } => {
                ServerFnError::new("The explorer backend is starting up. Please try again.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_validation_errors_keep_their_kind() {
        assert_eq!(ExploreError::from(ApiError::EmptyQuery), ExploreError::EmptyQuery);
        assert_eq!(
            ExploreError::from(ApiError::InvalidThreshold { threshold: 2.0 }),
            ExploreError::InvalidThreshold { threshold: 2.0 }
        );
    }

    #[test]
    fn transport_errors_become_backend_unavailable() {
        let err = ExploreError::from(ApiError::UnexpectedStatus {
            endpoint: "https://backend.test".to_string(),
            status: 504,
        });
        assert!(matches!(err, ExploreError::BackendUnavailable { .. }));
        assert!(err.to_string().contains("504"));
    }

    #[test]
    fn server_error_hides_details() {
        let err = ExploreError::BackendUnavailable {
            details: "connect error: 10.0.0.3:443".to_string(),
        };
        let message = err.into_server_error().to_string();
        assert!(!message.contains("10.0.0.3"));
    }
}
