//! Backend client error types.

use std::fmt;

/// Errors from explorer backend calls.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The query concept was empty.
    EmptyQuery,
    /// The similarity threshold was outside `[0, 1]`.
    InvalidThreshold { threshold: f64 },
    /// The request could not be sent or its body could not be read.
    RequestFailed { endpoint: String, details: String },
    /// The backend answered with a non-success status.
    UnexpectedStatus { endpoint: String, status: u16 },
    /// The backend answered with a body of the wrong shape.
    UnexpectedResponse { endpoint: String, details: String },
    /// Results could not be written as CSV.
    ExportFailed { details: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuery => write!(f, "query concept is empty"),
            Self::InvalidThreshold { threshold } => {
                write!(f, "similarity threshold {threshold} is outside [0, 1]")
            }
            Self::RequestFailed { endpoint, details } => {
                write!(f, "request to {endpoint} failed: {details}")
            }
            Self::UnexpectedStatus { endpoint, status } => {
                write!(f, "{endpoint} returned status {status}")
            }
            Self::UnexpectedResponse { endpoint, details } => {
                write!(f, "unexpected response from {endpoint}: {details}")
            }
            Self::ExportFailed { details } => write!(f, "failed to export results: {details}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = ApiError::UnexpectedStatus {
            endpoint: "https://backend.test/query".to_string(),
            status: 502,
        };
        assert!(err.to_string().contains("502"));
        assert!(ApiError::InvalidThreshold { threshold: 1.5 }
            .to_string()
            .contains("1.5"));
    }
}
