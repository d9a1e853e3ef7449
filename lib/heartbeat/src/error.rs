//! Error types for the heartbeat crate.
//!
//! - `HeartbeatError`: errors from starting the prober
//! - `ProbeError`: a single ping that did not get a response
//!
//! Probe errors never leave the prober task. They are counted and logged.

use std::fmt;

/// Errors from starting the liveness prober.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeartbeatError {
    /// The prober was already started for this session.
    AlreadyStarted,
    /// The configuration disables the prober.
    Disabled,
    /// The configuration is unusable.
    InvalidConfig { reason: String },
}

impl fmt::Display for HeartbeatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted => write!(f, "heartbeat already started"),
            Self::Disabled => write!(f, "heartbeat disabled by configuration"),
            Self::InvalidConfig { reason } => write!(f, "invalid heartbeat config: {reason}"),
        }
    }
}

impl std::error::Error for HeartbeatError {}

/// A ping that failed before a response arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The request could not be built or sent.
    RequestFailed { endpoint: String, details: String },
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestFailed { endpoint, details } => {
                write!(f, "heartbeat to {endpoint} failed: {details}")
            }
        }
    }
}

impl std::error::Error for ProbeError {}
