//! Backend liveness prober.
//!
//! The explorer backend runs as a cold-starting serverless function. This
//! crate keeps it warm by pinging a heartbeat endpoint on a fixed period:
//!
//! - **Config**: endpoint and period, with the production values as defaults
//! - **Probe**: the outbound request, implemented for `reqwest::Client`
//! - **Ticker**: a platform timer stream (tokio natively, gloo in the browser)
//! - **Prober**: the started-once background task and its cancellation handle

pub mod config;
pub mod error;
pub mod probe;
pub mod prober;
pub mod ticker;

pub use config::HeartbeatConfig;
pub use error::{HeartbeatError, ProbeError};
pub use probe::{Probe, ProbeOutcome};
pub use prober::{HeartbeatHandle, HeartbeatTask, LivenessProber, ProbeSnapshot};
pub use ticker::interval_ticks;
