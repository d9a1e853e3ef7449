//! Starts the backend heartbeat from the root component.

use bioconceptvec_heartbeat::{
    HeartbeatConfig, HeartbeatHandle, HeartbeatTask, LivenessProber, Probe, ProbeSnapshot,
};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Shared slot for the running heartbeat's handle.
///
/// The root component keeps one clone for `on_cleanup` while the launcher,
/// which only exists in the browser, fills it in.
#[derive(Debug, Clone, Default)]
pub struct HeartbeatSlot(Arc<Mutex<Option<HeartbeatHandle>>>);

impl HeartbeatSlot {
    /// Cancels the running heartbeat and empties the slot.
    ///
    /// Returns the final counters, or `None` if nothing was running.
    pub fn cancel(&self) -> Option<ProbeSnapshot> {
        let handle = self.0.lock().ok().and_then(|mut slot| slot.take())?;
        handle.cancel();
        let stats = handle.stats();
        debug!(?stats, "heartbeat stopped");
        Some(stats)
    }

    fn store(&self, handle: HeartbeatHandle) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(handle);
        }
    }
}

/// Owns the page session's liveness prober.
///
/// The root component may re-run its effects any number of times; only the
/// first call to [`HeartbeatLauncher::ensure_started`] spawns a task.
pub struct HeartbeatLauncher<P = reqwest::Client> {
    prober: LivenessProber<P>,
    slot: HeartbeatSlot,
}

impl HeartbeatLauncher<reqwest::Client> {
    /// Creates a launcher that pings with a fresh `reqwest::Client`.
    pub fn new(slot: HeartbeatSlot) -> Self {
        Self::with_probe(reqwest::Client::new(), slot)
    }

    /// Starts the heartbeat on the Leptos executor if it is not running yet.
    pub fn ensure_started(&self, config: &HeartbeatConfig) {
        self.ensure_started_with(config, |task| leptos::task::spawn_local(task.run()));
    }
}

impl<P> HeartbeatLauncher<P>
where
    P: Probe + Clone + 'static,
{
    /// Creates a launcher around an arbitrary probe.
    pub fn with_probe(probe: P, slot: HeartbeatSlot) -> Self {
        Self {
            prober: LivenessProber::new(probe),
            slot,
        }
    }

    /// Starts the heartbeat through `spawn` if it is not running yet.
    ///
    /// Returns whether a task was spawned by this call.
    pub fn ensure_started_with(
        &self,
        config: &HeartbeatConfig,
        spawn: impl FnOnce(HeartbeatTask),
    ) -> bool {
        if self.prober.is_started() {
            debug!("heartbeat already running");
            return false;
        }
        if !config.enabled {
            info!("heartbeat disabled by configuration");
            return false;
        }

        match self.prober.start(config) {
            Ok((handle, task)) => {
                self.slot.store(handle);
                spawn(task);
                true
            }
            Err(report) => {
                warn!(error = %report, "heartbeat not started");
                false
            }
        }
    }
}
