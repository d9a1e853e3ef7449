//! The liveness prober task.
//!
//! `LivenessProber::start` hands back two halves:
//!
//! - a [`HeartbeatTask`] future that the caller spawns on its executor
//!   (`spawn_local` in the browser, a `LocalSet` in tests)
//! - a [`HeartbeatHandle`] that cancels the task and reads its counters
//!
//! Pings are fire-and-forget. Each tick pushes a new request into an
//! in-flight set without waiting for earlier ones, so slow responses may
//! overlap. Outcomes are only counted and logged.

use crate::config::HeartbeatConfig;
use crate::error::{HeartbeatError, ProbeError};
use crate::probe::{Probe, ProbeOutcome};
use crate::ticker::interval_ticks;
use futures::FutureExt;
use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use futures::stream::{FuturesUnordered, Stream, StreamExt};
use rootcause::Report;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, info, trace};

/// Starts the heartbeat at most once per instance.
pub struct LivenessProber<P> {
    probe: P,
    started: AtomicBool,
}

impl<P> LivenessProber<P>
where
    P: Probe + Clone + 'static,
{
    /// Creates a prober that pings through `probe`.
    #[must_use]
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            started: AtomicBool::new(false),
        }
    }

    /// Returns whether `start` has already succeeded.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Starts the heartbeat on the platform timer.
    ///
    /// # Errors
    ///
    /// Returns `Disabled` or `InvalidConfig` without consuming the start, and
    /// `AlreadyStarted` on every call after the first successful one.
    pub fn start(
        &self,
        config: &HeartbeatConfig,
    ) -> Result<(HeartbeatHandle, HeartbeatTask), Report<HeartbeatError>> {
        self.claim(config)?;
        Ok(self.launch(config, interval_ticks(config.interval())))
    }

    /// Starts the heartbeat on a caller-provided tick source.
    ///
    /// # Errors
    ///
    /// Same as [`LivenessProber::start`].
    pub fn start_with_ticks<T>(
        &self,
        config: &HeartbeatConfig,
        ticks: T,
    ) -> Result<(HeartbeatHandle, HeartbeatTask), Report<HeartbeatError>>
    where
        T: Stream<Item = ()> + Unpin + 'static,
    {
        self.claim(config)?;
        Ok(self.launch(config, ticks))
    }

    fn claim(&self, config: &HeartbeatConfig) -> Result<(), Report<HeartbeatError>> {
        if !config.enabled {
            return Err(HeartbeatError::Disabled.into());
        }
        config.validate()?;

        self.started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| HeartbeatError::AlreadyStarted)?;
        Ok(())
    }

    fn launch<T>(&self, config: &HeartbeatConfig, ticks: T) -> (HeartbeatHandle, HeartbeatTask)
    where
        T: Stream<Item = ()> + Unpin + 'static,
    {
        let stats = Arc::new(ProbeStats::default());
        let (abort, registration) = AbortHandle::new_pair();

        let beat = beat(
            self.probe.clone(),
            config.endpoint.clone(),
            ticks,
            stats.clone(),
        )
        .boxed_local();

        info!(
            endpoint = %config.endpoint,
            interval_ms = config.interval_ms,
            "heartbeat started"
        );

        (
            HeartbeatHandle { abort, stats },
            HeartbeatTask {
                inner: Abortable::new(beat, registration),
            },
        )
    }
}

async fn beat<P, T>(probe: P, endpoint: String, ticks: T, stats: Arc<ProbeStats>)
where
    P: Probe,
    T: Stream<Item = ()> + Unpin,
{
    let mut ticks = ticks.fuse();
    let mut in_flight = FuturesUnordered::new();

    loop {
        futures::select! {
            tick = ticks.next() => match tick {
                Some(()) => {
                    let attempt = stats.record_attempt();
                    debug!(attempt, endpoint = %endpoint, "heartbeat");
                    in_flight.push(probe.ping(&endpoint));
                }
                None => break,
            },
            outcome = in_flight.select_next_some() => stats.record_outcome(outcome),
        }
    }

    // The tick source ended on its own; let outstanding pings settle.
    while let Some(outcome) = in_flight.next().await {
        stats.record_outcome(outcome);
    }
}

/// The spawnable half of a started heartbeat.
#[must_use = "the heartbeat does nothing unless the task is spawned"]
pub struct HeartbeatTask {
    inner: Abortable<LocalBoxFuture<'static, ()>>,
}

impl HeartbeatTask {
    /// Drives the heartbeat until it is cancelled or its tick source ends.
    pub async fn run(self) {
        match self.inner.await {
            Ok(()) => debug!("heartbeat tick source ended"),
            Err(_aborted) => debug!("heartbeat cancelled"),
        }
    }
}

/// Cancellation handle and counters for a running heartbeat.
#[derive(Debug, Clone)]
pub struct HeartbeatHandle {
    abort: AbortHandle,
    stats: Arc<ProbeStats>,
}

impl HeartbeatHandle {
    /// Stops the heartbeat. In-flight pings are dropped.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Returns whether `cancel` has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.abort.is_aborted()
    }

    /// Returns a snapshot of the ping counters.
    #[must_use]
    pub fn stats(&self) -> ProbeSnapshot {
        self.stats.snapshot()
    }
}

#[derive(Debug, Default)]
struct ProbeStats {
    attempted: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
}

impl ProbeStats {
    fn record_attempt(&self) -> u64 {
        self.attempted.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn record_outcome(&self, outcome: Result<ProbeOutcome, ProbeError>) {
        match outcome {
            Ok(outcome) => {
                self.completed.fetch_add(1, Ordering::Relaxed);
                trace!(status = outcome.status, "heartbeat response");
            }
            Err(error) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                debug!(%error, "heartbeat probe failed");
            }
        }
    }

    fn snapshot(&self) -> ProbeSnapshot {
        ProbeSnapshot {
            attempted: self.attempted.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time heartbeat counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeSnapshot {
    /// Pings sent.
    pub attempted: u64,
    /// Pings that got any HTTP response.
    pub completed: u64,
    /// Pings that failed in transport.
    pub failed: u64,
}

impl ProbeSnapshot {
    /// Pings still waiting for a response.
    #[must_use]
    pub fn in_flight(&self) -> u64 {
        self.attempted
            .saturating_sub(self.completed)
            .saturating_sub(self.failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;
    use tokio::task::LocalSet;
    use tokio::time::sleep;

    #[derive(Clone, Copy)]
    enum Behavior {
        Respond(u16),
        Fail,
        Hang,
    }

    struct RecordingProbe {
        behavior: Behavior,
        calls: Cell<usize>,
        endpoints: RefCell<Vec<String>>,
    }

    impl RecordingProbe {
        fn new(behavior: Behavior) -> Rc<Self> {
            Rc::new(Self {
                behavior,
                calls: Cell::new(0),
                endpoints: RefCell::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.get()
        }
    }

    #[async_trait(?Send)]
    impl Probe for RecordingProbe {
        async fn ping(&self, endpoint: &str) -> Result<ProbeOutcome, ProbeError> {
            self.calls.set(self.calls.get() + 1);
            self.endpoints.borrow_mut().push(endpoint.to_string());
            match self.behavior {
                Behavior::Respond(status) => Ok(ProbeOutcome { status }),
                Behavior::Fail => Err(ProbeError::RequestFailed {
                    endpoint: endpoint.to_string(),
                    details: "connection refused".to_string(),
                }),
                Behavior::Hang => std::future::pending().await,
            }
        }
    }

    fn test_config() -> HeartbeatConfig {
        HeartbeatConfig::new("http://backend.test/heartbeat", Duration::from_secs(5))
    }

    #[tokio::test(start_paused = true)]
    async fn pings_once_per_interval() {
        let probe = RecordingProbe::new(Behavior::Respond(200));
        let prober = LivenessProber::new(probe.clone());
        let (handle, task) = prober.start(&test_config()).expect("start");

        LocalSet::new()
            .run_until(async move {
                tokio::task::spawn_local(task.run());
                tokio::task::yield_now().await;
                assert_eq!(probe.calls(), 0, "no ping at mount time");

                sleep(Duration::from_millis(4_900)).await;
                assert_eq!(probe.calls(), 0);

                sleep(Duration::from_millis(200)).await;
                assert_eq!(probe.calls(), 1, "first ping at t=5s");

                sleep(Duration::from_secs(5)).await;
                assert_eq!(probe.calls(), 2, "second ping at t=10s");

                sleep(Duration::from_secs(50)).await;
                assert_eq!(probe.calls(), 12);

                let stats = handle.stats();
                assert_eq!(stats.attempted, 12);
                assert_eq!(stats.completed, 12);
                assert_eq!(stats.in_flight(), 0);
                assert!(
                    probe
                        .endpoints
                        .borrow()
                        .iter()
                        .all(|e| e == "http://backend.test/heartbeat")
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn start_is_idempotent() {
        let probe = RecordingProbe::new(Behavior::Respond(200));
        let prober = LivenessProber::new(probe.clone());
        let config = test_config();

        let (_handle, task) = prober.start(&config).expect("first start");
        for _ in 0..3 {
            let err = prober.start(&config).err().expect("second start rejected");
            assert!(err.to_string().contains("already started"));
        }
        assert!(prober.is_started());

        LocalSet::new()
            .run_until(async move {
                tokio::task::spawn_local(task.run());
                sleep(Duration::from_millis(10_100)).await;
                assert_eq!(probe.calls(), 2, "only one timer is running");
            })
            .await;
    }

    #[tokio::test]
    async fn rejected_configs_do_not_consume_the_start() {
        let prober = LivenessProber::new(RecordingProbe::new(Behavior::Respond(200)));

        let disabled = HeartbeatConfig {
            enabled: false,
            ..test_config()
        };
        assert!(prober.start(&disabled).is_err());

        let zero = HeartbeatConfig::new("http://backend.test/heartbeat", Duration::ZERO);
        assert!(prober.start(&zero).is_err());
        assert!(!prober.is_started());

        assert!(prober.start(&test_config()).is_ok());
        assert!(prober.is_started());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_pings_overlap() {
        let probe = RecordingProbe::new(Behavior::Hang);
        let prober = LivenessProber::new(probe.clone());
        let (handle, task) = prober.start(&test_config()).expect("start");

        LocalSet::new()
            .run_until(async move {
                tokio::task::spawn_local(task.run());
                sleep(Duration::from_millis(15_100)).await;

                assert_eq!(probe.calls(), 3);
                let stats = handle.stats();
                assert_eq!(stats.attempted, 3);
                assert_eq!(stats.in_flight(), 3);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn failures_are_counted_and_ignored() {
        let probe = RecordingProbe::new(Behavior::Fail);
        let prober = LivenessProber::new(probe.clone());
        let (handle, task) = prober.start(&test_config()).expect("start");

        LocalSet::new()
            .run_until(async move {
                tokio::task::spawn_local(task.run());
                sleep(Duration::from_millis(10_100)).await;
                assert_eq!(handle.stats().failed, 2);

                sleep(Duration::from_secs(5)).await;
                assert_eq!(probe.calls(), 3, "heartbeat keeps running after failures");
                assert!(!handle.is_cancelled());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn non_success_status_counts_as_completed() {
        let probe = RecordingProbe::new(Behavior::Respond(503));
        let prober = LivenessProber::new(probe.clone());
        let (handle, task) = prober.start(&test_config()).expect("start");

        LocalSet::new()
            .run_until(async move {
                tokio::task::spawn_local(task.run());
                sleep(Duration::from_millis(5_100)).await;
                let stats = handle.stats();
                assert_eq!(stats.completed, 1);
                assert_eq!(stats.failed, 0);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_the_timer() {
        let probe = RecordingProbe::new(Behavior::Respond(200));
        let prober = LivenessProber::new(probe.clone());
        let (handle, task) = prober.start(&test_config()).expect("start");

        LocalSet::new()
            .run_until(async move {
                let running = tokio::task::spawn_local(task.run());
                sleep(Duration::from_millis(10_100)).await;
                assert_eq!(probe.calls(), 2);

                handle.cancel();
                assert!(handle.is_cancelled());
                running.await.expect("task exits after cancel");

                sleep(Duration::from_secs(30)).await;
                assert_eq!(probe.calls(), 2);
            })
            .await;
    }

    #[tokio::test]
    async fn finite_tick_source_settles_outstanding_pings() {
        let probe = RecordingProbe::new(Behavior::Respond(204));
        let prober = LivenessProber::new(probe.clone());
        let ticks = futures::stream::iter(vec![(); 3]);

        let (handle, task) = prober
            .start_with_ticks(&test_config(), ticks)
            .expect("start");
        task.run().await;

        assert_eq!(probe.calls(), 3);
        assert_eq!(
            handle.stats(),
            ProbeSnapshot {
                attempted: 3,
                completed: 3,
                failed: 0,
            }
        );
    }
}
