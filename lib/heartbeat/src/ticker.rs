//! Platform timer streams.
//!
//! Both implementations yield once per elapsed period and never at time
//! zero, so the first ping goes out one full period after start.

use futures::Stream;
use std::time::Duration;

/// Returns a stream that yields `()` after every `period`.
#[cfg(not(target_arch = "wasm32"))]
pub fn interval_ticks(period: Duration) -> impl Stream<Item = ()> + Unpin {
    use futures::StreamExt;
    use tokio::time::{Instant, MissedTickBehavior, interval_at};
    use tokio_stream::wrappers::IntervalStream;

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    IntervalStream::new(interval).map(|_| ())
}

/// Returns a stream that yields `()` after every `period`.
#[cfg(target_arch = "wasm32")]
pub fn interval_ticks(period: Duration) -> impl Stream<Item = ()> + Unpin {
    let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::IntervalStream::new(millis)
}
