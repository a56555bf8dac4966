//! Periodic refresh of both zones.
//!
//! The ticker owns a tokio task that recomputes a [`ZonePair`] from the
//! current instant on every interval tick and publishes it on a watch
//! channel. Nothing is carried between ticks, so a late or skipped tick
//! never causes drift.

use std::fmt;
use std::time::Duration;

use chrono::TimeZone;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use super::{EvaluationMode, TarkovClock, ZonePair};

/// Default refresh period
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(1_000);

/// Source of the current real instant (ms since epoch)
pub trait NowSource: Send + Sync + 'static {
    fn now_ms(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNow;

impl NowSource for SystemNow {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl<F> NowSource for F
where
    F: Fn() -> i64 + Send + Sync + 'static,
{
    fn now_ms(&self) -> i64 {
        self()
    }
}

/// Background task keeping a live [`ZonePair`] up to date
///
/// Dropping the ticker (or calling [`ZoneTicker::stop`]) aborts the task.
pub struct ZoneTicker {
    rx: watch::Receiver<ZonePair>,
    handle: JoinHandle<()>,
}

impl ZoneTicker {
    /// Spawn the refresh task on the current tokio runtime
    pub fn spawn<Tz, N>(clock: TarkovClock<Tz>, period: Duration, now: N) -> Self
    where
        Tz: TimeZone + Send + Sync + 'static,
        Tz::Offset: fmt::Display,
        N: NowSource,
    {
        let initial = live_pair(&clock, &now);
        let (tx, rx) = watch::channel(initial);
        let period = period.max(Duration::from_millis(1));

        debug!(?period, "Starting zone ticker");
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                let pair = live_pair(&clock, &now);
                trace!(
                    left = %pair.left.clock,
                    right = %pair.right.clock,
                    "Zone tick"
                );
                if tx.send(pair).is_err() {
                    debug!("All zone subscribers dropped, stopping ticker");
                    break;
                }
            }
        });

        Self { rx, handle }
    }

    /// Receiver notified on every refresh
    pub fn subscribe(&self) -> watch::Receiver<ZonePair> {
        self.rx.clone()
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> ZonePair {
        self.rx.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop refreshing; subscribers see the channel close
    pub fn stop(self) {
        debug!("Stopping zone ticker");
        self.handle.abort();
    }
}

impl Drop for ZoneTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn live_pair<Tz, N>(clock: &TarkovClock<Tz>, now: &N) -> ZonePair
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    N: NowSource,
{
    let now_ms = now.now_ms();
    clock.zones(now_ms, EvaluationMode::Live { now_ms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tarkov::{SimulatedClockReading, Zone};
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_ticker_recomputes_from_now_source() {
        let base = 1_700_000_000_000;
        let now = Arc::new(AtomicI64::new(base));
        let source = now.clone();

        let ticker = ZoneTicker::spawn(TarkovClock::new(), Duration::from_secs(1), move || {
            source.load(Ordering::SeqCst)
        });
        assert_eq!(
            ticker.latest().left.clock,
            SimulatedClockReading::at(Zone::Left, base)
        );

        let mut rx = ticker.subscribe();
        // first tick fires immediately
        rx.changed().await.unwrap();

        now.store(base + 60_000, Ordering::SeqCst);
        rx.changed().await.unwrap();

        let pair = rx.borrow_and_update().clone();
        assert_eq!(pair.left.base_ms, base + 60_000);
        assert_eq!(
            pair.right.clock,
            SimulatedClockReading::at(Zone::Right, base + 60_000)
        );
        assert_eq!(ticker.latest(), pair);
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_countdown_matches_minutes_to_event() {
        let ticker = ZoneTicker::spawn(TarkovClock::new(), DEFAULT_PERIOD, || 0);
        let pair = ticker.latest();
        let minutes = pair.left.schedule.minutes_to_event as u64;
        assert_eq!(
            pair.left.schedule.formatted_countdown,
            format!("{:02}:{:02}", minutes / 60, minutes % 60)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_closes_channel() {
        let ticker = ZoneTicker::spawn(TarkovClock::new(), DEFAULT_PERIOD, SystemNow);
        let mut rx = ticker.subscribe();
        rx.changed().await.unwrap();
        assert!(ticker.is_running());

        ticker.stop();
        assert!(rx.changed().await.is_err());
    }
}
