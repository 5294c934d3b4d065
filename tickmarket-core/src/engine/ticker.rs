//! Tick advancer: the background thread that moves every market forward.
//!
//! It is the only writer of the current positions. Cancellation goes through an
//! `mpsc` channel so `stop()` wakes the thread immediately instead of waiting out
//! the interval.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use crate::data::MarketState;

/// Advance every market that still has room by one position.
///
/// Returns how many markets moved.
pub fn tick_once(state: &MarketState) -> usize {
    state.iter().filter(|series| series.advance()).count()
}

/// Periodic driver for [`tick_once`].
pub struct TickAdvancer {
    state: Arc<MarketState>,
    interval: Duration,
}

impl TickAdvancer {
    pub fn new(state: Arc<MarketState>, interval: Duration) -> Self {
        Self { state, interval }
    }

    /// Start the ticker thread.
    ///
    /// The first tick fires one interval from now, so every market is still at
    /// position 0 for the first interval after startup.
    pub fn spawn(self) -> io::Result<TickHandle> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let Self { state, interval } = self;

        let join = thread::Builder::new()
            .name("tickmarket-ticker".into())
            .spawn(move || {
                info!(interval_ms = interval.as_millis() as u64, "tick advancer started");
                let mut ticks = 0u64;
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            let moved = tick_once(&state);
                            ticks += 1;
                            let positions: Vec<usize> =
                                state.iter().map(|s| s.current_position()).collect();
                            debug!(tick = ticks, moved, ?positions, "tick");
                        }
                        // Explicit stop or the handle was dropped.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                info!(ticks, "tick advancer stopped");
                ticks
            })?;

        Ok(TickHandle {
            stop_tx: Some(stop_tx),
            join: Some(join),
        })
    }
}

/// Cancellation handle for a running ticker. Dropping it also stops the thread.
pub struct TickHandle {
    stop_tx: Option<Sender<()>>,
    join: Option<JoinHandle<u64>>,
}

impl TickHandle {
    /// Signal the ticker, wait for it to exit, and return how many ticks it ran.
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        if let Some(tx) = self.stop_tx.take() {
            // Err only if the thread already exited.
            let _ = tx.send(());
        }
        self.join
            .take()
            .and_then(|join| join.join().ok())
            .unwrap_or(0)
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarketId;
    use std::time::Instant;

    fn state() -> Arc<MarketState> {
        Arc::new(
            MarketState::from_series([
                vec![10.0, 20.0, 30.0],
                vec![1.0],
                vec![1.0, 2.0],
                (0..100).map(f64::from).collect(),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn tick_once_skips_exhausted_markets() {
        let state = state();
        assert_eq!(tick_once(&state), 3); // forex has a single price
        assert_eq!(tick_once(&state), 2); // raw is now at its end
        assert_eq!(state.current_position(MarketId::Crypto), 2);
        assert_eq!(tick_once(&state), 1); // only stock left
        assert_eq!(state.current_position(MarketId::Crypto), 2);
        assert_eq!(state.current_position(MarketId::Forex), 0);
        assert_eq!(state.current_position(MarketId::Raw), 1);
        assert_eq!(state.current_position(MarketId::Stock), 3);
    }

    #[test]
    fn spawned_ticker_advances_and_stops() {
        let state = state();
        let handle = TickAdvancer::new(state.clone(), Duration::from_millis(5))
            .spawn()
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while state.current_position(MarketId::Crypto) < 2 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(2));
        }
        let ticks = handle.stop();
        assert!(ticks >= 2, "expected at least 2 ticks, got {ticks}");
        assert_eq!(state.current_position(MarketId::Crypto), 2);

        let frozen = state.current_position(MarketId::Stock);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(state.current_position(MarketId::Stock), frozen);
    }

    #[test]
    fn stop_does_not_wait_for_interval() {
        let handle = TickAdvancer::new(state(), Duration::from_secs(3600))
            .spawn()
            .unwrap();
        let started = Instant::now();
        assert_eq!(handle.stop(), 0);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn no_tick_before_first_interval() {
        let state = state();
        let handle = TickAdvancer::new(state.clone(), Duration::from_secs(3600))
            .spawn()
            .unwrap();
        thread::sleep(Duration::from_millis(20));
        for market in MarketId::ALL {
            assert_eq!(state.current_position(market), 0);
        }
        handle.stop();
    }

    #[test]
    fn dropped_handle_stops_ticker() {
        let state = state();
        let handle = TickAdvancer::new(state.clone(), Duration::from_millis(2))
            .spawn()
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while state.current_position(MarketId::Stock) < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        drop(handle);

        let frozen = state.current_position(MarketId::Stock);
        assert!(frozen >= 3);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(state.current_position(MarketId::Stock), frozen);
    }
}
