// Animation ticker: a cancellable periodic task that drives the rolling
// display while a round is being drawn.
//
// The ticker never touches draw state. It only emits `TickEvent`s into the
// application loop, which samples the pool when it handles them. Dropping
// the `AnimationTicker` aborts the task, so every path that discards the
// handle (stop, reset, teardown, unwinding) also stops the ticks.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Default interval between rolling-display updates.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(80);

/// One animation tick, tagged with the round generation that spawned it.
///
/// Ticks already queued when a round ends carry a stale generation and are
/// discarded by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub generation: u64,
}

/// Owning handle to a running ticker task.
#[derive(Debug)]
pub struct AnimationTicker {
    handle: JoinHandle<()>,
    generation: u64,
}

impl AnimationTicker {
    /// Spawn a ticker that sends a `TickEvent` every `period`.
    ///
    /// The first event arrives one full period after spawning. If the
    /// consumer falls behind, ticks are dropped rather than queued.
    pub fn spawn(period: Duration, generation: u64, tx: mpsc::Sender<TickEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately.
            interval.tick().await;

            loop {
                interval.tick().await;
                match tx.try_send(TickEvent { generation }) {
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Closed(_)) => {
                        debug!("Tick channel closed, ticker {} exiting", generation);
                        break;
                    }
                }
            }
        });

        AnimationTicker { handle, generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for AnimationTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn emits_ticks_at_the_configured_period() {
        let (tx, mut rx) = mpsc::channel(16);
        let _ticker = AnimationTicker::spawn(Duration::from_millis(80), 3, tx);

        tokio::time::advance(Duration::from_millis(79)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err(), "no tick before the first period");

        let tick = rx.recv().await.unwrap();
        assert_eq!(tick, TickEvent { generation: 3 });
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_ticks() {
        let (tx, mut rx) = mpsc::channel(16);
        let ticker = AnimationTicker::spawn(Duration::from_millis(80), 1, tx);

        assert!(rx.recv().await.is_some());
        drop(ticker);

        // Once the aborted task releases its sender the channel closes.
        let rest = tokio::time::timeout(Duration::from_secs(1), async {
            let mut count = 0;
            while rx.recv().await.is_some() {
                count += 1;
            }
            count
        })
        .await
        .expect("channel should close after the ticker is dropped");
        assert!(rest <= 1, "at most one in-flight tick after cancel, got {rest}");
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_exits_when_receiver_is_gone() {
        let (tx, rx) = mpsc::channel(16);
        let ticker = AnimationTicker::spawn(Duration::from_millis(10), 1, tx);
        drop(rx);

        tokio::time::timeout(Duration::from_secs(1), async {
            while !ticker.is_finished() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("ticker should exit once nobody listens");
    }
}
