//! Periodic countdown task.
//!
//! One timer, one task: every tick reads the tracker (refreshing it when
//! due), builds a [`CountdownSnapshot`] and emits an [`Event`]. Ticks run
//! synchronously and perform no blocking I/O, so they can never overlap.
//!
//! The task is stoppable: dropping the receiver or calling
//! [`TickerHandle::stop`] tears the timer down instead of leaking it.

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use super::countdown::CountdownSnapshot;
use super::tracker::CycleTracker;
use crate::events::Event;

const EVENT_BUFFER: usize = 16;

/// What the ticker saw on its previous tick, for edge detection.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Seen {
    Nothing,
    Cycle(DateTime<Utc>),
    Unavailable,
}

/// Handle to a running ticker.
pub struct TickerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Stop the ticker and wait for its task to finish.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        let _ = self.task.await;
    }
}

/// Spawn the once-per-second countdown loop.
///
/// Returns the event stream and a stop handle. The loop also exits on its
/// own when the receiver is dropped.
pub fn spawn(
    mut tracker: CycleTracker,
    interval: std::time::Duration,
) -> (mpsc::Receiver<Event>, TickerHandle) {
    let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
    let (stop_tx, mut stop_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut seen = Seen::Nothing;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = Utc::now();
                    if !tick_once(&mut tracker, &mut seen, now, &event_tx).await {
                        break;
                    }
                }
                _ = stop_rx.changed() => {
                    debug!("ticker stopped");
                    break;
                }
            }
        }
    });

    (event_rx, TickerHandle { stop_tx, task })
}

/// One tick body. Returns false when the receiver is gone.
async fn tick_once(
    tracker: &mut CycleTracker,
    seen: &mut Seen,
    now: DateTime<Utc>,
    event_tx: &mpsc::Sender<Event>,
) -> bool {
    match tracker.pair(now) {
        Some(pair) => {
            if let Seen::Cycle(prev_start) = *seen {
                if prev_start != pair.current.start {
                    let rolled = Event::CycleRolled {
                        start: pair.current.start,
                        end: pair.current.end,
                        at: now,
                    };
                    if event_tx.send(rolled).await.is_err() {
                        return false;
                    }
                }
            }
            *seen = Seen::Cycle(pair.current.start);

            let tick = Event::CountdownTick {
                snapshot: CountdownSnapshot::at(&pair, now),
                at: now,
            };
            event_tx.send(tick).await.is_ok()
        }
        None => {
            let first_failure = *seen != Seen::Unavailable;
            *seen = Seen::Unavailable;
            if first_failure {
                event_tx.send(Event::CycleUnavailable { at: now }).await.is_ok()
            } else {
                true
            }
        }
    }
}
