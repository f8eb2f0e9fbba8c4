//! Background tasks of a tracking session.
//!
//! - the auto tick, advancing the clock once per interval
//! - one follower per live collection, copying store updates into the
//!   snapshot
//!
//! Both stop when their token is cancelled and never write after that.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::session::Session;
use super::state::LiveState;

/// Spawn the auto tick.
///
/// The first tick fires one `interval` after the call.
pub(super) fn spawn_ticker(
    session: Arc<Session>,
    cancellation: CancellationToken,
    interval: Duration,
    step_secs: i64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    debug!("Auto tick stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if !session.tick(&cancellation, step_secs) {
                        debug!("Auto tick stopped");
                        break;
                    }
                }
            }
        }
    })
}

/// Spawn a task copying every list from `rx` into the snapshot via `apply`.
///
/// Updates replace the field as a whole and never recompute the position.
pub(super) fn spawn_collection_follower<T, F>(
    session: Arc<Session>,
    mut rx: watch::Receiver<Vec<T>>,
    cancellation: CancellationToken,
    collection: &'static str,
    apply: F,
) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(&mut LiveState, Arc<Vec<T>>) + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = cancellation.cancelled() => break,
                changed = rx.changed() => {
                    if changed.is_err() {
                        debug!(collection, "Store closed the collection");
                        break;
                    }
                    let list = Arc::new(rx.borrow_and_update().clone());
                    debug!(collection, len = list.len(), "Collection updated");
                    session.update_collection(&cancellation, |live| apply(live, list));
                }
            }
        }
    })
}
