//! Shared session core.
//!
//! Every writer (commands, the tick task and the collection followers) goes
//! through the one mutex in [`Session`]. Background writers check their
//! cancellation token while holding it, so a cancel issued under the lock
//! is final: nothing they would write lands afterwards.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::state::{LiveState, SessionPhase};
use crate::position::locate;
use crate::time::advance_by_seconds;

pub(super) struct SessionInner {
    pub live: LiveState,
    /// Token of the running tick task, if any.
    pub tick: Option<CancellationToken>,
}

pub(super) struct Session {
    inner: Mutex<SessionInner>,
    tx: watch::Sender<Arc<LiveState>>,
    /// Parent of every background task token.
    pub cancellation: CancellationToken,
}

impl Session {
    pub fn new(initial: LiveState) -> Self {
        let (tx, _) = watch::channel(Arc::new(initial.clone()));
        Self {
            inner: Mutex::new(SessionInner {
                live: initial,
                tick: None,
            }),
            tx,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn publish(&self, live: &LiveState) {
        self.tx.send_replace(Arc::new(live.clone()));
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<LiveState>> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> Arc<LiveState> {
        self.tx.borrow().clone()
    }

    /// Advance the clock by one tick.
    ///
    /// Returns false once the tick has been cancelled.
    pub fn tick(&self, token: &CancellationToken, step_secs: i64) -> bool {
        let mut inner = self.lock();
        if token.is_cancelled() || inner.live.phase == SessionPhase::Disposed {
            return false;
        }
        if inner.live.current_time_str.is_empty() {
            trace!("Tick skipped, no clock set");
            return true;
        }

        let next = advance_by_seconds(&inner.live.current_time_str, step_secs);
        apply_time(&mut inner.live, next);
        trace!(
            time = %inner.live.current_time_str,
            km = format!("{:.3}", inner.live.current_km),
            "Tick"
        );
        self.publish(&inner.live);
        true
    }

    /// Apply a collection update unless `token` has been cancelled.
    pub fn update_collection<F>(&self, token: &CancellationToken, apply: F)
    where
        F: FnOnce(&mut LiveState),
    {
        let mut inner = self.lock();
        if token.is_cancelled() || inner.live.phase == SessionPhase::Disposed {
            return;
        }
        apply(&mut inner.live);
        self.publish(&inner.live);
    }
}

/// Recompute the position for `time_str` and enter [`SessionPhase::Tracking`].
///
/// Collections are read as they are; this never refreshes them.
pub(super) fn apply_time(live: &mut LiveState, time_str: String) {
    if let Some(trip) = &live.trip {
        let position = locate(
            &time_str,
            trip,
            live.route.as_ref(),
            &live.timetable,
            live.km_offset,
        );
        live.current_km = position.km;
        live.progress = position.progress;
        live.next_stop = position.next_stop;
        live.prev_stop = position.prev_stop;
    }
    live.current_time_str = time_str;
    live.phase = SessionPhase::Tracking;
}
