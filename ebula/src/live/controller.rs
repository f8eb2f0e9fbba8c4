//! The tracking session controller.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::config::ControllerConfig;
use super::error::LiveError;
use super::session::{apply_time, Session, SessionInner};
use super::state::{LiveState, SessionPhase};
use super::ticker::{spawn_collection_follower, spawn_ticker};
use crate::model::{RouteId, TripId};
use crate::store::RouteStore;

/// Drives one trip over one route.
///
/// The controller owns the session state and is the only writer of it.
/// Observers follow [`subscribe`](Self::subscribe), which yields immutable
/// [`LiveState`] snapshots.
///
/// Dropping the controller disposes the session.
pub struct LiveTrackingController<S: RouteStore> {
    store: Arc<S>,
    config: ControllerConfig,
    session: Arc<Session>,
}

impl<S: RouteStore> LiveTrackingController<S> {
    /// Create an idle controller reading from `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, ControllerConfig::default())
    }

    /// Create an idle controller with custom tick settings.
    pub fn with_config(store: Arc<S>, config: ControllerConfig) -> Self {
        let initial = LiveState {
            auto_scroll_enabled: config.auto_scroll,
            ..LiveState::default()
        };
        Self {
            store,
            config,
            session: Arc::new(Session::new(initial)),
        }
    }

    /// Follow the session's snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Arc<LiveState>> {
        self.session.subscribe()
    }

    /// The latest snapshot.
    pub fn state(&self) -> Arc<LiveState> {
        self.session.snapshot()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn is_disposed(&self) -> bool {
        self.session.lock().live.phase == SessionPhase::Disposed
    }

    /// Load a trip and start following the route's collections.
    ///
    /// A trip that does not exist is an error. A route that does not exist
    /// is tolerated: the session runs with progress fixed at zero.
    pub async fn load(&self, route_id: RouteId, trip_id: TripId) -> Result<(), LiveError> {
        ensure_idle(&self.session.lock())?;

        let trip = self
            .store
            .fetch_trip(trip_id)
            .await?
            .ok_or(LiveError::TripNotFound(trip_id))?;
        let route = self.store.fetch_route(route_id).await?;
        if route.is_none() {
            warn!(route_id, "Route not found, progress will stay at zero");
        }

        let mut objects_rx = self.store.observe_track_objects(route_id);
        let mut timetable_rx = self.store.observe_timetable(route_id);
        let followers = self.session.cancellation.child_token();
        let mode = trip.calculation_mode;

        {
            let mut inner = self.session.lock();
            ensure_idle(&inner)?;

            let live = &mut inner.live;
            live.track_objects = Arc::new(objects_rx.borrow_and_update().clone());
            live.timetable = Arc::new(timetable_rx.borrow_and_update().clone());
            live.route = route;
            live.trip = Some(trip);
            live.phase = SessionPhase::Loaded;

            info!(
                route_id,
                trip_id,
                mode = %mode,
                track_objects = live.track_objects.len(),
                timetable_entries = live.timetable.len(),
                "Trip loaded"
            );
            self.session.publish(live);
        }

        spawn_collection_follower(
            Arc::clone(&self.session),
            objects_rx,
            followers.clone(),
            "track_objects",
            |live, list| live.track_objects = list,
        );
        spawn_collection_follower(
            Arc::clone(&self.session),
            timetable_rx,
            followers,
            "timetable",
            |live, list| live.timetable = list,
        );

        Ok(())
    }

    /// Set the clock and recompute the position.
    ///
    /// A malformed time is kept for display and yields the fail-soft km of
    /// the position engine.
    pub fn set_time(&self, time_str: &str) -> Result<(), LiveError> {
        let mut inner = self.session.lock();
        ensure_loaded(&inner)?;

        apply_time(&mut inner.live, time_str.to_string());
        debug!(
            time = %inner.live.current_time_str,
            km = format!("{:.3}", inner.live.current_km),
            progress = format!("{:.3}", inner.live.progress),
            "Clock set"
        );
        self.session.publish(&inner.live);
        Ok(())
    }

    /// Start advancing the clock automatically, replacing any running tick.
    pub fn start_auto_tick(&self) -> Result<(), LiveError> {
        let mut inner = self.session.lock();
        ensure_loaded(&inner)?;

        if let Some(previous) = inner.tick.take() {
            previous.cancel();
        }
        let token = self.session.cancellation.child_token();
        inner.tick = Some(token.clone());
        inner.live.is_auto_ticking = true;
        self.session.publish(&inner.live);

        spawn_ticker(
            Arc::clone(&self.session),
            token,
            self.config.tick_interval,
            self.config.tick_step_secs,
        );
        info!(
            interval_ms = self.config.tick_interval.as_millis() as u64,
            step_secs = self.config.tick_step_secs,
            "Auto tick started"
        );
        Ok(())
    }

    /// Stop the automatic clock. No tick is applied after this returns.
    pub fn stop_auto_tick(&self) -> Result<(), LiveError> {
        let mut inner = self.session.lock();
        ensure_not_disposed(&inner)?;

        if let Some(token) = inner.tick.take() {
            token.cancel();
        }
        if inner.live.is_auto_ticking {
            inner.live.is_auto_ticking = false;
            self.session.publish(&inner.live);
            info!("Auto tick stopped");
        }
        Ok(())
    }

    /// Add `delta_km` to the manual correction.
    pub fn adjust_km_offset(&self, delta_km: f64) -> Result<(), LiveError> {
        self.update_offset(|offset| offset + delta_km)
    }

    /// Clear the manual correction.
    pub fn reset_km_offset(&self) -> Result<(), LiveError> {
        self.update_offset(|_| 0.0)
    }

    /// Flip the auto-scroll hint.
    pub fn toggle_auto_scroll(&self) -> Result<(), LiveError> {
        let mut inner = self.session.lock();
        ensure_not_disposed(&inner)?;

        inner.live.auto_scroll_enabled = !inner.live.auto_scroll_enabled;
        self.session.publish(&inner.live);
        Ok(())
    }

    /// End the session: stop the tick and drop the store subscriptions.
    ///
    /// Every later call fails with [`LiveError::Disposed`].
    pub fn dispose(&self) -> Result<(), LiveError> {
        let mut inner = self.session.lock();
        ensure_not_disposed(&inner)?;

        self.session.cancellation.cancel();
        inner.tick = None;
        inner.live.is_auto_ticking = false;
        inner.live.phase = SessionPhase::Disposed;
        self.session.publish(&inner.live);

        info!("Tracking session disposed");
        Ok(())
    }

    /// Recompute with the current clock so the new offset shows at once.
    ///
    /// Before a clock is set only the offset is recorded.
    fn update_offset<F>(&self, f: F) -> Result<(), LiveError>
    where
        F: FnOnce(f64) -> f64,
    {
        let mut inner = self.session.lock();
        ensure_not_disposed(&inner)?;

        let live = &mut inner.live;
        live.km_offset = f(live.km_offset);
        if live.phase == SessionPhase::Tracking {
            let time_str = live.current_time_str.clone();
            apply_time(live, time_str);
        }
        debug!(
            km_offset = live.km_offset,
            km = format!("{:.3}", live.current_km),
            "Km offset changed"
        );
        self.session.publish(live);
        Ok(())
    }
}

impl<S: RouteStore> Drop for LiveTrackingController<S> {
    fn drop(&mut self) {
        let _ = self.dispose();
    }
}

fn ensure_not_disposed(inner: &SessionInner) -> Result<(), LiveError> {
    match inner.live.phase {
        SessionPhase::Disposed => Err(LiveError::Disposed),
        _ => Ok(()),
    }
}

fn ensure_idle(inner: &SessionInner) -> Result<(), LiveError> {
    match inner.live.phase {
        SessionPhase::Idle => Ok(()),
        SessionPhase::Disposed => Err(LiveError::Disposed),
        SessionPhase::Loaded | SessionPhase::Tracking => Err(LiveError::AlreadyLoaded),
    }
}

fn ensure_loaded(inner: &SessionInner) -> Result<(), LiveError> {
    match inner.live.phase {
        SessionPhase::Loaded | SessionPhase::Tracking => Ok(()),
        SessionPhase::Idle => Err(LiveError::NotLoaded),
        SessionPhase::Disposed => Err(LiveError::Disposed),
    }
}
