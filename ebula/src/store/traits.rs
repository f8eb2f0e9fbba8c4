//! The record store contract consumed by the live tracking session.

use std::future::Future;

use tokio::sync::watch;

use super::StoreError;
use crate::model::{Route, RouteId, TimetableEntry, TrackObject, Trip, TripId};

/// Source of route data for a tracking session.
///
/// One-shot reads are async so that implementations may hit a database or
/// the network. Live collections are `watch` channels: each receiver holds
/// the latest full list, and every change replaces the list as a whole.
///
/// # Example
///
/// ```ignore
/// use ebula::store::RouteStore;
///
/// async fn describe<S: RouteStore>(store: &S, route_id: i64) {
///     if let Ok(Some(route)) = store.fetch_route(route_id).await {
///         let objects = store.observe_track_objects(route_id);
///         println!("{}: {} track objects", route.name, objects.borrow().len());
///     }
/// }
/// ```
pub trait RouteStore: Send + Sync + 'static {
    /// Read a route once. `Ok(None)` if it does not exist.
    fn fetch_route(
        &self,
        id: RouteId,
    ) -> impl Future<Output = Result<Option<Route>, StoreError>> + Send;

    /// Read a trip once. `Ok(None)` if it does not exist.
    fn fetch_trip(&self, id: TripId)
        -> impl Future<Output = Result<Option<Trip>, StoreError>> + Send;

    /// Follow the route's track objects, ordered by km then `sort_order`.
    fn observe_track_objects(&self, route_id: RouteId) -> watch::Receiver<Vec<TrackObject>>;

    /// Follow the route's timetable, ordered by km.
    fn observe_timetable(&self, route_id: RouteId) -> watch::Receiver<Vec<TimetableEntry>>;
}
