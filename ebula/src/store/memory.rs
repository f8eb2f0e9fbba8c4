//! In-memory route store.
//!
//! Keeps all records in process memory. Track objects and timetables live
//! inside their `watch` senders, so every write is immediately visible to
//! all sessions following that route.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;
use tracing::debug;

use super::bundle::{BundleError, RouteBundle};
use super::traits::RouteStore;
use super::StoreError;
use crate::model::{Route, RouteId, TimetableEntry, TrackObject, Trip, TripId};

#[derive(Default)]
struct StoreInner {
    next_id: i64,
    routes: BTreeMap<RouteId, Route>,
    trips: BTreeMap<TripId, Trip>,
    track_objects: HashMap<RouteId, watch::Sender<Vec<TrackObject>>>,
    timetables: HashMap<RouteId, watch::Sender<Vec<TimetableEntry>>>,
}

impl StoreInner {
    fn assign_id(&mut self, id: i64) -> i64 {
        if id > 0 {
            self.next_id = self.next_id.max(id);
            id
        } else {
            self.next_id += 1;
            self.next_id
        }
    }

    fn objects_channel(&mut self, route_id: RouteId) -> &watch::Sender<Vec<TrackObject>> {
        self.track_objects
            .entry(route_id)
            .or_insert_with(|| watch::channel(Vec::new()).0)
    }

    fn timetable_channel(&mut self, route_id: RouteId) -> &watch::Sender<Vec<TimetableEntry>> {
        self.timetables
            .entry(route_id)
            .or_insert_with(|| watch::channel(Vec::new()).0)
    }
}

/// Drop the record `id` from every route's list except `keep`, notifying
/// only the channels that held it.
fn remove_from_other_routes<T>(
    channels: &HashMap<RouteId, watch::Sender<Vec<T>>>,
    keep: RouteId,
    is_record: impl Fn(&T) -> bool,
) {
    for (route_id, tx) in channels {
        if *route_id == keep {
            continue;
        }
        tx.send_if_modified(|list| {
            let before = list.len();
            list.retain(|item| !is_record(item));
            list.len() != before
        });
    }
}

fn sort_track_objects(objects: &mut [TrackObject]) {
    objects.sort_by(|a, b| {
        a.km.total_cmp(&b.km)
            .then_with(|| a.sort_order.cmp(&b.sort_order))
    });
}

fn sort_timetable(entries: &mut [TimetableEntry]) {
    entries.sort_by(|a, b| a.km.total_cmp(&b.km));
}

/// Thread-safe in-memory [`RouteStore`].
///
/// Records with `id == 0` get a fresh id when saved; records with an id
/// replace the stored record of that id.
#[derive(Default)]
pub struct MemoryRouteStore {
    inner: RwLock<StoreInner>,
}

impl MemoryRouteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one imported bundle.
    pub fn from_bundle(bundle: RouteBundle) -> Result<(Self, RouteId), BundleError> {
        let store = Self::new();
        let route_id = store.import_bundle(bundle)?;
        Ok((store, route_id))
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ─── Routes ─────────────────────────────────────────────────────────

    /// Insert or replace a route, returning its id.
    pub fn save_route(&self, mut route: Route) -> RouteId {
        let mut inner = self.write();
        route.id = inner.assign_id(route.id);
        let id = route.id;
        inner.routes.insert(id, route);
        id
    }

    /// A route by id.
    pub fn route(&self, id: RouteId) -> Option<Route> {
        self.read().routes.get(&id).cloned()
    }

    /// All routes ordered by name.
    pub fn routes(&self) -> Vec<Route> {
        let mut routes: Vec<Route> = self.read().routes.values().cloned().collect();
        routes.sort_by(|a, b| a.name.cmp(&b.name));
        routes
    }

    /// Delete a route together with its track objects, timetable and trips.
    ///
    /// Returns false if the route did not exist.
    pub fn delete_route(&self, id: RouteId) -> bool {
        let mut inner = self.write();
        if inner.routes.remove(&id).is_none() {
            return false;
        }

        inner.trips.retain(|_, trip| trip.route_id != id);
        if let Some(tx) = inner.track_objects.get(&id) {
            tx.send_replace(Vec::new());
        }
        if let Some(tx) = inner.timetables.get(&id) {
            tx.send_replace(Vec::new());
        }

        debug!(route_id = id, "Route deleted");
        true
    }

    // ─── Trips ──────────────────────────────────────────────────────────

    /// Insert or replace a trip, returning its id.
    pub fn save_trip(&self, mut trip: Trip) -> TripId {
        let mut inner = self.write();
        trip.id = inner.assign_id(trip.id);
        let id = trip.id;
        inner.trips.insert(id, trip);
        id
    }

    /// A trip by id.
    pub fn trip(&self, id: TripId) -> Option<Trip> {
        self.read().trips.get(&id).cloned()
    }

    /// Trips of a route ordered by name.
    pub fn trips_for_route(&self, route_id: RouteId) -> Vec<Trip> {
        let mut trips: Vec<Trip> = self
            .read()
            .trips
            .values()
            .filter(|trip| trip.route_id == route_id)
            .cloned()
            .collect();
        trips.sort_by(|a, b| a.name.cmp(&b.name));
        trips
    }

    /// Delete a trip. Returns false if it did not exist.
    pub fn delete_trip(&self, id: TripId) -> bool {
        self.write().trips.remove(&id).is_some()
    }

    // ─── Track objects ──────────────────────────────────────────────────

    /// Insert or replace a track object and publish the route's new list.
    pub fn save_track_object(&self, mut obj: TrackObject) -> i64 {
        let mut inner = self.write();
        obj.id = inner.assign_id(obj.id);
        let id = obj.id;
        remove_from_other_routes(&inner.track_objects, obj.route_id, |o: &TrackObject| {
            o.id == id
        });
        inner.objects_channel(obj.route_id).send_modify(|objects| {
            objects.retain(|o| o.id != id);
            objects.push(obj);
            sort_track_objects(objects);
        });
        id
    }

    /// Delete a track object. Returns false if it did not exist.
    pub fn delete_track_object(&self, id: i64) -> bool {
        let inner = self.write();
        for tx in inner.track_objects.values() {
            if tx.borrow().iter().any(|o| o.id == id) {
                tx.send_modify(|objects| objects.retain(|o| o.id != id));
                return true;
            }
        }
        false
    }

    /// Current track objects of a route.
    pub fn track_objects(&self, route_id: RouteId) -> Vec<TrackObject> {
        self.read()
            .track_objects
            .get(&route_id)
            .map(|tx| tx.borrow().clone())
            .unwrap_or_default()
    }

    // ─── Timetable ──────────────────────────────────────────────────────

    /// Insert or replace a timetable entry and publish the route's new list.
    pub fn save_timetable_entry(&self, mut entry: TimetableEntry) -> i64 {
        let mut inner = self.write();
        entry.id = inner.assign_id(entry.id);
        let id = entry.id;
        remove_from_other_routes(&inner.timetables, entry.route_id, |e: &TimetableEntry| {
            e.id == id
        });
        inner.timetable_channel(entry.route_id).send_modify(|entries| {
            entries.retain(|e| e.id != id);
            entries.push(entry);
            sort_timetable(entries);
        });
        id
    }

    /// Delete a timetable entry. Returns false if it did not exist.
    pub fn delete_timetable_entry(&self, id: i64) -> bool {
        let inner = self.write();
        for tx in inner.timetables.values() {
            if tx.borrow().iter().any(|e| e.id == id) {
                tx.send_modify(|entries| entries.retain(|e| e.id != id));
                return true;
            }
        }
        false
    }

    /// Current timetable of a route.
    pub fn timetable(&self, route_id: RouteId) -> Vec<TimetableEntry> {
        self.read()
            .timetables
            .get(&route_id)
            .map(|tx| tx.borrow().clone())
            .unwrap_or_default()
    }

    // ─── Bundles ────────────────────────────────────────────────────────

    /// Import a bundle under fresh ids, returning the new route id.
    ///
    /// Trips in the bundle are attached to the imported route.
    pub fn import_bundle(&self, bundle: RouteBundle) -> Result<RouteId, BundleError> {
        bundle.validate()?;

        let mut inner = self.write();
        let mut route = bundle.route;
        route.id = inner.assign_id(0);
        let route_id = route.id;
        inner.routes.insert(route_id, route);

        let mut objects = bundle.track_objects;
        for obj in objects.iter_mut() {
            obj.id = inner.assign_id(0);
            obj.route_id = route_id;
        }
        sort_track_objects(&mut objects);
        let object_count = objects.len();
        inner.objects_channel(route_id).send_replace(objects);

        let mut entries = bundle.timetable_entries;
        for entry in entries.iter_mut() {
            entry.id = inner.assign_id(0);
            entry.route_id = route_id;
        }
        sort_timetable(&mut entries);
        let entry_count = entries.len();
        inner.timetable_channel(route_id).send_replace(entries);

        let trip_count = bundle.trips.len();
        for mut trip in bundle.trips {
            trip.id = inner.assign_id(0);
            trip.route_id = route_id;
            inner.trips.insert(trip.id, trip);
        }

        debug!(
            route_id,
            track_objects = object_count,
            timetable_entries = entry_count,
            trips = trip_count,
            "Route bundle imported"
        );
        Ok(route_id)
    }

    /// Export a route as a portable bundle with all ids reset to zero.
    pub fn export_bundle(&self, route_id: RouteId) -> Result<RouteBundle, BundleError> {
        let route = self
            .route(route_id)
            .ok_or(BundleError::RouteNotFound(route_id))?;

        let track_objects = self
            .track_objects(route_id)
            .into_iter()
            .map(|obj| TrackObject {
                id: 0,
                route_id: 0,
                ..obj
            })
            .collect();
        let timetable_entries = self
            .timetable(route_id)
            .into_iter()
            .map(|entry| TimetableEntry {
                id: 0,
                route_id: 0,
                ..entry
            })
            .collect();
        let trips = self
            .trips_for_route(route_id)
            .into_iter()
            .map(|trip| Trip {
                id: 0,
                route_id: 0,
                ..trip
            })
            .collect();

        Ok(RouteBundle::new(
            Route { id: 0, ..route },
            track_objects,
            timetable_entries,
            trips,
        ))
    }
}

impl RouteStore for MemoryRouteStore {
    async fn fetch_route(&self, id: RouteId) -> Result<Option<Route>, StoreError> {
        Ok(self.route(id))
    }

    async fn fetch_trip(&self, id: TripId) -> Result<Option<Trip>, StoreError> {
        Ok(self.trip(id))
    }

    fn observe_track_objects(&self, route_id: RouteId) -> watch::Receiver<Vec<TrackObject>> {
        self.write().objects_channel(route_id).subscribe()
    }

    fn observe_timetable(&self, route_id: RouteId) -> watch::Receiver<Vec<TimetableEntry>> {
        self.write().timetable_channel(route_id).subscribe()
    }
}
