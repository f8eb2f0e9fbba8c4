//! Integration tests for the live tracking session.
//!
//! These tests drive complete sessions through the public API:
//! - Bundle JSON → MemoryRouteStore → LiveTrackingController
//! - Clock changes, offsets and the auto tick
//! - Live store updates flowing into published snapshots
//! - Disposal and drop
//!
//! Run with: `cargo test --test live_tracking_integration`

use std::sync::Arc;
use std::time::Duration;

use ebula::config::DriveSettings;
use ebula::live::{ControllerConfig, LiveError, LiveTrackingController, SessionPhase};
use ebula::model::{RouteId, TimetableEntry, TrackObject, TrackObjectKind, Trip, TripId};
use ebula::store::{MemoryRouteStore, RouteBundle};
use ebula::timeline::TimelineCategory;

const EPS: f64 = 1e-9;

// ============================================================================
// Test Helpers
// ============================================================================

const RIESA_DRESDEN: &str = r#"{
    "version": 1,
    "exportedAt": 1718000000000,
    "route": { "name": "Riesa - Dresden", "startKm": 0.0, "endKm": 100.0 },
    "trackObjects": [
        { "km": 0.0, "type": "STATION", "name": "Riesa" },
        { "km": 12.4, "type": "SPEED_CHANGE", "speedLimit": 120 },
        { "km": 30.0, "type": "BAHNUEBERGANG", "name": "Niederau" },
        { "km": 50.0, "type": "STATION", "name": "Coswig" },
        { "km": 50.0, "type": "SIGNAL", "name": "A" },
        { "km": 70.0, "type": "SLOW_SPEED", "speedLimit": 40, "speedLimitEnd": 72.5 }
    ],
    "timetableEntries": [
        { "km": 0.0, "stationName": "Riesa", "departureTime": "08:00" },
        { "km": 20.0, "stationName": "Priestewitz", "isStop": false },
        { "km": 50.02, "stationName": "Coswig", "arrivalTime": "08:30", "departureTime": "08:32" },
        { "km": 100.0, "stationName": "Dresden Hbf", "arrivalTime": "09:00" }
    ],
    "trips": [
        { "name": "RE 50", "calculationMode": "TIME_BASED" }
    ]
}"#;

/// Import the sample bundle and return the store with its route and trip.
fn create_store() -> (Arc<MemoryRouteStore>, RouteId, TripId) {
    let bundle = RouteBundle::from_json(RIESA_DRESDEN).expect("sample bundle parses");
    let (store, route_id) = MemoryRouteStore::from_bundle(bundle).expect("sample imports");
    let trip_id = store.trips_for_route(route_id)[0].id;
    (Arc::new(store), route_id, trip_id)
}

/// Create a controller with the sample trip loaded.
async fn create_session() -> (
    LiveTrackingController<MemoryRouteStore>,
    Arc<MemoryRouteStore>,
    RouteId,
) {
    let (store, route_id, trip_id) = create_store();
    let controller = LiveTrackingController::new(Arc::clone(&store));
    controller.load(route_id, trip_id).await.unwrap();
    (controller, store, route_id)
}

// ============================================================================
// Position
// ============================================================================

#[tokio::test]
async fn test_time_based_session_interpolates_between_stops() {
    let (controller, _store, _) = create_session().await;

    controller.set_time("08:15").unwrap();
    let state = controller.state();
    // Coswig anchors on its departure at 08:32
    assert!((state.current_km - 50.02 * 15.0 / 32.0).abs() < EPS);
    assert_eq!(state.next_stop.as_ref().unwrap().station_name, "Coswig");
    assert_eq!(state.prev_stop.as_ref().unwrap().station_name, "Riesa");

    controller.set_time("08:45").unwrap();
    let state = controller.state();
    let expected = 50.02 + (100.0 - 50.02) * 13.0 / 28.0;
    assert!((state.current_km - expected).abs() < EPS);
    assert!((state.progress - expected / 100.0).abs() < EPS);
    assert_eq!(state.next_stop.as_ref().unwrap().station_name, "Dresden Hbf");
}

#[tokio::test]
async fn test_position_clamped_before_departure_and_after_arrival() {
    let (controller, _store, _) = create_session().await;

    controller.set_time("07:30").unwrap();
    assert_eq!(controller.state().current_km, 0.0);

    controller.set_time("09:30").unwrap();
    let state = controller.state();
    assert_eq!(state.current_km, 100.0);
    assert_eq!(state.progress, 1.0);
    assert!(state.next_stop.is_none());
    assert_eq!(state.prev_stop.as_ref().unwrap().station_name, "Dresden Hbf");
}

#[tokio::test]
async fn test_speed_based_trip_across_midnight() {
    let (store, route_id, _) = create_store();
    let trip_id = store.save_trip(Trip {
        route_id,
        ..Trip::speed_based("Nacht-RE", "23:50", 60.0).with_start_km_offset(0.5)
    });
    let controller = LiveTrackingController::new(Arc::clone(&store));
    controller.load(route_id, trip_id).await.unwrap();

    controller.set_time("00:10").unwrap();
    let state = controller.state();
    assert!((state.current_km - 20.5).abs() < EPS);
    assert!((state.progress - 0.205).abs() < EPS);
}

#[tokio::test]
async fn test_trip_and_session_offsets_add_up() {
    let (store, route_id, _) = create_store();
    let trip_id = store.save_trip(Trip {
        route_id,
        ..Trip::time_based("RE 50 korrigiert").with_start_km_offset(0.2)
    });
    let controller = LiveTrackingController::new(Arc::clone(&store));
    controller.load(route_id, trip_id).await.unwrap();

    controller.set_time("08:00").unwrap();
    controller.adjust_km_offset(0.3).unwrap();
    assert!((controller.state().current_km - 0.5).abs() < EPS);

    controller.reset_km_offset().unwrap();
    assert!((controller.state().current_km - 0.2).abs() < EPS);
}

// ============================================================================
// Timeline
// ============================================================================

#[tokio::test]
async fn test_snapshot_timeline_merges_features_and_stops() {
    let (controller, _store, _) = create_session().await;
    controller.set_time("08:15").unwrap();

    let state = controller.state();
    let items = state.timeline();

    // 6 track objects; Riesa and Coswig stops merge into their stations,
    // Priestewitz passes through, Dresden Hbf is a scheduled stop
    assert_eq!(items.len(), 7);
    assert_eq!(items[3].category, TimelineCategory::Station);
    assert_eq!(items[4].category, TimelineCategory::Signal);
    assert_eq!(items.last().unwrap().category, TimelineCategory::ScheduledStop);
    assert_eq!(items.last().unwrap().primary_label, "Dresden Hbf");

    // 23.45 km lies between the speed change and the level crossing
    assert_eq!(state.timeline_index(&items), Some(1));
}

// ============================================================================
// Live collections
// ============================================================================

#[tokio::test]
async fn test_store_updates_reach_snapshots() {
    let (controller, store, route_id) = create_session().await;
    controller.set_time("08:15").unwrap();
    let mut rx = controller.subscribe();
    let km_before = controller.state().current_km;

    store.save_track_object(TrackObject {
        route_id,
        ..TrackObject::new(TrackObjectKind::TunnelStart, 40.0).with_name("Boselspitze")
    });
    rx.changed().await.unwrap();

    let state = rx.borrow_and_update().clone();
    assert_eq!(state.track_objects.len(), 7);
    assert_eq!(state.current_km, km_before);

    // The next clock change uses the new timetable
    store.save_timetable_entry(TimetableEntry {
        route_id,
        ..TimetableEntry::new("Weinböhla", 40.0).arriving("08:20")
    });
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().timetable.len(), 5);

    controller.set_time("08:15").unwrap();
    let state = controller.state();
    assert!((state.current_km - 40.0 * 15.0 / 20.0).abs() < EPS);
    assert_eq!(state.next_stop.as_ref().unwrap().station_name, "Weinböhla");
}

// ============================================================================
// Auto tick
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_auto_tick_with_configured_step() {
    let (store, route_id, trip_id) = create_store();
    let drive = DriveSettings {
        tick_interval_ms: 100,
        tick_step_secs: 60,
        auto_scroll: true,
    };
    let controller = LiveTrackingController::with_config(store, ControllerConfig::from(&drive));
    controller.load(route_id, trip_id).await.unwrap();
    controller.set_time("08:00").unwrap();

    controller.start_auto_tick().unwrap();
    tokio::time::sleep(Duration::from_millis(350)).await;
    controller.stop_auto_tick().unwrap();

    let state = controller.state();
    assert_eq!(state.current_time_str, "08:03");
    assert!(!state.is_auto_ticking);
    assert!((state.current_km - 50.02 * 3.0 / 32.0).abs() < EPS);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(controller.state().current_time_str, "08:03");
}

#[tokio::test(start_paused = true)]
async fn test_no_snapshot_after_stop() {
    let (controller, _store, _) = create_session().await;
    controller.set_time("08:00").unwrap();
    let mut rx = controller.subscribe();

    controller.start_auto_tick().unwrap();
    tokio::time::sleep(Duration::from_millis(2500)).await;
    controller.stop_auto_tick().unwrap();
    let at_stop = rx.borrow_and_update().clone();
    assert_eq!(at_stop.current_time_str, "08:00:02");

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_offset_change_while_ticking() {
    let (controller, _store, _) = create_session().await;
    controller.set_time("08:00").unwrap();
    controller.start_auto_tick().unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    controller.adjust_km_offset(1.0).unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    let state = controller.state();
    assert_eq!(state.current_time_str, "08:00:02");
    assert!((state.current_km - (50.02 * 2.0 / 1920.0 + 1.0)).abs() < EPS);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_dispose_stops_everything() {
    let (controller, store, route_id) = create_session().await;
    controller.set_time("08:00").unwrap();
    controller.start_auto_tick().unwrap();
    let mut rx = controller.subscribe();

    controller.dispose().unwrap();
    assert_eq!(rx.borrow_and_update().phase, SessionPhase::Disposed);

    store.save_timetable_entry(TimetableEntry {
        route_id,
        ..TimetableEntry::new("Radebeul", 90.0)
    });
    store.save_track_object(TrackObject {
        route_id,
        ..TrackObject::new(TrackObjectKind::Signal, 90.0)
    });
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert!(!rx.has_changed().unwrap_or(false));
    assert!(matches!(
        controller.set_time("08:30"),
        Err(LiveError::Disposed)
    ));
}

#[tokio::test]
async fn test_drop_disposes_session() {
    let (controller, _store, _) = create_session().await;
    let rx = controller.subscribe();

    drop(controller);
    assert_eq!(rx.borrow().phase, SessionPhase::Disposed);
}

#[tokio::test]
async fn test_unknown_trip_leaves_session_idle() {
    let (store, route_id, _) = create_store();
    let controller = LiveTrackingController::new(store);

    assert!(matches!(
        controller.load(route_id, 4242).await,
        Err(LiveError::TripNotFound(4242))
    ));
    assert_eq!(controller.state().phase, SessionPhase::Idle);
}

// ============================================================================
// Bundles
// ============================================================================

#[tokio::test]
async fn test_exported_bundle_drives_the_same() {
    let (store, route_id, _) = create_store();
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("riesa-dresden.json");

    store.export_bundle(route_id).unwrap().save(&path).unwrap();
    let bundle = RouteBundle::load(&path).unwrap();
    let (copy, copy_route) = MemoryRouteStore::from_bundle(bundle).unwrap();
    let copy_trip = copy.trips_for_route(copy_route)[0].id;

    let controller = LiveTrackingController::new(Arc::new(copy));
    controller.load(copy_route, copy_trip).await.unwrap();
    controller.set_time("08:15").unwrap();

    assert!((controller.state().current_km - 50.02 * 15.0 / 32.0).abs() < EPS);
}
