//! ebula - electronic timetable and position tracking for rail routes
//!
//! This library turns an in-world clock into a train position along a
//! route: km post, route progress and the neighbouring stops, plus a merged
//! timeline of track features for display.
//!
//! # Modules
//!
//! - [`model`] - routes, track objects, timetable entries and trips
//! - [`time`] - time-of-day parsing and wraparound arithmetic
//! - [`position`] - the position engine (time based and speed based)
//! - [`timeline`] - merging track objects and stops into one strip
//! - [`store`] - the route store contract, an in-memory store, JSON bundles
//! - [`live`] - the live tracking session and its auto tick
//! - [`config`] - `~/.ebula/config.ini`
//! - [`logging`] - tracing setup
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use ebula::live::LiveTrackingController;
//! use ebula::store::{MemoryRouteStore, RouteBundle};
//!
//! let bundle = RouteBundle::load(path)?;
//! let (store, route_id) = MemoryRouteStore::from_bundle(bundle)?;
//! let trip_id = store.trips_for_route(route_id)[0].id;
//!
//! let controller = LiveTrackingController::new(Arc::new(store));
//! controller.load(route_id, trip_id).await?;
//! controller.set_time("08:15")?;
//! println!("km {:.3}", controller.state().current_km);
//! ```

pub mod config;
pub mod live;
pub mod logging;
pub mod model;
pub mod position;
pub mod store;
pub mod time;
pub mod timeline;

/// Version of the ebula library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
