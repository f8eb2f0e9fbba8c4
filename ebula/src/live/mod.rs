//! Live tracking session.
//!
//! A [`LiveTrackingController`] turns an in-world clock into a stream of
//! [`LiveState`] snapshots for one trip: current km, route progress and
//! the neighbouring stops.
//!
//! # Architecture
//!
//! ```text
//!                  ┌──────────────────────────────┐
//!   RouteStore ───►│ collection followers (2)     │──┐
//!                  └──────────────────────────────┘  │
//!                  ┌──────────────────────────────┐  │   ┌─────────┐   watch
//!   commands ─────►│ LiveTrackingController       │──┼──►│ Session │──────────► observers
//!                  └──────────────────────────────┘  │   └─────────┘
//!                  ┌──────────────────────────────┐  │
//!   interval ─────►│ auto tick (at most one)      │──┘
//!                  └──────────────────────────────┘
//! ```
//!
//! Phases move `Idle → Loaded → Tracking → Disposed`. Collection updates
//! replace the snapshot's lists without touching the computed position;
//! only a clock change (command or tick) or an offset change recomputes it.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use ebula::live::LiveTrackingController;
//! use ebula::store::MemoryRouteStore;
//!
//! let controller = LiveTrackingController::new(Arc::new(store));
//! controller.load(route_id, trip_id).await?;
//! controller.set_time("08:15")?;
//! controller.start_auto_tick()?;
//!
//! let mut rx = controller.subscribe();
//! while rx.changed().await.is_ok() {
//!     let state = rx.borrow_and_update().clone();
//!     println!("{} km {:.2}", state.current_time_str, state.current_km);
//! }
//! ```

mod config;
mod controller;
mod error;
mod session;
mod state;
mod ticker;

pub use config::{ControllerConfig, DEFAULT_TICK_INTERVAL, DEFAULT_TICK_STEP_SECS};
pub use controller::LiveTrackingController;
pub use error::LiveError;
pub use state::{LiveState, SessionPhase};
