//! Position engine: in-world clock time to km along the route.
//!
//! Two calculation modes are supported, selected per [`Trip`](crate::model::Trip):
//!
//! - **Time based** - the timetable's departure (or arrival) times become
//!   [`Anchor`]s and the current km is linearly interpolated between the
//!   two anchors bracketing the clock. Before the first anchor the train
//!   sits at the first anchor; after the last it sits at the last.
//! - **Speed based** - km grows linearly from the trip's departure time at
//!   the trip's average speed. The result is not bounded by the route end.
//!
//! The engine never fails. Unusable input degrades to `0.0` km or `None`,
//! and callers clamp for display through [`compute_progress`].
//!
//! # Example
//!
//! ```
//! use ebula::model::{TimetableEntry, Trip};
//! use ebula::position::compute_km;
//!
//! let timetable = vec![
//!     TimetableEntry::new("Riesa", 0.0).departing("08:00"),
//!     TimetableEntry::new("Priestewitz", 20.0).arriving("08:20"),
//! ];
//! let km = compute_km("08:10", &Trip::time_based("RB 31"), &timetable);
//! assert!((km - 10.0).abs() < 1e-9);
//! ```

mod anchor;
mod engine;

pub use anchor::{build_anchors, Anchor};
pub use engine::{compute_km, compute_progress, locate, next_stop, prev_stop, Position};
