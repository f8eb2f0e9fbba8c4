//! Timeline builder: one ordered strip of track features and stops.
//!
//! The presentation layer calls [`merge`] with the latest track objects and
//! timetable snapshots and renders the result top to bottom. Merging is a
//! pure function; the same inputs always give the same strip.
//!
//! # Ordering
//!
//! Items are ordered by km, then by [`TimelineCategory`] rank, then by the
//! track object's `sort_order`. Remaining ties keep input order.
//!
//! # Deduplication
//!
//! A timetable stop lying within [`STATION_MERGE_TOLERANCE_KM`] of a station
//! track object describes the same physical station and is dropped in
//! favour of the track object.

mod builder;
mod item;

pub use builder::{current_index, merge, STATION_MERGE_TOLERANCE_KM};
pub use item::{ColorKey, TimelineCategory, TimelineItem};
