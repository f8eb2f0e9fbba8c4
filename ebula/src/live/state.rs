//! Session snapshot types.

use std::sync::Arc;

use crate::model::{Route, TimetableEntry, TrackObject, Trip};
use crate::timeline::{self, TimelineItem};

/// Lifecycle phase of a tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No trip loaded.
    #[default]
    Idle,
    /// Route and trip fetched, no clock set yet.
    Loaded,
    /// A clock time is set; the tick may or may not be running.
    Tracking,
    /// Terminal. Tick and subscriptions are released.
    Disposed,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loaded => write!(f, "loaded"),
            Self::Tracking => write!(f, "tracking"),
            Self::Disposed => write!(f, "disposed"),
        }
    }
}

/// Immutable snapshot of a tracking session.
///
/// Published as `Arc<LiveState>`; readers never mutate it. The route data
/// collections are shared between consecutive snapshots until the store
/// delivers a replacement.
#[derive(Debug, Clone)]
pub struct LiveState {
    pub phase: SessionPhase,
    /// `None` before load, or when the loaded route id does not exist.
    pub route: Option<Route>,
    pub trip: Option<Trip>,
    pub track_objects: Arc<Vec<TrackObject>>,
    pub timetable: Arc<Vec<TimetableEntry>>,
    /// Km including both the trip offset and [`km_offset`](Self::km_offset).
    pub current_km: f64,
    /// Clock as last set, kept verbatim even when malformed.
    pub current_time_str: String,
    /// Route progress in `[0, 1]`.
    pub progress: f64,
    pub next_stop: Option<TimetableEntry>,
    pub prev_stop: Option<TimetableEntry>,
    pub is_auto_ticking: bool,
    /// Presentation hint only.
    pub auto_scroll_enabled: bool,
    /// Manual session correction in km.
    pub km_offset: f64,
}

impl Default for LiveState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            route: None,
            trip: None,
            track_objects: Arc::new(Vec::new()),
            timetable: Arc::new(Vec::new()),
            current_km: 0.0,
            current_time_str: String::new(),
            progress: 0.0,
            next_stop: None,
            prev_stop: None,
            is_auto_ticking: false,
            auto_scroll_enabled: true,
            km_offset: 0.0,
        }
    }
}

impl LiveState {
    /// Merged timeline of this snapshot's collections.
    pub fn timeline(&self) -> Vec<TimelineItem> {
        timeline::merge(&self.track_objects, &self.timetable)
    }

    /// Index of the timeline row the train is at or last passed.
    pub fn timeline_index(&self, items: &[TimelineItem]) -> Option<usize> {
        timeline::current_index(items, self.current_km)
    }
}
