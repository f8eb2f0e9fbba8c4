//! Timeline item types.

use crate::model::TrackObjectKind;

/// Category of a timeline item.
///
/// The derived `Ord` is the tie-break rank for items at the same km.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimelineCategory {
    Station,
    /// A timetable stop with no matching station track object.
    ScheduledStop,
    SpeedChange,
    LevelCrossing,
    Signal,
    TunnelStart,
    TunnelEnd,
    Gradient,
    SlowSpeedZone,
}

impl From<TrackObjectKind> for TimelineCategory {
    fn from(kind: TrackObjectKind) -> Self {
        match kind {
            TrackObjectKind::Station => Self::Station,
            TrackObjectKind::SpeedChange => Self::SpeedChange,
            TrackObjectKind::LevelCrossing => Self::LevelCrossing,
            TrackObjectKind::Signal => Self::Signal,
            TrackObjectKind::TunnelStart => Self::TunnelStart,
            TrackObjectKind::TunnelEnd => Self::TunnelEnd,
            TrackObjectKind::Gradient => Self::Gradient,
            TrackObjectKind::SlowSpeedZone => Self::SlowSpeedZone,
        }
    }
}

impl TimelineCategory {
    /// Whether the item is drawn as a station row.
    pub fn is_station(&self) -> bool {
        matches!(self, Self::Station | Self::ScheduledStop)
    }
}

/// Display colour of a timeline item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKey {
    Station,
    SpeedChange,
    LevelCrossing,
    Signal,
    Tunnel,
    Gradient,
    SlowSpeed,
}

impl ColorKey {
    /// Colour as `#RRGGBB`.
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Station => "#1565C0",
            Self::SpeedChange => "#E65100",
            Self::LevelCrossing => "#C62828",
            Self::Signal => "#6A1B9A",
            Self::Tunnel => "#37474F",
            Self::Gradient => "#2E7D32",
            Self::SlowSpeed => "#BF360C",
        }
    }
}

/// One row of the timeline strip.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineItem {
    pub km: f64,
    pub category: TimelineCategory,
    pub primary_label: String,
    pub secondary_label: Option<String>,
    /// Short glyph drawn on the track line.
    pub symbol: Option<String>,
    pub color: ColorKey,
}

impl TimelineItem {
    /// Whether the item lies behind the train at `current_km`.
    pub fn is_passed(&self, current_km: f64) -> bool {
        self.km < current_km
    }
}
