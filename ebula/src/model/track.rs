//! Track objects: the fixed features along a route.

use serde::{Deserialize, Serialize};

use super::RouteId;

/// Kind of a track feature.
///
/// Declaration order is significant: the timeline ranks features sharing a
/// km post in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackObjectKind {
    /// Station or halt.
    #[serde(rename = "STATION")]
    Station,
    /// Change of the permitted line speed.
    #[serde(rename = "SPEED_CHANGE")]
    SpeedChange,
    /// Level crossing.
    #[serde(rename = "BAHNUEBERGANG", alias = "LEVEL_CROSSING")]
    LevelCrossing,
    /// Main or distant signal.
    #[serde(rename = "SIGNAL")]
    Signal,
    /// Tunnel portal, start.
    #[serde(rename = "TUNNEL_START")]
    TunnelStart,
    /// Tunnel portal, end.
    #[serde(rename = "TUNNEL_END")]
    TunnelEnd,
    /// Start of a gradient section.
    #[serde(rename = "GRADIENT")]
    Gradient,
    /// Temporary speed restriction over a km range.
    #[serde(rename = "SLOW_SPEED", alias = "SLOW_SPEED_ZONE")]
    SlowSpeedZone,
}

impl TrackObjectKind {
    /// All kinds, in declaration order.
    pub const ALL: [TrackObjectKind; 8] = [
        Self::Station,
        Self::SpeedChange,
        Self::LevelCrossing,
        Self::Signal,
        Self::TunnelStart,
        Self::TunnelEnd,
        Self::Gradient,
        Self::SlowSpeedZone,
    ];

    /// Human-readable name of the kind, as shown in editors.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Station => "Station / halt",
            Self::SpeedChange => "Speed change",
            Self::LevelCrossing => "Level crossing",
            Self::Signal => "Signal",
            Self::TunnelStart => "Tunnel start",
            Self::TunnelEnd => "Tunnel end",
            Self::Gradient => "Gradient",
            Self::SlowSpeedZone => "Slow speed zone",
        }
    }

    /// Short EBuLa abbreviation.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Station => "Bf",
            Self::SpeedChange => "V",
            Self::LevelCrossing => "BÜ",
            Self::Signal => "Sig",
            Self::TunnelStart => "Tu▶",
            Self::TunnelEnd => "◀Tu",
            Self::Gradient => "‰",
            Self::SlowSpeedZone => "La",
        }
    }
}

impl std::fmt::Display for TrackObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A feature at a fixed km post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackObject {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub route_id: RouteId,
    pub km: f64,
    #[serde(rename = "type")]
    pub kind: TrackObjectKind,
    #[serde(default)]
    pub name: String,
    /// Permitted speed in km/h (speed changes and slow speed zones).
    #[serde(default)]
    pub speed_limit: Option<u32>,
    /// End km of a slow speed zone.
    #[serde(default)]
    pub speed_limit_end: Option<f64>,
    /// Gradient in per mille, positive uphill.
    #[serde(default, rename = "gradient")]
    pub gradient_permille: Option<f64>,
    #[serde(default)]
    pub notes: String,
    /// Tie-break for objects sharing the same km.
    #[serde(default)]
    pub sort_order: i32,
}

impl TrackObject {
    /// Create a bare object of `kind` at `km`.
    pub fn new(kind: TrackObjectKind, km: f64) -> Self {
        Self {
            id: 0,
            route_id: 0,
            km,
            kind,
            name: String::new(),
            speed_limit: None,
            speed_limit_end: None,
            gradient_permille: None,
            notes: String::new(),
            sort_order: 0,
        }
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the speed limit in km/h.
    pub fn with_speed_limit(mut self, limit: u32) -> Self {
        self.speed_limit = Some(limit);
        self
    }

    /// Set the end km of a slow speed zone.
    pub fn with_speed_limit_end(mut self, end_km: f64) -> Self {
        self.speed_limit_end = Some(end_km);
        self
    }

    /// Set the gradient in per mille.
    pub fn with_gradient(mut self, permille: f64) -> Self {
        self.gradient_permille = Some(permille);
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set the same-km tie-break.
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }
}
