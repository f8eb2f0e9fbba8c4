//! Timetable entries and trips.

use serde::{Deserialize, Serialize};

use super::{RouteId, TripId};

/// A scheduled point on the route.
///
/// Either time may be empty: the first station usually has no arrival and
/// the last no departure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub route_id: RouteId,
    pub km: f64,
    pub station_name: String,
    /// Arrival as `"HH:mm"`, empty when not given.
    #[serde(default)]
    pub arrival_time: String,
    /// Departure as `"HH:mm"`, empty when not given.
    #[serde(default)]
    pub departure_time: String,
    #[serde(default)]
    pub track_number: String,
    #[serde(default, rename = "dwellTimeSeconds")]
    pub dwell_time_secs: u32,
    /// `false` for a pass-through point that is not a scheduled halt.
    #[serde(default = "default_is_stop")]
    pub is_stop: bool,
}

fn default_is_stop() -> bool {
    true
}

impl TimetableEntry {
    /// Create a scheduled stop with no times.
    pub fn new(station_name: impl Into<String>, km: f64) -> Self {
        Self {
            id: 0,
            route_id: 0,
            km,
            station_name: station_name.into(),
            arrival_time: String::new(),
            departure_time: String::new(),
            track_number: String::new(),
            dwell_time_secs: 0,
            is_stop: true,
        }
    }

    /// Set the arrival time.
    pub fn arriving(mut self, time: impl Into<String>) -> Self {
        self.arrival_time = time.into();
        self
    }

    /// Set the departure time.
    pub fn departing(mut self, time: impl Into<String>) -> Self {
        self.departure_time = time.into();
        self
    }

    /// Mark the entry as a pass-through point.
    pub fn passing(mut self) -> Self {
        self.is_stop = false;
        self
    }

    /// Set the platform track.
    pub fn on_track(mut self, track: impl Into<String>) -> Self {
        self.track_number = track.into();
        self
    }
}

/// How a trip's position is derived from the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CalculationMode {
    /// Interpolate between timetable times.
    #[default]
    #[serde(rename = "TIME_BASED")]
    TimeBased,
    /// Extrapolate from departure time and an average speed.
    #[serde(rename = "SPEED_BASED")]
    SpeedBased,
}

impl std::fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimeBased => write!(f, "time-based"),
            Self::SpeedBased => write!(f, "speed-based"),
        }
    }
}

/// One run over a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(default)]
    pub id: TripId,
    #[serde(default)]
    pub route_id: RouteId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub calculation_mode: CalculationMode,
    /// Average speed in km/h, used only in [`CalculationMode::SpeedBased`].
    #[serde(default = "default_avg_speed")]
    pub avg_speed_kmh: f64,
    /// Departure as `"HH:mm"`.
    #[serde(default, rename = "departureTimeStr")]
    pub departure_time: String,
    /// Correction added to every computed km.
    #[serde(default)]
    pub start_km_offset: f64,
}

fn default_avg_speed() -> f64 {
    80.0
}

impl Trip {
    /// A time-based trip that interpolates the timetable.
    pub fn time_based(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            route_id: 0,
            name: name.into(),
            calculation_mode: CalculationMode::TimeBased,
            avg_speed_kmh: default_avg_speed(),
            departure_time: String::new(),
            start_km_offset: 0.0,
        }
    }

    /// A speed-based trip departing at `departure_time`.
    pub fn speed_based(
        name: impl Into<String>,
        departure_time: impl Into<String>,
        avg_speed_kmh: f64,
    ) -> Self {
        Self {
            calculation_mode: CalculationMode::SpeedBased,
            avg_speed_kmh,
            departure_time: departure_time.into(),
            ..Self::time_based(name)
        }
    }

    /// Set the baked-in km correction.
    pub fn with_start_km_offset(mut self, offset: f64) -> Self {
        self.start_km_offset = offset;
        self
    }
}
