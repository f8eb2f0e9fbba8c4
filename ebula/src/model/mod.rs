//! Route data model.
//!
//! These are the read-only records delivered by a [`RouteStore`](crate::store::RouteStore):
//!
//! - [`Route`] - a line with its km range
//! - [`TrackObject`] / [`TrackObjectKind`] - fixed features along the line
//! - [`TimetableEntry`] - scheduled passing points and stops
//! - [`Trip`] / [`CalculationMode`] - one run over the route
//!
//! The serde representation uses camelCase field names and the upper-case
//! enum constants of the route bundle format, so bundles exported by the
//! editor app can be read as they are.

mod schedule;
mod track;

pub use schedule::{CalculationMode, TimetableEntry, Trip};
pub use track::{TrackObject, TrackObjectKind};

use serde::{Deserialize, Serialize};

/// Store identity of a [`Route`].
pub type RouteId = i64;

/// Store identity of a [`Trip`].
pub type TripId = i64;

/// A rail route between two km posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default)]
    pub id: RouteId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_km: f64,
    #[serde(default = "default_end_km")]
    pub end_km: f64,
}

fn default_end_km() -> f64 {
    100.0
}

impl Route {
    /// Create a route spanning `start_km..end_km`.
    pub fn new(name: impl Into<String>, start_km: f64, end_km: f64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: String::new(),
            start_km,
            end_km,
        }
    }

    /// Route length in km (zero or negative for a degenerate route).
    pub fn length_km(&self) -> f64 {
        self.end_km - self.start_km
    }
}
