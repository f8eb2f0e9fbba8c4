//! Portable JSON route bundles.
//!
//! A bundle carries one route with its track objects, timetable and
//! (optionally) trips:
//!
//! ```json
//! {
//!   "version": 1,
//!   "exportedAt": 1718000000000,
//!   "route": { "name": "Riesa - Dresden", "startKm": 0.0, "endKm": 100.0 },
//!   "trackObjects": [ { "km": 12.5, "type": "SIGNAL", "name": "A" } ],
//!   "timetableEntries": [ { "km": 0.0, "stationName": "Riesa", "departureTime": "08:00" } ],
//!   "trips": []
//! }
//! ```
//!
//! Ids inside a bundle are meaningless; importing assigns fresh ones.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Route, RouteId, TimetableEntry, TrackObject, Trip};

/// Highest bundle format version this build understands.
pub const BUNDLE_VERSION: u32 = 1;

fn default_version() -> u32 {
    BUNDLE_VERSION
}

/// Errors reading or writing route bundles.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("Invalid bundle JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to access bundle file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported bundle version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Route {0} not found")]
    RouteNotFound(RouteId),
}

/// One route with everything needed to drive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteBundle {
    /// Format version; bundles written without one are read as the current.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Export time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub exported_at: i64,
    pub route: Route,
    #[serde(default)]
    pub track_objects: Vec<TrackObject>,
    #[serde(default)]
    pub timetable_entries: Vec<TimetableEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trips: Vec<Trip>,
}

impl RouteBundle {
    /// Build a bundle stamped with the current time.
    pub fn new(
        route: Route,
        track_objects: Vec<TrackObject>,
        timetable_entries: Vec<TimetableEntry>,
        trips: Vec<Trip>,
    ) -> Self {
        Self {
            version: BUNDLE_VERSION,
            exported_at: chrono::Utc::now().timestamp_millis(),
            route,
            track_objects,
            timetable_entries,
            trips,
        }
    }

    /// Parse and validate a bundle.
    pub fn from_json(json: &str) -> Result<Self, BundleError> {
        let bundle: Self = serde_json::from_str(json)?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, BundleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a bundle file.
    pub fn load(path: &Path) -> Result<Self, BundleError> {
        let json = std::fs::read_to_string(path).map_err(|source| BundleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Write a bundle file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), BundleError> {
        let io_err = |source| BundleError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        std::fs::write(path, self.to_json_pretty()?).map_err(io_err)
    }

    pub(crate) fn validate(&self) -> Result<(), BundleError> {
        if self.version == 0 || self.version > BUNDLE_VERSION {
            return Err(BundleError::UnsupportedVersion {
                found: self.version,
                supported: BUNDLE_VERSION,
            });
        }
        Ok(())
    }
}
