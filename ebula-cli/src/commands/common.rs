//! Common types and utilities shared across CLI commands.

use std::path::Path;
use std::sync::Arc;

use ebula::live::LiveState;
use ebula::model::{RouteId, TimetableEntry, Trip, TripId};
use ebula::store::MemoryRouteStore;
use ebula::time::parse_time_of_day;
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Name of the trip used when a bundle carries none.
pub const DEFAULT_TRIP_NAME: &str = "Timetable";

/// A bundle imported into a fresh in-memory store.
pub struct OpenedBundle {
    pub store: Arc<MemoryRouteStore>,
    pub route_id: RouteId,
    pub trip_id: TripId,
    pub trip: Trip,
}

/// Load a bundle and pick the trip to drive.
///
/// `trip` selects by 1-based number or by name (case-insensitive). Without
/// it the first trip is used, or a time-based trip over the timetable when
/// the bundle has none.
pub fn open_bundle(
    runner: &CliRunner,
    path: &Path,
    trip: Option<&str>,
) -> Result<OpenedBundle, CliError> {
    let bundle = runner.load_bundle(path)?;
    let (store, route_id) =
        MemoryRouteStore::from_bundle(bundle).map_err(|error| CliError::Bundle {
            path: path.to_path_buf(),
            error,
        })?;

    let trips = store.trips_for_route(route_id);
    let trip = match (trip, trips.is_empty()) {
        (Some(selector), _) => select_trip(&trips, selector)
            .cloned()
            .ok_or_else(|| CliError::TripNotFound {
                requested: selector.to_string(),
                available: trips.iter().map(|t| t.name.clone()).collect(),
            })?,
        (None, false) => trips[0].clone(),
        (None, true) => {
            let mut trip = Trip {
                route_id,
                ..Trip::time_based(DEFAULT_TRIP_NAME)
            };
            trip.id = store.save_trip(trip.clone());
            info!(route_id, "Bundle has no trips, using the timetable");
            trip
        }
    };

    Ok(OpenedBundle {
        store: Arc::new(store),
        route_id,
        trip_id: trip.id,
        trip,
    })
}

/// Find a trip by 1-based number or by name.
pub fn select_trip<'a>(trips: &'a [Trip], selector: &str) -> Option<&'a Trip> {
    let selector = selector.trim();
    if let Ok(n) = selector.parse::<usize>() {
        if n >= 1 {
            if let Some(trip) = trips.get(n - 1) {
                return Some(trip);
            }
        }
    }
    trips
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(selector))
}

/// Reject a clock argument that is not a time of day.
pub fn validate_time(time: &str) -> Result<(), CliError> {
    parse_time_of_day(time)
        .map(|_| ())
        .ok_or_else(|| CliError::InvalidTime(time.to_string()))
}

/// Stop as `Name (km 50.000, arr 08:30, dep 08:32)`.
pub fn format_stop(stop: Option<&TimetableEntry>) -> String {
    let Some(stop) = stop else {
        return "-".to_string();
    };

    let mut parts = vec![format!("km {:.3}", stop.km)];
    if !stop.arrival_time.is_empty() {
        parts.push(format!("arr {}", stop.arrival_time));
    }
    if !stop.departure_time.is_empty() {
        parts.push(format!("dep {}", stop.departure_time));
    }
    if !stop.track_number.is_empty() {
        parts.push(format!("track {}", stop.track_number));
    }
    format!("{} ({})", stop.station_name, parts.join(", "))
}

/// One status line per snapshot.
pub fn format_state_line(state: &LiveState) -> String {
    let next = state
        .next_stop
        .as_ref()
        .map(|s| format!("next {} in {:.1} km", s.station_name, s.km - state.current_km))
        .unwrap_or_else(|| "next -".to_string());

    let mut line = format!(
        "{:<8}  km {:>8.3}  {:>5.1}%  {}",
        state.current_time_str,
        state.current_km,
        state.progress * 100.0,
        next
    );
    if state.km_offset != 0.0 {
        line.push_str(&format!("  (offset {:+.3} km)", state.km_offset));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trips() -> Vec<Trip> {
        vec![Trip::time_based("RE 50"), Trip::speed_based("RB 31", "08:00", 80.0)]
    }

    #[test]
    fn test_select_trip_by_number() {
        let trips = trips();
        assert_eq!(select_trip(&trips, "2").unwrap().name, "RB 31");
        assert!(select_trip(&trips, "3").is_none());
        assert!(select_trip(&trips, "0").is_none());
    }

    #[test]
    fn test_select_trip_by_name() {
        let trips = trips();
        assert_eq!(select_trip(&trips, "re 50").unwrap().name, "RE 50");
        assert!(select_trip(&trips, "ICE 1").is_none());
    }

    #[test]
    fn test_validate_time() {
        assert!(validate_time("08:15").is_ok());
        assert!(validate_time("08:15:30").is_ok());
        assert!(matches!(
            validate_time("8 Uhr"),
            Err(CliError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_format_stop() {
        let stop = TimetableEntry::new("Coswig", 50.0)
            .arriving("08:30")
            .departing("08:32");
        assert_eq!(
            format_stop(Some(&stop)),
            "Coswig (km 50.000, arr 08:30, dep 08:32)"
        );
        assert_eq!(format_stop(None), "-");
    }

    #[test]
    fn test_format_state_line() {
        let state = LiveState {
            current_time_str: "08:15".to_string(),
            current_km: 23.4376,
            progress: 0.234375,
            next_stop: Some(TimetableEntry::new("Coswig", 50.0)),
            km_offset: 0.5,
            ..LiveState::default()
        };
        let line = format_state_line(&state);
        assert!(line.starts_with("08:15"));
        assert!(line.contains("km   23.438"));
        assert!(line.contains("23.4%"));
        assert!(line.contains("next Coswig in 26.6 km"));
        assert!(line.contains("offset +0.500 km"));
    }
}
