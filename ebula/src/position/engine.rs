//! Km, progress and neighbouring stops for a clock time.

use chrono::NaiveTime;

use super::anchor::{build_anchors, Anchor};
use crate::model::{CalculationMode, Route, TimetableEntry, Trip};
use crate::time::{parse_time_of_day, seconds_between};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Compute the km reached at `time_str` on `trip`.
///
/// The result includes `trip.start_km_offset`. Unparsable times and an
/// anchor-less timetable yield `0.0`.
pub fn compute_km(time_str: &str, trip: &Trip, timetable: &[TimetableEntry]) -> f64 {
    match trip.calculation_mode {
        CalculationMode::TimeBased => time_based_km(time_str, trip, timetable),
        CalculationMode::SpeedBased => speed_based_km(time_str, trip),
    }
}

fn time_based_km(time_str: &str, trip: &Trip, timetable: &[TimetableEntry]) -> f64 {
    let Some(now) = parse_time_of_day(time_str) else {
        return 0.0;
    };
    let anchors = build_anchors(timetable);
    let (Some(first), Some(last)) = (anchors.first(), anchors.last()) else {
        return 0.0;
    };

    if now <= first.time {
        return first.km + trip.start_km_offset;
    }
    if now >= last.time {
        return last.km + trip.start_km_offset;
    }

    let km = anchors
        .windows(2)
        .find(|pair| pair[0].time <= now && now <= pair[1].time)
        .map(|pair| interpolate(&pair[0], &pair[1], now))
        .unwrap_or(last.km);

    km + trip.start_km_offset
}

fn interpolate(a: &Anchor, b: &Anchor, now: NaiveTime) -> f64 {
    // Two anchors sharing a timestamp would divide by zero.
    let span = seconds_between(a.time, b.time).max(1) as f64;
    let elapsed = seconds_between(a.time, now) as f64;
    a.km + (b.km - a.km) * (elapsed / span)
}

fn speed_based_km(time_str: &str, trip: &Trip) -> f64 {
    let (Some(departure), Some(now)) = (
        parse_time_of_day(&trip.departure_time),
        parse_time_of_day(time_str),
    ) else {
        return 0.0;
    };

    let elapsed_hours = seconds_between(departure, now) as f64 / SECONDS_PER_HOUR;
    elapsed_hours * trip.avg_speed_kmh + trip.start_km_offset
}

/// Fraction of the route covered at `km`, clamped to `[0, 1]`.
///
/// A degenerate route (`end_km <= start_km`) always reports `0`.
pub fn compute_progress(km: f64, start_km: f64, end_km: f64) -> f64 {
    if end_km <= start_km {
        return 0.0;
    }
    ((km - start_km) / (end_km - start_km)).clamp(0.0, 1.0)
}

/// The nearest scheduled stop strictly ahead of `km`.
pub fn next_stop(km: f64, timetable: &[TimetableEntry]) -> Option<&TimetableEntry> {
    timetable
        .iter()
        .filter(|entry| entry.is_stop && entry.km > km)
        .min_by(|a, b| a.km.total_cmp(&b.km))
}

/// The nearest scheduled stop at or behind `km`.
pub fn prev_stop(km: f64, timetable: &[TimetableEntry]) -> Option<&TimetableEntry> {
    timetable
        .iter()
        .filter(|entry| entry.is_stop && entry.km <= km)
        .max_by(|a, b| a.km.total_cmp(&b.km))
}

/// Everything derived from one clock reading.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Position {
    /// Km including the trip offset and the manual session offset.
    pub km: f64,
    /// Route progress in `[0, 1]`.
    pub progress: f64,
    pub next_stop: Option<TimetableEntry>,
    pub prev_stop: Option<TimetableEntry>,
}

/// Locate the train at `time_str`.
///
/// `km_offset` is the manual session correction and is added on top of the
/// engine km before progress and stops are derived. Without a route the
/// progress stays `0`.
pub fn locate(
    time_str: &str,
    trip: &Trip,
    route: Option<&Route>,
    timetable: &[TimetableEntry],
    km_offset: f64,
) -> Position {
    let km = compute_km(time_str, trip, timetable) + km_offset;
    let progress = route
        .map(|r| compute_progress(km, r.start_km, r.end_km))
        .unwrap_or(0.0);

    Position {
        km,
        progress,
        next_stop: next_stop(km, timetable).cloned(),
        prev_stop: prev_stop(km, timetable).cloned(),
    }
}
