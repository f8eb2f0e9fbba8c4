//! Merging track objects and timetable stops.

use std::cmp::Ordering;

use super::item::{ColorKey, TimelineCategory, TimelineItem};
use crate::model::{TimetableEntry, TrackObject, TrackObjectKind};

/// A timetable stop closer than this to a station track object is the same
/// station and is not listed twice.
pub const STATION_MERGE_TOLERANCE_KM: f64 = 0.05;

/// Sort rank for timetable stops sharing a km with track objects.
const SCHEDULED_STOP_SORT_ORDER: i32 = 0;

/// Merge track objects and timetable stops into one ordered strip.
///
/// Pass-through timetable points are skipped. Stops duplicating a station
/// track object (see [`STATION_MERGE_TOLERANCE_KM`]) are dropped.
pub fn merge(track_objects: &[TrackObject], timetable: &[TimetableEntry]) -> Vec<TimelineItem> {
    let mut rows: Vec<(TimelineItem, i32)> = track_objects
        .iter()
        .map(|obj| (track_object_item(obj), obj.sort_order))
        .collect();

    rows.extend(
        timetable
            .iter()
            .filter(|entry| entry.is_stop && !has_station_object(track_objects, entry.km))
            .map(|entry| (scheduled_stop_item(entry), SCHEDULED_STOP_SORT_ORDER)),
    );

    rows.sort_by(|(a, a_order), (b, b_order)| compare_rows(a, *a_order, b, *b_order));

    tracing::trace!(
        track_objects = track_objects.len(),
        timetable = timetable.len(),
        items = rows.len(),
        "Timeline merged"
    );

    rows.into_iter().map(|(item, _)| item).collect()
}

/// Index of the last item at or behind `km`, the row a view should keep
/// in focus while driving.
pub fn current_index(items: &[TimelineItem], km: f64) -> Option<usize> {
    items.iter().rposition(|item| item.km <= km)
}

fn compare_rows(a: &TimelineItem, a_order: i32, b: &TimelineItem, b_order: i32) -> Ordering {
    a.km
        .total_cmp(&b.km)
        .then(a.category.cmp(&b.category))
        .then(a_order.cmp(&b_order))
}

fn has_station_object(track_objects: &[TrackObject], km: f64) -> bool {
    track_objects.iter().any(|obj| {
        obj.kind == TrackObjectKind::Station && (obj.km - km).abs() < STATION_MERGE_TOLERANCE_KM
    })
}

fn labelled(prefix: &str, name: &str) -> String {
    format!("{} {}", prefix, name).trim_end().to_string()
}

fn speed_text(limit: Option<u32>) -> String {
    limit.map_or_else(|| "??".to_string(), |v| v.to_string())
}

fn track_object_item(obj: &TrackObject) -> TimelineItem {
    let category = TimelineCategory::from(obj.kind);
    let (primary_label, secondary_label, symbol, color) = match obj.kind {
        TrackObjectKind::Station => (
            if obj.name.is_empty() {
                "Station".to_string()
            } else {
                obj.name.clone()
            },
            (!obj.notes.is_empty()).then(|| obj.notes.clone()),
            obj.kind.short_label().to_string(),
            ColorKey::Station,
        ),
        TrackObjectKind::SpeedChange => (
            format!("V {} km/h", speed_text(obj.speed_limit)),
            None,
            speed_text(obj.speed_limit),
            ColorKey::SpeedChange,
        ),
        TrackObjectKind::LevelCrossing => (
            labelled("Level crossing", &obj.name),
            None,
            obj.kind.short_label().to_string(),
            ColorKey::LevelCrossing,
        ),
        TrackObjectKind::Signal => (
            labelled("Signal", &obj.name),
            None,
            obj.kind.short_label().to_string(),
            ColorKey::Signal,
        ),
        TrackObjectKind::TunnelStart => (
            labelled("▶ Tunnel", &obj.name),
            None,
            "Tu".to_string(),
            ColorKey::Tunnel,
        ),
        TrackObjectKind::TunnelEnd => (
            "Tunnel end ◀".to_string(),
            None,
            "Tu".to_string(),
            ColorKey::Tunnel,
        ),
        TrackObjectKind::Gradient => {
            let permille = obj.gradient_permille.unwrap_or(0.0);
            let arrow = if permille >= 0.0 { "↗" } else { "↘" };
            (
                format!("{:.1}‰ {}", permille, arrow),
                None,
                obj.kind.short_label().to_string(),
                ColorKey::Gradient,
            )
        }
        TrackObjectKind::SlowSpeedZone => (
            format!("La {} km/h", speed_text(obj.speed_limit)),
            obj.speed_limit_end.map(|end| format!("until km {:.1}", end)),
            obj.kind.short_label().to_string(),
            ColorKey::SlowSpeed,
        ),
    };

    TimelineItem {
        km: obj.km,
        category,
        primary_label,
        secondary_label,
        symbol: Some(symbol),
        color,
    }
}

fn scheduled_stop_item(entry: &TimetableEntry) -> TimelineItem {
    let mut times = String::new();
    if !entry.arrival_time.is_empty() {
        times.push_str(&format!("arr: {}  ", entry.arrival_time));
    }
    if !entry.departure_time.is_empty() {
        times.push_str(&format!("dep: {}", entry.departure_time));
    }
    let times = times.trim_end();

    TimelineItem {
        km: entry.km,
        category: TimelineCategory::ScheduledStop,
        primary_label: entry.station_name.clone(),
        secondary_label: (!times.is_empty()).then(|| times.to_string()),
        symbol: Some(TrackObjectKind::Station.short_label().to_string()),
        color: ColorKey::Station,
    }
}
