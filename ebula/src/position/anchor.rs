//! Interpolation anchors derived from the timetable.

use chrono::NaiveTime;

use crate::model::TimetableEntry;
use crate::time::parse_time_of_day;

/// A `(km, time)` control point for interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub km: f64,
    pub time: NaiveTime,
}

impl Anchor {
    /// Derive the anchor of a timetable entry.
    ///
    /// Departure is preferred over arrival. An entry with neither time (or
    /// with an unparsable one) has no anchor.
    pub fn from_entry(entry: &TimetableEntry) -> Option<Self> {
        let time_str = if entry.departure_time.is_empty() {
            &entry.arrival_time
        } else {
            &entry.departure_time
        };

        parse_time_of_day(time_str).map(|time| Anchor {
            km: entry.km,
            time,
        })
    }
}

/// Build the anchors of a timetable, sorted by km ascending.
///
/// The sort is stable and by km only; times are trusted to increase with km.
pub fn build_anchors(timetable: &[TimetableEntry]) -> Vec<Anchor> {
    let mut anchors: Vec<Anchor> = timetable.iter().filter_map(Anchor::from_entry).collect();
    anchors.sort_by(|a, b| a.km.total_cmp(&b.km));
    anchors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_departure_preferred() {
        let entry = TimetableEntry::new("Coswig", 50.0)
            .arriving("08:30")
            .departing("08:32");
        let anchor = Anchor::from_entry(&entry).unwrap();
        assert_eq!(anchor.time, parse_time_of_day("08:32").unwrap());
        assert_eq!(anchor.km, 50.0);
    }

    #[test]
    fn test_arrival_fallback() {
        let entry = TimetableEntry::new("Dresden Hbf", 100.0).arriving("09:00");
        let anchor = Anchor::from_entry(&entry).unwrap();
        assert_eq!(anchor.time, parse_time_of_day("09:00").unwrap());
    }

    #[test]
    fn test_entry_without_times_has_no_anchor() {
        let entry = TimetableEntry::new("Radebeul Ost", 40.0);
        assert!(Anchor::from_entry(&entry).is_none());
    }

    #[test]
    fn test_unparsable_departure_does_not_fall_back() {
        let entry = TimetableEntry::new("Weinböhla", 30.0)
            .arriving("08:10")
            .departing("later");
        assert!(Anchor::from_entry(&entry).is_none());
    }

    #[test]
    fn test_anchors_sorted_by_km() {
        let timetable = vec![
            TimetableEntry::new("C", 100.0).arriving("09:00"),
            TimetableEntry::new("A", 0.0).departing("08:00"),
            TimetableEntry::new("skip", 75.0),
            TimetableEntry::new("B", 50.0).departing("08:32"),
        ];
        let kms: Vec<f64> = build_anchors(&timetable).iter().map(|a| a.km).collect();
        assert_eq!(kms, vec![0.0, 50.0, 100.0]);
    }
}
