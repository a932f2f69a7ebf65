//! Time-range conflict detection.
//!
//! Two events conflict when they fall on the same calendar date and their
//! half-open `[start, end)` time ranges intersect. The detector only
//! reports; whether a conflict blocks, warns or is ignored is the caller's
//! decision.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::models::Event;

/// The date/time footprint of a (possibly unsaved) candidate event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl From<&Event> for TimeSlot {
    fn from(event: &Event) -> Self {
        Self {
            date: event.date,
            start: event.start_time,
            end: event.end_time,
        }
    }
}

impl TimeSlot {
    /// Half-open intersection test; adjacent ranges such as 09:00-10:00 and
    /// 10:00-11:00 do not conflict.
    pub fn conflicts_with(&self, other: &TimeSlot) -> bool {
        self.date == other.date && self.start < other.end && other.start < self.end
    }
}

/// Returns the events conflicting with `candidate`, in the input's order.
///
/// `exclude` removes the candidate's own stored row when checking an edit.
pub fn find_overlaps<'a>(
    candidate: &TimeSlot,
    events: &'a [Event],
    exclude: Option<Uuid>,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| Some(event.id) != exclude)
        .filter(|event| candidate.conflicts_with(&TimeSlot::from(*event)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn slot(date: &str, start: &str, end: &str) -> TimeSlot {
        TimeSlot {
            date: date.parse().unwrap(),
            start: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        }
    }

    fn event(date: &str, start: &str, end: &str) -> Event {
        let s = slot(date, start, end);
        Event {
            title: "event".to_string(),
            date: s.date,
            start_time: s.start,
            end_time: s.end,
            ..Default::default()
        }
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let a = slot("2025-11-07", "09:00", "10:00");
        let b = slot("2025-11-07", "10:00", "11:00");
        assert!(!a.conflicts_with(&b));
        assert!(!b.conflicts_with(&a));
    }

    #[test]
    fn intersecting_ranges_overlap() {
        let a = slot("2025-11-07", "09:00", "10:00");
        let b = slot("2025-11-07", "09:30", "10:30");
        assert!(a.conflicts_with(&b));
    }

    #[test]
    fn different_dates_never_overlap() {
        let a = slot("2025-11-07", "09:00", "10:00");
        let b = slot("2025-11-08", "09:00", "10:00");
        assert!(!a.conflicts_with(&b));
    }

    #[test]
    fn containment_overlaps() {
        let outer = slot("2025-11-07", "08:00", "12:00");
        let inner = slot("2025-11-07", "09:00", "10:00");
        assert!(outer.conflicts_with(&inner));
        assert!(inner.conflicts_with(&outer));
    }

    #[test]
    fn find_overlaps_preserves_input_order() {
        let events = vec![
            event("2025-11-07", "09:00", "10:00"),
            event("2025-11-07", "11:00", "12:00"),
            event("2025-11-07", "09:30", "10:30"),
        ];
        let candidate = slot("2025-11-07", "09:45", "11:30");

        let conflicts = find_overlaps(&candidate, &events, None);
        let ids: Vec<Uuid> = conflicts.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![events[0].id, events[1].id, events[2].id]);
    }

    #[test]
    fn exclusion_drops_the_events_own_row() {
        let events = vec![event("2025-11-07", "09:00", "10:00")];
        let candidate = slot("2025-11-07", "09:00", "10:00");

        assert_eq!(find_overlaps(&candidate, &events, None).len(), 1);
        assert!(find_overlaps(&candidate, &events, Some(events[0].id)).is_empty());
    }

    #[test]
    fn no_conflict_is_an_empty_result() {
        let events = vec![event("2025-11-07", "09:00", "10:00")];
        let candidate = slot("2025-11-07", "13:00", "14:00");
        assert!(find_overlaps(&candidate, &events, None).is_empty());
    }

    proptest! {
        #[test]
        fn conflict_test_is_symmetric(
            a_start in 0u32..1320,
            a_len in 1u32..=120,
            b_start in 0u32..1320,
            b_len in 1u32..=120,
        ) {
            let minutes = |m: u32| NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap();
            let date: NaiveDate = "2025-11-07".parse().unwrap();
            let a = TimeSlot { date, start: minutes(a_start), end: minutes(a_start + a_len) };
            let b = TimeSlot { date, start: minutes(b_start), end: minutes(b_start + b_len) };
            prop_assert_eq!(a.conflicts_with(&b), b.conflicts_with(&a));
        }
    }
}
