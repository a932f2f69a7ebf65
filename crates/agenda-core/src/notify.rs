//! Notification due-time evaluation.
//!
//! Pure function of (now, events, fired-set). The caller owns the fired set
//! and the tick cadence; evaluating against absolute time means clock jumps
//! (a test harness fast-forwarding "now") cannot re-fire an event that is
//! already in the set.

use chrono::{Duration, NaiveDateTime};
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::Event;

/// A notification that has just become due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueNotification {
    pub event_id: Uuid,
    pub title: String,
    pub message: String,
}

/// Returns the events whose lead-time window contains `now` and whose id is
/// not yet in `fired`. An event with no lead time (absent or zero) never
/// fires. The window is half-open: `[start - lead, start)`.
pub fn due_notifications(
    now: NaiveDateTime,
    events: &[Event],
    fired: &HashSet<Uuid>,
) -> Vec<DueNotification> {
    events
        .iter()
        .filter(|event| !fired.contains(&event.id))
        .filter_map(|event| {
            let lead = match event.notify_before {
                Some(minutes) if minutes > 0 => i64::from(minutes),
                _ => return None,
            };
            let start = event.date.and_time(event.start_time);
            let window_open = start - Duration::minutes(lead);
            if window_open <= now && now < start {
                Some(DueNotification {
                    event_id: event.id,
                    title: event.title.clone(),
                    message: format!("{} starts in {}", event.title, lead_label(lead as u32)),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Human label for a lead time in minutes: the stock choices (1 minute,
/// 10 minutes, 1 hour, 1 day, 1 week) come out in their natural unit.
pub fn lead_label(minutes: u32) -> String {
    const WEEK: u32 = 7 * 24 * 60;
    const DAY: u32 = 24 * 60;
    const HOUR: u32 = 60;

    let (count, unit) = if minutes >= WEEK && minutes % WEEK == 0 {
        (minutes / WEEK, "week")
    } else if minutes >= DAY && minutes % DAY == 0 {
        (minutes / DAY, "day")
    } else if minutes >= HOUR && minutes % HOUR == 0 {
        (minutes / HOUR, "hour")
    } else {
        (minutes, "minute")
    };

    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn event_at(title: &str, date: &str, start: &str, notify_before: Option<u32>) -> Event {
        Event {
            title: title.to_string(),
            date: date.parse::<NaiveDate>().unwrap(),
            start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap() + Duration::hours(1),
            notify_before,
            ..Default::default()
        }
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        format!("{date}T{time}:00").parse().unwrap()
    }

    #[test]
    fn fires_inside_the_lead_window() {
        let events = vec![event_at("Team meeting", "2025-11-07", "09:00", Some(10))];
        let due = due_notifications(at("2025-11-07", "08:50"), &events, &HashSet::new());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].message, "Team meeting starts in 10 minutes");
    }

    #[test]
    fn does_not_fire_before_the_window_opens() {
        let events = vec![event_at("Team meeting", "2025-11-07", "09:00", Some(10))];
        let due = due_notifications(at("2025-11-07", "08:49"), &events, &HashSet::new());
        assert!(due.is_empty());
    }

    #[test]
    fn window_is_half_open_at_the_start_time() {
        let events = vec![event_at("Team meeting", "2025-11-07", "09:00", Some(10))];
        let due = due_notifications(at("2025-11-07", "09:00"), &events, &HashSet::new());
        assert!(due.is_empty());
    }

    #[test]
    fn fired_events_do_not_fire_again() {
        let events = vec![event_at("Team meeting", "2025-11-07", "09:00", Some(10))];
        let now = at("2025-11-07", "08:55");

        let first = due_notifications(now, &events, &HashSet::new());
        assert_eq!(first.len(), 1);

        let fired: HashSet<Uuid> = first.iter().map(|n| n.event_id).collect();
        assert!(due_notifications(now, &events, &fired).is_empty());
    }

    #[test]
    fn absent_or_zero_lead_never_fires() {
        let events = vec![
            event_at("No lead", "2025-11-07", "09:00", None),
            event_at("Zero lead", "2025-11-07", "09:00", Some(0)),
        ];
        let due = due_notifications(at("2025-11-07", "08:59"), &events, &HashSet::new());
        assert!(due.is_empty());
    }

    #[test]
    fn clock_jump_into_the_window_still_fires_once() {
        let events = vec![event_at("Team meeting", "2025-11-07", "09:00", Some(60))];
        let mut fired = HashSet::new();

        // Jump straight from well before the window to deep inside it.
        let due = due_notifications(at("2025-11-07", "08:59"), &events, &fired);
        assert_eq!(due.len(), 1);
        fired.insert(due[0].event_id);

        assert!(due_notifications(at("2025-11-07", "08:59"), &events, &fired).is_empty());
    }

    #[test]
    fn lead_labels_use_natural_units() {
        assert_eq!(lead_label(1), "1 minute");
        assert_eq!(lead_label(10), "10 minutes");
        assert_eq!(lead_label(60), "1 hour");
        assert_eq!(lead_label(120), "2 hours");
        assert_eq!(lead_label(1440), "1 day");
        assert_eq!(lead_label(10080), "1 week");
        assert_eq!(lead_label(90), "90 minutes");
    }
}
