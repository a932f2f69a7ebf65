use agenda_core::models::Event;
use chrono::{Datelike, Days, Months, NaiveDate};
use comfy_table::{Cell, Row, Table};

const WEEKDAY_HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MAX_CELL_EVENTS: usize = 3;
const TITLE_WIDTH: usize = 12;

/// The Sunday that starts the week containing `date`.
pub fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date - Days::new(u64::from(offset))
}

pub fn last_of_month(first_of_month: NaiveDate) -> NaiveDate {
    first_of_month + Months::new(1) - Days::new(1)
}

fn truncated(title: &str) -> String {
    if title.chars().count() <= TITLE_WIDTH {
        title.to_string()
    } else {
        let cut: String = title.chars().take(TITLE_WIDTH - 1).collect();
        format!("{cut}…")
    }
}

fn markers(event: &Event) -> String {
    let mut text = String::new();
    if event.series_id.is_some() {
        text.push('↻');
    }
    if event.notify_before.is_some_and(|m| m > 0) {
        text.push('🔔');
    }
    if !text.is_empty() {
        text.insert(0, ' ');
    }
    text
}

fn event_line(event: &Event) -> String {
    format!(
        "{} {}{}",
        event.start_time.format("%H:%M"),
        truncated(&event.title),
        markers(event)
    )
}

fn day_lines(day: NaiveDate, events: &[Event]) -> String {
    let on_day: Vec<&Event> = events.iter().filter(|e| e.date == day).collect();

    let mut lines = vec![day.day().to_string()];
    for event in on_day.iter().take(MAX_CELL_EVENTS) {
        lines.push(event_line(event));
    }
    if on_day.len() > MAX_CELL_EVENTS {
        lines.push(format!("+{} more", on_day.len() - MAX_CELL_EVENTS));
    }
    lines.join("\n")
}

/// Renders a Sunday-first month grid. Cells outside the month stay blank.
pub fn render_month(first_of_month: NaiveDate, events: &[Event]) -> String {
    let last = last_of_month(first_of_month);
    let mut table = Table::new();
    table.set_header(WEEKDAY_HEADER.to_vec());

    let mut cursor = sunday_on_or_before(first_of_month);
    while cursor <= last {
        let mut row = Row::new();
        for _ in 0..7 {
            if cursor.month() == first_of_month.month() {
                row.add_cell(Cell::new(day_lines(cursor, events)));
            } else {
                row.add_cell(Cell::new(""));
            }
            cursor = cursor + Days::new(1);
        }
        table.add_row(row);
    }

    format!(
        "{}\n{table}",
        first_of_month.format("%B %Y")
    )
}

/// Renders the week starting at `sunday` with every event listed in full.
pub fn render_week(sunday: NaiveDate, events: &[Event]) -> String {
    let mut table = Table::new();
    let header: Vec<String> = (0..7)
        .map(|i| {
            let day = sunday + Days::new(i);
            format!("{} {}", WEEKDAY_HEADER[i as usize], day.format("%m-%d"))
        })
        .collect();
    table.set_header(header);

    let mut row = Row::new();
    for i in 0..7 {
        let day = sunday + Days::new(i);
        let lines: Vec<String> = events
            .iter()
            .filter(|e| e.date == day)
            .map(|e| event_line(e))
            .collect();
        row.add_cell(Cell::new(lines.join("\n")));
    }
    table.add_row(row);

    let saturday = sunday + Days::new(6);
    format!("Week of {} to {}\n{table}", sunday, saturday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn event(title: &str, day: &str, start: &str) -> Event {
        Event {
            title: title.to_string(),
            date: date(day),
            start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap() + chrono::Duration::hours(1),
            ..Default::default()
        }
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2025-11-07 is a Friday.
        assert_eq!(date("2025-11-07").weekday(), Weekday::Fri);
        assert_eq!(sunday_on_or_before(date("2025-11-07")), date("2025-11-02"));
        // A Sunday maps to itself.
        assert_eq!(sunday_on_or_before(date("2025-11-02")), date("2025-11-02"));
    }

    #[test]
    fn month_end_handles_short_and_long_months() {
        assert_eq!(last_of_month(date("2025-11-01")), date("2025-11-30"));
        assert_eq!(last_of_month(date("2025-12-01")), date("2025-12-31"));
        assert_eq!(last_of_month(date("2024-02-01")), date("2024-02-29"));
    }

    #[test]
    fn month_view_shows_events_on_their_day() {
        let events = vec![event("Team meeting", "2025-11-07", "09:00")];
        let rendered = render_month(date("2025-11-01"), &events);
        assert!(rendered.contains("November 2025"));
        assert!(rendered.contains("09:00 Team meeting"));
    }

    #[test]
    fn month_view_collapses_crowded_days() {
        let events: Vec<Event> = (0..5)
            .map(|i| event(&format!("Event {i}"), "2025-11-07", "09:00"))
            .collect();
        let rendered = render_month(date("2025-11-01"), &events);
        assert!(rendered.contains("+2 more"));
    }

    #[test]
    fn long_titles_are_truncated_in_cells() {
        let events = vec![event("A very long event title indeed", "2025-11-07", "09:00")];
        let rendered = render_month(date("2025-11-01"), &events);
        assert!(!rendered.contains("A very long event title indeed"));
        assert!(rendered.contains('…'));
    }

    #[test]
    fn series_and_reminder_markers_are_shown() {
        let mut repeating = event("Standup", "2025-11-07", "09:30");
        repeating.series_id = Some(uuid::Uuid::now_v7());
        repeating.notify_before = Some(10);
        let rendered = render_month(date("2025-11-01"), &[repeating]);
        assert!(rendered.contains("09:30 Standup ↻🔔"));
    }

    #[test]
    fn week_view_lists_each_day() {
        let events = vec![
            event("Standup", "2025-11-03", "09:30"),
            event("Review", "2025-11-05", "14:00"),
        ];
        let rendered = render_week(date("2025-11-02"), &events);
        assert!(rendered.contains("Week of 2025-11-02 to 2025-11-08"));
        assert!(rendered.contains("09:30 Standup"));
        assert!(rendered.contains("14:00 Review"));
    }
}
