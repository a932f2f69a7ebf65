use agenda_core::models::Event;
use agenda_core::notify::lead_label;
use chrono::NaiveTime;
use comfy_table::{Cell, Color, Row, Table};

use crate::util::short_id;

pub fn format_time_range(start: NaiveTime, end: NaiveTime) -> String {
    format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
}

fn repeat_column(event: &Event) -> String {
    if !event.repeat.is_repeating() {
        return String::new();
    }
    let mut text = format!("↻ {}", event.repeat.kind);
    if event.repeat.interval > 1 {
        text.push_str(&format!(" x{}", event.repeat.interval));
    }
    if let Some(until) = event.repeat.until {
        text.push_str(&format!(" until {until}"));
    }
    text
}

pub fn display_events(events: &[Event]) {
    if events.is_empty() {
        println!("No events found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Date", "Time", "Title", "Location", "Category", "Repeat", "Reminder",
    ]);

    for event in events {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(event.id)));
        row.add_cell(Cell::new(event.date.to_string()));
        row.add_cell(Cell::new(format_time_range(
            event.start_time,
            event.end_time,
        )));

        let mut title_cell = Cell::new(&event.title);
        if event.series_id.is_some() {
            title_cell = title_cell.fg(Color::Cyan);
        }
        row.add_cell(title_cell);

        row.add_cell(Cell::new(event.location.as_deref().unwrap_or("")));
        row.add_cell(Cell::new(event.category.as_deref().unwrap_or("")));
        row.add_cell(Cell::new(repeat_column(event)));
        row.add_cell(Cell::new(
            event
                .notify_before
                .filter(|m| *m > 0)
                .map(|m| format!("{} before", lead_label(m)))
                .unwrap_or_default(),
        ));
        table.add_row(row);
    }

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::models::{Repeat, RepeatKind};
    use chrono::NaiveDate;

    fn event_with_repeat(repeat: Repeat) -> Event {
        Event {
            repeat,
            ..Default::default()
        }
    }

    #[test]
    fn formats_time_ranges() {
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
        assert_eq!(format_time_range(start, end), "09:00-10:30");
    }

    #[test]
    fn repeat_column_is_empty_for_one_off_events() {
        assert_eq!(repeat_column(&event_with_repeat(Repeat::default())), "");
    }

    #[test]
    fn repeat_column_shows_kind_interval_and_end() {
        let repeat = Repeat {
            kind: RepeatKind::Weekly,
            interval: 2,
            until: Some(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
        };
        assert_eq!(
            repeat_column(&event_with_repeat(repeat)),
            "↻ weekly x2 until 2025-12-31"
        );
    }
}
