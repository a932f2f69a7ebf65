use agenda_core::models::EventQuery;
use agenda_core::repository::{EventRepository, Repository};
use anyhow::Result;
use serde_json::json;

use crate::cli::ListCommand;
use crate::parser::parse_date;
use crate::util::short_id;
use crate::views::table::display_events;

pub async fn list_events(repo: &impl Repository, command: ListCommand) -> Result<()> {
    let query = EventQuery {
        text: command.search,
        from: command.from.as_deref().map(parse_date).transpose()?,
        to: command.to.as_deref().map(parse_date).transpose()?,
    };

    let events = repo.find_events(&query).await?;

    if command.json {
        let items: Vec<_> = events
            .iter()
            .map(|e| {
                json!({
                    "id": e.id,
                    "short_id": short_id(e.id),
                    "title": e.title,
                    "date": e.date,
                    "start_time": e.start_time.format("%H:%M").to_string(),
                    "end_time": e.end_time.format("%H:%M").to_string(),
                    "description": e.description,
                    "location": e.location,
                    "category": e.category,
                    "repeat": e.repeat.kind.to_string(),
                    "repeat_interval": e.repeat.interval,
                    "repeat_until": e.repeat.until,
                    "notify_before": e.notify_before,
                    "series_id": e.series_id,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    display_events(&events);
    Ok(())
}
