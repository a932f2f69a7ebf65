use agenda_core::models::EventQuery;
use agenda_core::overlap::{find_overlaps, TimeSlot};
use agenda_core::repository::{EventRepository, Repository};
use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};

use crate::cli::MoveCommand;
use crate::parser::parse_date;
use crate::util::{resolve_event_id, short_id};
use crate::views::table::format_time_range;

pub async fn move_event(repo: &impl Repository, command: MoveCommand) -> Result<()> {
    let event_id = resolve_event_id(repo, &command.id).await?;
    let current = repo
        .find_event_by_id(event_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Event not found"))?;
    let new_date = parse_date(&command.date)?;

    if !command.force {
        let slot = TimeSlot {
            date: new_date,
            start: current.start_time,
            end: current.end_time,
        };
        let existing = repo.find_events(&EventQuery::for_date(new_date)).await?;
        let conflicts = find_overlaps(&slot, &existing, Some(current.id));
        if !conflicts.is_empty() {
            println!("{}", "The new date overlaps with:".yellow());
            for event in &conflicts {
                println!(
                    "  {} ({})",
                    event.title,
                    format_time_range(event.start_time, event.end_time)
                );
            }
            let confirmed = Confirm::new()
                .with_prompt("Continue anyway?")
                .default(false)
                .interact()?;
            if !confirmed {
                println!("Move cancelled.");
                return Ok(());
            }
        }
    }

    let moved = repo.move_event(event_id, new_date).await?;

    let success_style = Style::new().green().bold();
    println!(
        "{} Moved event: {} ({}) to {}",
        "✓".style(success_style),
        moved.title.bright_white().bold(),
        short_id(moved.id).yellow(),
        moved.date.to_string().cyan()
    );
    if current.series_id.is_some() {
        println!("  The moved event no longer belongs to its series.");
    }

    Ok(())
}
