use agenda_core::models::{EventQuery, NewEventData};
use agenda_core::overlap::{find_overlaps, TimeSlot};
use agenda_core::recurrence;
use agenda_core::repository::{EventRepository, Repository};
use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};

use crate::cli::AddCommand;
use crate::config::Config;
use crate::parser::{parse_date, parse_time};
use crate::util::short_id;
use crate::views::table::format_time_range;

pub async fn add_event(
    repo: &impl Repository,
    command: AddCommand,
    config: &Config,
) -> Result<()> {
    let date = parse_date(&command.date)?;
    let start_time = parse_time(&command.start)?;
    let end_time = parse_time(&command.end)?;
    let until = command.until.as_deref().map(parse_date).transpose()?;

    let repeat = command
        .repeat
        .map(|r| r.into_repeat(command.interval, until))
        .unwrap_or_default();

    let data = NewEventData {
        title: command.title,
        date,
        start_time,
        end_time,
        description: command.description,
        location: command.location,
        category: command.category,
        repeat,
        notify_before: command.notify,
    };
    data.validate()?;

    if !command.force {
        let proceed = confirm_overlaps(repo, &data, config).await?;
        if !proceed {
            println!("Event not added.");
            return Ok(());
        }
    }

    let is_repeating = data.repeat.is_repeating();
    let instances = repo.add_event(data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    if is_repeating {
        println!(
            "{} Created recurring event: {} ({} instances)",
            "✓".style(success_style),
            instances[0].title.bright_white().bold(),
            instances.len()
        );
    } else {
        println!(
            "{} Created event: {}",
            "✓".style(success_style),
            instances[0].title.bright_white().bold()
        );
    }
    println!(
        "  {} {} on {} at {}",
        "→".style(info_style),
        short_id(instances[0].id).yellow(),
        instances[0].date,
        format_time_range(instances[0].start_time, instances[0].end_time).cyan()
    );

    Ok(())
}

/// Checks every date the event would occupy against the stored events and,
/// when something overlaps, asks the user whether to continue. Returns
/// whether the caller should go ahead.
async fn confirm_overlaps(
    repo: &impl Repository,
    data: &NewEventData,
    config: &Config,
) -> Result<bool> {
    let horizon = recurrence::horizon_for(data.date, config.horizon_months);
    let dates = recurrence::expand(data.date, &data.repeat, horizon)?;

    let mut conflicts: Vec<(chrono::NaiveDate, String)> = Vec::new();
    for date in dates {
        let slot = TimeSlot {
            date,
            start: data.start_time,
            end: data.end_time,
        };
        let existing = repo.find_events(&EventQuery::for_date(date)).await?;
        for event in find_overlaps(&slot, &existing, None) {
            conflicts.push((
                event.date,
                format!(
                    "{} ({})",
                    event.title,
                    format_time_range(event.start_time, event.end_time)
                ),
            ));
        }
    }

    if conflicts.is_empty() {
        return Ok(true);
    }

    println!("{}", "This event overlaps with:".yellow());
    for (date, line) in &conflicts {
        println!("  {} {}", date, line);
    }

    let confirmed = Confirm::new()
        .with_prompt("Continue anyway?")
        .default(false)
        .interact()?;
    Ok(confirmed)
}
