use agenda_core::models::{EditScope, Event, EventQuery, Repeat, UpdateEventData};
use agenda_core::overlap::{find_overlaps, TimeSlot};
use agenda_core::recurrence;
use agenda_core::repository::{EventRepository, Repository, SeriesRepository};
use anyhow::Result;
use dialoguer::{Confirm, Select};
use owo_colors::{OwoColorize, Style};

use crate::cli::EditCommand;
use crate::config::Config;
use crate::parser::{parse_date, parse_time};
use crate::util::{resolve_event_id, short_id};
use crate::views::table::format_time_range;

pub async fn edit_event(
    repo: &(impl Repository + Sync),
    command: EditCommand,
    config: &Config,
) -> Result<()> {
    let event_id = resolve_event_id(repo, &command.id).await?;
    let current = repo
        .find_event_by_id(event_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Event not found"))?;

    let scope = resolve_scope(repo, &current, command.scope).await?;

    let date = command.date.as_deref().map(parse_date).transpose()?;
    let start_time = command.start.as_deref().map(parse_time).transpose()?;
    let end_time = command.end.as_deref().map(parse_time).transpose()?;

    let repeat = if command.repeat_clear {
        Some(Repeat::default())
    } else if let Some(arg) = command.repeat {
        let until = command.until.as_deref().map(parse_date).transpose()?;
        Some(arg.into_repeat(command.interval.unwrap_or(1), until))
    } else {
        None
    };

    let description = if command.description_clear {
        Some(None)
    } else {
        command.description.map(Some)
    };
    let location = if command.location_clear {
        Some(None)
    } else {
        command.location.map(Some)
    };
    let category = if command.category_clear {
        Some(None)
    } else {
        command.category.map(Some)
    };
    let notify_before = if command.notify_clear {
        Some(None)
    } else {
        command.notify.map(Some)
    };

    let update_data = UpdateEventData {
        title: command.title,
        date,
        start_time,
        end_time,
        description,
        location,
        category,
        repeat,
        notify_before,
    };

    let reschedules = update_data.date.is_some()
        || update_data.start_time.is_some()
        || update_data.end_time.is_some()
        || update_data.repeat.is_some();
    if reschedules && !command.force {
        let proceed = confirm_edit_overlaps(repo, &current, &update_data, scope, config).await?;
        if !proceed {
            println!("Edit cancelled.");
            return Ok(());
        }
    }

    let updated = repo.update_event(event_id, update_data, scope).await?;

    let success_style = Style::new().green().bold();
    match scope {
        EditScope::Series => println!(
            "{} Updated series: {}",
            "✓".style(success_style),
            updated.title.bright_white().bold()
        ),
        EditScope::Single => println!(
            "{} Updated event: {} ({})",
            "✓".style(success_style),
            updated.title.bright_white().bold(),
            short_id(updated.id).yellow()
        ),
    }

    Ok(())
}

/// Figures out which scope to use: the flag wins, a standalone event is
/// always single, and a series instance without a flag gets a prompt.
pub async fn resolve_scope(
    repo: &impl Repository,
    event: &Event,
    flag: Option<crate::cli::ScopeArg>,
) -> Result<EditScope> {
    let Some(series_id) = event.series_id else {
        return Ok(EditScope::Single);
    };
    if let Some(arg) = flag {
        return Ok(arg.into());
    }
    if repo.series_size(series_id).await? <= 1 {
        return Ok(EditScope::Single);
    }

    println!("{}", "This event is part of a recurring series.".yellow());
    let options = vec![
        format!("Only this event ({})", event.date),
        "All events in the series".to_string(),
    ];
    let selection = Select::new()
        .with_prompt("Apply to")
        .items(&options)
        .default(0)
        .interact()?;
    Ok(match selection {
        0 => EditScope::Single,
        _ => EditScope::Series,
    })
}

/// Whether a stored event takes part in the overlap check for an edit of
/// `current`. The edited row itself never does. A single-scope edit leaves
/// the siblings in place, so they stay checked; a series-scope edit rewrites
/// the whole series, so every row sharing the series id is out.
fn checked_against(event: &Event, current: &Event, scope: EditScope) -> bool {
    if event.id == current.id {
        return false;
    }
    match scope {
        EditScope::Single => true,
        EditScope::Series => {
            current.series_id.is_none() || event.series_id != current.series_id
        }
    }
}

/// The slots the edit would occupy, merged over `base`. For series scope the
/// base must be the series anchor (its earliest row), matching how the
/// repository rebuilds the series. An inverted time range yields no slots;
/// the repository rejects it with a proper error.
fn planned_slots(
    base: &Event,
    data: &UpdateEventData,
    scope: EditScope,
    horizon_months: u32,
) -> Result<Vec<TimeSlot>> {
    let date = data.date.unwrap_or(base.date);
    let start = data.start_time.unwrap_or(base.start_time);
    let end = data.end_time.unwrap_or(base.end_time);
    if start >= end {
        return Ok(Vec::new());
    }

    let repeat = match scope {
        EditScope::Series => data.repeat.unwrap_or(base.repeat),
        EditScope::Single => Repeat::default(),
    };
    let horizon = recurrence::horizon_for(date, horizon_months);
    let slots = recurrence::expand(date, &repeat, horizon)?
        .into_iter()
        .map(|slot_date| TimeSlot {
            date: slot_date,
            start,
            end,
        })
        .collect();
    Ok(slots)
}

/// Checks the rescheduled slot(s) against everything outside the edited
/// event (and, for series edits, outside its series). Returns whether the
/// caller should go ahead.
async fn confirm_edit_overlaps(
    repo: &impl Repository,
    current: &Event,
    data: &UpdateEventData,
    scope: EditScope,
    config: &Config,
) -> Result<bool> {
    // Series rebuilds are anchored at the earliest instance, so the warning
    // has to expand from that same row.
    let base = match (scope, current.series_id) {
        (EditScope::Series, Some(series_id)) => repo
            .find_series_events(series_id)
            .await?
            .into_iter()
            .next()
            .unwrap_or_else(|| current.clone()),
        _ => current.clone(),
    };

    let mut conflicts = Vec::new();
    for slot in planned_slots(&base, data, scope, config.horizon_months)? {
        let existing: Vec<Event> = repo
            .find_events(&EventQuery::for_date(slot.date))
            .await?
            .into_iter()
            .filter(|e| checked_against(e, current, scope))
            .collect();
        for event in find_overlaps(&slot, &existing, None) {
            conflicts.push(format!(
                "{} {} ({})",
                event.date,
                event.title,
                format_time_range(event.start_time, event.end_time)
            ));
        }
    }

    if conflicts.is_empty() {
        return Ok(true);
    }

    println!("{}", "The new time overlaps with:".yellow());
    for line in &conflicts {
        println!("  {line}");
    }
    let confirmed = Confirm::new()
        .with_prompt("Continue anyway?")
        .default(false)
        .interact()?;
    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::models::RepeatKind;
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn series_member(day: &str, series_id: Uuid) -> Event {
        Event {
            date: date(day),
            start_time: time("10:00"),
            end_time: time("11:00"),
            repeat: Repeat {
                kind: RepeatKind::Weekly,
                interval: 1,
                until: Some(date("2025-11-21")),
            },
            series_id: Some(series_id),
            ..Default::default()
        }
    }

    #[test]
    fn single_scope_still_checks_series_siblings() {
        let series_id = Uuid::now_v7();
        let current = series_member("2025-11-07", series_id);
        let sibling = series_member("2025-11-14", series_id);

        assert!(checked_against(&sibling, &current, EditScope::Single));
        assert!(!checked_against(&current, &current, EditScope::Single));
    }

    #[test]
    fn series_scope_excludes_the_whole_series() {
        let series_id = Uuid::now_v7();
        let current = series_member("2025-11-07", series_id);
        let sibling = series_member("2025-11-14", series_id);
        let outsider = Event {
            date: date("2025-11-14"),
            start_time: time("10:00"),
            end_time: time("11:00"),
            ..Default::default()
        };

        assert!(!checked_against(&sibling, &current, EditScope::Series));
        assert!(checked_against(&outsider, &current, EditScope::Series));
    }

    #[test]
    fn single_scope_plans_exactly_one_slot() {
        let current = series_member("2025-11-07", Uuid::now_v7());
        let data = UpdateEventData {
            date: Some(date("2025-11-14")),
            ..Default::default()
        };

        let slots = planned_slots(&current, &data, EditScope::Single, 24).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].date, date("2025-11-14"));
    }

    #[test]
    fn series_scope_expands_from_the_anchor_date() {
        // The anchor is the earliest row; a rule edit entered through a
        // later instance must still produce the anchor's date set.
        let anchor = series_member("2025-11-07", Uuid::now_v7());
        let data = UpdateEventData {
            repeat: Some(Repeat {
                kind: RepeatKind::Weekly,
                interval: 1,
                until: Some(date("2025-11-28")),
            }),
            ..Default::default()
        };

        let slots = planned_slots(&anchor, &data, EditScope::Series, 24).unwrap();
        let dates: Vec<NaiveDate> = slots.iter().map(|s| s.date).collect();
        assert_eq!(
            dates,
            vec![
                date("2025-11-07"),
                date("2025-11-14"),
                date("2025-11-21"),
                date("2025-11-28")
            ]
        );
    }

    #[test]
    fn inverted_times_plan_no_slots() {
        let current = series_member("2025-11-07", Uuid::now_v7());
        let data = UpdateEventData {
            start_time: Some(time("12:00")),
            end_time: Some(time("11:00")),
            ..Default::default()
        };

        let slots = planned_slots(&current, &data, EditScope::Single, 24).unwrap();
        assert!(slots.is_empty());
    }
}
