use agenda_core::models::EventQuery;
use agenda_core::repository::{EventRepository, Repository};
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};

use crate::cli::CalendarCommand;
use crate::config::Config;
use crate::parser::{parse_date, parse_month};
use crate::views::grid;

pub async fn show_calendar(
    repo: &impl Repository,
    command: CalendarCommand,
    config: &Config,
) -> Result<()> {
    let today = Local::now().date_naive();

    if let Some(week_str) = &command.week {
        let anchor = parse_date(week_str)?;
        return show_week(repo, anchor).await;
    }

    match command.month.as_deref() {
        Some(month_str) => {
            let first = parse_month(month_str)?;
            show_month(repo, first).await
        }
        None if config.default_view == "week" => show_week(repo, today).await,
        None => {
            let first = today.with_day(1).unwrap_or(today);
            show_month(repo, first).await
        }
    }
}

async fn show_month(repo: &impl Repository, first_of_month: NaiveDate) -> Result<()> {
    let last = grid::last_of_month(first_of_month);
    let events = repo
        .find_events(&EventQuery::for_range(first_of_month, last))
        .await?;
    println!("{}", grid::render_month(first_of_month, &events));
    Ok(())
}

async fn show_week(repo: &impl Repository, anchor: NaiveDate) -> Result<()> {
    let sunday = grid::sunday_on_or_before(anchor);
    let saturday = sunday + chrono::Days::new(6);
    let events = repo
        .find_events(&EventQuery::for_range(sunday, saturday))
        .await?;
    println!("{}", grid::render_week(sunday, &events));
    Ok(())
}
