use agenda_core::models::EventQuery;
use agenda_core::notify::due_notifications;
use agenda_core::repository::{EventRepository, Repository};
use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use std::collections::HashSet;
use std::time::Duration;
use uuid::Uuid;

use crate::cli::WatchCommand;
use crate::config::Config;

pub async fn watch_reminders(
    repo: &impl Repository,
    command: WatchCommand,
    config: &Config,
) -> Result<()> {
    let mut fired: HashSet<Uuid> = HashSet::new();

    if command.once {
        check_once(repo, &mut fired).await?;
        return Ok(());
    }

    println!("Watching for reminders (Ctrl-C to stop)...");
    let mut ticker = tokio::time::interval(Duration::from_secs(config.poll_secs.max(1)));
    loop {
        ticker.tick().await;
        check_once(repo, &mut fired).await?;
    }
}

async fn check_once(repo: &impl Repository, fired: &mut HashSet<Uuid>) -> Result<()> {
    let now = Local::now().naive_local();
    let today = now.date();
    let query = EventQuery {
        from: Some(today),
        ..Default::default()
    };
    let events = repo.find_events(&query).await?;

    for due in due_notifications(now, &events, fired) {
        println!("{} {}", "🔔".yellow(), due.message.bright_white().bold());
        fired.insert(due.event_id);
    }
    Ok(())
}
