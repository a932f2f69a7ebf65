use agenda_core::models::EditScope;
use agenda_core::repository::{EventRepository, Repository};
use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};

use crate::cli::DeleteCommand;
use crate::commands::edit::resolve_scope;
use crate::util::resolve_event_id;

pub async fn delete_event(repo: &(impl Repository + Sync), command: DeleteCommand) -> Result<()> {
    let event_id = resolve_event_id(repo, &command.id).await?;
    let event = repo
        .find_event_by_id(event_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Event not found"))?;

    let scope = resolve_scope(repo, &event, command.scope).await?;

    if !command.force {
        let prompt = match scope {
            EditScope::Series => format!(
                "Are you sure you want to delete every event of the '{}' series?",
                event.title
            ),
            EditScope::Single => {
                format!("Are you sure you want to delete '{}' on {}?", event.title, event.date)
            }
        };
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    let removed = repo.delete_event(event_id, scope).await?;

    let success_style = Style::new().green().bold();
    if removed == 1 {
        println!("{} Deleted 1 event.", "✓".style(success_style));
    } else {
        println!("{} Deleted {} events.", "✓".style(success_style), removed);
    }

    Ok(())
}
