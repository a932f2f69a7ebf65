use agenda_core::repository::{EventRepository, Repository};
use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};

use crate::cli::ResetCommand;

pub async fn reset_store(repo: &impl Repository, command: ResetCommand) -> Result<()> {
    if !command.force {
        let confirmed = Confirm::new()
            .with_prompt("This deletes every stored event. Are you sure?")
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    repo.reset().await?;

    let success_style = Style::new().green().bold();
    println!("{} All events deleted.", "✓".style(success_style));
    Ok(())
}
