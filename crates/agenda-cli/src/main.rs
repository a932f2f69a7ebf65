use agenda_core::db;
use agenda_core::error::CoreError;
use agenda_core::repository::SqliteRepository;
use clap::Parser;
use owo_colors::{OwoColorize, Style};

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let config = config::Config::new().unwrap_or_else(|_| config::Config::default());

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(db_pool, config.horizon_months);

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Add(command) => {
            commands::add::add_event(&repository, command, &config).await
        }
        cli::Commands::List(command) => commands::list::list_events(&repository, command).await,
        cli::Commands::Edit(command) => {
            commands::edit::edit_event(&repository, command, &config).await
        }
        cli::Commands::Move(command) => {
            commands::r#move::move_event(&repository, command).await
        }
        cli::Commands::Delete(command) => {
            commands::delete::delete_event(&repository, command).await
        }
        cli::Commands::Calendar(command) => {
            commands::calendar::show_calendar(&repository, command, &config).await
        }
        cli::Commands::Watch(command) => {
            commands::watch::watch_reminders(&repository, command, &config).await
        }
        cli::Commands::Reset(command) => commands::reset::reset_store(&repository, command).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(events) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, title) in events {
                    eprintln!("  {} ({})", id.yellow(), title);
                }
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
