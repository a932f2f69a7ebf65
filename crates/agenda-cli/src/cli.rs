use clap::{Parser, Subcommand, ValueEnum};
use agenda_core::models::{EditScope, Repeat, RepeatKind};

/// A calendar and event manager for the terminal
#[derive(Parser, Debug)]
#[command(name = "agenda", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new event
    Add(AddCommand),
    /// List events
    List(ListCommand),
    /// Edit an event or its whole series
    Edit(EditCommand),
    /// Move an event to another date
    Move(MoveCommand),
    /// Delete an event or its whole series
    Delete(DeleteCommand),
    /// Show a month or week view
    Calendar(CalendarCommand),
    /// Watch for due reminders and print them as they fire
    Watch(WatchCommand),
    /// Delete every stored event
    Reset(ResetCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the event
    pub title: String,
    /// The date of the event (YYYY-MM-DD)
    #[clap(short, long)]
    pub date: String,
    /// Start time (HH:MM)
    #[clap(short, long)]
    pub start: String,
    /// End time (HH:MM)
    #[clap(short, long)]
    pub end: String,
    /// A longer description
    #[clap(long)]
    pub description: Option<String>,
    /// Where the event takes place
    #[clap(short, long)]
    pub location: Option<String>,
    /// Free-form category label
    #[clap(short, long)]
    pub category: Option<String>,
    /// Repeat frequency
    #[clap(long, value_enum)]
    pub repeat: Option<RepeatArg>,
    /// Repeat every N days/weeks/months/years
    #[clap(long, default_value = "1", requires = "repeat")]
    pub interval: u32,
    /// Last date the repetition may fall on (YYYY-MM-DD)
    #[clap(long, requires = "repeat")]
    pub until: Option<String>,
    /// Reminder lead time in minutes before the start
    #[clap(long)]
    pub notify: Option<u32>,
    /// Create the event even if it overlaps an existing one
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Substring to match against title, description and location
    #[clap(short, long)]
    pub search: Option<String>,
    /// Earliest date to include (YYYY-MM-DD)
    #[clap(long)]
    pub from: Option<String>,
    /// Latest date to include (YYYY-MM-DD)
    #[clap(long)]
    pub to: Option<String>,
    /// Print the events as JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID (or unique prefix) of the event to edit
    pub id: String,

    /// Apply the change to one instance or the whole series
    #[arg(long, value_enum)]
    pub scope: Option<ScopeArg>,

    #[arg(long)]
    pub title: Option<String>,

    /// New date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// New start time (HH:MM)
    #[arg(long)]
    pub start: Option<String>,

    /// New end time (HH:MM)
    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub description_clear: bool,

    #[arg(long)]
    pub location: Option<String>,
    #[arg(long, conflicts_with = "location")]
    pub location_clear: bool,

    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, conflicts_with = "category")]
    pub category_clear: bool,

    /// New repeat frequency (rebuilds the series)
    #[arg(long, value_enum)]
    pub repeat: Option<RepeatArg>,
    #[arg(long, conflicts_with_all = ["repeat", "interval", "until"])]
    pub repeat_clear: bool,
    /// Repeat every N days/weeks/months/years
    #[arg(long, requires = "repeat")]
    pub interval: Option<u32>,
    /// Last date the repetition may fall on (YYYY-MM-DD)
    #[arg(long, requires = "repeat")]
    pub until: Option<String>,

    /// Reminder lead time in minutes before the start
    #[arg(long)]
    pub notify: Option<u32>,
    #[arg(long, conflicts_with = "notify")]
    pub notify_clear: bool,

    /// Apply the edit even if it creates an overlap
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct MoveCommand {
    /// The ID (or unique prefix) of the event to move
    pub id: String,
    /// The new date (YYYY-MM-DD)
    pub date: String,
    /// Move the event even if it overlaps an existing one
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID (or unique prefix) of the event to delete
    pub id: String,
    /// Delete one instance or the whole series
    #[clap(long, value_enum)]
    pub scope: Option<ScopeArg>,
    /// Delete without asking for confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CalendarCommand {
    /// Month to show (YYYY-MM); defaults to the current month
    pub month: Option<String>,
    /// Show a single week instead (week containing YYYY-MM-DD)
    #[clap(long, conflicts_with = "month")]
    pub week: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct WatchCommand {
    /// Check once and exit instead of polling
    #[clap(long)]
    pub once: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ResetCommand {
    /// Reset without asking for confirmation
    #[clap(short, long)]
    pub force: bool,
}

/// Repeat frequencies accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatArg {
    /// Every day
    Daily,
    /// Every week (same weekday)
    Weekly,
    /// Every month (same day of month, clamped)
    Monthly,
    /// Every year (same date)
    Yearly,
}

impl From<RepeatArg> for RepeatKind {
    fn from(arg: RepeatArg) -> Self {
        match arg {
            RepeatArg::Daily => RepeatKind::Daily,
            RepeatArg::Weekly => RepeatKind::Weekly,
            RepeatArg::Monthly => RepeatKind::Monthly,
            RepeatArg::Yearly => RepeatKind::Yearly,
        }
    }
}

impl RepeatArg {
    pub fn into_repeat(self, interval: u32, until: Option<chrono::NaiveDate>) -> Repeat {
        Repeat {
            kind: self.into(),
            interval,
            until,
        }
    }
}

/// Edit/delete scope accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeArg {
    /// Only this instance (detaches it from its series)
    One,
    /// Every instance of the series
    All,
}

impl From<ScopeArg> for EditScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::One => EditScope::Single,
            ScopeArg::All => EditScope::Series,
        }
    }
}
