use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// How an event repeats over time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RepeatKind {
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl std::fmt::Display for RepeatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepeatKind::None => write!(f, "none"),
            RepeatKind::Daily => write!(f, "daily"),
            RepeatKind::Weekly => write!(f, "weekly"),
            RepeatKind::Monthly => write!(f, "monthly"),
            RepeatKind::Yearly => write!(f, "yearly"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid repeat kind: {0}")]
pub struct ParseRepeatKindError(String);

impl FromStr for RepeatKind {
    type Err = ParseRepeatKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(RepeatKind::None),
            "daily" => Ok(RepeatKind::Daily),
            "weekly" => Ok(RepeatKind::Weekly),
            "monthly" => Ok(RepeatKind::Monthly),
            "yearly" => Ok(RepeatKind::Yearly),
            _ => Err(ParseRepeatKindError(s.to_string())),
        }
    }
}

/// Recurrence rule attached to an event.
///
/// `interval` is the number of `kind` units between occurrences and must be
/// at least 1 for repeating kinds. `until` is an inclusive end date; when
/// absent, expansion stops at the configured horizon instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Repeat {
    #[sqlx(rename = "repeat_kind")]
    pub kind: RepeatKind,
    #[sqlx(rename = "repeat_interval")]
    pub interval: u32,
    #[sqlx(rename = "repeat_until")]
    pub until: Option<NaiveDate>,
}

impl Default for Repeat {
    fn default() -> Self {
        Self {
            kind: RepeatKind::None,
            interval: 1,
            until: None,
        }
    }
}

impl Repeat {
    pub fn is_repeating(&self) -> bool {
        self.kind != RepeatKind::None
    }
}

/// One stored event instance.
///
/// Rows created from a repeating rule share a `series_id`; a standalone
/// event (or an instance detached by a single-scope edit) has none. The
/// rule itself is carried on every row of the series.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    #[sqlx(flatten)]
    pub repeat: Repeat,
    /// Notification lead time in minutes; absent or zero means never notify.
    pub notify_before: Option<u32>,
    pub series_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Event {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            title: String::new(),
            date: Utc::now().date_naive(),
            start_time: NaiveTime::MIN,
            end_time: NaiveTime::MIN,
            description: None,
            location: None,
            category: None,
            repeat: Repeat::default(),
            notify_before: None,
            series_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Data required to create a new event.
#[derive(Debug, Clone, Default)]
pub struct NewEventData {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    /// When the kind is not `None`, creation materializes one row per
    /// occurrence date, all sharing a fresh series id.
    pub repeat: Repeat,
    pub notify_before: Option<u32>,
}

impl NewEventData {
    /// Boundary validation: everything past this point may assume a
    /// well-formed event.
    pub fn validate(&self) -> Result<(), crate::error::CoreError> {
        use crate::error::CoreError;

        if self.title.trim().is_empty() {
            return Err(CoreError::InvalidInput("Title must not be empty.".to_string()));
        }
        if self.start_time >= self.end_time {
            return Err(CoreError::InvalidInput(format!(
                "Start time {} must be before end time {}.",
                self.start_time.format("%H:%M"),
                self.end_time.format("%H:%M"),
            )));
        }
        if self.repeat.is_repeating() {
            if self.repeat.interval == 0 {
                return Err(CoreError::InvalidInput(
                    "Repeat interval must be at least 1.".to_string(),
                ));
            }
            if let Some(until) = self.repeat.until {
                if until < self.date {
                    return Err(CoreError::InvalidInput(format!(
                        "Repeat end date {} is before the event date {}.",
                        until, self.date
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Partial update for an event. The outer `Option` is "was this field
/// mentioned", the inner one (where present) is "set or clear".
#[derive(Debug, Clone, Default)]
pub struct UpdateEventData {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub description: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub category: Option<Option<String>>,
    /// Replacing the rule (or clearing it with `kind = None`) on a series
    /// with `Series` scope re-materializes the whole series.
    pub repeat: Option<Repeat>,
    pub notify_before: Option<Option<u32>>,
}

impl UpdateEventData {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.category.is_none()
            && self.repeat.is_none()
            && self.notify_before.is_none()
    }
}

/// Scope for edits and deletes on an event that belongs to a series.
///
/// `Single` mutates exactly one instance and detaches it from the series;
/// `Series` applies to every row sharing the series id. Non-series events
/// are always treated as `Single`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditScope {
    Single,
    Series,
}

impl std::fmt::Display for EditScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditScope::Single => write!(f, "one"),
            EditScope::Series => write!(f, "all"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid edit scope: {0} (expected 'one' or 'all')")]
pub struct ParseEditScopeError(String);

impl FromStr for EditScope {
    type Err = ParseEditScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one" | "single" | "this" => Ok(EditScope::Single),
            "all" | "series" => Ok(EditScope::Series),
            _ => Err(ParseEditScopeError(s.to_string())),
        }
    }
}

/// Filter for listing events. All conditions are conjunctive; `text` is a
/// case-insensitive substring match over title, description and location.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    pub text: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl EventQuery {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            text: None,
            from: Some(date),
            to: Some(date),
        }
    }

    pub fn for_range(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            text: None,
            from: Some(from),
            to: Some(to),
        }
    }
}
