//! # Agenda Core Library
//!
//! Event management with series-based recurrence, overlap detection and
//! notification timing, backed by SQLite.
//!
//! ## Features
//!
//! - **Materialized Recurrence**: recurring events are expanded at creation
//!   into one stored row per occurrence date, all sharing a series id that
//!   scopes bulk edits and deletes
//! - **Overlap Detection**: half-open time-range conflict reporting against
//!   the existing event set
//! - **Notification Timing**: a pure evaluator that decides which events are
//!   due relative to an externally supplied clock
//! - **Type Safety**: compile-time checked models over sqlx
//!
//! ## Core Modules
//!
//! - [`db`]: database connection and migration management
//! - [`models`]: core data structures and transfer objects
//! - [`repository`]: data access layer with the Repository pattern
//! - [`recurrence`]: recurrence rule expansion
//! - [`overlap`]: time-range conflict detection
//! - [`notify`]: notification due-time evaluation
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use agenda_core::{
//!     db,
//!     models::{NewEventData, Repeat, RepeatKind},
//!     repository::{EventRepository, SqliteRepository},
//! };
//! use chrono::{NaiveDate, NaiveTime};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("agenda.db").await?;
//!     let repo = SqliteRepository::new(pool, 24);
//!
//!     let data = NewEventData {
//!         title: "Weekly standup".to_string(),
//!         date: NaiveDate::from_ymd_opt(2025, 11, 7).unwrap(),
//!         start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
//!         end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
//!         repeat: Repeat {
//!             kind: RepeatKind::Weekly,
//!             interval: 1,
//!             until: NaiveDate::from_ymd_opt(2025, 11, 21),
//!         },
//!         ..Default::default()
//!     };
//!
//!     let instances = repo.add_event(data).await?;
//!     println!("created {} instances", instances.len());
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod models;
pub mod notify;
pub mod overlap;
pub mod recurrence;
pub mod repository;
