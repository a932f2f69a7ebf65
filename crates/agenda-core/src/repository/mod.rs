use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{EditScope, Event, EventQuery, NewEventData, UpdateEventData};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

pub mod events;
pub mod series;

/// Domain-specific trait for event operations.
///
/// Overlap detection deliberately lives outside this trait: the repository
/// never blocks a conflicting write, it only stores what the caller decided
/// to keep.
#[async_trait]
pub trait EventRepository {
    /// Creates an event. A repeating rule is materialized into one row per
    /// occurrence date, all sharing a fresh series id; the returned rows are
    /// in date order (a non-repeating event yields exactly one).
    async fn add_event(&self, data: NewEventData) -> Result<Vec<Event>, CoreError>;
    async fn find_event_by_id(&self, id: Uuid) -> Result<Option<Event>, CoreError>;
    async fn find_events_by_short_id_prefix(&self, prefix: &str) -> Result<Vec<Event>, CoreError>;
    async fn find_events(&self, query: &EventQuery) -> Result<Vec<Event>, CoreError>;
    /// Applies a partial update. `Single` scope on a series member detaches
    /// it; `Series` scope touches every row of the series and
    /// re-materializes it when the date or the rule changed.
    async fn update_event(
        &self,
        id: Uuid,
        data: UpdateEventData,
        scope: EditScope,
    ) -> Result<Event, CoreError>;
    /// Date-only reschedule (the drag-and-drop path). Moving a series member
    /// detaches it.
    async fn move_event(&self, id: Uuid, date: NaiveDate) -> Result<Event, CoreError>;
    /// Removes one instance or the whole series; returns the rows removed.
    async fn delete_event(&self, id: Uuid, scope: EditScope) -> Result<u64, CoreError>;
    /// Clears the entire event store.
    async fn reset(&self) -> Result<(), CoreError>;
}

/// Domain-specific trait for series queries.
#[async_trait]
pub trait SeriesRepository {
    async fn find_series_events(&self, series_id: Uuid) -> Result<Vec<Event>, CoreError>;
    /// Number of stored rows sharing the series id.
    async fn series_size(&self, series_id: Uuid) -> Result<u64, CoreError>;
}

/// Main repository trait that composes all domain traits.
#[async_trait]
pub trait Repository: EventRepository + SeriesRepository {}

/// SQLite implementation of the repository pattern.
pub struct SqliteRepository {
    pool: DbPool,
    horizon_months: u32,
}

impl SqliteRepository {
    /// `horizon_months` caps expansion of rules without an end date.
    pub fn new(pool: DbPool, horizon_months: u32) -> Self {
        Self {
            pool,
            horizon_months,
        }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub(crate) fn horizon_months(&self) -> u32 {
        self.horizon_months
    }
}

impl Repository for SqliteRepository {}
