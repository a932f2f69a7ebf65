use crate::error::CoreError;
use crate::models::Event;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl super::SeriesRepository for SqliteRepository {
    async fn find_series_events(&self, series_id: Uuid) -> Result<Vec<Event>, CoreError> {
        let events = sqlx::query_as("SELECT * FROM events WHERE series_id = $1 ORDER BY date")
            .bind(series_id)
            .fetch_all(self.pool())
            .await?;
        Ok(events)
    }

    async fn series_size(&self, series_id: Uuid) -> Result<u64, CoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE series_id = $1")
            .bind(series_id)
            .fetch_one(self.pool())
            .await?;
        Ok(count as u64)
    }
}
