use crate::error::CoreError;
use crate::models::{EditScope, Event, EventQuery, NewEventData, Repeat, RepeatKind, UpdateEventData};
use crate::recurrence;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite, Transaction};
use uuid::Uuid;

impl SqliteRepository {
    async fn find_event_by_id_in_transaction(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: Uuid,
    ) -> Result<Option<Event>, CoreError> {
        let event = sqlx::query_as("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(event)
    }

    async fn insert_event_row(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        event: &Event,
    ) -> Result<(), CoreError> {
        sqlx::query(
            r#"INSERT INTO events (id, title, date, start_time, end_time, description, location, category, repeat_kind, repeat_interval, repeat_until, notify_before, series_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(event.date)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(&event.description)
        .bind(&event.location)
        .bind(&event.category)
        .bind(event.repeat.kind)
        .bind(event.repeat.interval)
        .bind(event.repeat.until)
        .bind(event.notify_before)
        .bind(event.series_id)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Expands `data` and inserts one row per occurrence date. A repeating
    /// rule gets `series_id` (existing id on re-materialization, fresh
    /// otherwise); a non-repeating one produces a single detached row.
    async fn materialize_in_transaction(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        data: &NewEventData,
        series_id: Option<Uuid>,
    ) -> Result<Vec<Event>, CoreError> {
        data.validate()?;

        let horizon = recurrence::horizon_for(data.date, self.horizon_months());
        let dates = recurrence::expand(data.date, &data.repeat, horizon)?;
        let series_id = if data.repeat.is_repeating() {
            Some(series_id.unwrap_or_else(Uuid::now_v7))
        } else {
            None
        };

        let now = Utc::now();
        let mut instances = Vec::with_capacity(dates.len());
        for date in dates {
            let event = Event {
                id: Uuid::now_v7(),
                title: data.title.clone(),
                date,
                start_time: data.start_time,
                end_time: data.end_time,
                description: data.description.clone(),
                location: data.location.clone(),
                category: data.category.clone(),
                repeat: data.repeat,
                notify_before: data.notify_before,
                series_id,
                created_at: now,
                updated_at: now,
            };
            self.insert_event_row(tx, &event).await?;
            instances.push(event);
        }
        Ok(instances)
    }

    fn merged_draft(current: &Event, data: &UpdateEventData) -> NewEventData {
        NewEventData {
            title: data.title.clone().unwrap_or_else(|| current.title.clone()),
            date: data.date.unwrap_or(current.date),
            start_time: data.start_time.unwrap_or(current.start_time),
            end_time: data.end_time.unwrap_or(current.end_time),
            description: data
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            location: data
                .location
                .clone()
                .unwrap_or_else(|| current.location.clone()),
            category: data
                .category
                .clone()
                .unwrap_or_else(|| current.category.clone()),
            repeat: data.repeat.unwrap_or(current.repeat),
            notify_before: data.notify_before.unwrap_or(current.notify_before),
        }
    }

    /// Field-by-field UPDATE: only mentioned fields are written. `detach`
    /// additionally clears the series link and rule.
    async fn apply_field_update(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        data: &UpdateEventData,
        detach: bool,
        scope_clause: (&str, Uuid),
    ) -> Result<(), CoreError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE events SET ");
        let mut separated = qb.separated(", ");

        if let Some(title) = &data.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title.clone());
        }
        if let Some(date) = data.date {
            separated.push("date = ");
            separated.push_bind_unseparated(date);
        }
        if let Some(start_time) = data.start_time {
            separated.push("start_time = ");
            separated.push_bind_unseparated(start_time);
        }
        if let Some(end_time) = data.end_time {
            separated.push("end_time = ");
            separated.push_bind_unseparated(end_time);
        }
        if let Some(description) = &data.description {
            separated.push("description = ");
            separated.push_bind_unseparated(description.clone());
        }
        if let Some(location) = &data.location {
            separated.push("location = ");
            separated.push_bind_unseparated(location.clone());
        }
        if let Some(category) = &data.category {
            separated.push("category = ");
            separated.push_bind_unseparated(category.clone());
        }
        if let Some(notify_before) = &data.notify_before {
            separated.push("notify_before = ");
            separated.push_bind_unseparated(*notify_before);
        }
        if detach {
            separated.push("series_id = NULL");
            separated.push("repeat_kind = ");
            separated.push_bind_unseparated(RepeatKind::None);
            separated.push("repeat_interval = 1");
            separated.push("repeat_until = NULL");
        }
        separated.push("updated_at = ");
        separated.push_bind_unseparated(Utc::now());

        let (column, value) = scope_clause;
        qb.push(format!(" WHERE {column} = "));
        qb.push_bind(value);
        qb.build().execute(&mut **tx).await?;
        Ok(())
    }
}

#[async_trait]
impl super::EventRepository for SqliteRepository {
    async fn add_event(&self, data: NewEventData) -> Result<Vec<Event>, CoreError> {
        let mut tx = self.pool().begin().await?;
        let instances = self.materialize_in_transaction(&mut tx, &data, None).await?;
        tx.commit().await?;
        Ok(instances)
    }

    async fn find_event_by_id(&self, id: Uuid) -> Result<Option<Event>, CoreError> {
        let event = sqlx::query_as("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(event)
    }

    async fn find_events_by_short_id_prefix(&self, prefix: &str) -> Result<Vec<Event>, CoreError> {
        // Ids are stored as blobs; match on their hex form so a prefix of
        // the simple (hyphen-less) uuid works.
        let normalized = prefix.replace('-', "").to_lowercase();
        let events: Vec<Event> =
            sqlx::query_as("SELECT * FROM events WHERE lower(hex(id)) LIKE $1")
                .bind(format!("{normalized}%"))
                .fetch_all(self.pool())
                .await?;
        Ok(events)
    }

    async fn find_events(&self, query: &EventQuery) -> Result<Vec<Event>, CoreError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM events WHERE 1 = 1");

        if let Some(text) = query.text.as_deref().filter(|t| !t.is_empty()) {
            let pattern = format!("%{text}%");
            qb.push(" AND (title LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR description LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR location LIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
        if let Some(from) = query.from {
            qb.push(" AND date >= ");
            qb.push_bind(from);
        }
        if let Some(to) = query.to {
            qb.push(" AND date <= ");
            qb.push_bind(to);
        }
        qb.push(" ORDER BY date, start_time, created_at");

        let events = qb.build_query_as().fetch_all(self.pool()).await?;
        Ok(events)
    }

    async fn update_event(
        &self,
        id: Uuid,
        data: UpdateEventData,
        scope: EditScope,
    ) -> Result<Event, CoreError> {
        if data.is_empty() {
            return Err(CoreError::InvalidInput("Nothing to update.".to_string()));
        }

        let mut tx = self.pool().begin().await?;
        let current = self
            .find_event_by_id_in_transaction(&mut tx, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        // A row outside any series has nothing to scope over, so it always
        // takes the single-instance path.
        let result = match (scope, current.series_id) {
            (EditScope::Single, _) | (EditScope::Series, None) => {
                let mut merged = Self::merged_draft(&current, &data);
                let detach = current.series_id.is_some();
                if detach && data.repeat.is_none() {
                    // The instance leaves its series, so the inherited rule
                    // does not constrain the edit.
                    merged.repeat = Repeat::default();
                }
                merged.validate()?;

                if data.repeat.map_or(false, |r| r.is_repeating()) {
                    // Giving the instance a rule turns it into a fresh
                    // series anchored at its (possibly updated) date.
                    sqlx::query("DELETE FROM events WHERE id = $1")
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;
                    let instances = self
                        .materialize_in_transaction(&mut tx, &merged, None)
                        .await?;
                    instances
                        .into_iter()
                        .next()
                        .ok_or_else(|| CoreError::InvalidInput("Expansion was empty.".to_string()))?
                } else {
                    self.apply_field_update(&mut tx, &data, detach, ("id", id))
                        .await?;
                    // Single-scope date edits go through the plain path too.
                    self.find_event_by_id_in_transaction(&mut tx, id)
                        .await?
                        .ok_or_else(|| CoreError::NotFound(id.to_string()))?
                }
            }
            (EditScope::Series, Some(series_id)) => {
                if data.date.is_some() || data.repeat.is_some() {
                    // The shape of the series itself changed: rebuild it
                    // from its earliest instance.
                    let anchor: Event = sqlx::query_as(
                        "SELECT * FROM events WHERE series_id = $1 ORDER BY date LIMIT 1",
                    )
                    .bind(series_id)
                    .fetch_one(&mut *tx)
                    .await?;

                    let merged = Self::merged_draft(&anchor, &data);
                    merged.validate()?;

                    sqlx::query("DELETE FROM events WHERE series_id = $1")
                        .bind(series_id)
                        .execute(&mut *tx)
                        .await?;
                    let instances = self
                        .materialize_in_transaction(&mut tx, &merged, Some(series_id))
                        .await?;
                    instances
                        .into_iter()
                        .next()
                        .ok_or_else(|| CoreError::InvalidInput("Expansion was empty.".to_string()))?
                } else {
                    let merged = Self::merged_draft(&current, &data);
                    merged.validate()?;

                    self.apply_field_update(&mut tx, &data, false, ("series_id", series_id))
                        .await?;
                    self.find_event_by_id_in_transaction(&mut tx, id)
                        .await?
                        .ok_or_else(|| CoreError::NotFound(id.to_string()))?
                }
            }
        };

        tx.commit().await?;
        Ok(result)
    }

    async fn move_event(&self, id: Uuid, date: NaiveDate) -> Result<Event, CoreError> {
        let moved: Event = sqlx::query_as(
            r#"UPDATE events
            SET date = $1, series_id = NULL, repeat_kind = 'none', repeat_interval = 1, repeat_until = NULL, updated_at = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(date)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        Ok(moved)
    }

    async fn delete_event(&self, id: Uuid, scope: EditScope) -> Result<u64, CoreError> {
        let mut tx = self.pool().begin().await?;
        let current = self
            .find_event_by_id_in_transaction(&mut tx, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let result = match (scope, current.series_id) {
            (EditScope::Series, Some(series_id)) => {
                sqlx::query("DELETE FROM events WHERE series_id = $1")
                    .bind(series_id)
                    .execute(&mut *tx)
                    .await?
            }
            _ => {
                sqlx::query("DELETE FROM events WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    async fn reset(&self) -> Result<(), CoreError> {
        sqlx::query("DELETE FROM events")
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
