//! PostgreSQL events repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::EventRepository;
use crate::{
    error::{AppError, AppResult},
    models::event::Event,
};

const EVENT_COLUMNS: &str =
    "id, event_name, tags, ticket_price, event_date_time, duration_minutes";

#[derive(Clone)]
pub struct PgEventRepository {
    pool: Pool<Postgres>,
}

impl PgEventRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    /// Insert the event, or overwrite every column of the row with the same id
    async fn save(&self, event: Event) -> AppResult<Event> {
        let id = event
            .id
            .ok_or_else(|| AppError::Internal("Cannot store an event without id".to_string()))?;

        let query = format!(
            r#"
            INSERT INTO events (
                id, event_name, tags, ticket_price, event_date_time, duration_minutes
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                event_name = EXCLUDED.event_name,
                tags = EXCLUDED.tags,
                ticket_price = EXCLUDED.ticket_price,
                event_date_time = EXCLUDED.event_date_time,
                duration_minutes = EXCLUDED.duration_minutes,
                modif_date = $7
            RETURNING {}
            "#,
            EVENT_COLUMNS
        );

        let row = sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&event.event_name)
            .bind(&event.tags)
            .bind(event.ticket_price)
            .bind(event.event_date_time)
            .bind(event.duration_minutes)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        let query = format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS);
        let row = sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// All events in insertion order
    async fn find_all(&self) -> AppResult<Vec<Event>> {
        let query = format!("SELECT {} FROM events ORDER BY seq", EVENT_COLUMNS);
        let rows = sqlx::query_as::<_, Event>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn exists_by_id(&self, id: Uuid) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            tracing::debug!("Delete of event {} affected no rows", id);
        }
        Ok(())
    }
}
