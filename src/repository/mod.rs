//! Repository layer for event storage

pub mod events;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{error::AppResult, models::event::Event};

/// Storage primitives the events service builds on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert or replace the event with the same id and return what was stored
    async fn save(&self, event: Event) -> AppResult<Event>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>>;
    /// All events, in the backend's natural order
    async fn find_all(&self) -> AppResult<Vec<Event>>;
    async fn exists_by_id(&self, id: Uuid) -> AppResult<bool>;
    async fn delete_by_id(&self, id: Uuid) -> AppResult<()>;
}

/// Main repository struct holding the configured storage backends
#[derive(Clone)]
pub struct Repository {
    pub events: Arc<dyn EventRepository>,
}

impl Repository {
    /// Repository backed by process memory
    pub fn in_memory() -> Self {
        Self {
            events: Arc::new(memory::InMemoryEventRepository::new()),
        }
    }

    /// Repository backed by PostgreSQL
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            events: Arc::new(events::PgEventRepository::new(pool)),
        }
    }
}
