//! In-memory events repository

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::EventRepository;
use crate::{
    error::{AppError, AppResult},
    models::event::Event,
};

/// Events kept in insertion order for the lifetime of the process
#[derive(Default)]
pub struct InMemoryEventRepository {
    events: RwLock<IndexMap<Uuid, Event>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn save(&self, event: Event) -> AppResult<Event> {
        let id = event
            .id
            .ok_or_else(|| AppError::Internal("Cannot store an event without id".to_string()))?;
        self.events.write().await.insert(id, event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        Ok(self.events.read().await.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.events.read().await.contains_key(&id))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        self.events.write().await.shift_remove(&id);
        Ok(())
    }
}
