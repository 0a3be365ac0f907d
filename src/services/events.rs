//! Events service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::clock::{Clock, SystemClock};
use crate::{
    error::{AppError, AppResult},
    models::event::Event,
    repository::Repository,
};

/// CRUD and in-memory queries over events.
///
/// Lookups by id fail with [`AppError::NotFound`] when the event is missing.
/// The filter queries and [`EventsService::update_event_price`] never do:
/// malformed arguments give an empty or absent result instead.
#[derive(Clone)]
pub struct EventsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl EventsService {
    pub fn new(repository: Repository) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Store a new event, assigning an id if it has none
    pub async fn create_event(&self, mut event: Event) -> AppResult<Event> {
        if event.id.is_none() {
            event.id = Some(Uuid::new_v4());
        }
        let saved = self.repository.events.save(event).await?;
        tracing::info!("Created event {:?}", saved.id);
        Ok(saved)
    }

    pub async fn get_event_by_id(&self, id: Uuid) -> AppResult<Event> {
        self.repository
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::event_not_found(id))
    }

    pub async fn get_all_events(&self) -> AppResult<Vec<Event>> {
        self.repository.events.find_all().await
    }

    /// Replace an event; the stored id is always the one given here
    pub async fn update_event(&self, id: Uuid, mut event: Event) -> AppResult<Event> {
        if !self.repository.events.exists_by_id(id).await? {
            return Err(AppError::event_not_found(id));
        }
        event.id = Some(id);
        let saved = self.repository.events.save(event).await?;
        tracing::info!("Updated event {}", id);
        Ok(saved)
    }

    pub async fn delete_event(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.events.exists_by_id(id).await? {
            return Err(AppError::event_not_found(id));
        }
        self.repository.events.delete_by_id(id).await?;
        tracing::info!("Deleted event {}", id);
        Ok(())
    }

    /// Merge the set fields of `partial` onto the stored event
    pub async fn partial_update_event(&self, id: Uuid, partial: Event) -> AppResult<Event> {
        let mut existing = self.get_event_by_id(id).await?;
        existing.apply_partial(partial);
        let saved = self.repository.events.save(existing).await?;
        tracing::info!("Partially updated event {}", id);
        Ok(saved)
    }

    /// Events whose primary tag equals `tag`, ignoring case
    pub async fn get_events_by_tag(&self, tag: Option<&str>) -> AppResult<Vec<Event>> {
        let tag = match tag {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                tracing::debug!("Blank tag query, returning no events");
                return Ok(Vec::new());
            }
        };

        let events = self.repository.events.find_all().await?;
        Ok(events
            .into_iter()
            .filter(|e| e.tag().is_some_and(|t| equals_ignore_case(t, tag)))
            .collect())
    }

    /// Events dated strictly after the current instant
    pub async fn get_upcoming_events(&self) -> AppResult<Vec<Event>> {
        let now = self.clock.now();
        let events = self.repository.events.find_all().await?;
        Ok(events
            .into_iter()
            .filter(|e| e.date().is_some_and(|d| d > now))
            .collect())
    }

    /// Events priced within `[min_price, max_price]`
    pub async fn get_events_by_price_range(
        &self,
        min_price: Option<Decimal>,
        max_price: Option<Decimal>,
    ) -> AppResult<Vec<Event>> {
        let (min, max) = match (min_price, max_price) {
            (Some(min), Some(max)) if min <= max => (min, max),
            _ => {
                tracing::debug!("Invalid price range {:?}..{:?}", min_price, max_price);
                return Ok(Vec::new());
            }
        };

        let events = self.repository.events.find_all().await?;
        Ok(events
            .into_iter()
            .filter(|e| e.price().is_some_and(|p| p >= min && p <= max))
            .collect())
    }

    /// Events dated within `[start, end]`
    pub async fn get_events_by_date_range(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<Event>> {
        let (start, end) = match (start, end) {
            (Some(start), Some(end)) if start <= end => (start, end),
            (start, end) => {
                tracing::debug!("Invalid date range {:?}..{:?}", start, end);
                return Ok(Vec::new());
            }
        };

        let events = self.repository.events.find_all().await?;
        Ok(events
            .into_iter()
            .filter(|e| e.date().is_some_and(|d| d >= start && d <= end))
            .collect())
    }

    /// Set the ticket price of an event.
    ///
    /// Returns `None` without touching storage when an argument is missing,
    /// the price is negative or the event does not exist.
    pub async fn update_event_price(
        &self,
        id: Option<Uuid>,
        new_price: Option<Decimal>,
    ) -> AppResult<Option<Event>> {
        let (id, price) = match (id, new_price) {
            (Some(id), Some(price)) if price >= Decimal::ZERO => (id, price),
            _ => {
                tracing::debug!("Rejected price update {:?} for event {:?}", new_price, id);
                return Ok(None);
            }
        };

        let Some(mut event) = self.repository.events.find_by_id(id).await? else {
            return Ok(None);
        };
        event.ticket_price = Some(price);
        let saved = self.repository.events.save(event).await?;
        tracing::info!("Updated price of event {} to {}", id, price);
        Ok(Some(saved))
    }
}

/// Character-wise case-insensitive equality.
///
/// Two characters match when they are equal, when their uppercase forms are
/// equal, or when the lowercase forms of those uppercase forms are equal.
/// Only single-character mappings are applied, so final and medial sigma
/// both match `Σ` and `İ` matches `i`.
fn equals_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            if x == y {
                return true;
            }
            let (ux, uy) = (simple_upper(x), simple_upper(y));
            ux == uy || simple_lower(ux) == simple_lower(uy)
        })
}

fn simple_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        // multi-character expansions such as 'ß' -> "SS" keep the character
        _ => c,
    }
}

fn simple_lower(c: char) -> char {
    // 'İ' is the only character lowering to more than one; its first is 'i'
    c.to_lowercase().next().unwrap_or(c)
}
