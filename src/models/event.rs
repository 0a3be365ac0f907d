//! Event model (named, tagged, priced and scheduled events)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Event record
///
/// The same shape is used for creation, full replacement and partial
/// updates: every attribute except `tags` and `duration_minutes` may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Assigned by the service on creation
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Event name
    #[serde(default)]
    pub event_name: Option<String>,
    /// Labels; the first one is the primary tag used for tag lookups
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Ticket price
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "25.00")]
    pub ticket_price: Option<Decimal>,
    /// Start date and time (RFC 3339)
    #[serde(default)]
    pub event_date_time: Option<DateTime<Utc>>,
    /// Duration in minutes (0 when unknown)
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_minutes: i32,
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Event {
    /// Primary tag
    pub fn tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    pub fn price(&self) -> Option<Decimal> {
        self.ticket_price
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.event_date_time
    }

    /// Overwrite fields that are set in `partial`, leaving the others untouched.
    ///
    /// Empty tag lists and non-positive durations count as "not set".
    /// The identifier is never touched.
    pub fn apply_partial(&mut self, partial: Event) {
        if let Some(name) = partial.event_name {
            self.event_name = Some(name);
        }
        if !partial.tags.is_empty() {
            self.tags = partial.tags;
        }
        if let Some(price) = partial.ticket_price {
            self.ticket_price = Some(price);
        }
        if let Some(date) = partial.event_date_time {
            self.event_date_time = Some(date);
        }
        if partial.duration_minutes > 0 {
            self.duration_minutes = partial.duration_minutes;
        }
    }
}

/// Query parameters for tag lookups
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct TagQuery {
    /// Tag to match (case-insensitive, exact)
    pub tag: Option<String>,
}

/// Query parameters for price range lookups (inclusive)
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PriceRangeQuery {
    #[param(value_type = Option<String>)]
    pub min_price: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub max_price: Option<Decimal>,
}

/// Query parameters for date range lookups (inclusive, RFC 3339)
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DateRangeQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Update price request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePrice {
    #[schema(value_type = Option<String>, example = "30.00")]
    pub price: Option<Decimal>,
}
