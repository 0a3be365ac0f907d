//! Events API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::event::{DateRangeQuery, Event, PriceRangeQuery, TagQuery, UpdatePrice},
};

/// List all events
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses(
        (status = 200, description = "Events list", body = Vec<Event>)
    )
)]
pub async fn list_events(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = state.services.events.get_all_events().await?;
    Ok(Json(events))
}

/// Get event by ID
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = Event),
        (status = 404, description = "Event not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_event(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Event>> {
    let event = state.services.events.get_event_by_id(id).await?;
    Ok(Json(event))
}

/// Create an event
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = Event,
    responses(
        (status = 201, description = "Event created", body = Event)
    )
)]
pub async fn create_event(
    State(state): State<crate::AppState>,
    Json(data): Json<Event>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let event = state.services.events.create_event(data).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Replace an event
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "events",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = Event,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 404, description = "Event not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_event(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<Event>,
) -> AppResult<Json<Event>> {
    let event = state.services.events.update_event(id, data).await?;
    Ok(Json(event))
}

/// Update the fields of an event that are present in the body
#[utoipa::path(
    patch,
    path = "/events/{id}",
    tag = "events",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = Event,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 404, description = "Event not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn partial_update_event(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<Event>,
) -> AppResult<Json<Event>> {
    let event = state.services.events.partial_update_event(id, data).await?;
    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "events",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_event(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.events.delete_event(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Events whose primary tag matches (case-insensitive)
#[utoipa::path(
    get,
    path = "/events/tag",
    tag = "events",
    params(TagQuery),
    responses(
        (status = 200, description = "Matching events, empty when no tag is given", body = Vec<Event>)
    )
)]
pub async fn events_by_tag(
    State(state): State<crate::AppState>,
    Query(query): Query<TagQuery>,
) -> AppResult<Json<Vec<Event>>> {
    let events = state
        .services
        .events
        .get_events_by_tag(query.tag.as_deref())
        .await?;
    Ok(Json(events))
}

/// Events scheduled after now
#[utoipa::path(
    get,
    path = "/events/upcoming",
    tag = "events",
    responses(
        (status = 200, description = "Upcoming events", body = Vec<Event>)
    )
)]
pub async fn upcoming_events(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = state.services.events.get_upcoming_events().await?;
    Ok(Json(events))
}

/// Events priced within an inclusive range
#[utoipa::path(
    get,
    path = "/events/price-range",
    tag = "events",
    params(PriceRangeQuery),
    responses(
        (status = 200, description = "Matching events, empty for an invalid range", body = Vec<Event>)
    )
)]
pub async fn events_by_price_range(
    State(state): State<crate::AppState>,
    Query(query): Query<PriceRangeQuery>,
) -> AppResult<Json<Vec<Event>>> {
    let events = state
        .services
        .events
        .get_events_by_price_range(query.min_price, query.max_price)
        .await?;
    Ok(Json(events))
}

/// Events dated within an inclusive range
#[utoipa::path(
    get,
    path = "/events/date-range",
    tag = "events",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Matching events, empty for an invalid range", body = Vec<Event>)
    )
)]
pub async fn events_by_date_range(
    State(state): State<crate::AppState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<Event>>> {
    let events = state
        .services
        .events
        .get_events_by_date_range(query.start, query.end)
        .await?;
    Ok(Json(events))
}

/// Change the ticket price of an event
#[utoipa::path(
    patch,
    path = "/events/{id}/price",
    tag = "events",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdatePrice,
    responses(
        (status = 200, description = "Price updated", body = Event),
        (status = 404, description = "Unknown event or invalid price", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_event_price(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdatePrice>,
) -> AppResult<Json<Event>> {
    state
        .services
        .events
        .update_event_price(Some(id), data.price)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Event price not updated for id: {}", id)))
}
