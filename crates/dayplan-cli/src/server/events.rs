//! Event endpoints
//!
//! Writes go through the day's board, so they obey the same plan rules as the
//! editor: only the current plan accepts new events, nothing starts in its
//! inert region, and crossed-off events or events of earlier plans are frozen.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use dayplan_core::{
    models::{Event, EventPatch, NewEvent},
    params::{CreateEvent, DateQuery, UpdateEvent},
    store::DayRepository,
};
use log::info;
use serde::Serialize;

use super::{
    errors::AppError,
    extract::{ApiJson, ApiPath, ApiQuery},
    AppState, MessageResponse,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", put(update_event).delete(delete_event))
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}

#[derive(Serialize)]
pub struct EventResponse {
    pub event: Event,
}

/// GET /events?date=YYYY-MM-DD
async fn list_events(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<Json<EventsResponse>, AppError> {
    let events = state.store.list_events(query.date()?).await?;
    Ok(Json(EventsResponse { events }))
}

/// POST /events
async fn create_event(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateEvent>,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    let new = NewEvent::try_from(body)?;
    let refused = AppError::bad_request(format!(
        "Plan '{}' is not accepting events at {}",
        new.resource_id,
        new.range.start()
    ));

    let mut board = state.board(new.date).await?;
    let event = board.create_event(new).await?.ok_or(refused)?;
    info!("Created event {} on {}", event.id, event.date);
    Ok((StatusCode::CREATED, Json(EventResponse { event })))
}

/// PUT /events/{id}
async fn update_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(body): ApiJson<UpdateEvent>,
) -> Result<Json<EventResponse>, AppError> {
    let patch = EventPatch::try_from(body)?;
    let date = state.store.get_event(id).await?.date;
    let mut board = state.board(date).await?;
    let event = board
        .update_event(id, patch)
        .await?
        .ok_or_else(|| frozen(id))?;
    Ok(Json(EventResponse { event }))
}

/// DELETE /events/{id}
async fn delete_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<MessageResponse>, AppError> {
    let date = state.store.get_event(id).await?.date;
    let mut board = state.board(date).await?;
    if !board.delete_event(id).await? {
        return Err(frozen(id));
    }
    info!("Deleted event {id}");
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

fn frozen(id: u64) -> AppError {
    AppError::bad_request(format!(
        "Event {id} cannot be changed: it is crossed off or not in the current plan"
    ))
}
