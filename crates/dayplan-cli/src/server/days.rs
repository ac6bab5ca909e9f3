//! Per-date endpoints: notes, metrics and the replan history.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use dayplan_core::{
    models::{CutoverRecord, DailyMetrics, Note},
    params::{DateQuery, RecordReplan, SetNote, UpdateMetrics},
};
use log::info;
use serde::Serialize;

use super::{
    errors::AppError,
    extract::{ApiJson, ApiQuery},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notes", get(get_note).put(upsert_note).post(upsert_note))
        .route(
            "/metrics",
            get(get_metrics).put(update_metrics).post(update_metrics),
        )
        .route("/replans", get(list_replans).post(record_replan))
}

#[derive(Serialize)]
pub struct NoteResponse {
    pub note: Note,
}

#[derive(Serialize)]
pub struct MetricsResponse {
    pub metrics: DailyMetrics,
}

#[derive(Serialize)]
pub struct ReplansResponse {
    pub replans: Vec<CutoverRecord>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplanResponse {
    pub replan: CutoverRecord,
    /// Ids of the events the replan struck out
    pub crossed_off: Vec<u64>,
}

/// GET /notes?date=YYYY-MM-DD - an empty note when none was written
async fn get_note(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<Json<NoteResponse>, AppError> {
    let note = state.store.get_note(query.date()?).await?;
    Ok(Json(NoteResponse { note }))
}

async fn upsert_note(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SetNote>,
) -> Result<Json<NoteResponse>, AppError> {
    let date = body.date()?;
    let note = state.store.upsert_note(date, body.content).await?;
    Ok(Json(NoteResponse { note }))
}

/// GET /metrics?date=YYYY-MM-DD - defaults when nothing was recorded
async fn get_metrics(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<Json<MetricsResponse>, AppError> {
    let metrics = state.store.get_metrics(query.date()?).await?;
    Ok(Json(MetricsResponse { metrics }))
}

async fn update_metrics(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<UpdateMetrics>,
) -> Result<Json<MetricsResponse>, AppError> {
    let (date, patch) = body.into_patch()?;
    let metrics = state.store.upsert_metrics(date, patch).await?;
    Ok(Json(MetricsResponse { metrics }))
}

async fn list_replans(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<Json<ReplansResponse>, AppError> {
    let replans = state.store.list_cutovers(query.date()?).await?;
    Ok(Json(ReplansResponse { replans }))
}

/// POST /replans - hands the day to the next plan at `replanTime`, crossing
/// off the previous plan's editable events from that minute on
async fn record_replan(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RecordReplan>,
) -> Result<(StatusCode, Json<ReplanResponse>), AppError> {
    let requested = CutoverRecord::try_from(body)?;
    let mut board = state.board(requested.date).await?;

    let cutover = board.editor().cutover();
    let current_index = cutover.current_index();
    let current = cutover.current_plan().id.clone();
    let next = cutover.resources().get(current_index + 1).map(|r| r.id.clone());
    let refused = AppError::bad_request(format!(
        "Cannot replan {} -> {}: {current} is the current plan",
        requested.previous_resource_id, requested.resource_id
    ));
    if requested.previous_resource_id != current
        || next.as_deref() != Some(requested.resource_id.as_str())
    {
        return Err(refused);
    }

    let replan = board
        .replan_at(requested.cutover_time, current_index)
        .await?
        .ok_or(refused)?;
    info!(
        "Replanned {} -> {} on {}, crossed off {:?}",
        replan.previous_resource_id, replan.resource_id, requested.date, replan.crossed_off
    );
    Ok((
        StatusCode::CREATED,
        Json(ReplanResponse {
            replan: replan.record(requested.date),
            crossed_off: replan.crossed_off,
        }),
    ))
}
