//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    infrastructure::dto::http::{HistoryDto, ParticipantsDto},
    ui::state::AppState,
};

/// Query parameters for the history endpoint
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the most recent chat events, oldest first
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryDto>, StatusCode> {
    match state.get_history_usecase.execute(query.limit).await {
        Ok(events) => Ok(Json(HistoryDto { events })),
        Err(e) => {
            tracing::warn!("Failed to read chat history: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Get the nicknames of connected participants
pub async fn get_participants(State(state): State<Arc<AppState>>) -> Json<ParticipantsDto> {
    let nicknames = state.get_participants_usecase.execute().await;
    Json(ParticipantsDto {
        count: nicknames.len(),
        nicknames,
    })
}
