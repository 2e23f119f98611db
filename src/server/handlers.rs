// HTTP request handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use super::types::{ChatRequest, ChatResponse, DynamicDataStatus, HealthResponse};
use super::AppState;
use crate::bridge::{build_turns, send_message, Priming};
use crate::config::constants::MISSING_MESSAGE_ERROR;
use crate::context::assemble;
use crate::errors::ChatError;

/// POST /api/chat
///
/// Every failure is mapped to a `ChatError` here, so callers always get a
/// well-formed JSON body.
pub async fn handle_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);

    async move {
        let result = chat(&state, payload).await;
        match &result {
            Ok(_) => tracing::info!("Reply sent"),
            Err(ChatError::Validation(reason)) => {
                tracing::info!(reason = %reason, "Rejected chat request")
            }
            Err(ChatError::ContentBlocked) => {
                tracing::info!("Model safety filter blocked the reply")
            }
            Err(ChatError::Internal(e)) => {
                tracing::error!("Chat request failed: {:#}", e)
            }
        }
        result
    }
    .instrument(span)
    .await
}

async fn chat(
    state: &AppState,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatError> {
    let Json(request) = payload.map_err(|rejection| ChatError::Validation(rejection.body_text()))?;

    let message = request
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ChatError::Validation(MISSING_MESSAGE_ERROR.to_string()))?;
    let history = request.history.unwrap_or_default();

    let snapshot = state.dynamic.snapshot();
    let context = assemble(&state.static_context, snapshot.as_deref());
    let priming = Priming::new(context, state.static_context.acknowledgement.clone());
    let turns = build_turns(&priming, &history);

    tracing::debug!(
        history = history.len(),
        turns = turns.len(),
        dynamic_data = snapshot.is_some(),
        "Forwarding message to model"
    );

    let reply = send_message(state.model.as_ref(), &turns, &message).await?;
    Ok(Json(ChatResponse { reply }))
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = state.dynamic.snapshot();
    let dynamic_data = match snapshot.as_deref() {
        Some(data) => DynamicDataStatus {
            available: true,
            scraped_at: Some(data.scraped_at),
            players: data.roster.players.len(),
            results: data.results.len(),
        },
        None => DynamicDataStatus {
            available: false,
            scraped_at: None,
            players: 0,
            results: 0,
        },
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.model.model().to_string(),
        dynamic_data,
    })
}
