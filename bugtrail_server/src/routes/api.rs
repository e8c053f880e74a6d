//! `/api` routes: roleplay, extraction, scenarios and export.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use bugtrail_core::{BugTrail, ChatMessage, ExportFormat, ScenarioBrief, all_scenarios};
use bugtrail_conversation::{RoleplayReply, RoleplayRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::ServerError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/roleplay", post(roleplay))
        .route("/extract", post(extract))
        .route("/scenarios", get(scenarios))
        .route("/export", post(export))
}

/// Next simulated-customer message.
async fn roleplay(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RoleplayRequest>, JsonRejection>,
) -> Result<Json<RoleplayReply>, ServerError> {
    let Json(request) = payload?;
    let reply = state.roleplay.reply(&request).await?;
    Ok(Json(reply))
}

#[derive(Debug, Deserialize)]
struct ExtractRequest {
    /// Missing and `null` both count as an empty conversation.
    #[serde(default)]
    history: Option<Vec<ChatMessage>>,
}

#[derive(Debug, Serialize)]
struct ExtractResponse {
    bugtrail: BugTrail,
}

async fn extract(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, ServerError> {
    let Json(request) = payload?;
    let history = request.history.unwrap_or_default();
    let extraction = state.extraction.extract(&history).await?;
    info!(source = ?extraction.source, "Extracted BugTrail");
    Ok(Json(ExtractResponse {
        bugtrail: extraction.bugtrail,
    }))
}

async fn scenarios() -> Json<&'static [ScenarioBrief]> {
    Json(all_scenarios())
}

#[derive(Debug, Deserialize)]
struct ExportRequest {
    bugtrail: BugTrail,
    #[serde(default)]
    format: ExportFormat,
}

#[derive(Debug, Serialize)]
struct ExportResponse {
    format: ExportFormat,
    content: String,
}

async fn export(
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Json<ExportResponse>, ServerError> {
    let Json(request) = payload?;
    Ok(Json(ExportResponse {
        format: request.format,
        content: request.format.render(&request.bugtrail),
    }))
}
