use super::state::AppState;
use crate::error::PipelineError;
use crate::pipeline::{BatchSummary, CallRecord};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessCallsResponse {
    pub message: String,
    pub batch_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub summary: BatchSummary,
    pub results: Vec<CallRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /process-calls
/// Run the pipeline over every call ID in the input file
pub async fn process_calls(State(state): State<AppState>) -> Response {
    info!(
        "Processing calls from {}",
        state.pipeline.input_path().display()
    );

    match state.pipeline.process_batch().await {
        Ok(report) => (
            StatusCode::OK,
            Json(ProcessCallsResponse {
                message: "Successfully processed all calls.".to_string(),
                batch_id: report.batch_id,
                started_at: report.started_at,
                finished_at: report.finished_at,
                summary: report.summary,
                results: report.results,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Error processing calls: {}", e);
            pipeline_error_response(e)
        }
    }
}

fn pipeline_error_response(err: PipelineError) -> Response {
    let (status, body) = match &err {
        PipelineError::NotFound { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse {
                message: err.to_string(),
                error: None,
            },
        ),
        PipelineError::InvalidInput { reason, .. } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse {
                message: err.to_string(),
                error: Some(reason.clone()),
            },
        ),
        PipelineError::Malformed { .. } | PipelineError::Io { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse {
                message: "Error processing calls.".to_string(),
                error: Some(err.to_string()),
            },
        ),
    };

    (status, Json(body)).into_response()
}

/// GET /
/// Human-readable status page
pub async fn status_page(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    Html(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Call Intent Analyzer Status</title></head>\n\
         <body>\n\
         <h1>Call Intent Analyzer Status</h1>\n\
         <p>{} is running.</p>\n\
         <p>Current time: {}</p>\n\
         <p>POST /process-calls to analyze the calls listed in the input file.</p>\n\
         </body>\n\
         </html>\n",
        state.service_name, now
    ))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
