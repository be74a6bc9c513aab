//! Route handlers.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::pipeline::{process_files, ProcessRequest, RESULTS_FILENAME, ZIP_MEDIA_TYPE};
use crate::state::AppState;

/// Body of `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub ok: bool,
    pub message: String,
}

/// `GET /`: unauthenticated liveness and usage hint.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        ok: true,
        message: "POST /process with JSON and header X-API-Key".to_string(),
    })
}

/// `POST /process`: runs the pipeline and returns the results zip.
///
/// The body is parsed as JSON regardless of `Content-Type`. The pipeline
/// itself is CPU-bound and runs on the blocking pool.
pub async fn process(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body.map_err(|rejection| body_error(&state, rejection))?;
    let request: ProcessRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidRequest(e.to_string()))?;
    let files = request.into_files();

    tracing::info!(
        files = files.len(),
        body_bytes = body.len(),
        "Processing upload"
    );

    let archive = tokio::task::spawn_blocking(move || process_files(&files))
        .await
        .map_err(|e| AppError::Internal(format!("Processing task failed: {}", e)))??;

    let disposition = format!("attachment; filename=\"{}\"", RESULTS_FILENAME);
    Ok((
        [
            (header::CONTENT_TYPE, ZIP_MEDIA_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        archive.bytes,
    )
        .into_response())
}

fn body_error(state: &AppState, rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge {
            limit: state.max_body_bytes(),
        }
    } else {
        AppError::InvalidRequest(rejection.body_text())
    }
}
