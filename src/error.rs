use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Patterns (lowercase) that indicate sensitive data not safe for client display.
/// Used by `contains_sensitive()` for case-insensitive matching.
pub(crate) const SENSITIVE_PATTERNS: &[&str] = &[
    "x-api-key:",
    "api_key=",
    "authorization:",
    "bearer ",
];

/// Returns true if the message contains any sensitive pattern (case-insensitive).
fn contains_sensitive(msg: &str) -> bool {
    let lower = msg.to_ascii_lowercase();
    SENSITIVE_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Sanitizes a message for client display.
/// If sensitive content is detected, returns the fallback instead.
fn sanitize_message(msg: &str, fallback: &str) -> String {
    if contains_sensitive(msg) {
        fallback.into()
    } else {
        msg.to_string()
    }
}

/// Client-facing error presentation, serialized as the JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPresentation {
    pub title: String,
    pub message: String,
    pub action: Option<String>,
}

/// Application-wide error type.
///
/// Request-shape and decode problems abort the whole batch. Row-level data
/// problems never surface here; the classifier routes them to the failure table.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Request ───────────────────────────────────────────────────────────────
    #[error("Provide at least one file.")]
    NoFiles,

    #[error("content_base64 missing for files[{index}]")]
    MissingContent { index: usize },

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    // ── Auth ──────────────────────────────────────────────────────────────────
    #[error("Unauthorized")]
    Unauthorized,

    // ── Decode ────────────────────────────────────────────────────────────────
    #[error("Invalid base64 in {filename:?}: {message}")]
    InvalidBase64 { filename: String, message: String },

    #[error("Invalid CSV: {0}")]
    CsvInvalid(String),

    // ── Output ────────────────────────────────────────────────────────────────
    #[error("Failed to build archive: {0}")]
    ArchiveFailed(String),

    // ── Generic fallback ──────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error. Everything caused by the request body is a 4xx.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NoFiles
            | AppError::MissingContent { .. }
            | AppError::InvalidRequest(_)
            | AppError::InvalidBase64 { .. }
            | AppError::CsvInvalid(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::ArchiveFailed(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into a presentation suitable for API clients.
    /// Never leaks secrets or internal failure details.
    pub fn to_presentation(&self) -> ErrorPresentation {
        match self {
            // ── Request ───────────────────────────────────────────────────────
            AppError::NoFiles => ErrorPresentation {
                title: "No Files".into(),
                message: "Provide at least one file.".into(),
                action: Some("Add one or more entries to \"files\"".into()),
            },

            AppError::MissingContent { index } => ErrorPresentation {
                title: "Missing File Content".into(),
                message: format!("content_base64 missing for files[{}].", index),
                action: Some("Send the file bytes as content_base64 or contentBase64".into()),
            },

            AppError::InvalidRequest(msg) => ErrorPresentation {
                title: "Invalid Request".into(),
                message: sanitize_message(msg, "The request body could not be read."),
                action: Some("Send a JSON object with a \"files\" array".into()),
            },

            AppError::PayloadTooLarge { limit } => ErrorPresentation {
                title: "Request Too Large".into(),
                message: format!("The request body exceeds the {} byte limit.", limit),
                action: Some("Send fewer or smaller files per request".into()),
            },

            // ── Auth ──────────────────────────────────────────────────────────
            AppError::Unauthorized => ErrorPresentation {
                title: "Unauthorized".into(),
                message: "A valid X-API-Key header is required.".into(),
                action: Some("Check the API key and try again".into()),
            },

            // ── Decode ────────────────────────────────────────────────────────
            AppError::InvalidBase64 { filename, .. } => ErrorPresentation {
                title: "Invalid File Encoding".into(),
                message: if filename.is_empty() {
                    "A file's content is not valid base64.".into()
                } else {
                    format!("The content of {} is not valid base64.", filename)
                },
                action: Some("Re-encode the file with standard base64".into()),
            },

            AppError::CsvInvalid(msg) => ErrorPresentation {
                title: "Invalid CSV".into(),
                message: format!("The CSV file has a formatting problem: {}", msg),
                action: Some("Fix the CSV file and try again".into()),
            },

            // ── Output ────────────────────────────────────────────────────────
            AppError::ArchiveFailed(_) => ErrorPresentation {
                title: "Archive Error".into(),
                message: "The result archive could not be created.".into(),
                action: Some("Try again".into()),
            },

            // ── Generic ───────────────────────────────────────────────────────
            AppError::Internal(_) => ErrorPresentation {
                title: "Unexpected Error".into(),
                message: "Something went wrong. Please try again.".into(),
                action: Some("Try again".into()),
            },
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_presentation().serialize(serializer)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, Json(self.to_presentation())).into_response()
    }
}
