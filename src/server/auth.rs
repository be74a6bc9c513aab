//! Shared-secret authentication for the processing route.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use secrecy::ExposeSecret;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects the request with 401 unless `X-API-Key` matches the configured
/// secret. Passes everything through when no secret is configured.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(expected) = state.api_key() {
        let provided = request
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        if !keys_match(provided, expected.expose_secret()) {
            tracing::warn!(
                path = %request.uri().path(),
                key_present = !provided.is_empty(),
                "Rejected request with invalid API key"
            );
            return Err(AppError::Unauthorized);
        }
    }

    Ok(next.run(request).await)
}

/// Compares keys without short-circuiting on the first differing byte. Only
/// the length can be inferred from timing.
fn keys_match(provided: &str, expected: &str) -> bool {
    let (provided, expected) = (provided.as_bytes(), expected.as_bytes());
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match() {
        assert!(keys_match("s3cret", "s3cret"));
        assert!(keys_match("", ""));

        assert!(!keys_match("s3cret", "s3creT"));
        assert!(!keys_match("s3cre", "s3cret"));
        assert!(!keys_match("s3cret!", "s3cret"));
        assert!(!keys_match("", "s3cret"));
    }
}
