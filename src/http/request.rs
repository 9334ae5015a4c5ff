//! Request-side helpers.
//!
//! # Responsibilities
//! - Attach and propagate `x-request-id` for log correlation
//! - Drain submitted bodies and log them as JSON
//!
//! # Design Decisions
//! - Body reads are capped by the configured limit
//! - Malformed submissions are logged, never answered with an error

use axum::body::{Body, Bytes};
use axum::http::HeaderName;
use serde_json::Value;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Layer that assigns a UUID request ID when the client did not send one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Layer that echoes the request ID on the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Why a submitted body could not be logged.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("failed to read request body: {0}")]
    Read(#[source] axum::Error),
    #[error("request body is not JSON: {0}")]
    Json(#[source] serde_json::Error),
}

/// Read the whole body (up to `limit` bytes) off the connection.
pub async fn read_body(body: Body, limit: usize) -> Result<Bytes, BodyError> {
    axum::body::to_bytes(body, limit).await.map_err(BodyError::Read)
}

/// Read the whole body (up to `limit` bytes) and parse it as JSON.
pub async fn read_json_body(body: Body, limit: usize) -> Result<Value, BodyError> {
    let bytes = read_body(body, limit).await?;
    serde_json::from_slice(&bytes).map_err(BodyError::Json)
}

/// Drain a submitted body and log its JSON payload.
pub async fn log_json_body(path: &str, body: Body, limit: usize) -> Option<Value> {
    log_payload(path, read_json_body(body, limit).await)
}

/// Parse an already drained body and log its JSON payload.
pub fn log_json_bytes(path: &str, bytes: Result<Bytes, BodyError>) -> Option<Value> {
    let payload = bytes.and_then(|b| serde_json::from_slice(&b).map_err(BodyError::Json));
    log_payload(path, payload)
}

fn log_payload(path: &str, payload: Result<Value, BodyError>) -> Option<Value> {
    match payload {
        Ok(payload) => {
            tracing::debug!(path = %path, payload = %payload, "Received JSON payload");
            Some(payload)
        }
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Could not decode submitted payload");
            None
        }
    }
}
