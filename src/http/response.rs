//! Response construction and per-request error mapping.
//!
//! # Responsibilities
//! - Build the markup, JSON and empty responses the dispatcher sends
//! - Map per-request failures to the client-visible 404 responses
//!
//! # Design Decisions
//! - Every handler failure resolves to a response; nothing escapes the request task
//! - Error bodies are plain text so request paths are never interpreted as markup

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const TEXT_HTML: &str = "text/html";
pub const APPLICATION_JSON: &str = "application/json";

/// Failures contained within one request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Reading a local resource failed.
    #[error("IO error while processing {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No route matched.
    #[error("Don't know what to do with {0}")]
    NotFound(String),
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::NOT_FOUND, self.to_string()).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        response
    }
}

/// 200 with a markup body.
pub fn html(body: impl Into<Body>) -> Response {
    with_content_type(StatusCode::OK, TEXT_HTML, body.into())
}

/// 200 with a JSON body.
pub fn json(body: Vec<u8>) -> Response {
    with_content_type(StatusCode::OK, APPLICATION_JSON, Body::from(body))
}

fn with_content_type(status: StatusCode, content_type: &'static str, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn not_found_names_path() {
        let response = DispatchError::NotFound("/nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Don't know what to do with /nope");
    }

    #[tokio::test]
    async fn io_error_is_404() {
        let err = DispatchError::Io {
            path: "/index.html".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"IO error while processing /index.html");
    }

    #[test]
    fn content_types() {
        assert_eq!(html("x").headers()[header::CONTENT_TYPE], TEXT_HTML);
        assert_eq!(json(b"{}".to_vec()).headers()[header::CONTENT_TYPE], APPLICATION_JSON);
    }
}
