//! Request dispatch.
//!
//! Every request lands in [`dispatch`], which looks up the route table and
//! runs one of the fixed behaviors:
//!
//! ```text
//! Received → Routed → Served | NotFound | Errored
//! ```

use std::convert::Infallible;
use std::path::Path;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::Method,
    response::{IntoResponse, Response},
};
use futures_util::stream;
use tokio::sync::oneshot;

use crate::http::request::{log_json_body, log_json_bytes, read_body};
use crate::http::response::{self, DispatchError};
use crate::http::server::AppState;
use crate::routing::Handler;

/// Fallback handler owning all routing decisions.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    // Routes match the full request target; a query string defeats exact and suffix rules.
    let uri = request.uri();
    let path = uri.path_and_query().map_or(uri.path(), |pq| pq.as_str()).to_string();

    let handler = state
        .routes
        .match_request(&method, &path)
        .map(|route| {
            tracing::debug!(method = %method, path = %path, route = route.name, "Routed request");
            route.handler.clone()
        });

    let result = match handler {
        Some(Handler::StaticPage { file }) => serve_page(&file, &path).await,
        Some(Handler::Command { command_line }) => Ok(relay_command(&state, &command_line).await),
        Some(Handler::EventAck) => Ok(acknowledge_event(&state, path.clone(), request.into_body())),
        None if method == Method::POST => Ok(accept_unrouted_post(&state, &path, request.into_body()).await),
        None => Err(DispatchError::NotFound(path.clone())),
    };

    result.unwrap_or_else(|e| {
        match &e {
            DispatchError::Io { source, .. } => {
                tracing::warn!(path = %path, error = %source, "IO error while serving request")
            }
            DispatchError::NotFound(_) => {
                tracing::info!(method = %method, path = %path, "No route matched")
            }
        }
        e.into_response()
    })
}

/// Serve the static page for any matching `.html` path.
async fn serve_page(file: &Path, path: &str) -> Result<Response, DispatchError> {
    let contents = tokio::fs::read(file).await.map_err(|source| DispatchError::Io {
        path: path.to_string(),
        source,
    })?;
    Ok(response::html(contents))
}

/// Run the route's command and relay its JSON output.
async fn relay_command(state: &AppState, command_line: &str) -> Response {
    let result = state.executor.execute(command_line).await;
    let body = result.to_json_bytes();
    tracing::debug!(
        command = %command_line,
        payload = %String::from_utf8_lossy(&body),
        "Relaying command output"
    );
    response::json(body)
}

/// Answer an event submission through the simulator.
///
/// The status line and headers leave as soon as this returns; the body is a
/// one-chunk stream that resolves only after the simulated decision, so a
/// delayed acknowledgment holds the body, not the headers. The submitted
/// event is read off the connection right away but parsed and logged only
/// once the acknowledgment has been produced. The final chunk waits for that
/// read, since ending the response closes the exchange.
fn acknowledge_event(state: &AppState, path: String, body: Body) -> Response {
    let simulator = state.simulator.clone();
    let limit = state.config.limits.max_body_bytes;
    let (read_tx, read_rx) = oneshot::channel::<()>();
    let (sent_tx, sent_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let bytes = read_body(body, limit).await;
        let _ = read_tx.send(());
        // An error here means the client went away before the ACK; log anyway.
        let _ = sent_rx.await;
        log_json_bytes(&path, bytes);
    });

    let ack = stream::once(async move {
        let (outcome, text) = simulator.respond().await;
        let _ = read_rx.await;
        tracing::info!(outcome = %outcome, "Event acknowledged");
        let _ = sent_tx.send(());
        Ok::<_, Infallible>(Bytes::from_static(text.as_bytes()))
    });

    response::html(Body::from_stream(ack))
}

/// Unknown POST paths still get their body logged and an empty 200.
async fn accept_unrouted_post(state: &AppState, path: &str, body: Body) -> Response {
    tracing::info!(path = %path, "Received request on unrouted path");
    log_json_body(path, body, state.config.limits.max_body_bytes).await;
    response::html(Body::empty())
}
