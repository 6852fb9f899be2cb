//! HTTP transport for the controller: maps HTTP requests to command dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:command` — dispatch a command. Body = JSON input.
//! - `GET /health` — health check returning `{ "ok": true, "commands": [...] }`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::record::Record;
use crate::store::Store;

use super::commands::{CommandResponse, Controller};

/// Build an axum `Router` that dispatches commands via the given controller.
pub fn router<R, S>(controller: Arc<Controller<R, S>>) -> Router
where
    R: Record + 'static,
    S: Store<R> + 'static,
{
    Router::new()
        .route("/health", get(health_handler::<R, S>))
        .route("/:command", post(command_handler::<R, S>))
        .with_state(controller)
}

/// Serve the controller over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<R, S>(controller: Arc<Controller<R, S>>, addr: &str) -> Result<(), std::io::Error>
where
    R: Record + 'static,
    S: Store<R> + 'static,
{
    let app = router(controller);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr, "serving commands over http");
    axum::serve(listener, app).await
}

/// `GET /health` — returns `{ "ok": true, "commands": [...] }`.
async fn health_handler<R, S>(State(controller): State<Arc<Controller<R, S>>>) -> impl IntoResponse
where
    R: Record + 'static,
    S: Store<R> + 'static,
{
    let mut commands: Vec<&str> = controller.commands();
    commands.sort_unstable();
    Json(json!({ "ok": true, "commands": commands }))
}

/// `POST /:command` — dispatch a command with the JSON body as input.
async fn command_handler<R, S>(
    State(controller): State<Arc<Controller<R, S>>>,
    Path(command): Path<String>,
    Json(input): Json<Value>,
) -> impl IntoResponse
where
    R: Record + 'static,
    S: Store<R> + 'static,
{
    let response = match controller.dispatch(&command, input) {
        Ok(value) => CommandResponse {
            status: 200,
            body: value,
        },
        Err(e) => CommandResponse::from(e),
    };
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}
