use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::gateway;
use crate::server::AppState;

/// Standing-server adapter over the shared chat handling. The body is taken
/// as a raw string so malformed JSON gets the same rejection on both shapes.
pub async fn bedrock_chat(State(state): State<Arc<AppState>>, body: String) -> Response {
    let reply = gateway::handle_chat(state.inference.as_ref(), &body).await;
    (reply.status, Json(reply.result)).into_response()
}
