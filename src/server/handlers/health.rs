use axum::Json;
use serde::Serialize;

/// Reachability probe for the front-end; static reply, never touches Bedrock.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK",
        message: "Bedrock proxy server is running",
    })
}
