//! Managed function shape: one API-gateway proxy event in, one proxy result
//! out. A thin envelope adapter over the shared chat handling; the actual
//! platform runtime wiring lives in the deployment, not here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::gateway::{self, ChatReply};
use crate::providers::InferenceClient;

/// Proxy event as delivered by the platform trigger. `body` arrives either as
/// a JSON string or already structured; both are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub http_method: Option<String>,
}

/// Proxy result handed back to the platform.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<&'static str, &'static str>,
    pub body: String,
}

// Every response, preflight included, carries these so browser callers on a
// different origin can complete the request.
fn cors_headers() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Headers", "Content-Type"),
        ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ])
}

/// Single-invocation entry point; stateless between invocations.
pub async fn handle_event(client: &dyn InferenceClient, event: FunctionEvent) -> FunctionResponse {
    if event.http_method.as_deref() == Some("OPTIONS") {
        return FunctionResponse {
            status_code: 200,
            headers: cors_headers(),
            body: String::new(),
        };
    }

    let reply = match &event.body {
        Some(Value::String(raw)) => gateway::handle_chat(client, raw).await,
        Some(body) => gateway::handle_chat_value(client, body).await,
        None => gateway::handle_chat(client, "").await,
    };
    into_response(reply)
}

fn into_response(reply: ChatReply) -> FunctionResponse {
    FunctionResponse {
        status_code: reply.status.as_u16(),
        headers: cors_headers(),
        body: serde_json::to_string(&reply.result).unwrap_or_default(),
    }
}
