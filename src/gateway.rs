//! Shared chat handling for both deployment shapes: parse, validate, invoke,
//! format. Each shape is a thin envelope adapter over [`handle_chat`].

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::providers::{InferenceClient, ProviderErrorKind};

/// Display label returned to clients; independent of the model id actually
/// sent upstream.
pub const MODEL_DISPLAY_NAME: &str = "Claude 3.5 Haiku";

pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Externally observable result of one chat request. Identical whichever
/// deployment shape served it.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatResult {
    Completion {
        response: String,
        model: &'static str,
    },
    Rejected {
        error: &'static str,
    },
    Failed {
        error: &'static str,
        details: String,
    },
}

#[derive(Debug)]
pub struct ChatReply {
    pub status: StatusCode,
    pub result: ChatResult,
}

impl ChatReply {
    fn rejected() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            result: ChatResult::Rejected {
                error: MESSAGE_REQUIRED,
            },
        }
    }
}

/// Raw-string entry point. Bodies that fail to parse carry no message and get
/// the same rejection as any other message-less request; the provider is
/// never called for them.
pub async fn handle_chat(client: &dyn InferenceClient, raw_body: &str) -> ChatReply {
    match serde_json::from_str::<Value>(raw_body) {
        Ok(body) => handle_chat_value(client, &body).await,
        Err(_) => ChatReply::rejected(),
    }
}

/// Entry point for callers whose platform already decoded the body.
pub async fn handle_chat_value(client: &dyn InferenceClient, body: &Value) -> ChatReply {
    let Some(message) = extract_message(body) else {
        return ChatReply::rejected();
    };

    tracing::info!(%message, "received chat message");

    match client.invoke(&message).await {
        Ok(response) => ChatReply {
            status: StatusCode::OK,
            result: ChatResult::Completion {
                response,
                model: MODEL_DISPLAY_NAME,
            },
        },
        Err(err) => {
            tracing::error!(kind = ?err.kind, error = %err.message, "Bedrock call failed");
            ChatReply {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                result: ChatResult::Failed {
                    error: normalized_message(err.kind),
                    details: err.message,
                },
            }
        }
    }
}

// Blankness check only; the accepted message is forwarded verbatim.
fn extract_message(body: &Value) -> Option<String> {
    let message = body.get("message")?.as_str()?;
    if message.trim().is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

fn normalized_message(kind: ProviderErrorKind) -> &'static str {
    match kind {
        ProviderErrorKind::AccessDenied => "Access denied. Check AWS permissions.",
        ProviderErrorKind::Validation => "Invalid request format.",
        ProviderErrorKind::Throttling => "Request throttled. Try again later.",
        ProviderErrorKind::Unknown => "Failed to get AI response",
    }
}
