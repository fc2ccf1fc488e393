use serde::Serialize;

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";
pub const MAX_TOKENS: u32 = 1000;

/// Request body for the Bedrock `InvokeModel` API (Anthropic messages schema).
/// Built once per chat request and owned by the in-flight call.
#[derive(Debug, Serialize)]
pub struct InvokeRequest {
    pub anthropic_version: &'static str,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

impl InvokeRequest {
    /// One conversational turn carrying the caller's message verbatim.
    pub fn single_turn(message: &str) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: message.to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_turn_payload() {
        let value = serde_json::to_value(InvokeRequest::single_turn("hi")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "anthropic_version": "bedrock-2023-05-31",
                "max_tokens": 1000,
                "messages": [{ "role": "user", "content": "hi" }]
            })
        );
    }
}
