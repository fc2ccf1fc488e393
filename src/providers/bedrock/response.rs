use serde::Deserialize;

use super::error::ProviderError;

/// Successful `InvokeModel` response body (Anthropic messages schema). Only
/// the content blocks matter here; usage and stop metadata are ignored.
#[derive(Debug, Deserialize)]
pub struct InvokeResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub text: String,
}

impl InvokeResponse {
    /// The completion is the text of the first content block. A reply with no
    /// content blocks is a malformed completion, not an empty answer.
    pub fn into_completion(mut self) -> Result<String, ProviderError> {
        if self.content.is_empty() {
            return Err(ProviderError::unclassified(
                "model returned an empty completion list",
            ));
        }
        Ok(self.content.remove(0).text)
    }
}
