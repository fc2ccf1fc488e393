pub mod bedrock;

use async_trait::async_trait;

pub use bedrock::error::{ProviderError, ProviderErrorKind};

/// Seam between the gateway and the hosted model endpoint.
///
/// The chat handling core only sees this trait, so tests can stand in a mock
/// and the error mapping stays exhaustively checkable.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Submit one user message and return the extracted completion text.
    /// Single attempt; classification of upstream failures happens in the
    /// returned error, never here by string matching.
    async fn invoke(&self, message: &str) -> Result<String, ProviderError>;
}
