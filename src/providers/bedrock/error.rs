use thiserror::Error;

/// Closed set of recognized upstream failure categories. Classification
/// happens once, from the Bedrock error envelope; callers map each kind to a
/// user-facing message without matching on raw exception names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    AccessDenied,
    Validation,
    Throttling,
    Unknown,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    /// Raw underlying cause; constructors keep this non-empty.
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Transport failures, decode failures, and anything else without a
    /// recognized error type.
    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unknown, message)
    }
}

/// Map a Bedrock error-type string to a failure kind. The type arrives either
/// in the `x-amzn-errortype` header or as the `__type` body field, possibly
/// namespaced (`ns#ThrottlingException`) or with a URI suffix
/// (`ThrottlingException:http://...`).
pub fn classify(error_type: &str) -> ProviderErrorKind {
    match error_code(error_type) {
        "AccessDeniedException" => ProviderErrorKind::AccessDenied,
        "ValidationException" => ProviderErrorKind::Validation,
        "ThrottlingException" | "TooManyRequestsException" => ProviderErrorKind::Throttling,
        _ => ProviderErrorKind::Unknown,
    }
}

fn error_code(raw: &str) -> &str {
    let tail = raw.rsplit('#').next().unwrap_or(raw);
    tail.split(':').next().unwrap_or(tail).trim()
}
