use async_trait::async_trait;
use chrono::Utc;

use crate::aws::credentials::Credentials;
use crate::aws::sigv4::{self, SignableRequest};
use crate::config::BedrockSettings;
use crate::providers::InferenceClient;

use super::error::{ProviderError, ProviderErrorKind, classify};
use super::request::InvokeRequest;
use super::response::InvokeResponse;

const SERVICE: &str = "bedrock";

/// Client for the Bedrock `InvokeModel` REST API.
///
/// Constructed once at startup with resolved credentials and shared read-only
/// across requests; holds no per-request state. One attempt per invocation,
/// no client-side timeout (platform defaults apply), no retry.
pub struct BedrockClient {
    http: reqwest::Client,
    region: String,
    model_id: String,
    endpoint: String,
    credentials: Credentials,
}

impl BedrockClient {
    pub fn new(settings: &BedrockSettings, credentials: Credentials) -> Self {
        let endpoint = settings.endpoint.clone().unwrap_or_else(|| {
            format!("https://bedrock-runtime.{}.amazonaws.com", settings.region)
        });
        Self {
            http: reqwest::Client::new(),
            region: settings.region.clone(),
            model_id: settings.model_id.clone(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn invoke_path(&self) -> String {
        format!("/model/{}/invoke", sigv4::uri_encode(&self.model_id))
    }
}

#[async_trait]
impl InferenceClient for BedrockClient {
    async fn invoke(&self, message: &str) -> Result<String, ProviderError> {
        let body = serde_json::to_vec(&InvokeRequest::single_turn(message))
            .map_err(|e| ProviderError::unclassified(format!("failed to encode request: {e}")))?;

        let path = self.invoke_path();
        let url = format!("{}{}", self.endpoint, path);
        let parsed = reqwest::Url::parse(&url)
            .map_err(|e| ProviderError::unclassified(format!("invalid endpoint url: {e}")))?;
        let host = match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(ProviderError::unclassified("endpoint url has no host")),
        };

        let headers = vec![
            ("host".to_string(), host),
            ("content-type".to_string(), "application/json".to_string()),
        ];
        let signature = sigv4::sign(
            &SignableRequest {
                method: "POST",
                path: &path,
                query: &[],
                headers: &headers,
                body: &body,
            },
            &self.credentials,
            &self.region,
            SERVICE,
            Utc::now(),
        );

        tracing::info!(model = %self.model_id, "invoking Bedrock");

        let mut request = self
            .http
            .post(parsed)
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .header("x-amz-date", &signature.amz_date)
            .header("authorization", &signature.authorization);
        if let Some(token) = &self.credentials.session_token {
            request = request.header("x-amz-security-token", token);
        }

        let response = request.body(body).send().await.map_err(transport_error)?;

        let status = response.status();
        let error_type = response
            .headers()
            .get("x-amzn-errortype")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(error_from_response(status, error_type.as_deref(), &bytes));
        }

        tracing::debug!(body = %String::from_utf8_lossy(&bytes), "Bedrock response received");

        let decoded: InvokeResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::unclassified(format!("failed to decode response: {e}")))?;
        decoded.into_completion()
    }
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    ProviderError::unclassified(err.to_string())
}

/// Error body shape shared by Bedrock error responses.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type")]
    error_type: Option<String>,
    message: Option<String>,
    #[serde(rename = "Message")]
    message_alt: Option<String>,
}

fn error_from_response(
    status: reqwest::StatusCode,
    header_type: Option<&str>,
    body: &[u8],
) -> ProviderError {
    let parsed: Option<ErrorBody> = serde_json::from_slice(body).ok();
    let error_type = header_type
        .map(str::to_string)
        .or_else(|| parsed.as_ref().and_then(|b| b.error_type.clone()));
    let kind = error_type
        .as_deref()
        .map(classify)
        .unwrap_or(ProviderErrorKind::Unknown);
    let message = parsed
        .and_then(|b| b.message.or(b.message_alt))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Bedrock returned HTTP {status}"));
    ProviderError::new(kind, message)
}
