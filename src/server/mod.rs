pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::aws::credentials;
use crate::config::Settings;
use crate::error::Result as AppResult;
use crate::providers::InferenceClient;
use crate::providers::bedrock::BedrockClient;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub inference: Arc<dyn InferenceClient>,
}

/// Wire up the local gateway shape: resolve the credential chain once, build
/// the Bedrock client, and mount the routes.
pub async fn create_app(settings: Settings) -> AppResult<Router> {
    let creds = credentials::resolve(settings.bedrock.profile.as_deref())?;
    let inference: Arc<dyn InferenceClient> = Arc::new(BedrockClient::new(&settings.bedrock, creds));
    Ok(build_router(AppState {
        settings,
        inference,
    }))
}

/// Route and middleware assembly, separated so tests can inject a mock client.
pub fn build_router(state: AppState) -> Router {
    // Open CORS for browser callers on a different origin; OPTIONS preflight
    // is answered by the layer itself.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    handlers::routes()
        .with_state(Arc::new(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{ProviderError, ProviderErrorKind};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct MockClient {
        reply: Result<String, ProviderError>,
        calls: AtomicUsize,
    }

    fn router_with(reply: Result<String, ProviderError>) -> (Router, Arc<MockClient>) {
        let client = Arc::new(MockClient {
            reply,
            calls: AtomicUsize::new(0),
        });
        let router = build_router(AppState {
            settings: Settings::default(),
            inference: client.clone(),
        });
        (router, client)
    }

    #[async_trait]
    impl InferenceClient for MockClient {
        async fn invoke(&self, _message: &str) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn chat_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/bedrock-chat")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_never_touches_the_provider() {
        let (router, client) = router_with(Err(ProviderError::unclassified("provider is down")));
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "status": "OK", "message": "Bedrock proxy server is running" })
        );
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chat_success_with_cors_header() {
        let (router, client) = router_with(Ok("hello!".to_string()));
        let response = router.oneshot(chat_request(r#"{"message":"hi"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        assert_eq!(
            body_json(response).await,
            json!({ "response": "hello!", "model": "Claude 3.5 Haiku" })
        );
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_chat_missing_message_is_400() {
        let (router, client) = router_with(Ok("unused".to_string()));
        let response = router.oneshot(chat_request("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Message is required" }));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chat_provider_failure_is_500_with_cors() {
        let (router, _client) = router_with(Err(ProviderError::new(
            ProviderErrorKind::Throttling,
            "rate exceeded",
        )));
        let response = router.oneshot(chat_request(r#"{"message":"x"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
        assert_eq!(
            body_json(response).await,
            json!({
                "error": "Request throttled. Try again later.",
                "details": "rate exceeded"
            })
        );
    }

    #[tokio::test]
    async fn test_preflight_options() {
        let (router, client) = router_with(Ok("unused".to_string()));
        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/bedrock-chat")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }
}
