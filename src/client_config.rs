//! Client-side resolver choosing which gateway shape the front-end talks to.
//! Built once from the environment and passed around; nothing here re-reads
//! process state after construction.

use serde::Deserialize;
use std::path::Path;

/// Address of the local proxy shape.
pub const LOCAL_API_BASE: &str = "http://localhost:3001";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub use_local_proxy: bool,
    pub local_base_url: String,
    pub env_base_url: Option<String>,
}

impl ClientConfig {
    /// Read the mode flag and the base-URL override once. Local-proxy mode is
    /// the default, matching the development environment.
    pub fn from_env() -> Self {
        let use_local_proxy = std::env::var("GATEWAY_USE_LOCAL_PROXY")
            .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes" | "YES"))
            .unwrap_or(true);
        Self {
            use_local_proxy,
            local_base_url: LOCAL_API_BASE.to_string(),
            env_base_url: std::env::var("GATEWAY_API_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        }
    }

    pub fn uses_local_proxy(&self) -> bool {
        self.use_local_proxy
    }

    /// Base address for the chat endpoint. An empty string means
    /// unconfigured; callers surface a connectivity error instead of
    /// attempting the call.
    pub fn resolve_api_base(&self, outputs: Option<&DeploymentOutputs>) -> String {
        if self.use_local_proxy {
            return self.local_base_url.clone();
        }
        if let Some(url) = outputs.and_then(|o| o.api_url()) {
            return url.to_string();
        }
        self.env_base_url.clone().unwrap_or_default()
    }
}

/// Deployment-emitted metadata (the `amplify_outputs.json` shape), loaded
/// best-effort once by the caller and injected as an optional value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeploymentOutputs {
    #[serde(default)]
    pub custom: Option<CustomOutputs>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomOutputs {
    #[serde(default)]
    pub bedrock_api: Option<ApiOutputs>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiOutputs {
    pub url: String,
}

impl DeploymentOutputs {
    /// Best-effort load; absence or a malformed file both mean "no metadata".
    pub fn load(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn api_url(&self) -> Option<&str> {
        let url = self.custom.as_ref()?.bedrock_api.as_ref()?.url.as_str();
        if url.is_empty() { None } else { Some(url) }
    }
}
