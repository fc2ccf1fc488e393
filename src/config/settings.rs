use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-5-haiku-20241022-v1:0";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub bedrock: BedrockSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BedrockSettings {
    pub region: String,
    pub model_id: String,
    /// Named profile in the shared AWS credentials file. When unset the
    /// environment chain and the `default` profile apply.
    pub profile: Option<String>,
    /// Endpoint override, mainly for pointing tests at a stub server.
    pub endpoint: Option<String>,
}

impl Default for BedrockSettings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            profile: None,
            endpoint: None,
        }
    }
}

impl Settings {
    /// Load settings from `custom-config.toml` or `config.toml` when present,
    /// falling back to defaults so the proxy also runs from environment alone.
    /// Environment overrides are applied last and win over the file.
    pub fn load() -> crate::error::Result<Self> {
        let mut settings = match Self::find_config_file() {
            Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        settings.apply_env_overrides();
        Ok(settings)
    }

    fn find_config_file() -> Option<&'static str> {
        ["custom-config.toml", "config.toml"]
            .into_iter()
            .find(|name| Path::new(name).exists())
    }

    fn apply_env_overrides(&mut self) {
        if let Some(region) = non_empty_env("BEDROCK_REGION") {
            self.bedrock.region = region;
        }
        if let Some(model_id) = non_empty_env("BEDROCK_MODEL_ID") {
            self.bedrock.model_id = model_id;
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 3001);
        assert_eq!(settings.bedrock.region, "us-west-2");
        assert_eq!(
            settings.bedrock.model_id,
            "anthropic.claude-3-5-haiku-20241022-v1:0"
        );
        assert!(settings.bedrock.profile.is_none());
        assert!(settings.bedrock.endpoint.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let settings: Settings = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [bedrock]
            region = "us-east-1"
            model_id = "anthropic.claude-3-5-sonnet-20241022-v2:0"
            profile = "bedrockuser"
            "#,
        )
        .unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.bedrock.region, "us-east-1");
        assert_eq!(settings.bedrock.profile.as_deref(), Some("bedrockuser"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [bedrock]
            region = "eu-central-1"
            "#,
        )
        .unwrap();
        assert_eq!(settings.bedrock.region, "eu-central-1");
        assert_eq!(
            settings.bedrock.model_id,
            "anthropic.claude-3-5-haiku-20241022-v1:0"
        );
        assert_eq!(settings.server.port, 3001);
    }
}
