use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Credential error: {0}")]
    Credentials(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
