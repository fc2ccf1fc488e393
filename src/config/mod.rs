pub mod settings;

pub use settings::{BedrockSettings, ServerConfig, Settings};
