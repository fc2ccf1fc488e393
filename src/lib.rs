//! Request/response bridge between a web front-end and Amazon Bedrock
//! (Claude 3.5 Haiku). The same inference call is exposed through two
//! deployment shapes: a standing local proxy server and a per-invocation
//! managed function adapter.

pub mod aws;
pub mod client_config;
pub mod config;
pub mod error;
pub mod function;
pub mod gateway;
pub mod providers;
pub mod server;
