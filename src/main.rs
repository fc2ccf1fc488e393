use bedrock_gateway::{config, server};

use tracing_subscriber::fmt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    fmt::init();

    let settings = config::Settings::load()?;

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let app = server::create_app(settings).await?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Bedrock proxy server running on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Chat endpoint: http://{}/bedrock-chat", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
