use ai_service::config::AiConfig;
use ai_service::observability::init_tracing;
use ai_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing("ai-service", "info");

    let config = AiConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
