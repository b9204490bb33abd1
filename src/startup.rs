//! Application startup and lifecycle management.

use crate::config::AiConfig;
use crate::error::AppError;
use crate::handlers;
use crate::services::providers::groq::{GroqConfig, GroqTextProvider};
use crate::services::providers::mock::MockTextProvider;
use crate::services::providers::TextProvider;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state, constructed once and cloned into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AiConfig,
    pub text_provider: Arc<dyn TextProvider>,
}

/// Build the service router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/analyze", post(handlers::analyze))
        .route("/generate", post(handlers::generate))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: AiConfig) -> Result<Self, AppError> {
        let text_provider: Arc<dyn TextProvider> = if config.groq.enabled {
            if config.groq.api_key.is_empty() {
                tracing::warn!(
                    "GROQ_API_KEY is not set; upstream calls will fail until it is provided"
                );
            }
            let groq_config = GroqConfig {
                api_key: config.groq.api_key.clone(),
                api_base: config.groq.api_base.clone(),
                model: config.models.text_model.clone(),
            };
            tracing::info!(
                model = %config.models.text_model,
                "Initialized Groq text provider"
            );
            Arc::new(GroqTextProvider::new(groq_config))
        } else {
            tracing::info!("Groq provider disabled, using mock text provider");
            Arc::new(MockTextProvider::new(true))
        };

        let state = AppState {
            config: config.clone(),
            text_provider,
        };

        // Bind the listener (port 0 = random port for testing).
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("AI service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
