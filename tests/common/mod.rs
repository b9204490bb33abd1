#![allow(dead_code)]

use ai_service::config::{AiConfig, CommonConfig, GroqApiConfig, ModelConfig};
use ai_service::services::providers::mock::MockTextProvider;
use ai_service::services::providers::TextProvider;
use ai_service::startup::{build_router, AppState, Application};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

/// Spawn the full application on a random port and return its base URL.
pub async fn spawn_app() -> String {
    std::env::set_var("ENVIRONMENT", "test");
    std::env::set_var("APP__PORT", "0");
    std::env::set_var("GROQ_ENABLED", "false");

    let config = AiConfig::load().expect("Failed to load config");
    let app = Application::build(config)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    format!("http://localhost:{}", port)
}

pub fn test_config() -> AiConfig {
    AiConfig {
        common: CommonConfig { port: 0 },
        models: ModelConfig {
            text_model: "mixtral-8x7b-32768".to_string(),
            model_label: "mixtral-8x7b".to_string(),
        },
        groq: GroqApiConfig {
            api_key: String::new(),
            api_base: "https://api.groq.com/openai/v1".to_string(),
            enabled: false,
        },
    }
}

/// Build an in-process router over the given provider.
pub fn test_router(provider: Arc<dyn TextProvider>) -> Router {
    build_router(AppState {
        config: test_config(),
        text_provider: provider,
    })
}

/// Router backed by the mock provider; a disabled mock fails every call.
pub fn mock_router(enabled: bool) -> Router {
    test_router(Arc::new(MockTextProvider::new(enabled)))
}

/// POST a JSON body and return the response status and parsed JSON body.
pub async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}
