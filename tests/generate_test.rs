//! Contract tests for POST /generate.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn generate_returns_text_and_model() {
    let (status, body) = common::post_json(
        common::mock_router(true),
        "/generate",
        json!({"prompt": "write a haiku"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["generated_text"].as_str().unwrap().is_empty());
    assert_eq!(body["model"], "mixtral-8x7b");
    assert!(body.get("type").is_none());
}

#[tokio::test]
async fn generate_accepts_explicit_max_tokens() {
    let (status, body) = common::post_json(
        common::mock_router(true),
        "/generate",
        json!({"prompt": "write a haiku", "max_tokens": 64}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["generated_text"].is_string());
}

#[tokio::test]
async fn generate_rejects_missing_prompt() {
    let (status, body) =
        common::post_json(common::mock_router(true), "/generate", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Prompt is required");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn generate_rejects_null_prompt() {
    let (status, body) = common::post_json(
        common::mock_router(true),
        "/generate",
        json!({"prompt": null}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Prompt is required");
}

#[tokio::test]
async fn generate_rejects_empty_prompt() {
    let (status, body) =
        common::post_json(common::mock_router(true), "/generate", json!({"prompt": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Prompt is required");
}

#[tokio::test]
async fn generate_maps_provider_failure_to_500_with_details() {
    let (status, body) = common::post_json(
        common::mock_router(false),
        "/generate",
        json!({"prompt": "write a haiku"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate content");
    assert!(!body["details"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn generate_is_shape_idempotent() {
    let request = json!({"prompt": "same request", "max_tokens": 32});

    let (first_status, first_body) =
        common::post_json(common::mock_router(true), "/generate", request.clone()).await;
    let (second_status, second_body) =
        common::post_json(common::mock_router(true), "/generate", request).await;

    assert_eq!(first_status, second_status);
    assert_eq!(first_body, second_body);
}
