use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::providers::GenerationParams;
use crate::startup::AppState;

/// Output token budget for analysis calls.
const ANALYZE_MAX_TOKENS: i32 = 1024;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Missing, null and empty text are treated identically by validation.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "type", default = "default_request_type")]
    pub request_type: String,
}

fn default_request_type() -> String {
    "chat".to_string()
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: String,
    pub model: String,
    #[serde(rename = "type")]
    pub request_type: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<(StatusCode, Json<AnalyzeResponse>), AppError> {
    let text = request.text.unwrap_or_default();
    if text.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!("Text is required")));
    }

    let params = GenerationParams {
        max_tokens: Some(ANALYZE_MAX_TOKENS),
        ..Default::default()
    };

    let completion = state
        .text_provider
        .generate(&text, &params)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Analysis call failed");
            AppError::Upstream {
                category: "Failed to process request",
                source: e,
            }
        })?;

    tracing::info!(
        request_type = %request.request_type,
        input_tokens = completion.input_tokens,
        output_tokens = completion.output_tokens,
        finish_reason = ?completion.finish_reason,
        "Analysis completed"
    );

    Ok((
        StatusCode::OK,
        Json(AnalyzeResponse {
            result: completion.text,
            model: state.config.models.model_label.clone(),
            request_type: request.request_type,
        }),
    ))
}
