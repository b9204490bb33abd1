use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::providers::GenerationParams;
use crate::startup::AppState;

const DEFAULT_MAX_TOKENS: i32 = 512;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Missing, null and empty prompts are treated identically by validation.
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: i32,
}

fn default_max_tokens() -> i32 {
    DEFAULT_MAX_TOKENS
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub generated_text: String,
    pub model: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<GenerateResponse>), AppError> {
    let prompt = request.prompt.unwrap_or_default();
    if prompt.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!("Prompt is required")));
    }

    let params = GenerationParams {
        max_tokens: Some(request.max_tokens),
        ..Default::default()
    };

    let completion = state
        .text_provider
        .generate(&prompt, &params)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Generation call failed");
            AppError::Upstream {
                category: "Failed to generate content",
                source: e,
            }
        })?;

    tracing::info!(
        max_tokens = request.max_tokens,
        input_tokens = completion.input_tokens,
        output_tokens = completion.output_tokens,
        finish_reason = ?completion.finish_reason,
        "Generation completed"
    );

    Ok((
        StatusCode::OK,
        Json(GenerateResponse {
            generated_text: completion.text,
            model: state.config.models.model_label.clone(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_apply_when_fields_missing() {
        let request: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.prompt, None);
        assert_eq!(request.max_tokens, 512);
    }

    #[test]
    fn null_prompt_deserializes_like_a_missing_field() {
        let request: GenerateRequest = serde_json::from_str(r#"{"prompt": null}"#).unwrap();
        assert_eq!(request.prompt, None);
    }

    #[test]
    fn explicit_max_tokens_is_kept() {
        let request: GenerateRequest =
            serde_json::from_str(r#"{"prompt": "hi", "max_tokens": 64}"#).unwrap();
        assert_eq!(request.max_tokens, 64);
    }
}
