use crate::{
    error::{ImageAiError, Result, ValidationError},
    models::{GeneratedImage, GenerationRequest},
    normalizer::{build_generation_payload, check_status, compose_prompt, decode_generation},
    transport::{Endpoint, Transport, UpstreamPayload},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct GenerationClient {
    transport: Arc<dyn Transport>,
    model: String,
}

impl GenerationClient {
    pub fn new(transport: Arc<dyn Transport>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate(&self, request: GenerationRequest) -> Result<GeneratedImage> {
        // A style suffix alone is not a prompt.
        if request.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt.into());
        }
        let prompt = compose_prompt(&request.prompt, request.style.as_deref());
        let size = request.target_size();
        let payload = build_generation_payload(&self.model, &prompt, size, &request.options)?;
        let response_format = payload.response_format;

        log::info!(
            "🎨 Generating image with model {} at {}",
            self.model,
            payload.size
        );

        let body = serde_json::to_value(&payload)
            .map_err(|e| ImageAiError::Serialization(e.to_string()))?;
        let reply = self
            .transport
            .send(Endpoint::ImageGeneration, UpstreamPayload::Json(body))
            .await?;
        check_status(&reply)?;

        // The user's own wording is kept for display, not the styled prompt.
        Ok(decode_generation(&reply.body, response_format, &request.prompt, size)?)
    }
}
