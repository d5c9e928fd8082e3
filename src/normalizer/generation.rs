use crate::{
    error::ValidationError,
    models::{GenerationOptions, GenerationPayload, ImageSize},
};

/// Builds the image generation body with every field defaulted.
///
/// `watermark` is only turned off by an explicit `Some(false)`; absence keeps
/// it on.
pub fn build_generation_payload(
    model: &str,
    prompt: &str,
    size: Option<ImageSize>,
    options: &GenerationOptions,
) -> Result<GenerationPayload, ValidationError> {
    if prompt.trim().is_empty() {
        return Err(ValidationError::EmptyPrompt);
    }

    Ok(GenerationPayload {
        model: model.to_string(),
        prompt: prompt.to_string(),
        sequential_image_generation: options.sequential_image_generation.unwrap_or_default(),
        response_format: options.response_format.unwrap_or_default(),
        size: size.unwrap_or(ImageSize::SQUARE_FALLBACK).to_string(),
        stream: options.stream.unwrap_or(false),
        watermark: options.watermark != Some(false),
    })
}
