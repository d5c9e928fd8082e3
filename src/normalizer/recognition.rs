use crate::models::{
    ChatMessage, ContentPart, ImageFormat, ImageUrl, RecognitionPayload, RecognitionRequest,
    UploadedImage,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

pub const RECOGNITION_INSTRUCTION: &str = "Identify and describe the contents of this image";

/// Unknown or missing MIME types fall back to `jpeg`.
pub fn map_mime_to_format(mime_type: &str) -> ImageFormat {
    match mime_type {
        "image/png" => ImageFormat::Png,
        "image/jpeg" | "image/jpg" => ImageFormat::Jpeg,
        "image/webp" => ImageFormat::Webp,
        _ => ImageFormat::Jpeg,
    }
}

pub fn prepare_recognition(image: &UploadedImage) -> RecognitionRequest {
    RecognitionRequest {
        base64: STANDARD.encode(image.bytes()),
        format: map_mime_to_format(image.mime_type()),
    }
}

pub fn build_recognition_payload(model: &str, request: &RecognitionRequest) -> RecognitionPayload {
    RecognitionPayload {
        model: model.to_string(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: vec![
                ContentPart::Text {
                    text: RECOGNITION_INSTRUCTION.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: request.data_url(),
                    },
                },
            ],
        }],
    }
}
