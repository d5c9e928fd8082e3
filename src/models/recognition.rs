use crate::error::ValidationError;
use crate::models::ImageFormat;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What the user asked the recognizer to focus on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionMode {
    #[default]
    Object,
    Text,
}

impl FromStr for RecognitionMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "object" => Ok(RecognitionMode::Object),
            "text" | "ocr" => Ok(RecognitionMode::Text),
            other => Err(ValidationError::InvalidField {
                field: "mode".to_string(),
                reason: format!("unknown recognition mode '{}'", other),
            }),
        }
    }
}

/// Display category for a recognition result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionCategory {
    General,
    Text,
}

impl RecognitionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RecognitionCategory::General => "AI recognition",
            RecognitionCategory::Text => "text recognition",
        }
    }

    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            RecognitionCategory::General => &["AI recognition", "Volcano Engine", "image analysis"],
            RecognitionCategory::Text => &["OCR", "text extraction", "Volcano Engine"],
        }
    }
}

/// An upload prepared for the recognition API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionRequest {
    pub base64: String,
    pub format: ImageFormat,
}

impl RecognitionRequest {
    pub fn data_url(&self) -> String {
        format!("data:image/{};base64,{}", self.format, self.base64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionPayload {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolcanoChatResponse {
    #[serde(default)]
    pub choices: Vec<VolcanoChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolcanoChoice {
    pub message: VolcanoMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolcanoMessage {
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_parts_serialize_with_type_tag() {
        let parts = vec![
            ContentPart::Text {
                text: "describe".into(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: "data:image/png;base64,AAAA".into(),
                },
            },
        ];
        assert_eq!(
            serde_json::to_value(&parts).unwrap(),
            json!([
                {"type": "text", "text": "describe"},
                {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}}
            ])
        );
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("".parse::<RecognitionMode>().unwrap(), RecognitionMode::Object);
        assert_eq!("TEXT".parse::<RecognitionMode>().unwrap(), RecognitionMode::Text);
        assert!("faces".parse::<RecognitionMode>().is_err());
    }
}
