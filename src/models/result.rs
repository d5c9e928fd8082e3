use crate::models::{ImageSize, RecognitionCategory, RecognitionMode};
use serde::{Deserialize, Serialize};

/// Where a generated image can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    Url(String),
    Base64(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub source: ImageSource,
    pub prompt: String,
    pub size: Option<ImageSize>,
    pub revised_prompt: Option<String>,
}

impl GeneratedImage {
    pub fn url(&self) -> Option<&str> {
        match &self.source {
            ImageSource::Url(url) => Some(url),
            ImageSource::Base64(_) => None,
        }
    }

    /// Suggested download name, built from the first 20 characters of the prompt.
    pub fn download_name(&self) -> String {
        let stem: String = self.prompt.chars().take(20).collect();
        format!("ai_generated_{}.jpg", stem)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedText {
    pub text: String,
    pub mode: RecognitionMode,
    pub category: RecognitionCategory,
}

impl RecognizedText {
    pub fn tags(&self) -> &'static [&'static str] {
        self.category.tags()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundRemovedImage {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

impl BackgroundRemovedImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: "image/png".to_string(),
            file_name: "no-bg.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedImage {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
    pub quality: u8,
    pub width: u32,
    pub height: u32,
    pub original_size: usize,
    pub compressed_size: usize,
}

impl CompressedImage {
    /// Percentage of bytes saved, one decimal place. Negative when the
    /// re-encode grew the file.
    pub fn savings_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        let saved = self.original_size as f64 - self.compressed_size as f64;
        (saved / self.original_size as f64 * 1000.0).round() / 10.0
    }
}

/// Every capability's outcome in one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizedResult {
    Generated(GeneratedImage),
    Recognized(RecognizedText),
    BackgroundRemoved(BackgroundRemovedImage),
    Compressed(CompressedImage),
}

impl From<GeneratedImage> for NormalizedResult {
    fn from(value: GeneratedImage) -> Self {
        NormalizedResult::Generated(value)
    }
}

impl From<RecognizedText> for NormalizedResult {
    fn from(value: RecognizedText) -> Self {
        NormalizedResult::Recognized(value)
    }
}

impl From<BackgroundRemovedImage> for NormalizedResult {
    fn from(value: BackgroundRemovedImage) -> Self {
        NormalizedResult::BackgroundRemoved(value)
    }
}

impl From<CompressedImage> for NormalizedResult {
    fn from(value: CompressedImage) -> Self {
        NormalizedResult::Compressed(value)
    }
}
