use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// An image handed to us by the user. Only constructible through
/// [`UploadedImage::new`], so every instance satisfies the upload limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    bytes: Vec<u8>,
    mime_type: String,
    file_name: Option<String>,
}

impl UploadedImage {
    pub fn new(
        bytes: Vec<u8>,
        mime_type: impl Into<String>,
        max_bytes: usize,
    ) -> Result<Self, ValidationError> {
        let mime_type = mime_type.into();

        if !mime_type.starts_with("image/") {
            return Err(ValidationError::NotAnImage(mime_type));
        }
        if bytes.is_empty() {
            return Err(ValidationError::MissingImage);
        }
        if bytes.len() > max_bytes {
            return Err(ValidationError::TooLarge {
                size: bytes.len(),
                limit: max_bytes,
            });
        }

        Ok(Self {
            bytes,
            mime_type,
            file_name: None,
        })
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Format tag the recognition API expects inside the data URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Webp => "webp",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
