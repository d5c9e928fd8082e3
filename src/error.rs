use thiserror::Error;

/// Input rejected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload an image file")]
    MissingImage,
    #[error("Only image files are supported (got '{0}')")]
    NotAnImage(String),
    #[error("Image file must not exceed {limit} bytes (got {size})")]
    TooLarge { size: usize, limit: usize },
    #[error("Prompt must not be empty")]
    EmptyPrompt,
    #[error("Unsupported resolution '{0}'")]
    UnsupportedResolution(String),
    #[error("Unsupported aspect ratio '{0}'")]
    UnsupportedRatio(String),
    #[error("Malformed image size '{0}', expected WIDTHxHEIGHT")]
    MalformedSize(String),
    #[error("Compression quality must be between {min} and {max} (got {got})")]
    QualityOutOfRange { got: u8, min: u8, max: u8 },
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}

/// Why an upstream vendor refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamFailure {
    QuotaExhausted,
    InvalidCredentials,
    MalformedInput,
    Other,
}

impl UpstreamFailure {
    pub fn from_status(status: u16) -> Self {
        match status {
            402 => UpstreamFailure::QuotaExhausted,
            403 => UpstreamFailure::InvalidCredentials,
            400 => UpstreamFailure::MalformedInput,
            _ => UpstreamFailure::Other,
        }
    }

    /// User-facing message for this category.
    pub fn message(&self) -> &'static str {
        match self {
            UpstreamFailure::QuotaExhausted => {
                "API quota exhausted, please try again later or contact the developer"
            }
            UpstreamFailure::InvalidCredentials => "Invalid API key",
            UpstreamFailure::MalformedInput => "Unsupported image format or corrupted file",
            UpstreamFailure::Other => "Upstream request failed, please try again later",
        }
    }
}

/// A vendor answered with a non-success HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} (status {status})", .category.message())]
pub struct UpstreamError {
    pub status: u16,
    pub category: UpstreamFailure,
    pub body: String,
}

impl UpstreamError {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            category: UpstreamFailure::from_status(status),
            body: body.into(),
        }
    }

    pub fn message(&self) -> &'static str {
        self.category.message()
    }
}

/// A vendor answered with success but the body was not what we expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("API returned no image data")]
    EmptyResult,
    #[error("API did not return an image URL")]
    MissingUrl,
    #[error("API did not return base64 image data")]
    MissingImageData,
    #[error("API returned no recognition result")]
    NoChoices,
    #[error("Malformed API response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ImageAiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Request error: {0}")]
    Request(String),
    #[error("Image processing error: {0}")]
    Image(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ImageAiError {
    /// Message safe to show to the end user.
    pub fn user_message(&self) -> String {
        match self {
            ImageAiError::Validation(e) => e.to_string(),
            ImageAiError::Upstream(e) => e.message().to_string(),
            ImageAiError::Decode(e) => e.to_string(),
            ImageAiError::Image(_) => "Image could not be processed".to_string(),
            _ => "Internal server error, please try again later".to_string(),
        }
    }
}

impl From<reqwest::Error> for ImageAiError {
    fn from(e: reqwest::Error) -> Self {
        ImageAiError::Request(e.to_string())
    }
}

impl From<image::ImageError> for ImageAiError {
    fn from(e: image::ImageError) -> Self {
        ImageAiError::Image(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImageAiError>;
