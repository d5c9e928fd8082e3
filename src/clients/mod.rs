pub mod background_client;
pub mod generation_client;
pub mod recognition_client;

use crate::{
    compress::compress_image,
    config::Config,
    error::Result,
    models::{
        CompressedImage, GenerationRequest, NormalizedResult, RecognitionMode, UploadedImage,
    },
    transport::{HttpTransport, Transport},
};
use std::sync::Arc;

pub use background_client::BackgroundClient;
pub use generation_client::GenerationClient;
pub use recognition_client::RecognitionClient;

/// Entry point bundling every capability over one transport.
#[derive(Clone)]
pub struct ImageAiClient {
    generation_client: GenerationClient,
    recognition_client: RecognitionClient,
    background_client: BackgroundClient,
    max_upload_bytes: usize,
}

impl ImageAiClient {
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(config.transport.clone())?;
        Ok(Self::with_transport(Arc::new(transport), &config))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, config: &Config) -> Self {
        Self {
            generation_client: GenerationClient::new(
                transport.clone(),
                config.generation_model.clone(),
            ),
            recognition_client: RecognitionClient::new(
                transport.clone(),
                config.recognition_model.clone(),
            ),
            background_client: BackgroundClient::new(transport),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    pub fn generation(&self) -> &GenerationClient {
        &self.generation_client
    }

    pub fn recognition(&self) -> &RecognitionClient {
        &self.recognition_client
    }

    pub fn background(&self) -> &BackgroundClient {
        &self.background_client
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Validates raw upload bytes against this client's size limit.
    pub fn upload(&self, bytes: Vec<u8>, mime_type: impl Into<String>) -> Result<UploadedImage> {
        Ok(UploadedImage::new(bytes, mime_type, self.max_upload_bytes)?)
    }

    /// Compression runs locally; offloaded so the runtime is not blocked.
    pub async fn compress(&self, image: UploadedImage, quality: u8) -> Result<CompressedImage> {
        tokio::task::spawn_blocking(move || compress_image(&image, quality))
            .await
            .map_err(|e| crate::error::ImageAiError::Image(format!("compression task failed: {}", e)))?
    }

    pub async fn generate(&self, request: GenerationRequest) -> Result<NormalizedResult> {
        self.generation_client.generate(request).await.map(Into::into)
    }

    pub async fn recognize(
        &self,
        image: UploadedImage,
        mode: RecognitionMode,
    ) -> Result<NormalizedResult> {
        self.recognition_client
            .recognize(image, mode)
            .await
            .map(Into::into)
    }

    pub async fn remove_background(&self, image: UploadedImage) -> Result<NormalizedResult> {
        self.background_client
            .remove_background(image)
            .await
            .map(Into::into)
    }
}
