use crate::{
    error::Result,
    models::{BackgroundRemovedImage, UploadedImage},
    normalizer::decode_background_removal,
    transport::{Endpoint, MultipartPayload, Transport, UpstreamPayload},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct BackgroundClient {
    transport: Arc<dyn Transport>,
}

impl BackgroundClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn remove_background(&self, image: UploadedImage) -> Result<BackgroundRemovedImage> {
        log::info!("✂️  Removing background from {} byte image", image.len());

        let payload = MultipartPayload {
            file_field: "image_file".to_string(),
            file_name: image.file_name().unwrap_or("image").to_string(),
            mime_type: image.mime_type().to_string(),
            bytes: image.into_bytes(),
            fields: vec![("size".to_string(), "auto".to_string())],
        };

        let reply = self
            .transport
            .send(Endpoint::BackgroundRemoval, UpstreamPayload::Multipart(payload))
            .await?;

        decode_background_removal(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImageAiError;
    use crate::transport::fake::FakeTransport;

    #[tokio::test]
    async fn test_multipart_shape_and_passthrough() {
        let transport = Arc::new(FakeTransport::new().reply(
            Endpoint::BackgroundRemoval,
            200,
            vec![0x89, b'P', b'N', b'G', 1, 2, 3],
        ));
        let client = BackgroundClient::new(transport.clone());
        let upload = UploadedImage::new(vec![9; 16], "image/jpeg", 1024)
            .unwrap()
            .with_file_name("me.jpg");

        let result = client.remove_background(upload).await.unwrap();
        assert_eq!(result.bytes, vec![0x89, b'P', b'N', b'G', 1, 2, 3]);
        assert_eq!(result.file_name, "no-bg.png");

        match transport.last_payload().unwrap() {
            UpstreamPayload::Multipart(form) => {
                assert_eq!(form.file_field, "image_file");
                assert_eq!(form.file_name, "me.jpg");
                assert_eq!(form.mime_type, "image/jpeg");
                assert_eq!(form.bytes.len(), 16);
                assert_eq!(form.fields, vec![("size".to_string(), "auto".to_string())]);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_key() {
        let transport = Arc::new(FakeTransport::new().reply(
            Endpoint::BackgroundRemoval,
            403,
            r#"{"errors":[{"title":"Forbidden"}]}"#,
        ));
        let upload = UploadedImage::new(vec![1], "image/png", 1024).unwrap();
        let err = BackgroundClient::new(transport)
            .remove_background(upload)
            .await
            .unwrap_err();
        match err {
            ImageAiError::Upstream(e) => assert_eq!(e.message(), "Invalid API key"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
