use crate::{
    error::{ImageAiError, Result},
    models::{RecognitionMode, RecognizedText, UploadedImage},
    normalizer::{
        apply_classification, build_recognition_payload, check_status, decode_recognition,
        prepare_recognition,
    },
    transport::{Endpoint, Transport, UpstreamPayload},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct RecognitionClient {
    transport: Arc<dyn Transport>,
    model: String,
}

impl RecognitionClient {
    pub fn new(transport: Arc<dyn Transport>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
        }
    }

    /// Decoded result with the category left as general recognition.
    pub async fn recognize_raw(
        &self,
        image: UploadedImage,
        mode: RecognitionMode,
    ) -> Result<RecognizedText> {
        let request = prepare_recognition(&image);
        // bytes are no longer needed once encoded
        drop(image);

        let payload = build_recognition_payload(&self.model, &request);
        let body = serde_json::to_value(&payload)
            .map_err(|e| ImageAiError::Serialization(e.to_string()))?;

        log::info!(
            "🔍 Recognizing {} image ({} base64 chars) with model {}",
            request.format,
            request.base64.len(),
            self.model
        );

        let reply = self
            .transport
            .send(Endpoint::Recognition, UpstreamPayload::Json(body))
            .await?;
        check_status(&reply)?;

        Ok(decode_recognition(&reply.body, mode)?)
    }

    /// Like [`Self::recognize_raw`], with the display category applied.
    pub async fn recognize(
        &self,
        image: UploadedImage,
        mode: RecognitionMode,
    ) -> Result<RecognizedText> {
        self.recognize_raw(image, mode).await.map(apply_classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::models::RecognitionCategory;
    use crate::transport::fake::FakeTransport;

    fn upload() -> UploadedImage {
        UploadedImage::new(vec![0x89, b'P', b'N', b'G'], "image/png", 1024).unwrap()
    }

    #[tokio::test]
    async fn test_recognize_sends_data_url() {
        let transport = Arc::new(FakeTransport::new().reply(
            Endpoint::Recognition,
            200,
            r#"{"choices":[{"message":{"content":"hello"}}]}"#,
        ));
        let client = RecognitionClient::new(transport.clone(), "vision");

        let result = client.recognize(upload(), RecognitionMode::Object).await.unwrap();
        assert_eq!(result.text, "hello");
        assert_eq!(result.category, RecognitionCategory::General);

        match transport.last_payload().unwrap() {
            UpstreamPayload::Json(body) => {
                assert_eq!(body["model"], "vision");
                let url = body["messages"][0]["content"][1]["image_url"]["url"]
                    .as_str()
                    .unwrap();
                assert_eq!(url, "data:image/png;base64,iVBORw==");
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_text_mode_and_raw_result() {
        let transport = Arc::new(FakeTransport::new().reply(
            Endpoint::Recognition,
            200,
            r#"{"choices":[{"message":{"content":"STOP"}}]}"#,
        ));
        let client = RecognitionClient::new(transport, "vision");

        let raw = client.recognize_raw(upload(), RecognitionMode::Text).await.unwrap();
        assert_eq!(raw.category, RecognitionCategory::General);

        let classified = client.recognize(upload(), RecognitionMode::Text).await.unwrap();
        assert_eq!(classified.category, RecognitionCategory::Text);
    }

    #[tokio::test]
    async fn test_no_choices() {
        let transport =
            Arc::new(FakeTransport::new().reply(Endpoint::Recognition, 200, r#"{"choices":[]}"#));
        let err = RecognitionClient::new(transport, "vision")
            .recognize(upload(), RecognitionMode::Object)
            .await
            .unwrap_err();
        assert!(matches!(err, ImageAiError::Decode(DecodeError::NoChoices)));
    }
}
