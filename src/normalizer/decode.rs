use crate::{
    error::{DecodeError, ImageAiError, UpstreamError},
    models::{
        BackgroundRemovedImage, GeneratedImage, ImageSize, ImageSource, RecognitionCategory,
        RecognitionMode, RecognizedText, ResponseFormat, VolcanoChatResponse,
        VolcanoImageResponse,
    },
    transport::UpstreamReply,
};

/// Turns a non-success reply into a categorized [`UpstreamError`].
pub fn check_status(reply: &UpstreamReply) -> Result<(), UpstreamError> {
    if reply.is_success() {
        Ok(())
    } else {
        Err(UpstreamError::new(reply.status, reply.text_lossy()))
    }
}

pub fn decode_generation(
    body: &[u8],
    response_format: ResponseFormat,
    prompt: &str,
    size: Option<ImageSize>,
) -> Result<GeneratedImage, DecodeError> {
    let response: VolcanoImageResponse =
        serde_json::from_slice(body).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let first = response.data.into_iter().next().ok_or(DecodeError::EmptyResult)?;

    let source = match response_format {
        ResponseFormat::Url => ImageSource::Url(first.url.ok_or(DecodeError::MissingUrl)?),
        ResponseFormat::B64Json => {
            ImageSource::Base64(first.b64_json.ok_or(DecodeError::MissingImageData)?)
        }
    };

    Ok(GeneratedImage {
        source,
        prompt: prompt.to_string(),
        size,
        revised_prompt: first.revised_prompt,
    })
}

/// Decodes the chat response. The category is left as
/// [`RecognitionCategory::General`]; see `classify` for the display heuristic.
pub fn decode_recognition(body: &[u8], mode: RecognitionMode) -> Result<RecognizedText, DecodeError> {
    let response: VolcanoChatResponse =
        serde_json::from_slice(body).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let first = response.choices.into_iter().next().ok_or(DecodeError::NoChoices)?;

    Ok(RecognizedText {
        text: first.message.content,
        mode,
        category: RecognitionCategory::General,
    })
}

/// Success bodies from the background removal API are PNG bytes, passed
/// through as-is.
pub fn decode_background_removal(reply: UpstreamReply) -> Result<BackgroundRemovedImage, ImageAiError> {
    check_status(&reply)?;
    if reply.body.is_empty() {
        return Err(DecodeError::EmptyResult.into());
    }
    Ok(BackgroundRemovedImage::new(reply.body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> UpstreamReply {
        UpstreamReply {
            status,
            content_type: Some("application/json".into()),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_generation_empty_data() {
        let err = decode_generation(br#"{"data":[],"created":123}"#, ResponseFormat::Url, "p", None)
            .unwrap_err();
        assert_eq!(err, DecodeError::EmptyResult);

        let err = decode_generation(br#"{"created":123}"#, ResponseFormat::Url, "p", None)
            .unwrap_err();
        assert_eq!(err, DecodeError::EmptyResult);
    }

    #[test]
    fn test_generation_url() {
        let image = decode_generation(
            br#"{"data":[{"url":"http://x"}],"created":123}"#,
            ResponseFormat::Url,
            "p",
            None,
        )
        .unwrap();
        assert_eq!(image.url(), Some("http://x"));
        assert_eq!(image.revised_prompt, None);
    }

    #[test]
    fn test_generation_missing_url_and_revised_prompt() {
        let err = decode_generation(
            br#"{"data":[{"b64_json":"AAAA"}],"created":1}"#,
            ResponseFormat::Url,
            "p",
            None,
        )
        .unwrap_err();
        assert_eq!(err, DecodeError::MissingUrl);

        let image = decode_generation(
            br#"{"data":[{"b64_json":"AAAA","revised_prompt":"a cat, detailed"}],"created":1}"#,
            ResponseFormat::B64Json,
            "p",
            None,
        )
        .unwrap();
        assert_eq!(image.source, ImageSource::Base64("AAAA".into()));
        assert_eq!(image.revised_prompt.as_deref(), Some("a cat, detailed"));
    }

    #[test]
    fn test_generation_malformed_body() {
        let err = decode_generation(b"<html>oops</html>", ResponseFormat::Url, "p", None)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn test_recognition() {
        let err = decode_recognition(br#"{"choices":[]}"#, RecognitionMode::Object).unwrap_err();
        assert_eq!(err, DecodeError::NoChoices);
        let err = decode_recognition(b"{}", RecognitionMode::Object).unwrap_err();
        assert_eq!(err, DecodeError::NoChoices);

        let text = decode_recognition(
            br#"{"choices":[{"message":{"content":"hello"}}]}"#,
            RecognitionMode::Object,
        )
        .unwrap();
        assert_eq!(text.text, "hello");
        assert_eq!(text.category, RecognitionCategory::General);
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(&reply(200, "{}")).is_ok());
        for (status, message) in [
            (402, "API quota exhausted, please try again later or contact the developer"),
            (403, "Invalid API key"),
            (400, "Unsupported image format or corrupted file"),
            (500, "Upstream request failed, please try again later"),
        ] {
            let err = check_status(&reply(status, "nope")).unwrap_err();
            assert_eq!(err.status, status);
            assert_eq!(err.message(), message);
            assert_eq!(err.body, "nope");
        }
    }

    #[test]
    fn test_background_removal_passthrough() {
        let png = UpstreamReply {
            status: 200,
            content_type: Some("image/png".into()),
            body: vec![0x89, b'P', b'N', b'G'],
        };
        let image = decode_background_removal(png).unwrap();
        assert_eq!(image.bytes, vec![0x89, b'P', b'N', b'G']);

        let err = decode_background_removal(reply(402, "")).unwrap_err();
        assert!(matches!(err, ImageAiError::Upstream(e) if e.status == 402));
    }
}
