use crate::{
    error::{ImageAiError, ValidationError},
    models::UploadedImage,
};
use actix_multipart::{Field, Multipart};
use futures::StreamExt;
use std::collections::HashMap;

pub const IMAGE_FIELD: &str = "image";

/// Text fields the routes read. Anything else is drained and dropped.
pub const TEXT_FIELDS: [&str; 2] = ["mode", "quality"];

/// Cap for every non-image part, known or not.
pub const MAX_TEXT_FIELD_BYTES: usize = 1024;

/// Parsed multipart form: the `image` file part plus the known text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub image: Option<UploadedImage>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub fn require_image(&mut self) -> Result<UploadedImage, ValidationError> {
        self.image.take().ok_or(ValidationError::MissingImage)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

fn multipart_error(field: &str, e: actix_multipart::MultipartError) -> ImageAiError {
    ValidationError::InvalidField {
        field: field.to_string(),
        reason: e.to_string(),
    }
    .into()
}

/// Buffers one part, failing as soon as it grows past `limit`.
async fn read_field(field: &mut Field, name: &str, limit: usize) -> Result<Vec<u8>, ImageAiError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| multipart_error(name, e))?;
        if bytes.len() + chunk.len() > limit {
            return Err(ValidationError::TooLarge {
                size: bytes.len() + chunk.len(),
                limit,
            }
            .into());
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Reads the whole form. The image is capped at `max_bytes` and every other
/// part at [`MAX_TEXT_FIELD_BYTES`].
pub async fn read_upload(
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<UploadForm, ImageAiError> {
    let mut form = UploadForm::default();

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| multipart_error("form", e))?;
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGE_FIELD {
            let mime_type = field
                .content_type()
                .map(|m| m.essence_str().to_string())
                .unwrap_or_default();
            let file_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(String::from);

            let bytes = read_field(&mut field, &name, max_bytes).await?;
            let mut image = UploadedImage::new(bytes, mime_type, max_bytes)?;
            if let Some(file_name) = file_name {
                image = image.with_file_name(file_name);
            }
            form.image = Some(image);
            continue;
        }

        let bytes = read_field(&mut field, &name, MAX_TEXT_FIELD_BYTES).await?;
        if !TEXT_FIELDS.contains(&name.as_str()) {
            log::debug!("Ignoring unexpected form field '{}'", name);
            continue;
        }
        let value = String::from_utf8(bytes).map_err(|_| ValidationError::InvalidField {
            field: name.clone(),
            reason: "not valid UTF-8".to_string(),
        })?;
        form.fields.insert(name, value);
    }

    Ok(form)
}
