use crate::{
    error::{Result, ValidationError},
    models::{CompressedImage, UploadedImage},
};
use image::{codecs::jpeg::JpegEncoder, DynamicImage};

pub const MIN_QUALITY: u8 = 10;
pub const MAX_QUALITY: u8 = 100;
pub const DEFAULT_QUALITY: u8 = 80;

/// Re-encodes an upload as JPEG at `quality` (10..=100). Alpha is dropped.
pub fn compress_image(image: &UploadedImage, quality: u8) -> Result<CompressedImage> {
    if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        return Err(ValidationError::QualityOutOfRange {
            got: quality,
            min: MIN_QUALITY,
            max: MAX_QUALITY,
        }
        .into());
    }

    let decoded = image::load_from_memory(image.bytes())?;
    let (width, height) = (decoded.width(), decoded.height());

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    DynamicImage::ImageRgb8(decoded.to_rgb8()).write_with_encoder(encoder)?;

    log::debug!(
        "🗜️  Compressed {}x{} image at quality {}: {} -> {} bytes",
        width,
        height,
        quality,
        image.len(),
        bytes.len()
    );

    Ok(CompressedImage {
        content_type: "image/jpeg".to_string(),
        file_name: format!("compressed_{}", image.file_name().unwrap_or("image.jpg")),
        quality,
        width,
        height,
        original_size: image.len(),
        compressed_size: bytes.len(),
        bytes,
    })
}

/// Human readable size in 1024-based units, up to two decimals.
pub fn format_file_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_upload(width: u32, height: u32) -> UploadedImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 128, 200])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        UploadedImage::new(bytes, "image/png", 10 * 1024 * 1024)
            .unwrap()
            .with_file_name("photo.png")
    }

    #[test]
    fn test_compress_produces_jpeg() {
        let upload = png_upload(64, 48);
        let result = compress_image(&upload, DEFAULT_QUALITY).unwrap();

        assert_eq!(&result.bytes[..2], &[0xff, 0xd8]);
        assert_eq!((result.width, result.height), (64, 48));
        assert_eq!(result.original_size, upload.len());
        assert_eq!(result.compressed_size, result.bytes.len());
        assert_eq!(result.file_name, "compressed_photo.png");
        assert_eq!(result.content_type, "image/jpeg");
    }

    #[test]
    fn test_lower_quality_is_not_larger() {
        let upload = png_upload(128, 128);
        let high = compress_image(&upload, 100).unwrap();
        let low = compress_image(&upload, 10).unwrap();
        assert!(low.compressed_size <= high.compressed_size);
    }

    #[test]
    fn test_quality_bounds() {
        let upload = png_upload(8, 8);
        for quality in [0, 9, 101] {
            assert!(matches!(
                compress_image(&upload, quality),
                Err(crate::error::ImageAiError::Validation(
                    ValidationError::QualityOutOfRange { .. }
                ))
            ));
        }
    }

    #[test]
    fn test_undecodable_bytes() {
        let upload = UploadedImage::new(b"not an image".to_vec(), "image/png", 1024).unwrap();
        assert!(matches!(
            compress_image(&upload, 80),
            Err(crate::error::ImageAiError::Image(_))
        ));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
    }
}
