use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse output size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::OneK, Resolution::TwoK, Resolution::FourK];

    /// Length of the longer edge in pixels.
    pub fn base_edge(&self) -> u32 {
        match self {
            Resolution::OneK => 1024,
            Resolution::TwoK => 2048,
            Resolution::FourK => 4096,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::OneK => "1K",
            Resolution::TwoK => "2K",
            Resolution::FourK => "4K",
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            Resolution::OneK => "standard quality",
            Resolution::TwoK => "high definition",
            Resolution::FourK => "ultra high definition",
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::TwoK
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1K" => Ok(Resolution::OneK),
            "2K" => Ok(Resolution::TwoK),
            "4K" => Ok(Resolution::FourK),
            _ => Err(ValidationError::UnsupportedResolution(s.to_string())),
        }
    }
}

/// The fixed catalog of aspect ratios offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "21:9")]
    Cinema,
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "3:2")]
    Photo,
    #[serde(rename = "4:3")]
    Classic,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    PortraitPhoto,
    #[serde(rename = "2:3")]
    Poster,
    #[serde(rename = "9:16")]
    Vertical,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 8] = [
        AspectRatio::Cinema,
        AspectRatio::Widescreen,
        AspectRatio::Photo,
        AspectRatio::Classic,
        AspectRatio::Square,
        AspectRatio::PortraitPhoto,
        AspectRatio::Poster,
        AspectRatio::Vertical,
    ];

    /// `(width, height)` ratio terms.
    pub fn parts(&self) -> (u32, u32) {
        match self {
            AspectRatio::Cinema => (21, 9),
            AspectRatio::Widescreen => (16, 9),
            AspectRatio::Photo => (3, 2),
            AspectRatio::Classic => (4, 3),
            AspectRatio::Square => (1, 1),
            AspectRatio::PortraitPhoto => (3, 4),
            AspectRatio::Poster => (2, 3),
            AspectRatio::Vertical => (9, 16),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Cinema => "21:9",
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Photo => "3:2",
            AspectRatio::Classic => "4:3",
            AspectRatio::Square => "1:1",
            AspectRatio::PortraitPhoto => "3:4",
            AspectRatio::Poster => "2:3",
            AspectRatio::Vertical => "9:16",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AspectRatio::Cinema => "ultra-wide, film",
            AspectRatio::Widescreen => "widescreen, video",
            AspectRatio::Photo => "camera, classic photography",
            AspectRatio::Classic => "traditional, standard frame",
            AspectRatio::Square => "square, social media",
            AspectRatio::PortraitPhoto => "portrait camera",
            AspectRatio::Poster => "portrait, poster",
            AspectRatio::Vertical => "vertical video, shorts",
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Square
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || ValidationError::UnsupportedRatio(s.to_string());

        let (w, h) = s.trim().split_once(':').ok_or_else(unsupported)?;
        let w: u32 = w.trim().parse().map_err(|_| unsupported())?;
        let h: u32 = h.trim().parse().map_err(|_| unsupported())?;

        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.parts() == (w, h))
            .ok_or_else(unsupported)
    }
}

/// Exact pixel dimensions, rendered as `"{width}x{height}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const SQUARE_FALLBACK: ImageSize = ImageSize {
        width: 1024,
        height: 1024,
    };
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ImageSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::MalformedSize(s.to_string());

        let (w, h) = s
            .trim()
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or_else(malformed)?;
        let (w, h) = (w.trim(), h.trim());
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(w) || !digits(h) {
            return Err(malformed());
        }
        let width: u32 = w.parse().map_err(|_| malformed())?;
        let height: u32 = h.parse().map_err(|_| malformed())?;
        if width == 0 || height == 0 {
            return Err(malformed());
        }

        Ok(ImageSize { width, height })
    }
}

impl Serialize for ImageSize {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ImageSize {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A requested `size`: exact pixels (`"2048x1152"`) or a tier name (`"2K"`)
/// that is combined with the selected ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSpec {
    Pixels(ImageSize),
    Tier(Resolution),
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeSpec::Pixels(size) => fmt::Display::fmt(size, f),
            SizeSpec::Tier(resolution) => f.write_str(resolution.as_str()),
        }
    }
}

impl FromStr for SizeSpec {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Resolution>() {
            Ok(resolution) => Ok(SizeSpec::Tier(resolution)),
            Err(_) => s.parse().map(SizeSpec::Pixels),
        }
    }
}

impl From<ImageSize> for SizeSpec {
    fn from(size: ImageSize) -> Self {
        SizeSpec::Pixels(size)
    }
}

impl Serialize for SizeSpec {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SizeSpec {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Only an explicit `false` turns a flag off; any other present value,
/// `1` or `"yes"` included, counts as `true`. `null` means unset.
fn deserialize_truthy<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(false) => Some(false),
        _ => Some(true),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequentialImageGeneration {
    Enabled,
    #[default]
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    #[default]
    Url,
    B64Json,
}

/// Generation mode flags as the caller supplied them. Absent flags are
/// defaulted by the payload builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(default)]
    pub sequential_image_generation: Option<SequentialImageGeneration>,
    #[serde(default)]
    pub response_format: Option<ResponseFormat>,
    #[serde(default)]
    pub stream: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub watermark: Option<bool>,
}

/// What the user asked for, before any defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub resolution: Option<Resolution>,
    #[serde(default)]
    pub ratio: Option<AspectRatio>,
    #[serde(default)]
    pub size: Option<SizeSpec>,
    #[serde(default, flatten)]
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_dimensions(mut self, resolution: Resolution, ratio: AspectRatio) -> Self {
        self.resolution = Some(resolution);
        self.ratio = Some(ratio);
        self
    }

    pub fn with_size(mut self, size: impl Into<SizeSpec>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// The pixel size to send upstream. Explicit pixels win; a tier `size`
    /// replaces `resolution`. Otherwise a resolution or ratio selection is
    /// completed with the UI defaults and run through the calculator.
    pub fn target_size(&self) -> Option<ImageSize> {
        let resolution = match self.size {
            Some(SizeSpec::Pixels(size)) => return Some(size),
            Some(SizeSpec::Tier(tier)) => Some(tier),
            None => self.resolution,
        };
        match (resolution, self.ratio) {
            (None, None) => None,
            (resolution, ratio) => Some(crate::normalizer::calculate_size(
                resolution.unwrap_or_default(),
                ratio.unwrap_or_default(),
            )),
        }
    }
}

/// Fully defaulted body for the image generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPayload {
    pub model: String,
    pub prompt: String,
    pub sequential_image_generation: SequentialImageGeneration,
    pub response_format: ResponseFormat,
    pub size: String,
    pub stream: bool,
    pub watermark: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolcanoImageResponse {
    #[serde(default)]
    pub data: Vec<VolcanoImageData>,
    #[serde(default)]
    pub created: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolcanoImageData {
    pub url: Option<String>,
    pub b64_json: Option<String>,
    pub revised_prompt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_ratios() {
        for ratio in AspectRatio::ALL {
            assert_eq!(ratio.as_str().parse::<AspectRatio>().unwrap(), ratio);
        }
        assert_eq!(" 16 : 9 ".parse::<AspectRatio>().unwrap(), AspectRatio::Widescreen);
    }

    #[test]
    fn test_rejects_unknown_ratios() {
        for bad in ["5:4", "16x9", "a:b", "", "0:1"] {
            assert!(matches!(
                bad.parse::<AspectRatio>(),
                Err(ValidationError::UnsupportedRatio(_))
            ));
        }
    }

    #[test]
    fn test_resolution_parse_and_serde() {
        assert_eq!("2k".parse::<Resolution>().unwrap(), Resolution::TwoK);
        assert!("8K".parse::<Resolution>().is_err());
        assert_eq!(serde_json::to_string(&Resolution::FourK).unwrap(), "\"4K\"");
        let ratio: AspectRatio = serde_json::from_str("\"9:16\"").unwrap();
        assert_eq!(ratio, AspectRatio::Vertical);
    }

    #[test]
    fn test_image_size_parse() {
        let size: ImageSize = "2048x1152".parse().unwrap();
        assert_eq!(size, ImageSize { width: 2048, height: 1152 });
        assert_eq!(size.to_string(), "2048x1152");
        assert!("0x100".parse::<ImageSize>().is_err());
        assert!("1024".parse::<ImageSize>().is_err());
        assert!("-8x8".parse::<ImageSize>().is_err());
        assert!("+8x8".parse::<ImageSize>().is_err());
        assert!("8x+8".parse::<ImageSize>().is_err());
        assert_eq!(" 640 x 480 ".parse::<ImageSize>().unwrap().to_string(), "640x480");
    }

    #[test]
    fn test_size_accepts_tier_names() {
        let request: GenerationRequest =
            serde_json::from_str(r#"{"prompt":"x","size":"2K"}"#).unwrap();
        assert_eq!(request.size, Some(SizeSpec::Tier(Resolution::TwoK)));
        assert_eq!(request.target_size().unwrap().to_string(), "2048x2048");

        let request: GenerationRequest =
            serde_json::from_str(r#"{"prompt":"x","size":"1k","ratio":"16:9"}"#).unwrap();
        assert_eq!(request.target_size().unwrap().to_string(), "1024x576");

        let request: GenerationRequest =
            serde_json::from_str(r#"{"prompt":"x","size":"800x600"}"#).unwrap();
        assert_eq!(request.target_size().unwrap().to_string(), "800x600");

        assert!(serde_json::from_str::<GenerationRequest>(r#"{"prompt":"x","size":"huge"}"#).is_err());
    }

    #[test]
    fn test_watermark_truthy_values() {
        let parse = |json: &str| {
            serde_json::from_str::<GenerationRequest>(json)
                .unwrap()
                .options
                .watermark
        };
        assert_eq!(parse(r#"{"prompt":"x","watermark":1}"#), Some(true));
        assert_eq!(parse(r#"{"prompt":"x","watermark":"yes"}"#), Some(true));
        assert_eq!(parse(r#"{"prompt":"x","watermark":true}"#), Some(true));
        assert_eq!(parse(r#"{"prompt":"x","watermark":false}"#), Some(false));
        assert_eq!(parse(r#"{"prompt":"x","watermark":null}"#), None);
        assert_eq!(parse(r#"{"prompt":"x"}"#), None);
    }

    #[test]
    fn test_request_deserializes_flat_options() {
        let request: GenerationRequest = serde_json::from_str(
            r#"{"prompt":"a cat","style":"anime","resolution":"1K","ratio":"9:16","watermark":false}"#,
        )
        .unwrap();
        assert_eq!(request.style.as_deref(), Some("anime"));
        assert_eq!(request.options.watermark, Some(false));
        assert_eq!(request.options.stream, None);
        assert_eq!(request.target_size().unwrap().to_string(), "576x1024");
    }

    #[test]
    fn test_target_size_selection() {
        assert_eq!(GenerationRequest::new("x").target_size(), None);

        let explicit = GenerationRequest::new("x")
            .with_dimensions(Resolution::OneK, AspectRatio::Square)
            .with_size(ImageSize { width: 640, height: 480 });
        assert_eq!(explicit.target_size().unwrap().to_string(), "640x480");

        // ratio alone falls back to the 2K tier
        let mut ratio_only = GenerationRequest::new("x");
        ratio_only.ratio = Some(AspectRatio::Widescreen);
        assert_eq!(ratio_only.target_size().unwrap().to_string(), "2048x1152");
    }
}
