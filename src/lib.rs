//! # imgai
//!
//! Request shaping, relaying and response decoding for image AI services:
//! text-to-image generation, vision recognition, background removal, plus
//! local JPEG compression.
//!
//! ```no_run
//! use imgai::{AspectRatio, Config, GenerationRequest, ImageAiClient, Resolution};
//!
//! # async fn demo() -> imgai::Result<()> {
//! let client = ImageAiClient::new(Config::from_env())?;
//! let request = GenerationRequest::new("a lighthouse at dusk")
//!     .with_style("oil")
//!     .with_dimensions(Resolution::TwoK, AspectRatio::Widescreen);
//! let image = client.generation().generate(request).await?;
//! println!("{:?}", image.url());
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod compress;
pub mod config;
pub mod debounce;
pub mod error;
pub mod logger;
pub mod models;
pub mod normalizer;
pub mod transport;

#[cfg(feature = "server")]
pub mod server;

pub use clients::{BackgroundClient, GenerationClient, ImageAiClient, RecognitionClient};
pub use compress::{compress_image, format_file_size};
pub use config::{Config, TransportConfig};
pub use debounce::Debouncer;
pub use error::{DecodeError, ImageAiError, Result, UpstreamError, ValidationError};
pub use models::*;
pub use normalizer::calculate_size;
pub use transport::{HttpTransport, Transport};
