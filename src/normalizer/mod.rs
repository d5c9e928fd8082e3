//! Pure request shaping and response decoding. Nothing in here performs I/O
//! or sees a credential.

pub mod classify;
pub mod decode;
pub mod generation;
pub mod prompt;
pub mod recognition;
pub mod size;

pub use classify::{apply_classification, classify_recognition};
pub use decode::{check_status, decode_background_removal, decode_generation, decode_recognition};
pub use generation::build_generation_payload;
pub use prompt::{compose_prompt, find_style, STYLE_TEMPLATES};
pub use recognition::{build_recognition_payload, map_mime_to_format, prepare_recognition};
pub use size::calculate_size;
