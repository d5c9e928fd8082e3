pub mod common;
pub mod generation;
pub mod image;
pub mod recognition;
pub mod result;

pub use common::*;
pub use generation::*;
pub use image::*;
pub use recognition::*;
pub use result::*;
