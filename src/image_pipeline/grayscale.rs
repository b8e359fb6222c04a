//! Grayscale input module
//!
//! Decodes encoded images into the integer matrices the convolution engine
//! works on.

mod image_reader;
mod reader;

pub use image_reader::ImageCrateReader;
pub use reader::GrayscaleReader;
