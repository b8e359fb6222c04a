//! Grayscale reader backed by the `image` crate.
//!
//! Any format `image` can decode (JPEG, PNG, ...) is accepted. Pixels are
//! expanded to RGBA8 and reduced to one channel by averaging R, G and B with
//! integer division; alpha is ignored.

use tracing::debug;

use crate::convolution::PixelMatrix;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grayscale::reader::GrayscaleReader;

pub struct ImageCrateReader;

impl GrayscaleReader for ImageCrateReader {
    fn read_gray(&self, data: &[u8]) -> Result<PixelMatrix> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded =
            image::load_from_memory(data).map_err(|e| PipelineError::DecodeError(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        debug!("Decoded image: {}x{}", width, height);

        rgba_to_gray(rgba.as_raw(), width as usize, height as usize)
    }
}

/// Averages interleaved RGBA8 samples into a `height x width` matrix.
pub(crate) fn rgba_to_gray(rgba: &[u8], width: usize, height: usize) -> Result<PixelMatrix> {
    let values = rgba
        .chunks_exact(4)
        .map(|px| (i32::from(px[0]) + i32::from(px[1]) + i32::from(px[2])) / 3)
        .collect();

    PixelMatrix::from_vec(height, width, values)
        .map_err(|e| PipelineError::DecodeError(e.to_string()))
}
