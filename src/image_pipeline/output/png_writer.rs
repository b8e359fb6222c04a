use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

use crate::convolution::PixelMatrix;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::output::types::PipelineConfig;
use crate::image_pipeline::output::writer::{MatrixWriter, encoded_dimensions, to_bytes};

/// Writes the matrix as an opaque RGBA PNG, gray in every color channel.
pub struct PngMatrixWriter;

impl MatrixWriter for PngMatrixWriter {
    fn write_matrix(
        &self,
        matrix: &PixelMatrix,
        output: &mut dyn Write,
        config: &PipelineConfig,
    ) -> Result<()> {
        let (width, height) = encoded_dimensions(matrix)?;
        debug!("Encoding PNG image: {}x{}", width, height);

        let rgba: Vec<u8> = to_bytes(matrix, config.write_mode)
            .into_iter()
            .flat_map(|v| [v, v, v, 255])
            .collect();

        PngEncoder::new(output)
            .write_image(&rgba, width, height, ExtendedColorType::Rgba8)
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?;

        debug!("PNG encoding complete");
        Ok(())
    }
}
