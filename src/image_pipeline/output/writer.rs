use std::io::Write;

use crate::convolution::PixelMatrix;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::output::png_writer::PngMatrixWriter;
use crate::image_pipeline::output::tiff_writer::TiffMatrixWriter;
use crate::image_pipeline::output::types::{OutputFormat, PipelineConfig, PixelWriteMode};

pub trait MatrixWriter {
    fn write_matrix(
        &self,
        matrix: &PixelMatrix,
        output: &mut dyn Write,
        config: &PipelineConfig,
    ) -> Result<()>;
}

/// Dispatches to the PNG or TIFF writer according to `config.output_format`.
pub struct FormatWriter;

impl MatrixWriter for FormatWriter {
    fn write_matrix(
        &self,
        matrix: &PixelMatrix,
        output: &mut dyn Write,
        config: &PipelineConfig,
    ) -> Result<()> {
        match config.output_format {
            OutputFormat::Png => PngMatrixWriter.write_matrix(matrix, output, config),
            OutputFormat::Tiff => TiffMatrixWriter.write_matrix(matrix, output, config),
        }
    }
}

/// Row-major bytes of `matrix` under the given write mode.
pub fn to_bytes(matrix: &PixelMatrix, mode: PixelWriteMode) -> Vec<u8> {
    matrix.as_slice().iter().map(|&v| mode.to_byte(v)).collect()
}

/// `(width, height)` as encoders expect them.
pub fn encoded_dimensions(matrix: &PixelMatrix) -> Result<(u32, u32)> {
    let (rows, cols) = matrix.shape();
    match (u32::try_from(cols), u32::try_from(rows)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(PipelineError::InvalidDimensions(cols, rows)),
    }
}
