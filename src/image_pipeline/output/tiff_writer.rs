use std::io::{Cursor, Write};

use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder, colortype};
use tiff::tags::Predictor;
use tracing::debug;

use crate::convolution::PixelMatrix;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::output::types::{PipelineConfig, TiffCompression};
use crate::image_pipeline::output::writer::{MatrixWriter, encoded_dimensions, to_bytes};

/// Writes the matrix as an 8-bit grayscale TIFF.
pub struct TiffMatrixWriter;

impl MatrixWriter for TiffMatrixWriter {
    fn write_matrix(
        &self,
        matrix: &PixelMatrix,
        output: &mut dyn Write,
        config: &PipelineConfig,
    ) -> Result<()> {
        let (width, height) = encoded_dimensions(matrix)?;
        debug!("Encoding TIFF image: {}x{}", width, height);

        let gray = to_bytes(matrix, config.write_mode);
        let mut buffer = Vec::new();

        {
            let compression = match config.compression {
                TiffCompression::None => Compression::Uncompressed,
                TiffCompression::Lzw => Compression::Lzw,
                TiffCompression::Deflate => Compression::Deflate(DeflateLevel::Fast),
            };

            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(|e| PipelineError::EncodeError(e.to_string()))?
                .with_compression(compression);

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    2 => Predictor::Horizontal,
                    _ => Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            encoder
                .write_image::<colortype::Gray8>(width, height, &gray)
                .map_err(|e| PipelineError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
