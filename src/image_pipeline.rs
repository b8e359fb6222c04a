//! Image processing pipeline module
//!
//! Thin orchestration around the convolution engine: grayscale decoding,
//! filtering with a kernel function, and re-encoding to PNG or TIFF.

pub mod common;
pub mod conversions;
pub mod grayscale;
pub mod output;

#[cfg(test)]
mod tests;

pub use common::{PipelineError, PipelineTimings, Result, StepTiming, Timer};

pub use grayscale::{GrayscaleReader, ImageCrateReader};

pub use output::{
    FormatWriter, MatrixWriter, OutputFormat, PipelineConfig, PipelineConfigBuilder,
    PixelWriteMode, PngMatrixWriter, TiffCompression, TiffMatrixWriter,
};

pub use conversions::FilterPipeline;
