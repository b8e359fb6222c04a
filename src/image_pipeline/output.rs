//! Filtered output module
//!
//! Turns filtered matrices back into encoded images. Values are clamped or
//! wrapped into bytes here and nowhere earlier.

mod png_writer;
mod tiff_writer;
pub mod types;
mod writer;

pub use png_writer::PngMatrixWriter;
pub use tiff_writer::TiffMatrixWriter;
pub use types::{
    OutputFormat, PipelineConfig, PipelineConfigBuilder, PixelWriteMode, TiffCompression,
};
pub use writer::{FormatWriter, MatrixWriter, to_bytes};
