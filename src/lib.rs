//! Grayscale convolution filters.
//!
//! [`convolution`] holds the pure engine (masks, kernels, the filter family and
//! the whole-matrix driver). [`image_pipeline`] wires it to image decoding and
//! PNG/TIFF encoding.

pub mod convolution;
pub mod image_pipeline;
pub mod logger;

pub use convolution::{
    ConvolutionKernel, EdgeDetector, ExecutionStrategy, FilterConfig, FilterError, KernelFn,
    PixelMatrix, WindowAnchor, apply_mask,
};
pub use image_pipeline::{FilterPipeline, PipelineConfig, PipelineError};
