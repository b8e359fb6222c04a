//! Convolution engine
//!
//! Pure matrix-in/matrix-out filtering of grayscale intensities: masks with
//! out-of-range sentinels, kernel validation, the blur/sharpen/edge family and
//! the whole-matrix driver. Nothing here touches files or codecs.

pub mod config;
pub mod driver;
pub mod error;
pub mod kernel;
pub mod kernels;
pub mod mask;
pub mod matrix;

pub use config::{AggregationRule, FilterConfig, FilterConfigBuilder};
pub use driver::{ExecutionStrategy, apply_mask, apply_mask_with};
pub use error::{FilterError, Result};
pub use kernel::{Kernel, WindowAnchor};
pub use kernels::{
    Aggregation, ConvolutionKernel, DEFAULT_BLUR_SIZE, DEFAULT_EDGE_THRESHOLD, EdgeDetector,
    KernelFn, thresholding,
};
pub use mask::{build_mask, filter_in_range, mask_for, neighbors_for};
pub use matrix::{PIXEL_OUT_OF_RANGE, PixelMatrix};
