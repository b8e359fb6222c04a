//! The filter family: blur, sharpen and thresholded edge detectors.
//!
//! Every filter is a [`KernelFn`]: a pure function of the input matrix and a
//! coordinate. Each one builds the neighborhood mask, drops out-of-range
//! entries and reduces what is left with its [`Aggregation`] rule.

use crate::convolution::error::{FilterError, Result};
use crate::convolution::kernel::{Kernel, WindowAnchor};
use crate::convolution::mask::neighbors_for;
use crate::convolution::matrix::PixelMatrix;

/// Value written for a pixel that crosses the edge threshold.
pub const EDGE_ON: i32 = 255;
/// Value written for a pixel below the edge threshold.
pub const EDGE_OFF: i32 = 0;

pub const DEFAULT_BLUR_SIZE: usize = 11;
pub const DEFAULT_EDGE_THRESHOLD: f64 = 8.0;

/// A per-pixel filter evaluated against an immutable matrix.
pub trait KernelFn: Sync {
    fn apply(&self, matrix: &PixelMatrix, row: usize, col: usize) -> Result<i32>;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> KernelFn for F
where
    F: Fn(&PixelMatrix, usize, usize) -> Result<i32> + Sync,
{
    fn apply(&self, matrix: &PixelMatrix, row: usize, col: usize) -> Result<i32> {
        self(matrix, row, col)
    }
}

/// How in-range mask values are reduced to one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregation {
    /// Integer mean, truncating toward zero.
    Mean,
    /// Plain sum; may leave the 0-255 range.
    Sum,
    /// [`EDGE_ON`] if `|mean| > threshold`, else [`EDGE_OFF`].
    Threshold(f64),
}

/// A validated kernel paired with its aggregation rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionKernel {
    name: String,
    kernel: Kernel,
    aggregation: Aggregation,
    anchor: WindowAnchor,
}

impl ConvolutionKernel {
    pub fn new(name: impl Into<String>, kernel: Kernel, aggregation: Aggregation) -> Self {
        Self {
            name: name.into(),
            kernel,
            aggregation,
            anchor: WindowAnchor::default(),
        }
    }

    /// Box blur over a `size x size` all-ones window.
    pub fn blur(size: usize) -> Result<Self> {
        Ok(Self::new("blur", Kernel::ones(size)?, Aggregation::Mean))
    }

    pub fn sharpen() -> Self {
        Self::new("sharpen", Kernel::sharpen(), Aggregation::Sum)
    }

    pub fn horizontal_edge(threshold: f64) -> Self {
        Self::new(
            "edge-h",
            Kernel::horizontal_edge(),
            Aggregation::Threshold(threshold),
        )
    }

    pub fn vertical_edge(threshold: f64) -> Self {
        Self::new(
            "edge-v",
            Kernel::vertical_edge(),
            Aggregation::Threshold(threshold),
        )
    }

    pub fn with_anchor(mut self, anchor: WindowAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    pub fn anchor(&self) -> WindowAnchor {
        self.anchor
    }

    fn in_range(&self, matrix: &PixelMatrix, row: usize, col: usize) -> Result<Vec<i32>> {
        let neighbors = neighbors_for(matrix, row, col, &self.kernel, self.anchor)?;
        Ok(neighbors.into_iter().flatten().collect())
    }
}

impl KernelFn for ConvolutionKernel {
    fn apply(&self, matrix: &PixelMatrix, row: usize, col: usize) -> Result<i32> {
        let values = self.in_range(matrix, row, col)?;
        match self.aggregation {
            Aggregation::Mean => mean(&values, row, col),
            Aggregation::Sum => sum(&values, row, col),
            Aggregation::Threshold(threshold) => {
                Ok(threshold_mean(mean(&values, row, col)?, threshold))
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Combined edge detector: fires when either directional detector fires.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDetector {
    horizontal: ConvolutionKernel,
    vertical: ConvolutionKernel,
}

impl EdgeDetector {
    pub fn new(threshold: f64) -> Self {
        Self::from_parts(
            ConvolutionKernel::horizontal_edge(threshold),
            ConvolutionKernel::vertical_edge(threshold),
        )
    }

    pub fn from_parts(horizontal: ConvolutionKernel, vertical: ConvolutionKernel) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn with_anchor(self, anchor: WindowAnchor) -> Self {
        Self {
            horizontal: self.horizontal.with_anchor(anchor),
            vertical: self.vertical.with_anchor(anchor),
        }
    }
}

impl KernelFn for EdgeDetector {
    fn apply(&self, matrix: &PixelMatrix, row: usize, col: usize) -> Result<i32> {
        Ok(self.horizontal.apply(matrix, row, col)? | self.vertical.apply(matrix, row, col)?)
    }

    fn name(&self) -> &str {
        "edge"
    }
}

/// Thresholded mean of `kernel` around `(row, col)`.
pub fn thresholding(
    matrix: &PixelMatrix,
    row: usize,
    col: usize,
    kernel: &Kernel,
    threshold: f64,
) -> Result<i32> {
    ConvolutionKernel::new("threshold", kernel.clone(), Aggregation::Threshold(threshold))
        .apply(matrix, row, col)
}

fn sum(values: &[i32], row: usize, col: usize) -> Result<i32> {
    values
        .iter()
        .try_fold(0i32, |acc, &v| acc.checked_add(v))
        .ok_or(FilterError::Overflow { row, col })
}

fn mean(values: &[i32], row: usize, col: usize) -> Result<i32> {
    if values.is_empty() {
        return Err(FilterError::EmptyNeighborhood { row, col });
    }
    Ok(sum(values, row, col)? / values.len() as i32)
}

#[inline]
fn threshold_mean(mean: i32, threshold: f64) -> i32 {
    if f64::from(mean).abs() > threshold {
        EDGE_ON
    } else {
        EDGE_OFF
    }
}
