//! Filter configuration surface.

use crate::convolution::error::{FilterError, Result};
use crate::convolution::kernel::{
    HORIZONTAL_EDGE_WEIGHTS, Kernel, SHARPEN_WEIGHTS, VERTICAL_EDGE_WEIGHTS, WindowAnchor,
};
use crate::convolution::kernels::{Aggregation, ConvolutionKernel, DEFAULT_BLUR_SIZE};

/// Reduction applied to the in-range part of a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationRule {
    /// Integer mean (blur).
    Mean,
    /// Weighted sum (sharpen).
    Sum,
    /// Mean compared against `threshold` (edge detection).
    Threshold,
}

/// Configuration for a single convolution filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Name reported in logs and errors.
    pub name: String,
    /// Row-major kernel weights, `neighborhood_size^2` of them.
    pub kernel_weights: Vec<i32>,
    /// Side length of the square neighborhood (odd, at least 3).
    pub neighborhood_size: usize,
    /// How the masked neighborhood is reduced to one value.
    pub aggregation: AggregationRule,
    /// Required for [`AggregationRule::Threshold`], ignored otherwise.
    pub threshold: Option<f64>,
    /// Window placement around the center pixel.
    pub anchor: WindowAnchor,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::blur(DEFAULT_BLUR_SIZE)
    }
}

impl FilterConfig {
    pub fn builder() -> FilterConfigBuilder {
        FilterConfigBuilder::default()
    }

    pub fn blur(size: usize) -> Self {
        Self {
            name: "blur".to_string(),
            kernel_weights: vec![1; size * size],
            neighborhood_size: size,
            aggregation: AggregationRule::Mean,
            threshold: None,
            anchor: WindowAnchor::default(),
        }
    }

    pub fn sharpen() -> Self {
        Self {
            name: "sharpen".to_string(),
            kernel_weights: SHARPEN_WEIGHTS.to_vec(),
            neighborhood_size: 3,
            aggregation: AggregationRule::Sum,
            threshold: None,
            anchor: WindowAnchor::default(),
        }
    }

    pub fn horizontal_edge(threshold: f64) -> Self {
        Self {
            name: "edge-h".to_string(),
            kernel_weights: HORIZONTAL_EDGE_WEIGHTS.to_vec(),
            neighborhood_size: 3,
            aggregation: AggregationRule::Threshold,
            threshold: Some(threshold),
            anchor: WindowAnchor::default(),
        }
    }

    pub fn vertical_edge(threshold: f64) -> Self {
        Self {
            name: "edge-v".to_string(),
            kernel_weights: VERTICAL_EDGE_WEIGHTS.to_vec(),
            neighborhood_size: 3,
            aggregation: AggregationRule::Threshold,
            threshold: Some(threshold),
            anchor: WindowAnchor::default(),
        }
    }

    /// Validates the configuration and produces an applicable kernel.
    pub fn build(&self) -> Result<ConvolutionKernel> {
        let kernel = Kernel::new(self.kernel_weights.clone())?;
        if kernel.side() != self.neighborhood_size {
            return Err(FilterError::SizeMismatch {
                weights: kernel.len(),
                size: self.neighborhood_size,
            });
        }

        let aggregation = match self.aggregation {
            AggregationRule::Mean => Aggregation::Mean,
            AggregationRule::Sum => Aggregation::Sum,
            AggregationRule::Threshold => {
                Aggregation::Threshold(self.threshold.ok_or(FilterError::MissingThreshold)?)
            }
        };

        Ok(ConvolutionKernel::new(self.name.clone(), kernel, aggregation).with_anchor(self.anchor))
    }
}

/// Builder for [`FilterConfig`].
#[derive(Default)]
pub struct FilterConfigBuilder {
    name: Option<String>,
    kernel_weights: Option<Vec<i32>>,
    neighborhood_size: Option<usize>,
    aggregation: Option<AggregationRule>,
    threshold: Option<Option<f64>>,
    anchor: Option<WindowAnchor>,
}

impl FilterConfigBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kernel_weights(mut self, weights: Vec<i32>) -> Self {
        self.kernel_weights = Some(weights);
        self
    }

    pub fn neighborhood_size(mut self, size: usize) -> Self {
        self.neighborhood_size = Some(size);
        self
    }

    pub fn aggregation(mut self, aggregation: AggregationRule) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    pub fn threshold(mut self, threshold: Option<f64>) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn anchor(mut self, anchor: WindowAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn build(self) -> FilterConfig {
        let default = FilterConfig::default();
        FilterConfig {
            name: self.name.unwrap_or(default.name),
            kernel_weights: self.kernel_weights.unwrap_or(default.kernel_weights),
            neighborhood_size: self.neighborhood_size.unwrap_or(default.neighborhood_size),
            aggregation: self.aggregation.unwrap_or(default.aggregation),
            threshold: self.threshold.unwrap_or(default.threshold),
            anchor: self.anchor.unwrap_or(default.anchor),
        }
    }
}
