//! Validated square kernels and the window anchoring they are applied with.

use crate::convolution::error::{FilterError, Result};

pub const SHARPEN_WEIGHTS: [i32; 9] = [-1, -1, -1, -1, 9, -1, -1, -1, -1];
pub const HORIZONTAL_EDGE_WEIGHTS: [i32; 9] = [-1, -1, -1, 0, 0, 0, 1, 1, 1];
pub const VERTICAL_EDGE_WEIGHTS: [i32; 9] = [-1, 0, 1, -1, 0, 1, -1, 0, 1];

/// Where the `n x n` window sits relative to the pixel being filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowAnchor {
    /// Top-left corner at `(row - 1, col - 1)` for every kernel size.
    ///
    /// Reproduces the historical output of the filters. Only centered for 3x3.
    #[default]
    TopLeftOffset,
    /// Top-left corner at `(row - n/2, col - n/2)`.
    Centered,
}

impl WindowAnchor {
    /// Offset of the window's first row/column from the center pixel.
    #[inline]
    pub fn origin_offset(self, side: usize) -> isize {
        match self {
            WindowAnchor::TopLeftOffset => -1,
            WindowAnchor::Centered => -((side / 2) as isize),
        }
    }
}

/// Row-major square kernel with an odd side of at least 3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    weights: Vec<i32>,
    side: usize,
}

impl Kernel {
    pub fn new(weights: Vec<i32>) -> Result<Self> {
        let side = validate_len(weights.len())?;
        Ok(Self { weights, side })
    }

    /// All-ones kernel of `size x size`.
    pub fn ones(size: usize) -> Result<Self> {
        Self::new(vec![1; size * size])
    }

    pub fn sharpen() -> Self {
        Self {
            weights: SHARPEN_WEIGHTS.to_vec(),
            side: 3,
        }
    }

    pub fn horizontal_edge() -> Self {
        Self {
            weights: HORIZONTAL_EDGE_WEIGHTS.to_vec(),
            side: 3,
        }
    }

    pub fn vertical_edge() -> Self {
        Self {
            weights: VERTICAL_EDGE_WEIGHTS.to_vec(),
            side: 3,
        }
    }

    pub fn weights(&self) -> &[i32] {
        &self.weights
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Returns the side length if `len` is `n^2` with `n` odd and `n >= 3`.
pub fn validate_len(len: usize) -> Result<usize> {
    let side = (len as f64).sqrt().round() as usize;
    if side * side != len || side % 2 == 0 || side < 3 {
        return Err(FilterError::MalformedKernel { len });
    }
    Ok(side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_len() {
        assert_eq!(validate_len(9), Ok(3));
        assert_eq!(validate_len(25), Ok(5));
        assert_eq!(validate_len(121), Ok(11));
        assert_eq!(validate_len(8), Err(FilterError::MalformedKernel { len: 8 }));
        assert_eq!(validate_len(16), Err(FilterError::MalformedKernel { len: 16 }));
        assert_eq!(validate_len(1), Err(FilterError::MalformedKernel { len: 1 }));
        assert_eq!(validate_len(0), Err(FilterError::MalformedKernel { len: 0 }));
    }

    #[test]
    fn test_presets_are_valid() {
        for kernel in [Kernel::sharpen(), Kernel::horizontal_edge(), Kernel::vertical_edge()] {
            assert_eq!(Kernel::new(kernel.weights().to_vec()), Ok(kernel));
        }
    }

    #[test]
    fn test_ones() {
        let kernel = Kernel::ones(5).unwrap();
        assert_eq!(kernel.side(), 5);
        assert!(kernel.weights().iter().all(|&w| w == 1));
        assert!(Kernel::ones(4).is_err());
    }

    #[test]
    fn test_anchor_offsets() {
        assert_eq!(WindowAnchor::TopLeftOffset.origin_offset(11), -1);
        assert_eq!(WindowAnchor::Centered.origin_offset(11), -5);
        assert_eq!(
            WindowAnchor::TopLeftOffset.origin_offset(3),
            WindowAnchor::Centered.origin_offset(3)
        );
    }
}
