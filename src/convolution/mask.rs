//! Neighborhood masks: kernel-weighted windows around a pixel.
//!
//! A mask always holds `n^2` entries in row-major window order. Neighbors that
//! fall outside the matrix are kept as [`PIXEL_OUT_OF_RANGE`] so the weight
//! index stays aligned with the window; [`filter_in_range`] drops them before
//! aggregation. Filters read [`neighbors_for`] instead, which keeps range as
//! `Option` and never confuses a weighted pixel with the sentinel.

use crate::convolution::error::{FilterError, Result};
use crate::convolution::kernel::{Kernel, WindowAnchor, validate_len};
use crate::convolution::matrix::{PIXEL_OUT_OF_RANGE, PixelMatrix};

/// Builds the mask around `(row, col)` from raw weights.
///
/// Validates the weights on every call and uses the historical
/// [`WindowAnchor::TopLeftOffset`] window.
pub fn build_mask(matrix: &PixelMatrix, row: usize, col: usize, kernel: &[i32]) -> Result<Vec<i32>> {
    let side = validate_len(kernel.len())?;
    let window = weighted_window(
        matrix,
        row,
        col,
        kernel,
        side,
        WindowAnchor::TopLeftOffset,
    )?;
    Ok(with_sentinels(window))
}

/// Builds the mask around `(row, col)` for an already validated kernel.
pub fn mask_for(
    matrix: &PixelMatrix,
    row: usize,
    col: usize,
    kernel: &Kernel,
    anchor: WindowAnchor,
) -> Result<Vec<i32>> {
    neighbors_for(matrix, row, col, kernel, anchor).map(with_sentinels)
}

/// Weighted neighbors in window order, `None` where the neighbor is outside
/// the matrix.
///
/// Range is decided by position, so a weighted value equal to
/// [`PIXEL_OUT_OF_RANGE`] is still a real contribution.
pub fn neighbors_for(
    matrix: &PixelMatrix,
    row: usize,
    col: usize,
    kernel: &Kernel,
    anchor: WindowAnchor,
) -> Result<Vec<Option<i32>>> {
    weighted_window(matrix, row, col, kernel.weights(), kernel.side(), anchor)
}

fn weighted_window(
    matrix: &PixelMatrix,
    row: usize,
    col: usize,
    weights: &[i32],
    side: usize,
    anchor: WindowAnchor,
) -> Result<Vec<Option<i32>>> {
    let offset = anchor.origin_offset(side);
    let top = row as isize + offset;
    let left = col as isize + offset;

    (0..side * side)
        .map(|index| {
            let r = top + (index / side) as isize;
            let c = left + (index % side) as isize;
            matrix
                .checked_get(r, c)
                .map(|value| {
                    value
                        .checked_mul(weights[index])
                        .ok_or(FilterError::Overflow { row, col })
                })
                .transpose()
        })
        .collect()
}

fn with_sentinels(window: Vec<Option<i32>>) -> Vec<i32> {
    window
        .into_iter()
        .map(|v| v.unwrap_or(PIXEL_OUT_OF_RANGE))
        .collect()
}

/// Drops every out-of-range entry, keeping order.
pub fn filter_in_range(mask: &[i32]) -> Vec<i32> {
    mask.iter()
        .copied()
        .filter(|&v| v != PIXEL_OUT_OF_RANGE)
        .collect()
}
