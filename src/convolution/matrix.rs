//! Rectangular grayscale pixel matrix and its bounds-checked accessor.

use crate::convolution::error::{FilterError, Result};

/// Marks a neighbor that lies outside the matrix.
///
/// Only the public mask uses it in-band. Filters carry out-of-range
/// neighbors as `None` internally, so a weighted pixel equal to this value
/// is never dropped.
pub const PIXEL_OUT_OF_RANGE: i32 = -1000;

/// Row-major grayscale intensities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    rows: usize,
    cols: usize,
    data: Vec<i32>,
}

impl PixelMatrix {
    /// Zero-filled matrix of the given shape.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<i32>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(FilterError::DimensionMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);

        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(FilterError::RaggedMatrix {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reads `(row, col)`, returning [`PIXEL_OUT_OF_RANGE`] outside the matrix.
    ///
    /// Borders are never wrapped, clamped or mirrored: missing neighbors are
    /// reported as such and excluded further down.
    #[inline]
    pub fn get(&self, row: isize, col: isize) -> i32 {
        self.checked_get(row, col).unwrap_or(PIXEL_OUT_OF_RANGE)
    }

    /// Reads `(row, col)`, or `None` outside the matrix.
    #[inline]
    pub fn checked_get(&self, row: isize, col: isize) -> Option<i32> {
        if row < 0 || row as usize >= self.rows {
            return None;
        }
        if col < 0 || col as usize >= self.cols {
            return None;
        }
        Some(self.data[row as usize * self.cols + col as usize])
    }

    pub fn row(&self, row: usize) -> &[i32] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [i32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<i32> {
        self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }
}
