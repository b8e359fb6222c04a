//! Whole-matrix convolution passes.
//!
//! Every output cell is computed from the untouched input, so rows can be
//! filled independently. The first failing cell aborts the pass and no
//! partial matrix is returned.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::convolution::error::Result;
use crate::convolution::kernels::KernelFn;
use crate::convolution::matrix::PixelMatrix;

/// Controls how a convolution pass is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Output rows are filled in parallel on the global rayon pool.
    #[default]
    ParallelRows,
    /// Run on the current thread, row by row.
    Serial,
}

/// Applies `kernel` to every cell of `matrix` using the default strategy.
pub fn apply_mask<K: KernelFn + ?Sized>(matrix: &PixelMatrix, kernel: &K) -> Result<PixelMatrix> {
    apply_mask_with(matrix, kernel, ExecutionStrategy::default())
}

pub fn apply_mask_with<K: KernelFn + ?Sized>(
    matrix: &PixelMatrix,
    kernel: &K,
    strategy: ExecutionStrategy,
) -> Result<PixelMatrix> {
    let (rows, cols) = matrix.shape();
    debug!(
        rows,
        cols,
        ?strategy,
        kernel = kernel.name(),
        "Applying kernel to matrix"
    );

    let mut output = PixelMatrix::new(rows, cols);
    if matrix.is_empty() {
        return Ok(output);
    }

    let fill_row = |(row, out_row): (usize, &mut [i32])| -> Result<()> {
        for (col, cell) in out_row.iter_mut().enumerate() {
            *cell = kernel.apply(matrix, row, col)?;
        }
        trace!(row, "Row complete");
        Ok(())
    };

    match strategy {
        ExecutionStrategy::ParallelRows => output
            .as_mut_slice()
            .par_chunks_exact_mut(cols)
            .enumerate()
            .try_for_each(fill_row)?,
        ExecutionStrategy::Serial => output
            .as_mut_slice()
            .chunks_exact_mut(cols)
            .enumerate()
            .try_for_each(fill_row)?,
    }

    Ok(output)
}
