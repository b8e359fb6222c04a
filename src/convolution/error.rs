use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Malformed kernel: {len} weights is not an odd n^2 with n >= 3")]
    MalformedKernel { len: usize },

    #[error("Kernel size mismatch: {weights} weights for neighborhood size {size}")]
    SizeMismatch { weights: usize, size: usize },

    #[error("Threshold aggregation requires a threshold")]
    MissingThreshold,

    #[error("Empty neighborhood at ({row}, {col}): every neighbor is out of range")]
    EmptyNeighborhood { row: usize, col: usize },

    #[error("Arithmetic overflow while filtering ({row}, {col})")]
    Overflow { row: usize, col: usize },

    #[error("Ragged matrix: row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Matrix buffer of {len} values does not match shape {rows}x{cols}")]
    DimensionMismatch { rows: usize, cols: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, FilterError>;
