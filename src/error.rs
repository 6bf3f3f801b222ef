//! Error types for truss analysis

use thiserror::Error;

/// Main error type for truss analysis operations
#[derive(Error, Debug)]
pub enum TrussError {
    #[error("size mismatch: matrix has {cols} columns but vector has length {len}")]
    SizeMismatch { cols: usize, len: usize },

    #[error("matrix is not square ({rows}x{cols})")]
    NonSquareMatrix { rows: usize, cols: usize },

    #[error("matrix is not positive-definite (non-positive radicand at row {row})")]
    NonPositiveDefinite { row: usize },

    #[error("singular matrix: zero pivot during factorization")]
    SingularMatrix,

    #[error("failed to converge after {0} iterations")]
    ConvergenceFailure(usize),

    #[error("bar {0} has zero length")]
    DegenerateBar(usize),

    #[error("bar {bar} does not know about node {node}")]
    UnrelatedNode { bar: usize, node: usize },

    #[error("node {0} not found in structure")]
    NodeNotFound(usize),

    #[error("node id {0} already exists in structure")]
    DuplicateNodeId(usize),

    #[error("bar id {0} already exists in structure")]
    DuplicateBarId(usize),

    #[error("bar {bar} cross section must be positive (received {value})")]
    NonPositiveCrossSection { bar: usize, value: f64 },

    #[error("bar {bar} Young modulus must be positive (received {value})")]
    NonPositiveYoungModulus { bar: usize, value: f64 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for truss analysis operations
pub type TrussResult<T> = Result<T, TrussError>;
