//! Error types for wirecam-core.
//!
//! Construction-time failures (bad views, malformed scenes) are reported
//! through these types. Per-segment degeneracies during drawing are not
//! errors; the pipeline drops the segment and keeps going.

use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Numeric or geometric construction failed
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Scene description is well-formed JSON but semantically invalid
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Scene or config JSON could not be decoded (missing fields,
    /// unknown model type, unknown fields)
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// I/O error while reading a scene or config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the vector/matrix layer and the view transform builder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Attempted to normalize a vector whose length is below epsilon
    #[error("cannot normalize vector with norm {norm:e}")]
    DegenerateVector { norm: f64 },

    /// Adjacent operands of a matrix chain have incompatible shapes
    #[error("cannot multiply {left_rows}x{left_cols} by {right_rows}x{right_cols}")]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    /// `multiply` was called with no operands
    #[error("cannot multiply an empty chain")]
    EmptyChain,

    /// The camera parameters do not define a view basis
    #[error("degenerate view: {reason}")]
    DegenerateView { reason: &'static str },
}

/// Errors raised while validating a scene description.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// View parameters violate an ordering or finiteness constraint
    #[error("invalid view: {message}")]
    InvalidView { message: String },

    /// An edge refers to a vertex that does not exist
    #[error("model {model}: edge {edge} references vertex {index}, but only {vertex_count} exist")]
    EdgeIndexOutOfRange {
        model: usize,
        edge: usize,
        index: usize,
        vertex_count: usize,
    },

    /// A procedural model has unusable parameters
    #[error("model {model}: {message}")]
    InvalidModel { model: usize, message: String },
}
