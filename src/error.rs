use thiserror::Error;

/// Convenience result type for loading and array construction.
pub type ArrayResult<T> = Result<T, ArrayError>;

/// Error type returned by loaders and array factories.
///
/// This is a single error enum shared by homogeneous loading, record loading and the factory.
#[derive(Debug, Error)]
pub enum ArrayError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text reader error (including rows with an unexpected field count).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON schema document could not be decoded.
    #[error("schema json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not conform to the declared schema or column layout.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A requested shape is not representable (negative dimension, overflowing size).
    #[error("invalid shape: {message}")]
    InvalidShape { message: String },

    /// Parsed values could not be arranged into the requested array shape.
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
