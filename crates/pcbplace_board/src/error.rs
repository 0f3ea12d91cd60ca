//! Error types for board loading, saving and validation.

/// Errors that can occur when reading, writing or validating a board file.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// An I/O error occurred while reading or writing the board file.
    #[error("failed to access board file: {0}")]
    IoError(#[from] std::io::Error),

    /// The JSON content could not be parsed or produced.
    #[error("failed to parse board: {0}")]
    ParseError(String),

    /// The board content is inconsistent.
    #[error("invalid board: {0}")]
    ValidationError(String),
}
