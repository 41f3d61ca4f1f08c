//! Mapper error types.

use snomed_client::ClientError;
use thiserror::Error;

/// Errors that abort a mapping run.
///
/// Failures resolving a single clinical drug are never errors; they become
/// unresolved reports instead.
#[derive(Error, Debug)]
pub enum MapperError {
    /// I/O error writing output files.
    #[error("IO error writing mapping output: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error writing a mapping line.
    #[error("CSV error writing mapping output: {0}")]
    Csv(#[from] csv::Error),

    /// The candidate clinical drugs could not be retrieved.
    #[error("could not fetch candidate clinical drugs: {0}")]
    Client(#[from] ClientError),
}

/// Result type for mapper operations.
pub type MapperResult<T> = Result<T, MapperError>;
