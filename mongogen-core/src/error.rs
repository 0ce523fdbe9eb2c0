//! Error types for script generation and schema import.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Errors surfaced while assembling a script or reading a schema sample.
///
/// Filter compilation itself is total and contributes no variants here;
/// these cover the request validation the surrounding caller performs.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The request did not name a database.
    #[error("Database name is required")]
    MissingDatabase,
    /// The request did not name a collection.
    #[error("Collection name is required")]
    MissingCollection,
    /// The operation writes documents but the request carried no document body.
    #[error("Operation {0} requires a document body")]
    MissingDocument(String),
    /// The schema sample was not syntactically valid JSON.
    #[error("Invalid schema sample: {0}")]
    InvalidSample(#[from] SerdeJsonError),
}

/// A specialized `Result` type for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;
