//! Error types for graph document I/O.

use thiserror::Error;

/// Errors raised while reading or writing Turtle documents.
#[derive(Debug, Error)]
pub enum RdfError {
    #[error("Turtle syntax error: {0}")]
    Turtle(String),

    #[error("unsupported RDF term in {position}: {term}")]
    UnsupportedTerm { position: &'static str, term: String },

    #[error("Turtle serialization failed: {0}")]
    Serialize(String),
}
