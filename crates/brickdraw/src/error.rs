//! Error types for Brickdraw operations.
//!
//! This module provides the main error type [`BrickdrawError`] which wraps
//! the error conditions of whole-document commands, and [`ConnectionError`]
//! for rejected connection edits.

use std::io;

use thiserror::Error;

use brickdraw_core::catalog::CatalogError;
use brickdraw_rdf::RdfError;

/// The main error type for Brickdraw operations.
///
/// Problems local to a single record during import are not errors; they are
/// reported as [`ImportWarning`](crate::ImportWarning)s instead.
#[derive(Debug, Error)]
pub enum BrickdrawError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Rdf(#[from] RdfError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Topology extraction failed: {0}")]
    Extract(String),

    #[error("Export error: {0}")]
    Export(String),
}

/// Reasons a connection edit is rejected.
///
/// Whenever completing a draft fails, the draft has already been discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("a connection cannot start and end on the same entity")]
    SelfLoop,

    #[error("a connection needs a target entity")]
    MissingTarget,

    #[error("no connection is being drawn")]
    NoDraft,

    #[error("the entity does not exist in the scene")]
    UnknownEntity,

    #[error("the connection does not exist or is not complete")]
    UnknownConnection,
}
