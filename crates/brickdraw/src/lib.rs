//! Brickdraw - an editing engine for Brick building-system diagrams.
//!
//! Entities from the Brick and RealEstateCore vocabularies are placed on a
//! grid-snapped canvas and joined by typed relationships. The diagram is
//! stored as an RDF graph: every entity and relationship is written as a
//! plain semantic triple, with positions, strokes and routing joints kept
//! alongside as visual records.
//!
//! The [`Editor`] is the session-level entry point. The lower layers are
//! usable on their own: [`scene::SceneGraph`] holds the live diagram,
//! [`sync`] converts it to and from [`GraphDocument`]s, and [`render`]
//! draws an SVG snapshot.

pub mod clipboard;
pub mod config;
pub mod reference;
pub mod render;
pub mod scene;
pub mod selection;
pub mod sync;
pub mod topology;

mod editor;
mod error;

pub use brickdraw_core::{catalog, color, draw, geometry, identifier, vocab};
pub use brickdraw_rdf::GraphDocument;

pub use editor::{EditOutcome, Editor};
pub use error::{BrickdrawError, ConnectionError};
pub use sync::{ImportReport, ImportWarning};
