//! Conversion between the scene and graph documents.
//!
//! [`export_scene`] flattens a [`SceneGraph`](crate::scene::SceneGraph)
//! into a [`GraphDocument`](brickdraw_rdf::GraphDocument): semantic
//! triples for entities and relationships, plus visual records carrying
//! positions, strokes and joints. [`import_document`] reverses the mapping
//! in ordered passes and reports every record it had to skip.

mod export;
mod import;

pub use export::export_scene;
pub use import::{ImportReport, ImportWarning, import_document};
