//! Graph documents and Turtle I/O for Brickdraw.
//!
//! A [`GraphDocument`] is the flattened, persistable form of a diagram: a
//! set of [`Triple`]s whose terms are IRIs, blank nodes or literals. It is
//! produced by exporting a scene and consumed when importing one.
//!
//! # Example
//!
//! ```
//! use brickdraw_core::vocab::{self, BRICK};
//! use brickdraw_rdf::{GraphDocument, Term, parse_turtle, write_turtle};
//!
//! let mut doc = GraphDocument::new();
//! let valve = Term::iri("http://example.org/building/instances/v1");
//! doc.insert(valve.clone(), vocab::rdf_type(), BRICK.iri("Valve"));
//!
//! let text = write_turtle(&doc, &vocab::ALL_NAMESPACES).unwrap();
//! let reparsed = parse_turtle(&text).unwrap();
//! assert_eq!(reparsed.len(), 1);
//! ```

mod document;
mod error;
mod term;
mod turtle;

pub use document::GraphDocument;
pub use error::RdfError;
pub use term::{BlankId, Literal, Term, Triple};
pub use turtle::{parse_turtle, write_turtle};
