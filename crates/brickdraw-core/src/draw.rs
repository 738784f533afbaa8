//! Visual definitions for connection rendering.
//!
//! - [`StrokeDefinition`] and friends describe how a connection line is drawn.
//! - [`ArrowHead`] computes the direction marker drawn on every completed
//!   segment of a connection path.

mod arrow;
mod stroke;

pub use arrow::{ARROW_HALF_ANGLE, ARROW_LENGTH, ArrowHead};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
