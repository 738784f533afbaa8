//! Brickdraw Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Brickdraw
//! building-system diagram editor. It includes:
//!
//! - **Identifiers**: String-interned IRIs ([`identifier::Iri`])
//! - **Vocabulary**: Namespaces and relationship kinds ([`vocab`] module)
//! - **Catalog**: Placeable entity types and their port geometry ([`catalog`] module)
//! - **Colors**: Color handling with CSS and RGB support ([`color::Color`])
//! - **Geometry**: Basic geometric types and grid snapping ([`geometry`] module)
//! - **Draw**: Stroke and arrowhead definitions ([`draw`] module)

pub mod catalog;
pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod vocab;
