//! Placed entity instances and their ports.

use std::rc::Rc;

use brickdraw_core::{
    catalog::EntityType,
    geometry::{Bounds, Point},
    identifier::Iri,
};

use super::ConnectionId;
use crate::reference::ExternalReference;

/// The single attachment anchor of an entity.
///
/// The port sits at the entity type's port offset, relative to the entity's
/// top-left corner before rotation, and lists every connection touching the
/// entity, including a connection still being drawn from it.
#[derive(Debug, Clone)]
pub struct Port {
    offset: Point,
    connections: Vec<ConnectionId>,
}

impl Port {
    fn new(offset: Point) -> Self {
        Self {
            offset,
            connections: Vec::new(),
        }
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    pub(crate) fn attach(&mut self, connection: ConnectionId) {
        if !self.connections.contains(&connection) {
            self.connections.push(connection);
        }
    }

    pub(crate) fn detach(&mut self, connection: ConnectionId) {
        self.connections.retain(|id| *id != connection);
    }
}

/// A placed occurrence of an [`EntityType`].
#[derive(Debug, Clone)]
pub struct EntityInstance {
    iri: Iri,
    entity_type: Rc<EntityType>,
    label: String,
    position: Point,
    rotation: f32,
    reference: Option<ExternalReference>,
    port: Port,
}

impl EntityInstance {
    pub(crate) fn new(iri: Iri, entity_type: Rc<EntityType>, position: Point) -> Self {
        let port = Port::new(entity_type.port_offset());
        Self {
            iri,
            entity_type,
            label: String::new(),
            position,
            rotation: 0.0,
            reference: None,
            port,
        }
    }

    pub fn iri(&self) -> Iri {
        self.iri
    }

    pub fn entity_type(&self) -> &Rc<EntityType> {
        &self.entity_type
    }

    pub fn is_point(&self) -> bool {
        self.entity_type.is_point()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the top-left corner of the unrotated shape.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the rotation in degrees, within `[0, 360)`.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn reference(&self) -> Option<&ExternalReference> {
        self.reference.as_ref()
    }

    pub fn port(&self) -> &Port {
        &self.port
    }

    /// Returns the centre of the shape, which rotation leaves in place.
    pub fn center(&self) -> Point {
        self.position.add_point(self.entity_type.size().center())
    }

    /// Returns the unrotated bounding box.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.entity_type.size())
    }

    /// Returns the scene position of the port, rotated about the shape centre.
    pub fn port_position(&self) -> Point {
        self.port
            .offset
            .rotate_about(self.entity_type.size().center(), self.rotation)
            .add_point(self.position)
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation.rem_euclid(360.0);
    }

    pub(crate) fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub(crate) fn reference_mut(&mut self) -> &mut Option<ExternalReference> {
        &mut self.reference
    }

    pub(crate) fn port_mut(&mut self) -> &mut Port {
        &mut self.port
    }
}
