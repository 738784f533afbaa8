//! Copy and paste of entities together with their internal connections.

use std::{collections::HashMap, rc::Rc};

use log::info;

use brickdraw_core::{
    catalog::EntityType, draw::StrokeDefinition, geometry::Point, vocab::Relationship,
};

use crate::{
    scene::{EntityId, SceneGraph, SceneItem},
    selection::Selection,
};

#[derive(Debug, Clone)]
struct CopiedEntity {
    original: EntityId,
    entity_type: Rc<EntityType>,
    position: Point,
    rotation: f32,
}

#[derive(Debug, Clone)]
struct CopiedConnection {
    source: EntityId,
    target: EntityId,
    relationship: Relationship,
    stroke: StrokeDefinition,
    joints: Vec<Point>,
}

/// A snapshot of copied entities and the connections between them.
///
/// Only connections whose two endpoints are both copied are kept; a
/// connection leaving the copied set is dropped entirely.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    entities: Vec<CopiedEntity>,
    connections: Vec<CopiedConnection>,
}

impl Clipboard {
    /// Captures the selected entities and every complete connection between them.
    ///
    /// Selected connections and joints are not copied on their own.
    pub fn capture(scene: &SceneGraph, selection: &Selection) -> Self {
        let entities: Vec<CopiedEntity> = selection
            .entities()
            .filter_map(|id| {
                let entity = scene.entity(id)?;
                Some(CopiedEntity {
                    original: id,
                    entity_type: Rc::clone(entity.entity_type()),
                    position: entity.position(),
                    rotation: entity.rotation(),
                })
            })
            .collect();

        let copied = |id: EntityId| entities.iter().any(|entity| entity.original == id);
        let connections = scene
            .connections()
            .filter_map(|(_, connection)| {
                let target = connection.target()?;
                (copied(connection.source()) && copied(target)).then(|| CopiedConnection {
                    source: connection.source(),
                    target,
                    relationship: connection.relationship(),
                    stroke: *connection.stroke(),
                    joints: connection
                        .joints()
                        .iter()
                        .map(|joint| joint.position())
                        .collect(),
                })
            })
            .collect();

        Self {
            entities,
            connections,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Recreates the copied items shifted by `offset` and returns them.
    ///
    /// Positions go through the usual placement constraint, so pasted
    /// Points land back on the Point line. Connections keep their
    /// relationship and stroke; their joints are shifted by the same offset.
    pub fn paste_into(&self, scene: &mut SceneGraph, offset: Point) -> Vec<SceneItem> {
        let mut created = Vec::new();
        let mut mapping: HashMap<EntityId, EntityId> = HashMap::new();

        for entity in &self.entities {
            let iri = scene.fresh_instance_iri();
            let Some(id) = scene.add_entity(
                Rc::clone(&entity.entity_type),
                iri,
                entity.position.add_point(offset),
            ) else {
                continue;
            };
            scene.rotate_entity(id, entity.rotation);
            mapping.insert(entity.original, id);
            created.push(SceneItem::Entity(id));
        }

        let mut joints = Vec::new();
        for connection in &self.connections {
            let (Some(&source), Some(&target)) = (
                mapping.get(&connection.source),
                mapping.get(&connection.target),
            ) else {
                continue;
            };
            let Ok(id) = scene.connect(
                source,
                target,
                connection.relationship,
                connection.stroke,
                None,
            ) else {
                continue;
            };
            created.push(SceneItem::Connection(id));
            for position in &connection.joints {
                if let Ok(joint) = scene.add_joint(id, position.add_point(offset)) {
                    joints.push(SceneItem::Joint(joint));
                }
            }
        }
        created.extend(joints);

        info!(
            entities = mapping.len(),
            connections = created
                .iter()
                .filter(|item| matches!(item, SceneItem::Connection(_)))
                .count();
            "Pasted clipboard"
        );
        created
    }
}
