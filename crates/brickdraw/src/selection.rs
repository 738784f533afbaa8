//! Selection state and the property-panel summary derived from it.

use indexmap::IndexSet;

use brickdraw_core::{
    color::Color,
    draw::StrokeStyle,
    geometry::Point,
    identifier::Iri,
    vocab::Relationship,
};

use crate::{
    reference::ExternalReference,
    scene::{ConnectionId, EntityId, JointId, SceneGraph, SceneItem},
};

/// Called once for every change of the selection.
pub type SelectionObserver = Box<dyn FnMut(&Selection)>;

/// An ordered set of selected scene items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: IndexSet<SceneItem>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: SceneItem) -> bool {
        self.items.contains(&item)
    }

    /// Iterates over the items in selection order.
    pub fn iter(&self) -> impl Iterator<Item = SceneItem> + '_ {
        self.items.iter().copied()
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.iter().filter_map(|item| match item {
            SceneItem::Entity(id) => Some(id),
            _ => None,
        })
    }

    pub fn connections(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.iter().filter_map(|item| match item {
            SceneItem::Connection(id) => Some(id),
            _ => None,
        })
    }

    pub fn joints(&self) -> impl Iterator<Item = JointId> + '_ {
        self.iter().filter_map(|item| match item {
            SceneItem::Joint(id) => Some(id),
            _ => None,
        })
    }

    pub(crate) fn from_items(items: impl IntoIterator<Item = SceneItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }
}

impl FromIterator<SceneItem> for Selection {
    fn from_iter<I: IntoIterator<Item = SceneItem>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

/// Details of a single selected item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemDetail {
    Entity {
        iri: Iri,
        type_iri: Iri,
        label: String,
        position: Point,
        rotation: f32,
        reference: Option<ExternalReference>,
    },
    Connection {
        iri: Iri,
        source: Iri,
        target: Iri,
        relationship: Relationship,
        color: Color,
        style: StrokeStyle,
        width: f32,
        joints: usize,
    },
    Joint {
        connection: ConnectionId,
        position: Point,
    },
}

/// The property-panel view of the current selection.
///
/// Shared values are only reported when every selected item of the relevant
/// kind agrees on them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSummary {
    pub entities: usize,
    pub connections: usize,
    pub joints: usize,
    /// The label shared by all selected entities.
    pub label: Option<String>,
    /// The relationship shared by all selected connections.
    pub relationship: Option<Relationship>,
    /// Set when exactly one item is selected.
    pub detail: Option<ItemDetail>,
}

impl SelectionSummary {
    /// Summarizes `selection` against the current scene.
    pub fn new(scene: &SceneGraph, selection: &Selection) -> Self {
        let entities: Vec<_> = selection
            .entities()
            .filter_map(|id| scene.entity(id))
            .collect();
        let connections: Vec<_> = selection
            .connections()
            .filter_map(|id| scene.connection(id))
            .collect();
        let joints = selection
            .joints()
            .filter(|id| scene.joint(*id).is_some())
            .count();

        let label = shared(entities.iter().map(|entity| entity.label().to_string()));
        let relationship = shared(connections.iter().map(|connection| connection.relationship()));

        let detail = if selection.len() == 1 {
            selection.iter().next().and_then(|item| detail(scene, item))
        } else {
            None
        };

        Self {
            entities: entities.len(),
            connections: connections.len(),
            joints,
            label,
            relationship,
            detail,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entities == 0 && self.connections == 0 && self.joints == 0
    }
}

fn shared<T: PartialEq>(mut values: impl Iterator<Item = T>) -> Option<T> {
    let first = values.next()?;
    values.all(|value| value == first).then_some(first)
}

fn detail(scene: &SceneGraph, item: SceneItem) -> Option<ItemDetail> {
    match item {
        SceneItem::Entity(id) => {
            let entity = scene.entity(id)?;
            Some(ItemDetail::Entity {
                iri: entity.iri(),
                type_iri: entity.entity_type().iri(),
                label: entity.label().to_string(),
                position: entity.position(),
                rotation: entity.rotation(),
                reference: entity.reference().cloned(),
            })
        }
        SceneItem::Connection(id) => {
            let connection = scene.connection(id)?;
            let source = scene.entity(connection.source())?.iri();
            let target = scene.entity(connection.target()?)?.iri();
            let stroke = connection.stroke();
            Some(ItemDetail::Connection {
                iri: connection.iri(),
                source,
                target,
                relationship: connection.relationship(),
                color: stroke.color(),
                style: stroke.style(),
                width: stroke.width(),
                joints: connection.joints().len(),
            })
        }
        SceneItem::Joint(id) => {
            let (connection, joint) = scene.joint(id)?;
            Some(ItemDetail::Joint {
                connection,
                position: joint.position(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use brickdraw_core::{catalog::EntityLibrary, draw::StrokeDefinition, vocab::BRICK};

    use super::*;
    use crate::config::SceneSettings;

    #[test]
    fn test_selection_filters_by_kind() {
        let selection: Selection = [
            SceneItem::Entity(EntityId(1)),
            SceneItem::Connection(ConnectionId(2)),
            SceneItem::Entity(EntityId(1)),
            SceneItem::Joint(JointId(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(selection.len(), 3);
        assert_eq!(selection.entities().collect::<Vec<_>>(), vec![EntityId(1)]);
        assert_eq!(
            selection.connections().collect::<Vec<_>>(),
            vec![ConnectionId(2)]
        );
        assert_eq!(selection.joints().collect::<Vec<_>>(), vec![JointId(3)]);
    }

    #[test]
    fn test_summary() {
        let library = EntityLibrary::standard();
        let mut scene = SceneGraph::new(SceneSettings::default());
        let valve = scene
            .place_entity(&library, BRICK.iri("Valve"), Point::new(100.0, 100.0))
            .unwrap();
        let pump = scene
            .place_entity(&library, BRICK.iri("Pump"), Point::new(200.0, 100.0))
            .unwrap();
        scene.set_label(valve, "V-1");
        scene.set_label(pump, "V-1");
        let connection = scene
            .connect(valve, pump, Relationship::Feeds, StrokeDefinition::default(), None)
            .unwrap();

        let both = Selection::from_items([valve.into(), pump.into()]);
        let summary = SelectionSummary::new(&scene, &both);
        assert_eq!(summary.entities, 2);
        assert_eq!(summary.label.as_deref(), Some("V-1"));
        assert_eq!(summary.detail, None);

        scene.set_label(pump, "P-1");
        assert_eq!(SelectionSummary::new(&scene, &both).label, None);

        let single = Selection::from_items([connection.into()]);
        let summary = SelectionSummary::new(&scene, &single);
        assert_eq!(summary.relationship, Some(Relationship::Feeds));
        match summary.detail {
            Some(ItemDetail::Connection {
                source, target, ..
            }) => {
                assert_eq!(source, scene.entity(valve).unwrap().iri());
                assert_eq!(target, scene.entity(pump).unwrap().iri());
            }
            other => panic!("unexpected detail: {other:?}"),
        }

        assert!(SelectionSummary::new(&scene, &Selection::new()).is_empty());
    }
}
