//! The live scene: placed entities, their ports, and connections.
//!
//! [`SceneGraph`] owns every [`EntityInstance`] and [`ConnectionInstance`]
//! in arenas keyed by small integer handles. Ports and connections refer to
//! each other through those handles, never through owning pointers, so
//! deleting an item only means removing its handle from the few lists that
//! mention it.
//!
//! Placement constraints are enforced here: entities snap so that their
//! centre sits on a grid intersection, and Point entities are additionally
//! pinned to the Point line.

mod connection;
mod entity;

pub use connection::{
    ConnectionInstance, ConnectionState, Joint, infer_relationship, styled_stroke,
};
pub use entity::{EntityInstance, Port};

use std::{collections::HashMap, fmt, rc::Rc};

use indexmap::IndexMap;
use log::debug;
use uuid::Uuid;

use brickdraw_core::{
    catalog::{Catalog, CatalogError, EntityType},
    geometry::{Point, snap_to_grid},
    identifier::Iri,
};

use crate::{config::SceneSettings, reference::ExternalReference};

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

handle!(
    /// Handle of an entity in a [`SceneGraph`].
    EntityId,
    "entity"
);
handle!(
    /// Handle of a connection in a [`SceneGraph`].
    ConnectionId,
    "connection"
);
handle!(
    /// Handle of a routing joint in a [`SceneGraph`].
    JointId,
    "joint"
);

/// Any selectable item of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneItem {
    Entity(EntityId),
    Connection(ConnectionId),
    Joint(JointId),
}

impl From<EntityId> for SceneItem {
    fn from(id: EntityId) -> Self {
        Self::Entity(id)
    }
}

impl From<ConnectionId> for SceneItem {
    fn from(id: ConnectionId) -> Self {
        Self::Connection(id)
    }
}

impl From<JointId> for SceneItem {
    fn from(id: JointId) -> Self {
        Self::Joint(id)
    }
}

/// What a delete actually removed, cascades included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub entities: usize,
    pub connections: usize,
    pub joints: usize,
}

impl DeleteSummary {
    pub fn is_empty(&self) -> bool {
        self.entities == 0 && self.connections == 0 && self.joints == 0
    }
}

/// The mutable in-memory diagram.
#[derive(Debug)]
pub struct SceneGraph {
    settings: SceneSettings,
    entities: IndexMap<EntityId, EntityInstance>,
    connections: IndexMap<ConnectionId, ConnectionInstance>,
    by_iri: HashMap<Iri, EntityId>,
    joint_owner: HashMap<JointId, ConnectionId>,
    draft: Option<ConnectionId>,
    points_visible: bool,
    next_handle: u32,
}

impl SceneGraph {
    /// Creates an empty scene.
    pub fn new(settings: SceneSettings) -> Self {
        Self {
            settings,
            entities: IndexMap::new(),
            connections: IndexMap::new(),
            by_iri: HashMap::new(),
            joint_owner: HashMap::new(),
            draft: None,
            points_visible: true,
            next_handle: 0,
        }
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Removes every item, including a draft in progress.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.connections.clear();
        self.by_iri.clear();
        self.joint_owner.clear();
        self.draft = None;
        debug!("Scene cleared");
    }

    /// Returns the position an entity of `entity_type` takes when moved to `raw`.
    ///
    /// The shape centre snaps to the nearest grid intersection; for Point
    /// types the vertical coordinate is instead pinned so that the centre
    /// lies on the Point line. Pure: nothing in the scene changes.
    pub fn constrained_position(&self, entity_type: &EntityType, raw: Point) -> Point {
        let grid = self.settings.grid_size();
        let half = entity_type.size().center();
        let x = snap_to_grid(raw.x() + half.x(), grid) - half.x();
        let y = if entity_type.is_point() {
            self.settings.point_line_height() - half.y()
        } else {
            snap_to_grid(raw.y() + half.y(), grid) - half.y()
        };
        Point::new(x, y)
    }

    /// Places a new entity of type `type_iri` centred on `drop`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown types; the scene is
    /// left unchanged.
    pub fn place_entity(
        &mut self,
        catalog: &dyn Catalog,
        type_iri: Iri,
        drop: Point,
    ) -> Result<EntityId, CatalogError> {
        let entity_type = catalog.lookup(type_iri)?;
        let top_left = drop.sub_point(entity_type.size().center());
        let iri = self.fresh_instance_iri();
        Ok(self.insert_entity(entity_type, iri, top_left))
    }

    /// Adds an entity under a known IRI, constraining `raw` like a move.
    ///
    /// Returns `None` if an entity with this IRI already exists.
    pub fn add_entity(
        &mut self,
        entity_type: Rc<EntityType>,
        iri: Iri,
        raw: Point,
    ) -> Option<EntityId> {
        if self.by_iri.contains_key(&iri) {
            return None;
        }
        Some(self.insert_entity(entity_type, iri, raw))
    }

    /// Moves an entity, returning the position it actually took.
    ///
    /// Attached connections are re-routed to follow the port.
    pub fn move_entity(&mut self, id: EntityId, raw: Point) -> Option<Point> {
        let entity_type = Rc::clone(self.entities.get(&id)?.entity_type());
        let position = self.constrained_position(&entity_type, raw);
        let entity = self.entities.get_mut(&id)?;
        entity.set_position(position);
        self.reroute_attached(id);
        Some(position)
    }

    /// Rotates an entity by `delta` degrees, returning the new angle in `[0, 360)`.
    pub fn rotate_entity(&mut self, id: EntityId, delta: f32) -> Option<f32> {
        let entity = self.entities.get_mut(&id)?;
        entity.set_rotation(entity.rotation() + delta);
        let rotation = entity.rotation();
        self.reroute_attached(id);
        debug!(entity:% = id, rotation = rotation; "Entity rotated");
        Some(rotation)
    }

    /// Sets an entity's label. Returns `false` for unknown entities.
    pub fn set_label(&mut self, id: EntityId, label: &str) -> bool {
        match self.entities.get_mut(&id) {
            Some(entity) => {
                entity.set_label(label);
                true
            }
            None => false,
        }
    }

    /// Returns the reference slot of a Point entity.
    ///
    /// Non-Point entities have no slot and yield `None`.
    pub fn reference_slot(&mut self, id: EntityId) -> Option<&mut Option<ExternalReference>> {
        self.entities
            .get_mut(&id)
            .filter(|entity| entity.is_point())
            .map(EntityInstance::reference_mut)
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityInstance> {
        self.entities.get(&id)
    }

    /// Iterates over entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &EntityInstance)> {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entity_by_iri(&self, iri: Iri) -> Option<EntityId> {
        self.by_iri.get(&iri).copied()
    }

    /// Returns the topmost visible entity whose box contains `at`.
    ///
    /// Later entities are drawn above earlier ones and win ties.
    pub fn entity_at(&self, at: Point) -> Option<EntityId> {
        self.entities
            .iter()
            .rev()
            .find(|(id, entity)| {
                entity.bounds().contains(at) && self.is_visible(SceneItem::Entity(**id))
            })
            .map(|(id, _)| *id)
    }

    /// Returns the scene position of an entity's port.
    pub fn port_position(&self, id: EntityId) -> Option<Point> {
        self.entities.get(&id).map(EntityInstance::port_position)
    }

    /// Returns true if `item` still exists.
    pub fn contains(&self, item: SceneItem) -> bool {
        match item {
            SceneItem::Entity(id) => self.entities.contains_key(&id),
            SceneItem::Connection(id) => self.connections.contains_key(&id),
            SceneItem::Joint(id) => self.joint_owner.contains_key(&id),
        }
    }

    /// Shows or hides Point entities and point relations.
    ///
    /// Only rendering visibility changes; no item is created or removed.
    pub fn set_points_visible(&mut self, visible: bool) {
        self.points_visible = visible;
        debug!(visible = visible; "Point visibility changed");
    }

    pub fn points_visible(&self) -> bool {
        self.points_visible
    }

    /// Returns whether `item` is currently drawn.
    ///
    /// Point entities and `hasPoint`/`isPointOf` connections, with their
    /// joints and arrows, follow the Point visibility flag.
    pub fn is_visible(&self, item: SceneItem) -> bool {
        match item {
            SceneItem::Entity(id) => self
                .entities
                .get(&id)
                .is_some_and(|entity| self.points_visible || !entity.is_point()),
            SceneItem::Connection(id) => self.connections.get(&id).is_some_and(|connection| {
                self.points_visible || !connection.relationship().is_point_relation()
            }),
            SceneItem::Joint(id) => self
                .joint_owner
                .get(&id)
                .is_some_and(|owner| self.is_visible(SceneItem::Connection(*owner))),
        }
    }

    /// Deletes a mixed set of items.
    ///
    /// Deleting an entity removes every connection attached to its port;
    /// deleting a connection removes its joints. Items that are missing,
    /// listed twice, or already removed by an earlier cascade are skipped.
    pub fn delete_items(&mut self, items: &[SceneItem]) -> DeleteSummary {
        let mut summary = DeleteSummary::default();

        for item in items {
            if let SceneItem::Joint(id) = item {
                summary.joints += usize::from(self.remove_joint(*id));
            }
        }
        for item in items {
            if let SceneItem::Connection(id) = item {
                if let Some(joints) = self.remove_connection(*id) {
                    summary.connections += 1;
                    summary.joints += joints;
                }
            }
        }
        for item in items {
            if let SceneItem::Entity(id) = item {
                let Some(entity) = self.entities.get(id) else {
                    continue;
                };
                let attached = entity.port().connections().to_vec();
                for connection in attached {
                    if let Some(joints) = self.remove_connection(connection) {
                        summary.connections += 1;
                        summary.joints += joints;
                    }
                }
                if let Some(entity) = self.entities.shift_remove(id) {
                    self.by_iri.remove(&entity.iri());
                    summary.entities += 1;
                }
            }
        }

        debug!(
            entities = summary.entities,
            connections = summary.connections,
            joints = summary.joints;
            "Deleted scene items"
        );
        summary
    }

    fn insert_entity(&mut self, entity_type: Rc<EntityType>, iri: Iri, raw: Point) -> EntityId {
        let position = self.constrained_position(&entity_type, raw);
        let id = EntityId(self.next_handle());
        debug!(entity:% = id, iri:% = iri, entity_type:% = entity_type.iri(); "Entity placed");
        self.entities
            .insert(id, EntityInstance::new(iri, entity_type, position));
        self.by_iri.insert(iri, id);
        id
    }

    pub(crate) fn fresh_instance_iri(&self) -> Iri {
        Iri::new(&format!("{}{}", self.settings.instance_base(), Uuid::new_v4()))
    }

    fn next_handle(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new(SceneSettings::default())
    }
}
