//! Connections between entity ports and the drawing lifecycle.
//!
//! A connection is created in the drafting state from a source entity,
//! follows the pointer while drafting, and becomes complete when it is
//! dropped on a different entity. Only one draft exists at a time.

use std::{iter, rc::Rc};

use log::{debug, trace};
use uuid::Uuid;

use brickdraw_core::{
    catalog::EntityType,
    color::Color,
    draw::{ArrowHead, StrokeDefinition, StrokeStyle},
    geometry::Point,
    identifier::Iri,
    vocab::Relationship,
};

use super::{ConnectionId, EntityId, JointId, SceneGraph};
use crate::error::ConnectionError;

/// Lifecycle state of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Only the source is known; the free end follows the pointer.
    Drafting,
    Complete,
}

/// A grid-snapped routing waypoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    id: JointId,
    position: Point,
}

impl Joint {
    pub fn id(&self) -> JointId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

/// A directed relationship drawn between two ports.
#[derive(Debug, Clone)]
pub struct ConnectionInstance {
    iri: Iri,
    source: EntityId,
    target: Option<EntityId>,
    relationship: Relationship,
    stroke: StrokeDefinition,
    joints: Vec<Joint>,
    cursor: Point,
    path: Vec<Point>,
    arrows: Vec<ArrowHead>,
}

impl ConnectionInstance {
    pub fn iri(&self) -> Iri {
        self.iri
    }

    pub fn source(&self) -> EntityId {
        self.source
    }

    /// Returns the target, or `None` while drafting.
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn state(&self) -> ConnectionState {
        if self.target.is_some() {
            ConnectionState::Complete
        } else {
            ConnectionState::Drafting
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == ConnectionState::Complete
    }

    pub fn relationship(&self) -> Relationship {
        self.relationship
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    /// Returns the joints in path order, source to target.
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Returns the rendered polyline: source port, joints, then the target
    /// port or the cursor.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Returns one arrowhead per completed segment of the path.
    pub fn arrows(&self) -> &[ArrowHead] {
        &self.arrows
    }

    /// Recomputes the path and arrows between `start` and `end`.
    ///
    /// The last segment of a draft ends at the cursor and gets no arrow.
    fn route(&mut self, start: Point, end: Point) {
        self.path.clear();
        self.path.push(start);
        self.path.extend(self.joints.iter().map(Joint::position));
        self.path.push(end);

        let segments = self.path.len() - 1;
        let completed = match self.state() {
            ConnectionState::Complete => segments,
            ConnectionState::Drafting => segments - 1,
        };
        self.arrows.clear();
        self.arrows.extend(
            self.path
                .windows(2)
                .take(completed)
                .map(|pair| ArrowHead::on_segment(pair[0], pair[1])),
        );
    }
}

/// Picks the relationship for a newly completed connection.
///
/// A target Point yields `isPointOf` and is checked first, so a connection
/// between two Points is `isPointOf` too; a source Point yields `hasPoint`.
pub fn infer_relationship(source: &EntityType, target: &EntityType) -> Relationship {
    if target.is_point() {
        Relationship::IsPointOf
    } else if source.is_point() {
        Relationship::HasPoint
    } else {
        Relationship::default()
    }
}

/// Returns `stroke` with the line style implied by `relationship`.
///
/// Point relations are dashed, everything else is solid; color, width, cap
/// and join are kept.
pub fn styled_stroke(stroke: StrokeDefinition, relationship: Relationship) -> StrokeDefinition {
    let style = if relationship.is_point_relation() {
        StrokeStyle::Dashed
    } else {
        StrokeStyle::Solid
    };
    stroke.with_style(style)
}

impl SceneGraph {
    /// Starts drawing a connection from `source`.
    ///
    /// A draft already in progress is discarded first.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::UnknownEntity`] if `source` does not exist.
    pub fn begin_connection(&mut self, source: EntityId) -> Result<ConnectionId, ConnectionError> {
        let start = self
            .port_position(source)
            .ok_or(ConnectionError::UnknownEntity)?;
        if let Some(previous) = self.draft.take() {
            debug!(connection:% = previous; "Discarding unfinished connection");
            self.remove_connection(previous);
        }

        let id = ConnectionId(self.next_handle());
        let mut connection = ConnectionInstance {
            iri: self.fresh_connection_iri(),
            source,
            target: None,
            relationship: Relationship::default(),
            stroke: self.settings.connection_stroke(),
            joints: Vec::new(),
            cursor: start,
            path: Vec::new(),
            arrows: Vec::new(),
        };
        connection.route(start, start);
        self.connections.insert(id, connection);
        if let Some(entity) = self.entities.get_mut(&source) {
            entity.port_mut().attach(id);
        }
        self.draft = Some(id);
        debug!(connection:% = id, source:% = source; "Connection draft started");
        Ok(id)
    }

    /// Moves the free end of the draft to `cursor`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::NoDraft`] when nothing is being drawn.
    pub fn update_draft(&mut self, cursor: Point) -> Result<(), ConnectionError> {
        let id = self.draft.ok_or(ConnectionError::NoDraft)?;
        let connection = self
            .connections
            .get_mut(&id)
            .ok_or(ConnectionError::NoDraft)?;
        connection.cursor = cursor;
        trace!(connection:% = id, x = cursor.x(), y = cursor.y(); "Draft updated");
        self.reroute(id);
        Ok(())
    }

    /// Finishes the draft on `target`.
    ///
    /// On success the relationship is inferred from the endpoint types and
    /// the stroke restyled to match. On any error the draft is discarded.
    ///
    /// # Errors
    ///
    /// - [`ConnectionError::NoDraft`] when nothing is being drawn.
    /// - [`ConnectionError::MissingTarget`] when `target` is `None`.
    /// - [`ConnectionError::UnknownEntity`] when `target` does not exist.
    /// - [`ConnectionError::SelfLoop`] when `target` is the source.
    pub fn complete_connection(
        &mut self,
        target: Option<EntityId>,
    ) -> Result<ConnectionId, ConnectionError> {
        let id = self.draft.take().ok_or(ConnectionError::NoDraft)?;
        let Some(source) = self.connections.get(&id).map(ConnectionInstance::source) else {
            return Err(ConnectionError::NoDraft);
        };

        let relationship = match self.check_endpoints(source, target) {
            Ok((source_type, target_type)) => infer_relationship(&source_type, &target_type),
            Err(err) => {
                debug!(connection:% = id, err:% = err; "Connection draft rejected");
                self.remove_connection(id);
                return Err(err);
            }
        };
        let target = target.ok_or(ConnectionError::MissingTarget)?;

        if let Some(connection) = self.connections.get_mut(&id) {
            connection.target = Some(target);
            connection.relationship = relationship;
            connection.stroke = styled_stroke(connection.stroke, relationship);
        }
        if let Some(entity) = self.entities.get_mut(&target) {
            entity.port_mut().attach(id);
        }
        self.reroute(id);
        debug!(
            connection:% = id,
            source:% = source,
            target:% = target,
            relationship:% = relationship;
            "Connection completed"
        );
        Ok(id)
    }

    /// Discards the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::NoDraft`] when nothing is being drawn.
    pub fn cancel_connection(&mut self) -> Result<(), ConnectionError> {
        let id = self.draft.take().ok_or(ConnectionError::NoDraft)?;
        self.remove_connection(id);
        debug!(connection:% = id; "Connection draft cancelled");
        Ok(())
    }

    /// Returns the connection being drawn, if any.
    pub fn draft(&self) -> Option<ConnectionId> {
        self.draft
    }

    /// Creates a complete connection in one step.
    ///
    /// Used where the relationship and stroke are already known, such as
    /// paste and import; nothing is inferred. `iri` keeps a persisted
    /// identity, otherwise a fresh one is generated.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::UnknownEntity`] or
    /// [`ConnectionError::SelfLoop`] for invalid endpoints.
    pub fn connect(
        &mut self,
        source: EntityId,
        target: EntityId,
        relationship: Relationship,
        stroke: StrokeDefinition,
        iri: Option<Iri>,
    ) -> Result<ConnectionId, ConnectionError> {
        self.check_endpoints(source, Some(target))?;

        let id = ConnectionId(self.next_handle());
        let connection = ConnectionInstance {
            iri: iri.unwrap_or_else(|| self.fresh_connection_iri()),
            source,
            target: Some(target),
            relationship,
            stroke,
            joints: Vec::new(),
            cursor: Point::default(),
            path: Vec::new(),
            arrows: Vec::new(),
        };
        self.connections.insert(id, connection);
        for endpoint in [source, target] {
            if let Some(entity) = self.entities.get_mut(&endpoint) {
                entity.port_mut().attach(id);
            }
        }
        self.reroute(id);
        debug!(
            connection:% = id,
            source:% = source,
            target:% = target,
            relationship:% = relationship;
            "Connection created"
        );
        Ok(id)
    }

    /// Appends a grid-snapped joint to a connection's path.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::UnknownConnection`] if `id` does not exist.
    pub fn add_joint(&mut self, id: ConnectionId, position: Point) -> Result<JointId, ConnectionError> {
        if !self.connections.contains_key(&id) {
            return Err(ConnectionError::UnknownConnection);
        }
        let joint = JointId(self.next_handle());
        let position = position.snap_to_grid(self.settings.grid_size());
        if let Some(connection) = self.connections.get_mut(&id) {
            connection.joints.push(Joint {
                id: joint,
                position,
            });
        }
        self.joint_owner.insert(joint, id);
        self.reroute(id);
        debug!(connection:% = id, joint:% = joint; "Joint added");
        Ok(joint)
    }

    /// Moves a joint, re-snapping it to the grid. Returns the snapped position.
    pub fn move_joint(&mut self, joint: JointId, position: Point) -> Option<Point> {
        let owner = *self.joint_owner.get(&joint)?;
        let position = position.snap_to_grid(self.settings.grid_size());
        let connection = self.connections.get_mut(&owner)?;
        let slot = connection.joints.iter_mut().find(|j| j.id == joint)?;
        slot.position = position;
        self.reroute(owner);
        Some(position)
    }

    /// Returns the connection owning `joint` and the joint itself.
    pub fn joint(&self, joint: JointId) -> Option<(ConnectionId, &Joint)> {
        let owner = *self.joint_owner.get(&joint)?;
        let found = self
            .connections
            .get(&owner)?
            .joints
            .iter()
            .find(|j| j.id == joint)?;
        Some((owner, found))
    }

    /// Changes the relationship of a complete connection and restyles it.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::UnknownConnection`] for missing connections
    /// and drafts.
    pub fn set_relationship(
        &mut self,
        id: ConnectionId,
        relationship: Relationship,
    ) -> Result<(), ConnectionError> {
        let connection = self.complete_mut(id)?;
        connection.relationship = relationship;
        connection.stroke = styled_stroke(connection.stroke, relationship);
        debug!(connection:% = id, relationship:% = relationship; "Relationship changed");
        Ok(())
    }

    /// Swaps source and target of a complete connection.
    ///
    /// The relationship is kept, so `a feeds b` becomes `b feeds a`. Joints
    /// are reversed to keep the drawn route.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::UnknownConnection`] for missing connections
    /// and drafts.
    pub fn reverse_connection(&mut self, id: ConnectionId) -> Result<(), ConnectionError> {
        let connection = self.complete_mut(id)?;
        if let Some(target) = connection.target {
            connection.target = Some(connection.source);
            connection.source = target;
        }
        connection.joints.reverse();
        self.reroute(id);
        debug!(connection:% = id; "Connection reversed");
        Ok(())
    }

    /// Changes the line color of a complete connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::UnknownConnection`] for missing connections
    /// and drafts.
    pub fn set_connection_color(
        &mut self,
        id: ConnectionId,
        color: Color,
    ) -> Result<(), ConnectionError> {
        self.complete_mut(id)?.stroke.set_color(color);
        Ok(())
    }

    /// Replaces the whole stroke of a complete connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::UnknownConnection`] for missing connections
    /// and drafts.
    pub fn set_connection_stroke(
        &mut self,
        id: ConnectionId,
        stroke: StrokeDefinition,
    ) -> Result<(), ConnectionError> {
        self.complete_mut(id)?.stroke = stroke;
        Ok(())
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&ConnectionInstance> {
        self.connections.get(&id)
    }

    /// Iterates over complete connections in creation order.
    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &ConnectionInstance)> {
        self.connections
            .iter()
            .filter(|(_, connection)| connection.is_complete())
            .map(|(id, connection)| (*id, connection))
    }

    /// Returns the number of complete connections.
    pub fn connection_count(&self) -> usize {
        self.connections().count()
    }

    /// Removes a connection, its joints and its port registrations.
    ///
    /// Returns the number of joints removed with it, or `None` if the
    /// connection did not exist.
    pub(super) fn remove_connection(&mut self, id: ConnectionId) -> Option<usize> {
        let connection = self.connections.shift_remove(&id)?;
        for endpoint in iter::once(connection.source).chain(connection.target) {
            if let Some(entity) = self.entities.get_mut(&endpoint) {
                entity.port_mut().detach(id);
            }
        }
        for joint in &connection.joints {
            self.joint_owner.remove(&joint.id);
        }
        if self.draft == Some(id) {
            self.draft = None;
        }
        Some(connection.joints.len())
    }

    /// Detaches a joint from its connection. Returns `false` if it did not exist.
    pub(super) fn remove_joint(&mut self, joint: JointId) -> bool {
        let Some(owner) = self.joint_owner.remove(&joint) else {
            return false;
        };
        if let Some(connection) = self.connections.get_mut(&owner) {
            connection.joints.retain(|j| j.id != joint);
        }
        self.reroute(owner);
        true
    }

    /// Re-routes every connection attached to `entity`.
    pub(super) fn reroute_attached(&mut self, entity: EntityId) {
        let attached = self
            .entities
            .get(&entity)
            .map(|entity| entity.port().connections().to_vec())
            .unwrap_or_default();
        for connection in attached {
            self.reroute(connection);
        }
    }

    fn reroute(&mut self, id: ConnectionId) {
        let Some(connection) = self.connections.get(&id) else {
            return;
        };
        let start = self.port_position(connection.source).unwrap_or_default();
        let end = connection
            .target
            .and_then(|target| self.port_position(target))
            .unwrap_or(connection.cursor);
        if let Some(connection) = self.connections.get_mut(&id) {
            connection.route(start, end);
        }
    }

    fn complete_mut(&mut self, id: ConnectionId) -> Result<&mut ConnectionInstance, ConnectionError> {
        self.connections
            .get_mut(&id)
            .filter(|connection| connection.is_complete())
            .ok_or(ConnectionError::UnknownConnection)
    }

    fn check_endpoints(
        &self,
        source: EntityId,
        target: Option<EntityId>,
    ) -> Result<(Rc<EntityType>, Rc<EntityType>), ConnectionError> {
        let target = target.ok_or(ConnectionError::MissingTarget)?;
        if target == source {
            return Err(ConnectionError::SelfLoop);
        }
        let source = self
            .entities
            .get(&source)
            .ok_or(ConnectionError::UnknownEntity)?;
        let target = self
            .entities
            .get(&target)
            .ok_or(ConnectionError::UnknownEntity)?;
        Ok((
            Rc::clone(source.entity_type()),
            Rc::clone(target.entity_type()),
        ))
    }

    fn fresh_connection_iri(&self) -> Iri {
        Iri::new(&format!(
            "{}Connection_{}",
            self.settings.connection_base(),
            Uuid::new_v4().simple()
        ))
    }
}

#[cfg(test)]
mod tests {
    use brickdraw_core::{
        catalog::{Catalog, EntityLibrary},
        color::Rgb8,
        vocab::BRICK,
    };

    use super::*;
    use crate::{config::SceneSettings, scene::SceneItem};

    struct Fixture {
        scene: SceneGraph,
        valve: EntityId,
        pump: EntityId,
        sensor: EntityId,
    }

    fn fixture() -> Fixture {
        let library = EntityLibrary::standard();
        let mut scene = SceneGraph::new(SceneSettings::default());
        let valve = scene
            .place_entity(&library, BRICK.iri("Valve"), Point::new(100.0, 100.0))
            .unwrap();
        let pump = scene
            .place_entity(&library, BRICK.iri("Pump"), Point::new(300.0, 100.0))
            .unwrap();
        let sensor = scene
            .place_entity(
                &library,
                BRICK.iri("Temperature_Sensor"),
                Point::new(100.0, 0.0),
            )
            .unwrap();
        Fixture {
            scene,
            valve,
            pump,
            sensor,
        }
    }

    #[test]
    fn test_draft_then_complete() {
        let Fixture {
            mut scene,
            valve,
            pump,
            ..
        } = fixture();

        let id = scene.begin_connection(valve).unwrap();
        assert_eq!(scene.draft(), Some(id));
        assert_eq!(scene.connection(id).unwrap().state(), ConnectionState::Drafting);
        assert_eq!(scene.connection_count(), 0);

        scene.update_draft(Point::new(200.0, 300.0)).unwrap();
        let draft = scene.connection(id).unwrap();
        assert_eq!(draft.path().last(), Some(&Point::new(200.0, 300.0)));
        assert!(draft.arrows().is_empty());

        assert_eq!(scene.complete_connection(Some(pump)), Ok(id));
        let connection = scene.connection(id).unwrap();
        assert!(connection.is_complete());
        assert_eq!(connection.relationship(), Relationship::Feeds);
        assert_eq!(connection.stroke().style(), StrokeStyle::Solid);
        assert_eq!(connection.arrows().len(), 1);
        assert_eq!(scene.draft(), None);
        assert_eq!(scene.entity(pump).unwrap().port().connections(), &[id]);
        assert_eq!(scene.entity(valve).unwrap().port().connections(), &[id]);
    }

    #[test]
    fn test_point_relationship_inference() {
        let Fixture {
            mut scene,
            valve,
            sensor,
            ..
        } = fixture();

        scene.begin_connection(valve).unwrap();
        let to_point = scene.complete_connection(Some(sensor)).unwrap();
        let connection = scene.connection(to_point).unwrap();
        assert_eq!(connection.relationship(), Relationship::IsPointOf);
        assert_eq!(connection.stroke().style(), StrokeStyle::Dashed);

        scene.begin_connection(sensor).unwrap();
        let from_point = scene.complete_connection(Some(valve)).unwrap();
        assert_eq!(
            scene.connection(from_point).unwrap().relationship(),
            Relationship::HasPoint
        );
    }

    #[test]
    fn test_point_to_point_is_point_of() {
        let library = EntityLibrary::standard();
        let mut scene = SceneGraph::new(SceneSettings::default());
        let first = scene
            .place_entity(&library, BRICK.iri("Point"), Point::new(100.0, 0.0))
            .unwrap();
        let second = scene
            .place_entity(&library, BRICK.iri("Position_Setpoint"), Point::new(200.0, 0.0))
            .unwrap();

        scene.begin_connection(first).unwrap();
        let id = scene.complete_connection(Some(second)).unwrap();
        assert_eq!(
            scene.connection(id).unwrap().relationship(),
            Relationship::IsPointOf
        );
    }

    #[test]
    fn test_invalid_targets_discard_draft() {
        let Fixture {
            mut scene, valve, ..
        } = fixture();

        for (target, expected) in [
            (Some(valve), ConnectionError::SelfLoop),
            (None, ConnectionError::MissingTarget),
            (Some(EntityId(999)), ConnectionError::UnknownEntity),
        ] {
            scene.begin_connection(valve).unwrap();
            assert_eq!(scene.complete_connection(target), Err(expected));
            assert_eq!(scene.draft(), None);
            assert!(scene.entity(valve).unwrap().port().connections().is_empty());
        }
        assert_eq!(scene.complete_connection(Some(valve)), Err(ConnectionError::NoDraft));
    }

    #[test]
    fn test_new_draft_discards_previous() {
        let Fixture {
            mut scene,
            valve,
            pump,
            ..
        } = fixture();

        let first = scene.begin_connection(valve).unwrap();
        let second = scene.begin_connection(pump).unwrap();
        assert!(scene.connection(first).is_none());
        assert_eq!(scene.draft(), Some(second));
        assert!(scene.entity(valve).unwrap().port().connections().is_empty());

        scene.cancel_connection().unwrap();
        assert!(scene.connection(second).is_none());
        assert_eq!(scene.cancel_connection(), Err(ConnectionError::NoDraft));
    }

    #[test]
    fn test_joints_route_and_arrows() {
        let Fixture {
            mut scene,
            valve,
            pump,
            ..
        } = fixture();

        let id = scene.begin_connection(valve).unwrap();
        scene.add_joint(id, Point::new(149.0, 301.0)).unwrap();
        scene.update_draft(Point::new(280.0, 310.0)).unwrap();
        // Source to joint is complete; joint to cursor is live.
        assert_eq!(scene.connection(id).unwrap().arrows().len(), 1);

        scene.complete_connection(Some(pump)).unwrap();
        let second = scene.add_joint(id, Point::new(310.0, 290.0)).unwrap();

        let connection = scene.connection(id).unwrap();
        let joints: Vec<_> = connection.joints().iter().map(Joint::position).collect();
        assert_eq!(joints, vec![Point::new(150.0, 300.0), Point::new(300.0, 300.0)]);
        assert_eq!(connection.path().len(), 4);
        assert_eq!(connection.arrows().len(), 3);

        assert_eq!(
            scene.move_joint(second, Point::new(330.0, 260.0)),
            Some(Point::new(325.0, 250.0))
        );
        assert_eq!(scene.joint(second).map(|(owner, _)| owner), Some(id));
    }

    #[test]
    fn test_connections_follow_moves() {
        let Fixture {
            mut scene,
            valve,
            pump,
            ..
        } = fixture();

        let id = scene
            .connect(valve, pump, Relationship::Feeds, StrokeDefinition::default(), None)
            .unwrap();
        scene.move_entity(pump, Point::new(500.0, 500.0));
        let end = *scene.connection(id).unwrap().path().last().unwrap();
        assert_eq!(end, scene.port_position(pump).unwrap());
    }

    #[test]
    fn test_set_relationship_restyles() {
        let Fixture {
            mut scene,
            valve,
            pump,
            ..
        } = fixture();

        scene.begin_connection(valve).unwrap();
        let id = scene.complete_connection(Some(pump)).unwrap();
        let red = Color::from_rgb8(Rgb8::new(255, 0, 0));
        scene.set_connection_color(id, red).unwrap();

        scene.set_relationship(id, Relationship::HasPoint).unwrap();
        let stroke = *scene.connection(id).unwrap().stroke();
        assert_eq!(stroke.style(), StrokeStyle::Dashed);
        assert_eq!(stroke.color(), red);
        assert_eq!(stroke.width(), 2.0);

        scene.set_relationship(id, Relationship::HasPart).unwrap();
        assert_eq!(
            scene.connection(id).unwrap().stroke().style(),
            StrokeStyle::Solid
        );
    }

    #[test]
    fn test_reverse() {
        let Fixture {
            mut scene,
            valve,
            pump,
            ..
        } = fixture();

        let id = scene
            .connect(valve, pump, Relationship::Feeds, StrokeDefinition::default(), None)
            .unwrap();
        scene.add_joint(id, Point::new(200.0, 50.0)).unwrap();
        scene.add_joint(id, Point::new(250.0, 50.0)).unwrap();

        scene.reverse_connection(id).unwrap();
        let connection = scene.connection(id).unwrap();
        assert_eq!(connection.source(), pump);
        assert_eq!(connection.target(), Some(valve));
        assert_eq!(connection.joints()[0].position(), Point::new(250.0, 50.0));
        assert_eq!(connection.path()[0], scene.port_position(pump).unwrap());
    }

    #[test]
    fn test_draft_is_not_editable_as_complete() {
        let Fixture {
            mut scene, valve, ..
        } = fixture();

        let id = scene.begin_connection(valve).unwrap();
        assert_eq!(
            scene.set_relationship(id, Relationship::HasPart),
            Err(ConnectionError::UnknownConnection)
        );
        assert_eq!(
            scene.reverse_connection(id),
            Err(ConnectionError::UnknownConnection)
        );
        assert_eq!(scene.connections().count(), 0);
    }

    #[test]
    fn test_cascade_delete() {
        let Fixture {
            mut scene,
            valve,
            pump,
            sensor,
        } = fixture();

        let a = scene
            .connect(valve, pump, Relationship::Feeds, StrokeDefinition::default(), None)
            .unwrap();
        scene.add_joint(a, Point::new(200.0, 0.0)).unwrap();
        scene
            .connect(sensor, valve, Relationship::IsPointOf, StrokeDefinition::default(), None)
            .unwrap();
        let other = scene
            .connect(sensor, pump, Relationship::IsPointOf, StrokeDefinition::default(), None)
            .unwrap();

        let summary = scene.delete_items(&[SceneItem::Entity(valve), SceneItem::Connection(a)]);
        assert_eq!(summary.entities, 1);
        assert_eq!(summary.connections, 2);
        assert_eq!(summary.joints, 1);
        assert_eq!(scene.connection_count(), 1);
        assert_eq!(scene.entity(pump).unwrap().port().connections(), &[other]);
        assert_eq!(scene.entity(sensor).unwrap().port().connections(), &[other]);
    }

    #[test]
    fn test_delete_joint_reroutes() {
        let Fixture {
            mut scene,
            valve,
            pump,
            ..
        } = fixture();

        let id = scene
            .connect(valve, pump, Relationship::Feeds, StrokeDefinition::default(), None)
            .unwrap();
        let joint = scene.add_joint(id, Point::new(200.0, 300.0)).unwrap();
        assert_eq!(scene.connection(id).unwrap().path().len(), 3);

        let summary = scene.delete_items(&[SceneItem::Joint(joint), SceneItem::Joint(joint)]);
        assert_eq!(summary.joints, 1);
        assert_eq!(scene.connection(id).unwrap().path().len(), 2);
        assert!(!scene.contains(SceneItem::Joint(joint)));
    }

    #[test]
    fn test_visibility_follows_point_flag() {
        let Fixture {
            mut scene,
            valve,
            sensor,
            ..
        } = fixture();

        scene.begin_connection(valve).unwrap();
        let id = scene.complete_connection(Some(sensor)).unwrap();
        let joint = scene.add_joint(id, Point::new(100.0, 500.0)).unwrap();

        scene.set_points_visible(false);
        assert!(scene.is_visible(SceneItem::Entity(valve)));
        assert!(!scene.is_visible(SceneItem::Entity(sensor)));
        assert!(!scene.is_visible(SceneItem::Connection(id)));
        assert!(!scene.is_visible(SceneItem::Joint(joint)));

        scene.set_points_visible(true);
        assert!(scene.is_visible(SceneItem::Entity(sensor)));
        assert!(scene.is_visible(SceneItem::Joint(joint)));
        assert_eq!(scene.connection(id).unwrap().arrows().len(), 2);
    }

    #[test]
    fn test_infer_relationship_table() {
        let library = EntityLibrary::standard();
        let valve = library.lookup(BRICK.iri("Valve")).unwrap();
        let point = library.lookup(BRICK.iri("Point")).unwrap();

        assert_eq!(infer_relationship(&valve, &valve), Relationship::Feeds);
        assert_eq!(infer_relationship(&valve, &point), Relationship::IsPointOf);
        assert_eq!(infer_relationship(&point, &valve), Relationship::HasPoint);
        assert_eq!(infer_relationship(&point, &point), Relationship::IsPointOf);
    }
}
