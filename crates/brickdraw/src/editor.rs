//! The editing session facade.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info};
use tempfile::NamedTempFile;

use brickdraw_core::{
    catalog::{Catalog, EntityLibrary},
    color::Color,
    geometry::Point,
    identifier::Iri,
    vocab::{ALL_NAMESPACES, Relationship},
};
use brickdraw_rdf::{GraphDocument, parse_turtle, write_turtle};

use crate::{
    clipboard::Clipboard,
    config::{AppConfig, SceneSettings},
    error::{BrickdrawError, ConnectionError},
    reference::{
        self, BacnetEncodingKind, ExternalReference, ReferenceError, ReferenceField,
        ReferenceKind,
    },
    render,
    scene::{ConnectionId, EntityId, JointId, SceneGraph, SceneItem},
    selection::{Selection, SelectionObserver, SelectionSummary},
    sync::{self, ImportReport},
    topology::TopologyExtractor,
};

/// The result of a selection-driven command.
///
/// Commands that find nothing to act on are not errors; they report why
/// nothing happened so the caller can show a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The command changed this many items.
    Applied(usize),
    /// The command did nothing, for the given reason.
    Nothing(&'static str),
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

const NOTHING_COPIED: &str = "Nothing copied - at least one entity must be selected";
const CLIPBOARD_EMPTY: &str = "Nothing to paste - the clipboard is empty";
const NO_ENTITY_SELECTED: &str = "No entity selected";
const NO_CONNECTION_SELECTED: &str = "No connection selected";
const NOTHING_SELECTED: &str = "Nothing selected";

/// A single-document editing session.
///
/// The editor owns the scene, the current selection and the clipboard, and
/// exposes every user-level command: placing, moving and rotating entities,
/// drawing connections, copy and paste, property edits over the selection,
/// and whole-document import and export.
///
/// # Examples
///
/// ```
/// use brickdraw::{Editor, geometry::Point, vocab::BRICK};
///
/// let mut editor = Editor::default();
/// let valve = editor.place_entity(BRICK.iri("Valve"), Point::new(103.0, 207.0))?;
/// let sensor = editor.place_entity(BRICK.iri("Temperature_Sensor"), Point::new(300.0, 0.0))?;
///
/// editor.begin_connection(valve)?;
/// editor.complete_connection(Some(sensor))?;
///
/// assert_eq!(editor.scene().connection_count(), 1);
/// let turtle = editor.export_turtle()?;
/// assert!(turtle.contains("isPointOf"));
/// # Ok::<(), brickdraw::BrickdrawError>(())
/// ```
pub struct Editor {
    catalog: Box<dyn Catalog>,
    scene: SceneGraph,
    selection: Selection,
    clipboard: Clipboard,
    observers: Vec<SelectionObserver>,
}

impl Editor {
    /// Creates an editor for `config`, placing entities from `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`BrickdrawError::Config`] if the configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use brickdraw::{Editor, catalog::EntityLibrary, config::AppConfig};
    ///
    /// let editor = Editor::new(&AppConfig::default(), Box::new(EntityLibrary::standard()))?;
    /// assert_eq!(editor.scene().entity_count(), 0);
    /// # Ok::<(), brickdraw::BrickdrawError>(())
    /// ```
    pub fn new(config: &AppConfig, catalog: Box<dyn Catalog>) -> Result<Self, BrickdrawError> {
        let settings = SceneSettings::from_config(config)?;
        Ok(Self::with_settings(settings, catalog))
    }

    fn with_settings(settings: SceneSettings, catalog: Box<dyn Catalog>) -> Self {
        Self {
            catalog,
            scene: SceneGraph::new(settings),
            selection: Selection::new(),
            clipboard: Clipboard::default(),
            observers: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Registers a callback run once after every change of the selection.
    pub fn on_selection_changed(&mut self, observer: impl FnMut(&Selection) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Places an entity of `type_iri` centred on `drop`.
    ///
    /// # Errors
    ///
    /// Returns [`BrickdrawError::Catalog`] for unknown entity types.
    pub fn place_entity(&mut self, type_iri: Iri, drop: Point) -> Result<EntityId, BrickdrawError> {
        Ok(self.scene.place_entity(self.catalog.as_ref(), type_iri, drop)?)
    }

    /// Drags one entity, returning the constrained position it took.
    pub fn move_entity(&mut self, id: EntityId, raw: Point) -> Option<Point> {
        self.scene.move_entity(id, raw)
    }

    /// Moves every selected entity and joint by `delta`.
    pub fn move_selection(&mut self, delta: Point) -> EditOutcome {
        let mut moved = 0;
        for item in self.selection.iter().collect::<Vec<_>>() {
            let position = match item {
                SceneItem::Entity(id) => self.scene.entity(id).map(|entity| entity.position()),
                SceneItem::Joint(id) => self.scene.joint(id).map(|(_, joint)| joint.position()),
                SceneItem::Connection(_) => None,
            };
            let Some(position) = position else {
                continue;
            };
            let target = position.add_point(delta);
            let done = match item {
                SceneItem::Entity(id) => self.scene.move_entity(id, target).is_some(),
                SceneItem::Joint(id) => self.scene.move_joint(id, target).is_some(),
                SceneItem::Connection(_) => false,
            };
            moved += usize::from(done);
        }
        outcome(moved, NOTHING_SELECTED)
    }

    /// Rotates every selected entity by the configured step.
    pub fn rotate_selection(&mut self) -> EditOutcome {
        let step = self.scene.settings().rotation_step();
        let rotated = self
            .selection
            .entities()
            .collect::<Vec<_>>()
            .into_iter()
            .filter(|id| self.scene.rotate_entity(*id, step).is_some())
            .count();
        outcome(rotated, NO_ENTITY_SELECTED)
    }

    /// Deletes the selected items together with everything that depends on them.
    pub fn delete_selection(&mut self) -> EditOutcome {
        if self.selection.is_empty() {
            return EditOutcome::Nothing(NOTHING_SELECTED);
        }
        let items: Vec<_> = self.selection.iter().collect();
        let summary = self.scene.delete_items(&items);
        self.set_selection(Selection::new());
        outcome(
            summary.entities + summary.connections + summary.joints,
            NOTHING_SELECTED,
        )
    }

    /// Copies the selected entities and the connections between them.
    ///
    /// The previous clipboard is kept when nothing suitable is selected.
    pub fn copy(&mut self) -> EditOutcome {
        let clipboard = Clipboard::capture(&self.scene, &self.selection);
        if clipboard.is_empty() {
            return EditOutcome::Nothing(NOTHING_COPIED);
        }
        let copied = clipboard.entity_count() + clipboard.connection_count();
        self.clipboard = clipboard;
        EditOutcome::Applied(copied)
    }

    /// Pastes the clipboard at the configured offset and selects the result.
    pub fn paste(&mut self) -> EditOutcome {
        if self.clipboard.is_empty() {
            return EditOutcome::Nothing(CLIPBOARD_EMPTY);
        }
        let offset = self.scene.settings().paste_offset();
        let created = self.clipboard.paste_into(&mut self.scene, offset);
        let count = created.len();
        self.select(created);
        EditOutcome::Applied(count)
    }

    /// Shows or hides Points and point relations, returning the new state.
    ///
    /// Items that become hidden are removed from the selection.
    pub fn toggle_points_visibility(&mut self) -> bool {
        let visible = !self.scene.points_visible();
        self.scene.set_points_visible(visible);
        self.retain_selectable();
        info!(visible = visible; "Point visibility toggled");
        visible
    }

    /// Replaces the selection with `items`.
    ///
    /// Missing, hidden and unfinished items are ignored.
    pub fn select(&mut self, items: impl IntoIterator<Item = SceneItem>) {
        let selection = items
            .into_iter()
            .filter(|item| self.is_selectable(*item))
            .collect();
        self.set_selection(selection);
    }

    /// Selects every visible entity and complete connection.
    pub fn select_all(&mut self) {
        let entities = self.scene.entities().map(|(id, _)| SceneItem::Entity(id));
        let connections = self
            .scene
            .connections()
            .map(|(id, _)| SceneItem::Connection(id));
        let items: Vec<_> = entities.chain(connections).collect();
        self.select(items);
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(Selection::new());
    }

    /// Returns the property-panel view of the selection.
    pub fn selection_summary(&self) -> SelectionSummary {
        SelectionSummary::new(&self.scene, &self.selection)
    }

    /// Sets the label of every selected entity.
    pub fn set_label_for_selection(&mut self, label: &str) -> EditOutcome {
        let changed = self
            .selection
            .entities()
            .filter(|id| self.scene.set_label(*id, label))
            .count();
        outcome(changed, NO_ENTITY_SELECTED)
    }

    /// Sets the relationship of every selected connection.
    pub fn set_relationship_for_selection(&mut self, relationship: Relationship) -> EditOutcome {
        let changed = self.for_selected_connections(|scene, id| {
            scene.set_relationship(id, relationship)
        });
        self.retain_selectable();
        outcome(changed, NO_CONNECTION_SELECTED)
    }

    /// Reverses the direction of every selected connection.
    pub fn reverse_selection(&mut self) -> EditOutcome {
        let changed = self.for_selected_connections(SceneGraph::reverse_connection);
        outcome(changed, NO_CONNECTION_SELECTED)
    }

    /// Recolors every selected connection.
    pub fn set_color_for_selection(&mut self, color: Color) -> EditOutcome {
        let changed =
            self.for_selected_connections(|scene, id| scene.set_connection_color(id, color));
        outcome(changed, NO_CONNECTION_SELECTED)
    }

    /// Starts drawing a connection from `source`, discarding any other draft.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::UnknownEntity`] if `source` does not exist.
    pub fn begin_connection(&mut self, source: EntityId) -> Result<ConnectionId, ConnectionError> {
        self.scene.begin_connection(source)
    }

    /// Moves the free end of the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::NoDraft`] when nothing is being drawn.
    pub fn update_draft(&mut self, cursor: Point) -> Result<(), ConnectionError> {
        self.scene.update_draft(cursor)
    }

    /// Completes the draft on `target`; see [`SceneGraph::complete_connection`].
    ///
    /// # Errors
    ///
    /// Returns the reason the draft was rejected; it is discarded either way.
    pub fn complete_connection(
        &mut self,
        target: Option<EntityId>,
    ) -> Result<ConnectionId, ConnectionError> {
        self.scene.complete_connection(target)
    }

    /// Discards the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::NoDraft`] when nothing is being drawn.
    pub fn cancel_connection(&mut self) -> Result<(), ConnectionError> {
        self.scene.cancel_connection()
    }

    /// Appends a joint to a connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::UnknownConnection`] if `id` does not exist.
    pub fn add_joint(&mut self, id: ConnectionId, position: Point) -> Result<JointId, ConnectionError> {
        self.scene.add_joint(id, position)
    }

    pub fn move_joint(&mut self, joint: JointId, position: Point) -> Option<Point> {
        self.scene.move_joint(joint, position)
    }

    /// Returns the external reference of a Point, if it has one.
    pub fn reference(&self, id: EntityId) -> Option<&ExternalReference> {
        self.scene.entity(id).and_then(|entity| entity.reference())
    }

    /// Switches the reference kind of a Point.
    ///
    /// Any switch to a different kind discards the previous fields.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::NotAPoint`] for entities that are not Points.
    pub fn set_reference_kind(
        &mut self,
        id: EntityId,
        kind: ReferenceKind,
    ) -> Result<(), ReferenceError> {
        let slot = self.scene.reference_slot(id).ok_or(ReferenceError::NotAPoint)?;
        reference::switch_kind(slot, kind);
        debug!(entity:% = id, kind:? = kind; "Reference kind switched");
        Ok(())
    }

    /// Switches the encoding of a Point's BACnet reference.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::NotAPoint`] for entities that are not Points
    /// and [`ReferenceError::FieldNotApplicable`] when the Point has no
    /// BACnet reference.
    pub fn set_bacnet_encoding(
        &mut self,
        id: EntityId,
        encoding: BacnetEncodingKind,
    ) -> Result<(), ReferenceError> {
        let slot = self.scene.reference_slot(id).ok_or(ReferenceError::NotAPoint)?;
        let applied = slot
            .as_mut()
            .is_some_and(|record| record.set_bacnet_encoding(encoding));
        if applied {
            Ok(())
        } else {
            Err(ReferenceError::FieldNotApplicable(ReferenceField::BacnetUri))
        }
    }

    /// Edits one field of a Point's reference. Empty values clear the field.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::NotAPoint`] for entities that are not Points
    /// and [`ReferenceError::FieldNotApplicable`] when the field does not
    /// belong to the current record.
    pub fn set_reference_field(
        &mut self,
        id: EntityId,
        field: ReferenceField,
        value: &str,
    ) -> Result<(), ReferenceError> {
        let slot = self.scene.reference_slot(id).ok_or(ReferenceError::NotAPoint)?;
        match slot {
            Some(record) => record.set_field(field, value),
            None => Err(ReferenceError::FieldNotApplicable(field)),
        }
    }

    /// Replaces a Point's reference with a complete record, or removes it.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::NotAPoint`] for entities that are not Points,
    /// or the validation error of an incomplete record; the previous record
    /// is then kept.
    pub fn set_reference(
        &mut self,
        id: EntityId,
        record: Option<ExternalReference>,
    ) -> Result<(), ReferenceError> {
        if let Some(record) = &record {
            record.validate()?;
        }
        let slot = self.scene.reference_slot(id).ok_or(ReferenceError::NotAPoint)?;
        *slot = record;
        Ok(())
    }

    /// Starts over with an empty document.
    ///
    /// The scene, selection, clipboard and any draft are cleared.
    pub fn new_document(&mut self) {
        self.scene.clear();
        self.clipboard = Clipboard::default();
        self.set_selection(Selection::new());
        info!("New document");
    }

    /// Flattens the scene into a graph document.
    pub fn export_document(&self) -> GraphDocument {
        sync::export_scene(&self.scene)
    }

    /// Serializes the scene as Turtle.
    ///
    /// # Errors
    ///
    /// Returns [`BrickdrawError::Rdf`] if serialization fails.
    pub fn export_turtle(&self) -> Result<String, BrickdrawError> {
        Ok(write_turtle(&self.export_document(), &ALL_NAMESPACES)?)
    }

    /// Writes the scene to `path` as Turtle.
    ///
    /// The document goes to a temporary file in the same directory first,
    /// which then replaces `path`, so a failed export leaves any existing
    /// file intact.
    ///
    /// # Errors
    ///
    /// Returns [`BrickdrawError::Io`] or [`BrickdrawError::Rdf`].
    pub fn export_to_file(&self, path: &Path) -> Result<(), BrickdrawError> {
        let text = self.export_turtle()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(text.as_bytes())?;
        file.persist(path).map_err(|err| BrickdrawError::Io(err.error))?;
        info!(path:? = path, bytes = text.len(); "Exported scene to file");
        Ok(())
    }

    /// Merges a graph document into the scene.
    pub fn import_document(&mut self, doc: &GraphDocument) -> ImportReport {
        sync::import_document(&mut self.scene, doc, self.catalog.as_ref())
    }

    /// Reads a Turtle file and merges it into the scene.
    ///
    /// The whole file is read and parsed before the scene is touched.
    ///
    /// # Errors
    ///
    /// Returns [`BrickdrawError::Io`] or [`BrickdrawError::Rdf`]; the scene
    /// is unchanged in that case.
    pub fn import_from_file(&mut self, path: &Path) -> Result<ImportReport, BrickdrawError> {
        info!(path:? = path; "Importing Turtle file");
        let text = fs::read_to_string(path)?;
        let doc = parse_turtle(&text)?;
        Ok(self.import_document(&doc))
    }

    /// Extracts the spatial topology of a building model and merges it.
    ///
    /// # Errors
    ///
    /// Returns whatever the extractor reports; the scene is unchanged in
    /// that case.
    pub fn import_ifc(
        &mut self,
        path: &Path,
        extractor: &dyn TopologyExtractor,
    ) -> Result<ImportReport, BrickdrawError> {
        info!(path:? = path; "Importing building model");
        let doc = extractor.extract(path)?;
        Ok(self.import_document(&doc))
    }

    /// Renders the visible scene as SVG.
    pub fn render_svg(&self) -> String {
        render::render_svg(&self.scene)
    }

    fn is_selectable(&self, item: SceneItem) -> bool {
        let complete = match item {
            SceneItem::Connection(id) => self
                .scene
                .connection(id)
                .is_some_and(|connection| connection.is_complete()),
            _ => self.scene.contains(item),
        };
        complete && self.scene.is_visible(item)
    }

    fn retain_selectable(&mut self) {
        let remaining: Selection = self
            .selection
            .iter()
            .filter(|item| self.is_selectable(*item))
            .collect();
        self.set_selection(remaining);
    }

    fn set_selection(&mut self, selection: Selection) {
        if selection == self.selection {
            return;
        }
        self.selection = selection;
        for observer in &mut self.observers {
            observer(&self.selection);
        }
    }

    fn for_selected_connections(
        &mut self,
        mut edit: impl FnMut(&mut SceneGraph, ConnectionId) -> Result<(), ConnectionError>,
    ) -> usize {
        let connections: Vec<_> = self.selection.connections().collect();
        connections
            .into_iter()
            .filter(|id| edit(&mut self.scene, *id).is_ok())
            .count()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_settings(SceneSettings::default(), Box::new(EntityLibrary::standard()))
    }
}

fn outcome(count: usize, reason: &'static str) -> EditOutcome {
    if count == 0 {
        EditOutcome::Nothing(reason)
    } else {
        EditOutcome::Applied(count)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use brickdraw_core::vocab::BRICK;

    use super::*;

    #[test]
    fn test_empty_selection_commands_report_nothing() {
        let mut editor = Editor::default();
        assert_eq!(editor.copy(), EditOutcome::Nothing(NOTHING_COPIED));
        assert_eq!(editor.paste(), EditOutcome::Nothing(CLIPBOARD_EMPTY));
        assert_eq!(editor.rotate_selection(), EditOutcome::Nothing(NO_ENTITY_SELECTED));
        assert_eq!(editor.delete_selection(), EditOutcome::Nothing(NOTHING_SELECTED));
        assert_eq!(
            editor.reverse_selection(),
            EditOutcome::Nothing(NO_CONNECTION_SELECTED)
        );
    }

    #[test]
    fn test_observers_fire_once_per_change() {
        let mut editor = Editor::default();
        let valve = editor
            .place_entity(BRICK.iri("Valve"), Point::new(100.0, 100.0))
            .unwrap();
        let pump = editor
            .place_entity(BRICK.iri("Pump"), Point::new(300.0, 100.0))
            .unwrap();

        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&calls);
        editor.on_selection_changed(move |selection| seen.borrow_mut().push(selection.len()));

        editor.select_all();
        editor.select_all();
        editor.select([SceneItem::Entity(valve)]);
        editor.delete_selection();

        assert_eq!(*calls.borrow(), vec![2, 1, 0]);
        assert!(editor.scene().entity(pump).is_some());
    }

    #[test]
    fn test_hiding_points_deselects_them() {
        let mut editor = Editor::default();
        let valve = editor
            .place_entity(BRICK.iri("Valve"), Point::new(100.0, 100.0))
            .unwrap();
        let sensor = editor
            .place_entity(BRICK.iri("Temperature_Sensor"), Point::new(300.0, 0.0))
            .unwrap();
        editor.begin_connection(valve).unwrap();
        let connection = editor.complete_connection(Some(sensor)).unwrap();

        editor.select_all();
        assert_eq!(editor.selection().len(), 3);

        assert!(!editor.toggle_points_visibility());
        assert_eq!(editor.selection().len(), 1);
        assert!(editor.selection().contains(SceneItem::Entity(valve)));

        editor.select([SceneItem::Entity(sensor), SceneItem::Connection(connection)]);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_reference_editing_requires_a_point() {
        let mut editor = Editor::default();
        let valve = editor
            .place_entity(BRICK.iri("Valve"), Point::new(100.0, 100.0))
            .unwrap();
        let sensor = editor
            .place_entity(BRICK.iri("Temperature_Sensor"), Point::new(300.0, 0.0))
            .unwrap();

        assert_eq!(
            editor.set_reference_kind(valve, ReferenceKind::Bacnet),
            Err(ReferenceError::NotAPoint)
        );
        assert_eq!(
            editor.set_reference_field(sensor, ReferenceField::TimeseriesId, "ts"),
            Err(ReferenceError::FieldNotApplicable(ReferenceField::TimeseriesId))
        );

        editor.set_reference_kind(sensor, ReferenceKind::Bacnet).unwrap();
        editor.set_bacnet_encoding(sensor, BacnetEncodingKind::Uri).unwrap();
        editor
            .set_reference_field(sensor, ReferenceField::BacnetUri, "bacnet://5/analog-input,1")
            .unwrap();
        assert_eq!(
            editor
                .reference(sensor)
                .and_then(|record| record.field(ReferenceField::BacnetUri)),
            Some("bacnet://5/analog-input,1")
        );

        let incomplete = ExternalReference::new(ReferenceKind::Timeseries);
        assert_eq!(
            editor.set_reference(sensor, incomplete),
            Err(ReferenceError::MissingTimeseriesId)
        );
        assert_eq!(
            editor.reference(sensor).map(ExternalReference::kind),
            Some(ReferenceKind::Bacnet)
        );

        editor.set_reference_kind(sensor, ReferenceKind::None).unwrap();
        assert!(editor.reference(sensor).is_none());
    }

    #[test]
    fn test_move_selection_moves_entities_and_joints() {
        let mut editor = Editor::default();
        let valve = editor
            .place_entity(BRICK.iri("Valve"), Point::new(100.0, 100.0))
            .unwrap();
        let pump = editor
            .place_entity(BRICK.iri("Pump"), Point::new(300.0, 100.0))
            .unwrap();
        editor.begin_connection(valve).unwrap();
        let connection = editor.complete_connection(Some(pump)).unwrap();
        let joint = editor.add_joint(connection, Point::new(200.0, 200.0)).unwrap();

        editor.select([SceneItem::Entity(valve), SceneItem::Joint(joint)]);
        assert_eq!(
            editor.move_selection(Point::new(50.0, 25.0)),
            EditOutcome::Applied(2)
        );
        assert_eq!(
            editor.scene().entity(valve).unwrap().position(),
            Point::new(125.0, 100.0)
        );
        assert_eq!(
            editor.scene().joint(joint).unwrap().1.position(),
            Point::new(250.0, 225.0)
        );
    }

    #[test]
    fn test_new_document_clears_everything() {
        let mut editor = Editor::default();
        let valve = editor
            .place_entity(BRICK.iri("Valve"), Point::new(100.0, 100.0))
            .unwrap();
        editor.select([SceneItem::Entity(valve)]);
        editor.copy();
        editor.begin_connection(valve).unwrap();

        editor.new_document();

        assert_eq!(editor.scene().entity_count(), 0);
        assert!(editor.scene().draft().is_none());
        assert!(editor.selection().is_empty());
        assert_eq!(editor.paste(), EditOutcome::Nothing(CLIPBOARD_EMPTY));
    }
}
