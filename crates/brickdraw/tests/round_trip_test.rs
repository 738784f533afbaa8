//! Integration tests for Turtle export and import
//!
//! A scene written out and read back into an empty editor must describe the
//! same building: same instances, positions, rotations, labels, relationships
//! and joint routes.

use std::{fs, path::Path};

use proptest::prelude::*;
use tempfile::tempdir;

use brickdraw::{
    BrickdrawError, Editor, GraphDocument,
    geometry::Point,
    reference::{ExternalReference, ReferenceField, ReferenceKind},
    scene::SceneItem,
    topology::{Building, SpatialHierarchy, Storey, Space, TopologyExtractor, topology_document},
    vocab::{BRICK, REC, Relationship},
};

fn sample_editor() -> Editor {
    let mut editor = Editor::default();
    let boiler = editor
        .place_entity(BRICK.iri("Boiler"), Point::new(200.0, 300.0))
        .unwrap();
    let pump = editor
        .place_entity(BRICK.iri("Pump"), Point::new(500.0, 300.0))
        .unwrap();
    let sensor = editor
        .place_entity(BRICK.iri("Temperature_Sensor"), Point::new(250.0, 0.0))
        .unwrap();

    editor.select([SceneItem::Entity(pump)]);
    editor.rotate_selection();
    editor.set_label_for_selection("Primary pump");

    editor.begin_connection(boiler).unwrap();
    let feeds = editor.complete_connection(Some(pump)).unwrap();
    editor.add_joint(feeds, Point::new(350.0, 200.0)).unwrap();
    editor.add_joint(feeds, Point::new(450.0, 500.0)).unwrap();

    editor.begin_connection(sensor).unwrap();
    editor.complete_connection(Some(boiler)).unwrap();

    editor
        .set_reference_kind(sensor, ReferenceKind::Timeseries)
        .unwrap();
    editor
        .set_reference_field(sensor, ReferenceField::TimeseriesId, "ts-boiler-supply")
        .unwrap();
    editor.clear_selection();
    editor
}

#[test]
fn test_file_round_trip_preserves_scene() {
    let original = sample_editor();
    let dir = tempdir().unwrap();
    let path = dir.path().join("plant.ttl");
    original.export_to_file(&path).unwrap();

    let mut restored = Editor::default();
    let report = restored.import_from_file(&path).unwrap();
    assert!(report.is_clean(), "unexpected warnings: {:?}", report.warnings());
    assert_eq!(report.entities(), 3);
    assert_eq!(report.visual_connections(), 2);
    assert_eq!(report.implicit_connections(), 0);
    assert_eq!(report.references(), 1);

    let scene = restored.scene();
    assert_eq!(scene.entity_count(), 3);
    assert_eq!(scene.connection_count(), 2);

    for (_, entity) in original.scene().entities() {
        let id = scene.entity_by_iri(entity.iri()).expect("instance restored");
        let copy = scene.entity(id).unwrap();
        assert_eq!(copy.entity_type().iri(), entity.entity_type().iri());
        assert_eq!(copy.position(), entity.position());
        assert_eq!(copy.rotation(), entity.rotation());
        assert_eq!(copy.label(), entity.label());
        assert_eq!(copy.reference(), entity.reference());
    }

    for (_, connection) in original.scene().connections() {
        let (_, copy) = scene
            .connections()
            .find(|(_, candidate)| candidate.iri() == connection.iri())
            .expect("connection restored");
        assert_eq!(copy.relationship(), connection.relationship());
        assert_eq!(copy.stroke().style(), connection.stroke().style());
        assert_eq!(copy.stroke().width(), connection.stroke().width());
        assert_eq!(
            copy.stroke().color().to_rgb8(),
            connection.stroke().color().to_rgb8()
        );
        let joints: Vec<_> = copy.joints().iter().map(|joint| joint.position()).collect();
        let expected: Vec<_> = connection
            .joints()
            .iter()
            .map(|joint| joint.position())
            .collect();
        assert_eq!(joints, expected);
    }
}

#[test]
fn test_reimport_into_same_scene_adds_nothing() {
    let mut editor = sample_editor();
    let doc = editor.export_document();

    let report = editor.import_document(&doc);
    assert_eq!(report.entities(), 0);
    assert_eq!(report.visual_connections(), 0);
    assert!(!report.is_clean());
    assert_eq!(editor.scene().entity_count(), 3);
    assert_eq!(editor.scene().connection_count(), 2);
}

#[test]
fn test_parse_error_leaves_scene_untouched() {
    let mut editor = sample_editor();
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.ttl");
    fs::write(&path, "@prefix brick: <https://brickschema.org/schema/Brick#> .\nthis is not turtle").unwrap();

    let result = editor.import_from_file(&path);
    assert!(matches!(result, Err(BrickdrawError::Rdf(_))));
    assert_eq!(editor.scene().entity_count(), 3);
    assert_eq!(editor.scene().connection_count(), 2);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let mut editor = Editor::default();
    let dir = tempdir().unwrap();
    let result = editor.import_from_file(&dir.path().join("absent.ttl"));
    assert!(matches!(result, Err(BrickdrawError::Io(_))));
}

#[test]
fn test_failed_export_keeps_existing_file() {
    let editor = sample_editor();
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("plant.ttl");
    assert!(editor.export_to_file(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_incomplete_reference_is_rejected() {
    let mut editor = Editor::default();
    let sensor = editor
        .place_entity(BRICK.iri("Position_Sensor"), Point::new(100.0, 0.0))
        .unwrap();
    let record = ExternalReference::new(ReferenceKind::Bacnet).unwrap();
    assert!(editor.set_reference(sensor, Some(record)).is_err());
    assert!(editor.reference(sensor).is_none());
}

struct FixedHierarchy;

impl TopologyExtractor for FixedHierarchy {
    fn extract(&self, _path: &Path) -> Result<GraphDocument, BrickdrawError> {
        let hierarchy = SpatialHierarchy::new(
            vec![Building::new("B1", "Head office")],
            vec![
                Storey::new("L0", "Ground floor")
                    .with_elevation(0.0)
                    .in_building("B1")
                    .with_space(Space::new("R1", Some("Lobby".to_string()))),
            ],
        );
        Ok(topology_document(&hierarchy))
    }
}

#[test]
fn test_building_topology_import() {
    let mut editor = Editor::default();
    let report = editor
        .import_ifc(Path::new("office.ifc"), &FixedHierarchy)
        .unwrap();

    assert_eq!(report.entities(), 3);
    assert_eq!(report.implicit_connections(), 2);
    let types: Vec<_> = editor
        .scene()
        .entities()
        .map(|(_, entity)| entity.entity_type().iri())
        .collect();
    assert!(types.contains(&REC.iri("Building")));
    assert!(types.contains(&REC.iri("Level")));
    assert!(types.contains(&REC.iri("Room")));
    assert!(
        editor
            .scene()
            .connections()
            .all(|(_, connection)| connection.relationship() == Relationship::HasLocation)
    );
}

fn check_points_stay_on_line_after_round_trip(x: f32, y: f32) -> Result<(), TestCaseError> {
    let mut editor = Editor::default();
    editor
        .place_entity(BRICK.iri("Temperature_Setpoint"), Point::new(x, y))
        .unwrap();
    let doc = editor.export_document();

    let mut restored = Editor::default();
    restored.import_document(&doc);
    for (_, entity) in restored.scene().entities() {
        prop_assert_eq!(entity.position().y(), 875.0);
    }
    Ok(())
}

proptest! {
    #[test]
    fn points_stay_on_line_after_round_trip(x in 0.0f32..2000.0, y in -500.0f32..2000.0) {
        check_points_stay_on_line_after_round_trip(x, y)?;
    }
}
