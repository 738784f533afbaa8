use std::collections::{HashMap, HashSet};

use log::{info, warn};
use thiserror::Error;

use brickdraw_core::{
    catalog::Catalog,
    color::{Color, Rgb8},
    draw::{StrokeDefinition, StrokeStyle},
    geometry::Point,
    identifier::Iri,
    vocab::{self, REF, Relationship, VISU, term},
};
use brickdraw_rdf::{GraphDocument, Term};

use crate::{
    error::ConnectionError,
    reference::ExternalReference,
    scene::{EntityId, SceneGraph, styled_stroke},
};

/// A record skipped or repaired while importing a document.
///
/// Warnings never abort an import; the rest of the document is still
/// merged into the scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportWarning {
    #[error("unknown entity type {type_iri} for {subject}")]
    UnknownEntityType { subject: String, type_iri: Iri },

    #[error("blank node typed {type_iri} cannot be placed as an entity")]
    BlankEntity { type_iri: Iri },

    #[error("entity {subject} already exists in the scene")]
    DuplicateInstance { subject: Iri },

    #[error("malformed position for {subject}, placed at the origin")]
    MalformedPosition { subject: Iri },

    #[error("connection record {record} is missing its {endpoint} entity")]
    MissingEndpoint {
        record: String,
        endpoint: &'static str,
    },

    #[error("connection record {record} refers to unknown entity {entity}")]
    UnresolvedEndpoint { record: String, entity: Iri },

    #[error("connection record {record} has no recognized relationship type")]
    UnknownRelationship { record: String },

    #[error("connection {record} rejected: {reason}")]
    RejectedConnection {
        record: String,
        reason: ConnectionError,
    },

    #[error("connection record {record} has a malformed joint")]
    MalformedJoint { record: String },

    #[error("external reference attached to {subject}, which is not an imported Point")]
    UnresolvedReference { subject: String },

    #[error("external reference attached to {subject}, which is not a Point")]
    ReferenceOnNonPoint { subject: Iri },

    #[error("extra external reference on {subject} ignored")]
    ExtraReference { subject: Iri },

    #[error("external reference on {subject} has no recognizable kind")]
    UndeterminedReference { subject: Iri },
}

/// Counts of what an import added to the scene, plus every warning raised.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    entities: usize,
    visual_connections: usize,
    implicit_connections: usize,
    references: usize,
    warnings: Vec<ImportWarning>,
}

impl ImportReport {
    /// Returns the number of entities created.
    pub fn entities(&self) -> usize {
        self.entities
    }

    /// Returns the number of connections rebuilt from visual records.
    pub fn visual_connections(&self) -> usize {
        self.visual_connections
    }

    /// Returns the number of connections synthesized from bare relationship triples.
    pub fn implicit_connections(&self) -> usize {
        self.implicit_connections
    }

    /// Returns the number of external references attached to Points.
    pub fn references(&self) -> usize {
        self.references
    }

    pub fn warnings(&self) -> &[ImportWarning] {
        &self.warnings
    }

    /// Returns true if nothing had to be skipped.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Merges the content of `doc` into `scene`.
///
/// Runs four ordered passes: entities, connections with a visual record,
/// bare relationship triples without one, then external references. Only
/// entities created by this import are linked by the later passes, so
/// importing the same document twice does not duplicate connections.
pub fn import_document(
    scene: &mut SceneGraph,
    doc: &GraphDocument,
    catalog: &dyn Catalog,
) -> ImportReport {
    let mut importer = Importer {
        scene,
        doc,
        catalog,
        resolved: HashMap::new(),
        represented: HashSet::new(),
        report: ImportReport::default(),
    };
    importer.import_entities();
    importer.import_visual_connections();
    importer.import_implicit_connections();
    importer.import_references();

    let report = importer.report;
    info!(
        entities = report.entities,
        visual_connections = report.visual_connections,
        implicit_connections = report.implicit_connections,
        references = report.references,
        warnings = report.warnings.len();
        "Imported document"
    );
    report
}

struct Importer<'a> {
    scene: &'a mut SceneGraph,
    doc: &'a GraphDocument,
    catalog: &'a dyn Catalog,
    /// Instance IRI to the entity created for it by this import.
    resolved: HashMap<Iri, EntityId>,
    /// Relationship triples that already have a visual record.
    represented: HashSet<(Iri, Relationship, Iri)>,
    report: ImportReport,
}

impl Importer<'_> {
    fn warn(&mut self, warning: ImportWarning) {
        warn!(warning:% = warning; "Import warning");
        self.report.warnings.push(warning);
    }

    fn import_entities(&mut self) {
        let markers = [
            VISU.iri(term::CONNECTION),
            REF.iri(term::BACNET_REFERENCE),
            REF.iri(term::TIMESERIES_REFERENCE),
        ];
        let doc = self.doc;

        for triple in doc.with_predicate(vocab::rdf_type()) {
            let Some(type_iri) = triple.object().as_iri() else {
                continue;
            };
            if markers.contains(&type_iri) {
                continue;
            }
            let entity_type = match self.catalog.lookup(type_iri) {
                Ok(entity_type) => entity_type,
                Err(_) => {
                    self.warn(ImportWarning::UnknownEntityType {
                        subject: triple.subject().to_string(),
                        type_iri,
                    });
                    continue;
                }
            };
            let Some(subject) = triple.subject().as_iri() else {
                self.warn(ImportWarning::BlankEntity { type_iri });
                continue;
            };

            let position = self.read_position(subject);
            let Some(id) = self.scene.add_entity(entity_type, subject, position) else {
                self.warn(ImportWarning::DuplicateInstance { subject });
                continue;
            };

            let node = triple.subject();
            if let Some(rotation) = doc
                .object(node, VISU.iri(term::ROTATION))
                .and_then(Term::as_f64)
                .filter(|rotation| rotation.is_finite())
            {
                self.scene.rotate_entity(id, rotation as f32);
            }
            if let Some(label) = doc.object(node, vocab::rdfs_label()).and_then(Term::text) {
                self.scene.set_label(id, &label);
            }

            self.resolved.insert(subject, id);
            self.report.entities += 1;
        }
    }

    /// Reads the position node of `subject`.
    ///
    /// A missing node places the entity at the origin; a node with missing
    /// or non-finite coordinates does the same with a warning.
    fn read_position(&mut self, subject: Iri) -> Point {
        let doc = self.doc;
        let Some(node) = doc.object(&Term::Iri(subject), VISU.iri(term::HAS_POSITION)) else {
            return Point::default();
        };
        match read_xy(doc, node) {
            Some(position) => position,
            None => {
                self.warn(ImportWarning::MalformedPosition { subject });
                Point::default()
            }
        }
    }

    fn import_visual_connections(&mut self) {
        let doc = self.doc;
        let marker = Term::Iri(VISU.iri(term::CONNECTION));

        for record in doc.subjects(vocab::rdf_type(), &marker) {
            let name = record.to_string();
            let Some(source) = self.endpoint(record, term::SOURCE_ENTITY, "source") else {
                continue;
            };
            let Some(target) = self.endpoint(record, term::TARGET_ENTITY, "target") else {
                continue;
            };
            let Some(relationship) = doc
                .object(record, VISU.iri(term::RELATIONSHIP_TYPE))
                .and_then(Term::text)
                .and_then(|text| text.parse::<Relationship>().ok())
            else {
                self.warn(ImportWarning::UnknownRelationship { record: name });
                continue;
            };

            let stroke = self.read_stroke(record, relationship);
            let id = match self.scene.connect(
                source.1,
                target.1,
                relationship,
                stroke,
                record.as_iri(),
            ) {
                Ok(id) => id,
                Err(reason) => {
                    self.warn(ImportWarning::RejectedConnection {
                        record: name,
                        reason,
                    });
                    continue;
                }
            };

            for position in self.read_joints(record) {
                // The connection was created just above.
                let _ = self.scene.add_joint(id, position);
            }

            self.represented.insert((source.0, relationship, target.0));
            self.report.visual_connections += 1;
        }
    }

    /// Resolves one endpoint of a connection record to an imported entity.
    fn endpoint(
        &mut self,
        record: &Term,
        predicate: &str,
        endpoint: &'static str,
    ) -> Option<(Iri, EntityId)> {
        let Some(iri) = self
            .doc
            .object(record, VISU.iri(predicate))
            .and_then(Term::as_iri)
        else {
            self.warn(ImportWarning::MissingEndpoint {
                record: record.to_string(),
                endpoint,
            });
            return None;
        };
        match self.resolved.get(&iri) {
            Some(id) => Some((iri, *id)),
            None => {
                self.warn(ImportWarning::UnresolvedEndpoint {
                    record: record.to_string(),
                    entity: iri,
                });
                None
            }
        }
    }

    /// Rebuilds a connection stroke, overriding the default attribute by attribute.
    fn read_stroke(&self, record: &Term, relationship: Relationship) -> StrokeDefinition {
        let doc = self.doc;
        let mut stroke = styled_stroke(self.scene.settings().connection_stroke(), relationship);

        if let Some(color) = doc
            .object(record, VISU.iri(term::COLOR))
            .and_then(|node| read_rgb(doc, node))
        {
            stroke.set_color(Color::from_rgb8(color));
        }
        if let Some(style) = doc
            .object(record, VISU.iri(term::LINE_STYLE))
            .and_then(Term::as_i64)
            .and_then(StrokeStyle::from_code)
        {
            stroke.set_style(style);
        }
        if let Some(width) = doc
            .object(record, VISU.iri(term::LINE_WIDTH))
            .and_then(Term::as_f64)
            .filter(|width| width.is_finite() && *width > 0.0)
        {
            stroke.set_width(width as f32);
        }
        stroke
    }

    /// Returns the joint positions of a record in index order.
    fn read_joints(&mut self, record: &Term) -> Vec<Point> {
        let doc = self.doc;
        let mut joints = Vec::new();
        let mut malformed = false;

        for node in doc.objects(record, VISU.iri(term::HAS_JOINT)) {
            let index = doc
                .object(node, VISU.iri(term::JOINT_INDEX))
                .and_then(Term::as_i64);
            match (index, read_xy(doc, node)) {
                (Some(index), Some(position)) => joints.push((index, position)),
                _ => malformed = true,
            }
        }
        if malformed {
            self.warn(ImportWarning::MalformedJoint {
                record: record.to_string(),
            });
        }

        joints.sort_by_key(|(index, _)| *index);
        joints.into_iter().map(|(_, position)| position).collect()
    }

    fn import_implicit_connections(&mut self) {
        let doc = self.doc;
        let stroke = self.scene.settings().connection_stroke();

        for relationship in Relationship::ALL {
            for triple in doc.with_predicate(relationship.iri()) {
                let (Some(source), Some(target)) =
                    (triple.subject().as_iri(), triple.object().as_iri())
                else {
                    continue;
                };
                let (Some(&source_id), Some(&target_id)) =
                    (self.resolved.get(&source), self.resolved.get(&target))
                else {
                    continue;
                };
                if !self.represented.insert((source, relationship, target)) {
                    continue;
                }
                match self
                    .scene
                    .connect(source_id, target_id, relationship, stroke, None)
                {
                    Ok(_) => self.report.implicit_connections += 1,
                    Err(reason) => self.warn(ImportWarning::RejectedConnection {
                        record: triple.to_string(),
                        reason,
                    }),
                }
            }
        }
    }

    fn import_references(&mut self) {
        let doc = self.doc;
        let mut attached: HashSet<EntityId> = HashSet::new();

        for triple in doc.with_predicate(REF.iri(term::HAS_EXTERNAL_REFERENCE)) {
            let Some((subject, id)) = triple
                .subject()
                .as_iri()
                .and_then(|iri| Some((iri, *self.resolved.get(&iri)?)))
            else {
                self.warn(ImportWarning::UnresolvedReference {
                    subject: triple.subject().to_string(),
                });
                continue;
            };
            if attached.contains(&id) {
                self.warn(ImportWarning::ExtraReference { subject });
                continue;
            }
            let Some(record) = ExternalReference::read(doc, triple.object()) else {
                self.warn(ImportWarning::UndeterminedReference { subject });
                continue;
            };
            let Some(slot) = self.scene.reference_slot(id) else {
                self.warn(ImportWarning::ReferenceOnNonPoint { subject });
                continue;
            };

            *slot = Some(record);
            attached.insert(id);
            self.report.references += 1;
        }
    }
}

fn read_xy(doc: &GraphDocument, node: &Term) -> Option<Point> {
    let coordinate = |name: &str| {
        doc.object(node, VISU.iri(name))
            .and_then(Term::as_f64)
            .filter(|value| value.is_finite())
    };
    Some(Point::new(
        coordinate(term::X)? as f32,
        coordinate(term::Y)? as f32,
    ))
}

fn read_rgb(doc: &GraphDocument, node: &Term) -> Option<Rgb8> {
    let channel = |name: &str| {
        doc.object(node, VISU.iri(name))
            .and_then(Term::as_i64)
            .and_then(|value| u8::try_from(value).ok())
    };
    Some(Rgb8::new(
        channel(term::RED)?,
        channel(term::GREEN)?,
        channel(term::BLUE)?,
    ))
}

#[cfg(test)]
mod tests {
    use brickdraw_core::{
        catalog::EntityLibrary,
        vocab::{BLDG, BRICK, REC},
    };
    use brickdraw_rdf::{Literal, parse_turtle};

    use super::*;
    use crate::{config::SceneSettings, sync::export_scene};

    fn import(text: &str) -> (SceneGraph, ImportReport) {
        let doc = parse_turtle(text).unwrap();
        let mut scene = SceneGraph::new(SceneSettings::default());
        let report = import_document(&mut scene, &doc, &EntityLibrary::standard());
        (scene, report)
    }

    const PREFIXES: &str = r#"
        @prefix brick: <https://brickschema.org/schema/Brick#> .
        @prefix rec: <https://doc.realestatecore.io/4.0/#> .
        @prefix ref: <https://brickschema.org/schema/Brick/ref#> .
        @prefix bacnet: <http://data.ashrae.org/bacnet/2020#> .
        @prefix visu: <http://example.org/design#> .
        @prefix bldg: <http://example.org/building/#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
    "#;

    #[test]
    fn test_import_entities_with_position_rotation_label() {
        let (scene, report) = import(&format!(
            "{PREFIXES}
            bldg:V1 a brick:Valve ;
                rdfs:label \"Main valve\" ;
                visu:rotation 90 ;
                visu:hasPosition [ visu:x 75.0 ; visu:y 175.0 ] .
            bldg:T1 a brick:Temperature_Sensor ;
                visu:hasPosition [ visu:x 100.0 ; visu:y 10.0 ] .
            "
        ));

        assert!(report.is_clean(), "{:?}", report.warnings());
        assert_eq!(report.entities(), 2);

        let valve = scene.entity(scene.entity_by_iri(BLDG.iri("V1")).unwrap()).unwrap();
        assert_eq!(valve.position(), Point::new(75.0, 175.0));
        assert_eq!(valve.rotation(), 90.0);
        assert_eq!(valve.label(), "Main valve");

        // Points are pulled back onto the point line.
        let sensor = scene.entity(scene.entity_by_iri(BLDG.iri("T1")).unwrap()).unwrap();
        assert_eq!(sensor.position().y(), 900.0 - 25.0);
    }

    #[test]
    fn test_unknown_types_and_malformed_positions_warn() {
        let (scene, report) = import(&format!(
            "{PREFIXES}
            bldg:C1 a brick:Chiller .
            bldg:P1 a brick:Pump ; visu:hasPosition [ visu:x \"left\" ] .
            [] a brick:Fan .
            "
        ));

        assert_eq!(scene.entity_count(), 1);
        assert_eq!(
            scene.entity(scene.entity_by_iri(BLDG.iri("P1")).unwrap()).unwrap().position(),
            Point::new(0.0, 0.0)
        );
        assert_eq!(report.warnings().len(), 3);
        assert!(report.warnings().contains(&ImportWarning::UnknownEntityType {
            subject: format!("<{}>", BLDG.iri("C1")),
            type_iri: BRICK.iri("Chiller"),
        }));
        assert!(report.warnings().contains(&ImportWarning::MalformedPosition {
            subject: BLDG.iri("P1"),
        }));
        assert!(report.warnings().contains(&ImportWarning::BlankEntity {
            type_iri: BRICK.iri("Fan"),
        }));
    }

    #[test]
    fn test_visual_record_is_not_duplicated() {
        let (scene, report) = import(&format!(
            "{PREFIXES}
            bldg:V1 a brick:Valve .
            bldg:P1 a brick:Pump .
            bldg:V1 brick:feeds bldg:P1 .
            bldg:Connection_1 a visu:Connection ;
                visu:sourceEntity bldg:V1 ;
                visu:targetEntity bldg:P1 ;
                visu:relationshipType \"https://brickschema.org/schema/Brick#feeds\" ;
                visu:color [ visu:red 255 ; visu:green 0 ; visu:blue 0 ] ;
                visu:lineStyle 3 ;
                visu:lineWidth 4 ;
                visu:hasJoint [ visu:jointIndex 1 ; visu:x 300.0 ; visu:y 300.0 ] ,
                              [ visu:jointIndex 0 ; visu:x 100.0 ; visu:y 300.0 ] .
            "
        ));

        assert!(report.is_clean(), "{:?}", report.warnings());
        assert_eq!(report.visual_connections(), 1);
        assert_eq!(report.implicit_connections(), 0);
        assert_eq!(scene.connection_count(), 1);

        let (_, connection) = scene.connections().next().unwrap();
        assert_eq!(connection.iri(), BLDG.iri("Connection_1"));
        assert_eq!(connection.stroke().style(), StrokeStyle::Dotted);
        assert_eq!(connection.stroke().width(), 4.0);
        assert_eq!(connection.stroke().color().to_rgb8(), Rgb8::new(255, 0, 0));
        let joints: Vec<_> = connection.joints().iter().map(|joint| joint.position()).collect();
        assert_eq!(
            joints,
            vec![Point::new(100.0, 300.0), Point::new(300.0, 300.0)]
        );
    }

    #[test]
    fn test_implicit_connections_use_default_stroke() {
        let (scene, report) = import(&format!(
            "{PREFIXES}
            bldg:B1 a rec:Building .
            bldg:L1 a rec:Level .
            bldg:B1 brick:hasLocation bldg:L1 .
            bldg:L1 brick:hasLocation bldg:Elsewhere .
            "
        ));

        assert_eq!(report.implicit_connections(), 1);
        let (_, connection) = scene.connections().next().unwrap();
        assert_eq!(connection.relationship(), Relationship::HasLocation);
        assert_eq!(connection.stroke().style(), StrokeStyle::Solid);
        assert_eq!(connection.stroke().width(), 2.0);
        assert!(scene.entity_by_iri(BLDG.iri("Elsewhere")).is_none());
    }

    #[test]
    fn test_broken_visual_records_are_skipped() {
        let (scene, report) = import(&format!(
            "{PREFIXES}
            bldg:V1 a brick:Valve .
            bldg:C1 a visu:Connection ; visu:sourceEntity bldg:V1 .
            bldg:C2 a visu:Connection ;
                visu:sourceEntity bldg:V1 ;
                visu:targetEntity bldg:Ghost ;
                visu:relationshipType \"feeds\" .
            bldg:C3 a visu:Connection ;
                visu:sourceEntity bldg:V1 ;
                visu:targetEntity bldg:V1 ;
                visu:relationshipType \"feeds\" .
            "
        ));

        assert_eq!(scene.connection_count(), 0);
        assert_eq!(
            report.warnings(),
            &[
                ImportWarning::MissingEndpoint {
                    record: format!("<{}>", BLDG.iri("C1")),
                    endpoint: "target",
                },
                ImportWarning::UnresolvedEndpoint {
                    record: format!("<{}>", BLDG.iri("C2")),
                    entity: BLDG.iri("Ghost"),
                },
                ImportWarning::RejectedConnection {
                    record: format!("<{}>", BLDG.iri("C3")),
                    reason: ConnectionError::SelfLoop,
                },
            ]
        );
    }

    #[test]
    fn test_references_attach_to_points_only() {
        let (scene, report) = import(&format!(
            "{PREFIXES}
            bldg:T1 a brick:Temperature_Sensor ;
                ref:hasExternalReference [
                    bacnet:object-identifier \"analog-input,5\" ;
                    ref:BACnetURI \"bacnet://1/analog-input,5\"
                ] .
            bldg:V1 a brick:Valve ;
                ref:hasExternalReference [ ref:hasTimeseriesId \"ts\" ] .
            bldg:T2 a brick:Position_Sensor ;
                ref:hasExternalReference [ rdfs:comment \"unknown\" ] .
            "
        ));

        assert_eq!(report.references(), 1);
        let sensor = scene.entity(scene.entity_by_iri(BLDG.iri("T1")).unwrap()).unwrap();
        let reference = sensor.reference().unwrap();
        assert_eq!(
            reference.bacnet_encoding(),
            Some(crate::reference::BacnetEncodingKind::Uri)
        );
        assert!(report.warnings().contains(&ImportWarning::ReferenceOnNonPoint {
            subject: BLDG.iri("V1"),
        }));
        assert!(report.warnings().contains(&ImportWarning::UndeterminedReference {
            subject: BLDG.iri("T2"),
        }));
    }

    #[test]
    fn test_reimport_skips_duplicates() {
        let library = EntityLibrary::standard();
        let mut scene = SceneGraph::new(SceneSettings::default());
        let valve = scene
            .place_entity(&library, BRICK.iri("Valve"), Point::new(100.0, 100.0))
            .unwrap();
        let pump = scene
            .place_entity(&library, BRICK.iri("Pump"), Point::new(300.0, 100.0))
            .unwrap();
        scene
            .connect(
                valve,
                pump,
                Relationship::Feeds,
                StrokeDefinition::default(),
                None,
            )
            .unwrap();

        let doc = export_scene(&scene);
        let report = import_document(&mut scene, &doc, &library);

        assert_eq!(scene.entity_count(), 2);
        assert_eq!(scene.connection_count(), 1);
        assert_eq!(report.entities(), 0);
        assert_eq!(
            report
                .warnings()
                .iter()
                .filter(|w| matches!(w, ImportWarning::DuplicateInstance { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_literal_positions_are_accepted_as_numbers() {
        let mut doc = GraphDocument::new();
        let subject = Term::Iri(BLDG.iri("R1"));
        doc.insert(subject.clone(), vocab::rdf_type(), REC.iri("Room"));
        let position = doc.fresh_blank();
        doc.insert(subject, VISU.iri(term::HAS_POSITION), position.clone());
        doc.insert(position.clone(), VISU.iri(term::X), Literal::string("425"));
        doc.insert(position, VISU.iri(term::Y), Literal::integer(100));

        let mut scene = SceneGraph::new(SceneSettings::default());
        let report = import_document(&mut scene, &doc, &EntityLibrary::standard());

        assert!(report.is_clean());
        let room = scene.entity(scene.entity_by_iri(BLDG.iri("R1")).unwrap()).unwrap();
        assert_eq!(room.position(), Point::new(425.0, 100.0));
    }
}
