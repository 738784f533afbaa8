use log::info;

use brickdraw_core::vocab::{self, VISU, term};
use brickdraw_rdf::{GraphDocument, Literal, Term};

use crate::scene::{ConnectionInstance, EntityInstance, SceneGraph};

/// Flattens the scene into a graph document.
///
/// Every entity yields its type, a position node, a rotation and, when
/// set, a label and an external reference. Every complete connection yields
/// both the semantic triple `(source, relationship, target)` and a
/// `visu:Connection` record with its stroke and joints. Drafts are never
/// exported.
pub fn export_scene(scene: &SceneGraph) -> GraphDocument {
    let mut doc = GraphDocument::new();

    for (_, entity) in scene.entities() {
        write_entity(&mut doc, entity);
    }

    let mut connections = 0;
    for (_, connection) in scene.connections() {
        let source = scene.entity(connection.source());
        let target = connection.target().and_then(|id| scene.entity(id));
        if let (Some(source), Some(target)) = (source, target) {
            write_connection(&mut doc, connection, source, target);
            connections += 1;
        }
    }

    info!(
        entities = scene.entity_count(),
        connections = connections,
        triples = doc.len();
        "Exported scene"
    );
    doc
}

fn write_entity(doc: &mut GraphDocument, entity: &EntityInstance) {
    let subject = Term::Iri(entity.iri());
    doc.insert(subject.clone(), vocab::rdf_type(), entity.entity_type().iri());

    let position = doc.fresh_blank();
    doc.insert(subject.clone(), VISU.iri(term::HAS_POSITION), position.clone());
    doc.insert(
        position.clone(),
        VISU.iri(term::X),
        Literal::double(f64::from(entity.position().x())),
    );
    doc.insert(
        position,
        VISU.iri(term::Y),
        Literal::double(f64::from(entity.position().y())),
    );
    doc.insert(
        subject.clone(),
        VISU.iri(term::ROTATION),
        Literal::integer(entity.rotation().round() as i64),
    );

    if !entity.label().is_empty() {
        doc.insert(
            subject.clone(),
            vocab::rdfs_label(),
            Literal::string(entity.label()),
        );
    }
    if let Some(reference) = entity.reference() {
        reference.write(doc, &subject);
    }
}

fn write_connection(
    doc: &mut GraphDocument,
    connection: &ConnectionInstance,
    source: &EntityInstance,
    target: &EntityInstance,
) {
    let relationship = connection.relationship();
    doc.insert(source.iri(), relationship.iri(), target.iri());

    let record = Term::Iri(connection.iri());
    doc.insert(record.clone(), vocab::rdf_type(), VISU.iri(term::CONNECTION));
    doc.insert(record.clone(), VISU.iri(term::SOURCE_ENTITY), source.iri());
    doc.insert(record.clone(), VISU.iri(term::TARGET_ENTITY), target.iri());
    doc.insert(
        record.clone(),
        VISU.iri(term::RELATIONSHIP_TYPE),
        Literal::string(relationship.iri().as_string()),
    );

    let stroke = connection.stroke();
    let rgb = stroke.color().to_rgb8();
    let color = doc.fresh_blank();
    doc.insert(record.clone(), VISU.iri(term::COLOR), color.clone());
    for (channel, value) in [
        (term::RED, rgb.red),
        (term::GREEN, rgb.green),
        (term::BLUE, rgb.blue),
    ] {
        doc.insert(
            color.clone(),
            VISU.iri(channel),
            Literal::integer(i64::from(value)),
        );
    }
    doc.insert(
        record.clone(),
        VISU.iri(term::LINE_STYLE),
        Literal::integer(stroke.style().code()),
    );
    doc.insert(
        record.clone(),
        VISU.iri(term::LINE_WIDTH),
        Literal::integer(stroke.width().round() as i64),
    );

    for (index, joint) in connection.joints().iter().enumerate() {
        let node = doc.fresh_blank();
        doc.insert(record.clone(), VISU.iri(term::HAS_JOINT), node.clone());
        doc.insert(
            node.clone(),
            VISU.iri(term::JOINT_INDEX),
            Literal::integer(index as i64),
        );
        doc.insert(
            node.clone(),
            VISU.iri(term::X),
            Literal::double(f64::from(joint.position().x())),
        );
        doc.insert(
            node,
            VISU.iri(term::Y),
            Literal::double(f64::from(joint.position().y())),
        );
    }
}
