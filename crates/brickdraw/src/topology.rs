//! Spatial topology layout for building-model imports.
//!
//! Reading building-information-model files is left to a
//! [`TopologyExtractor`] implementation. This module lays out what such an
//! extractor finds, a [`SpatialHierarchy`] of buildings, storeys and spaces,
//! as a graph document the regular import passes understand.

use std::path::Path;

use log::debug;

use brickdraw_core::{
    identifier::Iri,
    vocab::{self, BLDG, REC, Relationship, VISU, term},
};
use brickdraw_rdf::{GraphDocument, Literal, Term};

use crate::error::BrickdrawError;

const BUILDING_POSITION: (f64, f64) = (50.0, 50.0);
const START_X: f64 = 100.0;
const LEVEL_START_Y: f64 = 100.0;
const LEVEL_SPACING: f64 = 100.0;
const ROOM_SPACING: f64 = 100.0;
const ROOM_ROW_SPACING: f64 = 60.0;
const ROOMS_PER_ROW: usize = 8;
/// Horizontal gap between the level column and the first room.
const ROOM_OFFSET_X: f64 = 300.0;

/// Reads a building model file into a semantic graph.
pub trait TopologyExtractor {
    /// Extracts the topology of the model stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BrickdrawError::Extract`] or [`BrickdrawError::Io`] when the
    /// model cannot be read.
    fn extract(&self, path: &Path) -> Result<GraphDocument, BrickdrawError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    global_id: String,
    name: String,
}

impl Building {
    pub fn new(global_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            global_id: global_id.into(),
            name: name.into(),
        }
    }
}

/// A building storey with the spaces it contains.
#[derive(Debug, Clone, PartialEq)]
pub struct Storey {
    global_id: String,
    name: String,
    elevation: Option<f64>,
    building: Option<String>,
    spaces: Vec<Space>,
}

impl Storey {
    /// Creates a storey without elevation, parent building or spaces.
    pub fn new(global_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            global_id: global_id.into(),
            name: name.into(),
            elevation: None,
            building: None,
            spaces: Vec::new(),
        }
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    /// Sets the GlobalId of the building containing this storey.
    pub fn in_building(mut self, building: impl Into<String>) -> Self {
        self.building = Some(building.into());
        self
    }

    pub fn with_space(mut self, space: Space) -> Self {
        self.spaces.push(space);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    global_id: String,
    name: Option<String>,
}

impl Space {
    pub fn new(global_id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            global_id: global_id.into(),
            name,
        }
    }

    fn sort_key(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.global_id)
    }
}

/// Buildings and storeys found in a building model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpatialHierarchy {
    buildings: Vec<Building>,
    storeys: Vec<Storey>,
}

impl SpatialHierarchy {
    pub fn new(buildings: Vec<Building>, storeys: Vec<Storey>) -> Self {
        Self {
            buildings,
            storeys,
        }
    }
}

/// Lays out a spatial hierarchy as a graph document.
///
/// Buildings sit at the top left. Storeys are stacked in a column below,
/// highest elevation first, and each storey's rooms follow on its row,
/// sorted by name and wrapped every eight rooms. Containment is expressed
/// with `brick:hasLocation` from building to level and level to room.
pub fn topology_document(hierarchy: &SpatialHierarchy) -> GraphDocument {
    let mut doc = GraphDocument::new();

    for building in &hierarchy.buildings {
        let iri = element_iri(&building.global_id);
        write_element(
            &mut doc,
            iri,
            REC.iri("Building"),
            &building.name,
            BUILDING_POSITION,
        );
    }

    let mut storeys: Vec<&Storey> = hierarchy.storeys.iter().collect();
    storeys.sort_by(|a, b| {
        b.elevation
            .unwrap_or_default()
            .total_cmp(&a.elevation.unwrap_or_default())
    });

    for (level_index, storey) in storeys.into_iter().enumerate() {
        let level = element_iri(&storey.global_id);
        let level_y = LEVEL_START_Y + level_index as f64 * LEVEL_SPACING;
        write_element(
            &mut doc,
            level,
            REC.iri("Level"),
            &storey.name,
            (START_X, level_y),
        );
        match &storey.building {
            Some(building) => {
                doc.insert(
                    element_iri(building),
                    Relationship::HasLocation.iri(),
                    level,
                );
            }
            None => debug!(storey = storey.global_id.as_str(); "Storey without building"),
        }

        let mut spaces: Vec<&Space> = storey.spaces.iter().collect();
        spaces.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
        for (room_index, space) in spaces.into_iter().enumerate() {
            let room = element_iri(&space.global_id);
            let row = (room_index / ROOMS_PER_ROW) as f64;
            let column = (room_index % ROOMS_PER_ROW) as f64;
            write_element(
                &mut doc,
                room,
                REC.iri("Room"),
                space.name.as_deref().unwrap_or_default(),
                (
                    START_X + ROOM_OFFSET_X + column * ROOM_SPACING,
                    level_y + row * ROOM_ROW_SPACING,
                ),
            );
            doc.insert(level, Relationship::HasLocation.iri(), room);
        }
    }

    doc
}

/// Maps an IFC GlobalId to an instance IRI, keeping only ASCII alphanumerics.
fn element_iri(global_id: &str) -> Iri {
    let local: String = global_id
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    BLDG.iri(&local)
}

fn write_element(doc: &mut GraphDocument, iri: Iri, type_iri: Iri, name: &str, at: (f64, f64)) {
    let subject = Term::Iri(iri);
    doc.insert(subject.clone(), vocab::rdf_type(), type_iri);
    if !name.is_empty() {
        doc.insert(subject.clone(), vocab::rdfs_label(), Literal::string(name));
    }
    let position = doc.fresh_blank();
    doc.insert(subject, VISU.iri(term::HAS_POSITION), position.clone());
    doc.insert(position.clone(), VISU.iri(term::X), Literal::double(at.0));
    doc.insert(position, VISU.iri(term::Y), Literal::double(at.1));
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn position(doc: &GraphDocument, iri: Iri) -> (f64, f64) {
        let node = doc
            .object(&Term::Iri(iri), VISU.iri(term::HAS_POSITION))
            .unwrap();
        let x = doc.object(node, VISU.iri(term::X)).and_then(Term::as_f64);
        let y = doc.object(node, VISU.iri(term::Y)).and_then(Term::as_f64);
        (x.unwrap(), y.unwrap())
    }

    #[test]
    fn test_element_iri_strips_punctuation() {
        assert_eq!(
            element_iri("2O2Fr$t4X7Zf8NOew3FL_9"),
            BLDG.iri("2O2Frt4X7Zf8NOew3FL9")
        );
    }

    #[test]
    fn test_levels_sorted_by_descending_elevation() {
        let hierarchy = SpatialHierarchy::new(
            vec![Building::new("B-1", "Office")],
            vec![
                Storey::new("L0", "Ground").with_elevation(0.0).in_building("B-1"),
                Storey::new("L1", "First").with_elevation(3.5).in_building("B-1"),
                Storey::new("LX", "Unknown"),
            ],
        );
        let doc = topology_document(&hierarchy);

        assert_eq!(position(&doc, BLDG.iri("B1")), (50.0, 50.0));
        assert_eq!(position(&doc, BLDG.iri("L1")), (100.0, 100.0));
        // Missing elevations count as zero and keep their input order.
        assert_eq!(position(&doc, BLDG.iri("L0")), (100.0, 200.0));
        assert_eq!(position(&doc, BLDG.iri("LX")), (100.0, 300.0));

        assert!(doc.contains(
            &Term::Iri(BLDG.iri("B1")),
            Relationship::HasLocation.iri(),
            &Term::Iri(BLDG.iri("L1"))
        ));
        assert_eq!(
            doc.subjects(Relationship::HasLocation.iri(), &Term::Iri(BLDG.iri("LX")))
                .count(),
            0
        );
    }

    #[test]
    fn test_rooms_wrap_every_eight() {
        let mut storey = Storey::new("L1", "Level 1").with_elevation(0.0);
        for index in (0..10).rev() {
            storey = storey.with_space(Space::new(
                format!("S{index}"),
                Some(format!("Room {index:02}")),
            ));
        }
        let doc = topology_document(&SpatialHierarchy::new(Vec::new(), vec![storey]));

        assert_eq!(position(&doc, BLDG.iri("S0")), (400.0, 100.0));
        assert_eq!(position(&doc, BLDG.iri("S7")), (1100.0, 100.0));
        let (x, y) = position(&doc, BLDG.iri("S9"));
        assert_approx_eq!(f64, x, 500.0);
        assert_approx_eq!(f64, y, 160.0);
        assert_eq!(
            doc.objects(&Term::Iri(BLDG.iri("L1")), Relationship::HasLocation.iri())
                .count(),
            10
        );
        assert_eq!(
            doc.object(&Term::Iri(BLDG.iri("S3")), vocab::rdfs_label())
                .and_then(Term::text)
                .as_deref(),
            Some("Room 03")
        );
    }
}
