//! Namespaces and terms of the Brick / RealEstateCore vocabulary.
//!
//! Diagram documents mix three groups of terms:
//!
//! - ontology terms: entity types and the eight [`Relationship`] predicates,
//! - external-reference terms (`ref:` and `bacnet:`),
//! - visual metadata under the `visu:` namespace, which has no meaning in the
//!   ontology and only exists so positions, colors and joints survive a save.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::identifier::Iri;

/// A prefix/base pair used to build IRIs and to abbreviate them in Turtle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace {
    prefix: &'static str,
    base: &'static str,
}

impl Namespace {
    pub const fn new(prefix: &'static str, base: &'static str) -> Self {
        Self { prefix, base }
    }

    /// Returns the Turtle prefix label (without the trailing colon).
    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Returns the base IRI every term of this namespace starts with.
    pub fn base(&self) -> &'static str {
        self.base
    }

    /// Builds the IRI for `local_name` inside this namespace.
    pub fn iri(&self, local_name: &str) -> Iri {
        Iri::from_parts(self.base, local_name)
    }

    /// Returns true if `iri` belongs to this namespace.
    pub fn contains(&self, iri: Iri) -> bool {
        iri.starts_with(self.base)
    }
}

pub const RDF: Namespace = Namespace::new("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
pub const RDFS: Namespace = Namespace::new("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
pub const XSD: Namespace = Namespace::new("xsd", "http://www.w3.org/2001/XMLSchema#");
pub const BRICK: Namespace = Namespace::new("brick", "https://brickschema.org/schema/Brick#");
pub const REC: Namespace = Namespace::new("rec", "https://doc.realestatecore.io/4.0/#");
pub const REF: Namespace = Namespace::new("ref", "https://brickschema.org/schema/Brick/ref#");
pub const BACNET: Namespace = Namespace::new("bacnet", "http://data.ashrae.org/bacnet/2020#");
pub const VISU: Namespace = Namespace::new("visu", "http://example.org/design#");
pub const BLDG: Namespace = Namespace::new("bldg", "http://example.org/building/#");

/// Every namespace bound as a prefix when a document is written.
pub const ALL_NAMESPACES: [Namespace; 9] = [RDF, RDFS, XSD, BRICK, REC, REF, BACNET, VISU, BLDG];

/// Local names of the terms the editor reads and writes.
///
/// Each constant is paired with the namespace it lives in; build the full
/// IRI with e.g. `VISU.iri(term::HAS_POSITION)`.
pub mod term {
    // rdf / rdfs
    pub const TYPE: &str = "type";
    pub const LABEL: &str = "label";

    // xsd datatypes
    pub const STRING: &str = "string";
    pub const INTEGER: &str = "integer";
    pub const DOUBLE: &str = "double";

    // visu: entity layout
    pub const HAS_POSITION: &str = "hasPosition";
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const ROTATION: &str = "rotation";

    // visu: connection records
    pub const CONNECTION: &str = "Connection";
    pub const SOURCE_ENTITY: &str = "sourceEntity";
    pub const TARGET_ENTITY: &str = "targetEntity";
    pub const RELATIONSHIP_TYPE: &str = "relationshipType";
    pub const COLOR: &str = "color";
    pub const RED: &str = "red";
    pub const GREEN: &str = "green";
    pub const BLUE: &str = "blue";
    pub const LINE_STYLE: &str = "lineStyle";
    pub const LINE_WIDTH: &str = "lineWidth";
    pub const HAS_JOINT: &str = "hasJoint";
    pub const JOINT_INDEX: &str = "jointIndex";

    // ref: external references
    pub const HAS_EXTERNAL_REFERENCE: &str = "hasExternalReference";
    pub const BACNET_REFERENCE: &str = "BACnetReference";
    pub const TIMESERIES_REFERENCE: &str = "TimeseriesReference";
    pub const BACNET_URI: &str = "BACnetURI";
    pub const HAS_TIMESERIES_ID: &str = "hasTimeseriesId";
    pub const STORED_AT: &str = "storedAt";

    // bacnet: structured reference fields
    pub const OBJECT_IDENTIFIER: &str = "object-identifier";
    pub const OBJECT_NAME: &str = "object-name";
    pub const OBJECT_TYPE: &str = "object-type";
    pub const DESCRIPTION: &str = "description";
    pub const READ_PROPERTY: &str = "read-property";
    pub const OBJECT_OF: &str = "objectOf";
}

/// `rdf:type`
pub fn rdf_type() -> Iri {
    RDF.iri(term::TYPE)
}

/// `rdfs:label`
pub fn rdfs_label() -> Iri {
    RDFS.iri(term::LABEL)
}

/// The closed set of Brick relationships a connection can carry.
///
/// Deserializes from the camel-case local name, e.g. `"feeds"` or
/// `"isPointOf"`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relationship {
    HasLocation,
    IsLocationOf,
    #[default]
    Feeds,
    IsFedBy,
    HasPoint,
    IsPointOf,
    HasPart,
    IsPartOf,
}

impl Relationship {
    /// All relationships, in the order the import engine scans them.
    pub const ALL: [Relationship; 8] = [
        Self::HasLocation,
        Self::IsLocationOf,
        Self::Feeds,
        Self::IsFedBy,
        Self::HasPoint,
        Self::IsPointOf,
        Self::HasPart,
        Self::IsPartOf,
    ];

    /// Returns the Brick local name.
    pub fn name(self) -> &'static str {
        match self {
            Self::HasLocation => "hasLocation",
            Self::IsLocationOf => "isLocationOf",
            Self::Feeds => "feeds",
            Self::IsFedBy => "isFedBy",
            Self::HasPoint => "hasPoint",
            Self::IsPointOf => "isPointOf",
            Self::HasPart => "hasPart",
            Self::IsPartOf => "isPartOf",
        }
    }

    /// Returns the full `brick:` IRI of this relationship.
    pub fn iri(self) -> Iri {
        BRICK.iri(self.name())
    }

    /// Maps a full IRI back to a relationship.
    ///
    /// Only `brick:` IRIs are recognized.
    pub fn from_iri(iri: Iri) -> Option<Self> {
        if !BRICK.contains(iri) {
            return None;
        }
        let local_name = iri.local_name();
        Self::ALL.into_iter().find(|rel| rel.name() == local_name)
    }

    /// Returns the relationship read in the opposite direction.
    pub fn inverse(self) -> Self {
        match self {
            Self::HasLocation => Self::IsLocationOf,
            Self::IsLocationOf => Self::HasLocation,
            Self::Feeds => Self::IsFedBy,
            Self::IsFedBy => Self::Feeds,
            Self::HasPoint => Self::IsPointOf,
            Self::IsPointOf => Self::HasPoint,
            Self::HasPart => Self::IsPartOf,
            Self::IsPartOf => Self::HasPart,
        }
    }

    /// Returns true for `hasPoint` and `isPointOf`.
    ///
    /// These connections are drawn dashed and follow the Point visibility
    /// toggle.
    pub fn is_point_relation(self) -> bool {
        matches!(self, Self::HasPoint | Self::IsPointOf)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Relationship {
    type Err = String;

    /// Accepts either the local name (`feeds`) or the full IRI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rel| rel.name() == s)
            .or_else(|| Self::from_iri(Iri::new(s)))
            .ok_or_else(|| format!("unknown relationship `{s}`"))
    }
}
