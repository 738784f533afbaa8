//! Entity catalog: the placeable Brick and RealEstateCore entity types.
//!
//! An [`EntityType`] describes everything the editor needs to place an
//! entity of that type: its IRI, whether it is equipment, a point or a
//! space, its footprint, an SVG outline and the offset of its single port.
//! Entity types are immutable and shared between every instance placed from
//! them.
//!
//! The [`Catalog`] trait is the lookup contract the editor consumes;
//! [`EntityLibrary`] is the built-in implementation.

use std::{collections::BTreeMap, collections::HashMap, rc::Rc};

use log::{debug, warn};
use thiserror::Error;

use crate::{
    geometry::{Point, Size},
    identifier::Iri,
    vocab::{BRICK, REC},
};

/// Error raised by catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("entity type not found for IRI: {0}")]
    NotFound(String),
}

/// Broad classification of an entity type.
///
/// Points are pinned to the point line and follow the visibility toggle;
/// everything else snaps freely to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Equipment,
    Point,
    Space,
}

/// An immutable, placeable entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityType {
    iri: Iri,
    kind: EntityKind,
    size: Size,
    outline: String,
    category: Vec<String>,
    port_offset: Point,
}

impl EntityType {
    /// Creates an entity type with its port at the center of its footprint.
    ///
    /// # Arguments
    ///
    /// * `iri` - Type IRI, e.g. `brick:Valve`.
    /// * `kind` - Equipment, point or space.
    /// * `size` - Footprint in canvas units.
    /// * `outline` - SVG path data drawn in entity-local coordinates.
    /// * `category` - Browsing path from root to leaf.
    pub fn new(
        iri: Iri,
        kind: EntityKind,
        size: Size,
        outline: impl Into<String>,
        category: &[&str],
    ) -> Self {
        Self {
            iri,
            kind,
            size,
            outline: outline.into(),
            category: category.iter().map(|part| (*part).to_owned()).collect(),
            port_offset: size.center(),
        }
    }

    /// Returns a copy of this type with the port moved to `offset`.
    pub fn with_port_offset(mut self, offset: Point) -> Self {
        self.port_offset = offset;
        self
    }

    pub fn iri(&self) -> Iri {
        self.iri
    }

    /// Returns the local name of the type IRI, used as display name.
    pub fn name(&self) -> String {
        self.iri.local_name()
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns true for Point variants.
    pub fn is_point(&self) -> bool {
        self.kind == EntityKind::Point
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the SVG path data of the outline.
    pub fn outline(&self) -> &str {
        &self.outline
    }

    pub fn category(&self) -> &[String] {
        &self.category
    }

    /// Returns the port offset relative to the entity's top-left corner.
    pub fn port_offset(&self) -> Point {
        self.port_offset
    }
}

/// Lookup contract for entity types.
pub trait Catalog {
    /// Looks up an entity type by its IRI.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown IRIs.
    fn lookup(&self, iri: Iri) -> Result<Rc<EntityType>, CatalogError>;

    /// Returns every entity type, in browsing order.
    fn list_all(&self) -> &[Rc<EntityType>];
}

/// The built-in catalog of Brick equipment, Brick points and REC spaces.
///
/// # Examples
///
/// ```
/// use brickdraw_core::catalog::{Catalog, EntityLibrary};
/// use brickdraw_core::vocab::BRICK;
///
/// let library = EntityLibrary::standard();
/// let valve = library.lookup(BRICK.iri("Valve")).unwrap();
/// assert_eq!(valve.size().width(), 50.0);
/// assert!(library.lookup(BRICK.iri("Chiller")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EntityLibrary {
    types: Vec<Rc<EntityType>>,
    by_iri: HashMap<Iri, usize>,
}

const BOX_50X50: &str = "M 0 0 H 50 V 50 H 0 Z";
const BOX_50X100: &str = "M 0 0 H 50 V 100 H 0 Z";
const BOX_200X50: &str = "M 0 0 H 200 V 50 H 0 Z";
const CIRCLE_R25: &str = "M 0 25 A 25 25 0 1 0 50 25 A 25 25 0 1 0 0 25 Z";
const POINT_OUTLINE: &str = "M 0 0 H 25 V 50 H 0 Z";

impl EntityLibrary {
    /// Creates a library from an explicit list of types.
    ///
    /// Later entries with a duplicate IRI are ignored.
    pub fn new(types: Vec<EntityType>) -> Self {
        let mut library = Self {
            types: Vec::with_capacity(types.len()),
            by_iri: HashMap::with_capacity(types.len()),
        };
        for entity_type in types {
            if library.by_iri.contains_key(&entity_type.iri()) {
                warn!(entity_type:% = entity_type.iri(); "Duplicate entity type ignored");
                continue;
            }
            library
                .by_iri
                .insert(entity_type.iri(), library.types.len());
            library.types.push(Rc::new(entity_type));
        }
        debug!(types = library.types.len(); "Entity library built");
        library
    }

    /// Creates the standard library of placeable entity types.
    pub fn standard() -> Self {
        use EntityKind::{Equipment, Point as PointKind, Space};

        let equipment = |name: &str, size: Size, outline: &str, category: &[&str]| {
            EntityType::new(BRICK.iri(name), Equipment, size, outline, category)
        };
        let point = |name: &str, category: &[&str]| {
            EntityType::new(
                BRICK.iri(name),
                PointKind,
                Size::new(25.0, 50.0),
                POINT_OUTLINE,
                category,
            )
        };
        let space = |name: &str, size: Size, outline: &str, category: &[&str]| {
            EntityType::new(REC.iri(name), Space, size, outline, category)
        };

        let small = Size::new(50.0, 50.0);
        let tall = Size::new(50.0, 100.0);
        let wide = Size::new(200.0, 50.0);
        let hvac = ["BRICK", "Equipment", "HVAC"];
        let coil = ["BRICK", "Equipment", "HVAC", "HX", "Coil"];

        Self::new(vec![
            equipment(
                "Valve",
                small,
                "M 0 10 L 0 40 L 25 25 Z M 50 10 L 50 40 L 25 25 Z",
                &["BRICK", "Equipment"],
            ),
            equipment(
                "Bypass_Valve",
                small,
                "M 0 10 L 0 40 L 25 25 Z M 50 10 L 50 40 L 25 25 Z M 10 50 L 40 50 L 25 25 Z",
                &["BRICK", "Equipment", "Valve"],
            ),
            equipment(
                "Pump",
                small,
                &format!("{CIRCLE_R25} M 25 0 L 50 25 L 25 50"),
                &hvac,
            ),
            equipment(
                "Fan",
                small,
                &format!("{CIRCLE_R25} M 25 25 L 8 12 M 25 25 L 42 12 M 25 25 L 25 46"),
                &hvac,
            ),
            equipment(
                "Radiator",
                small,
                &format!("{CIRCLE_R25} M 5 25 A 20 20 0 1 0 45 25 A 20 20 0 1 0 5 25 Z"),
                &["BRICK", "Equipment", "HVAC", "Terminal Unit"],
            ),
            equipment(
                "Boiler",
                Size::new(50.0, 80.0),
                "M 0 0 H 50 V 80 H 0 Z M 12 62 Q 25 20 38 62 Z",
                &hvac,
            )
            .with_port_offset(Point::new(25.0, 80.0)),
            equipment("Heating_Coil", tall, &format!("{BOX_50X100} M 50 100 L 0 0"), &coil),
            equipment("Cooling_Coil", tall, &format!("{BOX_50X100} M 0 100 L 50 0"), &coil),
            equipment(
                "Heat_Exchanger",
                tall,
                &format!("{BOX_50X100} M 50 100 L 0 0 M 50 5 L 5 100 M 45 0 L 0 95"),
                &hvac,
            ),
            equipment("Damper", tall, &format!("{BOX_50X100} M 45 10 L 5 90"), &hvac),
            point("Point", &["BRICK"]),
            point("Temperature_Sensor", &["BRICK", "Point", "Sensor"]),
            point("Temperature_Setpoint", &["BRICK", "Point", "Setpoint"]),
            point("Position_Sensor", &["BRICK", "Point", "Sensor"]),
            point("Position_Setpoint", &["BRICK", "Point", "Setpoint"]),
            space("Room", small, BOX_50X50, &["REC", "Space", "Room"]),
            space("Zone", small, BOX_50X50, &["REC", "Space", "Zones"]),
            space("HVAC_Zone", tall, BOX_50X100, &["REC", "Space", "Zones"]),
            space("Level", wide, BOX_200X50, &["REC", "Space", "Levels"]),
            space("Building", wide, BOX_200X50, &["REC", "Space", "Buildings"]),
        ])
    }

    /// Groups entity types by their category path, joined with `/`.
    ///
    /// Paths are sorted; types keep their library order within a group.
    pub fn category_tree(&self) -> BTreeMap<String, Vec<Rc<EntityType>>> {
        let mut tree: BTreeMap<String, Vec<Rc<EntityType>>> = BTreeMap::new();
        for entity_type in &self.types {
            tree.entry(entity_type.category().join("/"))
                .or_default()
                .push(Rc::clone(entity_type));
        }
        tree
    }
}

impl Default for EntityLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog for EntityLibrary {
    fn lookup(&self, iri: Iri) -> Result<Rc<EntityType>, CatalogError> {
        self.by_iri
            .get(&iri)
            .map(|idx| Rc::clone(&self.types[*idx]))
            .ok_or_else(|| CatalogError::NotFound(iri.as_string()))
    }

    fn list_all(&self) -> &[Rc<EntityType>] {
        &self.types
    }
}
