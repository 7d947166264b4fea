//! Game domain model
//!
//! Read-only collection of maps loaded once at startup. Nothing in the
//! request pipeline mutates these types.

pub mod loader;
pub mod wire;

use std::collections::HashMap;
use std::fmt;

pub use loader::{load_game, LoadError};

/// Map identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapId(String);

impl MapId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Office identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OfficeId(String);

impl OfficeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub type Coord = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: Coord,
    pub height: Coord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    pub position: Point,
    pub size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub dx: Coord,
    pub dy: Coord,
}

/// Road direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Axis-aligned road segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Road {
    orientation: Orientation,
    start: Point,
    end: Point,
}

impl Road {
    pub const fn horizontal(start: Point, end_x: Coord) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            start,
            end: Point { x: end_x, y: start.y },
        }
    }

    pub const fn vertical(start: Point, end_y: Coord) -> Self {
        Self {
            orientation: Orientation::Vertical,
            start,
            end: Point { x: start.x, y: end_y },
        }
    }

    pub const fn is_horizontal(&self) -> bool {
        matches!(self.orientation, Orientation::Horizontal)
    }

    pub const fn start(&self) -> Point {
        self.start
    }

    pub const fn end(&self) -> Point {
        self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Building {
    bounds: Rectangle,
}

impl Building {
    pub const fn new(bounds: Rectangle) -> Self {
        Self { bounds }
    }

    pub const fn bounds(&self) -> Rectangle {
        self.bounds
    }
}

/// Service office placed next to a road
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Office {
    id: OfficeId,
    position: Point,
    offset: Offset,
}

impl Office {
    pub const fn new(id: OfficeId, position: Point, offset: Offset) -> Self {
        Self {
            id,
            position,
            offset,
        }
    }

    pub const fn id(&self) -> &OfficeId {
        &self.id
    }

    pub const fn position(&self) -> Point {
        self.position
    }

    pub const fn offset(&self) -> Offset {
        self.offset
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    id: MapId,
    name: String,
    roads: Vec<Road>,
    buildings: Vec<Building>,
    offices: Vec<Office>,
}

impl Map {
    pub fn new(id: MapId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            roads: Vec::new(),
            buildings: Vec::new(),
            offices: Vec::new(),
        }
    }

    pub const fn id(&self) -> &MapId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn offices(&self) -> &[Office] {
        &self.offices
    }

    pub fn add_road(&mut self, road: Road) {
        self.roads.push(road);
    }

    pub fn add_building(&mut self, building: Building) {
        self.buildings.push(building);
    }

    /// Add an office; office ids are unique within a map
    pub fn add_office(&mut self, office: Office) -> Result<(), LoadError> {
        if self.offices.iter().any(|o| o.id == office.id) {
            return Err(LoadError::DuplicateOffice {
                map: self.id.to_string(),
                office: office.id.as_str().to_string(),
            });
        }
        self.offices.push(office);
        Ok(())
    }
}

/// All maps known to the server, in load order
#[derive(Debug, Default)]
pub struct Game {
    maps: Vec<Map>,
    index: HashMap<MapId, usize>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_map(&mut self, map: Map) -> Result<(), LoadError> {
        if self.index.contains_key(map.id()) {
            return Err(LoadError::DuplicateMap(map.id().to_string()));
        }
        self.index.insert(map.id().clone(), self.maps.len());
        self.maps.push(map);
        Ok(())
    }

    /// Enumerate maps in load order
    pub fn maps(&self) -> &[Map] {
        &self.maps
    }

    pub fn find_map(&self, id: &str) -> Option<&Map> {
        self.index
            .get(&MapId::new(id))
            .and_then(|&i| self.maps.get(i))
    }
}
