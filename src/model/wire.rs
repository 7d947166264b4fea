//! JSON wire format for maps
//!
//! The same shapes are read from the map-definition file and written in
//! API responses.

use serde::{Deserialize, Serialize};

use super::{Building, Coord, Map, Office, Road};

/// Root of the map-definition file
#[derive(Debug, Deserialize)]
pub struct GameDoc {
    pub maps: Vec<MapDoc>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MapDoc {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub roads: Vec<RoadDoc>,
    #[serde(default)]
    pub buildings: Vec<BuildingDoc>,
    #[serde(default)]
    pub offices: Vec<OfficeDoc>,
}

/// Road as `{x0, y0}` plus exactly one of `x1` (horizontal) or `y1` (vertical)
#[derive(Debug, Deserialize, Serialize)]
pub struct RoadDoc {
    pub x0: Coord,
    pub y0: Coord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<Coord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<Coord>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BuildingDoc {
    pub x: Coord,
    pub y: Coord,
    pub w: Coord,
    pub h: Coord,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OfficeDoc {
    pub id: String,
    pub x: Coord,
    pub y: Coord,
    #[serde(rename = "offsetX")]
    pub offset_x: Coord,
    #[serde(rename = "offsetY")]
    pub offset_y: Coord,
}

/// Entry of the map listing
#[derive(Debug, Serialize)]
pub struct MapSummary<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

impl<'a> From<&'a Map> for MapSummary<'a> {
    fn from(map: &'a Map) -> Self {
        Self {
            id: map.id().as_str(),
            name: map.name(),
        }
    }
}

impl From<&Road> for RoadDoc {
    fn from(road: &Road) -> Self {
        let start = road.start();
        let end = road.end();
        let (x1, y1) = if road.is_horizontal() {
            (Some(end.x), None)
        } else {
            (None, Some(end.y))
        };
        Self {
            x0: start.x,
            y0: start.y,
            x1,
            y1,
        }
    }
}

impl From<&Building> for BuildingDoc {
    fn from(building: &Building) -> Self {
        let bounds = building.bounds();
        Self {
            x: bounds.position.x,
            y: bounds.position.y,
            w: bounds.size.width,
            h: bounds.size.height,
        }
    }
}

impl From<&Office> for OfficeDoc {
    fn from(office: &Office) -> Self {
        let position = office.position();
        let offset = office.offset();
        Self {
            id: office.id().as_str().to_string(),
            x: position.x,
            y: position.y,
            offset_x: offset.dx,
            offset_y: offset.dy,
        }
    }
}

impl From<&Map> for MapDoc {
    fn from(map: &Map) -> Self {
        Self {
            id: map.id().as_str().to_string(),
            name: map.name().to_string(),
            roads: map.roads().iter().map(RoadDoc::from).collect(),
            buildings: map.buildings().iter().map(BuildingDoc::from).collect(),
            offices: map.offices().iter().map(OfficeDoc::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MapId, Point};

    #[test]
    fn test_road_emits_single_end_coordinate() {
        let h = RoadDoc::from(&Road::horizontal(Point { x: 0, y: 0 }, 40));
        assert_eq!(
            serde_json::to_string(&h).unwrap(),
            r#"{"x0":0,"y0":0,"x1":40}"#
        );

        let v = RoadDoc::from(&Road::vertical(Point { x: 40, y: 0 }, 30));
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            r#"{"x0":40,"y0":0,"y1":30}"#
        );
    }

    #[test]
    fn test_summary_shape() {
        let map = Map::new(MapId::new("map1"), "Map 1");
        let json = serde_json::to_string(&MapSummary::from(&map)).unwrap();
        assert_eq!(json, r#"{"id":"map1","name":"Map 1"}"#);
    }
}
