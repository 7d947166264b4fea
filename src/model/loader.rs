//! Map-definition file loader

use std::path::Path;
use thiserror::Error;

use super::wire::{GameDoc, MapDoc, RoadDoc};
use super::{Building, Game, Map, MapId, Office, OfficeId, Offset, Point, Rectangle, Road, Size};

/// Errors raised while loading the map-definition file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read map file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid map file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate map id '{0}'")]
    DuplicateMap(String),

    #[error("duplicate office id '{office}' on map '{map}'")]
    DuplicateOffice { map: String, office: String },
}

/// Read and parse the map-definition file at `path`
pub fn load_game(path: &Path) -> Result<Game, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_game(&text)
}

/// Parse a map-definition document
pub fn parse_game(text: &str) -> Result<Game, LoadError> {
    let doc: GameDoc = serde_json::from_str(text)?;
    let mut game = Game::new();
    for map in doc.maps {
        game.add_map(build_map(map)?)?;
    }
    Ok(game)
}

fn build_map(doc: MapDoc) -> Result<Map, LoadError> {
    let mut map = Map::new(MapId::new(doc.id), doc.name);

    // Roads without an end coordinate are skipped
    for road in doc.roads.iter().filter_map(build_road) {
        map.add_road(road);
    }

    for b in doc.buildings {
        map.add_building(Building::new(Rectangle {
            position: Point { x: b.x, y: b.y },
            size: Size {
                width: b.w,
                height: b.h,
            },
        }));
    }

    for o in doc.offices {
        map.add_office(Office::new(
            OfficeId::new(o.id),
            Point { x: o.x, y: o.y },
            Offset {
                dx: o.offset_x,
                dy: o.offset_y,
            },
        ))?;
    }

    Ok(map)
}

fn build_road(doc: &RoadDoc) -> Option<Road> {
    let start = Point {
        x: doc.x0,
        y: doc.y0,
    };
    match (doc.x1, doc.y1) {
        (Some(x1), _) => Some(Road::horizontal(start, x1)),
        (None, Some(y1)) => Some(Road::vertical(start, y1)),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "maps": [
            {
                "id": "map1",
                "name": "Map 1",
                "roads": [
                    { "x0": 0, "y0": 0, "x1": 40 },
                    { "x0": 40, "y0": 0, "y1": 30 },
                    { "x0": 5, "y0": 5 }
                ],
                "buildings": [ { "x": 5, "y": 5, "w": 30, "h": 20 } ],
                "offices": [ { "id": "o0", "x": 40, "y": 30, "offsetX": 5, "offsetY": 0 } ]
            },
            { "id": "map2", "name": "Map 2", "roads": [], "buildings": [], "offices": [] }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let game = parse_game(SAMPLE).unwrap();
        assert_eq!(game.maps().len(), 2);

        let map = game.find_map("map1").unwrap();
        assert_eq!(map.name(), "Map 1");
        assert_eq!(map.roads().len(), 2);
        assert!(map.roads()[0].is_horizontal());
        assert!(!map.roads()[1].is_horizontal());
        assert_eq!(map.buildings()[0].bounds().size.width, 30);
        assert_eq!(map.offices()[0].offset(), Offset { dx: 5, dy: 0 });
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_game("{ not json"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_duplicate_office() {
        let doc = r#"{"maps":[{"id":"m","name":"M","offices":[
            {"id":"o","x":0,"y":0,"offsetX":0,"offsetY":0},
            {"id":"o","x":1,"y":1,"offsetX":0,"offsetY":0}]}]}"#;
        assert!(matches!(
            parse_game(doc),
            Err(LoadError::DuplicateOffice { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_game(Path::new("/nonexistent/map.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
