pub type TileId = u16;

pub const EMPTY: TileId = 0;
pub const GRASS: TileId = 1;
pub const DIRT: TileId = 2;
pub const SAND: TileId = 3;
pub const WATER: TileId = 4;
pub const DEEP_WATER: TileId = 5;
pub const STONE: TileId = 6;
pub const SNOW: TileId = 7;

// Overlay objects share the id space with terrain.
pub const TREE: TileId = 32;
pub const PINE_TREE: TileId = 33;
pub const ROCK: TileId = 34;
pub const IRON_ORE: TileId = 35;
pub const GOLD_ORE: TileId = 36;
pub const BUSH: TileId = 37;
pub const FLOWER: TileId = 38;

pub const TREE_OVERLAYS: [TileId; 2] = [TREE, PINE_TREE];
pub const ROCK_OVERLAYS: [TileId; 3] = [ROCK, IRON_ORE, GOLD_ORE];

pub const KNOWN_TILES: [TileId; 15] = [
    EMPTY, GRASS, DIRT, SAND, WATER, DEEP_WATER, STONE, SNOW, TREE, PINE_TREE, ROCK, IRON_ORE,
    GOLD_ORE, BUSH, FLOWER,
];

pub fn is_tree(tile: TileId) -> bool {
    TREE_OVERLAYS.contains(&tile)
}

pub fn is_rock(tile: TileId) -> bool {
    ROCK_OVERLAYS.contains(&tile)
}

pub fn tile_name(tile: TileId) -> Option<&'static str> {
    let name = match tile {
        EMPTY => "empty",
        GRASS => "grass",
        DIRT => "dirt",
        SAND => "sand",
        WATER => "water",
        DEEP_WATER => "deep water",
        STONE => "stone",
        SNOW => "snow",
        TREE => "tree",
        PINE_TREE => "pine tree",
        ROCK => "rock",
        IRON_ORE => "iron ore",
        GOLD_ORE => "gold ore",
        BUSH => "bush",
        FLOWER => "flower",
        _ => return None,
    };
    Some(name)
}

/// Inverse of [`tile_name`]; also accepts `_` in place of spaces and numeric ids.
pub fn tile_by_name(name: &str) -> Option<TileId> {
    let name = name.trim();
    if let Ok(id) = name.parse::<TileId>() {
        return Some(id);
    }
    let wanted = name.replace('_', " ").to_ascii_lowercase();
    KNOWN_TILES
        .into_iter()
        .find(|&tile| tile_name(tile) == Some(wanted.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_back_to_tiles() {
        for tile in KNOWN_TILES {
            let name = tile_name(tile).unwrap();
            assert_eq!(tile_by_name(name), Some(tile));
        }
        assert_eq!(tile_by_name("Deep_Water"), Some(DEEP_WATER));
        assert_eq!(tile_by_name("99"), Some(99));
        assert_eq!(tile_by_name("lava"), None);
    }

    #[test]
    fn overlay_classes_are_disjoint() {
        for tile in TREE_OVERLAYS {
            assert!(is_tree(tile));
            assert!(!is_rock(tile));
        }
        for tile in ROCK_OVERLAYS {
            assert!(is_rock(tile));
            assert!(!is_tree(tile));
        }
        assert!(!is_tree(BUSH) && !is_rock(BUSH));
    }

    #[test]
    fn unknown_tiles_have_no_name() {
        assert_eq!(tile_name(GOLD_ORE), Some("gold ore"));
        assert_eq!(tile_name(999), None);
    }
}
