//! Deterministic sample world and frame state shared by the snapshot tool and the web demo.

use minimap_core::tile::{
    self, BUSH, DEEP_WATER, DIRT, FLOWER, GOLD_ORE, GRASS, IRON_ORE, PINE_TREE, ROCK, SAND,
    SNOW, STONE, TREE, TileId, WATER,
};
use minimap_core::{
    ChunkError, ChunkLookup, ChunkPosition, FocusPoint, LocalTileCoord, MarkerSet,
    MinimapState, World, WorldPoint,
};

pub const DEFAULT_SEED: u64 = 0x5eed_cafe;
pub const DEFAULT_RADIUS_CHUNKS: i32 = 6;

/// Fixed clock for reproducible snapshots.
pub const DEMO_NOW_MS: u64 = 1_700_000_000_000;

const LAKE_COUNT: usize = 5;
const STONE_RING: f32 = 70.0;
const SNOW_RING: f32 = 88.0;

#[derive(Debug, Clone, Copy)]
struct Lake {
    x: f32,
    y: f32,
    radius: f32,
}

/// Square of `(2 * radius_chunks)^2` chunks around the origin. Chunks outside stay
/// ungenerated.
pub fn sample_world(seed: u64, radius_chunks: i32) -> Result<World, ChunkError> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut world = World::new();
    let size = world.chunk_size() as i32;
    let span = (radius_chunks * size) as f32;

    let lakes: Vec<Lake> = (0..LAKE_COUNT)
        .map(|_| Lake {
            x: (rng.f32() * 2.0 - 1.0) * span * 0.7,
            y: (rng.f32() * 2.0 - 1.0) * span * 0.7,
            radius: 5.0 + rng.f32() * 9.0,
        })
        .collect();

    for cy in -radius_chunks..radius_chunks {
        for cx in -radius_chunks..radius_chunks {
            let position = ChunkPosition::new(cx, cy);
            let chunk = world.register_chunk(position, GRASS)?;

            for ly in 0..size {
                for lx in 0..size {
                    let x = cx * size + lx;
                    let y = cy * size + ly;
                    let local = LocalTileCoord::new(lx as usize, ly as usize);
                    let base = terrain_at(&lakes, x, y, &mut rng);
                    chunk.set_tile(local, base)?;
                    if let Some(object) = overlay_for(base, &mut rng) {
                        chunk.set_overlay(local, object)?;
                    }
                }
            }
        }
    }

    log::debug!(
        "sample world seed {seed:#x}: {} chunks, {} lakes",
        world.len(),
        lakes.len()
    );
    Ok(world)
}

fn terrain_at(lakes: &[Lake], x: i32, y: i32, rng: &mut fastrand::Rng) -> TileId {
    let (fx, fy) = (x as f32, y as f32);
    let jitter = rng.f32() * 3.0;

    for lake in lakes {
        let distance = (fx - lake.x).hypot(fy - lake.y);
        if distance < lake.radius * 0.5 {
            return DEEP_WATER;
        }
        if distance < lake.radius {
            return WATER;
        }
        if distance < lake.radius + 1.5 + jitter * 0.3 {
            return SAND;
        }
    }

    let from_origin = fx.hypot(fy) + jitter;
    if from_origin > SNOW_RING {
        SNOW
    } else if from_origin > STONE_RING {
        STONE
    } else if rng.f32() < 0.08 {
        DIRT
    } else {
        GRASS
    }
}

fn overlay_for(base: TileId, rng: &mut fastrand::Rng) -> Option<TileId> {
    let roll = rng.f32();
    match base {
        GRASS if roll < 0.07 => Some(TREE),
        GRASS if roll < 0.09 => Some(BUSH),
        GRASS if roll < 0.10 => Some(FLOWER),
        SNOW if roll < 0.05 => Some(PINE_TREE),
        STONE if roll < 0.06 => Some(ROCK),
        STONE if roll < 0.08 => Some(IRON_ORE),
        STONE if roll < 0.085 => Some(GOLD_ORE),
        DIRT if roll < 0.05 => Some(ROCK),
        _ => None,
    }
}

/// Player a little off spawn, with a death marker far enough away to need an edge indicator.
pub fn demo_state(mut markers: MarkerSet) -> MinimapState {
    markers.record_death(FocusPoint::new(58.5, 31.5), DEMO_NOW_MS - 60_000);
    MinimapState {
        focus: FocusPoint::new(6.5, 4.5),
        markers,
        now_ms: DEMO_NOW_MS,
    }
}

/// Name of the base tile at `point`, for debug overlays.
pub fn describe(world: &World, point: WorldPoint) -> &'static str {
    world
        .tile_at(point)
        .and_then(tile::tile_name)
        .unwrap_or("ungenerated")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_builds_same_world() {
        let a = sample_world(7, 2).unwrap();
        let b = sample_world(7, 2).unwrap();
        for y in -32..32 {
            for x in -32..32 {
                let point = WorldPoint::new(x, y);
                assert_eq!(a.tile_at(point), b.tile_at(point));
                assert_eq!(a.overlay_at(point), b.overlay_at(point));
            }
        }
    }

    #[test]
    fn covers_requested_square_only() {
        let world = sample_world(DEFAULT_SEED, 2).unwrap();
        assert_eq!(world.len(), 16);
        assert!(world.tile_at(WorldPoint::new(-32, -32)).is_some());
        assert!(world.tile_at(WorldPoint::new(31, 31)).is_some());
        assert!(world.tile_at(WorldPoint::new(32, 0)).is_none());
        assert_eq!(describe(&world, WorldPoint::new(0, 40)), "ungenerated");
    }

    #[test]
    fn overlays_sit_on_matching_terrain() {
        let world = sample_world(DEFAULT_SEED, 3).unwrap();
        let size = world.chunk_size() as i32;
        for y in -3 * size..3 * size {
            for x in -3 * size..3 * size {
                let point = WorldPoint::new(x, y);
                if let Some(object) = world.overlay_at(point) {
                    let base = world.tile_at(point).unwrap();
                    assert!(
                        ![WATER, DEEP_WATER, SAND].contains(&base),
                        "{object} on {base} at {point:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn demo_death_is_visible() {
        let state = demo_state(MarkerSet::new());
        assert_eq!(state.markers.visible(state.now_ms).len(), 2);
    }
}
