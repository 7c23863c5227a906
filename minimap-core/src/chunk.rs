use crate::coordinates::{ChunkPosition, LocalTileCoord, WorldPoint};
use crate::tile::TileId;
use std::collections::HashMap;
use thiserror::Error;

pub const CHUNK_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("expected {expected} tiles, got {actual}")]
    InvalidTileCount { expected: usize, actual: usize },
    #[error("local coordinate is outside the chunk")]
    OutOfBounds,
    #[error("chunk size must be positive")]
    ZeroChunkSize,
    #[error("chunk is {actual} tiles wide, world expects {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("no chunk generated at {0:?}")]
    NotGenerated(WorldPoint),
}

/// A square block of terrain plus sparse overlay objects (trees, ore, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub position: ChunkPosition,
    size: usize,
    tiles: Vec<TileId>,
    overlays: HashMap<LocalTileCoord, TileId>,
}

impl Chunk {
    pub fn new(position: ChunkPosition, size: usize, fill: TileId) -> Result<Self, ChunkError> {
        if size == 0 {
            return Err(ChunkError::ZeroChunkSize);
        }
        Ok(Self {
            position,
            size,
            tiles: vec![fill; size * size],
            overlays: HashMap::new(),
        })
    }

    /// Builds a chunk from row-major tiles.
    pub fn from_tiles(
        position: ChunkPosition,
        size: usize,
        tiles: Vec<TileId>,
    ) -> Result<Self, ChunkError> {
        if size == 0 {
            return Err(ChunkError::ZeroChunkSize);
        }
        let expected = size * size;
        if tiles.len() != expected {
            return Err(ChunkError::InvalidTileCount {
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            position,
            size,
            tiles,
            overlays: HashMap::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tile_index(&self, coord: LocalTileCoord) -> Result<usize, ChunkError> {
        if coord.x >= self.size || coord.y >= self.size {
            return Err(ChunkError::OutOfBounds);
        }
        Ok(coord.x + coord.y * self.size)
    }

    /// Base tile at `coord`, or `None` when the coordinate is outside the chunk.
    pub fn tile(&self, coord: LocalTileCoord) -> Option<TileId> {
        let index = self.tile_index(coord).ok()?;
        self.tiles.get(index).copied()
    }

    pub fn set_tile(&mut self, coord: LocalTileCoord, tile: TileId) -> Result<(), ChunkError> {
        let index = self.tile_index(coord)?;
        self.tiles[index] = tile;
        Ok(())
    }

    pub fn overlay(&self, coord: LocalTileCoord) -> Option<TileId> {
        self.overlays.get(&coord).copied()
    }

    pub fn set_overlay(
        &mut self,
        coord: LocalTileCoord,
        overlay: TileId,
    ) -> Result<(), ChunkError> {
        self.tile_index(coord)?;
        self.overlays.insert(coord, overlay);
        Ok(())
    }

    pub fn clear_overlay(&mut self, coord: LocalTileCoord) -> Option<TileId> {
        self.overlays.remove(&coord)
    }

    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{GRASS, PINE_TREE, SAND};

    fn chunk() -> Chunk {
        Chunk::new(ChunkPosition::new(0, 0), 4, GRASS).unwrap()
    }

    #[test]
    fn tile_index_is_row_major() {
        let chunk = chunk();
        assert_eq!(chunk.tile_index(LocalTileCoord::new(1, 2)).unwrap(), 1 + 2 * 4);
    }

    #[test]
    fn set_and_get_tile() {
        let mut chunk = chunk();
        let coord = LocalTileCoord::new(3, 3);
        chunk.set_tile(coord, SAND).unwrap();
        assert_eq!(chunk.tile(coord), Some(SAND));
    }

    #[test]
    fn out_of_range_reads_are_absent() {
        let chunk = chunk();
        assert_eq!(chunk.tile(LocalTileCoord::new(4, 0)), None);
        assert_eq!(chunk.tile(LocalTileCoord::new(0, 99)), None);
        assert_eq!(chunk.overlay(LocalTileCoord::new(4, 0)), None);
    }

    #[test]
    fn overlays_are_sparse() {
        let mut chunk = chunk();
        let coord = LocalTileCoord::new(2, 1);
        chunk.set_overlay(coord, PINE_TREE).unwrap();

        assert_eq!(chunk.overlay(coord), Some(PINE_TREE));
        assert_eq!(chunk.overlay(LocalTileCoord::new(1, 2)), None);
        assert_eq!(chunk.overlay_count(), 1);
        assert_eq!(
            chunk.set_overlay(LocalTileCoord::new(4, 4), PINE_TREE),
            Err(ChunkError::OutOfBounds)
        );
        assert_eq!(chunk.clear_overlay(coord), Some(PINE_TREE));
    }

    #[test]
    fn rejects_invalid_tile_count() {
        let result = Chunk::from_tiles(ChunkPosition::new(0, 0), 4, vec![GRASS; 15]);
        assert_eq!(
            result,
            Err(ChunkError::InvalidTileCount {
                expected: 16,
                actual: 15
            })
        );
        assert_eq!(
            Chunk::new(ChunkPosition::new(0, 0), 0, GRASS),
            Err(ChunkError::ZeroChunkSize)
        );
    }
}
