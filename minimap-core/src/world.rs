use crate::chunk::{CHUNK_SIZE, Chunk, ChunkError};
use crate::coordinates::{ChunkKey, ChunkPosition, LocalTileCoord, WorldPoint, chunk_and_local};
use crate::tile::TileId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Read access to a chunk-partitioned world.
///
/// A render performs many lookups; implementations shared across threads must hand out a
/// consistent snapshot for the whole scan.
pub trait ChunkLookup {
    fn chunk_size(&self) -> usize;

    fn get(&self, key: ChunkKey) -> Option<&Chunk>;

    fn chunk_key(&self, position: ChunkPosition) -> ChunkKey {
        position.key()
    }

    fn to_chunk_coords(&self, point: WorldPoint) -> (ChunkPosition, LocalTileCoord) {
        chunk_and_local(point, self.chunk_size())
    }
}

/// Sparse store of generated chunks. Positions without an entry are ungenerated.
#[derive(Debug, Clone)]
pub struct World {
    chunk_size: usize,
    chunks: HashMap<ChunkKey, Chunk>,
}

impl World {
    pub fn new() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            chunks: HashMap::new(),
        }
    }

    pub fn with_chunk_size(chunk_size: usize) -> Result<Self, ChunkError> {
        if chunk_size == 0 {
            return Err(ChunkError::ZeroChunkSize);
        }
        Ok(Self {
            chunk_size,
            chunks: HashMap::new(),
        })
    }

    /// Stores `chunk`, returning the one it replaced.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> Result<Option<Chunk>, ChunkError> {
        if chunk.size() != self.chunk_size {
            return Err(ChunkError::SizeMismatch {
                expected: self.chunk_size,
                actual: chunk.size(),
            });
        }
        Ok(self.chunks.insert(chunk.position.key(), chunk))
    }

    pub fn register_chunk(
        &mut self,
        position: ChunkPosition,
        fill: TileId,
    ) -> Result<&mut Chunk, ChunkError> {
        let chunk_size = self.chunk_size;
        match self.chunks.entry(position.key()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                Ok(entry.insert(Chunk::new(position, chunk_size, fill)?))
            }
        }
    }

    pub fn chunk(&self, position: ChunkPosition) -> Option<&Chunk> {
        self.chunks.get(&position.key())
    }

    pub fn chunk_mut(&mut self, position: ChunkPosition) -> Option<&mut Chunk> {
        self.chunks.get_mut(&position.key())
    }

    pub fn remove_chunk(&mut self, position: ChunkPosition) -> Option<Chunk> {
        self.chunks.remove(&position.key())
    }

    pub fn tile_at(&self, point: WorldPoint) -> Option<TileId> {
        let (position, local) = self.to_chunk_coords(point);
        self.chunk(position).and_then(|chunk| chunk.tile(local))
    }

    pub fn overlay_at(&self, point: WorldPoint) -> Option<TileId> {
        let (position, local) = self.to_chunk_coords(point);
        self.chunk(position).and_then(|chunk| chunk.overlay(local))
    }

    pub fn set_tile(&mut self, point: WorldPoint, tile: TileId) -> Result<(), ChunkError> {
        let (position, local) = self.to_chunk_coords(point);
        let chunk = self
            .chunk_mut(position)
            .ok_or(ChunkError::NotGenerated(point))?;
        chunk.set_tile(local, tile)
    }

    pub fn set_overlay(&mut self, point: WorldPoint, overlay: TileId) -> Result<(), ChunkError> {
        let (position, local) = self.to_chunk_coords(point);
        let chunk = self
            .chunk_mut(position)
            .ok_or(ChunkError::NotGenerated(point))?;
        chunk.set_overlay(local, overlay)
    }

    pub fn positions(&self) -> impl Iterator<Item = ChunkPosition> + '_ {
        self.chunks.keys().map(|key| key.position())
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkLookup for World {
    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn get(&self, key: ChunkKey) -> Option<&Chunk> {
        self.chunks.get(&key)
    }
}
