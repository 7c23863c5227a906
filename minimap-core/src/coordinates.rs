use serde::{Deserialize, Serialize};

/// Integer tile position in world space. The world has no bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: i32,
    pub y: i32,
}

impl WorldPoint {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }
}

/// Fractional world position, e.g. the player's. Floored before projection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FocusPoint {
    pub x: f32,
    pub y: f32,
}

impl FocusPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn tile(self) -> WorldPoint {
        WorldPoint::new(self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl From<WorldPoint> for FocusPoint {
    fn from(point: WorldPoint) -> Self {
        Self::new(point.x as f32, point.y as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPosition {
    pub x: i32,
    pub y: i32,
}

impl ChunkPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn key(self) -> ChunkKey {
        ChunkKey::from(self)
    }
}

/// Both chunk coordinates packed into one integer: x in the high half, y in the low half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkKey(pub u64);

impl ChunkKey {
    pub fn position(self) -> ChunkPosition {
        let x = (self.0 >> 32) as u32 as i32;
        let y = self.0 as u32 as i32;
        ChunkPosition::new(x, y)
    }
}

impl From<ChunkPosition> for ChunkKey {
    fn from(position: ChunkPosition) -> Self {
        Self(((position.x as u32 as u64) << 32) | position.y as u32 as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalTileCoord {
    pub x: usize,
    pub y: usize,
}

impl LocalTileCoord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Splits a world point into its chunk and the offset inside that chunk.
///
/// Uses floor division, so `-1` lands in chunk `-1` at local `chunk_size - 1`.
/// `chunk_size` must be non-zero.
pub fn chunk_and_local(point: WorldPoint, chunk_size: usize) -> (ChunkPosition, LocalTileCoord) {
    let size = chunk_size as i64;
    let (x, y) = (i64::from(point.x), i64::from(point.y));

    let chunk_x = x.div_euclid(size);
    let chunk_y = y.div_euclid(size);
    let local_x = x.rem_euclid(size) as usize;
    let local_y = y.rem_euclid(size) as usize;

    (
        ChunkPosition::new(chunk_x as i32, chunk_y as i32),
        LocalTileCoord::new(local_x, local_y),
    )
}

/// Inverse of [`chunk_and_local`].
pub fn world_from_chunk_local(
    chunk: ChunkPosition,
    local: LocalTileCoord,
    chunk_size: usize,
) -> WorldPoint {
    let size = chunk_size as i64;
    let x = i64::from(chunk.x) * size + local.x as i64;
    let y = i64::from(chunk.y) * size + local.y as i64;
    WorldPoint::new(x as i32, y as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_is_floored_not_rounded() {
        assert_eq!(FocusPoint::new(10.4, 10.6).tile(), WorldPoint::new(10, 10));
        assert_eq!(FocusPoint::new(-0.5, -1.0).tile(), WorldPoint::new(-1, -1));
    }

    #[test]
    fn chunk_key_round_trips_negative_positions() {
        for position in [
            ChunkPosition::new(0, 0),
            ChunkPosition::new(-1, 3),
            ChunkPosition::new(i32::MIN, i32::MAX),
        ] {
            assert_eq!(position.key().position(), position);
        }
        assert_ne!(
            ChunkPosition::new(1, 0).key(),
            ChunkPosition::new(0, 1).key()
        );
    }

    #[test]
    fn chunk_and_local_cover_negative_world_coords() {
        let (chunk, local) = chunk_and_local(WorldPoint::new(-1, -17), 16);
        assert_eq!(chunk, ChunkPosition::new(-1, -2));
        assert_eq!(local, LocalTileCoord::new(15, 15));
    }

    #[test]
    fn chunk_and_local_is_invertible() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..500 {
            let point = WorldPoint::new(rng.i32(-100_000..100_000), rng.i32(-100_000..100_000));

            let (chunk, local) = chunk_and_local(point, 16);
            assert!(local.x < 16 && local.y < 16);
            assert_eq!(world_from_chunk_local(chunk, local, 16), point);
        }
    }
}
