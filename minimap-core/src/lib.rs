pub mod chunk;
pub mod clamp;
pub mod config;
pub mod coordinates;
pub mod draw;
pub mod error;
pub mod joystick;
pub mod marker;
pub mod minimap;
pub mod palette;
pub mod tile;
pub mod viewport;
pub mod world;

pub use chunk::{CHUNK_SIZE, Chunk, ChunkError};
pub use clamp::{EdgeClamp, clamp_to_edge};
pub use config::{JoystickSpec, MinimapConfig};
pub use coordinates::{ChunkKey, ChunkPosition, FocusPoint, LocalTileCoord, WorldPoint};
pub use draw::{DrawCommand, ScreenPoint, ScreenRect, Stroke};
pub use error::{ConfigError, ViewportError};
pub use joystick::{
    DirectionSet, DragEvent, DragState, DragTracker, MovementKeys, MovementSink,
    StickResolution, StickState, resolve_drag,
};
pub use marker::{DeathMarker, LegendEntry, Marker, MarkerSet};
pub use minimap::{Minimap, MinimapFrame, MinimapState};
pub use palette::{Color, CustomPalette, DefaultPalette, TilePalette};
pub use tile::TileId;
pub use viewport::{TileCell, ViewportSpec, render_tiles};
pub use world::{ChunkLookup, World};
