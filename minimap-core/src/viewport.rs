use crate::coordinates::{FocusPoint, WorldPoint};
use crate::draw::{ScreenPoint, ScreenRect};
use crate::error::ViewportError;
use crate::palette::{Color, TilePalette, cell_color};
use crate::world::ChunkLookup;
use serde::{Deserialize, Serialize};

pub const DEFAULT_VIEWPORT_SIZE: f32 = 150.0;
pub const DEFAULT_TILE_RADIUS: i32 = 40;
/// A viewport scans `(2 * radius)^2` tiles per frame.
pub const MAX_TILE_RADIUS: i32 = 4096;
pub const DEFAULT_MARGIN: f32 = crate::clamp::DEFAULT_EDGE_MARGIN;

/// Extra width added to every cell so neighbouring cells overlap instead of leaving
/// hairline gaps after rounding.
pub const TILE_OVERLAP: f32 = 0.5;

/// Square viewport in pixels showing `2 * radius` tiles per side around the focus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ViewportFields", into = "ViewportFields")]
pub struct ViewportSpec {
    size: f32,
    radius: i32,
    margin: f32,
}

/// Unvalidated viewport fields as they appear in JSON.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ViewportFields {
    size: f32,
    radius: i32,
    margin: f32,
}

impl Default for ViewportFields {
    fn default() -> Self {
        let spec = ViewportSpec::default();
        Self {
            size: spec.size,
            radius: spec.radius,
            margin: spec.margin,
        }
    }
}

impl TryFrom<ViewportFields> for ViewportSpec {
    type Error = ViewportError;

    fn try_from(fields: ViewportFields) -> Result<Self, Self::Error> {
        Self::new(fields.size, fields.radius, fields.margin)
    }
}

impl From<ViewportSpec> for ViewportFields {
    fn from(spec: ViewportSpec) -> Self {
        Self {
            size: spec.size,
            radius: spec.radius,
            margin: spec.margin,
        }
    }
}

impl ViewportSpec {
    pub fn new(size: f32, radius: i32, margin: f32) -> Result<Self, ViewportError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(ViewportError::NonPositiveSize(size));
        }
        if radius <= 0 {
            return Err(ViewportError::NonPositiveRadius(radius));
        }
        if radius > MAX_TILE_RADIUS {
            return Err(ViewportError::RadiusTooLarge {
                radius,
                max: MAX_TILE_RADIUS,
            });
        }
        if !(margin.is_finite() && margin > 0.0) {
            return Err(ViewportError::NonPositiveMargin(margin));
        }
        if margin >= size / 2.0 {
            return Err(ViewportError::MarginTooLarge { margin, size });
        }
        Ok(Self {
            size,
            radius,
            margin,
        })
    }

    pub fn with_size(size: f32) -> Result<Self, ViewportError> {
        Self::new(size, DEFAULT_TILE_RADIUS, DEFAULT_MARGIN)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn tile_size(&self) -> f32 {
        self.size / (2.0 * self.radius as f32)
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.size / 2.0, self.size / 2.0)
    }

    /// Top-left pixel of `point`'s cell when the viewport is centred on `focus`.
    /// May lie far outside the viewport.
    pub fn project(&self, point: WorldPoint, focus: WorldPoint) -> ScreenPoint {
        let tile_size = self.tile_size();
        let radius = i64::from(self.radius);
        let column = i64::from(point.x) - i64::from(focus.x) + radius;
        let row = i64::from(point.y) - i64::from(focus.y) + radius;
        ScreenPoint::new(column as f32 * tile_size, row as f32 * tile_size)
    }
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self {
            size: DEFAULT_VIEWPORT_SIZE,
            radius: DEFAULT_TILE_RADIUS,
            margin: DEFAULT_MARGIN,
        }
    }
}

/// One drawn terrain cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCell {
    pub world: WorldPoint,
    pub rect: ScreenRect,
    pub color: Color,
}

/// Lazily yields a cell for every tile within `spec.radius()` of `focus` that has something
/// to draw, top-left to bottom-right. Ungenerated chunks and empty tiles yield nothing.
pub fn render_tiles<'a, L, P>(
    focus: FocusPoint,
    spec: &'a ViewportSpec,
    lookup: &'a L,
    palette: &'a P,
) -> impl Iterator<Item = TileCell> + 'a
where
    L: ChunkLookup + ?Sized,
    P: TilePalette + ?Sized,
{
    let origin = focus.tile();
    let radius = spec.radius();
    let tile_size = spec.tile_size();
    let span = if lookup.chunk_size() == 0 {
        log::warn!("chunk lookup reports zero chunk size; drawing no tiles");
        0..0
    } else {
        -radius..radius
    };

    span.clone()
        .flat_map(move |dy| span.clone().map(move |dx| (dx, dy)))
        .filter_map(move |(dx, dy)| {
            let world = origin.checked_offset(dx, dy)?;
            let color = sample_color(lookup, palette, world)?;
            let rect = ScreenRect::new(
                (dx + radius) as f32 * tile_size,
                (dy + radius) as f32 * tile_size,
                tile_size + TILE_OVERLAP,
                tile_size + TILE_OVERLAP,
            );
            Some(TileCell { world, rect, color })
        })
}

fn sample_color<L, P>(lookup: &L, palette: &P, world: WorldPoint) -> Option<Color>
where
    L: ChunkLookup + ?Sized,
    P: TilePalette + ?Sized,
{
    let (position, local) = lookup.to_chunk_coords(world);
    let Some(chunk) = lookup.get(lookup.chunk_key(position)) else {
        log::trace!("chunk {:?} not generated", position);
        return None;
    };
    cell_color(palette, chunk.tile(local), chunk.overlay(local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use crate::coordinates::{ChunkKey, ChunkPosition};
    use crate::palette::{DefaultPalette, ROCK_COLOR, TREE_COLOR};
    use crate::tile::{GRASS, IRON_ORE, SAND, TREE};
    use crate::world::World;

    fn grass_world(chunks: &[(i32, i32)]) -> World {
        let mut world = World::with_chunk_size(8).unwrap();
        for &(x, y) in chunks {
            world.register_chunk(ChunkPosition::new(x, y), GRASS).unwrap();
        }
        world
    }

    #[test]
    fn rejects_invalid_specs() {
        assert_eq!(
            ViewportSpec::new(0.0, 40, 8.0),
            Err(ViewportError::NonPositiveSize(0.0))
        );
        assert_eq!(
            ViewportSpec::new(150.0, 0, 8.0),
            Err(ViewportError::NonPositiveRadius(0))
        );
        assert_eq!(
            ViewportSpec::new(150.0, 40, -1.0),
            Err(ViewportError::NonPositiveMargin(-1.0))
        );
        assert!(matches!(
            ViewportSpec::new(16.0, 40, 8.0),
            Err(ViewportError::MarginTooLarge { .. })
        ));
    }

    #[test]
    fn spec_deserializes_with_defaults_and_validation() {
        let spec: ViewportSpec = serde_json::from_str(r#"{ "size": 200 }"#).unwrap();
        assert_eq!(spec.size(), 200.0);
        assert_eq!(spec.radius(), DEFAULT_TILE_RADIUS);
        assert!(serde_json::from_str::<ViewportSpec>(r#"{ "radius": -3 }"#).is_err());
    }

    #[test]
    fn huge_radius_is_rejected_instead_of_overflowing() {
        assert_eq!(
            ViewportSpec::new(150.0, i32::MAX, 8.0),
            Err(ViewportError::RadiusTooLarge {
                radius: i32::MAX,
                max: MAX_TILE_RADIUS,
            })
        );
        assert!(serde_json::from_str::<ViewportSpec>(r#"{ "radius": 1500000000 }"#).is_err());

        let widest = ViewportSpec::new(150.0, MAX_TILE_RADIUS, 8.0).unwrap();
        assert_eq!(widest.tile_size(), 150.0 / (2.0 * MAX_TILE_RADIUS as f32));
        let far = widest.project(WorldPoint::new(i32::MAX, i32::MIN), WorldPoint::new(i32::MIN, 0));
        assert!(far.x.is_finite() && far.y.is_finite());
    }

    #[test]
    fn fully_generated_area_yields_every_cell_in_scan_order() {
        let world = grass_world(&[(-1, -1), (0, -1), (-1, 0), (0, 0)]);
        let spec = ViewportSpec::new(40.0, 2, 4.0).unwrap();
        let cells: Vec<_> =
            render_tiles(FocusPoint::new(0.0, 0.0), &spec, &world, &DefaultPalette).collect();

        assert_eq!(cells.len(), 16);
        assert_eq!(cells[0].world, WorldPoint::new(-2, -2));
        assert_eq!(cells[1].world, WorldPoint::new(-1, -2));
        assert_eq!(cells[4].world, WorldPoint::new(-2, -1));
        assert_eq!(cells[15].world, WorldPoint::new(1, 1));
        assert_eq!(cells[5].rect, ScreenRect::new(10.0, 10.0, 10.5, 10.5));
    }

    #[test]
    fn fractional_focus_is_floored() {
        let world = grass_world(&[(1, 1)]);
        let spec = ViewportSpec::new(40.0, 2, 4.0).unwrap();
        let tile_size = spec.tile_size();
        let center_cell = render_tiles(FocusPoint::new(10.4, 10.6), &spec, &world, &DefaultPalette)
            .find(|cell| cell.rect.x == 2.0 * tile_size && cell.rect.y == 2.0 * tile_size)
            .unwrap();
        assert_eq!(center_cell.world, WorldPoint::new(10, 10));
    }

    #[test]
    fn ungenerated_chunks_are_skipped() {
        let world = grass_world(&[(0, 0)]);
        let spec = ViewportSpec::new(40.0, 2, 4.0).unwrap();
        let cells: Vec<_> =
            render_tiles(FocusPoint::new(0.0, 0.0), &spec, &world, &DefaultPalette).collect();

        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|cell| cell.world.x >= 0 && cell.world.y >= 0));
    }

    #[test]
    fn overlays_recolor_cells() {
        let mut world = grass_world(&[(0, 0)]);
        world.set_overlay(WorldPoint::new(0, 0), TREE).unwrap();
        world.set_overlay(WorldPoint::new(1, 0), IRON_ORE).unwrap();
        world.set_tile(WorldPoint::new(0, 1), SAND).unwrap();
        let spec = ViewportSpec::new(40.0, 2, 4.0).unwrap();

        let colors: Vec<_> = render_tiles(FocusPoint::new(0.0, 0.0), &spec, &world, &DefaultPalette)
            .map(|cell| (cell.world, cell.color))
            .collect();

        assert!(colors.contains(&(WorldPoint::new(0, 0), TREE_COLOR)));
        assert!(colors.contains(&(WorldPoint::new(1, 0), ROCK_COLOR)));
        assert!(colors.contains(&(
            WorldPoint::new(0, 1),
            DefaultPalette.color_of(SAND).unwrap()
        )));
    }

    #[test]
    fn rendering_is_repeatable() {
        let world = grass_world(&[(0, 0), (-1, 0)]);
        let spec = ViewportSpec::default();
        let focus = FocusPoint::new(3.7, 2.2);
        let first: Vec<_> = render_tiles(focus, &spec, &world, &DefaultPalette).collect();
        let second: Vec<_> = render_tiles(focus, &spec, &world, &DefaultPalette).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn focus_near_integer_limits_does_not_overflow() {
        let world = grass_world(&[]);
        let spec = ViewportSpec::default();
        let focus = FocusPoint::new(f32::MAX, f32::MAX);
        let count = render_tiles(focus, &spec, &world, &DefaultPalette).count();
        assert_eq!(count, 0);
    }

    #[test]
    fn chunks_with_foreign_size_read_out_of_range_as_absent() {
        struct Mismatched(Chunk);

        impl ChunkLookup for Mismatched {
            fn chunk_size(&self) -> usize {
                8
            }

            fn get(&self, key: ChunkKey) -> Option<&Chunk> {
                (key == self.0.position.key()).then_some(&self.0)
            }
        }

        // The lookup claims 8-wide chunks but only holds a 2-wide one.
        let lookup = Mismatched(Chunk::new(ChunkPosition::new(0, 0), 2, GRASS).unwrap());
        let spec = ViewportSpec::new(80.0, 4, 4.0).unwrap();
        let cells: Vec<_> =
            render_tiles(FocusPoint::new(0.0, 0.0), &spec, &lookup, &DefaultPalette).collect();
        assert_eq!(cells.len(), 4);
    }

    #[test]
    fn projection_matches_cell_placement() {
        let spec = ViewportSpec::default();
        let focus = WorldPoint::new(1_000, 1_000);
        let projected = spec.project(WorldPoint::ORIGIN, focus);
        assert_eq!(projected.x, (0 - 1_000 + 40) as f32 * spec.tile_size());
        assert_eq!(spec.project(focus, focus), ScreenPoint::new(75.0, 75.0));
    }
}
