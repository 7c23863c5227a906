//! Whole-frame minimap rendering: terrain, marker glyphs, off-screen indicators and the
//! player dot, as an ordered list of [`DrawCommand`]s.
//!
//! Every frame starts with a [`DrawCommand::Clear`], so hosts can call [`Minimap::render`]
//! once per animation frame without keeping anything between calls.

use crate::clamp::{EdgeClamp, clamp_to_edge};
use crate::coordinates::FocusPoint;
use crate::draw::{DrawCommand, ScreenPoint, ScreenRect, Stroke};
use crate::marker::{
    DEATH_COLOR, DEATH_OUTLINE, DeathMarker, LegendEntry, Marker, MarkerSet, SPAWN_COLOR,
    SPAWN_OUTLINE, legend_for,
};
use crate::palette::{Color, DefaultPalette, TilePalette};
use crate::viewport::{ViewportSpec, render_tiles};
use crate::world::ChunkLookup;

pub const PLAYER_RADIUS: f32 = 3.0;
pub const DEATH_RADIUS: f32 = 5.0;
const SPAWN_HALF_WIDTH: f32 = 4.0;
const OUTLINE_WIDTH: f32 = 1.0;

/// Indicator triangles in local space, pointing along +x before rotation.
const SPAWN_POINTER: [(f32, f32); 3] = [(8.0, 0.0), (0.0, -4.0), (0.0, 4.0)];
const DEATH_POINTER: [(f32, f32); 3] = [(10.0, 0.0), (2.0, -4.0), (2.0, 4.0)];

#[derive(Debug, Clone, PartialEq)]
pub struct MinimapFrame {
    pub commands: Vec<DrawCommand>,
    pub legend: Vec<LegendEntry>,
}

/// Per-frame inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapState {
    pub focus: FocusPoint,
    pub markers: MarkerSet,
    pub now_ms: u64,
}

pub struct Minimap<P = DefaultPalette> {
    spec: ViewportSpec,
    palette: P,
}

impl Minimap<DefaultPalette> {
    pub fn new(spec: ViewportSpec) -> Self {
        Self::with_palette(spec, DefaultPalette)
    }
}

impl<P: TilePalette> Minimap<P> {
    pub fn with_palette(spec: ViewportSpec, palette: P) -> Self {
        Self { spec, palette }
    }

    pub fn spec(&self) -> &ViewportSpec {
        &self.spec
    }

    pub fn palette(&self) -> &P {
        &self.palette
    }

    pub fn render<L>(&self, state: &MinimapState, lookup: &L) -> MinimapFrame
    where
        L: ChunkLookup + ?Sized,
    {
        let spec = &self.spec;
        let mut commands = vec![DrawCommand::Clear {
            size: spec.size(),
            color: self.palette.fallback(),
        }];

        commands.extend(
            render_tiles(state.focus, spec, lookup, &self.palette).map(|cell| {
                DrawCommand::FillRect {
                    rect: cell.rect,
                    color: cell.color,
                }
            }),
        );

        let markers = state.markers.visible(state.now_ms);
        for marker in &markers {
            let placement = self.place_marker(marker, state.focus);
            match marker {
                Marker::Spawn => push_spawn(&mut commands, &placement),
                Marker::Death(death) => push_death(&mut commands, &placement, death),
            }
        }

        commands.push(DrawCommand::Circle {
            center: spec.center(),
            radius: PLAYER_RADIUS,
            fill: Color::WHITE,
            stroke: Some(Stroke::new(Color::BLACK, OUTLINE_WIDTH)),
        });

        MinimapFrame {
            commands,
            legend: legend_for(&markers),
        }
    }

    /// Where `marker` lands on the viewport, clamped to the border if off-screen.
    pub fn place_marker(&self, marker: &Marker, focus: FocusPoint) -> EdgeClamp {
        let raw = self.spec.project(marker.world_point(), focus.tile());
        clamp_to_edge(raw, self.spec.size(), self.spec.margin())
    }
}

fn push_spawn(commands: &mut Vec<DrawCommand>, placement: &EdgeClamp) {
    let p = placement.position;
    let h = SPAWN_HALF_WIDTH;
    commands.push(DrawCommand::Polygon {
        points: vec![
            p.offset(0.0, -h),
            p.offset(h, 0.0),
            p.offset(h, h),
            p.offset(-h, h),
            p.offset(-h, 0.0),
        ],
        fill: SPAWN_COLOR,
        stroke: Some(Stroke::new(SPAWN_OUTLINE, OUTLINE_WIDTH)),
    });

    if placement.clamped {
        commands.push(pointer(placement, &SPAWN_POINTER, SPAWN_COLOR));
    }
}

fn push_death(commands: &mut Vec<DrawCommand>, placement: &EdgeClamp, death: &DeathMarker) {
    let p = placement.position;
    log::trace!("death marker {:?} drawn at {:?}", death.position, p);

    commands.push(DrawCommand::Circle {
        center: p,
        radius: DEATH_RADIUS,
        fill: DEATH_COLOR,
        stroke: Some(Stroke::new(DEATH_OUTLINE, OUTLINE_WIDTH)),
    });
    // Two small crosses for eyes.
    commands.push(DrawCommand::Lines {
        segments: vec![
            [p.offset(-3.0, -2.0), p.offset(-1.0, 0.0)],
            [p.offset(-1.0, -2.0), p.offset(-3.0, 0.0)],
            [p.offset(1.0, -2.0), p.offset(3.0, 0.0)],
            [p.offset(3.0, -2.0), p.offset(1.0, 0.0)],
        ],
        stroke: Stroke::new(Color::WHITE, OUTLINE_WIDTH),
    });

    if placement.clamped {
        commands.push(pointer(placement, &DEATH_POINTER, DEATH_COLOR));
    }
}

fn pointer(placement: &EdgeClamp, shape: &[(f32, f32)], fill: Color) -> DrawCommand {
    DrawCommand::Polygon {
        points: shape
            .iter()
            .map(|&(x, y)| {
                ScreenPoint::new(x, y).rotated_about(placement.position, placement.bearing)
            })
            .collect(),
        fill,
        stroke: None,
    }
}

/// Bounding box of the viewport, handy for hosts that scissor the minimap.
pub fn viewport_rect(spec: &ViewportSpec) -> ScreenRect {
    ScreenRect::new(0.0, 0.0, spec.size(), spec.size())
}
