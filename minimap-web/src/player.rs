use macroquad::prelude::*;
use minimap_core::{DirectionSet, FocusPoint};

/// Tiles per second.
pub const PLAYER_SPEED: f32 = 6.0;
pub const SPRINT_MULTIPLIER: f32 = 1.8;

/// Top-down avatar: a round body with a chevron pointing along the heading.
#[derive(Debug, Clone)]
pub struct PlayerDrawConfig {
    pub radius_tiles: f32,
    pub outline_px: f32,
    /// Chevron tip distance as a fraction of the body radius.
    pub chevron_reach: f32,
    pub chevron_half_width: f32,
    /// Extra ring drawn while sprinting, in body radii.
    pub sprint_ring_scale: f32,
    pub body_color: Color,
    pub outline_color: Color,
    pub chevron_color: Color,
    pub sprint_ring_color: Color,
}

impl Default for PlayerDrawConfig {
    fn default() -> Self {
        Self {
            radius_tiles: 0.45,
            outline_px: 2.0,
            chevron_reach: 0.8,
            chevron_half_width: 0.45,
            sprint_ring_scale: 1.45,
            body_color: Color::from_rgba(0x3b, 0x82, 0xf6, 0xff),
            outline_color: WHITE,
            chevron_color: WHITE,
            sprint_ring_color: Color::from_rgba(0xfb, 0xbf, 0x24, 0xcc),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: FocusPoint,
    /// Last non-zero movement direction, screen space.
    pub heading: Vec2,
    /// Whether the last step was taken at sprint speed.
    pub sprinting: bool,
}

impl Player {
    pub fn new(position: FocusPoint) -> Self {
        Self {
            position,
            heading: vec2(1.0, 0.0),
            sprinting: false,
        }
    }

    /// Moves along `directions` for `dt` seconds. Returns whether the player moved.
    pub fn step(&mut self, directions: DirectionSet, sprint: bool, dt: f32) -> bool {
        let unit = directions.vector();
        if unit.x == 0.0 && unit.y == 0.0 {
            self.sprinting = false;
            return false;
        }
        let speed = if sprint {
            PLAYER_SPEED * SPRINT_MULTIPLIER
        } else {
            PLAYER_SPEED
        };
        let distance = speed * dt;
        self.position = FocusPoint::new(
            self.position.x + unit.x * distance,
            self.position.y + unit.y * distance,
        );
        self.heading = vec2(unit.x, unit.y);
        self.sprinting = sprint;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerGlyph {
    pub center: Vec2,
    pub body_radius: f32,
    /// Tip first, then the two trailing corners.
    pub chevron: [Vec2; 3],
    pub sprint_ring: Option<f32>,
}

pub fn player_glyph(
    player: &Player,
    center: Vec2,
    tile_size: f32,
    config: &PlayerDrawConfig,
) -> PlayerGlyph {
    let body_radius = (config.radius_tiles * tile_size).max(1.0);
    let heading = player.heading.try_normalize().unwrap_or(Vec2::X);
    let side = heading.perp() * (body_radius * config.chevron_half_width);
    let tip = center + heading * (body_radius * config.chevron_reach);
    let tail = center - heading * (body_radius * config.chevron_reach * 0.4);

    PlayerGlyph {
        center,
        body_radius,
        chevron: [tip, tail + side, tail - side],
        sprint_ring: player
            .sprinting
            .then_some(body_radius * config.sprint_ring_scale),
    }
}

pub fn draw_player(player: &Player, center: Vec2, tile_size: f32, config: &PlayerDrawConfig) {
    let glyph = player_glyph(player, center, tile_size, config);
    let (x, y) = (glyph.center.x, glyph.center.y);

    if let Some(ring) = glyph.sprint_ring {
        draw_circle_lines(x, y, ring, config.outline_px, config.sprint_ring_color);
    }
    draw_circle(x, y, glyph.body_radius, config.body_color);
    draw_circle_lines(x, y, glyph.body_radius, config.outline_px, config.outline_color);
    let [tip, left, right] = glyph.chevron;
    draw_triangle(tip, left, right, config.chevron_color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_moves_at_fixed_speed_and_updates_heading() {
        let mut player = Player::new(FocusPoint::new(0.0, 0.0));
        assert!(player.step(DirectionSet::DOWN, false, 0.5));
        assert_eq!(player.position, FocusPoint::new(0.0, PLAYER_SPEED * 0.5));
        assert_eq!(player.heading, vec2(0.0, 1.0));
        assert!(!player.sprinting);
    }

    #[test]
    fn sprint_multiplies_speed() {
        let mut walker = Player::new(FocusPoint::new(0.0, 0.0));
        let mut runner = walker;
        walker.step(DirectionSet::RIGHT, false, 1.0);
        assert!(runner.step(DirectionSet::RIGHT, true, 1.0));
        assert!(runner.sprinting);
        assert!((runner.position.x - walker.position.x * SPRINT_MULTIPLIER).abs() < 1e-4);
        assert!((runner.position.x - PLAYER_SPEED * 1.8).abs() < 1e-4);
    }

    #[test]
    fn sprint_without_direction_stands_still() {
        let mut player = Player::new(FocusPoint::new(1.0, 1.0));
        player.step(DirectionSet::UP, true, 0.1);
        assert!(player.sprinting);
        assert!(!player.step(DirectionSet::empty(), true, 1.0));
        assert!(!player.sprinting);
    }

    #[test]
    fn idle_or_cancelling_input_keeps_heading() {
        let mut player = Player::new(FocusPoint::new(2.0, 3.0));
        player.step(DirectionSet::LEFT, false, 0.1);
        let before = player;
        assert!(!player.step(DirectionSet::empty(), false, 1.0));
        assert!(!player.step(DirectionSet::UP | DirectionSet::DOWN, false, 1.0));
        assert_eq!(player, before);
    }

    #[test]
    fn diagonal_speed_matches_cardinal_speed() {
        let mut player = Player::new(FocusPoint::new(0.0, 0.0));
        player.step(DirectionSet::UP | DirectionSet::RIGHT, false, 1.0);
        let travelled = player.position.x.hypot(player.position.y);
        assert!((travelled - PLAYER_SPEED).abs() < 1e-4);
    }

    #[test]
    fn chevron_points_along_heading() {
        let mut player = Player::new(FocusPoint::new(0.0, 0.0));
        player.step(DirectionSet::UP, false, 0.1);
        let config = PlayerDrawConfig::default();
        let glyph = player_glyph(&player, vec2(100.0, 100.0), 20.0, &config);

        assert!((glyph.body_radius - 9.0).abs() < 1e-4);
        let [tip, left, right] = glyph.chevron;
        assert!(tip.y < glyph.center.y && (tip.x - 100.0).abs() < 1e-4);
        assert!(left.y > glyph.center.y && right.y > glyph.center.y);
        assert!((left.x + right.x - 200.0).abs() < 1e-4);
        assert_eq!(glyph.sprint_ring, None);
    }

    #[test]
    fn sprinting_adds_ring() {
        let mut player = Player::new(FocusPoint::new(0.0, 0.0));
        player.step(DirectionSet::RIGHT, true, 0.1);
        let config = PlayerDrawConfig::default();
        let glyph = player_glyph(&player, Vec2::ZERO, 10.0, &config);
        let ring = glyph.sprint_ring.unwrap();
        assert!(ring > glyph.body_radius);
    }
}
