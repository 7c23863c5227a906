use crate::tile::{self, TileId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 8-bit RGBA color. Serializes as a `#rrggbb` / `#rrggbbaa` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`; the leading `#` is optional.
    pub fn from_hex(raw: &str) -> Option<Self> {
        let digits = raw.trim().trim_start_matches('#');
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();

        match digits.len() {
            3 => {
                let r = channel(0..1)?;
                let g = channel(1..2)?;
                let b = channel(2..3)?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::from_hex(&raw).ok_or_else(|| format!("invalid color `{raw}`"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

pub const CLEAR_COLOR: Color = Color::rgb(0x1a, 0x1a, 0x1a);
pub const TREE_COLOR: Color = Color::rgb(0x16, 0x65, 0x34);
pub const ROCK_COLOR: Color = Color::rgb(0x57, 0x53, 0x4e);

pub trait TilePalette {
    fn color_of(&self, tile: TileId) -> Option<Color>;

    /// Used for tile types the palette does not know.
    fn fallback(&self) -> Color {
        CLEAR_COLOR
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPalette;

impl TilePalette for DefaultPalette {
    fn color_of(&self, tile: TileId) -> Option<Color> {
        let color = match tile {
            tile::GRASS => Color::rgb(0x4d, 0x7c, 0x0f),
            tile::DIRT => Color::rgb(0x85, 0x4d, 0x0e),
            tile::SAND => Color::rgb(0xd6, 0xc2, 0x7a),
            tile::WATER => Color::rgb(0x25, 0x63, 0xeb),
            tile::DEEP_WATER => Color::rgb(0x1e, 0x3a, 0x8a),
            tile::STONE => Color::rgb(0x78, 0x71, 0x6c),
            tile::SNOW => Color::rgb(0xf1, 0xf5, 0xf9),
            _ => return None,
        };
        Some(color)
    }
}

/// Default colors with per-tile overrides, usually loaded from config.
#[derive(Debug, Clone, Default)]
pub struct CustomPalette {
    overrides: HashMap<TileId, Color>,
    fallback: Option<Color>,
}

impl CustomPalette {
    pub fn new(overrides: HashMap<TileId, Color>) -> Self {
        Self {
            overrides,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Color) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn set(&mut self, tile: TileId, color: Color) {
        self.overrides.insert(tile, color);
    }
}

impl TilePalette for CustomPalette {
    fn color_of(&self, tile: TileId) -> Option<Color> {
        self.overrides
            .get(&tile)
            .copied()
            .or_else(|| DefaultPalette.color_of(tile))
    }

    fn fallback(&self) -> Color {
        self.fallback.unwrap_or(CLEAR_COLOR)
    }
}

/// Color of one minimap cell. Tree and rock overlays win over the base tile; a cell with
/// neither a base tile nor an overlay is not drawn.
pub fn cell_color<P>(palette: &P, base: Option<TileId>, overlay: Option<TileId>) -> Option<Color>
where
    P: TilePalette + ?Sized,
{
    match overlay {
        Some(object) if tile::is_tree(object) => return Some(TREE_COLOR),
        Some(object) if tile::is_rock(object) => return Some(ROCK_COLOR),
        _ => {}
    }

    match base {
        Some(tile) => Some(palette.color_of(tile).unwrap_or_else(|| palette.fallback())),
        None => overlay.map(|_| palette.fallback()),
    }
}
