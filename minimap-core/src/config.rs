use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::marker::{DEATH_MARKER_TTL_MS, MarkerSet};
use crate::palette::{Color, CustomPalette};
use crate::tile::{self, TileId};
use crate::viewport::{ViewportFields, ViewportSpec};

pub const DEFAULT_JOYSTICK_SIZE: f32 = 120.0;
pub const DEFAULT_STICK_SIZE: f32 = 50.0;

/// On-screen joystick dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoystickSpec {
    pub size: f32,
    pub stick_size: f32,
}

impl JoystickSpec {
    /// Furthest the knob may travel from the rest position.
    pub fn max_distance(&self) -> f32 {
        self.size / 2.0 - self.stick_size / 2.0
    }

    pub fn validate(&self) -> Result<()> {
        let valid = self.size.is_finite()
            && self.stick_size.is_finite()
            && self.stick_size > 0.0
            && self.stick_size < self.size;
        if valid {
            Ok(())
        } else {
            Err(ConfigError::Joystick {
                size: self.size,
                stick_size: self.stick_size,
            })
        }
    }
}

impl Default for JoystickSpec {
    fn default() -> Self {
        Self {
            size: DEFAULT_JOYSTICK_SIZE,
            stick_size: DEFAULT_STICK_SIZE,
        }
    }
}

/// Everything a host can tune without recompiling. Missing fields take their defaults.
///
/// ```json
/// {
///   "viewport": { "size": 200, "radius": 32 },
///   "joystick": { "size": 140 },
///   "death_marker_ttl_ms": 60000,
///   "palette": { "grass": "#3f7d20", "deep_water": "#0b3d91" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapConfig {
    pub viewport: ViewportSpec,
    pub joystick: JoystickSpec,
    pub death_marker_ttl_ms: u64,
    /// Tile name (or numeric id) to `#rrggbb` color.
    pub palette: BTreeMap<String, String>,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportSpec::default(),
            joystick: JoystickSpec::default(),
            death_marker_ttl_ms: DEATH_MARKER_TTL_MS,
            palette: BTreeMap::new(),
        }
    }
}

/// On-disk shape: the viewport is parsed unvalidated so its errors surface as
/// [`ConfigError::Viewport`] rather than as JSON errors.
#[derive(Deserialize)]
#[serde(default)]
struct ConfigFile {
    viewport: ViewportFields,
    joystick: JoystickSpec,
    death_marker_ttl_ms: u64,
    palette: BTreeMap<String, String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let defaults = MinimapConfig::default();
        Self {
            viewport: defaults.viewport.into(),
            joystick: defaults.joystick,
            death_marker_ttl_ms: defaults.death_marker_ttl_ms,
            palette: defaults.palette,
        }
    }
}

impl TryFrom<ConfigFile> for MinimapConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self> {
        let config = Self {
            viewport: ViewportSpec::try_from(file.viewport)?,
            joystick: file.joystick,
            death_marker_ttl_ms: file.death_marker_ttl_ms,
            palette: file.palette,
        };
        config.validate()?;
        Ok(config)
    }
}

impl MinimapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json)?;
        Self::try_from(file)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        log::info!("loaded minimap config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.joystick.validate()?;
        self.palette_overrides()?;
        Ok(())
    }

    fn palette_overrides(&self) -> Result<HashMap<TileId, Color>> {
        self.palette
            .iter()
            .map(|(name, value)| {
                let tile = tile::tile_by_name(name)
                    .ok_or_else(|| ConfigError::UnknownTile(name.clone()))?;
                let color = Color::from_hex(value).ok_or_else(|| ConfigError::InvalidColor {
                    tile: name.clone(),
                    value: value.clone(),
                })?;
                Ok((tile, color))
            })
            .collect()
    }

    pub fn palette(&self) -> Result<CustomPalette> {
        Ok(CustomPalette::new(self.palette_overrides()?))
    }

    pub fn markers(&self) -> MarkerSet {
        MarkerSet::with_ttl(self.death_marker_ttl_ms)
    }
}
