//! Errors raised while building viewport and minimap configuration.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("viewport size must be positive and finite, got {0}")]
    NonPositiveSize(f32),

    #[error("tile radius must be positive, got {0}")]
    NonPositiveRadius(i32),

    #[error("tile radius {radius} exceeds the maximum of {max}")]
    RadiusTooLarge { radius: i32, max: i32 },

    #[error("edge margin must be positive and finite, got {0}")]
    NonPositiveMargin(f32),

    #[error("edge margin {margin} must be smaller than half the viewport size {size}")]
    MarginTooLarge { margin: f32, size: f32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid viewport: {0}")]
    Viewport(#[from] ViewportError),

    #[error("invalid joystick: knob size {stick_size} must be smaller than base size {size}")]
    Joystick { size: f32, stick_size: f32 },

    #[error("unknown tile `{0}` in palette")]
    UnknownTile(String),

    #[error("invalid color for tile {tile}: `{value}`")]
    InvalidColor { tile: String, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
