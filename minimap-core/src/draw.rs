use crate::palette::Color;
use serde::{Deserialize, Serialize};

/// Position in viewport pixels, +y down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Rotates a local-space point by `angle` radians and moves it to `origin`.
    pub fn rotated_about(self, origin: ScreenPoint, angle: f32) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self::new(
            origin.x + self.x * cos_a - self.y * sin_a,
            origin.y + self.x * sin_a + self.y * cos_a,
        )
    }
}

impl std::ops::Add for ScreenPoint {
    type Output = ScreenPoint;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for ScreenPoint {
    type Output = ScreenPoint;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Backend-neutral drawing instruction. Hosts replay a frame's commands in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Fill the whole `size` x `size` viewport.
    Clear { size: f32, color: Color },
    FillRect { rect: ScreenRect, color: Color },
    Polygon {
        points: Vec<ScreenPoint>,
        fill: Color,
        stroke: Option<Stroke>,
    },
    Circle {
        center: ScreenPoint,
        radius: f32,
        fill: Color,
        stroke: Option<Stroke>,
    },
    Lines {
        segments: Vec<[ScreenPoint; 2]>,
        stroke: Stroke,
    },
}
