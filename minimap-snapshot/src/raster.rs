//! Software rasterizer for minimap draw lists.
//!
//! Each shape is sampled on a fixed sub-pixel grid per output pixel; the covered fraction
//! scales the shape's alpha before it is blended over what is already in the image.

use image::{Rgba, RgbaImage};
use minimap_core::{Color, DrawCommand, ScreenPoint, ScreenRect, Stroke};

const AA_SAMPLES_PER_AXIS: u32 = 4;
const AA_SAMPLE_COUNT: u32 = AA_SAMPLES_PER_AXIS * AA_SAMPLES_PER_AXIS;

/// Axis-aligned pixel bounds, inclusive start and exclusive end.
#[derive(Clone, Copy)]
struct PixelBounds {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

pub struct Rasterizer {
    scale: f32,
}

impl Rasterizer {
    /// `scale` output pixels per viewport pixel.
    pub fn new(scale: f32) -> Self {
        Self {
            scale: if scale.is_finite() && scale > 0.0 { scale } else { 1.0 },
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Replays `commands` in order. The image is sized by the first `Clear`; a list without
    /// one produces an empty image.
    pub fn render(&self, commands: &[DrawCommand]) -> RgbaImage {
        let side = commands
            .iter()
            .find_map(|command| match command {
                DrawCommand::Clear { size, .. } => Some(*size),
                _ => None,
            })
            .map_or(0, |size| (size * self.scale).ceil().max(0.0) as u32);

        let mut image = RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 0]));
        for command in commands {
            self.draw(&mut image, command);
        }
        log::debug!("rasterized {} commands into {side}x{side}", commands.len());
        image
    }

    pub fn draw(&self, image: &mut RgbaImage, command: &DrawCommand) {
        match command {
            DrawCommand::Clear { color, .. } => {
                let rgba = color_to_rgba(*color);
                for pixel in image.pixels_mut() {
                    *pixel = rgba;
                }
            }
            DrawCommand::FillRect { rect, color } => {
                let (max_x, max_y) = (rect.x + rect.width, rect.y + rect.height);
                let bounds = self.bounds(image, rect.x, rect.y, max_x, max_y);
                self.fill(image, bounds, *color, |p| rect_contains(rect, p));
            }
            DrawCommand::Polygon {
                points,
                fill,
                stroke,
            } => {
                if points.len() < 3 {
                    return;
                }
                let pad = stroke.map_or(0.0, |s| s.width * 0.5);
                let bounds = self.polygon_bounds(image, points, pad);
                self.fill(image, bounds, *fill, |p| point_in_polygon(points, p));
                if let Some(stroke) = stroke {
                    let half = stroke.width * 0.5;
                    self.fill(image, bounds, stroke.color, |p| {
                        closed_edges(points).any(|(a, b)| distance_to_segment(p, a, b) <= half)
                    });
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let reach = radius + stroke.map_or(0.0, |s| s.width * 0.5);
                let bounds = self.bounds(
                    image,
                    center.x - reach,
                    center.y - reach,
                    center.x + reach,
                    center.y + reach,
                );
                self.fill(image, bounds, *fill, |p| (p - *center).length() <= *radius);
                if let Some(stroke) = stroke {
                    let half = stroke.width * 0.5;
                    self.fill(image, bounds, stroke.color, |p| {
                        ((p - *center).length() - radius).abs() <= half
                    });
                }
            }
            DrawCommand::Lines { segments, stroke } => {
                for [a, b] in segments {
                    self.draw_segment(image, *a, *b, *stroke);
                }
            }
        }
    }

    fn draw_segment(&self, image: &mut RgbaImage, a: ScreenPoint, b: ScreenPoint, stroke: Stroke) {
        let half = stroke.width * 0.5;
        let bounds = self.bounds(
            image,
            a.x.min(b.x) - half,
            a.y.min(b.y) - half,
            a.x.max(b.x) + half,
            a.y.max(b.y) + half,
        );
        self.fill(image, bounds, stroke.color, |p| distance_to_segment(p, a, b) <= half);
    }

    fn polygon_bounds(&self, image: &RgbaImage, points: &[ScreenPoint], pad: f32) -> PixelBounds {
        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for point in points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        self.bounds(image, min_x - pad, min_y - pad, max_x + pad, max_y + pad)
    }

    /// Viewport-space box to output pixels, clipped to the image.
    fn bounds(
        &self,
        image: &RgbaImage,
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    ) -> PixelBounds {
        let clip = |value: f32, limit: u32| -> u32 {
            if value.is_nan() {
                0
            } else {
                value.clamp(0.0, limit as f32) as u32
            }
        };
        PixelBounds {
            x0: clip((min_x * self.scale).floor(), image.width()),
            y0: clip((min_y * self.scale).floor(), image.height()),
            x1: clip((max_x * self.scale).ceil(), image.width()),
            y1: clip((max_y * self.scale).ceil(), image.height()),
        }
    }

    fn fill<F>(&self, image: &mut RgbaImage, bounds: PixelBounds, color: Color, covers: F)
    where
        F: Fn(ScreenPoint) -> bool,
    {
        if color.a == 0 {
            return;
        }
        let samples_per_axis = AA_SAMPLES_PER_AXIS as f32;

        for y in bounds.y0..bounds.y1 {
            for x in bounds.x0..bounds.x1 {
                let mut hits = 0;
                for sy in 0..AA_SAMPLES_PER_AXIS {
                    for sx in 0..AA_SAMPLES_PER_AXIS {
                        let sample_x = x as f32 + (sx as f32 + 0.5) / samples_per_axis;
                        let sample_y = y as f32 + (sy as f32 + 0.5) / samples_per_axis;
                        let point = ScreenPoint::new(sample_x / self.scale, sample_y / self.scale);
                        if covers(point) {
                            hits += 1;
                        }
                    }
                }

                if hits > 0 {
                    let coverage = hits as f32 / AA_SAMPLE_COUNT as f32;
                    let pixel = image.get_pixel_mut(x, y);
                    *pixel = blend_over(*pixel, color, coverage);
                }
            }
        }
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn color_to_rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// Source-over compositing of `color`, with its alpha scaled by `coverage`, onto `dst`.
fn blend_over(dst: Rgba<u8>, color: Color, coverage: f32) -> Rgba<u8> {
    let to_unit = |channel: u8| channel as f32 / 255.0;
    let to_u8 = |channel: f32| -> u8 { (channel.clamp(0.0, 1.0) * 255.0).round() as u8 };

    let src_a = to_unit(color.a) * coverage;
    let dst_a = to_unit(dst.0[3]);
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mix = |src: u8, dst: u8| {
        (to_unit(src) * src_a + to_unit(dst) * dst_a * (1.0 - src_a)) / out_a
    };
    Rgba([
        to_u8(mix(color.r, dst.0[0])),
        to_u8(mix(color.g, dst.0[1])),
        to_u8(mix(color.b, dst.0[2])),
        to_u8(out_a),
    ])
}

fn rect_contains(rect: &ScreenRect, point: ScreenPoint) -> bool {
    rect.contains(point)
}

/// Even-odd rule.
fn point_in_polygon(points: &[ScreenPoint], p: ScreenPoint) -> bool {
    let mut inside = false;
    for (a, b) in closed_edges(points) {
        if (a.y > p.y) != (b.y > p.y) {
            let cross_x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < cross_x {
                inside = !inside;
            }
        }
    }
    inside
}

fn closed_edges(points: &[ScreenPoint]) -> impl Iterator<Item = (ScreenPoint, ScreenPoint)> + '_ {
    points
        .iter()
        .copied()
        .zip(points.iter().copied().cycle().skip(1))
}

fn distance_to_segment(p: ScreenPoint, a: ScreenPoint, b: ScreenPoint) -> f32 {
    let d = b - a;
    let len_sq = d.x * d.x + d.y * d.y;
    if len_sq == 0.0 {
        return (p - a).length();
    }
    let t = (((p.x - a.x) * d.x + (p.y - a.y) * d.y) / len_sq).clamp(0.0, 1.0);
    (p - ScreenPoint::new(a.x + d.x * t, a.y + d.y * t)).length()
}
