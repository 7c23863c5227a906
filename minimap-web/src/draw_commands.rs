use macroquad::prelude::{
    Color, Vec2, draw_circle, draw_circle_lines, draw_line, draw_rectangle, draw_triangle, vec2,
};
use minimap_core::{DrawCommand, ScreenPoint, Stroke};

pub fn to_color(color: minimap_core::Color) -> Color {
    Color::from_rgba(color.r, color.g, color.b, color.a)
}

fn at(origin: Vec2, point: ScreenPoint) -> Vec2 {
    vec2(origin.x + point.x, origin.y + point.y)
}

/// Triangle fan over a convex outline; fewer than three points yields nothing.
pub fn fan_triangles(points: &[ScreenPoint]) -> Vec<[ScreenPoint; 3]> {
    match points.split_first() {
        Some((&first, rest)) if rest.len() >= 2 => rest
            .windows(2)
            .map(|pair| [first, pair[0], pair[1]])
            .collect(),
        _ => Vec::new(),
    }
}

/// Replays a draw list with its viewport's top-left corner at `origin`.
pub fn draw_frame(commands: &[DrawCommand], origin: Vec2) {
    for command in commands {
        draw_command(command, origin);
    }
}

pub fn draw_command(command: &DrawCommand, origin: Vec2) {
    match command {
        DrawCommand::Clear { size, color } => {
            draw_rectangle(origin.x, origin.y, *size, *size, to_color(*color));
        }
        DrawCommand::FillRect { rect, color } => {
            draw_rectangle(
                origin.x + rect.x,
                origin.y + rect.y,
                rect.width,
                rect.height,
                to_color(*color),
            );
        }
        DrawCommand::Polygon {
            points,
            fill,
            stroke,
        } => {
            let fill = to_color(*fill);
            for [a, b, c] in fan_triangles(points) {
                draw_triangle(at(origin, a), at(origin, b), at(origin, c), fill);
            }
            if let Some(stroke) = stroke {
                draw_outline(points, *stroke, origin);
            }
        }
        DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke,
        } => {
            let center = at(origin, *center);
            draw_circle(center.x, center.y, *radius, to_color(*fill));
            if let Some(stroke) = stroke {
                let color = to_color(stroke.color);
                draw_circle_lines(center.x, center.y, *radius, stroke.width, color);
            }
        }
        DrawCommand::Lines { segments, stroke } => {
            let color = to_color(stroke.color);
            for [a, b] in segments {
                let (a, b) = (at(origin, *a), at(origin, *b));
                draw_line(a.x, a.y, b.x, b.y, stroke.width, color);
            }
        }
    }
}

fn draw_outline(points: &[ScreenPoint], stroke: Stroke, origin: Vec2) {
    let color = to_color(stroke.color);
    let next = points.iter().cycle().skip(1);
    for (a, b) in points.iter().zip(next) {
        let (a, b) = (at(origin, *a), at(origin, *b));
        draw_line(a.x, a.y, b.x, b.y, stroke.width, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_covers_every_vertex() {
        let square = [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(1.0, 0.0),
            ScreenPoint::new(1.0, 1.0),
            ScreenPoint::new(0.0, 1.0),
        ];
        let triangles = fan_triangles(&square);
        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[0], [square[0], square[1], square[2]]);
        assert_eq!(triangles[1], [square[0], square[2], square[3]]);
    }

    #[test]
    fn degenerate_outlines_draw_nothing() {
        assert!(fan_triangles(&[]).is_empty());
        assert!(fan_triangles(&[ScreenPoint::ZERO, ScreenPoint::new(1.0, 1.0)]).is_empty());
    }

    #[test]
    fn colors_convert_to_unit_range() {
        let color = to_color(minimap_core::Color::rgba(255, 0, 51, 255));
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 0.2).abs() < 1e-6);
        assert_eq!(color.a, 1.0);
    }
}
