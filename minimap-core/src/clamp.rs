use crate::draw::ScreenPoint;

pub const DEFAULT_EDGE_MARGIN: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeClamp {
    pub position: ScreenPoint,
    pub clamped: bool,
    /// Angle in radians from the viewport center to the unclamped point.
    pub bearing: f32,
}

/// Pulls `point` onto the border of the `[margin, size - margin]` box along the ray from the
/// viewport center, so an indicator drawn there still points at the real target.
pub fn clamp_to_edge(point: ScreenPoint, viewport_size: f32, margin: f32) -> EdgeClamp {
    let min_bound = margin;
    let max_bound = viewport_size - margin;
    let center = viewport_size / 2.0;
    let ddx = point.x - center;
    let ddy = point.y - center;

    let unchanged = EdgeClamp {
        position: point,
        clamped: false,
        bearing: if ddx == 0.0 && ddy == 0.0 {
            0.0
        } else {
            ddy.atan2(ddx)
        },
    };

    let inside = (min_bound..=max_bound).contains(&point.x)
        && (min_bound..=max_bound).contains(&point.y);
    if inside {
        return unchanged;
    }

    if (ddx == 0.0 && ddy == 0.0) || !ddx.is_finite() || !ddy.is_finite() {
        return EdgeClamp {
            bearing: 0.0,
            ..unchanged
        };
    }

    let scale_x = axis_scale(ddx, center, min_bound, max_bound);
    let scale_y = axis_scale(ddy, center, min_bound, max_bound);
    let scale = scale_x.abs().min(scale_y.abs());

    let x = (center + ddx * scale).clamp(min_bound, max_bound);
    let y = (center + ddy * scale).clamp(min_bound, max_bound);

    EdgeClamp {
        position: ScreenPoint::new(x, y),
        clamped: true,
        bearing: ddy.atan2(ddx),
    }
}

fn axis_scale(delta: f32, center: f32, min_bound: f32, max_bound: f32) -> f32 {
    if delta > 0.0 {
        (max_bound - center) / delta
    } else if delta < 0.0 {
        (min_bound - center) / delta
    } else {
        f32::INFINITY
    }
}
