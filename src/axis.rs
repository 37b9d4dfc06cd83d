//! Scale-adaptive gridlines and their labels.

use crate::geom::{RealPoint, ScreenPoint, format_number};
use crate::transform::Transform;

/// Which axis a gridline crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// A vertical gridline at a fixed x, labeled on the x-axis.
    Vertical,
    /// A horizontal gridline at a fixed y, labeled on the y-axis.
    Horizontal,
}

/// A gridline at a multiple of the grid spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct Gridline {
    /// Orientation of the line.
    pub axis: GridAxis,
    /// Real coordinate of the line (x for vertical, y for horizontal).
    pub value: f64,
    /// Numeric label text.
    pub label: String,
}

impl Gridline {
    /// Where the label sits: the crossing with the perpendicular axis.
    pub fn label_anchor(&self) -> RealPoint {
        match self.axis {
            GridAxis::Vertical => RealPoint::new(self.value, 0.0),
            GridAxis::Horizontal => RealPoint::new(0.0, self.value),
        }
    }
}

/// Grid density for a scale.
///
/// The scale is normalized by powers of ten into `[0.1, 1)`, the mantissa is
/// rounded up and the power of ten is restored. Gridlines are `1 / step`
/// apart in real units, so spacing on screen stays between one and ten grid
/// squares.
pub fn grid_step(scale: f64) -> f64 {
    if !scale.is_finite() || scale <= 0.0 {
        return 1.0;
    }
    let mut mantissa = scale;
    let mut exponent: i32 = -1;
    if mantissa < 1.0 {
        while mantissa < 0.1 {
            mantissa *= 10.0;
            exponent -= 1;
        }
    } else {
        while mantissa >= 1.0 {
            mantissa /= 10.0;
            exponent += 1;
        }
    }
    mantissa.ceil() * 10_f64.powi(exponent)
}

/// Round a gridline coordinate to the grid so labels don't show float noise.
pub fn round_label(value: f64, step: f64) -> f64 {
    ((value + f64::EPSILON) * step).round() / step
}

/// Enumerate on-screen gridlines for one axis.
///
/// The sweep starts at the grid coordinate nearest the viewport center and
/// walks outward in both directions until a candidate leaves the screen. At
/// most `max_lines` gridlines are returned.
pub fn gridlines(transform: &Transform, axis: GridAxis, max_lines: usize) -> Vec<Gridline> {
    let step = grid_step(transform.scale());
    let center = match axis {
        GridAxis::Vertical => transform.camera().x,
        GridAxis::Horizontal => transform.camera().y,
    };
    let start = (center * step).round();
    let mut lines = Vec::new();
    for direction in [1.0, -1.0] {
        let mut offset = if direction > 0.0 { 0.0 } else { -1.0 };
        let mut previous = f64::NAN;
        while lines.len() < max_lines {
            let value = (start + offset) / step;
            if value == previous || !on_screen(transform, axis, value) {
                break;
            }
            lines.push(Gridline {
                axis,
                value,
                label: format_number(round_label(value, step)),
            });
            previous = value;
            offset += direction;
        }
    }
    lines
}

fn on_screen(transform: &Transform, axis: GridAxis, value: f64) -> bool {
    let viewport = transform.viewport();
    let camera = transform.camera();
    match axis {
        GridAxis::Vertical => {
            let x = transform.to_screen(RealPoint::new(value, camera.y)).x;
            x.is_finite() && (0.0..=viewport.width).contains(&x)
        }
        GridAxis::Horizontal => {
            let y = transform.to_screen(RealPoint::new(camera.x, value)).y;
            y.is_finite() && (0.0..=viewport.height).contains(&y)
        }
    }
}

/// Screen endpoints of a full-width or full-height line through `point`.
pub fn axis_segment(
    transform: &Transform,
    axis: GridAxis,
    point: RealPoint,
) -> (ScreenPoint, ScreenPoint) {
    let viewport = transform.viewport();
    let screen = transform.to_screen(point);
    match axis {
        GridAxis::Vertical => (
            ScreenPoint::new(screen.x, 0.0),
            ScreenPoint::new(screen.x, viewport.height),
        ),
        GridAxis::Horizontal => (
            ScreenPoint::new(0.0, screen.y),
            ScreenPoint::new(viewport.width, screen.y),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::ViewportSize;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs().max(1.0)
    }

    #[test]
    fn grid_step_rounds_mantissa_up() {
        assert!(close(grid_step(0.05), 0.01));
        assert!(close(grid_step(1.0), 1.0));
        assert!(close(grid_step(7.0), 1.0));
        assert!(close(grid_step(999.0), 100.0));
        assert!(close(grid_step(1000.0), 1000.0));
        assert!(close(grid_step(0.1), 0.1));
        assert_eq!(grid_step(0.0), 1.0);
        assert_eq!(grid_step(f64::NAN), 1.0);
    }

    #[test]
    fn labels_drop_float_noise() {
        assert_eq!(round_label(0.1 + 0.2, 10.0), 0.3);
        assert_eq!(format_number(round_label(-3.0000000001, 1.0)), "-3");
    }

    #[test]
    fn unit_scale_covers_viewport() {
        let transform = Transform::new(RealPoint::ORIGIN, 1.0, ViewportSize::new(800.0, 600.0));
        let vertical = gridlines(&transform, GridAxis::Vertical, 512);
        // x from -16 to 16 inclusive.
        assert_eq!(vertical.len(), 33);
        assert!(vertical.iter().any(|line| line.label == "-16"));
        assert!(vertical.iter().any(|line| line.label == "16"));
        let horizontal = gridlines(&transform, GridAxis::Horizontal, 512);
        assert_eq!(horizontal.len(), 25);
        let zero = horizontal.iter().find(|line| line.value == 0.0).expect("zero line");
        assert_eq!(zero.label_anchor(), RealPoint::ORIGIN);
    }

    #[test]
    fn gridlines_follow_camera_and_cap() {
        let transform = Transform::new(
            RealPoint::new(1e6, 0.0),
            0.05,
            ViewportSize::new(800.0, 600.0),
        );
        // Step 0.01 puts a gridline every 100 units, 125 px apart.
        let lines = gridlines(&transform, GridAxis::Vertical, 512);
        assert_eq!(lines.len(), 7);
        for line in &lines {
            let x = transform.to_screen(RealPoint::new(line.value, 0.0)).x;
            assert!((0.0..=800.0).contains(&x));
            assert_eq!(line.value % 100.0, 0.0);
        }
        let capped = gridlines(&transform, GridAxis::Vertical, 3);
        assert_eq!(capped.len(), 3);
    }

    #[test]
    fn extreme_camera_terminates() {
        let transform = Transform::new(
            RealPoint::new(1e300, 1e300),
            1e-3,
            ViewportSize::new(800.0, 600.0),
        );
        let lines = gridlines(&transform, GridAxis::Horizontal, 64);
        assert!(lines.len() <= 64);
    }
}
