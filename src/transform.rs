//! Coordinate transforms between real and screen space.

use crate::geom::{RealPoint, ScreenPoint, ViewportSize};

/// Width of one grid square in pixels at scale 1.
pub const GRID_UNIT_PX: f64 = 25.0;

// Floor for pixels-per-unit so extreme zoom-out stays finite.
const MIN_PIXELS_PER_UNIT: f64 = 1e-290;

/// Transform from real coordinates into screen coordinates.
///
/// The camera position maps to the viewport center, one real unit spans
/// `grid_unit_px * scale` pixels and the y-axis is flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    camera: RealPoint,
    scale: f64,
    viewport: ViewportSize,
    grid_unit_px: f64,
}

impl Transform {
    /// Create a transform with the standard grid unit.
    pub fn new(camera: RealPoint, scale: f64, viewport: ViewportSize) -> Self {
        Self::with_grid_unit(camera, scale, viewport, GRID_UNIT_PX)
    }

    /// Create a transform with a custom grid unit in pixels.
    pub fn with_grid_unit(
        camera: RealPoint,
        scale: f64,
        viewport: ViewportSize,
        grid_unit_px: f64,
    ) -> Self {
        Self {
            camera,
            scale,
            viewport,
            grid_unit_px,
        }
    }

    /// Access the camera position.
    pub fn camera(&self) -> RealPoint {
        self.camera
    }

    /// Access the scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Access the viewport size.
    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// Number of pixels spanned by one real unit.
    pub fn pixels_per_unit(&self) -> f64 {
        (self.grid_unit_px * self.scale).max(MIN_PIXELS_PER_UNIT)
    }

    /// Map a real point into screen space.
    pub fn to_screen(&self, point: RealPoint) -> ScreenPoint {
        let ppu = self.pixels_per_unit();
        let center = self.viewport.center();
        ScreenPoint::new(
            center.x + ppu * (point.x - self.camera.x),
            center.y - ppu * (point.y - self.camera.y),
        )
    }

    /// Map a screen point into real space.
    pub fn to_real(&self, point: ScreenPoint) -> RealPoint {
        let ppu = self.pixels_per_unit();
        let center = self.viewport.center();
        RealPoint::new(
            (point.x - center.x) / ppu + self.camera.x,
            -(point.y - center.y) / ppu + self.camera.y,
        )
    }

    /// Real-space length of a pixel distance.
    pub fn real_length(&self, pixels: f64) -> f64 {
        pixels / self.pixels_per_unit()
    }

    /// Pixel length of a real-space distance.
    pub fn screen_length(&self, real: f64) -> f64 {
        real * self.pixels_per_unit()
    }

    /// Check whether a real point maps inside the viewport (bounds inclusive).
    pub fn is_on_screen(&self, point: RealPoint) -> bool {
        let screen = self.to_screen(point);
        screen.x >= 0.0
            && screen.x <= self.viewport.width
            && screen.y >= 0.0
            && screen.y <= self.viewport.height
    }

    /// Real x-range covered by the viewport, widened by `overscan_px` per side.
    pub fn visible_x_range(&self, overscan_px: f64) -> (f64, f64) {
        let mid_y = self.viewport.height * 0.5;
        let left = self.to_real(ScreenPoint::new(-overscan_px, mid_y)).x;
        let right = self
            .to_real(ScreenPoint::new(self.viewport.width + overscan_px, mid_y))
            .x;
        (left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ViewportSize {
        ViewportSize::new(800.0, 600.0)
    }

    #[test]
    fn origin_maps_to_center() {
        let transform = Transform::new(RealPoint::ORIGIN, 1.0, viewport());
        let screen = transform.to_screen(RealPoint::ORIGIN);
        assert_eq!(screen, ScreenPoint::new(400.0, 300.0));
        let up = transform.to_screen(RealPoint::new(0.0, 1.0));
        assert_eq!(up, ScreenPoint::new(400.0, 275.0));
    }

    #[test]
    fn roundtrip_across_scales() {
        let points = [
            RealPoint::new(3.0, 4.0),
            RealPoint::new(-12.5, 0.001),
            RealPoint::new(1e6, -1e6),
        ];
        for scale in [1e-9, 0.05, 1.0, 7.0, 1000.0, 1e9] {
            let transform = Transform::new(RealPoint::new(2.0, -3.0), scale, viewport());
            for point in points {
                let back = transform.to_real(transform.to_screen(point));
                // Screen rounding near the center is far below a micro-pixel.
                let tolerance = (1e-9 * point.x.abs().max(point.y.abs()).max(1.0))
                    .max(transform.real_length(1e-6));
                assert!(
                    (back.x - point.x).abs() <= tolerance,
                    "x roundtrip at scale {scale}"
                );
                assert!(
                    (back.y - point.y).abs() <= tolerance,
                    "y roundtrip at scale {scale}"
                );
            }
        }
    }

    #[test]
    fn larger_scale_shrinks_real_length_of_pixels() {
        let mut previous = f64::INFINITY;
        for scale in [0.01, 0.5, 1.0, 2.0, 100.0] {
            let transform = Transform::new(RealPoint::ORIGIN, scale, viewport());
            let length = transform.real_length(15.0);
            assert!(length < previous, "real length must shrink as scale grows");
            previous = length;
        }
    }

    #[test]
    fn tiny_scale_stays_finite() {
        let transform = Transform::new(RealPoint::ORIGIN, 1e-320, viewport());
        let corner = transform.to_real(ScreenPoint::new(800.0, 600.0));
        assert!(corner.is_valid());
    }

    #[test]
    fn on_screen_bounds_are_inclusive() {
        let transform = Transform::new(RealPoint::ORIGIN, 1.0, viewport());
        assert!(transform.is_on_screen(RealPoint::new(16.0, 12.0)));
        assert!(!transform.is_on_screen(RealPoint::new(16.1, 0.0)));
        let (left, right) = transform.visible_x_range(0.0);
        assert_eq!((left, right), (-16.0, 16.0));
    }
}
