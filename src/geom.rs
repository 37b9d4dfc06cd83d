//! Geometric primitives used by the plotting pipeline.
//!
//! Real-space and screen-space points are distinct types so that a value from
//! one space can never be fed to an operation expecting the other. Conversion
//! between them goes through [`Transform`](crate::transform::Transform).

use std::fmt;

/// A point in real (model) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealPoint {
    /// X value in real coordinates.
    pub x: f64,
    /// Y value in real coordinates.
    pub y: f64,
}

impl RealPoint {
    /// The real origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new real point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both coordinates are finite.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another real point.
    pub fn distance(&self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Component-wise difference `self - other`.
    pub fn offset_from(&self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Default for RealPoint {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<(f64, f64)> for RealPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for RealPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", format_number(self.x), format_number(self.y))
    }
}

/// A point in screen space (pixel coordinates, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f64,
    /// Y value in screen pixels.
    pub y: f64,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both coordinates are finite.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another screen point, in pixels.
    pub fn distance(&self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{}) [Screen Point]",
            format_number(self.x),
            format_number(self.y)
        )
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Grow the rectangle by `margin` pixels on every side.
    pub fn inflate(&self, margin: f64) -> Self {
        Self::new(
            ScreenPoint::new(self.min.x - margin, self.min.y - margin),
            ScreenPoint::new(self.max.x + margin, self.max.y + margin),
        )
    }

    /// Check whether the point lies inside or on the boundary.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ViewportSize {
    /// Create a viewport size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Screen position of the viewport center.
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width * 0.5, self.height * 0.5)
    }

    /// The full viewport as a screen rectangle anchored at the origin.
    pub fn rect(&self) -> ScreenRect {
        ScreenRect::new(
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(self.width, self.height),
        )
    }

    /// Check whether the viewport has positive, finite area.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Format a number the way labels show it: shortest round-trip form, no `-0`.
///
/// Magnitudes below `1e-6` or from `1e21` up switch to exponent form with an
/// explicit sign, e.g. `1.5e+21` and `2e-7`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    let magnitude = value.abs();
    if magnitude.is_nan() || (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}
