//! Plottable objects: lines, curves, labels, and the closed set that holds them.

use std::fmt;
use std::sync::OnceLock;

use crate::color::{Color, ColorParseError};
use crate::expr::{Expr, ExprError};
use crate::geom::RealPoint;

/// Color used for plotted points.
pub const POINT_COLOR: Color = Color::rgb8(0x00, 0xcc, 0xff);
/// Default color for line segments.
pub const LINE_COLOR: Color = Color::rgb8(0xff, 0x00, 0x00);
/// Default color for function curves.
pub const CURVE_COLOR: Color = Color::rgb8(0xff, 0xcc, 0x00);
/// Default color for labels.
pub const LABEL_COLOR: Color = Color::rgb8(0xff, 0x00, 0x00);

// Step for the central-difference fallback when no symbolic slope exists.
const SLOPE_STEP: f64 = 1e-6;

/// A directed line segment between two real points.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    /// Start point.
    pub start: RealPoint,
    /// End point; the arrowhead is drawn here.
    pub end: RealPoint,
    /// Stroke color.
    pub color: Color,
}

impl Line {
    /// Create a line with the default color.
    pub fn new(start: RealPoint, end: RealPoint) -> Self {
        Self {
            start,
            end,
            color: LINE_COLOR,
        }
    }

    /// Set the line color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Check whether both endpoints are valid.
    pub fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }

    /// Real-space length.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Lines are equal when their endpoints are; color is presentation only.
impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.start, self.end)
    }
}

/// A plotted function `f(x)`.
///
/// The derivative is derived symbolically the first time it is needed and
/// cached for the lifetime of the curve.
#[derive(Debug, Clone)]
pub struct Curve {
    source: String,
    expr: Expr,
    derivative: OnceLock<Expr>,
    /// Stroke color.
    pub color: Color,
}

impl Curve {
    /// Parse a curve from its right-hand side, e.g. `"x^2 - 1"`.
    pub fn parse(source: &str) -> Result<Self, ExprError> {
        let source = source.trim();
        let expr = Expr::parse(source)?;
        Ok(Self {
            source: source.to_string(),
            expr,
            derivative: OnceLock::new(),
            color: CURVE_COLOR,
        })
    }

    /// Set the curve color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// The source text the curve was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed expression.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// A curve is valid when evaluating it at 0 does not fail.
    pub fn is_valid(&self) -> bool {
        self.expr.eval(0.0).is_ok()
    }

    /// Evaluate `f(x)`; `None` when undefined or non-finite.
    pub fn eval(&self, x: f64) -> Option<f64> {
        self.expr.eval(x).ok().filter(|y| y.is_finite())
    }

    /// The symbolic derivative, computed on first use.
    pub fn derivative(&self) -> &Expr {
        self.derivative.get_or_init(|| self.expr.derivative())
    }

    /// Textual form of the derivative.
    pub fn derivative_source(&self) -> String {
        self.derivative().to_string()
    }

    /// Slope `f'(x)`, falling back to a central difference.
    pub fn slope(&self, x: f64) -> Option<f64> {
        let symbolic = self.derivative().eval(x).ok().filter(|s| s.is_finite());
        symbolic.or_else(|| {
            let h = SLOPE_STEP * x.abs().max(1.0);
            let ahead = self.eval(x + h)?;
            let behind = self.eval(x - h)?;
            Some((ahead - behind) / (2.0 * h)).filter(|s| s.is_finite())
        })
    }
}

/// Curves are equal when their source text is.
impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(x)={}", self.source)
    }
}

/// A text label anchored at a real point.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Label text; empty means no label.
    pub text: String,
    /// Anchor point in real space.
    pub anchor: RealPoint,
    /// Fill color.
    pub color: Color,
}

impl Label {
    /// Create a label.
    pub fn new(text: impl Into<String>, anchor: RealPoint, color: Color) -> Self {
        Self {
            text: text.into(),
            anchor,
            color,
        }
    }

    /// Create a label from a color string such as `"#ff0000"`.
    pub fn with_color_str(
        text: impl Into<String>,
        anchor: RealPoint,
        color: &str,
    ) -> Result<Self, ColorParseError> {
        Ok(Self::new(text, anchor, Color::parse(color)?))
    }

    /// The empty label shown when nothing is hovered.
    pub fn empty() -> Self {
        Self::new(String::new(), RealPoint::ORIGIN, LABEL_COLOR)
    }

    /// Check whether there is any text to show.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check whether the anchor is valid.
    pub fn is_valid(&self) -> bool {
        self.anchor.is_valid()
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Color: {} at {}", self.text, self.color, self.anchor)
    }
}

/// Every kind of object the scene can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotObject {
    /// A plotted point.
    Point(RealPoint),
    /// A line segment.
    Line(Line),
    /// A function curve.
    Curve(Curve),
    /// A text label.
    Label(Label),
}

impl PlotObject {
    /// Check whether the object can be placed.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Point(point) => point.is_valid(),
            Self::Line(line) => line.is_valid(),
            Self::Curve(curve) => curve.is_valid(),
            Self::Label(label) => label.is_valid(),
        }
    }

    /// Color used when drawing or labeling the object.
    pub fn color(&self) -> Color {
        match self {
            Self::Point(_) => POINT_COLOR,
            Self::Line(line) => line.color,
            Self::Curve(curve) => curve.color,
            Self::Label(label) => label.color,
        }
    }

    /// Hover label for this object anchored at `anchor`.
    pub fn hover_label(&self, anchor: RealPoint) -> Label {
        Label::new(self.to_string(), anchor, self.color())
    }
}

impl fmt::Display for PlotObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(point) => point.fmt(f),
            Self::Line(line) => line.fmt(f),
            Self::Curve(curve) => curve.fmt(f),
            Self::Label(label) => label.fmt(f),
        }
    }
}

impl From<RealPoint> for PlotObject {
    fn from(point: RealPoint) -> Self {
        Self::Point(point)
    }
}

impl From<Line> for PlotObject {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Curve> for PlotObject {
    fn from(curve: Curve) -> Self {
        Self::Curve(curve)
    }
}

impl From<Label> for PlotObject {
    fn from(label: Label) -> Self {
        Self::Label(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_equality_ignores_color() {
        let a = Line::new(RealPoint::new(0.0, 0.0), RealPoint::new(1.0, 1.0));
        let b = a.with_color(Color::WHITE);
        assert_eq!(a, b);
        let reversed = Line::new(a.end, a.start);
        assert_ne!(a, reversed);
        assert_eq!(a.to_string(), "(0,0) => (1,1)");
    }

    #[test]
    fn line_validity_follows_endpoints() {
        let bad = Line::new(RealPoint::new(f64::NAN, 0.0), RealPoint::new(1.0, 1.0));
        assert!(!bad.is_valid());
        assert!(!PlotObject::Line(bad).is_valid());
    }

    #[test]
    fn curve_validity_and_display() {
        let curve = Curve::parse(" x^2 ").expect("parse");
        assert!(curve.is_valid());
        assert_eq!(curve.to_string(), "f(x)=x^2");
        assert_eq!(curve.derivative_source(), "2 * x");
        assert!(Curve::parse("1/x").expect("parse").is_valid());
        assert!(!Curve::parse("x + y").expect("parse").is_valid());
    }

    #[test]
    fn curve_eval_filters_non_finite() {
        let curve = Curve::parse("1/x").expect("parse");
        assert_eq!(curve.eval(0.0), None);
        assert_eq!(curve.eval(2.0), Some(0.5));
    }

    #[test]
    fn slope_uses_derivative() {
        let curve = Curve::parse("x^3").expect("parse");
        let slope = curve.slope(2.0).expect("slope");
        assert!((slope - 12.0).abs() < 1e-9);
        // sqrt'(0) is infinite; no finite slope exists there.
        let root = Curve::parse("sqrt(x)").expect("parse");
        assert_eq!(root.slope(0.0), None);
    }

    #[test]
    fn hover_label_uses_object_text_and_color() {
        let object = PlotObject::Point(RealPoint::new(3.0, 4.0));
        let label = object.hover_label(RealPoint::new(3.0, 4.0));
        assert_eq!(label.text, "(3,4)");
        assert_eq!(label.color, POINT_COLOR);
    }

    #[test]
    fn label_color_strings_are_validated() {
        let label = Label::with_color_str("hi", RealPoint::ORIGIN, "#00ff00").expect("valid color");
        assert_eq!(label.to_string(), "hi, Color: #00ff00 at (0,0)");
        assert!(Label::with_color_str("hi", RealPoint::ORIGIN, "nope").is_err());
    }
}
