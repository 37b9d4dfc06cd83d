//! Hover detection: which plotted object, if any, sits under the pointer.
//!
//! Points are tested by screen distance. Lines project the pointer onto the
//! segment in real space and compare the screen distance to the projection.
//! Curves are replaced by their tangent at the pointer's x and then treated as
//! a short line segment. Every test is O(1), so a full scan is O(n).

use tracing::trace;

use crate::config::PlotterConfig;
use crate::geom::{RealPoint, ScreenPoint};
use crate::objects::{Curve, Label, Line, PlotObject};
use crate::scene::Scene;
use crate::transform::Transform;

/// Find the label for whatever the pointer hovers.
///
/// Points are checked first, then lines, then curves; when several objects
/// are close the last one checked wins. The label is anchored at the
/// pointer's real position.
pub fn hover_target(
    scene: &Scene,
    transform: &Transform,
    pointer: ScreenPoint,
    config: &PlotterConfig,
) -> Option<Label> {
    let threshold = config.hover_distance_px;
    let pointer_real = transform.to_real(pointer);
    let mut hit: Option<PlotObject> = None;

    for point in scene.points() {
        if transform.to_screen(*point).distance(pointer) <= threshold {
            hit = Some(PlotObject::Point(*point));
        }
    }
    for line in scene.lines() {
        if line_is_near(line, transform, pointer, threshold) {
            hit = Some(PlotObject::Line(*line));
        }
    }
    for curve in scene.curves() {
        if curve_is_near(curve, transform, pointer, threshold) {
            hit = Some(PlotObject::Curve(curve.clone()));
        }
    }

    hit.map(|object| object.hover_label(pointer_real))
}

/// Run hover detection and update the scene's label.
///
/// Returns true when the label changed. With nothing hovered and no label
/// showing the scene is left untouched.
pub fn update_hover_label(
    scene: &mut Scene,
    transform: &Transform,
    pointer: ScreenPoint,
    config: &PlotterConfig,
) -> bool {
    match hover_target(scene, transform, pointer, config) {
        Some(label) => {
            if *scene.label() == label {
                return false;
            }
            trace!(text = %label.text, "hover");
            scene.set_label(label);
            true
        }
        None if !scene.label().is_empty() => {
            trace!("hover cleared");
            scene.clear_label();
            true
        }
        None => false,
    }
}

/// Closest point to `p` on segment `a`–`b`, or `None` when the projection onto
/// the infinite line falls outside the segment's bounding box.
///
/// A degenerate segment projects onto `a`.
pub fn project_onto_segment(p: RealPoint, a: RealPoint, b: RealPoint) -> Option<RealPoint> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return Some(a);
    }
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq;
    let closest = RealPoint::new(a.x + t * dx, a.y + t * dy);
    let in_x = closest.x >= a.x.min(b.x) && closest.x <= a.x.max(b.x);
    let in_y = closest.y >= a.y.min(b.y) && closest.y <= a.y.max(b.y);
    (closest.is_valid() && in_x && in_y).then_some(closest)
}

fn segment_is_near(
    a: RealPoint,
    b: RealPoint,
    transform: &Transform,
    pointer: ScreenPoint,
    threshold: f64,
) -> bool {
    let pointer_real = transform.to_real(pointer);
    project_onto_segment(pointer_real, a, b)
        .is_some_and(|closest| transform.to_screen(closest).distance(pointer) <= threshold)
}

fn line_is_near(line: &Line, transform: &Transform, pointer: ScreenPoint, threshold: f64) -> bool {
    segment_is_near(line.start, line.end, transform, pointer, threshold)
}

fn curve_is_near(
    curve: &Curve,
    transform: &Transform,
    pointer: ScreenPoint,
    threshold: f64,
) -> bool {
    let x = transform.to_real(pointer).x;
    let (Some(y0), Some(slope)) = (curve.eval(x), curve.slope(x)) else {
        return false;
    };
    let half_width = tangent_half_width(slope, transform, threshold);
    let tangent = |u: f64| RealPoint::new(u, y0 + slope * (u - x));
    segment_is_near(
        tangent(x - half_width),
        tangent(x + half_width),
        transform,
        pointer,
        threshold,
    )
}

/// Half-width, in real x units, of the tangent segment used for curves.
///
/// The segment grows one screen pixel (in real units) per side at a time
/// until its length reaches twice the hover distance; this computes the
/// resulting width directly.
fn tangent_half_width(slope: f64, transform: &Transform, threshold: f64) -> f64 {
    let pixel = transform.real_length(1.0);
    let stretch = slope.hypot(1.0);
    let steps = (threshold / stretch).ceil().max(1.0);
    steps * pixel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::ViewportSize;
    use crate::objects::{CURVE_COLOR, LINE_COLOR, POINT_COLOR};

    fn transform() -> Transform {
        Transform::new(RealPoint::ORIGIN, 1.0, ViewportSize::new(800.0, 600.0))
    }

    fn target(scene: &Scene, pointer: ScreenPoint) -> Option<Label> {
        hover_target(scene, &transform(), pointer, &PlotterConfig::default())
    }

    #[test]
    fn point_within_threshold() {
        let mut scene = Scene::new();
        scene.add_point(RealPoint::new(3.0, 4.0));
        let label = target(&scene, ScreenPoint::new(475.0, 200.0)).expect("label");
        assert_eq!(label.text, "(3,4)");
        assert_eq!(label.color, POINT_COLOR);
        assert_eq!(label.anchor, RealPoint::new(3.0, 4.0));
        assert!(target(&scene, ScreenPoint::new(475.0, 215.0)).is_some());
        assert!(target(&scene, ScreenPoint::new(475.0, 215.5)).is_none());
    }

    #[test]
    fn line_hover_respects_bounding_box() {
        let mut scene = Scene::new();
        scene.add_line(Line::new(RealPoint::ORIGIN, RealPoint::new(4.0, 0.0)));
        let label = target(&scene, ScreenPoint::new(450.0, 290.0)).expect("near middle");
        assert_eq!(label.text, "(0,0) => (4,0)");
        assert_eq!(label.color, LINE_COLOR);
        // Beyond the end, even though within 15 px of the end point.
        assert!(target(&scene, ScreenPoint::new(505.0, 300.0)).is_none());
        assert!(target(&scene, ScreenPoint::new(395.0, 300.0)).is_none());
    }

    #[test]
    fn degenerate_segment_projects_onto_start() {
        let a = RealPoint::new(1.0, 1.0);
        assert_eq!(project_onto_segment(RealPoint::new(5.0, 5.0), a, a), Some(a));
    }

    #[test]
    fn curve_hover_uses_tangent() {
        let mut scene = Scene::new();
        scene.add_curve(Curve::parse("x^2").expect("parse"));
        // (2, 4) is at screen (450, 200). 10 px straight down is about 2.4 px
        // from the tangent; 100 px down is about 24 px away.
        let label = target(&scene, ScreenPoint::new(450.0, 210.0)).expect("near curve");
        assert_eq!(label.text, "f(x)=x^2");
        assert_eq!(label.color, CURVE_COLOR);
        assert!(target(&scene, ScreenPoint::new(450.0, 300.0)).is_none());
    }

    #[test]
    fn undefined_curve_points_are_skipped() {
        let mut scene = Scene::new();
        scene.add_curve(Curve::parse("sqrt(x)").expect("parse"));
        assert!(target(&scene, ScreenPoint::new(300.0, 300.0)).is_none());
    }

    #[test]
    fn last_match_wins() {
        let mut scene = Scene::new();
        scene.add_point(RealPoint::new(2.0, 0.0));
        scene.add_line(Line::new(RealPoint::ORIGIN, RealPoint::new(4.0, 0.0)));
        let label = target(&scene, ScreenPoint::new(450.0, 300.0)).expect("label");
        assert_eq!(label.color, LINE_COLOR);

        scene.add_curve(Curve::parse("0").expect("parse"));
        let label = target(&scene, ScreenPoint::new(450.0, 300.0)).expect("label");
        assert_eq!(label.text, "f(x)=0");
        assert_eq!(label.color, CURVE_COLOR);
    }

    #[test]
    fn diagonal_line_respects_bounding_box() {
        let mut scene = Scene::new();
        scene.add_line(Line::new(RealPoint::ORIGIN, RealPoint::new(4.0, 4.0)));
        // (3.9, 3.9) lies on the segment; (4.2, 4.2) is on the line but past the end.
        let label = target(&scene, ScreenPoint::new(497.5, 202.5)).expect("on segment");
        assert_eq!(label.text, "(0,0) => (4,4)");
        assert!(target(&scene, ScreenPoint::new(505.0, 195.0)).is_none());
    }

    #[test]
    fn update_clears_only_when_showing() {
        let config = PlotterConfig::default();
        let mut scene = Scene::new();
        scene.add_point(RealPoint::new(3.0, 4.0));
        scene.take_redraw_request();

        assert!(!update_hover_label(&mut scene, &transform(), ScreenPoint::new(0.0, 0.0), &config));
        assert!(!scene.take_redraw_request());

        assert!(update_hover_label(&mut scene, &transform(), ScreenPoint::new(475.0, 200.0), &config));
        assert_eq!(scene.label().text, "(3,4)");

        assert!(update_hover_label(&mut scene, &transform(), ScreenPoint::new(0.0, 0.0), &config));
        assert!(scene.label().is_empty());
    }

    #[test]
    fn tangent_width_is_whole_pixels() {
        let transform = transform();
        let flat = tangent_half_width(0.0, &transform, 15.0);
        assert!((flat - 15.0 / 25.0).abs() < 1e-12);
        let steep = tangent_half_width(1e6, &transform, 15.0);
        assert!((steep - 1.0 / 25.0).abs() < 1e-12);
    }
}
