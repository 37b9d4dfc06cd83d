//! Scene state: camera, scale, plotted objects and the hover label.
//!
//! Every mutator validates its input, applies the change and requests a full
//! redraw. Invalid input and duplicate additions are silent no-ops, but the
//! redraw is requested regardless.

use tracing::{debug, trace};

use crate::geom::{RealPoint, ViewportSize};
use crate::objects::{Curve, Label, Line, PlotObject};
use crate::transform::Transform;

/// Scale at which one real unit spans one grid square.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Zoom direction for [`Scene::zoom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Magnify (scale grows).
    In,
    /// Shrink (scale falls).
    Out,
}

/// Plotted objects and the camera looking at them.
#[derive(Debug, Clone)]
pub struct Scene {
    camera: RealPoint,
    scale: f64,
    points: Vec<RealPoint>,
    lines: Vec<Line>,
    curves: Vec<Curve>,
    label: Label,
    redraw: bool,
}

impl Scene {
    /// Create an empty scene looking at the origin.
    pub fn new() -> Self {
        Self {
            camera: RealPoint::ORIGIN,
            scale: DEFAULT_SCALE,
            points: Vec::new(),
            lines: Vec::new(),
            curves: Vec::new(),
            label: Label::empty(),
            redraw: true,
        }
    }

    /// Access the camera position.
    pub fn camera(&self) -> RealPoint {
        self.camera
    }

    /// Access the current scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Access the plotted points, oldest first.
    pub fn points(&self) -> &[RealPoint] {
        &self.points
    }

    /// Access the plotted lines, oldest first.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Access the plotted curves, oldest first.
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// Access the hover label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Build the transform for the current camera and scale.
    pub fn transform(&self, viewport: ViewportSize, grid_unit_px: f64) -> Transform {
        Transform::with_grid_unit(self.camera, self.scale, viewport, grid_unit_px)
    }

    /// Consume a pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Request a redraw without changing anything.
    pub fn request_redraw(&mut self) {
        trace!("redraw requested");
        self.redraw = true;
    }

    /// Add a point; mutates and requests a redraw.
    pub fn add_point(&mut self, point: RealPoint) {
        if !point.is_valid() {
            debug!(%point, "rejected invalid point");
        } else if self.points.contains(&point) {
            debug!(%point, "point already plotted");
        } else {
            debug!(%point, "adding point");
            self.points.push(point);
        }
        self.request_redraw();
    }

    /// Add a line; mutates and requests a redraw.
    pub fn add_line(&mut self, line: Line) {
        if !line.is_valid() {
            debug!(%line, "rejected invalid line");
        } else if self.lines.contains(&line) {
            debug!(%line, "line already plotted");
        } else {
            debug!(%line, "adding line");
            self.lines.push(line);
        }
        self.request_redraw();
    }

    /// Add a curve; mutates and requests a redraw.
    pub fn add_curve(&mut self, curve: Curve) {
        if !curve.is_valid() {
            debug!(%curve, "rejected curve that cannot be evaluated");
        } else if self.curves.contains(&curve) {
            debug!(%curve, "curve already plotted");
        } else {
            debug!(%curve, "adding curve");
            self.curves.push(curve);
        }
        self.request_redraw();
    }

    /// Add any plot object. A label replaces the current hover label.
    pub fn add(&mut self, object: PlotObject) {
        match object {
            PlotObject::Point(point) => self.add_point(point),
            PlotObject::Line(line) => self.add_line(line),
            PlotObject::Curve(curve) => self.add_curve(curve),
            PlotObject::Label(label) => self.set_label(label),
        }
    }

    /// Remove the most recent point; requests a redraw.
    pub fn undo_point(&mut self) -> Option<RealPoint> {
        let removed = self.points.pop();
        debug!(removed = ?removed, "undo point");
        self.request_redraw();
        removed
    }

    /// Remove the most recent line; requests a redraw.
    pub fn undo_line(&mut self) -> Option<Line> {
        let removed = self.lines.pop();
        debug!(removed = ?removed.map(|line| line.to_string()), "undo line");
        self.request_redraw();
        removed
    }

    /// Remove the most recent curve; requests a redraw.
    pub fn undo_curve(&mut self) -> Option<Curve> {
        let removed = self.curves.pop();
        debug!(removed = ?removed.as_ref().map(|curve| curve.to_string()), "undo curve");
        self.request_redraw();
        removed
    }

    /// Move the camera by a real-space delta; requests a redraw.
    pub fn pan(&mut self, delta: RealPoint) {
        let next = RealPoint::new(self.camera.x + delta.x, self.camera.y + delta.y);
        if next.is_valid() {
            self.camera = next;
        }
        self.request_redraw();
    }

    /// Multiply the scale by `1 ± step`; requests a redraw.
    ///
    /// There is no clamp. A product that is not strictly positive and finite
    /// is ignored.
    pub fn zoom(&mut self, direction: ZoomDirection, step: f64) {
        let factor = match direction {
            ZoomDirection::In => 1.0 + step,
            ZoomDirection::Out => 1.0 - step,
        };
        self.set_scale(self.scale * factor);
    }

    /// Set the scale directly; requests a redraw.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        } else {
            debug!(scale, "rejected scale");
        }
        self.request_redraw();
    }

    /// Center the camera on `point`; requests a redraw.
    pub fn teleport(&mut self, point: RealPoint) {
        if point.is_valid() {
            debug!(%point, "teleport");
            self.camera = point;
        } else {
            debug!(%point, "rejected teleport target");
        }
        self.request_redraw();
    }

    /// Restore the camera to the origin and the scale to 1; requests a redraw.
    pub fn reset_view(&mut self) {
        debug!("reset view");
        self.camera = RealPoint::ORIGIN;
        self.scale = DEFAULT_SCALE;
        self.request_redraw();
    }

    /// Replace the hover label; requests a redraw.
    pub fn set_label(&mut self, label: Label) {
        if label.is_valid() {
            trace!(text = %label.text, "hover label");
            self.label = label;
        }
        self.request_redraw();
    }

    /// Clear the hover label; requests a redraw.
    pub fn clear_label(&mut self) {
        self.label = Label::empty();
        self.request_redraw();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled() -> Scene {
        let mut scene = Scene::new();
        scene.take_redraw_request();
        scene
    }

    #[test]
    fn duplicates_are_ignored() {
        let mut scene = settled();
        scene.add_point(RealPoint::new(1.0, 2.0));
        scene.add_point(RealPoint::new(1.0, 2.0));
        assert_eq!(scene.points().len(), 1);

        let line = Line::new(RealPoint::ORIGIN, RealPoint::new(1.0, 1.0));
        scene.add_line(line);
        scene.add_line(line.with_color(crate::color::Color::WHITE));
        assert_eq!(scene.lines().len(), 1);

        scene.add_curve(Curve::parse("x^2").expect("parse"));
        scene.add_curve(Curve::parse("x^2").expect("parse"));
        assert_eq!(scene.curves().len(), 1);
        assert!(scene.take_redraw_request());
    }

    #[test]
    fn invalid_objects_are_ignored_but_redraw() {
        let mut scene = settled();
        scene.add_point(RealPoint::new(f64::NAN, 1.0));
        assert!(scene.points().is_empty());
        assert!(scene.take_redraw_request());
        assert!(!scene.take_redraw_request());
        scene.add_curve(Curve::parse("x + q").expect("parse"));
        assert!(scene.curves().is_empty());
    }

    #[test]
    fn undo_restores_length_and_tolerates_empty() {
        let mut scene = settled();
        assert_eq!(scene.undo_point(), None);
        assert_eq!(scene.undo_line(), None);
        assert!(scene.undo_curve().is_none());
        scene.add_point(RealPoint::new(1.0, 1.0));
        scene.add_point(RealPoint::new(2.0, 2.0));
        assert_eq!(scene.undo_point(), Some(RealPoint::new(2.0, 2.0)));
        assert_eq!(scene.points().len(), 1);
    }

    #[test]
    fn add_dispatches_by_kind() {
        let mut scene = settled();
        scene.add(PlotObject::Point(RealPoint::new(3.0, 4.0)));
        scene.add(Line::new(RealPoint::ORIGIN, RealPoint::new(1.0, 0.0)).into());
        scene.add(Label::new("hi", RealPoint::ORIGIN, crate::objects::LABEL_COLOR).into());
        assert_eq!(scene.points().len(), 1);
        assert_eq!(scene.lines().len(), 1);
        assert_eq!(scene.label().text, "hi");
    }

    #[test]
    fn zoom_is_unclamped_but_stays_positive() {
        let mut scene = settled();
        scene.zoom(ZoomDirection::In, 0.1);
        assert!((scene.scale() - 1.1).abs() < 1e-12);
        scene.zoom(ZoomDirection::Out, 1.0);
        assert!((scene.scale() - 1.1).abs() < 1e-12);
        for _ in 0..500 {
            scene.zoom(ZoomDirection::Out, 0.2);
        }
        assert!(scene.scale() > 0.0);
        scene.set_scale(f64::INFINITY);
        assert!(scene.scale().is_finite());
    }

    #[test]
    fn teleport_and_reset() {
        let mut scene = settled();
        scene.teleport(RealPoint::new(5.0, -2.0));
        assert_eq!(scene.camera(), RealPoint::new(5.0, -2.0));
        scene.teleport(RealPoint::new(f64::NAN, 0.0));
        assert_eq!(scene.camera(), RealPoint::new(5.0, -2.0));
        scene.zoom(ZoomDirection::In, 0.2);
        scene.reset_view();
        assert_eq!(scene.camera(), RealPoint::ORIGIN);
        assert_eq!(scene.scale(), 1.0);
    }
}
