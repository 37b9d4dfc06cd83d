//! Full-frame renderer.

use std::f64::consts::PI;

use crate::axis::{self, GridAxis};
use crate::color::Color;
use crate::config::PlotterConfig;
use crate::geom::{RealPoint, ScreenPoint, ScreenRect, ViewportSize};
use crate::objects::{Curve, Line, POINT_COLOR};
use crate::scene::Scene;
use crate::style::Theme;
use crate::transform::Transform;

use super::{Surface, clip_segment};

/// Draw the whole scene.
///
/// Order is background, axes, gridlines with labels, curves, lines with
/// arrowheads, points and finally the hover label, so the label is never
/// covered.
pub fn render_scene<S: Surface + ?Sized>(
    scene: &Scene,
    theme: &Theme,
    config: &PlotterConfig,
    viewport: ViewportSize,
    surface: &mut S,
) {
    let transform = scene.transform(viewport, config.grid_unit_px);
    let mut frame = Frame {
        transform,
        clip: viewport.rect().inflate(config.clip_margin_px),
        surface,
    };

    frame.surface.clear_and_fill(theme.background);
    if !viewport.is_valid() {
        return;
    }

    for axis in [GridAxis::Horizontal, GridAxis::Vertical] {
        let (start, end) = axis::axis_segment(&frame.transform, axis, RealPoint::ORIGIN);
        frame.line(start, end, theme.foreground, config.axis_width);
    }

    frame.grid(theme, config);

    for curve in scene.curves() {
        frame.curve(curve, config);
    }
    for line in scene.lines() {
        frame.arrow(line, config);
    }
    let marker_clip = viewport.rect().inflate(config.point_radius_px);
    for point in scene.points() {
        let center = frame.transform.to_screen(*point);
        if marker_clip.contains(center) {
            frame.surface.draw_circle(
                center,
                config.point_radius_px,
                POINT_COLOR,
                true,
                config.object_width,
            );
        }
    }

    let label = scene.label();
    if !label.is_empty() {
        let anchor = frame.transform.to_screen(label.anchor);
        frame.surface.draw_text(
            anchor,
            &label.text,
            label.color,
            theme.background,
            config.hover_label_size,
        );
    }
}

struct Frame<'a, S: Surface + ?Sized> {
    transform: Transform,
    clip: ScreenRect,
    surface: &'a mut S,
}

impl<S: Surface + ?Sized> Frame<'_, S> {
    fn line(&mut self, start: ScreenPoint, end: ScreenPoint, color: Color, width: f64) {
        if let Some((start, end)) = clip_segment(start, end, self.clip) {
            self.surface.draw_line(start, end, color, width);
        }
    }

    fn real_line(&mut self, start: RealPoint, end: RealPoint, color: Color, width: f64) {
        let start = self.transform.to_screen(start);
        let end = self.transform.to_screen(end);
        self.line(start, end, color, width);
    }

    fn grid(&mut self, theme: &Theme, config: &PlotterConfig) {
        let mut labels = Vec::new();
        for axis in [GridAxis::Vertical, GridAxis::Horizontal] {
            for gridline in axis::gridlines(&self.transform, axis, config.max_gridlines) {
                let through = match axis {
                    GridAxis::Vertical => RealPoint::new(gridline.value, 0.0),
                    GridAxis::Horizontal => RealPoint::new(0.0, gridline.value),
                };
                let (start, end) = axis::axis_segment(&self.transform, axis, through);
                self.line(start, end, config.grid_color, config.grid_width);
                labels.push(gridline);
            }
        }
        for gridline in labels {
            let anchor = self.transform.to_screen(gridline.label_anchor());
            self.surface.draw_text(
                anchor,
                &gridline.label,
                theme.background,
                theme.foreground,
                config.grid_label_size,
            );
        }
    }

    fn curve(&mut self, curve: &Curve, config: &PlotterConfig) {
        let viewport = self.transform.viewport();
        let intervals = (viewport.width * config.curve_samples_per_px).floor().max(1.0) as usize;
        let (left, right) = self.transform.visible_x_range(config.curve_overscan_px);
        let dx = (right - left) / intervals as f64;
        let mut previous: Option<RealPoint> = None;
        for i in 0..=intervals {
            let x = left + dx * i as f64;
            let current = curve.eval(x).map(|y| RealPoint::new(x, y));
            if let (Some(a), Some(b)) = (previous, current) {
                self.real_line(a, b, curve.color, config.object_width);
            }
            previous = current;
        }
    }

    fn arrow(&mut self, line: &Line, config: &PlotterConfig) {
        self.real_line(line.start, line.end, line.color, config.object_width);

        let arrow_length = self.transform.real_length(config.arrow_length_px);
        if line.length() < arrow_length {
            return;
        }
        let theta = (line.end.y - line.start.y).atan2(line.end.x - line.start.x);
        for side in [1.0, -1.0] {
            let angle = theta + PI + side * config.arrow_half_angle;
            let tip = RealPoint::new(
                line.end.x + arrow_length * angle.cos(),
                line.end.y + arrow_length * angle.sin(),
            );
            self.real_line(line.end, tip, line.color, config.object_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Label;
    use crate::render::{RenderCommand, RenderList};

    fn viewport() -> ViewportSize {
        ViewportSize::new(800.0, 600.0)
    }

    fn render(scene: &Scene) -> RenderList {
        let mut list = RenderList::new();
        render_scene(scene, &Theme::dark(), &PlotterConfig::default(), viewport(), &mut list);
        list
    }

    fn segments_with_color(list: &RenderList, color: Color) -> usize {
        list.commands()
            .iter()
            .map(|command| match command {
                RenderCommand::LineSegments { segments, style } if style.color == color => {
                    segments.len()
                }
                _ => 0,
            })
            .sum()
    }

    #[test]
    fn empty_scene_draws_background_axes_and_grid() {
        let list = render(&Scene::new());
        let theme = Theme::dark();
        assert_eq!(list.commands()[0], RenderCommand::Clear(theme.background));
        match &list.commands()[1] {
            RenderCommand::LineSegments { segments, style } => {
                assert_eq!(segments.len(), 2);
                assert_eq!(style.color, theme.foreground);
                assert_eq!(style.width, 3.0);
            }
            other => panic!("expected axes, got {other:?}"),
        }
        let grid_color = PlotterConfig::default().grid_color;
        assert_eq!(segments_with_color(&list, grid_color), 33 + 25);
        let labels = list
            .commands()
            .iter()
            .filter(|command| {
                matches!(command, RenderCommand::Text { style, .. }
                    if style.fill == theme.background && style.stroke == theme.foreground && style.size == 15.0)
            })
            .count();
        assert_eq!(labels, 33 + 25);
    }

    #[test]
    fn points_and_hover_label() {
        let mut scene = Scene::new();
        scene.add_point(RealPoint::new(3.0, 4.0));
        scene.add_point(RealPoint::new(1000.0, 0.0));
        scene.set_label(Label::new("(3,4)", RealPoint::new(3.0, 4.0), POINT_COLOR));
        let list = render(&scene);
        let circles: Vec<_> = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Circle { center, radius, style } => Some((*center, *radius, *style)),
                _ => None,
            })
            .collect();
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].0, ScreenPoint::new(475.0, 200.0));
        assert_eq!(circles[0].1, 5.0);
        assert!(circles[0].2.filled);

        match list.commands().last() {
            Some(RenderCommand::Text { anchor, text, style }) => {
                assert_eq!(*anchor, ScreenPoint::new(475.0, 200.0));
                assert_eq!(text, "(3,4)");
                assert_eq!(style.fill, POINT_COLOR);
                assert_eq!(style.stroke, Theme::dark().background);
                assert_eq!(style.size, 20.0);
            }
            other => panic!("expected hover label last, got {other:?}"),
        }
    }

    #[test]
    fn arrowheads_only_on_long_lines() {
        let color = Color::rgb8(1, 2, 3);
        let mut scene = Scene::new();
        scene.add_line(Line::new(RealPoint::ORIGIN, RealPoint::new(4.0, 0.0)).with_color(color));
        assert_eq!(segments_with_color(&render(&scene), color), 3);

        let mut short = Scene::new();
        short.add_line(Line::new(RealPoint::ORIGIN, RealPoint::new(0.2, 0.0)).with_color(color));
        assert_eq!(segments_with_color(&render(&short), color), 1);
    }

    #[test]
    fn arrowhead_points_back_along_line() {
        let color = Color::rgb8(1, 2, 3);
        let mut scene = Scene::new();
        scene.add_line(Line::new(RealPoint::ORIGIN, RealPoint::new(4.0, 0.0)).with_color(color));
        let list = render(&scene);
        let end = ScreenPoint::new(500.0, 300.0);
        for command in list.commands() {
            if let RenderCommand::LineSegments { segments, style } = command
                && style.color == color
            {
                for head in &segments[1..] {
                    assert_eq!(head.start, end);
                    assert!(head.end.x < end.x);
                    assert!((head.start.distance(head.end) - 15.0).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn curve_breaks_at_undefined_samples() {
        let color = Color::rgb8(9, 9, 9);
        let mut scene = Scene::new();
        scene.add_curve(Curve::parse("sqrt(x)").expect("parse").with_color(color));
        let list = render(&scene);
        for command in list.commands() {
            if let RenderCommand::LineSegments { segments, style } = command
                && style.color == color
            {
                assert!(!segments.is_empty());
                assert!(segments.iter().all(|segment| segment.start.x >= 400.0 - 1e-9));
            }
        }

        let mut full = Scene::new();
        full.add_curve(Curve::parse("0").expect("parse").with_color(color));
        // 400 intervals, each clipped to the inflated viewport or dropped.
        let drawn = segments_with_color(&render(&full), color);
        assert!(drawn >= 398 && drawn <= 400, "drew {drawn}");
    }
}
