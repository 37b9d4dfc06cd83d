//! The plotter context: scene, theme, configuration and pointer state.
//!
//! [`Plotter`] is the one object a front end talks to. It turns pointer,
//! wheel, keyboard and text-input events into scene mutations and renders
//! frames on demand.

use std::time::Instant;

use tracing::debug;

use crate::config::PlotterConfig;
use crate::geom::{RealPoint, ScreenPoint, ViewportSize, format_number};
use crate::input::{self, InputError};
use crate::interaction::{self, KeyCommand, PointerState, ZoomDirection};
use crate::objects::{Curve, Line, PlotObject};
use crate::proximity;
use crate::render::{self, Surface};
use crate::scene::Scene;
use crate::style::{Theme, ThemeMode, ThemeState};
use crate::transform::Transform;

// Above this scale the position readout shows full precision.
const PRECISE_POSITION_SCALE: f64 = 10.0;

/// Interactive plotter state and event routing.
#[derive(Debug, Clone)]
pub struct Plotter {
    scene: Scene,
    theme: ThemeState,
    config: PlotterConfig,
    viewport: ViewportSize,
    pointer: PointerState,
}

impl Plotter {
    /// Create a plotter with the default configuration.
    pub fn new(viewport: ViewportSize) -> Self {
        Self::with_config(PlotterConfig::default(), viewport)
    }

    /// Create a plotter with a custom configuration.
    pub fn with_config(config: PlotterConfig, viewport: ViewportSize) -> Self {
        Self {
            scene: Scene::new(),
            theme: ThemeState::new(ThemeMode::default(), config.theme_transition),
            config,
            viewport,
            pointer: PointerState::default(),
        }
    }

    /// Access the scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Access the scene mutably.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Access the configuration.
    pub fn config(&self) -> &PlotterConfig {
        &self.config
    }

    /// Access the viewport size.
    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// Access the theme state.
    pub fn theme_state(&self) -> &ThemeState {
        &self.theme
    }

    /// Colors in effect at `now`.
    pub fn theme(&self, now: Instant) -> Theme {
        self.theme.theme(now)
    }

    /// Access the pointer state.
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Transform for the current camera, scale and viewport.
    pub fn transform(&self) -> Transform {
        self.scene.transform(self.viewport, self.config.grid_unit_px)
    }

    /// Update the viewport size and request a redraw.
    pub fn resize(&mut self, viewport: ViewportSize) {
        if self.viewport != viewport {
            debug!(width = viewport.width, height = viewport.height, "resize");
            self.viewport = viewport;
            self.scene.request_redraw();
        }
    }

    /// Primary button pressed.
    pub fn pointer_down(&mut self, position: ScreenPoint) {
        self.pointer.dragging = true;
        self.pointer.position = Some(position);
    }

    /// Primary button released.
    pub fn pointer_up(&mut self) {
        self.pointer.dragging = false;
    }

    /// Pointer moved: update the hover label, then pan if dragging.
    pub fn pointer_move(&mut self, position: ScreenPoint) {
        let transform = self.transform();
        proximity::update_hover_label(&mut self.scene, &transform, position, &self.config);

        let previous = self.pointer.move_to(position);
        if let (true, Some(previous)) = (self.pointer.dragging, previous) {
            let camera =
                interaction::pan_camera(self.scene.camera(), previous, position, &transform);
            let delta = camera.offset_from(self.scene.camera());
            self.scene.pan(delta);
        }
    }

    /// Scroll wheel: negative `delta_y` zooms in, positive zooms out.
    pub fn wheel(&mut self, delta_y: f64) {
        if let Some(direction) = interaction::wheel_zoom_direction(delta_y) {
            self.scene.zoom(direction, self.config.wheel_zoom_step);
        }
    }

    /// Zoom-in button.
    pub fn zoom_in(&mut self) {
        self.scene.zoom(ZoomDirection::In, self.config.button_zoom_step);
    }

    /// Zoom-out button.
    pub fn zoom_out(&mut self) {
        self.scene.zoom(ZoomDirection::Out, self.config.button_zoom_step);
    }

    /// Restore the camera to the origin and the scale to 1.
    pub fn reset_view(&mut self) {
        self.scene.reset_view();
    }

    /// Start the light/dark transition.
    pub fn toggle_theme(&mut self, now: Instant) {
        self.theme.toggle(now);
        self.scene.request_redraw();
    }

    /// Handle a key press by name. Returns true when the key was bound.
    pub fn key(&mut self, key: &str, now: Instant) -> bool {
        match KeyCommand::from_key(key) {
            Some(command) => {
                self.command(command, now);
                true
            }
            None => false,
        }
    }

    /// Run a keyboard or toolbar command.
    pub fn command(&mut self, command: KeyCommand, now: Instant) {
        match command {
            KeyCommand::ResetView => self.reset_view(),
            KeyCommand::ToggleTheme => self.toggle_theme(now),
            KeyCommand::ZoomIn => self.zoom_in(),
            KeyCommand::ZoomOut => self.zoom_out(),
        }
    }

    /// Add any plot object.
    pub fn add(&mut self, object: impl Into<PlotObject>) {
        self.scene.add(object.into());
    }

    /// Point text field submitted.
    pub fn submit_point(&mut self, text: &str) {
        if let Some(point) = accept(input::parse_point_input(text)) {
            self.scene.add_point(point);
        }
    }

    /// Line text field submitted.
    pub fn submit_line(&mut self, text: &str) {
        if let Some(line) = accept(input::parse_line_input(text)) {
            self.scene.add_line(line);
        }
    }

    /// Function text field submitted.
    pub fn submit_function(&mut self, text: &str) {
        if let Some(curve) = accept(input::parse_function_input(text)) {
            self.scene.add_curve(curve);
        }
    }

    /// Teleport text field submitted.
    pub fn submit_teleport(&mut self, text: &str) {
        if let Some(point) = accept(input::parse_teleport_input(text)) {
            self.scene.teleport(point);
        }
    }

    /// Remove the most recent point.
    pub fn undo_point(&mut self) -> Option<RealPoint> {
        self.scene.undo_point()
    }

    /// Remove the most recent line.
    pub fn undo_line(&mut self) -> Option<Line> {
        self.scene.undo_line()
    }

    /// Remove the most recent curve.
    pub fn undo_curve(&mut self) -> Option<Curve> {
        self.scene.undo_curve()
    }

    /// Advance the theme animation; true while more frames are needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        // The tick that ends a transition still needs one final frame.
        let was_animating = self.theme.transition().is_some();
        let animating = self.theme.tick(now);
        if was_animating {
            self.scene.request_redraw();
        }
        animating
    }

    /// Consume a pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        self.scene.take_redraw_request()
    }

    /// Draw a full frame as of `now`.
    pub fn render<S: Surface + ?Sized>(&self, now: Instant, surface: &mut S) {
        let theme = self.theme.theme(now);
        render::render_scene(&self.scene, &theme, &self.config, self.viewport, surface);
    }

    /// Camera readout, e.g. `Position: (1.25, -3)`.
    ///
    /// Coordinates are rounded to two decimals unless zoomed in far enough
    /// for that to hide movement.
    pub fn position_text(&self) -> String {
        let camera = self.scene.camera();
        let show = |value: f64| {
            if self.scene.scale() > PRECISE_POSITION_SCALE {
                format_number(value)
            } else {
                format_number((value * 100.0).round() / 100.0)
            }
        };
        format!("Position: ({}, {})", show(camera.x), show(camera.y))
    }
}

fn accept<T>(result: Result<T, InputError>) -> Option<T> {
    result
        .inspect_err(|error| debug!(%error, "ignored input"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RenderCommand, RenderList};
    use std::time::Duration;

    fn plotter() -> Plotter {
        Plotter::new(ViewportSize::new(800.0, 600.0))
    }

    #[test]
    fn hover_drag_and_reset() {
        let mut plotter = plotter();
        plotter.submit_point("(3,4)");
        assert_eq!(plotter.scene().points().len(), 1);

        plotter.pointer_move(ScreenPoint::new(475.0, 200.0));
        assert_eq!(plotter.scene().label().text, "(3,4)");

        plotter.pointer_down(ScreenPoint::new(400.0, 300.0));
        plotter.pointer_move(ScreenPoint::new(500.0, 300.0));
        plotter.pointer_up();
        assert_eq!(plotter.scene().camera(), RealPoint::new(-4.0, 0.0));
        assert!(plotter.scene().label().is_empty());

        plotter.pointer_move(ScreenPoint::new(600.0, 300.0));
        assert_eq!(plotter.scene().camera(), RealPoint::new(-4.0, 0.0));

        plotter.key("r", Instant::now());
        assert_eq!(plotter.scene().camera(), RealPoint::ORIGIN);
        assert_eq!(plotter.scene().scale(), 1.0);
    }

    #[test]
    fn wheel_and_buttons_zoom() {
        let mut plotter = plotter();
        plotter.wheel(-1.0);
        assert!((plotter.scene().scale() - 1.1).abs() < 1e-12);
        plotter.wheel(0.0);
        assert!((plotter.scene().scale() - 1.1).abs() < 1e-12);
        plotter.reset_view();
        plotter.zoom_out();
        assert!((plotter.scene().scale() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn malformed_input_is_swallowed() {
        let mut plotter = plotter();
        plotter.submit_point("3,4");
        plotter.submit_point("(foo,4)");
        plotter.submit_line("(0,0),(1,1)");
        plotter.submit_function("");
        plotter.submit_function("x^");
        plotter.submit_function("sin(x)");
        assert!(plotter.scene().points().is_empty());
        assert_eq!(plotter.scene().lines().len(), 1);
        assert_eq!(plotter.scene().curves().len(), 1);
        plotter.submit_teleport("(2,3)");
        assert_eq!(plotter.scene().camera(), RealPoint::new(2.0, 3.0));
    }

    #[test]
    fn theme_toggle_animates() {
        let mut plotter = plotter();
        let start = Instant::now();
        assert!(plotter.key("t", start));
        assert!(plotter.tick(start + Duration::from_millis(100)));
        assert!(!plotter.tick(start + Duration::from_millis(400)));
        assert_eq!(plotter.theme(start + Duration::from_millis(400)), Theme::light());

        let mut list = RenderList::new();
        plotter.render(start + Duration::from_millis(400), &mut list);
        assert_eq!(list.commands()[0], RenderCommand::Clear(Theme::light().background));
    }

    #[test]
    fn resize_requests_redraw() {
        let mut plotter = plotter();
        plotter.take_redraw_request();
        plotter.resize(ViewportSize::new(800.0, 600.0));
        assert!(!plotter.take_redraw_request());
        plotter.resize(ViewportSize::new(1024.0, 768.0));
        assert!(plotter.take_redraw_request());
        assert_eq!(plotter.transform().viewport(), ViewportSize::new(1024.0, 768.0));
    }

    #[test]
    fn position_readout() {
        let mut plotter = plotter();
        plotter.scene_mut().teleport(RealPoint::new(1.23456, -0.5));
        assert_eq!(plotter.position_text(), "Position: (1.23, -0.5)");
        plotter.scene_mut().set_scale(20.0);
        assert_eq!(plotter.position_text(), "Position: (1.23456, -0.5)");
    }
}
