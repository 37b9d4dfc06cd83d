use std::sync::{Arc, RwLock};
use std::time::Instant;

use gpui::prelude::*;
use gpui::{
    App, FocusHandle, Focusable, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels,
    Point, ScrollWheelEvent, Window, canvas, div, px,
};

use crate::geom::{ScreenPoint, ViewportSize};
use crate::interaction::KeyCommand;
use crate::plotter::Plotter;
use crate::render::RenderList;

use super::paint::{paint_frame, to_hsla};
use super::{KEY_CONTEXT, ResetView, ToggleTheme, ZoomIn, ZoomOut};

/// A GPUI view that renders a [`Plotter`] and forwards input to it.
///
/// Dragging with the left button pans, the wheel zooms around the camera,
/// and hovering an object shows its label. Keyboard commands are dispatched
/// as actions; see [`bind_keys`](super::bind_keys).
pub struct GpuiPlotterView {
    plotter: Arc<RwLock<Plotter>>,
    origin: Arc<RwLock<ScreenPoint>>,
    focus_handle: FocusHandle,
}

impl GpuiPlotterView {
    /// Create a view around `plotter`.
    pub fn new(plotter: Plotter, cx: &mut Context<Self>) -> Self {
        Self {
            plotter: Arc::new(RwLock::new(plotter)),
            origin: Arc::new(RwLock::new(ScreenPoint::new(0.0, 0.0))),
            focus_handle: cx.focus_handle(),
        }
    }

    /// Get a handle for reading or mutating the plotter from outside the view.
    pub fn plotter_handle(&self) -> PlotterHandle {
        PlotterHandle {
            plotter: Arc::clone(&self.plotter),
        }
    }

    /// Convert a window position to canvas-local coordinates.
    fn local_point(&self, position: Point<Pixels>) -> ScreenPoint {
        let origin = *self.origin.read().expect("origin lock");
        let position = screen_point(position);
        ScreenPoint::new(position.x - origin.x, position.y - origin.y)
    }

    fn update(&self, cx: &mut Context<Self>, f: impl FnOnce(&mut Plotter)) {
        let mut plotter = self.plotter.write().expect("plotter lock");
        f(&mut plotter);
        if plotter.take_redraw_request() {
            cx.notify();
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        window.focus(&self.focus_handle);
        let position = self.local_point(ev.position);
        self.update(cx, |plotter| plotter.pointer_down(position));
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let position = self.local_point(ev.position);
        self.update(cx, |plotter| plotter.pointer_move(position));
    }

    fn on_mouse_up(&mut self, _ev: &MouseUpEvent, _window: &mut Window, cx: &mut Context<Self>) {
        self.update(cx, Plotter::pointer_up);
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let delta = ev.delta.pixel_delta(px(16.0));
        let delta_y = f64::from(f32::from(delta.y));
        self.update(cx, |plotter| plotter.wheel(delta_y));
    }

    fn run(&mut self, command: KeyCommand, cx: &mut Context<Self>) {
        let now = Instant::now();
        self.update(cx, |plotter| plotter.command(command, now));
    }

    fn handle_reset_view(&mut self, _: &ResetView, _window: &mut Window, cx: &mut Context<Self>) {
        self.run(KeyCommand::ResetView, cx);
    }

    fn handle_toggle_theme(&mut self, _: &ToggleTheme, _window: &mut Window, cx: &mut Context<Self>) {
        self.run(KeyCommand::ToggleTheme, cx);
    }

    fn handle_zoom_in(&mut self, _: &ZoomIn, _window: &mut Window, cx: &mut Context<Self>) {
        self.run(KeyCommand::ZoomIn, cx);
    }

    fn handle_zoom_out(&mut self, _: &ZoomOut, _window: &mut Window, cx: &mut Context<Self>) {
        self.run(KeyCommand::ZoomOut, cx);
    }
}

impl Focusable for GpuiPlotterView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for GpuiPlotterView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let now = Instant::now();
        let (animating, background) = {
            let mut plotter = self.plotter.write().expect("plotter lock");
            let animating = plotter.tick(now);
            (animating, plotter.theme(now).background)
        };
        if animating {
            cx.on_next_frame(window, |_, _, cx| cx.notify());
        }

        let plotter = Arc::clone(&self.plotter);
        let origin = Arc::clone(&self.origin);

        div()
            .track_focus(&self.focus_handle)
            .key_context(KEY_CONTEXT)
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, _, _| {
                        *origin.write().expect("origin lock") = screen_point(bounds.origin);
                        let mut plotter = plotter.write().expect("plotter lock");
                        plotter.resize(ViewportSize::new(
                            f64::from(f32::from(bounds.size.width)),
                            f64::from(f32::from(bounds.size.height)),
                        ));
                        plotter.take_redraw_request();
                        let mut list = RenderList::new();
                        plotter.render(now, &mut list);
                        list
                    },
                    move |bounds, list, window, cx| {
                        paint_frame(&list, bounds, window, cx);
                    },
                )
                .size_full(),
            )
            .on_action(cx.listener(Self::handle_reset_view))
            .on_action(cx.listener(Self::handle_toggle_theme))
            .on_action(cx.listener(Self::handle_zoom_in))
            .on_action(cx.listener(Self::handle_zoom_out))
            .on_mouse_down(MouseButton::Left, cx.listener(Self::on_mouse_down))
            .on_mouse_move(cx.listener(Self::on_mouse_move))
            .on_mouse_up(MouseButton::Left, cx.listener(Self::on_mouse_up))
            .on_scroll_wheel(cx.listener(Self::on_scroll))
    }
}

/// A handle for mutating a [`Plotter`] held inside a `GpuiPlotterView`.
///
/// The handle clones cheaply. Changes show up on the next frame; call
/// `notify` on the view entity to request one.
#[derive(Clone)]
pub struct PlotterHandle {
    plotter: Arc<RwLock<Plotter>>,
}

impl PlotterHandle {
    /// Read the plotter state.
    pub fn read<R>(&self, f: impl FnOnce(&Plotter) -> R) -> R {
        let plotter = self.plotter.read().expect("plotter lock");
        f(&plotter)
    }

    /// Mutate the plotter state.
    ///
    /// The plotter is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut Plotter) -> R) -> R {
        let mut plotter = self.plotter.write().expect("plotter lock");
        f(&mut plotter)
    }
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f64::from(f32::from(point.x)), f64::from(f32::from(point.y)))
}
