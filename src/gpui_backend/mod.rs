//! GPUI integration for gpui_funcplot.
//!
//! This module provides a GPUI view that renders a [`Plotter`](crate::Plotter)
//! and handles panning, wheel zoom, hover labels and the keyboard commands.

mod paint;
mod view;

use gpui::{App, KeyBinding, actions};

pub use view::{GpuiPlotterView, PlotterHandle};

actions!(funcplot, [ResetView, ToggleTheme, ZoomIn, ZoomOut]);

/// Key context used by [`GpuiPlotterView`] for its bindings.
pub const KEY_CONTEXT: &str = "FuncPlotter";

/// Register the default key bindings: `r` resets the view, `t` toggles the
/// theme, `=` and `-` zoom.
pub fn bind_keys(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("r", ResetView, Some(KEY_CONTEXT)),
        KeyBinding::new("t", ToggleTheme, Some(KEY_CONTEXT)),
        KeyBinding::new("=", ZoomIn, Some(KEY_CONTEXT)),
        KeyBinding::new("-", ZoomOut, Some(KEY_CONTEXT)),
    ]);
}
