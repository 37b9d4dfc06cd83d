//! gpui_funcplot is an interactive 2D plotter for points, line segments and
//! functions of `x`.
//! The core is backend independent: a [`Plotter`] turns input events into
//! scene changes and renders frames into any [`Surface`]. The optional `gpui`
//! feature adds a ready-made GPUI view.

#![forbid(unsafe_code)]

pub mod axis;
pub mod color;
pub mod config;
pub mod expr;
pub mod geom;
pub mod input;
pub mod interaction;
pub mod objects;
pub mod plotter;
pub mod proximity;
pub mod render;
pub mod scene;
pub mod style;
pub mod transform;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use axis::{GridAxis, Gridline, grid_step, gridlines};
pub use color::{Color, ColorParseError};
pub use config::PlotterConfig;
pub use expr::{EvalError, Expr, ExprError};
pub use geom::{RealPoint, ScreenPoint, ScreenRect, ViewportSize};
pub use input::InputError;
pub use interaction::{KeyCommand, PointerState};
pub use objects::{Curve, Label, Line, PlotObject};
pub use plotter::Plotter;
pub use render::{
    CircleStyle, LineSegment, LineStyle, RenderCommand, RenderList, Surface, TextStyle,
    render_scene,
};
pub use scene::{Scene, ZoomDirection};
pub use style::{Theme, ThemeMode, ThemeState};
pub use transform::Transform;

#[cfg(feature = "gpui")]
pub use gpui_backend::{GpuiPlotterView, PlotterHandle, bind_keys};
