//! Tunable constants for drawing and interaction.

use std::f64::consts::PI;
use std::time::Duration;

use crate::color::Color;
use crate::transform::GRID_UNIT_PX;

/// Configuration shared by the renderer, proximity engine and event routing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotterConfig {
    /// Pixels per real unit at scale 1.
    pub grid_unit_px: f64,
    /// Zoom step applied per scroll wheel notch.
    pub wheel_zoom_step: f64,
    /// Zoom step applied by the zoom buttons.
    pub button_zoom_step: f64,
    /// Pointer distance, in pixels, that counts as hovering an object.
    pub hover_distance_px: f64,
    /// Length of each arrowhead stroke in pixels.
    pub arrow_length_px: f64,
    /// Angle between an arrowhead stroke and the line, in radians.
    pub arrow_half_angle: f64,
    /// Radius of plotted points in pixels.
    pub point_radius_px: f64,
    /// Curve sample intervals per horizontal pixel.
    pub curve_samples_per_px: f64,
    /// Extra pixels sampled beyond each side of the viewport.
    pub curve_overscan_px: f64,
    /// Stroke width of the axes.
    pub axis_width: f64,
    /// Stroke width of gridlines.
    pub grid_width: f64,
    /// Stroke width of lines and curves.
    pub object_width: f64,
    /// Font size of gridline labels.
    pub grid_label_size: f64,
    /// Font size of the hover label.
    pub hover_label_size: f64,
    /// Gridline color.
    pub grid_color: Color,
    /// Duration of the light/dark transition.
    pub theme_transition: Duration,
    /// Upper bound on gridlines drawn per axis.
    pub max_gridlines: usize,
    /// Margin added to the viewport before clipping line primitives.
    pub clip_margin_px: f64,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            grid_unit_px: GRID_UNIT_PX,
            wheel_zoom_step: 0.1,
            button_zoom_step: 0.2,
            hover_distance_px: 15.0,
            arrow_length_px: 15.0,
            arrow_half_angle: PI / 8.0,
            point_radius_px: 5.0,
            curve_samples_per_px: 0.5,
            curve_overscan_px: 10.0,
            axis_width: 3.0,
            grid_width: 1.0,
            object_width: 2.0,
            grid_label_size: 15.0,
            hover_label_size: 20.0,
            grid_color: Color::rgb8(150, 150, 150).with_alpha(0.5),
            theme_transition: Duration::from_millis(400),
            max_gridlines: 512,
            clip_margin_px: 8.0,
        }
    }
}
