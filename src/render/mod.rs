//! Drawing-surface boundary, recorded render commands and clipping helpers.
//!
//! The frame renderer writes to a [`Surface`]. [`RenderList`] is the surface
//! used by backends: it records the calls so they can be replayed with the
//! backend's own primitives (the GPUI backend paints them inside a canvas).

use crate::color::Color;
use crate::geom::{ScreenPoint, ScreenRect};

mod frame;

pub use frame::render_scene;

/// A drawing surface in screen coordinates.
pub trait Surface {
    /// Discard everything drawn so far and fill with `color`.
    fn clear_and_fill(&mut self, color: Color);

    /// Stroke a straight line.
    fn draw_line(&mut self, start: ScreenPoint, end: ScreenPoint, color: Color, width: f64);

    /// Draw a circle, filled or stroked.
    fn draw_circle(
        &mut self,
        center: ScreenPoint,
        radius: f64,
        color: Color,
        filled: bool,
        width: f64,
    );

    /// Draw outlined text centered horizontally on `anchor`, baseline at
    /// `anchor.y`.
    fn draw_text(&mut self, anchor: ScreenPoint, text: &str, fill: Color, stroke: Color, size: f64);
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f64,
}

/// Circle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    /// Fill and stroke color.
    pub color: Color,
    /// Fill the interior.
    pub filled: bool,
    /// Stroke width in pixels.
    pub width: f64,
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Glyph color.
    pub fill: Color,
    /// Outline color.
    pub stroke: Color,
    /// Font size in pixels.
    pub size: f64,
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Fill the whole surface.
    Clear(Color),
    /// Draw line segments sharing one style.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw a circle.
    Circle {
        /// Circle center.
        center: ScreenPoint,
        /// Radius in pixels.
        radius: f64,
        /// Circle styling.
        style: CircleStyle,
    },
    /// Draw text.
    Text {
        /// Baseline center.
        anchor: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Recorded render commands.
///
/// Consecutive lines with the same style are merged into one
/// [`RenderCommand::LineSegments`].
#[derive(Debug, Default, Clone)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Check whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop every recorded command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RenderList {
    fn clear_and_fill(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(RenderCommand::Clear(color));
    }

    fn draw_line(&mut self, start: ScreenPoint, end: ScreenPoint, color: Color, width: f64) {
        let style = LineStyle { color, width };
        let segment = LineSegment::new(start, end);
        if let Some(RenderCommand::LineSegments {
            segments,
            style: last,
        }) = self.commands.last_mut()
            && *last == style
        {
            segments.push(segment);
            return;
        }
        self.commands.push(RenderCommand::LineSegments {
            segments: vec![segment],
            style,
        });
    }

    fn draw_circle(
        &mut self,
        center: ScreenPoint,
        radius: f64,
        color: Color,
        filled: bool,
        width: f64,
    ) {
        self.commands.push(RenderCommand::Circle {
            center,
            radius,
            style: CircleStyle {
                color,
                filled,
                width,
            },
        });
    }

    fn draw_text(&mut self, anchor: ScreenPoint, text: &str, fill: Color, stroke: Color, size: f64) {
        self.commands.push(RenderCommand::Text {
            anchor,
            text: text.to_string(),
            style: TextStyle { fill, stroke, size },
        });
    }
}

/// Clip a segment to a rectangle (Cohen–Sutherland).
pub(crate) fn clip_segment(
    mut start: ScreenPoint,
    mut end: ScreenPoint,
    rect: ScreenRect,
) -> Option<(ScreenPoint, ScreenPoint)> {
    const LEFT: u8 = 1;
    const RIGHT: u8 = 2;
    const TOP: u8 = 4;
    const BOTTOM: u8 = 8;

    if !start.is_valid() || !end.is_valid() {
        return None;
    }

    let mut out_start = region_code(start, rect, LEFT, RIGHT, TOP, BOTTOM);
    let mut out_end = region_code(end, rect, LEFT, RIGHT, TOP, BOTTOM);

    loop {
        if (out_start | out_end) == 0 {
            return Some((start, end));
        }
        if (out_start & out_end) != 0 {
            return None;
        }

        let out_code = if out_start != 0 { out_start } else { out_end };
        let (mut x, mut y) = (0.0_f64, 0.0_f64);

        if (out_code & TOP) != 0 {
            x = start.x + (end.x - start.x) * (rect.min.y - start.y) / (end.y - start.y);
            y = rect.min.y;
        } else if (out_code & BOTTOM) != 0 {
            x = start.x + (end.x - start.x) * (rect.max.y - start.y) / (end.y - start.y);
            y = rect.max.y;
        } else if (out_code & RIGHT) != 0 {
            y = start.y + (end.y - start.y) * (rect.max.x - start.x) / (end.x - start.x);
            x = rect.max.x;
        } else if (out_code & LEFT) != 0 {
            y = start.y + (end.y - start.y) * (rect.min.x - start.x) / (end.x - start.x);
            x = rect.min.x;
        }

        let new_point = ScreenPoint::new(x, y);
        if out_code == out_start {
            start = new_point;
            out_start = region_code(start, rect, LEFT, RIGHT, TOP, BOTTOM);
        } else {
            end = new_point;
            out_end = region_code(end, rect, LEFT, RIGHT, TOP, BOTTOM);
        }
    }
}

fn region_code(
    point: ScreenPoint,
    rect: ScreenRect,
    left: u8,
    right: u8,
    top: u8,
    bottom: u8,
) -> u8 {
    let mut code = 0;
    if point.x < rect.min.x {
        code |= left;
    } else if point.x > rect.max.x {
        code |= right;
    }
    if point.y < rect.min.y {
        code |= top;
    } else if point.y > rect.max.y {
        code |= bottom;
    }
    code
}
