use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, FontWeight, PathBuilder, Pixels, Point,
    TextRun, Window, font, point, px, quad,
};

use crate::color::Color;
use crate::geom::ScreenPoint;
use crate::render::{CircleStyle, LineSegment, LineStyle, RenderCommand, RenderList, TextStyle};

// Offsets used to fake a text outline: the outline color is painted at each
// of these before the glyphs are painted on top.
const OUTLINE_OFFSETS: [(f32, f32); 8] = [
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 1.0),
    (0.0, 1.0),
    (1.0, 1.0),
];

/// Replay a recorded frame inside `bounds`.
pub(crate) fn paint_frame(list: &RenderList, bounds: Bounds<Pixels>, window: &mut Window, cx: &mut App) {
    let origin = bounds.origin;
    window.with_content_mask(Some(ContentMask { bounds }), |window| {
        for command in list.commands() {
            match command {
                RenderCommand::Clear(color) => paint_clear(window, bounds, *color),
                RenderCommand::LineSegments { segments, style } => {
                    paint_lines(window, origin, segments, *style);
                }
                RenderCommand::Circle {
                    center,
                    radius,
                    style,
                } => paint_circle(window, origin, *center, *radius, *style),
                RenderCommand::Text {
                    anchor,
                    text,
                    style,
                } => paint_text(window, cx, origin, *anchor, text, style),
            }
        }
    });
}

fn paint_clear(window: &mut Window, bounds: Bounds<Pixels>, color: Color) {
    window.paint_quad(quad(
        bounds,
        Corners::all(px(0.0)),
        to_rgba(color),
        Edges::all(px(0.0)),
        to_rgba(color),
        BorderStyle::default(),
    ));
}

fn paint_lines(window: &mut Window, origin: Point<Pixels>, segments: &[LineSegment], style: LineStyle) {
    if segments.is_empty() {
        return;
    }
    let width = (style.width as f32).max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    for segment in segments {
        builder.move_to(to_point(origin, segment.start));
        builder.line_to(to_point(origin, segment.end));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_circle(
    window: &mut Window,
    origin: Point<Pixels>,
    center: ScreenPoint,
    radius: f64,
    style: CircleStyle,
) {
    // The stroke is centered on the circle edge, so it adds half its width.
    let outer = (radius + style.width * 0.5) as f32;
    let center = to_point(origin, center);
    let bounds = Bounds::from_corners(
        point(center.x - px(outer), center.y - px(outer)),
        point(center.x + px(outer), center.y + px(outer)),
    );
    let fill = if style.filled {
        style.color
    } else {
        Color::TRANSPARENT
    };
    window.paint_quad(quad(
        bounds,
        Corners::all(px(outer)),
        to_rgba(fill),
        Edges::all(px(style.width as f32)),
        to_rgba(style.color),
        BorderStyle::default(),
    ));
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    origin: Point<Pixels>,
    anchor: ScreenPoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    let font_size = px(style.size as f32);
    let stroke = shape(window, text, font_size, style.stroke);
    let fill = shape(window, text, font_size, style.fill);
    let line_height = fill.ascent + fill.descent;

    // Center horizontally on the anchor with the baseline at anchor.y.
    let anchor = to_point(origin, anchor);
    let top_left = point(anchor.x - fill.width * 0.5, anchor.y - fill.ascent);

    for (dx, dy) in OUTLINE_OFFSETS {
        let offset = point(top_left.x + px(dx), top_left.y + px(dy));
        let _ = stroke.paint(offset, line_height, window, cx);
    }
    let _ = fill.paint(top_left, line_height, window, cx);
}

fn shape(window: &Window, text: &str, font_size: Pixels, color: Color) -> gpui::ShapedLine {
    let mut text_font = font(".SystemUIFont");
    text_font.weight = FontWeight::BOLD;
    let run = TextRun {
        len: text.len(),
        font: text_font,
        color: to_hsla(color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    window
        .text_system()
        .shape_line(text.to_string().into(), font_size, &[run], None)
}

fn to_point(origin: Point<Pixels>, screen: ScreenPoint) -> Point<Pixels> {
    point(
        origin.x + px(screen.x as f32),
        origin.y + px(screen.y as f32),
    )
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}
