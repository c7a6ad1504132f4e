// File: crates/chart-core/src/draw.rs
// Summary: Styled drawing helpers shared by the chart pipeline, axes, legend and series.

use crate::geometry::{Point, RectI32};
use crate::range::Range;
use crate::render::Renderer;
use crate::series::ValuesProvider;
use crate::style::{Style, TextHorizontalAlign, TextVerticalAlign};

const DEFAULT_TEXT_LINE_SPACING: i32 = 5;

/// Filled and stroked rectangle.
pub fn boxed(r: &mut dyn Renderer, b: RectI32, style: &Style) {
    r.reset_style();
    style.fill_and_stroke_options().write_drawing_options_to_renderer(r);
    r.move_to(b.left, b.top);
    r.line_to(b.right, b.top);
    r.line_to(b.right, b.bottom);
    r.line_to(b.left, b.bottom);
    r.line_to(b.left, b.top);
    r.fill_stroke();
}

/// Single text run with its baseline-left corner at (`x`, `y`).
pub fn text(r: &mut dyn Renderer, body: &str, x: i32, y: i32, style: &Style) {
    style.text_options().write_to_renderer(r);
    r.text(body, x, y);
    r.reset_style();
}

pub fn measure_text(r: &mut dyn Renderer, body: &str, style: &Style) -> RectI32 {
    style.text_options().write_to_renderer(r);
    let b = r.measure_text(body);
    r.reset_style();
    b
}

/// Places `body` (split on newlines) inside `within` using the style's text alignment.
pub fn text_within(r: &mut dyn Renderer, body: &str, within: RectI32, style: &Style) {
    style.text_options().write_to_renderer(r);
    let lines: Vec<&str> = body.lines().collect();
    let spacing = style.text_line_spacing.unwrap_or(DEFAULT_TEXT_LINE_SPACING);
    let boxes: Vec<RectI32> = lines.iter().map(|l| r.measure_text(l)).collect();
    let total: i32 = boxes.iter().map(RectI32::height).sum::<i32>() + spacing * (boxes.len() as i32 - 1).max(0);

    let mut y = match style.text_vertical_align.unwrap_or_default() {
        TextVerticalAlign::Baseline | TextVerticalAlign::Top => within.top,
        TextVerticalAlign::Middle => within.top + (within.height() >> 1) - (total >> 1),
        TextVerticalAlign::Bottom => within.bottom - total,
    };
    let rotated = style.text_rotation_degrees.is_some_and(|d| d != 0.0);
    for (line, lb) in lines.iter().zip(&boxes) {
        let x = match style.text_horizontal_align.unwrap_or_default() {
            TextHorizontalAlign::Left => within.left,
            TextHorizontalAlign::Center => within.left + ((within.width() - lb.width()) >> 1),
            TextHorizontalAlign::Right => within.right - lb.width(),
        };
        let ty = if rotated { y } else { y + lb.height() };
        r.text(line, x, ty);
        y += lb.height() + spacing;
    }
    r.reset_style();
}

/// Polyline through every value, with optional fill down to the zero baseline and dots.
///
/// Values are read once, in index order.
pub fn line_series(
    r: &mut dyn Renderer,
    canvas: RectI32,
    x_range: &dyn Range,
    y_range: &dyn Range,
    style: &Style,
    values: &dyn ValuesProvider,
) {
    let points: Vec<Point> = (0..values.len())
        .map(|i| {
            let (vx, vy) = values.value(i);
            Point::new(canvas.left + x_range.translate(vx), canvas.bottom - y_range.translate(vy))
        })
        .collect();
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return;
    };

    if style.should_draw_fill() {
        let baseline = canvas.bottom.min(canvas.bottom - y_range.translate(0.0));
        r.reset_style();
        style.fill_options().write_drawing_options_to_renderer(r);
        r.move_to(first.x, first.y);
        for p in &points[1..] {
            r.line_to(p.x, p.y);
        }
        r.line_to(last.x, baseline);
        r.line_to(first.x, baseline);
        r.line_to(first.x, first.y);
        r.fill();
    }

    if style.should_draw_stroke() {
        r.reset_style();
        style.stroke_options().write_drawing_options_to_renderer(r);
        r.move_to(first.x, first.y);
        for p in &points[1..] {
            r.line_to(p.x, p.y);
        }
        r.stroke();
    }

    if style.should_draw_dot() {
        let radius = style.dot_width.unwrap_or_default();
        r.reset_style();
        style.dot_options().write_drawing_options_to_renderer(r);
        for p in &points {
            r.circle(radius, p.x, p.y);
        }
    }
}
