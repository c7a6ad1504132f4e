// File: crates/chart-core/src/render.rs
// Summary: Backend-neutral drawing contract used by layout, axes and series.

use std::io::Write;

use crate::error::Result;
use crate::geometry::RectI32;
use crate::text::Font;
use crate::types::Color;

/// A stateful 2-D drawing surface.
///
/// Path calls accumulate until `stroke`, `fill` or `fill_stroke` flushes them with the
/// current style. Text calls use the current font settings. Nothing reaches the caller's
/// writer before [`Renderer::save`].
pub trait Renderer {
    /// Clears style state (colors, widths, dashes, font settings, rotation).
    fn reset_style(&mut self);

    fn dpi(&self) -> f64;
    fn set_dpi(&mut self, dpi: f64);

    fn set_class_name(&mut self, name: &str);
    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_width(&mut self, width: f64);
    fn set_stroke_dash_array(&mut self, dashes: &[f64]);

    fn move_to(&mut self, x: i32, y: i32);
    fn line_to(&mut self, x: i32, y: i32);
    fn quad_curve_to(&mut self, cx: i32, cy: i32, x: i32, y: i32);
    /// Elliptical arc around (`cx`, `cy`); angles in radians.
    fn arc_to(&mut self, cx: i32, cy: i32, rx: f64, ry: f64, start_angle: f64, delta_angle: f64);
    fn close(&mut self);

    fn stroke(&mut self);
    fn fill(&mut self);
    fn fill_stroke(&mut self);

    /// Filled and stroked circle centered at (`x`, `y`).
    fn circle(&mut self, radius: f64, x: i32, y: i32);

    fn set_font(&mut self, font: &Font);
    fn set_font_color(&mut self, color: Color);
    /// Font size in points.
    fn set_font_size(&mut self, size: f64);

    /// Draws `body` with its baseline-left corner at (`x`, `y`).
    fn text(&mut self, body: &str, x: i32, y: i32);
    /// Bounding box of `body` with the current font settings, anchored at the origin.
    fn measure_text(&self, body: &str) -> RectI32;

    fn set_text_rotation(&mut self, degrees: f64);
    fn clear_text_rotation(&mut self);

    /// Encodes everything drawn so far into `w`.
    fn save(&mut self, w: &mut dyn Write) -> Result<()>;
}

/// Builds a renderer for a surface of `width` × `height` pixels.
pub type RendererProvider = fn(i32, i32) -> Result<Box<dyn Renderer>>;

/// Extra drawing hooked onto the end of the pipeline, e.g. annotations.
pub trait Renderable {
    fn render(&self, r: &mut dyn Renderer, canvas: RectI32, defaults: &crate::style::Style);
}

impl<F> Renderable for F
where
    F: Fn(&mut dyn Renderer, RectI32, &crate::style::Style),
{
    fn render(&self, r: &mut dyn Renderer, canvas: RectI32, defaults: &crate::style::Style) {
        self(r, canvas, defaults)
    }
}
