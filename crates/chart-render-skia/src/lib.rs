// File: crates/chart-render-skia/src/lib.rs
// Summary: CPU raster backend for chart-core: skia surface, paragraph-shaped text and PNG output.

use std::io::Write;

use chart_core::geometry::points_to_pixels;
use chart_core::types::DEFAULT_DPI;
use chart_core::{ChartError, Color, Font, RectI32, Renderer, Result};
use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

const FALLBACK_FAMILIES: &[&str] = &["Roboto", "Segoe UI", "Arial", "Helvetica", "DejaVu Sans", "sans-serif"];

#[derive(Clone, Debug, Default)]
struct Pen {
    stroke_color: Color,
    fill_color: Color,
    stroke_width: f64,
    dash_array: Vec<f64>,
    font_color: Color,
    font_size: Option<f64>,
    text_rotation: Option<f64>,
}

/// Draws onto an N32 premultiplied raster surface and encodes it as PNG on save.
///
/// Text is laid out with skia's paragraph shaper against the system font manager, so
/// measurements follow the installed typeface rather than chart-core's metric table.
pub struct SkiaRenderer {
    surface: skia::Surface,
    fonts: FontCollection,
    family: Option<String>,
    dpi: f64,
    pen: Pen,
    path: skia::Path,
}

impl SkiaRenderer {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or_else(|| ChartError::Renderer(format!("failed to create {width}x{height} raster surface")))?;
        let mut fonts = FontCollection::new();
        fonts.set_default_font_manager(skia::FontMgr::default(), None);
        Ok(Self { surface, fonts, family: None, dpi: DEFAULT_DPI, pen: Pen::default(), path: skia::Path::new() })
    }

    fn font_size_px(&self) -> f32 {
        points_to_pixels(self.dpi, self.pen.font_size.unwrap_or(chart_core::types::DEFAULT_FONT_SIZE)) as f32
    }

    fn layout(&self, text: &str) -> Paragraph {
        let mut ts = TextStyle::new();
        ts.set_font_size(self.font_size_px().max(1.0));
        ts.set_color(to_skia(self.pen.font_color));
        let mut families: Vec<&str> = self.family.iter().map(String::as_str).collect();
        families.extend_from_slice(FALLBACK_FAMILIES);
        ts.set_font_families(&families);

        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&ts);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    fn stroke_paint(&self) -> Option<skia::Paint> {
        if self.pen.stroke_color.is_transparent() || self.pen.stroke_width <= 0.0 {
            return None;
        }
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(self.pen.stroke_width as f32);
        paint.set_color(to_skia(self.pen.stroke_color));
        if !self.pen.dash_array.is_empty() {
            let intervals: Vec<f32> = self.pen.dash_array.iter().map(|d| *d as f32).collect();
            paint.set_path_effect(skia::PathEffect::dash(&intervals, 0.0));
        }
        Some(paint)
    }

    fn fill_paint(&self) -> Option<skia::Paint> {
        if self.pen.fill_color.is_transparent() {
            return None;
        }
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_color(to_skia(self.pen.fill_color));
        Some(paint)
    }

    fn flush(&mut self, fill: bool, stroke: bool) {
        let path = std::mem::replace(&mut self.path, skia::Path::new());
        let paints = [fill.then(|| self.fill_paint()).flatten(), stroke.then(|| self.stroke_paint()).flatten()];
        let canvas = self.surface.canvas();
        for paint in paints.iter().flatten() {
            canvas.draw_path(&path, paint);
        }
    }
}

fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn pt(x: i32, y: i32) -> skia::Point {
    skia::Point::new(x as f32, y as f32)
}

impl Renderer for SkiaRenderer {
    fn reset_style(&mut self) {
        self.pen = Pen::default();
    }

    fn dpi(&self) -> f64 { self.dpi }
    fn set_dpi(&mut self, dpi: f64) { self.dpi = dpi; }

    // raster output has no notion of classes
    fn set_class_name(&mut self, _name: &str) {}
    fn set_stroke_color(&mut self, color: Color) { self.pen.stroke_color = color; }
    fn set_fill_color(&mut self, color: Color) { self.pen.fill_color = color; }
    fn set_stroke_width(&mut self, width: f64) { self.pen.stroke_width = width; }
    fn set_stroke_dash_array(&mut self, dashes: &[f64]) { self.pen.dash_array = dashes.to_vec(); }

    fn move_to(&mut self, x: i32, y: i32) {
        self.path.move_to(pt(x, y));
    }

    fn line_to(&mut self, x: i32, y: i32) {
        self.path.line_to(pt(x, y));
    }

    fn quad_curve_to(&mut self, cx: i32, cy: i32, x: i32, y: i32) {
        self.path.quad_to(pt(cx, cy), pt(x, y));
    }

    fn arc_to(&mut self, cx: i32, cy: i32, rx: f64, ry: f64, start_angle: f64, delta_angle: f64) {
        let oval = skia::Rect::from_ltrb(
            cx as f32 - rx as f32,
            cy as f32 - ry as f32,
            cx as f32 + rx as f32,
            cy as f32 + ry as f32,
        );
        self.path.arc_to(oval, start_angle.to_degrees() as f32, delta_angle.to_degrees() as f32, false);
    }

    fn close(&mut self) {
        self.path.close();
    }

    fn stroke(&mut self) {
        self.flush(false, true);
    }

    fn fill(&mut self) {
        self.flush(true, false);
    }

    fn fill_stroke(&mut self) {
        self.flush(true, true);
    }

    fn circle(&mut self, radius: f64, x: i32, y: i32) {
        let paints = [self.fill_paint(), self.stroke_paint()];
        let canvas = self.surface.canvas();
        for paint in paints.iter().flatten() {
            canvas.draw_circle(pt(x, y), radius as f32, paint);
        }
    }

    fn set_font(&mut self, font: &Font) { self.family = Some(font.family().to_owned()); }
    fn set_font_color(&mut self, color: Color) { self.pen.font_color = color; }
    fn set_font_size(&mut self, size: f64) { self.pen.font_size = Some(size); }

    fn text(&mut self, body: &str, x: i32, y: i32) {
        if self.pen.font_color.is_transparent() {
            return;
        }
        let mut paragraph = self.layout(body);
        // paragraphs paint from their top-left corner; shift so (x, y) is the baseline
        let top = y as f32 - paragraph.alphabetic_baseline();
        let rotation = self.pen.text_rotation;
        let canvas = self.surface.canvas();
        canvas.save();
        if let Some(deg) = rotation {
            canvas.rotate(deg as f32, Some(pt(x, y)));
        }
        paragraph.paint(canvas, (x as f32, top));
        canvas.restore();
    }

    fn measure_text(&self, body: &str) -> RectI32 {
        let paragraph = self.layout(body);
        let bounds = RectI32::from_ltrb(0, 0, paragraph.longest_line().ceil() as i32, paragraph.height().ceil() as i32);
        match self.pen.text_rotation {
            Some(deg) => bounds.corners().rotate(deg).bounds(),
            None => bounds,
        }
    }

    fn set_text_rotation(&mut self, degrees: f64) { self.pen.text_rotation = Some(degrees); }
    fn clear_text_rotation(&mut self) { self.pen.text_rotation = None; }

    fn save(&mut self, w: &mut dyn Write) -> Result<()> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| ChartError::Renderer("encode PNG failed".into()))?;
        tracing::debug!(bytes = data.len(), "skia: png encoded");
        w.write_all(data.as_bytes())?;
        Ok(())
    }
}

/// [`chart_core::RendererProvider`] for [`SkiaRenderer`].
pub fn skia_provider(width: i32, height: i32) -> Result<Box<dyn Renderer>> {
    if width <= 0 || height <= 0 {
        return Err(ChartError::Renderer(format!("invalid raster canvas {width}x{height}")));
    }
    Ok(Box::new(SkiaRenderer::new(width, height)?))
}
