// File: crates/chart-core/src/svg.rs
// Summary: Vector backend: buffers SVG path/text/circle elements and writes the document on save.

use std::fmt::Write as _;
use std::io::Write;

use crate::error::{ChartError, Result};
use crate::geometry::{points_to_pixels, RectI32};
use crate::render::Renderer;
use crate::text::{Font, FontMetrics};
use crate::types::{Color, DEFAULT_DPI, DEFAULT_FONT_SIZE};

/// Current pen/brush/text state.
#[derive(Clone, Debug, Default)]
struct PenState {
    class_name: String,
    stroke_color: Color,
    fill_color: Color,
    stroke_width: f64,
    dash_array: Vec<f64>,
    font_color: Color,
    font_size: Option<f64>,
    text_rotation: Option<f64>,
}

/// SVG renderer; measurement uses the active [`Font`]'s metrics.
#[derive(Debug)]
pub struct SvgRenderer {
    width: i32,
    height: i32,
    dpi: f64,
    font: Option<Font>,
    pen: PenState,
    path: Vec<String>,
    body: String,
}

impl SvgRenderer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            dpi: DEFAULT_DPI,
            font: None,
            pen: PenState::default(),
            path: Vec::new(),
            body: String::new(),
        }
    }

    fn font_size_px(&self) -> f64 {
        points_to_pixels(self.dpi, self.pen.font_size.unwrap_or(DEFAULT_FONT_SIZE))
    }

    fn metrics(&self) -> FontMetrics {
        self.font.as_ref().map(Font::metrics).unwrap_or_default()
    }

    fn class_attr(&self) -> String {
        if self.pen.class_name.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, escape_xml(&self.pen.class_name))
        }
    }

    fn stroke_css(&self) -> String {
        let mut css = format!("stroke-width:{};stroke:{}", self.pen.stroke_width, paint(self.pen.stroke_color));
        if !self.pen.dash_array.is_empty() {
            let dashes: Vec<String> = self.pen.dash_array.iter().map(|d| d.to_string()).collect();
            let _ = write!(css, ";stroke-dasharray:{}", dashes.join(","));
        }
        css
    }

    fn fill_css(&self) -> String {
        format!("fill:{}", paint(self.pen.fill_color))
    }

    fn text_css(&self) -> String {
        let family = self.font.as_ref().map(Font::family).unwrap_or("sans-serif");
        format!(
            "fill:{};font-size:{:.1}px;font-family:{}",
            paint(self.pen.font_color),
            self.font_size_px(),
            escape_xml(family)
        )
    }

    fn flush_path(&mut self, css: String) {
        if self.path.is_empty() {
            return;
        }
        let d = self.path.join("");
        let class = self.class_attr();
        let _ = writeln!(self.body, r#"<path d="{d}" style="{css}"{class}/>"#);
        self.path.clear();
    }
}

fn paint(c: Color) -> String {
    if c.is_transparent() {
        "none".to_owned()
    } else {
        c.to_string()
    }
}

impl Renderer for SvgRenderer {
    fn reset_style(&mut self) {
        self.pen = PenState::default();
    }

    fn dpi(&self) -> f64 { self.dpi }
    fn set_dpi(&mut self, dpi: f64) { self.dpi = dpi; }

    fn set_class_name(&mut self, name: &str) { self.pen.class_name = name.to_owned(); }
    fn set_stroke_color(&mut self, color: Color) { self.pen.stroke_color = color; }
    fn set_fill_color(&mut self, color: Color) { self.pen.fill_color = color; }
    fn set_stroke_width(&mut self, width: f64) { self.pen.stroke_width = width; }
    fn set_stroke_dash_array(&mut self, dashes: &[f64]) { self.pen.dash_array = dashes.to_vec(); }

    fn move_to(&mut self, x: i32, y: i32) {
        self.path.push(format!("M {x} {y}"));
    }

    fn line_to(&mut self, x: i32, y: i32) {
        self.path.push(format!("L {x} {y}"));
    }

    fn quad_curve_to(&mut self, cx: i32, cy: i32, x: i32, y: i32) {
        self.path.push(format!("Q{cx},{cy} {x},{y}"));
    }

    fn arc_to(&mut self, cx: i32, cy: i32, rx: f64, ry: f64, start_angle: f64, delta_angle: f64) {
        let point = |a: f64| (cx + (rx * a.cos()) as i32, cy + (ry * a.sin()) as i32);
        let (sx, sy) = point(start_angle);
        let lead = if self.path.is_empty() { "M" } else { "L" };
        self.path.push(format!("{lead} {sx} {sy}"));

        // a full turn is split in two so start and end points differ
        let delta = delta_angle.clamp(-std::f64::consts::TAU, std::f64::consts::TAU);
        let parts = if delta.abs() >= std::f64::consts::TAU - 1e-9 { 2 } else { 1 };
        let sweep = u8::from(delta > 0.0);
        for i in 1..=parts {
            let piece = delta / f64::from(parts);
            let large = u8::from(piece.abs() > std::f64::consts::PI);
            let (ex, ey) = point(start_angle + piece * f64::from(i));
            self.path.push(format!("A {} {} 0 {large} {sweep} {ex} {ey}", rx as i32, ry as i32));
        }
    }

    fn close(&mut self) {
        self.path.push("Z".to_owned());
    }

    fn stroke(&mut self) {
        let css = format!("{};fill:none", self.stroke_css());
        self.flush_path(css);
    }

    fn fill(&mut self) {
        let css = format!("stroke-width:0;stroke:none;{}", self.fill_css());
        self.flush_path(css);
    }

    fn fill_stroke(&mut self) {
        let css = format!("{};{}", self.stroke_css(), self.fill_css());
        self.flush_path(css);
    }

    fn circle(&mut self, radius: f64, x: i32, y: i32) {
        let css = format!("{};{}", self.stroke_css(), self.fill_css());
        let class = self.class_attr();
        let _ = writeln!(self.body, r#"<circle cx="{x}" cy="{y}" r="{radius}" style="{css}"{class}/>"#);
    }

    fn set_font(&mut self, font: &Font) { self.font = Some(font.clone()); }
    fn set_font_color(&mut self, color: Color) { self.pen.font_color = color; }
    fn set_font_size(&mut self, size: f64) { self.pen.font_size = Some(size); }

    fn text(&mut self, body: &str, x: i32, y: i32) {
        let css = self.text_css();
        let class = self.class_attr();
        let transform = match self.pen.text_rotation {
            Some(deg) => format!(r#" transform="rotate({deg:.2},{x},{y})""#),
            None => String::new(),
        };
        let _ = writeln!(
            self.body,
            r#"<text x="{x}" y="{y}" style="{css}"{transform}{class}>{}</text>"#,
            escape_xml(body)
        );
    }

    fn measure_text(&self, body: &str) -> RectI32 {
        let size_px = self.font_size_px();
        let width = self.metrics().line_width(body, size_px).ceil() as i32;
        let bounds = RectI32::from_ltrb(0, 0, width, size_px as i32);
        match self.pen.text_rotation {
            Some(deg) => bounds.corners().rotate(deg).bounds(),
            None => bounds,
        }
    }

    fn set_text_rotation(&mut self, degrees: f64) { self.pen.text_rotation = Some(degrees); }
    fn clear_text_rotation(&mut self) { self.pen.text_rotation = None; }

    fn save(&mut self, w: &mut dyn Write) -> Result<()> {
        let mut doc = String::with_capacity(self.body.len() + 256);
        let _ = writeln!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}">"#,
            self.width, self.height
        );
        doc.push_str(&self.body);
        doc.push_str("</svg>\n");
        w.write_all(doc.as_bytes())?;
        Ok(())
    }
}

/// [`crate::render::RendererProvider`] for [`SvgRenderer`].
pub fn svg_provider(width: i32, height: i32) -> Result<Box<dyn Renderer>> {
    if width <= 0 || height <= 0 {
        return Err(ChartError::Renderer(format!("invalid svg canvas {width}x{height}")));
    }
    Ok(Box::new(SvgRenderer::new(width, height)))
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
