// File: crates/chart-core/src/legend.rs
// Summary: Boxed legend listing visible series with a line swatch in each series' style.

use crate::draw;
use crate::geometry::RectI32;
use crate::render::Renderer;
use crate::style::Style;
use crate::types::{Insets, MIN_TICK_VERTICAL_SPACING};

const LINE_TEXT_GAP: i32 = 5;
const LINE_LENGTH_MINIMUM: i32 = 25;

/// One legend row: label plus the resolved series style used for its swatch.
#[derive(Clone, Debug)]
pub struct LegendEntry {
    pub label: String,
    pub style: Style,
}

/// Legend anchored at the top-left corner of the canvas.
#[derive(Clone, Debug, Default)]
pub struct Legend {
    pub style: Style,
}

impl Legend {
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    /// Draws the box and rows; `defaults` supplies colors and font not set on the legend.
    pub fn render(&self, r: &mut dyn Renderer, canvas: RectI32, entries: &[LegendEntry], defaults: &Style) -> RectI32 {
        let style = self.style.inherit_from(defaults);
        let padding = style.padding.unwrap_or(Insets::uniform(5));
        let (pt, pl, pr, pb) = (padding.top as i32, padding.left as i32, padding.right as i32, padding.bottom as i32);

        let entries: Vec<&LegendEntry> = entries.iter().filter(|e| !e.label.is_empty()).collect();
        let mut content = RectI32 {
            top: canvas.top + pt,
            left: canvas.left + pl,
            right: canvas.left + pl,
            bottom: canvas.top + pt,
        };

        style.text_options().write_to_renderer(r);
        for (i, e) in entries.iter().enumerate() {
            let tb = r.measure_text(&e.label);
            if i > 0 {
                content.bottom += MIN_TICK_VERTICAL_SPACING;
            }
            content.bottom += tb.height();
            content.right = content.right.max(content.left + tb.width() + LINE_TEXT_GAP + LINE_LENGTH_MINIMUM);
        }

        let mut legend = RectI32 { top: canvas.top, left: canvas.left, right: canvas.left, bottom: canvas.top }.grow(content);
        legend.right = content.right + pr;
        legend.bottom = content.bottom + pb;
        draw::boxed(r, legend, &style);

        let mut y = content.top;
        let tx = content.left;
        for (i, e) in entries.iter().enumerate() {
            if i > 0 {
                y += MIN_TICK_VERTICAL_SPACING;
            }
            style.text_options().write_to_renderer(r);
            let tb = r.measure_text(&e.label);
            let ty = y + tb.height();
            r.text(&e.label, tx, ty);

            let ly = ty - (tb.height() >> 1);
            let lx = tx + tb.width() + LINE_TEXT_GAP;
            let lx2 = content.right - pr;
            r.reset_style();
            e.style.stroke_options().write_drawing_options_to_renderer(r);
            r.move_to(lx, ly);
            r.line_to(lx2, ly);
            r.stroke();
            y += tb.height();
        }
        r.reset_style();
        legend
    }
}
