// File: crates/chart-core/src/grid.rs
// Summary: Major/minor grid lines derived from tick sets.

use crate::geometry::RectI32;
use crate::range::Range;
use crate::render::Renderer;
use crate::style::Style;
use crate::tick::Tick;

/// A full-canvas line at a tick value.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLine {
    pub value: f64,
    pub is_minor: bool,
    pub style: Style,
}

impl GridLine {
    /// Vertical lines span the canvas height at `range.translate(value)` from the left edge;
    /// horizontal lines span its width measured up from the bottom edge.
    pub fn render(&self, r: &mut dyn Renderer, canvas: RectI32, range: &dyn Range, is_vertical: bool, defaults: &Style) {
        let style = self.style.inherit_from(defaults);
        if !style.should_draw_stroke() {
            return;
        }
        r.reset_style();
        style.stroke_options().write_drawing_options_to_renderer(r);

        let offset = range.translate(self.value);
        if is_vertical {
            let x = canvas.left + offset;
            r.move_to(x, canvas.bottom);
            r.line_to(x, canvas.top);
        } else {
            let y = canvas.bottom - offset;
            r.move_to(canvas.left, y);
            r.line_to(canvas.right, y);
        }
        r.stroke();
    }
}

/// Grid lines for every tick except the first and last, alternating major and minor.
pub fn generate_grid_lines(ticks: &[Tick], major: &Style, minor: &Style) -> Vec<GridLine> {
    if ticks.len() < 3 {
        return Vec::new();
    }
    ticks[1..ticks.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let is_minor = i % 2 == 1;
            let style = if is_minor { minor.clone() } else { major.clone() };
            GridLine { value: t.value, is_minor, style }
        })
        .collect()
}
