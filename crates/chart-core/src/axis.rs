// File: crates/chart-core/src/axis.rs
// Summary: X and Y axes: tick selection, label measurement for canvas fitting, and drawing.

use crate::draw;
use crate::format::ValueFormatter;
use crate::geometry::RectI32;
use crate::grid::{generate_grid_lines, GridLine};
use crate::pretty::generate_pretty_continuous_ticks;
use crate::range::Range;
use crate::render::Renderer;
use crate::series::YAxisType;
use crate::style::{Style, TextHorizontalAlign};
use crate::tick::{generate_continuous_ticks, Tick};
use crate::types::{
    DEFAULT_HORIZONTAL_TICK_WIDTH, DEFAULT_VERTICAL_TICK_HEIGHT, DEFAULT_X_AXIS_MARGIN, DEFAULT_Y_AXIS_MARGIN,
};

/// Where tick labels sit relative to their tick marks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TickPosition {
    /// Centered under (or beside) the tick.
    #[default]
    UnderTick,
    /// Centered between a tick and the previous one; the first label is skipped.
    BetweenTicks,
}

/// Generator used when neither explicit ticks nor the range supply them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TickStrategy {
    #[default]
    Continuous,
    Pretty,
}

/// Chart-level fallbacks handed to axes at draw time.
#[derive(Clone, Debug, Default)]
pub struct AxisDefaults {
    pub axis: Style,
    pub grid_major: Style,
    pub grid_minor: Style,
}

fn select_ticks(
    explicit: Option<&Vec<Tick>>,
    strategy: TickStrategy,
    r: &mut dyn Renderer,
    range: &dyn Range,
    is_vertical: bool,
    style: &Style,
    vf: &ValueFormatter,
) -> Vec<Tick> {
    if let Some(ticks) = explicit.filter(|t| !t.is_empty()) {
        return ticks.clone();
    }
    if let Some(ticks) = range.ticks(r, style, vf) {
        return ticks;
    }
    match strategy {
        TickStrategy::Continuous => generate_continuous_ticks(r, range, is_vertical, style, vf),
        TickStrategy::Pretty => generate_pretty_continuous_ticks(r, range, is_vertical, style, vf),
    }
}

fn select_grid_lines(
    explicit: Option<&Vec<GridLine>>,
    major: Option<&Style>,
    minor: Option<&Style>,
    ticks: &[Tick],
) -> Vec<GridLine> {
    if let Some(lines) = explicit {
        return lines.clone();
    }
    if major.is_none() && minor.is_none() {
        return Vec::new();
    }
    let hidden = Style::hidden();
    generate_grid_lines(ticks, major.unwrap_or(&hidden), minor.unwrap_or(&hidden))
}

fn render_grid_lines(
    r: &mut dyn Renderer,
    lines: &[GridLine],
    canvas: RectI32,
    range: &dyn Range,
    is_vertical: bool,
    defaults: &AxisDefaults,
) {
    for gl in lines.iter().filter(|gl| !gl.style.hidden) {
        let fallback = if gl.is_minor { &defaults.grid_minor } else { &defaults.grid_major };
        gl.render(r, canvas, range, is_vertical, fallback);
    }
}

/// The horizontal axis along the bottom of the canvas.
#[derive(Clone, Default)]
pub struct XAxis {
    pub name: Option<String>,
    pub name_style: Style,
    pub style: Style,
    pub tick_style: Style,
    pub value_formatter: Option<ValueFormatter>,
    pub range: Option<Box<dyn Range>>,
    /// Highest precedence: replaces range- and strategy-generated ticks.
    pub ticks: Option<Vec<Tick>>,
    pub tick_position: TickPosition,
    pub tick_strategy: TickStrategy,
    /// `None` disables major grid lines.
    pub grid_major_style: Option<Style>,
    pub grid_minor_style: Option<Style>,
    pub grid_lines: Option<Vec<GridLine>>,
}

impl XAxis {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn is_hidden(&self) -> bool {
        self.style.hidden
    }

    fn tick_label_style(&self, defaults: &Style) -> Style {
        self.tick_style.inherit_from(&self.style.inherit_from(defaults))
    }

    pub fn get_ticks(&self, r: &mut dyn Renderer, range: &dyn Range, defaults: &Style, vf: &ValueFormatter) -> Vec<Tick> {
        let style = self.tick_label_style(defaults);
        select_ticks(self.ticks.as_ref(), self.tick_strategy, r, range, false, &style, vf)
    }

    pub fn get_grid_lines(&self, ticks: &[Tick]) -> Vec<GridLine> {
        select_grid_lines(self.grid_lines.as_ref(), self.grid_major_style.as_ref(), self.grid_minor_style.as_ref(), ticks)
    }

    fn visible_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty() && !self.name_style.hidden)
    }

    /// Bounds of everything this axis draws below `canvas`.
    pub fn measure(&self, r: &mut dyn Renderer, canvas: RectI32, range: &dyn Range, defaults: &Style, ticks: &[Tick]) -> RectI32 {
        let style = self.tick_label_style(defaults);
        let (mut left, mut right, mut bottom) = (i32::MAX, i32::MIN, canvas.bottom);

        for (index, t) in ticks.iter().enumerate() {
            let tb = draw::measure_text(r, &t.label, &style);
            let tx = canvas.left + range.translate(t.value);
            let (ltx, rtx) = match self.tick_position {
                TickPosition::UnderTick => (tx - (tb.width() >> 1), tx + (tb.width() >> 1)),
                TickPosition::BetweenTicks if index > 0 => (canvas.left + range.translate(ticks[index - 1].value), tx),
                TickPosition::BetweenTicks => (tx, tx),
            };
            left = left.min(ltx);
            right = right.max(rtx);
            bottom = bottom.max(canvas.bottom + DEFAULT_X_AXIS_MARGIN + tb.height());
        }
        if ticks.is_empty() {
            (left, right) = (canvas.left, canvas.right);
        }

        if let Some(name) = self.visible_name() {
            let tb = draw::measure_text(r, name, &self.name_style.inherit_from(defaults));
            bottom += DEFAULT_X_AXIS_MARGIN + tb.height();
        }
        RectI32 { top: canvas.bottom, left, right, bottom }
    }

    pub fn render(
        &self,
        r: &mut dyn Renderer,
        canvas: RectI32,
        range: &dyn Range,
        defaults: &AxisDefaults,
        ticks: &[Tick],
    ) {
        let grid = self.get_grid_lines(ticks);
        render_grid_lines(r, &grid, canvas, range, true, defaults);

        let style = self.tick_label_style(&defaults.axis);
        r.reset_style();
        style.stroke_options().write_drawing_options_to_renderer(r);
        r.move_to(canvas.left, canvas.bottom);
        r.line_to(canvas.right, canvas.bottom);
        r.stroke();

        let rotation = style.text_rotation_degrees.filter(|d| *d != 0.0);
        let upright = Style { text_rotation_degrees: None, ..style.clone() };
        let mut previous_label: Option<crate::geometry::BoxCorners> = None;
        let mut max_text_height = 0;

        for (index, t) in ticks.iter().enumerate() {
            let tx = canvas.left + range.translate(t.value);
            r.reset_style();
            style.stroke_options().write_drawing_options_to_renderer(r);
            r.move_to(tx, canvas.bottom);
            r.line_to(tx, canvas.bottom + DEFAULT_VERTICAL_TICK_HEIGHT);
            r.stroke();

            let tb = draw::measure_text(r, &t.label, &style);
            max_text_height = max_text_height.max(tb.height());
            match self.tick_position {
                TickPosition::UnderTick => match rotation {
                    None => {
                        let ty = canvas.bottom + DEFAULT_X_AXIS_MARGIN + tb.height();
                        draw::text(r, &t.label, tx - (tb.width() >> 1), ty, &style);
                    }
                    Some(deg) => {
                        let ty = canvas.bottom + 2 * tb.height();
                        let flat = draw::measure_text(r, &t.label, &upright);
                        let corners = RectI32::from_ltwh(tx, ty - flat.height(), flat.width(), flat.height())
                            .corners()
                            .rotate(deg);
                        if previous_label.is_some_and(|p| p.overlaps(&corners)) {
                            continue;
                        }
                        draw::text(r, &t.label, tx, ty, &style);
                        previous_label = Some(corners);
                    }
                },
                TickPosition::BetweenTicks if index > 0 => {
                    let ltx = canvas.left + range.translate(ticks[index - 1].value);
                    let top = canvas.bottom + DEFAULT_X_AXIS_MARGIN;
                    let centered = style.inherit_from(&Style {
                        text_horizontal_align: Some(TextHorizontalAlign::Center),
                        ..Style::default()
                    });
                    draw::text_within(r, &t.label, RectI32 { top, left: ltx, right: tx, bottom: top }, &centered);
                }
                TickPosition::BetweenTicks => {}
            }
        }

        if let Some(name) = self.visible_name() {
            let name_style = self.name_style.inherit_from(&defaults.axis);
            let tb = draw::measure_text(r, name, &name_style);
            let tx = canvas.right - ((canvas.width() >> 1) + (tb.width() >> 1));
            let ty = canvas.bottom + DEFAULT_X_AXIS_MARGIN + max_text_height + DEFAULT_X_AXIS_MARGIN + tb.height();
            draw::text(r, name, tx, ty, &name_style);
        }
    }
}

/// A vertical axis; primary sits right of the canvas, secondary left of it.
#[derive(Clone, Default)]
pub struct YAxis {
    pub name: Option<String>,
    pub name_style: Style,
    pub style: Style,
    pub tick_style: Style,
    pub axis_type: YAxisType,
    pub value_formatter: Option<ValueFormatter>,
    pub range: Option<Box<dyn Range>>,
    pub ticks: Option<Vec<Tick>>,
    pub tick_strategy: TickStrategy,
    pub grid_major_style: Option<Style>,
    pub grid_minor_style: Option<Style>,
    pub grid_lines: Option<Vec<GridLine>>,
    /// Draws a horizontal line at value zero when set.
    pub zero: Option<Style>,
}

impl YAxis {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn secondary() -> Self {
        Self { axis_type: YAxisType::Secondary, ..Self::default() }
    }

    pub fn is_hidden(&self) -> bool {
        self.style.hidden
    }

    fn tick_label_style(&self, defaults: &Style) -> Style {
        self.tick_style.inherit_from(&self.style.inherit_from(defaults))
    }

    pub fn get_ticks(&self, r: &mut dyn Renderer, range: &dyn Range, defaults: &Style, vf: &ValueFormatter) -> Vec<Tick> {
        let style = self.tick_label_style(defaults);
        select_ticks(self.ticks.as_ref(), self.tick_strategy, r, range, true, &style, vf)
    }

    pub fn get_grid_lines(&self, ticks: &[Tick]) -> Vec<GridLine> {
        select_grid_lines(self.grid_lines.as_ref(), self.grid_major_style.as_ref(), self.grid_minor_style.as_ref(), ticks)
    }

    fn visible_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty() && !self.name_style.hidden)
    }

    /// Bounds of the labels (and name) beside `canvas`.
    pub fn measure(&self, r: &mut dyn Renderer, canvas: RectI32, range: &dyn Range, defaults: &Style, ticks: &[Tick]) -> RectI32 {
        let primary = self.axis_type == YAxisType::Primary;
        let tx = if primary { canvas.right + DEFAULT_Y_AXIS_MARGIN } else { canvas.left - DEFAULT_Y_AXIS_MARGIN };
        let style = self.tick_label_style(defaults);

        let (mut min_x, mut max_x) = if primary { (canvas.right, canvas.right) } else { (canvas.left, canvas.left) };
        let (mut min_y, mut max_y) = (canvas.top, canvas.bottom);
        let mut max_text_height = 0;
        for t in ticks {
            let ly = canvas.bottom - range.translate(t.value);
            let tb = draw::measure_text(r, &t.label, &style);
            let half = tb.height() >> 1;
            max_text_height = max_text_height.max(tb.height());
            if primary {
                max_x = max_x.max(tx + tb.width());
            } else {
                min_x = min_x.min(tx - tb.width());
            }
            min_y = min_y.min(ly - half);
            max_y = max_y.max(ly + half);
        }

        if self.visible_name().is_some() {
            if primary {
                max_x += DEFAULT_Y_AXIS_MARGIN + max_text_height;
            } else {
                min_x -= DEFAULT_Y_AXIS_MARGIN + max_text_height;
            }
        }
        RectI32 { top: min_y, left: min_x, right: max_x, bottom: max_y }
    }

    pub fn render(
        &self,
        r: &mut dyn Renderer,
        canvas: RectI32,
        range: &dyn Range,
        defaults: &AxisDefaults,
        ticks: &[Tick],
    ) {
        let grid = self.get_grid_lines(ticks);
        render_grid_lines(r, &grid, canvas, range, false, defaults);

        let primary = self.axis_type == YAxisType::Primary;
        let style = self.tick_label_style(&defaults.axis);
        let sw = style.stroke_width.unwrap_or_default() as i32;
        let (lx, tx) = if primary {
            (canvas.right + sw, canvas.right + sw + DEFAULT_Y_AXIS_MARGIN)
        } else {
            (canvas.left, canvas.left - DEFAULT_Y_AXIS_MARGIN)
        };

        r.reset_style();
        style.stroke_options().write_drawing_options_to_renderer(r);
        r.move_to(lx, canvas.bottom);
        r.line_to(lx, canvas.top);
        r.stroke();

        let rotated = style.text_rotation_degrees.is_some_and(|d| d != 0.0);
        let mut max_text_width = 0;
        for t in ticks {
            let ly = canvas.bottom - range.translate(t.value);
            let tb = draw::measure_text(r, &t.label, &style);
            max_text_width = max_text_width.max(tb.width());

            r.reset_style();
            style.stroke_options().write_drawing_options_to_renderer(r);
            r.move_to(lx, ly);
            let mark = if primary { DEFAULT_HORIZONTAL_TICK_WIDTH } else { -DEFAULT_HORIZONTAL_TICK_WIDTH };
            r.line_to(lx + mark, ly);
            r.stroke();

            let text_x = if primary { tx } else { tx - tb.width() };
            let text_y = if rotated { ly } else { ly + (tb.height() >> 1) };
            draw::text(r, &t.label, text_x, text_y, &style);
        }

        if let Some(name) = self.visible_name() {
            let name_style = self.name_style.inherit_from(&defaults.axis.inherit_from(&Style {
                text_rotation_degrees: Some(90.0),
                ..Style::default()
            }));
            let tb = draw::measure_text(r, name, &name_style);
            let offset = DEFAULT_Y_AXIS_MARGIN + sw + max_text_width + DEFAULT_Y_AXIS_MARGIN;
            let nx = if primary { canvas.right + offset } else { canvas.left - offset };
            let upright = name_style.text_rotation_degrees.unwrap_or_default() == 0.0;
            let ny = if upright {
                canvas.top + ((canvas.height() >> 1) - (tb.width() >> 1))
            } else {
                canvas.top + ((canvas.height() >> 1) - (tb.height() >> 1))
            };
            draw::text(r, name, nx, ny, &name_style);
        }

        if let Some(zero) = self.zero.as_ref().filter(|z| !z.hidden) {
            let line = GridLine { value: 0.0, is_minor: false, style: zero.clone() };
            line.render(r, canvas, range, false, &defaults.axis);
        }
    }
}
