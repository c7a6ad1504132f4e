// File: crates/chart-core/src/chart.rs
// Summary: Chart model, render options and the measure-then-fit render pipeline.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::axis::{AxisDefaults, XAxis, YAxis};
use crate::draw;
use crate::error::{ChartError, Result};
use crate::extent::{DataExtents, Extent};
use crate::format::{float_value_formatter, ValueFormatter};
use crate::geometry::RectI32;
use crate::legend::{Legend, LegendEntry};
use crate::range::{ContinuousRange, Range};
use crate::render::{Renderable, Renderer, RendererProvider};
use crate::series::{Series, YAxisType};
use crate::style::Style;
use crate::svg::svg_provider;
use crate::text::{BuiltinFontProvider, Font, FontProvider};
use crate::theme::Theme;
use crate::tick::{round_down, round_to_for_delta, round_up, sort_ticks, tick_extent, Tick};
use crate::types::{
    Insets, DEFAULT_AXIS_FONT_SIZE, DEFAULT_AXIS_LINE_WIDTH, DEFAULT_BACKGROUND_STROKE_WIDTH,
    DEFAULT_CANVAS_STROKE_WIDTH, DEFAULT_DPI, DEFAULT_FONT_SIZE, DEFAULT_LEGEND_FONT_SIZE,
    DEFAULT_SERIES_LINE_WIDTH, DEFAULT_TITLE_FONT_SIZE, DEFAULT_TITLE_TOP, HEIGHT, WIDTH,
};

/// Output surface settings and library-level defaults for one render.
#[derive(Clone)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub dpi: f64,
    pub theme: Theme,
    /// Supplies the font when the chart configures none.
    pub fonts: Arc<dyn FontProvider>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            dpi: DEFAULT_DPI,
            theme: Theme::light(),
            fonts: Arc::new(BuiltinFontProvider::new()),
        }
    }
}

impl RenderOptions {
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_fonts(mut self, fonts: Arc<dyn FontProvider>) -> Self {
        self.fonts = fonts;
        self
    }
}

/// A cartesian chart: series plus axis, title, legend and decoration configuration.
///
/// Rendering never mutates the chart; ranges and ticks live only for the duration of
/// one [`Chart::render`] call.
pub struct Chart {
    pub title: Option<String>,
    pub title_style: Style,
    /// Padding here insets the canvas from the chart edges.
    pub background: Style,
    pub canvas: Style,
    pub font: Option<Font>,
    pub x_axis: XAxis,
    pub y_axis: YAxis,
    pub y_axis_secondary: YAxis,
    pub series: Vec<Box<dyn Series>>,
    pub legend: Option<Legend>,
    pub elements: Vec<Box<dyn Renderable>>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

struct Ranges {
    x: Box<dyn Range>,
    y: Box<dyn Range>,
    y2: Box<dyn Range>,
}

struct Formatters {
    x: ValueFormatter,
    y: ValueFormatter,
    y2: ValueFormatter,
}

#[derive(Default)]
struct AxesTicks {
    x: Vec<Tick>,
    y: Vec<Tick>,
    y2: Vec<Tick>,
}

/// Theme- and font-derived fallbacks for every element, resolved once per render.
struct Defaults {
    theme: Theme,
    font: Font,
    background: Style,
    canvas: Style,
    axes: AxisDefaults,
    title: Style,
    legend: Style,
    elements: Style,
}

impl Defaults {
    fn new(theme: Theme, font: Font) -> Self {
        let with_font = Style { font: Some(font.clone()), ..Style::default() };
        Self {
            background: Style::default()
                .with_fill(theme.background)
                .with_stroke(theme.background_stroke, DEFAULT_BACKGROUND_STROKE_WIDTH),
            canvas: Style::default()
                .with_fill(theme.canvas)
                .with_stroke(theme.canvas_stroke, DEFAULT_CANVAS_STROKE_WIDTH),
            axes: AxisDefaults {
                axis: with_font
                    .clone()
                    .with_font_color(theme.axis)
                    .with_font_size(DEFAULT_AXIS_FONT_SIZE)
                    .with_stroke(theme.axis, DEFAULT_AXIS_LINE_WIDTH),
                grid_major: Style::default().with_stroke(theme.grid_major, 1.0),
                grid_minor: Style::default().with_stroke(theme.grid_minor, 1.0),
            },
            title: with_font.clone().with_font_color(theme.text).with_font_size(DEFAULT_TITLE_FONT_SIZE),
            legend: with_font
                .clone()
                .with_fill(theme.legend_fill)
                .with_font_color(theme.text)
                .with_font_size(DEFAULT_LEGEND_FONT_SIZE)
                .with_stroke(theme.axis, DEFAULT_AXIS_LINE_WIDTH),
            elements: with_font,
            theme,
            font,
        }
    }

    fn series(&self, index: usize) -> Style {
        Style {
            font: Some(self.font.clone()),
            font_size: Some(DEFAULT_FONT_SIZE),
            ..Style::default()
        }
        .with_stroke(self.theme.series_color(index), DEFAULT_SERIES_LINE_WIDTH)
    }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            title: None,
            title_style: Style::default(),
            background: Style::default(),
            canvas: Style::default(),
            font: None,
            x_axis: XAxis::default(),
            y_axis: YAxis::default(),
            y_axis_secondary: YAxis::secondary(),
            series: Vec::new(),
            legend: None,
            elements: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn add_series(&mut self, series: impl Series + 'static) {
        self.series.push(Box::new(series));
    }

    pub fn add_element(&mut self, element: impl Renderable + 'static) {
        self.elements.push(Box::new(element));
    }

    fn visible_series(&self) -> impl Iterator<Item = (usize, &(dyn Series + 'static))> + '_ {
        self.series.iter().map(|s| &**s).enumerate().filter(|(_, s)| !s.style().hidden)
    }

    fn has_secondary_series(&self) -> bool {
        self.visible_series().any(|(_, s)| s.y_axis() == YAxisType::Secondary)
    }

    fn show_secondary_axis(&self) -> bool {
        !self.y_axis_secondary.is_hidden() && self.has_secondary_series()
    }

    fn has_axes(&self) -> bool {
        !self.x_axis.is_hidden() || !self.y_axis.is_hidden() || self.show_secondary_axis()
    }

    fn validate(&self) -> Result<()> {
        if self.series.is_empty() {
            return Err(ChartError::NoSeries);
        }
        let mut visible = self.visible_series().peekable();
        if visible.peek().is_none() {
            return Err(ChartError::NoVisibleSeries);
        }
        visible.try_for_each(|(_, s)| s.validate())
    }

    /// The chart surface inset by the background padding.
    fn padded_box(&self, opts: &RenderOptions) -> RectI32 {
        let p = self.background.padding.unwrap_or_default();
        let pad = |v: u32| v as i32;
        RectI32 {
            top: pad(p.top),
            left: pad(p.left),
            right: opts.width - pad(p.right),
            bottom: opts.height - pad(p.bottom),
        }
    }

    /// Renders through `provider` and writes the encoded output to `w`.
    ///
    /// Nothing is written unless every stage succeeds.
    pub fn render(&self, provider: RendererProvider, opts: &RenderOptions, w: &mut dyn Write) -> Result<()> {
        self.validate()?;
        let font = match &self.font {
            Some(f) => f.clone(),
            None => opts.fonts.default_font()?,
        };
        let mut r = provider(opts.width, opts.height)?;
        r.set_dpi(opts.dpi);
        r.set_font(&font);
        let defaults = Defaults::new(opts.theme, font);
        tracing::debug!(width = opts.width, height = opts.height, dpi = opts.dpi, series = self.series.len(), "render: init");

        let mut ranges = self.ranges();
        let bounds = self.padded_box(opts);
        let mut canvas = bounds;
        set_domains(canvas, &mut ranges);
        self.check_ranges(&ranges)?;
        tracing::debug!(%canvas, x = ?(ranges.x.min(), ranges.x.max()), y = ?(ranges.y.min(), ranges.y.max()), "render: ranges computed");

        let formatters = self.formatters();
        let mut ticks = AxesTicks::default();
        if self.has_axes() {
            for pass in 1..=2 {
                ticks = self.axes_ticks(r.as_mut(), &ranges, &formatters, &defaults);
                tracing::debug!(pass, x = ticks.x.len(), y = ticks.y.len(), y2 = ticks.y2.len(), "render: ticks generated");
                canvas = self.adjusted_canvas(r.as_mut(), canvas, bounds, &ranges, &ticks, &defaults);
                set_domains(canvas, &mut ranges);
                tracing::debug!(pass, %canvas, "render: canvas adjusted");
            }
            ticks = self.axes_ticks(r.as_mut(), &ranges, &formatters, &defaults);
        }

        let surface = RectI32::from_ltwh(0, 0, opts.width, opts.height);
        draw::boxed(r.as_mut(), surface, &self.background.inherit_from(&defaults.background));
        draw::boxed(r.as_mut(), canvas, &self.canvas.inherit_from(&defaults.canvas));
        self.draw_series(r.as_mut(), canvas, &ranges, &defaults);
        self.draw_axes(r.as_mut(), canvas, &ranges, &ticks, &defaults);
        self.draw_title(r.as_mut(), opts, &defaults);
        self.draw_legend(r.as_mut(), canvas, &defaults);
        for e in &self.elements {
            e.render(r.as_mut(), canvas, &defaults.elements);
        }
        tracing::debug!(%canvas, "render: drawn");

        r.save(w)
    }

    /// Renders with the SVG backend into a byte buffer.
    pub fn render_svg(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.render(svg_provider, opts, &mut buf)?;
        Ok(buf)
    }

    /// Renders to `path`, creating parent directories; the file is only touched on success.
    pub fn render_to_file(&self, provider: RendererProvider, opts: &RenderOptions, path: impl AsRef<Path>) -> Result<()> {
        let mut buf = Vec::new();
        self.render(provider, opts, &mut buf)?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, buf)?;
        Ok(())
    }

    // ---- ranges ------------------------------------------------------------

    fn ranges(&self) -> Ranges {
        let extents = DataExtents::scan(self.visible_series().map(|(_, s)| s));
        Ranges {
            x: resolve_range(self.x_axis.range.as_deref(), self.x_axis.ticks.as_deref(), extents.x, false),
            y: resolve_range(
                self.y_axis.range.as_deref(),
                self.y_axis.ticks.as_deref(),
                extents.y,
                !self.y_axis.is_hidden(),
            ),
            y2: resolve_range(
                self.y_axis_secondary.range.as_deref(),
                self.y_axis_secondary.ticks.as_deref(),
                extents.y_secondary,
                !self.y_axis_secondary.is_hidden(),
            ),
        }
    }

    fn check_ranges(&self, ranges: &Ranges) -> Result<()> {
        check_range("x", &*ranges.x)?;
        check_range("y", &*ranges.y)?;
        if self.has_secondary_series() {
            check_range("secondary y", &*ranges.y2)?;
        }
        Ok(())
    }

    /// Series-provided formatters, overridden by axis formatters; floats otherwise.
    fn formatters(&self) -> Formatters {
        let (mut x, mut y, mut y2) = (None, None, None);
        for (_, s) in self.visible_series() {
            if let Some((sx, sy)) = s.value_formatters() {
                x = Some(sx);
                match s.y_axis() {
                    YAxisType::Primary => y = Some(sy),
                    YAxisType::Secondary => y2 = Some(sy),
                }
            }
        }
        Formatters {
            x: self.x_axis.value_formatter.clone().or(x).unwrap_or_else(float_value_formatter),
            y: self.y_axis.value_formatter.clone().or(y).unwrap_or_else(float_value_formatter),
            y2: self.y_axis_secondary.value_formatter.clone().or(y2).unwrap_or_else(float_value_formatter),
        }
    }

    // ---- ticks & canvas fitting ----------------------------------------------

    fn axes_ticks(&self, r: &mut dyn Renderer, ranges: &Ranges, f: &Formatters, defaults: &Defaults) -> AxesTicks {
        let axis = &defaults.axes.axis;
        let mut ticks = AxesTicks::default();
        if !self.x_axis.is_hidden() {
            ticks.x = self.x_axis.get_ticks(r, &*ranges.x, axis, &f.x);
        }
        if !self.y_axis.is_hidden() {
            ticks.y = self.y_axis.get_ticks(r, &*ranges.y, axis, &f.y);
        }
        if self.show_secondary_axis() {
            ticks.y2 = self.y_axis_secondary.get_ticks(r, &*ranges.y2, axis, &f.y2);
        }
        sort_ticks(&mut ticks.x);
        sort_ticks(&mut ticks.y);
        sort_ticks(&mut ticks.y2);
        ticks
    }

    fn adjusted_canvas(
        &self,
        r: &mut dyn Renderer,
        canvas: RectI32,
        bounds: RectI32,
        ranges: &Ranges,
        ticks: &AxesTicks,
        defaults: &Defaults,
    ) -> RectI32 {
        let axis = &defaults.axes.axis;
        let mut outer = canvas;
        if !self.x_axis.is_hidden() {
            let m = self.x_axis.measure(r, canvas, &*ranges.x, axis, &ticks.x);
            tracing::debug!(axis = "x", bounds = %m, "render: axis measured");
            outer = outer.grow(m);
        }
        if !self.y_axis.is_hidden() {
            let m = self.y_axis.measure(r, canvas, &*ranges.y, axis, &ticks.y);
            tracing::debug!(axis = "y", bounds = %m, "render: axis measured");
            outer = outer.grow(m);
        }
        if self.show_secondary_axis() {
            let m = self.y_axis_secondary.measure(r, canvas, &*ranges.y2, axis, &ticks.y2);
            tracing::debug!(axis = "secondary y", bounds = %m, "render: axis measured");
            outer = outer.grow(m);
        }
        canvas.outer_constrain(bounds, outer)
    }

    // ---- drawing -------------------------------------------------------------

    fn draw_series(&self, r: &mut dyn Renderer, canvas: RectI32, ranges: &Ranges, defaults: &Defaults) {
        for (index, s) in self.visible_series() {
            let y_range = match s.y_axis() {
                YAxisType::Primary => &*ranges.y,
                YAxisType::Secondary => &*ranges.y2,
            };
            s.render(r, canvas, &*ranges.x, y_range, &defaults.series(index));
        }
    }

    fn draw_axes(&self, r: &mut dyn Renderer, canvas: RectI32, ranges: &Ranges, ticks: &AxesTicks, defaults: &Defaults) {
        if !self.x_axis.is_hidden() {
            self.x_axis.render(r, canvas, &*ranges.x, &defaults.axes, &ticks.x);
        }
        if !self.y_axis.is_hidden() {
            self.y_axis.render(r, canvas, &*ranges.y, &defaults.axes, &ticks.y);
        }
        if self.show_secondary_axis() {
            self.y_axis_secondary.render(r, canvas, &*ranges.y2, &defaults.axes, &ticks.y2);
        }
    }

    fn draw_title(&self, r: &mut dyn Renderer, opts: &RenderOptions, defaults: &Defaults) {
        let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) else {
            return;
        };
        if self.title_style.hidden {
            return;
        }
        let style = self.title_style.inherit_from(&defaults.title);
        let tb = draw::measure_text(r, title, &style);
        let top = style.padding.map_or(DEFAULT_TITLE_TOP, |p: Insets| p.top as i32);
        let x = (opts.width >> 1) - (tb.width() >> 1);
        draw::text(r, title, x, top + tb.height(), &style);
    }

    fn draw_legend(&self, r: &mut dyn Renderer, canvas: RectI32, defaults: &Defaults) {
        let Some(legend) = &self.legend else {
            return;
        };
        if legend.style.hidden {
            return;
        }
        let entries: Vec<LegendEntry> = self
            .visible_series()
            .map(|(index, s)| LegendEntry {
                label: s.name().to_owned(),
                style: s.style().inherit_from(&defaults.series(index)),
            })
            .collect();
        legend.render(r, canvas, &entries, &defaults.legend);
    }
}

fn set_domains(canvas: RectI32, ranges: &mut Ranges) {
    ranges.x.set_domain(canvas.width());
    ranges.y.set_domain(canvas.height());
    ranges.y2.set_domain(canvas.height());
}

/// Precedence: explicit ticks, then a configured non-zero range, then the data extent.
fn resolve_range(explicit: Option<&dyn Range>, ticks: Option<&[Tick]>, extent: Extent, round: bool) -> Box<dyn Range> {
    let mut range: Box<dyn Range> = match explicit {
        Some(r) => r.clone_box(),
        None => Box::new(ContinuousRange::default()),
    };
    if let Some((lo, hi)) = ticks.and_then(tick_extent) {
        range.set_min(lo);
        range.set_max(hi);
    } else if range.is_zero() {
        range.set_min(extent.min);
        range.set_max(extent.max);
        if round && explicit.is_none() && extent.is_set() {
            let to = round_to_for_delta(range.delta());
            let (lo, hi) = (round_down(range.min(), to), round_up(range.max(), to));
            range.set_min(lo);
            range.set_max(hi);
        }
    }
    range
}

fn check_range(axis: &'static str, range: &dyn Range) -> Result<()> {
    let delta = range.delta();
    let reason = if delta.is_infinite() {
        "infinite delta"
    } else if delta.is_nan() {
        "delta is NaN"
    } else if delta == 0.0 {
        "zero delta; at least two distinct values are required"
    } else {
        return Ok(());
    };
    Err(ChartError::InvalidRange { axis, reason })
}
