// File: crates/chart-core/src/series.rs
// Summary: Series contracts (values provider, drawable series) and the XY / time-indexed line series.

use chrono::{DateTime, Utc};

use crate::draw;
use crate::error::{ChartError, Result};
use crate::format::{float_value_formatter, time_value_formatter, ValueFormatter};
use crate::geometry::RectI32;
use crate::range::Range;
use crate::render::Renderer;
use crate::style::Style;

/// Indexed access to (x, y) pairs.
pub trait ValuesProvider {
    fn len(&self) -> usize;
    fn value(&self, index: usize) -> (f64, f64);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which Y axis a series is plotted against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum YAxisType {
    /// Drawn on the right edge of the canvas.
    #[default]
    Primary,
    /// Drawn on the left edge of the canvas.
    Secondary,
}

/// A drawable data series.
pub trait Series: ValuesProvider {
    fn name(&self) -> &str;
    fn style(&self) -> &Style;

    fn y_axis(&self) -> YAxisType {
        YAxisType::Primary
    }

    /// Preferred (x, y) label formatters for axes that have none configured.
    fn value_formatters(&self) -> Option<(ValueFormatter, ValueFormatter)> {
        None
    }

    fn validate(&self) -> Result<()>;

    fn render(&self, r: &mut dyn Renderer, canvas: RectI32, x_range: &dyn Range, y_range: &dyn Range, defaults: &Style);
}

fn validate_lengths(name: &str, xs: usize, ys: usize) -> Result<()> {
    if xs == 0 || ys == 0 {
        return Err(ChartError::EmptySeries { name: name.to_owned() });
    }
    if xs != ys {
        return Err(ChartError::InvalidSeries {
            name: name.to_owned(),
            reason: format!("{xs} x values but {ys} y values"),
        });
    }
    Ok(())
}

/// Line series over parallel x/y vectors.
#[derive(Clone, Default)]
pub struct ContinuousSeries {
    pub name: String,
    pub style: Style,
    pub y_axis: YAxisType,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
}

impl ContinuousSeries {
    pub fn new(name: impl Into<String>, x_values: Vec<f64>, y_values: Vec<f64>) -> Self {
        Self { name: name.into(), x_values, y_values, ..Self::default() }
    }

    /// Uses `0..n` as x values.
    pub fn from_values(name: impl Into<String>, y_values: Vec<f64>) -> Self {
        let x_values = (0..y_values.len()).map(|i| i as f64).collect();
        Self::new(name, x_values, y_values)
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn on_secondary_axis(mut self) -> Self {
        self.y_axis = YAxisType::Secondary;
        self
    }
}

impl ValuesProvider for ContinuousSeries {
    fn len(&self) -> usize {
        self.x_values.len().min(self.y_values.len())
    }

    fn value(&self, index: usize) -> (f64, f64) {
        (self.x_values[index], self.y_values[index])
    }
}

impl Series for ContinuousSeries {
    fn name(&self) -> &str { &self.name }
    fn style(&self) -> &Style { &self.style }
    fn y_axis(&self) -> YAxisType { self.y_axis }

    fn validate(&self) -> Result<()> {
        validate_lengths(&self.name, self.x_values.len(), self.y_values.len())
    }

    fn render(&self, r: &mut dyn Renderer, canvas: RectI32, x_range: &dyn Range, y_range: &dyn Range, defaults: &Style) {
        let style = self.style.inherit_from(defaults);
        draw::line_series(r, canvas, x_range, y_range, &style, self);
    }
}

/// Line series indexed by timestamps; x values are unix seconds.
#[derive(Clone, Default)]
pub struct TimeSeries {
    pub name: String,
    pub style: Style,
    pub y_axis: YAxisType,
    pub x_values: Vec<DateTime<Utc>>,
    pub y_values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, x_values: Vec<DateTime<Utc>>, y_values: Vec<f64>) -> Self {
        Self { name: name.into(), x_values, y_values, ..Self::default() }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn on_secondary_axis(mut self) -> Self {
        self.y_axis = YAxisType::Secondary;
        self
    }
}

/// Unix seconds, sub-second precision kept.
pub fn time_to_float(t: &DateTime<Utc>) -> f64 {
    t.timestamp() as f64 + f64::from(t.timestamp_subsec_nanos()) / 1e9
}

impl ValuesProvider for TimeSeries {
    fn len(&self) -> usize {
        self.x_values.len().min(self.y_values.len())
    }

    fn value(&self, index: usize) -> (f64, f64) {
        (time_to_float(&self.x_values[index]), self.y_values[index])
    }
}

impl Series for TimeSeries {
    fn name(&self) -> &str { &self.name }
    fn style(&self) -> &Style { &self.style }
    fn y_axis(&self) -> YAxisType { self.y_axis }

    fn value_formatters(&self) -> Option<(ValueFormatter, ValueFormatter)> {
        Some((time_value_formatter(), float_value_formatter()))
    }

    fn validate(&self) -> Result<()> {
        validate_lengths(&self.name, self.x_values.len(), self.y_values.len())
    }

    fn render(&self, r: &mut dyn Renderer, canvas: RectI32, x_range: &dyn Range, y_range: &dyn Range, defaults: &Style) {
        let style = self.style.inherit_from(defaults);
        draw::line_series(r, canvas, x_range, y_range, &style, self);
    }
}
