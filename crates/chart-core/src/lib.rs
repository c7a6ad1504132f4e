// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports geometry, ranges, tick generation, styling and the chart pipeline.

pub mod axis;
pub mod calendar;
pub mod chart;
pub mod draw;
pub mod error;
pub mod extent;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod legend;
pub mod market;
pub mod pretty;
pub mod range;
pub mod render;
pub mod series;
pub mod style;
pub mod svg;
pub mod text;
pub mod theme;
pub mod tick;
pub mod types;

pub use axis::{AxisDefaults, TickPosition, TickStrategy, XAxis, YAxis};
pub use calendar::{HolidayProvider, MarketCalendar, NoHolidays, NyseHolidays, SessionIndex};
pub use chart::{Chart, RenderOptions};
pub use error::{ChartError, Result};
pub use format::ValueFormatter;
pub use geometry::{BoxCorners, Point, RectI32};
pub use grid::{generate_grid_lines, GridLine};
pub use legend::Legend;
pub use market::MarketHoursRange;
pub use pretty::generate_pretty_continuous_ticks;
pub use range::{ContinuousRange, LogarithmicRange, Range};
pub use render::{Renderable, Renderer, RendererProvider};
pub use series::{ContinuousSeries, Series, TimeSeries, ValuesProvider, YAxisType};
pub use style::{Style, TextHorizontalAlign, TextVerticalAlign};
pub use svg::{svg_provider, SvgRenderer};
pub use text::{BuiltinFontProvider, Font, FontMetrics, FontProvider};
pub use theme::Theme;
pub use tick::{generate_continuous_ticks, sort_ticks, Tick};
pub use types::{Color, Insets};
