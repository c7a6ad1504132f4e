// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (sizes, colors, paddings, layout spacings).

use std::fmt;

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 400;
/// Default output resolution; text measurement scales with it.
pub const DEFAULT_DPI: f64 = 92.0;

/// Default font size, in points.
pub const DEFAULT_FONT_SIZE: f64 = 10.0;
/// Default axis label font size, in points.
pub const DEFAULT_AXIS_FONT_SIZE: f64 = 10.0;
/// Default chart title font size, in points.
pub const DEFAULT_TITLE_FONT_SIZE: f64 = 18.0;
/// Default legend font size, in points.
pub const DEFAULT_LEGEND_FONT_SIZE: f64 = 8.0;
/// Distance from the top of the chart to the title box.
pub const DEFAULT_TITLE_TOP: i32 = 10;

/// Gap between the canvas bottom and the x-axis tick labels.
pub const DEFAULT_X_AXIS_MARGIN: i32 = 10;
/// Gap between the canvas side and the y-axis tick labels.
pub const DEFAULT_Y_AXIS_MARGIN: i32 = 10;
/// Length of x-axis tick marks.
pub const DEFAULT_VERTICAL_TICK_HEIGHT: i32 = 5;
/// Length of y-axis tick marks.
pub const DEFAULT_HORIZONTAL_TICK_WIDTH: i32 = 5;
/// Minimum horizontal room between two tick labels.
pub const MIN_TICK_HORIZONTAL_SPACING: i32 = 20;
/// Minimum vertical room between two tick labels.
pub const MIN_TICK_VERTICAL_SPACING: i32 = 20;
/// Upper bound on generated tick counts.
pub const TICK_COUNT_SANITY_CHECK: i32 = 1 << 10;

pub const DEFAULT_SERIES_LINE_WIDTH: f64 = 1.0;
pub const DEFAULT_AXIS_LINE_WIDTH: f64 = 1.0;
pub const DEFAULT_BACKGROUND_STROKE_WIDTH: f64 = 0.0;
pub const DEFAULT_CANVAS_STROKE_WIDTH: f64 = 0.0;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Same inset on all four sides.
    pub const fn uniform(v: u32) -> Self {
        Self::new(v, v, v, v)
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::uniform(5)
    }
}

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(51, 51, 51);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl fmt::Display for Color {
    /// CSS `rgba(...)` notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{:.1})", self.r, self.g, self.b, f64::from(self.a) / 255.0)
    }
}
