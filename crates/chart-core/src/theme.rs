// File: crates/chart-core/src/theme.rs
// Summary: Library default colors (background, canvas, axes, grid, series palette) with presets.

use crate::types::Color;

const LIGHT_SERIES: &[Color] = &[
    Color::rgb(0, 116, 217),
    Color::rgb(0, 217, 101),
    Color::rgb(217, 0, 116),
    Color::rgb(0, 217, 210),
    Color::rgb(217, 101, 0),
    Color::rgb(217, 210, 0),
    Color::rgb(51, 51, 51),
];

const DARK_SERIES: &[Color] = &[
    Color::rgb(64, 160, 255),
    Color::rgb(40, 200, 120),
    Color::rgb(220, 80, 80),
    Color::rgb(255, 230, 70),
    Color::rgb(96, 156, 255),
    Color::rgb(235, 235, 245),
];

const SOLARIZED_SERIES: &[Color] = &[
    Color::rgb(0x26, 0x8b, 0xd2), // blue
    Color::rgb(0x2a, 0xa1, 0x98), // cyan
    Color::rgb(0xdc, 0x32, 0x2f), // red
    Color::rgb(0xb5, 0x89, 0x00), // yellow
    Color::rgb(0xcb, 0x4b, 0x16), // orange
    Color::rgb(0x6c, 0x71, 0xc4), // violet
];

/// The bottom layer of the style cascade: colors used when neither the element nor the
/// chart configures one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub background_stroke: Color,
    pub canvas: Color,
    pub canvas_stroke: Color,
    pub text: Color,
    pub axis: Color,
    pub grid_major: Color,
    pub grid_minor: Color,
    pub legend_fill: Color,
    pub series: &'static [Color],
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::WHITE,
            background_stroke: Color::WHITE,
            canvas: Color::WHITE,
            canvas_stroke: Color::WHITE,
            text: Color::rgb(51, 51, 51),
            axis: Color::rgb(51, 51, 51),
            grid_major: Color::rgb(192, 192, 192),
            grid_minor: Color::rgb(239, 239, 239),
            legend_fill: Color::WHITE,
            series: LIGHT_SERIES,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            background_stroke: Color::rgb(18, 18, 20),
            canvas: Color::rgb(18, 18, 20),
            canvas_stroke: Color::rgb(18, 18, 20),
            text: Color::rgb(235, 235, 245),
            axis: Color::rgb(180, 180, 190),
            grid_major: Color::rgb(60, 60, 66),
            grid_minor: Color::rgb(40, 40, 45),
            legend_fill: Color::rgb(28, 28, 32),
            series: DARK_SERIES,
        }
    }

    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark",
            background: Color::rgb(0x00, 0x2b, 0x36),        // base03
            background_stroke: Color::rgb(0x00, 0x2b, 0x36),
            canvas: Color::rgb(0x00, 0x2b, 0x36),
            canvas_stroke: Color::rgb(0x07, 0x36, 0x42),     // base02
            text: Color::rgb(0xee, 0xe8, 0xd5),              // base2
            axis: Color::rgb(0x93, 0xa1, 0xa1),              // base1
            grid_major: Color::rgb(0x58, 0x6e, 0x75),        // base01
            grid_minor: Color::rgb(0x07, 0x36, 0x42),
            legend_fill: Color::rgb(0x07, 0x36, 0x42),
            series: SOLARIZED_SERIES,
        }
    }

    /// Series color for `index`, cycling through the palette.
    pub fn series_color(&self, index: usize) -> Color {
        if self.series.is_empty() {
            return self.axis;
        }
        self.series[index % self.series.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::solarized_dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
