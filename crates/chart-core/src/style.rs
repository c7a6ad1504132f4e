// File: crates/chart-core/src/style.rs
// Summary: Sparse style records, the inherit-from cascade and their projection onto a renderer.

use crate::render::Renderer;
use crate::text::Font;
use crate::types::{Color, Insets, DEFAULT_FONT_SIZE};

/// Horizontal placement of text inside a box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextHorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical placement of text inside a box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextVerticalAlign {
    #[default]
    Baseline,
    Top,
    Middle,
    Bottom,
}

/// A sparse set of drawing overrides.
///
/// `None` means "inherit"; a set value (including zero) always wins over the fallback.
/// `hidden` belongs to the element itself and never flows through [`Style::inherit_from`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    pub hidden: bool,
    pub padding: Option<Insets>,
    pub class_name: Option<String>,

    pub stroke_color: Option<Color>,
    pub stroke_width: Option<f64>,
    pub stroke_dash_array: Option<Vec<f64>>,

    pub dot_color: Option<Color>,
    pub dot_width: Option<f64>,

    pub fill_color: Option<Color>,

    pub font: Option<Font>,
    pub font_size: Option<f64>,
    pub font_color: Option<Color>,
    pub text_horizontal_align: Option<TextHorizontalAlign>,
    pub text_vertical_align: Option<TextVerticalAlign>,
    pub text_line_spacing: Option<i32>,
    pub text_rotation_degrees: Option<f64>,
}

impl Style {
    /// A style that hides its element.
    pub fn hidden() -> Self {
        Self { hidden: true, ..Self::default() }
    }

    /// A visible style with nothing configured; useful to switch an optional element on.
    pub fn shown() -> Self {
        Self::default()
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke_color = Some(color);
        self.stroke_width = Some(width);
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    pub fn with_dots(mut self, color: Color, width: f64) -> Self {
        self.dot_color = Some(color);
        self.dot_width = Some(width);
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font_color = Some(color);
        self
    }

    pub fn with_text_rotation(mut self, degrees: f64) -> Self {
        self.text_rotation_degrees = Some(degrees);
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = Some(padding);
        self
    }

    /// True if nothing besides (possibly) `hidden` is configured.
    pub fn is_zero(&self) -> bool {
        Style { hidden: false, ..self.clone() } == Style::default()
    }

    /// Field-by-field coalesce: values set on `self` win, the rest come from `fallback`.
    pub fn inherit_from(&self, fallback: &Style) -> Style {
        self.clone().with_defaults_from(fallback)
    }

    /// Consuming form of [`Style::inherit_from`].
    pub fn with_defaults_from(self, fallback: &Style) -> Style {
        Style {
            hidden: self.hidden,
            padding: self.padding.or(fallback.padding),
            class_name: self.class_name.or_else(|| fallback.class_name.clone()),
            stroke_color: self.stroke_color.or(fallback.stroke_color),
            stroke_width: self.stroke_width.or(fallback.stroke_width),
            stroke_dash_array: self.stroke_dash_array.or_else(|| fallback.stroke_dash_array.clone()),
            dot_color: self.dot_color.or(fallback.dot_color),
            dot_width: self.dot_width.or(fallback.dot_width),
            fill_color: self.fill_color.or(fallback.fill_color),
            font: self.font.or_else(|| fallback.font.clone()),
            font_size: self.font_size.or(fallback.font_size),
            font_color: self.font_color.or(fallback.font_color),
            text_horizontal_align: self.text_horizontal_align.or(fallback.text_horizontal_align),
            text_vertical_align: self.text_vertical_align.or(fallback.text_vertical_align),
            text_line_spacing: self.text_line_spacing.or(fallback.text_line_spacing),
            text_rotation_degrees: self.text_rotation_degrees.or(fallback.text_rotation_degrees),
        }
    }

    // ---- projections --------------------------------------------------------

    pub fn stroke_options(&self) -> Style {
        Style {
            class_name: self.class_name.clone(),
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
            stroke_dash_array: self.stroke_dash_array.clone(),
            ..Style::default()
        }
    }

    pub fn fill_options(&self) -> Style {
        Style { class_name: self.class_name.clone(), fill_color: self.fill_color, ..Style::default() }
    }

    pub fn fill_and_stroke_options(&self) -> Style {
        Style { fill_color: self.fill_color, ..self.stroke_options() }
    }

    /// Dots are filled and outlined in the dot color with a hairline stroke.
    pub fn dot_options(&self) -> Style {
        Style {
            class_name: self.class_name.clone(),
            stroke_color: self.dot_color,
            stroke_width: Some(1.0),
            fill_color: self.dot_color,
            ..Style::default()
        }
    }

    pub fn text_options(&self) -> Style {
        Style {
            padding: self.padding,
            class_name: self.class_name.clone(),
            font: self.font.clone(),
            font_size: self.font_size,
            font_color: self.font_color,
            text_horizontal_align: self.text_horizontal_align,
            text_vertical_align: self.text_vertical_align,
            text_line_spacing: self.text_line_spacing,
            text_rotation_degrees: self.text_rotation_degrees,
            ..Style::default()
        }
    }

    // ---- predicates ---------------------------------------------------------

    pub fn should_draw_stroke(&self) -> bool {
        visible(self.stroke_color) && self.stroke_width.is_some_and(|w| w > 0.0)
    }

    pub fn should_draw_fill(&self) -> bool {
        visible(self.fill_color)
    }

    pub fn should_draw_dot(&self) -> bool {
        visible(self.dot_color) && self.dot_width.is_some_and(|w| w > 0.0)
    }

    // ---- renderer state -----------------------------------------------------

    /// Pushes every drawing and text setting; unset values reset the renderer state.
    pub fn write_to_renderer(&self, r: &mut dyn Renderer) {
        self.write_drawing_options_to_renderer(r);
        self.write_text_options_to_renderer(r);
    }

    pub fn write_drawing_options_to_renderer(&self, r: &mut dyn Renderer) {
        r.set_class_name(self.class_name.as_deref().unwrap_or_default());
        r.set_stroke_color(self.stroke_color.unwrap_or(Color::TRANSPARENT));
        r.set_stroke_width(self.stroke_width.unwrap_or(0.0));
        r.set_stroke_dash_array(self.stroke_dash_array.as_deref().unwrap_or_default());
        r.set_fill_color(self.fill_color.unwrap_or(Color::TRANSPARENT));
    }

    /// Text settings; an unset font leaves the renderer's current font in place.
    pub fn write_text_options_to_renderer(&self, r: &mut dyn Renderer) {
        r.set_class_name(self.class_name.as_deref().unwrap_or_default());
        if let Some(font) = &self.font {
            r.set_font(font);
        }
        r.set_font_color(self.font_color.unwrap_or(Color::TRANSPARENT));
        r.set_font_size(self.font_size.unwrap_or(DEFAULT_FONT_SIZE));
        r.clear_text_rotation();
        if let Some(deg) = self.text_rotation_degrees.filter(|d| *d != 0.0) {
            r.set_text_rotation(deg);
        }
    }
}

fn visible(c: Option<Color>) -> bool {
    c.is_some_and(|c| !c.is_transparent())
}
