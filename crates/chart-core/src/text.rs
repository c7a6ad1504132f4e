// File: crates/chart-core/src/text.rs
// Summary: Font handles, metric-based text measurement and the injectable default-font provider.

use std::sync::{Arc, OnceLock};

use crate::error::Result;

/// Per-font glyph metrics, expressed in em units.
///
/// Widths come from a coarse glyph-class table so layout stays deterministic without
/// parsing font files.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    /// Multiplier applied to every advance in the glyph-class table.
    pub width_scale: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self { width_scale: 1.0, ascent: 0.8, descent: 0.2 }
    }
}

impl FontMetrics {
    /// Advance of a single glyph in em.
    pub fn advance(&self, c: char) -> f64 {
        let em = match c {
            '0'..='9' => 0.556,
            ' ' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' | 'i' | 'j' | 'l' => 0.278,
            '-' | '(' | ')' | 'f' | 't' | 'r' => 0.333,
            'm' | 'w' | 'M' | 'W' | '%' | '@' => 0.833,
            'A'..='Z' => 0.667,
            _ => 0.556,
        };
        em * self.width_scale
    }

    /// Advance width of a single line of `text` at `size_px`.
    pub fn line_width(&self, text: &str, size_px: f64) -> f64 {
        text.chars().map(|c| self.advance(c)).sum::<f64>() * size_px
    }
}

/// A cheap, shareable font handle: a family name plus the metrics used to measure it.
///
/// Backends that can resolve real typefaces (e.g. skia) look the family up themselves and
/// may measure differently; layout only ever consumes the measured boxes.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    family: Arc<str>,
    metrics: FontMetrics,
}

impl Font {
    pub fn new(family: impl Into<Arc<str>>, metrics: FontMetrics) -> Self {
        Self { family: family.into(), metrics }
    }

    /// The library default face.
    pub fn builtin() -> Self {
        Self::new("Roboto", FontMetrics::default())
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }
}

/// Supplies the font used when neither the chart nor an element style configures one.
pub trait FontProvider: Send + Sync {
    fn default_font(&self) -> Result<Font>;
}

/// Lazily builds the builtin face once and hands out clones afterwards.
///
/// One instance can be shared (behind an `Arc`) by any number of concurrent renders.
#[derive(Debug, Default)]
pub struct BuiltinFontProvider {
    font: OnceLock<Font>,
}

impl BuiltinFontProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FontProvider for BuiltinFontProvider {
    fn default_font(&self) -> Result<Font> {
        Ok(self.font.get_or_init(Font::builtin).clone())
    }
}

/// A fixed font is its own provider.
impl FontProvider for Font {
    fn default_font(&self) -> Result<Font> {
        Ok(self.clone())
    }
}
