// File: crates/chart-core/src/extent.rs
// Summary: Single-pass data extents over all visible series, split by Y axis.

use crate::series::{Series, YAxisType};

/// Running min/max; starts empty (min = +inf, max = -inf).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Self { min: f64::INFINITY, max: f64::NEG_INFINITY }
    }
}

impl Extent {
    pub fn include(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    /// True once at least one finite value has been seen.
    pub fn is_set(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// Extents of the X values and of each Y axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DataExtents {
    pub x: Extent,
    pub y: Extent,
    pub y_secondary: Extent,
}

impl DataExtents {
    /// Scans every visible series once, reading values in index order.
    pub fn scan<'a, S>(series: impl IntoIterator<Item = &'a S>) -> Self
    where
        S: Series + ?Sized + 'a,
    {
        let mut out = Self::default();
        for s in series {
            if s.style().hidden {
                continue;
            }
            let y = match s.y_axis() {
                YAxisType::Primary => &mut out.y,
                YAxisType::Secondary => &mut out.y_secondary,
            };
            for i in 0..s.len() {
                let (vx, vy) = s.value(i);
                out.x.include(vx);
                y.include(vy);
            }
        }
        out
    }
}
