// File: crates/chart-core/src/range.rs
// Summary: Value-to-pixel mappings (linear and log10) behind the object-safe Range trait.

use std::fmt;

use crate::format::ValueFormatter;
use crate::render::Renderer;
use crate::style::Style;
use crate::tick::Tick;

/// Maps data values in `[min, max]` onto integer pixel offsets in `[0, domain]`.
///
/// Contract: `translate(min) == 0` and `translate(max) == domain` (swapped when
/// descending) whenever `delta != 0`.
pub trait Range: fmt::Debug + Send + Sync {
    fn min(&self) -> f64;
    fn set_min(&mut self, min: f64);
    fn max(&self) -> f64;
    fn set_max(&mut self, max: f64);

    fn delta(&self) -> f64 {
        self.max() - self.min()
    }

    fn domain(&self) -> i32;
    fn set_domain(&mut self, domain: i32);

    fn is_descending(&self) -> bool;

    /// True when nothing has been configured yet.
    fn is_zero(&self) -> bool;

    fn translate(&self, value: f64) -> i32;

    /// Ranges that pick their own tick positions return `Some`; the axis strategy is
    /// used otherwise.
    fn ticks(&self, _r: &mut dyn Renderer, _defaults: &Style, _vf: &ValueFormatter) -> Option<Vec<Tick>> {
        None
    }

    fn clone_box(&self) -> Box<dyn Range>;
}

impl Clone for Box<dyn Range> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

fn zero_or_nan(v: f64) -> bool {
    v == 0.0 || v.is_nan()
}

/// Linear mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContinuousRange {
    pub min: f64,
    pub max: f64,
    pub domain: i32,
    pub descending: bool,
}

impl ContinuousRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max, ..Self::default() }
    }

    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    pub fn with_domain(mut self, domain: i32) -> Self {
        self.domain = domain;
        self
    }
}

impl Range for ContinuousRange {
    fn min(&self) -> f64 { self.min }
    fn set_min(&mut self, min: f64) { self.min = min; }
    fn max(&self) -> f64 { self.max }
    fn set_max(&mut self, max: f64) { self.max = max; }
    fn domain(&self) -> i32 { self.domain }
    fn set_domain(&mut self, domain: i32) { self.domain = domain; }
    fn is_descending(&self) -> bool { self.descending }

    fn is_zero(&self) -> bool {
        zero_or_nan(self.min) && zero_or_nan(self.max) && self.domain == 0
    }

    fn translate(&self, value: f64) -> i32 {
        let delta = self.delta();
        if delta == 0.0 {
            return 0;
        }
        let px = ((value - self.min) / delta * f64::from(self.domain)).ceil() as i32;
        if self.descending { self.domain - px } else { px }
    }

    fn clone_box(&self) -> Box<dyn Range> {
        Box::new(*self)
    }
}

impl fmt::Display for ContinuousRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContinuousRange [{:.2},{:.2}] => {}", self.min, self.max, self.domain)
    }
}

/// Log10 mapping of the offset from `min`; values below 1 pin to the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LogarithmicRange {
    pub min: f64,
    pub max: f64,
    pub domain: i32,
    pub descending: bool,
}

impl LogarithmicRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max, ..Self::default() }
    }

    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    pub fn with_domain(mut self, domain: i32) -> Self {
        self.domain = domain;
        self
    }

    /// Exponents of the powers of ten bracketing `[min, max]`, floored at zero.
    fn exponents(&self) -> std::ops::RangeInclusive<i32> {
        let lo = self.min.log10().floor().max(0.0);
        let hi = self.max.log10().ceil().max(0.0);
        if !lo.is_finite() || !hi.is_finite() {
            return 0..=0;
        }
        (lo as i32)..=(hi as i32)
    }
}

impl Range for LogarithmicRange {
    fn min(&self) -> f64 { self.min }
    fn set_min(&mut self, min: f64) { self.min = min; }
    fn max(&self) -> f64 { self.max }
    fn set_max(&mut self, max: f64) { self.max = max; }
    fn domain(&self) -> i32 { self.domain }
    fn set_domain(&mut self, domain: i32) { self.domain = domain; }
    fn is_descending(&self) -> bool { self.descending }

    fn is_zero(&self) -> bool {
        zero_or_nan(self.min) && zero_or_nan(self.max) && self.domain == 0
    }

    fn translate(&self, value: f64) -> i32 {
        let span = self.delta().max(1.0).log10();
        let px = if value < 1.0 || span == 0.0 || !span.is_finite() {
            0
        } else {
            let ratio = (value - self.min).max(1.0).log10() / span;
            (ratio * f64::from(self.domain)).ceil() as i32
        };
        if self.descending { self.domain - px } else { px }
    }

    /// One tick per power of ten.
    fn ticks(&self, _r: &mut dyn Renderer, _defaults: &Style, vf: &ValueFormatter) -> Option<Vec<Tick>> {
        let ticks = self
            .exponents()
            .map(|e| {
                let v = 10f64.powi(e);
                Tick::new(v, vf(v))
            })
            .collect();
        Some(ticks)
    }

    fn clone_box(&self) -> Box<dyn Range> {
        Box::new(*self)
    }
}

impl fmt::Display for LogarithmicRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogarithmicRange [{:.2},{:.2}] => {}", self.min, self.max, self.domain)
    }
}
