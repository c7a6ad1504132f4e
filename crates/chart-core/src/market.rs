// File: crates/chart-core/src/market.rs
// Summary: Time range that only counts exchange trading hours, with first-fit tick candidates.

use std::fmt;
use std::sync::OnceLock;

use crate::calendar::{MarketCalendar, SessionIndex};
use crate::format::ValueFormatter;
use crate::range::Range;
use crate::render::Renderer;
use crate::style::Style;
use crate::tick::{generate_continuous_ticks, Tick};
use crate::types::MIN_TICK_HORIZONTAL_SPACING;

/// A horizontal time axis (unix seconds) that skips nights, weekends and holidays.
///
/// Positions are proportional to elapsed session time, so an overnight gap occupies
/// no pixels. The sessions of `[min, max]` are indexed on first use and dropped
/// whenever an endpoint changes.
#[derive(Clone, Debug, Default)]
pub struct MarketHoursRange {
    min: f64,
    max: f64,
    domain: i32,
    descending: bool,
    calendar: MarketCalendar,
    sessions: OnceLock<SessionIndex>,
}

impl MarketHoursRange {
    pub fn new(min: f64, max: f64, calendar: MarketCalendar) -> Self {
        Self { min, max, calendar, ..Self::default() }
    }

    pub fn calendar(&self) -> &MarketCalendar {
        &self.calendar
    }

    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    pub fn with_domain(mut self, domain: i32) -> Self {
        self.domain = domain;
        self
    }

    /// Candidate sequences from finest to coarsest.
    fn candidates(&self) -> [(&'static str, Vec<f64>); 5] {
        let (from, to) = (self.min, self.max);
        let c = &self.calendar;
        [
            ("hours", c.hours(from, to)),
            ("hour quarters", c.hour_quarters(from, to)),
            ("day closes", c.day_closes(from, to)),
            ("alternate day closes", c.alternate_day_closes(from, to)),
            ("monday closes", c.monday_closes(from, to)),
        ]
    }

    fn measure_times(r: &mut dyn Renderer, vf: &ValueFormatter, times: &[f64]) -> i32 {
        let labels: i32 = times.iter().map(|&t| r.measure_text(&vf(t)).width()).sum();
        let gaps = (times.len() as i32 - 1).max(0) * MIN_TICK_HORIZONTAL_SPACING;
        labels + gaps
    }
}

impl Range for MarketHoursRange {
    fn min(&self) -> f64 { self.min }
    fn set_min(&mut self, min: f64) {
        self.min = min;
        self.sessions = OnceLock::new();
    }
    fn max(&self) -> f64 { self.max }
    fn set_max(&mut self, max: f64) {
        self.max = max;
        self.sessions = OnceLock::new();
    }
    fn domain(&self) -> i32 { self.domain }
    fn set_domain(&mut self, domain: i32) { self.domain = domain; }
    fn is_descending(&self) -> bool { self.descending }

    fn is_zero(&self) -> bool {
        self.min == 0.0 && self.max == 0.0 && self.domain == 0
    }

    fn translate(&self, value: f64) -> i32 {
        let index = self.sessions.get_or_init(|| self.calendar.session_index(self.min, self.max));
        let total = index.total();
        if total == 0.0 {
            return 0;
        }
        // past the end the index is clamped, so walk the calendar instead
        let elapsed = if value > self.max {
            self.calendar.trading_seconds_between(self.min, value)
        } else {
            index.elapsed(value)
        };
        let px = (elapsed / total * f64::from(self.domain)) as i32;
        if self.descending { self.domain - px } else { px }
    }

    /// First candidate sequence whose labels fit the domain side by side.
    fn ticks(&self, r: &mut dyn Renderer, defaults: &Style, vf: &ValueFormatter) -> Option<Vec<Tick>> {
        defaults.text_options().write_to_renderer(r);
        for (name, mut times) in self.candidates() {
            times.retain(|t| *t >= self.min && *t <= self.max);
            if times.is_empty() {
                continue;
            }
            let width = Self::measure_times(r, vf, &times);
            if width <= self.domain {
                tracing::trace!(candidate = name, count = times.len(), width, "market hours ticks");
                return Some(times.into_iter().map(|t| Tick::new(t, vf(t))).collect());
            }
        }
        tracing::trace!("market hours ticks: no candidate fits, using continuous ticks");
        Some(generate_continuous_ticks(r, self, false, defaults, vf))
    }

    fn clone_box(&self) -> Box<dyn Range> {
        Box::new(self.clone())
    }
}

impl fmt::Display for MarketHoursRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarketHoursRange [{:.0},{:.0}] => {}", self.min, self.max, self.domain)
    }
}
