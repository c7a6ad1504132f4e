// File: crates/chart-core/src/tick.rs
// Summary: Tick values with labels, the evenly-spaced tick generator and rounding helpers.

use crate::format::ValueFormatter;
use crate::range::Range;
use crate::render::Renderer;
use crate::style::Style;
use crate::types::{MIN_TICK_HORIZONTAL_SPACING, MIN_TICK_VERTICAL_SPACING, TICK_COUNT_SANITY_CHECK};

/// A labeled position on an axis, in data units.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

impl Tick {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self { value, label: label.into() }
    }
}

/// Orders ticks by ascending value.
pub fn sort_ticks(ticks: &mut [Tick]) {
    ticks.sort_by(|a, b| a.value.total_cmp(&b.value));
}

/// Minimum and maximum tick value, if any.
pub(crate) fn tick_extent(ticks: &[Tick]) -> Option<(f64, f64)> {
    ticks.iter().fold(None, |acc, t| match acc {
        None => Some((t.value, t.value)),
        Some((lo, hi)) => Some((lo.min(t.value), hi.max(t.value))),
    })
}

/// One tenth of the largest power of ten (at most 1e10) strictly below `delta`.
pub fn round_to_for_delta(delta: f64) -> f64 {
    let mut cursor = 1e10_f64;
    while cursor > 0.0 {
        if delta > cursor {
            return cursor / 10.0;
        }
        cursor /= 10.0;
    }
    0.0
}

/// Rounds `value` up to a multiple of `to`; a zero `to` leaves it alone.
pub fn round_up(value: f64, to: f64) -> f64 {
    if to < 1e-15 {
        return value;
    }
    (value / to).ceil() * to
}

/// Rounds `value` down to a multiple of `to`; a zero `to` leaves it alone.
pub fn round_down(value: f64, to: f64) -> f64 {
    if to < 1e-15 {
        return value;
    }
    (value / to).floor() * to
}

/// Evenly spaced ticks always including both range ends.
///
/// Spacing is derived from the measured size of the `min` label so that labels never
/// crowd; intermediate values are rounded up to a tenth of the delta's magnitude.
pub fn generate_continuous_ticks(
    r: &mut dyn Renderer,
    range: &dyn Range,
    is_vertical: bool,
    style: &Style,
    vf: &ValueFormatter,
) -> Vec<Tick> {
    let (min, max) = (range.min(), range.max());
    let descending = range.is_descending();
    let mut ticks = Vec::new();
    let first = if descending { max } else { min };
    ticks.push(Tick::new(first, vf(first)));

    style.text_options().write_to_renderer(r);
    let label_box = r.measure_text(&vf(min));
    let tick_size = f64::from(if is_vertical {
        label_box.height() + MIN_TICK_VERTICAL_SPACING
    } else {
        label_box.width() + MIN_TICK_HORIZONTAL_SPACING
    });

    let domain = f64::from(range.domain());
    let count = ((domain - 2.0 * tick_size) / tick_size).floor();
    let count = count.clamp(0.0, f64::from(TICK_COUNT_SANITY_CHECK)) as i32;

    let delta = (max - min).abs();
    let round_to = round_to_for_delta(delta) / 10.0;
    if count > 0 {
        let step = delta / f64::from(count);
        let mut previous = 0.0;
        for x in 1..count {
            let offset = round_up(step * f64::from(x), round_to);
            // a step finer than the rounding collapses onto a neighbour or onto the far end
            if offset <= previous || offset + round_to / 2.0 >= delta {
                continue;
            }
            previous = offset;
            let v = if descending { max - offset } else { min + offset };
            ticks.push(Tick::new(v, vf(v)));
        }
    }

    let last = if descending { min } else { max };
    ticks.push(Tick::new(last, vf(last)));
    tracing::trace!(count = ticks.len(), is_vertical, "continuous ticks");
    ticks
}
