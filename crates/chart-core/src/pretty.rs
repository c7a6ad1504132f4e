// File: crates/chart-core/src/pretty.rs
// Summary: Extended-Wilkinson "pretty" tick search (simplicity, coverage, density, legibility).

use crate::format::ValueFormatter;
use crate::range::Range;
use crate::render::Renderer;
use crate::style::Style;
use crate::tick::Tick;
use crate::types::{MIN_TICK_HORIZONTAL_SPACING, MIN_TICK_VERTICAL_SPACING, TICK_COUNT_SANITY_CHECK};

/// Preferred step mantissas, most preferred first.
const PRETTY_STEPS: [f64; 6] = [1.0, 5.0, 2.0, 2.5, 4.0, 3.0];

const W_SIMPLICITY: f64 = 0.2;
const W_COVERAGE: f64 = 0.25;
const W_DENSITY: f64 = 0.5;
const W_LEGIBILITY: f64 = 0.05;

#[derive(Clone, Copy, Debug)]
struct Candidate {
    score: f64,
    min: f64,
    max: f64,
    step: f64,
}

/// Searches for the tick set with the best weighted score that stays inside the range.
///
/// Returns an empty list for empty or inverted ranges, a zero domain, or when no
/// candidate fits. Descending ranges get their ticks from max to min.
pub fn generate_pretty_continuous_ticks(
    r: &mut dyn Renderer,
    range: &dyn Range,
    is_vertical: bool,
    style: &Style,
    vf: &ValueFormatter,
) -> Vec<Tick> {
    let (range_min, range_max) = (range.min(), range.max());
    if range_min >= range_max || range.domain() == 0 {
        return Vec::new();
    }

    style.text_options().write_to_renderer(r);
    let label = r.measure_text(&vf(range_min));
    let (actual, spacing) = if is_vertical {
        (f64::from(label.height()).max(1.0), MIN_TICK_VERTICAL_SPACING)
    } else {
        (f64::from(label.width()).max(1.0), MIN_TICK_HORIZONTAL_SPACING)
    };
    let available = f64::from(range.domain());
    let desired = (available / (actual + f64::from(spacing)))
        .floor()
        .max(2.0)
        .min(f64::from(TICK_COUNT_SANITY_CHECK));

    let Some(best) = search(range_min, range_max, desired, actual, available) else {
        return Vec::new();
    };
    tracing::trace!(min = best.min, max = best.max, step = best.step, score = best.score, "pretty ticks");

    let mut ticks = Vec::new();
    if range.is_descending() {
        let mut v = best.max;
        while v > best.min - best.step / 2.0 {
            ticks.push(Tick::new(v, vf(v)));
            v -= best.step;
        }
    } else {
        let mut v = best.min;
        while v < best.max + best.step / 2.0 {
            ticks.push(Tick::new(v, vf(v)));
            v += best.step;
        }
    }
    ticks
}

fn search(range_min: f64, range_max: f64, desired: f64, label_size: f64, available: f64) -> Option<Candidate> {
    let n = PRETTY_STEPS.len();
    let mut best = Candidate { score: -2.0, min: 0.0, max: 0.0, step: 0.0 };
    let mut skip = 1.0;

    'outer: loop {
        for (i, &q) in PRETTY_STEPS.iter().enumerate() {
            let sim_max = simplicity_max(i, n, skip);
            if W_SIMPLICITY * sim_max + W_COVERAGE + W_DENSITY + W_LEGIBILITY < best.score {
                break 'outer;
            }

            let mut k = 2.0;
            loop {
                let dens_max = density_max(k, desired);
                if W_SIMPLICITY * sim_max + W_COVERAGE + W_DENSITY * dens_max + W_LEGIBILITY < best.score {
                    break;
                }

                let delta = (range_max - range_min) / (k + 1.0) / skip / q;
                let mut exp = delta.log10().ceil() as i32;
                loop {
                    let step = skip * q * 10f64.powi(exp);
                    let cov_max = coverage_max(range_min, range_max, step * (k - 1.0));
                    if W_SIMPLICITY * sim_max + W_COVERAGE * cov_max + W_DENSITY * dens_max + W_LEGIBILITY
                        < best.score
                    {
                        break;
                    }

                    let min_start = (range_max / step).floor() * skip - (k - 1.0) * skip;
                    let max_start = (range_min / step).ceil() * skip;
                    if min_start > max_start {
                        exp += 1;
                        continue;
                    }

                    let mut start = min_start;
                    while start <= max_start {
                        let tick_min = start * (step / skip);
                        let tick_max = tick_min + step * (k - 1.0);

                        let s = simplicity(i, n, skip, tick_min, tick_max, step);
                        let c = coverage(range_min, range_max, tick_min, tick_max);
                        let d = density(k, desired, range_min, range_max, tick_min, tick_max);
                        let l = if label_size * k > available { f64::NEG_INFINITY } else { 1.0 };
                        let score = W_SIMPLICITY * s + W_COVERAGE * c + W_DENSITY * d + W_LEGIBILITY * l;

                        if score > best.score && tick_min >= range_min && tick_max <= range_max {
                            best = Candidate { score, min: tick_min, max: tick_max, step };
                        }
                        start += 1.0;
                    }
                    exp += 1;
                }
                k += 1.0;
            }
        }
        skip += 1.0;
    }

    (best.step != 0.0).then_some(best)
}

fn simplicity(i: usize, n: usize, skip: f64, tick_min: f64, tick_max: f64, step: f64) -> f64 {
    let has_zero = tick_min <= 0.0 && tick_max >= 0.0 && tick_min % step < 1e-9;
    1.0 - i as f64 / (n - 1) as f64 - skip + if has_zero { 1.0 } else { 0.0 }
}

fn simplicity_max(i: usize, n: usize, skip: f64) -> f64 {
    2.0 - i as f64 / (n - 1) as f64 - skip
}

fn coverage(range_min: f64, range_max: f64, tick_min: f64, tick_max: f64) -> f64 {
    let tolerance = 0.1 * (range_max - range_min);
    1.0 - 0.5 * ((range_max - tick_max).powi(2) + (range_min - tick_min).powi(2)) / tolerance.powi(2)
}

fn coverage_max(range_min: f64, range_max: f64, span: f64) -> f64 {
    let extent = range_max - range_min;
    if span <= extent {
        return 1.0;
    }
    1.0 - (extent / 2.0).powi(2) / (0.1 * extent).powi(2)
}

fn density(k: f64, desired: f64, range_min: f64, range_max: f64, tick_min: f64, tick_max: f64) -> f64 {
    let actual = (k - 1.0) / (tick_max - tick_min);
    let target = (desired - 1.0) / (tick_max.max(range_max) - tick_min.min(range_min));
    2.0 - (actual / target).max(target / actual)
}

fn density_max(k: f64, desired: f64) -> f64 {
    if k >= desired {
        2.0 - (k - 1.0) / (desired - 1.0)
    } else {
        1.0
    }
}
