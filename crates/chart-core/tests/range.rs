// File: crates/chart-core/tests/range.rs
// Purpose: Value-to-pixel mapping for linear, log and market-hours ranges.

use chart_core::{ContinuousRange, LogarithmicRange, MarketCalendar, MarketHoursRange, Range};
use chrono::{NaiveDate, NaiveTime};

#[test]
fn continuous_maps_endpoints_to_domain_edges() {
    for (min, max) in [(0.0, 10.0), (-3.7, 8.2), (1e-3, 2e-3), (-500.0, -20.0), (1e6, 1e9)] {
        for domain in [1, 37, 256, 400, 1024] {
            let r = ContinuousRange::new(min, max).with_domain(domain);
            assert_eq!(r.translate(min), 0, "{r}");
            assert_eq!(r.translate(max), domain, "{r}");

            let d = ContinuousRange::new(min, max).with_domain(domain).descending();
            assert_eq!(d.translate(min), domain, "descending {d}");
            assert_eq!(d.translate(max), 0, "descending {d}");
        }
    }
}

#[test]
fn continuous_is_linear_with_ceiling() {
    let r = ContinuousRange::new(0.0, 100.0).with_domain(400);
    assert_eq!(r.translate(50.0), 200);
    assert_eq!(r.translate(10.1), 41);
    assert_eq!(r.translate(-10.0), -40);
}

#[test]
fn zero_delta_translates_to_origin() {
    let r = ContinuousRange::new(5.0, 5.0).with_domain(100);
    assert_eq!(r.delta(), 0.0);
    assert_eq!(r.translate(5.0), 0);
    assert_eq!(r.translate(100.0), 0);
}

#[test]
fn is_zero_only_when_unconfigured() {
    assert!(ContinuousRange::default().is_zero());
    assert!(!ContinuousRange::default().with_domain(10).is_zero());
    assert!(!ContinuousRange::new(0.0, 1.0).is_zero());
    assert!(LogarithmicRange::default().is_zero());
}

#[test]
fn setters_through_trait_object() {
    let mut r: Box<dyn Range> = Box::new(ContinuousRange::default());
    r.set_min(2.0);
    r.set_max(12.0);
    r.set_domain(50);
    assert_eq!(r.delta(), 10.0);
    assert_eq!(r.translate(7.0), 25);

    let copy = r.clone();
    r.set_domain(100);
    assert_eq!(copy.domain(), 50);
}

#[test]
fn log_range_fixture() {
    let r = LogarithmicRange::new(1.0, 1e6).with_domain(1000);
    assert_eq!(r.translate(1.0), 0);
    assert_eq!(r.translate(10.0), 160);
    assert_eq!(r.translate(1e6), 1000);
    assert_eq!(r.translate(0.5), 0);
}

#[test]
fn log_range_endpoints_and_descending() {
    for max in [10.0, 1e3, 12345.0] {
        let r = LogarithmicRange::new(1.0, max).with_domain(300);
        assert_eq!(r.translate(1.0), 0);
        assert_eq!(r.translate(max), 300);
        let d = r.descending();
        assert_eq!(d.translate(1.0), 300);
        assert_eq!(d.translate(max), 0);
    }
}

#[test]
fn log_range_below_one_keeps_orientation() {
    for (min, max) in [(0.0, 1e6), (0.5, 1e3), (0.0, 7.0)] {
        let r = LogarithmicRange::new(min, max).with_domain(1000);
        assert_eq!(r.translate(min), 0, "[{min},{max}]");
        assert_eq!(r.translate(max), 1000, "[{min},{max}]");
        let d = r.descending();
        assert_eq!(d.translate(min), 1000, "descending [{min},{max}]");
        assert_eq!(d.translate(max), 0, "descending [{min},{max}]");
    }
}

#[test]
fn log_range_is_monotonic() {
    let r = LogarithmicRange::new(1.0, 1e6).with_domain(1000);
    let px: Vec<i32> = [1.0, 10.0, 100.0, 1e3, 1e4, 1e5, 1e6].iter().map(|&v| r.translate(v)).collect();
    assert!(px.windows(2).all(|w| w[0] < w[1]), "{px:?}");
}

#[test]
fn display_names_the_range() {
    let r = ContinuousRange::new(0.0, 10.0).with_domain(256);
    assert_eq!(r.to_string(), "ContinuousRange [0.00,10.00] => 256");
    let l = LogarithmicRange::new(1.0, 100.0).with_domain(5);
    assert_eq!(l.to_string(), "LogarithmicRange [1.00,100.00] => 5");
}

fn local(cal: &MarketCalendar, y: i32, m: u32, d: u32, h: u32, min: u32) -> f64 {
    let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
    cal.at(date, NaiveTime::from_hms_opt(h, min, 0).unwrap()).unwrap()
}

#[test]
fn market_hours_endpoints() {
    let cal = MarketCalendar::nyse();
    let min = local(&cal, 2024, 7, 1, 9, 30);
    let max = local(&cal, 2024, 7, 9, 16, 0);
    for domain in [100, 640, 1024] {
        let r = MarketHoursRange::new(min, max, cal.clone()).with_domain(domain);
        assert_eq!(r.translate(min), 0);
        assert_eq!(r.translate(max), domain);
        let d = r.clone().descending();
        assert_eq!(d.translate(min), domain);
        assert_eq!(d.translate(max), 0);
    }
}

#[test]
fn market_hours_collapse_closed_time() {
    let cal = MarketCalendar::nyse();
    let min = local(&cal, 2024, 7, 1, 9, 30);
    let max = local(&cal, 2024, 7, 9, 16, 0);
    let r = MarketHoursRange::new(min, max, cal.clone()).with_domain(1000);

    // overnight
    assert_eq!(r.translate(local(&cal, 2024, 7, 1, 16, 0)), r.translate(local(&cal, 2024, 7, 2, 9, 30)));
    // weekend
    assert_eq!(r.translate(local(&cal, 2024, 7, 5, 16, 0)), r.translate(local(&cal, 2024, 7, 8, 9, 30)));
    // independence day holiday
    assert_eq!(r.translate(local(&cal, 2024, 7, 3, 16, 0)), r.translate(local(&cal, 2024, 7, 5, 9, 30)));
    // inside a session time still moves
    assert!(r.translate(local(&cal, 2024, 7, 2, 12, 0)) > r.translate(local(&cal, 2024, 7, 2, 10, 0)));
}

#[test]
fn market_hours_zero_span_translates_to_origin() {
    let cal = MarketCalendar::nyse();
    let sat = local(&cal, 2024, 7, 6, 10, 0);
    let sun = local(&cal, 2024, 7, 7, 10, 0);
    let r = MarketHoursRange::new(sat, sun, cal).with_domain(500);
    assert_eq!(r.translate(sun), 0);
}
