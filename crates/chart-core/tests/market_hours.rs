// File: crates/chart-core/tests/market_hours.rs
// Purpose: Exchange calendar arithmetic and first-fit tick candidates on the market-hours axis.

use std::sync::Arc;

use chart_core::format::time_hour_value_formatter;
use chart_core::{HolidayProvider, MarketCalendar, MarketHoursRange, NoHolidays, NyseHolidays, Range, Style, SvgRenderer};
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(cal: &MarketCalendar, d: NaiveDate, h: u32, min: u32) -> f64 {
    cal.at(d, NaiveTime::from_hms_opt(h, min, 0).unwrap()).unwrap()
}

const SESSION: f64 = 6.5 * 3600.0;

#[test]
fn nyse_holidays_2024() {
    let got = NyseHolidays::for_year(2024);
    let want = [
        date(2024, 1, 1),
        date(2024, 1, 15),
        date(2024, 2, 19),
        date(2024, 3, 29),
        date(2024, 5, 27),
        date(2024, 6, 19),
        date(2024, 7, 4),
        date(2024, 9, 2),
        date(2024, 11, 28),
        date(2024, 12, 25),
    ];
    assert_eq!(got, want);
}

#[test]
fn nyse_weekend_holidays_are_observed() {
    let days = NyseHolidays::for_year(2022);
    assert!(days.contains(&date(2022, 6, 20)));
    assert!(days.contains(&date(2022, 12, 26)));
    // 2021-07-04 was a Sunday
    assert!(NyseHolidays.is_holiday(date(2021, 7, 5)));
    // juneteenth only from 2022
    assert!(!NyseHolidays.is_holiday(date(2021, 6, 18)));
}

#[test]
fn trading_days() {
    let cal = MarketCalendar::nyse();
    assert!(cal.is_trading_day(date(2024, 7, 3)));
    assert!(!cal.is_trading_day(date(2024, 7, 4)));
    assert!(!cal.is_trading_day(date(2024, 7, 6)));
    assert_eq!(date(2024, 7, 6).weekday(), Weekday::Sat);

    let open = cal.with_holidays(Arc::new(NoHolidays));
    assert!(open.is_trading_day(date(2024, 7, 4)));
}

#[test]
fn custom_holiday_closure() {
    let cal = MarketCalendar::nyse().with_holidays(Arc::new(|d: NaiveDate| d.day() == 10));
    assert!(!cal.is_trading_day(date(2024, 7, 10)));
    assert!(cal.is_trading_day(date(2024, 7, 4)));
}

#[test]
fn session_bounds_are_local_times() {
    let cal = MarketCalendar::nyse();
    let (open, close) = cal.session(date(2024, 7, 8)).unwrap();
    assert_eq!(close - open, SESSION);
    // 09:30 at UTC-5 is 14:30 UTC
    assert_eq!(open.rem_euclid(86_400.0), 14.5 * 3600.0);
    assert_eq!(cal.local_date(open), Some(date(2024, 7, 8)));
    assert!(cal.session(date(2024, 7, 4)).is_none());
}

#[test]
fn trading_seconds_skip_weekend_and_holiday() {
    let cal = MarketCalendar::nyse();
    let start = at(&cal, date(2024, 7, 3), 9, 30);
    let end = at(&cal, date(2024, 7, 8), 16, 0);
    // wednesday, friday and monday; thursday is closed
    assert_eq!(cal.trading_seconds_between(start, end), 3.0 * SESSION);

    let partial = cal.trading_seconds_between(at(&cal, date(2024, 7, 5), 12, 0), at(&cal, date(2024, 7, 8), 10, 30));
    assert_eq!(partial, 4.0 * 3600.0 + 3600.0);

    assert_eq!(cal.trading_seconds_between(end, start), 0.0);
    let night = cal.trading_seconds_between(at(&cal, date(2024, 7, 8), 17, 0), at(&cal, date(2024, 7, 8), 23, 0));
    assert_eq!(night, 0.0);
}

#[test]
fn candidate_sequences() {
    let cal = MarketCalendar::nyse();
    let monday = date(2024, 7, 8);
    let (from, to) = (at(&cal, monday, 9, 30), at(&cal, monday, 16, 0));

    let hours = cal.hours(from, to);
    let want: Vec<f64> = [(9, 30), (10, 0), (11, 0), (12, 0), (13, 0), (14, 0), (15, 0), (16, 0)]
        .iter()
        .map(|&(h, m)| at(&cal, monday, h, m))
        .collect();
    assert_eq!(hours, want);

    let quarters = cal.hour_quarters(from, to);
    assert_eq!(quarters, [from, at(&cal, monday, 12, 0), at(&cal, monday, 14, 0), to]);

    let week_from = at(&cal, date(2024, 7, 1), 9, 30);
    let week_to = at(&cal, date(2024, 7, 12), 16, 0);
    let closes = cal.day_closes(week_from, week_to);
    assert_eq!(closes.len(), 9);

    let alternate = cal.alternate_day_closes(week_from, week_to);
    let alternate_days: Vec<u32> = alternate.iter().filter_map(|&t| cal.local_date(t)).map(|d| d.day()).collect();
    // the cursor also lands on Sunday the 7th, which has no close
    assert_eq!(alternate_days, [1, 3, 5, 9, 11]);

    let mondays = cal.monday_closes(week_from, week_to);
    let monday_days: Vec<u32> = mondays.iter().filter_map(|&t| cal.local_date(t)).map(|d| d.day()).collect();
    assert_eq!(monday_days, [1, 8]);
}

fn tick_values(range: &MarketHoursRange) -> Vec<f64> {
    let mut r = SvgRenderer::new(1024, 400);
    let vf = time_hour_value_formatter();
    range.ticks(&mut r, &Style::default(), &vf).unwrap_or_default().iter().map(|t| t.value).collect()
}

#[test]
fn wide_domain_takes_hourly_ticks() {
    let cal = MarketCalendar::nyse();
    let monday = date(2024, 7, 8);
    let (from, to) = (at(&cal, monday, 9, 30), at(&cal, monday, 16, 0));
    let range = MarketHoursRange::new(from, to, cal.clone()).with_domain(10_000);
    assert_eq!(tick_values(&range), cal.hours(from, to));
}

#[test]
fn narrow_domain_degrades_to_day_closes() {
    let cal = MarketCalendar::nyse();
    let monday = date(2024, 7, 8);
    let (from, to) = (at(&cal, monday, 9, 30), at(&cal, monday, 16, 0));
    let range = MarketHoursRange::new(from, to, cal).with_domain(200);
    assert_eq!(tick_values(&range), [to]);
}

#[test]
fn hopeless_domain_falls_back_to_continuous() {
    let cal = MarketCalendar::nyse();
    let monday = date(2024, 7, 8);
    let (from, to) = (at(&cal, monday, 9, 30), at(&cal, monday, 16, 0));
    let range = MarketHoursRange::new(from, to, cal).with_domain(10);
    assert_eq!(tick_values(&range), [from, to]);
}

#[test]
fn ticks_stay_inside_the_range() {
    let cal = MarketCalendar::nyse();
    let from = at(&cal, date(2024, 7, 1), 11, 15);
    let to = at(&cal, date(2024, 7, 12), 13, 45);
    for domain in [300, 800, 4000] {
        let range = MarketHoursRange::new(from, to, cal.clone()).with_domain(domain);
        let values = tick_values(&range);
        assert!(!values.is_empty());
        assert!(values.iter().all(|v| *v >= from && *v <= to), "{domain}: {values:?}");
    }
}

/// Day-by-day overlap of `[start, end]` with each session.
fn walk_sessions(cal: &MarketCalendar, start: f64, end: f64) -> f64 {
    let (Some(mut d), Some(last)) = (cal.local_date(start), cal.local_date(end)) else {
        return 0.0;
    };
    let mut total = 0.0;
    while d <= last {
        if let Some((open, close)) = cal.session(d) {
            total += (end.min(close) - start.max(open)).max(0.0);
        }
        d = d.succ_opt().unwrap();
    }
    total
}

#[test]
fn session_index_matches_calendar_walk() {
    let cal = MarketCalendar::nyse();
    let start = at(&cal, date(2016, 1, 4), 11, 0);
    let end = at(&cal, date(2024, 12, 31), 13, 0);
    let index = cal.session_index(start, end);
    assert_eq!(index.total(), walk_sessions(&cal, start, end));

    let step = (end - start) / 199.0;
    for i in 0..200 {
        let t = (start + step * i as f64).floor();
        assert_eq!(index.elapsed(t), walk_sessions(&cal, start, t), "at {t}");
    }
    assert_eq!(index.elapsed(start - 86_400.0), 0.0);
    assert_eq!(index.elapsed(end + 86_400.0), index.total());
}

#[test]
fn multi_year_range_translates_proportionally() {
    let cal = MarketCalendar::nyse();
    let min = at(&cal, date(2016, 1, 4), 9, 30);
    let max = at(&cal, date(2024, 12, 31), 16, 0);
    let range = MarketHoursRange::new(min, max, cal.clone()).with_domain(1200);
    let total = walk_sessions(&cal, min, max);
    let mut last = 0;
    for i in 0..20_000 {
        let t = min + 4.0 * 3600.0 * i as f64;
        if t > max {
            break;
        }
        let px = range.translate(t);
        assert!(px >= last, "not monotonic at {t}");
        last = px;
        if i % 1000 == 0 {
            let want = (walk_sessions(&cal, min, t) / total * 1200.0) as i32;
            assert_eq!(px, want, "at {t}");
        }
    }
    assert_eq!(range.translate(max), 1200);
}

#[test]
fn moving_an_endpoint_reindexes_sessions() {
    let cal = MarketCalendar::nyse();
    let monday = date(2024, 7, 8);
    let mut range = MarketHoursRange::new(at(&cal, monday, 9, 30), at(&cal, monday, 16, 0), cal.clone()).with_domain(650);
    assert_eq!(range.translate(at(&cal, monday, 12, 45)), 325);

    range.set_max(at(&cal, date(2024, 7, 9), 16, 0));
    assert_eq!(range.translate(at(&cal, monday, 16, 0)), 325);
    range.set_min(at(&cal, monday, 12, 45));
    assert_eq!(range.translate(at(&cal, monday, 12, 45)), 0);
    assert_eq!(range.translate(at(&cal, date(2024, 7, 9), 16, 0)), 650);
}

#[test]
fn good_friday_in_march_and_april() {
    assert!(NyseHolidays.is_holiday(date(2024, 3, 29)));
    assert!(NyseHolidays.is_holiday(date(2025, 4, 18)));
    assert!(!NyseHolidays.is_holiday(date(2025, 3, 28)));
    assert!(NyseHolidays::for_year(2025).contains(&date(2025, 4, 18)));
}
