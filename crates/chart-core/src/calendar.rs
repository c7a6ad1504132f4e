// File: crates/chart-core/src/calendar.rs
// Summary: Exchange sessions and holidays: trading-time arithmetic and tick candidate sequences.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Timelike, Utc, Weekday};

/// Decides whether an exchange is closed on a given local date.
pub trait HolidayProvider: Send + Sync {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

impl<F> HolidayProvider for F
where
    F: Fn(NaiveDate) -> bool + Send + Sync,
{
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self(date)
    }
}

/// Every weekday trades.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHolidays;

impl HolidayProvider for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Full-day closures of the New York Stock Exchange.
#[derive(Clone, Copy, Debug, Default)]
pub struct NyseHolidays;

impl NyseHolidays {
    /// Observed closure dates for `year`.
    pub fn for_year(year: i32) -> Vec<NaiveDate> {
        (1..=12).flat_map(|month| Self::in_month(year, month)).flatten().collect()
    }

    /// Observed closures falling in one month; Good Friday lands in March or April.
    fn in_month(year: i32, month: u32) -> [Option<NaiveDate>; 2] {
        let nth = |wd, n| NaiveDate::from_weekday_of_month_opt(year, month, wd, n);
        match month {
            // New Year's falling on a Saturday is not moved back into the old year.
            1 => [
                ymd(year, 1, 1).map(|d| if d.weekday() == Weekday::Sun { d + Duration::days(1) } else { d }),
                nth(Weekday::Mon, 3),
            ],
            2 => [nth(Weekday::Mon, 3), None],
            3 | 4 => [easter_sunday(year).map(|d| d - Duration::days(2)).filter(|d| d.month() == month), None],
            5 => [last_weekday_of_month(year, 5, Weekday::Mon), None],
            6 if year >= 2022 => [ymd(year, 6, 19).map(observed), None],
            7 => [ymd(year, 7, 4).map(observed), None],
            9 => [nth(Weekday::Mon, 1), None],
            11 => [nth(Weekday::Thu, 4), None],
            12 => [ymd(year, 12, 25).map(observed), None],
            _ => [None, None],
        }
    }
}

impl HolidayProvider for NyseHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        Self::in_month(date.year(), date.month()).contains(&Some(date))
    }
}

fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Saturday holidays close the Friday before, Sunday holidays the Monday after.
fn observed(d: NaiveDate) -> NaiveDate {
    match d.weekday() {
        Weekday::Sat => d - Duration::days(1),
        Weekday::Sun => d + Duration::days(1),
        _ => d,
    }
}

fn last_weekday_of_month(year: i32, month: u32, wd: Weekday) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, wd, 5)
        .or_else(|| NaiveDate::from_weekday_of_month_opt(year, month, wd, 4))
}

/// Gregorian Easter Sunday (anonymous algorithm).
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    ymd(year, month as u32, day as u32)
}

/// A single-session exchange calendar in a fixed UTC offset.
///
/// All instants crossing this API are unix seconds.
#[derive(Clone)]
pub struct MarketCalendar {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub offset: FixedOffset,
    pub holidays: Arc<dyn HolidayProvider>,
}

impl fmt::Debug for MarketCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketCalendar")
            .field("open", &self.open)
            .field("close", &self.close)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl Default for MarketCalendar {
    fn default() -> Self {
        Self::nyse()
    }
}

impl MarketCalendar {
    pub fn new(open: NaiveTime, close: NaiveTime, offset: FixedOffset, holidays: Arc<dyn HolidayProvider>) -> Self {
        Self { open, close, offset, holidays }
    }

    /// 09:30 to 16:00 at UTC-5 with NYSE closures.
    pub fn nyse() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default(),
            close: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default(),
            offset: FixedOffset::west_opt(5 * 3600).unwrap_or(Utc.fix()),
            holidays: Arc::new(NyseHolidays),
        }
    }

    pub fn with_holidays(mut self, holidays: Arc<dyn HolidayProvider>) -> Self {
        self.holidays = holidays;
        self
    }

    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.is_holiday(date)
    }

    /// Local calendar date containing the unix instant `ts`.
    pub fn local_date(&self, ts: f64) -> Option<NaiveDate> {
        self.to_local(ts).map(|t| t.date_naive())
    }

    fn to_local(&self, ts: f64) -> Option<DateTime<FixedOffset>> {
        if !ts.is_finite() {
            return None;
        }
        DateTime::from_timestamp(ts.floor() as i64, 0).map(|t| t.with_timezone(&self.offset))
    }

    /// Unix seconds of `time` on local `date`.
    pub fn at(&self, date: NaiveDate, time: NaiveTime) -> Option<f64> {
        self.offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .map(|t| t.timestamp() as f64)
    }

    /// Session bounds (unix seconds) for a trading day; `None` otherwise.
    pub fn session(&self, date: NaiveDate) -> Option<(f64, f64)> {
        if !self.is_trading_day(date) {
            return None;
        }
        Some((self.at(date, self.open)?, self.at(date, self.close)?))
    }

    fn dates(&self, from: f64, to: f64) -> impl Iterator<Item = NaiveDate> {
        let first = self.local_date(from);
        let last = self.local_date(to);
        let mut cursor = first.filter(|_| from <= to);
        std::iter::from_fn(move || {
            let d = cursor?;
            if Some(d) > last {
                return None;
            }
            cursor = d.succ_opt();
            Some(d)
        })
    }

    /// Seconds of open market time within `[start, end]`.
    pub fn trading_seconds_between(&self, start: f64, end: f64) -> f64 {
        self.session_index(start, end).total()
    }

    /// Sessions of `[start, end]` clipped to the span, with running totals for repeated lookups.
    pub fn session_index(&self, start: f64, end: f64) -> SessionIndex {
        let mut index = SessionIndex::default();
        if !(end > start) {
            return index;
        }
        let mut total = 0.0;
        for (open, close) in self.dates(start, end).filter_map(|d| self.session(d)) {
            let (open, close) = (open.max(start), close.min(end));
            if close <= open {
                continue;
            }
            total += close - open;
            index.sessions.push((open, close));
            index.cumulative.push(total);
        }
        index
    }

    /// Per trading day: the open, every whole hour inside the session, and the close.
    pub fn hours(&self, from: f64, to: f64) -> Vec<f64> {
        let mut out = Vec::new();
        for d in self.dates(from, to) {
            if !self.is_trading_day(d) {
                continue;
            }
            out.extend(self.at(d, self.open));
            let mut hour = self.open.hour() + 1;
            while let Some(t) = NaiveTime::from_hms_opt(hour, 0, 0) {
                if t >= self.close {
                    break;
                }
                out.extend(self.at(d, t));
                hour += 1;
            }
            out.extend(self.at(d, self.close));
        }
        out
    }

    /// Per trading day: open, noon, 14:00 and close (inner marks only when inside the session).
    pub fn hour_quarters(&self, from: f64, to: f64) -> Vec<f64> {
        let marks = [NaiveTime::from_hms_opt(12, 0, 0), NaiveTime::from_hms_opt(14, 0, 0)];
        let mut out = Vec::new();
        for d in self.dates(from, to) {
            if !self.is_trading_day(d) {
                continue;
            }
            out.extend(self.at(d, self.open));
            for t in marks.into_iter().flatten() {
                if t > self.open && t < self.close {
                    out.extend(self.at(d, t));
                }
            }
            out.extend(self.at(d, self.close));
        }
        out
    }

    /// The close of every trading day.
    pub fn day_closes(&self, from: f64, to: f64) -> Vec<f64> {
        self.closes_stepping(from, to, |d| d.succ_opt())
    }

    /// Closes visited by a cursor advancing two calendar days at a time.
    pub fn alternate_day_closes(&self, from: f64, to: f64) -> Vec<f64> {
        self.closes_stepping(from, to, |d| d.checked_add_signed(Duration::days(2)))
    }

    /// The close of the first day, then of every following Monday.
    pub fn monday_closes(&self, from: f64, to: f64) -> Vec<f64> {
        self.closes_stepping(from, to, |d| {
            let ahead = 7 - i64::from(d.weekday().num_days_from_monday());
            d.checked_add_signed(Duration::days(ahead))
        })
    }

    fn closes_stepping(&self, from: f64, to: f64, next: impl Fn(NaiveDate) -> Option<NaiveDate>) -> Vec<f64> {
        let (Some(mut cursor), Some(last)) = (self.local_date(from), self.local_date(to)) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        while cursor <= last {
            if self.is_trading_day(cursor) {
                out.extend(self.at(cursor, self.close));
            }
            match next(cursor) {
                Some(d) => cursor = d,
                None => break,
            }
        }
        out
    }
}

/// Trading sessions of one span in time order; `cumulative[i]` is the open time through session `i`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionIndex {
    sessions: Vec<(f64, f64)>,
    cumulative: Vec<f64>,
}

impl SessionIndex {
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Trading seconds from the span start to `ts`, clamped to the span.
    pub fn elapsed(&self, ts: f64) -> f64 {
        let i = self.sessions.partition_point(|&(open, _)| open <= ts);
        let Some(&(open, close)) = i.checked_sub(1).and_then(|j| self.sessions.get(j)) else {
            return 0.0;
        };
        let before = i.checked_sub(2).and_then(|j| self.cumulative.get(j)).copied().unwrap_or(0.0);
        before + (ts.min(close) - open).max(0.0)
    }
}
