// File: crates/chart-core/src/format.rs
// Summary: Value formatters turning axis values (numbers or unix seconds) into tick labels.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Shared label formatter.
pub type ValueFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_DATE_HOUR_FORMAT: &str = "%m-%d %-I%p";
pub const DEFAULT_DATE_MINUTE_FORMAT: &str = "%m-%d %H:%M";

/// Two decimal places.
pub fn float_value_formatter() -> ValueFormatter {
    Arc::new(|v| format!("{v:.2}"))
}

/// Truncates to an integer.
pub fn int_value_formatter() -> ValueFormatter {
    Arc::new(|v| format!("{}", v as i64))
}

pub fn time_value_formatter() -> ValueFormatter {
    time_value_formatter_with_format(DEFAULT_DATE_FORMAT, utc())
}

pub fn time_hour_value_formatter() -> ValueFormatter {
    time_value_formatter_with_format(DEFAULT_DATE_HOUR_FORMAT, utc())
}

pub fn time_minute_value_formatter() -> ValueFormatter {
    time_value_formatter_with_format(DEFAULT_DATE_MINUTE_FORMAT, utc())
}

/// Interprets values as unix seconds and formats them in `offset` with a chrono pattern.
///
/// Values outside chrono's representable range fall back to the plain number.
pub fn time_value_formatter_with_format(fmt: &str, offset: FixedOffset) -> ValueFormatter {
    let fmt = fmt.to_owned();
    Arc::new(move |v| match unix_to_datetime(v) {
        Some(t) => t.with_timezone(&offset).format(&fmt).to_string(),
        None => format!("{v:.2}"),
    })
}

/// Unix seconds (fractional part kept as nanoseconds) to a UTC timestamp.
pub fn unix_to_datetime(v: f64) -> Option<DateTime<Utc>> {
    if !v.is_finite() {
        return None;
    }
    let secs = v.floor();
    let nanos = ((v - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
}

fn utc() -> FixedOffset {
    Utc.fix()
}
