// File: crates/demo/src/main.rs
// Summary: Demo loads an OHLC CSV (or synthesizes a week of intraday bars) and renders price charts to SVG and PNG.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chart_core::format::time_hour_value_formatter;
use chart_core::{
    svg_provider, Chart, ContinuousSeries, Legend, MarketCalendar, MarketHoursRange, RenderOptions, Style,
    TickStrategy, TimeSeries, YAxis,
};
use chart_render_skia::skia_provider;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy, Debug)]
struct Bar {
    t: DateTime<Utc>,
    o: f64,
    h: f64,
    l: f64,
    c: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chart_demo=info,chart_core=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let input = args.next();
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "target/out".to_string()));

    let (bars, stem) = match input {
        Some(raw) => {
            let (path, used_alt) = resolve_path(&raw)?;
            info!(path = %path.display(), used_alt, "loading csv");
            let bars = load_ohlc_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("chart").to_owned();
            (bars, stem)
        }
        None => {
            warn!("no input file given; using a synthetic week of half-hour bars");
            (synthetic_week(), "synthetic".to_owned())
        }
    };
    if bars.len() < 2 {
        anyhow::bail!("need at least two bars, got {} (check headers/delimiter)", bars.len());
    }
    info!(bars = bars.len(), "loaded");

    let opts = RenderOptions::default();

    // 1) Closing prices on a plain time axis, with the bar range on the secondary axis
    let mut close = price_chart(&bars, &stem);
    let spread: Vec<f64> = bars.iter().map(|b| b.h - b.l).collect();
    close.add_series(
        TimeSeries::new("high-low", bars.iter().map(|b| b.t).collect(), spread)
            .with_style(Style { stroke_dash_array: Some(vec![4.0, 2.0]), ..Style::default() })
            .on_secondary_axis(),
    );
    close.y_axis_secondary = YAxis { tick_strategy: TickStrategy::Pretty, ..YAxis::secondary() };
    write_both(&close, &opts, &out_dir, &stem, "close")?;

    // 2) The same prices on a market-hours axis; nights, weekends and holidays collapse
    let mut market = price_chart(&bars, &stem);
    market.x_axis.range = Some(Box::new(MarketHoursRange::new(0.0, 0.0, MarketCalendar::nyse())));
    market.x_axis.value_formatter = Some(time_hour_value_formatter());
    write_both(&market, &opts, &out_dir, &stem, "market_hours")?;

    // 3) Open minus close by bar index
    let mut delta = Chart::new().with_title(format!("{stem}: close - open"));
    delta.add_series(ContinuousSeries::from_values("delta", bars.iter().map(|b| b.c - b.o).collect()));
    delta.y_axis.zero = Some(Style::default().with_stroke(chart_core::Color::rgb(217, 0, 116), 1.0));
    delta.font = Some(chart_core::Font::builtin());
    let dark = RenderOptions::default().with_theme(chart_core::theme::find("dark")).with_fonts(Arc::new(chart_core::BuiltinFontProvider::new()));
    write_both(&delta, &dark, &out_dir, &stem, "delta")?;

    Ok(())
}

fn price_chart(bars: &[Bar], stem: &str) -> Chart {
    let mut chart = Chart::new().with_title(stem.to_owned());
    chart.add_series(TimeSeries::new("close", bars.iter().map(|b| b.t).collect(), bars.iter().map(|b| b.c).collect()));
    chart.y_axis = YAxis { tick_strategy: TickStrategy::Pretty, ..YAxis::named("Price") };
    chart.y_axis.grid_major_style = Some(Style::shown());
    chart.legend = Some(Legend::default());
    chart
}

fn write_both(chart: &Chart, opts: &RenderOptions, dir: &Path, stem: &str, suffix: &str) -> Result<()> {
    let short = stem.split('_').take(3).collect::<Vec<_>>().join("_");
    let base = dir.join(format!("chart_{short}_{suffix}"));
    let svg = base.with_extension("svg");
    chart.render_to_file(svg_provider, opts, &svg)?;
    info!(path = %svg.display(), "wrote");
    let png = base.with_extension("png");
    chart.render_to_file(skia_provider, opts, &png)?;
    info!(path = %png.display(), "wrote");
    Ok(())
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => alt.set_extension("csv"),
        "csv" => alt.set_extension("cvs"),
        _ => return None,
    };
    Some(alt)
}

/// Load Binance-like OHLC CSV; rows without a parseable time or price are skipped.
fn load_ohlc_csv(path: &Path) -> Result<Vec<Bar>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    info!(?headers, "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"]);
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "adj_close", "close_price"]);
    let Some(i_time) = i_time else {
        anyhow::bail!("no time column among {headers:?}");
    };

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let num = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).and_then(|s| s.trim().parse::<f64>().ok());
        let t = rec.get(i_time).and_then(parse_time);
        match (t, num(i_open), num(i_high), num(i_low), num(i_close)) {
            (Some(t), Some(o), Some(h), Some(l), Some(c)) => out.push(Bar { t, o, h, l, c }),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, "rows skipped");
    }
    out.sort_by_key(|b| b.t);
    Ok(out)
}

/// Epoch seconds or milliseconds, RFC 3339, or `YYYY-MM-DD HH:MM:SS` (UTC).
fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        // epoch ms -> sec
        let secs = if n > 10_i64.pow(12) { n / 1000 } else { n };
        return DateTime::from_timestamp(secs, 0);
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok().map(|t| t.and_utc())
}

/// Half-hour bars across the NYSE week of 2024-07-01, including the July 4th closure.
fn synthetic_week() -> Vec<Bar> {
    let calendar = MarketCalendar::nyse();
    let mut out = Vec::new();
    let mut price = 100.0_f64;
    let Some(start) = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).single() else {
        return out;
    };
    for day in 0..7 {
        let date = (start + Duration::days(day)).date_naive();
        let Some((open, close)) = calendar.session(date) else {
            continue;
        };
        let mut t = open;
        while t < close {
            let o = price;
            let drift = ((t / 1800.0).sin() + (t / 7200.0).cos() * 0.5) * 0.4;
            price = (price + drift).max(1.0);
            let (h, l) = (o.max(price) + 0.2, o.min(price) - 0.2);
            if let Some(ts) = DateTime::from_timestamp(t as i64, 0) {
                out.push(Bar { t: ts, o, h, l, c: price });
            }
            t += 1800.0;
        }
    }
    out
}
