// File: crates/chart-core/tests/pipeline.rs
// Purpose: End-to-end chart rendering through the SVG backend: validation, fonts, axes,
//          legend, title, custom elements and file output.

use std::sync::Arc;

use chart_core::{
    svg_provider, Chart, ChartError, Color, ContinuousSeries, Font, FontProvider, Legend, MarketCalendar,
    MarketHoursRange, RectI32, RenderOptions, Renderer, Result, Style, Theme, Tick, TimeSeries,
};
use chrono::{TimeZone, Utc};

fn line_chart() -> Chart {
    let mut chart = Chart::new();
    chart.add_series(ContinuousSeries::new("prices", vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![2.0, 3.5, 3.0, 6.25, 5.0]));
    chart
}

fn svg(chart: &Chart) -> String {
    let bytes = chart.render_svg(&RenderOptions::default()).unwrap();
    String::from_utf8(bytes).unwrap()
}

struct MissingFont;

impl FontProvider for MissingFont {
    fn default_font(&self) -> Result<Font> {
        Err(ChartError::Font("no font configured".into()))
    }
}

#[test]
fn empty_chart_is_rejected_without_output() {
    let mut buf = Vec::new();
    let err = Chart::new().render(svg_provider, &RenderOptions::default(), &mut buf).unwrap_err();
    assert!(matches!(err, ChartError::NoSeries), "{err}");
    assert!(buf.is_empty());
}

#[test]
fn all_hidden_series_are_rejected() {
    let mut chart = Chart::new();
    chart.add_series(ContinuousSeries::from_values("a", vec![1.0, 2.0]).with_style(Style::hidden()));
    let err = chart.render_svg(&RenderOptions::default()).unwrap_err();
    assert!(matches!(err, ChartError::NoVisibleSeries), "{err}");
}

#[test]
fn empty_and_mismatched_series_are_rejected() {
    let mut chart = Chart::new();
    chart.add_series(ContinuousSeries::new("empty", vec![], vec![]));
    let err = chart.render_svg(&RenderOptions::default()).unwrap_err();
    assert!(matches!(err, ChartError::EmptySeries { ref name } if name == "empty"), "{err}");

    let mut chart = Chart::new();
    chart.add_series(ContinuousSeries::new("ragged", vec![1.0, 2.0], vec![1.0]));
    let err = chart.render_svg(&RenderOptions::default()).unwrap_err();
    assert!(matches!(err, ChartError::InvalidSeries { .. }), "{err}");
}

#[test]
fn single_point_has_no_range() {
    let mut chart = Chart::new();
    chart.add_series(ContinuousSeries::new("dot", vec![1.0], vec![1.0]));
    let mut buf = Vec::new();
    let err = chart.render(svg_provider, &RenderOptions::default(), &mut buf).unwrap_err();
    assert!(matches!(err, ChartError::InvalidRange { axis: "x", .. }), "{err}");
    assert!(buf.is_empty());
}

#[test]
fn font_failure_surfaces_as_font_error() {
    let opts = RenderOptions::default().with_fonts(Arc::new(MissingFont));
    let mut buf = Vec::new();
    let err = line_chart().render(svg_provider, &opts, &mut buf).unwrap_err();
    assert!(matches!(err, ChartError::Font(_)), "{err}");
    assert!(buf.is_empty());

    let mut chart = line_chart();
    chart.font = Some(Font::builtin());
    assert!(chart.render_svg(&opts).is_ok());
}

#[test]
fn invalid_surface_is_a_renderer_error() {
    let opts = RenderOptions::default().with_size(0, 300);
    let err = line_chart().render_svg(&opts).unwrap_err();
    assert!(matches!(err, ChartError::Renderer(_)), "{err}");
}

#[test]
fn output_is_a_complete_svg_document() {
    let out = svg(&line_chart());
    assert!(out.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""), "{out}");
    assert!(out.contains("width=\"1024\" height=\"400\""));
    assert!(out.ends_with("</svg>\n"));
    assert!(out.contains("<path"));
    assert!(out.contains("<text"));
}

#[test]
fn rendering_is_repeatable() {
    let chart = line_chart();
    let a = chart.render_svg(&RenderOptions::default()).unwrap();
    let b = chart.render_svg(&RenderOptions::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn hidden_axes_draw_no_labels() {
    let mut chart = line_chart();
    chart.x_axis.style = Style::hidden();
    chart.y_axis.style = Style::hidden();
    let out = svg(&chart);
    assert!(!out.contains("<text"), "{out}");
    assert!(out.contains("<path"));
}

#[test]
fn explicit_ticks_replace_generated_ones() {
    let mut chart = line_chart();
    chart.x_axis.ticks = Some(vec![Tick::new(1.0, "start"), Tick::new(3.0, "middle"), Tick::new(5.0, "end")]);
    let out = svg(&chart);
    for label in ["start", "middle", "end"] {
        assert!(out.contains(&format!(">{label}</text>")), "missing {label}");
    }
}

#[test]
fn title_is_escaped_and_drawn() {
    let chart = line_chart().with_title("Open & Close");
    let out = svg(&chart);
    assert!(out.contains(">Open &amp; Close</text>"), "{out}");

    let mut hidden = line_chart().with_title("Nope");
    hidden.title_style = Style::hidden();
    assert!(!svg(&hidden).contains(">Nope<"));
}

#[test]
fn legend_lists_visible_series() {
    let mut chart = line_chart();
    chart.add_series(ContinuousSeries::new("volume", vec![1.0, 5.0], vec![1.0, 2.0]));
    chart.add_series(ContinuousSeries::new("ghost", vec![1.0, 5.0], vec![1.0, 2.0]).with_style(Style::hidden()));
    chart.legend = Some(Legend::default());
    let out = svg(&chart);
    assert!(out.contains(">prices</text>"));
    assert!(out.contains(">volume</text>"));
    assert!(!out.contains(">ghost</text>"));
}

#[test]
fn secondary_axis_only_with_secondary_series() {
    let mut plain = line_chart();
    plain.y_axis_secondary.ticks = Some(vec![Tick::new(0.0, "lhs-lo"), Tick::new(1.0, "lhs-hi")]);
    assert!(!svg(&plain).contains(">lhs-lo<"));

    let mut chart = line_chart();
    chart.add_series(ContinuousSeries::new("ratio", vec![1.0, 5.0], vec![0.1, 0.9]).on_secondary_axis());
    chart.y_axis_secondary.ticks = Some(vec![Tick::new(0.0, "lhs-lo"), Tick::new(1.0, "lhs-hi")]);
    let out = svg(&chart);
    assert!(out.contains(">lhs-lo</text>"));
    assert!(out.contains(">lhs-hi</text>"));
}

#[test]
fn theme_colors_reach_the_output() {
    let chart = line_chart();
    let dark = chart.render_svg(&RenderOptions::default().with_theme(Theme::dark())).unwrap();
    let dark = String::from_utf8(dark).unwrap();
    assert!(dark.contains("rgba(18,18,20,1.0)"));
    assert!(!svg(&chart).contains("rgba(18,18,20,1.0)"));
}

#[test]
fn dpi_scales_label_pixels() {
    let chart = line_chart();
    assert!(svg(&chart).contains("font-size:12.8px"));
    let print = chart.render_svg(&RenderOptions::default().with_dpi(72.0)).unwrap();
    let print = String::from_utf8(print).unwrap();
    assert!(print.contains("font-size:10.0px"));
    assert!(!print.contains("font-size:12.8px"));
}

#[test]
fn series_style_overrides_palette() {
    let mut chart = Chart::new();
    let style = Style::default().with_stroke(Color::rgb(1, 2, 3), 2.0);
    chart.add_series(ContinuousSeries::from_values("custom", vec![1.0, 4.0, 2.0]).with_style(style));
    assert!(svg(&chart).contains("rgba(1,2,3,1.0)"));
}

#[test]
fn elements_draw_last_inside_the_canvas() {
    let mut chart = line_chart();
    chart.add_element(|r: &mut dyn Renderer, canvas: RectI32, defaults: &Style| {
        defaults.text_options().write_to_renderer(r);
        r.text("annotation", canvas.left, canvas.top);
    });
    let out = svg(&chart);
    let at = out.find(">annotation</text>").unwrap();
    assert!(out[at..].find("<path").is_none(), "element must be drawn after everything else");
}

#[test]
fn time_series_on_market_hours() {
    let cal = MarketCalendar::nyse();
    let times = vec![
        Utc.with_ymd_and_hms(2024, 7, 8, 14, 30, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 7, 8, 18, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 7, 9, 15, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 7, 9, 21, 0, 0).unwrap(),
    ];
    let mut chart = Chart::new();
    chart.add_series(TimeSeries::new("spy", times, vec![540.1, 541.8, 539.9, 542.3]));
    chart.x_axis.range = Some(Box::new(MarketHoursRange::new(0.0, 0.0, cal)));
    let out = svg(&chart);
    assert!(out.contains("<path"));
}

#[test]
fn render_to_file_writes_the_same_bytes() {
    let chart = line_chart();
    let opts = RenderOptions::default();
    let dir = std::path::Path::new(env!("CARGO_TARGET_TMPDIR")).join("pipeline");
    let path = dir.join("line.svg");
    chart.render_to_file(svg_provider, &opts, &path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), chart.render_svg(&opts).unwrap());

    let missing = dir.join("never.svg");
    let _ = std::fs::remove_file(&missing);
    assert!(Chart::new().render_to_file(svg_provider, &opts, &missing).is_err());
    assert!(!missing.exists());
}
