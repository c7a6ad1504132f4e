// File: crates/chart-core/tests/snapshot.rs
// Purpose: Golden SVG snapshot with bless flow.
// Behavior:
// - Renders a small chart with title, legend, grid and both Y axes to SVG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if the snapshot exists, compares the documents exactly.
// - Else, logs a note and returns (skips) without failing to ease first run.

use chart_core::{Chart, ContinuousSeries, Legend, RenderOptions, Style, TickStrategy, YAxis};

fn render_bytes() -> Vec<u8> {
    let mut chart = Chart::new().with_title("Snapshot");
    chart.add_series(ContinuousSeries::new("a", vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![0.0, 1.0, 0.0, 1.5, 1.0]));
    chart.add_series(ContinuousSeries::new("b", vec![0.0, 4.0], vec![10.0, 40.0]).on_secondary_axis());
    chart.x_axis.tick_strategy = TickStrategy::Pretty;
    chart.x_axis.grid_major_style = Some(Style::shown());
    chart.y_axis = YAxis { tick_strategy: TickStrategy::Pretty, ..YAxis::named("value") };
    chart.legend = Some(Legend::default());

    let opts = RenderOptions::default().with_size(480, 320);
    chart.render_svg(&opts).expect("render svg")
}

#[test]
fn golden_basic_chart() {
    let bytes = render_bytes();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("basic_chart.svg");

    let update = std::env::var("UPDATE_SNAPSHOTS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read_to_string(&snap_path).expect("read snapshot");
        let got = String::from_utf8(bytes).expect("svg is utf-8");
        assert_eq!(got, want, "rendered svg differs from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
