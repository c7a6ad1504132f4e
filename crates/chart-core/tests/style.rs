// File: crates/chart-core/tests/style.rs
// Purpose: Style cascade, projections, draw predicates and what gets pushed to a renderer.

use std::io::Write;

use chart_core::{Color, Font, Insets, RectI32, Renderer, Result, Style};

/// Records every state change as a short string.
#[derive(Default)]
struct Recorder {
    log: Vec<String>,
}

impl Renderer for Recorder {
    fn reset_style(&mut self) { self.log.push("reset".into()); }
    fn dpi(&self) -> f64 { 72.0 }
    fn set_dpi(&mut self, _dpi: f64) {}
    fn set_class_name(&mut self, name: &str) { self.log.push(format!("class {name}")); }
    fn set_stroke_color(&mut self, color: Color) { self.log.push(format!("stroke {color}")); }
    fn set_fill_color(&mut self, color: Color) { self.log.push(format!("fill {color}")); }
    fn set_stroke_width(&mut self, width: f64) { self.log.push(format!("width {width}")); }
    fn set_stroke_dash_array(&mut self, dashes: &[f64]) { self.log.push(format!("dash {dashes:?}")); }
    fn move_to(&mut self, _x: i32, _y: i32) {}
    fn line_to(&mut self, _x: i32, _y: i32) {}
    fn quad_curve_to(&mut self, _cx: i32, _cy: i32, _x: i32, _y: i32) {}
    fn arc_to(&mut self, _cx: i32, _cy: i32, _rx: f64, _ry: f64, _start: f64, _delta: f64) {}
    fn close(&mut self) {}
    fn stroke(&mut self) {}
    fn fill(&mut self) {}
    fn fill_stroke(&mut self) {}
    fn circle(&mut self, _radius: f64, _x: i32, _y: i32) {}
    fn set_font(&mut self, font: &Font) { self.log.push(format!("font {}", font.family())); }
    fn set_font_color(&mut self, color: Color) { self.log.push(format!("font color {color}")); }
    fn set_font_size(&mut self, size: f64) { self.log.push(format!("font size {size}")); }
    fn text(&mut self, _body: &str, _x: i32, _y: i32) {}
    fn measure_text(&self, _body: &str) -> RectI32 { RectI32::default() }
    fn set_text_rotation(&mut self, degrees: f64) { self.log.push(format!("rotate {degrees}")); }
    fn clear_text_rotation(&mut self) { self.log.push("unrotate".into()); }
    fn save(&mut self, _w: &mut dyn Write) -> Result<()> { Ok(()) }
}

const RED: Color = Color::rgb(255, 0, 0);
const BLUE: Color = Color::rgb(0, 0, 255);

#[test]
fn set_fields_win_over_fallback() {
    let own = Style { stroke_width: Some(0.0), font_size: Some(12.0), ..Style::default() };
    let fallback = Style::default().with_stroke(RED, 3.0).with_font_size(8.0).with_fill(BLUE);
    let merged = own.inherit_from(&fallback);
    assert_eq!(merged.stroke_width, Some(0.0));
    assert_eq!(merged.stroke_color, Some(RED));
    assert_eq!(merged.font_size, Some(12.0));
    assert_eq!(merged.fill_color, Some(BLUE));
}

#[test]
fn inheriting_from_empty_is_identity() {
    let s = Style::default().with_stroke(RED, 2.0).with_padding(Insets::uniform(3)).with_text_rotation(45.0);
    assert_eq!(s.inherit_from(&Style::default()), s);
    assert_eq!(Style::default().inherit_from(&s), s);
}

#[test]
fn hidden_does_not_cascade() {
    let parent = Style::hidden().with_fill(RED);
    let child = Style::shown().inherit_from(&parent);
    assert!(!child.hidden);
    assert_eq!(child.fill_color, Some(RED));
    assert!(Style::hidden().inherit_from(&Style::default()).hidden);
}

#[test]
fn is_zero_ignores_hidden() {
    assert!(Style::default().is_zero());
    assert!(Style::hidden().is_zero());
    assert!(!Style::default().with_fill(RED).is_zero());
    assert!(!Style { text_line_spacing: Some(0), ..Style::default() }.is_zero());
}

#[test]
fn projections_keep_only_their_concern() {
    let s = Style {
        class_name: Some("series".into()),
        stroke_dash_array: Some(vec![4.0, 2.0]),
        font_color: Some(BLUE),
        ..Style::default().with_stroke(RED, 2.0).with_fill(BLUE).with_dots(RED, 3.0).with_font_size(9.0)
    };

    let stroke = s.stroke_options();
    assert_eq!(stroke.stroke_color, Some(RED));
    assert_eq!(stroke.stroke_dash_array, Some(vec![4.0, 2.0]));
    assert_eq!(stroke.class_name.as_deref(), Some("series"));
    assert_eq!(stroke.fill_color, None);
    assert_eq!(stroke.font_size, None);

    let fill = s.fill_options();
    assert_eq!(fill.fill_color, Some(BLUE));
    assert_eq!(fill.stroke_color, None);

    let both = s.fill_and_stroke_options();
    assert_eq!((both.fill_color, both.stroke_color, both.stroke_width), (Some(BLUE), Some(RED), Some(2.0)));

    let dots = s.dot_options();
    assert_eq!(dots.stroke_color, Some(RED));
    assert_eq!(dots.fill_color, Some(RED));
    assert_eq!(dots.stroke_width, Some(1.0));

    let text = s.text_options();
    assert_eq!(text.font_size, Some(9.0));
    assert_eq!(text.font_color, Some(BLUE));
    assert_eq!(text.stroke_color, None);
    assert_eq!(text.dot_color, None);
}

#[test]
fn predicates_need_visible_color_and_width() {
    assert!(Style::default().with_stroke(RED, 1.0).should_draw_stroke());
    assert!(!Style::default().with_stroke(RED, 0.0).should_draw_stroke());
    assert!(!Style::default().with_stroke(Color::TRANSPARENT, 2.0).should_draw_stroke());
    assert!(!Style { stroke_color: Some(RED), ..Style::default() }.should_draw_stroke());

    assert!(Style::default().with_fill(BLUE).should_draw_fill());
    assert!(!Style::default().with_fill(Color::TRANSPARENT).should_draw_fill());
    assert!(!Style::default().should_draw_fill());

    assert!(Style::default().with_dots(RED, 2.0).should_draw_dot());
    assert!(!Style::default().with_dots(RED, 0.0).should_draw_dot());
}

#[test]
fn drawing_options_reset_unset_values() {
    let mut r = Recorder::default();
    Style::default().with_fill(BLUE).write_drawing_options_to_renderer(&mut r);
    assert_eq!(
        r.log,
        ["class ", "stroke rgba(0,0,0,0.0)", "width 0", "dash []", "fill rgba(0,0,255,1.0)"]
    );
}

#[test]
fn text_options_clear_rotation_before_setting_it() {
    let mut r = Recorder::default();
    let s = Style { font: Some(Font::builtin()), ..Style::default().with_font_color(RED).with_text_rotation(90.0) };
    s.write_text_options_to_renderer(&mut r);
    assert_eq!(
        r.log,
        ["class ", "font Roboto", "font color rgba(255,0,0,1.0)", "font size 10", "unrotate", "rotate 90"]
    );

    let mut r = Recorder::default();
    Style::default().with_text_rotation(0.0).write_text_options_to_renderer(&mut r);
    assert_eq!(r.log.last().map(String::as_str), Some("unrotate"));
}

#[test]
fn write_to_renderer_pushes_drawing_then_text() {
    let mut r = Recorder::default();
    Style::default().write_to_renderer(&mut r);
    let stroke_at = r.log.iter().position(|l| l.starts_with("stroke "));
    let size_at = r.log.iter().position(|l| l.starts_with("font size"));
    assert!(stroke_at < size_at, "{:?}", r.log);
}
