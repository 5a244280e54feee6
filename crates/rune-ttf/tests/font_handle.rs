#![cfg(feature = "native")]

use std::path::PathBuf;

use rune_ttf::{Color, Library, PixelFormat, Surface, TtfError, Value};
use tempfile::TempDir;

const SIZE: u32 = 24;

fn font_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ahem.ttf");
    std::fs::write(&path, font_test_data::AHEM).unwrap();
    (dir, path)
}

fn color_values(c: Color) -> Value {
    Value::from(c)
}

fn alpha_at(surface: &Surface, x: u32, y: u32) -> u8 {
    surface.pixel(x, y).unwrap()[3]
}

/// Alpha-weighted mean x of row `y`, `None` when the row has no ink.
fn row_centroid(surface: &Surface, y: u32) -> Option<f64> {
    let (mut sum, mut weight) = (0.0, 0.0);
    for x in 0..surface.width() {
        let a = f64::from(alpha_at(surface, x, y));
        sum += a * f64::from(x);
        weight += a;
    }
    (weight > 0.0).then(|| sum / weight)
}

#[test]
fn test_version_reports_compiled_layer() {
    assert!(rune_ttf::is_usable());
    assert_ne!(rune_ttf::version().as_tuple(), (0, 0, 0));
}

#[test]
fn test_open_before_setup_fails() {
    let (_dir, path) = font_file();
    let library = Library::new();
    assert!(!library.was_init());
    let err = library.open(&path, SIZE).unwrap_err();
    assert!(matches!(err, TtfError::Initialization(_)), "{err:?}");
}

#[test]
fn test_open_after_quit_fails_and_setup_again_recovers() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    library.quit();
    assert!(matches!(
        library.open(&path, SIZE),
        Err(TtfError::Initialization(_))
    ));

    library.setup().unwrap();
    assert!(library.open(&path, SIZE).is_ok());
}

#[test]
fn test_quit_twice_is_noop() {
    let library = Library::new();
    library.quit();
    library.setup().unwrap();
    library.quit();
    library.quit();
    assert!(!library.was_init());
}

#[test]
fn test_open_missing_and_invalid_files() {
    let library = Library::init().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("nope.ttf");
    match library.open(&missing, SIZE) {
        Err(TtfError::ResourceLoad { origin, .. }) => assert!(origin.ends_with("nope.ttf")),
        other => panic!("expected ResourceLoad, got {other:?}"),
    }

    let garbage = dir.path().join("garbage.ttf");
    std::fs::write(&garbage, b"definitely not a font").unwrap();
    assert!(matches!(
        library.open(&garbage, SIZE),
        Err(TtfError::ResourceLoad { .. })
    ));

    assert!(matches!(
        library.open_bytes(font_test_data::AHEM, 0),
        Err(TtfError::Argument(_))
    ));
}

#[test]
fn test_style_setters_return_previous_value() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let mut font = library.open(&path, SIZE).unwrap();

    assert!(!font.bold().unwrap());
    assert!(!font.set_bold(true).unwrap());
    assert!(font.bold().unwrap());
    assert!(font.set_bold(true).unwrap());
    assert!(font.set_bold(false).unwrap());
    assert!(!font.bold().unwrap());

    assert!(!font.set_italic(true).unwrap());
    assert!(font.italic().unwrap());
    assert!(!font.set_underline(true).unwrap());
    assert!(font.underline().unwrap());

    // independent bits
    assert!(!font.bold().unwrap());
    assert!(font.set_italic(false).unwrap());
    assert!(font.underline().unwrap());
}

#[test]
fn test_metrics_are_consistent() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let font = library.open(&path, SIZE).unwrap();

    let ascent = font.ascent().unwrap();
    let descent = font.descent().unwrap();
    assert!(ascent > 0);
    assert!(descent <= 0);
    assert_eq!(font.height().unwrap(), ascent - descent + 1);
    assert!(font.line_skip().unwrap() > 0);
    assert_eq!(font.metrics().unwrap().ascent, ascent);
}

#[test]
fn test_render_needs_three_inputs() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let font = library.open(&path, SIZE).unwrap();

    for args in [
        vec![],
        vec![Value::from("hi")],
        vec![Value::from("hi"), Value::Bool(true)],
    ] {
        assert!(matches!(
            font.render_values(&args),
            Err(TtfError::Argument(_))
        ));
    }

    let ok = font.render_values(&[
        Value::from("hi"),
        Value::Bool(true),
        color_values(Color::WHITE),
    ]);
    assert!(ok.is_ok());
}

#[test]
fn test_render_mode_matrix() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let font = library.open(&path, SIZE).unwrap();
    let fg = Color::rgb(250, 250, 250);
    let bg = Color::rgb(0, 0, 90);

    let blended = font.render("Hi", true, fg, None).unwrap();
    assert_eq!(blended.format(), PixelFormat::Rgba32);
    assert_eq!(blended.height() as i32, font.height().unwrap());

    let shaded = font.render("Hi", true, fg, Some(bg)).unwrap();
    assert_eq!(shaded.format(), PixelFormat::Indexed8);
    assert_eq!(shaded.color_key(), None);
    assert_eq!(shaded.palette().unwrap()[0], bg);
    assert_eq!(shaded.palette().unwrap()[255], fg);

    let solid = font.render("Hi", false, fg, None).unwrap();
    assert_eq!(solid.format(), PixelFormat::Indexed8);
    assert_eq!(solid.color_key(), Some(0));

    let opaque = font.render("Hi", false, fg, Some(bg)).unwrap();
    assert_eq!(opaque.color_key(), None);
    assert!(opaque.is_opaque());
    assert_eq!(opaque.palette().unwrap()[0], bg);
}

#[test]
fn test_render_values_background() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let font = library.open(&path, SIZE).unwrap();

    let keyed = font
        .render_values(&[
            Value::from("x"),
            Value::Nil,
            color_values(Color::WHITE),
            Value::Nil,
        ])
        .unwrap();
    assert_eq!(keyed.color_key(), Some(0));

    let opaque = font
        .render_values(&[
            Value::from("x"),
            Value::Bool(false),
            color_values(Color::WHITE),
            color_values(Color::BLACK),
        ])
        .unwrap();
    assert_eq!(opaque.color_key(), None);
    assert!(opaque.is_opaque());
}

#[test]
fn test_render_empty_text_fails() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let font = library.open(&path, SIZE).unwrap();
    let err = font.render("", true, Color::WHITE, None).unwrap_err();
    assert!(matches!(err, TtfError::Render(_)));
    assert!(err.to_string().contains("zero width"));
}

#[test]
fn test_underline_draws_full_width_bar() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let mut font = library.open(&path, SIZE).unwrap();
    font.set_underline(true).unwrap();

    let surface = font.render("Hi", true, Color::WHITE, None).unwrap();
    let has_bar = (0..surface.height()).any(|y| {
        (0..surface.width()).all(|x| surface.pixel(x, y).map(|p| p[3]) == Some(255))
    });
    assert!(has_bar);
}

#[test]
fn test_size_text_matches_render() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let font = library.open(&path, SIZE).unwrap();

    let surface = font.render("Hi", true, Color::WHITE, None).unwrap();
    assert_eq!(
        font.size_text("Hi").unwrap(),
        (surface.width(), surface.height())
    );
    assert_eq!(font.size_text("").unwrap().0, 0);
}

#[test]
fn test_use_after_close() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let mut font = library.open(&path, SIZE).unwrap();

    font.close().unwrap();
    assert!(font.is_closed());
    assert!(matches!(font.bold(), Err(TtfError::UseAfterClose)));
    assert!(matches!(font.set_italic(true), Err(TtfError::UseAfterClose)));
    assert!(matches!(font.height(), Err(TtfError::UseAfterClose)));
    assert!(matches!(font.line_skip(), Err(TtfError::UseAfterClose)));
    assert!(matches!(
        font.render("x", true, Color::WHITE, None),
        Err(TtfError::UseAfterClose)
    ));
    assert!(matches!(font.close(), Err(TtfError::UseAfterClose)));
}

#[test]
fn test_fonts_stop_working_after_quit() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let font = library.open(&path, SIZE).unwrap();

    library.quit();
    assert!(matches!(
        font.render("x", true, Color::WHITE, None),
        Err(TtfError::Initialization(_))
    ));
    library.setup().unwrap();
    assert!(font.render("x", true, Color::WHITE, None).is_ok());
}

#[test]
fn test_open_values() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let path = path.to_string_lossy().into_owned();

    assert!(matches!(
        library.open_values(&[Value::from(path.as_str())]),
        Err(TtfError::Argument(_))
    ));
    assert!(matches!(
        library.open_values(&[Value::from(path.as_str()), Value::Int(-3)]),
        Err(TtfError::Argument(_))
    ));
    let font = library
        .open_values(&[Value::from(path.as_str()), Value::Int(12)])
        .unwrap();
    assert_eq!(font.point_size(), 12);
}

#[test]
fn test_surface_saves_png() {
    let (dir, path) = font_file();
    let library = Library::init().unwrap();
    let font = library.open(&path, SIZE).unwrap();
    let surface = font
        .render("Hi", false, Color::WHITE, Some(Color::BLACK))
        .unwrap();

    let out = dir.path().join("hi.png");
    surface.save_png(&out).unwrap();
    let decoded = image::open(&out).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (surface.width(), surface.height()));
    assert!(decoded.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn test_blended_glyphs_have_ink() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let font = library.open(&path, SIZE).unwrap();

    let surface = font.render("X X", true, Color::WHITE, None).unwrap();
    let ink = surface
        .pixels()
        .chunks_exact(4)
        .filter(|px| px[3] > 0)
        .count();
    assert!(ink > 0);

    // solid box under the first glyph, nothing under the space
    let mid = SIZE / 2;
    assert_eq!(alpha_at(&surface, mid, mid), 255);
    assert_eq!(alpha_at(&surface, SIZE + mid, mid), 0);
    assert_eq!(surface.pixel(mid, mid), Some([255, 255, 255, 255]));
}

#[test]
fn test_solid_glyphs_use_two_indices() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let font = library.open(&path, SIZE).unwrap();

    let surface = font.render("X X", false, Color::WHITE, None).unwrap();
    assert!(surface.pixels().iter().all(|&i| i <= 1));
    assert!(surface.pixels().contains(&1));
    assert!(surface.pixels().contains(&0));
    assert_eq!(surface.pixel(SIZE / 2, SIZE / 2), Some([255, 255, 255, 255]));
}

#[test]
fn test_shaded_glyphs_span_the_ramp() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let font = library.open(&path, SIZE).unwrap();
    let bg = Color::rgb(0, 0, 90);

    let surface = font.render("X X", true, Color::WHITE, Some(bg)).unwrap();
    assert!(surface.pixels().contains(&255));
    assert!(surface.pixels().contains(&0));
    assert_eq!(surface.pixel(SIZE / 2, SIZE / 2), Some([255, 255, 255, 255]));
    assert_eq!(surface.pixel(SIZE + SIZE / 2, SIZE / 2), Some([0, 0, 90, 255]));
}

#[test]
fn test_bold_widens_glyphs() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let mut font = library.open(&path, SIZE).unwrap();

    let plain = font.render("X", true, Color::WHITE, None).unwrap();
    let plain_advance = font.glyph_metrics('X').unwrap().unwrap().advance;
    font.set_bold(true).unwrap();
    let bold = font.render("X", true, Color::WHITE, None).unwrap();
    let bold_advance = font.glyph_metrics('X').unwrap().unwrap().advance;

    assert!(bold.width() > plain.width(), "{} vs {}", bold.width(), plain.width());
    assert!(bold_advance > plain_advance);
}

#[test]
fn test_italic_leans_right() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let mut font = library.open(&path, SIZE).unwrap();
    font.set_italic(true).unwrap();

    let surface = font.render("X", true, Color::WHITE, None).unwrap();
    let inked: Vec<u32> = (0..surface.height())
        .filter(|&y| row_centroid(&surface, y).is_some())
        .collect();
    let top = row_centroid(&surface, inked[1]).unwrap();
    let bottom = row_centroid(&surface, inked[inked.len() - 2]).unwrap();
    assert!(top > bottom + 1.0, "top {top} bottom {bottom}");
}

#[test]
fn test_glyph_metrics() {
    let (_dir, path) = font_file();
    let library = Library::init().unwrap();
    let font = library.open(&path, SIZE).unwrap();

    let m = font.glyph_metrics('X').unwrap().unwrap();
    assert_eq!(m.advance, SIZE as i32);
    assert!(m.max_x > m.min_x);
    assert!(m.max_y > 0);
    assert!(m.min_y < 0);
}

#[test]
fn test_oversized_render_is_render_error() {
    let library = Library::init().unwrap();
    let font = library.open_bytes(font_test_data::AHEM, 40_000).unwrap();

    let err = font.render("HH", true, Color::WHITE, None).unwrap_err();
    assert!(matches!(err, TtfError::Render(_)), "{err:?}");
    assert!(err.to_string().contains("Out of memory"));
    assert!(matches!(font.size_text("HH"), Err(TtfError::Render(_))));
}
