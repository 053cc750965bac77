use super::*;
use crate::test_support::host_fonts;

#[test]
fn registered_font_reports_family_and_size() {
    let Some(fonts) = host_fonts(75.0, 40.0, 55.0) else {
        eprintln!("skipping: no system font found");
        return;
    };

    let mut engine = TextLayoutEngine::new();
    let set = FontSet::load(&mut engine, &fonts).unwrap();
    assert!(!set.body.family.trim().is_empty());
    assert_eq!(set.title.size_px, 75.0);
    assert_eq!(set.marker.size_px, 55.0);
}

#[test]
fn layout_line_produces_glyphs_on_one_line() {
    let Some(fonts) = host_fonts(75.0, 40.0, 55.0) else {
        eprintln!("skipping: no system font found");
        return;
    };

    let mut engine = TextLayoutEngine::new();
    let set = FontSet::load(&mut engine, &fonts).unwrap();
    let layout = engine.layout_line("Artist - Song", &set.body, Rgb8::WHITE.into());
    assert_eq!(layout.lines().count(), 1);
    assert!(layout.width() > 0.0);
    assert!(layout.height() > 0.0);
}

#[test]
fn missing_font_file_is_a_render_error() {
    let mut engine = TextLayoutEngine::new();
    let fonts = FontsConfig {
        title: FontSpec::new("/no/such/font.ttf", 75.0),
        ..FontsConfig::default()
    };
    let err = FontSet::load(&mut engine, &fonts).unwrap_err();
    assert!(matches!(err, PlaylistError::Render(_)));
    assert!(err.to_string().contains("/no/such/font.ttf"));
}

#[test]
fn garbage_bytes_are_rejected() {
    let mut engine = TextLayoutEngine::new();
    assert!(engine.register(b"not a font".to_vec(), 40.0).is_err());
}

#[test]
fn non_positive_size_is_rejected() {
    let mut engine = TextLayoutEngine::new();
    assert!(engine.register(Vec::new(), 0.0).is_err());
}

#[test]
fn brush_from_rgb_is_opaque() {
    let brush: TextBrushRgba8 = Rgb8::new(1, 2, 3).into();
    assert_eq!(brush, TextBrushRgba8 { r: 1, g: 2, b: 3, a: 255 });
}
