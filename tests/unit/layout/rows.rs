use super::*;

fn layout(base: f64, row_height: f64, spacing: f64) -> RowLayout {
    RowLayout {
        origin: Point::new(300.0, base),
        row_height,
        row_spacing: spacing,
        title_offset: Vec2::new(-5.0, -100.0),
        marker_offset: Vec2::new(-65.0, -11.5),
    }
}

#[test]
fn position_matches_formula_exactly() {
    for (base, h, s) in [(300.0, 50.0, 0.0), (0.0, 1.0, 0.0), (120.0, 42.0, 7.5)] {
        let l = layout(base, h, s);
        for i in [0usize, 1, 2, 17, 250] {
            let expected = base + h * i as f64 + s * i as f64;
            assert_eq!(l.position_for(i), expected, "base={base} h={h} s={s} i={i}");
        }
    }
}

#[test]
fn positions_strictly_increase() {
    let l = layout(300.0, 50.0, 0.0);
    let mut prev = l.position_for(0);
    for i in 1..200 {
        let cur = l.position_for(i);
        assert!(cur > prev);
        prev = cur;
    }

    // Spacing alone is enough to separate rows.
    let l = layout(10.0, 0.0, 3.0);
    assert!(l.position_for(1) > l.position_for(0));
}

#[test]
fn defaults_place_title_and_marker_relative_to_rows() {
    let l = RowLayout::default();
    assert_eq!(l.title_position(), Point::new(295.0, 200.0));
    assert_eq!(l.label_position(0), Point::new(300.0, 300.0));
    assert_eq!(l.label_position(3), Point::new(300.0, 450.0));
    assert_eq!(l.marker_position(0), Point::new(235.0, 288.5));
    assert_eq!(l.marker_position(2), Point::new(235.0, 388.5));
}

#[test]
fn title_ignores_row_count() {
    let a = layout(300.0, 50.0, 0.0);
    let b = layout(300.0, 80.0, 20.0);
    assert_eq!(a.title_position(), b.title_position());
}
