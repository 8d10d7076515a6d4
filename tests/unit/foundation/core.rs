use super::*;

#[test]
fn track_bounds_rejects_bad_values() {
    assert!(TrackBounds::new(f64::NAN, 10.0).is_err());
    assert!(TrackBounds::new(0.0, -1.0).is_err());
    assert!(TrackBounds::new(-50.0, 300.0).is_ok());
}

#[test]
fn at_scroll_moves_top_up() {
    let b = TrackBounds::at_scroll(200.0, 1000.0, 350.0);
    assert_eq!(b.top, -150.0);
    assert_eq!(b.bottom(), 850.0);
}

#[test]
fn viewport_validates() {
    assert!(Viewport::new(1280.0, 720.0).is_ok());
    assert!(Viewport::new(-1.0, 720.0).is_err());
    assert!(Viewport::new(1280.0, f64::INFINITY).is_err());
}
