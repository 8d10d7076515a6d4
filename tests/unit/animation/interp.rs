use super::*;

#[test]
fn midpoint_and_clamping() {
    assert_eq!(interpolate(0.5, &[0.0, 1.0], &[0.0, 1.0]), 0.5);
    assert_eq!(interpolate(-1.0, &[0.0, 1.0], &[0.0, 100.0]), 0.0);
    assert_eq!(interpolate(2.0, &[0.0, 1.0], &[0.0, 100.0]), 100.0);
}

#[test]
fn picks_the_bracketing_segment() {
    let input = [0.0, 0.25, 0.5, 1.0];
    let output = [0.0, 90.0, 90.0, 0.0];
    assert_eq!(interpolate(0.125, &input, &output), 45.0);
    assert_eq!(interpolate(0.25, &input, &output), 90.0);
    assert_eq!(interpolate(0.4, &input, &output), 90.0);
    assert_eq!(interpolate(0.75, &input, &output), 45.0);
}

#[test]
fn decreasing_outputs_are_fine() {
    assert_eq!(interpolate(0.25, &[0.0, 1.0], &[1.0, 0.0]), 0.75);
}

#[test]
fn zero_width_segment_steps() {
    let input = [0.0, 0.5, 0.5, 1.0];
    let output = [0.0, 0.0, 10.0, 10.0];
    assert_eq!(interpolate(0.49, &input, &output), 0.0);
    assert_eq!(interpolate(0.51, &input, &output), 10.0);
}

#[test]
fn nan_clamps_to_first_output() {
    assert_eq!(interpolate(f64::NAN, &[0.0, 1.0], &[3.0, 7.0]), 3.0);
}

#[test]
fn stays_within_monotonic_output_bounds() {
    let input = [0.1, 0.3, 0.6, 0.9];
    let output = [-20.0, 0.0, 5.0, 40.0];
    let mut prev = f64::NEG_INFINITY;
    for i in -20..=120 {
        let v = interpolate(f64::from(i) / 100.0, &input, &output);
        assert!((-20.0..=40.0).contains(&v));
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn lies_on_segment_between_breakpoints() {
    let input = [0.0, 0.2, 1.0];
    let output = [10.0, -10.0, 30.0];
    for x in [0.05, 0.1, 0.15] {
        let expected = 10.0 + (-20.0) * (x / 0.2);
        assert!((interpolate(x, &input, &output) - expected).abs() < 1e-12);
    }
    for x in [0.3, 0.6, 0.9] {
        let expected = -10.0 + 40.0 * ((x - 0.2) / 0.8);
        assert!((interpolate(x, &input, &output) - expected).abs() < 1e-12);
    }
}

#[test]
fn ranges_validation() {
    assert!(Ranges::new(vec![0.0], vec![1.0]).is_err());
    assert!(Ranges::new(vec![0.0, 1.0], vec![1.0]).is_err());
    assert!(Ranges::new(vec![1.0, 0.0], vec![0.0, 1.0]).is_err());
    assert!(Ranges::new(vec![0.0, f64::NAN], vec![0.0, 1.0]).is_err());
    let r = Ranges::new(vec![0.2, 0.8], vec![0.0, 360.0]).unwrap();
    assert_eq!(r.domain(), (0.2, 0.8));
    assert_eq!(r.sample(0.5), 180.0);
}

#[test]
fn ranges_deserialize_runs_validation() {
    let ok: Ranges = serde_json::from_str(r#"{"input":[0,1],"output":[0,5]}"#).unwrap();
    assert_eq!(ok.sample(1.0), 5.0);
    let bad = serde_json::from_str::<Ranges>(r#"{"input":[1,0],"output":[0,5]}"#);
    assert!(bad.is_err());
}

#[test]
fn eased_sampling_keeps_endpoints() {
    let r = Ranges::new(vec![0.0, 1.0], vec![0.0, 10.0]).unwrap();
    assert_eq!(r.sample_eased(0.0, Ease::InOutCubic), 0.0);
    assert_eq!(r.sample_eased(1.0, Ease::InOutCubic), 10.0);
    assert!(r.sample_eased(0.25, Ease::InQuad) < r.sample(0.25));
}
