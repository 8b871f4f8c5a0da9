use super::*;

#[test]
fn clamp_unit_handles_out_of_range_and_nan() {
    assert_eq!(clamp_unit(-0.2), 0.0);
    assert_eq!(clamp_unit(1.0000001), 1.0);
    assert_eq!(clamp_unit(f64::NAN), 0.0);
    assert_eq!(clamp_unit(f64::INFINITY), 0.0);
    assert_eq!(clamp_unit(0.25), 0.25);
}

#[test]
fn inv_lerp_clamps_and_tolerates_degenerate_span() {
    assert_eq!(inv_lerp_clamped(0.0, 2.0, 1.0), 0.5);
    assert_eq!(inv_lerp_clamped(0.0, 2.0, -1.0), 0.0);
    assert_eq!(inv_lerp_clamped(0.0, 2.0, 3.0), 1.0);
    assert_eq!(inv_lerp_clamped(0.5, 0.5, 0.4), 0.0);
    assert_eq!(inv_lerp_clamped(0.5, 0.5, 0.5), 1.0);
}

#[test]
fn approx_eq_respects_tolerance() {
    assert!(approx_eq(1.0, 1.00005, 1e-4));
    assert!(!approx_eq(1.0, 1.001, 1e-4));
}
