use super::*;

const ALL: [Ease; 4] = [
    Ease::Linear,
    Ease::InOutQuad,
    Ease::InOutCubic,
    Ease::InOutSine,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn cubic_matches_reference_curve() {
    assert!((Ease::InOutCubic.apply(0.25) - 0.0625).abs() < 1e-12);
    assert!((Ease::InOutCubic.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((Ease::InOutCubic.apply(0.75) - 0.9375).abs() < 1e-12);
}

#[test]
fn out_of_range_input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), ease.apply(0.0));
        assert_eq!(ease.apply(7.0), ease.apply(1.0));
        assert_eq!(ease.apply(f64::NAN), ease.apply(0.0));
    }
}

#[test]
fn complementary_pair_sums_to_one() {
    for i in 0..=20 {
        let t = f64::from(i) / 20.0;
        let sum = sine_fade_in(t) + cosine_fade_out(t);
        assert!((sum - 1.0).abs() < 1e-12, "t={t} sum={sum}");
    }
    assert!(sine_fade_in(0.0).abs() < 1e-12);
    assert!((cosine_fade_out(0.0) - 1.0).abs() < 1e-12);
    assert!(cosine_fade_out(1.0).abs() < 1e-12);
}

#[test]
fn ease_serde_names() {
    let s = serde_json::to_string(&Ease::InOutCubic).unwrap();
    assert_eq!(s, "\"in_out_cubic\"");
}
