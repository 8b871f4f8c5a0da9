use super::*;

#[test]
fn unknown_scene_uses_fallback() {
    let t = ParticleTable::builtin();
    assert_eq!(
        t.select("not-a-scene", DeviceClass::Desktop),
        t.fallback.desktop
    );
    assert_eq!(t.select("", DeviceClass::Mobile), t.fallback.mobile);
}

#[test]
fn device_class_picks_variant() {
    let t = ParticleTable::builtin();
    let m = t.select("nebula", DeviceClass::Mobile);
    let d = t.select("nebula", DeviceClass::Desktop);
    assert_eq!(m.density, 1000);
    assert_eq!(d.density, 2600);
}

#[test]
fn mobile_is_never_more_expensive_than_desktop() {
    let t = ParticleTable::builtin();
    for (key, p) in t.scenes.iter().chain([(&"fallback".to_string(), &t.fallback)]) {
        assert!(p.mobile.density <= p.desktop.density, "{key}");
        assert!(p.mobile.fps <= p.desktop.fps, "{key}");
        assert!(p.mobile.glow <= p.desktop.glow, "{key}");
    }
}

#[test]
fn fast_scenes_trade_density_for_frame_rate() {
    let t = ParticleTable::builtin();
    for device in [DeviceClass::Mobile, DeviceClass::Desktop] {
        let slow = t.select("deep_field", device);
        let fast = t.select("ascent", device);
        assert!(fast.fps > slow.fps);
        assert!(fast.density < slow.density);
        assert!(fast.speed > slow.speed);
    }
}

#[test]
fn builtin_table_is_valid_and_validation_catches_bad_values() {
    let mut t = ParticleTable::builtin();
    t.validate().unwrap();

    t.fallback.desktop.fps = 0;
    assert!(t.validate().is_err());

    let mut t = ParticleTable::builtin();
    if let Some(p) = t.scenes.get_mut("orbit") {
        p.mobile.glow = 1.5;
    }
    let err = t.validate().unwrap_err();
    assert!(err.to_string().contains("particles.orbit.mobile"));
}

#[test]
fn selection_is_pure() {
    let t = ParticleTable::builtin();
    let a = t.select("orbit", DeviceClass::Desktop);
    let b = t.select("orbit", DeviceClass::Desktop);
    assert_eq!(a, b);
}
