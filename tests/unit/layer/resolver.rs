use super::*;

fn resolver() -> LayerResolver {
    LayerResolver::new(LayerConfig::default())
}

#[test]
fn base_z_is_spaced_by_registry_position() {
    let r = resolver();
    assert_eq!(r.base_z(0), 0);
    assert_eq!(r.base_z(1), 10);
    assert_eq!(r.base_z(6), 60);
    assert_eq!(r.base_z(usize::MAX), i32::MAX);
}

#[test]
fn faint_scene_is_demoted_below_its_base() {
    let r = resolver();
    assert_eq!(
        r.resolve(0.8, 20),
        LayerState {
            z_index: 20,
            visible: true
        }
    );
    assert_eq!(
        r.resolve(0.05, 20),
        LayerState {
            z_index: 19,
            visible: true
        }
    );
    assert_eq!(
        r.resolve(0.005, 20),
        LayerState {
            z_index: 19,
            visible: false
        }
    );
    assert_eq!(r.resolve(0.0, 0).z_index, -1);
}

#[test]
fn thresholds_are_strict() {
    let r = resolver();
    assert!(!r.resolve(0.01, 0).visible);
    assert_eq!(r.resolve(0.1, 10).z_index, 9);
}

#[test]
fn custom_spacing_is_respected() {
    let r = LayerResolver::new(LayerConfig {
        z_spacing: 100,
        ..LayerConfig::default()
    });
    assert_eq!(r.resolve_scene(1.0, 3).z_index, 300);
    assert_eq!(r.resolve_scene(0.0, 3).z_index, 299);
}
