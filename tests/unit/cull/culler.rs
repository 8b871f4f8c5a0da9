use super::*;
use crate::scene::descriptor::SceneDescriptor;

fn scenario_registry() -> SceneRegistry {
    SceneRegistry::new(vec![
        SceneDescriptor::new("dormant", 0.0, 0.05, 0.02, 0.8),
        SceneDescriptor::new("awakening", 0.05, 0.15, 0.02, 1.0),
        SceneDescriptor::new("flight", 0.15, 0.8, 0.02, 1.2),
    ])
    .unwrap()
}

fn two_scene_registry() -> SceneRegistry {
    SceneRegistry::new(vec![
        SceneDescriptor::new("a", 0.0, 0.2, 0.02, 0.0),
        SceneDescriptor::new("b", 0.2, 1.0, 0.02, 0.0),
    ])
    .unwrap()
}

#[test]
fn active_scene_is_always_mounted() {
    let reg = scenario_registry();
    let culler = MountCuller::new(&reg, CullingConfig::default());
    for p in [0.0, 0.5, 1.0] {
        for active in 0..reg.len() {
            assert!(culler.should_mount(active, active, p, false));
        }
    }
}

#[test]
fn distant_scene_unmounts_in_scenario() {
    let reg = scenario_registry();
    let mut culler = MountCuller::new(&reg, CullingConfig::default());

    let diff = culler.update(0, 0.04);
    assert_eq!(diff.mounted, vec![0, 1]);
    assert!(culler.is_mounted(0));

    let active = reg.locate(0.5).scene_index;
    let diff = culler.update(active, 0.5);
    assert!(!culler.is_mounted(0));
    assert!(diff.unmounted.contains(&0));
    assert!(culler.is_mounted(2));
    let set = culler.mount_set(&reg);
    assert!(set.contains("flight"));
    assert!(!set.contains("dormant"));
}

#[test]
fn jitter_near_threshold_does_not_flip_mount_state() {
    let reg = two_scene_registry();
    let cfg = CullingConfig::default();
    let mut culler = MountCuller::new(&reg, cfg);

    culler.update(1, 0.3);
    assert!(!culler.is_mounted(0));

    let diff = culler.update(1, 0.24);
    assert_eq!(diff.mounted, vec![0]);
    let mounted_at = culler.distance_vh(0, 0.24);
    assert!(mounted_at < cfg.threshold_vh + cfg.mount_buffer_vh);

    for p in [0.245, 0.26, 0.25, 0.262, 0.243, 0.265, 0.255] {
        let diff = culler.update(1, p);
        assert!(diff.is_empty(), "flipped at p={p}");
        assert!(culler.is_mounted(0));
    }

    let diff = culler.update(1, 0.27);
    assert_eq!(diff.unmounted, vec![0]);
    assert!(culler.distance_vh(0, 0.27) >= cfg.threshold_vh + cfg.unmount_buffer_vh);

    for p in [0.25, 0.26, 0.245] {
        assert!(culler.update(1, p).is_empty(), "remounted at p={p}");
        assert!(!culler.is_mounted(0));
    }
}

#[test]
fn unmount_all_reports_previous_mounts() {
    let reg = scenario_registry();
    let mut culler = MountCuller::new(&reg, CullingConfig::default());
    culler.update(1, 0.1);
    let released = culler.unmount_all();
    assert!(released.contains(&1));
    assert!(culler.mount_set(&reg).is_empty());
}

#[test]
fn unknown_index_is_infinitely_far() {
    let reg = scenario_registry();
    let culler = MountCuller::new(&reg, CullingConfig::default());
    assert!(culler.distance_vh(17, 0.5).is_infinite());
    assert!(!culler.should_mount(17, 0, 0.5, true));
}
