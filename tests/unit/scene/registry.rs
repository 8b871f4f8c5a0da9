use super::*;

fn scenario() -> SceneRegistry {
    SceneRegistry::new(vec![
        SceneDescriptor::new("dormant", 0.0, 0.05, 0.02, 0.8),
        SceneDescriptor::new("awakening", 0.05, 0.15, 0.02, 1.0),
        SceneDescriptor::new("flight", 0.15, 0.8, 0.02, 1.2),
    ])
    .unwrap()
}

#[test]
fn locate_picks_first_containing_scene() {
    let reg = scenario();
    let a = reg.locate(0.04);
    assert_eq!(a.scene_index, 0);
    assert!((a.scene_progress - 0.8).abs() < 1e-9);

    let a = reg.locate(0.05);
    assert_eq!(a.scene_index, 1);
    assert_eq!(a.scene_progress, 0.0);

    let a = reg.locate(0.5);
    assert_eq!(reg.get(a.scene_index).unwrap().key, "flight");
}

#[test]
fn uncovered_progress_falls_back_to_last_scene() {
    let reg = scenario();
    let a = reg.locate(0.95);
    assert_eq!(a.scene_index, 2);
    assert_eq!(a.scene_progress, 1.0);

    let a = reg.locate(1.0);
    assert_eq!(a.scene_index, 2);
    assert_eq!(a.scene_progress, 1.0);
}

#[test]
fn gap_before_last_scene_reports_completed_progress() {
    let reg = SceneRegistry::new(vec![
        SceneDescriptor::new("a", 0.0, 0.3, 0.02, 0.0),
        SceneDescriptor::new("b", 0.5, 1.0, 0.02, 0.0),
    ])
    .unwrap();
    let a = reg.locate(0.4);
    assert_eq!(a.scene_index, 1);
    assert_eq!(a.scene_progress, 1.0);

    let a = reg.locate(0.75);
    assert_eq!(a.scene_index, 1);
    assert_eq!(a.scene_progress, 0.5);
}

#[test]
fn every_progress_has_exactly_one_active_scene_with_bounded_progress() {
    let reg = scenario();
    for i in 0..=1000 {
        let p = f64::from(i) / 1000.0;
        let a = reg.locate(p);
        assert!(a.scene_index < reg.len());
        assert!((0.0..=1.0).contains(&a.scene_progress), "p={p}");
    }
    for p in [-0.5, 1.5, f64::NAN] {
        let a = reg.locate(p);
        assert!((0.0..=1.0).contains(&a.scene_progress));
    }
}

#[test]
fn overlapping_ranges_prefer_earlier_scene() {
    let reg = SceneRegistry::new(vec![
        SceneDescriptor::new("a", 0.0, 0.52, 0.02, 0.0),
        SceneDescriptor::new("b", 0.5, 1.0, 0.02, 0.0),
    ])
    .unwrap();
    assert_eq!(reg.locate(0.51).scene_index, 0);
    assert_eq!(reg.locate(0.52).scene_index, 1);
}

#[test]
fn construction_rejects_invalid_tables() {
    assert!(SceneRegistry::new(vec![]).is_err());
    assert!(
        SceneRegistry::new(vec![
            SceneDescriptor::new("a", 0.0, 0.5, 0.02, 0.0),
            SceneDescriptor::new("a", 0.5, 1.0, 0.02, 0.0),
        ])
        .is_err()
    );
    assert!(
        SceneRegistry::new(vec![
            SceneDescriptor::new("a", 0.5, 1.0, 0.02, 0.0),
            SceneDescriptor::new("b", 0.0, 0.5, 0.02, 0.0),
        ])
        .is_err()
    );
}

#[test]
fn key_lookup() {
    let reg = scenario();
    assert_eq!(reg.index_of("awakening"), Some(1));
    assert_eq!(reg.by_key("flight").unwrap().range.end, 0.8);
    assert!(reg.index_of("missing").is_none());
    assert_eq!(reg.last_index(), 2);
}
