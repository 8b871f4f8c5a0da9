use crate::config::model::CullingConfig;
use crate::foundation::math::clamp_unit;
use crate::scene::registry::SceneRegistry;

/// Keys of the scenes that are currently instantiated, in registry order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct MountSet(Vec<String>);

impl MountSet {
    /// Whether `key` is mounted.
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }

    /// Mounted keys in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of mounted scenes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Scenes whose mount state flipped during one update, by registry index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MountDiff {
    /// Newly instantiated scenes.
    pub mounted: Vec<usize>,
    /// Scenes to tear down; their effect handles must be released.
    pub unmounted: Vec<usize>,
}

impl MountDiff {
    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty() && self.unmounted.is_empty()
    }
}

/// Distance-based mount culling with direction-dependent buffers.
///
/// An unmounted scene mounts once it is closer than `threshold + mount_buffer`; a mounted
/// scene only unmounts once it is farther than `threshold + unmount_buffer`. The active scene
/// is always mounted.
#[derive(Clone, Debug)]
pub struct MountCuller {
    cfg: CullingConfig,
    midpoints: Vec<f64>,
    mounted: Vec<bool>,
}

impl MountCuller {
    /// Create a culler with nothing mounted.
    pub fn new(registry: &SceneRegistry, cfg: CullingConfig) -> Self {
        Self {
            cfg,
            midpoints: registry
                .scenes()
                .iter()
                .map(|s| s.range.midpoint())
                .collect(),
            mounted: vec![false; registry.len()],
        }
    }

    /// Distance from `progress` to the scene's range midpoint, in `vh` units.
    pub fn distance_vh(&self, index: usize, progress: f64) -> f64 {
        let Some(mid) = self.midpoints.get(index) else {
            return f64::INFINITY;
        };
        (clamp_unit(progress) - mid).abs() * self.cfg.total_scroll_vh
    }

    /// Mount decision for one scene given its current state.
    pub fn should_mount(
        &self,
        index: usize,
        active_index: usize,
        progress: f64,
        currently_mounted: bool,
    ) -> bool {
        if index == active_index {
            return true;
        }
        let buffer = if currently_mounted {
            self.cfg.unmount_buffer_vh
        } else {
            self.cfg.mount_buffer_vh
        };
        self.distance_vh(index, progress) < self.cfg.threshold_vh + buffer
    }

    /// Re-evaluate every scene and report what flipped.
    pub fn update(&mut self, active_index: usize, progress: f64) -> MountDiff {
        let mut diff = MountDiff::default();
        for i in 0..self.mounted.len() {
            let was = self.mounted[i];
            let now = self.should_mount(i, active_index, progress, was);
            if now != was {
                self.mounted[i] = now;
                if now {
                    diff.mounted.push(i);
                } else {
                    diff.unmounted.push(i);
                }
            }
        }
        diff
    }

    /// Whether the scene at `index` is mounted.
    pub fn is_mounted(&self, index: usize) -> bool {
        self.mounted.get(index).copied().unwrap_or(false)
    }

    /// Build the published mount set.
    pub fn mount_set(&self, registry: &SceneRegistry) -> MountSet {
        MountSet(
            registry
                .scenes()
                .iter()
                .zip(&self.mounted)
                .filter(|(_, m)| **m)
                .map(|(s, _)| s.key.clone())
                .collect(),
        )
    }

    /// Unmount everything, returning the indices that were mounted.
    pub fn unmount_all(&mut self) -> Vec<usize> {
        let out = (0..self.mounted.len())
            .filter(|&i| self.mounted[i])
            .collect();
        self.mounted.fill(false);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cull/culler.rs"]
mod tests;
