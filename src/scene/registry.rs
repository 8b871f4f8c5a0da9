use std::collections::HashMap;

use crate::foundation::error::{CinescrollError, CinescrollResult};
use crate::foundation::math::clamp_unit;
use crate::scene::descriptor::SceneDescriptor;

/// Which scene is the current chapter, and how far into it the viewer is.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ActiveSceneState {
    /// Index into the registry.
    pub scene_index: usize,
    /// Intra-scene progress in `[0, 1]`.
    pub scene_progress: f64,
}

/// Ordered, validated scene table.
///
/// Built once at startup and read-only afterwards.
#[derive(Clone, Debug)]
pub struct SceneRegistry {
    scenes: Vec<SceneDescriptor>,
    by_key: HashMap<String, usize>,
}

impl SceneRegistry {
    /// Validate and index a scene table.
    pub fn new(scenes: Vec<SceneDescriptor>) -> CinescrollResult<Self> {
        if scenes.is_empty() {
            return Err(CinescrollError::validation(
                "scene registry must contain at least one scene",
            ));
        }

        let mut by_key = HashMap::with_capacity(scenes.len());
        let mut prev_start = f64::NEG_INFINITY;
        for (i, scene) in scenes.iter().enumerate() {
            scene.validate()?;
            if scene.range.start < prev_start {
                return Err(CinescrollError::validation(format!(
                    "scene '{}' starts before the previous scene; ranges must be ordered",
                    scene.key
                )));
            }
            prev_start = scene.range.start;
            if by_key.insert(scene.key.clone(), i).is_some() {
                return Err(CinescrollError::validation(format!(
                    "duplicate scene key '{}'",
                    scene.key
                )));
            }
        }

        Ok(Self { scenes, by_key })
    }

    /// Number of scenes (always at least one).
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always `false` for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scenes in registry order.
    pub fn scenes(&self) -> &[SceneDescriptor] {
        &self.scenes
    }

    /// Scene at `index`.
    pub fn get(&self, index: usize) -> Option<&SceneDescriptor> {
        self.scenes.get(index)
    }

    /// Registry index of `key`.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    /// Scene by key.
    pub fn by_key(&self, key: &str) -> Option<&SceneDescriptor> {
        self.index_of(key).map(|i| &self.scenes[i])
    }

    /// Index of the final scene, used as the fallback chapter.
    pub fn last_index(&self) -> usize {
        self.scenes.len() - 1
    }

    /// Map global progress to the active scene.
    ///
    /// The first scene whose `[start, end)` contains `progress` wins. Progress not covered by any
    /// range (a gap, or exactly `1.0`) falls back to the last scene with `scene_progress = 1`.
    pub fn locate(&self, progress: f64) -> ActiveSceneState {
        let progress = clamp_unit(progress);
        match self.scenes.iter().position(|s| s.range.contains(progress)) {
            Some(scene_index) => ActiveSceneState {
                scene_index,
                scene_progress: self.scenes[scene_index].range.local_progress(progress),
            },
            None => ActiveSceneState {
                scene_index: self.last_index(),
                scene_progress: 1.0,
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/registry.rs"]
mod tests;
