use crate::config::model::LayerConfig;

/// Stacking decision for one scene container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LayerState {
    /// Stacking order; demoted by one below the base when the scene is fading out of view.
    pub z_index: i32,
    /// Whether the container should be drawn at all.
    pub visible: bool,
}

/// Turns opacity into stacking order so a fading scene never occludes the dominant one.
#[derive(Clone, Copy, Debug)]
pub struct LayerResolver {
    cfg: LayerConfig,
}

impl LayerResolver {
    /// Build a resolver from layer tuning.
    pub fn new(cfg: LayerConfig) -> Self {
        Self { cfg }
    }

    /// Deterministic base z for the scene at registry `index`.
    pub fn base_z(&self, index: usize) -> i32 {
        i32::try_from(index)
            .unwrap_or(i32::MAX)
            .saturating_mul(self.cfg.z_spacing)
    }

    /// Resolve `opacity` against `base_z`.
    pub fn resolve(&self, opacity: f64, base_z: i32) -> LayerState {
        let visible = opacity > self.cfg.visible_epsilon;
        let z_index = if opacity > self.cfg.dominant_threshold {
            base_z
        } else {
            base_z.saturating_sub(1)
        };
        LayerState { z_index, visible }
    }

    /// Resolve the scene at registry `index`.
    pub fn resolve_scene(&self, opacity: f64, index: usize) -> LayerState {
        self.resolve(opacity, self.base_z(index))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/resolver.rs"]
mod tests;
