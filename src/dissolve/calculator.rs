use std::collections::BTreeMap;

use crate::animation::ease::{Ease, cosine_fade_out, sine_fade_in};
use crate::config::model::DissolveConfig;
use crate::dissolve::policy::{EdgePolicy, FadeOverride, SceneFade, resolve_fades};
use crate::foundation::error::CinescrollResult;
use crate::foundation::math::{clamp_unit, inv_lerp_clamped};
use crate::scene::descriptor::{SceneDescriptor, SceneRange};
use crate::scene::registry::SceneRegistry;

/// Per-scene opacity in registry order, keyed by scene key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OpacityVector {
    entries: Vec<(String, f64)>,
}

impl OpacityVector {
    /// All-zero vector with one entry per registry scene.
    pub fn for_registry(registry: &SceneRegistry) -> Self {
        Self {
            entries: registry
                .scenes()
                .iter()
                .map(|s| (s.key.clone(), 0.0))
                .collect(),
        }
    }

    /// Opacity of the scene with `key`.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    /// Opacity by registry index.
    pub fn at(&self, index: usize) -> f64 {
        self.entries.get(index).map_or(0.0, |(_, v)| *v)
    }

    /// `(key, opacity)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of scenes covered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vector covers no scenes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl serde::Serialize for OpacityVector {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

/// Eased standard dissolve for `scene` at global `progress`.
///
/// Fade-in spans `[start - fade_zone, start + inner * fade_zone]` and fade-out spans
/// `[end - inner * fade_zone, end + fade_zone]`, so most of each ramp happens outside the
/// nominal range.
pub fn standard_opacity(progress: f64, scene: &SceneDescriptor, inner: f64, ease: Ease) -> f64 {
    let fade = SceneFade::default();
    edge_opacity(progress, scene.range, scene.fade_zone, fade, inner, ease)
}

/// Maps smoothed progress to per-scene opacity.
///
/// Fade policies are resolved from the override table once, at construction.
#[derive(Clone, Debug)]
pub struct DissolveCalculator {
    scenes: Vec<(SceneRange, f64)>,
    fades: Vec<SceneFade>,
    inner: f64,
    ease: Ease,
}

impl DissolveCalculator {
    /// Resolve `overrides` against `registry`.
    pub fn new(
        registry: &SceneRegistry,
        overrides: &BTreeMap<String, FadeOverride>,
        cfg: DissolveConfig,
    ) -> CinescrollResult<Self> {
        cfg.validate()?;
        let fades = resolve_fades(registry, overrides)?;
        let scenes = registry
            .scenes()
            .iter()
            .map(|s| (s.range, s.fade_zone))
            .collect();
        Ok(Self {
            scenes,
            fades,
            inner: cfg.inner_fade_fraction,
            ease: cfg.ease,
        })
    }

    /// Resolved fade policies in registry order.
    pub fn fades(&self) -> &[SceneFade] {
        &self.fades
    }

    /// Opacity in `[0, 1]` of the scene at `index`. Unknown indices are fully transparent.
    pub fn opacity(&self, progress: f64, index: usize) -> f64 {
        let (Some(&(range, fade_zone)), Some(&fade)) =
            (self.scenes.get(index), self.fades.get(index))
        else {
            return 0.0;
        };
        edge_opacity(progress, range, fade_zone, fade, self.inner, self.ease)
    }

    /// Recompute every entry of `out` for `progress`.
    pub fn fill(&self, progress: f64, out: &mut OpacityVector) {
        for (i, (_, v)) in out.entries.iter_mut().enumerate() {
            *v = self.opacity(progress, i);
        }
    }
}

fn edge_opacity(
    progress: f64,
    range: SceneRange,
    fade_zone: f64,
    fade: SceneFade,
    inner: f64,
    ease: Ease,
) -> f64 {
    let p = clamp_unit(progress);
    let fade_zone = fade_zone.max(0.0);

    let fade_in = match fade.fade_in {
        EdgePolicy::Hold => 1.0,
        EdgePolicy::Standard => ease.apply(inv_lerp_clamped(
            range.start - fade_zone,
            range.start + inner * fade_zone,
            p,
        )),
        EdgePolicy::Complementary { half_width } => sine_fade_in(inv_lerp_clamped(
            range.start - half_width,
            range.start + half_width,
            p,
        )),
    };

    let fade_out = match fade.fade_out {
        EdgePolicy::Hold => 1.0,
        EdgePolicy::Standard => {
            1.0 - ease.apply(inv_lerp_clamped(
                range.end - inner * fade_zone,
                range.end + fade_zone,
                p,
            ))
        }
        EdgePolicy::Complementary { half_width } => cosine_fade_out(inv_lerp_clamped(
            range.end - half_width,
            range.end + half_width,
            p,
        )),
    };

    clamp_unit(fade_in.min(fade_out))
}

#[cfg(test)]
#[path = "../../tests/unit/dissolve/calculator.rs"]
mod tests;
