use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::ease::Ease;
use crate::dissolve::policy::{EdgePolicy, FadeOverride};
use crate::foundation::error::{CinescrollError, CinescrollResult};
use crate::particles::selector::ParticleTable;
use crate::scene::descriptor::SceneDescriptor;
use crate::scene::registry::SceneRegistry;

/// Scroll smoothing tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Fraction of the remaining gap closed per frame, in `(0, 1]`.
    pub alpha: f64,
    /// Gap below which the smoother snaps to the raw value and idles.
    pub epsilon: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            alpha: 0.09,
            epsilon: 1e-4,
        }
    }
}

impl SmoothingConfig {
    fn validate(&self) -> CinescrollResult<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 || self.alpha > 1.0 {
            return Err(CinescrollError::validation(
                "smoothing.alpha must be in (0, 1]",
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(CinescrollError::validation(
                "smoothing.epsilon must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Standard dissolve tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DissolveConfig {
    /// Share of `fade_zone` that a standard fade spends inside the nominal range.
    pub inner_fade_fraction: f64,
    /// Curve applied to standard fade ramps.
    pub ease: Ease,
}

impl Default for DissolveConfig {
    fn default() -> Self {
        Self {
            inner_fade_fraction: 0.15,
            ease: Ease::InOutCubic,
        }
    }
}

impl DissolveConfig {
    pub(crate) fn validate(&self) -> CinescrollResult<()> {
        if !self.inner_fade_fraction.is_finite() || !(0.0..1.0).contains(&self.inner_fade_fraction)
        {
            return Err(CinescrollError::validation(
                "dissolve.inner_fade_fraction must be in [0, 1)",
            ));
        }
        Ok(())
    }
}

/// Mount culling distances, all in `vh` units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CullingConfig {
    /// Total scrollable height of the experience.
    pub total_scroll_vh: f64,
    /// Base distance from a scene's midpoint inside which it stays instantiated.
    pub threshold_vh: f64,
    /// Extra distance an unmounted scene gets before it mounts.
    pub mount_buffer_vh: f64,
    /// Extra distance a mounted scene keeps before it unmounts; larger than `mount_buffer_vh`.
    pub unmount_buffer_vh: f64,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            total_scroll_vh: 2400.0,
            threshold_vh: 320.0,
            mount_buffer_vh: 20.0,
            unmount_buffer_vh: 80.0,
        }
    }
}

impl CullingConfig {
    fn validate(&self) -> CinescrollResult<()> {
        if !self.total_scroll_vh.is_finite() || self.total_scroll_vh <= 0.0 {
            return Err(CinescrollError::validation(
                "culling.total_scroll_vh must be finite and > 0",
            ));
        }
        for (name, v) in [
            ("threshold_vh", self.threshold_vh),
            ("mount_buffer_vh", self.mount_buffer_vh),
            ("unmount_buffer_vh", self.unmount_buffer_vh),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(CinescrollError::validation(format!(
                    "culling.{name} must be finite and >= 0"
                )));
            }
        }
        if self.unmount_buffer_vh <= self.mount_buffer_vh {
            return Err(CinescrollError::validation(
                "culling.unmount_buffer_vh must exceed culling.mount_buffer_vh",
            ));
        }
        Ok(())
    }
}

/// Stacking tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// Base z distance between consecutive registry scenes.
    pub z_spacing: i32,
    /// Opacity above which a scene container is drawn.
    pub visible_epsilon: f64,
    /// Opacity above which a scene keeps its base z instead of being demoted.
    pub dominant_threshold: f64,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            z_spacing: 10,
            visible_epsilon: 0.01,
            dominant_threshold: 0.1,
        }
    }
}

impl LayerConfig {
    fn validate(&self) -> CinescrollResult<()> {
        if self.z_spacing < 2 {
            return Err(CinescrollError::validation(
                "layering.z_spacing must be >= 2 so demotion stays between neighbors",
            ));
        }
        for (name, v) in [
            ("visible_epsilon", self.visible_epsilon),
            ("dominant_threshold", self.dominant_threshold),
        ] {
            if !v.is_finite() || !(0.0..1.0).contains(&v) {
                return Err(CinescrollError::validation(format!(
                    "layering.{name} must be in [0, 1)"
                )));
            }
        }
        Ok(())
    }
}

/// Frame loop tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Upper bound on the delta passed to effect handles (e.g. after tab backgrounding).
    pub max_delta_ms: f64,
    /// Processing time per frame above which a warning is logged.
    pub frame_budget_ms: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_delta_ms: 100.0,
            frame_budget_ms: 16.7,
        }
    }
}

impl SchedulerConfig {
    fn validate(&self) -> CinescrollResult<()> {
        if !self.max_delta_ms.is_finite() || self.max_delta_ms <= 0.0 {
            return Err(CinescrollError::validation(
                "scheduler.max_delta_ms must be finite and > 0",
            ));
        }
        if !self.frame_budget_ms.is_finite() || self.frame_budget_ms <= 0.0 {
            return Err(CinescrollError::validation(
                "scheduler.frame_budget_ms must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Complete compositor configuration.
///
/// JSON-facing and human-edited; every tuning section is optional and defaults to the values
/// the built-in experience was tuned with.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompositorConfig {
    /// Ordered scene table.
    pub scenes: Vec<SceneDescriptor>,
    /// Per-scene fade policy overrides keyed by scene key.
    #[serde(default)]
    pub fade_overrides: BTreeMap<String, FadeOverride>,
    /// Particle lookup table; the built-in table when absent.
    #[serde(default)]
    pub particles: ParticleTable,
    /// Scroll smoothing tuning.
    #[serde(default)]
    pub smoothing: SmoothingConfig,
    /// Standard dissolve tuning.
    #[serde(default)]
    pub dissolve: DissolveConfig,
    /// Mount culling tuning.
    #[serde(default)]
    pub culling: CullingConfig,
    /// Stacking tuning.
    #[serde(default)]
    pub layering: LayerConfig,
    /// Frame loop tuning.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self::with_scenes(builtin_scenes(), builtin_fade_overrides())
    }
}

impl CompositorConfig {
    /// Default tuning around a caller-supplied scene table.
    pub fn with_scenes(
        scenes: Vec<SceneDescriptor>,
        fade_overrides: BTreeMap<String, FadeOverride>,
    ) -> Self {
        Self {
            scenes,
            fade_overrides,
            particles: ParticleTable::builtin(),
            smoothing: SmoothingConfig::default(),
            dissolve: DissolveConfig::default(),
            culling: CullingConfig::default(),
            layering: LayerConfig::default(),
            scheduler: SchedulerConfig::default(),
        }
    }

    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CinescrollResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CinescrollError::serde(format!("parse compositor config JSON: {e}")))
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> CinescrollResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| CinescrollError::serde(format!("parse compositor config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CinescrollResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CinescrollError::config(format!("open compositor config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> CinescrollResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CinescrollError::serde(e.to_string()))
    }

    /// Validate every section and cross-check overrides against the scene table.
    pub fn validate(&self) -> CinescrollResult<()> {
        let registry = SceneRegistry::new(self.scenes.clone())?;
        for key in self.fade_overrides.keys() {
            if registry.index_of(key).is_none() {
                return Err(CinescrollError::config(format!(
                    "fade override references unknown scene '{key}'"
                )));
            }
        }
        self.particles.validate()?;
        self.smoothing.validate()?;
        self.dissolve.validate()?;
        self.culling.validate()?;
        self.layering.validate()?;
        self.scheduler.validate()?;
        Ok(())
    }
}

/// The seven chapters of the built-in experience.
pub fn builtin_scenes() -> Vec<SceneDescriptor> {
    vec![
        SceneDescriptor::new("dormant", 0.0, 0.05, 0.02, 0.8),
        SceneDescriptor::new("awakening", 0.05, 0.15, 0.02, 1.0),
        SceneDescriptor::new("ascent", 0.15, 0.30, 0.03, 1.2),
        SceneDescriptor::new("nebula", 0.30, 0.48, 0.03, 1.2),
        SceneDescriptor::new("orbit", 0.48, 0.66, 0.03, 1.2),
        SceneDescriptor::new("deep_field", 0.66, 0.85, 0.03, 1.4),
        SceneDescriptor::new("arrival", 0.85, 1.0, 0.02, 1.6),
    ]
}

/// Anchor overrides for the built-in experience.
///
/// The opening pair shares a complementary seam; the first and last chapters hold full opacity
/// at the page edges.
pub fn builtin_fade_overrides() -> BTreeMap<String, FadeOverride> {
    let seam = EdgePolicy::Complementary { half_width: 0.01 };
    BTreeMap::from([
        (
            "dormant".to_string(),
            FadeOverride::both(EdgePolicy::Hold, seam),
        ),
        ("awakening".to_string(), FadeOverride::fade_in(seam)),
        (
            "arrival".to_string(),
            FadeOverride::fade_out(EdgePolicy::Hold),
        ),
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
