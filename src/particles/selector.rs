use std::collections::BTreeMap;

use crate::foundation::core::DeviceClass;
use crate::foundation::error::{CinescrollError, CinescrollResult};

/// Particle budget handed to a scene's decorative sub-effects.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticleConfig {
    /// Particle count.
    pub density: u32,
    /// Animation speed multiplier.
    pub speed: f64,
    /// Target update rate for the particle simulation.
    pub fps: u32,
    /// Glow intensity in `[0, 1]`.
    pub glow: f64,
}

impl ParticleConfig {
    const fn new(density: u32, speed: f64, fps: u32, glow: f64) -> Self {
        Self {
            density,
            speed,
            fps,
            glow,
        }
    }

    fn validate(&self, what: &str) -> CinescrollResult<()> {
        if self.density == 0 {
            return Err(CinescrollError::validation(format!(
                "{what} density must be > 0"
            )));
        }
        if self.fps == 0 || self.fps > 240 {
            return Err(CinescrollError::validation(format!(
                "{what} fps must be in 1..=240"
            )));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(CinescrollError::validation(format!(
                "{what} speed must be finite and >= 0"
            )));
        }
        if !self.glow.is_finite() || !(0.0..=1.0).contains(&self.glow) {
            return Err(CinescrollError::validation(format!(
                "{what} glow must be in [0, 1]"
            )));
        }
        Ok(())
    }
}

/// Mobile and desktop variants for one scene.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticleProfile {
    /// Budget for [`DeviceClass::Mobile`].
    pub mobile: ParticleConfig,
    /// Budget for [`DeviceClass::Desktop`].
    pub desktop: ParticleConfig,
}

impl ParticleProfile {
    const fn new(mobile: ParticleConfig, desktop: ParticleConfig) -> Self {
        Self { mobile, desktop }
    }

    /// Variant for `device`.
    pub fn for_device(&self, device: DeviceClass) -> ParticleConfig {
        match device {
            DeviceClass::Mobile => self.mobile,
            DeviceClass::Desktop => self.desktop,
        }
    }
}

/// Static per-scene particle lookup with a fallback entry.
///
/// Scenes made of large, slow elements get dense fields at a low update rate; scenes that need
/// crisp fast motion trade particle count for frame rate.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticleTable {
    /// Profiles keyed by scene key.
    pub scenes: BTreeMap<String, ParticleProfile>,
    /// Profile used for scene keys missing from `scenes`.
    pub fallback: ParticleProfile,
}

const FALLBACK: ParticleProfile = ParticleProfile::new(
    ParticleConfig::new(400, 0.5, 30, 0.4),
    ParticleConfig::new(1000, 0.5, 30, 0.5),
);

const BUILTIN: [(&str, ParticleProfile); 7] = [
    (
        "dormant",
        ParticleProfile::new(
            ParticleConfig::new(700, 0.25, 24, 0.25),
            ParticleConfig::new(1800, 0.25, 30, 0.35),
        ),
    ),
    (
        "awakening",
        ParticleProfile::new(
            ParticleConfig::new(900, 0.4, 30, 0.45),
            ParticleConfig::new(2200, 0.45, 30, 0.6),
        ),
    ),
    (
        "ascent",
        ParticleProfile::new(
            ParticleConfig::new(350, 1.2, 45, 0.6),
            ParticleConfig::new(900, 1.4, 60, 0.8),
        ),
    ),
    (
        "nebula",
        ParticleProfile::new(
            ParticleConfig::new(1000, 0.3, 24, 0.7),
            ParticleConfig::new(2600, 0.3, 30, 0.9),
        ),
    ),
    (
        "orbit",
        ParticleProfile::new(
            ParticleConfig::new(500, 0.8, 45, 0.4),
            ParticleConfig::new(1200, 0.9, 60, 0.5),
        ),
    ),
    (
        "deep_field",
        ParticleProfile::new(
            ParticleConfig::new(1200, 0.2, 24, 0.3),
            ParticleConfig::new(3000, 0.2, 24, 0.4),
        ),
    ),
    (
        "arrival",
        ParticleProfile::new(
            ParticleConfig::new(600, 0.5, 30, 0.5),
            ParticleConfig::new(1500, 0.6, 45, 0.7),
        ),
    ),
];

impl Default for ParticleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ParticleTable {
    /// Tuned table for the built-in scene set.
    pub fn builtin() -> Self {
        Self {
            scenes: BUILTIN
                .iter()
                .map(|(k, p)| ((*k).to_string(), *p))
                .collect(),
            fallback: FALLBACK,
        }
    }

    /// Particle budget for `scene_key` on `device`; unknown keys use the fallback.
    pub fn select(&self, scene_key: &str, device: DeviceClass) -> ParticleConfig {
        self.scenes
            .get(scene_key)
            .unwrap_or(&self.fallback)
            .for_device(device)
    }

    /// Check every entry.
    pub fn validate(&self) -> CinescrollResult<()> {
        self.fallback.mobile.validate("particles.fallback.mobile")?;
        self.fallback.desktop.validate("particles.fallback.desktop")?;
        for (key, p) in &self.scenes {
            p.mobile.validate(&format!("particles.{key}.mobile"))?;
            p.desktop.validate(&format!("particles.{key}.desktop"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/selector.rs"]
mod tests;
