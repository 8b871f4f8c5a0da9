use crate::foundation::error::{CinescrollError, CinescrollResult};
use crate::foundation::math::inv_lerp_clamped;

/// Scroll-progress span `[start, end]` owned by one scene.
///
/// Serialized as a two-element array.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct SceneRange {
    /// Progress at which the scene begins.
    pub start: f64,
    /// Progress at which the scene ends.
    pub end: f64,
}

impl From<[f64; 2]> for SceneRange {
    fn from([start, end]: [f64; 2]) -> Self {
        Self { start, end }
    }
}

impl From<SceneRange> for [f64; 2] {
    fn from(r: SceneRange) -> Self {
        [r.start, r.end]
    }
}

impl SceneRange {
    /// Build a range without validation.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Width of the range (may be zero for a degenerate range).
    pub fn len(self) -> f64 {
        self.end - self.start
    }

    /// Whether the range has no width.
    pub fn is_empty(self) -> bool {
        self.len() <= 0.0
    }

    /// Half-open containment test: `start <= p < end`.
    pub fn contains(self, progress: f64) -> bool {
        self.start <= progress && progress < self.end
    }

    /// Center of the range.
    pub fn midpoint(self) -> f64 {
        (self.start + self.end) * 0.5
    }

    /// Intra-scene progress in `[0, 1]`. A zero-width range yields `0`.
    pub fn local_progress(self, progress: f64) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        inv_lerp_clamped(self.start, self.end, progress)
    }
}

/// Static description of one visual chapter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDescriptor {
    /// Stable scene key (e.g. `"dormant"`).
    pub key: String,
    /// Scroll span in which the scene is the active chapter.
    pub range: SceneRange,
    /// Progress distance over which opacity ramps at each boundary.
    pub fade_zone: f64,
    /// Suggested CSS-style transition duration in seconds for the scene container.
    #[serde(default)]
    pub transition_duration: f64,
}

impl SceneDescriptor {
    /// Build a descriptor without validation.
    pub fn new(
        key: impl Into<String>,
        start: f64,
        end: f64,
        fade_zone: f64,
        transition_duration: f64,
    ) -> Self {
        Self {
            key: key.into(),
            range: SceneRange::new(start, end),
            fade_zone,
            transition_duration,
        }
    }

    /// Check the per-scene invariants.
    pub fn validate(&self) -> CinescrollResult<()> {
        if self.key.trim().is_empty() {
            return Err(CinescrollError::validation("scene key must be non-empty"));
        }
        let SceneRange { start, end } = self.range;
        if !start.is_finite() || !end.is_finite() {
            return Err(CinescrollError::validation(format!(
                "scene '{}' range must be finite",
                self.key
            )));
        }
        if !(0.0 <= start && start < end && end <= 1.0) {
            return Err(CinescrollError::validation(format!(
                "scene '{}' range must satisfy 0 <= start < end <= 1 (got [{start}, {end}])",
                self.key
            )));
        }
        if !self.fade_zone.is_finite() || self.fade_zone < 0.0 {
            return Err(CinescrollError::validation(format!(
                "scene '{}' fade_zone must be finite and >= 0",
                self.key
            )));
        }
        if !self.transition_duration.is_finite() || self.transition_duration < 0.0 {
            return Err(CinescrollError::validation(format!(
                "scene '{}' transition_duration must be finite and >= 0",
                self.key
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/descriptor.rs"]
mod tests;
