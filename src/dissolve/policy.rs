use std::collections::BTreeMap;

use crate::foundation::error::{CinescrollError, CinescrollResult};
use crate::scene::registry::SceneRegistry;

/// How one edge (fade-in or fade-out) of a scene blends with its neighbor.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Eased ramp over the scene's fade windows.
    #[default]
    Standard,
    /// No fade on this edge; the scene stays fully lit up to the boundary.
    Hold,
    /// Trigonometric ramp over `[boundary - half_width, boundary + half_width]`.
    ///
    /// A sine fade-in and a cosine fade-out sharing one boundary and `half_width` sum to 1,
    /// so the seam never dips or double-exposes.
    Complementary {
        /// Half-width of the shared window in progress units.
        half_width: f64,
    },
}

impl EdgePolicy {
    fn validate(self, key: &str, edge: &str) -> CinescrollResult<()> {
        if let Self::Complementary { half_width } = self
            && (!half_width.is_finite() || half_width <= 0.0)
        {
            return Err(CinescrollError::validation(format!(
                "fade override '{key}'.{edge} half_width must be finite and > 0",
            )));
        }
        Ok(())
    }
}

/// Per-scene override entry. Unset edges keep [`EdgePolicy::Standard`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FadeOverride {
    /// Policy for the fade-in edge at `range.start`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_in: Option<EdgePolicy>,
    /// Policy for the fade-out edge at `range.end`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_out: Option<EdgePolicy>,
}

impl FadeOverride {
    /// Override only the fade-in edge.
    pub fn fade_in(policy: EdgePolicy) -> Self {
        Self {
            fade_in: Some(policy),
            fade_out: None,
        }
    }

    /// Override only the fade-out edge.
    pub fn fade_out(policy: EdgePolicy) -> Self {
        Self {
            fade_in: None,
            fade_out: Some(policy),
        }
    }

    /// Override both edges.
    pub fn both(fade_in: EdgePolicy, fade_out: EdgePolicy) -> Self {
        Self {
            fade_in: Some(fade_in),
            fade_out: Some(fade_out),
        }
    }
}

/// Fade policies for one scene after overrides are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct SceneFade {
    /// Resolved fade-in policy.
    pub fade_in: EdgePolicy,
    /// Resolved fade-out policy.
    pub fade_out: EdgePolicy,
}

/// Resolve the override table against the registry, once, into registry order.
pub(crate) fn resolve_fades(
    registry: &SceneRegistry,
    overrides: &BTreeMap<String, FadeOverride>,
) -> CinescrollResult<Vec<SceneFade>> {
    let mut out = vec![SceneFade::default(); registry.len()];
    for (key, ov) in overrides {
        let Some(i) = registry.index_of(key) else {
            return Err(CinescrollError::config(format!(
                "fade override references unknown scene '{key}'"
            )));
        };
        if let Some(p) = ov.fade_in {
            p.validate(key, "fade_in")?;
            out[i].fade_in = p;
        }
        if let Some(p) = ov.fade_out {
            p.validate(key, "fade_out")?;
            out[i].fade_out = p;
        }
    }
    Ok(out)
}
