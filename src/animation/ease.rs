use std::f64::consts::FRAC_PI_2;

/// Easing curves applied to a normalized fade ramp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Straight ramp.
    Linear,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in/out (`4t³` below the midpoint, mirrored above).
    #[default]
    InOutCubic,
    /// Half-cosine ease-in/out.
    InOutSine,
}

impl Ease {
    /// Apply this curve to progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InOutSine => (1.0 - (t * std::f64::consts::PI).cos()) / 2.0,
        }
    }
}

/// Sine-family fade-in over a shared boundary window.
///
/// Paired with [`cosine_fade_out`] at the same `t`, the two values sum to exactly 1.
pub fn sine_fade_in(t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    (t * FRAC_PI_2).sin().powi(2)
}

/// Cosine-family fade-out over a shared boundary window: `cos²(πt/2)`.
///
/// Computed as the complement of [`sine_fade_in`] so both endpoints are exact.
pub fn cosine_fade_out(t: f64) -> f64 {
    1.0 - sine_fade_in(t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
