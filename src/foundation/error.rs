/// Convenience result type used across cinescroll.
pub type CinescrollResult<T> = Result<T, CinescrollError>;

/// Top-level error taxonomy used by compositor APIs.
///
/// Runtime input (scroll positions, viewport sizes, progress values) never produces an error;
/// it is clamped at every boundary. Errors only surface while loading and validating
/// configuration, before the frame loop starts.
#[derive(thiserror::Error, Debug)]
pub enum CinescrollError {
    /// Invalid scene table or tuning values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration that is well-formed but inconsistent (e.g. overrides for unknown scenes).
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CinescrollError {
    /// Build a [`CinescrollError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CinescrollError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CinescrollError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Fault reported by a per-frame effect handle.
///
/// The frame scheduler logs these and keeps the loop running; they never become a
/// [`CinescrollError`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("effect '{effect}' failed: {reason}")]
pub struct EffectError {
    /// Name of the failing effect.
    pub effect: String,
    /// Human-readable failure reason.
    pub reason: String,
}

impl EffectError {
    /// Build an effect fault for `effect`.
    pub fn new(effect: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            effect: effect.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
