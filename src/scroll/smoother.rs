use crate::config::model::SmoothingConfig;
use crate::foundation::core::ScrollMetrics;
use crate::foundation::math::{approx_eq, clamp_unit};

/// Raw and smoothed scroll progress, both in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ScrollState {
    /// Latest fraction reported by the host.
    pub raw: f64,
    /// Per-frame exponentially smoothed fraction.
    pub smoothed: f64,
}

/// Handle returned by [`ScrollSmoother::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ProgressListener = Box<dyn FnMut(f64)>;

/// Exponential approach from `raw` to `smoothed`, one step per animation frame.
///
/// The smoother only has work while `|raw - smoothed| > epsilon`; once the gap closes it snaps
/// to `raw` and goes idle until the next raw update.
pub struct ScrollSmoother {
    state: ScrollState,
    alpha: f64,
    epsilon: f64,
    pending: bool,
    listeners: Vec<(SubscriptionId, ProgressListener)>,
    next_id: u64,
}

impl std::fmt::Debug for ScrollSmoother {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSmoother")
            .field("state", &self.state)
            .field("alpha", &self.alpha)
            .field("epsilon", &self.epsilon)
            .field("pending", &self.pending)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ScrollSmoother {
    /// Create an idle smoother at progress `0`.
    pub fn new(cfg: SmoothingConfig) -> Self {
        Self {
            state: ScrollState::default(),
            alpha: cfg.alpha,
            epsilon: cfg.epsilon,
            pending: false,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Current raw/smoothed pair.
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Current smoothed progress.
    pub fn smoothed(&self) -> f64 {
        self.state.smoothed
    }

    /// Whether another frame step is needed to converge.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record a new raw fraction. Returns whether frame steps are now pending.
    pub fn set_raw(&mut self, raw: f64) -> bool {
        self.state.raw = clamp_unit(raw);
        self.pending = !approx_eq(self.state.raw, self.state.smoothed, self.epsilon);
        if !self.pending && self.state.smoothed != self.state.raw {
            self.snap();
        }
        self.pending
    }

    /// Record a scroll event from host geometry.
    ///
    /// When nothing can scroll, both values short-circuit to `0` and no work is scheduled.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if !metrics.is_scrollable() {
            self.state.raw = 0.0;
            self.pending = false;
            if self.state.smoothed != 0.0 {
                self.state.smoothed = 0.0;
                self.notify();
            }
            return false;
        }
        self.set_raw(metrics.fraction())
    }

    /// Move both values to `progress` at once, without easing.
    ///
    /// Used for the initial mount and programmatic seeks.
    pub fn jump_to(&mut self, progress: f64) {
        let p = clamp_unit(progress);
        self.state.raw = p;
        self.pending = false;
        if self.state.smoothed != p {
            self.state.smoothed = p;
            self.notify();
        }
    }

    /// Advance one frame. Returns the new smoothed value if it changed.
    pub fn advance(&mut self) -> Option<f64> {
        if !self.pending {
            return None;
        }

        let before = self.state.smoothed;
        self.state.smoothed += (self.state.raw - self.state.smoothed) * self.alpha;
        if approx_eq(self.state.raw, self.state.smoothed, self.epsilon) {
            self.state.smoothed = self.state.raw;
            self.pending = false;
            tracing::trace!(smoothed = self.state.smoothed, "scroll smoother settled");
        }
        self.state.smoothed = clamp_unit(self.state.smoothed);

        if self.state.smoothed == before {
            return None;
        }
        self.notify();
        Some(self.state.smoothed)
    }

    /// Register a listener pushed with every change of the smoothed value.
    pub fn subscribe(&mut self, listener: impl FnMut(f64) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn snap(&mut self) {
        self.state.smoothed = self.state.raw;
        self.notify();
    }

    fn notify(&mut self) {
        let v = self.state.smoothed;
        for (_, l) in &mut self.listeners {
            l(v);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/smoother.rs"]
mod tests;
