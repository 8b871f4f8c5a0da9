use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};

use crate::config::model::SchedulerConfig;
use crate::foundation::error::EffectError;

/// A per-frame decorative effect (particles, aurora, starfield, ...).
pub trait EffectHandle {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Advance by `delta_secs` with the current smoothed scroll progress.
    fn update(&mut self, delta_secs: f64, progress: f64) -> Result<(), EffectError>;
}

/// Identifier returned by [`FrameScheduler::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u64);

struct EffectSlot {
    id: EffectId,
    owner: Option<usize>,
    name: String,
    // `None` once the handle has panicked; the slot is skipped until unregistered.
    handle: Option<Box<dyn EffectHandle>>,
}

/// Timing captured at the start of a frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    /// Capped time since the previous frame, in seconds.
    pub delta_secs: f64,
    started: Instant,
}

/// Outcome of dispatching one frame to the effect registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Handles updated successfully.
    pub updated: usize,
    /// Handles that returned an error this frame.
    pub failed: usize,
    /// Handles that panicked this frame and were disabled.
    pub disabled: usize,
    /// Empty slots skipped.
    pub skipped: usize,
}

/// Summary of one processed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    /// Capped delta handed to effects, in seconds.
    pub delta_secs: f64,
    /// Effect dispatch outcome.
    pub dispatch: DispatchStats,
    /// Wall-clock processing time of the frame.
    pub elapsed: Duration,
    /// Whether `elapsed` exceeded the frame budget.
    pub over_budget: bool,
}

/// Master per-frame loop state and effect-handle registry.
///
/// The loop is explicit: callers bracket each frame with [`FrameScheduler::begin_frame`] and
/// [`FrameScheduler::finish_frame`] and run [`FrameScheduler::dispatch`] in between, after the
/// scroll pipeline has produced this frame's progress. A faulty handle never stops the loop.
pub struct FrameScheduler {
    cfg: SchedulerConfig,
    effects: Vec<EffectSlot>,
    next_id: u64,
    last_frame_ms: Option<f64>,
    running: bool,
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("cfg", &self.cfg)
            .field("effects", &self.effects.len())
            .field("last_frame_ms", &self.last_frame_ms)
            .field("running", &self.running)
            .finish()
    }
}

impl FrameScheduler {
    /// Stopped scheduler with an empty registry.
    pub fn new(cfg: SchedulerConfig) -> Self {
        Self {
            cfg,
            effects: Vec::new(),
            next_id: 0,
            last_frame_ms: None,
            running: false,
        }
    }

    /// Start the loop. The first frame after starting reports a zero delta.
    pub fn start(&mut self) {
        self.running = true;
        self.last_frame_ms = None;
    }

    /// Stop the loop; frames arriving afterwards are ignored by the compositor.
    pub fn stop(&mut self) {
        self.running = false;
        self.last_frame_ms = None;
    }

    /// Whether the loop is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Add a handle, optionally owned by the scene at registry index `owner`.
    pub fn register(&mut self, owner: Option<usize>, handle: Box<dyn EffectHandle>) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        let name = handle.name().to_string();
        tracing::debug!(effect = %name, ?owner, ?id, "effect registered");
        self.effects.push(EffectSlot {
            id,
            owner,
            name,
            handle: Some(handle),
        });
        id
    }

    /// Remove one handle. Returns whether it was registered.
    pub fn unregister(&mut self, id: EffectId) -> bool {
        let before = self.effects.len();
        self.effects.retain(|s| s.id != id);
        self.effects.len() != before
    }

    /// Remove every handle owned by the scene at `owner`. Returns how many were released.
    pub fn release_scene(&mut self, owner: usize) -> usize {
        let before = self.effects.len();
        self.effects.retain(|s| s.owner != Some(owner));
        let released = before - self.effects.len();
        if released > 0 {
            tracing::debug!(owner, released, "scene effects released");
        }
        released
    }

    /// Remove every handle.
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Number of registered slots (including disabled ones).
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    /// Number of slots owned by the scene at `owner`.
    pub fn effects_owned_by(&self, owner: usize) -> usize {
        self.effects
            .iter()
            .filter(|s| s.owner == Some(owner))
            .count()
    }

    /// Mark the start of a frame at host timestamp `now_ms`.
    pub fn begin_frame(&mut self, now_ms: f64) -> FrameClock {
        let delta_ms = match (self.last_frame_ms, now_ms.is_finite()) {
            (Some(last), true) => (now_ms - last).clamp(0.0, self.cfg.max_delta_ms),
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_frame_ms = Some(now_ms);
        }
        FrameClock {
            delta_secs: delta_ms / 1000.0,
            started: Instant::now(),
        }
    }

    /// Update every registered handle with this frame's delta and progress.
    pub fn dispatch(&mut self, clock: &FrameClock, progress: f64) -> DispatchStats {
        let mut stats = DispatchStats::default();
        for slot in &mut self.effects {
            let Some(handle) = slot.handle.as_mut() else {
                stats.skipped += 1;
                continue;
            };
            match catch_unwind(AssertUnwindSafe(|| handle.update(clock.delta_secs, progress))) {
                Ok(Ok(())) => stats.updated += 1,
                Ok(Err(err)) => {
                    stats.failed += 1;
                    tracing::warn!(id = ?slot.id, error = %err, "effect update failed; skipping");
                }
                Err(payload) => {
                    stats.disabled += 1;
                    let msg = panic_message(payload.as_ref());
                    tracing::error!(
                        id = ?slot.id,
                        effect = %slot.name,
                        panic = %msg,
                        "effect panicked; disabling handle"
                    );
                    slot.handle = None;
                }
            }
        }
        stats
    }

    /// Close a frame, logging a warning when it ran over budget.
    pub fn finish_frame(&self, clock: FrameClock, dispatch: DispatchStats) -> FrameStats {
        let elapsed = clock.started.elapsed();
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let over_budget = elapsed_ms > self.cfg.frame_budget_ms;
        if over_budget {
            tracing::warn!(
                elapsed_ms,
                budget_ms = self.cfg.frame_budget_ms,
                effects = self.effects.len(),
                "frame exceeded processing budget"
            );
        }
        FrameStats {
            delta_secs: clock.delta_secs,
            dispatch,
            elapsed,
            over_budget,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/scheduler.rs"]
mod tests;
