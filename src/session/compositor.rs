use crate::config::model::CompositorConfig;
use crate::cull::culler::{MountCuller, MountDiff, MountSet};
use crate::dissolve::calculator::{DissolveCalculator, OpacityVector};
use crate::foundation::core::{DeviceClass, ScrollMetrics};
use crate::foundation::error::CinescrollResult;
use crate::frame::host::{FrameHost, FrameToken};
use crate::frame::scheduler::{EffectHandle, EffectId, FrameScheduler, FrameStats};
use crate::layer::resolver::{LayerResolver, LayerState};
use crate::particles::selector::{ParticleConfig, ParticleTable};
use crate::scene::descriptor::SceneDescriptor;
use crate::scene::registry::{ActiveSceneState, SceneRegistry};
use crate::scroll::smoother::{ScrollSmoother, ScrollState, SubscriptionId};

/// Creates a scene's per-frame effect handles when the scene mounts.
///
/// Handles spawned here are owned by the scene and released when it unmounts.
pub trait EffectFactory {
    /// Build the handles for `scene` with the particle budget selected for it.
    fn spawn(
        &mut self,
        scene: &SceneDescriptor,
        particles: ParticleConfig,
    ) -> Vec<Box<dyn EffectHandle>>;
}

/// Pushed to scene-change listeners when the active chapter changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneChange {
    /// Previously active scene index.
    pub from: usize,
    /// Newly active scene index.
    pub to: usize,
    /// Key of the newly active scene.
    pub key: String,
}

/// Stacking state of one scene, as published.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneLayer {
    /// Scene key.
    pub key: String,
    /// Resolved stacking.
    #[serde(flatten)]
    pub layer: LayerState,
}

/// Everything the compositor publishes for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompositorSnapshot {
    /// Raw and smoothed scroll progress.
    pub scroll: ScrollState,
    /// Key of the active scene.
    pub active_key: String,
    /// Active scene index and intra-scene progress.
    pub active: ActiveSceneState,
    /// Per-scene opacity.
    pub opacity: OpacityVector,
    /// Instantiated scenes.
    pub mounted: MountSet,
    /// Per-scene stacking.
    pub layers: Vec<SceneLayer>,
    /// Particle budget of the active scene.
    pub particles: ParticleConfig,
    /// Device class used for particle selection.
    pub device: DeviceClass,
}

type SceneListener = Box<dyn FnMut(&SceneChange)>;

/// Scroll-to-visual-state compositor session.
///
/// Owns the whole pipeline and runs it in a fixed order once per frame:
/// smoother → locator → dissolve → culler → layers and particles → effect dispatch.
///
/// Lifecycle is explicit: [`ScrollCompositor::init`] starts the frame loop against a
/// [`FrameHost`], [`ScrollCompositor::dispose`] cancels outstanding frames and releases every
/// effect handle. Scroll events between frames are coalesced; at most one frame request is
/// outstanding at any time.
pub struct ScrollCompositor {
    registry: SceneRegistry,
    smoother: ScrollSmoother,
    dissolve: DissolveCalculator,
    culler: MountCuller,
    layering: LayerResolver,
    particle_table: ParticleTable,
    scheduler: FrameScheduler,
    device: DeviceClass,
    factory: Option<Box<dyn EffectFactory>>,
    scene_listeners: Vec<SceneListener>,

    active: ActiveSceneState,
    opacity: OpacityVector,
    layers: Vec<LayerState>,
    particles: ParticleConfig,

    frame_token: Option<FrameToken>,
    dirty: bool,
}

impl std::fmt::Debug for ScrollCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollCompositor")
            .field("scenes", &self.registry.len())
            .field("smoother", &self.smoother)
            .field("scheduler", &self.scheduler)
            .field("device", &self.device)
            .field("active", &self.active)
            .field("frame_token", &self.frame_token)
            .finish_non_exhaustive()
    }
}

impl ScrollCompositor {
    /// Validate `cfg` and build an idle compositor for `device`.
    ///
    /// Nothing is mounted until [`ScrollCompositor::init`].
    #[tracing::instrument(skip(cfg), fields(scenes = cfg.scenes.len()))]
    pub fn new(cfg: CompositorConfig, device: DeviceClass) -> CinescrollResult<Self> {
        cfg.validate()?;
        let registry = SceneRegistry::new(cfg.scenes)?;
        let dissolve = DissolveCalculator::new(&registry, &cfg.fade_overrides, cfg.dissolve)?;
        let culler = MountCuller::new(&registry, cfg.culling);
        let layering = LayerResolver::new(cfg.layering);
        let smoother = ScrollSmoother::new(cfg.smoothing);
        let scheduler = FrameScheduler::new(cfg.scheduler);

        let active = registry.locate(0.0);
        let particles = cfg
            .particles
            .select(&registry.scenes()[active.scene_index].key, device);
        let opacity = OpacityVector::for_registry(&registry);
        let layers = (0..registry.len())
            .map(|i| layering.resolve_scene(0.0, i))
            .collect();

        Ok(Self {
            registry,
            smoother,
            dissolve,
            culler,
            layering,
            particle_table: cfg.particles,
            scheduler,
            device,
            factory: None,
            scene_listeners: Vec::new(),
            active,
            opacity,
            layers,
            particles,
            frame_token: None,
            dirty: false,
        })
    }

    /// Attach the factory used to spawn effect handles on mount.
    pub fn with_effect_factory(mut self, factory: impl EffectFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Start the frame loop at the host's current scroll position.
    ///
    /// The initial position is applied without easing so a reload mid-page does not sweep
    /// through every earlier scene.
    #[tracing::instrument(skip(self, host))]
    pub fn init(&mut self, host: &mut dyn FrameHost, initial: ScrollMetrics) {
        if self.scheduler.is_running() {
            return;
        }
        self.scheduler.start();
        self.smoother.jump_to(initial.fraction());
        self.recompute();
        self.dirty = false;
        self.ensure_frame(host);
        tracing::debug!(
            active = %self.active_key(),
            mounted = self.culler.mount_set(&self.registry).len(),
            "compositor initialized"
        );
    }

    /// Tear down: cancel outstanding frames and release every effect handle.
    ///
    /// Progress and scene-change subscriptions are kept, so a later [`ScrollCompositor::init`]
    /// resumes pushing to them. Safe to call more than once.
    #[tracing::instrument(skip(self, host))]
    pub fn dispose(&mut self, host: &mut dyn FrameHost) {
        if let Some(token) = self.frame_token.take() {
            host.cancel_frame(token);
        }
        self.scheduler.stop();
        for index in self.culler.unmount_all() {
            self.scheduler.release_scene(index);
        }
        self.scheduler.clear();
        self.dirty = false;
    }

    /// Whether the frame loop is running.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Record a host scroll event. The pipeline runs on the next frame, not here.
    pub fn on_scroll(&mut self, host: &mut dyn FrameHost, metrics: ScrollMetrics) {
        self.smoother.on_scroll(metrics);
        self.mark_dirty(host);
    }

    /// Record a raw scroll fraction computed by the host.
    pub fn on_raw_progress(&mut self, host: &mut dyn FrameHost, raw: f64) {
        self.smoother.set_raw(raw);
        self.mark_dirty(host);
    }

    /// Jump straight to `progress` and recompute immediately (deep links, tooling).
    pub fn seek(&mut self, progress: f64) {
        self.smoother.jump_to(progress);
        self.recompute();
        self.dirty = false;
    }

    /// Host frame callback for `token` at timestamp `now_ms`.
    ///
    /// Returns `None` without touching any state when `token` is not the outstanding request
    /// (a stale callback, or one that raced with dispose).
    pub fn frame(
        &mut self,
        host: &mut dyn FrameHost,
        token: FrameToken,
        now_ms: f64,
    ) -> Option<FrameStats> {
        if self.frame_token != Some(token) {
            tracing::trace!(
                ?token,
                outstanding = ?self.frame_token,
                "ignoring stale frame callback"
            );
            return None;
        }
        self.frame_token = None;
        if !self.scheduler.is_running() {
            return None;
        }

        let clock = self.scheduler.begin_frame(now_ms);
        let moved = self.smoother.advance().is_some();
        if moved || self.dirty {
            self.recompute();
            self.dirty = false;
        }
        let dispatch = self.scheduler.dispatch(&clock, self.smoother.smoothed());
        let stats = self.scheduler.finish_frame(clock, dispatch);

        self.ensure_frame(host);
        Some(stats)
    }

    /// Register an effect handle that is not tied to any scene.
    pub fn register_effect(&mut self, handle: Box<dyn EffectHandle>) -> EffectId {
        self.scheduler.register(None, handle)
    }

    /// Remove an effect handle.
    pub fn unregister_effect(&mut self, id: EffectId) -> bool {
        self.scheduler.unregister(id)
    }

    /// Subscribe to smoothed progress pushes.
    pub fn subscribe_progress(&mut self, listener: impl FnMut(f64) + 'static) -> SubscriptionId {
        self.smoother.subscribe(listener)
    }

    /// Remove a progress subscription.
    pub fn unsubscribe_progress(&mut self, id: SubscriptionId) -> bool {
        self.smoother.unsubscribe(id)
    }

    /// Subscribe to active-scene changes.
    pub fn on_scene_change(&mut self, listener: impl FnMut(&SceneChange) + 'static) {
        self.scene_listeners.push(Box::new(listener));
    }

    /// The scene table.
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    /// Resolved dissolve policies.
    pub fn dissolve(&self) -> &DissolveCalculator {
        &self.dissolve
    }

    /// Raw and smoothed progress.
    pub fn scroll_state(&self) -> ScrollState {
        self.smoother.state()
    }

    /// Active scene index and intra-scene progress.
    pub fn active(&self) -> ActiveSceneState {
        self.active
    }

    /// Key of the active scene.
    pub fn active_key(&self) -> &str {
        &self.registry.scenes()[self.active.scene_index].key
    }

    /// Per-scene opacity.
    pub fn opacity(&self) -> &OpacityVector {
        &self.opacity
    }

    /// Instantiated scenes.
    pub fn mount_set(&self) -> MountSet {
        self.culler.mount_set(&self.registry)
    }

    /// Whether the scene at `index` is instantiated.
    pub fn is_mounted(&self, index: usize) -> bool {
        self.culler.is_mounted(index)
    }

    /// Stacking of the scene at `index`.
    pub fn layer(&self, index: usize) -> Option<LayerState> {
        self.layers.get(index).copied()
    }

    /// Particle budget of the active scene.
    pub fn particles(&self) -> ParticleConfig {
        self.particles
    }

    /// Device class fixed at construction.
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Registered effect slots, including scene-owned ones.
    pub fn effect_count(&self) -> usize {
        self.scheduler.effect_count()
    }

    /// Effect slots owned by the scene at `index`.
    pub fn effects_owned_by(&self, index: usize) -> usize {
        self.scheduler.effects_owned_by(index)
    }

    /// Whether a frame request is outstanding with the host.
    pub fn has_pending_frame(&self) -> bool {
        self.frame_token.is_some()
    }

    /// Owned copy of everything published this frame.
    pub fn snapshot(&self) -> CompositorSnapshot {
        CompositorSnapshot {
            scroll: self.smoother.state(),
            active_key: self.active_key().to_string(),
            active: self.active,
            opacity: self.opacity.clone(),
            mounted: self.mount_set(),
            layers: self
                .registry
                .scenes()
                .iter()
                .zip(&self.layers)
                .map(|(s, l)| SceneLayer {
                    key: s.key.clone(),
                    layer: *l,
                })
                .collect(),
            particles: self.particles,
            device: self.device,
        }
    }

    fn mark_dirty(&mut self, host: &mut dyn FrameHost) {
        self.dirty = true;
        self.ensure_frame(host);
    }

    fn ensure_frame(&mut self, host: &mut dyn FrameHost) {
        if self.scheduler.is_running() && self.frame_token.is_none() {
            self.frame_token = Some(host.request_frame());
        }
    }

    fn recompute(&mut self) {
        let progress = self.smoother.smoothed();

        let previous = self.active.scene_index;
        self.active = self.registry.locate(progress);

        self.dissolve.fill(progress, &mut self.opacity);

        let diff = self.culler.update(self.active.scene_index, progress);
        self.apply_mount_diff(diff);

        for (i, layer) in self.layers.iter_mut().enumerate() {
            *layer = self.layering.resolve_scene(self.opacity.at(i), i);
        }

        if previous != self.active.scene_index {
            let key = self.active_key().to_string();
            self.particles = self.particle_table.select(&key, self.device);
            tracing::debug!(
                from = previous,
                to = self.active.scene_index,
                scene = %key,
                "active scene changed"
            );
            let change = SceneChange {
                from: previous,
                to: self.active.scene_index,
                key,
            };
            for l in &mut self.scene_listeners {
                l(&change);
            }
        }
    }

    fn apply_mount_diff(&mut self, diff: MountDiff) {
        for index in diff.unmounted {
            let released = self.scheduler.release_scene(index);
            tracing::debug!(
                scene = %self.registry.scenes()[index].key,
                released,
                "scene unmounted"
            );
        }
        for index in diff.mounted {
            let scene = &self.registry.scenes()[index];
            let budget = self.particle_table.select(&scene.key, self.device);
            let handles = match self.factory.as_mut() {
                Some(f) => f.spawn(scene, budget),
                None => Vec::new(),
            };
            tracing::debug!(scene = %scene.key, effects = handles.len(), "scene mounted");
            for h in handles {
                self.scheduler.register(Some(index), h);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/compositor.rs"]
mod tests;
