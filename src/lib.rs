//! Cinescroll turns a page's scroll position into the visual state of a multi-chapter
//! cinematic experience.
//!
//! One [`ScrollCompositor`] owns the whole pipeline and runs it once per animation frame:
//!
//! - [`ScrollSmoother`] eases raw scroll input into a smoothed progress value
//! - [`SceneRegistry::locate`] finds the active chapter
//! - [`DissolveCalculator`] cross-fades neighbouring scenes
//! - [`MountCuller`] keeps only nearby scenes instantiated, with hysteresis
//! - [`LayerResolver`] and [`ParticleTable`] derive stacking and particle budgets
//! - [`FrameScheduler`] drives registered per-frame effects with fault isolation
//!
//! Configuration is a single JSON document ([`CompositorConfig`]); the built-in seven-chapter
//! table is used when none is given.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod cull;
pub(crate) mod dissolve;
pub(crate) mod frame;
pub(crate) mod layer;
pub(crate) mod particles;
pub(crate) mod scene;
pub(crate) mod scroll;
pub(crate) mod session;

pub use crate::foundation::core::{
    DeviceClass, HostCapabilities, MOBILE_MAX_VIEWPORT_WIDTH, ScrollMetrics,
};
pub use crate::foundation::error::{CinescrollError, CinescrollResult, EffectError};

pub use crate::animation::ease::{Ease, cosine_fade_out, sine_fade_in};
pub use crate::config::model::{
    CompositorConfig, CullingConfig, DissolveConfig, LayerConfig, SchedulerConfig,
    SmoothingConfig, builtin_fade_overrides, builtin_scenes,
};
pub use crate::cull::culler::{MountCuller, MountDiff, MountSet};
pub use crate::dissolve::calculator::{DissolveCalculator, OpacityVector, standard_opacity};
pub use crate::dissolve::policy::{EdgePolicy, FadeOverride, SceneFade};
pub use crate::frame::host::{FrameHost, FrameToken, HeadlessHost};
pub use crate::frame::scheduler::{
    DispatchStats, EffectHandle, EffectId, FrameClock, FrameScheduler, FrameStats,
};
pub use crate::layer::resolver::{LayerResolver, LayerState};
pub use crate::particles::selector::{ParticleConfig, ParticleProfile, ParticleTable};
pub use crate::scene::descriptor::{SceneDescriptor, SceneRange};
pub use crate::scene::registry::{ActiveSceneState, SceneRegistry};
pub use crate::scroll::smoother::{ScrollSmoother, ScrollState, SubscriptionId};
pub use crate::session::compositor::{
    CompositorSnapshot, EffectFactory, SceneChange, SceneLayer, ScrollCompositor,
};
