//! Floorplay replays traces of hardware activity (per-unit occupancy and
//! stall metrics plus discrete data transfers between named die blocks)
//! and turns each snapshot into transient visual state: gauge levels,
//! colors and moving flow markers.
//!
//! The crate renders nothing. A host supplies a block layout, pumps the
//! engine with a logical clock, and draws whatever [`Engine::sample`]
//! returns:
//!
//! - Load or generate a [`Trace`] through a [`TraceSource`]
//! - Build a [`BlockRegistry`] (or take the standard [`FloorPlan`])
//! - Drive an [`Engine`] with `tick(now_ms)` / `sample(now_ms)`
#![forbid(unsafe_code)]

pub mod animator;
pub mod clock;
pub mod color;
pub mod ease;
pub mod engine;
pub mod error;
pub mod processor;
pub mod registry;
pub mod source;
pub mod trace;
pub mod visibility;

pub use animator::{FlowAnimator, FlowMarker};
pub use clock::PlaybackClock;
pub use color::Rgba8;
pub use ease::Ease;
pub use engine::{Engine, HoverStats, Scene};
pub use error::{FloorplayError, FloorplayResult};
pub use processor::{FrameProcessor, GaugeUpdate, UnitVisualState};
pub use registry::{BlockRegistry, FloorPlan};
pub use source::{SyntheticConfig, TraceSource};
pub use trace::{Flow, Frame, Trace, TraceArtifact, UnitStat};
pub use visibility::{Layer, VisibilityFilter};
