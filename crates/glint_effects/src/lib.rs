//! Glint Effects
//!
//! Viewport-triggered and pointer-driven effects over a [`VisualTree`]:
//!
//! - **Reveal**: one-shot, staggered "visible" class when elements scroll in
//! - **Counters**: numeric text animated from zero with easing, then restored
//! - **Cursor Follower**: a marker that chases the pointer every frame
//! - **Tilt**: pointer-relative 3D rotation of cards
//!
//! All per-element state lives in side tables keyed by [`ElementId`]; the
//! tree itself only ever sees classes, text and inline styles being written.
//! Start with [`Engine::initialize`].
//!
//! [`VisualTree`]: glint_core::VisualTree
//! [`ElementId`]: glint_core::ElementId

pub mod config;
pub mod counter;
pub mod engine;
pub mod error;
pub mod follower;
pub mod intersection;
pub mod motion;
pub mod number;
pub mod reveal;
pub mod tilt;

pub use config::{
    CounterConfig, CursorConfig, EngineConfig, ReducedMotionConfig, RevealConfig, TiltConfig,
};
pub use counter::{CounterAnimator, CounterPhase, CounterTarget};
pub use engine::{ControllerId, Engine, EngineHandles};
pub use error::{EngineError, Result};
pub use follower::CursorFollower;
pub use intersection::{visible_ratio, IntersectionEntry, IntersectionObserver};
pub use motion::{apply_reduced_motion, engine_style_sheet, ensure_style_sheet, ENGINE_STYLE_SHEET_ID};
pub use number::{parse_numeric_literal, Grouping, NumericLiteral};
pub use reveal::{RevealController, RevealState};
pub use tilt::{tilt_for, TiltController};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::{ControllerId, Engine, EngineHandles};
    pub use crate::error::{EngineError, Result};
    pub use glint_animation::{Clock, ManualClock, SystemClock};
    pub use glint_core::{InputEvent, PageTree, VisualTree};
}
