//! Engine configuration
//!
//! Every field has a default matching the stock page, so an empty TOML
//! document is a complete configuration:
//!
//! ```toml
//! min_viewport_width = 768.0
//!
//! [counter]
//! duration_ms = 1500
//! grouping = "western"
//! ```

use std::fs;
use std::path::Path;

use glint_animation::Easing;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::number::Grouping;

// =============================================================================
// EngineConfig
// =============================================================================

/// Top-level engine configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Cursor follower and tilt are skipped below this viewport width
    #[serde(default = "default_min_viewport_width")]
    pub min_viewport_width: f32,
    /// Register the engine's style sheet during initialization
    #[serde(default = "default_true")]
    pub inject_styles: bool,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub tilt: TiltConfig,
    #[serde(default)]
    pub reduced_motion: ReducedMotionConfig,
}

fn default_min_viewport_width() -> f32 {
    768.0
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_viewport_width: default_min_viewport_width(),
            inject_styles: true,
            reveal: RevealConfig::default(),
            counter: CounterConfig::default(),
            cursor: CursorConfig::default(),
            tilt: TiltConfig::default(),
            reduced_motion: ReducedMotionConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        tracing::debug!("loading engine config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Render as a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !self.min_viewport_width.is_finite() || self.min_viewport_width < 0.0 {
            return invalid("min_viewport_width must be a non-negative number");
        }

        check_selector("reveal.selector", &self.reveal.selector)?;
        check_threshold("reveal.threshold", self.reveal.threshold)?;
        if self.reveal.visible_class.trim().is_empty() {
            return invalid("reveal.visible_class must not be empty");
        }

        check_selector("counter.selector", &self.counter.selector)?;
        check_threshold("counter.threshold", self.counter.threshold)?;
        if self.counter.duration_ms == 0 {
            return invalid("counter.duration_ms must be greater than zero");
        }

        if self.cursor.marker_class.trim().is_empty() {
            return invalid("cursor.marker_class must not be empty");
        }
        if !(self.cursor.smoothing > 0.0 && self.cursor.smoothing <= 1.0) {
            return invalid(format!(
                "cursor.smoothing must be in (0, 1], got {}",
                self.cursor.smoothing
            ));
        }

        check_selector("tilt.selector", &self.tilt.selector)?;
        if !self.tilt.divisor.is_finite() || self.tilt.divisor == 0.0 {
            return invalid("tilt.divisor must be a non-zero number");
        }
        if !self.tilt.perspective.is_finite() || self.tilt.perspective <= 0.0 {
            return invalid("tilt.perspective must be positive");
        }
        if !self.tilt.lift.is_finite() {
            return invalid("tilt.lift must be a finite number");
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> Result<()> {
    Err(EngineError::InvalidConfig(message.into()))
}

fn check_selector(key: &str, selector: &str) -> Result<()> {
    let has_class = selector
        .split(',')
        .any(|part| !part.trim().trim_start_matches('.').is_empty());
    if has_class {
        Ok(())
    } else {
        invalid(format!("{} must name at least one class", key))
    }
}

fn check_threshold(key: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        invalid(format!("{} must be in [0, 1], got {}", key, value))
    }
}

// =============================================================================
// Controller sections
// =============================================================================

/// Scroll-triggered reveal
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RevealConfig {
    #[serde(default = "default_reveal_selector")]
    pub selector: String,
    /// Visible fraction that counts as "in view"
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f32,
    /// Delay added per position in scan order
    #[serde(default = "default_stagger_step_ms")]
    pub stagger_step_ms: u64,
    /// Class that starts the host's reveal transition
    #[serde(default = "default_visible_class")]
    pub visible_class: String,
}

fn default_reveal_selector() -> String {
    ".fade-in".to_string()
}

fn default_reveal_threshold() -> f32 {
    0.15
}

fn default_stagger_step_ms() -> u64 {
    100
}

fn default_visible_class() -> String {
    "visible".to_string()
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: default_reveal_selector(),
            threshold: default_reveal_threshold(),
            stagger_step_ms: default_stagger_step_ms(),
            visible_class: default_visible_class(),
        }
    }
}

/// Animated numeric counters
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CounterConfig {
    #[serde(default = "default_counter_selector")]
    pub selector: String,
    #[serde(default = "default_counter_threshold")]
    pub threshold: f32,
    #[serde(default = "default_counter_duration_ms")]
    pub duration_ms: u64,
    #[serde(default)]
    pub easing: Easing,
    /// Used when the literal's own separators don't settle the convention
    #[serde(default)]
    pub grouping: Grouping,
}

fn default_counter_selector() -> String {
    ".stat-number, .stat-value, .problem-stat, .tech-value".to_string()
}

fn default_counter_threshold() -> f32 {
    0.5
}

fn default_counter_duration_ms() -> u64 {
    2000
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            selector: default_counter_selector(),
            threshold: default_counter_threshold(),
            duration_ms: default_counter_duration_ms(),
            easing: Easing::default(),
            grouping: Grouping::default(),
        }
    }
}

/// Smoothed cursor marker
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CursorConfig {
    /// Class of the marker element created under the body
    #[serde(default = "default_marker_class")]
    pub marker_class: String,
    /// Fraction of the remaining gap closed per frame
    #[serde(default = "default_smoothing")]
    pub smoothing: f32,
}

fn default_marker_class() -> String {
    "cursor-glow".to_string()
}

fn default_smoothing() -> f32 {
    0.1
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            marker_class: default_marker_class(),
            smoothing: default_smoothing(),
        }
    }
}

/// Pointer-relative card tilt
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TiltConfig {
    #[serde(default = "default_tilt_selector")]
    pub selector: String,
    /// Pixels of pointer offset per degree of rotation
    #[serde(default = "default_divisor")]
    pub divisor: f32,
    #[serde(default = "default_perspective")]
    pub perspective: f32,
    /// Upward translation while tilted, in pixels
    #[serde(default = "default_lift")]
    pub lift: f32,
}

fn default_tilt_selector() -> String {
    ".problem-card, .tech-card, .step-card, .team-card, .impact-stat-card".to_string()
}

fn default_divisor() -> f32 {
    20.0
}

fn default_perspective() -> f32 {
    1000.0
}

fn default_lift() -> f32 {
    10.0
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            selector: default_tilt_selector(),
            divisor: default_divisor(),
            perspective: default_perspective(),
            lift: default_lift(),
        }
    }
}

/// Custom properties collapsed when the platform prefers reduced motion
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ReducedMotionConfig {
    #[serde(default = "default_motion_properties")]
    pub properties: Vec<String>,
    #[serde(default = "default_collapsed_value")]
    pub value: String,
}

fn default_motion_properties() -> Vec<String> {
    vec![
        "--transition-fast".to_string(),
        "--transition-base".to_string(),
        "--transition-slow".to_string(),
    ]
}

fn default_collapsed_value() -> String {
    "0ms".to_string()
}

impl Default for ReducedMotionConfig {
    fn default() -> Self {
        Self {
            properties: default_motion_properties(),
            value: default_collapsed_value(),
        }
    }
}
