//! Interaction scripts
//!
//! ```toml
//! end_ms = 3000
//!
//! [[steps]]
//! at_ms = 500
//! action = { scroll = { y = 900 } }
//!
//! [[steps]]
//! at_ms = 800
//! action = { pointer = { x = 400, y = 300 } }
//!
//! [[steps]]
//! at_ms = 1200
//! action = "pointer_leave"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Script {
    /// Simulated time at which the run stops
    #[serde(default = "default_end_ms")]
    pub end_ms: f64,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_end_ms() -> f64 {
    3000.0
}

impl Default for Script {
    fn default() -> Self {
        Self {
            end_ms: default_end_ms(),
            steps: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Step {
    pub at_ms: f64,
    pub action: Action,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Scroll the page to an absolute offset
    Scroll {
        #[serde(default)]
        x: f32,
        y: f32,
    },
    Resize { width: f32, height: f32 },
    /// Move the pointer to a client position
    Pointer { x: f32, y: f32 },
    PointerLeave,
    PointerEnter,
}

impl Script {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut script: Script = toml::from_str(content).context("Failed to parse script")?;
        if !script.end_ms.is_finite() || script.end_ms < 0.0 {
            anyhow::bail!("end_ms must be a non-negative number");
        }
        if let Some(step) = script.steps.iter().find(|s| !s.at_ms.is_finite()) {
            anyhow::bail!("step time must be finite, got {}", step.at_ms);
        }
        script.steps.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("In script {}", path.display()))
    }
}
