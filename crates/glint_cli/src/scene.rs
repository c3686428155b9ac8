//! Scene files
//!
//! A scene describes a page as a flat list of elements in document order.
//! Parents are referenced by name and must appear earlier in the list;
//! elements without a parent go under the body.
//!
//! ```toml
//! [viewport]
//! width = 1280
//! height = 800
//!
//! [[elements]]
//! name = "users"
//! classes = ["stat-number"]
//! text = "1,200+"
//! bounds = [0, 100, 200, 40]
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use glint_core::{ElementId, PageTree, Rect, VisualTree};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub viewport: ViewportDef,
    #[serde(default)]
    pub elements: Vec<ElementDef>,
}

#[derive(Debug, Deserialize)]
pub struct ViewportDef {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default)]
    pub reduced_motion: bool,
}

fn default_width() -> f32 {
    1280.0
}

fn default_height() -> f32 {
    800.0
}

impl Default for ViewportDef {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            reduced_motion: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ElementDef {
    /// Reported in the output when set
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Document-space `[x, y, width, height]`
    pub bounds: [f32; 4],
    #[serde(default)]
    pub animation_delay_ms: Option<u64>,
}

/// A built page plus its named elements in document order
pub struct BuiltScene {
    pub tree: PageTree,
    pub named: Vec<(String, ElementId)>,
}

impl Scene {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse scene")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("In scene {}", path.display()))
    }

    /// Build the page tree
    pub fn build(&self) -> Result<BuiltScene> {
        let mut tree = PageTree::new(self.viewport.width, self.viewport.height);
        tree.set_reduced_motion(self.viewport.reduced_motion);

        let mut by_name: HashMap<&str, ElementId> = HashMap::new();
        let mut named = Vec::new();

        for (index, def) in self.elements.iter().enumerate() {
            let parent = match &def.parent {
                Some(parent) => *by_name.get(parent.as_str()).with_context(|| {
                    format!("Element {} refers to unknown parent '{}'", index, parent)
                })?,
                None => tree.body(),
            };

            let classes: Vec<&str> = def.classes.iter().map(String::as_str).collect();
            let [x, y, w, h] = def.bounds;
            let id = tree.append(parent, &classes, Rect::new(x, y, w, h))?;

            if let Some(text) = &def.text {
                tree.set_text(id, text)?;
            }
            if let Some(ms) = def.animation_delay_ms {
                tree.style_mut(id)?.animation_delay = Some(Duration::from_millis(ms));
            }
            if let Some(name) = &def.name {
                if by_name.insert(name.as_str(), id).is_some() {
                    anyhow::bail!("Duplicate element name '{}'", name);
                }
                named.push((name.clone(), id));
            }
        }

        tracing::debug!(
            "scene built: {} element(s), {} named",
            self.elements.len(),
            named.len()
        );
        Ok(BuiltScene { tree, named })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_scene() {
        let scene = Scene::from_toml_str(
            r#"
            [viewport]
            width = 1024
            height = 700
            reduced_motion = true

            [[elements]]
            name = "section"
            bounds = [0, 0, 1024, 400]

            [[elements]]
            name = "card"
            parent = "section"
            classes = ["fade-in", "tech-card"]
            text = "Fast"
            bounds = [10, 10, 300, 200]
            animation_delay_ms = 250
            "#,
        )
        .unwrap();
        let built = scene.build().unwrap();

        assert_eq!(built.named.len(), 2);
        let section = built.named[0].1;
        let card = built.named[1].1;
        assert_eq!(built.tree.parent(card), Some(section));
        assert!(built.tree.has_class(card, "tech-card"));
        assert_eq!(built.tree.text(card), Some("Fast"));
        assert_eq!(
            built.tree.style(card).unwrap().animation_delay,
            Some(Duration::from_millis(250))
        );
        assert!(built.tree.prefers_reduced_motion());
        assert_eq!(built.tree.viewport().width(), 1024.0);
    }

    #[test]
    fn test_unknown_parent_is_error() {
        let scene = Scene::from_toml_str(
            r#"
            [[elements]]
            parent = "missing"
            bounds = [0, 0, 10, 10]
            "#,
        )
        .unwrap();
        assert!(scene.build().is_err());
    }

    #[test]
    fn test_duplicate_name_is_error() {
        let scene = Scene::from_toml_str(
            r#"
            [[elements]]
            name = "a"
            bounds = [0, 0, 10, 10]

            [[elements]]
            name = "a"
            bounds = [0, 20, 10, 10]
            "#,
        )
        .unwrap();
        assert!(scene.build().is_err());
    }

    #[test]
    fn test_defaults() {
        let scene = Scene::from_toml_str("").unwrap();
        assert_eq!(scene.viewport.width, 1280.0);
        assert!(scene.elements.is_empty());
    }
}
