//! Document-level setup: the engine style sheet and reduced motion
//!
//! Both run once per document. The style sheet is registered under a fixed
//! id so a second engine on the same page doesn't insert it again.

use glint_core::VisualTree;

use crate::config::{EngineConfig, ReducedMotionConfig};

/// Id the engine style sheet is registered under
pub const ENGINE_STYLE_SHEET_ID: &str = "glint-engine-styles";

/// Insert `css` under `id` unless a sheet with that id already exists
///
/// Returns whether the sheet was inserted.
pub fn ensure_style_sheet<T: VisualTree + ?Sized>(tree: &mut T, id: &str, css: &str) -> bool {
    if tree.has_style_sheet(id) {
        tracing::debug!("style sheet {} already registered", id);
        return false;
    }
    tree.insert_style_sheet(id, css);
    tracing::debug!("style sheet {} registered ({} bytes)", id, css.len());
    true
}

/// Rules the engine's effects rely on
///
/// Covers the cursor marker and the reveal transition, keyed on the
/// configured class names and timed by the `--transition-*` properties so
/// that reduced motion collapses them.
pub fn engine_style_sheet(config: &EngineConfig) -> String {
    let marker = &config.cursor.marker_class;
    let visible = &config.reveal.visible_class;

    let mut css = format!(
        ".{marker} {{ position: fixed; pointer-events: none; \
         transform: translate(-50%, -50%); \
         transition: opacity var(--transition-base, 300ms) ease; }}\n"
    );
    for class in config.reveal.selector.split(',') {
        let class = class.trim().trim_start_matches('.');
        if class.is_empty() {
            continue;
        }
        css.push_str(&format!(
            ".{class} {{ opacity: 0; transform: translateY(30px); \
             transition: opacity var(--transition-slow, 600ms) ease, \
             transform var(--transition-slow, 600ms) ease; }}\n\
             .{class}.{visible} {{ opacity: 1; transform: translateY(0); }}\n"
        ));
    }
    css
}

/// Collapse transition durations when the platform prefers reduced motion
///
/// Returns whether anything was changed.
pub fn apply_reduced_motion<T: VisualTree + ?Sized>(
    tree: &mut T,
    config: &ReducedMotionConfig,
) -> bool {
    if !tree.prefers_reduced_motion() {
        return false;
    }
    for property in &config.properties {
        tree.set_custom_property(property, &config.value);
    }
    tracing::debug!(
        "reduced motion: {} propert(ies) set to {}",
        config.properties.len(),
        config.value
    );
    true
}
