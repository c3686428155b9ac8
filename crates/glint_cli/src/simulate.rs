//! Headless simulation
//!
//! Drives an [`Engine`] over a scene with a manual clock: every frame the
//! clock advances by a fixed step, script steps that have come due are
//! applied, then the engine renders the frame.

use std::fmt;

use anyhow::Result;
use glint_animation::{Clock, ManualClock};
use glint_core::{InputEvent, PageTree, VisualTree};
use glint_effects::{Engine, EngineConfig};
use serde::Serialize;

use crate::scene::Scene;
use crate::script::{Action, Script};

/// Final state of one named element
#[derive(Debug, Serialize)]
pub struct ElementReport {
    pub name: String,
    pub text: Option<String>,
    pub classes: Vec<String>,
    /// Inline style as CSS declarations
    pub style: String,
}

/// Outcome of a simulation run
#[derive(Debug, Serialize)]
pub struct Report {
    pub frames: u64,
    pub elapsed_ms: f64,
    pub controllers: usize,
    pub elements: Vec<ElementReport>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} frame(s), {:.0}ms simulated, {} controller(s)",
            self.frames, self.elapsed_ms, self.controllers
        )?;
        for element in &self.elements {
            writeln!(f)?;
            writeln!(f, "{}", element.name)?;
            if let Some(text) = &element.text {
                writeln!(f, "  text:    {:?}", text)?;
            }
            writeln!(f, "  classes: {}", element.classes.join(" "))?;
            if !element.style.is_empty() {
                writeln!(f, "  style:   {}", element.style)?;
            }
        }
        Ok(())
    }
}

/// Run `script` against `scene`
pub fn run(scene: &Scene, script: &Script, config: EngineConfig, frame_ms: f64) -> Result<Report> {
    if !(frame_ms.is_finite() && frame_ms > 0.0) {
        anyhow::bail!("frame step must be a positive number of milliseconds, got {}", frame_ms);
    }

    let built = scene.build()?;
    let mut tree = built.tree;

    let clock = ManualClock::new();
    let (mut engine, handles) = Engine::initialize(&mut tree, config, clock.clone())?;
    tracing::info!(
        "simulating {} element(s) for {}ms at {}ms per frame",
        tree.len(),
        script.end_ms,
        frame_ms
    );

    let mut pending = script.steps.iter().peekable();
    loop {
        let now = clock.now().as_millis();
        while let Some(step) = pending.next_if(|step| step.at_ms <= now) {
            tracing::debug!("{:.1}ms: {:?}", now, step.action);
            apply(&mut tree, &mut engine, &step.action);
        }
        engine.frame(&mut tree);

        if now >= script.end_ms {
            break;
        }
        clock.advance(frame_ms);
    }

    let elements = built
        .named
        .iter()
        .map(|(name, id)| ElementReport {
            name: name.clone(),
            text: tree.text(*id).map(str::to_string),
            classes: tree.classes(*id).to_vec(),
            style: tree.style(*id).map(|s| s.to_css()).unwrap_or_default(),
        })
        .collect();

    Ok(Report {
        frames: engine.frame_count(),
        elapsed_ms: clock.now().as_millis(),
        controllers: handles.iter().filter(|id| engine.is_active(*id)).count(),
        elements,
    })
}

fn apply(tree: &mut PageTree, engine: &mut Engine<ManualClock>, action: &Action) {
    let event = match *action {
        Action::Scroll { x, y } => {
            tree.scroll_to(x, y);
            InputEvent::Scrolled
        }
        Action::Resize { width, height } => {
            tree.resize(width, height);
            InputEvent::Resized
        }
        Action::Pointer { x, y } => InputEvent::PointerMoved { x, y },
        Action::PointerLeave => InputEvent::PointerLeftWindow,
        Action::PointerEnter => InputEvent::PointerEnteredWindow,
    };
    engine.handle_input(tree, event);
}
