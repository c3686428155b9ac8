//! Engine entry point
//!
//! [`Engine::initialize`] is the only setup step: it registers the style
//! sheet, applies reduced motion, resolves every selector once and builds the
//! controllers. After that the host feeds the engine through exactly two
//! calls: [`Engine::handle_input`] for window events and [`Engine::frame`]
//! once per repaint.
//!
//! # Example
//!
//! ```
//! use glint_animation::ManualClock;
//! use glint_core::{PageTree, Rect, VisualTree};
//! use glint_effects::{Engine, EngineConfig};
//!
//! let mut tree = PageTree::new(1280.0, 800.0);
//! let body = tree.body();
//! let stat = tree.append(body, &["stat-number"], Rect::new(0.0, 0.0, 200.0, 40.0)).unwrap();
//! tree.set_text(stat, "1,200+").unwrap();
//!
//! let clock = ManualClock::new();
//! let (mut engine, _handles) =
//!     Engine::initialize(&mut tree, EngineConfig::default(), clock.clone()).unwrap();
//!
//! engine.frame(&mut tree);
//! assert_eq!(tree.text(stat), Some("0+"));
//!
//! clock.advance(2000.0);
//! engine.frame(&mut tree);
//! assert_eq!(tree.text(stat), Some("1,200+"));
//! ```

use glint_animation::{Clock, Frame, FrameClock, SystemClock};
use glint_core::{InputEvent, RoleSelector, VisualTree};
use slotmap::{new_key_type, SlotMap};

use crate::config::EngineConfig;
use crate::counter::CounterAnimator;
use crate::error::Result;
use crate::follower::CursorFollower;
use crate::motion::{
    apply_reduced_motion, engine_style_sheet, ensure_style_sheet, ENGINE_STYLE_SHEET_ID,
};
use crate::reveal::RevealController;
use crate::tilt::TiltController;

new_key_type! {
    /// Handle to a controller owned by an [`Engine`]
    pub struct ControllerId;
}

/// The four effect controllers
#[derive(Debug)]
enum Controller {
    Reveal(RevealController),
    Counter(CounterAnimator),
    Cursor(CursorFollower),
    Tilt(TiltController),
}

/// Handles returned by [`Engine::initialize`], one per created controller
///
/// `cursor` and `tilt` are `None` when the viewport was too narrow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineHandles {
    pub reveal: Option<ControllerId>,
    pub counter: Option<ControllerId>,
    pub cursor: Option<ControllerId>,
    pub tilt: Option<ControllerId>,
}

impl EngineHandles {
    pub fn iter(&self) -> impl Iterator<Item = ControllerId> {
        [self.reveal, self.counter, self.cursor, self.tilt]
            .into_iter()
            .flatten()
    }
}

pub struct Engine<C: Clock = SystemClock> {
    config: EngineConfig,
    frames: FrameClock<C>,
    controllers: SlotMap<ControllerId, Controller>,
}

impl<C: Clock> Engine<C> {
    /// Set up every effect on `tree`
    ///
    /// Fails only on invalid configuration. Missing elements leave a
    /// controller with nothing to track, and a viewport narrower than
    /// `min_viewport_width` skips the cursor follower and tilt.
    pub fn initialize<T: VisualTree + ?Sized>(
        tree: &mut T,
        config: EngineConfig,
        clock: C,
    ) -> Result<(Self, EngineHandles)> {
        config.validate()?;

        if config.inject_styles {
            ensure_style_sheet(tree, ENGINE_STYLE_SHEET_ID, &engine_style_sheet(&config));
        }
        apply_reduced_motion(tree, &config.reduced_motion);

        let mut controllers = SlotMap::with_key();
        let mut handles = EngineHandles::default();

        let fade_ins = RoleSelector::parse(&config.reveal.selector).resolve(tree);
        handles.reveal = Some(controllers.insert(Controller::Reveal(RevealController::new(
            &fade_ins,
            &config.reveal,
        ))));

        let stats = RoleSelector::parse(&config.counter.selector).resolve(tree);
        handles.counter = Some(controllers.insert(Controller::Counter(CounterAnimator::new(
            &stats,
            &config.counter,
        ))));

        let width = tree.viewport().width();
        if width >= config.min_viewport_width {
            match CursorFollower::new(tree, &config.cursor) {
                Ok(follower) => {
                    handles.cursor = Some(controllers.insert(Controller::Cursor(follower)));
                }
                Err(err) => tracing::debug!("cursor follower disabled: {}", err),
            }

            let cards = RoleSelector::parse(&config.tilt.selector).resolve(tree);
            handles.tilt = Some(controllers.insert(Controller::Tilt(TiltController::new(
                cards,
                &config.tilt,
            ))));
        } else {
            tracing::debug!(
                "viewport {}px is below {}px: cursor follower and tilt disabled",
                width,
                config.min_viewport_width
            );
        }

        let mut engine = Self {
            config,
            frames: FrameClock::new(clock),
            controllers,
        };
        engine.refresh_visibility(tree);

        tracing::debug!("engine initialized with {} controller(s)", engine.controllers.len());
        Ok((engine, handles))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        self.frames.clock()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames.frame_count()
    }

    pub fn controller_count(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_active(&self, id: ControllerId) -> bool {
        self.controllers.contains_key(id)
    }

    // =========================================================================
    // Controller access
    // =========================================================================

    pub fn reveal(&self, id: ControllerId) -> Option<&RevealController> {
        match self.controllers.get(id)? {
            Controller::Reveal(reveal) => Some(reveal),
            _ => None,
        }
    }

    pub fn counter(&self, id: ControllerId) -> Option<&CounterAnimator> {
        match self.controllers.get(id)? {
            Controller::Counter(counter) => Some(counter),
            _ => None,
        }
    }

    pub fn cursor(&self, id: ControllerId) -> Option<&CursorFollower> {
        match self.controllers.get(id)? {
            Controller::Cursor(cursor) => Some(cursor),
            _ => None,
        }
    }

    pub fn tilt(&self, id: ControllerId) -> Option<&TiltController> {
        match self.controllers.get(id)? {
            Controller::Tilt(tilt) => Some(tilt),
            _ => None,
        }
    }

    // =========================================================================
    // Host entry points
    // =========================================================================

    /// Dispatch a window-level event
    pub fn handle_input<T: VisualTree + ?Sized>(&mut self, tree: &mut T, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => {
                for controller in self.controllers.values_mut() {
                    match controller {
                        Controller::Cursor(cursor) => cursor.on_pointer_move(x, y),
                        Controller::Tilt(tilt) => tilt.on_pointer_move(tree, x, y),
                        _ => {}
                    }
                }
            }
            InputEvent::PointerLeftWindow => {
                for controller in self.controllers.values_mut() {
                    match controller {
                        Controller::Cursor(cursor) => cursor.on_pointer_left_window(tree),
                        Controller::Tilt(tilt) => tilt.on_pointer_exit(tree),
                        _ => {}
                    }
                }
            }
            InputEvent::PointerEnteredWindow => {
                for controller in self.controllers.values_mut() {
                    if let Controller::Cursor(cursor) = controller {
                        cursor.on_pointer_entered_window(tree);
                    }
                }
            }
            InputEvent::Scrolled | InputEvent::Resized => self.refresh_visibility(tree),
        }
    }

    /// Re-measure visibility and trigger reveals and counters
    pub fn refresh_visibility<T: VisualTree + ?Sized>(&mut self, tree: &mut T) {
        let now = self.frames.now();
        for controller in self.controllers.values_mut() {
            match controller {
                Controller::Reveal(reveal) => {
                    reveal.update(tree);
                }
                Controller::Counter(counter) => {
                    counter.update(tree, now);
                }
                _ => {}
            }
        }
    }

    /// Advance one repaint: render running counters and move the cursor marker
    pub fn frame<T: VisualTree + ?Sized>(&mut self, tree: &mut T) -> Frame {
        let frame = self.frames.next_frame();
        for controller in self.controllers.values_mut() {
            match controller {
                Controller::Counter(counter) => {
                    counter.tick(tree, frame.time);
                }
                Controller::Cursor(cursor) => {
                    cursor.tick(tree);
                }
                _ => {}
            }
        }
        frame
    }

    /// Whether the host should keep scheduling frames
    ///
    /// True while a counter runs or a cursor follower is active.
    pub fn needs_frame(&self) -> bool {
        self.controllers.values().any(|controller| match controller {
            Controller::Counter(counter) => counter.is_running(),
            Controller::Cursor(_) => true,
            _ => false,
        })
    }

    /// Remove a controller
    ///
    /// A disposed cursor follower hides its marker and disposed tilt returns
    /// its cards to neutral. Returns `false` for an unknown or already
    /// disposed handle.
    pub fn dispose<T: VisualTree + ?Sized>(&mut self, tree: &mut T, id: ControllerId) -> bool {
        let Some(controller) = self.controllers.remove(id) else {
            return false;
        };
        match controller {
            Controller::Cursor(mut cursor) => cursor.on_pointer_left_window(tree),
            Controller::Tilt(mut tilt) => tilt.reset_all(tree),
            Controller::Reveal(_) | Controller::Counter(_) => {}
        }
        tracing::debug!("controller {:?} disposed", id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use glint_animation::ManualClock;
    use glint_core::{ElementId, ElementTransform, PageTree, Rect};
    use std::time::Duration;

    struct Page {
        tree: PageTree,
        stat: ElementId,
        fades: Vec<ElementId>,
        card: ElementId,
    }

    fn page(width: f32) -> Page {
        let mut tree = PageTree::new(width, 800.0);
        let body = tree.body();
        let stat = tree
            .append(body, &["stat-number"], Rect::new(0.0, 0.0, 200.0, 40.0))
            .unwrap();
        tree.set_text(stat, "1,200+").unwrap();
        let fades = (0..3)
            .map(|i| {
                tree.append(body, &["fade-in"], Rect::new(0.0, 100.0 + i as f32 * 50.0, 200.0, 40.0))
                    .unwrap()
            })
            .collect();
        let card = tree
            .append(body, &["tech-card"], Rect::new(300.0, 300.0, 200.0, 200.0))
            .unwrap();
        Page {
            tree,
            stat,
            fades,
            card,
        }
    }

    fn start(page: &mut Page) -> (Engine<ManualClock>, EngineHandles, ManualClock) {
        let clock = ManualClock::new();
        let (engine, handles) =
            Engine::initialize(&mut page.tree, EngineConfig::default(), clock.clone()).unwrap();
        (engine, handles, clock)
    }

    #[test]
    fn test_counter_end_to_end() {
        let mut page = page(1280.0);
        let (mut engine, handles, clock) = start(&mut page);
        assert!(engine.counter(handles.counter.unwrap()).unwrap().is_counted(page.stat));

        engine.frame(&mut page.tree);
        assert_eq!(page.tree.text(page.stat), Some("0+"));
        assert!(engine.needs_frame());

        clock.advance(2000.0);
        let frame = engine.frame(&mut page.tree);
        assert_eq!(frame.index, 1);
        assert_eq!(frame.delta_ms, 2000.0);
        assert_eq!(page.tree.text(page.stat), Some("1,200+"));
        assert!(!engine.counter(handles.counter.unwrap()).unwrap().is_running());
    }

    #[test]
    fn test_initial_pass_reveals_visible_elements() {
        let mut page = page(1280.0);
        let _ = start(&mut page);
        let delays: Vec<_> = page
            .fades
            .iter()
            .map(|id| page.tree.style(*id).unwrap().transition_delay)
            .collect();
        assert_eq!(
            delays,
            vec![
                Some(Duration::ZERO),
                Some(Duration::from_millis(100)),
                Some(Duration::from_millis(200))
            ]
        );
        assert!(page.fades.iter().all(|id| page.tree.has_class(*id, "visible")));
    }

    #[test]
    fn test_scroll_triggers_reveal() {
        let mut page = page(1280.0);
        let body = page.tree.body();
        let late = page
            .tree
            .append(body, &["fade-in"], Rect::new(0.0, 2000.0, 200.0, 100.0))
            .unwrap();
        let (mut engine, _handles, _clock) = start(&mut page);
        assert!(!page.tree.has_class(late, "visible"));

        page.tree.scroll_to(0.0, 1500.0);
        engine.handle_input(&mut page.tree, InputEvent::Scrolled);
        assert!(page.tree.has_class(late, "visible"));
        assert_eq!(
            page.tree.style(late).unwrap().transition_delay,
            Some(Duration::from_millis(300))
        );
    }

    #[test]
    fn test_narrow_viewport_disables_cursor_and_tilt() {
        let mut page = page(600.0);
        let before = page.tree.len();
        let (mut engine, handles, _clock) = start(&mut page);

        assert!(handles.cursor.is_none());
        assert!(handles.tilt.is_none());
        assert_eq!(page.tree.len(), before);
        assert_eq!(engine.controller_count(), 2);

        engine.handle_input(&mut page.tree, InputEvent::PointerMoved { x: 400.0, y: 400.0 });
        assert!(page.tree.style(page.card).unwrap().transform.is_none());

        // Not re-evaluated on resize
        page.tree.resize(1280.0, 800.0);
        engine.handle_input(&mut page.tree, InputEvent::Resized);
        assert_eq!(engine.controller_count(), 2);
    }

    #[test]
    fn test_pointer_drives_cursor_and_tilt() {
        let mut page = page(1280.0);
        let (mut engine, handles, _clock) = start(&mut page);

        engine.handle_input(&mut page.tree, InputEvent::PointerMoved { x: 400.0, y: 400.0 });
        match page.tree.style(page.card).unwrap().transform {
            Some(ElementTransform::Rotate3d(t)) => {
                assert_eq!(t.rotate_x, 0.0);
                assert_eq!(t.rotate_y, 0.0);
                assert_eq!(t.translate_y, -10.0);
            }
            other => panic!("unexpected transform {:?}", other),
        }

        engine.frame(&mut page.tree);
        let cursor = engine.cursor(handles.cursor.unwrap()).unwrap();
        assert!((cursor.position().x - 40.0).abs() < 1e-4);
        let marker_style = page.tree.style(cursor.marker()).unwrap();
        assert_eq!(marker_style.left, Some(cursor.position().x));

        engine.handle_input(&mut page.tree, InputEvent::PointerLeftWindow);
        let marker = engine.cursor(handles.cursor.unwrap()).unwrap().marker();
        assert_eq!(page.tree.style(marker).unwrap().opacity, Some(0.0));
        match page.tree.style(page.card).unwrap().transform {
            Some(ElementTransform::Rotate3d(t)) => assert!(t.is_neutral()),
            other => panic!("unexpected transform {:?}", other),
        }

        engine.handle_input(&mut page.tree, InputEvent::PointerEnteredWindow);
        assert_eq!(page.tree.style(marker).unwrap().opacity, Some(1.0));
    }

    #[test]
    fn test_dispose() {
        let mut page = page(1280.0);
        let (mut engine, handles, _clock) = start(&mut page);
        let cursor = handles.cursor.unwrap();
        let tilt = handles.tilt.unwrap();
        let marker = engine.cursor(cursor).unwrap().marker();

        engine.handle_input(&mut page.tree, InputEvent::PointerMoved { x: 310.0, y: 310.0 });
        assert!(engine.dispose(&mut page.tree, tilt));
        match page.tree.style(page.card).unwrap().transform {
            Some(ElementTransform::Rotate3d(t)) => assert!(t.is_neutral()),
            other => panic!("unexpected transform {:?}", other),
        }

        assert!(engine.dispose(&mut page.tree, cursor));
        assert_eq!(page.tree.style(marker).unwrap().opacity, Some(0.0));
        engine.frame(&mut page.tree);
        assert_eq!(page.tree.style(marker).unwrap().left, None);

        assert!(!engine.dispose(&mut page.tree, cursor));
        assert!(!engine.is_active(cursor));
        assert_eq!(engine.controller_count(), 2);
    }

    #[test]
    fn test_style_sheet_registered_once_per_document() {
        let mut page = page(1280.0);
        let _first = start(&mut page);
        let _second = start(&mut page);
        let sheets: Vec<_> = page
            .tree
            .style_sheets()
            .filter(|(id, _)| *id == ENGINE_STYLE_SHEET_ID)
            .collect();
        assert_eq!(sheets.len(), 1);
    }

    #[test]
    fn test_reduced_motion() {
        let mut page = page(1280.0);
        page.tree.set_reduced_motion(true);
        let (mut engine, _handles, clock) = start(&mut page);
        assert_eq!(page.tree.custom_property("--transition-slow"), Some("0ms"));

        // Counters still run on the engine clock
        clock.advance(1000.0);
        engine.frame(&mut page.tree);
        assert_eq!(page.tree.text(page.stat), Some("1,125+"));
    }

    #[test]
    fn test_empty_page() {
        let mut tree = PageTree::new(1280.0, 800.0);
        let (mut engine, handles) =
            Engine::initialize(&mut tree, EngineConfig::default(), ManualClock::new()).unwrap();
        assert_eq!(handles.iter().count(), 4);
        assert!(engine.reveal(handles.reveal.unwrap()).unwrap().is_empty());
        assert!(engine.counter(handles.counter.unwrap()).unwrap().is_empty());
        assert!(engine.tilt(handles.tilt.unwrap()).unwrap().is_empty());
        engine.frame(&mut tree);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut tree = PageTree::new(1280.0, 800.0);
        let mut config = EngineConfig::default();
        config.counter.duration_ms = 0;
        let err = Engine::initialize(&mut tree, config, ManualClock::new()).err().unwrap();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
        assert_eq!(tree.style_sheets().count(), 0);
    }

    #[test]
    fn test_dyn_tree() {
        let mut page = page(1280.0);
        let tree: &mut dyn VisualTree = &mut page.tree;
        let (mut engine, _handles) =
            Engine::initialize(tree, EngineConfig::default(), ManualClock::new()).unwrap();
        engine.frame(tree);
        assert_eq!(tree.text(page.stat), Some("0+"));
    }
}
