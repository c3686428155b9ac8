//! Animated numeric counters
//!
//! The first time a counter element becomes visible its text is parsed into
//! prefix, number and suffix. Each tick then renders
//! `prefix + grouped(floor(target × eased)) + suffix`, and the final tick
//! writes back the original text byte for byte. Text with no usable number
//! is left alone.

use glint_animation::{Easing, FrameTime, Tween};
use glint_core::{ElementId, ElementSet, VisualTree};
use slotmap::SecondaryMap;

use crate::config::CounterConfig;
use crate::intersection::{IntersectionEntry, IntersectionObserver};
use crate::number::{parse_numeric_literal, Grouping};

/// A parsed counter text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterTarget {
    pub prefix: String,
    pub target: u64,
    pub suffix: String,
    pub grouping: Grouping,
    /// Text as found, restored on completion
    pub original: String,
}

impl CounterTarget {
    /// Parse display text, falling back to `default_grouping` when the
    /// literal doesn't reveal its convention
    pub fn parse(text: &str, default_grouping: Grouping) -> Option<Self> {
        let literal = parse_numeric_literal(text)?;
        Some(Self {
            prefix: literal.prefix.to_string(),
            target: literal.value,
            suffix: literal.suffix.to_string(),
            grouping: Grouping::infer(literal.literal).unwrap_or(default_grouping),
            original: text.to_string(),
        })
    }

    /// Text shown at eased progress `eased`
    pub fn render(&self, eased: f64) -> String {
        let current = (self.target as f64 * eased.clamp(0.0, 1.0)).floor() as u64;
        format!(
            "{}{}{}",
            self.prefix,
            self.grouping.format(current.min(self.target)),
            self.suffix
        )
    }
}

/// Lifecycle of one counter element
#[derive(Clone, Debug, PartialEq)]
pub enum CounterPhase {
    /// Not yet seen
    Idle,
    Running { target: CounterTarget, tween: Tween },
    /// Animation completed and original text restored
    Finished,
    /// Seen, but the text held no usable number
    Skipped,
}

impl CounterPhase {
    /// Whether the one-shot latch has been taken
    pub fn is_counted(&self) -> bool {
        !matches!(self, CounterPhase::Idle)
    }
}

#[derive(Debug)]
pub struct CounterAnimator {
    observer: IntersectionObserver,
    phases: SecondaryMap<ElementId, CounterPhase>,
    /// Running counters in trigger order
    running: Vec<ElementId>,
    duration_ms: f64,
    easing: Easing,
    grouping: Grouping,
}

impl CounterAnimator {
    pub fn new(elements: &ElementSet, config: &CounterConfig) -> Self {
        let mut observer = IntersectionObserver::new(config.threshold);
        observer.observe_all(elements);
        let mut phases = SecondaryMap::new();
        for id in elements.iter() {
            phases.insert(id, CounterPhase::Idle);
        }
        tracing::debug!("counter animator tracking {} element(s)", phases.len());

        Self {
            observer,
            phases,
            running: Vec::new(),
            duration_ms: config.duration_ms as f64,
            easing: config.easing,
            grouping: config.grouping,
        }
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phase(&self, id: ElementId) -> Option<&CounterPhase> {
        self.phases.get(id)
    }

    pub fn is_counted(&self, id: ElementId) -> bool {
        self.phases.get(id).is_some_and(CounterPhase::is_counted)
    }

    pub fn is_running(&self) -> bool {
        !self.running.is_empty()
    }

    /// Measure visibility and start counters that became visible
    pub fn update<T: VisualTree + ?Sized>(&mut self, tree: &mut T, now: FrameTime) -> usize {
        let entries = self.observer.update(tree);
        entries
            .into_iter()
            .filter(|entry| self.on_intersection(tree, entry, now))
            .count()
    }

    /// Handle one visibility notification; repeated notifications are no-ops
    pub fn on_intersection<T: VisualTree + ?Sized>(
        &mut self,
        tree: &mut T,
        entry: &IntersectionEntry,
        now: FrameTime,
    ) -> bool {
        if !entry.is_intersecting {
            return false;
        }
        self.trigger(tree, entry.element, now)
    }

    /// Start counting an element from `now`
    ///
    /// The latch is taken even when the text can't be parsed, so an
    /// unparsable element is examined once.
    pub fn trigger<T: VisualTree + ?Sized>(
        &mut self,
        tree: &mut T,
        id: ElementId,
        now: FrameTime,
    ) -> bool {
        let Some(phase) = self.phases.get_mut(id) else {
            return false;
        };
        if phase.is_counted() {
            return false;
        }

        let parsed = tree
            .text(id)
            .and_then(|text| CounterTarget::parse(text, self.grouping));
        let Some(target) = parsed else {
            tracing::debug!("counter {:?} has no numeric literal, skipping", id);
            *phase = CounterPhase::Skipped;
            return false;
        };

        tracing::debug!(
            "counting {:?} to {} over {}ms",
            id,
            target.target,
            self.duration_ms
        );
        *phase = CounterPhase::Running {
            target,
            tween: Tween::new(now, self.duration_ms, self.easing),
        };
        self.running.push(id);
        true
    }

    /// Render every running counter at `now`
    ///
    /// Returns the number of counters still running.
    pub fn tick<T: VisualTree + ?Sized>(&mut self, tree: &mut T, now: FrameTime) -> usize {
        let phases = &mut self.phases;
        self.running.retain(|&id| {
            let Some(phase) = phases.get_mut(id) else {
                return false;
            };
            let CounterPhase::Running { target, tween } = &*phase else {
                return false;
            };

            let sample = tween.sample(now);
            let finished = sample.is_finished();
            let text = if finished {
                target.original.clone()
            } else {
                target.render(sample.eased)
            };

            if let Err(err) = tree.set_text(id, &text) {
                tracing::debug!("counter {:?} dropped: {}", id, err);
                *phase = CounterPhase::Finished;
                return false;
            }
            if finished {
                tracing::debug!("counter {:?} finished", id);
                *phase = CounterPhase::Finished;
            }
            !finished
        });
        self.running.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{PageTree, Rect, RoleSelector};

    fn stat_page(texts: &[&str]) -> (PageTree, ElementSet) {
        let mut tree = PageTree::new(1280.0, 800.0);
        let body = tree.body();
        for (i, text) in texts.iter().enumerate() {
            let id = tree
                .append(body, &["stat-number"], Rect::new(0.0, i as f32 * 60.0, 200.0, 50.0))
                .unwrap();
            tree.set_text(id, text).unwrap();
        }
        let set = RoleSelector::parse(".stat-number").resolve(&tree);
        (tree, set)
    }

    fn counter_for(set: &ElementSet) -> CounterAnimator {
        CounterAnimator::new(set, &CounterConfig::default())
    }

    #[test]
    fn test_render_and_parse() {
        let target = CounterTarget::parse("Over 12,34,567 patients", Grouping::Western).unwrap();
        assert_eq!(target.grouping, Grouping::Indian);
        assert_eq!(target.render(0.0), "Over 0 patients");
        assert_eq!(target.render(0.5), "Over 6,17,283 patients");
        assert_eq!(target.render(1.0), "Over 12,34,567 patients");
    }

    #[test]
    fn test_end_to_end_restores_original() {
        let (mut tree, set) = stat_page(&["1,200+"]);
        let id = set.as_slice()[0];
        let mut counter = counter_for(&set);

        assert_eq!(counter.update(&mut tree, FrameTime(0.0)), 1);
        assert_eq!(counter.tick(&mut tree, FrameTime(0.0)), 1);
        assert_eq!(tree.text(id), Some("0+"));

        counter.tick(&mut tree, FrameTime(1000.0));
        // floor(1200 × 0.9375)
        assert_eq!(tree.text(id), Some("1,125+"));

        assert_eq!(counter.tick(&mut tree, FrameTime(2000.0)), 0);
        assert_eq!(tree.text(id), Some("1,200+"));
        assert_eq!(counter.phase(id), Some(&CounterPhase::Finished));
        assert!(!counter.is_running());
    }

    #[test]
    fn test_round_trip_preserves_formatting() {
        let (mut tree, set) = stat_page(&["Prefix 12,345 suffix"]);
        let id = set.as_slice()[0];
        let mut counter = counter_for(&set);

        counter.update(&mut tree, FrameTime(100.0));
        let mut now = 100.0;
        while counter.tick(&mut tree, FrameTime(now)) > 0 {
            now += 16.0;
        }
        assert_eq!(tree.text(id), Some("Prefix 12,345 suffix"));
    }

    #[test]
    fn test_values_never_exceed_target() {
        let (mut tree, set) = stat_page(&["98%"]);
        let id = set.as_slice()[0];
        let mut counter = counter_for(&set);
        counter.update(&mut tree, FrameTime(0.0));

        let mut last = 0;
        for step in 0..=125 {
            counter.tick(&mut tree, FrameTime(step as f64 * 16.0));
            let text = tree.text(id).unwrap();
            let value: u64 = text.trim_end_matches('%').parse().unwrap();
            assert!(value >= last && value <= 98);
            last = value;
        }
    }

    #[test]
    fn test_unparsable_text_is_left_unchanged() {
        let (mut tree, set) = stat_page(&["N/A"]);
        let id = set.as_slice()[0];
        let mut counter = counter_for(&set);

        assert_eq!(counter.update(&mut tree, FrameTime(0.0)), 0);
        counter.tick(&mut tree, FrameTime(500.0));
        assert_eq!(tree.text(id), Some("N/A"));
        assert_eq!(counter.phase(id), Some(&CounterPhase::Skipped));
        assert!(counter.is_counted(id));
    }

    #[test]
    fn test_zero_target() {
        let (mut tree, set) = stat_page(&["0 incidents"]);
        let id = set.as_slice()[0];
        let mut counter = counter_for(&set);

        counter.update(&mut tree, FrameTime(0.0));
        counter.tick(&mut tree, FrameTime(1000.0));
        assert_eq!(tree.text(id), Some("0 incidents"));
        counter.tick(&mut tree, FrameTime(2500.0));
        assert_eq!(tree.text(id), Some("0 incidents"));
    }

    #[test]
    fn test_repeated_notifications_count_once() {
        let (mut tree, set) = stat_page(&["500"]);
        let id = set.as_slice()[0];
        let mut counter = counter_for(&set);
        let entry = IntersectionEntry {
            element: id,
            is_intersecting: true,
            ratio: 1.0,
        };

        assert!(counter.on_intersection(&mut tree, &entry, FrameTime(0.0)));
        counter.tick(&mut tree, FrameTime(2000.0));
        assert_eq!(tree.text(id), Some("500"));

        assert!(!counter.on_intersection(&mut tree, &entry, FrameTime(3000.0)));
        counter.tick(&mut tree, FrameTime(3000.0));
        assert_eq!(tree.text(id), Some("500"));
        assert!(!counter.is_running());
    }

    #[test]
    fn test_below_threshold_does_not_start() {
        let mut tree = PageTree::new(1280.0, 800.0);
        let body = tree.body();
        // 30% visible
        let id = tree
            .append(body, &["stat-value"], Rect::new(0.0, 770.0, 200.0, 100.0))
            .unwrap();
        tree.set_text(id, "42").unwrap();
        let set = RoleSelector::parse(".stat-value").resolve(&tree);
        let mut counter = counter_for(&set);

        assert_eq!(counter.update(&mut tree, FrameTime(0.0)), 0);
        assert!(!counter.is_counted(id));

        tree.scroll_to(0.0, 50.0);
        assert_eq!(counter.update(&mut tree, FrameTime(10.0)), 1);
    }
}
