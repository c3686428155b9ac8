//! Viewport intersection detection
//!
//! Answers "is element X at least `threshold` visible" for a set of observed
//! elements. Like a platform intersection observer, the first update after
//! observing reports every element once and later updates report only
//! threshold crossings. Consumers still latch their own state: a crossing in
//! and out and back in reports "visible" twice.

use glint_core::{ElementId, ElementSet, Rect, VisualTree};
use slotmap::SecondaryMap;

/// Visibility of one element at one update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub element: ElementId,
    /// Whether the visible fraction is at or above the threshold
    pub is_intersecting: bool,
    /// Visible fraction of the element's area in `[0, 1]`
    pub ratio: f32,
}

/// Visible fraction of `bounds` inside `viewport`
///
/// A zero-area element counts as fully visible when it touches the viewport.
pub fn visible_ratio(bounds: Rect, viewport: Rect) -> f32 {
    let Some(overlap) = bounds.intersection(&viewport) else {
        return 0.0;
    };
    let area = bounds.area();
    if area <= 0.0 {
        return 1.0;
    }
    (overlap.area() / area).clamp(0.0, 1.0)
}

/// Threshold-crossing detector over a fixed element set
#[derive(Debug)]
pub struct IntersectionObserver {
    threshold: f32,
    targets: Vec<ElementId>,
    /// Last reported state per element
    reported: SecondaryMap<ElementId, bool>,
}

impl IntersectionObserver {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            targets: Vec::new(),
            reported: SecondaryMap::new(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Start observing an element; observing twice is a no-op
    pub fn observe(&mut self, id: ElementId) {
        if !self.targets.contains(&id) {
            self.targets.push(id);
        }
    }

    pub fn observe_all(&mut self, elements: &ElementSet) {
        for id in elements.iter() {
            self.observe(id);
        }
    }

    pub fn unobserve(&mut self, id: ElementId) {
        self.targets.retain(|t| *t != id);
        self.reported.remove(id);
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Measure every observed element and return the changes since the last update
    ///
    /// Elements the tree cannot lay out are skipped and keep their last state.
    pub fn update<T: VisualTree + ?Sized>(&mut self, tree: &T) -> Vec<IntersectionEntry> {
        let viewport = tree.viewport();
        let mut entries = Vec::new();

        for &id in &self.targets {
            let Some(bounds) = tree.bounds(id) else {
                continue;
            };
            let ratio = visible_ratio(bounds, viewport);
            let is_intersecting = bounds.touches(&viewport) && ratio >= self.threshold;

            let changed = self.reported.get(id) != Some(&is_intersecting);
            if changed {
                self.reported.insert(id, is_intersecting);
                entries.push(IntersectionEntry {
                    element: id,
                    is_intersecting,
                    ratio,
                });
            }
        }

        if !entries.is_empty() {
            tracing::trace!(
                "intersection update: {} change(s) at threshold {}",
                entries.len(),
                self.threshold
            );
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::PageTree;

    fn tree_with_box(y: f32) -> (PageTree, ElementId) {
        let mut tree = PageTree::new(800.0, 600.0);
        let body = tree.body();
        let id = tree
            .append(body, &["stat-number"], Rect::new(0.0, y, 100.0, 100.0))
            .unwrap();
        (tree, id)
    }

    #[test]
    fn test_visible_ratio() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(visible_ratio(Rect::new(0.0, 0.0, 100.0, 100.0), viewport), 1.0);
        assert_eq!(visible_ratio(Rect::new(0.0, 550.0, 100.0, 100.0), viewport), 0.5);
        assert_eq!(visible_ratio(Rect::new(0.0, 700.0, 100.0, 100.0), viewport), 0.0);
        assert_eq!(visible_ratio(Rect::new(10.0, 10.0, 0.0, 0.0), viewport), 1.0);
    }

    #[test]
    fn test_initial_update_reports_every_element() {
        let mut tree = PageTree::new(800.0, 600.0);
        let body = tree.body();
        let above = tree.append(body, &[], Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        let below = tree.append(body, &[], Rect::new(0.0, 2000.0, 100.0, 100.0)).unwrap();

        let mut observer = IntersectionObserver::new(0.15);
        observer.observe(above);
        observer.observe(below);

        let entries = observer.update(&tree);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_intersecting);
        assert!(!entries[1].is_intersecting);

        assert!(observer.update(&tree).is_empty());
    }

    #[test]
    fn test_reports_threshold_crossings_only() {
        let (mut tree, id) = tree_with_box(580.0);
        let mut observer = IntersectionObserver::new(0.5);
        observer.observe(id);

        // 20% visible
        let entries = observer.update(&tree);
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);

        // 40% visible, still below the threshold
        tree.scroll_to(0.0, 20.0);
        assert!(observer.update(&tree).is_empty());

        // 60% visible
        tree.scroll_to(0.0, 40.0);
        let entries = observer.update(&tree);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);
        assert!((entries[0].ratio - 0.6).abs() < 1e-4);

        tree.scroll_to(0.0, 0.0);
        let entries = observer.update(&tree);
        assert!(!entries[0].is_intersecting);
    }

    #[test]
    fn test_edge_contact_does_not_meet_nonzero_threshold() {
        let (tree, id) = tree_with_box(600.0);
        let mut observer = IntersectionObserver::new(0.15);
        observer.observe(id);
        assert!(!observer.update(&tree)[0].is_intersecting);

        let mut zero = IntersectionObserver::new(0.0);
        zero.observe(id);
        assert!(zero.update(&tree)[0].is_intersecting);
    }

    #[test]
    fn test_observe_is_idempotent_and_unobserve_forgets() {
        let (tree, id) = tree_with_box(0.0);
        let mut observer = IntersectionObserver::new(0.5);
        observer.observe(id);
        observer.observe(id);
        assert_eq!(observer.len(), 1);
        assert_eq!(observer.update(&tree).len(), 1);

        observer.unobserve(id);
        assert!(observer.is_empty());
        assert!(observer.update(&tree).is_empty());
    }
}
