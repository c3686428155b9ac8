//! Role-marker selectors
//!
//! Elements are discovered once, at engine initialization, by their role
//! classes (`.fade-in`, `.stat-number`, `.tilt-card`, ...). Controllers receive
//! the resolved [`ElementSet`], never selector strings.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::tree::{ElementId, VisualTree};

/// A comma-separated list of class selectors, matching any of them
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleSelector {
    classes: SmallVec<[String; 4]>,
}

impl RoleSelector {
    /// Parse `".stat-number, .stat-value"` style selector lists
    ///
    /// Leading dots are optional; empty entries are ignored.
    pub fn parse(selector: &str) -> Self {
        let classes = selector
            .split(',')
            .map(|part| part.trim().trim_start_matches('.'))
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn matches<T: VisualTree + ?Sized>(&self, tree: &T, id: ElementId) -> bool {
        self.classes.iter().any(|class| tree.has_class(id, class))
    }

    /// Resolve against the tree in document order
    pub fn resolve<T: VisualTree + ?Sized>(&self, tree: &T) -> ElementSet {
        let ids: Vec<ElementId> = tree
            .document_order()
            .into_iter()
            .filter(|id| self.matches(tree, *id))
            .collect();
        tracing::debug!(
            "RoleSelector {:?} resolved {} element(s)",
            self.classes,
            ids.len()
        );
        ElementSet::from_ordered(ids)
    }
}

/// Elements matched by a selector, in document order, without duplicates
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementSet {
    ids: Vec<ElementId>,
}

impl ElementSet {
    /// Build from ids already in document order; later duplicates are dropped
    pub fn from_ordered(ids: impl IntoIterator<Item = ElementId>) -> Self {
        let mut seen = FxHashSet::default();
        let ids = ids.into_iter().filter(|id| seen.insert(*id)).collect();
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Position of an element in scan order
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.ids.iter().position(|e| *e == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[ElementId] {
        &self.ids
    }
}

impl<'a> IntoIterator for &'a ElementSet {
    type Item = &'a ElementId;
    type IntoIter = std::slice::Iter<'a, ElementId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::tree::PageTree;

    #[test]
    fn test_parse_selector_list() {
        let selector = RoleSelector::parse(".stat-number, .stat-value,  problem-stat ,");
        assert_eq!(
            selector.classes(),
            &["stat-number", "stat-value", "problem-stat"]
        );
        assert!(RoleSelector::parse(" , ").is_empty());
    }

    #[test]
    fn test_resolve_in_document_order() {
        let mut tree = PageTree::new(800.0, 600.0);
        let body = tree.body();
        let first = tree.append(body, &["tech-card"], Rect::ZERO).unwrap();
        let _other = tree.append(body, &["hero"], Rect::ZERO).unwrap();
        let second = tree.append(body, &["team-card", "tech-card"], Rect::ZERO).unwrap();
        let nested = tree.append(first, &["team-card"], Rect::ZERO).unwrap();

        let set = RoleSelector::parse(".tech-card, .team-card").resolve(&tree);
        assert_eq!(set.as_slice(), &[first, nested, second]);
        assert_eq!(set.index_of(second), Some(2));
    }

    #[test]
    fn test_missing_elements_resolve_empty() {
        let tree = PageTree::new(800.0, 600.0);
        let set = RoleSelector::parse(".fade-in").resolve(&tree);
        assert!(set.is_empty());
    }
}
