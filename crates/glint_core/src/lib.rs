//! Glint Core
//!
//! Foundational types shared by the Glint animation engine:
//!
//! - **Visual Tree**: the [`VisualTree`] trait over an externally-owned page,
//!   plus [`PageTree`], an in-memory implementation
//! - **Element Arena**: [`ElementId`] slotmap keys, so engine state can live in
//!   side tables keyed by element identity
//! - **Selectors**: one-time resolution of role markers into an [`ElementSet`]
//! - **Pointer Routing**: window pointer moves into element enter/move/leave
//! - **Geometry & Styles**: rects, points, transforms and inline styles
//!
//! # Example
//!
//! ```rust
//! use glint_core::{PageTree, Rect, RoleSelector, VisualTree};
//!
//! let mut tree = PageTree::new(1280.0, 720.0);
//! let body = tree.body();
//! let stat = tree
//!     .append(body, &["stat-number"], Rect::new(0.0, 100.0, 200.0, 50.0))
//!     .unwrap();
//! tree.set_text(stat, "1,200+").unwrap();
//!
//! let stats = RoleSelector::parse(".stat-number, .stat-value").resolve(&tree);
//! assert_eq!(stats.len(), 1);
//! ```

pub mod error;
pub mod geometry;
pub mod input;
pub mod pointer;
pub mod selector;
pub mod style;
pub mod tree;

pub use error::{Result, TreeError};
pub use geometry::{Point, Rect, Size};
pub use input::{ElementPointerEvent, InputEvent};
pub use pointer::PointerRouter;
pub use selector::{ElementSet, RoleSelector};
pub use style::{ElementTransform, InlineStyle, Transform3d};
pub use tree::{ElementId, PageTree, VisualTree};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Result, TreeError};
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::input::{ElementPointerEvent, InputEvent};
    pub use crate::pointer::PointerRouter;
    pub use crate::selector::{ElementSet, RoleSelector};
    pub use crate::style::{ElementTransform, InlineStyle, Transform3d};
    pub use crate::tree::{ElementId, PageTree, VisualTree};
}
