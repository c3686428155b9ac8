//! Visual tree abstraction
//!
//! The engine never owns the page. It reads and mutates an externally-owned
//! tree through [`VisualTree`], addressing nodes by [`ElementId`]. Engine-side
//! state is kept in `slotmap::SecondaryMap<ElementId, _>` side tables rather
//! than on the nodes themselves.
//!
//! [`PageTree`] is a retained, in-memory implementation used by tests and the
//! simulation driver.

use indexmap::IndexMap;
use slotmap::{new_key_type, Key, SlotMap};
use smallvec::SmallVec;

use crate::error::{Result, TreeError};
use crate::geometry::{Point, Rect, Size};
use crate::style::InlineStyle;

new_key_type! {
    /// Identity of a node in the visual tree
    pub struct ElementId;
}

impl ElementId {
    /// Convert to a raw u64 representation
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Reconstruct from a raw u64 created by `to_raw()`
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Read/write access to the externally-owned page
///
/// Coordinates returned by [`VisualTree::bounds`] and [`VisualTree::viewport`]
/// are client-space: relative to the top-left corner of the visible viewport.
pub trait VisualTree {
    /// The document element (holds custom properties)
    fn root(&self) -> ElementId;

    /// The body element (parent for engine-created nodes)
    fn body(&self) -> ElementId;

    /// Visible viewport in client coordinates
    fn viewport(&self) -> Rect;

    /// Whether the platform asks for reduced motion
    fn prefers_reduced_motion(&self) -> bool;

    /// All elements in document (pre-order) order
    fn document_order(&self) -> Vec<ElementId>;

    fn contains(&self, id: ElementId) -> bool;

    fn has_class(&self, id: ElementId, class: &str) -> bool;

    fn add_class(&mut self, id: ElementId, class: &str) -> Result<()>;

    /// Text content of an element
    fn text(&self, id: ElementId) -> Option<&str>;

    fn set_text(&mut self, id: ElementId, text: &str) -> Result<()>;

    /// Current bounding rect in client coordinates
    ///
    /// `None` when the element is unknown or has no layout box.
    fn bounds(&self, id: ElementId) -> Option<Rect>;

    fn style(&self, id: ElementId) -> Option<&InlineStyle>;

    fn style_mut(&mut self, id: ElementId) -> Result<&mut InlineStyle>;

    /// Create a new element with a single class and append it to `parent`
    fn create_element(&mut self, parent: ElementId, class: &str) -> Result<ElementId>;

    fn custom_property(&self, name: &str) -> Option<&str>;

    fn set_custom_property(&mut self, name: &str, value: &str);

    fn has_style_sheet(&self, id: &str) -> bool;

    fn insert_style_sheet(&mut self, id: &str, css: &str);
}

// ============================================================================
// In-memory page
// ============================================================================

/// A single node of a [`PageTree`]
#[derive(Clone, Debug, Default)]
struct ElementNode {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: SmallVec<[String; 4]>,
    text: String,
    /// Layout box in document coordinates
    layout: Option<Rect>,
    style: InlineStyle,
}

/// Retained in-memory page
///
/// Layout boxes are stored in document coordinates; [`VisualTree::bounds`]
/// subtracts the scroll offset, so scrolling moves every element relative to
/// the viewport the way a real page does.
#[derive(Debug)]
pub struct PageTree {
    nodes: SlotMap<ElementId, ElementNode>,
    root: ElementId,
    body: ElementId,
    viewport: Size,
    scroll: Point,
    reduced_motion: bool,
    custom_properties: IndexMap<String, String>,
    style_sheets: IndexMap<String, String>,
}

impl PageTree {
    /// Create an empty page with the given viewport size
    pub fn new(width: f32, height: f32) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(ElementNode::default());
        let body = nodes.insert(ElementNode {
            parent: Some(root),
            ..Default::default()
        });
        nodes[root].children.push(body);

        Self {
            nodes,
            root,
            body,
            viewport: Size::new(width, height),
            scroll: Point::ZERO,
            reduced_motion: false,
            custom_properties: IndexMap::new(),
            style_sheets: IndexMap::new(),
        }
    }

    /// Append an element with the given classes and document-space layout box
    pub fn append(&mut self, parent: ElementId, classes: &[&str], layout: Rect) -> Result<ElementId> {
        let id = self.insert_child(parent, classes.iter().map(|c| c.to_string()).collect())?;
        self.nodes[id].layout = Some(layout);
        Ok(id)
    }

    fn insert_child(&mut self, parent: ElementId, classes: SmallVec<[String; 4]>) -> Result<ElementId> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::UnknownElement(parent));
        }
        let id = self.nodes.insert(ElementNode {
            parent: Some(parent),
            classes,
            ..Default::default()
        });
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    /// Replace an element's document-space layout box
    pub fn set_layout(&mut self, id: ElementId, layout: Rect) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownElement(id))?;
        node.layout = Some(layout);
        Ok(())
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(id)?.parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn classes(&self, id: ElementId) -> &[String] {
        self.nodes
            .get(id)
            .map(|n| n.classes.as_slice())
            .unwrap_or(&[])
    }

    /// Scroll the page to the given document offset
    pub fn scroll_to(&mut self, x: f32, y: f32) {
        self.scroll = Point::new(x.max(0.0), y.max(0.0));
    }

    pub fn scroll_offset(&self) -> Point {
        self.scroll
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Registered style sheets in insertion order
    pub fn style_sheets(&self) -> impl Iterator<Item = (&str, &str)> {
        self.style_sheets
            .iter()
            .map(|(id, css)| (id.as_str(), css.as_str()))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl VisualTree for PageTree {
    fn root(&self) -> ElementId {
        self.root
    }

    fn body(&self) -> ElementId {
        self.body
    }

    fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height)
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn document_order(&self) -> Vec<ElementId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, id: ElementId, class: &str) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownElement(id))?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    fn text(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(id).map(|n| n.text.as_str())
    }

    fn set_text(&mut self, id: ElementId, text: &str) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::UnknownElement(id))?;
        node.text.clear();
        node.text.push_str(text);
        Ok(())
    }

    fn bounds(&self, id: ElementId) -> Option<Rect> {
        let layout = self.nodes.get(id)?.layout?;
        Some(layout.offset(-self.scroll.x, -self.scroll.y))
    }

    fn style(&self, id: ElementId) -> Option<&InlineStyle> {
        self.nodes.get(id).map(|n| &n.style)
    }

    fn style_mut(&mut self, id: ElementId) -> Result<&mut InlineStyle> {
        self.nodes
            .get_mut(id)
            .map(|n| &mut n.style)
            .ok_or(TreeError::UnknownElement(id))
    }

    fn create_element(&mut self, parent: ElementId, class: &str) -> Result<ElementId> {
        let mut classes = SmallVec::new();
        classes.push(class.to_string());
        self.insert_child(parent, classes)
    }

    fn custom_property(&self, name: &str) -> Option<&str> {
        self.custom_properties.get(name).map(String::as_str)
    }

    fn set_custom_property(&mut self, name: &str, value: &str) {
        self.custom_properties
            .insert(name.to_string(), value.to_string());
    }

    fn has_style_sheet(&self, id: &str) -> bool {
        self.style_sheets.contains_key(id)
    }

    fn insert_style_sheet(&mut self, id: &str, css: &str) {
        self.style_sheets.insert(id.to_string(), css.to_string());
    }
}
