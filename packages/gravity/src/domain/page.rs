//! The page capability the gravity effect runs against.
//!
//! The browser adapter (`api::dom::DomPage`) implements it over `web_sys`;
//! `memory_page::MemoryPage` implements it over a synthetic tree so the
//! whole lifecycle runs headless.

use crate::rigid_body::Vec2;

/// Axis-aligned box in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn translated(&self, by: Vec2) -> Self {
        Self { left: self.left + by.x, top: self.top + by.y, ..*self }
    }
}

/// A queryable, style-writable rendered page.
///
/// Nodes are non-owning handles: the effect never creates or destroys
/// nodes, it only reads geometry and rewrites presentation.
pub trait Page {
    type Node: Clone + PartialEq;

    /// All nodes matching a CSS selector list, in document order
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// Border box relative to the viewport (scroll not included)
    fn bounding_rect(&self, node: &Self::Node) -> Rect;

    /// Computed value of a CSS property, if the node is rendered
    fn computed_style(&self, node: &Self::Node, property: &str) -> Option<String>;

    /// True when `node` is a strict or inclusive descendant of `ancestor`
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Raw `style` attribute; `None` when the attribute is absent
    fn style_attribute(&self, node: &Self::Node) -> Option<String>;

    /// Overwrite the `style` attribute; `None` removes it
    fn set_style_attribute(&self, node: &Self::Node, value: Option<&str>) -> Result<(), String>;

    /// Set one inline declaration, keeping the others
    fn set_style_property(&self, node: &Self::Node, name: &str, value: &str) -> Result<(), String>;

    /// Force a synchronous layout so the next style write starts a transition
    fn force_layout(&self, node: &Self::Node);

    /// The document body, if any
    fn body(&self) -> Option<Self::Node>;

    fn scroll_position(&self) -> Vec2;

    fn viewport_width(&self) -> f64;

    /// Total scrollable height of the document
    fn document_height(&self) -> f64;

    fn scroll_to(&self, x: f64, y: f64);
}
