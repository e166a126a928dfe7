use super::page::{Page, Rect};
use crate::rigid_body::Vec2;

/// The exact `style` attribute an element had before capture.
///
/// Captured once and written back verbatim; never rebuilt from computed
/// style. `None` means the attribute was absent and is removed on restore.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OriginalStyle(Option<String>);

impl OriginalStyle {
    pub fn capture<P: Page>(page: &P, node: &P::Node) -> Self {
        Self(page.style_attribute(node))
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn restore<P: Page>(&self, page: &P, node: &P::Node) -> Result<(), String> {
        page.set_style_attribute(node, self.as_deref())
    }
}

impl From<Option<String>> for OriginalStyle {
    fn from(value: Option<String>) -> Self {
        Self(value)
    }
}

/// One element frozen in place and driven by a body
#[derive(Clone, Debug)]
pub struct ElementSnapshot<N> {
    pub element: N,
    pub original_style: OriginalStyle,
    /// Frozen anchor in page coordinates (scroll included)
    pub anchor: Rect,
}

impl<N> ElementSnapshot<N> {
    pub fn anchor_center(&self) -> Vec2 {
        self.anchor.center()
    }
}

/// Large media faded out instead of simulated
#[derive(Clone, Debug)]
pub struct DissipatedSnapshot<N> {
    pub element: N,
    pub original_style: OriginalStyle,
}
