//! Geometry snapshot extraction
//!
//! Selection is pure (reads only); capture is where the page is mutated.

use crate::domain::config::GravityConfig;
use crate::domain::page::{Page, Rect};
use crate::domain::snapshot::{DissipatedSnapshot, ElementSnapshot, OriginalStyle};
use crate::domain::styles;

/// Disjoint element sets chosen for one session
#[derive(Clone, Debug, PartialEq)]
pub struct Selection<N> {
    pub dissipated: Vec<N>,
    pub exploded: Vec<N>,
}

/// Snapshots taken while freezing the page
#[derive(Clone, Debug)]
pub struct Capture<N> {
    pub dissipated: Vec<DissipatedSnapshot<N>>,
    pub exploded: Vec<ElementSnapshot<N>>,
}

impl<N> Default for Capture<N> {
    fn default() -> Self {
        Self {
            dissipated: Vec::new(),
            exploded: Vec::new(),
        }
    }
}

fn is_zero_opacity(value: &str) -> bool {
    let value = value.trim();
    value == "0" || value.parse::<f64>().map(|v| v == 0.0).unwrap_or(false)
}

/// Rendered, large enough, and not fully transparent
pub fn is_visible<P: Page>(page: &P, node: &P::Node, min_size: f64) -> bool {
    let rect = page.bounding_rect(node);
    if rect.width < min_size || rect.height < min_size {
        return false;
    }
    if page.computed_style(node, "display").as_deref() == Some("none") {
        return false;
    }
    if page
        .computed_style(node, "opacity")
        .map(|o| is_zero_opacity(&o))
        .unwrap_or(false)
    {
        return false;
    }
    true
}

/// Drop every candidate that is an ancestor of another candidate, so a
/// container and its children never become overlapping bodies.
pub fn containment_filter<P: Page>(page: &P, candidates: Vec<P::Node>) -> Vec<P::Node> {
    let keep: Vec<bool> = candidates
        .iter()
        .enumerate()
        .map(|(i, node)| {
            !candidates
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && other != node && page.contains(node, other))
        })
        .collect();

    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(node, keep)| keep.then_some(node))
        .collect()
}

/// Choose dissipated media and exploded elements without touching the page.
pub fn select_candidates<P: Page>(page: &P, config: &GravityConfig) -> Selection<P::Node> {
    let dissipated = page.query_all(&config.selectors.dissipate);

    let visible: Vec<P::Node> = page
        .query_all(&config.selectors.explode)
        .into_iter()
        .filter(|node| !dissipated.contains(node))
        .filter(|node| is_visible(page, node, config.min_visible_size))
        .collect();

    Selection {
        dissipated,
        exploded: containment_filter(page, visible),
    }
}

/// Write several declarations; one failed write does not stop the rest.
pub(crate) fn write_declarations<P: Page, S: AsRef<str>>(
    page: &P,
    node: &P::Node,
    decls: &[(&str, S)],
) -> usize {
    let mut failed = 0;
    for (name, value) in decls {
        if let Err(e) = page.set_style_property(node, name, value.as_ref()) {
            gravity_warn!("style write {} failed: {}", name, e);
            failed += 1;
        }
    }
    failed
}

/// Record original styles and anchors, then fade the media and pin the
/// exploded elements at their absolute page position.
///
/// All geometry is measured before any element is frozen, so taking one
/// element out of flow cannot shift the anchors of the others.
pub fn capture<P: Page>(page: &P, selection: Selection<P::Node>, config: &GravityConfig) -> Capture<P::Node> {
    let scroll = page.scroll_position();

    let exploded: Vec<ElementSnapshot<P::Node>> = selection
        .exploded
        .into_iter()
        .map(|element| {
            let rect = page.bounding_rect(&element);
            ElementSnapshot {
                original_style: OriginalStyle::capture(page, &element),
                anchor: Rect { left: rect.left + scroll.x, top: rect.top + scroll.y, ..rect },
                element,
            }
        })
        .collect();

    let dissipated: Vec<DissipatedSnapshot<P::Node>> = selection
        .dissipated
        .into_iter()
        .map(|element| DissipatedSnapshot {
            original_style: OriginalStyle::capture(page, &element),
            element,
        })
        .collect();

    let fade = styles::dissipate_declarations(config.timing.dissipate_ms);
    for snapshot in &dissipated {
        write_declarations(page, &snapshot.element, &fade);
    }

    for snapshot in &exploded {
        write_declarations(page, &snapshot.element, &styles::freeze_declarations(&snapshot.anchor));
    }

    Capture { dissipated, exploded }
}
