//! Return animation and the final hard reset.

use crate::domain::config::TimingConfig;
use crate::domain::page::Page;
use crate::domain::styles;

use super::extraction::{write_declarations, Capture};

/// Animate every element back toward its layout position.
///
/// Layout is forced on each exploded element first so the return transition
/// starts from the last rendered transform instead of jumping.
/// Returns the number of failed style writes.
pub fn begin<P: Page>(page: &P, capture: &Capture<P::Node>, timing: &TimingConfig) -> usize {
    let mut failed = 0;

    let back = [
        ("transition", styles::return_transition(timing.restore_ms)),
        ("transform", styles::IDENTITY_TRANSFORM.to_string()),
    ];
    for snapshot in &capture.exploded {
        page.force_layout(&snapshot.element);
        failed += write_declarations(page, &snapshot.element, &back);
    }

    let reappear = [
        ("transition", styles::reappear_transition(timing.restore_ms)),
        ("transform", styles::REAPPEARED_TRANSFORM.to_string()),
        ("opacity", "1".to_string()),
    ];
    for snapshot in &capture.dissipated {
        failed += write_declarations(page, &snapshot.element, &reappear);
    }

    failed
}

/// Put every captured `style` attribute back exactly as it was.
/// Returns the number of elements that could not be restored.
pub fn hard_reset<P: Page>(page: &P, capture: &Capture<P::Node>) -> usize {
    let exploded = capture.exploded.iter().map(|s| (&s.element, &s.original_style));
    let dissipated = capture.dissipated.iter().map(|s| (&s.element, &s.original_style));

    let mut failed = 0;
    for (element, original) in exploded.chain(dissipated) {
        if let Err(e) = original.restore(page, element) {
            gravity_warn!("restore failed: {}", e);
            failed += 1;
        }
    }
    failed
}
