use crate::domain::page::{Page, Rect};
use crate::domain::snapshot::ElementSnapshot;
use crate::domain::styles;
use crate::rigid_body::Body;
use crate::rigid_body_system::PhysicsWorld;

/// Result of one render pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub written: usize,
    pub failed: usize,
}

/// Transform that moves an element from its frozen anchor to its body
pub fn transform_for(body: &Body, anchor: &Rect) -> String {
    let offset = body.pos - anchor.center();
    styles::body_transform(offset.x, offset.y, body.angle)
}

/// Write one transform per tagged body. A failed write is logged and
/// skipped; the remaining elements are still updated.
pub fn render_frame<P: Page>(
    page: &P,
    world: &PhysicsWorld,
    snapshots: &[ElementSnapshot<P::Node>],
) -> RenderReport {
    let mut report = RenderReport::default();

    for body in world.bodies() {
        let Some(snapshot) = body.tag.and_then(|i| snapshots.get(i)) else {
            continue;
        };
        let transform = transform_for(body, &snapshot.anchor);
        match page.set_style_property(&snapshot.element, "transform", &transform) {
            Ok(()) => report.written += 1,
            Err(e) => {
                gravity_warn!("render of body {} failed: {}", body.id, e);
                report.failed += 1;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::SolverIterations;
    use crate::domain::memory_page::MemoryPage;
    use crate::domain::snapshot::OriginalStyle;
    use crate::rigid_body::{Material, Vec2};

    #[test]
    fn resting_body_renders_identity_offset() {
        let anchor = Rect::new(100.0, 50.0, 200.0, 40.0);
        let body = Body::new_rect(200.0, 70.0, 200.0, 40.0, 4.0, Material::PAPER);
        assert_eq!(transform_for(&body, &anchor), "translate(0px, 0px) rotate(0rad)");
    }

    #[test]
    fn bad_element_does_not_stop_the_frame() {
        let page = MemoryPage::new(800.0, 1000.0);
        let good = page.append(MemoryPage::BODY, "p", "", Rect::new(0.0, 0.0, 100.0, 20.0));
        let bad = page.append(MemoryPage::BODY, "p", "", Rect::new(0.0, 40.0, 100.0, 20.0));
        page.poison(bad);

        let snaps = vec![
            ElementSnapshot { element: bad, original_style: OriginalStyle::default(), anchor: Rect::new(0.0, 40.0, 100.0, 20.0) },
            ElementSnapshot { element: good, original_style: OriginalStyle::default(), anchor: Rect::new(0.0, 0.0, 100.0, 20.0) },
        ];

        let mut world = PhysicsWorld::new(SolverIterations::default(), Vec2::new(0.0, 1.0));
        world.add_body(Body::new_static(400.0, 1500.0, 800.0, 1000.0));
        world.add_body(Body::new_rect(50.0, 50.0, 100.0, 20.0, 2.0, Material::PAPER).with_tag(0));
        world.add_body(Body::new_rect(50.0, 10.0, 100.0, 20.0, 2.0, Material::PAPER).with_tag(1));

        let report = render_frame(&page, &world, &snaps);
        assert_eq!(report, RenderReport { written: 1, failed: 1 });
        assert_eq!(
            page.style_property(good, "transform").as_deref(),
            Some("translate(0px, 0px) rotate(0rad)")
        );
    }
}
