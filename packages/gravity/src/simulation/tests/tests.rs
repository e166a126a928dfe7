use super::*;
use crate::domain::memory_page::{MemoryPage, NodeId};
use crate::domain::page::Rect;
use crate::domain::styles;

fn seeded() -> GravityOrchestrator<MemoryPage> {
    GravityOrchestrator::new(GravityConfig {
        seed: Some(7),
        ..GravityConfig::default()
    })
}

/// A small portfolio page: nav title, heading, paragraph, a media tile and
/// a footer line. Returns the page and every node that carries a style.
fn portfolio() -> (MemoryPage, Vec<NodeId>) {
    let page = MemoryPage::new(1280.0, 2400.0);
    let nav = page.append(MemoryPage::BODY, "nav", "", Rect::new(0.0, 0.0, 1280.0, 80.0));
    let title = page.append(nav, "h1", "font-bold", Rect::new(24.0, 20.0, 200.0, 40.0));
    let main = page.append(MemoryPage::BODY, "main", "", Rect::new(0.0, 80.0, 1280.0, 2200.0));
    let h2 = page.append(main, "h2", "", Rect::new(100.0, 200.0, 600.0, 80.0));
    let p = page.append(main, "p", "", Rect::new(100.0, 300.0, 600.0, 120.0));
    let tile = page.append(main, "div", "rounded-[2rem] aspect-[4/3]", Rect::new(100.0, 500.0, 640.0, 480.0));
    let img = page.append(tile, "img", "", Rect::new(100.0, 500.0, 640.0, 480.0));
    let footer = page.append(MemoryPage::BODY, "footer", "", Rect::new(0.0, 2280.0, 1280.0, 120.0));
    let line = page.append(footer, "p", "", Rect::new(24.0, 2300.0, 400.0, 24.0));

    page.set_initial_style(h2, Some("color: rgb(10, 10, 10);  letter-spacing:-0.02em"));
    page.set_initial_style(p, Some(""));
    page.set_initial_style(MemoryPage::BODY, Some("background: white;"));

    let nodes = vec![MemoryPage::BODY, title, h2, p, tile, img, line];
    (page, nodes)
}

fn styles_of(page: &MemoryPage, nodes: &[NodeId]) -> Vec<Option<String>> {
    nodes.iter().map(|&n| page.style_of(n)).collect()
}

fn full_reset(orchestrator: &mut GravityOrchestrator<MemoryPage>, page: &MemoryPage) {
    assert!(orchestrator.reset(page));
    assert!(orchestrator.finish_reset(page));
}

#[test]
fn trigger_is_idempotent_while_active() {
    let (page, _) = portfolio();
    let mut orchestrator = seeded();

    assert!(orchestrator.trigger(&page));
    let bodies = orchestrator.world().map(|w| w.body_count());
    let anchors: Vec<Rect> = orchestrator
        .session()
        .map(|s| s.captured().exploded.iter().map(|e| e.anchor).collect())
        .unwrap_or_default();

    assert!(!orchestrator.trigger(&page));
    assert_eq!(orchestrator.world().map(|w| w.body_count()), bodies);
    let again: Vec<Rect> = orchestrator
        .session()
        .map(|s| s.captured().exploded.iter().map(|e| e.anchor).collect())
        .unwrap_or_default();
    assert_eq!(anchors, again);

    // Also ignored while restoring
    orchestrator.reset(&page);
    assert!(!orchestrator.trigger(&page));
    assert_eq!(orchestrator.phase(), Phase::Restoring);
}

#[test]
fn full_cycle_restores_styles_byte_exact() {
    let (page, nodes) = portfolio();
    page.set_scroll(0.0, 640.0);
    let before = styles_of(&page, &nodes);

    let mut orchestrator = seeded();
    orchestrator.trigger(&page);
    for _ in 0..30 {
        orchestrator.step();
        orchestrator.render(&page);
    }
    assert_ne!(styles_of(&page, &nodes), before);
    assert_eq!(page.style_property(MemoryPage::BODY, "overflow").as_deref(), Some("hidden"));

    full_reset(&mut orchestrator, &page);

    assert_eq!(styles_of(&page, &nodes), before);
    assert_eq!(page.scroll_position(), Vec2::new(0.0, 640.0));
    assert_eq!(orchestrator.phase(), Phase::Idle);
    assert!(orchestrator.session().is_none());
}

#[test]
fn second_cycle_starts_from_clean_state() {
    let (page, nodes) = portfolio();
    let before = styles_of(&page, &nodes);
    let mut orchestrator = seeded();

    orchestrator.trigger(&page);
    let first = orchestrator.stats();
    full_reset(&mut orchestrator, &page);

    assert!(orchestrator.trigger(&page));
    let second = orchestrator.stats();
    assert_eq!(first.exploded, second.exploded);
    assert_eq!(second.steps, 0);
    full_reset(&mut orchestrator, &page);
    assert_eq!(styles_of(&page, &nodes), before);
}

#[test]
fn empty_page_builds_only_boundaries() {
    let page = MemoryPage::new(800.0, 600.0);
    let mut orchestrator = seeded();

    assert!(orchestrator.trigger(&page));
    let world = orchestrator.world().map(|w| (w.dynamic_count(), w.static_count()));
    assert_eq!(world, Some((0, 3)));

    assert!(orchestrator.step());
    assert_eq!(orchestrator.render(&page), Some(RenderReport::default()));
    full_reset(&mut orchestrator, &page);
    assert!(!orchestrator.is_active());
    assert_eq!(page.style_of(MemoryPage::BODY), None);
}

#[test]
fn heading_freezes_then_falls() {
    let page = MemoryPage::new(1024.0, 768.0);
    let main = page.append(MemoryPage::BODY, "main", "", Rect::new(0.0, 0.0, 1024.0, 768.0));
    let h1 = page.append(main, "h1", "", Rect::new(100.0, 50.0, 300.0, 60.0));
    let mut orchestrator = seeded();

    orchestrator.trigger(&page);
    assert_eq!(page.style_property(h1, "position").as_deref(), Some("absolute"));
    assert_eq!(page.style_property(h1, "left").as_deref(), Some("100px"));
    assert_eq!(page.style_property(h1, "top").as_deref(), Some("50px"));
    assert_eq!(page.style_property(h1, "width").as_deref(), Some("300px"));
    assert_eq!(page.style_property(h1, "transform").as_deref(), Some(styles::IDENTITY_TRANSFORM));

    assert!(orchestrator.step());
    orchestrator.render(&page);

    let body = orchestrator
        .world()
        .and_then(|w| w.bodies().iter().find(|b| b.tag == Some(0)).cloned())
        .expect("heading body");
    let dy = body.pos.y - 80.0;
    assert!(dy > 0.0);
    assert!(body.angle.abs() <= 0.025);
    assert_eq!(
        page.style_property(h1, "transform"),
        Some(styles::body_transform(0.0, dy, body.angle))
    );
    assert!(page
        .style_property(h1, "transform")
        .is_some_and(|t| t.starts_with("translate(0px, ")));
    // left/top never move during rendering
    assert_eq!(page.style_property(h1, "left").as_deref(), Some("100px"));
    assert_eq!(page.style_property(h1, "top").as_deref(), Some("50px"));
}

#[test]
fn pointer_is_ignored_until_armed() {
    let (page, _) = portfolio();
    let mut orchestrator = seeded();
    orchestrator.trigger(&page);

    assert_eq!(orchestrator.pointer_down(&page, 400.0, 260.0), 0);
    assert!(!orchestrator.is_listening());

    assert!(orchestrator.arm_interaction());
    assert!(orchestrator.pointer_down(&page, 400.0, 260.0) > 0);
    assert!(orchestrator.stats().impulses > 0);

    orchestrator.reset(&page);
    assert!(!orchestrator.is_listening());
    assert_eq!(orchestrator.pointer_down(&page, 400.0, 260.0), 0);
}

#[test]
fn pointer_uses_page_coordinates() {
    let page = MemoryPage::new(1024.0, 3000.0);
    let main = page.append(MemoryPage::BODY, "main", "", Rect::new(0.0, 0.0, 1024.0, 3000.0));
    page.append(main, "p", "", Rect::new(100.0, 2000.0, 200.0, 40.0));
    page.set_scroll(0.0, 1800.0);

    let mut orchestrator = seeded();
    orchestrator.trigger(&page);
    orchestrator.arm_interaction();

    // Client y 220 + scroll 1800 is right on top of the paragraph
    assert_eq!(orchestrator.pointer_down(&page, 200.0, 220.0), 1);
    // Without the scroll offset it would be 1800px away
    page.set_scroll(0.0, 0.0);
    assert_eq!(orchestrator.pointer_down(&page, 200.0, 220.0), 0);
}

#[test]
fn render_survives_a_broken_element() {
    let (page, nodes) = portfolio();
    let mut orchestrator = seeded();
    orchestrator.trigger(&page);

    // h2 rejects writes from now on
    page.poison(nodes[2]);
    orchestrator.step();
    let report = orchestrator.render(&page).expect("active");
    assert_eq!(report.failed, 1);
    assert_eq!(report.written, orchestrator.stats().exploded as usize - 1);
    assert_eq!(orchestrator.stats().render_failures, 1);
}

#[test]
fn render_stops_once_reset_begins() {
    let (page, nodes) = portfolio();
    let mut orchestrator = seeded();
    orchestrator.trigger(&page);
    orchestrator.step();
    assert!(orchestrator.render(&page).is_some());

    orchestrator.reset(&page);
    assert!(orchestrator.world().is_none());
    let animating = page.style_of(nodes[2]);
    assert_eq!(orchestrator.render(&page), None);
    assert!(!orchestrator.step());
    assert_eq!(orchestrator.tick(1000.0), 0);
    assert_eq!(page.style_of(nodes[2]), animating);
}

#[test]
fn reset_is_reentrant() {
    let (page, nodes) = portfolio();
    let before = styles_of(&page, &nodes);
    let mut orchestrator = seeded();

    assert!(!orchestrator.reset(&page));
    assert!(!orchestrator.finish_reset(&page));

    orchestrator.trigger(&page);
    assert!(orchestrator.reset(&page));
    assert!(!orchestrator.reset(&page));
    assert!(orchestrator.is_active());

    assert!(orchestrator.finish_reset(&page));
    assert!(!orchestrator.finish_reset(&page));
    assert!(!orchestrator.reset(&page));
    assert_eq!(styles_of(&page, &nodes), before);
}

#[test]
fn tick_runs_whole_fixed_steps() {
    let (page, _) = portfolio();
    let mut orchestrator = seeded();
    assert_eq!(orchestrator.tick(100.0), 0);

    orchestrator.trigger(&page);
    let step_ms = orchestrator.config().timing.step_ms;
    assert_eq!(orchestrator.tick(step_ms * 2.5), 2);
    assert_eq!(orchestrator.tick(step_ms * 0.75), 1);
    assert_eq!(orchestrator.stats().steps, 3);
}
