//! GravitySession - everything one trigger owns, dropped at the end of reset

use crate::core::random::Rng;
use crate::domain::config::{GravityConfig, TimingConfig};
use crate::domain::page::Page;
use crate::domain::snapshot::OriginalStyle;
use crate::domain::styles;
use crate::rigid_body::Vec2;
use crate::rigid_body_system::{PhysicsWorld, Runner};
use crate::systems::builder;
use crate::systems::extraction::{self, Capture};
use crate::systems::interaction::InteractionHandler;
use crate::systems::render::{self, RenderReport};
use crate::systems::restoration;

use super::session_stats::SessionStats;

/// Page body plus the style attribute it had before the scroll lock
struct ScrollLock<N> {
    body: N,
    original_style: OriginalStyle,
}

pub struct GravitySession<N> {
    capture: Capture<N>,
    /// `None` once stopped; released synchronously on reset
    world: Option<PhysicsWorld>,
    runner: Runner,
    interaction: InteractionHandler,
    /// Scroll position at trigger, restored last
    scroll_anchor: Vec2,
    scroll_lock: Option<ScrollLock<N>>,
    timing: TimingConfig,
    stats: SessionStats,
}

impl<N: Clone + PartialEq> GravitySession<N> {
    /// Select, snapshot and freeze the page, lock scrolling and build the
    /// world. The runner is not started.
    pub fn capture<P: Page<Node = N>>(page: &P, config: &GravityConfig, rng: &mut Rng) -> Self {
        let scroll_anchor = page.scroll_position();
        let viewport_width = page.viewport_width();
        let page_height = page.document_height();

        let selection = extraction::select_candidates(page, config);
        let capture = extraction::capture(page, selection, config);
        let scroll_lock = lock_scroll(page, page_height);

        let world = builder::build_world(&capture.exploded, viewport_width, page_height, config, rng);

        let stats = SessionStats {
            dissipated: capture.dissipated.len() as u32,
            exploded: capture.exploded.len() as u32,
            boundary: world.static_count() as u32,
            ..SessionStats::default()
        };

        Self {
            capture,
            world: Some(world),
            runner: Runner::new(config.timing.step_ms),
            interaction: InteractionHandler::new(config.impulse),
            scroll_anchor,
            scroll_lock,
            timing: config.timing,
            stats,
        }
    }

    pub fn start(&mut self) {
        if self.world.is_some() {
            self.runner.start();
        }
    }

    /// Stop stepping and drop the world
    pub fn stop(&mut self) {
        self.runner.stop();
        self.world = None;
    }

    /// Feed wall-clock time to the fixed-step runner
    pub fn tick(&mut self, elapsed_ms: f64) -> u32 {
        let Some(world) = self.world.as_mut() else {
            return 0;
        };
        let steps = self.runner.tick(world, elapsed_ms);
        self.stats.steps += steps;
        steps
    }

    /// Exactly one fixed step, regardless of elapsed time
    pub fn step_once(&mut self) -> bool {
        if !self.runner.is_running() {
            return false;
        }
        let Some(world) = self.world.as_mut() else {
            return false;
        };
        world.step(self.runner.delta_ms());
        self.stats.steps += 1;
        true
    }

    pub fn render<P: Page<Node = N>>(&mut self, page: &P) -> RenderReport {
        let Some(world) = self.world.as_ref() else {
            return RenderReport::default();
        };
        let report = render::render_frame(page, world, &self.capture.exploded);
        self.stats.frames += 1;
        self.stats.render_failures += report.failed as u32;
        report
    }

    pub fn arm_interaction(&mut self) {
        self.interaction.arm();
    }

    pub fn is_listening(&self) -> bool {
        self.interaction.is_listening()
    }

    /// Repulse bodies around a pointer in page coordinates
    pub fn pointer_down(&mut self, pointer: Vec2) -> usize {
        let Some(world) = self.world.as_mut() else {
            return 0;
        };
        let pushed = self.interaction.on_pointer_down(world, pointer);
        self.stats.impulses += pushed as u32;
        pushed
    }

    /// Stop physics, release the world and start the return animation
    pub fn begin_restore<P: Page<Node = N>>(&mut self, page: &P) -> usize {
        self.interaction.disarm();
        self.stop();
        restoration::begin(page, &self.capture, &self.timing)
    }

    /// Hard reset: original styles, scroll lock, scroll position.
    /// Consumes the session.
    pub fn finish<P: Page<Node = N>>(mut self, page: &P) -> SessionStats {
        self.stop();
        let failed = restoration::hard_reset(page, &self.capture);
        if failed > 0 {
            gravity_warn!("{} elements kept session styles", failed);
        }

        if let Some(lock) = self.scroll_lock.take() {
            if let Err(e) = lock.original_style.restore(page, &lock.body) {
                gravity_warn!("scroll unlock failed: {}", e);
            }
        }
        page.scroll_to(self.scroll_anchor.x, self.scroll_anchor.y);
        self.stats
    }

    pub fn world(&self) -> Option<&PhysicsWorld> {
        self.world.as_ref()
    }

    pub fn captured(&self) -> &Capture<N> {
        &self.capture
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}

/// Pin the body to the full document height with overflow hidden
fn lock_scroll<P: Page>(page: &P, page_height: f64) -> Option<ScrollLock<P::Node>> {
    let body = page.body()?;
    let original_style = OriginalStyle::capture(page, &body);
    let decls = [("height", styles::px(page_height)), ("overflow", "hidden".to_string())];
    extraction::write_declarations(page, &body, &decls);
    Some(ScrollLock { body, original_style })
}
