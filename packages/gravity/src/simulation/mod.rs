//! Gravity orchestrator - the session state machine
//!
//! `Idle → Exploding → Active → Restoring → Idle`
//!
//! The orchestrator owns at most one `GravitySession`. Everything that
//! schedules work (stepper, frame loop, pointer listener, restore timer)
//! calls in here and checks the phase first, so a late callback after a
//! reset is a no-op rather than a write to a released world.

use crate::core::random::Rng;
use crate::domain::config::GravityConfig;
use crate::domain::page::Page;
use crate::rigid_body::Vec2;
use crate::rigid_body_system::PhysicsWorld;
use crate::systems::render::RenderReport;

#[path = "session/session.rs"]
mod session;
#[path = "stats/session_stats.rs"]
mod session_stats;

pub use session::GravitySession;
pub use session_stats::SessionStats;

/// Fallback seed when the browser offers no entropy
const DEFAULT_SEED: u32 = 0x2545_F491;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Capturing and building; never observable between calls
    Exploding,
    Active,
    /// Return animation running, hard reset pending
    Restoring,
}

pub struct GravityOrchestrator<P: Page> {
    config: GravityConfig,
    phase: Phase,
    session: Option<GravitySession<P::Node>>,
    rng: Rng,
    /// Stats of the last finished session
    last_stats: SessionStats,
}

impl<P: Page> GravityOrchestrator<P> {
    pub fn new(config: GravityConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Rng::new(seed),
            None => Rng::from_entropy(DEFAULT_SEED),
        };
        Self {
            config,
            phase: Phase::Idle,
            session: None,
            rng,
            last_stats: SessionStats::default(),
        }
    }

    pub fn config(&self) -> &GravityConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True from trigger until the hard reset has completed
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Explode the page. Ignored unless idle; returns whether a session
    /// started.
    pub fn trigger(&mut self, page: &P) -> bool {
        if self.phase != Phase::Idle {
            gravity_log!("trigger ignored while {:?}", self.phase);
            return false;
        }

        self.phase = Phase::Exploding;
        let mut session = GravitySession::capture(page, &self.config, &mut self.rng);
        session.start();

        let stats = session.stats();
        gravity_log!(
            "session started: {} bodies, {} dissipated, {} boundaries",
            stats.exploded,
            stats.dissipated,
            stats.boundary
        );

        self.session = Some(session);
        self.phase = Phase::Active;
        true
    }

    fn active_session(&mut self) -> Option<&mut GravitySession<P::Node>> {
        if self.phase != Phase::Active {
            return None;
        }
        self.session.as_mut()
    }

    /// Advance physics by wall-clock time
    pub fn tick(&mut self, elapsed_ms: f64) -> u32 {
        self.active_session().map_or(0, |s| s.tick(elapsed_ms))
    }

    /// One fixed step
    pub fn step(&mut self) -> bool {
        self.active_session().map_or(false, |s| s.step_once())
    }

    /// Write body transforms. `None` once the session is no longer active;
    /// the frame loop stops on that.
    pub fn render(&mut self, page: &P) -> Option<RenderReport> {
        self.active_session().map(|s| s.render(page))
    }

    pub fn arm_interaction(&mut self) -> bool {
        match self.active_session() {
            Some(session) => {
                session.arm_interaction();
                true
            }
            None => false,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.phase == Phase::Active && self.session.as_ref().map_or(false, |s| s.is_listening())
    }

    /// Pointer-down at viewport (client) coordinates
    pub fn pointer_down(&mut self, page: &P, client_x: f64, client_y: f64) -> usize {
        let pointer = Vec2::new(client_x, client_y) + page.scroll_position();
        self.active_session().map_or(0, |s| s.pointer_down(pointer))
    }

    /// Stop the simulation and start the return animation.
    ///
    /// Safe to call at any time; does nothing when idle or already
    /// restoring. Returns whether a restore began.
    pub fn reset(&mut self, page: &P) -> bool {
        if !matches!(self.phase, Phase::Exploding | Phase::Active) {
            return false;
        }
        self.phase = Phase::Restoring;

        if let Some(session) = self.session.as_mut() {
            let failed = session.begin_restore(page);
            if failed > 0 {
                gravity_warn!("{} style writes failed starting restore", failed);
            }
        }
        gravity_log!("restoring");
        true
    }

    /// Hard reset after the return animation; back to `Idle`
    pub fn finish_reset(&mut self, page: &P) -> bool {
        if self.phase != Phase::Restoring {
            return false;
        }
        if let Some(session) = self.session.take() {
            self.last_stats = session.finish(page);
        }
        self.phase = Phase::Idle;
        gravity_log!("restore complete");
        true
    }

    pub fn session(&self) -> Option<&GravitySession<P::Node>> {
        self.session.as_ref()
    }

    pub fn world(&self) -> Option<&PhysicsWorld> {
        self.session.as_ref().and_then(|s| s.world())
    }

    /// Current session stats, or those of the last finished one
    pub fn stats(&self) -> SessionStats {
        self.session.as_ref().map_or(self.last_stats, |s| s.stats())
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
