//! The engine facade: one instance per mounted canvas.
//!
//! The host's animation scheduler owns the loop; each callback invocation
//! calls `frame()`. Starting and stopping are idempotent, and a stopped
//! engine reports `false` from `frame()` so the host can cancel its
//! pending callback. Input handlers mutate the same single-threaded state
//! directly; every spawn path tolerates pool exhaustion.

use glam::Vec2;

use crate::api::config::{EngineConfig, Viewport};
use crate::components::pool::ParticlePool;
use crate::core::rng::Rng;
use crate::core::time::FrameClock;
use crate::input::pointer::{PointerEvent, TrailTracker};
use crate::renderer::surface::Surface;
use crate::systems::quality::{detect_initial_tier, QualityGovernor, QualityProfile, QualityTier, Tuning};
use crate::systems::sim::simulate;
use crate::systems::spawn::{burst_at, spawn_rocket, spawn_trail, BurstStrength};

/// Delay range for the very first automatic launch of a session.
const FIRST_LAUNCH_MS: (f32, f32) = (420.0, 980.0);

/// Explicit run-state machine for the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Stopped,
    Running,
}

pub struct Engine {
    config: EngineConfig,
    view: Viewport,
    tier: QualityTier,
    governor: QualityGovernor,
    clock: FrameClock,
    rng: Rng,
    pool: ParticlePool,
    tracker: TrailTracker,
    state: RunState,
    /// Host-scheduler timestamp of the next automatic rocket launch;
    /// 0 means "not yet scheduled" and is resolved on the first frame.
    next_auto_launch_at: f64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let tier = detect_initial_tier(config.benchmark_level);
        let view = config.viewport();
        let pool = ParticlePool::new(config.tuning.max_capacity());
        log::debug!(
            "engine created: {}x{} dpr {} tier {:?}",
            view.width,
            view.height,
            config.device_pixel_ratio,
            tier
        );
        Self {
            rng: Rng::new(config.seed),
            view,
            tier,
            governor: QualityGovernor::new(),
            clock: FrameClock::new(),
            pool,
            tracker: TrailTracker::new(),
            state: RunState::Stopped,
            next_auto_launch_at: 0.0,
            config,
        }
    }

    /// Begin (or resume) the loop. No-op while already running. Resuming
    /// never replays missed time; the next frame starts from a
    /// reference-sized delta.
    pub fn start(&mut self) {
        if self.state == RunState::Running {
            return;
        }
        self.state = RunState::Running;
        self.clock.reset();
        log::debug!("engine started");
    }

    /// Halt the loop. No-op while already stopped. The host must also
    /// cancel its pending scheduled callback; `frame()` guards against
    /// one that fires anyway.
    pub fn stop(&mut self) {
        if self.state == RunState::Stopped {
            return;
        }
        self.state = RunState::Stopped;
        log::debug!("engine stopped");
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Run one frame: advance the clock, let the governor adjust the
    /// tier, auto-launch when due, then simulate and draw. Returns
    /// whether the host should schedule the next callback.
    pub fn frame<S: Surface>(&mut self, now_ms: f64, surface: &mut S) -> bool {
        if self.state != RunState::Running {
            return false;
        }

        let delta = self.clock.tick(now_ms);
        if let Some(next) = self.governor.observe(delta.dt_ms, self.tier) {
            self.tier = next;
        }
        let profile = *self.profile();

        if self.next_auto_launch_at == 0.0 {
            self.next_auto_launch_at = now_ms + self.rng.range(FIRST_LAUNCH_MS.0, FIRST_LAUNCH_MS.1) as f64;
        }
        if now_ms >= self.next_auto_launch_at {
            spawn_rocket(&mut self.pool, &mut self.rng, &profile, self.view);
            let (lo, hi) = profile.auto_launch_ms;
            self.next_auto_launch_at = now_ms + self.rng.range(lo, hi) as f64;
        }

        simulate(&mut self.pool, &mut self.rng, &profile, self.view, surface, delta);
        true
    }

    /// Update logical dimensions after a host resize. Live particles keep
    /// their positions; out-of-bounds culling picks up the new edges.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.view = Viewport::new(width, height);
        self.config.width = width;
        self.config.height = height;
    }

    /// Trigger a burst from outside the input path (e.g. a "launch"
    /// button). Works while stopped too; the particles simply wait for
    /// the next frame.
    pub fn burst_at(&mut self, x: f32, y: f32, strength: BurstStrength) {
        let profile = *self.profile();
        burst_at(&mut self.pool, &mut self.rng, &profile, Vec2::new(x, y), strength);
    }

    /// Feed one normalized gesture event. Events without a usable
    /// coordinate are ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent, now_ms: f64) {
        let profile = *self.profile();
        match event {
            PointerEvent::Tap(sample) => {
                let Some(point) = sample.canvas_point() else {
                    return;
                };
                burst_at(&mut self.pool, &mut self.rng, &profile, point, BurstStrength::Soft);
            }
            PointerEvent::TouchStart(sample) => {
                let Some(point) = sample.canvas_point() else {
                    return;
                };
                self.tracker.begin(point, now_ms);
                spawn_trail(&mut self.pool, &mut self.rng, &profile, point);
            }
            PointerEvent::TouchMove(sample) => {
                let Some(point) = sample.canvas_point() else {
                    return;
                };
                let points = self
                    .tracker
                    .sample(point, now_ms, profile.trail_emit_interval_ms);
                for p in points {
                    spawn_trail(&mut self.pool, &mut self.rng, &profile, p);
                }
            }
            PointerEvent::TouchEnd => self.tracker.end(),
        }
    }

    /// Replace the tier profiles. Drops live particles when the pool has
    /// to be re-sized; intended for host configuration, not mid-show use.
    pub fn set_tuning(&mut self, tuning: Tuning) {
        let capacity = tuning.max_capacity();
        if capacity != self.pool.capacity() {
            self.pool = ParticlePool::new(capacity);
        }
        self.config.tuning = tuning;
    }

    pub fn quality(&self) -> QualityTier {
        self.tier
    }

    pub fn viewport(&self) -> Viewport {
        self.view
    }

    pub fn active_particles(&self) -> usize {
        self.pool.active_len()
    }

    pub fn fps_avg(&self) -> f32 {
        self.governor.fps_avg()
    }

    fn profile(&self) -> &QualityProfile {
        self.config.tuning.profile(self.tier)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
