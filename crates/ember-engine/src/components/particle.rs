//! The particle record shared by all effect kinds.

use glam::Vec2;

use crate::renderer::color::{self, Color};

/// Exponent applied to the remaining-life ratio when deriving alpha.
/// Values above 1 front-load the fade so particles die out softly.
pub const ALPHA_FALLOFF: f32 = 1.2;

/// Determines integration and draw rules for a pooled particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Ascending firework shell; bursts at its apex.
    Rocket,
    /// Short-lived rocket exhaust.
    Spark,
    /// Burst fragment sprayed radially from an explosion.
    Bloom,
    /// Finger-follow mote emitted while dragging.
    Trail,
    /// Expanding shockwave circle, spawned on soft bursts only.
    Ring,
}

/// A mutable particle record. Plain `Copy` data so the simulation can
/// work on a local copy while the pool is free for spawning.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// Whether this record occupies a live slot (vs. sitting in the pool).
    pub active: bool,
    pub kind: ParticleKind,
    pub pos: Vec2,
    /// Position at the previous step, for line-segment trail rendering.
    pub prev: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Color,
    /// Derived from the remaining-life ratio every step; always in [0, 1].
    pub alpha: f32,
    pub life_ms: f32,
    pub max_life_ms: f32,
    /// Rocket apex height; the rocket must burst once it reaches it.
    pub target_y: Option<f32>,
    pub ring_radius: f32,
    pub ring_radius_speed: f32,
    pub ring_line_width: f32,
}

impl Particle {
    /// An inactive record as stored in the free list.
    pub fn idle() -> Self {
        Self {
            active: false,
            kind: ParticleKind::Bloom,
            pos: Vec2::ZERO,
            prev: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 1.0,
            color: color::WHITE,
            alpha: 0.0,
            life_ms: 0.0,
            max_life_ms: 0.0,
            target_y: None,
            ring_radius: 0.0,
            ring_radius_speed: 0.0,
            ring_line_width: 0.0,
        }
    }

    /// Clear kind-specific fields so a recycled record carries nothing over.
    pub fn reset_transient(&mut self) {
        self.target_y = None;
        self.ring_radius = 0.0;
        self.ring_radius_speed = 0.0;
        self.ring_line_width = 0.0;
    }

    pub fn life_ratio(&self) -> f32 {
        if self.max_life_ms <= 0.0 {
            return 0.0;
        }
        (self.life_ms / self.max_life_ms).clamp(0.0, 1.0)
    }

    /// Recompute alpha from the remaining-life ratio.
    pub fn fade(&mut self) {
        self.alpha = self.life_ratio().powf(ALPHA_FALLOFF).clamp(0.0, 1.0);
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_particle_is_inactive() {
        let p = Particle::idle();
        assert!(!p.active);
        assert_eq!(p.alpha, 0.0);
    }

    #[test]
    fn fade_stays_in_unit_interval() {
        let mut p = Particle::idle();
        p.max_life_ms = 500.0;
        for life in [-100.0, 0.0, 125.0, 250.0, 500.0, 900.0] {
            p.life_ms = life;
            p.fade();
            assert!((0.0..=1.0).contains(&p.alpha), "alpha was {}", p.alpha);
        }
    }

    #[test]
    fn fade_is_monotonic_in_life() {
        let mut p = Particle::idle();
        p.max_life_ms = 1000.0;
        let mut prev_alpha = f32::INFINITY;
        for life in (0..=10).rev().map(|i| i as f32 * 100.0) {
            p.life_ms = life;
            p.fade();
            assert!(p.alpha <= prev_alpha);
            prev_alpha = p.alpha;
        }
    }

    #[test]
    fn reset_transient_clears_kind_extras() {
        let mut p = Particle::idle();
        p.target_y = Some(120.0);
        p.ring_radius = 8.0;
        p.ring_radius_speed = 2.8;
        p.ring_line_width = 1.4;
        p.reset_transient();
        assert!(p.target_y.is_none());
        assert_eq!(p.ring_radius, 0.0);
        assert_eq!(p.ring_radius_speed, 0.0);
        assert_eq!(p.ring_line_width, 0.0);
    }

    #[test]
    fn zero_max_life_yields_zero_ratio() {
        let p = Particle::idle();
        assert_eq!(p.life_ratio(), 0.0);
    }
}
