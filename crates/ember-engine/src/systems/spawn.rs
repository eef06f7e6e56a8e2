//! Per-kind particle initialization.
//!
//! Spawners pull from the pool and fill in kinematic/visual parameters;
//! the simulation step stays kind-agnostic except for a few branch
//! points. Every spawner tolerates pool exhaustion by doing nothing.

use glam::Vec2;

use crate::api::config::Viewport;
use crate::components::particle::ParticleKind;
use crate::components::pool::ParticlePool;
use crate::core::rng::Rng;
use crate::renderer::color;
use crate::systems::quality::QualityProfile;

/// How a burst was triggered. Soft bursts (taps, buttons) are smaller and
/// get a shockwave ring; normal bursts are full-size rocket explosions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstStrength {
    Soft,
    Normal,
}

/// Soft bursts spawn this fraction of the tier's fragment count.
pub const SOFT_BURST_SCALE: f32 = 0.65;

/// Launch a rocket from just below the bottom edge. The apex band sits in
/// the upper portion of the screen so bursts bloom above page content.
pub fn spawn_rocket(pool: &mut ParticlePool, rng: &mut Rng, profile: &QualityProfile, view: Viewport) {
    let start = Vec2::new(
        rng.range(view.width * 0.12, view.width * 0.88),
        view.height + rng.range(10.0, 40.0),
    );
    let target_y = rng.range(view.height * 0.16, view.height * 0.44);

    let Some(p) = pool.acquire(profile.max_particles) else {
        return;
    };
    p.kind = ParticleKind::Rocket;
    p.pos = start;
    p.prev = start;
    p.vel = Vec2::new(rng.range(-0.42, 0.42), -rng.range(9.4, 11.6));
    p.size = rng.range(1.4, 2.2);
    p.alpha = 1.0;
    p.life_ms = rng.range(1100.0, 1650.0);
    p.max_life_ms = p.life_ms;
    p.color = *rng.pick(&color::ROCKET_COLORS);
    p.target_y = Some(target_y);
}

/// Exhaust spark trailing a live rocket.
pub fn spawn_spark(pool: &mut ParticlePool, rng: &mut Rng, profile: &QualityProfile, at: Vec2) {
    let Some(p) = pool.acquire(profile.max_particles) else {
        return;
    };
    p.kind = ParticleKind::Spark;
    p.pos = at;
    p.prev = at;
    p.vel = Vec2::new(rng.range(-1.2, 1.2), rng.range(0.8, 2.6));
    p.size = rng.range(0.6, 1.2);
    p.alpha = rng.range(0.65, 0.95);
    p.life_ms = rng.range(220.0, 420.0);
    p.max_life_ms = p.life_ms;
    p.color = *rng.pick(&color::SPARK_COLORS);
}

/// Stationary shockwave circle; one per soft burst.
pub fn spawn_ring(pool: &mut ParticlePool, profile: &QualityProfile, at: Vec2) {
    let Some(p) = pool.acquire(profile.max_particles) else {
        return;
    };
    p.kind = ParticleKind::Ring;
    p.pos = at;
    p.prev = at;
    p.vel = Vec2::ZERO;
    p.size = 1.0;
    p.alpha = 1.0;
    p.life_ms = 360.0;
    p.max_life_ms = 360.0;
    p.color = color::RING_COLOR;
    p.ring_radius = 6.0;
    p.ring_radius_speed = 2.8;
    p.ring_line_width = 1.4;
}

/// Finger-follow mote with a slow random drift.
pub fn spawn_trail(pool: &mut ParticlePool, rng: &mut Rng, profile: &QualityProfile, at: Vec2) {
    let angle = rng.range(0.0, std::f32::consts::TAU);
    let speed = rng.range(0.25, 1.05);

    let Some(p) = pool.acquire(profile.max_particles) else {
        return;
    };
    p.kind = ParticleKind::Trail;
    p.pos = at;
    p.prev = at;
    p.vel = Vec2::new(angle.cos(), angle.sin()) * speed;
    p.size = rng.range(0.6, 1.25);
    p.alpha = rng.range(0.35, 0.65);
    p.life_ms = rng.range(180.0, 360.0);
    p.max_life_ms = p.life_ms;
    p.color = *rng.pick_weighted(&color::TRAIL_COLORS);
}

/// Spawn a burst: one shared palette, a batch of bloom fragments sprayed
/// radially, plus a ring when the burst is soft. Requests past the
/// particle cap are silently dropped.
pub fn burst_at(
    pool: &mut ParticlePool,
    rng: &mut Rng,
    profile: &QualityProfile,
    at: Vec2,
    strength: BurstStrength,
) {
    let palette = *rng.pick(&color::BURST_PALETTES);

    if strength == BurstStrength::Soft {
        spawn_ring(pool, profile, at);
    }

    let (lo, hi) = profile.burst_count;
    let base = rng.range(lo as f32, hi as f32);
    let count = match strength {
        BurstStrength::Soft => (base * SOFT_BURST_SCALE).round() as usize,
        BurstStrength::Normal => base.round() as usize,
    };

    for _ in 0..count {
        let angle = rng.range(0.0, std::f32::consts::TAU);
        let speed_base = match strength {
            BurstStrength::Soft => rng.range(2.0, 4.6),
            BurstStrength::Normal => rng.range(2.6, 5.8),
        };
        let speed = speed_base * (0.85 + rng.next_f32() * 0.3);
        let size = rng.range(1.15, 2.35);
        let alpha = rng.range(0.75, 1.0);
        let life = rng.range(560.0, 980.0);
        let fragment_color = *rng.pick(&palette);

        let Some(p) = pool.acquire(profile.max_particles) else {
            break;
        };
        p.kind = ParticleKind::Bloom;
        p.pos = at;
        p.prev = at;
        p.vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        p.size = size;
        p.alpha = alpha;
        p.life_ms = life;
        p.max_life_ms = life;
        p.color = fragment_color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::particle::ParticleKind;
    use crate::systems::quality::QualityProfile;

    fn view() -> Viewport {
        Viewport::new(400.0, 800.0)
    }

    fn profile() -> QualityProfile {
        QualityProfile::MEDIUM
    }

    #[test]
    fn rocket_spawns_in_inner_band_with_apex_target() {
        let mut pool = ParticlePool::new(64);
        let mut rng = Rng::new(1);
        for _ in 0..20 {
            spawn_rocket(&mut pool, &mut rng, &profile(), view());
        }
        for p in pool.active() {
            assert_eq!(p.kind, ParticleKind::Rocket);
            assert!(p.pos.x >= 400.0 * 0.12 && p.pos.x <= 400.0 * 0.88);
            assert!(p.pos.y >= 800.0);
            assert!(p.vel.y < -9.0, "rocket must move strongly upward");
            let ty = p.target_y.expect("rocket needs an apex");
            assert!(ty >= 800.0 * 0.16 && ty <= 800.0 * 0.44);
        }
    }

    #[test]
    fn soft_burst_has_one_ring_and_scaled_blooms() {
        let mut pool = ParticlePool::new(128);
        let mut rng = Rng::new(2);
        let prof = profile();
        burst_at(&mut pool, &mut rng, &prof, Vec2::new(100.0, 100.0), BurstStrength::Soft);

        let rings = pool.active().iter().filter(|p| p.kind == ParticleKind::Ring).count();
        let blooms = pool.active().iter().filter(|p| p.kind == ParticleKind::Bloom).count();
        assert_eq!(rings, 1);
        let lo = (prof.burst_count.0 as f32 * SOFT_BURST_SCALE).round() as usize;
        let hi = (prof.burst_count.1 as f32 * SOFT_BURST_SCALE).round() as usize;
        assert!(blooms >= lo.saturating_sub(1) && blooms <= hi + 1, "blooms = {}", blooms);
    }

    #[test]
    fn normal_burst_has_no_ring() {
        let mut pool = ParticlePool::new(128);
        let mut rng = Rng::new(3);
        let prof = profile();
        burst_at(&mut pool, &mut rng, &prof, Vec2::new(50.0, 50.0), BurstStrength::Normal);

        assert!(pool.active().iter().all(|p| p.kind == ParticleKind::Bloom));
        let blooms = pool.active_len();
        assert!(
            blooms >= prof.burst_count.0 as usize && blooms <= prof.burst_count.1 as usize,
            "blooms = {}",
            blooms
        );
    }

    #[test]
    fn burst_fragments_share_one_palette() {
        let mut pool = ParticlePool::new(128);
        let mut rng = Rng::new(4);
        burst_at(&mut pool, &mut rng, &profile(), Vec2::ZERO, BurstStrength::Normal);

        for p in pool.active() {
            let in_some_palette = color::BURST_PALETTES
                .iter()
                .any(|palette| palette.contains(&p.color));
            assert!(in_some_palette);
        }
    }

    #[test]
    fn spawns_past_cap_are_dropped_silently() {
        let mut pool = ParticlePool::new(10);
        let mut rng = Rng::new(5);
        let mut prof = profile();
        prof.max_particles = 10;
        prof.burst_count = (15, 15);

        burst_at(&mut pool, &mut rng, &prof, Vec2::ZERO, BurstStrength::Normal);
        assert_eq!(pool.active_len(), 10);
        assert_eq!(pool.free_len(), 0);
    }

    #[test]
    fn trail_alpha_within_bounds() {
        let mut pool = ParticlePool::new(64);
        let mut rng = Rng::new(6);
        for _ in 0..30 {
            spawn_trail(&mut pool, &mut rng, &profile(), Vec2::new(10.0, 10.0));
        }
        for p in pool.active() {
            assert_eq!(p.kind, ParticleKind::Trail);
            assert!(p.alpha >= 0.35 && p.alpha <= 0.65);
        }
    }

    #[test]
    fn ring_is_stationary() {
        let mut pool = ParticlePool::new(8);
        spawn_ring(&mut pool, &profile(), Vec2::new(5.0, 6.0));
        let p = &pool.active()[0];
        assert_eq!(p.vel, Vec2::ZERO);
        assert_eq!(p.ring_radius, 6.0);
        assert!(p.ring_radius_speed > 0.0);
    }
}
