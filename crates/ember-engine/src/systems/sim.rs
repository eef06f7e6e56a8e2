//! Per-frame integrator and draw pass.
//!
//! Active particles are walked in reverse so swap-removal is safe while
//! iterating. Each particle is copied out of the pool, updated and drawn,
//! then written back or recycled; working on a copy keeps the pool free
//! for mid-step spawns (rocket bursts, exhaust sparks).

use glam::Vec2;

use crate::api::config::Viewport;
use crate::components::particle::{Particle, ParticleKind};
use crate::components::pool::ParticlePool;
use crate::core::rng::Rng;
use crate::core::time::FrameDelta;
use crate::renderer::color;
use crate::renderer::surface::{CompositeMode, Surface};
use crate::systems::quality::QualityProfile;
use crate::systems::spawn::{burst_at, spawn_spark, BurstStrength};

/// Horizontal out-of-bounds margin.
const MARGIN_X: f32 = 80.0;
/// Margin below the bottom edge.
const MARGIN_BOTTOM: f32 = 140.0;
/// Margin above the top edge for rockets; generous so a fast shell is not
/// culled just before its apex check.
const MARGIN_TOP_ROCKET: f32 = 160.0;
const MARGIN_TOP: f32 = 120.0;

/// Rockets fly near-frictionless so the ascent reads as propulsion.
const ROCKET_FRICTION: f32 = 0.992;
/// Fraction of tier gravity applied to rockets.
const ROCKET_GRAVITY_SCALE: f32 = 0.18;
/// Remaining life under which the low-altitude safety net engages.
const ROCKET_LOW_LIFE_MS: f32 = 60.0;
/// A rocket still below this height fraction with its life nearly spent
/// gets a life extension instead of a visually wrong low burst.
const ROCKET_LOW_BURST_FLOOR: f32 = 0.62;
/// Life granted by the safety net.
const ROCKET_LIFE_EXTENSION_MS: f32 = 220.0;

const RING_LINE_TAPER: f32 = 0.02;
const RING_LINE_MIN: f32 = 0.8;

/// Chance that a spark draws its endpoint dot in addition to its segment.
const SPARK_DOT_CHANCE: f32 = 0.3;

/// Run one simulation step and draw every surviving particle.
///
/// The two-pass compositing is the core visual trick: a low-alpha
/// destination-out erase fades the previous frame into a glowing trail,
/// then particles are drawn additively on top.
pub fn simulate<S: Surface>(
    pool: &mut ParticlePool,
    rng: &mut Rng,
    profile: &QualityProfile,
    view: Viewport,
    surface: &mut S,
    delta: FrameDelta,
) {
    surface.set_composite_mode(CompositeMode::DestinationOut);
    surface.set_global_alpha(profile.erase_alpha);
    surface.fill_rect(0.0, 0.0, view.width, view.height, color::BLACK);
    surface.set_composite_mode(CompositeMode::Lighter);

    let step = delta.step;
    let mut i = pool.active_len();
    while i > 0 {
        i -= 1;
        let mut p = pool.active()[i];

        p.life_ms -= delta.dt_ms;
        if p.life_ms <= 0.0 {
            // Expired rockets still owe their burst.
            if p.kind == ParticleKind::Rocket {
                burst_at(pool, rng, profile, p.pos, BurstStrength::Normal);
            }
            pool.release(i);
            continue;
        }

        p.fade();
        p.prev = p.pos;

        match p.kind {
            ParticleKind::Ring => {
                update_ring(&mut p, step);
                draw_ring(surface, &p);
                pool.active_mut()[i] = p;
            }
            ParticleKind::Rocket => {
                p.pos += p.vel * step;

                if p.target_y.is_some_and(|ty| p.pos.y <= ty) {
                    burst_at(pool, rng, profile, p.pos, BurstStrength::Normal);
                    pool.release(i);
                    continue;
                }

                if p.life_ms < ROCKET_LOW_LIFE_MS {
                    if p.pos.y > view.height * ROCKET_LOW_BURST_FLOOR {
                        // Let it climb a little longer instead of bursting low.
                        p.life_ms = ROCKET_LIFE_EXTENSION_MS;
                        p.max_life_ms += ROCKET_LIFE_EXTENSION_MS;
                    } else {
                        burst_at(pool, rng, profile, p.pos, BurstStrength::Normal);
                        pool.release(i);
                        continue;
                    }
                }

                p.vel.y += profile.gravity * ROCKET_GRAVITY_SCALE * step;
                p.vel *= ROCKET_FRICTION.powf(step);

                if out_of_bounds(p.pos, view, MARGIN_TOP_ROCKET) {
                    // Off-screen rockets vanish without bursting.
                    pool.release(i);
                    continue;
                }

                pool.active_mut()[i] = p;
                if rng.chance(profile.spark_chance) {
                    spawn_spark(pool, rng, profile, p.pos);
                }

                surface.set_global_alpha(p.alpha);
                surface.fill_circle(p.pos, p.size * 1.25, p.color);
            }
            ParticleKind::Spark | ParticleKind::Bloom | ParticleKind::Trail => {
                p.pos += p.vel * step;
                p.vel.y += profile.gravity * step;
                p.vel *= profile.friction.powf(step);

                if out_of_bounds(p.pos, view, MARGIN_TOP) {
                    pool.release(i);
                    continue;
                }

                pool.active_mut()[i] = p;
                draw_streak(surface, rng, &p);
            }
        }
    }

    surface.set_global_alpha(1.0);
}

fn update_ring(p: &mut Particle, step: f32) {
    p.ring_radius += p.ring_radius_speed * step;
    p.ring_line_width = (p.ring_line_width - RING_LINE_TAPER * step).max(RING_LINE_MIN);
}

fn draw_ring<S: Surface>(surface: &mut S, p: &Particle) {
    if p.ring_radius <= 0.0 {
        return;
    }
    surface.set_global_alpha(p.alpha);
    surface.stroke_circle(p.pos, p.ring_radius, p.ring_line_width, p.color);
}

/// Line segment from the previous position plus a small endpoint dot.
fn draw_streak<S: Surface>(surface: &mut S, rng: &mut Rng, p: &Particle) {
    surface.set_global_alpha(p.alpha);
    surface.stroke_line(p.prev, p.pos, p.size, p.color);

    match p.kind {
        ParticleKind::Bloom | ParticleKind::Trail => {
            surface.fill_circle(p.pos, p.size * 0.55, p.color);
        }
        ParticleKind::Spark => {
            if rng.chance(SPARK_DOT_CHANCE) {
                surface.fill_circle(p.pos, p.size * 0.8, p.color);
            }
        }
        _ => {}
    }
}

fn out_of_bounds(pos: Vec2, view: Viewport, margin_top: f32) -> bool {
    pos.x < -MARGIN_X
        || pos.x > view.width + MARGIN_X
        || pos.y < -margin_top
        || pos.y > view.height + MARGIN_BOTTOM
}
