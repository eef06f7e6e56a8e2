//! Quality tiers and the downgrade-only governor.
//!
//! Tier selection is a hysteresis loop, not a controller: a smoothed FPS
//! average below the floor accumulates a streak; once the streak crosses
//! the threshold the tier steps down exactly one level. Tiers never step
//! back up within a session — recovering hardware conditions mid-session
//! is rare and flicker-prone to detect.

use serde::{Deserialize, Serialize};

/// FPS floor below which the low-frame-rate streak accumulates.
pub const FPS_FLOOR: f32 = 42.0;
/// Cumulative low-FPS milliseconds that trigger a downgrade.
pub const DOWNGRADE_STREAK_MS: f32 = 1800.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

impl QualityTier {
    pub fn step_down(self) -> QualityTier {
        match self {
            QualityTier::High => QualityTier::Medium,
            QualityTier::Medium | QualityTier::Low => QualityTier::Low,
        }
    }
}

/// All tunable simulation/render parameters for one tier. The source had
/// two divergent tuning revisions; the constants live here as data so a
/// host can swap them without touching the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityProfile {
    /// Min/max delay between automatic rocket launches.
    pub auto_launch_ms: (f32, f32),
    /// Min/max bloom fragments per burst.
    pub burst_count: (u32, u32),
    /// Minimum interval between finger-trail emissions.
    pub trail_emit_interval_ms: f32,
    /// Hard cap on simultaneously active particles.
    pub max_particles: usize,
    /// Per-frame erase-pass alpha; lower values leave longer trails.
    pub erase_alpha: f32,
    pub gravity: f32,
    pub friction: f32,
    /// Per-frame chance that a live rocket emits an exhaust spark.
    pub spark_chance: f32,
}

impl QualityProfile {
    pub const LOW: QualityProfile = QualityProfile {
        auto_launch_ms: (1900.0, 2600.0),
        burst_count: (14, 22),
        trail_emit_interval_ms: 33.0,
        max_particles: 220,
        erase_alpha: 0.18,
        gravity: 0.085,
        friction: 0.965,
        spark_chance: 0.25,
    };

    pub const MEDIUM: QualityProfile = QualityProfile {
        auto_launch_ms: (1600.0, 2400.0),
        burst_count: (18, 32),
        trail_emit_interval_ms: 22.0,
        max_particles: 320,
        erase_alpha: 0.14,
        gravity: 0.075,
        friction: 0.972,
        spark_chance: 0.35,
    };

    // High-end devices get finer trails and a higher cap, not a higher
    // launch rate.
    pub const HIGH: QualityProfile = QualityProfile {
        auto_launch_ms: (1600.0, 2400.0),
        burst_count: (20, 34),
        trail_emit_interval_ms: 16.0,
        max_particles: 420,
        erase_alpha: 0.12,
        gravity: 0.07,
        friction: 0.976,
        spark_chance: 0.45,
    };
}

impl Default for QualityProfile {
    fn default() -> Self {
        Self::MEDIUM
    }
}

/// The three tier profiles. Hosts may override any field via JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub low: QualityProfile,
    pub medium: QualityProfile,
    pub high: QualityProfile,
}

impl Tuning {
    pub fn profile(&self, tier: QualityTier) -> &QualityProfile {
        match tier {
            QualityTier::Low => &self.low,
            QualityTier::Medium => &self.medium,
            QualityTier::High => &self.high,
        }
    }

    /// The particle capacity the pool must be pre-sized to.
    pub fn max_capacity(&self) -> usize {
        self.low
            .max_particles
            .max(self.medium.max_particles)
            .max(self.high.max_particles)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            low: QualityProfile::LOW,
            medium: QualityProfile::MEDIUM,
            high: QualityProfile::HIGH,
        }
    }
}

/// Map a device capability probe to a starting tier. Unknown devices get
/// the middle of the road.
pub fn detect_initial_tier(benchmark_level: Option<u32>) -> QualityTier {
    match benchmark_level {
        Some(level) if level >= 60 => QualityTier::High,
        Some(level) if level > 0 && level <= 20 => QualityTier::Low,
        Some(_) => QualityTier::Medium,
        None => QualityTier::Medium,
    }
}

/// Rolling frame-time monitor. Feed it every frame delta; it answers with
/// the tier to switch to when sustained low FPS calls for a downgrade.
#[derive(Debug)]
pub struct QualityGovernor {
    fps_avg: f32,
    low_streak_ms: f32,
}

impl QualityGovernor {
    pub fn new() -> Self {
        Self {
            fps_avg: 60.0,
            low_streak_ms: 0.0,
        }
    }

    pub fn fps_avg(&self) -> f32 {
        self.fps_avg
    }

    /// Observe one frame. Returns the downgraded tier when the low-FPS
    /// streak has lasted long enough, `None` otherwise.
    pub fn observe(&mut self, dt_ms: f32, current: QualityTier) -> Option<QualityTier> {
        let fps = 1000.0 / dt_ms.max(1.0);
        self.fps_avg = self.fps_avg * 0.9 + fps * 0.1;

        if self.fps_avg < FPS_FLOOR {
            self.low_streak_ms += dt_ms;
        } else {
            self.low_streak_ms = (self.low_streak_ms - dt_ms).max(0.0);
        }

        if self.low_streak_ms > DOWNGRADE_STREAK_MS {
            self.low_streak_ms = 0.0;
            let next = current.step_down();
            if next != current {
                log::debug!(
                    "sustained low fps ({:.1}), downgrading {:?} -> {:?}",
                    self.fps_avg,
                    current,
                    next
                );
                return Some(next);
            }
        }
        None
    }
}

impl Default for QualityGovernor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_down_is_monotonic() {
        assert_eq!(QualityTier::High.step_down(), QualityTier::Medium);
        assert_eq!(QualityTier::Medium.step_down(), QualityTier::Low);
        assert_eq!(QualityTier::Low.step_down(), QualityTier::Low);
    }

    #[test]
    fn detect_tier_from_benchmark() {
        assert_eq!(detect_initial_tier(Some(75)), QualityTier::High);
        assert_eq!(detect_initial_tier(Some(60)), QualityTier::High);
        assert_eq!(detect_initial_tier(Some(40)), QualityTier::Medium);
        assert_eq!(detect_initial_tier(Some(20)), QualityTier::Low);
        assert_eq!(detect_initial_tier(Some(0)), QualityTier::Medium);
        assert_eq!(detect_initial_tier(None), QualityTier::Medium);
    }

    #[test]
    fn governor_downgrades_after_sustained_low_fps() {
        let mut gov = QualityGovernor::new();
        let mut tier = QualityTier::High;
        let mut downgrades = 0;
        // 40ms frames = 25 fps, well under the floor.
        for _ in 0..200 {
            if let Some(next) = gov.observe(40.0, tier) {
                assert_eq!(next, tier.step_down());
                tier = next;
                downgrades += 1;
            }
        }
        assert!(downgrades >= 1, "expected at least one downgrade");
        assert_eq!(tier, QualityTier::Low);
    }

    #[test]
    fn governor_never_upgrades() {
        let mut gov = QualityGovernor::new();
        // Healthy 60fps frames forever: tier must stay put.
        for _ in 0..1000 {
            assert!(gov.observe(16.67, QualityTier::Low).is_none());
        }
    }

    #[test]
    fn short_stall_does_not_downgrade() {
        let mut gov = QualityGovernor::new();
        let mut tier = QualityTier::High;
        // A brief dip followed by recovery drains the streak.
        for _ in 0..20 {
            if let Some(next) = gov.observe(40.0, tier) {
                tier = next;
            }
        }
        for _ in 0..500 {
            if let Some(next) = gov.observe(16.0, tier) {
                tier = next;
            }
        }
        assert_eq!(tier, QualityTier::High);
    }

    #[test]
    fn at_low_tier_governor_stays_silent() {
        let mut gov = QualityGovernor::new();
        for _ in 0..500 {
            assert!(gov.observe(40.0, QualityTier::Low).is_none());
        }
    }

    #[test]
    fn tuning_overrides_from_json() {
        let tuning = Tuning::from_json(r#"{"high": {"max_particles": 600}}"#).unwrap();
        assert_eq!(tuning.high.max_particles, 600);
        // Unspecified fields of an overridden tier fall back to defaults,
        // as do untouched tiers.
        assert_eq!(tuning.high.erase_alpha, QualityProfile::MEDIUM.erase_alpha);
        assert_eq!(tuning.low, QualityProfile::LOW);
        assert_eq!(tuning.max_capacity(), 600);
    }

    #[test]
    fn default_capacity_is_high_tier_cap() {
        assert_eq!(Tuning::default().max_capacity(), QualityProfile::HIGH.max_particles);
    }
}
