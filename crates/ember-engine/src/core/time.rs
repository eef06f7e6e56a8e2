/// Minimum accepted frame delta in milliseconds.
pub const MIN_DT_MS: f32 = 8.0;
/// Maximum accepted frame delta in milliseconds. Long stalls (tab switch,
/// GC pause) are clamped instead of replayed.
pub const MAX_DT_MS: f32 = 40.0;
/// Reference frame time the physics constants are tuned against (60 fps).
pub const REFERENCE_DT_MS: f32 = 16.67;

/// One frame's worth of simulation time.
#[derive(Debug, Clone, Copy)]
pub struct FrameDelta {
    /// Clamped elapsed time since the previous frame, in milliseconds.
    pub dt_ms: f32,
    /// Multiplier relative to the reference frame time, so physics speed
    /// is frame-rate independent.
    pub step: f32,
}

/// Variable-timestep clock with delta clamping.
/// The host's animation scheduler supplies timestamps; the clock never
/// tries to catch up missed time after a stop/start cycle.
pub struct FrameClock {
    last_ts: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ts: None }
    }

    /// Advance to `now_ms` and return the clamped delta.
    pub fn tick(&mut self, now_ms: f64) -> FrameDelta {
        let dt_ms = match self.last_ts {
            Some(last) => ((now_ms - last) as f32).clamp(MIN_DT_MS, MAX_DT_MS),
            None => REFERENCE_DT_MS,
        };
        self.last_ts = Some(now_ms);
        FrameDelta {
            dt_ms,
            step: dt_ms / REFERENCE_DT_MS,
        }
    }

    /// Forget the previous timestamp. Called on `start()` so a resumed
    /// session begins with a reference-sized delta.
    pub fn reset(&mut self) {
        self.last_ts = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_uses_reference_delta() {
        let mut clock = FrameClock::new();
        let d = clock.tick(1000.0);
        assert_eq!(d.dt_ms, REFERENCE_DT_MS);
        assert!((d.step - 1.0).abs() < 1e-3);
    }

    #[test]
    fn delta_clamped_low() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        let d = clock.tick(1001.0);
        assert_eq!(d.dt_ms, MIN_DT_MS);
    }

    #[test]
    fn delta_clamped_high() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        // Five seconds away from the tab
        let d = clock.tick(6000.0);
        assert_eq!(d.dt_ms, MAX_DT_MS);
    }

    #[test]
    fn normal_delta_passes_through() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        let d = clock.tick(1016.0);
        assert!((d.dt_ms - 16.0).abs() < 1e-3);
        assert!((d.step - 16.0 / REFERENCE_DT_MS).abs() < 1e-3);
    }

    #[test]
    fn reset_forgets_last_timestamp() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        clock.reset();
        let d = clock.tick(9000.0);
        assert_eq!(d.dt_ms, REFERENCE_DT_MS);
    }
}
