//! Pointer/touch normalization and trail throttling.
//!
//! Host UI frameworks hand over wildly different event shapes: some carry
//! detail coordinates, some touch-list entries with local, client or page
//! pairs. A `PointerSample` holds whichever pairs were present; the engine
//! only ever sees one normalized canvas-space point.

use glam::Vec2;

/// Raw coordinate candidates from a host event, in priority order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    /// Event detail coordinates (tap/click events).
    pub detail: Option<(f32, f32)>,
    /// Touch-point coordinates local to the canvas.
    pub local: Option<(f32, f32)>,
    /// Viewport-relative client coordinates.
    pub client: Option<(f32, f32)>,
    /// Document-relative page coordinates.
    pub page: Option<(f32, f32)>,
}

impl PointerSample {
    /// A sample that already is a canvas-space point.
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            detail: Some((x, y)),
            ..Self::default()
        }
    }

    /// Resolve the best usable coordinate pair, rejecting non-finite
    /// values. `None` means the event carried nothing usable and the
    /// caller must no-op.
    pub fn canvas_point(&self) -> Option<Vec2> {
        [self.detail, self.local, self.client, self.page]
            .into_iter()
            .flatten()
            .find(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(x, y)| Vec2::new(x, y))
    }
}

/// Gesture events the engine understands.
#[derive(Debug, Clone, Copy)]
pub enum PointerEvent {
    /// A tap or click; triggers a soft burst.
    Tap(PointerSample),
    TouchStart(PointerSample),
    TouchMove(PointerSample),
    TouchEnd,
}

/// Maximum interpolated spawn points per touch-move sample.
pub const TRAIL_MAX_POINTS: usize = 3;
/// Movement distance that earns one extra interpolation point.
pub const TRAIL_STEP_DIST: f32 = 14.0;

/// Throttles trail emission to the quality tier's interval and
/// interpolates along fast swipes so the trail stays continuous.
#[derive(Debug)]
pub struct TrailTracker {
    last_point: Option<Vec2>,
    last_emit_at: f64,
}

impl TrailTracker {
    pub fn new() -> Self {
        Self {
            last_point: None,
            last_emit_at: 0.0,
        }
    }

    /// Record the gesture start. The starting point itself gets a mote.
    pub fn begin(&mut self, point: Vec2, now_ms: f64) {
        self.last_point = Some(point);
        self.last_emit_at = now_ms;
    }

    /// Feed a touch-move sample. Returns the spawn points for this sample:
    /// empty while throttled, otherwise 1 to `TRAIL_MAX_POINTS` points
    /// interpolated from the previous sample.
    pub fn sample(&mut self, point: Vec2, now_ms: f64, min_interval_ms: f32) -> Vec<Vec2> {
        if now_ms - self.last_emit_at < min_interval_ms as f64 {
            return Vec::new();
        }

        let last = self.last_point.unwrap_or(point);
        self.last_point = Some(point);
        self.last_emit_at = now_ms;

        let delta = point - last;
        let dist = delta.length();
        let steps = ((dist / TRAIL_STEP_DIST) as usize).clamp(1, TRAIL_MAX_POINTS);

        let mut points = Vec::with_capacity(steps);
        for i in 0..steps {
            let t = if steps == 1 {
                1.0
            } else {
                (i + 1) as f32 / steps as f32
            };
            points.push(last + delta * t);
        }
        points
    }

    /// Gesture ended; the next touch starts fresh.
    pub fn end(&mut self) {
        self.last_point = None;
    }
}

impl Default for TrailTracker {
    fn default() -> Self {
        Self::new()
    }
}
