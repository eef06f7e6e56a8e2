//! `#[wasm_bindgen]` exports for the fireworks background.
//!
//! The JS side owns the `requestAnimationFrame` loop and feeds raw event
//! coordinates; everything else — normalization, throttling, simulation,
//! drawing — happens in Rust. A single runner per page lives in a
//! `thread_local!` cell, mirroring how WASM modules are instantiated
//! once per worker.

pub mod runner;
pub mod surface;

use std::cell::RefCell;

use ember_engine::{BurstStrength, PointerEvent, PointerSample, Tuning};
use wasm_bindgen::prelude::*;

pub use runner::FireworksRunner;
pub use surface::CanvasSurface;

thread_local! {
    static RUNNER: RefCell<Option<FireworksRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut FireworksRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Pack an optional coordinate pair; NaN marks an absent field on the
/// JS side.
fn coord(x: f64, y: f64) -> Option<(f32, f32)> {
    if x.is_nan() && y.is_nan() {
        None
    } else {
        Some((x as f32, y as f32))
    }
}

/// Attach the engine to the canvas with the given element id. Aborts
/// silently (logging a warning) when the canvas or its 2D context is
/// missing; the host may retry on its next lifecycle event.
#[wasm_bindgen]
pub fn fireworks_init(
    canvas_id: &str,
    width: f32,
    height: f32,
    device_pixel_ratio: f32,
    benchmark_level: i32,
) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let benchmark = (benchmark_level > 0).then_some(benchmark_level as u32);
    let seed = js_sys::Date::now() as u64;
    let runner = FireworksRunner::attach(
        canvas_id,
        width,
        height,
        device_pixel_ratio,
        benchmark,
        seed,
    );
    if runner.is_some() {
        log::info!("fireworks: attached to #{canvas_id}");
    }
    RUNNER.with(|cell| {
        *cell.borrow_mut() = runner;
    });
}

/// Override the quality-tier tuning with a JSON document. Invalid JSON
/// is logged and ignored.
#[wasm_bindgen]
pub fn fireworks_load_tuning(json: &str) {
    match Tuning::from_json(json) {
        Ok(tuning) => {
            with_runner(|r| r.set_tuning(tuning));
        }
        Err(err) => log::warn!("fireworks: bad tuning json: {err}"),
    }
}

#[wasm_bindgen]
pub fn fireworks_start() {
    with_runner(|r| r.start());
}

#[wasm_bindgen]
pub fn fireworks_stop() {
    with_runner(|r| r.stop());
}

/// Drive one frame. Returns false when the loop should not be
/// rescheduled (engine stopped or never attached).
#[wasm_bindgen]
pub fn fireworks_frame(now_ms: f64) -> bool {
    with_runner(|r| r.frame(now_ms)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn fireworks_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

/// External burst trigger, e.g. a "launch" button.
#[wasm_bindgen]
pub fn fireworks_burst_at(x: f32, y: f32, soft: bool) {
    let strength = if soft {
        BurstStrength::Soft
    } else {
        BurstStrength::Normal
    };
    with_runner(|r| r.burst_at(x, y, strength));
}

/// Tap with already-resolved canvas coordinates.
#[wasm_bindgen]
pub fn fireworks_tap(x: f32, y: f32, now_ms: f64) {
    with_runner(|r| r.pointer(PointerEvent::Tap(PointerSample::at(x, y)), now_ms));
}

/// Touch-start carrying every coordinate pair the event had (NaN for
/// absent fields); normalization happens in the engine.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn fireworks_touch_start(
    local_x: f64,
    local_y: f64,
    client_x: f64,
    client_y: f64,
    page_x: f64,
    page_y: f64,
    now_ms: f64,
) {
    let sample = PointerSample {
        detail: None,
        local: coord(local_x, local_y),
        client: coord(client_x, client_y),
        page: coord(page_x, page_y),
    };
    with_runner(|r| r.pointer(PointerEvent::TouchStart(sample), now_ms));
}

#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn fireworks_touch_move(
    local_x: f64,
    local_y: f64,
    client_x: f64,
    client_y: f64,
    page_x: f64,
    page_y: f64,
    now_ms: f64,
) {
    let sample = PointerSample {
        detail: None,
        local: coord(local_x, local_y),
        client: coord(client_x, client_y),
        page: coord(page_x, page_y),
    };
    with_runner(|r| r.pointer(PointerEvent::TouchMove(sample), now_ms));
}

#[wasm_bindgen]
pub fn fireworks_touch_end() {
    with_runner(|r| r.pointer(PointerEvent::TouchEnd, 0.0));
}

/// Tear down the engine and release the canvas references. No scheduled
/// callback survives this: the next `fireworks_frame` reports false.
#[wasm_bindgen]
pub fn fireworks_destroy() {
    RUNNER.with(|cell| {
        if let Some(runner) = cell.borrow_mut().as_mut() {
            runner.stop();
        }
        *cell.borrow_mut() = None;
    });
}

// ---- Diagnostics ----

#[wasm_bindgen]
pub fn fireworks_active_particles() -> u32 {
    with_runner(|r| r.active_particles() as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn fireworks_fps_avg() -> f32 {
    with_runner(|r| r.fps_avg()).unwrap_or(0.0)
}
