//! Wires one engine instance to one canvas element.

use ember_engine::{BurstStrength, Engine, EngineConfig, PointerEvent, Tuning};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::surface::CanvasSurface;

/// Pixel ratios above 2 cost fill rate without visible gain on this kind
/// of effect.
const MAX_DPR: f32 = 2.0;

pub struct FireworksRunner {
    engine: Engine,
    surface: CanvasSurface,
    canvas: HtmlCanvasElement,
    dpr: f32,
}

impl FireworksRunner {
    /// Look up the canvas, acquire its 2D context and build the engine.
    /// Returns `None` on any missing piece — initialization aborts
    /// silently and the page simply keeps its static background.
    pub fn attach(
        canvas_id: &str,
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
        benchmark_level: Option<u32>,
        seed: u64,
    ) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let Some(element) = document.get_element_by_id(canvas_id) else {
            log::warn!("fireworks: canvas #{canvas_id} not found");
            return None;
        };
        let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
            log::warn!("fireworks: #{canvas_id} is not a canvas");
            return None;
        };
        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => match obj.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => {
                    log::warn!("fireworks: unexpected context object");
                    return None;
                }
            },
            _ => {
                log::warn!("fireworks: 2d context unavailable");
                return None;
            }
        };

        let dpr = device_pixel_ratio.clamp(1.0, MAX_DPR);
        scale_backing_store(&canvas, &ctx, width, height, dpr);

        let engine = Engine::new(EngineConfig {
            width,
            height,
            device_pixel_ratio: dpr,
            seed,
            benchmark_level,
            ..Default::default()
        });

        Some(Self {
            engine,
            surface: CanvasSurface::new(ctx),
            canvas,
            dpr,
        })
    }

    /// One animation-frame callback. Returns whether the host should
    /// schedule the next one.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.engine.frame(now_ms, &mut self.surface)
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        scale_backing_store(&self.canvas, self.surface.ctx(), width, height, self.dpr);
        self.engine.resize(width, height);
    }

    pub fn burst_at(&mut self, x: f32, y: f32, strength: BurstStrength) {
        self.engine.burst_at(x, y, strength);
    }

    pub fn pointer(&mut self, event: PointerEvent, now_ms: f64) {
        self.engine.handle_pointer(event, now_ms);
    }

    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.engine.set_tuning(tuning);
    }

    pub fn active_particles(&self) -> usize {
        self.engine.active_particles()
    }

    pub fn fps_avg(&self) -> f32 {
        self.engine.fps_avg()
    }
}

/// Size the backing store in physical pixels while drawing in logical
/// pixels. Re-setting canvas dimensions resets the transform, so the
/// scale is reapplied every time.
fn scale_backing_store(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    width: f32,
    height: f32,
    dpr: f32,
) {
    canvas.set_width((width * dpr).floor() as u32);
    canvas.set_height((height * dpr).floor() as u32);
    let _ = ctx.scale(dpr as f64, dpr as f64);
    // The dimension reset also clears line caps.
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
}
