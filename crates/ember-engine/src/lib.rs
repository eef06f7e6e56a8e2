//! Headless fireworks particle engine.
//!
//! A deterministic, single-threaded visual simulation: rockets launch,
//! burst into palette-coherent blooms, shockwave rings expand on taps and
//! finger trails follow drags — all drawn through the [`Surface`] seam so
//! the engine itself never touches a canvas. The `ember-web` crate binds
//! it to `CanvasRenderingContext2d` via wasm-bindgen.

pub mod api;
pub mod components;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{EngineConfig, Viewport};
pub use api::engine::Engine;
pub use components::particle::{Particle, ParticleKind};
pub use components::pool::ParticlePool;
pub use core::rng::Rng;
pub use core::time::{FrameClock, FrameDelta};
pub use input::pointer::{PointerEvent, PointerSample, TrailTracker};
pub use renderer::color::Color;
pub use renderer::surface::{CompositeMode, NullSurface, Surface};
pub use systems::quality::{QualityGovernor, QualityProfile, QualityTier, Tuning};
pub use systems::spawn::BurstStrength;
