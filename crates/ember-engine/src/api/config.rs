//! Engine construction configuration.

use serde::{Deserialize, Serialize};

use crate::systems::quality::Tuning;

/// Canvas dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Configuration for one engine instance, provided by the host at mount
/// time. Deserializable so hosts can ship tuning as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Canvas width in logical pixels.
    pub width: f32,
    /// Canvas height in logical pixels.
    pub height: f32,
    /// Backing-store scale. The engine only records it; scaling the
    /// drawing context is the host's job.
    pub device_pixel_ratio: f32,
    /// RNG seed. The simulation is fully deterministic given the seed.
    pub seed: u64,
    /// Device capability probe score, if the host has one.
    pub benchmark_level: Option<u32>,
    /// Per-tier simulation parameters.
    pub tuning: Tuning,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 375.0,
            height: 667.0,
            device_pixel_ratio: 2.0,
            seed: 42,
            benchmark_level: None,
            tuning: Tuning::default(),
        }
    }
}

impl EngineConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_json_with_defaults() {
        let cfg = EngineConfig::from_json(r#"{"width": 414, "height": 896, "seed": 7}"#).unwrap();
        assert_eq!(cfg.width, 414.0);
        assert_eq!(cfg.height, 896.0);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.device_pixel_ratio, 2.0);
        assert!(cfg.benchmark_level.is_none());
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(EngineConfig::from_json("{width:").is_err());
    }
}
