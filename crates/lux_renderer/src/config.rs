//! Render configuration.

use crate::{DisplayEncoder, Jitter, RenderError, RenderResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Integrator and accumulation settings.
///
/// Missing fields in JSON fall back to the defaults, so a file only needs to
/// name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Independent camera samples traced per pixel each frame
    pub samples_per_frame: u32,
    /// Diffuse bounces before a path is cut off
    pub max_bounces: u32,
    /// Shadow rays tried per shading point before giving up on direct light
    pub shadow_samples: u32,
    /// Minimum ray parameter, keeps rays from re-hitting their origin surface
    pub ray_epsilon: f32,
    /// Sub-pixel offset distribution
    pub jitter: Jitter,
    /// Linear to display mapping
    pub encoder: DisplayEncoder,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_frame: 4,
            max_bounces: 3,
            shadow_samples: 7,
            ray_epsilon: 1e-3,
            jitter: Jitter::Uniform,
            encoder: DisplayEncoder::default(),
        }
    }
}

impl RenderConfig {
    pub fn with_samples_per_frame(mut self, samples: u32) -> Self {
        self.samples_per_frame = samples;
        self
    }

    pub fn with_max_bounces(mut self, bounces: u32) -> Self {
        self.max_bounces = bounces;
        self
    }

    pub fn with_shadow_samples(mut self, samples: u32) -> Self {
        self.shadow_samples = samples;
        self
    }

    pub fn with_ray_epsilon(mut self, epsilon: f32) -> Self {
        self.ray_epsilon = epsilon;
        self
    }

    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_encoder(mut self, encoder: DisplayEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Reject settings the integrator cannot work with.
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples_per_frame == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_frame must be at least 1".into(),
            ));
        }
        if self.max_bounces == 0 {
            return Err(RenderError::InvalidConfig(
                "max_bounces must be at least 1".into(),
            ));
        }
        if !(self.ray_epsilon.is_finite() && self.ray_epsilon > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "ray_epsilon must be positive and finite, got {}",
                self.ray_epsilon
            )));
        }
        if !(self.encoder.gamma.is_finite() && self.encoder.gamma > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "encoder gamma must be positive and finite, got {}",
                self.encoder.gamma
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> RenderResult<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
