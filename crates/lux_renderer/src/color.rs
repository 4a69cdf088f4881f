//! Linear radiance to display color.

use lux_math::Vec4;
use serde::{Deserialize, Serialize};

/// Exposure and gamma mapping from accumulated linear color to 8-bit RGBA.
///
/// Channels are scaled by `exposure`, raised to `1 / gamma`, clamped to
/// `[0, 1]` and quantized. Non-positive and NaN channels map to 0. Alpha is
/// always opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayEncoder {
    pub exposure: f32,
    pub gamma: f32,
}

impl Default for DisplayEncoder {
    fn default() -> Self {
        Self {
            exposure: 1.0,
            gamma: 2.0,
        }
    }
}

impl DisplayEncoder {
    /// Encode one accumulation cell.
    pub fn encode(&self, color: Vec4) -> [u8; 4] {
        [
            self.encode_channel(color.x),
            self.encode_channel(color.y),
            self.encode_channel(color.z),
            255,
        ]
    }

    #[inline]
    fn encode_channel(&self, linear: f32) -> u8 {
        let exposed = linear * self.exposure;
        let encoded = if exposed > 0.0 {
            exposed.powf(1.0 / self.gamma)
        } else {
            0.0
        };
        (255.0 * encoded.clamp(0.0, 1.0)) as u8
    }
}
