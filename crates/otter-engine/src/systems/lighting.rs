//! Scene lights and their GPU uniform packing.
//!
//! Lights are persistent: they live on the scene until removed and are
//! packed into a uniform block for the host's shaders each frame.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Range used when a light doesn't set one.
pub const DEFAULT_LIGHT_RANGE: f32 = 10.0;

/// A point light with position, colour and falloff range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    /// Linear RGB, typically [0..1].
    pub color: Vec3,
    /// Falloff distance in world units.
    #[serde(default = "default_range")]
    pub range: f32,
}

fn default_range() -> f32 {
    DEFAULT_LIGHT_RANGE
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Vec3::ONE,
            range: DEFAULT_LIGHT_RANGE,
        }
    }
}

impl Light {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position,
            color,
            ..Self::default()
        }
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }
}

/// std140-compatible light record.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, range, r, g, b, pad]`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub range: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

impl LightUniform {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&Light> for LightUniform {
    fn from(light: &Light) -> Self {
        Self {
            position: light.position.to_array(),
            range: light.range,
            color: light.color.to_array(),
            _pad: 0.0,
        }
    }
}

/// Pack lights for upload, in order.
pub fn pack_lights(lights: &[Light]) -> Vec<LightUniform> {
    lights.iter().map(LightUniform::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_stride_is_32_bytes() {
        assert_eq!(std::mem::size_of::<LightUniform>(), LightUniform::STRIDE_BYTES);
    }

    #[test]
    fn packs_in_wire_order() {
        let lights =
            [Light::new(Vec3::new(1.0, 0.0, 3.0), Vec3::new(0.2, 0.8, 0.1)).with_range(100.0)];
        let packed = pack_lights(&lights);
        let floats: &[f32] = bytemuck::cast_slice(&packed);
        assert_eq!(floats, &[1.0, 0.0, 3.0, 100.0, 0.2, 0.8, 0.1, 0.0]);
    }

    #[test]
    fn missing_range_uses_default() {
        let light: Light =
            serde_json::from_str(r#"{ "position": [0, 1, 3], "color": [1, 1, 1] }"#).unwrap();
        assert_eq!(light.range, DEFAULT_LIGHT_RANGE);
    }
}
