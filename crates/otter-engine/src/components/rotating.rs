//! Rotating behaviour: spins its owner and bobs it along z.

use glam::Vec3;
use serde_json::Value;

use super::game_object::Transform;
use super::inspect::Inspector;
use super::{Awake, DebugInspectable, Serializable, Ticking};
use crate::error::Result;
use crate::extensions::keyframe::KeyframeOscillator;

/// Component wrapper around a [`KeyframeOscillator`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RotatingBehaviour {
    oscillator: KeyframeOscillator,
}

impl RotatingBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Behaviour whose keyframe phase starts at `start_time` seconds.
    pub fn with_start_time(start_time: f32) -> Self {
        Self {
            oscillator: KeyframeOscillator::new(start_time),
        }
    }

    pub fn with_rotation_speed(mut self, rotation_speed: Vec3) -> Self {
        self.oscillator.configure(rotation_speed);
        self
    }

    pub fn rotation_speed(&self) -> Vec3 {
        self.oscillator.rotation_speed
    }

    pub fn set_rotation_speed(&mut self, rotation_speed: Vec3) {
        self.oscillator.configure(rotation_speed);
    }

    pub fn oscillator(&self) -> &KeyframeOscillator {
        &self.oscillator
    }
}

impl Awake for RotatingBehaviour {
    fn awake(&mut self, transform: &Transform) {
        self.oscillator.activate(transform.position);
    }
}

impl Ticking for RotatingBehaviour {
    fn update(&mut self, dt: f32, transform: &mut Transform) {
        let (rotation, position) = self.oscillator.tick(dt, transform.rotation, transform.position);
        transform.rotation = rotation;
        transform.position = position;
    }
}

impl Serializable for RotatingBehaviour {
    const TYPE_NAME: &'static str = "RotatingBehaviour";

    fn to_json(&self) -> Value {
        self.oscillator.to_json()
    }

    fn from_json(data: &Value) -> Result<Self> {
        Ok(Self {
            oscillator: KeyframeOscillator::from_json(data),
        })
    }
}

impl DebugInspectable for RotatingBehaviour {
    fn inspect(&mut self, ui: &mut dyn Inspector) {
        ui.drag_float3("Speed", &mut self.oscillator.rotation_speed);
    }
}
