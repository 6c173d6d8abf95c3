use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::inspect::Inspector;
use super::{derived_to_json, DebugInspectable, Serializable};
use crate::error::Result;

/// Marks an object as the player-steered camera. Input handling lives in the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleCameraControl {
    /// World units per second.
    pub move_speed: f32,
    /// Degrees per pixel of mouse travel.
    pub mouse_sensitivity: f32,
    /// Multiplier while the sprint key is held.
    pub sprint_multiplier: f32,
}

impl Default for SimpleCameraControl {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            mouse_sensitivity: 0.5,
            sprint_multiplier: 2.0,
        }
    }
}

impl Serializable for SimpleCameraControl {
    const TYPE_NAME: &'static str = "SimpleCameraControl";

    fn to_json(&self) -> Value {
        derived_to_json(self)
    }

    fn from_json(data: &Value) -> Result<Self> {
        Ok(Self::deserialize(data)?)
    }
}

impl DebugInspectable for SimpleCameraControl {
    fn inspect(&mut self, ui: &mut dyn Inspector) {
        ui.drag_float("Move Speed", &mut self.move_speed);
        ui.drag_float("Mouse Sensitivity", &mut self.mouse_sensitivity);
        ui.drag_float("Sprint Multiplier", &mut self.sprint_multiplier);
    }
}
