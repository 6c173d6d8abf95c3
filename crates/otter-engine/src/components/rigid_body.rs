use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::inspect::Inspector;
use super::{derived_to_json, DebugInspectable, Serializable};
use crate::error::Result;

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyType {
    #[default]
    Static,
    Dynamic,
    Kinematic,
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_extents: Vec3 },
    Plane { normal: Vec3 },
    Cylinder { radius: f32, height: f32 },
}

/// A collider attached to a body, offset from the owner's origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    #[serde(flatten)]
    pub desc: ColliderDesc,
    #[serde(default)]
    pub position: Vec3,
}

impl Collider {
    pub fn new(desc: ColliderDesc) -> Self {
        Self {
            desc,
            position: Vec3::ZERO,
        }
    }

    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::new(ColliderDesc::Cuboid { half_extents })
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }
}

/// Rigid body descriptor. Simulation is done by the host physics backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    #[serde(default)]
    pub body_type: BodyType,
    #[serde(default)]
    pub colliders: Vec<Collider>,
}

impl RigidBody {
    pub fn new(body_type: BodyType) -> Self {
        Self {
            body_type,
            colliders: Vec::new(),
        }
    }

    /// Attach a collider and return it for further positioning.
    pub fn add_collider(&mut self, collider: Collider) -> &mut Collider {
        self.colliders.push(collider);
        let last = self.colliders.len() - 1;
        &mut self.colliders[last]
    }

    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.colliders.push(collider);
        self
    }
}

impl Serializable for RigidBody {
    const TYPE_NAME: &'static str = "RigidBody";

    fn to_json(&self) -> Value {
        derived_to_json(self)
    }

    fn from_json(data: &Value) -> Result<Self> {
        Ok(Self::deserialize(data)?)
    }
}

impl DebugInspectable for RigidBody {
    fn inspect(&mut self, ui: &mut dyn Inspector) {
        ui.label(&format!("Type: {:?}", self.body_type));
        for (i, collider) in self.colliders.iter_mut().enumerate() {
            ui.label(&format!("Collider {}: {:?}", i, collider.desc));
            ui.drag_float3("Offset", &mut collider.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_collider_returns_slot_for_positioning() {
        let mut body = RigidBody::new(BodyType::Static);
        body.add_collider(Collider::cuboid(Vec3::new(50.0, 50.0, 1.0)))
            .position = Vec3::new(0.0, 0.0, -1.0);
        assert_eq!(body.colliders.len(), 1);
        assert_eq!(body.colliders[0].position, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn json_roundtrip_keeps_shape() {
        let body = RigidBody::new(BodyType::Static)
            .with_collider(Collider::cuboid(Vec3::new(1.0, 2.0, 3.0)).with_position(Vec3::Z));
        let data = body.to_json();
        assert_eq!(data["colliders"][0]["shape"], "Cuboid");
        assert_eq!(RigidBody::from_json(&data).unwrap(), body);
    }
}
