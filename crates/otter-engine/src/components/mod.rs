//! Components attachable to game objects.
//!
//! Each kind opts into the capabilities it needs: [`Ticking`], [`Awake`],
//! [`Serializable`] and [`DebugInspectable`]. The [`Component`] enum is the
//! tagged variant a game object stores; it forwards each capability to the
//! kind that implements it.

pub mod camera;
pub mod game_object;
pub mod inspect;
pub mod render;
pub mod rigid_body;
pub mod rotating;

use serde_json::Value;

use crate::error::{Error, Result};
use camera::SimpleCameraControl;
use game_object::Transform;
use inspect::Inspector;
use render::RenderComponent;
use rigid_body::RigidBody;
use rotating::RotatingBehaviour;

/// Per-frame update against the owner's transform.
pub trait Ticking {
    fn update(&mut self, dt: f32, transform: &mut Transform);
}

/// One-time activation, run before the owner's first tick.
pub trait Awake {
    fn awake(&mut self, transform: &Transform);
}

/// JSON persistence, keyed by a stable type name.
pub trait Serializable: Sized {
    const TYPE_NAME: &'static str;

    fn to_json(&self) -> Value;
    fn from_json(data: &Value) -> Result<Self>;
}

/// Exposes editable fields to a debug inspector.
pub trait DebugInspectable {
    fn inspect(&mut self, ui: &mut dyn Inspector);
}

/// Key under which a component's type name is stored in its JSON record.
pub const TYPE_KEY: &str = "type";

/// A component attached to a game object.
#[derive(Debug, Clone)]
pub enum Component {
    Rotating(RotatingBehaviour),
    Render(RenderComponent),
    RigidBody(RigidBody),
    CameraControl(SimpleCameraControl),
}

impl Component {
    /// Stable type name, as written to JSON.
    pub fn type_name(&self) -> &'static str {
        match self {
            Component::Rotating(_) => RotatingBehaviour::TYPE_NAME,
            Component::Render(_) => RenderComponent::TYPE_NAME,
            Component::RigidBody(_) => RigidBody::TYPE_NAME,
            Component::CameraControl(_) => SimpleCameraControl::TYPE_NAME,
        }
    }

    pub fn awake(&mut self, transform: &Transform) {
        if let Component::Rotating(c) = self {
            c.awake(transform);
        }
    }

    pub fn update(&mut self, dt: f32, transform: &mut Transform) {
        if let Component::Rotating(c) = self {
            c.update(dt, transform);
        }
    }

    pub fn inspect(&mut self, ui: &mut dyn Inspector) {
        ui.header(self.type_name());
        match self {
            Component::Rotating(c) => c.inspect(ui),
            Component::Render(c) => c.inspect(ui),
            Component::RigidBody(c) => c.inspect(ui),
            Component::CameraControl(c) => c.inspect(ui),
        }
    }

    /// Serialize with the type name under [`TYPE_KEY`].
    pub fn to_json(&self) -> Value {
        let mut data = match self {
            Component::Rotating(c) => c.to_json(),
            Component::Render(c) => c.to_json(),
            Component::RigidBody(c) => c.to_json(),
            Component::CameraControl(c) => c.to_json(),
        };
        if let Value::Object(map) = &mut data {
            map.insert(TYPE_KEY.to_string(), Value::from(self.type_name()));
        }
        data
    }

    /// Rebuild a component from a record written by [`Component::to_json`].
    pub fn from_json(data: &Value) -> Result<Self> {
        let type_name = data
            .get(TYPE_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::UnknownComponent(String::new()))?;

        match type_name {
            t if t == RotatingBehaviour::TYPE_NAME => {
                Ok(Component::Rotating(RotatingBehaviour::from_json(data)?))
            }
            t if t == RenderComponent::TYPE_NAME => {
                Ok(Component::Render(RenderComponent::from_json(data)?))
            }
            t if t == RigidBody::TYPE_NAME => Ok(Component::RigidBody(RigidBody::from_json(data)?)),
            t if t == SimpleCameraControl::TYPE_NAME => {
                Ok(Component::CameraControl(SimpleCameraControl::from_json(data)?))
            }
            other => Err(Error::UnknownComponent(other.to_string())),
        }
    }
}

/// Typed access into the [`Component`] enum.
pub trait ComponentKind: Sized {
    fn from_component(component: &Component) -> Option<&Self>;
    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;
}

macro_rules! component_kind {
    ($ty:ty, $variant:ident) => {
        impl ComponentKind for $ty {
            fn from_component(component: &Component) -> Option<&Self> {
                match component {
                    Component::$variant(c) => Some(c),
                    _ => None,
                }
            }

            fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                match component {
                    Component::$variant(c) => Some(c),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Component {
            fn from(c: $ty) -> Self {
                Component::$variant(c)
            }
        }
    };
}

component_kind!(RotatingBehaviour, Rotating);
component_kind!(RenderComponent, Render);
component_kind!(RigidBody, RigidBody);
component_kind!(SimpleCameraControl, CameraControl);

/// Serialize a serde-derived component, falling back to an empty record.
pub(crate) fn derived_to_json<T: serde::Serialize>(component: &T) -> Value {
    serde_json::to_value(component).unwrap_or_else(|err| {
        log::warn!("component serialization failed: {}", err);
        Value::Object(Default::default())
    })
}
