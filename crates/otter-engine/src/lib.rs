pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod error;
pub mod extensions;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::layer::{AppConfig, EngineContext, Layer};
pub use api::types::GameObjectId;
pub use assets::manifest::{AssetManifest, MagFilter, MaterialParam, MinFilter, WrapMode};
pub use assets::registry::{AssetHandle, AssetKind, ResourceRegistry};
pub use components::camera::SimpleCameraControl;
pub use components::game_object::{GameObject, Transform};
pub use components::inspect::{Inspector, TextInspector};
pub use components::render::RenderComponent;
pub use components::rigid_body::{BodyType, Collider, ColliderDesc, RigidBody};
pub use components::rotating::RotatingBehaviour;
pub use components::{Awake, Component, ComponentKind, DebugInspectable, Serializable, Ticking};
pub use crate::core::scene::{Scene, Skybox};
pub use crate::core::time::FixedTimestep;
pub use error::{Error, Result};
pub use systems::behaviours::{awake_behaviours, tick_behaviours};
pub use systems::lighting::{Light, LightUniform};

// Extensions: pure animation math
pub use extensions::{ease, lerp, Easing, KeyframeOscillator, DEFAULT_ROTATION_SPEED};
