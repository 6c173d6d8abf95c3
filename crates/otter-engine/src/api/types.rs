use serde::{Deserialize, Serialize};

/// Unique identifier for a game object in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameObjectId(pub u32);
