use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::inspect::Inspector;
use super::{derived_to_json, DebugInspectable, Serializable};
use crate::assets::registry::AssetHandle;
use crate::error::Result;

/// Mesh + material pairing drawn by the host renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderComponent {
    #[serde(default)]
    pub mesh: Option<AssetHandle>,
    #[serde(default)]
    pub material: Option<AssetHandle>,
}

impl RenderComponent {
    pub fn new(mesh: AssetHandle, material: AssetHandle) -> Self {
        Self {
            mesh: Some(mesh),
            material: Some(material),
        }
    }
}

impl Serializable for RenderComponent {
    const TYPE_NAME: &'static str = "RenderComponent";

    fn to_json(&self) -> Value {
        derived_to_json(self)
    }

    fn from_json(data: &Value) -> Result<Self> {
        Ok(Self::deserialize(data)?)
    }
}

impl DebugInspectable for RenderComponent {
    fn inspect(&mut self, ui: &mut dyn Inspector) {
        match self.mesh {
            Some(mesh) => ui.label(&format!("Mesh: {}", mesh)),
            None => ui.label("Mesh: none"),
        }
        match self.material {
            Some(material) => ui.label(&format!("Material: {}", material)),
            None => ui.label("Material: none"),
        }
    }
}
