use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::registry::AssetHandle;

/// Asset manifest describing every resource a scene was built from.
/// Written next to the scene so a loader can recreate the same assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub shaders: Vec<ShaderDescriptor>,
    #[serde(default)]
    pub meshes: Vec<MeshDescriptor>,
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
    #[serde(default)]
    pub materials: Vec<MaterialDescriptor>,
}

/// A shader program assembled from one vertex and one fragment stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderDescriptor {
    pub handle: AssetHandle,
    /// Debug name shown by the host's tooling.
    #[serde(default)]
    pub name: String,
    pub vertex: String,
    pub fragment: String,
}

/// Where a mesh comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source")]
pub enum MeshSource {
    /// Loaded from a model file (e.g., "Gem.obj").
    File { path: String },
    /// Generated plane on the XY plane facing +Z.
    Plane { size: Vec2, tiling: Vec2 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDescriptor {
    pub handle: AssetHandle,
    #[serde(flatten)]
    pub source: MeshSource,
}

/// Minification filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipNearest,
    LinearMipNearest,
    NearestMipLinear,
    #[default]
    LinearMipLinear,
}

/// Magnification filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MagFilter {
    Nearest,
    #[default]
    Linear,
}

/// Texture coordinate wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WrapMode {
    #[default]
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

/// Any texture: 1D LUT, 2D image, 3D colour cube or cubemap. The kind is on the handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    pub handle: AssetHandle,
    pub path: String,
    #[serde(default)]
    pub min_filter: MinFilter,
    #[serde(default)]
    pub mag_filter: MagFilter,
    #[serde(default)]
    pub wrap: WrapMode,
}

/// A uniform value stored on a material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialParam {
    Float(f32),
    Texture(AssetHandle),
}

impl From<f32> for MaterialParam {
    fn from(v: f32) -> Self {
        MaterialParam::Float(v)
    }
}

impl From<AssetHandle> for MaterialParam {
    fn from(h: AssetHandle) -> Self {
        MaterialParam::Texture(h)
    }
}

/// A shader plus its uniform values, keyed by uniform name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    pub handle: AssetHandle,
    pub name: String,
    pub shader: AssetHandle,
    #[serde(default)]
    pub params: BTreeMap<String, MaterialParam>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Total number of assets listed.
    pub fn len(&self) -> usize {
        self.shaders.len() + self.meshes.len() + self.textures.len() + self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::registry::AssetKind;

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{
            "textures": [
                { "handle": { "kind": "Texture2D", "id": 3 }, "path": "textures/Gem.png" }
            ]
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.len(), 1);
        let tex = &manifest.textures[0];
        assert_eq!(
            tex.handle,
            AssetHandle {
                kind: AssetKind::Texture2D,
                id: 3,
            }
        );
        assert_eq!(tex.min_filter, MinFilter::LinearMipLinear);
        assert_eq!(tex.wrap, WrapMode::Repeat);
    }

    #[test]
    fn material_params_are_untagged() {
        let json = r#"{
            "materials": [{
                "handle": { "kind": "Material", "id": 9 },
                "name": "Box",
                "shader": { "kind": "Shader", "id": 1 },
                "params": {
                    "u_Material.Shininess": 0.1,
                    "u_Material.Diffuse": { "kind": "Texture2D", "id": 4 }
                }
            }]
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let params = &manifest.materials[0].params;
        assert_eq!(params["u_Material.Shininess"], MaterialParam::Float(0.1));
        assert_eq!(
            params["u_Material.Diffuse"],
            MaterialParam::Texture(AssetHandle {
                kind: AssetKind::Texture2D,
                id: 4,
            })
        );
    }
}
