use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::manifest::{
    AssetManifest, MagFilter, MaterialDescriptor, MaterialParam, MeshDescriptor, MeshSource,
    MinFilter, ShaderDescriptor, TextureDescriptor, WrapMode,
};
use crate::error::{Error, Result};

/// What kind of resource a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Shader,
    Mesh,
    Texture1D,
    Texture2D,
    Texture3D,
    TextureCube,
    Material,
}

/// Typed reference to an asset owned by the [`ResourceRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetHandle {
    pub kind: AssetKind,
    pub id: u32,
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.kind, self.id)
    }
}

/// Registry of every asset a scene layer creates.
///
/// File-backed assets are deduplicated by path, so asking twice for the same
/// texture returns the same handle. The registry records a descriptor per
/// asset and can write them all out as an [`AssetManifest`].
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    manifest: AssetManifest,
    by_source: HashMap<(AssetKind, String), AssetHandle>,
    next_id: u32,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from a saved manifest. New handles continue after
    /// the highest id in the manifest.
    pub fn from_manifest(manifest: AssetManifest) -> Result<Self> {
        let mut by_source = HashMap::new();
        for shader in &manifest.shaders {
            by_source.insert(shader_key(&shader.vertex, &shader.fragment), shader.handle);
        }
        for mesh in &manifest.meshes {
            if let MeshSource::File { path } = &mesh.source {
                by_source.insert((AssetKind::Mesh, path.clone()), mesh.handle);
            }
        }
        for texture in &manifest.textures {
            by_source.insert((texture.handle.kind, texture.path.clone()), texture.handle);
        }

        let handles = manifest
            .shaders
            .iter()
            .map(|a| a.handle)
            .chain(manifest.meshes.iter().map(|a| a.handle))
            .chain(manifest.textures.iter().map(|a| a.handle))
            .chain(manifest.materials.iter().map(|a| a.handle));
        let mut next_id = 0;
        for handle in handles {
            let after = handle.id.checked_add(1).ok_or(Error::AssetIdOutOfRange(handle))?;
            next_id = next_id.max(after);
        }

        Ok(Self {
            manifest,
            by_source,
            next_id,
        })
    }

    /// Read a manifest written by [`ResourceRegistry::save_manifest`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let manifest = AssetManifest::from_json(&fs::read_to_string(path)?)?;
        log::info!("loaded asset manifest ({} assets) from {}", manifest.len(), path.display());
        Self::from_manifest(manifest)
    }

    fn allocate(&mut self, kind: AssetKind) -> AssetHandle {
        let handle = AssetHandle {
            kind,
            id: self.next_id,
        };
        match self.next_id.checked_add(1) {
            Some(next) => self.next_id = next,
            None => log::error!("asset ids exhausted; {} will be handed out again", handle),
        }
        handle
    }

    /// Shader program from a vertex and fragment stage.
    pub fn create_shader(
        &mut self,
        name: impl Into<String>,
        vertex: impl Into<String>,
        fragment: impl Into<String>,
    ) -> AssetHandle {
        let (vertex, fragment) = (vertex.into(), fragment.into());
        let key = shader_key(&vertex, &fragment);
        if let Some(&handle) = self.by_source.get(&key) {
            return handle;
        }

        let handle = self.allocate(AssetKind::Shader);
        let name = name.into();
        log::debug!("shader {} `{}`: {} + {}", handle, name, vertex, fragment);
        self.manifest.shaders.push(ShaderDescriptor {
            handle,
            name,
            vertex,
            fragment,
        });
        self.by_source.insert(key, handle);
        handle
    }

    /// Mesh loaded from a model file.
    pub fn create_mesh_from_file(&mut self, path: impl Into<String>) -> AssetHandle {
        let path = path.into();
        let key = (AssetKind::Mesh, path.clone());
        if let Some(&handle) = self.by_source.get(&key) {
            return handle;
        }

        let handle = self.allocate(AssetKind::Mesh);
        self.manifest.meshes.push(MeshDescriptor {
            handle,
            source: MeshSource::File { path },
        });
        self.by_source.insert(key, handle);
        handle
    }

    /// Generated plane mesh. Every call creates a new mesh.
    pub fn create_plane_mesh(&mut self, size: Vec2, tiling: Vec2) -> AssetHandle {
        let handle = self.allocate(AssetKind::Mesh);
        self.manifest.meshes.push(MeshDescriptor {
            handle,
            source: MeshSource::Plane { size, tiling },
        });
        handle
    }

    fn create_texture(&mut self, kind: AssetKind, path: String) -> AssetHandle {
        let key = (kind, path.clone());
        if let Some(&handle) = self.by_source.get(&key) {
            return handle;
        }

        let handle = self.allocate(kind);
        self.manifest.textures.push(TextureDescriptor {
            handle,
            path,
            min_filter: MinFilter::default(),
            mag_filter: MagFilter::default(),
            wrap: WrapMode::default(),
        });
        self.by_source.insert(key, handle);
        handle
    }

    pub fn create_texture_2d(&mut self, path: impl Into<String>) -> AssetHandle {
        self.create_texture(AssetKind::Texture2D, path.into())
    }

    /// 1D lookup texture, e.g. a toon ramp.
    pub fn create_texture_1d(&mut self, path: impl Into<String>) -> AssetHandle {
        self.create_texture(AssetKind::Texture1D, path.into())
    }

    /// 3D colour-grading LUT (.CUBE).
    pub fn create_lut_3d(&mut self, path: impl Into<String>) -> AssetHandle {
        self.create_texture(AssetKind::Texture3D, path.into())
    }

    pub fn create_cubemap(&mut self, path: impl Into<String>) -> AssetHandle {
        self.create_texture(AssetKind::TextureCube, path.into())
    }

    fn texture_mut(&mut self, handle: AssetHandle) -> Result<&mut TextureDescriptor> {
        self.manifest
            .textures
            .iter_mut()
            .find(|t| t.handle == handle)
            .ok_or(Error::MissingAsset(handle))
    }

    pub fn set_texture_filters(
        &mut self,
        handle: AssetHandle,
        min: MinFilter,
        mag: MagFilter,
    ) -> Result<()> {
        let texture = self.texture_mut(handle)?;
        texture.min_filter = min;
        texture.mag_filter = mag;
        Ok(())
    }

    pub fn set_texture_wrap(&mut self, handle: AssetHandle, wrap: WrapMode) -> Result<()> {
        self.texture_mut(handle)?.wrap = wrap;
        Ok(())
    }

    pub fn texture(&self, handle: AssetHandle) -> Option<&TextureDescriptor> {
        self.manifest.textures.iter().find(|t| t.handle == handle)
    }

    /// New material bound to `shader`, with no uniforms set.
    pub fn create_material(&mut self, name: impl Into<String>, shader: AssetHandle) -> AssetHandle {
        let handle = self.allocate(AssetKind::Material);
        self.manifest.materials.push(MaterialDescriptor {
            handle,
            name: name.into(),
            shader,
            params: Default::default(),
        });
        handle
    }

    fn material_mut(&mut self, handle: AssetHandle) -> Result<&mut MaterialDescriptor> {
        self.manifest
            .materials
            .iter_mut()
            .find(|m| m.handle == handle)
            .ok_or(Error::MissingAsset(handle))
    }

    /// Set a uniform on a material.
    pub fn set_param(
        &mut self,
        material: AssetHandle,
        uniform: impl Into<String>,
        value: impl Into<MaterialParam>,
    ) -> Result<()> {
        self.material_mut(material)?
            .params
            .insert(uniform.into(), value.into());
        Ok(())
    }

    /// Copy a material, shader and uniforms included, under a new handle.
    pub fn clone_material(&mut self, material: AssetHandle) -> Result<AssetHandle> {
        let source = self
            .material(material)
            .cloned()
            .ok_or(Error::MissingAsset(material))?;
        let handle = self.allocate(AssetKind::Material);
        self.manifest.materials.push(MaterialDescriptor { handle, ..source });
        Ok(handle)
    }

    pub fn material(&self, handle: AssetHandle) -> Option<&MaterialDescriptor> {
        self.manifest.materials.iter().find(|m| m.handle == handle)
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    /// Write the manifest as pretty JSON.
    pub fn save_manifest(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.manifest.to_json()?)?;
        log::info!("saved asset manifest ({} assets) to {}", self.manifest.len(), path.display());
        Ok(())
    }
}

fn shader_key(vertex: &str, fragment: &str) -> (AssetKind, String) {
    (AssetKind::Shader, format!("{}|{}", vertex, fragment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_assets_are_deduplicated() {
        let mut reg = ResourceRegistry::new();
        let a = reg.create_texture_2d("textures/Gem.png");
        let b = reg.create_texture_2d("textures/Gem.png");
        let lut = reg.create_lut_3d("textures/Gem.png");
        assert_eq!(a, b);
        assert_ne!(a, lut);
        assert_eq!(reg.manifest().textures.len(), 2);
    }

    #[test]
    fn plane_meshes_are_not_deduplicated() {
        let mut reg = ResourceRegistry::new();
        let a = reg.create_plane_mesh(Vec2::ONE, Vec2::ONE);
        let b = reg.create_plane_mesh(Vec2::ONE, Vec2::ONE);
        assert_ne!(a, b);
    }

    #[test]
    fn clone_material_copies_params() {
        let mut reg = ResourceRegistry::new();
        let shader = reg.create_shader("Blinn-phong", "basic.glsl", "blinn.glsl");
        let gem_tex = reg.create_texture_2d("textures/Gem.png");
        let red_tex = reg.create_texture_2d("textures/Red.png");
        let gem = reg.create_material("Gem", shader);
        reg.set_param(gem, "u_Material.Diffuse", gem_tex).unwrap();
        reg.set_param(gem, "u_Material.Shininess", 0.5_f32).unwrap();

        let red = reg.clone_material(gem).unwrap();
        reg.set_param(red, "u_Material.Diffuse", red_tex).unwrap();

        let red_desc = reg.material(red).unwrap();
        assert_eq!(red_desc.shader, shader);
        assert_eq!(red_desc.params["u_Material.Diffuse"], MaterialParam::Texture(red_tex));
        assert_eq!(red_desc.params["u_Material.Shininess"], MaterialParam::Float(0.5));
        assert_eq!(
            reg.material(gem).unwrap().params["u_Material.Diffuse"],
            MaterialParam::Texture(gem_tex)
        );
    }

    #[test]
    fn missing_material_is_an_error() {
        let mut reg = ResourceRegistry::new();
        let bogus = AssetHandle {
            kind: AssetKind::Material,
            id: 42,
        };
        assert!(matches!(
            reg.set_param(bogus, "x", 1.0_f32),
            Err(Error::MissingAsset(h)) if h == bogus
        ));
    }

    #[test]
    fn from_manifest_continues_ids() {
        let mut reg = ResourceRegistry::new();
        let tex = reg.create_texture_2d("a.png");
        reg.create_mesh_from_file("Gem.obj");

        let mut restored = ResourceRegistry::from_manifest(reg.manifest().clone()).unwrap();
        assert_eq!(restored.create_texture_2d("a.png"), tex);
        let fresh = restored.create_texture_2d("b.png");
        assert_eq!(fresh.id, 2);
    }

    #[test]
    fn from_manifest_rejects_last_id() {
        let json = r#"{
            "textures": [
                { "handle": { "kind": "Texture2D", "id": 4294967295 }, "path": "a.png" }
            ]
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert!(matches!(
            ResourceRegistry::from_manifest(manifest),
            Err(Error::AssetIdOutOfRange(h)) if h.id == u32::MAX
        ));
    }

    #[test]
    fn saved_manifest_loads_back() {
        let dir = std::env::temp_dir().join(format!("otter-registry-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("scene-manifest.json");

        let mut reg = ResourceRegistry::new();
        let shader = reg.create_shader("Blinn-phong", "basic.glsl", "blinn.glsl");
        let gem_tex = reg.create_texture_2d("textures/Gem.png");
        let gem = reg.create_material("Gem", shader);
        reg.set_param(gem, "u_Material.Diffuse", gem_tex).unwrap();
        reg.save_manifest(&path).unwrap();

        let mut loaded = ResourceRegistry::load(&path).unwrap();
        assert_eq!(loaded.manifest(), reg.manifest());
        assert_eq!(loaded.material(gem).unwrap().shader, shader);
        assert_eq!(loaded.create_texture_2d("textures/Gem.png"), gem_tex);

        fs::remove_dir_all(&dir).ok();
    }
}
