use std::fs;
use std::path::Path;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::types::GameObjectId;
use crate::assets::registry::AssetHandle;
use crate::components::game_object::GameObject;
use crate::components::Component;
use crate::error::{Error, Result};
use crate::systems::behaviours::{awake_behaviours, tick_behaviours};
use crate::systems::lighting::{pack_lights, Light, LightUniform};

/// Number of colour-correction LUT slots.
pub const COLOR_LUT_SLOTS: usize = 3;

/// Name given to the camera object every new scene starts with.
pub const MAIN_CAMERA_NAME: &str = "Main Camera";

/// Environment cubemap drawn behind everything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Skybox {
    pub texture: AssetHandle,
    pub shader: AssetHandle,
    /// Applied to sample directions, e.g. to turn a Y-up cubemap Z-up.
    pub rotation: Mat4,
}

/// Game object storage using a flat Vec, plus scene-wide render settings.
/// Designed for small-to-medium object counts (hundreds, not millions).
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<GameObject>,
    next_id: u32,
    main_camera: GameObjectId,
    pub lights: Vec<Light>,
    pub skybox: Option<Skybox>,
    color_luts: [Option<AssetHandle>; COLOR_LUT_SLOTS],
}

impl Scene {
    /// Empty scene holding only the main camera object.
    pub fn new() -> Self {
        let camera = GameObjectId(1);
        Self {
            objects: vec![GameObject::new(camera, MAIN_CAMERA_NAME)],
            next_id: camera.0 + 1,
            main_camera: camera,
            lights: Vec::new(),
            skybox: None,
            color_luts: [None; COLOR_LUT_SLOTS],
        }
    }

    /// Create an empty object at the origin and return its id.
    pub fn create_game_object(&mut self, name: impl Into<String>) -> Result<GameObjectId> {
        let id = GameObjectId(self.next_id);
        self.next_id = successor(id)?;
        self.objects.push(GameObject::new(id, name));
        Ok(id)
    }

    /// Get a reference to an object by ID.
    pub fn get(&self, id: GameObjectId) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get a mutable reference to an object by ID.
    pub fn get_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Find the first object with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.objects.iter_mut()
    }

    /// Number of objects in the scene, the main camera included.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn main_camera(&self) -> GameObjectId {
        self.main_camera
    }

    /// Parent `child` under `parent`, detaching it from any previous parent.
    pub fn add_child(&mut self, parent: GameObjectId, child: GameObjectId) -> Result<()> {
        if self.get(parent).is_none() {
            return Err(Error::MissingGameObject(parent));
        }
        if self.get(child).is_none() {
            return Err(Error::MissingGameObject(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::InvalidHierarchy(format!(
                "{:?} cannot be parented under its own descendant {:?}",
                child, parent
            )));
        }

        if let Some(old) = self.get(child).and_then(|c| c.parent) {
            if let Some(old_parent) = self.get_mut(old) {
                old_parent.children.retain(|&c| c != child);
            }
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
        Ok(())
    }

    /// Whether `ancestor` is `id` itself or anywhere above it.
    fn is_ancestor(&self, ancestor: GameObjectId, id: GameObjectId) -> bool {
        let mut current = Some(id);
        let mut hops = 0;
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            hops += 1;
            if hops > self.objects.len() {
                return false;
            }
            current = self.get(cur).and_then(|o| o.parent);
        }
        false
    }

    pub fn set_skybox(&mut self, texture: AssetHandle, shader: AssetHandle, rotation: Mat4) {
        self.skybox = Some(Skybox {
            texture,
            shader,
            rotation,
        });
    }

    /// Assign a colour-correction LUT to `slot` (0..3). Out-of-range slots are ignored.
    pub fn set_color_lut(&mut self, lut: AssetHandle, slot: usize) {
        match self.color_luts.get_mut(slot) {
            Some(entry) => *entry = Some(lut),
            None => log::warn!("colour LUT slot {} out of range; ignored", slot),
        }
    }

    pub fn color_lut(&self, slot: usize) -> Option<AssetHandle> {
        self.color_luts.get(slot).copied().flatten()
    }

    /// Lights packed for the shader uniform block.
    pub fn light_uniforms(&self) -> Vec<LightUniform> {
        pack_lights(&self.lights)
    }

    /// Wake every behaviour that hasn't been woken yet.
    pub fn awake_all(&mut self) {
        awake_behaviours(self);
    }

    /// Run one tick of every behaviour.
    pub fn update(&mut self, dt: f32) {
        tick_behaviours(self, dt);
    }

    // -- Persistence --

    /// Pretty-printed JSON for the whole scene.
    pub fn to_json(&self) -> Result<String> {
        let record = SceneRecord {
            main_camera: self.main_camera,
            lights: self.lights.clone(),
            skybox: self.skybox,
            color_luts: self.color_luts.to_vec(),
            objects: self.objects.iter().map(GameObjectRecord::from_object).collect(),
        };
        Ok(serde_json::to_string_pretty(&record)?)
    }

    /// Rebuild a scene from JSON. Behaviours come back unwoken; call
    /// [`Scene::awake_all`] before ticking.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: SceneRecord = serde_json::from_str(json)?;

        let mut objects = Vec::with_capacity(record.objects.len());
        for object in record.objects {
            objects.push(object.into_object()?);
        }

        let mut color_luts = [None; COLOR_LUT_SLOTS];
        for (slot, lut) in record.color_luts.into_iter().take(COLOR_LUT_SLOTS).enumerate() {
            color_luts[slot] = lut;
        }

        let mut next_id = 1;
        for object in &objects {
            next_id = next_id.max(successor(object.id)?);
        }
        let scene = Self {
            objects,
            next_id,
            main_camera: record.main_camera,
            lights: record.lights,
            skybox: record.skybox,
            color_luts,
        };
        scene.validate()?;
        Ok(scene)
    }

    fn validate(&self) -> Result<()> {
        if self.get(self.main_camera).is_none() {
            return Err(Error::MissingGameObject(self.main_camera));
        }
        for object in &self.objects {
            if let Some(parent) = object.parent {
                let listed = self
                    .get(parent)
                    .map(|p| p.children.contains(&object.id))
                    .ok_or(Error::MissingGameObject(parent))?;
                if !listed {
                    return Err(Error::InvalidHierarchy(format!(
                        "{:?} names parent {:?}, which doesn't list it as a child",
                        object.id, parent
                    )));
                }
            }
            for &child in &object.children {
                let back = self
                    .get(child)
                    .map(|c| c.parent)
                    .ok_or(Error::MissingGameObject(child))?;
                if back != Some(object.id) {
                    return Err(Error::InvalidHierarchy(format!(
                        "{:?} lists child {:?} with a different parent",
                        object.id, child
                    )));
                }
            }
        }
        Ok(())
    }

    /// Write the scene to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("saved scene ({} game objects) to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// The id handed out after `id`, if the id space isn't exhausted.
fn successor(id: GameObjectId) -> Result<u32> {
    id.0.checked_add(1).ok_or(Error::IdOutOfRange(id))
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize)]
struct SceneRecord {
    main_camera: GameObjectId,
    #[serde(default)]
    lights: Vec<Light>,
    #[serde(default)]
    skybox: Option<Skybox>,
    #[serde(default)]
    color_luts: Vec<Option<AssetHandle>>,
    objects: Vec<GameObjectRecord>,
}

#[derive(Serialize, Deserialize)]
struct GameObjectRecord {
    id: GameObjectId,
    name: String,
    #[serde(default)]
    position: Vec3,
    #[serde(default)]
    rotation: Vec3,
    #[serde(default)]
    parent: Option<GameObjectId>,
    #[serde(default)]
    children: Vec<GameObjectId>,
    #[serde(default)]
    components: Vec<Value>,
}

impl GameObjectRecord {
    fn from_object(object: &GameObject) -> Self {
        Self {
            id: object.id,
            name: object.name.clone(),
            position: object.get_position(),
            rotation: object.get_rotation_euler(),
            parent: object.parent,
            children: object.children.clone(),
            components: object.components().iter().map(Component::to_json).collect(),
        }
    }

    fn into_object(self) -> Result<GameObject> {
        let mut object = GameObject::new(self.id, self.name)
            .with_position(self.position)
            .with_rotation(self.rotation);
        object.parent = self.parent;
        object.children = self.children;
        for data in &self.components {
            object.components.push(Component::from_json(data)?);
        }
        Ok(object)
    }
}
