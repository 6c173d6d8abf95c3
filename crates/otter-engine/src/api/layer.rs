use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::registry::ResourceRegistry;
use crate::core::scene::Scene;
use crate::error::{Error, Result};

/// Application configuration, read from JSON when the app loads.
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum fixed steps run for one frame (default: 10).
    pub max_steps_per_frame: u32,
    /// Load the scene from `scene_path` instead of building it, when the file exists.
    pub load_scene: bool,
    /// Where the scene is saved and loaded.
    pub scene_path: PathBuf,
    /// Where the asset manifest is saved.
    pub manifest_path: PathBuf,
    /// Default log filter for the native runner.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            load_scene: false,
            scene_path: PathBuf::from("scene.json"),
            manifest_path: PathBuf::from("scene-manifest.json"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// The fixed step must be a positive, finite number of seconds and at
    /// least one step must be allowed per frame.
    pub fn validate(&self) -> Result<()> {
        if !self.fixed_dt.is_finite() || self.fixed_dt <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "fixed_dt must be positive, got {}",
                self.fixed_dt
            )));
        }
        if self.max_steps_per_frame == 0 {
            return Err(Error::InvalidConfig("max_steps_per_frame must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// An application layer: creates or loads its scene when the app loads,
/// then optionally runs per-tick logic of its own.
pub trait Layer {
    /// Human-readable layer name, used in logs.
    fn name(&self) -> &str;

    /// Build or load the scene. Called once before the first tick.
    fn on_app_load(&mut self, ctx: &mut EngineContext, config: &AppConfig) -> Result<()>;

    /// Layer logic run once per fixed step, after the scene's behaviours.
    fn update(&mut self, _ctx: &mut EngineContext, _dt: f32) {}
}

/// Mutable engine state handed to layers.
pub struct EngineContext {
    pub scene: Scene,
    pub resources: ResourceRegistry,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            resources: ResourceRegistry::new(),
        }
    }

    /// Make `scene` the active scene and wake its behaviours.
    pub fn load_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.scene.awake_all();
        log::info!("scene loaded: {} game objects", self.scene.len());
    }

    /// Replace the resources with those listed in a saved asset manifest.
    pub fn load_resources(&mut self, manifest_path: impl AsRef<Path>) -> Result<()> {
        self.resources = ResourceRegistry::load(manifest_path)?;
        Ok(())
    }

    /// Read a saved scene from disk and make it active.
    pub fn load_scene_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let scene = Scene::load(path)?;
        log::info!("loaded scene from {}", path.display());
        self.load_scene(scene);
        Ok(())
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
