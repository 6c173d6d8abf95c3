//! The default scene: seven rotating gems ("Chaos Emeralds") over a tiled
//! grass plane, lit by three point lights under an ocean skybox.

use glam::{Mat4, Vec2, Vec3};
use otter_engine::{
    AppConfig, AssetHandle, BodyType, Collider, EngineContext, Error, GameObjectId, Layer,
    Light, MagFilter, MinFilter, RenderComponent, ResourceRegistry, Result, RigidBody,
    RotatingBehaviour, Scene, SimpleCameraControl, WrapMode,
};

/// Every gem starts lying on its side.
const GEM_ROTATION: Vec3 = Vec3::new(90.0, 0.0, 0.0);

/// Name of the object every gem is parented under.
pub const GEM_ROOT_NAME: &str = "Chaos Emeralds";

/// One gem's placement and look.
struct GemSpec {
    name: &'static str,
    position: Vec3,
    /// Diffuse texture swapped into a clone of the base gem material.
    /// `None` keeps the base gem texture.
    texture: Option<&'static str>,
    start_time: f32,
}

const GEMS: [GemSpec; 7] = [
    GemSpec {
        name: "Red Gem",
        position: Vec3::new(8.0, 0.0, 1.0),
        texture: Some("textures/Red.png"),
        start_time: 0.5,
    },
    GemSpec {
        name: "Yellow Gem",
        position: Vec3::new(6.0, 2.0, 1.0),
        texture: Some("textures/Yellow.png"),
        start_time: 1.0,
    },
    GemSpec {
        name: "Green Gem",
        position: Vec3::new(4.0, 4.0, 1.0),
        texture: None,
        start_time: 1.5,
    },
    GemSpec {
        name: "Cyan Gem",
        position: Vec3::new(2.0, 6.0, 1.0),
        texture: Some("textures/Cyan.png"),
        start_time: 2.0,
    },
    GemSpec {
        name: "Blue Gem",
        position: Vec3::new(4.0, 8.0, 1.0),
        texture: Some("textures/Blue.jpg"),
        start_time: 2.5,
    },
    GemSpec {
        name: "Purple Gem",
        position: Vec3::new(6.0, 10.0, 1.0),
        texture: Some("textures/Magenta.jpg"),
        start_time: 3.0,
    },
    GemSpec {
        name: "White Gem",
        position: Vec3::new(8.0, 12.0, 1.0),
        texture: Some("textures/White.png"),
        start_time: 3.5,
    },
];

/// Shader handles shared by the materials below.
struct Shaders {
    reflective: AssetHandle,
    basic: AssetHandle,
}

/// Builds the demo scene, or loads it from disk when configured to.
#[derive(Debug, Default)]
pub struct DefaultSceneLayer {
    /// Whether the last `on_app_load` built the scene rather than loading it.
    built: bool,
}

impl DefaultSceneLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn built_scene(&self) -> bool {
        self.built
    }

    fn load_shaders(res: &mut ResourceRegistry) -> Shaders {
        // Environment-reflective materials
        let reflective = res.create_shader(
            "Reflective",
            "shaders/vertex_shaders/basic.glsl",
            "shaders/fragment_shaders/frag_environment_reflective.glsl",
        );
        // Plain materials without reflections
        let basic = res.create_shader(
            "Blinn-phong",
            "shaders/vertex_shaders/basic.glsl",
            "shaders/fragment_shaders/frag_blinn_phong_textured.glsl",
        );
        res.create_shader(
            "Toon Shader",
            "shaders/vertex_shaders/basic.glsl",
            "shaders/fragment_shaders/toon_shading.glsl",
        );
        Shaders { reflective, basic }
    }

    fn setup_environment(res: &mut ResourceRegistry, scene: &mut Scene) -> Result<()> {
        let toon_lut = res.create_texture_1d("luts/toon-1D.png");
        res.set_texture_wrap(toon_lut, WrapMode::ClampToEdge)?;

        let cubemap = res.create_cubemap("cubemaps/ocean/ocean.jpg");
        let skybox_shader = res.create_shader(
            "Skybox",
            "shaders/vertex_shaders/skybox_vert.glsl",
            "shaders/fragment_shaders/skybox_frag.glsl",
        );
        // The cubemap is Y-up; turn it Z-up.
        scene.set_skybox(
            cubemap,
            skybox_shader,
            Mat4::from_axis_angle(Vec3::X, std::f32::consts::FRAC_PI_2),
        );

        for (slot, path) in ["luts/warm.CUBE", "luts/cool.CUBE", "luts/Horror.CUBE"]
            .into_iter()
            .enumerate()
        {
            let lut = res.create_lut_3d(path);
            scene.set_color_lut(lut, slot);
        }
        Ok(())
    }

    fn setup_lights(scene: &mut Scene) {
        scene.lights = vec![
            Light::new(Vec3::new(0.0, 1.0, 3.0), Vec3::ONE).with_range(100.0),
            Light::new(Vec3::new(1.0, 0.0, 3.0), Vec3::new(0.2, 0.8, 0.1)),
            Light::new(Vec3::new(0.0, 1.0, 3.0), Vec3::new(1.0, 0.2, 0.1)),
        ];
    }

    fn setup_camera(scene: &mut Scene) -> Result<()> {
        let id = scene.main_camera();
        let camera = scene.get_mut(id).ok_or(Error::MissingGameObject(id))?;
        camera.set_position(Vec3::new(-4.5, 5.5, 4.0));
        camera.set_rotation(Vec3::new(80.0, 0.0, -90.0));
        camera.add(SimpleCameraControl::default());
        Ok(())
    }

    fn spawn_plane(res: &mut ResourceRegistry, scene: &mut Scene, shaders: &Shaders) -> Result<()> {
        let grass = res.create_texture_2d("textures/GrassTex.jpg");
        res.set_texture_filters(grass, MinFilter::NearestMipLinear, MagFilter::Linear)?;

        let box_material = res.create_material("Box", shaders.basic);
        res.set_param(box_material, "u_Material.Diffuse", grass)?;
        res.set_param(box_material, "u_Material.Shininess", 0.1_f32)?;

        // Unit plane for the host's own use
        res.create_plane_mesh(Vec2::ONE, Vec2::ONE);
        // Big tiled ground mesh
        let tiled = res.create_plane_mesh(Vec2::splat(100.0), Vec2::splat(20.0));

        let id = scene.create_game_object("Plane")?;
        let plane = scene.get_mut(id).ok_or(Error::MissingGameObject(id))?;
        plane.add(RenderComponent::new(tiled, box_material));
        // Static slab just under the surface
        plane
            .add(RigidBody::new(BodyType::Static))
            .add_collider(Collider::cuboid(Vec3::new(50.0, 50.0, 1.0)))
            .position = Vec3::new(0.0, 0.0, -1.0);
        Ok(())
    }

    fn spawn_gems(res: &mut ResourceRegistry, scene: &mut Scene, shaders: &Shaders) -> Result<()> {
        let gem_mesh = res.create_mesh_from_file("Gem.obj");
        let gem_tex = res.create_texture_2d("textures/Gem.png");
        let box_spec = res.create_texture_2d("textures/box-specular.png");

        let gem_material = res.create_material("Gem", shaders.basic);
        res.set_param(gem_material, "u_Material.Diffuse", gem_tex)?;
        res.set_param(gem_material, "u_Material.Specular", box_spec)?;

        let root = scene.create_game_object(GEM_ROOT_NAME)?;
        for spec in &GEMS {
            let material = match spec.texture {
                Some(path) => {
                    let texture = res.create_texture_2d(path);
                    let material = res.clone_material(gem_material)?;
                    res.set_param(material, "u_Material.Diffuse", texture)?;
                    material
                }
                None => gem_material,
            };

            let id = spawn_gem(scene, spec, gem_mesh, material)?;
            scene.add_child(root, id)?;
        }
        Ok(())
    }

    /// Build the full scene into `ctx` and persist it per `config`.
    pub fn create_scene(ctx: &mut EngineContext, config: &AppConfig) -> Result<()> {
        let res = &mut ctx.resources;
        let mut scene = Scene::new();

        let shaders = Self::load_shaders(res);

        // Textures only the reflective material uses
        res.create_texture_2d("textures/box-diffuse.png");
        let monkey_tex = res.create_texture_2d("textures/monkey-uvMap.png");

        Self::setup_environment(res, &mut scene)?;

        let monkey = res.create_material("Monkey", shaders.reflective);
        res.set_param(monkey, "u_Material.Diffuse", monkey_tex)?;
        res.set_param(monkey, "u_Material.Shininess", 0.5_f32)?;

        Self::setup_lights(&mut scene);
        Self::setup_camera(&mut scene)?;
        Self::spawn_plane(res, &mut scene, &shaders)?;
        Self::spawn_gems(res, &mut scene, &shaders)?;

        // Default texture for the host's GUI batcher
        res.create_texture_2d("textures/ui-sprite.png");

        res.save_manifest(&config.manifest_path)?;
        scene.save(&config.scene_path)?;

        ctx.load_scene(scene);
        Ok(())
    }
}

fn spawn_gem(
    scene: &mut Scene,
    spec: &GemSpec,
    mesh: AssetHandle,
    material: AssetHandle,
) -> Result<GameObjectId> {
    let id = scene.create_game_object(spec.name)?;
    let gem = scene.get_mut(id).ok_or(Error::MissingGameObject(id))?;
    gem.set_position(spec.position);
    gem.set_rotation(GEM_ROTATION);
    gem.add(RenderComponent::new(mesh, material));
    gem.add(RotatingBehaviour::with_start_time(spec.start_time));
    Ok(id)
}

impl Layer for DefaultSceneLayer {
    fn name(&self) -> &str {
        "Default Scene"
    }

    fn on_app_load(&mut self, ctx: &mut EngineContext, config: &AppConfig) -> Result<()> {
        let saved = config.scene_path.exists() && config.manifest_path.exists();
        if config.load_scene && saved {
            ctx.load_resources(&config.manifest_path)?;
            ctx.load_scene_file(&config.scene_path)?;
            self.built = false;
        } else {
            if config.load_scene {
                log::warn!(
                    "no saved scene at {} with manifest {}; building a fresh one",
                    config.scene_path.display(),
                    config.manifest_path.display()
                );
            }
            Self::create_scene(ctx, config)?;
            self.built = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_config(tag: &str) -> (PathBuf, AppConfig) {
        let dir = std::env::temp_dir().join(format!("gem-showcase-{}-{}", tag, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = AppConfig {
            scene_path: dir.join("scene.json"),
            manifest_path: dir.join("scene-manifest.json"),
            ..AppConfig::default()
        };
        (dir, config)
    }

    #[test]
    fn builds_seven_gems_under_root() {
        let (dir, config) = temp_config("build");
        let mut ctx = EngineContext::new();
        let mut layer = DefaultSceneLayer::new();
        layer.on_app_load(&mut ctx, &config).unwrap();
        assert!(layer.built_scene());

        let scene = &ctx.scene;
        let root = scene.find_by_name(GEM_ROOT_NAME).unwrap();
        assert_eq!(root.children().len(), 7);

        for (child, spec) in root.children().iter().zip(GEMS.iter()) {
            let gem = scene.get(*child).unwrap();
            assert_eq!(gem.name, spec.name);
            assert_eq!(gem.get_position(), spec.position);
            assert_eq!(gem.get_rotation_euler(), GEM_ROTATION);
            let osc = gem.get::<RotatingBehaviour>().unwrap().oscillator();
            assert_eq!(osc.start_time(), spec.start_time);
            assert_eq!(osc.keypoints(), &[1.0, 3.0, 1.0]);
            assert!(gem.get::<RenderComponent>().unwrap().material.is_some());
        }

        assert_eq!(scene.lights.len(), 3);
        assert_eq!(scene.lights[0].range, 100.0);
        assert!(scene.skybox.is_some());
        assert!(scene.color_lut(2).is_some());

        let camera = scene.get(scene.main_camera()).unwrap();
        assert_eq!(camera.get_position(), Vec3::new(-4.5, 5.5, 4.0));
        assert!(camera.get::<SimpleCameraControl>().is_some());

        let plane = scene.find_by_name("Plane").unwrap();
        let body = plane.get::<RigidBody>().unwrap();
        assert_eq!(body.colliders[0].position, Vec3::new(0.0, 0.0, -1.0));

        assert!(config.scene_path.exists());
        assert!(config.manifest_path.exists());
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn materials_are_cloned_per_colour() {
        let (dir, config) = temp_config("materials");
        let mut ctx = EngineContext::new();
        DefaultSceneLayer::create_scene(&mut ctx, &config).unwrap();

        let manifest = ctx.resources.manifest();
        // Box, Monkey, Gem and six colour clones
        assert_eq!(manifest.materials.len(), 9);
        assert_eq!(manifest.shaders.len(), 4);
        // Unit plane, tiled ground and the gem model
        assert_eq!(manifest.meshes.len(), 3);
        assert!(manifest
            .textures
            .iter()
            .any(|t| t.path == "textures/ui-sprite.png"));
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn reloads_saved_scene_when_asked() {
        let (dir, mut config) = temp_config("reload");
        let mut first = EngineContext::new();
        DefaultSceneLayer::create_scene(&mut first, &config).unwrap();

        config.load_scene = true;
        let mut ctx = EngineContext::new();
        let mut layer = DefaultSceneLayer::new();
        layer.on_app_load(&mut ctx, &config).unwrap();

        assert!(!layer.built_scene());
        assert_eq!(ctx.scene.len(), first.scene.len());
        let red = ctx.scene.find_by_name("Red Gem").unwrap();
        assert!(red.is_awake());

        assert_eq!(ctx.resources.manifest(), first.resources.manifest());
        let render = red.get::<RenderComponent>().unwrap();
        let material = render.material.and_then(|m| ctx.resources.material(m)).unwrap();
        assert_eq!(material.name, "Gem");
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_manifest_rebuilds_scene() {
        let (dir, mut config) = temp_config("no-manifest");
        let mut first = EngineContext::new();
        DefaultSceneLayer::create_scene(&mut first, &config).unwrap();
        std::fs::remove_file(&config.manifest_path).unwrap();

        config.load_scene = true;
        let mut ctx = EngineContext::new();
        let mut layer = DefaultSceneLayer::new();
        layer.on_app_load(&mut ctx, &config).unwrap();

        assert!(layer.built_scene());
        assert!(config.manifest_path.exists());
        assert!(!ctx.resources.manifest().is_empty());
        std::fs::remove_dir_all(dir).ok();
    }
}
