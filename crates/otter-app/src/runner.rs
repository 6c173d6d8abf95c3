use otter_engine::{
    AppConfig, EngineContext, FixedTimestep, Inspector, Layer, Result, TextInspector,
};

/// Generic runner that wires a layer into the engine loop.
///
/// The host calls [`LayerRunner::init`] once, then [`LayerRunner::tick`]
/// with each frame's wall-clock delta. Behaviours and the layer's own
/// update run at the configured fixed timestep.
pub struct LayerRunner<L: Layer> {
    layer: L,
    ctx: EngineContext,
    timestep: FixedTimestep,
    config: AppConfig,
    initialized: bool,
}

impl<L: Layer> LayerRunner<L> {
    pub fn new(layer: L, config: AppConfig) -> Self {
        let timestep = FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps_per_frame);
        Self {
            layer,
            ctx: EngineContext::new(),
            timestep,
            config,
            initialized: false,
        }
    }

    /// Let the layer build or load its scene, then wake it. Call once.
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            log::warn!("{}: init called twice; ignoring", self.layer.name());
            return Ok(());
        }
        self.config.validate()?;
        self.layer.on_app_load(&mut self.ctx, &self.config)?;
        self.ctx.scene.awake_all();
        self.initialized = true;
        log::info!(
            "{}: initialized with {} game objects",
            self.layer.name(),
            self.ctx.scene.len()
        );
        Ok(())
    }

    /// Run one frame: as many fixed ticks as the frame's time covers.
    /// Returns the number of ticks run.
    pub fn tick(&mut self, frame_dt: f32) -> u32 {
        if !self.initialized {
            return 0;
        }

        let steps = self.timestep.accumulate(frame_dt);
        let dt = self.timestep.dt();
        for _ in 0..steps {
            self.ctx.scene.update(dt);
            self.layer.update(&mut self.ctx, dt);
        }
        steps
    }

    /// Drive `frames` frames of `frame_dt` seconds each, headless.
    pub fn run_frames(&mut self, frames: u32, frame_dt: f32) -> u64 {
        let mut total = 0;
        for _ in 0..frames {
            total += u64::from(self.tick(frame_dt));
        }
        log::debug!("{}: ran {} ticks over {} frames", self.layer.name(), total, frames);
        total
    }

    /// Text dump of every object's components, as the debug inspector shows them.
    pub fn inspect(&mut self) -> String {
        let mut ui = TextInspector::new();
        for object in self.ctx.scene.iter_mut() {
            ui.label(&format!("{} ({:?})", object.name, object.id));
            for component in object.components_mut() {
                component.inspect(&mut ui);
            }
        }
        ui.into_text()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.timestep.ticks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use otter_engine::RotatingBehaviour;

    struct OneGem {
        updates: u32,
    }

    impl Layer for OneGem {
        fn name(&self) -> &str {
            "one-gem"
        }

        fn on_app_load(&mut self, ctx: &mut EngineContext, _config: &AppConfig) -> Result<()> {
            let id = ctx.scene.create_game_object("Gem")?;
            let gem = ctx.scene.get_mut(id).ok_or(otter_engine::Error::MissingGameObject(id))?;
            gem.set_position(Vec3::new(0.0, 0.0, 5.0));
            gem.add(RotatingBehaviour::new());
            Ok(())
        }

        fn update(&mut self, _ctx: &mut EngineContext, _dt: f32) {
            self.updates += 1;
        }
    }

    fn config(fixed_dt: f32) -> AppConfig {
        AppConfig {
            fixed_dt,
            ..AppConfig::default()
        }
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = LayerRunner::new(OneGem { updates: 0 }, config(0.25));
        assert_eq!(runner.tick(1.0), 0);
        assert_eq!(runner.layer().updates, 0);
    }

    #[test]
    fn ticks_run_behaviours_and_layer() {
        let mut runner = LayerRunner::new(OneGem { updates: 0 }, config(0.25));
        runner.init().unwrap();

        assert_eq!(runner.tick(0.5), 2);
        assert_eq!(runner.layer().updates, 2);

        let gem = runner.context().scene.find_by_name("Gem").unwrap();
        assert!((gem.get_rotation_euler().z - 15.0).abs() < 1e-5);
    }

    #[test]
    fn init_rejects_zero_timestep() {
        let mut runner = LayerRunner::new(OneGem { updates: 0 }, config(0.0));
        assert!(matches!(runner.init(), Err(otter_engine::Error::InvalidConfig(_))));
        assert!(!runner.is_initialized());
        assert_eq!(runner.tick(1.0), 0);
        assert!(runner.context().scene.find_by_name("Gem").is_none());
    }

    #[test]
    fn inspect_lists_speed() {
        let mut runner = LayerRunner::new(OneGem { updates: 0 }, config(0.25));
        runner.init().unwrap();
        let text = runner.inspect();
        assert!(text.contains("[RotatingBehaviour]"));
        assert!(text.contains("Speed: (0.00, 0.00, 30.00)"));
    }
}
