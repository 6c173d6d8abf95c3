use gem_showcase::{DefaultSceneLayer, GEM_ROOT_NAME};
use otter_app::LayerRunner;
use otter_engine::{AppConfig, LightUniform, Result};

/// Seconds of simulated time to run headless.
const RUN_SECONDS: f32 = 10.0;
/// Simulated display refresh.
const FRAME_DT: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    otter_app::init_logging(&config);

    let mut runner = LayerRunner::new(DefaultSceneLayer::new(), config);
    runner.init()?;
    log::debug!("inspector:\n{}", runner.inspect());

    let frames = (RUN_SECONDS / FRAME_DT).round() as u32;
    let ticks = runner.run_frames(frames, FRAME_DT);
    log::info!("ran {} ticks ({:.1}s simulated)", ticks, RUN_SECONDS);

    let scene = &runner.context().scene;
    log::debug!(
        "light uniform block: {} bytes",
        scene.light_uniforms().len() * LightUniform::STRIDE_BYTES
    );
    if let Some(root) = scene.find_by_name(GEM_ROOT_NAME) {
        for gem in root.children().iter().filter_map(|&id| scene.get(id)) {
            let pos = gem.get_position();
            let rot = gem.get_rotation_euler();
            log::info!(
                "{:<11} pos ({:5.2}, {:5.2}, {:5.3})  rot ({:6.1}, {:6.1}, {:7.1})",
                gem.name,
                pos.x,
                pos.y,
                pos.z,
                rot.x,
                rot.y,
                rot.z
            );
        }
    }
    Ok(())
}
