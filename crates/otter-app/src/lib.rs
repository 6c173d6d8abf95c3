pub mod runner;

pub use runner::LayerRunner;

use otter_engine::AppConfig;

/// Install the native logger. `RUST_LOG` overrides the config's level.
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(config: &AppConfig) {
    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
