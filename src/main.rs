use particle_engine::config::EngineConfig;
use particle_engine::core::Engine;

const FRAMES: u32 = 600;
const DELTA_TIME: f32 = 1.0 / 60.0;

fn main() {
    let (mut config, source) = EngineConfig::load_or_default();
    config.apply_env_overrides();

    if let Some(path) = &source {
        eprintln!("Loaded config from {}", path.display());
    }

    match Engine::run_headless(&config, FRAMES, DELTA_TIME) {
        Ok(report) => {
            println!(
                "{} frames, {:.2}s simulated, {} particles alive",
                report.frames, report.total_time, report.living_particles
            );
        }
        Err(e) => {
            eprintln!("Engine failed to start: {}", e);
            std::process::exit(1);
        }
    }
}
