use glam::Vec3;
use particle_engine::config::{EmitterConfig, EngineConfig};
use particle_engine::core::Engine;
use particle_engine::render::{ParticleEmitter, RecordingRenderer};
use particle_engine::scene::{Camera, Scene};

const SCENARIO_TOML: &str = r#"
seed = 7

[lighting]
light_count = 4

[[emitters]]
max_particles = 4
max_lifetime = 10.0
particles_per_second = 1
start_position = [0.0, 2.0, 0.0]
"#;

#[test]
fn test_toml_config_drives_emitter_scenario() {
    let config = EngineConfig::from_toml_str(SCENARIO_TOML).unwrap();
    config.validate().unwrap();

    let mut scene = Scene::from_config(&config).unwrap();
    assert_eq!(scene.lights().len(), 5);

    let mut renderer = RecordingRenderer::new(4);

    // 第一帧：t = 1, 2, 3 发射
    scene.update(3.5, 3.5);
    scene.draw_particles(&mut renderer, 3.5).unwrap();
    let spawn_times: Vec<f32> = renderer.drawn_particles().iter().map(|p| p.spawn_time).collect();
    assert_eq!(spawn_times, vec![1.0, 2.0, 3.0]);
    assert_eq!(renderer.last_draw().map(|d| d.index_count), Some(18));
    assert_eq!(renderer.drawn_particles()[0].position(), Vec3::new(0.0, 2.0, 0.0));

    // 第二帧：写入最后一个槽位，窗口已满
    scene.update(1.0, 4.5);
    let emitter = &scene.emitters()[0];
    assert!(emitter.is_full());
    assert_eq!(emitter.index_first_dead(), 0);

    // 长帧：全部过期后重新填满，多余的发射被丢弃
    scene.update(10.0, 14.5);
    let emitter = &scene.emitters()[0];
    assert_eq!(emitter.living_count(), 4);
    assert_eq!(emitter.index_first_alive(), 0);
    assert_eq!(emitter.index_first_dead(), 0);
    assert!((emitter.time_accumulator() - 0.5).abs() < 1e-6);
    assert_eq!(emitter.stats().frame_retired, 4);
    assert_eq!(emitter.stats().frame_emitted, 4);
    assert_eq!(emitter.stats().total_dropped, 6);

    renderer.clear_draws();
    scene.draw_particles(&mut renderer, 14.5).unwrap();
    let spawn_times: Vec<f32> = renderer.drawn_particles().iter().map(|p| p.spawn_time).collect();
    assert_eq!(spawn_times, vec![5.0, 6.0, 7.0, 8.0]);
}

#[test]
fn test_wrapped_window_uploads_in_age_order() {
    let camera = Camera::new(&EngineConfig::default().camera);
    let mut emitter = ParticleEmitter::new(EmitterConfig::new(4, 3.0, 1)).unwrap();
    let mut renderer = RecordingRenderer::new(4);

    let mut total_time = 0.0;
    for _ in 0..9 {
        total_time += 0.5;
        emitter.update(0.5, total_time);
    }
    // 存活 t = 2, 3, 4（t = 1 已过期）
    assert_eq!(emitter.living_count(), 3);

    for _ in 0..3 {
        total_time += 0.5;
        emitter.update(0.5, total_time);
    }
    // 窗口跨越数组末尾
    let (first, second) = emitter.live_segments();
    assert!(!second.is_empty());
    assert_eq!(first.len() + second.len(), emitter.living_count());

    emitter.draw(&mut renderer, &camera, total_time).unwrap();
    let drawn = renderer.drawn_particles();
    assert_eq!(drawn.len(), emitter.living_count());
    assert!(drawn.windows(2).all(|w| w[0].spawn_time < w[1].spawn_time));
    assert_eq!(drawn, emitter.packed().as_slice());
}

#[test]
fn test_json_config_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = EngineConfig::default();
    config.emitters = vec![
        EmitterConfig::new(64, 1.5, 30).with_start_position(Vec3::new(1.0, 0.0, -1.0)),
        EmitterConfig::new(16, 0.5, 8),
    ];
    config.save_json(&path).unwrap();

    let loaded = EngineConfig::from_json_file(&path).unwrap();
    assert_eq!(loaded.emitters.len(), 2);
    assert_eq!(loaded.emitters[0].max_particles, 64);
    assert_eq!(loaded.emitters[0].start_position, Vec3::new(1.0, 0.0, -1.0));

    let scene = Scene::from_config(&loaded).unwrap();
    assert_eq!(scene.emitters()[1].capacity(), 16);
}

#[test]
fn test_headless_run_with_multiple_emitters() -> anyhow::Result<()> {
    let mut config = EngineConfig::default();
    config.emitters = vec![
        EmitterConfig::new(50, 2.0, 100),
        EmitterConfig::new(200, 1.0, 60),
    ];

    let report = Engine::run_headless(&config, 180, 1.0 / 60.0)?;

    assert_eq!(report.frames, 180);
    assert_eq!(report.last_frame_draws, 2);
    // 第一个发射器在 0.5s 后饱和，2.5s 之后不再有粒子过期，结束时重新填满
    assert_eq!(report.emitter_stats[0].total_emitted - report.emitter_stats[0].total_retired, 50);
    assert!(report.emitter_stats[0].total_dropped > 0);
    assert_eq!(report.emitter_stats[1].total_dropped, 0);
    assert!(report.living_particles >= 50 + 55);
    Ok(())
}
