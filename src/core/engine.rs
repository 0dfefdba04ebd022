//! 引擎主入口
//!
//! 定义Engine结构和无窗口运行循环

use crate::config::{EngineConfig, LoggingConfig};
use crate::render::backend::RecordingRenderer;
use crate::render::material::Material;
use crate::render::particles::EmitterStats;
use crate::scene::{GameEntity, MeshHandle, Scene, Transform};
use glam::{Vec3, Vec4};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use super::error::{EngineError, EngineResult};

/// 无窗口运行的结果
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessReport {
    /// 运行的帧数
    pub frames: u32,
    /// 结束时的总时间（秒）
    pub total_time: f32,
    /// 结束时所有发射器的存活粒子数
    pub living_particles: usize,
    /// 每个发射器的统计，顺序与配置相同
    pub emitter_stats: Vec<EmitterStats>,
    /// 最后一帧的绘制调用数
    pub last_frame_draws: usize,
}

/// 引擎主结构
///
/// `Engine` 负责：
/// - 初始化日志
/// - 根据配置构建场景
/// - 以固定步长驱动场景并把粒子绘制到后端
///
/// # 示例
///
/// ```no_run
/// use particle_engine::config::EngineConfig;
/// use particle_engine::core::Engine;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let report = Engine::run_headless(&EngineConfig::default(), 600, 1.0 / 60.0)?;
///     println!("{} particles alive", report.living_particles);
///     Ok(())
/// }
/// ```
pub struct Engine;

impl Engine {
    /// 以固定步长运行 `frames` 帧，绘制到记录后端
    pub fn run_headless(
        config: &EngineConfig,
        frames: u32,
        delta_time: f32,
    ) -> EngineResult<HeadlessReport> {
        Self::initialize_logging(&config.logging);

        if !delta_time.is_finite() || delta_time <= 0.0 {
            return Err(EngineError::General(format!(
                "frame delta must be positive and finite, got {}",
                delta_time
            )));
        }

        let mut scene = Scene::from_config(config)?;
        Self::spawn_demo_scene(&mut scene);

        let capacity = scene
            .emitters()
            .iter()
            .map(|emitter| emitter.capacity())
            .max()
            .unwrap_or(0);
        let mut renderer = RecordingRenderer::new(capacity);

        tracing::info!(
            target: "engine",
            frames,
            delta_time,
            emitters = scene.emitters().len(),
            "Headless run starting"
        );

        let mut total_time = 0.0_f32;
        for frame in 0..frames {
            total_time += delta_time;
            scene.update(delta_time, total_time);

            renderer.clear_draws();
            scene.draw_particles(&mut renderer, total_time)?;
            let entity_constants = scene.entity_constants();

            tracing::trace!(
                target: "engine",
                frame,
                particles = scene.particle_count(),
                draws = renderer.draws().len(),
                entities = entity_constants.len(),
                "Frame complete"
            );
        }

        for (index, emitter) in scene.emitters().iter().enumerate() {
            let stats = emitter.stats();
            tracing::info!(
                target: "engine",
                emitter = index,
                living = emitter.living_count(),
                emitted = stats.total_emitted,
                retired = stats.total_retired,
                dropped = stats.total_dropped,
                "Emitter summary"
            );
        }

        let report = HeadlessReport {
            frames,
            total_time,
            living_particles: scene.particle_count(),
            emitter_stats: scene.emitters().iter().map(|e| *e.stats()).collect(),
            last_frame_draws: renderer.draws().len(),
        };

        tracing::info!(
            target: "engine",
            uploaded_bytes = renderer.uploaded_bytes(),
            "Engine shutting down"
        );
        Ok(report)
    }

    /// 初始化日志系统
    ///
    /// 设置了 `RUST_LOG` 时以环境变量为准，否则使用配置中的级别。
    /// 重复调用不会报错。
    pub fn initialize_logging(config: &LoggingConfig) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.show_target)
            .try_init();
        tracing::info!(target: "engine", "Engine starting");
    }

    /// 演示场景：一排共享材质的网格
    fn spawn_demo_scene(scene: &mut Scene) {
        let material = Arc::new(Material::new(Vec4::new(0.8, 0.8, 0.8, 1.0)));
        for i in 0..3_u32 {
            let transform = Transform::from_position(Vec3::new(i as f32 * 3.0 - 3.0, 0.0, 0.0));
            scene.add_entity(
                GameEntity::new(MeshHandle(i), Arc::clone(&material)).with_transform(transform),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmitterConfig;

    #[test]
    fn test_run_headless_steady_state() {
        let config = EngineConfig {
            emitters: vec![EmitterConfig::new(100, 1.0, 10)],
            ..EngineConfig::default()
        };
        let report = Engine::run_headless(&config, 120, 0.05).unwrap();

        assert_eq!(report.frames, 120);
        assert_eq!(report.emitter_stats.len(), 1);
        assert_eq!(report.last_frame_draws, 1);
        // 10/s、寿命 1s：稳定时约 10 个存活粒子
        assert!(
            (8..=11).contains(&report.living_particles),
            "{}",
            report.living_particles
        );
        assert_eq!(report.emitter_stats[0].total_dropped, 0);
    }

    #[test]
    fn test_run_headless_rejects_bad_delta() {
        let config = EngineConfig::default();
        assert!(matches!(
            Engine::run_headless(&config, 1, 0.0),
            Err(EngineError::General(_))
        ));
        assert!(Engine::run_headless(&config, 1, f32::NAN).is_err());
    }

    #[test]
    fn test_run_headless_rejects_invalid_config() {
        let config = EngineConfig {
            emitters: vec![EmitterConfig::new(0, 1.0, 10)],
            ..EngineConfig::default()
        };
        assert!(matches!(
            Engine::run_headless(&config, 1, 0.1),
            Err(EngineError::Config(_))
        ));
    }
}
