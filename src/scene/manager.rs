//! 场景
//!
//! 持有相机、实体、光源和粒子发射器，按帧推进并产出渲染数据。

use crate::config::{ConfigResult, EngineConfig};
use crate::core::error::{RenderError, RenderResult};
use crate::render::backend::ParticleRenderer;
use crate::render::lights::{generate_lights, Light};
use crate::render::particles::ParticleEmitter;
use crate::scene::{Camera, EntityConstants, GameEntity};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct Scene {
    camera: Camera,
    entities: Vec<GameEntity>,
    lights: Vec<Light>,
    emitters: Vec<ParticleEmitter>,
}

impl Scene {
    /// 从配置构建场景
    ///
    /// 光源由 `config.seed` 播种的生成器产生，相同配置得到相同场景。
    pub fn from_config(config: &EngineConfig) -> ConfigResult<Self> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let lights = generate_lights(&mut rng, &config.lighting);

        let emitters = config
            .emitters
            .iter()
            .cloned()
            .map(ParticleEmitter::new)
            .collect::<ConfigResult<Vec<_>>>()?;

        tracing::info!(
            target: "scene",
            seed = config.seed,
            lights = lights.len(),
            emitters = emitters.len(),
            "Scene created"
        );

        Ok(Self {
            camera: Camera::new(&config.camera),
            entities: Vec::new(),
            lights,
            emitters,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn add_entity(&mut self, entity: GameEntity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    pub fn entities(&self) -> &[GameEntity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [GameEntity] {
        &mut self.entities
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn add_emitter(&mut self, emitter: ParticleEmitter) -> usize {
        self.emitters.push(emitter);
        self.emitters.len() - 1
    }

    pub fn emitters(&self) -> &[ParticleEmitter] {
        &self.emitters
    }

    pub fn emitters_mut(&mut self) -> &mut [ParticleEmitter] {
        &mut self.emitters
    }

    /// 所有发射器的存活粒子总数
    pub fn particle_count(&self) -> usize {
        self.emitters.iter().map(ParticleEmitter::living_count).sum()
    }

    /// 推进一帧：实体绕 Y 轴旋转，发射器按顺序更新
    pub fn update(&mut self, delta_time: f32, current_time: f32) {
        for entity in &mut self.entities {
            entity.transform.rotate(Vec3::new(0.0, delta_time, 0.0));
        }

        for emitter in &mut self.emitters {
            emitter.update(delta_time, current_time);
        }
    }

    /// 依次把所有发射器画到同一个后端
    ///
    /// 每次绘制前都会覆盖后端缓冲区的开头，适用于按绘制顺序立即消费数据的后端。
    /// GPU 上每个发射器应使用各自的资源，见 [`Scene::draw_emitter`]。
    pub fn draw_particles<R>(&self, renderer: &mut R, current_time: f32) -> RenderResult<()>
    where
        R: ParticleRenderer + ?Sized,
    {
        for emitter in &self.emitters {
            emitter.draw(renderer, &self.camera, current_time)?;
        }
        Ok(())
    }

    /// 绘制单个发射器
    pub fn draw_emitter<R>(
        &self,
        index: usize,
        renderer: &mut R,
        current_time: f32,
    ) -> RenderResult<()>
    where
        R: ParticleRenderer + ?Sized,
    {
        let emitter = self.emitters.get(index).ok_or_else(|| {
            RenderError::InvalidState(format!(
                "emitter index {} out of range ({} emitters)",
                index,
                self.emitters.len()
            ))
        })?;
        emitter.draw(renderer, &self.camera, current_time)
    }

    /// 每个实体的常量缓冲区数据，顺序与 [`Scene::entities`] 相同
    pub fn entity_constants(&mut self) -> Vec<EntityConstants> {
        let camera = &self.camera;
        self.entities
            .iter_mut()
            .map(|entity| entity.constants(camera))
            .collect()
    }
}
