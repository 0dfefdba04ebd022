//! 粒子渲染后端抽象
//!
//! 发射器只依赖这里的 trait：“把 N 个连续粒子写入 GPU 可见缓冲区”和
//! “绘制 N 个索引”。GPU 缓冲区的生命周期由后端自己管理。
//!
//! - [`crate::render::particles::WgpuParticlePass`]: wgpu 实现
//! - [`RecordingRenderer`]: 无 GPU 的实现，用于无头运行和测试

use crate::render::particles::{Particle, ParticleUniforms};

/// 粒子渲染后端
pub trait ParticleRenderer {
    /// GPU 粒子缓冲区可容纳的粒子数
    fn particle_capacity(&self) -> usize;

    /// 从第 `offset` 个元素开始写入粒子
    fn upload_particles(&mut self, offset: usize, particles: &[Particle]);

    /// 发出一次索引绘制
    fn draw_particles(&mut self, index_count: u32, uniforms: &ParticleUniforms);
}

/// 一次记录下来的绘制调用
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedDraw {
    /// 索引数
    pub index_count: u32,
    /// 绘制时的 Uniform
    pub uniforms: ParticleUniforms,
}

/// 记录型渲染后端
///
/// 在 CPU 上镜像 GPU 粒子缓冲区，并记录所有绘制调用。
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    buffer: Vec<Particle>,
    draws: Vec<RecordedDraw>,
    uploaded_bytes: u64,
}

impl RecordingRenderer {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![Particle::default(); capacity],
            draws: Vec::new(),
            uploaded_bytes: 0,
        }
    }

    /// 缓冲区前 `count` 个粒子
    pub fn particles(&self, count: usize) -> &[Particle] {
        &self.buffer[..count.min(self.buffer.len())]
    }

    /// 最近一次绘制所覆盖的粒子
    pub fn drawn_particles(&self) -> &[Particle] {
        let count = self
            .last_draw()
            .map(|draw| (draw.index_count / crate::render::particles::INDICES_PER_PARTICLE) as usize)
            .unwrap_or(0);
        self.particles(count)
    }

    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    pub fn last_draw(&self) -> Option<&RecordedDraw> {
        self.draws.last()
    }

    /// 累计上传字节数
    pub fn uploaded_bytes(&self) -> u64 {
        self.uploaded_bytes
    }

    /// 清空绘制记录（保留缓冲区内容）
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }
}

impl ParticleRenderer for RecordingRenderer {
    fn particle_capacity(&self) -> usize {
        self.buffer.len()
    }

    fn upload_particles(&mut self, offset: usize, particles: &[Particle]) {
        let end = offset + particles.len();
        if end > self.buffer.len() {
            tracing::warn!(
                target: "render",
                offset,
                count = particles.len(),
                capacity = self.buffer.len(),
                "Particle upload out of range, ignored"
            );
            return;
        }
        self.buffer[offset..end].copy_from_slice(particles);
        self.uploaded_bytes += std::mem::size_of_val(particles) as u64;
    }

    fn draw_particles(&mut self, index_count: u32, uniforms: &ParticleUniforms) {
        self.draws.push(RecordedDraw {
            index_count,
            uniforms: *uniforms,
        });
    }
}
