//! 粒子 GPU 资源
//!
//! 每个发射器对应一组资源：存储缓冲区（粒子数据，每帧整体覆盖）、
//! 静态索引缓冲区（每个粒子两个三角形）和 Uniform 缓冲区。
//! 顶点由顶点着色器根据 `vertex_index / 4` 从存储缓冲区取出粒子后展开成 billboard。

use crate::config::MAX_EMITTER_CAPACITY;
use crate::core::error::{RenderError, RenderResult};
use crate::render::backend::ParticleRenderer;
use crate::render::particles::particle::{quad_indices, Particle, ParticleUniforms};
use wgpu::util::DeviceExt;

/// 粒子缓冲区大小（字节）
pub fn particle_buffer_size(capacity: u32) -> wgpu::BufferAddress {
    std::mem::size_of::<Particle>() as wgpu::BufferAddress * capacity as wgpu::BufferAddress
}

/// 第 `offset` 个粒子在缓冲区中的字节偏移
pub fn particle_byte_offset(offset: usize) -> wgpu::BufferAddress {
    (offset * std::mem::size_of::<Particle>()) as wgpu::BufferAddress
}

/// GPU 粒子资源
pub struct GpuParticleResources {
    /// 粒子存储缓冲区
    pub particle_buffer: wgpu::Buffer,
    /// 索引缓冲区
    pub index_buffer: wgpu::Buffer,
    /// Uniform 缓冲区
    pub uniform_buffer: wgpu::Buffer,
    /// Bind Group Layout（binding 0: 粒子，binding 1: Uniform）
    pub bind_group_layout: wgpu::BindGroupLayout,
    /// Bind Group
    pub bind_group: wgpu::BindGroup,
    /// 渲染 Pipeline，由外部根据 `bind_group_layout` 创建后挂载
    pub render_pipeline: Option<wgpu::RenderPipeline>,
    capacity: u32,
}

impl GpuParticleResources {
    /// 创建新的 GPU 粒子资源
    pub fn new(device: &wgpu::Device, capacity: u32) -> RenderResult<Self> {
        if capacity == 0 || capacity > MAX_EMITTER_CAPACITY {
            return Err(RenderError::InvalidState(format!(
                "particle buffer capacity must be in 1..={}, got {}",
                MAX_EMITTER_CAPACITY, capacity
            )));
        }

        let particle_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Buffer"),
            size: particle_buffer_size(capacity),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let indices = quad_indices(capacity);
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Uniforms"),
            size: std::mem::size_of::<ParticleUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Particle Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Particle Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: particle_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        tracing::debug!(
            target: "render",
            capacity,
            bytes = particle_buffer_size(capacity),
            "Particle GPU resources created"
        );

        Ok(Self {
            particle_buffer,
            index_buffer,
            uniform_buffer,
            bind_group_layout,
            bind_group,
            render_pipeline: None,
            capacity,
        })
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// 挂载渲染 Pipeline
    pub fn attach_pipeline(&mut self, pipeline: wgpu::RenderPipeline) {
        self.render_pipeline = Some(pipeline);
    }

    /// 在渲染通道中记录粒子绘制
    pub fn pass<'a, 'pass>(
        &'pass self,
        queue: &'a wgpu::Queue,
        pass: &'a mut wgpu::RenderPass<'pass>,
    ) -> WgpuParticlePass<'a, 'pass> {
        WgpuParticlePass {
            queue,
            resources: self,
            pass,
        }
    }
}

/// wgpu 渲染后端
///
/// 上传通过 `Queue::write_buffer` 暂存，在包含绘制命令的 command buffer 提交前生效。
pub struct WgpuParticlePass<'a, 'pass> {
    queue: &'a wgpu::Queue,
    resources: &'pass GpuParticleResources,
    pass: &'a mut wgpu::RenderPass<'pass>,
}

impl ParticleRenderer for WgpuParticlePass<'_, '_> {
    fn particle_capacity(&self) -> usize {
        self.resources.capacity as usize
    }

    fn upload_particles(&mut self, offset: usize, particles: &[Particle]) {
        if particles.is_empty() {
            return;
        }
        self.queue.write_buffer(
            &self.resources.particle_buffer,
            particle_byte_offset(offset),
            bytemuck::cast_slice(particles),
        );
    }

    fn draw_particles(&mut self, index_count: u32, uniforms: &ParticleUniforms) {
        let resources = self.resources;
        let Some(pipeline) = resources.render_pipeline.as_ref() else {
            tracing::warn!(target: "render", "Particle pipeline not attached, draw skipped");
            return;
        };

        self.queue
            .write_buffer(&resources.uniform_buffer, 0, bytemuck::bytes_of(uniforms));

        self.pass.set_pipeline(pipeline);
        self.pass.set_bind_group(0, &resources.bind_group, &[]);
        self.pass
            .set_index_buffer(resources.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.pass.draw_indexed(0..index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sizes() {
        assert_eq!(particle_buffer_size(1000), 16_000);
        assert_eq!(particle_byte_offset(3), 48);
        // write_buffer 要求 4 字节对齐
        assert_eq!(particle_byte_offset(7) % wgpu::COPY_BUFFER_ALIGNMENT, 0);
    }
}
