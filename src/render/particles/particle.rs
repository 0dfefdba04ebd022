//! GPU 粒子数据结构
//!
//! 与着色器中的结构体逐字节对应，通过 `bytemuck` 直接上传。

use glam::{Mat4, Vec3, Vec4};

/// 每个粒子的 billboard 四边形顶点数
pub const VERTICES_PER_PARTICLE: u32 = 4;
/// 每个粒子的索引数（两个三角形）
pub const INDICES_PER_PARTICLE: u32 = 6;

/// GPU 粒子结构（对应 WGSL `struct Particle { position: vec3<f32>, spawn_time: f32 }`）
///
/// 位置放在前面，使 `vec3` + `f32` 恰好占满 16 字节，与 WGSL 的存储布局一致。
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Particle {
    /// 发射时的世界位置
    pub position: [f32; 3],
    /// 发射时间（秒）
    pub spawn_time: f32,
}

impl Particle {
    pub fn new(position: Vec3, spawn_time: f32) -> Self {
        Self {
            position: position.to_array(),
            spawn_time,
        }
    }

    /// 发射位置
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// 当前年龄
    #[inline]
    pub fn age(&self, current_time: f32) -> f32 {
        current_time - self.spawn_time
    }

    /// 年龄达到寿命即视为死亡
    #[inline]
    pub fn is_expired(&self, current_time: f32, max_lifetime: f32) -> bool {
        self.age(current_time) >= max_lifetime
    }
}

/// 粒子绘制 Uniform
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniforms {
    /// 视图矩阵
    pub view: [[f32; 4]; 4],
    /// 投影矩阵
    pub projection: [[f32; 4]; 4],
    /// 颜色调制
    pub color_tint: [f32; 4],
    /// 当前时间
    pub current_time: f32,
    /// 粒子寿命
    pub max_lifetime: f32,
    /// 填充
    pub _padding: [f32; 2],
}

impl ParticleUniforms {
    pub fn new(
        view: Mat4,
        projection: Mat4,
        color_tint: Vec4,
        current_time: f32,
        max_lifetime: f32,
    ) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            color_tint: color_tint.to_array(),
            current_time,
            max_lifetime,
            _padding: [0.0; 2],
        }
    }
}

/// 生成静态索引缓冲内容
///
/// 顶点在着色器中由 `vertex_index` 构造，这里只需要 `(4i, 4i+1, 4i+2, 4i, 4i+2, 4i+3)`。
pub fn quad_indices(max_particles: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity((max_particles * INDICES_PER_PARTICLE) as usize);
    for particle in 0..max_particles {
        let base = particle * VERTICES_PER_PARTICLE;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_layout() {
        assert_eq!(std::mem::size_of::<Particle>(), 16);
        assert_eq!(std::mem::size_of::<ParticleUniforms>() % 16, 0);
    }

    #[test]
    fn test_particle_age() {
        let particle = Particle::new(Vec3::new(1.0, 2.0, 3.0), 2.0);
        assert_eq!(particle.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(particle.age(5.0), 3.0);
        assert!(!particle.is_expired(5.0, 4.0));
        // 年龄恰好等于寿命时死亡
        assert!(particle.is_expired(6.0, 4.0));
    }

    #[test]
    fn test_quad_indices() {
        let indices = quad_indices(2);
        assert_eq!(indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert!(quad_indices(0).is_empty());
    }
}
