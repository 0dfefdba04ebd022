//! 场景实体

use crate::render::material::Material;
use crate::scene::{Camera, Transform};
use bytemuck::{Pod, Zeroable};
use std::sync::Arc;

/// 网格句柄（由资源系统分配）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// 网格 + 共享材质 + 变换
#[derive(Clone, Debug)]
pub struct GameEntity {
    pub mesh: MeshHandle,
    pub material: Arc<Material>,
    pub transform: Transform,
}

impl GameEntity {
    pub fn new(mesh: MeshHandle, material: Arc<Material>) -> Self {
        Self {
            mesh,
            material,
            transform: Transform::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// 每个实体的常量缓冲区数据
    pub fn constants(&mut self, camera: &Camera) -> EntityConstants {
        EntityConstants {
            world: self.transform.world_matrix().to_cols_array_2d(),
            world_inverse_transpose: self.transform.world_inverse_transpose().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
        }
    }
}

/// 实体常量缓冲区布局（列主序）
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct EntityConstants {
    pub world: [[f32; 4]; 4],
    pub world_inverse_transpose: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}
