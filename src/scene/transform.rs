//! 变换组件
//!
//! 位置、欧拉角旋转（pitch, yaw, roll）和缩放。世界矩阵与方向向量都是惰性计算的，
//! 只有在对应的脏标记被设置后首次读取时才重新计算。

use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Debug)]
pub struct Transform {
    position: Vec3,
    /// x = pitch, y = yaw, z = roll（弧度）
    rotation: Vec3,
    scale: Vec3,

    world_matrix: Mat4,
    world_inverse_transpose: Mat4,
    right: Vec3,
    up: Vec3,
    forward: Vec3,

    dirty_world: bool,
    dirty_directions: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            world_matrix: Mat4::IDENTITY,
            world_inverse_transpose: Mat4::IDENTITY,
            right: Vec3::X,
            up: Vec3::Y,
            forward: Vec3::Z,
            dirty_world: false,
            dirty_directions: false,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        let mut transform = Self::default();
        transform.set_position(position);
        transform
    }

    // ------------------------------------------------------------------
    // 读取
    // ------------------------------------------------------------------

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// 旋转对应的四元数（先 roll，再 pitch，最后 yaw）
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.rotation.y, self.rotation.x, self.rotation.z)
    }

    pub fn world_matrix(&mut self) -> Mat4 {
        self.update_world();
        self.world_matrix
    }

    /// 世界矩阵逆转置，用于变换法线
    pub fn world_inverse_transpose(&mut self) -> Mat4 {
        self.update_world();
        self.world_inverse_transpose
    }

    pub fn right(&mut self) -> Vec3 {
        self.update_directions();
        self.right
    }

    pub fn up(&mut self) -> Vec3 {
        self.update_directions();
        self.up
    }

    pub fn forward(&mut self) -> Vec3 {
        self.update_directions();
        self.forward
    }

    // ------------------------------------------------------------------
    // 设置
    // ------------------------------------------------------------------

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty_world = true;
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.dirty_world = true;
        self.dirty_directions = true;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty_world = true;
    }

    // ------------------------------------------------------------------
    // 修改
    // ------------------------------------------------------------------

    /// 沿世界坐标轴移动
    pub fn move_absolute(&mut self, offset: Vec3) {
        self.position += offset;
        self.dirty_world = true;
    }

    /// 沿自身旋转后的坐标轴移动
    pub fn move_relative(&mut self, offset: Vec3) {
        self.position += self.orientation() * offset;
        self.dirty_world = true;
    }

    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
        self.dirty_world = true;
        self.dirty_directions = true;
    }

    /// 按分量乘以缩放
    pub fn scale_by(&mut self, factor: Vec3) {
        self.scale *= factor;
        self.dirty_world = true;
    }

    fn update_world(&mut self) {
        if !self.dirty_world {
            return;
        }

        let world =
            Mat4::from_scale_rotation_translation(self.scale, self.orientation(), self.position);
        self.world_matrix = world;
        self.world_inverse_transpose = world.inverse().transpose();
        self.dirty_world = false;
    }

    fn update_directions(&mut self) {
        if !self.dirty_directions {
            return;
        }

        let orientation = self.orientation();
        self.right = orientation * Vec3::X;
        self.up = orientation * Vec3::Y;
        self.forward = orientation * Vec3::Z;
        self.dirty_directions = false;
    }
}
