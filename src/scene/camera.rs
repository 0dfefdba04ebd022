//! 相机
//!
//! 左手坐标系的视图/投影矩阵。输入处理不在这里，调用方通过 `look` 和
//! `move_*` 驱动相机。

use crate::config::CameraConfig;
use crate::scene::Transform;
use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

/// pitch 上下限，避免视线与世界上方向平行
const LOOK_LIMIT: f32 = FRAC_PI_2 - 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Perspective { field_of_view: f32 },
    Orthographic { width: f32 },
}

#[derive(Clone, Debug)]
pub struct Camera {
    transform: Transform,
    view: Mat4,
    projection: Mat4,
    projection_kind: Projection,
    aspect_ratio: f32,
    near_clip: f32,
    far_clip: f32,
    move_speed: f32,
    look_speed: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let mut transform = Transform::from_position(config.start_position);
        transform.set_rotation(config.start_rotation);

        let projection_kind = if config.perspective {
            Projection::Perspective {
                field_of_view: config.field_of_view,
            }
        } else {
            Projection::Orthographic {
                width: config.orthographic_width,
            }
        };

        let mut camera = Self {
            transform,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            projection_kind,
            aspect_ratio: config.aspect_ratio,
            near_clip: config.near_clip,
            far_clip: config.far_clip,
            move_speed: config.move_speed,
            look_speed: config.look_speed,
        };
        camera.update_view_matrix();
        camera.update_projection_matrix();
        camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// 修改变换后需要调用 [`Camera::update_view_matrix`]
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn projection(&self) -> Projection {
        self.projection_kind
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn near_clip(&self) -> f32 {
        self.near_clip
    }

    pub fn far_clip(&self) -> f32 {
        self.far_clip
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn look_speed(&self) -> f32 {
        self.look_speed
    }

    pub fn update_view_matrix(&mut self) {
        let position = self.transform.position();
        let forward = self.transform.forward();
        self.view = Mat4::look_to_lh(position, forward, Vec3::Y);
    }

    fn update_projection_matrix(&mut self) {
        self.projection = match self.projection_kind {
            Projection::Perspective { field_of_view } => {
                Mat4::perspective_lh(field_of_view, self.aspect_ratio, self.near_clip, self.far_clip)
            }
            Projection::Orthographic { width } => {
                let half_width = width * 0.5;
                let half_height = half_width / self.aspect_ratio;
                Mat4::orthographic_lh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near_clip,
                    self.far_clip,
                )
            }
        };
    }

    /// 窗口尺寸变化
    pub fn resize(&mut self, aspect_ratio: f32) {
        if self.aspect_ratio != aspect_ratio {
            self.aspect_ratio = aspect_ratio;
            self.update_projection_matrix();
        }
    }

    pub fn set_projection(&mut self, projection: Projection) {
        if self.projection_kind != projection {
            self.projection_kind = projection;
            self.update_projection_matrix();
        }
    }

    pub fn set_clip_planes(&mut self, near_clip: f32, far_clip: f32) {
        if self.near_clip != near_clip || self.far_clip != far_clip {
            self.near_clip = near_clip;
            self.far_clip = far_clip;
            self.update_projection_matrix();
        }
    }

    pub fn set_move_speed(&mut self, move_speed: f32) {
        self.move_speed = move_speed;
    }

    pub fn set_look_speed(&mut self, look_speed: f32) {
        self.look_speed = look_speed;
    }

    /// 按鼠标位移旋转，pitch 被限制在 ±(π/2 - 0.05)
    pub fn look(&mut self, mouse_dx: f32, mouse_dy: f32) {
        self.transform
            .rotate(Vec3::new(mouse_dy * self.look_speed, mouse_dx * self.look_speed, 0.0));

        let mut rotation = self.transform.rotation();
        rotation.x = rotation.x.clamp(-LOOK_LIMIT, LOOK_LIMIT);
        self.transform.set_rotation(rotation);
        self.update_view_matrix();
    }

    /// `direction` 为局部 XZ 平面上的输入方向，y 分量沿世界上方向移动
    pub fn fly(&mut self, direction: Vec3, delta_time: f32) {
        let speed = self.move_speed * delta_time;
        self.transform
            .move_relative(Vec3::new(direction.x, 0.0, direction.z) * speed);
        self.transform.move_absolute(Vec3::new(0.0, direction.y * speed, 0.0));
        self.update_view_matrix();
    }
}
