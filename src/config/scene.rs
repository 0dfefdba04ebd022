use super::{ConfigError, ConfigResult};
use crate::render::lights::MAX_LIGHTS;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_4, PI};

/// 相机配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// 初始位置
    pub start_position: Vec3,
    /// 初始旋转（pitch, yaw, roll，弧度）
    pub start_rotation: Vec3,
    /// 宽高比
    pub aspect_ratio: f32,
    /// 垂直视场角（弧度）
    pub field_of_view: f32,
    /// 近裁剪面
    pub near_clip: f32,
    /// 远裁剪面
    pub far_clip: f32,
    /// 透视投影，否则正交投影
    pub perspective: bool,
    /// 正交投影宽度
    pub orthographic_width: f32,
    /// 移动速度（单位/秒）
    pub move_speed: f32,
    /// 视角灵敏度（弧度/像素）
    pub look_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(-0.5, 6.25, -15.5),
            start_rotation: Vec3::new(0.366, 0.0, 0.0),
            aspect_ratio: 16.0 / 9.0,
            field_of_view: FRAC_PI_4,
            near_clip: 0.01,
            far_clip: 100.0,
            perspective: true,
            orthographic_width: 10.0,
            move_speed: 5.0,
            look_speed: 0.002,
        }
    }
}

impl CameraConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(ConfigError::ValidationError(
                "Invalid camera aspect ratio".to_string(),
            ));
        }
        if !(self.field_of_view > 0.0 && self.field_of_view < PI) {
            return Err(ConfigError::ValidationError(
                "Camera field of view must be in (0, PI)".to_string(),
            ));
        }
        if !(self.near_clip > 0.0 && self.far_clip > self.near_clip) {
            return Err(ConfigError::ValidationError(
                "Camera clip planes must satisfy 0 < near < far".to_string(),
            ));
        }
        if self.orthographic_width <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Orthographic width must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// 随机点光源生成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// 点光源数量
    pub light_count: u32,
    /// 光源在 XZ 平面上的分布半径
    pub spawn_extent: f32,
    /// 光源高度范围
    pub height_range: [f32; 2],
    /// 衰减距离范围
    pub range: [f32; 2],
    /// 强度范围
    pub intensity: [f32; 2],
    /// 方向光（太阳）方向，`None` 表示不添加
    pub sun_direction: Option<Vec3>,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_count: 16,
            spawn_extent: 10.0,
            height_range: [0.0, 5.0],
            range: [3.0, 8.0],
            intensity: [0.5, 1.5],
            sun_direction: Some(Vec3::new(1.0, -1.0, 1.0)),
        }
    }
}

impl LightingConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        let total = self.light_count as usize + usize::from(self.sun_direction.is_some());
        if total > MAX_LIGHTS {
            return Err(ConfigError::ValidationError(format!(
                "At most {} lights are supported, {} requested",
                MAX_LIGHTS, total
            )));
        }
        for (name, [min, max]) in [
            ("height_range", self.height_range),
            ("range", self.range),
            ("intensity", self.intensity),
        ] {
            if !(min.is_finite() && max.is_finite() && min <= max) {
                return Err(ConfigError::ValidationError(format!(
                    "lighting.{} must be an ordered [min, max] pair",
                    name
                )));
            }
        }
        if !(self.spawn_extent.is_finite() && self.spawn_extent >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "lighting.spawn_extent must be a finite non-negative number, got {}",
                self.spawn_extent
            )));
        }
        if let Some(direction) = self.sun_direction {
            if direction.length_squared() == 0.0 {
                return Err(ConfigError::ValidationError(
                    "lighting.sun_direction must not be zero".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_defaults_valid() {
        assert!(CameraConfig::default().validate().is_ok());
    }

    #[test]
    fn test_camera_rejects_inverted_clip_planes() {
        let config = CameraConfig {
            near_clip: 10.0,
            far_clip: 1.0,
            ..CameraConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lighting_rejects_non_finite_extent() {
        for spawn_extent in [f32::NAN, f32::INFINITY, -1.0] {
            let config = LightingConfig {
                spawn_extent,
                ..LightingConfig::default()
            };
            assert!(config.validate().is_err(), "spawn_extent {} accepted", spawn_extent);
        }
    }

    #[test]
    fn test_lighting_rejects_too_many_lights() {
        let config = LightingConfig {
            light_count: MAX_LIGHTS as u32,
            ..LightingConfig::default()
        };
        // 太阳光占用一个额外名额
        assert!(config.validate().is_err());

        let config = LightingConfig {
            sun_direction: None,
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lighting_rejects_unordered_range() {
        let config = LightingConfig {
            intensity: [2.0, 1.0],
            ..LightingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
