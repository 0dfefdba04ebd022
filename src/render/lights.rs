//! 光源数据
//!
//! `Light` 与着色器中的光源数组逐字节对应，整个数组一次性上传。

use crate::config::LightingConfig;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;

/// 单次上传的最大光源数量
pub const MAX_LIGHTS: usize = 128;

/// 光源类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum LightKind {
    Directional = 0,
    Point = 1,
    Spot = 2,
}

/// GPU 光源（64 字节，16 字节对齐）
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Light {
    pub light_type: i32,
    pub direction: [f32; 3],
    /// 点光源/聚光灯的衰减距离
    pub range: f32,
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    /// 聚光灯内外圆锥角（弧度）
    pub spot_inner_angle: f32,
    pub spot_outer_angle: f32,
    pub _padding: [f32; 2],
}

impl Light {
    /// 方向光，方向会被归一化
    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            light_type: LightKind::Directional as i32,
            direction: direction.normalize_or_zero().to_array(),
            intensity,
            color: color.to_array(),
            ..Self::zeroed()
        }
    }

    pub fn point(position: Vec3, range: f32, color: Vec3, intensity: f32) -> Self {
        Self {
            light_type: LightKind::Point as i32,
            range,
            position: position.to_array(),
            intensity,
            color: color.to_array(),
            ..Self::zeroed()
        }
    }

    pub fn spot(
        position: Vec3,
        direction: Vec3,
        range: f32,
        inner_angle: f32,
        outer_angle: f32,
        color: Vec3,
        intensity: f32,
    ) -> Self {
        Self {
            light_type: LightKind::Spot as i32,
            direction: direction.normalize_or_zero().to_array(),
            range,
            position: position.to_array(),
            intensity,
            color: color.to_array(),
            spot_inner_angle: inner_angle,
            spot_outer_angle: outer_angle,
            ..Self::zeroed()
        }
    }

    pub fn kind(&self) -> Option<LightKind> {
        match self.light_type {
            0 => Some(LightKind::Directional),
            1 => Some(LightKind::Point),
            2 => Some(LightKind::Spot),
            _ => None,
        }
    }
}

/// 生成场景光源
///
/// 配置了太阳方向时先放入一个白色方向光，其余为随机点光源。
/// 结果总数不超过 [`MAX_LIGHTS`]。相同种子的生成器得到相同的光源。
pub fn generate_lights<R: Rng>(rng: &mut R, config: &LightingConfig) -> Vec<Light> {
    let mut lights = Vec::with_capacity(MAX_LIGHTS.min(config.light_count as usize + 1));

    if let Some(direction) = config.sun_direction {
        lights.push(Light::directional(direction, Vec3::ONE, 1.0));
    }

    let extent = config.spawn_extent;
    let [min_height, max_height] = config.height_range;
    let [min_range, max_range] = config.range;
    let [min_intensity, max_intensity] = config.intensity;

    for _ in 0..config.light_count {
        if lights.len() >= MAX_LIGHTS {
            tracing::warn!(
                target: "scene",
                requested = config.light_count,
                "Light count clamped to {}",
                MAX_LIGHTS
            );
            break;
        }

        let position = Vec3::new(
            rng.gen_range(-extent..=extent),
            rng.gen_range(min_height..=max_height),
            rng.gen_range(-extent..=extent),
        );
        let color = Vec3::new(rng.gen(), rng.gen(), rng.gen());
        lights.push(Light::point(
            position,
            rng.gen_range(min_range..=max_range),
            color,
            rng.gen_range(min_intensity..=max_intensity),
        ));
    }

    lights
}
