use super::{ConfigError, ConfigResult};
use crate::render::particles::INDICES_PER_PARTICLE;
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// 单个发射器的最大容量，保证 `容量 * 6` 个索引不超出 u32
pub const MAX_EMITTER_CAPACITY: u32 = u32::MAX / INDICES_PER_PARTICLE;

/// 粒子发射器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// 最大粒子数（环形缓冲区容量）
    pub max_particles: u32,
    /// 粒子存活时间（秒）
    pub max_lifetime: f32,
    /// 每秒发射数量
    pub particles_per_second: u32,
    /// 发射器初始世界位置
    pub start_position: Vec3,
    /// 颜色调制
    #[serde(default = "default_color_tint")]
    pub color_tint: Vec4,
}

fn default_color_tint() -> Vec4 {
    Vec4::ONE
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_particles: 1000,
            max_lifetime: 5.0,
            particles_per_second: 100,
            start_position: Vec3::ZERO,
            color_tint: default_color_tint(),
        }
    }
}

impl EmitterConfig {
    pub fn new(max_particles: u32, max_lifetime: f32, particles_per_second: u32) -> Self {
        Self {
            max_particles,
            max_lifetime,
            particles_per_second,
            ..Default::default()
        }
    }

    /// 设置初始位置
    pub fn with_start_position(mut self, position: Vec3) -> Self {
        self.start_position = position;
        self
    }

    /// 设置颜色调制
    pub fn with_color_tint(mut self, tint: Vec4) -> Self {
        self.color_tint = tint;
        self
    }

    /// 两次发射之间的间隔（秒）
    pub fn seconds_per_particle(&self) -> f32 {
        1.0 / self.particles_per_second as f32
    }

    /// 验证配置
    ///
    /// 容量、寿命和发射速率都必须为正，否则 `seconds_per_particle` 会除零，
    /// 环形索引取模也没有意义。
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_particles == 0 {
            return Err(ConfigError::ValidationError(
                "max_particles must be greater than zero".to_string(),
            ));
        }
        if self.max_particles > MAX_EMITTER_CAPACITY {
            return Err(ConfigError::ValidationError(format!(
                "max_particles must be at most {}, got {}",
                MAX_EMITTER_CAPACITY, self.max_particles
            )));
        }
        if !self.max_lifetime.is_finite() || self.max_lifetime <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "max_lifetime must be a positive number of seconds, got {}",
                self.max_lifetime
            )));
        }
        if self.particles_per_second == 0 {
            return Err(ConfigError::ValidationError(
                "particles_per_second must be greater than zero".to_string(),
            ));
        }
        if !self.start_position.is_finite() {
            return Err(ConfigError::ValidationError(
                "start_position must be finite".to_string(),
            ));
        }
        if !self.color_tint.is_finite() {
            return Err(ConfigError::ValidationError(
                "color_tint must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EmitterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_seconds_per_particle() {
        let config = EmitterConfig::new(16, 1.0, 4);
        assert!((config.seconds_per_particle() - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let config = EmitterConfig::new(0, 1.0, 10);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_bad_lifetime() {
        for lifetime in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = EmitterConfig::new(8, lifetime, 10);
            assert!(config.validate().is_err(), "lifetime {} accepted", lifetime);
        }
    }

    #[test]
    fn test_rejects_capacity_beyond_index_range() {
        assert!(EmitterConfig::new(MAX_EMITTER_CAPACITY, 1.0, 10).validate().is_ok());
        let config = EmitterConfig::new(MAX_EMITTER_CAPACITY + 1, 1.0, 10);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
        // 最大容量下索引数仍在 u32 范围内
        assert!(MAX_EMITTER_CAPACITY
            .checked_mul(INDICES_PER_PARTICLE)
            .is_some());
    }

    #[test]
    fn test_rejects_non_finite_tint() {
        let config =
            EmitterConfig::new(8, 1.0, 10).with_color_tint(Vec4::new(f32::NAN, 1.0, 1.0, 1.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_rate() {
        let config = EmitterConfig::new(8, 1.0, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_position() {
        let config = EmitterConfig::default().with_start_position(Vec3::new(f32::NAN, 0.0, 0.0));
        assert!(config.validate().is_err());
    }
}
