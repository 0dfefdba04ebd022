/// 统一配置系统
///
/// 提供TOML/JSON配置文件、环境变量和运行时动态调整
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod particles;
pub mod scene;

pub use particles::{EmitterConfig, MAX_EMITTER_CAPACITY};
pub use scene::{CameraConfig, LightingConfig};

/// 引擎配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 引擎主配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 场景随机装饰使用的种子
    pub seed: u64,

    /// 相机配置
    pub camera: CameraConfig,

    /// 光源配置
    pub lighting: LightingConfig,

    /// 粒子发射器列表
    pub emitters: Vec<EmitterConfig>,

    /// 日志配置
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            emitters: vec![EmitterConfig::default()],
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("ENGINE_SEED") {
            if let Ok(seed) = val.parse() {
                self.seed = seed;
            }
        }
        if let Ok(val) = env::var("ENGINE_LOG_LEVEL") {
            if let Some(level) = LogLevel::parse(&val) {
                self.logging.level = level;
            }
        }

        // 相机配置
        if let Ok(val) = env::var("ENGINE_CAMERA_FOV") {
            if let Ok(fov) = val.parse() {
                self.camera.field_of_view = fov;
            }
        }
        if let Ok(val) = env::var("ENGINE_CAMERA_ASPECT") {
            if let Ok(aspect) = val.parse() {
                self.camera.aspect_ratio = aspect;
            }
        }

        // 光源配置
        if let Ok(val) = env::var("ENGINE_LIGHT_COUNT") {
            if let Ok(count) = val.parse() {
                self.lighting.light_count = count;
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.camera.validate()?;
        self.lighting.validate()?;
        for (index, emitter) in self.emitters.iter().enumerate() {
            emitter.validate().map_err(|e| match e {
                ConfigError::ValidationError(msg) => {
                    ConfigError::ValidationError(format!("emitters[{}]: {}", index, msg))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./config.toml
    /// 2. ./config.json
    /// 3. ~/.config/particle_engine/config.toml
    /// 4. 使用默认配置
    ///
    /// 日志系统在配置加载之后才初始化，所以这里返回配置来源，由调用方记录。
    pub fn load_or_default() -> (Self, Option<PathBuf>) {
        if let Ok(config) = Self::from_toml_file("config.toml") {
            return (config, Some(PathBuf::from("config.toml")));
        }

        if let Ok(config) = Self::from_json_file("config.json") {
            return (config, Some(PathBuf::from("config.json")));
        }

        if let Some(home) = env::var_os("HOME") {
            let config_path = PathBuf::from(home)
                .join(".config")
                .join("particle_engine")
                .join("config.toml");

            if let Ok(config) = Self::from_toml_file(&config_path) {
                return (config, Some(config_path));
            }
        }

        (Self::default(), None)
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别（设置了 `RUST_LOG` 时以环境变量为准）
    pub level: LogLevel,

    /// 是否输出目标（target）名称
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            show_target: true,
        }
    }
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    /// 解析不区分大小写的级别名
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// `EnvFilter` 使用的指令字符串
    pub fn as_directive(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.emitters.len(), 1);
    }

    #[test]
    fn test_toml_serialization() {
        let config = EngineConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(
            config.emitters[0].max_particles,
            parsed.emitters[0].max_particles
        );
        assert_eq!(config.camera.field_of_view, parsed.camera.field_of_view);
    }

    #[test]
    fn test_json_serialization() {
        let config = EngineConfig::default();
        let json_str = serde_json::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json_str).unwrap();
        assert_eq!(config.lighting.light_count, parsed.lighting.light_count);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            seed = 42

            [[emitters]]
            max_particles = 4
            max_lifetime = 10.0
            particles_per_second = 1
            start_position = [1.0, 2.0, 3.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.emitters.len(), 1);
        assert_eq!(config.emitters[0].max_particles, 4);
        assert_eq!(config.emitters[0].start_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_reports_emitter_index() {
        let mut config = EngineConfig::default();
        config.emitters.push(EmitterConfig {
            max_particles: 0,
            ..EmitterConfig::default()
        });

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("emitters[1]"));
    }

    #[test]
    fn test_parse_error() {
        let result = EngineConfig::from_toml_str("seed = \"not a number\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("WARN"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse(" debug "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("loud"), None);
        assert_eq!(LogLevel::Trace.as_directive(), "trace");
    }

    #[test]
    fn test_toml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = EngineConfig::default();
        config.seed = 7;
        config.save_toml(&path).unwrap();

        let loaded = EngineConfig::from_toml_file(&path).unwrap();
        assert_eq!(loaded.seed, 7);
    }
}
