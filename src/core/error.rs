//! 统一错误处理模块
//!
//! 提供引擎范围内的统一错误类型定义
//!
//! ## 错误类型分层
//!
//! - **配置错误** (`config::ConfigError`): 配置文件读取、解析与参数验证
//! - **渲染错误** (`RenderError`): GPU 资源与渲染后端相关的错误
//!
//! `EngineError` 汇总以上所有错误，供顶层入口使用。

use crate::config::ConfigError;
use thiserror::Error;

/// 引擎核心错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Initialization error: {0}")]
    Init(String),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("General error: {0}")]
    General(String),
}

/// 渲染系统错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Failed to request adapter: no compatible GPU found")]
    NoAdapter,

    #[error("Failed to request device: {0}")]
    DeviceRequest(String),

    #[error("Particle buffer too small: {required} particles required, {available} available")]
    BufferTooSmall { required: usize, available: usize },

    #[error("Invalid render state: {0}")]
    InvalidState(String),
}

/// 引擎结果类型别名
pub type EngineResult<T> = Result<T, EngineError>;
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let config_err = ConfigError::ValidationError("max_particles must be > 0".to_string());
        let engine_err: EngineError = config_err.into();
        assert!(matches!(engine_err, EngineError::Config(_)));

        let render_err = RenderError::NoAdapter;
        let engine_err: EngineError = render_err.into();
        assert!(matches!(engine_err, EngineError::Render(RenderError::NoAdapter)));
    }

    #[test]
    fn test_error_display() {
        let err = RenderError::BufferTooSmall {
            required: 64,
            available: 16,
        };
        assert_eq!(
            err.to_string(),
            "Particle buffer too small: 64 particles required, 16 available"
        );
    }
}
