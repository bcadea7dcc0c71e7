//! 核心功能模块
//!
//! 本模块提供与几何数据无关的基础设施：日志系统、配置管理和错误处理。
//!
//! # 模块组织
//!
//! - `log`：日志系统，基于 `tracing` 的结构化日志
//! - `config`：配置管理，支持从 TOML 文件加载并由命令行覆盖
//! - `error`：错误处理，定义统一的错误类型

pub mod log;
pub mod config;
pub mod error;

// 重新导出常用类型，方便使用
pub use config::{Config, GeometryDefaults, LogLevel, LoggingConfig};
pub use error::{ConfigError, DistGeometryError, GeometryError, MeshLoadError, Result};
