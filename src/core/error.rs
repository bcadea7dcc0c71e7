//! 错误处理模块
//!
//! 定义了库中使用的统一错误类型，使用 `thiserror` 提供友好的错误消息。
//!
//! # 设计原则
//!
//! - 使用 `thiserror` 自动实现 `Error` trait
//! - 为每种错误类型提供清晰的上下文信息（出错的属性名、绘制模式等）
//! - 校验失败立即返回，不做任何默认值替换
//! - 易于模式匹配和错误处理

use std::path::PathBuf;
use thiserror::Error;

/// 库统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, DistGeometryError>;

/// dist_geometry 的错误类型
#[derive(Debug, Error)]
pub enum DistGeometryError {
    /// 几何体构建或查询错误
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 网格加载错误
    #[error("Mesh loading error: {0}")]
    MeshLoading(#[from] MeshLoadError),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 日志系统错误
    #[error("Log error: {0}")]
    Log(String),
}

/// 几何体相关的错误
///
/// 这些错误都属于调用方的前置条件违规，不可重试。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// 绘制模式不在支持的集合中
    #[error("Geometry: illegal draw mode '{mode}'")]
    InvalidDrawMode { mode: String },

    /// 属性归一化后缺少数据
    #[error("attribute {attribute} needs value")]
    MissingValue { attribute: String },

    /// 属性归一化后缺少正的分量数
    #[error("attribute {attribute} needs size")]
    MissingSize { attribute: String },

    /// 查询了不存在的属性
    #[error("unknown attribute '{attribute}'")]
    UnknownAttribute { attribute: String },
}

/// 配置相关的错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件未找到
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    /// 配置文件解析失败
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// 配置值无效
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 网格加载相关的错误
#[derive(Debug, Error)]
pub enum MeshLoadError {
    /// 文件不存在
    #[error("Mesh file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    #[error("Unsupported mesh format: {0}")]
    UnsupportedFormat(String),

    /// 解析失败
    #[error("Failed to parse mesh: {0}")]
    ParseError(String),

    /// 几何数据无效
    #[error("Invalid geometry data: {0}")]
    InvalidGeometry(String),
}

impl DistGeometryError {
    /// 如果是几何体错误则返回其引用
    pub fn as_geometry(&self) -> Option<&GeometryError> {
        match self {
            DistGeometryError::Geometry(e) => Some(e),
            _ => None,
        }
    }
}
