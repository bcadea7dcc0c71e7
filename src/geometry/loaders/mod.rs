//! 几何体加载器模块
//!
//! 提供统一的加载接口，把文件转换为经过归一化的 `Geometry`。
//!
//! # 支持的格式
//!
//! - **OBJ**: Wavefront OBJ 格式（使用 tobj crate）
//! - **TOML**: 几何体描述文件（见 `geometry::description`）
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use dist_geometry::core::GeometryDefaults;
//! use dist_geometry::geometry::loaders::load_geometry;
//! use std::path::Path;
//!
//! let geometry = load_geometry(Path::new("quad.toml"), &GeometryDefaults::default())?;
//! # Ok::<(), dist_geometry::core::DistGeometryError>(())
//! ```
use crate::core::config::GeometryDefaults;
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::container::Geometry;
use crate::geometry::description::GeometryDescription;
use std::path::Path;

pub mod obj_loader;

pub use obj_loader::ObjLoader;

/// 几何体加载器 trait
///
/// 加载器是无状态的，只返回 CPU 侧的 `Geometry`，不涉及 GPU 资源。
pub trait MeshLoader {
    /// 从文件路径加载
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 文件格式错误或损坏
    /// - 属性归一化失败
    fn load_from_file(path: &Path) -> Result<Geometry>;

    /// 从内存数据加载
    fn load_from_memory(data: &[u8]) -> Result<Geometry>;

    /// 支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// TOML 描述文件加载器
///
/// 通过 trait 加载时使用默认的 `GeometryDefaults`。
pub struct TomlLoader;

impl TomlLoader {
    /// 使用指定的默认值加载
    pub fn load_with_defaults(path: &Path, defaults: &GeometryDefaults) -> Result<Geometry> {
        GeometryDescription::from_file(path)?.into_geometry(defaults)
    }
}

impl MeshLoader for TomlLoader {
    fn load_from_file(path: &Path) -> Result<Geometry> {
        Self::load_with_defaults(path, &GeometryDefaults::default())
    }

    fn load_from_memory(data: &[u8]) -> Result<Geometry> {
        let contents = std::str::from_utf8(data)
            .map_err(|e| MeshLoadError::ParseError(format!("描述文件不是有效的 UTF-8: {}", e)))?;

        GeometryDescription::from_toml_str(contents)?.into_geometry(&GeometryDefaults::default())
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["toml"]
    }
}

/// 根据文件扩展名选择合适的加载器
///
/// TOML 描述文件使用 `defaults` 补齐缺失的 id 和绘制模式。
pub fn load_geometry(path: &Path, defaults: &GeometryDefaults) -> Result<Geometry> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| MeshLoadError::UnsupportedFormat("无法确定文件扩展名".to_string()))?;

    if ObjLoader::supported_extensions().contains(&extension.as_str()) {
        ObjLoader::load_from_file(path)
    } else if TomlLoader::supported_extensions().contains(&extension.as_str()) {
        TomlLoader::load_with_defaults(path, defaults)
    } else {
        Err(MeshLoadError::UnsupportedFormat(format!("不支持的文件格式: .{}", extension)).into())
    }
}
