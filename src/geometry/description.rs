//! 几何体描述文件
//!
//! 以 TOML 描述一个几何体，结构与 `GeometryOptions` 对应。
//!
//! ```toml
//! id = "quad"
//! draw_mode = "TRIANGLES"
//!
//! [attributes]
//! positions = { f32 = [-1.0, -1.0, 0.0,  1.0, -1.0, 0.0,  1.0, 1.0, 0.0,  -1.0, 1.0, 0.0] }
//! texCoords = { f32 = [0.0, 0.0,  1.0, 0.0,  1.0, 1.0,  0.0, 1.0] }
//! indices = { u16 = [0, 1, 2,  0, 2, 3] }
//!
//! # 不在 [attributes] 中的顶层表同样作为属性处理，并且后处理（同名时覆盖）
//! [offsets]
//! value = { f32 = [0.0, 0.0, 0.0] }
//! size = 3
//! instanced = 1
//!
//! [user_data]
//! material = "steel"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::attribute::AttributeInputs;
use super::container::{Geometry, GeometryOptions};
use super::uid;
use crate::core::config::GeometryDefaults;
use crate::core::error::{MeshLoadError, Result};

/// TOML 几何体描述
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeometryDescription {
    #[serde(default)]
    pub id: Option<String>,

    /// 未指定时使用配置中的默认绘制模式
    #[serde(default)]
    pub draw_mode: Option<String>,

    #[serde(default)]
    pub vertex_count: Option<usize>,

    #[serde(default)]
    pub attributes: AttributeInputs,

    #[serde(default)]
    pub user_data: BTreeMap<String, toml::Value>,

    /// 其余顶层键，作为补充属性
    #[serde(flatten)]
    pub extra: AttributeInputs,
}

impl GeometryDescription {
    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| MeshLoadError::ParseError(e.to_string()).into())
    }

    /// 从文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// 构造几何体
    ///
    /// 缺失的 `id` 和 `draw_mode` 从 `defaults` 补齐，`user_data` 原样拷贝。
    pub fn into_geometry(self, defaults: &GeometryDefaults) -> Result<Geometry> {
        let options = GeometryOptions {
            id: Some(self.id.unwrap_or_else(|| uid::next_id(&defaults.id_prefix))),
            draw_mode: self.draw_mode.unwrap_or_else(|| defaults.default_draw_mode.clone()),
            vertex_count: self.vertex_count,
            attributes: self.attributes,
            extra: self.extra,
        };

        let mut geometry = Geometry::new(options)?;
        geometry.user_data_mut().extend(self.user_data);

        info!(
            id = geometry.id(),
            draw_mode = %geometry.draw_mode(),
            attributes = geometry.attributes().len(),
            "Geometry description loaded"
        );

        Ok(geometry)
    }
}
