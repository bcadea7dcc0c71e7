//! 几何体属性模块
//!
//! 把异构的属性输入（裸数值缓冲区或部分描述符）归一化为经过校验的属性描述符，
//! 并推导下游渲染需要的隐含信息（顶点数、分量数、缓冲区用途）。
//!
//! # 模块结构
//!
//! - `buffer`: 同构数值缓冲区
//! - `attribute`: 属性输入与归一化后的描述符
//! - `normalizer`: 名字推断、类型推断与校验
//! - `draw_mode`: 图元绘制模式
//! - `container`: 属性集合 `Geometry`
//! - `description`: TOML 几何体描述
//! - `loaders`: 文件加载器
//!
//! # 架构设计
//!
//! ```text
//! 原始输入 (缓冲区 / 部分描述符 / 文件)
//!     ↓
//! normalizer (推断 + 校验)
//!     ↓
//! Geometry (CPU侧规范描述)
//!     ↓
//! 渲染器 (上传到GPU，不在本库范围内)
//! ```
//!
//! # 使用示例
//!
//! ```rust
//! use dist_geometry::geometry::{Geometry, GeometryOptions, PartialAttribute};
//!
//! let geometry = Geometry::new(
//!     GeometryOptions::new()
//!         .id("triangle")
//!         .attribute("vertices", vec![0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
//!         .attribute("texCoords", vec![0.0f32, 0.0, 1.0, 0.0, 0.0, 1.0])
//!         .attribute("indices", vec![0u16, 1, 2])
//!         .attribute("offsets", PartialAttribute::new(vec![0.0f32; 3]).with_size(3).with_instanced(1)),
//! )?;
//!
//! assert_eq!(geometry.vertex_count(), Some(3));
//! assert_eq!(geometry.tex_coords().unwrap().size(), 2);
//! # Ok::<(), dist_geometry::core::GeometryError>(())
//! ```

pub mod buffer;
pub mod attribute;
pub mod normalizer;
pub mod draw_mode;
pub mod uid;
pub mod container;
pub mod description;
pub mod loaders;

// 重新导出常用类型
pub use buffer::AttributeBuffer;
pub use attribute::{Attribute, AttributeInput, AttributeInputs, AttributeType, BufferType, PartialAttribute};
pub use normalizer::{normalize_attribute, normalize_attributes, ELEMENT_BUFFER};
pub use draw_mode::DrawMode;
pub use container::{Geometry, GeometryOptions};
pub use description::GeometryDescription;
