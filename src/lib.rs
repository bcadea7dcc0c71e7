//! dist_geometry - 顶点属性容器
//!
//! 在上传到图形管线之前描述可渲染的网格数据：
//! 把异构的属性输入归一化为经过校验的规范形式，并推导顶点数、
//! 每顶点分量数和缓冲区用途等隐含属性。
//!
//! 本库不做任何 GPU 上传、着色器绑定或渲染。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `geometry`: 属性归一化、`Geometry` 容器与加载器
//!
//! # 使用示例
//!
//! ```
//! use dist_geometry::geometry::{DrawMode, Geometry};
//!
//! let geometry = Geometry::from_attributes(
//!     DrawMode::Triangles,
//!     [("vertices", vec![0.0f32; 30])],
//! )?;
//! assert_eq!(geometry.vertex_count(), Some(10));
//! # Ok::<(), dist_geometry::core::GeometryError>(())
//! ```

pub mod core;
pub mod geometry;
