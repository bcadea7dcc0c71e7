/// 几何体属性集合
///
/// `Geometry` 保存一个网格的规范化描述：属性名到 `Attribute` 的映射，
/// 以及绘制模式、可选的显式顶点数和调用方的自定义数据。
///
/// # 生命周期
///
/// 构造一次后，`id` 和 `draw_mode` 不再改变；属性映射和显式顶点数
/// 可以通过 `set_attributes` / `set_vertex_count` 继续修改。
///
/// # 线程模型
///
/// 没有内部锁。修改期间由单个调用方独占持有（`&mut self`），
/// 需要跨线程共享时由调用方自行同步。

use std::collections::BTreeMap;

use tracing::debug;

use super::attribute::{Attribute, AttributeInput, AttributeInputs};
use super::buffer::AttributeBuffer;
use super::draw_mode::DrawMode;
use super::normalizer::merge_attributes;
use super::uid;
use crate::core::error::GeometryError;

/// 自动生成 id 时使用的默认前缀
pub const DEFAULT_ID_PREFIX: &str = "geometry";

/// 构造 `Geometry` 的参数
///
/// `attributes` 先于 `extra` 归一化，同名时 `extra` 中的描述符生效。
///
/// # 示例
///
/// ```rust
/// use dist_geometry::geometry::{Geometry, GeometryOptions};
///
/// let geometry = Geometry::new(
///     GeometryOptions::new()
///         .draw_mode("TRIANGLE_STRIP")
///         .attribute("positions", vec![0.0f32; 12]),
/// )?;
/// assert_eq!(geometry.vertex_count(), None);
/// # Ok::<(), dist_geometry::core::GeometryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GeometryOptions {
    pub id: Option<String>,
    pub draw_mode: String,
    pub vertex_count: Option<usize>,
    pub attributes: AttributeInputs,
    pub extra: AttributeInputs,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            id: None,
            draw_mode: DrawMode::default().as_str().to_string(),
            vertex_count: None,
            attributes: AttributeInputs::new(),
            extra: AttributeInputs::new(),
        }
    }
}

impl GeometryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn draw_mode(mut self, token: impl Into<String>) -> Self {
        self.draw_mode = token.into();
        self
    }

    pub fn vertex_count(mut self, count: usize) -> Self {
        self.vertex_count = Some(count);
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, input: impl Into<AttributeInput>) -> Self {
        self.attributes.insert(name.into(), input.into());
        self
    }

    pub fn extra_attribute(mut self, name: impl Into<String>, input: impl Into<AttributeInput>) -> Self {
        self.extra.insert(name.into(), input.into());
        self
    }
}

/// 网格的属性集合
#[derive(Debug, Clone)]
pub struct Geometry {
    id: String,
    draw_mode: DrawMode,
    vertex_count: Option<usize>,
    attributes: BTreeMap<String, Attribute>,
    user_data: BTreeMap<String, toml::Value>,
}

impl Geometry {
    /// 构造几何体
    ///
    /// 先校验绘制模式，再依次归一化 `attributes` 和 `extra`。
    /// 任何一步失败都不会产生对象。
    ///
    /// # 错误
    ///
    /// - `InvalidDrawMode`：绘制模式不在支持集合中
    /// - `MissingValue` / `MissingSize`：某个属性归一化失败
    pub fn new(options: GeometryOptions) -> Result<Self, GeometryError> {
        let draw_mode: DrawMode = options.draw_mode.parse()?;

        let mut geometry = Self {
            id: options.id.unwrap_or_else(|| uid::next_id(DEFAULT_ID_PREFIX)),
            draw_mode,
            vertex_count: options.vertex_count,
            attributes: BTreeMap::new(),
            user_data: BTreeMap::new(),
        };

        geometry.set_attributes(options.attributes)?;
        geometry.set_attributes(options.extra)?;

        debug!(
            id = %geometry.id,
            draw_mode = %geometry.draw_mode,
            attributes = geometry.attributes.len(),
            "Geometry created"
        );

        Ok(geometry)
    }

    /// 以已知绘制模式和一组属性构造，id 自动生成
    pub fn from_attributes<I, K, V>(draw_mode: DrawMode, inputs: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeInput>,
    {
        let mut options = GeometryOptions::new().draw_mode(draw_mode.as_str());
        options.attributes = collect_inputs(inputs);
        Self::new(options)
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    /// 覆盖显式顶点数，不检查与属性数据的一致性
    pub fn set_vertex_count(&mut self, count: usize) {
        self.vertex_count = Some(count);
    }

    /// 清除显式顶点数，恢复为从属性推导
    pub fn clear_vertex_count(&mut self) {
        self.vertex_count = None;
    }

    /// 调用方显式设置的顶点数
    #[inline]
    pub fn explicit_vertex_count(&self) -> Option<usize> {
        self.vertex_count
    }

    /// 顶点数
    ///
    /// 依次取：显式顶点数；`indices` 的元素个数；`vertices` 的元素个数除以 3。
    /// 都没有时返回 `None`，与合法的 0 区分开。
    pub fn vertex_count(&self) -> Option<usize> {
        if let Some(count) = self.vertex_count {
            return Some(count);
        }
        if let Some(indices) = self.attributes.get("indices") {
            return Some(indices.value.len());
        }
        if let Some(vertices) = self.attributes.get("vertices") {
            return Some(vertices.value.len() / 3);
        }
        None
    }

    #[inline]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// 属性的数据
    ///
    /// # 错误
    ///
    /// 属性不存在时返回 `GeometryError::UnknownAttribute`
    pub fn get_attribute(&self, name: &str) -> Result<&AttributeBuffer, GeometryError> {
        self.attributes
            .get(name)
            .map(|attribute| &attribute.value)
            .ok_or_else(|| GeometryError::UnknownAttribute {
                attribute: name.to_string(),
            })
    }

    /// 与 `get_attribute` 相同
    pub fn get_array(&self, name: &str) -> Result<&AttributeBuffer, GeometryError> {
        self.get_attribute(name)
    }

    /// 完整的属性描述符
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// 归一化并合并属性，返回自身以便链式调用
    ///
    /// 同名属性整体替换。失败时已有属性保持不变。
    ///
    /// ```rust
    /// use dist_geometry::geometry::{DrawMode, Geometry};
    ///
    /// let mut geometry = Geometry::from_attributes(DrawMode::Points, [("vertices", vec![0.0f32; 6])])?;
    /// geometry
    ///     .set_attributes([("colors", vec![1.0f32; 6])])?
    ///     .set_vertex_count(2);
    /// assert!(geometry.has_attribute("colors"));
    /// # Ok::<(), dist_geometry::core::GeometryError>(())
    /// ```
    pub fn set_attributes<I, K, V>(&mut self, inputs: I) -> Result<&mut Self, GeometryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeInput>,
    {
        merge_attributes(&mut self.attributes, collect_inputs(inputs))?;
        Ok(self)
    }

    /// 全部属性的只读视图
    ///
    /// 返回的是实时借用；修改必须经过 `set_attributes` 以保持校验不变量。
    #[inline]
    pub fn attributes(&self) -> &BTreeMap<String, Attribute> {
        &self.attributes
    }

    pub fn vertices(&self) -> Option<&Attribute> {
        self.attributes.get("vertices")
    }

    pub fn normals(&self) -> Option<&Attribute> {
        self.attributes.get("normals")
    }

    pub fn colors(&self) -> Option<&Attribute> {
        self.attributes.get("colors")
    }

    pub fn tex_coords(&self) -> Option<&Attribute> {
        self.attributes.get("texCoords")
    }

    pub fn indices(&self) -> Option<&Attribute> {
        self.attributes.get("indices")
    }

    /// 调用方的自定义数据，本库不做解释
    #[inline]
    pub fn user_data(&self) -> &BTreeMap<String, toml::Value> {
        &self.user_data
    }

    #[inline]
    pub fn user_data_mut(&mut self) -> &mut BTreeMap<String, toml::Value> {
        &mut self.user_data
    }
}

fn collect_inputs<I, K, V>(inputs: I) -> AttributeInputs
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<AttributeInput>,
{
    inputs
        .into_iter()
        .map(|(name, input)| (name.into(), input.into()))
        .collect()
}
