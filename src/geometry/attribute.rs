/// 顶点属性描述符模块
///
/// 定义属性的原始输入形式（裸缓冲区或部分填写的描述符）
/// 以及归一化之后的完整描述符。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::buffer::AttributeBuffer;

/// 属性名到原始输入的映射
///
/// 使用有序映射，保证归一化顺序和报错顺序是确定的。
pub type AttributeInputs = BTreeMap<String, AttributeInput>;

/// 属性分类标签
///
/// 只有 `Indices` 和 `Uvs` 会触发推断规则，其他标签原样保留。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttributeType {
    /// 索引数据
    Indices,
    /// 纹理坐标
    Uvs,
    /// 调用方自定义的标签
    Custom(String),
}

impl AttributeType {
    pub fn as_str(&self) -> &str {
        match self {
            AttributeType::Indices => "indices",
            AttributeType::Uvs => "uvs",
            AttributeType::Custom(name) => name,
        }
    }
}

impl From<&str> for AttributeType {
    fn from(value: &str) -> Self {
        match value {
            "indices" => AttributeType::Indices,
            "uvs" => AttributeType::Uvs,
            other => AttributeType::Custom(other.to_string()),
        }
    }
}

impl From<String> for AttributeType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "indices" => AttributeType::Indices,
            "uvs" => AttributeType::Uvs,
            _ => AttributeType::Custom(value),
        }
    }
}

impl From<AttributeType> for String {
    fn from(value: AttributeType) -> Self {
        match value {
            AttributeType::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 缓冲区用途分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BufferType {
    /// 通用顶点属性缓冲区
    ArrayBuffer,
    /// 索引缓冲区
    ElementArrayBuffer,
}

impl BufferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BufferType::ArrayBuffer => "ARRAY_BUFFER",
            BufferType::ElementArrayBuffer => "ELEMENT_ARRAY_BUFFER",
        }
    }
}

/// 部分填写的属性描述符
///
/// 所有字段都是可选的，缺失的字段由归一化过程推断或校验。
///
/// # 示例
///
/// ```rust
/// use dist_geometry::geometry::{AttributeBuffer, PartialAttribute};
///
/// let offsets = PartialAttribute::new(AttributeBuffer::from(vec![0.0f32; 6]))
///     .with_size(3)
///     .with_instanced(1);
/// assert_eq!(offsets.size, Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialAttribute {
    #[serde(default)]
    pub value: Option<AttributeBuffer>,

    /// 每个逻辑元素的分量数
    #[serde(default)]
    pub size: Option<u32>,

    #[serde(default, rename = "type")]
    pub attribute_type: Option<AttributeType>,

    #[serde(default)]
    pub buffer_type: Option<BufferType>,

    /// 实例化步进除数，0 表示逐顶点
    #[serde(default)]
    pub instanced: Option<u32>,
}

impl PartialAttribute {
    /// 以数据创建描述符，其余字段留空
    pub fn new(value: impl Into<AttributeBuffer>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_type(mut self, attribute_type: impl Into<AttributeType>) -> Self {
        self.attribute_type = Some(attribute_type.into());
        self
    }

    pub fn with_buffer_type(mut self, buffer_type: BufferType) -> Self {
        self.buffer_type = Some(buffer_type);
        self
    }

    pub fn with_instanced(mut self, divisor: u32) -> Self {
        self.instanced = Some(divisor);
        self
    }
}

/// 属性的原始输入
///
/// 可以是一个裸数值缓冲区，也可以是部分填写的描述符。
/// 反序列化时先尝试缓冲区形式（单键表 `{ f32 = [...] }`），再尝试描述符形式。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeInput {
    Buffer(AttributeBuffer),
    Descriptor(PartialAttribute),
}

impl AttributeInput {
    /// 输入本身是否就是可以直接使用的数值缓冲区
    #[inline]
    pub fn is_numeric_buffer(&self) -> bool {
        matches!(self, AttributeInput::Buffer(_))
    }

    /// 转换为描述符形式，裸缓冲区只填写 `value`
    pub fn into_partial(self) -> PartialAttribute {
        match self {
            AttributeInput::Buffer(buffer) => PartialAttribute {
                value: Some(buffer),
                ..Default::default()
            },
            AttributeInput::Descriptor(partial) => partial,
        }
    }
}

impl From<AttributeBuffer> for AttributeInput {
    fn from(buffer: AttributeBuffer) -> Self {
        AttributeInput::Buffer(buffer)
    }
}

impl From<PartialAttribute> for AttributeInput {
    fn from(partial: PartialAttribute) -> Self {
        AttributeInput::Descriptor(partial)
    }
}

impl<T> From<Vec<T>> for AttributeInput
where
    AttributeBuffer: From<Vec<T>>,
{
    fn from(data: Vec<T>) -> Self {
        AttributeInput::Buffer(data.into())
    }
}

/// 归一化后的属性描述符
///
/// 不变量：`value` 一定存在，`size` 一定大于 0。
/// 只能通过归一化过程构造。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub(crate) value: AttributeBuffer,
    pub(crate) size: u32,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub(crate) attribute_type: Option<AttributeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) buffer_type: Option<BufferType>,
    pub(crate) instanced: u32,
}

impl Attribute {
    #[inline]
    pub fn value(&self) -> &AttributeBuffer {
        &self.value
    }

    /// 每个逻辑元素的分量数
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn attribute_type(&self) -> Option<&AttributeType> {
        self.attribute_type.as_ref()
    }

    #[inline]
    pub fn buffer_type(&self) -> Option<BufferType> {
        self.buffer_type
    }

    #[inline]
    pub fn instanced(&self) -> u32 {
        self.instanced
    }

    /// 数据中的数值个数
    #[inline]
    pub fn element_count(&self) -> usize {
        self.value.len()
    }

    /// 按 `size` 分组后的逻辑元素个数（截断）
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.value.len() / self.size as usize
    }

    /// 相邻两个逻辑元素之间的字节跨度
    #[inline]
    pub fn byte_stride(&self) -> usize {
        self.size as usize * self.value.bytes_per_element()
    }

    /// 是否按实例步进
    #[inline]
    pub fn is_instanced(&self) -> bool {
        self.instanced > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_type_from_str() {
        assert_eq!(AttributeType::from("indices"), AttributeType::Indices);
        assert_eq!(AttributeType::from("uvs"), AttributeType::Uvs);
        assert_eq!(AttributeType::from("foo"), AttributeType::Custom("foo".to_string()));
        assert_eq!(String::from(AttributeType::Custom("foo".to_string())), "foo");
    }

    #[test]
    fn test_buffer_input_is_numeric_buffer() {
        let input = AttributeInput::from(vec![0.0f32, 1.0]);
        assert!(input.is_numeric_buffer());

        let partial = input.into_partial();
        assert_eq!(partial.value, Some(AttributeBuffer::F32(vec![0.0, 1.0])));
        assert!(partial.size.is_none());
        assert!(partial.attribute_type.is_none());
    }

    #[test]
    fn test_descriptor_input_is_not_numeric_buffer() {
        let input = AttributeInput::from(PartialAttribute::default().with_size(4));
        assert!(!input.is_numeric_buffer());
    }

    #[test]
    fn test_deserialize_buffer_or_descriptor() {
        #[derive(Deserialize)]
        struct Holder {
            attributes: AttributeInputs,
        }

        let holder: Holder = toml::from_str(
            r#"
            [attributes]
            positions = { f32 = [0.0, 0.0, 0.0] }
            weights = { value = { f32 = [0.5, 0.5] }, size = 2, type = "foo", buffer_type = "ARRAY_BUFFER", instanced = 1 }
            "#,
        )
        .unwrap();

        assert!(holder.attributes["positions"].is_numeric_buffer());

        match &holder.attributes["weights"] {
            AttributeInput::Descriptor(partial) => {
                assert_eq!(partial.size, Some(2));
                assert_eq!(partial.attribute_type, Some(AttributeType::Custom("foo".to_string())));
                assert_eq!(partial.buffer_type, Some(BufferType::ArrayBuffer));
                assert_eq!(partial.instanced, Some(1));
            }
            other => panic!("expected descriptor, got {:?}", other),
        }
    }

    #[test]
    fn test_attribute_derived_values() {
        let attribute = Attribute {
            value: AttributeBuffer::from(vec![0.0f32; 10]),
            size: 3,
            attribute_type: None,
            buffer_type: None,
            instanced: 2,
        };

        assert_eq!(attribute.element_count(), 10);
        assert_eq!(attribute.vertex_count(), 3);
        assert_eq!(attribute.byte_stride(), 12);
        assert!(attribute.is_instanced());
    }
}
