/// 数值缓冲区模块
///
/// 定义属性数据使用的同构数值数组。每个缓冲区只包含一种固定宽度的元素类型，
/// 可以直接作为 GPU 上传数据使用（通过 `as_bytes` 获取零拷贝字节视图）。

use serde::{Deserialize, Serialize};

/// 同构数值缓冲区
///
/// 对应 GPU 可以直接读取的类型化数组。序列化时使用外部标签，
/// 在 TOML 中写作 `{ f32 = [0.0, 1.0, 2.0] }`。
///
/// # 示例
///
/// ```rust
/// use dist_geometry::geometry::AttributeBuffer;
///
/// let buffer = AttributeBuffer::from(vec![0.0f32, 1.0, 2.0]);
/// assert_eq!(buffer.len(), 3);
/// assert_eq!(buffer.bytes_per_element(), 4);
/// assert_eq!(buffer.as_bytes().len(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeBuffer {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// 对每种元素类型执行同一表达式
macro_rules! each_buffer {
    ($buffer:expr, $data:ident => $body:expr) => {
        match $buffer {
            AttributeBuffer::I8($data) => $body,
            AttributeBuffer::U8($data) => $body,
            AttributeBuffer::I16($data) => $body,
            AttributeBuffer::U16($data) => $body,
            AttributeBuffer::I32($data) => $body,
            AttributeBuffer::U32($data) => $body,
            AttributeBuffer::F32($data) => $body,
            AttributeBuffer::F64($data) => $body,
        }
    };
}

impl AttributeBuffer {
    /// 元素数量（不是字节数）
    #[inline]
    pub fn len(&self) -> usize {
        each_buffer!(self, data => data.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 单个元素的字节宽度
    #[inline]
    pub fn bytes_per_element(&self) -> usize {
        match self {
            AttributeBuffer::I8(_) | AttributeBuffer::U8(_) => 1,
            AttributeBuffer::I16(_) | AttributeBuffer::U16(_) => 2,
            AttributeBuffer::I32(_) | AttributeBuffer::U32(_) | AttributeBuffer::F32(_) => 4,
            AttributeBuffer::F64(_) => 8,
        }
    }

    /// 总字节数
    #[inline]
    pub fn byte_length(&self) -> usize {
        self.as_bytes().len()
    }

    /// 元素类型名称
    pub fn component_type(&self) -> &'static str {
        match self {
            AttributeBuffer::I8(_) => "i8",
            AttributeBuffer::U8(_) => "u8",
            AttributeBuffer::I16(_) => "i16",
            AttributeBuffer::U16(_) => "u16",
            AttributeBuffer::I32(_) => "i32",
            AttributeBuffer::U32(_) => "u32",
            AttributeBuffer::F32(_) => "f32",
            AttributeBuffer::F64(_) => "f64",
        }
    }

    /// 零拷贝的字节视图，用于上传前的数据准备
    pub fn as_bytes(&self) -> &[u8] {
        each_buffer!(self, data => bytemuck::cast_slice(data.as_slice()))
    }
}

macro_rules! impl_from_vec {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for AttributeBuffer {
                fn from(data: Vec<$ty>) -> Self {
                    AttributeBuffer::$variant(data)
                }
            }

            impl From<&[$ty]> for AttributeBuffer {
                fn from(data: &[$ty]) -> Self {
                    AttributeBuffer::$variant(data.to_vec())
                }
            }
        )*
    };
}

impl_from_vec! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    f32 => F32,
    f64 => F64,
}
