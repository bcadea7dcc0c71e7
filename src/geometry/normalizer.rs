/// 属性归一化模块
///
/// 把原始属性输入（裸缓冲区或部分描述符）转换为经过校验的 `Attribute`。
///
/// # 推断顺序
///
/// 1. 裸缓冲区包装为只含 `value` 的描述符
/// 2. 按属性名推断
///    - `indices`：调用方未指定 `type` 时补为 `indices`
///    - `texCoords`：强制 `type = uvs`
///    - `vertices`/`positions`/`colors`/`normals`/`pickingColors`：强制 `size = 3`
/// 3. 按类型推断
///    - `indices`：强制 `size = 1`、`buffer_type = ELEMENT_ARRAY_BUFFER`、`instanced = 0`
///    - `uvs`：强制 `size = 2`
/// 4. 校验 `value` 存在、`size` 为正
///
/// 注意名字规则的不对称：`texCoords` 与位置类名字覆盖调用方的值，
/// 而 `indices` 只填补空缺，调用方给出的 `type` 优先。

use std::collections::BTreeMap;

use tracing::debug;

use super::attribute::{Attribute, AttributeInput, AttributeInputs, AttributeType, BufferType, PartialAttribute};
use crate::core::error::GeometryError;

/// 索引数据使用的缓冲区分类
pub const ELEMENT_BUFFER: BufferType = BufferType::ElementArrayBuffer;

/// 强制 3 分量的属性名
pub const VEC3_ATTRIBUTE_NAMES: [&str; 5] = ["vertices", "positions", "colors", "normals", "pickingColors"];

/// 归一化单个属性
///
/// # 错误
///
/// - `GeometryError::MissingValue`：推断后仍没有数据
/// - `GeometryError::MissingSize`：推断后仍没有正的分量数
///
/// # 示例
///
/// ```rust
/// use dist_geometry::geometry::{normalize_attribute, AttributeInput, BufferType};
///
/// let indices = normalize_attribute("indices", AttributeInput::from(vec![0u16, 1, 2]))?;
/// assert_eq!(indices.size(), 1);
/// assert_eq!(indices.buffer_type(), Some(BufferType::ElementArrayBuffer));
/// # Ok::<(), dist_geometry::core::GeometryError>(())
/// ```
pub fn normalize_attribute(name: &str, input: AttributeInput) -> Result<Attribute, GeometryError> {
    let mut partial = input.into_partial();

    apply_name_rules(name, &mut partial);
    apply_type_rules(&mut partial);

    let value = partial.value.ok_or_else(|| GeometryError::MissingValue {
        attribute: name.to_string(),
    })?;

    let size = partial
        .size
        .filter(|&size| size > 0)
        .ok_or_else(|| GeometryError::MissingSize {
            attribute: name.to_string(),
        })?;

    Ok(Attribute {
        value,
        size,
        attribute_type: partial.attribute_type,
        buffer_type: partial.buffer_type,
        instanced: partial.instanced.unwrap_or(0),
    })
}

/// 归一化一组属性
///
/// 全部成功才返回结果；任何一个失败都直接返回错误，不产生部分结果。
/// 输入按名字顺序处理，因此报告的错误是确定的。
pub fn normalize_attributes(inputs: AttributeInputs) -> Result<BTreeMap<String, Attribute>, GeometryError> {
    inputs
        .into_iter()
        .map(|(name, input)| {
            let attribute = normalize_attribute(&name, input)?;
            Ok((name, attribute))
        })
        .collect()
}

/// 归一化并合并到已有映射
///
/// 同名属性整体替换，不做字段级合并。失败时 `target` 保持不变。
pub fn merge_attributes(
    target: &mut BTreeMap<String, Attribute>,
    inputs: AttributeInputs,
) -> Result<(), GeometryError> {
    let staged = normalize_attributes(inputs)?;

    for (name, attribute) in staged {
        let size = attribute.size;
        let elements = attribute.element_count();
        let replaced = target.insert(name.clone(), attribute).is_some();
        debug!(attribute = %name, size, elements, replaced, "Attribute stored");
    }

    Ok(())
}

fn apply_name_rules(name: &str, partial: &mut PartialAttribute) {
    match name {
        "indices" => {
            let unset = match &partial.attribute_type {
                None => true,
                Some(AttributeType::Custom(tag)) => tag.is_empty(),
                Some(_) => false,
            };
            if unset {
                partial.attribute_type = Some(AttributeType::Indices);
            }
        }
        "texCoords" => {
            if partial.attribute_type.as_ref().is_some_and(|t| *t != AttributeType::Uvs) {
                debug!(attribute = name, "Caller type overridden with uvs");
            }
            partial.attribute_type = Some(AttributeType::Uvs);
        }
        _ if VEC3_ATTRIBUTE_NAMES.contains(&name) => {
            if partial.size.is_some_and(|size| size != 3) {
                debug!(attribute = name, size = ?partial.size, "Caller size overridden with 3");
            }
            partial.size = Some(3);
        }
        _ => {}
    }
}

fn apply_type_rules(partial: &mut PartialAttribute) {
    match partial.attribute_type {
        Some(AttributeType::Indices) => {
            partial.size = Some(1);
            partial.buffer_type = Some(ELEMENT_BUFFER);
            // 索引缓冲区永远不按实例步进
            partial.instanced = Some(0);
        }
        Some(AttributeType::Uvs) => {
            partial.size = Some(2);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::buffer::AttributeBuffer;

    fn floats(count: usize) -> AttributeBuffer {
        AttributeBuffer::from(vec![0.0f32; count])
    }

    #[test]
    fn test_indices_name_infers_everything() {
        let partial = PartialAttribute::new(vec![0u16, 1, 2])
            .with_size(4)
            .with_instanced(3);

        let attribute = normalize_attribute("indices", partial.into()).unwrap();

        assert_eq!(attribute.attribute_type(), Some(&AttributeType::Indices));
        assert_eq!(attribute.size(), 1);
        assert_eq!(attribute.buffer_type(), Some(BufferType::ElementArrayBuffer));
        assert_eq!(attribute.instanced(), 0);
    }

    #[test]
    fn test_indices_name_keeps_caller_type() {
        let partial = PartialAttribute::new(vec![0u32, 1, 2])
            .with_type("foo")
            .with_size(2);

        let attribute = normalize_attribute("indices", partial.into()).unwrap();

        assert_eq!(attribute.attribute_type(), Some(&AttributeType::Custom("foo".to_string())));
        assert_eq!(attribute.size(), 2);
        assert_eq!(attribute.buffer_type(), None);
    }

    #[test]
    fn test_indices_name_without_size_still_needs_type_rule() {
        // 调用方自定义 type 时不再走 indices 类型规则，也就推断不出 size
        let partial = PartialAttribute::new(vec![0u32, 1, 2]).with_type("foo");
        let err = normalize_attribute("indices", partial.into()).unwrap_err();
        assert_eq!(err, GeometryError::MissingSize { attribute: "indices".to_string() });
    }

    #[test]
    fn test_indices_name_treats_empty_type_as_unset() {
        let partial = PartialAttribute::new(vec![0u16]).with_type("");

        let attribute = normalize_attribute("indices", partial.into()).unwrap();

        assert_eq!(attribute.attribute_type(), Some(&AttributeType::Indices));
        assert_eq!(attribute.size(), 1);
        assert_eq!(attribute.buffer_type(), Some(ELEMENT_BUFFER));
        assert_eq!(attribute.instanced(), 0);
    }

    #[test]
    fn test_tex_coords_overrides_caller_type() {
        let partial = PartialAttribute::new(floats(8))
            .with_type("foo")
            .with_size(5);

        let attribute = normalize_attribute("texCoords", partial.into()).unwrap();

        assert_eq!(attribute.attribute_type(), Some(&AttributeType::Uvs));
        assert_eq!(attribute.size(), 2);
    }

    #[test]
    fn test_positional_names_force_size_three() {
        for name in VEC3_ATTRIBUTE_NAMES {
            let bare = normalize_attribute(name, floats(9).into()).unwrap();
            assert_eq!(bare.size(), 3, "{}", name);

            let explicit = normalize_attribute(name, PartialAttribute::new(floats(9)).with_size(7).into()).unwrap();
            assert_eq!(explicit.size(), 3, "{}", name);
        }
    }

    #[test]
    fn test_uvs_type_on_other_name() {
        let partial = PartialAttribute::new(floats(4)).with_type(AttributeType::Uvs);
        let attribute = normalize_attribute("lightmapUvs", partial.into()).unwrap();
        assert_eq!(attribute.size(), 2);
    }

    #[test]
    fn test_indices_type_on_other_name() {
        let partial = PartialAttribute::new(vec![0u8, 1])
            .with_type(AttributeType::Indices)
            .with_instanced(4);
        let attribute = normalize_attribute("wireIndices", partial.into()).unwrap();

        assert_eq!(attribute.size(), 1);
        assert_eq!(attribute.buffer_type(), Some(ELEMENT_BUFFER));
        assert_eq!(attribute.instanced(), 0);
    }

    #[test]
    fn test_unknown_name_passes_fields_through() {
        let partial = PartialAttribute::new(floats(8))
            .with_size(4)
            .with_type("weights")
            .with_buffer_type(BufferType::ArrayBuffer)
            .with_instanced(2);

        let attribute = normalize_attribute("boneWeights", partial.into()).unwrap();

        assert_eq!(attribute.size(), 4);
        assert_eq!(attribute.attribute_type(), Some(&AttributeType::Custom("weights".to_string())));
        assert_eq!(attribute.buffer_type(), Some(BufferType::ArrayBuffer));
        assert_eq!(attribute.instanced(), 2);
    }

    #[test]
    fn test_instanced_defaults_to_zero() {
        let attribute = normalize_attribute("normals", floats(3).into()).unwrap();
        assert_eq!(attribute.instanced(), 0);
        assert_eq!(attribute.buffer_type(), None);
        assert_eq!(attribute.attribute_type(), None);
    }

    #[test]
    fn test_missing_value() {
        let partial = PartialAttribute::default().with_size(3);
        let err = normalize_attribute("positions", partial.into()).unwrap_err();
        assert_eq!(err, GeometryError::MissingValue { attribute: "positions".to_string() });
    }

    #[test]
    fn test_missing_size() {
        let err = normalize_attribute("boneWeights", floats(4).into()).unwrap_err();
        assert_eq!(err, GeometryError::MissingSize { attribute: "boneWeights".to_string() });

        let zero = PartialAttribute::new(floats(4)).with_size(0);
        let err = normalize_attribute("boneWeights", zero.into()).unwrap_err();
        assert!(matches!(err, GeometryError::MissingSize { .. }));
    }

    #[test]
    fn test_merge_failure_leaves_target_untouched() {
        let mut target = BTreeMap::new();
        merge_attributes(&mut target, AttributeInputs::from([
            ("positions".to_string(), floats(9).into()),
        ]))
        .unwrap();

        let result = merge_attributes(&mut target, AttributeInputs::from([
            ("colors".to_string(), floats(9).into()),
            ("weights".to_string(), floats(4).into()),
        ]));

        assert!(result.is_err());
        assert_eq!(target.len(), 1);
        assert!(target.contains_key("positions"));
    }

    #[test]
    fn test_merge_replaces_whole_descriptor() {
        let mut target = BTreeMap::new();
        merge_attributes(&mut target, AttributeInputs::from([(
            "offsets".to_string(),
            PartialAttribute::new(floats(6)).with_size(3).with_instanced(1).into(),
        )]))
        .unwrap();

        merge_attributes(&mut target, AttributeInputs::from([(
            "offsets".to_string(),
            PartialAttribute::new(floats(4)).with_size(2).into(),
        )]))
        .unwrap();

        let offsets = &target["offsets"];
        assert_eq!(offsets.size(), 2);
        assert_eq!(offsets.instanced(), 0);
        assert_eq!(offsets.element_count(), 4);
    }
}
