/// OBJ 文件加载器
///
/// 使用 tobj crate 加载 Wavefront OBJ 格式的模型，并转换为 `Geometry`。
/// 多个对象会按顺序拼接到同一组属性中。
use super::MeshLoader;
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::attribute::AttributeInputs;
use crate::geometry::container::{Geometry, GeometryOptions};
use crate::geometry::draw_mode::DrawMode;
use std::io::Cursor;
use std::path::Path;

/// OBJ 格式加载器
///
/// # 生成的属性
///
/// - `positions`：所有对象的顶点位置
/// - `normals`：所有对象都带法线时才生成
/// - `texCoords`：所有对象都带 UV 时才生成（V 轴翻转：1.0 - v）
/// - `indices`：u32 索引，已按对象偏移
///
/// 绘制模式固定为 `TRIANGLES`，id 为文件名（不含扩展名）。
///
/// # 使用示例
///
/// ```rust,no_run
/// use dist_geometry::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let geometry = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// println!("顶点数: {:?}", geometry.vertex_count());
/// # Ok::<(), dist_geometry::core::DistGeometryError>(())
/// ```
pub struct ObjLoader;

impl ObjLoader {
    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: true,    // 自动三角化
            single_index: true,   // 位置、法线、UV 共用一套索引
            ..Default::default()
        }
    }

    fn build_geometry(id: &str, models: &[tobj::Model]) -> Result<Geometry> {
        if models.is_empty() {
            return Err(MeshLoadError::InvalidGeometry("OBJ 文件不包含任何模型".to_string()).into());
        }

        let mut positions: Vec<f32> = Vec::new();
        let mut normals: Vec<f32> = Vec::new();
        let mut texcoords: Vec<f32> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut has_normals = true;
        let mut has_texcoords = true;

        for model in models {
            let mesh = &model.mesh;

            if mesh.positions.len() % 3 != 0 {
                return Err(MeshLoadError::InvalidGeometry(
                    format!("顶点位置数据不完整: {} 个浮点数", mesh.positions.len())
                ).into());
            }

            let vertex_start = (positions.len() / 3) as u32;
            let vertex_count = mesh.positions.len() / 3;

            positions.extend_from_slice(&mesh.positions);

            if mesh.normals.len() == vertex_count * 3 {
                normals.extend_from_slice(&mesh.normals);
            } else {
                has_normals = false;
            }

            if mesh.texcoords.len() == vertex_count * 2 {
                for uv in mesh.texcoords.chunks_exact(2) {
                    texcoords.push(uv[0]);
                    texcoords.push(1.0 - uv[1]);  // 翻转V坐标
                }
            } else {
                has_texcoords = false;
            }

            for &index in &mesh.indices {
                if index as usize >= vertex_count {
                    return Err(MeshLoadError::InvalidGeometry(format!(
                        "对象 '{}' 的索引 {} 超出顶点范围 (0-{})",
                        model.name,
                        index,
                        vertex_count.saturating_sub(1)
                    )).into());
                }
                indices.push(vertex_start + index);
            }
        }

        let mut attributes = AttributeInputs::new();
        attributes.insert("positions".to_string(), positions.into());
        attributes.insert("indices".to_string(), indices.into());

        if has_normals {
            attributes.insert("normals".to_string(), normals.into());
        } else {
            tracing::warn!(id, "OBJ 文件缺少法线数据，跳过 normals 属性");
        }

        if has_texcoords {
            attributes.insert("texCoords".to_string(), texcoords.into());
        } else {
            tracing::warn!(id, "OBJ 文件缺少UV坐标，跳过 texCoords 属性");
        }

        let options = GeometryOptions {
            id: Some(id.to_string()),
            draw_mode: DrawMode::Triangles.as_str().to_string(),
            attributes,
            ..Default::default()
        };

        let geometry = Geometry::new(options)?;

        tracing::info!(
            "成功加载 OBJ: {} 个对象, {} 个属性, 顶点数 {:?}",
            models.len(),
            geometry.attributes().len(),
            geometry.vertex_count()
        );

        Ok(geometry)
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<Geometry> {
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        let (models, _materials) = tobj::load_obj(path, &Self::load_options())
            .map_err(|e| MeshLoadError::ParseError(format!("tobj 解析失败: {}", e)))?;

        let id = path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed");

        Self::build_geometry(id, &models)
    }

    fn load_from_memory(data: &[u8]) -> Result<Geometry> {
        let mut reader = Cursor::new(data);

        // 内存中的 OBJ 无法解析 mtllib 引用，材质直接忽略
        let (models, _materials) = tobj::load_obj_buf(&mut reader, &Self::load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|e| MeshLoadError::ParseError(format!("tobj 解析失败: {}", e)))?;

        Self::build_geometry("obj", &models)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}
