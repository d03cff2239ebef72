//! OBJ 文件加载器
//!
//! 使用 tobj crate 加载 Wavefront OBJ 格式的3D模型。
//! 物理导出只关心顶点位置与面定义，法线、UV、材质在这里都被丢弃。
use super::MeshLoader;
use crate::core::error::{MeshLoadError, Result};
use crate::core::math::Vector3f;
use crate::scene::mesh::MeshRecord;
use std::path::Path;

/// OBJ 格式加载器
///
/// 实现 `MeshLoader` trait，提供 OBJ 文件的加载功能。
///
/// # 特性
///
/// - 使用 tobj crate 解析 OBJ 文件
/// - 自动三角化（加载结果中的面全部为三角形）
/// - 一个文件包含多个对象时合并为单个网格（索引按顶点偏移重排）
pub struct ObjLoader;

impl ObjLoader {
    fn convert(models: Vec<tobj::Model>) -> Result<MeshRecord> {
        if models.is_empty() {
            return Err(MeshLoadError::ValidationError("OBJ 文件不包含任何模型".to_string()).into());
        }

        let mut record = MeshRecord::new();

        for model in &models {
            let mesh = &model.mesh;
            let positions = &mesh.positions;

            if positions.len() % 3 != 0 {
                return Err(MeshLoadError::InvalidGeometry(format!(
                    "顶点位置数据不完整: {} 个浮点数",
                    positions.len()
                ))
                .into());
            }

            let vertex_start = record.positions.len() as u32;
            for chunk in positions.chunks_exact(3) {
                record.positions.push(Vector3f::new(chunk[0], chunk[1], chunk[2]));
            }

            // triangulate 选项保证索引流是纯三角形
            if mesh.indices.len() % 3 != 0 {
                return Err(MeshLoadError::InvalidGeometry(format!(
                    "三角化后的索引数量不是3的倍数: {}",
                    mesh.indices.len()
                ))
                .into());
            }
            for &index in &mesh.indices {
                record.face_indices.push(vertex_start + index);
            }
            record
                .face_counts
                .extend(std::iter::repeat(3).take(mesh.indices.len() / 3));
        }

        record
            .validate()
            .map_err(MeshLoadError::ValidationError)?;

        tracing::info!(
            "成功加载 OBJ 模型: {} 个顶点, {} 个面",
            record.vertex_count(),
            record.face_count()
        );

        Ok(record)
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<MeshRecord> {
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        let load_options = tobj::LoadOptions {
            triangulate: true,    // 自动三角化
            single_index: true,   // 使用单一索引（简化处理）
            ..Default::default()
        };

        let (models, _materials) = tobj::load_obj(path, &load_options)
            .map_err(|e| MeshLoadError::ParseError(format!("tobj 解析失败: {}", e)))?;

        Self::convert(models)
    }

    fn load_from_memory(data: &[u8]) -> Result<MeshRecord> {
        let load_options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };

        let mut reader = std::io::Cursor::new(data);
        // 物理导出不使用材质，mtllib 引用一律按加载失败处理
        let (models, _materials) =
            tobj::load_obj_buf(&mut reader, &load_options, |_| Err(tobj::LoadError::OpenFileFailed))
                .map_err(|e| MeshLoadError::ParseError(format!("tobj 解析失败: {}", e)))?;

        Self::convert(models)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}
