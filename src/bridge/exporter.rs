//! 几何导出模块
//!
//! 加载阶段运行一次：遍历场景图，把每个可导出的网格写成一个 OBJ
//! 几何文件，并在场景描述中登记对应的资产条目与独立刚体条目。
//!
//! # 可导出判定
//!
//! 节点携带网格，且包围盒深度（z 方向尺寸）超过退化阈值。纯平面
//! 几何没有可用的实体形状，被静默排除，不算错误。
//!
//! # 命名约定
//!
//! 资产名 `mesh_<N>` 由会话内单调计数器生成，按遍历顺序无间隙递增，
//! 一次导出内不复用。该名称是几何文件名、描述资产条目和刚体容器名
//! （`mesh_<N>_body`）之间的连接键。

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::scene::graph::{NodeId, SceneGraph};
use crate::scene::mesh::MeshRecord;
use super::descriptor::SceneDescriptor;

/// 持久化的几何资产
///
/// 创建后不再变更；`source_path` 记录几何来自哪个场景节点，
/// 供后续按约定构建绑定表。
#[derive(Debug, Clone)]
pub struct GeometryAsset {
    /// 资产名（`mesh_<N>`）
    pub name: String,

    /// 写出的几何文件路径
    pub file: PathBuf,

    /// 来源场景节点路径
    pub source_path: String,
}

/// 一次导出的结果汇总
#[derive(Debug, Default)]
pub struct ExportReport {
    /// 成功写出的资产（遍历顺序）
    pub assets: Vec<GeometryAsset>,

    /// 因面形状不受支持被逐面跳过的面数
    pub skipped_faces: usize,

    /// 因写文件失败或数据无效被整体跳过的网格数
    pub failed_meshes: usize,
}

impl ExportReport {
    /// 获取成功导出的资产数量
    pub fn exported(&self) -> usize {
        self.assets.len()
    }
}

/// 几何导出器
///
/// 持有输出目录与会话级资产计数器。导出在加载阶段恰好运行一次，
/// 会话中途重新导出不受支持。
pub struct GeometryExporter {
    output_dir: PathBuf,
    counter: usize,
}

impl GeometryExporter {
    /// 创建导出器
    ///
    /// # 参数
    ///
    /// - `output_dir`: 几何文件的输出目录（不存在时在导出时创建）
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            counter: 0,
        }
    }

    /// 导出场景图中的全部可导出网格
    ///
    /// 确定性前序遍历，每个节点访问一次。每个可导出网格写一个 OBJ
    /// 文件并在描述中登记资产条目；全部网格处理完后，再为每个资产
    /// 追加一条原点放置的独立刚体条目。
    ///
    /// 单个几何文件写失败只跳过该网格（记录警告并继续）；输出目录
    /// 无法创建则整体失败。
    ///
    /// # 返回
    ///
    /// - `Ok(ExportReport)`: 汇总（成功资产数只计写出成功的）
    /// - `Err(SimBridgeError)`: 输出目录创建失败
    pub fn export(
        &mut self,
        graph: &SceneGraph,
        start: NodeId,
        descriptor: &mut SceneDescriptor,
    ) -> Result<ExportReport> {
        fs::create_dir_all(&self.output_dir)?;

        let mut report = ExportReport::default();

        for id in graph.pre_order(start) {
            let node = graph.node(id);
            let Some(mesh) = node.mesh.as_ref() else {
                continue;
            };

            if mesh.is_depth_degenerate() {
                // 刻意的排除过滤，不是错误
                tracing::trace!(node = %node.path(), "Flat mesh excluded from export");
                continue;
            }

            if let Err(e) = mesh.validate() {
                tracing::warn!(node = %node.path(), "Skipping invalid mesh: {}", e);
                report.failed_meshes += 1;
                continue;
            }

            let name = format!("mesh_{}", self.counter);
            let file = self.output_dir.join(format!("{}.obj", name));

            match write_obj(&file, mesh) {
                Ok(skipped) => {
                    report.skipped_faces += skipped;
                    descriptor.add_asset(&name, &file);
                    report.assets.push(GeometryAsset {
                        name,
                        file,
                        source_path: node.path().to_string(),
                    });
                    self.counter += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        node = %node.path(),
                        file = %file.display(),
                        "Failed to write geometry file: {}",
                        e
                    );
                    report.failed_meshes += 1;
                }
            }
        }

        // 全部网格处理完后再登记独立刚体条目
        for asset in &report.assets {
            descriptor.add_body(format!("{}_body", asset.name), &asset.name);
        }

        tracing::info!(
            exported = report.exported(),
            skipped_faces = report.skipped_faces,
            failed_meshes = report.failed_meshes,
            "Geometry export finished"
        );

        Ok(report)
    }
}

/// 把网格写成 OBJ 文本
///
/// 顶点按原始顺序一行一个；面三角化后写出，索引在写出时转为 1 基。
/// 四边形沿固定对角线拆分：四边形顶点 (0,1,2,3) 产出三角形 (0,1,2)
/// 与 (0,2,3)，保持原始绕向。其余顶点数的面逐面跳过。
///
/// # 返回
///
/// 成功时返回被跳过的面数。
fn write_obj(path: &Path, mesh: &MeshRecord) -> io::Result<usize> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    for p in &mesh.positions {
        writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
    }

    let mut skipped = 0;
    let mut idx = 0usize;
    for &count in &mesh.face_counts {
        let count = count as usize;
        let face = &mesh.face_indices[idx..idx + count];
        match count {
            3 => {
                writeln!(w, "f {} {} {}", face[0] + 1, face[1] + 1, face[2] + 1)?;
            }
            4 => {
                writeln!(w, "f {} {} {}", face[0] + 1, face[1] + 1, face[2] + 1)?;
                writeln!(w, "f {} {} {}", face[0] + 1, face[2] + 1, face[3] + 1)?;
            }
            _ => {
                tracing::warn!("Skipping polygon with {} vertices", count);
                skipped += 1;
            }
        }
        idx += count;
    }

    w.flush()?;
    Ok(skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Vector3f;
    use crate::scene::loaders::{MeshLoader, ObjLoader};

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("sim_bridge_tests").join(name);
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn solid_mesh(face_counts: Vec<u32>, face_indices: Vec<u32>) -> MeshRecord {
        // 顶点分布保证 z 方向尺寸非零
        let positions = (0..8)
            .map(|i| {
                Vector3f::new(
                    (i & 1) as f32,
                    ((i >> 1) & 1) as f32,
                    ((i >> 2) & 1) as f32,
                )
            })
            .collect();
        MeshRecord { positions, face_counts, face_indices }
    }

    fn flat_mesh() -> MeshRecord {
        MeshRecord {
            positions: vec![
                Vector3f::new(0.0, 0.0, 0.0),
                Vector3f::new(1.0, 0.0, 0.0),
                Vector3f::new(0.0, 1.0, 0.0),
            ],
            face_counts: vec![3],
            face_indices: vec![0, 1, 2],
        }
    }

    fn graph_with_meshes(meshes: Vec<MeshRecord>) -> SceneGraph {
        let mut graph = SceneGraph::new();
        let world = graph.add_node(graph.root(), "World").unwrap();
        for (i, mesh) in meshes.into_iter().enumerate() {
            let id = graph.add_node(world, &format!("m{}", i)).unwrap();
            graph.node_mut(id).mesh = Some(mesh);
        }
        graph
    }

    #[test]
    fn test_triangle_faces_export_one_to_one() {
        let dir = test_dir("tri_one_to_one");
        let graph = graph_with_meshes(vec![solid_mesh(
            vec![3, 3],
            vec![0, 1, 2, 4, 5, 6],
        )]);

        let mut descriptor = SceneDescriptor::new("scene");
        let mut exporter = GeometryExporter::new(&dir);
        let report = exporter.export(&graph, graph.root(), &mut descriptor).unwrap();

        assert_eq!(report.exported(), 1);
        assert_eq!(report.skipped_faces, 0);

        // 导出文件可以被 tobj 读回，三角形数与输入面数一致
        let loaded = ObjLoader::load_from_file(&report.assets[0].file).unwrap();
        assert_eq!(loaded.face_count(), 2);
        assert_eq!(loaded.vertex_count(), 8);
    }

    #[test]
    fn test_quad_splits_along_fixed_diagonal() {
        let dir = test_dir("quad_diagonal");
        let graph = graph_with_meshes(vec![solid_mesh(vec![4], vec![0, 1, 2, 3])]);

        let mut descriptor = SceneDescriptor::new("scene");
        let mut exporter = GeometryExporter::new(&dir);
        let report = exporter.export(&graph, graph.root(), &mut descriptor).unwrap();

        let contents = fs::read_to_string(&report.assets[0].file).unwrap();
        let faces: Vec<&str> = contents
            .lines()
            .filter(|l| l.starts_with("f "))
            .collect();
        // 1 基索引下恰好是 (1,2,3) 与 (1,3,4)
        assert_eq!(faces, vec!["f 1 2 3", "f 1 3 4"]);
    }

    #[test]
    fn test_unsupported_polygon_skipped_per_face() {
        let dir = test_dir("pentagon_skip");
        // 一个五边形 + 一个三角形
        let graph = graph_with_meshes(vec![solid_mesh(
            vec![5, 3],
            vec![0, 1, 2, 3, 4, 4, 5, 6],
        )]);

        let mut descriptor = SceneDescriptor::new("scene");
        let mut exporter = GeometryExporter::new(&dir);
        let report = exporter.export(&graph, graph.root(), &mut descriptor).unwrap();

        assert_eq!(report.exported(), 1);
        assert_eq!(report.skipped_faces, 1);

        let contents = fs::read_to_string(&report.assets[0].file).unwrap();
        let face_lines = contents.lines().filter(|l| l.starts_with("f ")).count();
        assert_eq!(face_lines, 1);
    }

    #[test]
    fn test_flat_mesh_produces_no_output() {
        let dir = test_dir("flat_excluded");
        let graph = graph_with_meshes(vec![flat_mesh()]);

        let mut descriptor = SceneDescriptor::new("scene");
        let mut exporter = GeometryExporter::new(&dir);
        let report = exporter.export(&graph, graph.root(), &mut descriptor).unwrap();

        assert_eq!(report.exported(), 0);
        assert!(descriptor.assets.is_empty());
        assert!(descriptor.bodies.is_empty());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_names_are_gapless_in_traversal_order() {
        let dir = test_dir("gapless_names");
        // 中间夹一个退化网格，名称仍然无间隙
        let graph = graph_with_meshes(vec![
            solid_mesh(vec![3], vec![0, 1, 6]),
            flat_mesh(),
            solid_mesh(vec![3], vec![0, 2, 5]),
            solid_mesh(vec![3], vec![1, 3, 4]),
        ]);

        let mut descriptor = SceneDescriptor::new("scene");
        let mut exporter = GeometryExporter::new(&dir);
        let report = exporter.export(&graph, graph.root(), &mut descriptor).unwrap();

        let names: Vec<&str> = report.assets.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["mesh_0", "mesh_1", "mesh_2"]);

        // 来源顺序与遍历顺序一致
        let sources: Vec<&str> = report.assets.iter().map(|a| a.source_path.as_str()).collect();
        assert_eq!(sources, vec!["/World/m0", "/World/m2", "/World/m3"]);
    }

    #[test]
    fn test_body_entries_follow_asset_entries() {
        let dir = test_dir("body_entries");
        let graph = graph_with_meshes(vec![
            solid_mesh(vec![3], vec![0, 1, 6]),
            solid_mesh(vec![3], vec![0, 2, 5]),
        ]);

        let mut descriptor = SceneDescriptor::new("scene");
        let mut exporter = GeometryExporter::new(&dir);
        exporter.export(&graph, graph.root(), &mut descriptor).unwrap();

        assert_eq!(descriptor.bodies.len(), 2);
        assert_eq!(descriptor.bodies[0].name, "mesh_0_body");
        assert_eq!(descriptor.bodies[0].mesh, "mesh_0");
        assert_eq!(descriptor.bodies[1].name, "mesh_1_body");
    }

    #[test]
    fn test_vertex_indices_within_range_before_conversion() {
        let mesh = solid_mesh(vec![3, 3], vec![0, 1, 2, 4, 5, 6]);
        let max = *mesh.face_indices.iter().max().unwrap() as usize;
        assert!(max <= mesh.vertex_count() - 1);
        assert!(mesh.validate().is_ok());
    }
}
