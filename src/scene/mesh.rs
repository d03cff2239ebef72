//! 网格数据结构模块
//!
//! 定义导出阶段使用的网格快照容器。与渲染用顶点缓冲不同，这里只保留
//! 物理导出需要的最小数据：顶点位置与面定义。
//!
//! 面定义采用"面顶点数 + 扁平索引"两个数组的形式：`face_counts[i]`
//! 给出第 i 个面的顶点数，对应的顶点索引依次排布在 `face_indices` 中。
//! 三角形和四边形可以导出，其余面在导出时被逐面跳过。

use crate::core::math::{constants::DEPTH_EPSILON, Vector3f};

/// 可导出表面的只读快照
///
/// 导出时从场景节点的几何属性派生，内部索引始终为 0 基；
/// 几何文件的 1 基转换在写出时才进行。
///
/// # 示例
///
/// ```rust
/// use sim_bridge::scene::mesh::MeshRecord;
/// use nalgebra::Vector3;
///
/// // 一个三角形
/// let mesh = MeshRecord {
///     positions: vec![
///         Vector3::new(0.0, 0.0, 0.0),
///         Vector3::new(1.0, 0.0, 0.0),
///         Vector3::new(0.0, 0.0, 1.0),
///     ],
///     face_counts: vec![3],
///     face_indices: vec![0, 1, 2],
/// };
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeshRecord {
    /// 顶点位置数组（原始顺序）
    pub positions: Vec<Vector3f>,

    /// 每个面的顶点数
    pub face_counts: Vec<u32>,

    /// 所有面的顶点索引，按面依次排布
    pub face_indices: Vec<u32>,
}

impl MeshRecord {
    /// 创建一个空的网格快照
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// 获取面数量
    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_counts.len()
    }

    /// 计算包围盒（min/max 顶点对）
    ///
    /// # 返回
    ///
    /// - `Some((min, max))`: 网格至少有一个顶点
    /// - `None`: 空网格
    pub fn extent(&self) -> Option<(Vector3f, Vector3f)> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for p in &self.positions[1..] {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some((min, max))
    }

    /// 判断网格沿深度方向（z）是否退化
    ///
    /// 深度尺寸不超过 [`DEPTH_EPSILON`] 的网格被视为纯平面几何，
    /// 没有可用的实体形状。空网格同样视为退化。
    pub fn is_depth_degenerate(&self) -> bool {
        match self.extent() {
            Some((min, max)) => (max.z - min.z) < DEPTH_EPSILON,
            None => true,
        }
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 面顶点数总和与索引数组长度一致
    /// - 所有索引都在有效范围内
    ///
    /// # 返回
    ///
    /// - `Ok(())`: 数据有效
    /// - `Err(String)`: 数据无效，返回错误描述
    pub fn validate(&self) -> Result<(), String> {
        let total: usize = self.face_counts.iter().map(|&c| c as usize).sum();
        if total != self.face_indices.len() {
            return Err(format!(
                "face counts sum to {} vertices but {} indices are present",
                total,
                self.face_indices.len()
            ));
        }

        let vertex_count = self.positions.len() as u32;
        for (i, &index) in self.face_indices.iter().enumerate() {
            if index >= vertex_count {
                return Err(format!(
                    "index {} at position {} exceeds vertex range (0-{})",
                    index,
                    i,
                    vertex_count.saturating_sub(1)
                ));
            }
        }

        Ok(())
    }
}
