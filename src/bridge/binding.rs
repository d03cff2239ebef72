//! 绑定表模块
//!
//! 物理刚体与场景节点分属两个互不相关的标识空间（引擎内的刚体名、
//! 场景图的节点路径），桥接靠显式的索引对齐绑定表连接两者。绑定表
//! 在场景与物理模型都构建完成后创建一次，之后不可变。
//!
//! 基于名称的交叉引用天然脆弱，因此校验在构建期即时完成（长度一致、
//! 两侧各自无重复），而不是留给每帧去发现。空表是合法的"不同步"
//! 模式，构建时给出一次性警告。

use std::collections::HashSet;

use crate::core::error::{BindingError, Result};
use super::exporter::GeometryAsset;

/// 一条绑定：刚体名 ↔ 节点路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyBinding {
    /// 物理引擎中的刚体名
    pub body: String,

    /// 场景图节点路径
    pub path: String,
}

/// 不可变的绑定表
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    entries: Vec<BodyBinding>,
}

impl BindingTable {
    /// 从两个索引对齐的序列构建绑定表
    ///
    /// # 参数
    ///
    /// - `bodies`: 刚体名序列
    /// - `paths`: 节点路径序列，与 `bodies` 按索引对齐
    ///
    /// # 返回
    ///
    /// - `Ok(BindingTable)`: 校验通过
    /// - `Err(SimBridgeError::Binding)`: 长度不一致或存在重复
    pub fn new(bodies: Vec<String>, paths: Vec<String>) -> Result<Self> {
        if bodies.len() != paths.len() {
            return Err(BindingError::LengthMismatch {
                bodies: bodies.len(),
                paths: paths.len(),
            }
            .into());
        }

        let mut seen_bodies = HashSet::new();
        for body in &bodies {
            if !seen_bodies.insert(body.as_str()) {
                return Err(BindingError::DuplicateBody(body.clone()).into());
            }
        }
        let mut seen_paths = HashSet::new();
        for path in &paths {
            if !seen_paths.insert(path.as_str()) {
                return Err(BindingError::DuplicatePath(path.clone()).into());
            }
        }

        if bodies.is_empty() {
            tracing::warn!("Empty binding table: pose synchronization will be a no-op");
        }

        let entries = bodies
            .into_iter()
            .zip(paths)
            .map(|(body, path)| BodyBinding { body, path })
            .collect();
        Ok(Self { entries })
    }

    /// 按导出约定从资产列表构建绑定表
    ///
    /// 资产 `mesh_<N>` 对应的刚体容器名为 `mesh_<N>_body`，绑定回
    /// 该资产的来源节点路径。
    pub fn from_assets(assets: &[GeometryAsset]) -> Result<Self> {
        let bodies = assets.iter().map(|a| format!("{}_body", a.name)).collect();
        let paths = assets.iter().map(|a| a.source_path.clone()).collect();
        Self::new(bodies, paths)
    }

    /// 获取绑定条目（索引对齐顺序）
    pub fn entries(&self) -> &[BodyBinding] {
        &self.entries
    }

    /// 获取绑定数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 绑定表是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_table() {
        let table = BindingTable::new(
            strings(&["mesh_0_body", "mesh_1_body"]),
            strings(&["/World/a", "/World/b"]),
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].body, "mesh_0_body");
        assert_eq!(table.entries()[0].path, "/World/a");
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = BindingTable::new(
            strings(&["mesh_0_body", "mesh_1_body"]),
            strings(&["/World/a"]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_body_rejected() {
        let result = BindingTable::new(
            strings(&["b", "b"]),
            strings(&["/World/a", "/World/b"]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let result = BindingTable::new(
            strings(&["a", "b"]),
            strings(&["/World/a", "/World/a"]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_table_is_valid() {
        let table = BindingTable::new(Vec::new(), Vec::new()).unwrap();
        assert!(table.is_empty());
    }
}
