//! 位姿同步模块
//!
//! 每个仿真步之后调用一次：对每条绑定，从物理引擎读出刚体的当前
//! 位姿，转换为 4×4 刚体变换矩阵，在给定时刻追加到绑定节点的变换
//! 轨道上。采样按非降序时刻到达，既有采样永不回改。
//!
//! # 失败策略
//!
//! - 两个绑定序列长度不一致：配置错误。当帧放弃写入任何采样，报告
//!   一次，之后同步退化为 no-op 直到配置修正
//! - 刚体名在当前模型中解析不到：仅跳过该条绑定，失败不做缓存，
//!   后续帧模型变化后可以恢复
//! - 目标节点缺少变换轨道：首次写入时惰性创建

use crate::physics::world::PhysicsEngine;
use crate::scene::graph::SceneGraph;
use super::binding::BindingTable;

/// 位姿同步器
///
/// 持有两个索引对齐的序列（刚体名、节点路径），不持有任何指向物理
/// 引擎或场景图内部的引用。
pub struct PoseSynchronizer {
    body_names: Vec<String>,
    node_paths: Vec<String>,
    mismatch_reported: bool,
}

impl PoseSynchronizer {
    /// 从校验过的绑定表创建同步器
    pub fn new(table: BindingTable) -> Self {
        let (body_names, node_paths) = table
            .entries()
            .iter()
            .map(|b| (b.body.clone(), b.path.clone()))
            .unzip();
        Self {
            body_names,
            node_paths,
            mismatch_reported: false,
        }
    }

    /// 从原始序列创建同步器（不做构建期校验）
    ///
    /// 长度一致性留给每帧守卫检查。常规路径应使用
    /// [`BindingTable`] + [`PoseSynchronizer::new`]。
    pub fn from_sequences(body_names: Vec<String>, node_paths: Vec<String>) -> Self {
        Self {
            body_names,
            node_paths,
            mismatch_reported: false,
        }
    }

    /// 获取绑定数量（以刚体名序列计）
    pub fn binding_count(&self) -> usize {
        self.body_names.len()
    }

    /// 把当前物理状态同步到场景图
    ///
    /// # 参数
    ///
    /// - `engine`: 物理引擎（只读访问）
    /// - `graph`: 场景图（写入变换采样）
    /// - `time`: 当前仿真时刻
    ///
    /// # 返回
    ///
    /// 本帧写入的采样数。配置错误（序列长度不一致）时为 0。
    pub fn sync<E>(&mut self, engine: &E, graph: &mut SceneGraph, time: f64) -> usize
    where
        E: PhysicsEngine + ?Sized,
    {
        if self.body_names.len() != self.node_paths.len() {
            if !self.mismatch_reported {
                tracing::error!(
                    bodies = self.body_names.len(),
                    paths = self.node_paths.len(),
                    "Body name and node path sequences differ in length; \
                     pose synchronization disabled"
                );
                self.mismatch_reported = true;
            }
            return 0;
        }

        let mut written = 0;
        for (name, path) in self.body_names.iter().zip(&self.node_paths) {
            let Some(pose) = engine.body_pose(name) else {
                // 逐条容忍，不缓存失败
                tracing::debug!(body = %name, "Body not found in physics model; skipping");
                continue;
            };

            let Some(node_id) = graph.node_by_path(path) else {
                tracing::debug!(path = %path, "Bound node not found in scene graph; skipping");
                continue;
            };

            graph.node_mut(node_id).track_or_insert().set(time, pose.to_matrix());
            written += 1;
        }
        written
    }
}
