//! 仿真驱动模块
//!
//! 驱动器独占持有物理引擎实例，逐帧推进：每帧恰好一次引擎步进，
//! 紧接着恰好一次位姿同步，两者之间没有重叠，也没有对引擎或场景图
//! 状态的并发访问。帧内没有取消模型：一帧要么完整执行步进加同步，
//! 要么进程终止。

use crate::physics::world::PhysicsEngine;
use crate::scene::graph::SceneGraph;
use super::synchronizer::PoseSynchronizer;

/// 仿真驱动器
///
/// 场景图由调用方持有并在每帧借入；驱动器只持有引擎与同步器。
pub struct SimulationDriver<E: PhysicsEngine> {
    engine: E,
    synchronizer: PoseSynchronizer,
    timestep: f64,
    frame: u64,
}

impl<E: PhysicsEngine> SimulationDriver<E> {
    /// 创建驱动器
    ///
    /// # 参数
    ///
    /// - `engine`: 物理引擎实例（所有权转移给驱动器）
    /// - `synchronizer`: 位姿同步器
    /// - `timestep`: 每帧步长（秒）
    pub fn new(engine: E, synchronizer: PoseSynchronizer, timestep: f64) -> Self {
        Self {
            engine,
            synchronizer,
            timestep,
            frame: 0,
        }
    }

    /// 推进一帧
    ///
    /// 一次引擎步进，随后在 `frame * timestep` 时刻做一次位姿同步。
    ///
    /// # 返回
    ///
    /// 本帧写入的变换采样数。
    pub fn advance(&mut self, graph: &mut SceneGraph) -> usize {
        self.engine.step(self.timestep);
        self.frame += 1;
        let time = self.frame as f64 * self.timestep;
        self.synchronizer.sync(&self.engine, graph, time)
    }

    /// 连续推进多帧
    ///
    /// # 返回
    ///
    /// 所有帧累计写入的变换采样数。
    pub fn run(&mut self, graph: &mut SceneGraph, frames: u64) -> usize {
        let mut total = 0;
        for _ in 0..frames {
            total += self.advance(graph);
        }
        tracing::info!(
            frames = self.frame,
            samples = total,
            "Simulation run finished"
        );
        total
    }

    /// 获取当前帧号
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// 获取当前仿真时刻
    pub fn time(&self) -> f64 {
        self.frame as f64 * self.timestep
    }

    /// 获取引擎的只读引用
    pub fn engine(&self) -> &E {
        &self.engine
    }
}
