//! 物理侧模块
//!
//! 定义桥接层面向物理引擎一侧的边界：刚体位姿数据与引擎 trait，
//! 以及一个满足该边界的最小内建世界实现。
//!
//! # 模块结构
//!
//! - `body`: 刚体位姿（位置 + 标量在前的单位四元数）
//! - `world`: [`PhysicsEngine`] trait 与内建的 [`RigidBodyWorld`]

pub mod body;
pub mod world;

// 重新导出常用类型
pub use body::BodyPose;
pub use world::{PhysicsEngine, RigidBody, RigidBodyWorld};
