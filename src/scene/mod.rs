//! 场景图侧模块
//!
//! 提供桥接层面向场景图一侧的全部数据结构：arena 式节点存储、网格
//! 快照、时间采样变换轨道，以及把模型文件装入场景图的加载器。
//!
//! # 模块结构
//!
//! - `graph`: 场景图 arena 与节点（路径标识、父子索引）
//! - `mesh`: 可导出表面的网格快照
//! - `track`: 时间采样 4×4 变换轨道（阶梯保持语义）
//! - `config`: 场景描述文件 (scene.toml) 与场景图构建
//! - `loaders`: 模型文件加载器（OBJ）
//!
//! # 架构设计
//!
//! ```text
//! scene.toml
//!     ↓
//! SceneConfig::build_stage
//!     ↓
//! SceneGraph (节点 + MeshRecord)
//!     ↓                    ↑
//! GeometryExporter    PoseSynchronizer (写 TransformTrack)
//! ```

pub mod graph;
pub mod mesh;
pub mod track;
pub mod config;
pub mod loaders;

// 重新导出常用类型
pub use graph::{NodeId, SceneGraph, SceneNode};
pub use mesh::MeshRecord;
pub use track::TransformTrack;
pub use config::{ModelConfig, SceneConfig};
