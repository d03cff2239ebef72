//! SimBridge - 物理仿真与场景图同步桥
//!
//! SimBridge 在刚体物理引擎与层级场景图之间架设双向数据通道：
//! 加载阶段把场景网格导出为物理引擎可消费的几何文件与场景描述，
//! 仿真阶段把每步算出的刚体位姿写回场景节点的时间采样变换轨道。
//! 渲染、窗口与交互由外部协作方消费场景图状态完成，不在本库范围内。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（数学、日志、配置、错误处理）
//! - `scene`: 场景图侧（节点 arena、网格快照、变换轨道、模型加载）
//! - `physics`: 物理侧（刚体位姿、引擎边界 trait、内建世界）
//! - `bridge`: 桥接核心（几何导出、场景描述、绑定、同步、驱动）
//!
//! # 使用示例
//!
//! ```no_run
//! use sim_bridge::bridge::{
//!     BindingTable, GeometryExporter, PoseSynchronizer, SceneDescriptor,
//!     SceneDescriptorBuilder, SimulationDriver,
//! };
//! use sim_bridge::physics::RigidBodyWorld;
//! use sim_bridge::scene::SceneConfig;
//! use nalgebra::Vector3;
//!
//! # fn main() -> sim_bridge::core::error::Result<()> {
//! // 加载阶段：场景 → 几何文件 + 场景描述 → 物理模型
//! let mut graph = SceneConfig::from_file_or_default("scene.toml").build_stage()?;
//! let mut descriptor = SceneDescriptor::new("scene");
//! descriptor.hierarchy = Some(SceneDescriptorBuilder::mirror(&graph, graph.root()));
//! let report = GeometryExporter::new("export").export(&graph, graph.root(), &mut descriptor)?;
//!
//! let engine = RigidBodyWorld::from_descriptor(&descriptor, Vector3::new(0.0, 0.0, -9.81));
//! let bindings = BindingTable::from_assets(&report.assets)?;
//!
//! // 逐帧阶段：步进 + 位姿写回
//! let mut driver = SimulationDriver::new(engine, PoseSynchronizer::new(bindings), 0.01);
//! driver.run(&mut graph, 600);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod scene;
pub mod physics;
pub mod bridge;
