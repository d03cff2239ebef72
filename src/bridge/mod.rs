//! 桥接核心模块
//!
//! 连接物理引擎与场景图的双向通道：
//!
//! - **加载阶段**（一次性）：`exporter` 把场景网格写成几何文件，
//!   `descriptor` 汇总资产声明与层级结构镜像，物理引擎从合并结果
//!   构建内部模型
//! - **逐帧阶段**：`driver` 推进引擎一步，`synchronizer` 按 `binding`
//!   把刚体位姿写回场景节点的时间采样变换轨道
//!
//! ```text
//! SceneGraph ──exporter──► OBJ 文件 + SceneDescriptor ──► PhysicsEngine
//!     ▲                                                        │
//!     └──synchronizer（TransformTrack 追加）◄──driver 每帧──────┘
//! ```

pub mod binding;
pub mod descriptor;
pub mod driver;
pub mod exporter;
pub mod synchronizer;

// 重新导出常用类型
pub use binding::{BindingTable, BodyBinding};
pub use descriptor::{SceneDescriptor, SceneDescriptorBuilder};
pub use driver::SimulationDriver;
pub use exporter::{ExportReport, GeometryAsset, GeometryExporter};
pub use synchronizer::PoseSynchronizer;
