//! 统一的数学类型模块
//!
//! 基于 `nalgebra` 提供桥接层使用的数学类型别名。
//!
//! # 精度约定
//!
//! - **仿真侧**（刚体位姿、变换矩阵、时间采样）使用 `f64`，与物理引擎
//!   的双精度状态保持一致
//! - **几何侧**（网格顶点、包围盒）使用 `f32`，与 OBJ 加载器和通用
//!   渲染网格数据保持一致
//!
//! 两侧只在几何导出时相遇（顶点以文本形式写出），不存在混合运算。

pub use nalgebra::{Isometry3, Translation3, UnitQuaternion};

// 仿真侧类型（f64）
pub type Vector3 = nalgebra::Vector3<f64>;
pub type Matrix4 = nalgebra::Matrix4<f64>;
pub type Quaternion = UnitQuaternion<f64>;

// 几何侧类型（f32）
pub type Vector3f = nalgebra::Vector3<f32>;

/// 数学常量
pub mod constants {
    /// 网格深度（z 方向包围盒尺寸）的退化判定阈值。
    ///
    /// 深度不超过该值的网格被视为纯平面几何，没有可用的实体形状，
    /// 导出时被整体排除。
    pub const DEPTH_EPSILON: f32 = 1e-8;
}
