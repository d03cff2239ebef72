//! 刚体位姿模块
//!
//! 定义物理引擎边界上传递的刚体位姿：位置 + 单位四元数朝向。
//! 线格式的四元数分量约定为标量在前 `(w, x, y, z)`，与引擎状态
//! 数组的排布一致。

use nalgebra::Quaternion as RawQuaternion;

use crate::core::math::{Isometry3, Matrix4, Quaternion, Translation3, Vector3};

/// 刚体位姿（位置 + 朝向）
///
/// 桥接层视角下只读：每个仿真步由物理引擎写入，同步器读出并转换为
/// 场景图的变换矩阵。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    /// 位置 (x, y, z)
    pub position: Vector3,

    /// 朝向（单位四元数）
    pub orientation: Quaternion,
}

impl BodyPose {
    /// 单位位姿（原点、无旋转）
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: Quaternion::identity(),
        }
    }

    /// 从引擎状态数组构造位姿
    ///
    /// # 参数
    ///
    /// - `position`: 位置分量 (x, y, z)
    /// - `quat_wxyz`: 四元数分量，标量在前 (w, x, y, z)
    ///
    /// 四元数在构造时归一化，容忍引擎侧的数值漂移。
    pub fn from_parts(position: [f64; 3], quat_wxyz: [f64; 4]) -> Self {
        let [w, x, y, z] = quat_wxyz;
        Self {
            position: Vector3::new(position[0], position[1], position[2]),
            // nalgebra 的 Quaternion::new 同样是标量在前
            orientation: Quaternion::from_quaternion(RawQuaternion::new(w, x, y, z)),
        }
    }

    /// 构造刚体变换矩阵
    ///
    /// 旋转子块来自朝向四元数，平移列来自位置；两者合成单个刚体变换
    /// （先在局部坐标旋转，再平移）。单位位姿精确产出单位矩阵。
    pub fn to_matrix(&self) -> Matrix4 {
        Isometry3::from_parts(Translation3::from(self.position), self.orientation).to_homogeneous()
    }
}

impl Default for BodyPose {
    fn default() -> Self {
        Self::identity()
    }
}
