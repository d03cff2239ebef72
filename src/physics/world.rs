//! 物理引擎边界模块
//!
//! 桥接层只依赖一个很窄的引擎边界：推进一步、按名称查询刚体位姿。
//! [`PhysicsEngine`] trait 把这个边界显式化；真实引擎（MuJoCo、rapier
//! 等封装）在 trait 之后接入，桥接层代码不感知其内部积分算法。
//!
//! [`RigidBodyWorld`] 是满足该边界的最小内建实现：自由刚体在恒定
//! 重力下做半隐式欧拉积分，无碰撞、无约束。它让导出 → 构建 → 逐帧
//! 同步的完整管线可以在没有外部引擎的情况下运转。

use std::collections::HashMap;

use crate::bridge::descriptor::SceneDescriptor;
use crate::core::math::{Quaternion, Vector3};
use super::body::BodyPose;

/// 物理引擎边界 trait
///
/// 桥接层与具体引擎之间的全部接口。实现者独占持有刚体状态；
/// 桥接层每帧恰好调用一次 `step`，随后按绑定逐个查询位姿。
pub trait PhysicsEngine {
    /// 将仿真推进一个步长（秒）
    fn step(&mut self, dt: f64);

    /// 按名称查询刚体的当前位姿
    ///
    /// # 返回
    ///
    /// - `Some(BodyPose)`: 刚体存在
    /// - `None`: 当前模型中没有该名称的刚体
    fn body_pose(&self, name: &str) -> Option<BodyPose>;

    /// 获取模型中的刚体数量
    fn body_count(&self) -> usize;
}

/// 自由刚体
#[derive(Debug, Clone)]
pub struct RigidBody {
    name: String,

    /// 当前位姿
    pub pose: BodyPose,

    /// 线速度
    pub linear_velocity: Vector3,

    /// 角速度（世界系，轴角速率向量）
    pub angular_velocity: Vector3,
}

impl RigidBody {
    fn new(name: String) -> Self {
        Self {
            name,
            pose: BodyPose::identity(),
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
        }
    }

    /// 获取刚体名称
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// 最小自由刚体世界
///
/// 恒定重力 + 半隐式欧拉积分。所有刚体初始位姿为单位位姿（场景
/// 描述中的放置默认在原点），初速度为零。
///
/// # 示例
///
/// ```rust
/// use sim_bridge::physics::world::{PhysicsEngine, RigidBodyWorld};
/// use nalgebra::Vector3;
///
/// let mut world = RigidBodyWorld::new(Vector3::new(0.0, 0.0, -9.81));
/// world.add_body("mesh_0_body");
///
/// for _ in 0..100 {
///     world.step(0.01);
/// }
/// let pose = world.body_pose("mesh_0_body").unwrap();
/// assert!(pose.position.z < 0.0);
/// ```
#[derive(Debug)]
pub struct RigidBodyWorld {
    gravity: Vector3,
    bodies: Vec<RigidBody>,
    index: HashMap<String, usize>,
    time: f64,
}

impl RigidBodyWorld {
    /// 创建空世界
    pub fn new(gravity: Vector3) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            index: HashMap::new(),
            time: 0.0,
        }
    }

    /// 从场景描述构建世界
    ///
    /// 为描述中的每个独立刚体条目创建一个自由刚体，初始位姿为单位
    /// 位姿（与描述的原点放置约定一致）。
    pub fn from_descriptor(descriptor: &SceneDescriptor, gravity: Vector3) -> Self {
        let mut world = Self::new(gravity);
        for body in &descriptor.bodies {
            world.add_body(&body.name);
        }
        tracing::info!(bodies = world.body_count(), "Physics world built from descriptor");
        world
    }

    /// 添加刚体
    ///
    /// 名称已存在时忽略本次添加并返回既有刚体的索引。
    pub fn add_body(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        if let Some(&existing) = self.index.get(&name) {
            tracing::warn!(body = %name, "Duplicate body name ignored");
            return existing;
        }
        let idx = self.bodies.len();
        self.bodies.push(RigidBody::new(name.clone()));
        self.index.insert(name, idx);
        idx
    }

    /// 按名称获取刚体的可变引用（测试与初始条件设置用）
    pub fn body_mut(&mut self, name: &str) -> Option<&mut RigidBody> {
        self.index.get(name).map(|&i| &mut self.bodies[i])
    }

    /// 获取累计仿真时间
    pub fn time(&self) -> f64 {
        self.time
    }
}

impl PhysicsEngine for RigidBodyWorld {
    fn step(&mut self, dt: f64) {
        for body in &mut self.bodies {
            // 半隐式欧拉：先更新速度，再用新速度推进位置
            body.linear_velocity += self.gravity * dt;
            body.pose.position += body.linear_velocity * dt;

            let w = body.angular_velocity;
            if w != Vector3::zeros() {
                let delta = Quaternion::from_scaled_axis(w * dt);
                body.pose.orientation = delta * body.pose.orientation;
            }
        }
        self.time += dt;
    }

    fn body_pose(&self, name: &str) -> Option<BodyPose> {
        self.index.get(name).map(|&i| self.bodies[i].pose)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unknown_body_pose_is_none() {
        let world = RigidBodyWorld::new(Vector3::zeros());
        assert!(world.body_pose("missing").is_none());
    }

    #[test]
    fn test_free_fall_displacement() {
        let g = -10.0;
        let dt = 0.1;
        let steps = 5;
        let mut world = RigidBodyWorld::new(Vector3::new(0.0, 0.0, g));
        world.add_body("ball");

        for _ in 0..steps {
            world.step(dt);
        }

        // 半隐式欧拉的闭式位移: g·dt²·n(n+1)/2
        let n = steps as f64;
        let expected = g * dt * dt * n * (n + 1.0) / 2.0;
        let pose = world.body_pose("ball").unwrap();
        assert_relative_eq!(pose.position.z, expected, epsilon = 1e-12);
        assert_eq!(pose.orientation, Quaternion::identity());
        assert_relative_eq!(world.time(), n * dt, epsilon = 1e-12);
    }

    #[test]
    fn test_spin_integration() {
        let mut world = RigidBodyWorld::new(Vector3::zeros());
        world.add_body("top");
        world.body_mut("top").unwrap().angular_velocity =
            Vector3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2);

        // 1 秒后绕 z 旋转 90°
        for _ in 0..100 {
            world.step(0.01);
        }
        let pose = world.body_pose("top").unwrap();
        let m = pose.to_matrix();
        assert_relative_eq!(m[(1, 0)], 1.0, epsilon = 1e-9);
        assert_relative_eq!(m[(0, 0)], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_duplicate_body_ignored() {
        let mut world = RigidBodyWorld::new(Vector3::zeros());
        let a = world.add_body("b");
        let b = world.add_body("b");
        assert_eq!(a, b);
        assert_eq!(world.body_count(), 1);
    }
}
