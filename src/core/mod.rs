//! 核心功能模块
//!
//! 本模块提供桥接层的基础功能，包括数学类型、日志系统、配置管理和
//! 错误处理。这些模块独立于具体的物理引擎和场景图语义，可以在桥接
//! 的任何一侧使用。
//!
//! # 模块组织
//!
//! - `math`：数学类型，基于 nalgebra 的向量、矩阵、四元数别名
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从配置文件加载运行设置
//! - `error`：错误处理，定义统一的错误类型

pub mod math;
pub mod log;
pub mod config;
pub mod error;

// 重新导出常用类型，方便使用
pub use math::{Matrix4, Quaternion, Vector3, Vector3f};
pub use error::{Result, SimBridgeError};
pub use config::Config;
