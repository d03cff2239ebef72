//! 错误处理模块
//!
//! 定义桥接层统一的错误类型，并为每种错误提供清晰的上下文信息。
//!
//! # 设计原则
//!
//! - 按领域划分子错误类型（配置、网格加载、绑定、场景图）
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//!
//! 注意导出/同步循环内部的逐项失败（单个几何文件写不出、单个面形状
//! 不受支持、单个绑定解析失败）就地处理并记录日志，不经由本模块的
//! 类型向外传播。

use std::fmt;
use std::path::PathBuf;

/// 桥接层统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, SimBridgeError>;

/// SimBridge 的错误类型
#[derive(Debug)]
pub enum SimBridgeError {
    /// 配置错误
    Config(ConfigError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// 绑定表构建错误
    Binding(BindingError),

    /// 场景图构建错误（重复路径、未知父节点等）
    Scene(String),

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 网格加载相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 文件不存在
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// 解析失败
    ParseError(String),

    /// 数据验证失败
    ValidationError(String),

    /// 几何数据无效
    InvalidGeometry(String),
}

/// 绑定表构建相关的错误
///
/// 物理体名称序列与场景节点路径序列必须等长且各自无重复，
/// 违反时在构建期立即失败（配置错误，不是运行期可重试的状况）。
#[derive(Debug)]
pub enum BindingError {
    /// 两个绑定序列长度不一致
    LengthMismatch { bodies: usize, paths: usize },

    /// 物理体名称重复
    DuplicateBody(String),

    /// 场景节点路径重复
    DuplicatePath(String),
}

impl fmt::Display for SimBridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimBridgeError::Config(e) => write!(f, "Configuration error: {}", e),
            SimBridgeError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            SimBridgeError::Binding(e) => write!(f, "Binding error: {}", e),
            SimBridgeError::Scene(msg) => write!(f, "Scene graph error: {}", msg),
            SimBridgeError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => write!(f, "Mesh file not found: {}", path.display()),
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
            MeshLoadError::ParseError(msg) => write!(f, "Failed to parse mesh: {}", msg),
            MeshLoadError::ValidationError(msg) => write!(f, "Mesh validation failed: {}", msg),
            MeshLoadError::InvalidGeometry(msg) => write!(f, "Invalid geometry data: {}", msg),
        }
    }
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::LengthMismatch { bodies, paths } => write!(
                f,
                "Body name and node path sequences differ in length: {} vs {}",
                bodies, paths
            ),
            BindingError::DuplicateBody(name) => write!(f, "Duplicate body name: {}", name),
            BindingError::DuplicatePath(path) => write!(f, "Duplicate node path: {}", path),
        }
    }
}

impl std::error::Error for SimBridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimBridgeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for MeshLoadError {}
impl std::error::Error for BindingError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for SimBridgeError {
    fn from(err: std::io::Error) -> Self {
        SimBridgeError::Io(err)
    }
}

impl From<ConfigError> for SimBridgeError {
    fn from(err: ConfigError) -> Self {
        SimBridgeError::Config(err)
    }
}

impl From<MeshLoadError> for SimBridgeError {
    fn from(err: MeshLoadError) -> Self {
        SimBridgeError::MeshLoading(err)
    }
}

impl From<BindingError> for SimBridgeError {
    fn from(err: BindingError) -> Self {
        SimBridgeError::Binding(err)
    }
}
