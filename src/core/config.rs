//! 配置管理模块
//!
//! 提供桥接层配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [export]
//! output_dir = "export"
//! model_name = "scene"
//! scene_file = "scene.toml"
//!
//! [simulation]
//! timestep = 0.01
//! gravity = [0.0, 0.0, -9.81]
//! frames = 600
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 桥接层配置
///
/// 包含了导出阶段和仿真循环所需的所有配置项。
/// 可以从配置文件加载，也可以通过代码构建。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 几何导出配置
    #[serde(default)]
    pub export: ExportConfig,

    /// 仿真配置
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 几何导出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// 几何文件与场景描述文件的输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// 场景描述文档的模型名（同时决定描述文件名 `<model_name>.xml`）
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// 导出阶段读取的场景描述文件（模型列表）
    #[serde(default = "default_scene_file")]
    pub scene_file: String,
}

/// 仿真配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 仿真步长（秒）
    #[serde(default = "default_timestep")]
    pub timestep: f64,

    /// 重力加速度 (x, y, z)
    #[serde(default = "default_gravity")]
    pub gravity: [f64; 3],

    /// 仿真帧数
    #[serde(default = "default_frames")]
    pub frames: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_output_dir() -> String { "export".to_string() }
fn default_model_name() -> String { "scene".to_string() }
fn default_scene_file() -> String { "scene.toml".to_string() }
fn default_timestep() -> f64 { 0.01 }
fn default_gravity() -> [f64; 3] { [0.0, 0.0, -9.81] }
fn default_frames() -> u64 { 600 }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "sim_bridge.log".to_string() }

impl Default for Config {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            simulation: SimulationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            model_name: default_model_name(),
            scene_file: default_scene_file(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: default_timestep(),
            gravity: default_gravity(),
            frames: default_frames(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 成功返回 `Config` 实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// # 说明
    ///
    /// 支持的参数：
    /// - `--output <dir>`: 设置输出目录
    /// - `--scene <path>`: 设置场景描述文件
    /// - `--frames <n>`: 设置仿真帧数
    /// - `--timestep <dt>`: 设置仿真步长
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if let Some(idx) = args.iter().position(|a| a == "--output") {
            if let Some(dir) = args.get(idx + 1) {
                self.export.output_dir = dir.clone();
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--scene") {
            if let Some(path) = args.get(idx + 1) {
                self.export.scene_file = path.clone();
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--frames") {
            if let Some(frames_str) = args.get(idx + 1) {
                if let Ok(frames) = frames_str.parse() {
                    self.simulation.frames = frames;
                }
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--timestep") {
            if let Some(dt_str) = args.get(idx + 1) {
                if let Ok(dt) = dt_str.parse() {
                    self.simulation.timestep = dt;
                }
            }
        }
    }

    /// 验证配置的有效性
    ///
    /// # 返回值
    ///
    /// 配置有效返回 `Ok(())`，否则返回错误
    pub fn validate(&self) -> Result<()> {
        if self.export.output_dir.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "export.output_dir".to_string(),
                reason: "Output directory must not be empty".to_string(),
            }.into());
        }

        if self.export.model_name.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "export.model_name".to_string(),
                reason: "Model name must not be empty".to_string(),
            }.into());
        }

        if !(self.simulation.timestep.is_finite() && self.simulation.timestep > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "simulation.timestep".to_string(),
                reason: "Timestep must be a positive finite number".to_string(),
            }.into());
        }

        if self.simulation.gravity.iter().any(|g| !g.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "simulation.gravity".to_string(),
                reason: "Gravity components must be finite".to_string(),
            }.into());
        }

        Ok(())
    }
}
