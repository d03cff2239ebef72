//! 场景描述配置模块
//!
//! 定义场景描述文件 (scene.toml) 的结构：一组模型条目，每个条目给出
//! 节点名、模型文件路径和可选的位置偏移。`build_stage` 据此构建场景
//! 图：所有模型节点挂在 `/World` 之下。
//!
//! # 场景文件格式 (scene.toml)
//!
//! ```toml
//! [[models]]
//! name = "box"
//! path = "assets/box.obj"
//! position = [0.0, 0.0, 2.0]
//!
//! [[models]]
//! name = "ramp"
//! path = "assets/ramp.obj"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ConfigError, Result, SimBridgeError};
use crate::core::math::Vector3f;
use super::graph::SceneGraph;
use super::loaders::load_mesh;

/// 单个模型条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// 场景节点名（在 /World 下必须唯一）
    pub name: String,

    /// 模型文件路径
    pub path: String,

    /// 位置偏移 (x, y, z)
    ///
    /// 导出器不保留层级放置信息，偏移在加载时直接烘焙进顶点坐标。
    #[serde(default = "default_position")]
    pub position: [f32; 3],
}

fn default_position() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

/// 场景描述配置
///
/// 包含待载入场景图的所有模型条目。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    /// 模型条目列表
    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

impl SceneConfig {
    /// 从文件加载场景描述
    ///
    /// # 参数
    ///
    /// - `path`: 场景描述文件路径
    ///
    /// # 返回
    ///
    /// - `Ok(SceneConfig)`: 加载成功
    /// - `Err(SimBridgeError)`: 加载失败
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SimBridgeError::Config(ConfigError::FileNotFound(format!(
                "Failed to read scene file '{}': {}",
                path.display(),
                e
            )))
        })?;

        toml::from_str(&contents).map_err(|e| {
            SimBridgeError::Config(ConfigError::ParseError(format!(
                "Failed to parse scene file: {}",
                e
            )))
        })
    }

    /// 从文件加载，如果文件不存在则返回空场景
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.exists() {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded scene description from: {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load scene description: {}, using empty scene", e);
                    Self::default()
                }
            }
        } else {
            tracing::info!("Scene description not found, using empty scene");
            Self::default()
        }
    }

    /// 根据场景描述构建场景图
    ///
    /// 在根节点下创建 `/World` 容器，再为每个模型条目加载网格并挂接
    /// 为 `/World/<name>` 节点。位置偏移烘焙进顶点坐标。
    ///
    /// # 返回
    ///
    /// - `Ok(SceneGraph)`: 构建成功
    /// - `Err(SimBridgeError)`: 模型加载失败或节点名冲突
    pub fn build_stage(&self) -> Result<SceneGraph> {
        let mut graph = SceneGraph::new();
        let world = graph.add_node(graph.root(), "World")?;

        for model in &self.models {
            let mut mesh = load_mesh(Path::new(&model.path))?;

            let offset = Vector3f::new(model.position[0], model.position[1], model.position[2]);
            if offset != Vector3f::zeros() {
                for p in &mut mesh.positions {
                    *p += offset;
                }
            }

            let id = graph.add_node(world, &model.name)?;
            graph.node_mut(id).mesh = Some(mesh);

            tracing::debug!(
                node = %graph.node(id).path(),
                file = %model.path,
                "Model attached to stage"
            );
        }

        tracing::info!(models = self.models.len(), "Stage built");
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scene_builds_world_root() {
        let config = SceneConfig::default();
        let graph = config.build_stage().unwrap();

        assert_eq!(graph.len(), 2); // "/" 和 "/World"
        assert!(graph.node_by_path("/World").is_some());
    }

    #[test]
    fn test_parse_scene_toml() {
        let config: SceneConfig = toml::from_str(
            r#"
            [[models]]
            name = "box"
            path = "assets/box.obj"
            position = [1.0, 2.0, 3.0]

            [[models]]
            name = "ramp"
            path = "assets/ramp.obj"
            "#,
        )
        .unwrap();

        assert_eq!(config.models.len(), 2);
        assert_eq!(config.models[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(config.models[1].position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_model_file_fails() {
        let config = SceneConfig {
            models: vec![ModelConfig {
                name: "ghost".to_string(),
                path: "does/not/exist.obj".to_string(),
                position: [0.0, 0.0, 0.0],
            }],
        };
        assert!(config.build_stage().is_err());
    }
}
