//! 场景图存储模块
//!
//! 以 arena 方式存放场景节点：节点由稳定的 [`NodeId`] 索引引用，
//! 父子关系通过索引表达，不存在指针环。每个节点由唯一的层级路径
//! 标识（`/World/box` 形式），路径查找经由哈希表。
//!
//! 导出阶段将节点视为只读快照；同步阶段只追加变换采样。

use std::collections::HashMap;

use crate::core::error::{Result, SimBridgeError};
use super::mesh::MeshRecord;
use super::track::TransformTrack;

/// 场景节点的稳定句柄（arena 索引）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// 场景图中的一个节点
///
/// 节点由 [`SceneGraph`] 独占持有；几何与变换轨道都是可选属性。
#[derive(Debug)]
pub struct SceneNode {
    name: String,
    path: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,

    /// 附加的网格几何（可选）
    pub mesh: Option<MeshRecord>,

    /// 时间采样变换轨道（可选，首次写入时惰性创建）
    pub track: Option<TransformTrack>,
}

impl SceneNode {
    /// 获取节点名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取节点的完整层级路径
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 获取父节点句柄（根节点为 `None`）
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// 获取子节点句柄列表（插入顺序）
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// 获取变换轨道，不存在时创建
    pub fn track_or_insert(&mut self) -> &mut TransformTrack {
        self.track.get_or_insert_with(TransformTrack::new)
    }
}

/// arena 式场景图存储
///
/// 创建时自带根节点（路径 `/`）；所有其他节点通过 [`SceneGraph::add_node`]
/// 挂接到既有节点之下。
///
/// # 示例
///
/// ```rust
/// use sim_bridge::scene::graph::SceneGraph;
///
/// let mut graph = SceneGraph::new();
/// let world = graph.add_node(graph.root(), "World").unwrap();
/// let box_id = graph.add_node(world, "box").unwrap();
///
/// assert_eq!(graph.node(box_id).path(), "/World/box");
/// assert_eq!(graph.node_by_path("/World/box"), Some(box_id));
/// ```
#[derive(Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    paths: HashMap<String, NodeId>,
}

impl SceneGraph {
    /// 创建只含根节点的场景图
    pub fn new() -> Self {
        let root = SceneNode {
            name: String::new(),
            path: "/".to_string(),
            parent: None,
            children: Vec::new(),
            mesh: None,
            track: None,
        };
        let mut paths = HashMap::new();
        paths.insert("/".to_string(), NodeId(0));
        Self { nodes: vec![root], paths }
    }

    /// 获取根节点句柄
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// 获取节点总数（含根节点）
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// 场景图是否为空（根节点始终存在，恒为 false）
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 在指定父节点下创建新节点
    ///
    /// 子节点路径由父路径派生（`<parent>/<name>`），在整个场景图内
    /// 必须唯一。
    ///
    /// # 参数
    ///
    /// - `parent`: 父节点句柄
    /// - `name`: 节点名，不能为空且不能包含 `/`
    ///
    /// # 返回
    ///
    /// - `Ok(NodeId)`: 新节点句柄
    /// - `Err(SimBridgeError::Scene)`: 名称非法或路径重复
    pub fn add_node(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        if name.is_empty() || name.contains('/') {
            return Err(SimBridgeError::Scene(format!(
                "invalid node name '{}': must be non-empty and must not contain '/'",
                name
            )));
        }
        let parent_path = self
            .nodes
            .get(parent.0)
            .ok_or_else(|| SimBridgeError::Scene(format!("unknown parent node id {}", parent.0)))?
            .path
            .clone();

        let path = if parent_path == "/" {
            format!("/{}", name)
        } else {
            format!("{}/{}", parent_path, name)
        };

        if self.paths.contains_key(&path) {
            return Err(SimBridgeError::Scene(format!("duplicate node path '{}'", path)));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name: name.to_string(),
            path: path.clone(),
            parent: Some(parent),
            children: Vec::new(),
            mesh: None,
            track: None,
        });
        self.nodes[parent.0].children.push(id);
        self.paths.insert(path, id);
        Ok(id)
    }

    /// 获取节点的不可变引用
    ///
    /// # Panics
    ///
    /// 句柄只能来自本场景图的 `add_node`/`root`，因此越界视为调用方
    /// 逻辑错误。
    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    /// 获取节点的可变引用
    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }

    /// 按路径查找节点
    pub fn node_by_path(&self, path: &str) -> Option<NodeId> {
        self.paths.get(path).copied()
    }

    /// 从指定节点开始的确定性前序遍历
    ///
    /// 显式栈实现；子节点按插入顺序访问，每个节点恰好访问一次。
    pub fn pre_order(&self, start: NodeId) -> PreOrder<'_> {
        PreOrder { graph: self, stack: vec![start] }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// [`SceneGraph::pre_order`] 的迭代器
pub struct PreOrder<'a> {
    graph: &'a SceneGraph,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // 逆序压栈，弹出时保持子节点的原始顺序
        let children = self.graph.node(id).children();
        self.stack.extend(children.iter().rev());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let graph = SceneGraph::new();
        assert_eq!(graph.node(graph.root()).path(), "/");
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_path_derivation() {
        let mut graph = SceneGraph::new();
        let world = graph.add_node(graph.root(), "World").unwrap();
        let child = graph.add_node(world, "box").unwrap();

        assert_eq!(graph.node(world).path(), "/World");
        assert_eq!(graph.node(child).path(), "/World/box");
        assert_eq!(graph.node(child).parent(), Some(world));
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let mut graph = SceneGraph::new();
        let world = graph.add_node(graph.root(), "World").unwrap();
        graph.add_node(world, "box").unwrap();

        assert!(graph.add_node(world, "box").is_err());
    }

    #[test]
    fn test_invalid_name_rejected() {
        let mut graph = SceneGraph::new();
        assert!(graph.add_node(graph.root(), "").is_err());
        assert!(graph.add_node(graph.root(), "a/b").is_err());
    }

    #[test]
    fn test_lookup_by_path() {
        let mut graph = SceneGraph::new();
        let world = graph.add_node(graph.root(), "World").unwrap();
        let child = graph.add_node(world, "box").unwrap();

        assert_eq!(graph.node_by_path("/World/box"), Some(child));
        assert_eq!(graph.node_by_path("/World/sphere"), None);
    }

    #[test]
    fn test_pre_order_is_deterministic() {
        let mut graph = SceneGraph::new();
        let world = graph.add_node(graph.root(), "World").unwrap();
        let a = graph.add_node(world, "a").unwrap();
        let b = graph.add_node(world, "b").unwrap();
        let a1 = graph.add_node(a, "a1").unwrap();

        let order: Vec<NodeId> = graph.pre_order(graph.root()).collect();
        assert_eq!(order, vec![graph.root(), world, a, a1, b]);
    }

    #[test]
    fn test_pre_order_visits_every_node_once() {
        let mut graph = SceneGraph::new();
        let world = graph.add_node(graph.root(), "World").unwrap();
        for i in 0..5 {
            graph.add_node(world, &format!("n{}", i)).unwrap();
        }

        let visited: Vec<NodeId> = graph.pre_order(graph.root()).collect();
        assert_eq!(visited.len(), graph.len());
        let mut dedup = visited.clone();
        dedup.sort_by_key(|id| graph.node(*id).path().to_string());
        dedup.dedup();
        assert_eq!(dedup.len(), visited.len());
    }

    #[test]
    fn test_track_lazily_created() {
        let mut graph = SceneGraph::new();
        let world = graph.add_node(graph.root(), "World").unwrap();

        assert!(graph.node(world).track.is_none());
        graph.node_mut(world).track_or_insert();
        assert!(graph.node(world).track.is_some());
    }
}
