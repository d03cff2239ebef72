//! 物理场景描述模块
//!
//! 场景描述是物理引擎构建内部模型的输入：一个 MJCF 风味的 XML 文档，
//! 包含几何资产声明、场景图层级的结构镜像，以及每个资产对应的独立
//! 刚体条目。
//!
//! 结构镜像只保证嵌套深度与场景图一一对应，不赋予质量、碰撞形状或
//! 关节语义；独立刚体条目默认放置在原点，正确的放置要等同步阶段逐帧
//! 写回。导出与镜像各自恰好运行一次，之后引擎从合并结果构建；会话
//! 中途重新导出不受支持。

use std::fs;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::scene::graph::{NodeId, SceneGraph};

/// 几何资产声明条目
#[derive(Debug, Clone)]
pub struct AssetEntry {
    /// 资产名（`mesh_<N>`）
    pub name: String,

    /// 几何文件路径
    pub file: PathBuf,
}

/// 独立刚体条目
///
/// 每个导出的资产对应一个刚体容器，名称带 `_body` 后缀，
/// 内含一个 mesh 类型的形状引用。
#[derive(Debug, Clone)]
pub struct BodyEntry {
    /// 刚体容器名（`mesh_<N>_body`）
    pub name: String,

    /// 引用的资产名（`mesh_<N>`）
    pub mesh: String,
}

/// 场景图层级的结构镜像节点
///
/// 每个场景节点（包括没有几何的叶子）对应一个空容器，嵌套关系与
/// 场景图完全一致。容器不携带名称或放置信息。
#[derive(Debug, Clone, Default)]
pub struct ContainerNode {
    /// 子容器（与场景节点的子节点顺序一致）
    pub children: Vec<ContainerNode>,
}

impl ContainerNode {
    /// 统计镜像中的容器总数（含自身）
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ContainerNode::count).sum::<usize>()
    }

    /// 计算镜像的最大嵌套深度（单个容器为 1）
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(ContainerNode::depth).max().unwrap_or(0)
    }
}

/// 物理场景描述
///
/// 由 [`SceneDescriptorBuilder`] 与几何导出器共同填充，再整体序列化
/// 为 XML 文档。
#[derive(Debug)]
pub struct SceneDescriptor {
    /// 模型名（写入文档根元素）
    pub model_name: String,

    /// 几何资产声明
    pub assets: Vec<AssetEntry>,

    /// 独立刚体条目
    pub bodies: Vec<BodyEntry>,

    /// 场景图层级的结构镜像
    pub hierarchy: Option<ContainerNode>,
}

impl SceneDescriptor {
    /// 创建空描述
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            assets: Vec::new(),
            bodies: Vec::new(),
            hierarchy: None,
        }
    }

    /// 追加一条几何资产声明
    pub fn add_asset(&mut self, name: impl Into<String>, file: impl Into<PathBuf>) {
        self.assets.push(AssetEntry {
            name: name.into(),
            file: file.into(),
        });
    }

    /// 追加一条独立刚体条目
    pub fn add_body(&mut self, name: impl Into<String>, mesh: impl Into<String>) {
        self.bodies.push(BodyEntry {
            name: name.into(),
            mesh: mesh.into(),
        });
    }

    /// 序列化为 XML 文档
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        // 向 String 写入不会失败，unwrap 集中在这一层
        let w = &mut xml;

        writeln!(w, "<mujoco model=\"{}\">", escape_attr(&self.model_name)).unwrap();

        writeln!(w, "  <asset>").unwrap();
        for asset in &self.assets {
            writeln!(
                w,
                "    <mesh name=\"{}\" file=\"{}\"/>",
                escape_attr(&asset.name),
                escape_attr(&asset.file.to_string_lossy())
            )
            .unwrap();
        }
        writeln!(w, "  </asset>").unwrap();

        writeln!(w, "  <worldbody>").unwrap();
        if let Some(root) = &self.hierarchy {
            write_container(w, root, 2);
        }
        for body in &self.bodies {
            writeln!(
                w,
                "    <body name=\"{}\" pos=\"0 0 0\">",
                escape_attr(&body.name)
            )
            .unwrap();
            writeln!(
                w,
                "      <geom type=\"mesh\" mesh=\"{}\"/>",
                escape_attr(&body.mesh)
            )
            .unwrap();
            writeln!(w, "    </body>").unwrap();
        }
        writeln!(w, "  </worldbody>").unwrap();

        writeln!(w, "</mujoco>").unwrap();
        xml
    }

    /// 将描述写入文件
    ///
    /// 描述文件写失败对加载阶段是致命的（区别于单个几何文件的逐项
    /// 跳过）。
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_xml())?;
        tracing::info!(path = %path.display(), "Scene descriptor written");
        Ok(())
    }
}

fn write_container(w: &mut String, node: &ContainerNode, indent: usize) {
    let pad = "  ".repeat(indent);
    if node.children.is_empty() {
        writeln!(w, "{}<body/>", pad).unwrap();
    } else {
        writeln!(w, "{}<body>", pad).unwrap();
        for child in &node.children {
            write_container(w, child, indent + 1);
        }
        writeln!(w, "{}</body>", pad).unwrap();
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// 场景图层级 → 结构镜像构建器
pub struct SceneDescriptorBuilder;

impl SceneDescriptorBuilder {
    /// 从指定节点开始镜像场景图层级
    ///
    /// 递归遍历：每个节点恰好访问一次，没有几何的叶子同样生成空容器，
    /// 输出嵌套深度与场景图嵌套深度一一对应。
    pub fn mirror(graph: &SceneGraph, start: NodeId) -> ContainerNode {
        let children = graph
            .node(start)
            .children()
            .iter()
            .map(|&child| Self::mirror(graph, child))
            .collect();
        ContainerNode { children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> (SceneGraph, usize) {
        // 深度 4: / -> World -> arm -> hand
        let mut graph = SceneGraph::new();
        let world = graph.add_node(graph.root(), "World").unwrap();
        let arm = graph.add_node(world, "arm").unwrap();
        graph.add_node(arm, "hand").unwrap();
        graph.add_node(world, "floor").unwrap();
        (graph, 4)
    }

    #[test]
    fn test_mirror_visits_every_node_once() {
        let (graph, _) = sample_graph();
        let mirror = SceneDescriptorBuilder::mirror(&graph, graph.root());
        assert_eq!(mirror.count(), graph.len());
    }

    #[test]
    fn test_mirror_preserves_nesting_depth() {
        let (graph, depth) = sample_graph();
        let mirror = SceneDescriptorBuilder::mirror(&graph, graph.root());
        assert_eq!(mirror.depth(), depth);
    }

    #[test]
    fn test_mirror_includes_empty_leaves() {
        let (graph, _) = sample_graph();
        let mirror = SceneDescriptorBuilder::mirror(&graph, graph.root());

        // /World 有两个子容器（arm, floor），floor 是空叶子
        let world = &mirror.children[0];
        assert_eq!(world.children.len(), 2);
        assert!(world.children[1].children.is_empty());
    }

    #[test]
    fn test_xml_contains_asset_and_body_entries() {
        let mut descriptor = SceneDescriptor::new("usd_scene");
        descriptor.add_asset("mesh_0", "export/mesh_0.obj");
        descriptor.add_body("mesh_0_body", "mesh_0");

        let xml = descriptor.to_xml();
        assert!(xml.contains("<mujoco model=\"usd_scene\">"));
        assert!(xml.contains("<mesh name=\"mesh_0\" file=\"export/mesh_0.obj\"/>"));
        assert!(xml.contains("<body name=\"mesh_0_body\" pos=\"0 0 0\">"));
        assert!(xml.contains("<geom type=\"mesh\" mesh=\"mesh_0\"/>"));
    }

    #[test]
    fn test_xml_escapes_attribute_values() {
        let mut descriptor = SceneDescriptor::new("a\"b&c");
        descriptor.add_asset("mesh_0", "dir/<odd>.obj");

        let xml = descriptor.to_xml();
        assert!(xml.contains("model=\"a&quot;b&amp;c\""));
        assert!(xml.contains("file=\"dir/&lt;odd&gt;.obj\""));
    }

    #[test]
    fn test_nested_containers_in_xml() {
        let (graph, _) = sample_graph();
        let mut descriptor = SceneDescriptor::new("scene");
        descriptor.hierarchy = Some(SceneDescriptorBuilder::mirror(&graph, graph.root()));

        let xml = descriptor.to_xml();
        // 空叶子序列化为自闭合容器
        assert!(xml.contains("<body/>"));
        // 嵌套层出现开闭标签
        assert!(xml.contains("<body>"));
        assert!(xml.contains("</body>"));
    }
}
