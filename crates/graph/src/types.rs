use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Snapshot of a project's sources: project-relative path to file content.
///
/// Ordered by path so every pass over it is deterministic.
pub type FileSet = BTreeMap<String, String>;

/// Coarse role of a file, derived from its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Component,
    Hook,
    Page,
    Util,
    Config,
    Other,
}

impl FileType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Hook => "hook",
            Self::Page => "page",
            Self::Util => "util",
            Self::Config => "config",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexical form an import was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// `import … from "x"`
    Import,
    /// `require("x")`
    Require,
}

/// Edge weight: `source` imports `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEdge {
    pub kind: ImportKind,
}

/// Node weight stored in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub path: String,
    pub exports: BTreeSet<String>,
    pub file_type: FileType,
    pub importance: i64,
}

/// Owned, caller-facing view of one file with both edge directions resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    pub path: String,
    pub imports: Vec<String>,
    pub exports: Vec<String>,
    pub used_by: Vec<String>,
    pub importance: i64,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub files: usize,
    pub edges: usize,
    pub by_type: BTreeMap<FileType, usize>,
}

/// Import graph over one [`FileSet`] snapshot.
///
/// Built once by [`crate::GraphBuilder`] and never mutated afterwards, so it
/// can be shared freely between readers.
#[derive(Debug, Clone, Default)]
pub struct ProjectGraph {
    pub(crate) graph: DiGraph<FileNode, ImportEdge>,
    path_index: HashMap<String, NodeIndex>,
}

impl ProjectGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_node(&mut self, node: FileNode) -> NodeIndex {
        let path = node.path.clone();
        let idx = self.graph.add_node(node);
        self.path_index.insert(path, idx);
        idx
    }

    /// Adds `from -> to` unless it already exists; the first edge's kind is kept.
    pub(crate) fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: ImportEdge) {
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, edge);
        }
    }

    #[must_use]
    pub fn find_node(&self, path: &str) -> Option<NodeIndex> {
        self.path_index.get(path).copied()
    }

    #[must_use]
    pub fn get_node(&self, idx: NodeIndex) -> Option<&FileNode> {
        self.graph.node_weight(idx)
    }

    #[must_use]
    pub fn file(&self, path: &str) -> Option<&FileNode> {
        self.find_node(path).and_then(|idx| self.get_node(idx))
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.path_index.contains_key(path)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Importance of `path`, or 0 when it is not in the graph.
    #[must_use]
    pub fn importance(&self, path: &str) -> i64 {
        self.file(path).map_or(0, |node| node.importance)
    }

    /// Iterate nodes in path order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &FileNode)> + '_ {
        let mut indices: Vec<NodeIndex> = self.graph.node_indices().collect();
        indices.sort_by(|a, b| self.graph[*a].path.cmp(&self.graph[*b].path));
        indices.into_iter().map(move |idx| (idx, &self.graph[idx]))
    }

    pub(crate) fn neighbor_paths(&self, idx: NodeIndex, direction: Direction) -> Vec<&str> {
        let mut paths: Vec<&str> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].path.as_str())
            .collect();
        paths.sort_unstable();
        paths.dedup();
        paths
    }

    pub(crate) fn set_importance(&mut self, idx: NodeIndex, importance: i64) {
        if let Some(node) = self.graph.node_weight_mut(idx) {
            node.importance = importance;
        }
    }
}
