use crate::config::DEFAULT_EXPANSION_DEPTH;
use crate::types::{DependencyNode, FileType, GraphStats, ImportKind, ProjectGraph};
use petgraph::graph::NodeIndex;
use petgraph::Direction;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

impl ProjectGraph {
    /// Paths `path` imports, sorted. Empty for unknown paths.
    #[must_use]
    pub fn imports(&self, path: &str) -> Vec<&str> {
        self.find_node(path)
            .map(|idx| self.neighbor_paths(idx, Direction::Outgoing))
            .unwrap_or_default()
    }

    /// Paths importing `path`, sorted. Empty for unknown paths.
    #[must_use]
    pub fn used_by(&self, path: &str) -> Vec<&str> {
        self.find_node(path)
            .map(|idx| self.neighbor_paths(idx, Direction::Incoming))
            .unwrap_or_default()
    }

    /// How `from` first referenced `to`, if it imports it at all.
    #[must_use]
    pub fn import_kind(&self, from: &str, to: &str) -> Option<ImportKind> {
        let edge = self
            .graph
            .find_edge(self.find_node(from)?, self.find_node(to)?)?;
        Some(self.graph[edge].kind)
    }

    /// Owned snapshot of one node with both edge directions.
    #[must_use]
    pub fn node(&self, path: &str) -> Option<DependencyNode> {
        self.find_node(path).map(|idx| self.dependency_node(idx))
    }

    /// Snapshots of every node, in path order.
    #[must_use]
    pub fn dependency_nodes(&self) -> Vec<DependencyNode> {
        self.nodes()
            .map(|(idx, _)| self.dependency_node(idx))
            .collect()
    }

    fn dependency_node(&self, idx: NodeIndex) -> DependencyNode {
        let node = &self.graph[idx];
        DependencyNode {
            path: node.path.clone(),
            imports: owned(self.neighbor_paths(idx, Direction::Outgoing)),
            exports: node.exports.iter().cloned().collect(),
            used_by: owned(self.neighbor_paths(idx, Direction::Incoming)),
            importance: node.importance,
            file_type: node.file_type,
        }
    }

    /// Seeds plus every path within `depth` import/used-by hops of any seed.
    ///
    /// Seeds that are not in the graph are kept but not expanded. Each node
    /// is expanded at most once across all seeds.
    #[must_use]
    pub fn expand<S: AsRef<str>>(&self, targets: &[S], depth: usize) -> BTreeSet<String> {
        let mut relevant: BTreeSet<String> = targets
            .iter()
            .map(|target| target.as_ref().to_string())
            .collect();

        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();

        for target in targets {
            if let Some(idx) = self.find_node(target.as_ref()) {
                if visited.insert(idx) {
                    queue.push_back((idx, depth));
                }
            }
        }

        while let Some((current, remaining)) = queue.pop_front() {
            if remaining == 0 {
                continue;
            }

            let neighbors = self
                .graph
                .neighbors_directed(current, Direction::Outgoing)
                .chain(self.graph.neighbors_directed(current, Direction::Incoming));

            for neighbor in neighbors {
                relevant.insert(self.graph[neighbor].path.clone());
                if visited.insert(neighbor) {
                    queue.push_back((neighbor, remaining - 1));
                }
            }
        }

        relevant
    }

    /// Order paths by importance (highest first), then by path.
    #[must_use]
    pub fn rank<I, S>(&self, paths: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scored: Vec<(i64, String)> = paths
            .into_iter()
            .map(Into::into)
            .map(|path| (self.importance(&path), path))
            .collect();

        scored.sort_by(compare_ranked);
        scored.into_iter().map(|(_, path)| path).collect()
    }

    /// The files most worth sending along with `targets`.
    ///
    /// Expands two hops over imports and importers, ranks the whole set by
    /// importance and only then keeps the first `max_files`.
    #[must_use]
    pub fn relevant_files<S: AsRef<str>>(&self, targets: &[S], max_files: usize) -> Vec<String> {
        self.relevant_files_with_depth(targets, DEFAULT_EXPANSION_DEPTH, max_files)
    }

    #[must_use]
    pub fn relevant_files_with_depth<S: AsRef<str>>(
        &self,
        targets: &[S],
        depth: usize,
        max_files: usize,
    ) -> Vec<String> {
        if targets.is_empty() {
            return Vec::new();
        }

        if !targets.iter().any(|t| self.contains(t.as_ref())) {
            log::warn!(
                "None of {} target path(s) exist in the project graph ({} files); check path resolution",
                targets.len(),
                self.node_count()
            );
        }

        let relevant = self.expand(targets, depth);
        let candidates = relevant.len();
        let mut ranked = self.rank(relevant);
        ranked.truncate(max_files);

        log::debug!(
            "Relevance: {} target(s), {candidates} candidate(s), returning {}",
            targets.len(),
            ranked.len()
        );

        ranked
    }

    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let mut by_type: BTreeMap<FileType, usize> = BTreeMap::new();
        for node in self.graph.node_weights() {
            *by_type.entry(node.file_type).or_default() += 1;
        }
        GraphStats {
            files: self.node_count(),
            edges: self.edge_count(),
            by_type,
        }
    }

    /// Most important files overall.
    #[must_use]
    pub fn top_files(&self, limit: usize) -> Vec<String> {
        let mut ranked = self.rank(self.graph.node_weights().map(|node| node.path.clone()));
        ranked.truncate(limit);
        ranked
    }
}

fn owned(paths: Vec<&str>) -> Vec<String> {
    paths.into_iter().map(str::to_string).collect()
}

fn compare_ranked(a: &(i64, String), b: &(i64, String)) -> Ordering {
    b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1))
}
