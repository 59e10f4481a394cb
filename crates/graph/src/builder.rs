use crate::config::GraphConfig;
use crate::extract::{extract_exports, extract_imports};
use crate::resolve::PathResolver;
use crate::types::{FileNode, FileSet, FileType, ImportEdge, ImportKind, ProjectGraph};
use petgraph::graph::NodeIndex;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};

/// Per-file extraction result before nodes are linked.
struct ParsedFile<'a> {
    path: &'a str,
    imports: Vec<(String, ImportKind)>,
    exports: BTreeSet<String>,
}

/// Build a [`ProjectGraph`] from a [`FileSet`] snapshot.
pub struct GraphBuilder {
    config: GraphConfig,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl GraphBuilder {
    #[must_use]
    pub const fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Build a fresh graph; every call is independent of the previous ones.
    #[must_use]
    pub fn build(&self, files: &FileSet) -> ProjectGraph {
        let resolver = PathResolver::new(&self.config.resolve, files);

        // Phase 1: extract imports/exports per file
        let parsed: Vec<ParsedFile<'_>> = files
            .iter()
            .map(|(path, content)| self.parse_file(path, content, &resolver))
            .collect();

        // Phase 2: one node per file
        let mut graph = ProjectGraph::new();
        let mut path_to_node: HashMap<&str, NodeIndex> = HashMap::with_capacity(parsed.len());
        for file in &parsed {
            let idx = graph.add_node(FileNode {
                path: file.path.to_string(),
                exports: file.exports.clone(),
                file_type: FileType::classify(file.path),
                importance: 0,
            });
            path_to_node.insert(file.path, idx);
        }

        // Phase 3: import edges between known files, self-imports included
        let mut dropped = 0usize;
        for file in &parsed {
            let from_idx = path_to_node[file.path];
            for (target, kind) in &file.imports {
                match path_to_node.get(target.as_str()) {
                    Some(&to_idx) => {
                        graph.add_edge(from_idx, to_idx, ImportEdge { kind: *kind });
                    }
                    None => {
                        log::trace!("{}: dropping unresolved import {target}", file.path);
                        dropped += 1;
                    }
                }
            }
        }

        // Phase 4: importance over the finished edge set
        self.score(&mut graph);

        log::info!(
            "Built project graph: {} files, {} edges ({} unresolved imports dropped)",
            graph.node_count(),
            graph.edge_count(),
            dropped
        );

        graph
    }

    fn parse_file<'a>(
        &self,
        path: &'a str,
        content: &str,
        resolver: &PathResolver<'_>,
    ) -> ParsedFile<'a> {
        if let Some(limit) = self.config.max_file_bytes {
            if content.len() > limit {
                log::warn!(
                    "{path}: {} bytes exceeds max_file_bytes ({limit}), skipping extraction",
                    content.len()
                );
                return ParsedFile {
                    path,
                    imports: Vec::new(),
                    exports: BTreeSet::new(),
                };
            }
        }

        let imports = extract_imports(content, path, resolver);
        let exports = extract_exports(content);
        log::debug!(
            "{path}: {} imports, {} exports",
            imports.len(),
            exports.len()
        );

        ParsedFile {
            path,
            imports,
            exports,
        }
    }

    fn score(&self, graph: &mut ProjectGraph) {
        let weights = &self.config.scoring;
        let scores: Vec<(NodeIndex, i64)> = graph
            .graph
            .node_indices()
            .map(|idx| {
                let node = &graph.graph[idx];
                let fan_in = graph.neighbor_paths(idx, Direction::Incoming).len();
                let score = weights.score(&node.path, node.file_type, fan_in, node.exports.len());
                (idx, score)
            })
            .collect();

        for (idx, score) in scores {
            graph.set_importance(idx, score);
        }
    }
}
