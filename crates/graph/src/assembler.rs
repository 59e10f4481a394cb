use crate::config::{RelevanceConfig, DEFAULT_EXPANSION_DEPTH, DEFAULT_MAX_FILES};
use crate::types::{FileSet, FileType, ProjectGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Gathers the ranked relevant files for a set of seeds and dereferences
/// them into a bounded context pack for a generation request.
pub struct ContextAssembler {
    graph: ProjectGraph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyOptions {
    pub max_files: usize,
    pub max_chars: usize,
    pub depth: usize,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_chars: 120_000,
            depth: DEFAULT_EXPANSION_DEPTH,
        }
    }
}

impl From<RelevanceConfig> for AssemblyOptions {
    fn from(config: RelevanceConfig) -> Self {
        Self {
            max_files: config.max_files,
            depth: config.depth,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextRole {
    /// Requested by the caller.
    Target,
    /// Pulled in through the import graph.
    Related,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFile {
    pub path: String,
    pub role: ContextRole,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    pub importance: i64,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBudget {
    pub max_chars: usize,
    pub used_chars: usize,
    pub truncated: bool,
    pub dropped_files: usize,
    /// Ranked paths with no content in the file set.
    pub missing_files: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledContext {
    pub files: Vec<ContextFile>,
    pub budget: ContextBudget,
}

impl AssembledContext {
    /// Total characters across included file contents.
    #[must_use]
    pub fn total_chars(&self) -> usize {
        self.budget.used_chars
    }

    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }
}

impl ContextAssembler {
    #[must_use]
    pub const fn new(graph: ProjectGraph) -> Self {
        Self { graph }
    }

    /// Rank the files relevant to `targets` and pack their contents in
    /// rank order while they fit in `options.max_chars`.
    ///
    /// A file that does not fit is skipped and packing continues with
    /// the next candidate.
    #[must_use]
    pub fn assemble<S: AsRef<str>>(
        &self,
        files: &FileSet,
        targets: &[S],
        options: AssemblyOptions,
    ) -> AssembledContext {
        let ranked = self
            .graph
            .relevant_files_with_depth(targets, options.depth, options.max_files);
        let seeds: HashSet<&str> = targets.iter().map(|t| t.as_ref()).collect();

        let mut budget = ContextBudget {
            max_chars: options.max_chars,
            ..ContextBudget::default()
        };
        let mut packed = Vec::with_capacity(ranked.len());

        for path in ranked {
            let Some(content) = files.get(&path) else {
                log::debug!("{path}: ranked but absent from file set");
                budget.missing_files += 1;
                continue;
            };

            let chars = content.chars().count();
            if budget.used_chars + chars > budget.max_chars {
                budget.truncated = true;
                budget.dropped_files += 1;
                continue;
            }
            budget.used_chars += chars;

            let role = if seeds.contains(path.as_str()) {
                ContextRole::Target
            } else {
                ContextRole::Related
            };
            let node = self.graph.file(&path);

            packed.push(ContextFile {
                file_type: node.map(|n| n.file_type),
                importance: node.map_or(0, |n| n.importance),
                role,
                content: content.clone(),
                path,
            });
        }

        if budget.truncated {
            log::debug!(
                "Context pack over budget: {} file(s) dropped, {}/{} chars used",
                budget.dropped_files,
                budget.used_chars,
                budget.max_chars
            );
        }

        AssembledContext {
            files: packed,
            budget,
        }
    }

    #[must_use]
    pub const fn graph(&self) -> &ProjectGraph {
        &self.graph
    }
}
