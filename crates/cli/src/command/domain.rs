use clap::Args;
use magellan_graph::{DependencyNode, GraphStats};
use serde::Serialize;
use std::path::PathBuf;

/// Which project files a command sees.
#[derive(Debug, Clone, Args)]
pub struct RequestOptions {
    /// Project root to walk
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub root: PathBuf,

    /// Only load files under this path prefix (repeatable)
    #[arg(long = "include", value_name = "PREFIX", global = true)]
    pub include_paths: Vec<String>,

    /// Skip files under this path prefix (repeatable)
    #[arg(long = "exclude", value_name = "PREFIX", global = true)]
    pub exclude_paths: Vec<String>,

    /// Glob (or plain substring) the relative path must match
    #[arg(long = "pattern", value_name = "GLOB", global = true)]
    pub file_pattern: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            include_paths: Vec::new(),
            exclude_paths: Vec::new(),
            file_pattern: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    Graph,
    Relevant {
        targets: Vec<String>,
        max_files: Option<usize>,
    },
    Pack {
        targets: Vec<String>,
        max_files: Option<usize>,
        max_chars: Option<usize>,
    },
    Stats,
}

impl CommandAction {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Relevant { .. } => "relevant",
            Self::Pack { .. } => "pack",
            Self::Stats => "stats",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandRequest {
    pub action: CommandAction,
    pub options: RequestOptions,
}

/// `graph` output: every node in path order.
pub type GraphOutput = Vec<DependencyNode>;

/// `stats` output.
#[derive(Debug, Serialize)]
pub struct StatsOutput {
    #[serde(flatten)]
    pub stats: GraphStats,
    pub top_files: Vec<String>,
}
