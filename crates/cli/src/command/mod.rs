pub mod domain;
mod loader;
mod path_filters;

pub use domain::{CommandAction, CommandRequest, RequestOptions};

use domain::{GraphOutput, StatsOutput};
use loader::load_file_set;

use anyhow::Result;
use magellan_graph::{AssemblyOptions, ContextAssembler, GraphBuilder, GraphConfig};
use serde_json::Value;
use std::time::Instant;

const TOP_FILES_IN_STATS: usize = 10;

pub struct CommandHandler {
    builder: GraphBuilder,
}

impl CommandHandler {
    pub const fn new(config: GraphConfig) -> Self {
        Self {
            builder: GraphBuilder::new(config),
        }
    }

    /// Load the project, build its graph and answer one command as JSON.
    pub fn execute(&self, request: CommandRequest) -> Result<Value> {
        let CommandRequest { action, options } = request;
        let started = Instant::now();
        let name = action.name();

        let config = self.builder.config();
        let files = load_file_set(&options, &config.resolve)?;
        let graph = self.builder.build(&files);
        let relevance = config.relevance;

        let data = match action {
            CommandAction::Graph => {
                let nodes: GraphOutput = graph.dependency_nodes();
                serde_json::to_value(nodes)?
            }
            CommandAction::Relevant { targets, max_files } => {
                let targets = normalize_targets(&targets);
                let ranked = graph.relevant_files_with_depth(
                    &targets,
                    relevance.depth,
                    max_files.unwrap_or(relevance.max_files),
                );
                serde_json::to_value(ranked)?
            }
            CommandAction::Pack {
                targets,
                max_files,
                max_chars,
            } => {
                let targets = normalize_targets(&targets);
                let defaults = AssemblyOptions::from(relevance);
                let assembly = AssemblyOptions {
                    max_files: max_files.unwrap_or(defaults.max_files),
                    max_chars: max_chars.unwrap_or(defaults.max_chars),
                    ..defaults
                };
                let pack = ContextAssembler::new(graph).assemble(&files, &targets, assembly);
                serde_json::to_value(pack)?
            }
            CommandAction::Stats => {
                let output = StatsOutput {
                    stats: graph.stats(),
                    top_files: graph.top_files(TOP_FILES_IN_STATS),
                };
                serde_json::to_value(output)?
            }
        };

        log::debug!(
            "{name} finished in {} ms",
            started.elapsed().as_millis()
        );
        Ok(data)
    }
}

fn normalize_targets(targets: &[String]) -> Vec<String> {
    targets
        .iter()
        .map(|t| path_filters::normalize_project_path(t))
        .filter(|t| !t.is_empty())
        .collect()
}
