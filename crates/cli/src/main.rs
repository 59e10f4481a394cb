//! Magellan CLI
//!
//! Builds the import graph of a generated web project and prints JSON.
//!
//! ## Commands
//!
//! - `graph` - Every file with imports, exports, importers, type and importance
//! - `relevant` - Ranked files worth sending along with the target paths
//! - `pack` - Ranked files with contents, bounded by file and character budgets
//! - `stats` - Node/edge counts, files per type and the most important files
//!
//! Logs go to stderr (`RUST_LOG`, default `warn`); stdout carries only JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use magellan_graph::GraphConfig;
use std::io::Write;
use std::path::{Path, PathBuf};

mod command;

use command::{CommandAction, CommandHandler, CommandRequest, RequestOptions};

#[derive(Parser)]
#[command(name = "magellan")]
#[command(about = "Import graph and relevance ranking for generated web projects")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to magellan.toml in the project root)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    options: RequestOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every node of the dependency graph
    Graph,
    /// Print the ranked files relevant to the targets
    Relevant {
        /// Seed path, relative to the root (repeatable)
        #[arg(short, long = "target", value_name = "PATH", required = true)]
        targets: Vec<String>,

        /// Cap on returned paths
        #[arg(long)]
        max_files: Option<usize>,
    },
    /// Print a context pack (paths and contents) for the targets
    Pack {
        /// Seed path, relative to the root (repeatable)
        #[arg(short, long = "target", value_name = "PATH", required = true)]
        targets: Vec<String>,

        /// Cap on packed files
        #[arg(long)]
        max_files: Option<usize>,

        /// Character budget across packed contents
        #[arg(long)]
        max_chars: Option<usize>,
    },
    /// Print graph statistics
    Stats,
}

impl From<Commands> for CommandAction {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Graph => Self::Graph,
            Commands::Relevant { targets, max_files } => Self::Relevant { targets, max_files },
            Commands::Pack {
                targets,
                max_files,
                max_chars,
            } => Self::Pack {
                targets,
                max_files,
                max_chars,
            },
            Commands::Stats => Self::Stats,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout is reserved for JSON output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = load_config(cli.config.as_deref(), &cli.options.root)?;
    let handler = CommandHandler::new(config);
    let data = handler.execute(CommandRequest {
        action: cli.command.into(),
        options: cli.options,
    })?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &data).context("Failed to write output")?;
    writeln!(stdout).context("Failed to write output")?;
    Ok(())
}

fn load_config(explicit: Option<&Path>, root: &Path) -> Result<GraphConfig> {
    match explicit {
        Some(path) => GraphConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => GraphConfig::discover(root)
            .with_context(|| format!("Failed to load config from {}", root.display())),
    }
}
