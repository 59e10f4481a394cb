//! # Magellan Graph
//!
//! Static import graph over a generated web project, used to pick which files
//! go along with a code-generation request.
//!
//! ## Features
//!
//! - **Import/export extraction** - regex scan of `import … from`, `require(…)` and `export` forms
//! - **Path resolution** - relative and `@/` alias specifiers, extension and index-file probing
//! - **Importance scoring** - fan-in, export surface, file type and critical-path bonuses
//! - **Relevance ranking** - bounded 2-hop expansion around seed files, ranked and capped
//! - **Context assembly** - ranked paths dereferenced into a character-budgeted pack
//!
//! ## Architecture
//!
//! ```text
//! FileSet (path -> content)
//!     │
//!     ├──> Extractor + PathResolver
//!     │      ├─ import/require specifiers
//!     │      ├─ exported symbol names
//!     │      └─ specifier -> project path (or dropped)
//!     │
//!     ├──> GraphBuilder
//!     │      ├─ Nodes: one per file (type, exports, importance)
//!     │      └─ Edges: file imports file (usedBy = incoming edges)
//!     │
//!     └──> ProjectGraph / ContextAssembler
//!            ├─ Expand seeds over imports + usedBy (depth 2)
//!            ├─ Rank by importance, tie-break on path
//!            └─ Truncate to max files / max chars
//! ```
//!
//! ## Example
//!
//! ```
//! use magellan_graph::{FileSet, GraphBuilder, GraphConfig};
//!
//! let mut files = FileSet::new();
//! files.insert("src/App.tsx".into(), r#"import Header from "./components/Header""#.into());
//! files.insert("src/components/Header.tsx".into(), "export function Header() {}".into());
//!
//! let graph = GraphBuilder::new(GraphConfig::default()).build(&files);
//! let ranked = graph.relevant_files(&["src/App.tsx"], 10);
//! assert_eq!(ranked.len(), 2);
//! ```

mod assembler;
mod builder;
mod config;
mod error;
mod extract;
mod graph;
mod resolve;
mod scoring;
mod types;

pub use assembler::{
    AssembledContext, AssemblyOptions, ContextAssembler, ContextBudget, ContextFile, ContextRole,
};
pub use builder::GraphBuilder;
pub use config::{
    GraphConfig, RelevanceConfig, ResolveConfig, ScoringWeights, CONFIG_FILE_NAMES,
    DEFAULT_EXPANSION_DEPTH, DEFAULT_MAX_FILES,
};
pub use error::{GraphError, Result};
pub use extract::{extract_exports, extract_import_specifiers, extract_imports};
pub use resolve::PathResolver;
pub use types::{
    DependencyNode, FileNode, FileSet, FileType, GraphStats, ImportEdge, ImportKind, ProjectGraph,
};
