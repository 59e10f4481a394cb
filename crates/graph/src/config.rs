use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default cap on ranked relevance results.
pub const DEFAULT_MAX_FILES: usize = 15;

/// Default hop count for relevance expansion.
pub const DEFAULT_EXPANSION_DEPTH: usize = 2;

/// File names searched by [`GraphConfig::discover`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["magellan.toml", ".magellan.toml"];

/// Top-level grapher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GraphConfig {
    /// Files larger than this are graphed without extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_bytes: Option<usize>,

    pub resolve: ResolveConfig,

    pub scoring: ScoringWeights,

    pub relevance: RelevanceConfig,
}

/// How import specifiers map onto project paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Internal alias prefix, e.g. `@/`.
    pub alias_prefix: String,

    /// What the alias prefix expands to.
    pub source_root: String,

    /// Extension preference list, tried in order for extensionless specifiers.
    pub extensions: Vec<String>,

    /// Probe `<dir>/index<ext>` before fabricating a path. Off by default.
    pub resolve_index_files: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            alias_prefix: "@/".to_string(),
            source_root: "src/".to_string(),
            extensions: [".tsx", ".ts", ".jsx", ".js"]
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            resolve_index_files: false,
        }
    }
}

/// Point weights for the importance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Per importing file.
    pub fan_in: i64,

    /// Per exported symbol.
    pub export: i64,

    /// Flat bonus when the path contains a critical substring.
    pub critical: i64,

    pub component: i64,
    pub hook: i64,
    pub page: i64,
    pub config: i64,

    /// Extra bonus for files under `src/components/`.
    pub src_components: i64,

    pub critical_paths: Vec<String>,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            fan_in: 10,
            export: 5,
            critical: 50,
            component: 5,
            hook: 8,
            page: 15,
            config: 20,
            src_components: 3,
            critical_paths: [
                "main.tsx",
                "main.ts",
                "App.tsx",
                "index.tsx",
                "router",
                "routes",
                "config",
                "constants",
                "types",
                "integrations/supabase/client",
            ]
            .iter()
            .map(|p| (*p).to_string())
            .collect(),
        }
    }
}

/// Relevance expansion limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceConfig {
    pub max_files: usize,
    pub depth: usize,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            depth: DEFAULT_EXPANSION_DEPTH,
        }
    }
}

impl GraphConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&raw)?;
        log::debug!("Loaded graph config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Look for a config file in `root`, falling back to defaults.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        for name in CONFIG_FILE_NAMES {
            let candidate = root.join(name);
            if candidate.is_file() {
                return Self::load(candidate);
            }
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        let resolve = &self.resolve;
        if resolve.alias_prefix.is_empty() {
            return Err(GraphError::InvalidConfig(
                "resolve.alias_prefix must not be empty".to_string(),
            ));
        }
        if resolve.extensions.is_empty() {
            return Err(GraphError::InvalidConfig(
                "resolve.extensions must list at least one extension".to_string(),
            ));
        }
        if let Some(bad) = resolve.extensions.iter().find(|ext| !ext.starts_with('.')) {
            return Err(GraphError::InvalidConfig(format!(
                "extension {bad:?} must start with '.'"
            )));
        }
        Ok(())
    }
}
