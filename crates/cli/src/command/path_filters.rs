use crate::command::domain::RequestOptions;
use anyhow::{Context, Result};
use glob::Pattern;

/// One `--include`/`--exclude` entry.
#[derive(Debug)]
enum PathRule {
    /// Whole-segment directory or file prefix, e.g. `src/components`.
    Prefix(String),
    /// Glob over the full project path, e.g. `src/**/*.test.ts`.
    Glob(Pattern),
}

impl PathRule {
    fn parse(raw: &str, flag: &str) -> Result<Option<Self>> {
        let value = normalize_project_path(raw);
        if value.is_empty() {
            return Ok(None);
        }
        if !is_glob(&value) {
            return Ok(Some(Self::Prefix(value)));
        }
        let pattern = Pattern::new(&value)
            .with_context(|| format!("Invalid glob for {flag}: {raw:?}"))?;
        Ok(Some(Self::Glob(pattern)))
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Prefix(prefix) => {
                path.strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            }
            Self::Glob(pattern) => pattern.matches(path),
        }
    }
}

/// `--pattern`: a glob, or a plain substring when it has no wildcards.
#[derive(Debug)]
enum NameMatcher {
    Substring(String),
    Glob(Pattern),
}

impl NameMatcher {
    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Substring(needle) => path.contains(needle.as_str()),
            Self::Glob(pattern) => pattern.matches(path),
        }
    }
}

/// Path filters compiled once per request and applied to every `FileSet` key.
#[derive(Debug, Default)]
pub struct PathFilter {
    include: Vec<PathRule>,
    exclude: Vec<PathRule>,
    name: Option<NameMatcher>,
}

impl PathFilter {
    pub fn from_options(options: &RequestOptions) -> Result<Self> {
        let compile = |raw: &[String], flag: &str| -> Result<Vec<PathRule>> {
            raw.iter()
                .filter_map(|entry| PathRule::parse(entry, flag).transpose())
                .collect()
        };

        let name = match options.file_pattern.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) if is_glob(raw) => Some(NameMatcher::Glob(
                Pattern::new(raw).with_context(|| format!("Invalid glob for --pattern: {raw:?}"))?,
            )),
            Some(raw) => Some(NameMatcher::Substring(raw.to_string())),
        };

        Ok(Self {
            include: compile(&options.include_paths, "--include")?,
            exclude: compile(&options.exclude_paths, "--exclude")?,
            name,
        })
    }

    pub fn is_active(&self) -> bool {
        !self.include.is_empty() || !self.exclude.is_empty() || self.name.is_some()
    }

    /// Whether a root-relative, forward-slash path is kept.
    pub fn allows(&self, path: &str) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|rule| rule.matches(path)) {
            return false;
        }
        if self.exclude.iter().any(|rule| rule.matches(path)) {
            return false;
        }
        self.name.as_ref().map_or(true, |name| name.matches(path))
    }
}

/// Project-relative, forward-slash form of a user-supplied path.
pub fn normalize_project_path(raw: &str) -> String {
    let mut value = raw.trim().replace('\\', "/");
    while let Some(rest) = value.strip_prefix("./") {
        value = rest.to_string();
    }
    value.trim_matches('/').to_string()
}

fn is_glob(value: &str) -> bool {
    value.contains(['*', '?', '['])
}
