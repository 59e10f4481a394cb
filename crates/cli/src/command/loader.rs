use crate::command::domain::RequestOptions;
use crate::command::path_filters::PathFilter;
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use magellan_graph::{FileSet, ResolveConfig};
use std::fs;
use std::path::Path;

/// Read every graphable source file under `options.root` into a [`FileSet`].
///
/// Honors `.gitignore` (with or without a git checkout) and the request's
/// path filters. Keys are root-relative with forward slashes.
pub fn load_file_set(options: &RequestOptions, resolve: &ResolveConfig) -> Result<FileSet> {
    let root = options.root.as_path();
    if !root.is_dir() {
        anyhow::bail!("Project root {} is not a directory", root.display());
    }

    let filter = PathFilter::from_options(options)?;
    let mut files = FileSet::new();
    let mut skipped = 0usize;

    let walker = WalkBuilder::new(root)
        .standard_filters(true)
        .require_git(false)
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Walk error under {}: {err}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Some(rel_path) = relative_path(root, path) else {
            continue;
        };
        if !has_graph_extension(&rel_path, resolve) {
            continue;
        }
        if !filter.allows(&rel_path) {
            skipped += 1;
            continue;
        }

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        match String::from_utf8(bytes) {
            Ok(content) => {
                files.insert(rel_path, content);
            }
            Err(_) => log::debug!("{rel_path}: not valid UTF-8, skipping"),
        }
    }

    if filter.is_active() {
        log::debug!("Path filters excluded {skipped} file(s)");
    }
    log::info!("Loaded {} file(s) from {}", files.len(), root.display());

    Ok(files)
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

fn has_graph_extension(rel_path: &str, resolve: &ResolveConfig) -> bool {
    rel_path.ends_with(".json")
        || resolve
            .extensions
            .iter()
            .any(|ext| rel_path.ends_with(ext.as_str()))
}
