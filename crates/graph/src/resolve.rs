use crate::config::ResolveConfig;
use crate::types::FileSet;

/// Maps import specifiers onto project-relative paths.
///
/// Resolution only consults the keys of the [`FileSet`] it was created
/// with; it never touches the filesystem.
pub struct PathResolver<'a> {
    config: &'a ResolveConfig,
    files: &'a FileSet,
}

impl<'a> PathResolver<'a> {
    #[must_use]
    pub const fn new(config: &'a ResolveConfig, files: &'a FileSet) -> Self {
        Self { config, files }
    }

    /// Resolve `specifier` as written in `from_path`.
    ///
    /// Returns `None` for external packages. A specifier that matches no
    /// known file still resolves, to `<path><first extension>`; callers
    /// drop such paths when they look them up.
    #[must_use]
    pub fn resolve(&self, specifier: &str, from_path: &str) -> Option<String> {
        let specifier = specifier.trim();

        let joined = if let Some(rest) = specifier.strip_prefix(self.config.alias_prefix.as_str()) {
            normalize_segments(&self.config.source_root, rest)
        } else if specifier.starts_with('.') {
            normalize_segments(parent_dir(from_path), specifier)
        } else {
            return None;
        };

        if joined.is_empty() {
            return None;
        }

        Some(self.with_extension(joined))
    }

    fn with_extension(&self, path: String) -> String {
        if self.files.contains_key(&path) || self.has_known_extension(&path) {
            return path;
        }

        let extensions = &self.config.extensions;
        if let Some(found) = extensions
            .iter()
            .map(|ext| format!("{path}{ext}"))
            .find(|candidate| self.files.contains_key(candidate))
        {
            return found;
        }

        if self.config.resolve_index_files {
            if let Some(found) = extensions
                .iter()
                .map(|ext| format!("{path}/index{ext}"))
                .find(|candidate| self.files.contains_key(candidate))
            {
                return found;
            }
        }

        let fallback = extensions.first().map_or("", String::as_str);
        format!("{path}{fallback}")
    }

    fn has_known_extension(&self, path: &str) -> bool {
        self.config
            .extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
    }
}

/// Directory portion of a project path (`""` for root-level files).
fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

/// Join `relative` onto `base`, folding `.` and `..` segments.
///
/// `..` above the project root is clamped rather than rejected.
fn normalize_segments(base: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> FileSet {
        paths
            .iter()
            .map(|p| ((*p).to_string(), String::new()))
            .collect()
    }

    fn resolve(known: &[&str], specifier: &str, from: &str) -> Option<String> {
        let config = ResolveConfig::default();
        let files = files(known);
        PathResolver::new(&config, &files).resolve(specifier, from)
    }

    #[test]
    fn external_packages_do_not_resolve() {
        assert_eq!(resolve(&[], "react", "src/App.tsx"), None);
        assert_eq!(resolve(&[], "@supabase/supabase-js", "src/App.tsx"), None);
        assert_eq!(resolve(&[], "lodash/merge", "src/App.tsx"), None);
    }

    #[test]
    fn relative_specifier_picks_first_existing_extension() {
        let known = ["src/components/Header.ts", "src/components/Header.tsx"];
        assert_eq!(
            resolve(&known, "./components/Header", "src/App.tsx").as_deref(),
            Some("src/components/Header.tsx")
        );

        let known = ["src/components/Header.js"];
        assert_eq!(
            resolve(&known, "./components/Header", "src/App.tsx").as_deref(),
            Some("src/components/Header.js")
        );
    }

    #[test]
    fn parent_segments_pop_one_directory_each() {
        let known = ["src/lib/utils.ts"];
        assert_eq!(
            resolve(&known, "../../lib/utils", "src/components/forms/Input.tsx").as_deref(),
            Some("src/lib/utils.ts")
        );
    }

    #[test]
    fn parent_segments_clamp_at_root() {
        assert_eq!(
            resolve(&["util.ts"], "../../../util", "src/App.tsx").as_deref(),
            Some("util.ts")
        );
    }

    #[test]
    fn alias_expands_to_source_root() {
        let known = ["src/hooks/useAuth.ts"];
        assert_eq!(
            resolve(&known, "@/hooks/useAuth", "src/pages/Login.tsx").as_deref(),
            Some("src/hooks/useAuth.ts")
        );
    }

    #[test]
    fn unmatched_specifier_falls_back_to_first_extension() {
        assert_eq!(
            resolve(&[], "./missing", "src/App.tsx").as_deref(),
            Some("src/missing.tsx")
        );
    }

    #[test]
    fn explicit_extension_is_kept() {
        assert_eq!(
            resolve(&[], "./data.js", "src/App.tsx").as_deref(),
            Some("src/data.js")
        );
        assert_eq!(
            resolve(&["src/data.json"], "./data.json", "src/App.tsx").as_deref(),
            Some("src/data.json")
        );
    }

    #[test]
    fn directory_import_falls_back_by_default() {
        assert_eq!(
            resolve(&["src/components/index.ts"], "./components", "src/App.tsx").as_deref(),
            Some("src/components.tsx")
        );
    }

    #[test]
    fn directory_import_finds_index_file_when_enabled() {
        let config = ResolveConfig {
            resolve_index_files: true,
            ..ResolveConfig::default()
        };
        let known = files(&["src/components/index.ts"]);
        let resolver = PathResolver::new(&config, &known);
        assert_eq!(
            resolver.resolve("./components", "src/App.tsx").as_deref(),
            Some("src/components/index.ts")
        );
    }

    #[test]
    fn root_level_importer() {
        assert_eq!(
            resolve(&["vite.config.ts"], "./vite.config", "index.ts").as_deref(),
            Some("vite.config.ts")
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let known = ["src/a.ts", "src/a.tsx", "src/a/index.ts"];
        let first = resolve(&known, "./a", "src/b.ts");
        for _ in 0..10 {
            assert_eq!(resolve(&known, "./a", "src/b.ts"), first);
        }
        assert_eq!(first.as_deref(), Some("src/a.tsx"));
    }
}
