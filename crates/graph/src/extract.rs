//! Lexical import/export extraction for JS/TS sources.
//!
//! This is pattern matching, not parsing: content that matches nothing
//! yields empty results. Dynamic `import("…")` and bare side-effect
//! imports are not scanned.

use crate::resolve::PathResolver;
use crate::types::ImportKind;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

// `import <clause> from "x"`; the clause may span lines.
static IMPORT_FROM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\s+(?:type\s+)?[\w$*{}\s,]+?\s*\bfrom\s*['"]([^'"\n]+)['"]"#)
        .expect("valid import regex")
});

static REQUIRE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\brequire\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#).expect("valid require regex")
});

static EXPORT_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\bexport\s+(?:declare\s+)?(?:async\s+)?(?:function\s*\*?|const|let|var|abstract\s+class|class|interface|type|enum)\s+([A-Za-z_$][\w$]*)",
    )
    .expect("valid export declaration regex")
});

static EXPORT_BRACES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bexport\s+(?:type\s+)?\{([^}]*)\}").expect("valid export list regex")
});

static EXPORT_DEFAULT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bexport\s+default\b").expect("valid default export regex"));

/// Raw import specifiers in source order, with the form each was found in.
#[must_use]
pub fn extract_import_specifiers(content: &str) -> Vec<(String, ImportKind)> {
    let mut found: Vec<(usize, String, ImportKind)> = IMPORT_FROM
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| (m.start(), m.as_str().to_string(), ImportKind::Import)))
        .chain(REQUIRE_CALL.captures_iter(content).filter_map(|caps| {
            caps.get(1)
                .map(|m| (m.start(), m.as_str().to_string(), ImportKind::Require))
        }))
        .collect();

    found.sort_by_key(|(offset, _, _)| *offset);
    found
        .into_iter()
        .map(|(_, specifier, kind)| (specifier, kind))
        .collect()
}

/// Resolved project paths imported by `from_path`, deduplicated in first-seen order.
///
/// External packages and specifiers the resolver rejects contribute nothing.
#[must_use]
pub fn extract_imports(
    content: &str,
    from_path: &str,
    resolver: &PathResolver<'_>,
) -> Vec<(String, ImportKind)> {
    let mut seen = HashSet::new();
    let mut imports = Vec::new();

    for (specifier, kind) in extract_import_specifiers(content) {
        let Some(resolved) = resolver.resolve(&specifier, from_path) else {
            continue;
        };
        if seen.insert(resolved.clone()) {
            imports.push((resolved, kind));
        }
    }

    imports
}

/// Exported symbol names; `"default"` marks a default export.
#[must_use]
pub fn extract_exports(content: &str) -> BTreeSet<String> {
    let mut exports = BTreeSet::new();

    for caps in EXPORT_DECL.captures_iter(content) {
        if let Some(name) = caps.get(1) {
            exports.insert(name.as_str().to_string());
        }
    }

    for caps in EXPORT_BRACES.captures_iter(content) {
        let Some(list) = caps.get(1) else {
            continue;
        };
        for item in list.as_str().split(',') {
            // `a as b` -> a; `type T` -> T
            let item = item.trim();
            let item = item.strip_prefix("type ").unwrap_or(item).trim_start();
            let name = item.split_whitespace().next().unwrap_or_default();
            if is_identifier(name) {
                exports.insert(name.to_string());
            }
        }
    }

    if EXPORT_DEFAULT.is_match(content) {
        exports.insert("default".to_string());
    }

    exports
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolveConfig;
    use crate::types::FileSet;

    fn specifiers(content: &str) -> Vec<String> {
        extract_import_specifiers(content)
            .into_iter()
            .map(|(spec, _)| spec)
            .collect()
    }

    #[test]
    fn finds_import_forms() {
        let content = r#"
import React from "react";
import { useState, useEffect } from 'react';
import * as utils from "./utils";
import type { Props } from "./types";
import Default, { named } from "@/lib/api";
const fs = require("fs");
const local = require( './local' );
"#;
        assert_eq!(
            specifiers(content),
            vec!["react", "react", "./utils", "./types", "@/lib/api", "fs", "./local"]
        );
    }

    #[test]
    fn multiline_import_clause() {
        let content = "import {\n  Button,\n  Card as Panel,\n} from \"@/components/ui/button\";";
        assert_eq!(specifiers(content), vec!["@/components/ui/button"]);
    }

    #[test]
    fn skips_dynamic_and_side_effect_imports() {
        let content = r#"
import "./index.css";
const Page = lazy(() => import("./pages/Page"));
"#;
        assert!(specifiers(content).is_empty());
    }

    #[test]
    fn require_kind_is_tagged() {
        let found = extract_import_specifiers(r#"const x = require("./x"); import y from "./y";"#);
        assert_eq!(
            found,
            vec![
                ("./x".to_string(), ImportKind::Require),
                ("./y".to_string(), ImportKind::Import),
            ]
        );
    }

    #[test]
    fn exports_collect_names_and_default() {
        let content = r#"
export function Header() {}
export const API_URL = "x";
export class Store {}
export interface Props {}
export type Mode = "a" | "b";
export enum Color { Red }
export async function load() {}
export { alpha, beta as gamma };
export default Header;
"#;
        let exports = extract_exports(content);
        let expected: BTreeSet<String> = [
            "Header", "API_URL", "Store", "Props", "Mode", "Color", "load", "alpha", "beta",
            "default",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
        assert_eq!(exports, expected);
        assert!(!exports.contains("gamma"));
    }

    #[test]
    fn duplicate_export_names_collapse() {
        let content = "export type Foo = string;\nexport function Foo() {}\nexport { Foo };";
        assert_eq!(extract_exports(content).len(), 1);
    }

    #[test]
    fn export_default_function_counts_once_as_default() {
        let exports = extract_exports("export default function App() {}");
        assert_eq!(exports.into_iter().collect::<Vec<_>>(), vec!["default"]);
    }

    #[test]
    fn garbage_content_extracts_nothing() {
        let content = "}{ import from ; export ; require( )";
        assert!(extract_import_specifiers(content).is_empty());
        assert!(extract_exports(content).is_empty());
    }

    #[test]
    fn extract_imports_resolves_and_dedupes() {
        let mut files = FileSet::new();
        files.insert("src/App.tsx".into(), String::new());
        files.insert("src/lib/api.ts".into(), String::new());
        let config = ResolveConfig::default();
        let resolver = PathResolver::new(&config, &files);

        let content = r#"
import api from "@/lib/api";
import { get } from "./lib/api";
import React from "react";
"#;
        let imports = extract_imports(content, "src/App.tsx", &resolver);
        assert_eq!(
            imports,
            vec![("src/lib/api.ts".to_string(), ImportKind::Import)]
        );
    }
}
