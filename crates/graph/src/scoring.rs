use crate::config::ScoringWeights;
use crate::types::FileType;

/// Directory components of a path, excluding the file name.
fn dir_segments(path: &str) -> impl Iterator<Item = &str> {
    let dir = path.rfind('/').map_or("", |idx| &path[..idx]);
    dir.split('/').filter(|s| !s.is_empty())
}

fn has_segment(path: &str, names: &[&str]) -> bool {
    dir_segments(path).any(|segment| names.contains(&segment))
}

impl FileType {
    /// Classify a path; the first matching rule wins.
    #[must_use]
    pub fn classify(path: &str) -> Self {
        if has_segment(path, &["components"]) && !has_segment(path, &["ui"]) {
            Self::Component
        } else if has_segment(path, &["hooks"]) {
            Self::Hook
        } else if has_segment(path, &["pages"]) {
            Self::Page
        } else if has_segment(path, &["utils", "lib", "services"]) {
            Self::Util
        } else if ["config", "constants", "types"]
            .iter()
            .any(|needle| path.contains(needle))
        {
            Self::Config
        } else {
            Self::Other
        }
    }
}

fn is_under_src_components(path: &str) -> bool {
    let segments: Vec<&str> = dir_segments(path).collect();
    segments
        .windows(2)
        .any(|pair| pair[0] == "src" && pair[1] == "components")
}

impl ScoringWeights {
    fn type_bonus(&self, file_type: FileType) -> i64 {
        match file_type {
            FileType::Component => self.component,
            FileType::Hook => self.hook,
            FileType::Page => self.page,
            FileType::Config => self.config,
            FileType::Util | FileType::Other => 0,
        }
    }

    fn is_critical(&self, path: &str) -> bool {
        self.critical_paths
            .iter()
            .any(|needle| !needle.is_empty() && path.contains(needle.as_str()))
    }

    /// Additive importance score for one file.
    ///
    /// Only meaningful relative to other files of the same graph.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn score(&self, path: &str, file_type: FileType, fan_in: usize, exports: usize) -> i64 {
        let mut score = self.fan_in * fan_in as i64 + self.export * exports as i64;

        if self.is_critical(path) {
            score += self.critical;
        }

        score += self.type_bonus(file_type);

        if is_under_src_components(path) {
            score += self.src_components;
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_follows_rule_priority() {
        assert_eq!(FileType::classify("src/components/Header.tsx"), FileType::Component);
        assert_eq!(FileType::classify("src/components/ui/button.tsx"), FileType::Other);
        assert_eq!(FileType::classify("src/hooks/useAuth.ts"), FileType::Hook);
        assert_eq!(FileType::classify("src/pages/Index.tsx"), FileType::Page);
        assert_eq!(FileType::classify("src/lib/utils.ts"), FileType::Util);
        assert_eq!(FileType::classify("src/utils/format.ts"), FileType::Util);
        assert_eq!(FileType::classify("src/services/api.ts"), FileType::Util);
        assert_eq!(FileType::classify("src/config.ts"), FileType::Config);
        assert_eq!(FileType::classify("src/constants.ts"), FileType::Config);
        assert_eq!(FileType::classify("src/types/index.ts"), FileType::Config);
        assert_eq!(FileType::classify("src/App.tsx"), FileType::Other);
    }

    #[test]
    fn classify_uses_directory_segments_not_substrings() {
        // A file named like a directory is not in that directory.
        assert_eq!(FileType::classify("src/hooks.ts"), FileType::Other);
        assert_eq!(FileType::classify("src/mycomponents/X.tsx"), FileType::Other);
        // Components win over hooks when both appear.
        assert_eq!(
            FileType::classify("src/components/hooks/useToggle.ts"),
            FileType::Component
        );
        // ui under components drops to the next rule.
        assert_eq!(
            FileType::classify("src/components/ui/hooks/useToast.ts"),
            FileType::Hook
        );
    }

    #[test]
    fn component_under_src_stacks_both_bonuses() {
        let weights = ScoringWeights::default();
        // 1 importer (+10), 1 export (+5), component (+5), src/components (+3)
        assert_eq!(
            weights.score("src/components/Header.tsx", FileType::Component, 1, 1),
            23
        );
    }

    #[test]
    fn critical_and_type_bonuses_add_up() {
        let weights = ScoringWeights::default();
        // critical "config" (+50) + config type (+20) + 2 exports (+10)
        assert_eq!(weights.score("src/config.ts", FileType::Config, 0, 2), 80);
        // entrypoint is critical, other type adds nothing
        assert_eq!(weights.score("src/App.tsx", FileType::Other, 0, 0), 50);
        assert_eq!(weights.score("src/lib/format.ts", FileType::Util, 3, 0), 30);
    }

    #[test]
    fn score_is_pure() {
        let weights = ScoringWeights::default();
        let a = weights.score("src/hooks/useAuth.ts", FileType::Hook, 4, 2);
        let b = weights.score("src/hooks/useAuth.ts", FileType::Hook, 4, 2);
        assert_eq!(a, b);
        assert_eq!(a, 40 + 10 + 8);
    }
}
