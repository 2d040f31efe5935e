use crate::config::Config;

/// Substrings that prune a directory when found anywhere in its path.
///
/// Matching is a plain substring test over the rendered directory path
/// (`./lib/node_modules`), not a per-component comparison, so the term `lib`
/// also prunes `./library`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    /// Substrings tested against rendered directory paths
    terms: Vec<String>,
}

impl ExclusionSet {
    /// Creates a set from the given terms.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the first term contained in `dir_path`, if any.
    #[must_use]
    pub fn matching_term(&self, dir_path: &str) -> Option<&str> {
        self.terms
            .iter()
            .map(String::as_str)
            .find(|term| dir_path.contains(*term))
    }

    /// Whether `dir_path` contains any exclusion term.
    #[must_use]
    pub fn matches(&self, dir_path: &str) -> bool {
        self.matching_term(dir_path).is_some()
    }

    /// Whether the set has no terms, so nothing is ever pruned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Decides whether a file name qualifies for the combined output.
///
/// A name qualifies when it ends with one of the `always` suffixes, or when it
/// ends with one of the `guarded` suffixes and is not the reserved name. The
/// reserved name only vetoes the guarded branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InclusionRule {
    /// Suffixes that qualify any name
    always: Vec<String>,
    /// Suffixes that qualify any name except the reserved one
    guarded: Vec<String>,
    /// Exact name vetoed from the guarded branch
    reserved_name: Option<String>,
}

impl InclusionRule {
    /// Creates a rule; an empty `reserved_name` disables the veto.
    pub fn new<I, J, S>(always: I, guarded: J, reserved_name: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            always: always.into_iter().map(Into::into).collect(),
            guarded: guarded.into_iter().map(Into::into).collect(),
            reserved_name: reserved_name.filter(|name| !name.is_empty()),
        }
    }

    /// Whether a bare file name (no directory part) qualifies.
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        if self.always.iter().any(|s| file_name.ends_with(s.as_str())) {
            return true;
        }

        self.guarded.iter().any(|s| file_name.ends_with(s.as_str()))
            && self.reserved_name.as_deref() != Some(file_name)
    }
}

impl From<&Config> for ExclusionSet {
    fn from(config: &Config) -> Self {
        Self::new(config.scan.exclude.iter().cloned())
    }
}

impl From<&Config> for InclusionRule {
    fn from(config: &Config) -> Self {
        Self::new(
            config.include.suffixes.iter().cloned(),
            config.include.guarded_suffixes.iter().cloned(),
            Some(config.include.reserved_name.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_rule() -> InclusionRule {
        InclusionRule::from(&Config::default())
    }

    #[test]
    fn test_reserved_name_only_vetoes_guarded_suffix() {
        let rule = default_rule();
        assert!(rule.matches("a.vue"));
        assert!(rule.matches("b.js"));
        assert!(!rule.matches("combine_code.js"));

        let rule = InclusionRule::new([".vue"], [".js"], Some("combine_code.vue".to_string()));
        assert!(rule.matches("combine_code.vue"));
    }

    #[test]
    fn test_suffix_is_not_extension_match() {
        let rule = default_rule();
        assert!(rule.matches(".js"));
        assert!(!rule.matches("a.jsx"));
        assert!(!rule.matches("a.vue.bak"));
        assert!(rule.matches("bundle.min.js"));
    }

    #[test]
    fn test_empty_reserved_name_disables_veto() {
        let rule = InclusionRule::new([".vue"], [".js"], Some(String::new()));
        assert!(rule.matches("combine_code.js"));
    }

    #[test]
    fn test_exclusion_is_substring_match() {
        let set = ExclusionSet::new(["node_modules", ".public"]);
        assert!(set.matches("./lib/node_modules"));
        assert!(set.matches("./lib/node_modules/pkg"));
        assert!(set.matches("./old_node_modules_backup"));
        assert!(set.matches("./.public"));
        assert!(!set.matches("./public"));
        assert!(!set.matches("."));
    }

    #[test]
    fn test_matching_term_reports_first_hit() {
        let set = ExclusionSet::new(["lib", "node_modules"]);
        assert_eq!(set.matching_term("./lib/node_modules"), Some("lib"));
        assert_eq!(set.matching_term("./src"), None);
    }

    #[test]
    fn test_empty_exclusion_set_matches_nothing() {
        let set = ExclusionSet::default();
        assert!(set.is_empty());
        assert!(!set.matches("./anything"));
    }
}
