use crate::output;
use colored::Colorize;
use std::collections::HashSet;

/// Recognizes the configuration fields combine-code understands
pub struct ConfigValidator {
    /// Fully qualified `section.key` names accepted in a config file
    known_fields: HashSet<&'static str>,
}

impl ConfigValidator {
    /// Create a new validator with known configuration fields
    #[must_use]
    pub fn new() -> Self {
        let known_fields = [
            "core.root",
            "core.output",
            "scan.exclude",
            "scan.follow_symlinks",
            "scan.keep_going",
            "include.suffixes",
            "include.guarded_suffixes",
            "include.reserved_name",
            "performance.mmap_threshold",
        ]
        .into_iter()
        .collect();

        Self { known_fields }
    }

    /// Collect the fields of a TOML document that have no effect
    ///
    /// Text that does not parse yields no fields; parse errors are reported
    /// by the loader itself.
    #[must_use]
    pub fn unknown_fields(&self, content: &str) -> Vec<String> {
        let Ok(parsed) = toml::from_str::<toml::Value>(content) else {
            return Vec::new();
        };

        let mut unknown = Vec::new();
        self.check_table(&parsed, "", &mut unknown);
        unknown
    }

    /// Print a warning block for every unknown field in `content`
    pub fn warn_unknown_fields(&self, content: &str) {
        let unknown = self.unknown_fields(content);
        if unknown.is_empty() {
            return;
        }

        output::warning("Configuration warnings:");
        for field in &unknown {
            eprintln!("  Unknown configuration field: {}", field.yellow());
        }
    }

    /// Recursively checks a TOML table for unknown fields
    ///
    /// Known sections are descended into; any leaf (or unknown section) not in
    /// the known set is recorded with its dotted path.
    fn check_table(&self, table: &toml::Value, prefix: &str, unknown: &mut Vec<String>) {
        if let toml::Value::Table(map) = table {
            for (key, value) in map {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };

                if self.known_fields.contains(full_key.as_str()) {
                    continue;
                }

                let is_section = prefix.is_empty()
                    && matches!(value, toml::Value::Table(_))
                    && self.is_known_section(&full_key);
                if is_section {
                    self.check_table(value, &full_key, unknown);
                } else {
                    unknown.push(full_key);
                }
            }
        }
    }

    /// Whether any known field lives under `section`
    fn is_known_section(&self, section: &str) -> bool {
        self.known_fields
            .iter()
            .any(|field| field.split('.').next() == Some(section))
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_fields_produce_no_warnings() {
        let validator = ConfigValidator::new();
        let content = r#"
[core]
root = "."
output = "out.txt"

[scan]
exclude = ["target"]
keep_going = true

[include]
suffixes = [".rs"]
reserved_name = ""
"#;
        assert!(validator.unknown_fields(content).is_empty());
    }

    #[test]
    fn test_unknown_leaf_and_section() {
        let validator = ConfigValidator::new();
        let content = r#"
[core]
root = "."
colour = "always"

[remote]
url = "x"
"#;
        let unknown = validator.unknown_fields(content);
        assert_eq!(unknown, vec!["core.colour", "remote"]);
    }

    #[test]
    fn test_invalid_toml_is_ignored() {
        let validator = ConfigValidator::new();
        assert!(validator.unknown_fields("[core\nroot = ").is_empty());
    }
}
