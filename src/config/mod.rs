/// Detection of unrecognized configuration fields.
pub mod validator;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default name of the combined output file.
pub const DEFAULT_OUTPUT_FILE: &str = "combined_code.txt";

/// Filename excluded from the guarded-suffix branch of the inclusion predicate.
pub const DEFAULT_RESERVED_NAME: &str = "combine_code.js";

/// Largest file read into memory before switching to a memory map.
pub const DEFAULT_MMAP_THRESHOLD: u64 = 1_048_576; // 1MB

/// Run configuration for a single combine pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Where to start and where to write
    #[serde(default)]
    pub core: CoreConfig,

    /// Walk behavior
    #[serde(default)]
    pub scan: ScanConfig,

    /// Which file names qualify
    #[serde(default)]
    pub include: IncludeConfig,

    /// Read tuning
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// The `[core]` section: traversal root and output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Directory the walk starts from
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Combined output file, relative paths resolve against the working directory
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

/// The `[scan]` section: pruning, symlinks and error handling during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Substrings that prune any directory whose path contains them
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    /// Descend into symlinked directories
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Report unreadable files and continue instead of aborting
    #[serde(default)]
    pub keep_going: bool,
}

/// The `[include]` section: the file name predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeConfig {
    /// Suffixes that always qualify a file
    #[serde(default = "default_suffixes")]
    pub suffixes: Vec<String>,
    /// Suffixes that qualify a file unless it carries the reserved name
    #[serde(default = "default_guarded_suffixes")]
    pub guarded_suffixes: Vec<String>,
    /// Empty disables the reserved-name exception
    #[serde(default = "default_reserved_name")]
    pub reserved_name: String,
}

/// The `[performance]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Files of at least this many bytes are memory mapped
    #[serde(default = "default_mmap_threshold")]
    pub mmap_threshold: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            output: default_output(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
            follow_symlinks: false,
            keep_going: false,
        }
    }
}

impl Default for IncludeConfig {
    fn default() -> Self {
        Self {
            suffixes: default_suffixes(),
            guarded_suffixes: default_guarded_suffixes(),
            reserved_name: default_reserved_name(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// Unknown fields are reported as warnings, invalid values are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The file contains invalid TOML
    /// - A value fails validation (see [`Config::validate`])
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        validator::ConfigValidator::new().warn_unknown_fields(&content);

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails validation
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as pretty TOML
    ///
    /// # Errors
    ///
    /// Returns an error if TOML serialization fails
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let toml_str = self.to_toml_string()?;
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create config file: {}", path.display()))?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }

    /// Check values that would make a run meaningless or misleading
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output path is empty
    /// - An exclusion term is empty (it would prune every directory)
    /// - A suffix is empty, or no suffix is configured at all
    pub fn validate(&self) -> Result<()> {
        if self.core.output.as_os_str().is_empty() {
            anyhow::bail!("Output path cannot be empty");
        }

        if self.scan.exclude.iter().any(String::is_empty) {
            anyhow::bail!("Exclusion terms cannot be empty");
        }

        let suffixes = self
            .include
            .suffixes
            .iter()
            .chain(&self.include.guarded_suffixes);
        let mut count = 0;
        for suffix in suffixes {
            if suffix.is_empty() {
                anyhow::bail!("Suffixes cannot be empty");
            }
            count += 1;
        }
        if count == 0 {
            anyhow::bail!("At least one suffix must be configured");
        }

        Ok(())
    }
}

/// Serde default for `core.root`
fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Serde default for `core.output`
fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

/// Serde default for `scan.exclude`
fn default_exclude() -> Vec<String> {
    vec!["node_modules".to_string(), ".public".to_string()]
}

/// Serde default for `include.suffixes`
fn default_suffixes() -> Vec<String> {
    vec![".vue".to_string()]
}

/// Serde default for `include.guarded_suffixes`
fn default_guarded_suffixes() -> Vec<String> {
    vec![".js".to_string()]
}

/// Serde default for `include.reserved_name`
fn default_reserved_name() -> String {
    DEFAULT_RESERVED_NAME.to_string()
}

/// Serde default for `performance.mmap_threshold`
const fn default_mmap_threshold() -> u64 {
    DEFAULT_MMAP_THRESHOLD
}
