#![allow(dead_code)]

use anyhow::Result;
use combine_code::Config;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Source tree fixture: a temporary project directory plus an output path
/// outside of it.
pub struct TestTree {
    pub temp_dir: TempDir,
}

impl TestTree {
    /// Create an empty project directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("project"))?;
        Ok(Self { temp_dir })
    }

    /// The traversal root
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    /// Where the combined output is written
    pub fn output(&self) -> PathBuf {
        self.temp_dir.path().join("combined_code.txt")
    }

    /// Write a file below the root, creating parent directories
    pub fn file(&self, relative: &str, content: impl AsRef<[u8]>) -> Result<&Self> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(self)
    }

    /// Create an empty directory below the root
    pub fn dir(&self, relative: &str) -> Result<&Self> {
        fs::create_dir_all(self.root().join(relative))?;
        Ok(self)
    }

    /// Default configuration pointed at this tree
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.core.root = self.root();
        config.core.output = self.output();
        config
    }

    /// Contents of the combined output
    pub fn read_output(&self) -> Result<String> {
        Ok(fs::read_to_string(self.output())?)
    }
}

/// Header line for a root-relative path, using the platform separator
pub fn header(relative: &str) -> String {
    format!(
        "##### {} #####",
        combine_code::utils::display_relative(Path::new(relative))
    )
}

/// A complete framed entry
pub fn entry(relative: &str, content: &str) -> String {
    format!("{}\n\n{content}\n\n", header(relative))
}
