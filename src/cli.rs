//! Command-line interface definitions for combine-code.
//!
//! The CLI definitions are shared between the main binary and the xtask
//! crate, which renders the man page from them.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use crate::config::Config;
use anyhow::Result;
use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for combine-code.
#[derive(Parser, Debug)]
#[command(
    name = "combine-code",
    version = crate::VERSION,
    about = "Concatenate matching source files into one annotated text file",
    long_about = "Walks a directory tree and appends every file with a matching suffix to a \
                  single output file, each preceded by a '##### ./path #####' header. Directories \
                  whose path contains an exclusion term are skipped with their whole subtree."
)]
pub struct Cli {
    /// Directory to walk (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Output file (default: combined_code.txt)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Skip directories whose path contains TERM (repeatable, replaces the defaults)
    #[arg(short, long = "exclude", value_name = "TERM")]
    pub exclude: Vec<String>,

    /// Include files ending with SUFFIX (repeatable, replaces the defaults)
    #[arg(short, long = "suffix", value_name = "SUFFIX")]
    pub suffix: Vec<String>,

    /// Include files ending with SUFFIX unless named like the reserved file
    #[arg(short, long = "guarded-suffix", value_name = "SUFFIX")]
    pub guarded_suffix: Vec<String>,

    /// File name excluded from guarded suffixes (empty string disables)
    #[arg(long, value_name = "NAME")]
    pub reserved_name: Option<String>,

    /// Descend into symbolically linked directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Warn about unreadable files and continue instead of aborting
    #[arg(short, long)]
    pub keep_going: bool,

    /// Read settings from a TOML configuration file
    #[arg(short, long, env = "COMBINE_CODE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub dump_config: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// List every combined file
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress the confirmation line and informational messages
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Build the effective configuration: defaults, then the config file, then flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the merged
    /// configuration fails validation.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Overwrite configuration values with any flags given on the command line.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(root) = &self.root {
            config.core.root.clone_from(root);
        }
        if let Some(output) = &self.output {
            config.core.output.clone_from(output);
        }
        if !self.exclude.is_empty() {
            config.scan.exclude.clone_from(&self.exclude);
        }
        if !self.suffix.is_empty() {
            config.include.suffixes.clone_from(&self.suffix);
        }
        if !self.guarded_suffix.is_empty() {
            config.include.guarded_suffixes.clone_from(&self.guarded_suffix);
        }
        if let Some(name) = &self.reserved_name {
            config.include.reserved_name.clone_from(name);
        }
        if self.follow_symlinks {
            config.scan.follow_symlinks = true;
        }
        if self.keep_going {
            config.scan.keep_going = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_gives_default_config() {
        let cli = Cli::try_parse_from(["combine-code"]).unwrap();
        assert_eq!(cli.resolve_config().unwrap(), Config::default());
    }

    #[test]
    fn test_repeated_flags_replace_lists() {
        let cli = Cli::try_parse_from([
            "combine-code",
            "-e",
            "target",
            "--exclude",
            ".git",
            "-s",
            ".rs",
            "--reserved-name",
            "",
            "--keep-going",
        ])
        .unwrap();

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.scan.exclude, vec!["target", ".git"]);
        assert_eq!(config.include.suffixes, vec![".rs"]);
        assert_eq!(config.include.guarded_suffixes, vec![".js"]);
        assert!(config.include.reserved_name.is_empty());
        assert!(config.scan.keep_going);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["combine-code", "-v", "-q"]).is_err());
    }
}
