#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)] // Entry and byte counters cannot realistically overflow
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # combine-code
//!
//! Walks a directory tree and concatenates every file with a matching suffix
//! into one text file, each entry framed by a `##### ./relative/path #####`
//! header. Directories whose path contains an exclusion term are skipped
//! together with their subtree.
//!
//! ## Architecture
//!
//! - [`config`]: Run configuration (defaults, TOML loading, validation)
//! - [`scanner`]: Directory traversal, exclusion set and inclusion predicate
//! - [`combine`]: The combine pass: reading sources and writing framed entries
//! - [`output`]: User-facing messages with verbosity control
//! - [`cli`]: Command-line definitions shared with the xtask crate
//! - [`utils`]: Path helpers
//!
//! ## Example Usage
//!
//! ```no_run
//! use combine_code::{Config, combine};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut config = Config::default();
//! config.scan.exclude.push("dist".to_string());
//!
//! let report = combine(config)?;
//! println!("{} files combined", report.entries);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// The combine pass: scanning, reading and writing the combined output.
pub mod combine;

/// Configuration parsing, validation, and defaults.
pub mod config;

/// Output formatting with verbosity control.
pub mod output;

/// Filesystem scanning and file selection rules.
pub mod scanner;

/// Utility functions and helpers.
pub mod utils;

pub use combine::{CombineReport, Combiner, combine};
pub use config::Config;

/// Current version of the combine-code binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
