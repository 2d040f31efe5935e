//! The combine pass: scan the tree, then append every source file to one
//! output file.
//!
//! The output file is created (or truncated) before the walk starts and is
//! flushed and closed on every exit path. In the default fail-fast mode the
//! first unreadable source aborts the run, leaving the entries written so far
//! in place. With `keep_going` set, unreadable sources are reported and
//! omitted instead.

/// Source file reading with UTF-8 validation.
pub mod reader;

/// Entry framing for the combined output.
pub mod writer;

pub use reader::{SourceText, read_source};
pub use writer::EntryWriter;

use crate::config::Config;
use crate::output;
use crate::scanner::{ScanOptions, collect_sources};
use crate::utils::paths::make_absolute;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span};

/// A source file left out of the output because it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path as shown in entry headers
    pub header_path: String,
    /// Rendered error chain
    pub reason: String,
}

/// Outcome of a successful combine pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineReport {
    /// Absolute path of the written output file
    pub output: PathBuf,
    /// Number of entries written
    pub entries: usize,
    /// Content bytes written, excluding headers and separators
    pub bytes: u64,
    /// Sources skipped in keep-going mode
    pub skipped: Vec<SkippedFile>,
}

/// Runs a combine pass for one configuration.
#[derive(Debug, Clone)]
pub struct Combiner {
    /// Settings for the pass, validated when it runs
    config: Config,
}

impl Combiner {
    /// Creates a combiner; nothing is checked until [`Combiner::run`].
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scan the configured root and write the combined output file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The output file cannot be created or written
    /// - The traversal root is missing or not a directory
    /// - A source file cannot be read as UTF-8 text (unless `keep_going` is set)
    pub fn run(&self) -> Result<CombineReport> {
        self.config.validate()?;

        let root = make_absolute(&self.config.core.root)?;
        let output_path = make_absolute(&self.config.core.output)?;

        let span = span!(
            Level::INFO,
            "combine",
            root = %root.display(),
            output = %output_path.display()
        );
        let _guard = span.enter();

        let file = File::create(&output_path).with_context(|| {
            format!("Failed to create output file: {}", output_path.display())
        })?;
        let mut writer = EntryWriter::new(BufWriter::new(file));

        let mut options = ScanOptions::from(&self.config);
        options.skip.push(output_path.clone());

        let outcome = self.write_sources(&root, &options, &mut writer);

        if outcome.is_err() {
            // Keep whatever was written before the failure.
            if let Err(e) = writer.flush() {
                debug!(error = %e, "Failed to flush partial output");
            }
        }
        let skipped = outcome?;

        let entries = writer.entries();
        let bytes = writer.bytes();
        writer
            .finish()
            .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

        info!(entries, bytes, skipped = skipped.len(), "Combine complete");

        Ok(CombineReport {
            output: output_path,
            entries,
            bytes,
            skipped,
        })
    }

    /// Scan and append every source, returning the ones skipped
    fn write_sources(
        &self,
        root: &Path,
        options: &ScanOptions,
        writer: &mut EntryWriter<BufWriter<File>>,
    ) -> Result<Vec<SkippedFile>> {
        let sources = collect_sources(root, options)?;
        let mut skipped = Vec::new();

        for source in &sources {
            let header_path = source.header_path();

            let text = match read_source(&source.path, self.config.performance.mmap_threshold) {
                Ok(text) => text,
                Err(e) if self.config.scan.keep_going => {
                    let reason = format!("{e:#}");
                    debug!(path = %header_path, %reason, "Skipping unreadable file");
                    output::warning(&format!("Skipping {header_path}: {reason}"));
                    skipped.push(SkippedFile {
                        header_path,
                        reason,
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            writer
                .write_entry(&header_path, &text)
                .context("Failed to write to output file")?;
            output::action("combined", &header_path);
        }

        Ok(skipped)
    }
}

/// Run a combine pass with `config`.
///
/// # Errors
///
/// See [`Combiner::run`].
pub fn combine(config: Config) -> Result<CombineReport> {
    Combiner::new(config).run()
}
