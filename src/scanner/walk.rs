use crate::config::Config;
use crate::scanner::rules::{ExclusionSet, InclusionRule};
use crate::utils::paths::{display_relative, relative_to};
use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span};
use walkdir::{DirEntry, WalkDir};

/// A file selected for the combined output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as reached by the walk, used for reading
    pub path: PathBuf,
    /// Path relative to the traversal root
    pub relative: PathBuf,
}

impl SourceFile {
    /// The path as rendered in the entry header, e.g. `./src/app.vue`.
    #[must_use]
    pub fn header_path(&self) -> String {
        display_relative(&self.relative)
    }
}

/// Rules applied while walking the tree.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Directories pruned with their whole subtree
    pub exclusions: ExclusionSet,
    /// File name test for candidates
    pub inclusion: InclusionRule,
    /// Descend into symlinked directories
    pub follow_symlinks: bool,
    /// Exact paths never reported, such as the output file itself
    pub skip: Vec<PathBuf>,
}

impl From<&Config> for ScanOptions {
    fn from(config: &Config) -> Self {
        Self {
            exclusions: ExclusionSet::from(config),
            inclusion: InclusionRule::from(config),
            follow_symlinks: config.scan.follow_symlinks,
            skip: Vec::new(),
        }
    }
}

/// Collect every qualifying file under `root` in traversal order.
///
/// The walk is depth-first. Inside a directory, files come before
/// subdirectories and each group is ordered by name, so a static tree always
/// yields the same sequence. A directory whose rendered path contains an
/// exclusion term is pruned together with everything below it; the root is
/// tested too, as `.`. Entries that cannot be read during the walk are
/// skipped, except dangling symlinks: those are reported like any other file
/// so the read that follows surfaces the broken link.
///
/// # Errors
///
/// Returns an error if `root` cannot be accessed or is not a directory.
pub fn collect_sources(root: &Path, options: &ScanOptions) -> Result<Vec<SourceFile>> {
    let span = span!(Level::DEBUG, "scan", root = %root.display());
    let _guard = span.enter();

    let metadata = std::fs::metadata(root)
        .with_context(|| format!("Cannot access traversal root: {}", root.display()))?;
    if !metadata.is_dir() {
        anyhow::bail!("Traversal root is not a directory: {}", root.display());
    }

    let mut sources = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(options.follow_symlinks)
        .sort_by(files_first)
        .into_iter()
        .filter_entry(|e| !e.file_type().is_dir() || !is_excluded_dir(e, root, &options.exclusions));

    for entry in walker {
        let path = match entry {
            Ok(entry) if is_file_candidate(&entry) => entry.into_path(),
            Ok(_) => continue,
            Err(err) => match dangling_link(&err) {
                Some(path) => path.to_path_buf(),
                None => {
                    debug!(error = %err, "Skipping unreadable entry");
                    continue;
                }
            },
        };

        let qualifies = path
            .file_name()
            .is_some_and(|name| options.inclusion.matches(&name.to_string_lossy()));
        if !qualifies {
            continue;
        }

        if options.skip.iter().any(|skip| *skip == path) {
            debug!(path = %path.display(), "Skipping output file");
            continue;
        }

        sources.push(SourceFile {
            relative: relative_to(&path, root),
            path,
        });
    }

    debug!(count = sources.len(), "Scan complete");
    Ok(sources)
}

/// Orders directory entries files-first, then by name
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Whether a directory entry falls under the exclusion set
fn is_excluded_dir(entry: &DirEntry, root: &Path, exclusions: &ExclusionSet) -> bool {
    if exclusions.is_empty() {
        return false;
    }

    let rendered = display_relative(&relative_to(entry.path(), root));
    match exclusions.matching_term(&rendered) {
        Some(term) => {
            debug!(dir = %rendered, term, "Pruning excluded directory");
            true
        }
        None => false,
    }
}

/// Regular files, plus any symlink that does not resolve to a directory
fn is_file_candidate(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && !entry.path().is_dir())
}

/// Path of a symlink whose target is missing, when following links fails on one
fn dangling_link(err: &walkdir::Error) -> Option<&Path> {
    let path = err.path()?;
    let is_link = std::fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink());
    (is_link && !path.exists()).then_some(path)
}
