/// Exclusion set and inclusion predicate.
pub mod rules;

/// Directory traversal producing the ordered list of source files.
pub mod walk;

pub use rules::{ExclusionSet, InclusionRule};
pub use walk::{ScanOptions, SourceFile, collect_sources};
