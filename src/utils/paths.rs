use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Makes a path absolute, resolving relative paths from current directory
///
/// `.` components are dropped, so `./src/.` resolves to `<cwd>/src`.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined
pub fn make_absolute(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let current_dir =
            std::env::current_dir().context("Failed to determine the current directory")?;
        current_dir.join(path)
    };
    Ok(absolute.components().collect())
}

/// Make `path` relative to `base` if possible, otherwise return `path` as is.
#[must_use]
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base).unwrap_or(path).to_path_buf()
}

/// Renders a root-relative path the way it appears in entry headers.
///
/// The path is joined onto `.`, so `src/app.vue` becomes `./src/app.vue` and
/// the root itself becomes `.`.
#[must_use]
pub fn display_relative(relative: &Path) -> String {
    if relative.as_os_str().is_empty() {
        return ".".to_string();
    }
    Path::new(".").join(relative).display().to_string()
}
