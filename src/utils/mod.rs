//! Utility functions and helpers.
//!
//! # Submodules
//!
//! - [`paths`]: Path resolution and header path rendering
//!
//! # Examples
//!
//! ```
//! use combine_code::utils::format_size;
//!
//! assert_eq!(format_size(512), "512 B");
//! assert_eq!(format_size(1024 * 1024), "1.00 MB");
//! ```

/// Path manipulation and resolution utilities
pub mod paths;

pub use paths::{display_relative, make_absolute, relative_to};

/// Formats a file size in bytes into a human-readable string with appropriate units.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn format_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size.round() as u64, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
