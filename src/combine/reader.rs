use anyhow::{Context, Result};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::ops::Deref;
use std::path::Path;
use tracing::{Level, debug, span};

/// Validated UTF-8 contents of a source file.
///
/// Small files are read into a buffer, large ones are memory mapped. Either
/// way the bytes are guaranteed to be valid UTF-8.
pub enum SourceText {
    /// Contents copied into memory
    Buffered(Vec<u8>),
    /// Read-only map of the whole file
    Mapped(Mmap),
}

impl Deref for SourceText {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Buffered(bytes) => bytes,
            Self::Mapped(map) => map,
        }
    }
}

/// Read a source file and check it is UTF-8 text.
///
/// Files of `mmap_threshold` bytes or more are mapped instead of copied.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or if its contents
/// are not valid UTF-8.
pub fn read_source(path: &Path, mmap_threshold: u64) -> Result<SourceText> {
    let span = span!(Level::DEBUG, "read_source", path = %path.display());
    let _guard = span.enter();

    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?
        .len();

    let text = if len > 0 && len >= mmap_threshold {
        debug!(bytes = len, "Mapping large file");
        // SAFETY: the map is read-only and dropped before the next file is opened.
        let map = unsafe { MmapOptions::new().map(&file) }
            .with_context(|| format!("Failed to map file: {}", path.display()))?;
        SourceText::Mapped(map)
    } else {
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        SourceText::Buffered(bytes)
    };

    if let Err(e) = simdutf8::compat::from_utf8(&text) {
        anyhow::bail!(
            "{} is not valid UTF-8 text (invalid byte at offset {})",
            path.display(),
            e.valid_up_to()
        );
    }

    debug!(bytes = text.len(), "Read source file");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_small_file_is_buffered() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "<template></template>")?;

        let text = read_source(file.path(), 1024)?;
        assert!(matches!(text, SourceText::Buffered(_)));
        assert_eq!(&*text, b"<template></template>");

        Ok(())
    }

    #[test]
    fn test_large_file_is_mapped() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        let body = "const x = 1;\n".repeat(100);
        file.write_all(body.as_bytes())?;
        file.flush()?;

        let text = read_source(file.path(), 64)?;
        assert!(matches!(text, SourceText::Mapped(_)));
        assert_eq!(&*text, body.as_bytes());

        Ok(())
    }

    #[test]
    fn test_empty_file_is_never_mapped() -> Result<()> {
        let file = NamedTempFile::new()?;
        let text = read_source(file.path(), 0)?;
        assert!(matches!(text, SourceText::Buffered(_)));
        assert!(text.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_is_rejected() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"ok\xFF\xFEbad")?;

        let err = read_source(file.path(), 1024).err().unwrap();
        let message = err.to_string();
        assert!(message.contains("not valid UTF-8"));
        assert!(message.contains("offset 2"));

        Ok(())
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = read_source(Path::new("/definitely/not/here.vue"), 1024).err();
        assert!(err.is_some());
    }
}
