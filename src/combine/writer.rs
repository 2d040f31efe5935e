use std::io::{self, Write};

/// Writes `##### path #####` framed entries to the combined output.
///
/// Each entry is the header line, a blank line, the verbatim content, and two
/// newlines:
///
/// ```text
/// ##### ./src/app.vue #####
///
/// <content>
///
/// ```
pub struct EntryWriter<W: Write> {
    /// Destination of the framed output
    inner: W,
    /// Entries written so far
    entries: usize,
    /// Content bytes written so far
    bytes: u64,
}

impl<W: Write> EntryWriter<W> {
    /// Wraps `inner` with zeroed counters.
    pub const fn new(inner: W) -> Self {
        Self {
            inner,
            entries: 0,
            bytes: 0,
        }
    }

    /// Append one framed entry.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_entry(&mut self, header_path: &str, content: &[u8]) -> io::Result<()> {
        write!(self.inner, "##### {header_path} #####\n\n")?;
        self.inner.write_all(content)?;
        self.inner.write_all(b"\n\n")?;

        self.entries += 1;
        self.bytes += content.len() as u64;
        Ok(())
    }

    /// Number of entries written so far.
    pub const fn entries(&self) -> usize {
        self.entries
    }

    /// Content bytes written so far, excluding framing.
    pub const fn bytes(&self) -> u64 {
        self.bytes
    }

    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Flush and hand back the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns any error from the final flush.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
