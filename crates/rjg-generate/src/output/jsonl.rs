use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use crate::errors::GenerationError;

/// Writes one compact JSON document per line.
pub struct JsonlWriter<W: Write> {
    inner: CountingWriter<BufWriter<W>>,
    lines: u64,
}

impl JsonlWriter<File> {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> Result<Self, GenerationError> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> JsonlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: CountingWriter::new(BufWriter::new(writer)),
            lines: 0,
        }
    }

    pub fn write_value(&mut self, value: &Value) -> Result<(), GenerationError> {
        serde_json::to_writer(&mut self.inner, value)?;
        self.inner.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    pub fn bytes_written(&self) -> u64 {
        self.inner.bytes_written()
    }

    /// Flush buffered lines and return the number of bytes written.
    pub fn finish(mut self) -> Result<u64, GenerationError> {
        self.inner.flush()?;
        Ok(self.inner.bytes_written())
    }
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.bytes += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
