//! LZ4-compressed coordinate sink
//!
//! Output files are written through an LZ4 frame encoder, matching the
//! `.lz4` suffix the CLI enforces on output paths. The sink must be finished
//! after the scan completes so the frame trailer reaches disk; dropping it
//! without [`CoordinateSink::finish`] leaves a truncated stream.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Append-only LZ4 sink for coordinate lines
#[derive(Debug)]
pub struct CoordinateSink {
    encoder: lz4::Encoder<File>,
}

impl CoordinateSink {
    /// Create `path` and wrap it in an LZ4 frame encoder
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or the LZ4 stream
    /// header cannot be written.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("failed to create output file: {}", path.display()))?;
        let encoder = lz4::EncoderBuilder::new()
            .build(file)
            .context("failed to start LZ4 stream")?;
        Ok(Self { encoder })
    }

    /// Finalize the LZ4 frame and flush the underlying file
    ///
    /// # Errors
    /// Any finalization or flush failure is fatal; partial output must not
    /// be treated as valid.
    pub fn finish(self) -> Result<()> {
        let (mut file, result) = self.encoder.finish();
        result.context("failed to finalize LZ4 stream")?;
        file.flush().context("failed to flush output file")?;
        Ok(())
    }
}

impl Write for CoordinateSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.encoder.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.encoder.flush()
    }
}
