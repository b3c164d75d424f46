//! File reading utilities

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufReader, StdinLock};
use std::path::Path;

/// Opens token streams for line-by-line reading
pub struct FileReader;

impl FileReader {
    /// Open a file for buffered reading
    pub fn open(path: &Path) -> Result<BufReader<File>> {
        let file =
            File::open(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(BufReader::new(file))
    }

    /// Lock standard input for buffered reading
    pub fn stdin() -> StdinLock<'static> {
        io::stdin().lock()
    }

    /// Get file size in bytes
    pub fn file_size(path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

        Ok(metadata.len())
    }
}
