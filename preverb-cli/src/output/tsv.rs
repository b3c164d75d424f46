//! Tab-separated output formatter

use super::{OutputFormatter, ProcessedSentence};
use anyhow::Result;
use std::io::Write;

/// TSV formatter - writes the stream back in the shape it was read
pub struct TsvFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TsvFormatter<W> {
    /// Create a new TSV formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TsvFormatter<W> {
    fn begin_document(&mut self, _source: &str, header: &[String]) -> Result<()> {
        writeln!(self.writer, "{}", header.join("\t"))?;
        Ok(())
    }

    fn write_sentence(&mut self, sentence: &ProcessedSentence) -> Result<()> {
        for comment in &sentence.comments {
            writeln!(self.writer, "{comment}")?;
        }
        if sentence.rows.is_empty() {
            return Ok(());
        }
        for row in &sentence.rows {
            writeln!(self.writer, "{}", row.join("\t"))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
