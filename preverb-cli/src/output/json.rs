//! JSON output formatter

use super::{OutputFormatter, ProcessedDocument, ProcessedSentence};
use anyhow::Result;
use std::io::Write;

/// JSON formatter - outputs documents as a JSON array
///
/// The array is written by [`finish`](OutputFormatter::finish), so this is
/// the one format that holds its whole input in memory.
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    documents: Vec<ProcessedDocument>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn begin_document(&mut self, source: &str, header: &[String]) -> Result<()> {
        self.documents.push(ProcessedDocument {
            source: source.to_string(),
            header: header.to_vec(),
            sentences: Vec::new(),
        });
        Ok(())
    }

    fn write_sentence(&mut self, sentence: &ProcessedSentence) -> Result<()> {
        if let Some(document) = self.documents.last_mut() {
            document.sentences.push(sentence.clone());
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.documents)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
