//! Output formatting module
//!
//! Formatters receive one sentence at a time so that text formats can be
//! written while the input is still being read.

use anyhow::Result;
use preverb_core::SentenceReport;
use serde::Serialize;

/// A sentence after processing
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedSentence {
    /// Comment lines that came before the sentence
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    /// Output rows; the input rows unchanged when the sentence was rejected
    pub rows: Vec<Vec<String>>,
    /// Counts for the sentence, `None` when it was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SentenceReport>,
}

impl ProcessedSentence {
    /// Whether the engine refused the sentence
    pub fn is_rejected(&self) -> bool {
        self.report.is_none()
    }

    /// Number of verb/preverb pairs
    pub fn linked(&self) -> usize {
        self.report.map_or(0, |r| r.reconcile.linked)
    }
}

/// One input stream after processing
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedDocument {
    /// File name, or `<stdin>`
    pub source: String,
    /// Output header
    pub header: Vec<String>,
    /// Sentences in input order
    pub sentences: Vec<ProcessedSentence>,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Start a new input stream
    fn begin_document(&mut self, source: &str, header: &[String]) -> Result<()>;

    /// Output one sentence of the current stream
    fn write_sentence(&mut self, sentence: &ProcessedSentence) -> Result<()>;

    /// Close the current stream
    fn end_document(&mut self) -> Result<()> {
        Ok(())
    }

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod tsv;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use tsv::TsvFormatter;
