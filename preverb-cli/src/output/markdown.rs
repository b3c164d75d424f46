//! Markdown output formatter

use super::{OutputFormatter, ProcessedSentence};
use anyhow::Result;
use preverb_core::FieldNames;
use std::io::Write;

/// Markdown formatter - lists every resolved link, for reading rather than
/// for further processing
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    fields: FieldNames,
    columns: Option<Columns>,
    link_count: usize,
    rejected_count: usize,
}

struct Columns {
    form: usize,
    lemma: usize,
    state: usize,
    id: usize,
    offset: usize,
}

impl Columns {
    fn locate(header: &[String], fields: &FieldNames) -> Option<Self> {
        let position = |name: &str| header.iter().position(|h| h == name);
        Some(Self {
            form: position(&fields.form)?,
            lemma: position(&fields.lemma)?,
            state: position(&fields.link_state)?,
            id: position(&fields.link_id)?,
            offset: position(&fields.link_offset)?,
        })
    }
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W, fields: FieldNames) -> Self {
        Self {
            writer,
            fields,
            columns: None,
            link_count: 0,
            rejected_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn begin_document(&mut self, source: &str, header: &[String]) -> Result<()> {
        writeln!(self.writer, "## {source}")?;
        writeln!(self.writer)?;

        self.columns = Columns::locate(header, &self.fields);
        if self.columns.is_none() {
            writeln!(self.writer, "*No link columns*")?;
        }
        Ok(())
    }

    fn write_sentence(&mut self, sentence: &ProcessedSentence) -> Result<()> {
        if sentence.is_rejected() {
            self.rejected_count += 1;
            return Ok(());
        }
        let Some(cols) = &self.columns else {
            return Ok(());
        };

        for (idx, row) in sentence.rows.iter().enumerate() {
            if row[cols.state] != preverb_core::tags::marker::SEPARATED {
                continue;
            }
            let Ok(offset) = row[cols.offset].parse::<i64>() else {
                continue;
            };
            let Some(preverb) = usize::try_from(idx as i64 - offset)
                .ok()
                .and_then(|p| sentence.rows.get(p))
            else {
                continue;
            };

            self.link_count += 1;
            writeln!(
                self.writer,
                "{}. **{}** … *{}* → `{}` (id {}, offset {})",
                self.link_count,
                preverb[cols.form],
                row[cols.form],
                row[cols.lemma],
                row[cols.id],
                offset
            )?;
        }
        Ok(())
    }

    fn end_document(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total links: {}*", self.link_count)?;
        if self.rejected_count > 0 {
            writeln!(self.writer, "*Rejected sentences: {}*", self.rejected_count)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
