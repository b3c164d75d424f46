//! Tab-separated token streams
//!
//! One header line, then one token per line. Sentences are separated by
//! empty lines. Lines starting with `#` in front of a sentence's first token
//! are comments that belong to that sentence; inside a sentence such a line
//! is an ordinary token.

use crate::error::CliError;
use anyhow::{Context, Result};
use std::io::{BufRead, Lines};

/// A sentence as read from the stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceBlock {
    /// Comment lines in front of the sentence, `#` included
    pub comments: Vec<String>,
    /// Token rows
    pub rows: Vec<Vec<String>>,
}

impl SentenceBlock {
    fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.rows.is_empty()
    }
}

/// Split one line into its columns
pub fn split_row(line: &str) -> Vec<String> {
    line.split('\t').map(str::to_string).collect()
}

/// Reads a token stream one sentence at a time
///
/// The header is read on construction; iterating yields sentence blocks as
/// soon as their closing empty line (or the end of input) is seen.
pub struct TsvReader<R: BufRead> {
    source: String,
    lines: Lines<R>,
    header: Vec<String>,
}

impl<R: BufRead> TsvReader<R> {
    /// Read the header; `source` is only used in error messages
    pub fn new(source: &str, reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let mut header = None;
        for line in lines.by_ref() {
            let line = line.with_context(|| format!("Failed to read {source}"))?;
            let line = trim_cr(&line);
            if !line.trim().is_empty() {
                header = Some(split_row(line));
                break;
            }
        }
        let header = header.ok_or_else(|| CliError::MissingHeader(source.to_string()))?;

        Ok(Self {
            source: source.to_string(),
            lines,
            header,
        })
    }

    /// Column names of the input
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Name of the stream
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl<R: BufRead> Iterator for TsvReader<R> {
    type Item = Result<SentenceBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut block = SentenceBlock::default();
        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(e).with_context(|| format!("Failed to read {}", self.source)))
                }
            };
            let line = trim_cr(&line);
            if line.trim().is_empty() {
                if !block.rows.is_empty() {
                    return Some(Ok(block));
                }
            } else if block.rows.is_empty() && line.starts_with('#') {
                block.comments.push(line.to_string());
            } else {
                block.rows.push(split_row(line));
            }
        }
        (!block.is_empty()).then_some(Ok(block))
    }
}

fn trim_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> (Vec<String>, Vec<SentenceBlock>) {
        let reader = TsvReader::new("test", text.as_bytes()).unwrap();
        let header = reader.header().to_vec();
        let blocks = reader.collect::<Result<Vec<_>>>().unwrap();
        (header, blocks)
    }

    #[test]
    fn test_sentences_and_comments() {
        let text = "form\tlemma\n# sent 1\nszét\tszét\nszedi\tszed\n\n# sent 2\nházat\tház\n";
        let (header, sentences) = read(text);

        assert_eq!(header, vec!["form", "lemma"]);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].comments, vec!["# sent 1"]);
        assert_eq!(sentences[0].rows.len(), 2);
        assert_eq!(sentences[1].rows[0], vec!["házat", "ház"]);
    }

    #[test]
    fn test_hash_token_inside_sentence_is_a_row() {
        let text = "form\tlemma\txpostag\tanas\n# text = szét # szedi\n\
                    szét\tszét\t[/Prev]\t[]\n#\t#\t[Punct]\t[]\nszedi\tszed\t[/V][Prs.Def.3Sg]\t[]\n";
        let (_, sentences) = read(text);

        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].comments, vec!["# text = szét # szedi"]);
        assert_eq!(sentences[0].rows.len(), 3);
        assert_eq!(sentences[0].rows[1], vec!["#", "#", "[Punct]", "[]"]);
    }

    #[test]
    fn test_blocks_are_yielded_before_end_of_input() {
        let text = "form\na\n\nb\n";
        let mut reader = TsvReader::new("test", text.as_bytes()).unwrap();
        assert_eq!(reader.next().unwrap().unwrap().rows, vec![vec!["a"]]);
        assert_eq!(reader.next().unwrap().unwrap().rows, vec![vec!["b"]]);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_repeated_blank_lines_and_crlf() {
        let text = "form\tlemma\r\na\ta\r\n\r\n\r\n\r\nb\tb\r\n";
        let (_, sentences) = read(text);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].rows[0], vec!["a", "a"]);
    }

    #[test]
    fn test_trailing_comment_kept() {
        let (_, sentences) = read("form\na\n\n# end\n");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[1].rows.is_empty());
        assert_eq!(sentences[1].comments, vec!["# end"]);
    }

    #[test]
    fn test_empty_columns_survive() {
        let (_, sentences) = read("form\tlemma\tprev\na\ta\t\n");
        assert_eq!(sentences[0].rows[0], vec!["a", "a", ""]);
    }

    #[test]
    fn test_missing_header() {
        let err = TsvReader::new("empty.tsv", "\n\n".as_bytes()).err().unwrap();
        assert_eq!(err.to_string(), "No header line in input: empty.tsv");
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let bytes: &[u8] = &[b'f', b'o', b'r', b'm', b'\n', b's', b'z', 0xe9, b't', b'\n'];
        let mut reader = TsvReader::new("latin2.tsv", bytes).unwrap();
        let err = reader.next().unwrap().unwrap_err();
        assert!(err.to_string().contains("Failed to read latin2.tsv"));
    }
}
