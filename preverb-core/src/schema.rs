//! Column negotiation with the host pipeline
//!
//! The host hands over a header; the engine finds the columns it reads and
//! decides where the columns it writes go. Target columns the host already
//! added (usually empty) are reused, the rest are appended.

use crate::error::SchemaError;
use crate::token::{LinkState, Token};
use serde::{Deserialize, Serialize};

/// Names of the columns the engine reads and writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    /// Surface form (read)
    pub form: String,
    /// Lemma (read, rewritten for linked tokens)
    pub lemma: String,
    /// Fine-grained tag (read, optionally marked)
    pub tag: String,
    /// JSON analyses (read)
    pub analyses: String,
    /// Compound lemma (optional, rewritten for linked tokens)
    pub compound: String,
    /// Link state (written)
    pub link_state: String,
    /// Link identifier (written)
    pub link_id: String,
    /// Signed distance to the partner (written)
    pub link_offset: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            form: "form".to_string(),
            lemma: "lemma".to_string(),
            tag: "xpostag".to_string(),
            analyses: "anas".to_string(),
            compound: "compound".to_string(),
            link_state: "prev".to_string(),
            link_id: "previd".to_string(),
            link_offset: "prevoffset".to_string(),
        }
    }
}

/// Column positions agreed with the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    input_header: Vec<String>,
    appended: Vec<String>,
    form: usize,
    lemma: usize,
    tag: usize,
    analyses: usize,
    compound: Option<usize>,
    link_state: usize,
    link_id: usize,
    link_offset: usize,
}

impl Schema {
    /// Locate the engine's columns in `header`
    pub fn negotiate<S: AsRef<str>>(header: &[S], names: &FieldNames) -> Result<Self, SchemaError> {
        let input_header: Vec<String> = header.iter().map(|h| h.as_ref().to_string()).collect();
        let position = |name: &str| input_header.iter().position(|h| h == name);
        let required = |name: &str| {
            position(name).ok_or_else(|| SchemaError::MissingField {
                name: name.to_string(),
            })
        };

        let form = required(&names.form)?;
        let lemma = required(&names.lemma)?;
        let tag = required(&names.tag)?;
        let analyses = required(&names.analyses)?;
        let compound = position(&names.compound);

        let mut appended = Vec::new();
        let mut target = |name: &str| {
            position(name).unwrap_or_else(|| {
                appended.push(name.to_string());
                input_header.len() + appended.len() - 1
            })
        };
        let link_state = target(&names.link_state);
        let link_id = target(&names.link_id);
        let link_offset = target(&names.link_offset);

        Ok(Self {
            input_header,
            appended,
            form,
            lemma,
            tag,
            analyses,
            compound,
            link_state,
            link_id,
            link_offset,
        })
    }

    /// Number of values expected in an input row
    pub fn input_width(&self) -> usize {
        self.input_header.len()
    }

    /// Number of values in an output row
    pub fn output_width(&self) -> usize {
        self.input_header.len() + self.appended.len()
    }

    /// Header of the output table
    pub fn output_header(&self) -> Vec<String> {
        self.input_header
            .iter()
            .chain(self.appended.iter())
            .cloned()
            .collect()
    }

    /// Whether the host table has a compound column
    pub fn has_compound(&self) -> bool {
        self.compound.is_some()
    }

    /// Whether a host row has the width of the input header
    pub fn check_row<S>(&self, row: &[S]) -> Result<(), SchemaError> {
        if row.len() != self.input_width() {
            return Err(SchemaError::FieldCount {
                expected: self.input_width(),
                found: row.len(),
            });
        }
        Ok(())
    }

    /// Build a token from one host row
    pub fn token_from_row(&self, row: Vec<String>) -> Result<Token, SchemaError> {
        self.check_row(&row)?;

        let mut token = Token::new(
            row[self.form].as_str(),
            row[self.lemma].as_str(),
            row[self.tag].as_str(),
            row[self.analyses].as_str(),
        );
        token.compound = self.compound.map(|idx| row[idx].clone());
        token.row = row;
        Ok(token)
    }

    /// Write a token back into a row of output width
    pub fn token_into_row(&self, token: Token) -> Vec<String> {
        let Token {
            lemma,
            tag,
            compound,
            link,
            mut row,
            ..
        } = token;

        row.resize(self.output_width(), String::new());
        row[self.lemma] = lemma;
        row[self.tag] = tag;
        if let (Some(idx), Some(value)) = (self.compound, compound) {
            row[idx] = value;
        }

        let linked = matches!(link.state, LinkState::Separated | LinkState::Connected);
        row[self.link_state] = link.state.marker().to_string();
        row[self.link_id] = link.id.map(|id| id.to_string()).unwrap_or_default();
        row[self.link_offset] = if linked {
            link.offset.to_string()
        } else {
            String::new()
        };
        row
    }
}
