//! Layered error types
//!
//! Schema problems reject a sentence, analysis problems only weaken the
//! already-attached check, engine problems come from construction.

use thiserror::Error;

/// Errors raised while mapping host rows onto tokens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A column the engine reads is absent from the header
    #[error("required field '{name}' missing from header")]
    MissingField {
        /// Name of the missing column
        name: String,
    },

    /// A row does not have as many values as the header has columns
    #[error("{expected} fields expected, {found} provided")]
    FieldCount {
        /// Width of the negotiated input header
        expected: usize,
        /// Width of the offending row
        found: usize,
    },
}

/// Errors raised while reading the analyses column of a token
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The analyses column is not a JSON list of analysis records
    #[error("analyses are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// None of the analyses carries the token's own lemma and tag
    #[error("no analysis matches lemma '{lemma}' with tag '{tag}'")]
    NoSelectedAnalysis {
        /// Lemma chosen by the tagger
        lemma: String,
        /// Tag chosen by the tagger
        tag: String,
    },
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Row/header mismatch
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A rule looks further than the radius of its table
    #[error("rule '{rule}' references offset {offset} beyond radius {radius}")]
    InvalidRuleTable {
        /// Name of the offending rule
        rule: &'static str,
        /// Offset the rule references
        offset: i32,
        /// Radius of the table
        radius: usize,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
