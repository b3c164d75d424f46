//! Candidate morphological analyses carried by a token
//!
//! The analyses column holds a JSON list written by the morphological
//! analyser. Only the already-attached check needs it decoded; every other
//! test runs substring matches on the raw text.

use crate::error::AnalysisError;
use crate::tags::pos;
use serde::{Deserialize, Serialize};

/// One analysis record of the analyses column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Lemma of this reading
    pub lemma: String,
    /// Tag of this reading
    pub tag: String,
    /// Morpheme-by-morpheme rendering, e.g. `szét[/Prev]=szét+szed[/V]=szed`
    #[serde(default)]
    pub readable: String,
}

/// Decode the analyses column
pub fn parse_analyses(raw: &str) -> Result<Vec<Analysis>, AnalysisError> {
    Ok(serde_json::from_str(raw)?)
}

/// Pick the analysis the tagger selected: the last record with the token's
/// own lemma and tag
pub fn select_analysis<'a>(
    analyses: &'a [Analysis],
    lemma: &str,
    tag: &str,
) -> Result<&'a Analysis, AnalysisError> {
    analyses
        .iter()
        .rev()
        .find(|ana| ana.lemma == lemma && ana.tag == tag)
        .ok_or_else(|| AnalysisError::NoSelectedAnalysis {
            lemma: lemma.to_string(),
            tag: tag.to_string(),
        })
}

/// Whether the selected analysis of a token contains a fused preverb
pub fn selected_has_preverb(raw: &str, lemma: &str, tag: &str) -> Result<bool, AnalysisError> {
    let analyses = parse_analyses(raw)?;
    let selected = select_analysis(&analyses, lemma, tag)?;
    Ok(selected.readable.contains(pos::PREVERB))
}
