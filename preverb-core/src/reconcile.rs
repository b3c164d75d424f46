//! Sentence-level cleanup after the window scan
//!
//! The scan leaves tentative links behind: a verb whose preverb was taken by
//! a closer verb still says `Separated` with an id nobody else carries. This
//! pass drops such links, then builds the compound lemmas of the pairs that
//! survived. It has to run after the whole sentence was scanned.

use crate::tags::{marker, pos};
use crate::token::{LinkId, LinkState, Token};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// What happens to the lemma of a linked preverb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreverbLemma {
    /// Empty lemma; the verb's lemma now carries the preverb
    #[default]
    Clear,
    /// Keep the lemma and append the verb lemma in brackets: `szét[szerel]`
    Annotate,
}

/// Settings of the reconciliation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Prefix the tag of linked and prefixed verbs with `[/Prev]`
    pub mark_verb_tag: bool,
    /// Lemma policy for linked preverbs
    pub preverb_lemma: PreverbLemma,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            mark_verb_tag: true,
            preverb_lemma: PreverbLemma::Clear,
        }
    }
}

/// Counts of what the pass did to one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReconcileReport {
    /// Verb/preverb pairs kept
    pub linked: usize,
    /// Tokens whose link was dropped
    pub demoted: usize,
    /// Verbs with a fused preverb
    pub prefixed: usize,
}

/// Buffer indices of the tokens carrying one link id; a sound link has one
/// of each
#[derive(Default)]
struct Holders {
    verbs: SmallVec<[usize; 2]>,
    preverbs: SmallVec<[usize; 2]>,
}

/// Resolve the tentative links of one sentence in place
pub fn reconcile(tokens: &mut [Token], options: &ReconcileOptions) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let mut by_id: BTreeMap<LinkId, Holders> = BTreeMap::new();

    for (idx, token) in tokens.iter_mut().enumerate() {
        match (token.link.state, token.link.id) {
            (LinkState::Separated, Some(id)) => by_id.entry(id).or_default().verbs.push(idx),
            (LinkState::Connected, Some(id)) => by_id.entry(id).or_default().preverbs.push(idx),
            (LinkState::Separated | LinkState::Connected, None) => {
                warn!(form = %token.form, "link without identifier dropped");
                token.link.clear();
                report.demoted += 1;
            }
            (LinkState::Prefixed, _) => {
                if options.mark_verb_tag {
                    mark_tag(token);
                }
                report.prefixed += 1;
            }
            (LinkState::None, _) => {}
        }
    }

    for (id, holders) in by_id {
        match (holders.verbs.as_slice(), holders.preverbs.as_slice()) {
            ([verb], [preverb]) => {
                compose(tokens, *verb, *preverb, options);
                report.linked += 1;
            }
            _ => {
                debug!(
                    id,
                    verbs = holders.verbs.len(),
                    preverbs = holders.preverbs.len(),
                    "demoting unmatched link"
                );
                for idx in holders.verbs.iter().chain(holders.preverbs.iter()) {
                    tokens[*idx].link.clear();
                    report.demoted += 1;
                }
            }
        }
    }

    report
}

fn compose(tokens: &mut [Token], verb: usize, preverb: usize, options: &ReconcileOptions) {
    let verb_lemma = tokens[verb].lemma.to_lowercase();
    let preverb_lemma = tokens[preverb].lemma.clone();

    let verb_token = &mut tokens[verb];
    verb_token.lemma = format!("{preverb_lemma}{verb_lemma}");
    if verb_token.compound.is_some() {
        verb_token.compound = Some(format!(
            "{preverb_lemma}{}{verb_lemma}",
            marker::COMPOUND_SEPARATOR
        ));
    }
    if options.mark_verb_tag {
        mark_tag(verb_token);
    }

    let preverb_token = &mut tokens[preverb];
    preverb_token.lemma = match options.preverb_lemma {
        PreverbLemma::Clear => String::new(),
        PreverbLemma::Annotate => format!("{preverb_lemma}[{verb_lemma}]"),
    };
    if preverb_token.compound.is_some() {
        preverb_token.compound = Some(preverb_token.lemma.clone());
    }
}

fn mark_tag(token: &mut Token) {
    if !token.tag.starts_with(pos::PREVERB) {
        token.tag.insert_str(0, pos::PREVERB);
    }
}
