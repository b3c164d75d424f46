//! Token model
//!
//! A [`Token`] is one row of the host table with the fields the engine reads
//! lifted out, plus the link state the engine writes.

use crate::tags::marker;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier shared by a verb and the preverb linked to it
pub type LinkId = u64;

/// Attachment state of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkState {
    /// Not involved in any attachment
    #[default]
    None,
    /// Verb whose selected analysis already contains the preverb
    Prefixed,
    /// Verb linked to a displaced preverb
    Separated,
    /// Preverb linked to a verb
    Connected,
}

impl LinkState {
    /// Value written to the link-state column
    pub fn marker(&self) -> &'static str {
        match self {
            LinkState::None => "",
            LinkState::Prefixed => marker::PREFIXED,
            LinkState::Separated => marker::SEPARATED,
            LinkState::Connected => marker::CONNECTED,
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Link fields of a token
///
/// `offset` is the token's own position minus its partner's position, so a
/// preverb directly in front of its verb carries `-1` and the verb `+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Link {
    /// Attachment state
    pub state: LinkState,
    /// Shared identifier, set with `Separated` and `Connected`
    pub id: Option<LinkId>,
    /// Signed distance to the partner, zero when unlinked
    pub offset: i32,
}

impl Link {
    /// Absolute distance to the partner
    pub fn distance(&self) -> usize {
        self.offset.unsigned_abs() as usize
    }

    /// Drop any attachment
    pub fn clear(&mut self) {
        *self = Link::default();
    }
}

/// One word of a sentence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Token {
    /// Surface form
    pub form: String,
    /// Lemma chosen by the tagger
    pub lemma: String,
    /// Tag chosen by the tagger
    pub tag: String,
    /// Raw analyses column (JSON)
    pub analyses: String,
    /// Compound lemma, present when the schema has a compound column
    pub compound: Option<String>,
    /// Link state written by the engine
    pub link: Link,
    /// Original row values, for the columns the engine does not own
    pub(crate) row: Vec<String>,
}

impl Token {
    /// Create a token from its linguistic fields
    pub fn new(
        form: impl Into<String>,
        lemma: impl Into<String>,
        tag: impl Into<String>,
        analyses: impl Into<String>,
    ) -> Self {
        Self {
            form: form.into(),
            lemma: lemma.into(),
            tag: tag.into(),
            analyses: analyses.into(),
            ..Default::default()
        }
    }

    /// Sentinel used to pad both ends of a sentence; matches no rule
    pub fn padding() -> Self {
        Self::default()
    }

    /// Attach a compound column value
    pub fn with_compound(mut self, compound: impl Into<String>) -> Self {
        self.compound = Some(compound.into());
        self
    }

    /// Tag prefix test
    pub fn tag_starts_with(&self, prefix: &str) -> bool {
        self.tag.starts_with(prefix)
    }

    /// Substring test on the raw analyses
    pub fn analyses_contain(&self, needle: &str) -> bool {
        self.analyses.contains(needle)
    }

    /// Whether the token takes part in a link of the given state
    pub fn is(&self, state: LinkState) -> bool {
        self.link.state == state
    }
}
