//! Configuration types for the engine

use crate::error::{EngineError, Result};
use crate::reconcile::{PreverbLemma, ReconcileOptions};
use crate::rules::RuleRevision;
use crate::schema::FieldNames;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Engine configuration
///
/// The search radius is not configurable on its own: it belongs to the rule
/// table revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rule table revision
    pub revision: RuleRevision,
    /// Prefix the tag of linked and prefixed verbs with `[/Prev]`
    pub mark_verb_tag: bool,
    /// Lemma policy for linked preverbs
    pub preverb_lemma: PreverbLemma,
    /// Column names used for schema negotiation
    pub fields: FieldNames,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            revision: RuleRevision::default(),
            mark_verb_tag: true,
            preverb_lemma: PreverbLemma::default(),
            fields: FieldNames::default(),
        }
    }
}

impl EngineConfig {
    /// Configuration of the radius-2 rule set
    pub fn basic() -> Self {
        Self {
            revision: RuleRevision::Basic,
            ..Default::default()
        }
    }

    /// Configuration that leaves tags untouched and annotates preverb lemmas
    pub fn annotated() -> Self {
        Self {
            mark_verb_tag: false,
            preverb_lemma: PreverbLemma::Annotate,
            ..Default::default()
        }
    }

    /// Reject column names that are empty or used twice
    pub fn validate(&self) -> Result<()> {
        let fields = &self.fields;
        let names = [
            &fields.form,
            &fields.lemma,
            &fields.tag,
            &fields.analyses,
            &fields.compound,
            &fields.link_state,
            &fields.link_id,
            &fields.link_offset,
        ];

        let mut seen = HashSet::new();
        for name in names {
            if name.is_empty() {
                return Err(EngineError::Config("empty column name".to_string()));
            }
            if !seen.insert(name.as_str()) {
                return Err(EngineError::Config(format!("duplicate column '{name}'")));
            }
        }
        Ok(())
    }

    /// Reconciliation settings derived from this configuration
    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            mark_verb_tag: self.mark_verb_tag,
            preverb_lemma: self.preverb_lemma,
        }
    }
}
