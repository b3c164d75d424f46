//! Sentence processor
//!
//! Ties the pieces together: rows become tokens, the sentence is padded and
//! scanned window by window, tentative links are recorded, and the
//! reconciliation pass settles them before the rows go back to the host.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::links::{Binding, LinkAllocator};
use crate::reconcile::{reconcile, PreverbLemma, ReconcileReport};
use crate::rules::{Decision, RuleMatch, RuleRevision, RuleTable};
use crate::scanner::{Sentence, WindowScanner};
use crate::schema::{FieldNames, Schema};
use crate::token::{LinkState, Token};
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Counts of what happened to one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SentenceReport {
    /// Tokens in the sentence
    pub tokens: usize,
    /// Bindings made during the scan, steals included
    pub bindings: usize,
    /// Bindings that took a preverb from a farther verb
    pub reassigned: usize,
    /// Outcome of reconciliation
    pub reconcile: ReconcileReport,
}

/// Links separated preverbs to their verbs, one sentence at a time
///
/// The link counter is shared by every sentence this instance processes;
/// use one instance per document, or per worker.
#[derive(Debug)]
pub struct PreverbEngine {
    config: EngineConfig,
    table: RuleTable,
    scanner: WindowScanner,
    links: LinkAllocator,
    schema: Schema,
}

impl PreverbEngine {
    /// Negotiate `header` and build an engine
    pub fn new<S: AsRef<str>>(header: &[S], config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let table = config.revision.table()?;
        let schema = Schema::negotiate(header, &config.fields)?;
        Ok(Self {
            scanner: WindowScanner::new(table.radius()),
            table,
            links: LinkAllocator::new(),
            schema,
            config,
        })
    }

    /// Create a builder
    pub fn builder() -> PreverbEngineBuilder {
        PreverbEngineBuilder::default()
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Negotiated columns
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Header of the rows this engine produces
    pub fn output_header(&self) -> Vec<String> {
        self.schema.output_header()
    }

    /// Rule table in use
    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Link counter, for inspection
    pub fn links(&self) -> &LinkAllocator {
        &self.links
    }

    /// Restart link numbering at 1
    pub fn reset_links(&mut self) {
        self.links.reset();
    }

    /// Process one sentence of host rows
    ///
    /// A row of the wrong width rejects the whole sentence.
    pub fn process_sentence(&mut self, rows: Vec<Vec<String>>) -> Result<Vec<Vec<String>>> {
        Ok(self.process_sentence_with_report(rows)?.0)
    }

    /// Like [`process_sentence`](Self::process_sentence), also returning counts
    pub fn process_sentence_with_report(
        &mut self,
        rows: Vec<Vec<String>>,
    ) -> Result<(Vec<Vec<String>>, SentenceReport)> {
        let tokens = rows
            .into_iter()
            .map(|row| self.schema.token_from_row(row))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                warn!(error = %e, "sentence rejected");
                EngineError::from(e)
            })?;

        let (tokens, report) = self.process_tokens(tokens);
        let rows = tokens
            .into_iter()
            .map(|token| self.schema.token_into_row(token))
            .collect();
        Ok((rows, report))
    }

    /// Process tokens that are already built
    pub fn process_tokens(&mut self, tokens: Vec<Token>) -> (Vec<Token>, SentenceReport) {
        let mut sentence = Sentence::padded(tokens, self.scanner.radius());
        let mut report = SentenceReport {
            tokens: sentence.len(),
            ..Default::default()
        };

        self.scan(&mut sentence, &mut report);
        report.reconcile = reconcile(sentence.buffer_mut(), &self.config.reconcile_options());

        (sentence.into_tokens(), report)
    }

    fn scan(&mut self, sentence: &mut Sentence, report: &mut SentenceReport) {
        for center in self.scanner.centers(sentence) {
            let window = self.scanner.window(sentence.buffer(), center);
            let Some(RuleMatch { rule, decision }) = self.table.evaluate(&window) else {
                continue;
            };
            trace!(form = %window.center().form, rule, ?decision, "rule committed");

            match decision {
                Decision::Bind { preverb } => {
                    match self.links.bind(sentence.buffer_mut(), center, preverb) {
                        Some(Binding::Claimed(_)) => report.bindings += 1,
                        Some(Binding::Reassigned { .. }) => {
                            report.bindings += 1;
                            report.reassigned += 1;
                        }
                        None => debug!(rule, center, preverb, "binding refused"),
                    }
                }
                Decision::Prefixed => {
                    sentence.buffer_mut()[center].link.state = LinkState::Prefixed;
                }
                Decision::Unattached => {}
            }
        }
    }
}

/// Builder for [`PreverbEngine`]
#[derive(Debug, Default)]
pub struct PreverbEngineBuilder {
    config: EngineConfig,
}

impl PreverbEngineBuilder {
    /// Start from an existing configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the rule table revision
    pub fn revision(mut self, revision: RuleRevision) -> Self {
        self.config.revision = revision;
        self
    }

    /// Set whether verb tags get the `[/Prev]` mark
    pub fn mark_verb_tag(mut self, mark: bool) -> Self {
        self.config.mark_verb_tag = mark;
        self
    }

    /// Set the lemma policy for linked preverbs
    pub fn preverb_lemma(mut self, policy: PreverbLemma) -> Self {
        self.config.preverb_lemma = policy;
        self
    }

    /// Set the column names
    pub fn fields(mut self, fields: FieldNames) -> Self {
        self.config.fields = fields;
        self
    }

    /// Negotiate `header` and build the engine
    pub fn build<S: AsRef<str>>(self, header: &[S]) -> Result<PreverbEngine> {
        PreverbEngine::new(header, self.config)
    }
}
