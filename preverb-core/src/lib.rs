//! Separated preverb linking for Hungarian
//!
//! Hungarian verbal prefixes ("meg", "szét", "el", ...) often stand apart
//! from their verb: *szét kell szerelni*, *rágta volna szét*. Given one
//! sentence of morphologically analysed tokens, this crate finds the verb
//! each free-standing preverb belongs to, records the link in three extra
//! columns and rewrites the verb's lemma to the prefixed form.
//!
//! # Example
//!
//! ```
//! use preverb_core::{EngineConfig, PreverbEngine};
//!
//! let header = ["form", "lemma", "xpostag", "anas"];
//! let mut engine = PreverbEngine::new(&header, EngineConfig::default())?;
//!
//! let row = |form: &str, lemma: &str, tag: &str| {
//!     let anas = format!(r#"[{{"lemma": "{lemma}", "tag": "{tag}"}}]"#);
//!     vec![form.to_string(), lemma.to_string(), tag.to_string(), anas]
//! };
//! let rows = engine.process_sentence(vec![
//!     row("szét", "szét", "[/Prev]"),
//!     row("szerelni", "szerel", "[/V][Inf]"),
//! ])?;
//!
//! assert_eq!(rows[1][1], "szétszerel");
//! assert_eq!(rows[1][4], "sep");
//! assert_eq!(rows[0][4], "conn");
//! # Ok::<(), preverb_core::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod links;
pub mod reconcile;
pub mod rules;
pub mod scanner;
pub mod schema;
pub mod tags;
pub mod token;

// Re-export key types
pub use analysis::Analysis;
pub use config::EngineConfig;
pub use engine::{PreverbEngine, PreverbEngineBuilder, SentenceReport};
pub use error::{AnalysisError, EngineError, Result, SchemaError};
pub use links::{Binding, LinkAllocator};
pub use reconcile::{reconcile, PreverbLemma, ReconcileOptions, ReconcileReport};
pub use rules::{Decision, Rule, RuleMatch, RuleRevision, RuleTable};
pub use scanner::{Sentence, TokenWindow, WindowScanner};
pub use schema::{FieldNames, Schema};
pub use token::{Link, LinkId, LinkState, Token};
