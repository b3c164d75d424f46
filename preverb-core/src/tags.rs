//! emMorph tag and lexical constants used by the rule tables

/// Main part-of-speech codes, matched as tag prefixes
pub mod pos {
    /// Verb
    pub const VERB: &str = "[/V]";
    /// Preverb (verbal prefix)
    pub const PREVERB: &str = "[/Prev]";
    /// Adverb
    pub const ADVERB: &str = "[/Adv]";
    /// Adverbial pronoun
    pub const ADVERBIAL_PRONOUN: &str = "[/Adv|Pro]";
    /// Adjective
    pub const ADJECTIVE: &str = "[/Adj]";
    /// Noun
    pub const NOUN: &str = "[/N]";
    /// Question particle
    pub const QUESTION_PARTICLE: &str = "[/QPtcl]";
    /// Determiner pronoun
    pub const DET_PRONOUN: &str = "[/Det|Pro]";
    /// Nominal pronoun
    pub const NOUN_PRONOUN: &str = "[/N|Pro]";
    /// Infinitive; a prefix, nothing is missing from the end
    pub const INFINITIVE: &str = "[/V][Inf";
    /// Punctuation
    pub const PUNCTUATION: &str = "[Punct]";
}

/// Derivational morphemes, matched as substrings of a tag or of the analyses
pub mod morpheme {
    /// Modal participle (-andó/-endő)
    pub const MODAL_PARTICIPLE: &str = "[_ModPtcp/Adj]";
    /// Perfect participle (-t/-tt)
    pub const PERFECT_PARTICIPLE: &str = "[_PerfPtcp/Adj]";
    /// Imperfect participle (-ó/-ő)
    pub const IMPERFECT_PARTICIPLE: &str = "[_ImpfPtcp/Adj]";
    /// Adverbial participle (-va/-ve)
    pub const ADVERBIAL_PARTICIPLE: &str = "[_AdvPtcp/Adv]";
    /// Future participle (-andó as adverbial)
    pub const FUTURE_PARTICIPLE: &str = "[_FutPtcp/Adj]";
    /// Gerund (-ás/-és)
    pub const GERUND: &str = "[_Ger/N]";
}

/// Word forms the rules test literally
pub mod lexical {
    /// Conditional auxiliary that never takes a preverb itself
    pub const AUXILIARY_VOLNA: &str = "volna";
    /// Contrastive conjunctions that may stand between verb and preverb
    pub const CONTRAST_PARTICLES: &[&str] = &["ám", "viszont", "azonban"];
    /// Negation and focus particles in front of participles
    pub const NEGATION_PARTICLES: &[&str] = &["nem", "sem", "se", "is"];
}

/// Values written to the link-state column
pub mod marker {
    /// Verb linked to a displaced preverb
    pub const SEPARATED: &str = "sep";
    /// Preverb linked to a verb
    pub const CONNECTED: &str = "conn";
    /// Verb whose selected analysis already contains a preverb
    pub const PREFIXED: &str = "pfx";
    /// Compound-lemma boundary between preverb and verb
    pub const COMPOUND_SEPARATOR: char = '#';
}
