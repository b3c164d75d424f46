//! Built-in rule table revisions
//!
//! Each revision is a fixed list written against one radius. The order of
//! the rules is part of their meaning; reordering changes which preverb a
//! verb gets.

use super::{FixedPattern, Predicate, ProximitySearch, Rule, RuleGroup, RuleTable};
use crate::error::Result;
use crate::tags::{lexical, morpheme, pos};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PREVERB: Predicate = Predicate::TagIs(pos::PREVERB);
const VERB: Predicate = Predicate::TagStartsWith(&[pos::VERB]);
const VERB_READING: Predicate = Predicate::AnalysesContain(pos::VERB);
const VOLNA: Predicate = Predicate::FormIs(lexical::AUXILIARY_VOLNA);
const INFINITIVE: Predicate = Predicate::TagStartsWith(&[pos::INFINITIVE]);
const ADVERB_LIKE: Predicate = Predicate::TagStartsWith(&[pos::ADVERB, pos::ADVERBIAL_PRONOUN]);
const ADVERB_OR_VERB: Predicate =
    Predicate::TagStartsWith(&[pos::ADVERB, pos::ADVERBIAL_PRONOUN, pos::VERB]);
const CONTRAST: Predicate = Predicate::FormIn(lexical::CONTRAST_PARTICLES);
const PRONOUN: Predicate = Predicate::TagStartsWith(&[pos::DET_PRONOUN, pos::NOUN_PRONOUN]);
const ADVERBIAL_PARTICIPLE_TAG: Predicate = Predicate::TagContains(morpheme::ADVERBIAL_PARTICIPLE);
const ADVERBIAL_PARTICIPLE_READING: Predicate =
    Predicate::AnalysesContain(morpheme::ADVERBIAL_PARTICIPLE);

/// Tokens a preverb search may reach across: no verbs, participles,
/// other preverbs or punctuation
const TRANSPARENT: Predicate = Predicate::Not(&Predicate::AnyOf(&[
    VERB,
    ADVERBIAL_PARTICIPLE_TAG,
    PREVERB,
    Predicate::TagStartsWith(&[pos::PUNCTUATION]),
]));

/// A following verb (other than "volna") claims a preverb in front of the
/// centre before the centre does
const NO_VERB_RIGHT_1: Predicate =
    Predicate::AnyOf(&[Predicate::At(1, &VOLNA), Predicate::Not(&Predicate::At(1, &VERB))]);

/// Radius 2: the first revision of the rule set
static BASIC_RULES: &[Rule] = &[Rule::Group(RuleGroup {
    name: "finite_verb",
    gate: Predicate::AllOf(&[VERB, VERB_READING, Predicate::Not(&VOLNA)]),
    rules: &[
        Rule::AlreadyPrefixed {
            name: "already_prefixed",
        },
        // szét kell szerelni, szét se szereli
        Rule::Fixed(FixedPattern {
            name: "preverb_two_left",
            when: Predicate::AllOf(&[
                Predicate::At(-2, &PREVERB),
                Predicate::At(-1, &Predicate::TagStartsWith(&[pos::ADVERB, pos::VERB])),
            ]),
            target: -2,
        }),
        Rule::Fixed(FixedPattern {
            name: "preverb_right_adjacent",
            when: Predicate::At(1, &PREVERB),
            target: 1,
        }),
        // rágta volna szét, tépi hirtelen szét
        Rule::Fixed(FixedPattern {
            name: "preverb_two_right",
            when: Predicate::AllOf(&[
                Predicate::At(2, &PREVERB),
                Predicate::At(
                    1,
                    &Predicate::AnyOf(&[Predicate::TagStartsWith(&[pos::ADVERB]), VOLNA]),
                ),
            ]),
            target: 2,
        }),
        Rule::Proximity(ProximitySearch {
            name: "nearest_preverb",
            candidate: PREVERB,
            transparent: TRANSPARENT,
            left_guard: Predicate::AllOf(&[
                NO_VERB_RIGHT_1,
                Predicate::Not(&Predicate::At(2, &VERB)),
            ]),
        }),
    ],
})];

/// Radius 3: participles, pronouns, contrast particles and negation
static EXTENDED_RULES: &[Rule] = &[
    // szét akarta ám szedni
    Rule::Fixed(FixedPattern {
        name: "infinitive_distant_preverb",
        when: Predicate::AllOf(&[
            VERB,
            Predicate::AnyOf(&[ADVERBIAL_PARTICIPLE_READING, INFINITIVE]),
            Predicate::At(-1, &Predicate::AnyOf(&[ADVERB_OR_VERB, CONTRAST, PRONOUN])),
            Predicate::At(-2, &ADVERB_OR_VERB),
            Predicate::At(-3, &PREVERB),
        ]),
        target: -3,
    }),
    // szedte ott akkor szét
    Rule::Fixed(FixedPattern {
        name: "preverb_after_two_adverbs",
        when: Predicate::AllOf(&[
            VERB,
            Predicate::At(1, &ADVERB_LIKE),
            Predicate::At(2, &ADVERB_LIKE),
            Predicate::At(3, &PREVERB),
        ]),
        target: 3,
    }),
    Rule::Group(RuleGroup {
        name: "verb_like",
        gate: Predicate::AnyOf(&[
            Predicate::AllOf(&[
                VERB,
                VERB_READING,
                Predicate::Not(&VOLNA),
                Predicate::Not(&Predicate::AnyOf(&[
                    Predicate::At(1, &INFINITIVE),
                    Predicate::At(1, &ADVERBIAL_PARTICIPLE_TAG),
                    Predicate::At(2, &INFINITIVE),
                    Predicate::At(2, &ADVERBIAL_PARTICIPLE_TAG),
                ])),
            ]),
            Predicate::AllOf(&[
                Predicate::TagStartsWith(&[pos::ADJECTIVE]),
                Predicate::AnalysesContain(morpheme::MODAL_PARTICIPLE),
            ]),
            Predicate::AllOf(&[
                Predicate::TagIs(pos::ADVERB),
                Predicate::AnyOf(&[
                    ADVERBIAL_PARTICIPLE_READING,
                    Predicate::AnalysesContain(morpheme::FUTURE_PARTICIPLE),
                ]),
            ]),
        ]),
        rules: &[
            Rule::AlreadyPrefixed {
                name: "already_prefixed",
            },
            // szét kell szerelni, szét se szereli
            Rule::Fixed(FixedPattern {
                name: "preverb_two_left",
                when: Predicate::AllOf(&[
                    Predicate::At(-2, &PREVERB),
                    Predicate::At(-1, &ADVERB_OR_VERB),
                ]),
                target: -2,
            }),
            Rule::Fixed(FixedPattern {
                name: "preverb_right_adjacent",
                when: Predicate::At(1, &PREVERB),
                target: 1,
            }),
            // rágja is szét, rágta volna szét, tépi hirtelen szét
            Rule::Fixed(FixedPattern {
                name: "preverb_two_right",
                when: Predicate::AllOf(&[
                    Predicate::At(2, &PREVERB),
                    Predicate::At(
                        1,
                        &Predicate::AnyOf(&[
                            ADVERB_LIKE,
                            Predicate::TagIs(pos::QUESTION_PARTICLE),
                            VOLNA,
                            CONTRAST,
                            Predicate::TagStartsWith(&[
                                pos::NOUN,
                                pos::DET_PRONOUN,
                                pos::NOUN_PRONOUN,
                            ]),
                        ]),
                    ),
                ]),
                target: 2,
            }),
            Rule::Proximity(ProximitySearch {
                name: "nearest_preverb",
                candidate: PREVERB,
                transparent: TRANSPARENT,
                left_guard: Predicate::AllOf(&[
                    NO_VERB_RIGHT_1,
                    Predicate::Not(&Predicate::At(1, &ADVERBIAL_PARTICIPLE_READING)),
                    Predicate::Not(&Predicate::At(2, &VERB)),
                    Predicate::Not(&Predicate::At(2, &ADVERBIAL_PARTICIPLE_READING)),
                    Predicate::Not(&Predicate::At(3, &VERB)),
                    Predicate::Not(&Predicate::At(3, &ADVERBIAL_PARTICIPLE_READING)),
                ]),
            }),
        ],
    }),
    // szét nem szedett, meg sem nézendő
    Rule::Fixed(FixedPattern {
        name: "participle_after_negation",
        when: Predicate::AllOf(&[
            Predicate::AnyOf(&[
                Predicate::AllOf(&[
                    Predicate::TagStartsWith(&[pos::ADJECTIVE]),
                    Predicate::AnyOf(&[
                        Predicate::AnalysesContain(morpheme::PERFECT_PARTICIPLE),
                        Predicate::AnalysesContain(morpheme::IMPERFECT_PARTICIPLE),
                        Predicate::AnalysesContain(morpheme::FUTURE_PARTICIPLE),
                    ]),
                ]),
                Predicate::AllOf(&[
                    Predicate::TagStartsWith(&[pos::NOUN, pos::ADJECTIVE]),
                    Predicate::AnalysesContain(morpheme::GERUND),
                ]),
            ]),
            Predicate::At(-2, &PREVERB),
            Predicate::At(-1, &Predicate::FormIn(lexical::NEGATION_PARTICLES)),
        ]),
        target: -2,
    }),
];

/// Available rule table revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleRevision {
    /// Radius 2, finite verbs only
    Basic,
    /// Radius 3, adds participles, gerunds and wider patterns
    #[default]
    Extended,
}

impl RuleRevision {
    /// Every revision, oldest first
    pub const ALL: [RuleRevision; 2] = [RuleRevision::Basic, RuleRevision::Extended];

    /// Search radius the revision is written for
    pub fn radius(&self) -> usize {
        match self {
            RuleRevision::Basic => 2,
            RuleRevision::Extended => 3,
        }
    }

    /// Revision name
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleRevision::Basic => "basic",
            RuleRevision::Extended => "extended",
        }
    }

    /// Build and validate the table of this revision
    pub fn table(&self) -> Result<RuleTable> {
        let rules = match self {
            RuleRevision::Basic => BASIC_RULES,
            RuleRevision::Extended => EXTENDED_RULES,
        };
        RuleTable::new(self.as_str(), self.radius(), rules)
    }
}

impl fmt::Display for RuleRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleRevision {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(RuleRevision::Basic),
            "extended" => Ok(RuleRevision::Extended),
            other => Err(format!("unknown rule revision '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Decision;
    use crate::scanner::{Sentence, WindowScanner};
    use crate::token::Token;

    fn tok(form: &str, tag: &str) -> Token {
        Token::new(form, form, tag, format!(r#"[{{"readable": "{form}{tag}"}}]"#))
    }

    fn classify(revision: RuleRevision, tokens: Vec<Token>, at: usize) -> Option<(&'static str, Decision)> {
        let table = revision.table().unwrap();
        let radius = table.radius();
        let sentence = Sentence::padded(tokens, radius);
        let window = WindowScanner::new(radius).window(sentence.buffer(), at + radius);
        table.evaluate(&window).map(|m| (m.rule, m.decision))
    }

    #[test]
    fn test_every_revision_validates() {
        for revision in RuleRevision::ALL {
            let table = revision.table().unwrap();
            assert_eq!(table.radius(), revision.radius());
            assert!(!table.rule_names().is_empty());
        }
    }

    #[test]
    fn test_revision_parsing() {
        assert_eq!("basic".parse::<RuleRevision>(), Ok(RuleRevision::Basic));
        assert_eq!("Extended".parse::<RuleRevision>(), Ok(RuleRevision::Extended));
        assert!("radius4".parse::<RuleRevision>().is_err());
        assert_eq!(RuleRevision::default(), RuleRevision::Extended);
    }

    #[test]
    fn test_preverb_over_auxiliary() {
        // szét kell szerelni
        let tokens = vec![
            tok("szét", "[/Prev]"),
            tok("kell", "[/V][Prs.NDef.3Sg]"),
            tok("szerelni", "[/V][Inf]"),
        ];
        for revision in RuleRevision::ALL {
            assert_eq!(
                classify(revision, tokens.clone(), 2),
                Some(("preverb_two_left", Decision::Bind { preverb: revision.radius() }))
            );
        }
    }

    #[test]
    fn test_auxiliary_followed_by_infinitive_is_gated_out() {
        // kell is skipped in the extended table: an infinitive follows it
        let tokens = vec![
            tok("szét", "[/Prev]"),
            tok("kell", "[/V][Prs.NDef.3Sg]"),
            tok("szerelni", "[/V][Inf]"),
        ];
        assert_eq!(classify(RuleRevision::Extended, tokens, 1), None);
    }

    #[test]
    fn test_volna_between_verb_and_preverb() {
        // rágta volna szét
        let tokens = vec![
            tok("rágta", "[/V][Pst.Def.3Sg]"),
            tok("volna", "[/V][Cond.NDef.3Sg]"),
            tok("szét", "[/Prev]"),
        ];
        for revision in RuleRevision::ALL {
            let radius = revision.radius();
            assert_eq!(
                classify(revision, tokens.clone(), 0),
                Some(("preverb_two_right", Decision::Bind { preverb: radius + 2 }))
            );
            // volna itself never takes a preverb
            assert_eq!(classify(revision, tokens.clone(), 1), None);
        }
    }

    #[test]
    fn test_distant_preverb_before_infinitive() {
        // szét akarta ám szedni
        let tokens = vec![
            tok("szét", "[/Prev]"),
            tok("akarta", "[/V][Pst.Def.3Sg]"),
            tok("ám", "[/Cnj]"),
            tok("szedni", "[/V][Inf]"),
        ];
        assert_eq!(
            classify(RuleRevision::Extended, tokens, 3),
            Some(("infinitive_distant_preverb", Decision::Bind { preverb: 3 }))
        );
    }

    #[test]
    fn test_preverb_after_two_adverbs() {
        let tokens = vec![
            tok("szedte", "[/V][Pst.Def.3Sg]"),
            tok("ott", "[/Adv|Pro]"),
            tok("akkor", "[/Adv|Pro]"),
            tok("szét", "[/Prev]"),
        ];
        assert_eq!(
            classify(RuleRevision::Extended, tokens, 0),
            Some(("preverb_after_two_adverbs", Decision::Bind { preverb: 6 }))
        );
    }

    #[test]
    fn test_participle_after_negation() {
        let mut participle = tok("szedett", "[/Adj][Nom]");
        participle.analyses =
            r#"[{"readable": "szed[/V]=szed+[_PerfPtcp/Adj]=ett"}]"#.to_string();
        let tokens = vec![tok("szét", "[/Prev]"), tok("nem", "[/Adv]"), participle];
        assert_eq!(
            classify(RuleRevision::Extended, tokens, 2),
            Some(("participle_after_negation", Decision::Bind { preverb: 3 }))
        );
    }

    #[test]
    fn test_modal_participle_is_verb_like() {
        let mut participle = tok("nézendő", "[/Adj][Nom]");
        participle.analyses =
            r#"[{"readable": "néz[/V]=néz+[_ModPtcp/Adj]=endő"}]"#.to_string();
        let tokens = vec![participle, tok("meg", "[/Prev]")];
        assert_eq!(
            classify(RuleRevision::Extended, tokens, 0),
            Some(("preverb_right_adjacent", Decision::Bind { preverb: 4 }))
        );
    }

    #[test]
    fn test_adverbial_participles_are_verb_like() {
        // szétszedve meg, nézendő meg
        let mut adverbial = tok("szedve", "[/Adv]");
        adverbial.analyses =
            r#"[{"readable": "szed[/V]=szed+[_AdvPtcp/Adv]=ve"}]"#.to_string();
        let mut future = tok("nézendő", "[/Adv]");
        future.analyses = r#"[{"readable": "néz[/V]=néz+[_FutPtcp/Adj]=endő"}]"#.to_string();

        for participle in [adverbial, future] {
            let tokens = vec![participle, tok("meg", "[/Prev]")];
            assert_eq!(
                classify(RuleRevision::Extended, tokens.clone(), 0),
                Some(("preverb_right_adjacent", Decision::Bind { preverb: 4 }))
            );
            // the basic table only looks at verbs
            assert_eq!(classify(RuleRevision::Basic, tokens, 0), None);
        }
    }

    #[test]
    fn test_plain_adverb_is_not_verb_like() {
        let tokens = vec![tok("hirtelen", "[/Adv]"), tok("meg", "[/Prev]")];
        assert_eq!(classify(RuleRevision::Extended, tokens, 0), None);
    }

    #[test]
    fn test_left_adjacent_preverb_through_search() {
        let tokens = vec![tok("szét", "[/Prev]"), tok("szerelni", "[/V][Inf]")];
        assert_eq!(
            classify(RuleRevision::Extended, tokens, 1),
            Some(("nearest_preverb", Decision::Bind { preverb: 3 }))
        );
    }

    #[test]
    fn test_punctuation_blocks_search() {
        let tokens = vec![
            tok("nézte", "[/V][Pst.Def.3Sg]"),
            tok(",", "[Punct]"),
            tok("szét", "[/Prev]"),
        ];
        assert_eq!(
            classify(RuleRevision::Extended, tokens, 0),
            Some(("verb_like", Decision::Unattached))
        );
    }
}
