//! Ordered rule tables
//!
//! A table is a list of [`Rule`]s tried top to bottom against one window;
//! the first rule that commits decides the centre token. Each table is
//! written for a fixed radius, checked when the table is built.

pub mod predicate;
pub mod tables;

pub use predicate::Predicate;
pub use tables::RuleRevision;

use crate::analysis::selected_has_preverb;
use crate::error::{AnalysisError, EngineError, Result};
use crate::links::is_eligible;
use crate::scanner::TokenWindow;
use crate::tags::pos;
use tracing::{debug, warn};

/// Preverb at a fixed offset, bound when `when` holds at the centre
#[derive(Debug, Clone, Copy)]
pub struct FixedPattern {
    /// Rule name, for logs and listings
    pub name: &'static str,
    /// Positional conditions, evaluated at the centre
    pub when: Predicate,
    /// Offset of the preverb the centre is bound to
    pub target: i32,
}

/// Nearest-preverb search on both sides of the centre
///
/// Distances grow from 1 to the radius; at each distance the right-hand
/// token is tried before the left-hand one.
#[derive(Debug, Clone, Copy)]
pub struct ProximitySearch {
    /// Rule name, for logs and listings
    pub name: &'static str,
    /// What a preverb looks like
    pub candidate: Predicate,
    /// What may stand between the centre and the preverb
    pub transparent: Predicate,
    /// Extra conditions, evaluated at the centre, for left-hand candidates
    pub left_guard: Predicate,
}

/// Rules that only apply when `gate` holds at the centre
///
/// A holding gate commits the group: rules after it are skipped even when
/// none of its own rules fires.
#[derive(Debug, Clone, Copy)]
pub struct RuleGroup {
    /// Group name, for logs and listings
    pub name: &'static str,
    /// Condition on the centre
    pub gate: Predicate,
    /// Rules tried in order once the gate holds
    pub rules: &'static [Rule],
}

/// One entry of a rule table
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Preverb at a fixed offset
    Fixed(FixedPattern),
    /// The selected analysis of the centre already contains a preverb
    AlreadyPrefixed {
        /// Rule name, for logs and listings
        name: &'static str,
    },
    /// Nearest eligible preverb within the radius
    Proximity(ProximitySearch),
    /// Gated sub-table
    Group(RuleGroup),
}

impl Rule {
    /// Name of the rule
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Fixed(rule) => rule.name,
            Rule::AlreadyPrefixed { name } => name,
            Rule::Proximity(rule) => rule.name,
            Rule::Group(group) => group.name,
        }
    }
}

/// What a committing rule decided about the centre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Bind the centre to the preverb at this buffer index
    Bind {
        /// Buffer index of the preverb
        preverb: usize,
    },
    /// The centre already carries its preverb
    Prefixed,
    /// A gate committed but no rule inside it fired
    Unattached,
}

/// A committing rule and its decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    /// Name of the rule that committed
    pub rule: &'static str,
    /// Its decision
    pub decision: Decision,
}

/// Validated, ordered rule list with its radius
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    name: &'static str,
    radius: usize,
    rules: &'static [Rule],
}

impl RuleTable {
    /// Build a table, rejecting rules that look beyond `radius`
    pub fn new(name: &'static str, radius: usize, rules: &'static [Rule]) -> Result<Self> {
        validate(rules, radius)?;
        Ok(Self {
            name,
            radius,
            rules,
        })
    }

    /// Table name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Search radius the rules are written for
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Top-level rules
    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Rule names in evaluation order, with their nesting depth
    pub fn rule_names(&self) -> Vec<(usize, &'static str)> {
        let mut names = Vec::new();
        collect_names(self.rules, 0, &mut names);
        names
    }

    /// Classify the centre of `window`
    pub fn evaluate(&self, window: &TokenWindow<'_>) -> Option<RuleMatch> {
        evaluate_rules(self.rules, window)
    }
}

fn validate(rules: &[Rule], radius: usize) -> Result<()> {
    let check = |rule: &'static str, reach: u32| {
        if reach as usize > radius {
            Err(EngineError::InvalidRuleTable {
                rule,
                offset: reach as i32,
                radius,
            })
        } else {
            Ok(())
        }
    };

    for rule in rules {
        match rule {
            Rule::Fixed(fixed) => {
                check(fixed.name, fixed.when.reach())?;
                check(fixed.name, fixed.target.unsigned_abs())?;
            }
            Rule::AlreadyPrefixed { .. } => {}
            Rule::Proximity(search) => {
                check(search.name, search.candidate.reach())?;
                check(search.name, search.transparent.reach())?;
                check(search.name, search.left_guard.reach())?;
            }
            Rule::Group(group) => {
                check(group.name, group.gate.reach())?;
                validate(group.rules, radius)?;
            }
        }
    }
    Ok(())
}

fn collect_names(rules: &[Rule], depth: usize, names: &mut Vec<(usize, &'static str)>) {
    for rule in rules {
        names.push((depth, rule.name()));
        if let Rule::Group(group) = rule {
            collect_names(group.rules, depth + 1, names);
        }
    }
}

fn evaluate_rules(rules: &[Rule], window: &TokenWindow<'_>) -> Option<RuleMatch> {
    for rule in rules {
        let decision = match rule {
            Rule::Fixed(fixed) => evaluate_fixed(fixed, window),
            Rule::AlreadyPrefixed { .. } => already_prefixed(window).then_some(Decision::Prefixed),
            Rule::Proximity(search) => evaluate_proximity(search, window),
            Rule::Group(group) => {
                if group.gate.holds(window) {
                    return evaluate_rules(group.rules, window).or(Some(RuleMatch {
                        rule: group.name,
                        decision: Decision::Unattached,
                    }));
                }
                None
            }
        };

        if let Some(decision) = decision {
            return Some(RuleMatch {
                rule: rule.name(),
                decision,
            });
        }
    }
    None
}

fn evaluate_fixed(rule: &FixedPattern, window: &TokenWindow<'_>) -> Option<Decision> {
    if !rule.when.holds(window) {
        return None;
    }
    let target = window.at(rule.target);
    if !is_eligible(target, rule.target.unsigned_abs() as usize) {
        debug!(rule = rule.name, "pattern matched but preverb is taken by a closer verb");
        return None;
    }
    Some(Decision::Bind {
        preverb: window.index_at(rule.target),
    })
}

fn evaluate_proximity(search: &ProximitySearch, window: &TokenWindow<'_>) -> Option<Decision> {
    for distance in 1..=window.radius() as i32 {
        for offset in [distance, -distance] {
            if !search.candidate.test(window, offset)
                || !is_eligible(window.at(offset), distance as usize)
            {
                continue;
            }
            let step = offset.signum();
            let clear = (1..distance).all(|k| search.transparent.test(window, k * step));
            if !clear {
                continue;
            }
            if offset < 0 && !search.left_guard.holds(window) {
                continue;
            }
            return Some(Decision::Bind {
                preverb: window.index_at(offset),
            });
        }
    }
    None
}

/// Whether the analysis the tagger selected for the centre has a preverb
///
/// Unreadable or inconsistent analyses count as "not attached" so that the
/// remaining rules still run.
fn already_prefixed(window: &TokenWindow<'_>) -> bool {
    let center = window.center();
    if !center.analyses_contain(pos::PREVERB) {
        return false;
    }
    match selected_has_preverb(&center.analyses, &center.lemma, &center.tag) {
        Ok(found) => found,
        Err(AnalysisError::Parse(e)) => {
            warn!(form = %center.form, error = %e, "unreadable analyses, treating as not prefixed");
            false
        }
        Err(e @ AnalysisError::NoSelectedAnalysis { .. }) => {
            debug!(form = %center.form, "{e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{Sentence, WindowScanner};
    use crate::token::{LinkState, Token};

    const PREVERB: Predicate = Predicate::TagIs("[/Prev]");
    const VERB: Predicate = Predicate::TagStartsWith(&["[/V]"]);

    static TOY_RULES: &[Rule] = &[Rule::Group(RuleGroup {
        name: "verb",
        gate: VERB,
        rules: &[
            Rule::AlreadyPrefixed {
                name: "already_prefixed",
            },
            Rule::Fixed(FixedPattern {
                name: "right_adjacent",
                when: Predicate::At(1, &PREVERB),
                target: 1,
            }),
            Rule::Proximity(ProximitySearch {
                name: "nearest",
                candidate: PREVERB,
                transparent: Predicate::Not(&VERB),
                left_guard: Predicate::Not(&Predicate::At(1, &VERB)),
            }),
        ],
    })];

    fn prev() -> Token {
        Token::new("meg", "meg", "[/Prev]", "[]")
    }

    fn verb(form: &str) -> Token {
        Token::new(form, form, "[/V][Prs.NDef.3Sg]", "[]")
    }

    fn noun(form: &str) -> Token {
        Token::new(form, form, "[/N][Nom]", "[]")
    }

    fn evaluate(tokens: Vec<Token>, at: usize) -> Option<RuleMatch> {
        let table = RuleTable::new("toy", 2, TOY_RULES).unwrap();
        let sentence = Sentence::padded(tokens, 2);
        let window = WindowScanner::new(2).window(sentence.buffer(), at + 2);
        table.evaluate(&window)
    }

    #[test]
    fn test_fixed_rule_wins_before_search() {
        let result = evaluate(vec![prev(), verb("néz"), prev()], 1).unwrap();
        assert_eq!(result.rule, "right_adjacent");
        assert_eq!(result.decision, Decision::Bind { preverb: 4 });
    }

    #[test]
    fn test_search_reaches_over_transparent_tokens() {
        let result = evaluate(vec![verb("néz"), noun("ház"), prev()], 0).unwrap();
        assert_eq!(result.rule, "nearest");
        assert_eq!(result.decision, Decision::Bind { preverb: 4 });
    }

    #[test]
    fn test_search_blocked_by_verb() {
        let result = evaluate(vec![verb("néz"), verb("lát"), prev()], 0).unwrap();
        assert_eq!(result.decision, Decision::Unattached);
        assert_eq!(result.rule, "verb");
    }

    #[test]
    fn test_left_guard() {
        let result = evaluate(vec![prev(), verb("néz"), verb("akar")], 1).unwrap();
        assert_eq!(result.decision, Decision::Unattached);
    }

    #[test]
    fn test_non_verb_centre_is_not_classified() {
        assert_eq!(evaluate(vec![prev(), noun("ház")], 1), None);
    }

    #[test]
    fn test_taken_preverb_is_skipped() {
        let table = RuleTable::new("toy", 2, TOY_RULES).unwrap();
        let mut sentence = Sentence::padded(vec![prev(), verb("néz")], 2);
        let preverb = &mut sentence.buffer_mut()[2];
        preverb.link.state = LinkState::Connected;
        preverb.link.id = Some(7);
        preverb.link.offset = -1;

        let window = WindowScanner::new(2).window(sentence.buffer(), 3);
        let result = table.evaluate(&window).unwrap();
        assert_eq!(result.decision, Decision::Unattached);
    }

    #[test]
    fn test_already_prefixed() {
        let anas = r#"[{"lemma": "megnéz", "tag": "[/V][Prs.NDef.3Sg]", "readable": "meg[/Prev]=meg+néz[/V]=néz"}]"#;
        let token = Token::new("megnéz", "megnéz", "[/V][Prs.NDef.3Sg]", anas);
        let result = evaluate(vec![token, prev()], 0).unwrap();
        assert_eq!(result.rule, "already_prefixed");
        assert_eq!(result.decision, Decision::Prefixed);
    }

    #[test]
    fn test_broken_analyses_fall_through() {
        let token = Token::new("megnéz", "megnéz", "[/V][Prs.NDef.3Sg]", "[/Prev] not json");
        let result = evaluate(vec![token, prev()], 0).unwrap();
        assert_eq!(result.rule, "right_adjacent");
    }

    #[test]
    fn test_unselected_analysis_falls_through() {
        // the only analysis with a preverb belongs to another lemma
        let anas = r#"[{"lemma": "megnéz", "tag": "[/V][Pst.Def.3Sg]", "readable": "meg[/Prev]=meg+néz[/V]=néz"}]"#;
        let token = Token::new("nézte", "néz", "[/V][Pst.Def.3Sg]", anas);
        let result = evaluate(vec![token, prev()], 0).unwrap();
        assert_eq!(result.rule, "right_adjacent");
        assert_eq!(result.decision, Decision::Bind { preverb: 3 });
    }

    #[test]
    fn test_table_rejects_rules_beyond_radius() {
        static FAR: &[Rule] = &[Rule::Fixed(FixedPattern {
            name: "far",
            when: Predicate::At(3, &PREVERB),
            target: 3,
        })];
        match RuleTable::new("far", 2, FAR) {
            Err(EngineError::InvalidRuleTable {
                rule,
                offset,
                radius,
            }) => {
                assert_eq!(rule, "far");
                assert_eq!(offset, 3);
                assert_eq!(radius, 2);
            }
            other => panic!("Expected InvalidRuleTable, got {other:?}"),
        }
    }

    #[test]
    fn test_rule_names_are_nested() {
        let table = RuleTable::new("toy", 2, TOY_RULES).unwrap();
        assert_eq!(
            table.rule_names(),
            vec![
                (0, "verb"),
                (1, "already_prefixed"),
                (1, "right_adjacent"),
                (1, "nearest")
            ]
        );
    }
}
