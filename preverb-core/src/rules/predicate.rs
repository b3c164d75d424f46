//! Declarative token tests
//!
//! A [`Predicate`] is evaluated against a window at some offset from its
//! centre. Leaf variants look at the token at that offset; [`Predicate::At`]
//! shifts the offset, so whole positional patterns are plain data.

use crate::scanner::TokenWindow;
use crate::token::Token;

/// Test on the token at an offset of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Tag equals the string
    TagIs(&'static str),
    /// Tag starts with any of the prefixes
    TagStartsWith(&'static [&'static str]),
    /// Tag contains the substring
    TagContains(&'static str),
    /// Raw analyses contain the substring
    AnalysesContain(&'static str),
    /// Surface form equals the string
    FormIs(&'static str),
    /// Surface form is one of the strings
    FormIn(&'static [&'static str]),
    /// Evaluate the inner predicate `n` tokens further (negative: left)
    At(i32, &'static Predicate),
    /// Negation
    Not(&'static Predicate),
    /// Disjunction
    AnyOf(&'static [Predicate]),
    /// Conjunction
    AllOf(&'static [Predicate]),
}

impl Predicate {
    /// Evaluate at the window centre
    pub fn holds(&self, window: &TokenWindow<'_>) -> bool {
        self.test(window, 0)
    }

    /// Evaluate at a signed offset from the window centre
    pub fn test(&self, window: &TokenWindow<'_>, offset: i32) -> bool {
        match self {
            Predicate::At(shift, inner) => inner.test(window, offset + shift),
            Predicate::Not(inner) => !inner.test(window, offset),
            Predicate::AnyOf(all) => all.iter().any(|p| p.test(window, offset)),
            Predicate::AllOf(all) => all.iter().all(|p| p.test(window, offset)),
            leaf => leaf.matches_token(window.at(offset)),
        }
    }

    fn matches_token(&self, token: &Token) -> bool {
        match self {
            Predicate::TagIs(tag) => token.tag == *tag,
            Predicate::TagStartsWith(prefixes) => prefixes.iter().any(|p| token.tag_starts_with(p)),
            Predicate::TagContains(needle) => token.tag.contains(needle),
            Predicate::AnalysesContain(needle) => token.analyses_contain(needle),
            Predicate::FormIs(form) => token.form == *form,
            Predicate::FormIn(forms) => forms.contains(&token.form.as_str()),
            Predicate::At(..) | Predicate::Not(_) | Predicate::AnyOf(_) | Predicate::AllOf(_) => {
                unreachable!("combinators are handled by test()")
            }
        }
    }

    /// Farthest distance from the evaluation point this predicate looks at
    pub fn reach(&self) -> u32 {
        match self {
            Predicate::At(shift, inner) => shift.unsigned_abs() + inner.reach(),
            Predicate::Not(inner) => inner.reach(),
            Predicate::AnyOf(all) | Predicate::AllOf(all) => {
                all.iter().map(Predicate::reach).max().unwrap_or(0)
            }
            _ => 0,
        }
    }
}
