//! Sentence buffer and sliding token window
//!
//! The sentence is padded with `radius` blank tokens on both ends so that
//! every window of `2 * radius + 1` tokens exists without bounds checks.
//! Windows are views into the buffer by index; the scanner never mutates.

use crate::token::Token;

/// Indexed, padded token buffer of one sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    tokens: Vec<Token>,
    padding: usize,
}

impl Sentence {
    /// Pad `tokens` with `radius` sentinels on each side
    pub fn padded(tokens: Vec<Token>, radius: usize) -> Self {
        let mut buffer = Vec::with_capacity(tokens.len() + 2 * radius);
        buffer.extend(std::iter::repeat_with(Token::padding).take(radius));
        buffer.extend(tokens);
        buffer.extend(std::iter::repeat_with(Token::padding).take(radius));
        Self {
            tokens: buffer,
            padding: radius,
        }
    }

    /// Number of real (non-padding) tokens
    pub fn len(&self) -> usize {
        self.tokens.len() - 2 * self.padding
    }

    /// Whether the sentence has no real tokens
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whole buffer, padding included
    pub fn buffer(&self) -> &[Token] {
        &self.tokens
    }

    /// Whole buffer, padding included, for in-place updates
    pub fn buffer_mut(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    /// Real tokens only
    pub fn tokens(&self) -> &[Token] {
        &self.tokens[self.padding..self.tokens.len() - self.padding]
    }

    /// Buffer index range of the real tokens
    pub fn real_range(&self) -> std::ops::Range<usize> {
        self.padding..self.tokens.len() - self.padding
    }

    /// Drop the padding and hand back the real tokens
    pub fn into_tokens(self) -> Vec<Token> {
        let Self { mut tokens, padding } = self;
        tokens.truncate(tokens.len() - padding);
        tokens.split_off(padding)
    }
}

/// Produces one window per real token, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowScanner {
    radius: usize,
}

impl WindowScanner {
    /// Create a scanner for a fixed radius
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }

    /// Search radius
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Number of tokens in every window
    pub fn window_size(&self) -> usize {
        2 * self.radius + 1
    }

    /// Buffer indices of every window centre, in scan order
    ///
    /// The sentence must have been padded with this scanner's radius.
    pub fn centers(&self, sentence: &Sentence) -> std::ops::Range<usize> {
        debug_assert_eq!(sentence.padding, self.radius);
        sentence.real_range()
    }

    /// Window around the token at buffer index `center`
    pub fn window<'a>(&self, tokens: &'a [Token], center: usize) -> TokenWindow<'a> {
        debug_assert!(center >= self.radius && center + self.radius < tokens.len());
        TokenWindow {
            tokens,
            center,
            radius: self.radius,
        }
    }
}

/// View of `2 * radius + 1` tokens around a centre
#[derive(Debug, Clone, Copy)]
pub struct TokenWindow<'a> {
    tokens: &'a [Token],
    center: usize,
    radius: usize,
}

impl<'a> TokenWindow<'a> {
    /// Token under classification
    pub fn center(&self) -> &'a Token {
        &self.tokens[self.center]
    }

    /// Buffer index of the centre
    pub fn center_index(&self) -> usize {
        self.center
    }

    /// Radius of the window
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// `k` tokens to the left; `left(0)` is the centre
    pub fn left(&self, k: usize) -> &'a Token {
        assert!(k <= self.radius, "left({k}) outside radius {}", self.radius);
        &self.tokens[self.center - k]
    }

    /// `k` tokens to the right; `right(0)` is the centre
    pub fn right(&self, k: usize) -> &'a Token {
        assert!(k <= self.radius, "right({k}) outside radius {}", self.radius);
        &self.tokens[self.center + k]
    }

    /// Token at a signed offset from the centre
    pub fn at(&self, offset: i32) -> &'a Token {
        let k = offset.unsigned_abs() as usize;
        if offset < 0 {
            self.left(k)
        } else {
            self.right(k)
        }
    }

    /// Buffer index of the token at a signed offset
    pub fn index_at(&self, offset: i32) -> usize {
        let k = offset.unsigned_abs() as usize;
        assert!(k <= self.radius, "offset {offset} outside radius {}", self.radius);
        if offset < 0 {
            self.center - k
        } else {
            self.center + k
        }
    }
}
