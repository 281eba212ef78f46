//! Located tokens handed from the lexer to the evaluator.

use std::fmt;

/// Represents a token's location in a formula line.
///
/// Columns are 1-based and count Unicode scalar values; the offset is the
/// 0-based byte offset into the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// The 1-based column in the formula line
    pub column: usize,
    /// The 0-based byte offset from the start of the line
    pub offset: usize,
}

/// The kind of a formula token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An element symbol candidate such as `Mg` or `O`
    Symbol,
    /// A multiplier parsed from a maximal digit run
    Count(u32),
    /// A digit run too large for a multiplier
    CountOverflow,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// Lowercase letters with no leading uppercase letter
    Stray,
    /// Any other non-whitespace character
    Unrecognized,
}

/// A token borrowed from the formula line it was lexed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// What the lexeme was classified as
    pub kind: TokenKind,
    /// The exact source text of the token
    pub lexeme: &'a str,
    /// Where the token starts
    pub location: Location,
}

impl<'a> Token<'a> {
    /// Create a new token
    pub fn new(kind: TokenKind, lexeme: &'a str, location: Location) -> Self {
        Self {
            kind,
            lexeme,
            location,
        }
    }

    /// Byte offset one past the end of the lexeme
    pub fn end_offset(&self) -> usize {
        self.location.offset + self.lexeme.len()
    }

    /// Number of characters in the lexeme
    pub fn width(&self) -> usize {
        self.lexeme.chars().count()
    }

    /// Whether `next` starts exactly where this token ends, with nothing in between
    pub fn is_followed_by(&self, next: &Token<'_>) -> bool {
        next.location.offset == self.end_offset()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Symbol => write!(f, "symbol '{}'", self.lexeme),
            TokenKind::Count(n) => write!(f, "multiplier {n}"),
            TokenKind::CountOverflow => write!(f, "oversized multiplier '{}'", self.lexeme),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::Stray => write!(f, "stray lowercase '{}'", self.lexeme),
            TokenKind::Unrecognized => write!(f, "character '{}'", self.lexeme),
        }
    }
}
