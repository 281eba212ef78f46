//! Raw token definitions driven by the `logos` derive.

use logos::Logos;

/// Failure produced by the raw lexer for a single lexeme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LexError {
    /// A character outside the formula notation
    #[default]
    Unrecognized,
    /// A digit run whose value does not fit in a `u32`
    CountOverflow,
}

/// Raw token type used by the logos lexer
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n]+")]
pub enum LogosToken {
    /// One uppercase letter followed by any number of lowercase letters
    #[regex(r"[A-Z][a-z]*")]
    Symbol,

    /// A run of lowercase letters that does not follow an uppercase letter
    #[regex(r"[a-z]+")]
    Stray,

    /// A maximal run of decimal digits
    #[regex(r"[0-9]+", parse_count)]
    Count(u32),

    /// Opens a group
    #[token("(")]
    LParen,

    /// Closes a group
    #[token(")")]
    RParen,
}

fn parse_count(lex: &mut logos::Lexer<LogosToken>) -> Result<u32, LexError> {
    lex.slice().parse().map_err(|_| LexError::CountOverflow)
}
