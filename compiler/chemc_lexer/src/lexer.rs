//! Formula lexer built on the `logos` crate.
//! Classifies element symbols, multipliers, parentheses and malformed runs.

use crate::logos_token::{LexError, LogosToken};
use crate::token::{Location, Token, TokenKind};
use logos::Logos;

/// Formula line lexer
pub struct Lexer<'source> {
    /// The logos lexer instance
    logos_lexer: logos::Lexer<'source, LogosToken>,
    /// The line being lexed
    source: &'source str,
    /// Column (1-based) of the byte at `offset`
    column: usize,
    /// Byte offset up to which columns have been counted
    offset: usize,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given formula line
    pub fn new(source: &'source str) -> Self {
        Self {
            logos_lexer: LogosToken::lexer(source),
            source,
            column: 1,
            offset: 0,
        }
    }

    /// Convert a raw logos result into a located token
    fn convert_token(
        &self,
        raw: Result<LogosToken, LexError>,
        lexeme: &'source str,
        location: Location,
    ) -> Token<'source> {
        let kind = match raw {
            Ok(LogosToken::Symbol) => TokenKind::Symbol,
            Ok(LogosToken::Stray) => TokenKind::Stray,
            Ok(LogosToken::Count(n)) => TokenKind::Count(n),
            Ok(LogosToken::LParen) => TokenKind::LeftParen,
            Ok(LogosToken::RParen) => TokenKind::RightParen,
            Err(LexError::CountOverflow) => TokenKind::CountOverflow,
            Err(LexError::Unrecognized) => TokenKind::Unrecognized,
        };
        Token::new(kind, lexeme, location)
    }

    /// Advance the column counter to `target`, which must not be behind `offset`
    fn location_at(&mut self, target: usize) -> Location {
        if target > self.offset {
            self.column += self.source[self.offset..target].chars().count();
            self.offset = target;
        }
        Location {
            column: self.column,
            offset: self.offset,
        }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Token<'source>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.logos_lexer.next()?;
        let span = self.logos_lexer.span();
        let lexeme = self.logos_lexer.slice();
        let location = self.location_at(span.start);
        let token = self.convert_token(raw, lexeme, location);

        #[cfg(feature = "logging")]
        log::trace!("lexed {token} at column {}", location.column);

        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).map(|t| t.kind).collect()
    }

    #[test]
    fn test_lexer_basic() {
        let mut lexer = Lexer::new("H2O");

        let token = lexer.next().unwrap();
        assert_eq!(token.kind, TokenKind::Symbol);
        assert_eq!(token.lexeme, "H");

        let token = lexer.next().unwrap();
        assert_eq!(token.kind, TokenKind::Count(2));

        let token = lexer.next().unwrap();
        assert_eq!(token.kind, TokenKind::Symbol);
        assert_eq!(token.lexeme, "O");
        assert_eq!(token.location.column, 3);

        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_lexer_nested_groups() {
        assert_eq!(
            kinds("K4(ON(SO3)2)2"),
            vec![
                TokenKind::Symbol,
                TokenKind::Count(4),
                TokenKind::LeftParen,
                TokenKind::Symbol,
                TokenKind::Symbol,
                TokenKind::LeftParen,
                TokenKind::Symbol,
                TokenKind::Symbol,
                TokenKind::Count(3),
                TokenKind::RightParen,
                TokenKind::Count(2),
                TokenKind::RightParen,
                TokenKind::Count(2),
            ]
        );
    }

    #[test]
    fn test_multi_digit_counts() {
        let tokens: Vec<_> = Lexer::new("C12H22O11").collect();
        let counts: Vec<_> = tokens
            .iter()
            .filter_map(|t| match t.kind {
                TokenKind::Count(n) => Some(n),
                _ => None,
            })
            .collect();
        assert_eq!(counts, vec![12, 22, 11]);
        assert_eq!(tokens[2].lexeme, "H");
        assert_eq!(tokens[2].location.column, 4);
    }

    #[test]
    fn test_columns_skip_whitespace() {
        let tokens: Vec<_> = Lexer::new("  Na Cl\r\n").collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].location.column, 3);
        assert_eq!(tokens[1].location.column, 6);
        assert_eq!(tokens[1].location.offset, 5);
    }

    #[test]
    fn test_adjacency() {
        let tokens: Vec<_> = Lexer::new("(OH) 2").collect();
        let close = tokens[3];
        let count = tokens[4];
        assert_eq!(close.kind, TokenKind::RightParen);
        assert!(!close.is_followed_by(&count));

        let tokens: Vec<_> = Lexer::new("(OH)2").collect();
        assert!(tokens[3].is_followed_by(&tokens[4]));
    }

    #[test]
    fn test_malformed_runs() {
        assert_eq!(
            kinds("Hx+ab"),
            vec![
                TokenKind::Symbol,
                TokenKind::Unrecognized,
                TokenKind::Stray,
            ]
        );
    }
}
