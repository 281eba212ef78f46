use chemc_lexer::{Token, TokenKind};

/// A stream of tokens from the lexer
pub struct TokenStream<'t, 'src> {
    /// The tokens being evaluated
    tokens: &'t [Token<'src>],
    /// Current position in the token stream
    position: usize,
}

impl<'t, 'src> TokenStream<'t, 'src> {
    /// Create a new token stream from a slice of tokens
    pub fn new(tokens: &'t [Token<'src>]) -> Self {
        TokenStream {
            tokens,
            position: 0,
        }
    }

    /// Get the current token without advancing
    pub fn peek(&self) -> Option<&'t Token<'src>> {
        self.tokens.get(self.position)
    }

    /// Get the next token and advance the position
    pub fn next(&mut self) -> Option<&'t Token<'src>> {
        let token = self.peek();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Consume the next token if it is glued to `previous` and satisfies `accept`
    pub fn next_adjacent(
        &mut self,
        previous: &Token<'_>,
        accept: impl Fn(TokenKind) -> bool,
    ) -> Option<&'t Token<'src>> {
        match self.peek() {
            Some(token) if previous.is_followed_by(token) && accept(token.kind) => self.next(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemc_lexer::Lexer;

    #[test]
    fn test_peek_and_next() {
        let tokens: Vec<_> = Lexer::new("(O)").collect();
        let mut stream = TokenStream::new(&tokens);
        assert_eq!(stream.peek().map(|t| t.kind), Some(TokenKind::LeftParen));
        assert_eq!(stream.next().map(|t| t.lexeme), Some("("));
        assert_eq!(stream.peek().map(|t| t.lexeme), Some("O"));
        stream.next();
        assert_eq!(stream.next().map(|t| t.kind), Some(TokenKind::RightParen));
        assert!(stream.peek().is_none());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_next_adjacent() {
        let is_count = |kind: TokenKind| matches!(kind, TokenKind::Count(_));

        let tokens: Vec<_> = Lexer::new(")2").collect();
        let mut stream = TokenStream::new(&tokens);
        let close = stream.next().unwrap();
        assert!(stream.next_adjacent(close, is_count).is_some());

        let tokens: Vec<_> = Lexer::new(") 2").collect();
        let mut stream = TokenStream::new(&tokens);
        let close = stream.next().unwrap();
        assert!(stream.next_adjacent(close, is_count).is_none());
        assert_eq!(stream.next().map(|t| t.kind), Some(TokenKind::Count(2)));
    }
}
