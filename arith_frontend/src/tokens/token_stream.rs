//! Forward-only token stream consumed by the parser
//!
//! Trivia tokens are dropped when the stream is built, so lookahead and
//! consumption only ever see significant tokens. Consumption is
//! destructive: a token handed out by [`TokenStream::next`] is gone.

use crate::tokens::token::{Token, TokenKind};
use crate::utils::{Position, Span};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct TokenStream {
    /// Significant tokens not yet consumed
    pending: VecDeque<Token>,
    /// Where the input ended; used to locate end-of-input errors
    end: Position,
    consumed: usize,
    trivia_skipped: usize,
}

impl TokenStream {
    /// Build a stream from lexer output, filtering trivia
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map(|token| token.span.end)
            .unwrap_or_else(Position::start);
        Self::with_end(tokens, end)
    }

    /// Build a stream whose end-of-input position is known explicitly
    pub fn with_end(tokens: Vec<Token>, end: Position) -> Self {
        let total = tokens.len();
        let pending: VecDeque<Token> = tokens.into_iter().filter(|t| !t.is_trivia()).collect();
        let trivia_skipped = total - pending.len();

        crate::log_debug!("Token stream prepared",
            "significant_tokens" => pending.len(),
            "trivia_skipped" => trivia_skipped
        );

        Self {
            pending,
            end,
            consumed: 0,
            trivia_skipped,
        }
    }

    /// Whether the token `offset` positions ahead has kind `kind`
    pub fn peek(&self, kind: TokenKind, offset: usize) -> bool {
        self.lookahead(offset).is_some_and(|token| token.is(kind))
    }

    /// The token `offset` positions ahead, if any
    pub fn lookahead(&self, offset: usize) -> Option<&Token> {
        self.pending.get(offset)
    }

    /// Kind of the next token, if any
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.pending.front().map(|token| token.kind)
    }

    /// Consume the next token only if it has kind `kind`
    pub fn next_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek(kind, 0) {
            self.next()
        } else {
            None
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remaining significant tokens
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn trivia_skipped(&self) -> usize {
        self.trivia_skipped
    }

    /// Zero-width span at the end of input
    pub fn end_span(&self) -> Span {
        Span::point(self.end)
    }

    /// Span of the next token, or the end of input
    pub fn current_span(&self) -> Span {
        self.pending
            .front()
            .map(|token| token.span)
            .unwrap_or_else(|| self.end_span())
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.pending.pop_front()?;
        self.consumed += 1;
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pending.len(), Some(self.pending.len()))
    }
}

impl ExactSizeIterator for TokenStream {}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, lexeme: &str, start: usize) -> Token {
        let from = Position::new(start, 1, start as u32 + 1);
        Token::new(kind, lexeme, Span::new(from, from.advance_str(lexeme)))
    }

    fn sample() -> Vec<Token> {
        // " 1.0 + 2.0 "
        vec![
            tok(TokenKind::Whitespace, " ", 0),
            tok(TokenKind::Num, "1.0", 1),
            tok(TokenKind::Whitespace, " ", 4),
            tok(TokenKind::Plus, "+", 5),
            tok(TokenKind::Whitespace, " ", 6),
            tok(TokenKind::Num, "2.0", 7),
            tok(TokenKind::Whitespace, " ", 10),
        ]
    }

    #[test]
    fn test_trivia_is_filtered() {
        let stream = TokenStream::new(sample());
        assert_eq!(stream.remaining(), 3);
        assert_eq!(stream.trivia_skipped(), 4);
        assert_eq!(stream.end_span().start.offset, 11);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let stream = TokenStream::new(sample());
        assert!(stream.peek(TokenKind::Num, 0));
        assert!(stream.peek(TokenKind::Plus, 1));
        assert!(!stream.peek(TokenKind::Plus, 0));
        assert!(!stream.peek(TokenKind::Num, 3));
        assert_eq!(stream.remaining(), 3);
    }

    #[test]
    fn test_consumption_is_destructive() {
        let mut stream = TokenStream::new(sample());
        assert_eq!(stream.next().map(|t| t.lexeme), Some("1.0".to_string()));
        assert!(stream.next_if(TokenKind::Num).is_none());
        assert_eq!(
            stream.next_if(TokenKind::Plus).map(|t| t.kind),
            Some(TokenKind::Plus)
        );
        assert_eq!(stream.consumed(), 2);

        let rest: Vec<_> = stream.by_ref().collect();
        assert_eq!(rest.len(), 1);
        assert!(stream.is_at_end());
        assert!(stream.next().is_none());
        assert_eq!(stream.current_span(), stream.end_span());
    }

    #[test]
    fn test_empty_stream() {
        let stream = TokenStream::new(Vec::new());
        assert!(stream.is_at_end());
        assert_eq!(stream.peek_kind(), None);
        assert_eq!(stream.end_span(), Span::dummy());
    }
}
