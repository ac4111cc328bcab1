//! Token kinds and token values produced by the lexer

use crate::utils::Span;
use serde::Serialize;
use std::fmt;

/// Every token kind the arithmetic grammar knows about.
///
/// Declaration order matches the standard registration order, which is also
/// the tie-break priority between automata accepting the same lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TokenKind {
    Num,
    Plus,
    Minus,
    Times,
    Div,
    LParen,
    RParen,
    Whitespace,
}

impl TokenKind {
    pub const ALL: [TokenKind; 8] = [
        Self::Num,
        Self::Plus,
        Self::Minus,
        Self::Times,
        Self::Div,
        Self::LParen,
        Self::RParen,
        Self::Whitespace,
    ];

    /// Upper-case label used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Num => "NUM",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Times => "TIMES",
            Self::Div => "DIV",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Whitespace => "WHITESPACE",
        }
    }

    /// Tokens the parser never sees
    pub fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    pub fn is_significant(&self) -> bool {
        !self.is_trivia()
    }

    pub fn is_additive_operator(&self) -> bool {
        matches!(self, Self::Plus | Self::Minus)
    }

    pub fn is_multiplicative_operator(&self) -> bool {
        matches!(self, Self::Times | Self::Div)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A matched lexeme with its kind and location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Whitespace => write!(f, "{}", self.kind),
            _ => write!(f, "{} '{}'", self.kind, self.lexeme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_display_includes_lexeme() {
        let span = Span::new(Position::start(), Position::new(4, 1, 5));
        let token = Token::new(TokenKind::Num, "12.5", span);
        assert_eq!(token.to_string(), "NUM '12.5'");

        let ws = Token::new(TokenKind::Whitespace, "  ", span);
        assert_eq!(ws.to_string(), "WHITESPACE");
    }

    #[test]
    fn test_classification() {
        let trivia: Vec<_> = TokenKind::ALL.iter().filter(|k| k.is_trivia()).collect();
        assert_eq!(trivia, vec![&TokenKind::Whitespace]);

        assert!(TokenKind::Minus.is_additive_operator());
        assert!(TokenKind::Div.is_multiplicative_operator());
        assert!(!TokenKind::LParen.is_additive_operator());
    }
}
