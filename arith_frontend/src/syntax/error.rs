//! Syntax errors raised while building the expression tree

use crate::config::compile_time::syntax::{MAX_EXPRESSION_DEPTH, MAX_PARSE_DEPTH};
use crate::logging::{codes, Code};
use crate::tokens::TokenKind;
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Parse failures; the first one aborts the parse
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unexpected token: expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEndOfInput { expected: String, span: Span },

    #[error("Unexpected trailing {found} at {span}: expected end of input")]
    TrailingTokens { found: String, span: Span },

    #[error("Invalid number literal '{lexeme}' at {span}")]
    InvalidNumber { lexeme: String, span: Span },

    #[error("Maximum nesting depth {MAX_PARSE_DEPTH} exceeded at {span}")]
    MaxRecursionDepth { span: Span },

    #[error("Expression depth {depth} exceeds maximum {MAX_EXPRESSION_DEPTH} at {span}")]
    ExpressionTooDeep { depth: usize, span: Span },
}

/// Render a set of acceptable kinds as `A`, `A or B`, `A, B or C`
pub fn describe_expected(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => "nothing".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let init: Vec<&str> = init.iter().map(TokenKind::as_str).collect();
            format!("{} or {}", init.join(", "), last)
        }
    }
}

impl SyntaxError {
    pub fn unexpected_token(expected: &[TokenKind], found: &str, span: Span) -> Self {
        Self::UnexpectedToken {
            expected: describe_expected(expected),
            found: found.to_string(),
            span,
        }
    }

    pub fn unexpected_end_of_input(expected: &[TokenKind], span: Span) -> Self {
        Self::UnexpectedEndOfInput {
            expected: describe_expected(expected),
            span,
        }
    }

    pub fn trailing_tokens(found: &str, span: Span) -> Self {
        Self::TrailingTokens {
            found: found.to_string(),
            span,
        }
    }

    pub fn invalid_number(lexeme: &str, span: Span) -> Self {
        Self::InvalidNumber {
            lexeme: lexeme.to_string(),
            span,
        }
    }

    pub fn max_recursion_depth(span: Span) -> Self {
        Self::MaxRecursionDepth { span }
    }

    pub fn expression_too_deep(depth: usize, span: Span) -> Self {
        Self::ExpressionTooDeep { depth, span }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfInput { .. } => codes::syntax::UNEXPECTED_END_OF_INPUT,
            Self::TrailingTokens { .. } => codes::syntax::TRAILING_TOKENS,
            Self::InvalidNumber { .. } => codes::syntax::INVALID_NUMBER,
            Self::MaxRecursionDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
            Self::ExpressionTooDeep { .. } => codes::syntax::EXPRESSION_TOO_DEEP,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::UnexpectedEndOfInput { span, .. }
            | Self::TrailingTokens { span, .. }
            | Self::InvalidNumber { span, .. }
            | Self::MaxRecursionDepth { span }
            | Self::ExpressionTooDeep { span, .. } => *span,
        }
    }

    /// Check if this error requires halting
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Get error severity
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }
}
