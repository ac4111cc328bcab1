//! Syntax analysis module - TokenStream to AST transformation
//!
//! Consumes a significant-token stream and builds an [`Expr`] with
//! span-accurate errors. Parsing stops at the first error.

mod error;
mod parser;

pub use error::{describe_expected, SyntaxError, SyntaxResult};
pub use parser::Parser;

use crate::config::runtime::SyntaxPreferences;
use crate::grammar::Expr;
use crate::logging::codes;
use crate::tokens::TokenStream;
use crate::{log_debug, log_error, log_success};

/// Parse a token stream into an expression tree
pub fn parse(token_stream: TokenStream) -> SyntaxResult<Expr> {
    parse_with_preferences(token_stream, SyntaxPreferences::default())
}

pub fn parse_with_preferences(
    token_stream: TokenStream,
    preferences: SyntaxPreferences,
) -> SyntaxResult<Expr> {
    log_debug!("Starting syntax analysis", "tokens" => token_stream.remaining());

    let mut parser = Parser::with_preferences(token_stream, preferences);
    let result = parser.parse();

    match &result {
        Ok(expr) => {
            log_success!(codes::success::AST_CONSTRUCTION_COMPLETE,
                "Syntax analysis completed successfully",
                "nodes" => expr.node_count(),
                "depth" => expr.depth(),
                "tokens_consumed" => parser.tokens_consumed()
            );
        }
        Err(error) => {
            log_error!(error.error_code(), "Syntax analysis failed",
                span = error.span(),
                "error" => error
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize_source;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_entry_point() {
        let expr = parse(tokenize_source("2.0 + 3.0 * 4.0").unwrap()).unwrap();
        assert_eq!(expr.to_sexpr(), "(+ 2.0 (* 3.0 4.0))");
        assert_eq!(expr.evaluate(), 14.0);
    }

    #[test]
    fn test_parse_step_logging_does_not_change_result() {
        let preferences = SyntaxPreferences {
            log_parse_steps: true,
        };
        let expr =
            parse_with_preferences(tokenize_source("1.0 - 2.0 - 3.0").unwrap(), preferences)
                .unwrap();
        assert_eq!(expr.evaluate(), -4.0);
    }

    #[test]
    fn test_errors_carry_codes() {
        let error = parse(tokenize_source("(1.0").unwrap()).unwrap_err();
        assert_matches!(error, SyntaxError::UnexpectedEndOfInput { .. });
        assert_eq!(error.error_code(), codes::syntax::UNEXPECTED_END_OF_INPUT);
    }
}
