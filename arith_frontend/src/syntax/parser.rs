//! Recursive-descent parser for arithmetic expressions
//!
//! One method per precedence layer. Each layer parses its first operand and
//! then folds operators of its own level left to right, so every new operator
//! takes the accumulated tree as its left child.

use super::error::{SyntaxError, SyntaxResult};
use crate::config::compile_time::syntax::{MAX_EXPRESSION_DEPTH, MAX_PARSE_DEPTH};
use crate::config::runtime::SyntaxPreferences;
use crate::grammar::{BinaryOp, Expr};
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::{log_debug, log_error};

const PRIMARY_START: [TokenKind; 2] = [TokenKind::Num, TokenKind::LParen];

/// A subtree with its height; a literal has height 1
struct Parsed {
    expr: Expr,
    height: usize,
}

impl Parsed {
    fn leaf(expr: Expr) -> Self {
        Self { expr, height: 1 }
    }
}

pub struct Parser {
    tokens: TokenStream,
    preferences: SyntaxPreferences,
    parse_depth: usize,
    max_depth_reached: usize,
}

impl Parser {
    pub fn new(tokens: TokenStream) -> Self {
        Self::with_preferences(tokens, SyntaxPreferences::default())
    }

    pub fn with_preferences(tokens: TokenStream, preferences: SyntaxPreferences) -> Self {
        log_debug!("Creating expression parser", "tokens" => tokens.remaining());

        Self {
            tokens,
            preferences,
            parse_depth: 0,
            max_depth_reached: 0,
        }
    }

    /// Parse a complete expression; the stream must be exhausted afterwards
    pub fn parse(&mut self) -> SyntaxResult<Expr> {
        let parsed = self.parse_additive()?;

        if let Some(token) = self.tokens.next() {
            return Err(SyntaxError::trailing_tokens(&token.to_string(), token.span));
        }

        Ok(parsed.expr)
    }

    /// Deepest parenthesis nesting seen so far
    pub fn max_depth_reached(&self) -> usize {
        self.max_depth_reached
    }

    /// Tokens consumed so far
    pub fn tokens_consumed(&self) -> usize {
        self.tokens.consumed()
    }

    /// `T -> F ( (PLUS|MINUS) F )*`
    fn parse_additive(&mut self) -> SyntaxResult<Parsed> {
        self.enter()?;
        let result = self.fold_level(additive_op, Self::parse_multiplicative);
        self.parse_depth -= 1;
        result
    }

    /// `F -> Lit ( (TIMES|DIV) Lit )*`
    fn parse_multiplicative(&mut self) -> SyntaxResult<Parsed> {
        self.fold_level(multiplicative_op, Self::parse_primary)
    }

    /// `Lit -> NUM | LPAREN T RPAREN`
    fn parse_primary(&mut self) -> SyntaxResult<Parsed> {
        match self.tokens.peek_kind() {
            Some(TokenKind::Num) => {
                let token = self.consume(&PRIMARY_START)?;
                token
                    .lexeme
                    .parse::<f64>()
                    .map(|value| Parsed::leaf(Expr::literal(value)))
                    .map_err(|_| SyntaxError::invalid_number(&token.lexeme, token.span))
            }
            Some(TokenKind::LParen) => {
                self.consume(&PRIMARY_START)?;
                let inner = self.parse_additive()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected(&PRIMARY_START)),
        }
    }

    /// Parse `operand (op operand)*` for one precedence level.
    ///
    /// Each fold adds one tree level; a fold taller than
    /// `MAX_EXPRESSION_DEPTH` is rejected.
    fn fold_level(
        &mut self,
        level_op: fn(TokenKind) -> Option<BinaryOp>,
        operand: fn(&mut Self) -> SyntaxResult<Parsed>,
    ) -> SyntaxResult<Parsed> {
        let mut acc = operand(self)?;

        while let Some(op) = self.tokens.peek_kind().and_then(level_op) {
            let Some(operator) = self.tokens.next() else {
                break;
            };
            let rhs = operand(self)?;

            let height = acc.height.max(rhs.height) + 1;
            if height > MAX_EXPRESSION_DEPTH {
                let error = SyntaxError::expression_too_deep(height, operator.span);
                log_error!(error.error_code(), "Expression tree exceeds depth limit",
                    span = error.span(),
                    "depth" => height,
                    "max_depth" => MAX_EXPRESSION_DEPTH
                );
                return Err(error);
            }

            if self.preferences.log_parse_steps {
                log_debug!("Folded binary operator",
                    "operator" => op,
                    "at" => operator.span.start,
                    "height" => height
                );
            }

            acc = Parsed {
                expr: Expr::binary(op, acc.expr, rhs.expr),
                height,
            };
        }

        Ok(acc)
    }

    fn enter(&mut self) -> SyntaxResult<()> {
        if self.parse_depth >= MAX_PARSE_DEPTH {
            let error = SyntaxError::max_recursion_depth(self.tokens.current_span());
            log_error!(error.error_code(), "Maximum expression nesting exceeded",
                span = error.span(),
                "depth" => self.parse_depth,
                "max_depth" => MAX_PARSE_DEPTH
            );
            return Err(error);
        }

        self.parse_depth += 1;
        self.max_depth_reached = self.max_depth_reached.max(self.parse_depth);
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> SyntaxResult<Token> {
        if self.tokens.peek(kind, 0) {
            self.consume(&[kind])
        } else {
            Err(self.unexpected(&[kind]))
        }
    }

    /// Take the next token; running out here is an error
    fn consume(&mut self, expected: &[TokenKind]) -> SyntaxResult<Token> {
        match self.tokens.next() {
            Some(token) => Ok(token),
            None => Err(SyntaxError::unexpected_end_of_input(
                expected,
                self.tokens.end_span(),
            )),
        }
    }

    fn unexpected(&self, expected: &[TokenKind]) -> SyntaxError {
        match self.tokens.lookahead(0) {
            Some(token) => SyntaxError::unexpected_token(expected, &token.to_string(), token.span),
            None => SyntaxError::unexpected_end_of_input(expected, self.tokens.end_span()),
        }
    }
}

fn additive_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn multiplicative_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Times => Some(BinaryOp::Mul),
        TokenKind::Div => Some(BinaryOp::Div),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize_source;
    use crate::utils::{Position, Span};
    use assert_matches::assert_matches;

    fn parse(source: &str) -> SyntaxResult<Expr> {
        Parser::new(tokenize_source(source).unwrap()).parse()
    }

    fn lit(value: f64) -> Expr {
        Expr::literal(value)
    }

    #[test]
    fn test_single_literal() {
        assert_eq!(parse("4.5").unwrap(), lit(4.5));
        assert_eq!(parse(" .5 ").unwrap(), lit(0.5));
    }

    #[test]
    fn test_left_associative_folding() {
        assert_eq!(
            parse("8.0/4.0/2.0").unwrap(),
            Expr::div(Expr::div(lit(8.0), lit(4.0)), lit(2.0))
        );
        assert_eq!(
            parse("1.0-2.0+3.0").unwrap(),
            Expr::add(Expr::sub(lit(1.0), lit(2.0)), lit(3.0))
        );
    }

    #[test]
    fn test_precedence_layers() {
        assert_eq!(
            parse("2.0+3.0*4.0").unwrap(),
            Expr::add(lit(2.0), Expr::mul(lit(3.0), lit(4.0)))
        );
        assert_eq!(
            parse("2.0*3.0-4.0/8.0").unwrap(),
            Expr::sub(
                Expr::mul(lit(2.0), lit(3.0)),
                Expr::div(lit(4.0), lit(8.0))
            )
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(
            parse("(2.0+3.0)*4.0").unwrap(),
            Expr::mul(Expr::add(lit(2.0), lit(3.0)), lit(4.0))
        );
        assert_eq!(parse("((1.5))").unwrap(), lit(1.5));
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_matches!(
            parse("(1.0+2.0"),
            Err(SyntaxError::UnexpectedEndOfInput { ref expected, .. }) if expected == "RPAREN"
        );
        assert_matches!(
            parse("1.0+2.0)"),
            Err(SyntaxError::TrailingTokens { ref found, .. }) if found == "RPAREN ')'"
        );
    }

    #[test]
    fn test_missing_operand() {
        assert_matches!(
            parse("1.0 +"),
            Err(SyntaxError::UnexpectedEndOfInput { ref expected, span }) if expected == "NUM or LPAREN" && span.start.offset == 5
        );
        assert_matches!(
            parse("* 2.0"),
            Err(SyntaxError::UnexpectedToken { ref found, span, .. }) if found == "TIMES '*'" && span.start.offset == 0
        );
        assert_matches!(
            parse("()"),
            Err(SyntaxError::UnexpectedToken { ref found, .. }) if found == "RPAREN ')'"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_matches!(parse(""), Err(SyntaxError::UnexpectedEndOfInput { .. }));
        assert_matches!(parse("   "), Err(SyntaxError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn test_adjacent_literals_are_trailing() {
        assert_matches!(
            parse("1.0 2.0"),
            Err(SyntaxError::TrailingTokens { span, .. }) if span.start.offset == 4
        );
    }

    #[test]
    fn test_malformed_number_lexeme() {
        let start = Position::start();
        let span = Span::new(start, start.advance_str("1.2.3"));
        let token = Token::new(TokenKind::Num, "1.2.3", span);
        let result = Parser::new(TokenStream::new(vec![token])).parse();
        assert_matches!(
            result,
            Err(SyntaxError::InvalidNumber { ref lexeme, .. }) if lexeme == "1.2.3"
        );
    }

    #[test]
    fn test_nesting_limit() {
        let depth = MAX_PARSE_DEPTH + 1;
        let source = format!("{}1.0{}", "(".repeat(depth), ")".repeat(depth));
        assert_matches!(parse(&source), Err(SyntaxError::MaxRecursionDepth { .. }));

        let within = format!(
            "{}1.0{}",
            "(".repeat(MAX_PARSE_DEPTH - 1),
            ")".repeat(MAX_PARSE_DEPTH - 1)
        );
        let mut parser = Parser::new(tokenize_source(&within).unwrap());
        assert_eq!(parser.parse().unwrap(), lit(1.0));
        assert_eq!(parser.max_depth_reached(), MAX_PARSE_DEPTH);
    }

    fn chain(operator: &str, operands: usize) -> String {
        vec!["1.0"; operands].join(operator)
    }

    #[test]
    fn test_operator_chain_at_height_limit() {
        let expr = parse(&chain("+", MAX_EXPRESSION_DEPTH)).unwrap();
        assert_eq!(expr.depth(), MAX_EXPRESSION_DEPTH);
        assert_eq!(expr.node_count(), 2 * MAX_EXPRESSION_DEPTH - 1);
        assert_eq!(expr.evaluate(), MAX_EXPRESSION_DEPTH as f64);
    }

    #[test]
    fn test_operator_chain_over_height_limit() {
        let error = parse(&chain("+", MAX_EXPRESSION_DEPTH + 1)).unwrap_err();
        assert_matches!(
            error,
            SyntaxError::ExpressionTooDeep { depth, .. } if depth == MAX_EXPRESSION_DEPTH + 1
        );

        assert_matches!(
            parse(&chain("*", MAX_EXPRESSION_DEPTH + 1)),
            Err(SyntaxError::ExpressionTooDeep { .. })
        );
    }

    #[test]
    fn test_long_flat_chain_is_rejected_without_overflow() {
        let source = chain("+", 40_000);
        assert_matches!(parse(&source), Err(SyntaxError::ExpressionTooDeep { .. }));

        let half = MAX_EXPRESSION_DEPTH / 2;
        let grouped = format!("({})*{}", chain("-", half), chain("/", half));
        let expr = parse(&grouped).unwrap();
        assert!(expr.depth() <= MAX_EXPRESSION_DEPTH);
        assert!(expr.evaluate().is_finite());
    }

    #[test]
    fn test_consumes_every_token() {
        let mut parser = Parser::new(tokenize_source("(1.0 + 2.0) * 3.0").unwrap());
        parser.parse().unwrap();
        assert_eq!(parser.tokens_consumed(), 7);
    }
}
