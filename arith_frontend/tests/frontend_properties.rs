//! End-to-end behaviour of the lexer, parser and pipeline through the public API

use arith_frontend::lexical::definitions::number_automaton;
use arith_frontend::lexical::{single_char_automaton, tokenize_source};
use arith_frontend::{
    compile_source, parse, standard_lexer, Expr, Lexer, LexerError, PipelineError, SyntaxError,
    TokenKind,
};
use assert_matches::assert_matches;

fn lit(value: f64) -> Expr {
    Expr::literal(value)
}

fn ast(source: &str) -> Expr {
    compile_source(source).unwrap().ast
}

fn kinds(source: &str) -> Vec<TokenKind> {
    standard_lexer()
        .unwrap()
        .tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn every_decimal_literal_is_one_num_token() {
    for literal in [".5", "0.0", "12.5", "007.250", "123456.789"] {
        let tokens = standard_lexer().unwrap().tokenize(literal).unwrap();
        assert_eq!(tokens.len(), 1, "{literal}");
        assert_eq!(tokens[0].kind, TokenKind::Num);
        assert_eq!(tokens[0].lexeme, literal);
    }
}

#[test]
fn longest_match_wins() {
    assert_eq!(kinds("12.5"), vec![TokenKind::Num]);
    assert_eq!(
        kinds("1.5+2.25"),
        vec![TokenKind::Num, TokenKind::Plus, TokenKind::Num]
    );
}

#[test]
fn whitespace_does_not_change_the_tree() {
    assert_eq!(ast(" 1.0 + 2.0 "), ast("1.0+2.0"));
    assert_eq!(ast("\t(1.0\n*\r\n2.0) "), ast("(1.0*2.0)"));
    assert_eq!(
        kinds(" \t\n1.0"),
        vec![TokenKind::Whitespace, TokenKind::Num]
    );
}

#[test]
fn earlier_registration_wins_ties() {
    let mut lexer = Lexer::new();
    lexer
        .register(TokenKind::Plus, single_char_automaton('+'))
        .unwrap();
    lexer
        .register(TokenKind::Minus, single_char_automaton('+'))
        .unwrap();

    let tokens = lexer.tokenize("++").unwrap();
    assert!(tokens.iter().all(|token| token.kind == TokenKind::Plus));
    assert_eq!(tokens.len(), 2);
}

#[test]
fn division_folds_left() {
    let output = compile_source("8.0/4.0/2.0").unwrap();
    assert_eq!(output.ast, Expr::div(Expr::div(lit(8.0), lit(4.0)), lit(2.0)));
    assert_eq!(output.value, 1.0);
}

#[test]
fn multiplication_binds_tighter() {
    assert_eq!(
        ast("2.0+3.0*4.0"),
        Expr::add(lit(2.0), Expr::mul(lit(3.0), lit(4.0)))
    );
    assert_eq!(compile_source("2.0+3.0*4.0").unwrap().value, 14.0);
}

#[test]
fn parentheses_group() {
    assert_eq!(
        ast("(2.0+3.0)*4.0"),
        Expr::mul(Expr::add(lit(2.0), lit(3.0)), lit(4.0))
    );
    assert_eq!(compile_source("(2.0+3.0)*4.0").unwrap().value, 20.0);
}

#[test]
fn unknown_character_is_a_lexer_error() {
    assert_matches!(
        standard_lexer().unwrap().tokenize("@"),
        Err(LexerError::UnrecognizedInput { character: '@', position }) if position.offset == 0
    );
    assert_matches!(
        compile_source("1.0 + @"),
        Err(PipelineError::LexicalAnalysis(LexerError::UnrecognizedInput { .. }))
    );
}

#[test]
fn unbalanced_parentheses_are_syntax_errors() {
    assert_matches!(
        parse(tokenize_source("(1.0+2.0").unwrap()),
        Err(SyntaxError::UnexpectedEndOfInput { .. })
    );
    assert_matches!(
        parse(tokenize_source("1.0+2.0)").unwrap()),
        Err(SyntaxError::TrailingTokens { .. })
    );
}

#[test]
fn integers_without_a_point_are_rejected() {
    assert_matches!(
        compile_source("8"),
        Err(PipelineError::LexicalAnalysis(LexerError::UnrecognizedInput { .. }))
    );
}

#[test]
fn flat_operator_chains_are_height_limited() {
    let source = vec!["1.0"; 20_000].join("+");
    let error = compile_source(&source).unwrap_err();
    assert_matches!(
        error,
        PipelineError::SyntaxAnalysis(SyntaxError::ExpressionTooDeep { .. })
    );
    assert_eq!(error.error_code().as_str(), "E088");
}

#[test]
fn reset_makes_runs_independent() {
    let mut automaton = number_automaton();
    let mut run = |input: &str| {
        automaton.reset();
        for ch in input.chars() {
            automaton.apply(ch);
        }
        automaton.accepts()
    };

    assert!(run("3.25"));
    assert!(!run("1."));
    assert!(!run("7"));
    assert!(run(".5"));
    assert!(!run(""));
}

#[test]
fn lexer_is_reusable() {
    let mut lexer = standard_lexer().unwrap();
    let first = lexer.tokenize("1.0 + 2.0").unwrap();
    let second = lexer.tokenize("1.0 + 2.0").unwrap();
    assert_eq!(first, second);
}
