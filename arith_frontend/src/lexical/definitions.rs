//! Token definition table for arithmetic expressions
//!
//! | Kind       | Pattern            |
//! |------------|--------------------|
//! | NUM        | `[0-9]*\.[0-9]+`   |
//! | PLUS       | `\+`               |
//! | MINUS      | `-`                |
//! | TIMES      | `\*`               |
//! | DIV        | `/`                |
//! | LPAREN     | `\(`               |
//! | RPAREN     | `\)`               |
//! | WHITESPACE | `[ \n\r\t]+`       |
//!
//! Kinds are registered in table order.

use super::analyzer::{Lexer, LexerError};
use crate::automaton::Automaton;
use crate::config::runtime::LexicalPreferences;
use crate::tokens::TokenKind;

const DIGITS: std::ops::RangeInclusive<char> = '0'..='9';
const WHITESPACE: [char; 4] = [' ', '\n', '\r', '\t'];

/// `[0-9]*\.[0-9]+`
///
/// 0 is the start state, 1 reads leading digits, 2 follows the dot and 3
/// (accepting) reads fraction digits.
pub fn number_automaton() -> Automaton {
    Automaton::new()
        .with_state(0, true, false)
        .with_state(3, false, true)
        .with_transitions(0, DIGITS, 1)
        .with_transitions(1, DIGITS, 1)
        .with_transitions(0, ['.'], 2)
        .with_transitions(1, ['.'], 2)
        .with_transitions(2, DIGITS, 3)
        .with_transitions(3, DIGITS, 3)
}

/// One or more of `' '`, `'\n'`, `'\r'`, `'\t'`. A pattern accepting the
/// empty string would emit zero-length tokens forever.
pub fn whitespace_automaton() -> Automaton {
    Automaton::new()
        .with_state(0, true, false)
        .with_state(1, false, true)
        .with_transitions(0, WHITESPACE, 1)
        .with_transitions(1, WHITESPACE, 1)
}

/// Accepts exactly the one-character string `c`
pub fn single_char_automaton(c: char) -> Automaton {
    Automaton::new()
        .with_state(0, true, false)
        .with_state(1, false, true)
        .with_transitions(0, [c], 1)
}

/// The standard table as `(kind, automaton)` pairs in priority order
pub fn standard_definitions() -> Vec<(TokenKind, Automaton)> {
    vec![
        (TokenKind::Num, number_automaton()),
        (TokenKind::Plus, single_char_automaton('+')),
        (TokenKind::Minus, single_char_automaton('-')),
        (TokenKind::Times, single_char_automaton('*')),
        (TokenKind::Div, single_char_automaton('/')),
        (TokenKind::LParen, single_char_automaton('(')),
        (TokenKind::RParen, single_char_automaton(')')),
        (TokenKind::Whitespace, whitespace_automaton()),
    ]
}

/// Lexer with every standard kind registered
pub fn standard_lexer() -> Result<Lexer, LexerError> {
    standard_lexer_with_preferences(LexicalPreferences::default())
}

pub fn standard_lexer_with_preferences(
    preferences: LexicalPreferences,
) -> Result<Lexer, LexerError> {
    let mut lexer = Lexer::with_preferences(preferences);
    for (kind, automaton) in standard_definitions() {
        lexer.register(kind, automaton)?;
    }
    Ok(lexer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(automaton: &mut Automaton, input: &str) -> bool {
        automaton.reset();
        input.chars().for_each(|ch| automaton.apply(ch));
        automaton.accepts()
    }

    #[test]
    fn test_registration_order_matches_table() {
        let lexer = standard_lexer().unwrap();
        assert_eq!(lexer.kinds(), TokenKind::ALL.to_vec());
    }

    #[test]
    fn test_number_pattern() {
        let mut num = number_automaton();
        for literal in ["0.0", ".5", "12.5", "007.250", "123456789.0"] {
            assert!(accepts(&mut num, literal), "{literal} should be a NUM");
        }
        for rejected in ["", ".", "1", "1.", "1..2", "-1.0", "1.0e3"] {
            assert!(!accepts(&mut num, rejected), "{rejected} should not be a NUM");
        }
    }

    #[test]
    fn test_whitespace_requires_one_character() {
        let mut ws = whitespace_automaton();
        assert!(!accepts(&mut ws, ""));
        assert!(accepts(&mut ws, " "));
        assert!(accepts(&mut ws, "\t\r\n  "));
        assert!(!accepts(&mut ws, " x"));
    }

    #[test]
    fn test_single_char_accepts_exactly_one() {
        let mut plus = single_char_automaton('+');
        assert!(accepts(&mut plus, "+"));
        assert!(!accepts(&mut plus, "++"));
        assert!(!accepts(&mut plus, "-"));
        assert_eq!(plus.state_count(), 2);
    }
}
