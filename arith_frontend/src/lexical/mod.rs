//! Lexical analysis module
//!
//! Turns source text into tokens by running every registered automaton in
//! lock-step with a maximal-munch policy. [`definitions`] holds the standard
//! arithmetic token table.

pub mod analyzer;
pub mod definitions;

use crate::config::runtime::LexicalPreferences;
use crate::tokens::TokenStream;

pub use analyzer::{Lexer, LexerError, LexicalMetrics, Tokens};
pub use definitions::{single_char_automaton, standard_lexer, standard_lexer_with_preferences};

/// Tokenize `source` with the standard table and wrap it for the parser
pub fn tokenize_source(source: &str) -> Result<TokenStream, LexerError> {
    standard_lexer()?.tokenize_to_stream(source)
}

/// Same as [`tokenize_source`] with explicit preferences
pub fn tokenize_source_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> Result<TokenStream, LexerError> {
    standard_lexer_with_preferences(preferences)?.tokenize_to_stream(source)
}
