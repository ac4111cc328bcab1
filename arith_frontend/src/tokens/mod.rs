//! Token system for arithmetic lexical analysis
//!
//! - **[`TokenKind`]** - the eight token kinds of the grammar
//! - **[`Token`]** - kind, lexeme and source span of one match
//! - **[`TokenStream`]** - significant tokens with one-token lookahead
//!
//! Whitespace tokens are produced by the lexer like any other kind and are
//! filtered out when a [`TokenStream`] is built.

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenKind};
pub use token_stream::TokenStream;

pub use crate::utils::{Position, Span};
