// Internal modules
pub mod automaton;
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use automaton::{Automaton, StateId};
pub use grammar::{BinaryOp, Expr};
pub use lexical::{standard_lexer, Lexer, LexerError};
pub use pipeline::{compile_file, compile_source, CompileOutput, PipelineError};
pub use syntax::{parse, SyntaxError};
pub use tokens::{Token, TokenKind, TokenStream};
