//! Grammar definitions for arithmetic expressions
//!
//! ```text
//! T   -> F ( (PLUS|MINUS) F )*
//! F   -> Lit ( (TIMES|DIV) Lit )*
//! Lit -> NUM | LPAREN T RPAREN
//! ```

pub mod ast;

pub use ast::{BinaryOp, Expr};
