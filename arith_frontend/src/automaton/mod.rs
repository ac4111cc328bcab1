//! Automaton engine used by the lexer
//!
//! Each token kind is recognised by one hand-built [`Automaton`]. The lexer
//! drives every automaton in lock-step and only relies on the simulation
//! surface exposed here: `reset`, `apply`, `accepts` and `has_transitions`.

pub mod nfa;

pub use nfa::{Automaton, StateId};
