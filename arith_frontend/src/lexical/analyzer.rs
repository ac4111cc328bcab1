//! Maximal-munch lexer driven by a registry of automata
//!
//! At every token start all registered automata are reset and fed the input
//! in lock-step. The longest accepted prefix wins; on equal length the
//! earliest registered kind wins, because the best match is only replaced
//! when a strictly longer one appears.

use crate::automaton::Automaton;
use crate::config::compile_time::automaton::MAX_STATES_PER_AUTOMATON;
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success};
use std::collections::BTreeMap;
use std::time::Instant;

/// Lexical analysis errors with compile-time security boundaries
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("Unrecognized input '{character}' at {position}")]
    UnrecognizedInput { position: Position, character: char },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize, position: Position },

    #[error("Input too large: {length} characters (max {MAX_INPUT_LENGTH})")]
    InputTooLarge { length: usize },

    #[error("Automaton for {kind} has {states} states (max {MAX_STATES_PER_AUTOMATON})")]
    AutomatonTooLarge { kind: TokenKind, states: usize },

    #[error("No token kinds registered")]
    EmptyRegistry,
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::UnrecognizedInput { .. } => codes::lexical::UNRECOGNIZED_INPUT,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexerError::InputTooLarge { .. } => codes::lexical::INPUT_TOO_LARGE,
            LexerError::AutomatonTooLarge { .. } => codes::lexical::AUTOMATON_TOO_LARGE,
            LexerError::EmptyRegistry => codes::lexical::EMPTY_REGISTRY,
        }
    }

    /// Source location of the error, when it has one
    pub fn span(&self) -> Option<Span> {
        match self {
            LexerError::UnrecognizedInput {
                position,
                character,
            } => Some(Span::new(*position, position.advance(*character))),
            LexerError::TooManyTokens { position, .. } => Some(Span::point(*position)),
            _ => None,
        }
    }
}

/// Token statistics for one tokenization pass
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LexicalMetrics {
    pub input_chars: usize,
    pub total_tokens: usize,
    pub significant_tokens: usize,
    pub whitespace_tokens: usize,
    pub longest_lexeme: usize,
    pub kind_counts: BTreeMap<TokenKind, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if token.is_trivia() {
            if preferences.include_whitespace_in_metrics {
                self.whitespace_tokens += 1;
                *self.kind_counts.entry(token.kind).or_insert(0) += 1;
            }
            return;
        }

        self.significant_tokens += 1;
        *self.kind_counts.entry(token.kind).or_insert(0) += 1;
        self.longest_lexeme = self.longest_lexeme.max(token.lexeme.chars().count());
    }

    /// Number of tokens recorded for `kind`
    pub fn count(&self, kind: TokenKind) -> usize {
        self.kind_counts.get(&kind).copied().unwrap_or(0)
    }
}

/// Lexer over an ordered registry of `(kind, automaton)` pairs.
///
/// Registration order is priority order.
#[derive(Debug, Clone)]
pub struct Lexer {
    registry: Vec<(TokenKind, Automaton)>,
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            registry: Vec::new(),
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Append `kind` to the registry; later registrations lose ties
    pub fn register(&mut self, kind: TokenKind, automaton: Automaton) -> Result<(), LexerError> {
        let states = automaton.state_count();
        if states > MAX_STATES_PER_AUTOMATON {
            let error = LexerError::AutomatonTooLarge { kind, states };
            log_error!(error.error_code(), "Automaton exceeds state limit",
                "kind" => kind,
                "states" => states,
                "limit" => MAX_STATES_PER_AUTOMATON
            );
            return Err(error);
        }

        log_debug!("Registered token automaton",
            "kind" => kind,
            "priority" => self.registry.len(),
            "states" => states,
            "transitions" => automaton.transition_count()
        );

        self.registry.push((kind, automaton));
        Ok(())
    }

    /// Registered kinds in priority order
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.registry.iter().map(|(kind, _)| *kind).collect()
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Lazily tokenize `input`; the iterator stops after the first error
    pub fn tokens<'a>(&'a mut self, input: &'a str) -> Tokens<'a> {
        Tokens::new(&mut self.registry, input)
    }

    /// Tokenize all of `input`, trivia included
    pub fn tokenize(&mut self, input: &str) -> Result<Vec<Token>, LexerError> {
        let started = Instant::now();
        let collect_metrics = self.preferences.collect_metrics;
        let mut metrics = LexicalMetrics {
            input_chars: input.chars().count(),
            ..LexicalMetrics::default()
        };

        log_debug!("Starting lexical analysis",
            "char_count" => metrics.input_chars,
            "registered_kinds" => self.registry.len(),
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        let mut tokens = Vec::new();
        for result in Tokens::new(&mut self.registry, input) {
            let token = match result {
                Ok(token) => token,
                Err(error) => {
                    match error.span() {
                        Some(span) => log_error!(error.error_code(), &error.to_string(),
                            span = span,
                            "tokens_before_error" => tokens.len()
                        ),
                        None => log_error!(error.error_code(), &error.to_string(),
                            "tokens_before_error" => tokens.len()
                        ),
                    }
                    return Err(error);
                }
            };

            if collect_metrics {
                metrics.record_token(&token, &self.preferences);
            }
            tokens.push(token);
        }

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed successfully",
            "token_count" => tokens.len(),
            "significant_tokens" => metrics.significant_tokens,
            "longest_lexeme" => metrics.longest_lexeme,
            "duration_ms" => format!("{:.3}", elapsed_ms)
        );

        self.metrics = metrics;
        Ok(tokens)
    }

    /// Tokenize and wrap the result for the parser
    pub fn tokenize_to_stream(&mut self, input: &str) -> Result<TokenStream, LexerError> {
        let tokens = self.tokenize(input)?;
        Ok(TokenStream::with_end(
            tokens,
            Position::start().advance_str(input),
        ))
    }
}

/// Iterator returned by [`Lexer::tokens`]
pub struct Tokens<'a> {
    registry: &'a mut [(TokenKind, Automaton)],
    input: &'a str,
    position: Position,
    emitted: usize,
    pending_error: Option<LexerError>,
    finished: bool,
}

impl<'a> Tokens<'a> {
    fn new(registry: &'a mut [(TokenKind, Automaton)], input: &'a str) -> Self {
        let length = input.chars().count();
        let pending_error = if length > MAX_INPUT_LENGTH {
            Some(LexerError::InputTooLarge { length })
        } else if registry.is_empty() && !input.is_empty() {
            Some(LexerError::EmptyRegistry)
        } else {
            None
        };

        Self {
            registry,
            input,
            position: Position::start(),
            emitted: 0,
            pending_error,
            finished: false,
        }
    }

    /// Position of the next token start
    pub fn position(&self) -> Position {
        self.position
    }

    /// Longest accepted prefix of `rest` as `(kind, byte_len)`
    fn longest_match(&mut self, rest: &str) -> Option<(TokenKind, usize)> {
        for (_, automaton) in self.registry.iter_mut() {
            automaton.reset();
        }

        let mut best: Option<(TokenKind, usize)> = None;

        for (offset, ch) in rest.char_indices() {
            if !self
                .registry
                .iter()
                .any(|(_, automaton)| automaton.has_transitions(ch))
            {
                break;
            }

            let end = offset + ch.len_utf8();
            for (kind, automaton) in self.registry.iter_mut() {
                automaton.apply(ch);
                if automaton.accepts() && best.map_or(true, |(_, best_end)| end > best_end) {
                    best = Some((*kind, end));
                }
            }
        }

        best
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if let Some(error) = self.pending_error.take() {
            self.finished = true;
            return Some(Err(error));
        }

        let input = self.input;
        let rest = &input[self.position.offset..];
        let Some(character) = rest.chars().next() else {
            self.finished = true;
            return None;
        };

        if self.emitted >= MAX_TOKEN_COUNT {
            self.finished = true;
            return Some(Err(LexerError::TooManyTokens {
                count: self.emitted,
                position: self.position,
            }));
        }

        let Some((kind, len)) = self.longest_match(rest) else {
            self.finished = true;
            return Some(Err(LexerError::UnrecognizedInput {
                position: self.position,
                character,
            }));
        };

        let lexeme = &rest[..len];
        let start = self.position;
        self.position = start.advance_str(lexeme);
        self.emitted += 1;

        Some(Ok(Token::new(kind, lexeme, Span::new(start, self.position))))
    }
}
