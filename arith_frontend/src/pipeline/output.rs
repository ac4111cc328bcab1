use crate::grammar::Expr;
use crate::lexical::LexicalMetrics;
use crate::tokens::Token;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Everything one successful run of the front end produces
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub ast: Expr,
    pub value: f64,
    /// Significant tokens in source order
    pub tokens: Vec<Token>,
    /// All tokens the lexer emitted, whitespace included
    pub token_count: usize,
    pub lexical_metrics: LexicalMetrics,
    pub source_path: Option<PathBuf>,
    pub processing_duration: Duration,
}

/// JSON view of a [`CompileOutput`]
#[derive(Debug, Serialize)]
pub struct CompileReport<'a> {
    pub ast: &'a Expr,
    pub value: f64,
    pub sexpr: String,
    pub token_count: usize,
    pub significant_tokens: usize,
    pub depth: usize,
    pub node_count: usize,
    pub duration_ms: f64,
}

impl CompileOutput {
    pub fn report(&self) -> CompileReport<'_> {
        CompileReport {
            ast: &self.ast,
            value: self.value,
            sexpr: self.ast.to_sexpr(),
            token_count: self.token_count,
            significant_tokens: self.tokens.len(),
            depth: self.ast.depth(),
            node_count: self.ast.node_count(),
            duration_ms: self.processing_duration.as_secs_f64() * 1000.0,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.report())
    }

    pub fn log_success(&self) {
        let source = self
            .source_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<inline>".to_string());

        crate::log_success!(
            crate::logging::codes::success::PIPELINE_COMPLETE,
            "Expression pipeline succeeded",
            "source" => source,
            "tokens" => self.token_count,
            "nodes" => self.ast.node_count(),
            "value" => self.value,
            "duration_ms" => format!("{:.3}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}
