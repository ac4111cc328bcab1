mod error;
mod output;

pub use error::PipelineError;
pub use output::{CompileOutput, CompileReport};

use crate::config::RuntimeConfig;
use crate::file_processor::SourceFile;
use crate::lexical::standard_lexer_with_preferences;
use crate::tokens::{Token, TokenStream};
use crate::utils::Position;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Run source text through lexing, parsing and evaluation
pub fn compile_source(source: &str) -> Result<CompileOutput, PipelineError> {
    compile_source_with_config(source, &RuntimeConfig::default())
}

pub fn compile_source_with_config(
    source: &str,
    config: &RuntimeConfig,
) -> Result<CompileOutput, PipelineError> {
    run(source, None, config, Instant::now())
}

/// Read a file and run its contents through the pipeline
pub fn compile_file(path: impl AsRef<Path>) -> Result<CompileOutput, PipelineError> {
    compile_file_with_config(path, &RuntimeConfig::default())
}

pub fn compile_file_with_config(
    path: impl AsRef<Path>,
    config: &RuntimeConfig,
) -> Result<CompileOutput, PipelineError> {
    let file = crate::file_processor::process_file(path)?;
    compile_source_file(&file, config)
}

/// Run an already loaded source file through the pipeline
pub fn compile_source_file(
    file: &SourceFile,
    config: &RuntimeConfig,
) -> Result<CompileOutput, PipelineError> {
    let mut output = run(&file.source, Some(file.path.clone()), config, Instant::now())?;
    output.processing_duration += file.processing_duration;
    Ok(output)
}

fn run(
    source: &str,
    source_path: Option<PathBuf>,
    config: &RuntimeConfig,
    start_time: Instant,
) -> Result<CompileOutput, PipelineError> {
    crate::log_info!("Starting expression pipeline", "chars" => source.chars().count());

    // Stage 1: Lexical analysis
    let mut lexer = standard_lexer_with_preferences(config.lexical.clone())?;
    let all_tokens = lexer.tokenize(source)?;
    let token_count = all_tokens.len();
    let tokens: Vec<Token> = all_tokens.iter().filter(|t| !t.is_trivia()).cloned().collect();

    // Stage 2: Syntax analysis
    let stream = TokenStream::with_end(all_tokens, Position::start().advance_str(source));
    let ast = crate::syntax::parse_with_preferences(stream, config.syntax.clone())?;

    // Stage 3: Evaluation
    let value = ast.evaluate();

    let output = CompileOutput {
        ast,
        value,
        tokens,
        token_count,
        lexical_metrics: lexer.metrics().clone(),
        source_path,
        processing_duration: start_time.elapsed(),
    };

    output.log_success();
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Expr;
    use crate::logging::codes;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_compile_source() {
        let output = compile_source(" (2.0 + 3.0) * 4.0 ").unwrap();
        assert_eq!(output.value, 20.0);
        assert_eq!(output.ast.to_sexpr(), "(* (+ 2.0 3.0) 4.0)");
        assert_eq!(output.tokens.len(), 7);
        assert_eq!(output.token_count, 13);
        assert!(output.tokens.iter().all(|t| t.kind != TokenKind::Whitespace));
        assert!(output.source_path.is_none());
    }

    #[test]
    fn test_stage_errors_are_wrapped() {
        let lexical = compile_source("1.0 $ 2.0").unwrap_err();
        assert_matches!(lexical, PipelineError::LexicalAnalysis(_));
        assert_eq!(lexical.error_code(), codes::lexical::UNRECOGNIZED_INPUT);
        assert_eq!(lexical.span().map(|s| s.start.offset), Some(4));

        let syntax = compile_source("1.0 +").unwrap_err();
        assert_matches!(syntax, PipelineError::SyntaxAnalysis(_));
        assert_eq!(syntax.error_code(), codes::syntax::UNEXPECTED_END_OF_INPUT);
        assert!(syntax.detail().starts_with("Unexpected end of input"));
    }

    #[test]
    fn test_compile_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "8.0 / 4.0 / 2.0").unwrap();

        let output = compile_file(file.path()).unwrap();
        assert_eq!(output.value, 1.0);
        assert_eq!(
            output.ast,
            Expr::div(
                Expr::div(Expr::literal(8.0), Expr::literal(4.0)),
                Expr::literal(2.0)
            )
        );
        assert_eq!(output.source_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_compile_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = compile_file(dir.path().join("nope.expr")).unwrap_err();
        assert_matches!(error, PipelineError::FileProcessing(_));
        assert!(error.span().is_none());
    }

    #[test]
    fn test_json_report() {
        let output = compile_source("1.5 * 2.0").unwrap();
        let json: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();
        assert_eq!(json["value"], 3.0);
        assert_eq!(json["sexpr"], "(* 1.5 2.0)");
        assert_eq!(json["node_count"], 3);
        assert_eq!(json["ast"]["Mul"][0]["FloatLiteral"], 1.5);
    }
}
