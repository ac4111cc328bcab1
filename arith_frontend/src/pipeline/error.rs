use crate::config::ConfigError;
use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::syntax::SyntaxError;
use crate::utils::Span;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Syntax analysis failed: {0}")]
    SyntaxAnalysis(#[from] SyntaxError),

    #[error("Configuration failed: {0}")]
    Configuration(#[from] ConfigError),
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(e) => e.error_code(),
            Self::LexicalAnalysis(e) => e.error_code(),
            Self::SyntaxAnalysis(e) => e.error_code(),
            Self::Configuration(_) => codes::config::INVALID_RUNTIME_CONFIG,
        }
    }

    /// Location in the source text, for errors raised by the front end proper
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::LexicalAnalysis(e) => e.span(),
            Self::SyntaxAnalysis(e) => Some(e.span()),
            Self::FileProcessing(_) | Self::Configuration(_) => None,
        }
    }

    /// Message of the underlying stage error, without the stage prefix
    pub fn detail(&self) -> String {
        match self {
            Self::FileProcessing(e) => e.to_string(),
            Self::LexicalAnalysis(e) => e.to_string(),
            Self::SyntaxAnalysis(e) => e.to_string(),
            Self::Configuration(e) => e.to_string(),
        }
    }
}
