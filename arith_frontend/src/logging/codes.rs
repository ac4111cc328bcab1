//! Diagnostic codes and their classification
//!
//! Every error the front end can raise maps to one code here, and every code
//! carries its metadata in a single registry.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const UNRECOGNIZED_INPUT: Code = Code::new("E020");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
    pub const INPUT_TOO_LARGE: Code = Code::new("E029");
    pub const AUTOMATON_TOO_LARGE: Code = Code::new("E030");
    pub const EMPTY_REGISTRY: Code = Code::new("E031");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_END_OF_INPUT: Code = Code::new("E040");
    pub const INVALID_NUMBER: Code = Code::new("E043");
    pub const TRAILING_TOKENS: Code = Code::new("E044");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E087");
    pub const EXPRESSION_TOO_DEEP: Code = Code::new("E088");
}

/// Configuration error codes
pub mod config {
    use super::Code;

    pub const INVALID_RUNTIME_CONFIG: Code = Code::new("E060");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const AST_CONSTRUCTION_COMPLETE: Code = Code::new("I040");
    pub const PIPELINE_COMPLETE: Code = Code::new("I090");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        // (code, category, severity, recoverable, requires_halt, description, action)
        let entries: [(
            Code,
            &'static str,
            Severity,
            bool,
            bool,
            &'static str,
            &'static str,
        ); 19] = [
            (
                system::INTERNAL_ERROR,
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal error",
                "File a bug report with the failing input",
            ),
            (
                system::INITIALIZATION_FAILURE,
                "System",
                Severity::Critical,
                false,
                true,
                "Logging or configuration failed to initialize",
                "Check environment variables and configuration files",
            ),
            (
                file_processing::FILE_NOT_FOUND,
                "FileProcessing",
                Severity::High,
                true,
                true,
                "Source file does not exist",
                "Verify the path passed to the driver",
            ),
            (
                file_processing::FILE_TOO_LARGE,
                "FileProcessing",
                Severity::High,
                true,
                true,
                "Source file exceeds the compile-time size limit",
                "Split the input or rebuild with a larger max_file_size",
            ),
            (
                file_processing::EMPTY_FILE,
                "FileProcessing",
                Severity::Medium,
                true,
                true,
                "Source file has no content",
                "Provide a file containing an expression",
            ),
            (
                file_processing::INVALID_ENCODING,
                "FileProcessing",
                Severity::High,
                true,
                true,
                "Source file is not valid UTF-8",
                "Re-encode the file as UTF-8",
            ),
            (
                file_processing::IO_ERROR,
                "FileProcessing",
                Severity::High,
                true,
                true,
                "I/O error while reading the source file",
                "Check file permissions and disk state",
            ),
            (
                lexical::UNRECOGNIZED_INPUT,
                "Lexical",
                Severity::High,
                false,
                true,
                "No token automaton accepts the input at this position",
                "Remove or replace the offending character",
            ),
            (
                lexical::TOO_MANY_TOKENS,
                "Lexical",
                Severity::High,
                false,
                true,
                "Input produces more tokens than the compile-time limit",
                "Shorten the expression",
            ),
            (
                lexical::INPUT_TOO_LARGE,
                "Lexical",
                Severity::High,
                false,
                true,
                "Input is longer than the compile-time limit",
                "Shorten the expression",
            ),
            (
                lexical::AUTOMATON_TOO_LARGE,
                "Lexical",
                Severity::High,
                false,
                true,
                "Token automaton has more states than the compile-time limit",
                "Simplify the token definition",
            ),
            (
                lexical::EMPTY_REGISTRY,
                "Lexical",
                Severity::Critical,
                false,
                true,
                "Lexer has no registered token automata",
                "Register at least one token kind before tokenizing",
            ),
            (
                syntax::UNEXPECTED_END_OF_INPUT,
                "Syntax",
                Severity::High,
                false,
                true,
                "Input ended while a token was still required",
                "Complete the expression or close open parentheses",
            ),
            (
                syntax::INVALID_NUMBER,
                "Syntax",
                Severity::High,
                false,
                true,
                "Numeric literal could not be converted to a float",
                "Check the NUM token definition",
            ),
            (
                syntax::TRAILING_TOKENS,
                "Syntax",
                Severity::High,
                false,
                true,
                "Tokens remain after a complete expression",
                "Remove the trailing tokens or add the missing operator",
            ),
            (
                syntax::UNEXPECTED_TOKEN,
                "Syntax",
                Severity::High,
                false,
                true,
                "Token does not fit the grammar at this position",
                "Check operator placement and parentheses",
            ),
            (
                syntax::MAX_RECURSION_DEPTH,
                "Syntax",
                Severity::Critical,
                false,
                true,
                "Parenthesis nesting exceeds the compile-time limit",
                "Reduce nesting depth",
            ),
            (
                syntax::EXPRESSION_TOO_DEEP,
                "Syntax",
                Severity::High,
                false,
                true,
                "Operator chain builds a tree taller than the compile-time limit",
                "Split the expression or rebuild with a larger max_expression_depth",
            ),
            (
                config::INVALID_RUNTIME_CONFIG,
                "Configuration",
                Severity::Medium,
                true,
                false,
                "Runtime configuration file could not be loaded",
                "Fix the TOML file or remove it to use defaults",
            ),
        ];

        entries
            .into_iter()
            .map(
                |(code, category, severity, recoverable, requires_halt, description, action)| {
                    (
                        code.as_str(),
                        ErrorMetadata {
                            code: code.as_str(),
                            category,
                            severity,
                            recoverable,
                            requires_halt,
                            description,
                            recommended_action: action,
                        },
                    )
                },
            )
            .collect()
    })
}

// ============================================================================
// LOOKUP HELPERS
// ============================================================================

/// Get complete metadata for a code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity for a code (unknown codes are treated as Medium)
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|m| m.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if a code is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|m| m.recoverable)
        .unwrap_or(false)
}

/// Check if a code requires halting
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|m| m.requires_halt)
        .unwrap_or(false)
}

/// Get description for a code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for a code
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category for a code
pub fn get_category(code: &str) -> &'static str {
    if code.starts_with('I') {
        return "Success";
    }
    get_error_metadata(code)
        .map(|m| m.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_keyed_by_own_code() {
        for (key, metadata) in get_error_registry() {
            assert_eq!(*key, metadata.code);
        }
    }

    #[test]
    fn test_lexical_codes_registered() {
        let metadata = get_error_metadata(lexical::UNRECOGNIZED_INPUT.as_str()).unwrap();
        assert_eq!(metadata.category, "Lexical");
        assert!(metadata.requires_halt);
        assert!(!metadata.recoverable);
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_category("E999"), "Unknown");
        assert_eq!(get_severity("E999"), Severity::Medium);
        assert!(!requires_halt("E999"));
    }

    #[test]
    fn test_success_codes_are_categorized() {
        assert_eq!(get_category(success::PIPELINE_COMPLETE.as_str()), "Success");
        assert!(get_error_metadata(success::PIPELINE_COMPLETE.as_str()).is_none());
    }

    #[test]
    fn test_code_display() {
        assert_eq!(syntax::UNEXPECTED_TOKEN.to_string(), "E050");
    }
}
