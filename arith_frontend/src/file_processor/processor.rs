//! File processor implementation with compile-time size limit and global logging integration

use crate::config::compile_time::file_processing::MAX_FILE_SIZE;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Not a regular file: {path}")]
    NotAFile { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty: {path}")]
    EmptyFile { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },
}

impl FileProcessorError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } | FileProcessorError::NotAFile { .. } => {
                codes::file_processing::FILE_NOT_FOUND
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::EmptyFile { .. } => codes::file_processing::EMPTY_FILE,
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
        }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

/// Source text read from disk plus what we learned while reading it
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub source: String,
    pub size: u64,
    pub line_count: usize,
    pub processing_duration: Duration,
}

impl SourceFile {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }
}

/// Reads expression source files within the compile-time size limit
#[derive(Debug, Clone)]
pub struct FileProcessor {
    /// Reject files holding nothing but whitespace
    pub reject_blank_files: bool,
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            reject_blank_files: true,
        }
    }

    pub fn with_blank_files_rejected(mut self, reject: bool) -> Self {
        self.reject_blank_files = reject;
        self
    }

    /// Get the compile-time maximum file size
    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read a file and return its contents with metadata
    pub fn process_file(&self, path: &Path) -> Result<SourceFile, FileProcessorError> {
        let start_time = Instant::now();
        let display = path.display().to_string();

        log_debug!("Starting file processing", "file" => display);

        let size = self.check_metadata(path, &display)?;
        let bytes = fs::read(path).map_err(|e| io_error(&display, &e))?;

        let source = match String::from_utf8(bytes) {
            Ok(source) => source,
            Err(_) => {
                let error = FileProcessorError::InvalidEncoding {
                    path: display.clone(),
                };
                log_error!(error.error_code(), "File is not valid UTF-8", "file" => display);
                return Err(error);
            }
        };

        let blank = if self.reject_blank_files {
            source.trim().is_empty()
        } else {
            source.is_empty()
        };
        if blank {
            let error = FileProcessorError::EmptyFile {
                path: display.clone(),
            };
            log_error!(error.error_code(), "File has no content", "file" => display);
            return Err(error);
        }

        let result = SourceFile {
            path: path.to_path_buf(),
            line_count: source.lines().count(),
            source,
            size,
            processing_duration: start_time.elapsed(),
        };

        log_success!(codes::success::FILE_PROCESSING_SUCCESS,
            "File processed successfully",
            "file" => display,
            "size_bytes" => result.size,
            "lines" => result.line_count,
            "duration_ms" => format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0)
        );

        Ok(result)
    }

    /// Existence, kind and size checks; returns the size in bytes
    fn check_metadata(&self, path: &Path, display: &str) -> Result<u64, FileProcessorError> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let error = FileProcessorError::FileNotFound {
                    path: display.to_string(),
                };
                log_error!(error.error_code(), "File not found", "path" => display);
                return Err(error);
            }
            Err(e) => return Err(io_error(display, &e)),
        };

        if !metadata.is_file() {
            let error = FileProcessorError::NotAFile {
                path: display.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => display);
            return Err(error);
        }

        let size = metadata.len();
        if size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds size limit",
                "file" => display,
                "size_bytes" => size,
                "max_size_bytes" => MAX_FILE_SIZE
            );
            return Err(error);
        }

        Ok(size)
    }
}

fn io_error(path: &str, e: &std::io::Error) -> FileProcessorError {
    let error = FileProcessorError::IoError {
        message: format!("{}: {}", path, e),
    };
    log_error!(error.error_code(), "I/O error while reading file",
        "path" => path,
        "io_error" => e
    );
    error
}
