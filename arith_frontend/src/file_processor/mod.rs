//! File processor module with compile-time size limit and global logging integration

mod processor;

use std::path::Path;

pub use processor::{FileProcessor, FileProcessorError, SourceFile};

/// Read a source file with default settings
pub fn process_file(path: impl AsRef<Path>) -> Result<SourceFile, FileProcessorError> {
    FileProcessor::new().process_file(path.as_ref())
}

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    FileProcessor::max_file_size()
}
