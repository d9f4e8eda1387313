//! Error types for the CNAB converter
//!
//! This module defines all error types that can occur while converting files.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Decode Errors**: No candidate text encoding could read the file
//! - **Content Errors**: The file decoded but contained no detail records
//! - **Export Errors**: The output table could not be written
//! - **Setup Errors**: Invalid extraction patterns, runtime creation failures
//!
//! Field-level malformation is never an error: formatters and extractors
//! degrade to empty strings or zero amounts instead.

use thiserror::Error;

/// Main error type for the converter
///
/// Every file-level variant carries the path of the file it refers to, so a
/// run summary can report failures without extra context.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CnabError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading, writing or listing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// None of the candidate encodings could decode the file
    ///
    /// The file is skipped and counted as a failure.
    #[error("Could not decode '{path}' with any of: {encodings}")]
    DecodeError {
        /// The file that could not be decoded
        path: String,
        /// Comma-separated list of the encodings that were tried
        encodings: String,
    },

    /// The file decoded but yielded zero detail records
    ///
    /// The file is skipped and counted as a failure rather than producing
    /// an empty export.
    #[error("No detail records found in '{path}'")]
    NoRecords {
        /// The file without detail records
        path: String,
    },

    /// The export table could not be written
    #[error("Export error for '{path}': {message}")]
    ExportError {
        /// Output path being written
        path: String,
        /// Description of the failure
        message: String,
    },

    /// An extraction pattern failed to compile
    #[error("Invalid extraction pattern: {message}")]
    InvalidPattern {
        /// Description of the regex error
        message: String,
    },

    /// The worker runtime could not be created or a worker failed
    #[error("Runtime error: {message}")]
    RuntimeError {
        /// Description of the failure
        message: String,
    },
}

// Conversion from io::Error to CnabError
impl From<std::io::Error> for CnabError {
    fn from(error: std::io::Error) -> Self {
        CnabError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to CnabError
impl From<csv::Error> for CnabError {
    fn from(error: csv::Error) -> Self {
        CnabError::ExportError {
            path: String::from("<csv writer>"),
            message: error.to_string(),
        }
    }
}

// Conversion from regex::Error to CnabError
impl From<regex::Error> for CnabError {
    fn from(error: regex::Error) -> Self {
        CnabError::InvalidPattern {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl CnabError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        CnabError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a DecodeError from the path and the encodings that were tried
    pub fn decode_failed(path: &std::path::Path, encodings: &[&str]) -> Self {
        CnabError::DecodeError {
            path: path.display().to_string(),
            encodings: encodings.join(", "),
        }
    }

    /// Create a NoRecords error
    pub fn no_records(path: &std::path::Path) -> Self {
        CnabError::NoRecords {
            path: path.display().to_string(),
        }
    }

    /// Create an ExportError
    pub fn export_failed(path: &std::path::Path, message: impl std::fmt::Display) -> Self {
        CnabError::ExportError {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a RuntimeError
    pub fn runtime(message: impl std::fmt::Display) -> Self {
        CnabError::RuntimeError {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case::file_not_found(
        CnabError::FileNotFound { path: "CNABs/a.rem".to_string() },
        "File not found: CNABs/a.rem"
    )]
    #[case::io_error(
        CnabError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::decode_error(
        CnabError::DecodeError { path: "a.rem".to_string(), encodings: "latin-1, utf-8".to_string() },
        "Could not decode 'a.rem' with any of: latin-1, utf-8"
    )]
    #[case::no_records(
        CnabError::NoRecords { path: "a.rem".to_string() },
        "No detail records found in 'a.rem'"
    )]
    #[case::export_error(
        CnabError::ExportError { path: "out/a.csv".to_string(), message: "disk full".to_string() },
        "Export error for 'out/a.csv': disk full"
    )]
    #[case::invalid_pattern(
        CnabError::InvalidPattern { message: "unclosed group".to_string() },
        "Invalid extraction pattern: unclosed group"
    )]
    #[case::runtime_error(
        CnabError::RuntimeError { message: "worker panicked".to_string() },
        "Runtime error: worker panicked"
    )]
    fn test_error_display(#[case] error: CnabError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::file_not_found(
        CnabError::file_not_found(Path::new("a.rem")),
        CnabError::FileNotFound { path: "a.rem".to_string() }
    )]
    #[case::decode_failed(
        CnabError::decode_failed(Path::new("a.rem"), &["latin-1", "utf-8", "windows-1252"]),
        CnabError::DecodeError { path: "a.rem".to_string(), encodings: "latin-1, utf-8, windows-1252".to_string() }
    )]
    #[case::no_records(
        CnabError::no_records(Path::new("a.rem")),
        CnabError::NoRecords { path: "a.rem".to_string() }
    )]
    #[case::export_failed(
        CnabError::export_failed(Path::new("a.csv"), "boom"),
        CnabError::ExportError { path: "a.csv".to_string(), message: "boom".to_string() }
    )]
    fn test_helper_functions(#[case] result: CnabError, #[case] expected: CnabError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: CnabError = io_error.into();
        assert!(matches!(error, CnabError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_regex_error_conversion() {
        let regex_error = regex::Regex::new("(unclosed").unwrap_err();
        let error: CnabError = regex_error.into();
        assert!(matches!(error, CnabError::InvalidPattern { .. }));
    }
}
