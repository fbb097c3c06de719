//! Error types for gouml operations.
//!
//! This module provides the main error type [`GoumlError`] which wraps
//! the error conditions that can occur while loading Go sources and
//! building a diagram from them.

use std::{io, path::PathBuf};

use thiserror::Error;

use gouml_parser::error::ParseError;

/// The main error type for gouml operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the parser diagnostics together with the
/// source text and path of the failing file, so callers can render rich
/// reports with source snippets.
#[derive(Debug, Error)]
pub enum GoumlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{}: {err}", path.display())]
    Parse {
        err: ParseError,
        src: String,
        path: PathBuf,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GoumlError {
    /// Create a new `Parse` error with the associated source code and path.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
            path: path.into(),
        }
    }
}

impl From<walkdir::Error> for GoumlError {
    fn from(err: walkdir::Error) -> Self {
        Self::Io(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gouml_parser::parse;

    #[test]
    fn test_parse_error_display_includes_path() {
        let err = parse("type A struct{}").unwrap_err();

        let error = GoumlError::new_parse_error(err, "type A struct{}", "zoo/dog.go");

        assert_eq!(
            error.to_string(),
            "zoo/dog.go: error[E102]: missing package clause"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such directory");

        let error: GoumlError = io_err.into();

        assert!(matches!(error, GoumlError::Io(_)));
        assert_eq!(error.to_string(), "I/O error: no such directory");
    }
}
