//! The core diagnostic type for the gouml error system.
//!
//! A [`Diagnostic`] represents a single error with optional
//! error code, multiple labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{error_code::ErrorCode, label::Label},
    span::Span,
};

/// A rich diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// error[E001]: unterminated string literal
///   --> cars/car.go:7:17
///    |
///  7 |     Name string `json:"name
///    |                 ^^^^^^^^^^^^ unterminated raw string literal
///    |
///    = help: add closing backtick
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use gouml_parser::error::{Diagnostic, ErrorCode};
    /// # use gouml_parser::Span;
    ///
    /// let diag = Diagnostic::error("missing package clause")
    ///     .with_code(ErrorCode::E102)
    ///     .with_label(Span::new(0..4), "expected `package`")
    ///     .with_help("start the file with `package <name>`");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Returns the span of the first primary label, if any.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::span)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E001]: message" or "error: message"
        f.write_str("error")?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::error("unexpected token");

        assert_eq!(diag.message(), "unexpected token");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
        assert!(diag.primary_span().is_none());
    }

    #[test]
    fn test_diagnostic_labels() {
        let diag = Diagnostic::error("incomplete input")
            .with_secondary_label(Span::new(5..6), "block opened here")
            .with_label(Span::new(40..41), "incomplete");

        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_secondary());
        assert_eq!(diag.primary_span(), Some(Span::new(40..41)));
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::error("unterminated block comment").with_code(ErrorCode::E005);

        assert_eq!(diag.to_string(), "error[E005]: unterminated block comment");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::error("expected type");

        assert_eq!(diag.to_string(), "error: expected type");
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("mixed named and unnamed parameters")
            .with_code(ErrorCode::E103)
            .with_label(Span::new(100..120), "parameter list")
            .with_help("name every parameter or none of them");

        assert_eq!(diag.code(), Some(ErrorCode::E103));
        assert_eq!(diag.help(), Some("name every parameter or none of them"));
    }
}
