//! Error codes for the gouml diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Lexer errors
//! - `E1xx` - Parser errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexer Errors (E0xx)
    // =========================================================================
    /// Unterminated string literal.
    ///
    /// An interpreted string was opened with `"` but never closed on the same line.
    E001,

    /// Unexpected character.
    ///
    /// A character was encountered that does not start any Go token.
    E002,

    /// Unterminated raw string literal.
    ///
    /// A raw string was opened with a backtick but never closed.
    E003,

    /// Unterminated rune literal.
    ///
    /// A rune literal was opened with `'` but never closed on the same line.
    E004,

    /// Unterminated block comment.
    ///
    /// A `/*` comment has no matching `*/`.
    E005,

    // =========================================================================
    // Parser Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// The parser encountered a token it did not expect at this position.
    E100,

    /// Incomplete input.
    ///
    /// The input ended unexpectedly before a complete construct was parsed.
    E101,

    /// Missing package clause.
    ///
    /// Every Go source file must start with `package <name>`.
    E102,

    /// Mixed named and unnamed parameters.
    ///
    /// A parameter list either names every parameter or none of them.
    E103,

    /// Type nesting too deep.
    ///
    /// Pointer, slice, map, channel, function and struct types nested past
    /// the parser's limit are rejected instead of overflowing the stack.
    E104,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            // Parser errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Lexer errors
            ErrorCode::E001 => "unterminated string literal",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E003 => "unterminated raw string literal",
            ErrorCode::E004 => "unterminated rune literal",
            ErrorCode::E005 => "unterminated block comment",
            // Parser errors
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E102 => "missing package clause",
            ErrorCode::E103 => "mixed named and unnamed parameters",
            ErrorCode::E104 => "type nesting too deep",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E103.to_string(), "E103");
        assert_eq!(ErrorCode::E104.to_string(), "E104");
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E005.as_str(), "E005");
        assert_eq!(ErrorCode::E102.as_str(), "E102");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "unterminated string literal");
        assert_eq!(ErrorCode::E005.description(), "unterminated block comment");
        assert_eq!(ErrorCode::E102.description(), "missing package clause");
    }
}
