//! # gouml Parser
//!
//! Declaration-level parser for Go source files. It recognizes package
//! clauses, imports, type, var and const declarations and function/method
//! signatures, and skips everything inside function bodies.
//!
//! ## Usage
//!
//! ```
//! # use gouml_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//! package cars
//!
//! type Car struct {
//!     Engine
//!     wheels []Wheel
//! }
//!
//! func (c *Car) Drive(speed int) error { return nil }
//! "#;
//!
//!     let file = parse(source)?;
//!     assert_eq!(file.package, "cars");
//!     assert_eq!(file.decls.len(), 2);
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod error;
mod lexer;
mod parser;
mod span;
mod tokens;

pub use span::Span;

use log::trace;

use ast::SourceFile;
use error::ParseError;

/// Parse one Go source file into its declaration tree.
///
/// The pipeline has three steps:
///
/// 1. **Tokenize** - Convert source text to tokens, collecting every lexical
///    error
/// 2. **Terminate** - Drop comments and whitespace and insert the implicit
///    semicolons
/// 3. **Parse** - Build the [`SourceFile`] from the significant tokens
///
/// # Errors
///
/// Returns a [`ParseError`] holding one diagnostic per lexical error, or a
/// single diagnostic for the first syntax error.
pub fn parse(source: &str) -> Result<SourceFile, ParseError> {
    let tokens = lexer::tokenize(source)?;
    let tokens = lexer::terminate_statements(tokens);
    trace!(tokens = tokens.len(); "Tokenized source");

    let file = parser::parse_source_file(&tokens)?;
    trace!(package = file.package.as_str(), decls = file.decls.len(); "Parsed source file");
    Ok(file)
}
