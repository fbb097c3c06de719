//! Token definitions for Go source text.
//!
//! Only the keywords the declaration parser dispatches on get their own
//! variant. Every other Go keyword (`return`, `if`, `break`, ...) is lexed as an
//! [`Token::Ident`], which keeps automatic semicolon insertion correct because
//! `return`, `break`, `continue` and `fallthrough` behave like identifiers
//! at the end of a line.

use std::fmt;

use crate::span::Span;

/// Keywords that start or shape declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Package,
    Import,
    Type,
    Func,
    Var,
    Const,
    Struct,
    Interface,
    Map,
    Chan,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Package => "package",
            Keyword::Import => "import",
            Keyword::Type => "type",
            Keyword::Func => "func",
            Keyword::Var => "var",
            Keyword::Const => "const",
            Keyword::Struct => "struct",
            Keyword::Interface => "interface",
            Keyword::Map => "map",
            Keyword::Chan => "chan",
        }
    }
}

/// Punctuation the parser matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punct {
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,
    Dot,
    Ellipsis,
    Star,
    Tilde,
    Pipe,
    Assign,
    Colon,
    /// `<-`, used in channel types.
    Arrow,
}

impl Punct {
    pub fn as_str(&self) -> &'static str {
        match self {
            Punct::LeftParen => "(",
            Punct::RightParen => ")",
            Punct::LeftBracket => "[",
            Punct::RightBracket => "]",
            Punct::LeftBrace => "{",
            Punct::RightBrace => "}",
            Punct::Comma => ",",
            Punct::Semicolon => ";",
            Punct::Dot => ".",
            Punct::Ellipsis => "...",
            Punct::Star => "*",
            Punct::Tilde => "~",
            Punct::Pipe => "|",
            Punct::Assign => "=",
            Punct::Colon => ":",
            Punct::Arrow => "<-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    Ident(&'a str),
    Keyword(Keyword),
    Punct(Punct),
    /// Integer, float or imaginary literal, verbatim.
    Number(&'a str),
    /// Interpreted or raw string literal, verbatim including its quotes.
    String(&'a str),
    /// Rune literal, verbatim including its quotes.
    Rune(&'a str),
    /// Any operator the parser never matches on (`+`, `&&`, `:=`, ...).
    Operator(&'a str),
    LineComment(&'a str),
    BlockComment(&'a str),
    Whitespace,
    Newline,
}

impl Token<'_> {
    /// Returns `true` for tokens that carry no syntax.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Whitespace | Token::Newline | Token::LineComment(_) | Token::BlockComment(_)
        )
    }

    /// Returns `true` if a line break after this token ends a statement.
    pub fn ends_statement(&self) -> bool {
        matches!(
            self,
            Token::Ident(_)
                | Token::Number(_)
                | Token::String(_)
                | Token::Rune(_)
                | Token::Punct(Punct::RightParen | Punct::RightBracket | Punct::RightBrace)
        ) || matches!(self, Token::Operator(op) if *op == "++" || *op == "--")
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(text)
            | Token::Number(text)
            | Token::String(text)
            | Token::Rune(text)
            | Token::Operator(text)
            | Token::LineComment(text)
            | Token::BlockComment(text) => f.write_str(text),
            Token::Keyword(keyword) => f.write_str(keyword.as_str()),
            Token::Punct(punct) => f.write_str(punct.as_str()),
            Token::Whitespace => f.write_str(" "),
            Token::Newline => f.write_str("\n"),
        }
    }
}

/// A token with its location in the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedToken<'a> {
    pub token: Token<'a>,
    pub span: Span,
}

impl<'a> PositionedToken<'a> {
    pub fn new(token: Token<'a>, span: Span) -> Self {
        Self { token, span }
    }
}
