//! Lexical analyzer for Go source text.
//!
//! The lexer converts source text into a stream of [`Token`]s for parsing.
//! It handles whitespace, comments, string/rune literals, numbers and the
//! operator set of the language.
//!
//! The public entry point is [`tokenize`], which performs error-recovering
//! lexical analysis and collects all diagnostics in a single pass. The
//! resulting stream still contains trivia; [`terminate_statements`] drops it
//! and applies automatic semicolon insertion.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, not, peek, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{literal, none_of, one_of, take_till, take_until, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{Keyword, PositionedToken, Punct, Token},
};

/// Rich diagnostic information for lexer errors.
///
/// Attached to winnow errors via `.context()` to provide detailed error
/// messages with codes, help text, and precise span information.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    pub code: ErrorCode,
    pub message: &'static str,
    pub help: Option<&'static str>,
    /// The error span covers from `start` to the recovery position.
    pub start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Parse line comment starting with `//`, keeping the marker.
fn line_comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    ("//", take_while(0.., |c: char| c != '\n'))
        .take()
        .map(Token::LineComment)
        .parse_next(input)
}

/// Parse a `/* ... */` comment. Block comments do not nest.
fn block_comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    (
        "/*",
        cut_err((take_until(0.., "*/"), "*/")).context(LexerDiagnostic {
            code: ErrorCode::E005,
            message: "unterminated block comment",
            help: Some("add closing `*/`"),
            start,
        }),
    )
        .take()
        .map(Token::BlockComment)
        .parse_next(input)
}

/// Parse an interpreted string literal: `"..."` with backslash escapes.
///
/// Escapes are not decoded; the literal is kept verbatim so struct tags and
/// import paths survive unchanged.
fn interpreted_string<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    let content = repeat::<_, _, (), _, _>(
        0..,
        alt((
            none_of(['"', '\\', '\n']).void(),
            ('\\', none_of('\n')).void(),
        )),
    );

    (
        '"',
        cut_err((content, '"')).context(LexerDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated string literal",
            help: Some("add closing `\"` before the end of the line"),
            start,
        }),
    )
        .take()
        .map(Token::String)
        .parse_next(input)
}

/// Parse a raw string literal delimited by backticks. May span lines.
fn raw_string<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    (
        '`',
        cut_err((take_till(0.., '`'), '`')).context(LexerDiagnostic {
            code: ErrorCode::E003,
            message: "unterminated raw string literal",
            help: Some("add closing backtick"),
            start,
        }),
    )
        .take()
        .map(Token::String)
        .parse_next(input)
}

/// Parse a rune literal such as `'a'` or `'\n'`.
fn rune<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    let content = repeat::<_, _, (), _, _>(
        1..,
        alt((
            none_of(['\'', '\\', '\n']).void(),
            ('\\', none_of('\n')).void(),
        )),
    );

    (
        '\'',
        cut_err((content, '\'')).context(LexerDiagnostic {
            code: ErrorCode::E004,
            message: "unterminated rune literal",
            help: Some("add closing `'` before the end of the line"),
            start,
        }),
    )
        .take()
        .map(Token::Rune)
        .parse_next(input)
}

/// Parse numeric literals loosely: the parser never interprets them.
fn number<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        (
            one_of(|c: char| c.is_ascii_digit()),
            take_while(0.., is_number_char),
        )
            .take(),
        (
            '.',
            one_of(|c: char| c.is_ascii_digit()),
            take_while(0.., is_number_char),
        )
            .take(),
    ))
    .map(Token::Number)
    .parse_next(input)
}

/// Parse keywords with word boundary checking
fn keyword<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    terminated(
        alt((
            literal("package").value(Keyword::Package),
            literal("import").value(Keyword::Import),
            literal("type").value(Keyword::Type),
            literal("func").value(Keyword::Func),
            literal("var").value(Keyword::Var),
            literal("const").value(Keyword::Const),
            literal("struct").value(Keyword::Struct),
            literal("interface").value(Keyword::Interface),
            literal("map").value(Keyword::Map),
            literal("chan").value(Keyword::Chan),
        )),
        // Ensure keyword is not followed by identifier character (word boundary)
        peek(not(one_of(is_ident_char))),
    )
    .map(Token::Keyword)
    .parse_next(input)
}

/// Parse identifiers: a Unicode letter or `_` followed by letters, digits or `_`.
fn identifier<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., is_ident_char)
        .verify(|s: &str| {
            s.chars()
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_')
        })
        .map(Token::Ident)
        .parse_next(input)
}

/// Parse multi-character operators (order matters - longest first)
fn multi_char_operator<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        literal("...").value(Token::Punct(Punct::Ellipsis)),
        literal("<-").value(Token::Punct(Punct::Arrow)),
        alt((
            literal("<<="),
            literal(">>="),
            literal("&^="),
            literal("&&"),
            literal("||"),
            literal("=="),
            literal("!="),
            literal("<="),
            literal(">="),
            literal(":="),
        ))
        .map(Token::Operator),
        alt((
            literal("++"),
            literal("--"),
            literal("<<"),
            literal(">>"),
            literal("&^"),
            literal("+="),
            literal("-="),
            literal("*="),
            literal("/="),
            literal("%="),
        ))
        .map(Token::Operator),
        alt((literal("&="), literal("|="), literal("^="))).map(Token::Operator),
    ))
    .parse_next(input)
}

/// Parse single character punctuation
fn single_char_token<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        '('.value(Token::Punct(Punct::LeftParen)),
        ')'.value(Token::Punct(Punct::RightParen)),
        '['.value(Token::Punct(Punct::LeftBracket)),
        ']'.value(Token::Punct(Punct::RightBracket)),
        '{'.value(Token::Punct(Punct::LeftBrace)),
        '}'.value(Token::Punct(Punct::RightBrace)),
        ','.value(Token::Punct(Punct::Comma)),
        ';'.value(Token::Punct(Punct::Semicolon)),
        '.'.value(Token::Punct(Punct::Dot)),
        '*'.value(Token::Punct(Punct::Star)),
        '~'.value(Token::Punct(Punct::Tilde)),
        '|'.value(Token::Punct(Punct::Pipe)),
        '='.value(Token::Punct(Punct::Assign)),
        ':'.value(Token::Punct(Punct::Colon)),
    ))
    .parse_next(input)
}

/// Parse the remaining single character operators
fn single_char_operator<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    one_of(['+', '-', '/', '%', '&', '^', '<', '>', '!'])
        .take()
        .map(Token::Operator)
        .parse_next(input)
}

/// Parse whitespace (spaces, tabs, carriage returns, byte order mark; not newlines)
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| {
        (c.is_whitespace() && c != '\n') || c == '\u{feff}'
    })
    .value(Token::Whitespace)
    .parse_next(input)
}

/// Parse newline
fn newline<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        line_comment,         // Must come before the `/` operator
        block_comment,        // Must come before the `/` operator
        interpreted_string,   // Must come before any single char
        raw_string,           // Must come before any single char
        rune,                 // Must come before any single char
        multi_char_operator,  // Must come before single char operators and `.5`
        keyword,              // Must come before identifier
        number,               // Must come before `.`
        identifier,           // Must come before single chars
        single_char_token,    // Punctuation
        single_char_operator, // Remaining operators
        newline,              // Must come before whitespace
        whitespace,           // General whitespace
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    let span = Span::new(start_pos..end_pos);

    Ok(PositionedToken::new(token, span))
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Tokenize the input, collecting tokens and errors.
    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            match positioned_token(&mut input) {
                Ok(token) => {
                    self.tokens.push(token);
                }
                Err(e) => {
                    let diagnostic = Self::convert_err_mode(e, &mut input);
                    self.diagnostics.emit(diagnostic);
                }
            }
        }
    }

    /// Finish lexing and return tokens or collected errors.
    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    /// Convert an ErrMode to a Diagnostic and move the input past the bad text.
    ///
    /// Unterminated single-line literals skip to the end of the line,
    /// unterminated block comments and raw strings swallow the rest of the
    /// input, and anything else skips one character (E002).
    fn convert_err_mode(err: ErrMode<ContextError<LexerDiagnostic>>, input: &mut Input<'a>) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            match code {
                ErrorCode::E003 | ErrorCode::E005 => skip_rest(input),
                _ => skip_line(input),
            }
            let span = Span::new(*start..input.current_token_start());

            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        // Fallback when no context is present
        let error_pos = input.current_token_start();
        let _ = input.next_token();
        let span = Span::new(error_pos..input.current_token_start());
        Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E002)
            .with_label(span, ErrorCode::E002.description())
    }
}

/// Advance to the next newline without consuming it.
fn skip_line(input: &mut Input<'_>) {
    loop {
        let checkpoint = input.checkpoint();
        match input.next_token() {
            Some('\n') => {
                input.reset(&checkpoint);
                break;
            }
            Some(_) => {}
            None => break,
        }
    }
}

/// Advance to the end of the input.
fn skip_rest(input: &mut Input<'_>) {
    let remaining = input.eof_offset();
    let _ = input.next_slice(remaining);
}

/// Parse tokens from a string input, collecting multiple errors.
///
/// Attempts to recover from errors and continue tokenizing, collecting
/// all errors encountered.
///
/// # Returns
///
/// - `Ok(tokens)` - All tokens, trivia included
/// - `Err(ParseError)` - One or more errors occurred; contains all diagnostics
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let located_input = LocatingSlice::new(input);
    let mut lexer = Lexer::new();
    lexer.tokenize(located_input);
    lexer.finish()
}

/// Drop trivia and apply automatic semicolon insertion.
///
/// A line break becomes a `;` when the last significant token before it is an
/// identifier, a literal, `)`, `]`, `}`, `++` or `--`. A block comment that
/// spans lines counts as a line break, and the end of input terminates the
/// final line.
pub fn terminate_statements(tokens: Vec<PositionedToken<'_>>) -> Vec<PositionedToken<'_>> {
    let mut significant = Vec::with_capacity(tokens.len());
    let mut pending = false;
    let mut last_end = 0;

    for positioned in tokens {
        let line_break = match positioned.token {
            Token::Newline => true,
            Token::BlockComment(text) => text.contains('\n'),
            _ => false,
        };

        if line_break {
            if pending {
                significant.push(PositionedToken::new(
                    Token::Punct(Punct::Semicolon),
                    positioned.span,
                ));
                pending = false;
            }
            continue;
        }

        if positioned.token.is_trivia() {
            continue;
        }

        pending = positioned.token.ends_statement();
        last_end = positioned.span.end();
        significant.push(positioned);
    }

    if pending {
        significant.push(PositionedToken::new(
            Token::Punct(Punct::Semicolon),
            Span::new(last_end..last_end),
        ));
    }

    significant
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_single_token(input: &str, expected: Token<'_>) {
        let mut located_input = LocatingSlice::new(input);
        let result = positioned_token(&mut located_input);
        assert!(result.is_ok(), "Failed to parse: {}", input);
        let positioned = result.unwrap();
        assert_eq!(positioned.token, expected);
    }

    fn significant(input: &str) -> Vec<Token<'_>> {
        terminate_statements(tokenize(input).expect("Should tokenize"))
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_keywords() {
        test_single_token("package", Token::Keyword(Keyword::Package));
        test_single_token("import", Token::Keyword(Keyword::Import));
        test_single_token("type", Token::Keyword(Keyword::Type));
        test_single_token("func", Token::Keyword(Keyword::Func));
        test_single_token("var", Token::Keyword(Keyword::Var));
        test_single_token("const", Token::Keyword(Keyword::Const));
        test_single_token("struct", Token::Keyword(Keyword::Struct));
        test_single_token("interface", Token::Keyword(Keyword::Interface));
        test_single_token("map", Token::Keyword(Keyword::Map));
        test_single_token("chan", Token::Keyword(Keyword::Chan));
    }

    #[test]
    fn test_keyword_word_boundaries() {
        test_single_token("types", Token::Ident("types"));
        test_single_token("mapper", Token::Ident("mapper"));
        test_single_token("channel", Token::Ident("channel"));
        test_single_token("func_", Token::Ident("func_"));
        test_single_token("return", Token::Ident("return"));
    }

    #[test]
    fn test_identifiers() {
        test_single_token("engine", Token::Ident("engine"));
        test_single_token("_private", Token::Ident("_private"));
        test_single_token("Car2", Token::Ident("Car2"));
        test_single_token("Überweisung", Token::Ident("Überweisung"));
    }

    #[test]
    fn test_operators() {
        test_single_token("...", Token::Punct(Punct::Ellipsis));
        test_single_token("<-", Token::Punct(Punct::Arrow));
        test_single_token(":=", Token::Operator(":="));
        test_single_token("&&", Token::Operator("&&"));
        test_single_token("++", Token::Operator("++"));
        test_single_token("+", Token::Operator("+"));
        test_single_token("!", Token::Operator("!"));
        test_single_token("*", Token::Punct(Punct::Star));
        test_single_token("=", Token::Punct(Punct::Assign));
        test_single_token("|", Token::Punct(Punct::Pipe));
        test_single_token("~", Token::Punct(Punct::Tilde));
    }

    #[test]
    fn test_punctuation() {
        test_single_token("(", Token::Punct(Punct::LeftParen));
        test_single_token(")", Token::Punct(Punct::RightParen));
        test_single_token("[", Token::Punct(Punct::LeftBracket));
        test_single_token("]", Token::Punct(Punct::RightBracket));
        test_single_token("{", Token::Punct(Punct::LeftBrace));
        test_single_token("}", Token::Punct(Punct::RightBrace));
        test_single_token(",", Token::Punct(Punct::Comma));
        test_single_token(";", Token::Punct(Punct::Semicolon));
        test_single_token(".", Token::Punct(Punct::Dot));
    }

    #[test]
    fn test_literals() {
        test_single_token("\"hello\"", Token::String("\"hello\""));
        test_single_token("\"a \\\"q\\\" b\"", Token::String("\"a \\\"q\\\" b\""));
        test_single_token("`json:\"name\"`", Token::String("`json:\"name\"`"));
        test_single_token("'x'", Token::Rune("'x'"));
        test_single_token("'\\n'", Token::Rune("'\\n'"));
        test_single_token("42", Token::Number("42"));
        test_single_token("0x1F", Token::Number("0x1F"));
        test_single_token("3.14", Token::Number("3.14"));
        test_single_token(".5", Token::Number(".5"));
        test_single_token("1_000", Token::Number("1_000"));
    }

    #[test]
    fn test_comments() {
        test_single_token("// note", Token::LineComment("// note"));
        test_single_token("/* a\nb */", Token::BlockComment("/* a\nb */"));
    }

    #[test]
    fn test_raw_string_spans_lines() {
        let tokens = tokenize("`line1\nline2`").expect("Should tokenize");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].span, Span::new(0..13));
    }

    #[test]
    fn test_token_spans() {
        let tokens = tokenize("type Car").expect("Should tokenize");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].span, Span::new(0..4));
        assert_eq!(tokens[1].token, Token::Whitespace);
        assert_eq!(tokens[2].span, Span::new(5..8));
    }

    #[test]
    fn test_semicolon_after_identifier_line() {
        let tokens = significant("package zoo\n\ntype Dog struct{}\n");
        assert_eq!(
            tokens,
            vec![
                Token::Keyword(Keyword::Package),
                Token::Ident("zoo"),
                Token::Punct(Punct::Semicolon),
                Token::Keyword(Keyword::Type),
                Token::Ident("Dog"),
                Token::Keyword(Keyword::Struct),
                Token::Punct(Punct::LeftBrace),
                Token::Punct(Punct::RightBrace),
                Token::Punct(Punct::Semicolon),
            ]
        );
    }

    #[test]
    fn test_no_semicolon_after_open_brace_or_comma() {
        let tokens = significant("f(a,\nb) {\n}");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("f"),
                Token::Punct(Punct::LeftParen),
                Token::Ident("a"),
                Token::Punct(Punct::Comma),
                Token::Ident("b"),
                Token::Punct(Punct::RightParen),
                Token::Punct(Punct::LeftBrace),
                Token::Punct(Punct::RightBrace),
                Token::Punct(Punct::Semicolon),
            ]
        );
    }

    #[test]
    fn test_comments_are_dropped_but_break_lines() {
        let tokens = significant("x // trailing\ny /* multi\nline */ z");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("x"),
                Token::Punct(Punct::Semicolon),
                Token::Ident("y"),
                Token::Punct(Punct::Semicolon),
                Token::Ident("z"),
                Token::Punct(Punct::Semicolon),
            ]
        );
    }

    #[test]
    fn test_single_line_block_comment_does_not_terminate() {
        let tokens = significant("x /* inline */ y");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("x"),
                Token::Ident("y"),
                Token::Punct(Punct::Semicolon),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_reports_e001() {
        let err = tokenize("x := \"oops\ny").unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
        assert_eq!(err.diagnostics()[0].primary_span(), Some(Span::new(5..10)));
    }

    #[test]
    fn test_unterminated_block_comment_reports_e005() {
        let err = tokenize("type A struct{} /* never closed\n type B").unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E005));
    }

    #[test]
    fn test_unterminated_raw_string_reports_e003() {
        let err = tokenize("var s = `abc").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E003));
    }

    #[test]
    fn test_unexpected_character_collects_all() {
        let err = tokenize("a # b $ c").unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert!(
            err.diagnostics()
                .iter()
                .all(|d| d.code() == Some(ErrorCode::E002))
        );
        assert_eq!(err.diagnostics()[0].primary_span(), Some(Span::new(2..3)));
    }
}
