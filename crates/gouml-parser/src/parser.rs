//! Parser for Go source tokens.
//!
//! This module transforms the significant token stream produced by the
//! [`lexer`](super::lexer) into the declaration tree defined in
//! [`ast`](super::ast). The public entry point is [`parse_source_file`].
//!
//! Only declarations are modeled. Function bodies are skipped by balancing
//! braces, and `var`/`const` initializers are skipped up to the end of the
//! spec.

use winnow::{
    Parser as _,
    combinator::{alt, opt, preceded, separated},
    error::{ContextError, ErrMode},
    stream::{Stateful, Stream, TokenSlice},
    token::any,
};

use crate::{
    ast::{
        ChanDir, Decl, FieldDecl, FuncDecl, GenDecl, GenKind, ImportSpec, InterfaceElem, Param,
        Receiver, Signature, SourceFile, Spec, Term, TypeExpr, TypeParam, TypeSpec, ValueSpec,
    },
    error::{Diagnostic, ErrorCode},
    span::Span,
    tokens::{Keyword, PositionedToken, Punct, Token},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what is currently being parsed
    Label(&'static str),
    /// Remaining token count (`eof_offset()`) at error start position
    ///
    /// Used to calculate start_offset as: `tokens.len() - start_offset_value`
    StartOffset(usize),
    /// Error code for failures more specific than an unexpected token
    Code(ErrorCode),
}

/// Maximum depth of nested type expressions.
///
/// Every type form recurses through [`type_expr`], so this bounds the parser's
/// stack usage on adversarial input like `********...int`.
pub(crate) const MAX_TYPE_NESTING: usize = 32;

/// Parser state carried alongside the token stream
#[derive(Debug, Clone, Default)]
pub(crate) struct Nesting {
    depth: usize,
}

type Input<'src> = Stateful<TokenSlice<'src, PositionedToken<'src>>, Nesting>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

fn new_input<'src>(tokens: &'src [PositionedToken<'src>]) -> Input<'src> {
    Stateful {
        input: TokenSlice::new(tokens),
        state: Nesting::default(),
    }
}

fn cut_err<'src, O, F>(input: &mut Input<'src>, f: F) -> IResult<O>
where
    F: FnOnce(&mut Input<'src>) -> IResult<O>,
{
    let start_remaining = input.eof_offset();

    match f(input) {
        Ok(o) => Ok(o),
        Err(ErrMode::Backtrack(mut e)) | Err(ErrMode::Cut(mut e)) => {
            e.push(Context::StartOffset(start_remaining));
            Err(ErrMode::Cut(e))
        }
        Err(e) => Err(e),
    }
}

/// Helper to create a Backtrack error carrying a label
fn backtrack(label: &'static str) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::Label(label));
    ErrMode::Backtrack(e)
}

/// Returns the `n`-th upcoming token without consuming anything.
fn nth_token<'src>(input: &Input<'src>, n: usize) -> Option<Token<'src>> {
    input.iter_offsets().nth(n).map(|(_, positioned)| positioned.token)
}

fn at_punct(input: &Input<'_>, expected: Punct) -> bool {
    matches!(nth_token(input, 0), Some(Token::Punct(p)) if p == expected)
}

/// Match one punctuation token, returning its span.
fn punct<'src>(expected: Punct) -> impl FnMut(&mut Input<'src>) -> IResult<Span> {
    move |input: &mut Input<'src>| {
        any.verify_map(|token: &PositionedToken<'src>| match token.token {
            Token::Punct(p) if p == expected => Some(token.span),
            _ => None,
        })
        .context(Context::Label(expected.as_str()))
        .parse_next(input)
    }
}

/// Match one keyword token, returning its span.
fn keyword<'src>(expected: Keyword) -> impl FnMut(&mut Input<'src>) -> IResult<Span> {
    move |input: &mut Input<'src>| {
        any.verify_map(|token: &PositionedToken<'src>| match token.token {
            Token::Keyword(k) if k == expected => Some(token.span),
            _ => None,
        })
        .context(Context::Label(expected.as_str()))
        .parse_next(input)
    }
}

fn ident<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    any.verify_map(|token: &PositionedToken<'src>| match token.token {
        Token::Ident(name) => Some(name),
        _ => None,
    })
    .context(Context::Label("identifier"))
    .parse_next(input)
}

fn ident_list(input: &mut Input<'_>) -> IResult<Vec<String>> {
    let names: Vec<&str> = separated(1.., ident, punct(Punct::Comma)).parse_next(input)?;
    Ok(names.into_iter().map(str::to_string).collect())
}

fn string_lit<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    any.verify_map(|token: &PositionedToken<'src>| match token.token {
        Token::String(text) => Some(text),
        _ => None,
    })
    .context(Context::Label("string literal"))
    .parse_next(input)
}

fn skip_semicolons(input: &mut Input<'_>) {
    while at_punct(input, Punct::Semicolon) {
        let _ = input.next_token();
    }
}

/// Parse the end of a top-level declaration: `;` or end of input
fn terminator(input: &mut Input<'_>) -> IResult<()> {
    if input.eof_offset() == 0 {
        return Ok(());
    }
    punct(Punct::Semicolon).void().parse_next(input)
}

/// Skip a balanced `{ ... }` block.
fn skip_block(input: &mut Input<'_>) -> IResult<()> {
    punct(Punct::LeftBrace).parse_next(input)?;
    let mut depth = 1usize;
    while depth > 0 {
        let token = input
            .next_token()
            .ok_or_else(|| backtrack("closing `}`"))?;
        match token.token {
            Token::Punct(Punct::LeftBrace) => depth += 1,
            Token::Punct(Punct::RightBrace) => depth -= 1,
            _ => {}
        }
    }
    Ok(())
}

/// Skip an initializer expression up to the `;` or `)` that ends the spec.
fn skip_value(input: &mut Input<'_>) {
    let mut depth = 0usize;
    while let Some(token) = nth_token(input, 0) {
        match token {
            Token::Punct(
                Punct::Semicolon | Punct::RightParen | Punct::RightBrace | Punct::RightBracket,
            ) if depth == 0 => return,
            Token::Punct(Punct::LeftParen | Punct::LeftBrace | Punct::LeftBracket) => depth += 1,
            Token::Punct(Punct::RightParen | Punct::RightBrace | Punct::RightBracket) => {
                depth -= 1
            }
            _ => {}
        }
        let _ = input.next_token();
    }
}

/// Returns `true` if the token can start a type.
fn starts_type(token: Option<Token<'_>>) -> bool {
    matches!(
        token,
        Some(
            Token::Ident(_)
                | Token::Punct(
                    Punct::Star | Punct::LeftBracket | Punct::LeftParen | Punct::Arrow
                )
                | Token::Keyword(
                    Keyword::Map
                        | Keyword::Chan
                        | Keyword::Func
                        | Keyword::Struct
                        | Keyword::Interface
                )
        )
    )
}

// ============================================================================
// Types
// ============================================================================

fn type_expr(input: &mut Input<'_>) -> IResult<TypeExpr> {
    if input.state.depth >= MAX_TYPE_NESTING {
        let mut e = ContextError::new();
        e.push(Context::Code(ErrorCode::E104));
        e.push(Context::StartOffset(input.eof_offset()));
        return Err(ErrMode::Cut(e));
    }

    input.state.depth += 1;
    let result = nested_type_expr(input);
    input.state.depth -= 1;
    result
}

fn nested_type_expr(input: &mut Input<'_>) -> IResult<TypeExpr> {
    match nth_token(input, 0) {
        Some(Token::Ident(_)) => named_type(input),
        Some(Token::Punct(Punct::Star)) => {
            let _ = input.next_token();
            let elem = type_expr(input)?;
            Ok(TypeExpr::Pointer(Box::new(elem)))
        }
        Some(Token::Punct(Punct::LeftBracket)) => array_or_slice_type(input),
        Some(Token::Punct(Punct::LeftParen)) => {
            punct(Punct::LeftParen).parse_next(input)?;
            let inner = type_expr(input)?;
            punct(Punct::RightParen).parse_next(input)?;
            Ok(TypeExpr::Paren(Box::new(inner)))
        }
        Some(Token::Punct(Punct::Arrow)) => {
            punct(Punct::Arrow).parse_next(input)?;
            keyword(Keyword::Chan).parse_next(input)?;
            let elem = type_expr(input)?;
            Ok(TypeExpr::Chan {
                dir: ChanDir::Recv,
                elem: Box::new(elem),
            })
        }
        Some(Token::Keyword(Keyword::Chan)) => {
            keyword(Keyword::Chan).parse_next(input)?;
            let dir = match opt(punct(Punct::Arrow)).parse_next(input)? {
                Some(_) => ChanDir::Send,
                None => ChanDir::Both,
            };
            let elem = type_expr(input)?;
            Ok(TypeExpr::Chan {
                dir,
                elem: Box::new(elem),
            })
        }
        Some(Token::Keyword(Keyword::Map)) => {
            keyword(Keyword::Map).parse_next(input)?;
            punct(Punct::LeftBracket).parse_next(input)?;
            let key = type_expr(input)?;
            punct(Punct::RightBracket).parse_next(input)?;
            let value = type_expr(input)?;
            Ok(TypeExpr::Map {
                key: Box::new(key),
                value: Box::new(value),
            })
        }
        Some(Token::Keyword(Keyword::Func)) => {
            keyword(Keyword::Func).parse_next(input)?;
            Ok(TypeExpr::Func(signature(input)?))
        }
        Some(Token::Keyword(Keyword::Struct)) => struct_type(input),
        Some(Token::Keyword(Keyword::Interface)) => interface_type(input),
        _ => Err(backtrack("type")),
    }
}

/// Parse `Name`, `pkg.Name` or either with type arguments
fn named_type(input: &mut Input<'_>) -> IResult<TypeExpr> {
    let first = ident(input)?;
    let (package, name) = match opt(preceded(punct(Punct::Dot), ident)).parse_next(input)? {
        Some(name) => (Some(first.to_string()), name.to_string()),
        None => (None, first.to_string()),
    };

    let args = if at_punct(input, Punct::LeftBracket) {
        type_args(input)?
    } else {
        Vec::new()
    };

    Ok(TypeExpr::Named {
        package,
        name,
        args,
    })
}

fn type_arg_list(input: &mut Input<'_>) -> IResult<Vec<TypeExpr>> {
    punct(Punct::LeftBracket).parse_next(input)?;
    let args: Vec<TypeExpr> = separated(1.., type_expr, punct(Punct::Comma)).parse_next(input)?;
    opt(punct(Punct::Comma)).parse_next(input)?;
    punct(Punct::RightBracket).parse_next(input)?;
    Ok(args)
}

/// Try to parse `[T1, T2]`. Backtracks to an empty list when the brackets
/// do not hold types.
fn type_args(input: &mut Input<'_>) -> IResult<Vec<TypeExpr>> {
    let checkpoint = input.checkpoint();

    match type_arg_list(input) {
        Ok(args) => Ok(args),
        Err(ErrMode::Backtrack(_)) => {
            input.reset(&checkpoint);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

fn array_or_slice_type(input: &mut Input<'_>) -> IResult<TypeExpr> {
    punct(Punct::LeftBracket).parse_next(input)?;

    if opt(punct(Punct::RightBracket)).parse_next(input)?.is_some() {
        let elem = type_expr(input)?;
        return Ok(TypeExpr::Slice(Box::new(elem)));
    }

    let len = array_len(input)?;
    punct(Punct::RightBracket).parse_next(input)?;
    let elem = type_expr(input)?;
    Ok(TypeExpr::Array {
        len,
        elem: Box::new(elem),
    })
}

/// Collect the array length expression verbatim, up to the closing `]`.
fn array_len(input: &mut Input<'_>) -> IResult<String> {
    let mut len = String::new();
    let mut depth = 0usize;

    loop {
        match nth_token(input, 0) {
            None => return Err(backtrack("array length")),
            Some(Token::Punct(Punct::RightBracket)) if depth == 0 => break,
            Some(Token::Punct(Punct::Semicolon | Punct::LeftBrace | Punct::RightBrace)) => {
                return Err(backtrack("array length"));
            }
            Some(Token::Punct(Punct::LeftBracket | Punct::LeftParen)) => depth += 1,
            Some(Token::Punct(Punct::RightBracket | Punct::RightParen)) => {
                depth = depth.saturating_sub(1)
            }
            _ => {}
        }
        if let Some(token) = input.next_token() {
            len.push_str(&token.token.to_string());
        }
    }

    if len.is_empty() {
        return Err(backtrack("array length"));
    }
    Ok(len)
}

fn struct_type(input: &mut Input<'_>) -> IResult<TypeExpr> {
    keyword(Keyword::Struct).parse_next(input)?;
    punct(Punct::LeftBrace).parse_next(input)?;

    let mut fields = Vec::new();
    loop {
        skip_semicolons(input);
        if at_punct(input, Punct::RightBrace) {
            break;
        }
        fields.push(field_decl(input)?);
        if !at_punct(input, Punct::RightBrace) {
            punct(Punct::Semicolon).parse_next(input)?;
        }
    }

    punct(Punct::RightBrace).parse_next(input)?;
    Ok(TypeExpr::Struct(fields))
}

fn field_decl(input: &mut Input<'_>) -> IResult<FieldDecl> {
    let (names, ty) = alt((named_field, embedded_field))
        .context(Context::Label("field"))
        .parse_next(input)?;
    let tag = opt(string_lit).parse_next(input)?;

    Ok(FieldDecl {
        names,
        ty,
        tag: tag.map(str::to_string),
    })
}

/// Parse `a, b T`
fn named_field(input: &mut Input<'_>) -> IResult<(Vec<String>, TypeExpr)> {
    let names = ident_list(input)?;
    let ty = type_expr(input)?;
    Ok((names, ty))
}

/// Parse an embedded field: `T`, `*T`, `pkg.T` or `T[int]`
fn embedded_field(input: &mut Input<'_>) -> IResult<(Vec<String>, TypeExpr)> {
    let pointer = opt(punct(Punct::Star)).parse_next(input)?.is_some();
    let ty = named_type(input)?;

    let ty = if pointer {
        TypeExpr::Pointer(Box::new(ty))
    } else {
        ty
    };
    Ok((Vec::new(), ty))
}

fn interface_type(input: &mut Input<'_>) -> IResult<TypeExpr> {
    keyword(Keyword::Interface).parse_next(input)?;
    punct(Punct::LeftBrace).parse_next(input)?;

    let mut elems = Vec::new();
    loop {
        skip_semicolons(input);
        if at_punct(input, Punct::RightBrace) {
            break;
        }
        elems.push(interface_elem(input)?);
        if !at_punct(input, Punct::RightBrace) {
            punct(Punct::Semicolon).parse_next(input)?;
        }
    }

    punct(Punct::RightBrace).parse_next(input)?;
    Ok(TypeExpr::Interface(elems))
}

fn interface_elem(input: &mut Input<'_>) -> IResult<InterfaceElem> {
    if let (Some(Token::Ident(_)), Some(Token::Punct(Punct::LeftParen))) =
        (nth_token(input, 0), nth_token(input, 1))
    {
        let name = ident(input)?.to_string();
        let signature = signature(input)?;
        return Ok(InterfaceElem::Method { name, signature });
    }

    let mut terms = union_terms(input)?;
    if terms.len() == 1 && !terms[0].tilde {
        if let Some(term) = terms.pop() {
            return Ok(InterfaceElem::Embedded(term.ty));
        }
    }
    Ok(InterfaceElem::Union(terms))
}

/// Parse `~T1 | T2 | ...`
fn union_terms(input: &mut Input<'_>) -> IResult<Vec<Term>> {
    separated(1.., term, punct(Punct::Pipe))
        .context(Context::Label("type term"))
        .parse_next(input)
}

fn term(input: &mut Input<'_>) -> IResult<Term> {
    let tilde = opt(punct(Punct::Tilde)).parse_next(input)?.is_some();
    let ty = type_expr(input)?;
    Ok(Term { tilde, ty })
}

// ============================================================================
// Signatures
// ============================================================================

/// One comma-separated entry of a parameter list before grouping is resolved.
enum ParamEntry {
    Named(String, TypeExpr),
    Bare(TypeExpr),
}

fn param_type(input: &mut Input<'_>) -> IResult<TypeExpr> {
    alt((
        preceded(punct(Punct::Ellipsis), type_expr).map(|ty| TypeExpr::Ellipsis(Box::new(ty))),
        type_expr,
    ))
    .parse_next(input)
}

fn param_entry(input: &mut Input<'_>) -> IResult<ParamEntry> {
    alt((
        (ident, param_type).map(|(name, ty)| ParamEntry::Named(name.to_string(), ty)),
        param_type.map(ParamEntry::Bare),
    ))
    .context(Context::Label("parameter"))
    .parse_next(input)
}

/// Resolve Go's parameter grouping.
///
/// When any entry is named, bare entries are names sharing the type of the
/// next named entry (`a, b int`). Otherwise every entry is a type. Returns
/// `None` when the two forms are mixed.
fn resolve_params(entries: Vec<ParamEntry>) -> Option<Vec<Param>> {
    if !entries
        .iter()
        .any(|entry| matches!(entry, ParamEntry::Named(..)))
    {
        return Some(
            entries
                .into_iter()
                .map(|entry| match entry {
                    ParamEntry::Bare(ty) | ParamEntry::Named(_, ty) => Param::unnamed(ty),
                })
                .collect(),
        );
    }

    let mut params = Vec::with_capacity(entries.len());
    let mut pending = Vec::new();
    for entry in entries {
        match entry {
            ParamEntry::Bare(TypeExpr::Named {
                package: None,
                name,
                args,
            }) if args.is_empty() => pending.push(name),
            ParamEntry::Bare(_) => return None,
            ParamEntry::Named(name, ty) => {
                for grouped in pending.drain(..) {
                    params.push(Param::named(grouped, ty.clone()));
                }
                params.push(Param::named(name, ty));
            }
        }
    }

    pending.is_empty().then_some(params)
}

/// Parse `( ... )` into one [`Param`] per declared name
fn parameters(input: &mut Input<'_>) -> IResult<Vec<Param>> {
    let start_remaining = input.eof_offset();
    punct(Punct::LeftParen).parse_next(input)?;

    let mut entries = Vec::new();
    while !at_punct(input, Punct::RightParen) {
        entries.push(param_entry(input)?);
        if opt(punct(Punct::Comma)).parse_next(input)?.is_none() {
            break;
        }
    }
    punct(Punct::RightParen).parse_next(input)?;

    resolve_params(entries).ok_or_else(|| {
        let mut e = ContextError::new();
        e.push(Context::Code(ErrorCode::E103));
        e.push(Context::StartOffset(start_remaining));
        ErrMode::Cut(e)
    })
}

fn signature(input: &mut Input<'_>) -> IResult<Signature> {
    let params = parameters(input)?;

    let results = if at_punct(input, Punct::LeftParen) {
        parameters(input)?
    } else if starts_type(nth_token(input, 0)) {
        vec![Param::unnamed(type_expr(input)?)]
    } else {
        Vec::new()
    };

    Ok(Signature { params, results })
}

/// Parse `[K comparable, V any]`
fn type_param_list(input: &mut Input<'_>) -> IResult<Vec<TypeParam>> {
    punct(Punct::LeftBracket).parse_next(input)?;
    let params: Vec<TypeParam> =
        separated(1.., type_param_decl, punct(Punct::Comma)).parse_next(input)?;
    opt(punct(Punct::Comma)).parse_next(input)?;
    punct(Punct::RightBracket).parse_next(input)?;
    Ok(params)
}

fn type_param_decl(input: &mut Input<'_>) -> IResult<TypeParam> {
    let names = ident_list(input)?;
    let constraint = union_terms(input)?;
    Ok(TypeParam { names, constraint })
}

/// Type parameters after a type name. `type A [N]int` declares an array, so
/// a failed attempt falls back to no parameters.
fn opt_type_params(input: &mut Input<'_>) -> IResult<Vec<TypeParam>> {
    if !at_punct(input, Punct::LeftBracket) {
        return Ok(Vec::new());
    }

    let checkpoint = input.checkpoint();
    match type_param_list(input) {
        Ok(params) => Ok(params),
        Err(ErrMode::Backtrack(_)) => {
            input.reset(&checkpoint);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Declarations
// ============================================================================

fn import_spec(input: &mut Input<'_>) -> IResult<Spec> {
    let name = opt(alt((
        ident.map(str::to_string),
        punct(Punct::Dot).value(".".to_string()),
    )))
    .parse_next(input)?;
    let path = string_lit(input)?.to_string();

    Ok(Spec::Import(ImportSpec { name, path }))
}

fn type_spec(input: &mut Input<'_>) -> IResult<Spec> {
    let name = ident(input)?.to_string();
    let type_params = opt_type_params(input)?;
    let alias = opt(punct(Punct::Assign)).parse_next(input)?.is_some();
    let ty = type_expr(input)?;

    Ok(Spec::Type(TypeSpec {
        name,
        type_params,
        alias,
        ty,
    }))
}

fn value_spec(input: &mut Input<'_>) -> IResult<Spec> {
    let names = ident_list(input)?;
    skip_value(input);
    Ok(Spec::Value(ValueSpec { names }))
}

/// Parse an `import`, `type`, `var` or `const` declaration
fn gen_decl(input: &mut Input<'_>) -> IResult<GenDecl> {
    let kind = any
        .verify_map(|token: &PositionedToken<'_>| match token.token {
            Token::Keyword(Keyword::Import) => Some(GenKind::Import),
            Token::Keyword(Keyword::Type) => Some(GenKind::Type),
            Token::Keyword(Keyword::Var) => Some(GenKind::Var),
            Token::Keyword(Keyword::Const) => Some(GenKind::Const),
            _ => None,
        })
        .parse_next(input)?;

    let spec: fn(&mut Input<'_>) -> IResult<Spec> = match kind {
        GenKind::Import => import_spec,
        GenKind::Type => type_spec,
        GenKind::Var | GenKind::Const => value_spec,
    };

    if !at_punct(input, Punct::LeftParen) {
        let spec = spec(input)?;
        return Ok(GenDecl {
            kind,
            grouped: false,
            specs: vec![spec],
        });
    }

    punct(Punct::LeftParen).parse_next(input)?;
    let mut specs = Vec::new();
    loop {
        skip_semicolons(input);
        if at_punct(input, Punct::RightParen) {
            break;
        }
        specs.push(spec(input)?);
        if !at_punct(input, Punct::RightParen) {
            punct(Punct::Semicolon).parse_next(input)?;
        }
    }
    punct(Punct::RightParen).parse_next(input)?;

    Ok(GenDecl {
        kind,
        grouped: true,
        specs,
    })
}

fn receiver(input: &mut Input<'_>) -> IResult<Receiver> {
    let mut params = parameters
        .context(Context::Label("receiver"))
        .parse_next(input)?;

    match (params.pop(), params.is_empty()) {
        (Some(Param { name, ty }), true) => Ok(Receiver { name, ty }),
        _ => Err(backtrack("single receiver")),
    }
}

/// Parse a function or method declaration, skipping its body
fn func_decl(input: &mut Input<'_>) -> IResult<FuncDecl> {
    keyword(Keyword::Func).parse_next(input)?;

    let recv = if at_punct(input, Punct::LeftParen) {
        Some(receiver(input)?)
    } else {
        None
    };
    let name = ident(input)?.to_string();
    let type_params = if at_punct(input, Punct::LeftBracket) {
        type_param_list(input)?
    } else {
        Vec::new()
    };
    let signature = signature(input)?;

    if at_punct(input, Punct::LeftBrace) {
        skip_block(input)?;
    }

    Ok(FuncDecl {
        recv,
        name,
        type_params,
        signature,
    })
}

fn top_level_decl(input: &mut Input<'_>) -> IResult<Decl> {
    let decl = match nth_token(input, 0) {
        Some(Token::Keyword(Keyword::Func)) => Decl::Func(func_decl(input)?),
        Some(Token::Keyword(
            Keyword::Import | Keyword::Type | Keyword::Var | Keyword::Const,
        )) => Decl::Gen(gen_decl(input)?),
        _ => return Err(backtrack("top-level declaration")),
    };
    terminator(input)?;
    Ok(decl)
}

fn package_clause(input: &mut Input<'_>) -> IResult<String> {
    keyword(Keyword::Package).parse_next(input)?;
    let name = ident(input)?.to_string();
    terminator(input)?;
    Ok(name)
}

fn source_file(input: &mut Input<'_>) -> IResult<SourceFile> {
    let package = cut_err(input, package_clause)?;

    let mut decls = Vec::new();
    loop {
        skip_semicolons(input);
        if input.eof_offset() == 0 {
            break;
        }
        decls.push(cut_err(input, top_level_decl)?);
    }

    Ok(SourceFile { package, decls })
}

/// Convert a winnow error into a diagnostic pointing at the offending token.
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken],
    current_remaining: usize,
) -> Diagnostic {
    let context_error = match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e,
        // Token slices are never partial.
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    // The innermost StartOffset marks where the failing construct began
    let start_remaining = context_error.context().find_map(|ctx| match ctx {
        Context::StartOffset(n) => Some(*n),
        _ => None,
    });
    let code = context_error.context().find_map(|ctx| match ctx {
        Context::Code(code) => Some(*code),
        _ => None,
    });

    let end_offset = tokens.len() - current_remaining;
    let start_offset = start_remaining.map(|r| tokens.len() - r).unwrap_or(0);
    let last_span = tokens.last().map(|t| t.span).unwrap_or_default();

    if code == Some(ErrorCode::E104) {
        let span = tokens.get(end_offset).map(|t| t.span).unwrap_or(last_span);
        return Diagnostic::error(format!(
            "type nesting exceeds the maximum depth of {MAX_TYPE_NESTING}"
        ))
        .with_code(ErrorCode::E104)
        .with_label(span, "type nested too deeply")
        .with_help("introduce named types for the inner levels");
    }

    if code == Some(ErrorCode::E103) {
        let first = tokens.get(start_offset).map(|t| t.span).unwrap_or(last_span);
        let last = end_offset
            .checked_sub(1)
            .and_then(|i| tokens.get(i))
            .map(|t| t.span)
            .unwrap_or(first);
        return Diagnostic::error("mixed named and unnamed parameters")
            .with_code(ErrorCode::E103)
            .with_label(first.union(last), "parameter list")
            .with_help("name every parameter or none of them");
    }

    let declaration_start = (start_offset < end_offset)
        .then(|| tokens.get(start_offset).map(|t| t.span))
        .flatten();

    let Some(offending) = tokens.get(end_offset) else {
        let mut diag = Diagnostic::error("incomplete input, more tokens expected")
            .with_code(ErrorCode::E101)
            .with_label(Span::new(last_span.end()..last_span.end()), "input ends here")
            .with_help("check for an unclosed `{`, `(` or `[`");
        if let Some(span) = declaration_start {
            diag = diag.with_secondary_label(span, "declaration starts here");
        }
        return diag;
    };

    let contexts: Vec<String> = context_error
        .context()
        .filter_map(|ctx| match ctx {
            Context::Label(label) => Some(format!("expected {label}")),
            _ => None,
        })
        .collect();

    let message = if contexts.is_empty() {
        format!("unexpected token `{}`", offending.token)
    } else {
        format!(
            "unexpected token `{}`: {}",
            offending.token,
            contexts.join(" → ")
        )
    };

    let mut diag = Diagnostic::error(message)
        .with_code(ErrorCode::E100)
        .with_label(offending.span, "unexpected token")
        .with_help("check syntax and token positioning");
    if let Some(span) = declaration_start {
        diag = diag.with_secondary_label(span, "declaration starts here");
    }
    diag
}

/// Parse a significant token stream (see
/// [`terminate_statements`](crate::lexer::terminate_statements)) into a
/// [`SourceFile`].
pub fn parse_source_file<'src>(
    tokens: &'src [PositionedToken<'src>],
) -> Result<SourceFile, Diagnostic> {
    match tokens.first() {
        Some(PositionedToken {
            token: Token::Keyword(Keyword::Package),
            ..
        }) => {}
        first => {
            let span = first.map(|t| t.span).unwrap_or_default();
            return Err(Diagnostic::error("missing package clause")
                .with_code(ErrorCode::E102)
                .with_label(span, "expected `package`")
                .with_help("start the file with `package <name>`"));
        }
    }

    let mut token_slice = new_input(tokens);

    match source_file.parse_next(&mut token_slice) {
        Ok(file) => Ok(file),
        Err(e) => {
            let current_remaining = token_slice.eof_offset();
            Err(convert_error(e, tokens, current_remaining))
        }
    }
}
