//! Syntax tree of a single Go source file, down to declaration level.
//!
//! Function bodies and initializer expressions are skipped by the parser and
//! have no representation here. Every [`TypeExpr`] prints back to its
//! canonical Go spelling through [`Display`](fmt::Display), which is the text
//! the class model stores for field, parameter and result types.

use std::fmt;

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Name from the `package` clause.
    pub package: String,
    pub decls: Vec<Decl>,
}

impl SourceFile {
    /// Iterates over the general declarations of the given kind.
    pub fn gen_decls(&self, kind: GenKind) -> impl Iterator<Item = &GenDecl> {
        self.decls.iter().filter_map(move |decl| match decl {
            Decl::Gen(gen_decl) if gen_decl.kind == kind => Some(gen_decl),
            _ => None,
        })
    }

    /// Iterates over function and method declarations.
    pub fn func_decls(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Func(func_decl) => Some(func_decl),
            Decl::Gen(_) => None,
        })
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// `import`, `type`, `var` or `const`, single or grouped.
    Gen(GenDecl),
    Func(FuncDecl),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenKind {
    Import,
    Type,
    Var,
    Const,
}

/// A general declaration. A single spec and a parenthesized group both
/// produce one `GenDecl`; `grouped` tells them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenDecl {
    pub kind: GenKind,
    pub grouped: bool,
    pub specs: Vec<Spec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spec {
    Import(ImportSpec),
    Type(TypeSpec),
    Value(ValueSpec),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Local name, `.` or `_`, when given.
    pub name: Option<String>,
    /// Import path literal including its quotes.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    pub type_params: Vec<TypeParam>,
    /// `type A = B`
    pub alias: bool,
    pub ty: TypeExpr,
}

/// A `var` or `const` spec. Only the declared names are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub recv: Option<Receiver>,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub signature: Signature,
}

impl FuncDecl {
    pub fn is_method(&self) -> bool {
        self.recv.is_some()
    }
}

/// Method receiver such as `(c *Car)` or `(List[T])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

impl Receiver {
    /// The receiver's base type name with pointer and type arguments removed.
    ///
    /// `*Car` and `List[T]` yield `Car` and `List`. Returns `None` for
    /// receiver types that cannot name a method set.
    pub fn base_type_name(&self) -> Option<&str> {
        let mut ty = &self.ty;
        loop {
            match ty {
                TypeExpr::Pointer(inner) | TypeExpr::Paren(inner) => ty = inner,
                TypeExpr::Named {
                    package: None,
                    name,
                    ..
                } => return Some(name),
                _ => return None,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub names: Vec<String>,
    /// Constraint union; a plain constraint is a single term.
    pub constraint: Vec<Term>,
}

/// Parameters and results of a function type, one entry per declared name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Param>,
    pub results: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

impl Param {
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self { name: None, ty }
    }
}

/// A struct field line. Empty `names` means an embedded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    pub tag: Option<String>,
}

impl FieldDecl {
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceElem {
    Method { name: String, signature: Signature },
    /// An embedded interface or a single non-approximate type term.
    Embedded(TypeExpr),
    /// A type-set union such as `~int | ~string`.
    Union(Vec<Term>),
}

/// One term of a type-set union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// `~T`
    pub tilde: bool,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Named {
        package: Option<String>,
        name: String,
        args: Vec<TypeExpr>,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array {
        /// Length expression as written, without spaces.
        len: String,
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Func(Signature),
    Struct(Vec<FieldDecl>),
    Interface(Vec<InterfaceElem>),
    /// `(T)`
    Paren(Box<TypeExpr>),
    /// Variadic parameter type `...T`.
    Ellipsis(Box<TypeExpr>),
}

impl TypeExpr {
    /// A bare type name such as `int` or `Engine`.
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named {
            package: None,
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A package-qualified type name such as `io.Reader`.
    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Named {
            package: Some(package.into()),
            name: name.into(),
            args: Vec::new(),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named {
                package,
                name,
                args,
            } => {
                if let Some(package) = package {
                    write!(f, "{package}.")?;
                }
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("[")?;
                    write_list(f, args, ", ")?;
                    f.write_str("]")?;
                }
                Ok(())
            }
            TypeExpr::Pointer(elem) => write!(f, "*{elem}"),
            TypeExpr::Slice(elem) => write!(f, "[]{elem}"),
            TypeExpr::Array { len, elem } => write!(f, "[{len}]{elem}"),
            TypeExpr::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeExpr::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {elem}"),
                ChanDir::Send => write!(f, "chan<- {elem}"),
                ChanDir::Recv => write!(f, "<-chan {elem}"),
            },
            TypeExpr::Func(signature) => write!(f, "func{signature}"),
            TypeExpr::Struct(fields) => {
                f.write_str("struct{")?;
                write_list(f, fields, "; ")?;
                f.write_str("}")
            }
            TypeExpr::Interface(elems) => {
                f.write_str("interface{")?;
                write_list(f, elems, "; ")?;
                f.write_str("}")
            }
            TypeExpr::Paren(inner) => write!(f, "({inner})"),
            TypeExpr::Ellipsis(elem) => write!(f, "...{elem}"),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} {}", self.ty),
            None => write!(f, "{}", self.ty),
        }
    }
}

/// Prints `(params) results` as it follows `func` or a method name.
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_list(f, &self.params, ", ")?;
        f.write_str(")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] if single.name.is_none() => write!(f, " {single}"),
            results => {
                f.write_str(" (")?;
                write_list(f, results, ", ")?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for FieldDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.names.is_empty() {
            write_list(f, &self.names, ", ")?;
            f.write_str(" ")?;
        }
        write!(f, "{}", self.ty)?;
        if let Some(tag) = &self.tag {
            write!(f, " {tag}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tilde {
            f.write_str("~")?;
        }
        write!(f, "{}", self.ty)
    }
}

impl fmt::Display for InterfaceElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceElem::Method { name, signature } => write!(f, "{name}{signature}"),
            InterfaceElem::Embedded(ty) => write!(f, "{ty}"),
            InterfaceElem::Union(terms) => write_list(f, terms, " | "),
        }
    }
}
