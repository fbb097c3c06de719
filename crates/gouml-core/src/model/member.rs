//! Members of a declared type: fields and methods.

use crate::visibility::Visibility;

/// A named field of a record type.
///
/// The type is kept as the textual type expression produced by the parser,
/// so pointer, slice, map and qualifier syntax survive unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    type_expr: String,
}

impl Field {
    /// Creates a new field.
    ///
    /// # Examples
    ///
    /// ```
    /// use gouml_core::model::Field;
    ///
    /// let field = Field::new("engine", "*Engine");
    /// assert_eq!(field.name(), "engine");
    /// assert_eq!(field.type_expr(), "*Engine");
    /// ```
    pub fn new(name: impl Into<String>, type_expr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_expr: type_expr.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_expr(&self) -> &str {
        &self.type_expr
    }

    /// Returns the visibility derived from the field name.
    pub fn visibility(&self) -> Visibility {
        Visibility::of(&self.name)
    }
}

/// A single method parameter.
///
/// Unnamed parameters (`func(int, string)`) carry an empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    type_expr: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_expr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_expr: type_expr.into(),
        }
    }

    /// Creates a parameter without a name.
    pub fn unnamed(type_expr: impl Into<String>) -> Self {
        Self::new(String::new(), type_expr)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_expr(&self) -> &str {
        &self.type_expr
    }

    /// Returns `true` if the parameter was declared without a name.
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }
}

/// A method signature attached to a record type or declared by an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    name: String,
    parameters: Vec<Parameter>,
    returns: Vec<String>,
}

impl Method {
    /// Creates a new method.
    ///
    /// # Examples
    ///
    /// ```
    /// use gouml_core::model::{Method, Parameter};
    ///
    /// let method = Method::new(
    ///     "DoWork",
    ///     vec![Parameter::new("count", "int")],
    ///     vec!["int".to_string(), "error".to_string()],
    /// );
    /// assert_eq!(method.returns().len(), 2);
    /// ```
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>, returns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            parameters,
            returns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn returns(&self) -> &[String] {
        &self.returns
    }

    /// Returns the visibility derived from the method name.
    pub fn visibility(&self) -> Visibility {
        Visibility::of(&self.name)
    }

    /// Checks whether two methods have the same signature.
    ///
    /// Signatures match when the names are equal, the ordered parameter types
    /// are equal and the ordered return types are equal. Parameter names are
    /// not part of the signature, and type expressions are compared as text.
    pub fn same_signature(&self, other: &Method) -> bool {
        self.name == other.name
            && self.returns == other.returns
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(a, b)| a.type_expr == b.type_expr)
    }
}
